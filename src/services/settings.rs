use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Settings;

pub const SETTINGS_FILE: &str = "settings.json";

/// Reads settings from a JSON file. A missing file means defaults; fields left
/// out of the file keep their defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let raw = std::fs::read_to_string(path).with_context(|| format!("Read settings {}", path.display()))?;
    let settings = serde_json::from_str(&raw).with_context(|| format!("Parse settings {}", path.display()))?;
    Ok(settings)
}

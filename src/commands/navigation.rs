use crate::models::NavigationView;
use crate::services::navigation::resolve_navigation;

#[tauri::command]
pub async fn get_navigation(path: String) -> Result<NavigationView, String> {
    Ok(resolve_navigation(&path))
}

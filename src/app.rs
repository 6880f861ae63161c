use anyhow::anyhow;
use std::path::Path;
use tauri::Manager;
use tracing::{info, warn};

use crate::commands;
use crate::models::Settings;
use crate::services::settings::{load_settings, SETTINGS_FILE};
use crate::services::state::AppState;

pub fn run() {
    crate::init_tracing();

    tauri::Builder::default()
        .setup(|app| {
            let config_dir = app
                .path()
                .app_config_dir()
                .map_err(|e| anyhow!("App config dir: {}", e))?;
            let settings = resolve_settings(&config_dir.join(SETTINGS_FILE));

            info!(order_no_prefix = %settings.order_no_prefix, "starting itemdesk");
            app.manage(AppState::new(settings));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::navigation::get_navigation,
            commands::catalog::get_catalog,
            commands::catalog::open_item_form,
            commands::catalog::open_catalog_supplier_picker,
            commands::catalog::close_catalog_dialog,
            commands::catalog::update_item_draft,
            commands::catalog::attach_item_images,
            commands::catalog::select_catalog_supplier,
            commands::catalog::add_item,
            commands::catalog::reset_catalog,
            commands::purchase_order::get_purchase_order,
            commands::purchase_order::open_line_item_form,
            commands::purchase_order::open_order_supplier_picker,
            commands::purchase_order::close_order_dialog,
            commands::purchase_order::update_line_item_draft,
            commands::purchase_order::select_order_supplier,
            commands::purchase_order::set_order_supplier_name,
            commands::purchase_order::add_line_item,
            commands::purchase_order::reset_purchase_order,
            commands::purchase_order::export_purchase_order,
            commands::purchase_order::print_purchase_order,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

fn resolve_settings(path: &Path) -> Settings {
    match load_settings(path) {
        Ok(settings) => settings,
        Err(err) => {
            warn!(error = %err, "falling back to default settings");
            Settings::default()
        }
    }
}

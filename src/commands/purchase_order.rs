use crate::commands::catalog::UpdateDraftPayload;
use crate::error::CommandError;
use crate::models::PurchaseOrderView;
use crate::services::export::{export_to_spreadsheet, write_export};
use crate::services::print::{print_document, render_printable_document};
use crate::services::print_window::WebviewPrintSurface;
use crate::services::state::AppState;
use tauri::{AppHandle, State};
use tracing::warn;

fn view(state: &AppState) -> Result<PurchaseOrderView, CommandError> {
    let screen = state.purchase_order()?;
    Ok(screen.view(&state.settings.currency_symbol))
}

#[tauri::command]
pub async fn get_purchase_order(state: State<'_, AppState>) -> Result<PurchaseOrderView, CommandError> {
    view(&state)
}

#[tauri::command]
pub async fn open_line_item_form(state: State<'_, AppState>) -> Result<PurchaseOrderView, CommandError> {
    state.purchase_order()?.open_item_form();
    view(&state)
}

#[tauri::command]
pub async fn open_order_supplier_picker(state: State<'_, AppState>) -> Result<PurchaseOrderView, CommandError> {
    state.purchase_order()?.open_supplier_picker();
    view(&state)
}

#[tauri::command]
pub async fn close_order_dialog(state: State<'_, AppState>) -> Result<PurchaseOrderView, CommandError> {
    state.purchase_order()?.close_dialog();
    view(&state)
}

#[tauri::command]
pub async fn update_line_item_draft(
    payload: UpdateDraftPayload,
    state: State<'_, AppState>,
) -> Result<PurchaseOrderView, CommandError> {
    state.purchase_order()?.update_draft(&payload.field_name, &payload.value)?;
    view(&state)
}

#[tauri::command]
pub async fn select_order_supplier(supplier_id: u32, state: State<'_, AppState>) -> Result<PurchaseOrderView, CommandError> {
    state.purchase_order()?.select_supplier(supplier_id)?;
    view(&state)
}

#[tauri::command]
pub async fn set_order_supplier_name(name: String, state: State<'_, AppState>) -> Result<PurchaseOrderView, CommandError> {
    state.purchase_order()?.set_supplier_name(&name);
    view(&state)
}

#[tauri::command]
pub async fn add_line_item(state: State<'_, AppState>) -> Result<PurchaseOrderView, CommandError> {
    state.purchase_order()?.add_line_item()?;
    view(&state)
}

#[tauri::command]
pub async fn reset_purchase_order(state: State<'_, AppState>) -> Result<PurchaseOrderView, CommandError> {
    state.reset_purchase_order()?;
    view(&state)
}

/// Builds the workbook and asks where to save it. `None` when the user
/// cancels the save dialog.
#[tauri::command]
pub async fn export_purchase_order(state: State<'_, AppState>) -> Result<Option<String>, CommandError> {
    let bytes = {
        let screen = state.purchase_order()?;
        export_to_spreadsheet(screen.line_items(), &state.settings.sheet_name)?
    };

    let Some(path) = rfd::FileDialog::new()
        .set_file_name(state.settings.export_file_name.as_str())
        .add_filter("Excel workbook", &["xlsx"])
        .save_file()
    else {
        return Ok(None);
    };

    write_export(&path, &bytes)?;
    Ok(Some(path.to_string_lossy().to_string()))
}

#[tauri::command]
pub async fn print_purchase_order(app: AppHandle, state: State<'_, AppState>) -> Result<(), CommandError> {
    let document = {
        let screen = state.purchase_order()?;
        render_printable_document(screen.header(), screen.line_items(), &state.settings.currency_symbol)
    };

    tauri::async_runtime::spawn_blocking(move || {
        let mut surface = WebviewPrintSurface::new(app);
        if let Err(err) = print_document(&mut surface, &document) {
            warn!(error = %err, "print purchase order");
        }
    });
    Ok(())
}

use crate::error::CommandError;
use crate::models::CatalogView;
use crate::services::state::AppState;
use crate::utils::decode_image;
use serde::Deserialize;
use tauri::State;

#[derive(Deserialize)]
pub struct UpdateDraftPayload {
    pub field_name: String,
    pub value: String,
}

#[derive(Deserialize)]
pub struct ImagePayload {
    pub file_name: String,
    pub content_type: String,
    pub data: String,
}

fn view(state: &AppState) -> Result<CatalogView, CommandError> {
    let screen = state.catalog()?;
    Ok(screen.view(&state.settings.currency_symbol))
}

#[tauri::command]
pub async fn get_catalog(state: State<'_, AppState>) -> Result<CatalogView, CommandError> {
    view(&state)
}

#[tauri::command]
pub async fn open_item_form(state: State<'_, AppState>) -> Result<CatalogView, CommandError> {
    state.catalog()?.open_item_form();
    view(&state)
}

#[tauri::command]
pub async fn open_catalog_supplier_picker(state: State<'_, AppState>) -> Result<CatalogView, CommandError> {
    state.catalog()?.open_supplier_picker();
    view(&state)
}

#[tauri::command]
pub async fn close_catalog_dialog(state: State<'_, AppState>) -> Result<CatalogView, CommandError> {
    state.catalog()?.close_dialog();
    view(&state)
}

#[tauri::command]
pub async fn update_item_draft(
    payload: UpdateDraftPayload,
    state: State<'_, AppState>,
) -> Result<CatalogView, CommandError> {
    state.catalog()?.update_draft(&payload.field_name, &payload.value)?;
    view(&state)
}

#[tauri::command]
pub async fn attach_item_images(
    images: Vec<ImagePayload>,
    state: State<'_, AppState>,
) -> Result<CatalogView, CommandError> {
    let decoded = images
        .iter()
        .map(|image| decode_image(&image.file_name, &image.content_type, &image.data))
        .collect::<Result<Vec<_>, _>>()?;
    state.catalog()?.attach_images(decoded);
    view(&state)
}

#[tauri::command]
pub async fn select_catalog_supplier(supplier_id: u32, state: State<'_, AppState>) -> Result<CatalogView, CommandError> {
    state.catalog()?.select_supplier(supplier_id)?;
    view(&state)
}

#[tauri::command]
pub async fn add_item(state: State<'_, AppState>) -> Result<CatalogView, CommandError> {
    state.catalog()?.add_item()?;
    view(&state)
}

#[tauri::command]
pub async fn reset_catalog(state: State<'_, AppState>) -> Result<CatalogView, CommandError> {
    state.reset_catalog()?;
    view(&state)
}

use tracing::{debug, info};

use crate::db::{InMemoryRepository, Repository};
use crate::error::ValidationError;
use crate::models::{CatalogView, DialogState, Item, ItemDraft, ItemImage, ItemSummary, StockUnit, Supplier};
use crate::services::suppliers::SupplierDirectory;
use crate::utils::{format_money, image_data_url, parse_amount};

/// State behind the item catalog screen: the item list, the add-item draft and
/// whichever dialog is on top.
pub struct CatalogScreen<R = InMemoryRepository<Item>> {
    items: R,
    draft: ItemDraft,
    dialog: DialogState,
    picker_origin: DialogState,
    suppliers: SupplierDirectory,
}

impl CatalogScreen {
    pub fn new(suppliers: SupplierDirectory) -> Self {
        Self::with_repository(InMemoryRepository::new(), suppliers)
    }
}

impl<R: Repository<Item>> CatalogScreen<R> {
    pub fn with_repository(items: R, suppliers: SupplierDirectory) -> Self {
        CatalogScreen {
            items,
            draft: ItemDraft::default(),
            dialog: DialogState::Closed,
            picker_origin: DialogState::Closed,
            suppliers,
        }
    }

    pub fn items(&self) -> &[Item] {
        self.items.list_items()
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn dialog(&self) -> DialogState {
        self.dialog
    }

    pub fn open_item_form(&mut self) {
        self.dialog = DialogState::ShowingItemForm;
    }

    /// Cancelling the picker returns to whatever it was opened from. A
    /// selection always lands on the item form, since that is where the
    /// supplier name goes.
    pub fn open_supplier_picker(&mut self) {
        if self.dialog != DialogState::ShowingSupplierPicker {
            self.picker_origin = self.dialog;
        }
        self.dialog = DialogState::ShowingSupplierPicker;
    }

    pub fn close_dialog(&mut self) {
        self.dialog = match self.dialog {
            DialogState::ShowingSupplierPicker => self.picker_origin,
            DialogState::ShowingItemForm | DialogState::Closed => {
                self.draft = ItemDraft::default();
                DialogState::Closed
            }
        };
    }

    pub fn update_draft(&mut self, field_name: &str, value: &str) -> Result<(), ValidationError> {
        let value = value.to_string();
        match field_name {
            "name" => self.draft.name = value,
            "location" => self.draft.location = value,
            "brand" => self.draft.brand = value,
            "category" => self.draft.category = value,
            "stock_unit" => self.draft.stock_unit = value,
            "unit_price" => self.draft.unit_price = value,
            "status" => self.draft.status = value,
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    pub fn attach_images(&mut self, images: Vec<ItemImage>) {
        self.draft.images = images;
    }

    pub fn select_supplier(&mut self, supplier_id: u32) -> Result<&Supplier, ValidationError> {
        if self.dialog != DialogState::ShowingSupplierPicker {
            return Err(ValidationError::PickerClosed);
        }
        let supplier = self.suppliers.find(supplier_id)?;
        self.draft.supplier_name = supplier.name.clone();
        self.dialog = DialogState::ShowingItemForm;
        Ok(supplier)
    }

    /// Validates the draft and appends it. Returns the new sequence number.
    /// On error the draft and dialog are left as they were.
    pub fn add_item(&mut self) -> Result<u32, ValidationError> {
        let sequence_number = self.items.len() as u32 + 1;
        let item = parse_draft(&self.draft, sequence_number).map_err(|err| {
            debug!(error = %err, "item draft rejected");
            err
        })?;

        info!(sequence_number, name = %item.name, "item added");
        self.items.add_item(item);
        self.draft = ItemDraft::default();
        self.dialog = DialogState::Closed;
        Ok(sequence_number)
    }

    pub fn reset(&mut self) {
        self.items.reset();
        self.draft = ItemDraft::default();
        self.dialog = DialogState::Closed;
    }

    pub fn view(&self, currency_symbol: &str) -> CatalogView {
        CatalogView {
            items: self
                .items()
                .iter()
                .map(|item| summarize(item, currency_symbol))
                .collect(),
            draft: self.draft.clone(),
            dialog: self.dialog,
            suppliers: self.suppliers.all().to_vec(),
            stock_units: StockUnit::ALL.to_vec(),
        }
    }
}

fn parse_draft(draft: &ItemDraft, sequence_number: u32) -> Result<Item, ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }
    let stock_unit = draft.stock_unit.parse()?;
    let unit_price = parse_amount("unit_price", &draft.unit_price)?;
    let status = draft.status.parse()?;

    Ok(Item {
        sequence_number,
        name: name.to_string(),
        location: draft.location.trim().to_string(),
        brand: draft.brand.trim().to_string(),
        category: draft.category.trim().to_string(),
        supplier_name: draft.supplier_name.clone(),
        stock_unit,
        unit_price,
        images: draft.images.clone(),
        status,
    })
}

fn summarize(item: &Item, currency_symbol: &str) -> ItemSummary {
    ItemSummary {
        sequence_number: item.sequence_number,
        name: item.name.clone(),
        location: item.location.clone(),
        brand: item.brand.clone(),
        category: item.category.clone(),
        supplier_name: item.supplier_name.clone(),
        stock_unit: item.stock_unit,
        unit_price: format_money(currency_symbol, item.unit_price),
        images: item.images.iter().map(image_data_url).collect(),
        status: item.status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemStatus;

    fn screen() -> CatalogScreen {
        CatalogScreen::new(SupplierDirectory::builtin())
    }

    fn fill(screen: &mut CatalogScreen, name: &str, price: &str) {
        screen.open_item_form();
        screen.update_draft("name", name).unwrap();
        screen.update_draft("stock_unit", "kg").unwrap();
        screen.update_draft("unit_price", price).unwrap();
    }

    #[test]
    fn add_item_assigns_sequence_and_clears_form() {
        let mut screen = screen();
        fill(&mut screen, "Flour", "1.20");
        screen.update_draft("status", "Disabled").unwrap();

        assert_eq!(screen.add_item().unwrap(), 1);
        assert_eq!(screen.dialog(), DialogState::Closed);
        assert_eq!(screen.draft(), &ItemDraft::default());

        let item = &screen.items()[0];
        assert_eq!(item.name, "Flour");
        assert_eq!(item.stock_unit, StockUnit::Kg);
        assert_eq!(item.unit_price, 1.2);
        assert_eq!(item.status, ItemStatus::Disabled);
    }

    #[test]
    fn bad_price_keeps_draft_and_dialog() {
        let mut screen = screen();
        fill(&mut screen, "Sugar", "cheap");

        let err = screen.add_item().unwrap_err();
        assert_eq!(err.field(), Some("unit_price"));
        assert!(screen.items().is_empty());
        assert_eq!(screen.draft().name, "Sugar");
        assert_eq!(screen.dialog(), DialogState::ShowingItemForm);
    }

    #[test]
    fn missing_stock_unit_and_name_are_rejected() {
        let mut screen = screen();
        screen.update_draft("unit_price", "3").unwrap();
        assert_eq!(screen.add_item(), Err(ValidationError::Required { field: "name" }));

        screen.update_draft("name", "Salt").unwrap();
        assert_eq!(screen.add_item(), Err(ValidationError::Required { field: "stock_unit" }));
    }

    #[test]
    fn picker_returns_to_item_form() {
        let mut screen = screen();
        screen.open_item_form();
        screen.open_supplier_picker();
        let name = screen.select_supplier(3).unwrap().name.clone();

        assert_eq!(name, "Supplier C");
        assert_eq!(screen.draft().supplier_name, "Supplier C");
        assert_eq!(screen.dialog(), DialogState::ShowingItemForm);

        screen.open_supplier_picker();
        screen.close_dialog();
        assert_eq!(screen.dialog(), DialogState::ShowingItemForm);
        assert_eq!(screen.draft().supplier_name, "Supplier C");
    }

    #[test]
    fn cancelled_picker_does_not_open_the_form() {
        let mut screen = screen();
        screen.open_supplier_picker();
        screen.close_dialog();
        assert_eq!(screen.dialog(), DialogState::Closed);
        assert_eq!(screen.draft(), &ItemDraft::default());

        screen.open_supplier_picker();
        screen.select_supplier(1).unwrap();
        assert_eq!(screen.dialog(), DialogState::ShowingItemForm);
        assert_eq!(screen.draft().supplier_name, "Supplier A");
    }

    #[test]
    fn selecting_without_picker_is_rejected() {
        let mut screen = screen();
        assert_eq!(screen.select_supplier(1).unwrap_err(), ValidationError::PickerClosed);
    }

    #[test]
    fn cancelling_item_form_discards_draft() {
        let mut screen = screen();
        fill(&mut screen, "Rice", "2");
        screen.close_dialog();
        assert_eq!(screen.dialog(), DialogState::Closed);
        assert_eq!(screen.draft(), &ItemDraft::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut screen = screen();
        assert_eq!(
            screen.update_draft("supplier_name", "Sneaky"),
            Err(ValidationError::UnknownField("supplier_name".to_string()))
        );
    }

    #[test]
    fn view_formats_price_and_images() {
        let mut screen = screen();
        fill(&mut screen, "Oil", "4.5");
        screen.attach_images(vec![ItemImage {
            file_name: "oil.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }]);
        screen.add_item().unwrap();

        let view = screen.view("$");
        assert_eq!(view.items[0].unit_price, "$4.50");
        assert_eq!(view.items[0].images, ["data:image/png;base64,AQID"]);
        assert_eq!(view.suppliers.len(), 3);
    }
}

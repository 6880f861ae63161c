use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::db::{InMemoryRepository, Repository};
use crate::error::ValidationError;
use crate::models::{
    DialogState, LineItem, LineItemDraft, LineItemSummary, OrderHeader, PurchaseOrderView, Settings,
    StockUnit, Supplier,
};
use crate::services::suppliers::SupplierDirectory;
use crate::utils::{format_money, format_order_date, generate_order_no, parse_amount};

/// Sum of net amounts, recomputed from the list on every call.
pub fn total(line_items: &[LineItem]) -> f64 {
    line_items.iter().fold(0.0, |acc, item| acc + item.net_amount)
}

pub struct PurchaseOrderScreen<R = InMemoryRepository<LineItem>> {
    header: OrderHeader,
    line_items: R,
    draft: LineItemDraft,
    dialog: DialogState,
    picker_origin: DialogState,
    suppliers: SupplierDirectory,
}

impl PurchaseOrderScreen {
    pub fn new(suppliers: SupplierDirectory, settings: &Settings) -> Self {
        Self::mount_at(InMemoryRepository::new(), suppliers, settings, Local::now())
    }
}

impl<R: Repository<LineItem>> PurchaseOrderScreen<R> {
    /// Header fields are fixed here and never regenerated for this instance.
    pub fn mount_at(line_items: R, suppliers: SupplierDirectory, settings: &Settings, now: DateTime<Local>) -> Self {
        let header = OrderHeader {
            order_no: generate_order_no(&settings.order_no_prefix, now),
            order_date: format_order_date(&settings.date_format, now),
            supplier_name: String::new(),
        };
        debug!(order_no = %header.order_no, "purchase order mounted");
        PurchaseOrderScreen {
            header,
            line_items,
            draft: LineItemDraft::default(),
            dialog: DialogState::Closed,
            picker_origin: DialogState::Closed,
            suppliers,
        }
    }

    pub fn header(&self) -> &OrderHeader {
        &self.header
    }

    pub fn line_items(&self) -> &[LineItem] {
        self.line_items.list_items()
    }

    pub fn draft(&self) -> &LineItemDraft {
        &self.draft
    }

    pub fn dialog(&self) -> DialogState {
        self.dialog
    }

    pub fn total(&self) -> f64 {
        total(self.line_items())
    }

    pub fn open_item_form(&mut self) {
        self.dialog = DialogState::ShowingItemForm;
    }

    /// Remembers what was showing; selecting or cancelling goes back there, so
    /// an open line-item form keeps its draft.
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
                self.draft = LineItemDraft::default();
                DialogState::Closed
            }
        };
    }

    pub fn update_draft(&mut self, field_name: &str, value: &str) -> Result<(), ValidationError> {
        let value = value.to_string();
        match field_name {
            "item_no" => self.draft.item_no = value,
            "item_name" => self.draft.item_name = value,
            "stock_unit" => self.draft.stock_unit = value,
            "unit_price" => self.draft.unit_price = value,
            "packing_unit" => self.draft.packing_unit = value,
            "order_qty" => self.draft.order_qty = value,
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// The header's supplier field also accepts free text.
    pub fn set_supplier_name(&mut self, name: &str) {
        self.header.supplier_name = name.to_string();
    }

    pub fn select_supplier(&mut self, supplier_id: u32) -> Result<&Supplier, ValidationError> {
        if self.dialog != DialogState::ShowingSupplierPicker {
            return Err(ValidationError::PickerClosed);
        }
        let supplier = self.suppliers.find(supplier_id)?;
        self.header.supplier_name = supplier.name.clone();
        self.dialog = self.picker_origin;
        Ok(supplier)
    }

    /// Appends the draft as a line item with its net amount frozen. Returns the
    /// new line count.
    pub fn add_line_item(&mut self) -> Result<usize, ValidationError> {
        let line_item = parse_draft(&self.draft).map_err(|err| {
            debug!(error = %err, "line item draft rejected");
            err
        })?;

        info!(
            order_no = %self.header.order_no,
            item_no = %line_item.item_no,
            net_amount = line_item.net_amount,
            "line item added"
        );
        self.line_items.add_item(line_item);
        self.draft = LineItemDraft::default();
        self.dialog = DialogState::Closed;
        Ok(self.line_items.len())
    }

    pub fn view(&self, currency_symbol: &str) -> PurchaseOrderView {
        let total = self.total();
        PurchaseOrderView {
            header: self.header.clone(),
            line_items: self
                .line_items()
                .iter()
                .map(|item| summarize(item, currency_symbol))
                .collect(),
            total,
            formatted_total: format_money(currency_symbol, total),
            draft: self.draft.clone(),
            dialog: self.dialog,
            suppliers: self.suppliers.all().to_vec(),
            stock_units: StockUnit::ALL.to_vec(),
        }
    }
}

fn parse_draft(draft: &LineItemDraft) -> Result<LineItem, ValidationError> {
    let stock_unit = draft.stock_unit.parse()?;
    let unit_price = parse_amount("unit_price", &draft.unit_price)?;
    let order_qty = parse_amount("order_qty", &draft.order_qty)?;
    let net_amount = order_qty * unit_price;
    if !net_amount.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: "net_amount",
            value: format!("{} x {}", draft.order_qty.trim(), draft.unit_price.trim()),
        });
    }

    Ok(LineItem {
        item_no: draft.item_no.trim().to_string(),
        item_name: draft.item_name.trim().to_string(),
        stock_unit,
        unit_price,
        packing_unit: draft.packing_unit.trim().to_string(),
        order_qty,
        net_amount,
    })
}

fn summarize(item: &LineItem, currency_symbol: &str) -> LineItemSummary {
    LineItemSummary {
        item_no: item.item_no.clone(),
        item_name: item.item_name.clone(),
        stock_unit: item.stock_unit,
        unit_price: format_money(currency_symbol, item.unit_price),
        packing_unit: item.packing_unit.clone(),
        order_qty: item.order_qty,
        net_amount: format_money(currency_symbol, item.net_amount),
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockUnit {
    Pcs,
    Kg,
    Liters,
}

impl StockUnit {
    pub const ALL: [StockUnit; 3] = [StockUnit::Pcs, StockUnit::Kg, StockUnit::Liters];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockUnit::Pcs => "pcs",
            StockUnit::Kg => "kg",
            StockUnit::Liters => "liters",
        }
    }
}

impl fmt::Display for StockUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockUnit {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let raw = value.trim();
        if raw.is_empty() {
            return Err(ValidationError::Required { field: "stock_unit" });
        }
        StockUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| ValidationError::UnknownStockUnit(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    #[default]
    Enabled,
    Disabled,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Enabled => "Enabled",
            ItemStatus::Disabled => "Disabled",
        }
    }
}

impl FromStr for ItemStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Enabled" => Ok(ItemStatus::Enabled),
            "Disabled" => Ok(ItemStatus::Disabled),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A catalog entry. Built once from a validated draft and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub sequence_number: u32,
    pub name: String,
    pub location: String,
    pub brand: String,
    pub category: String,
    pub supplier_name: String,
    pub stock_unit: StockUnit,
    pub unit_price: f64,
    pub images: Vec<ItemImage>,
    pub status: ItemStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_no: String,
    pub item_name: String,
    pub stock_unit: StockUnit,
    pub unit_price: f64,
    pub packing_unit: String,
    pub order_qty: f64,
    pub net_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHeader {
    pub order_no: String,
    pub order_date: String,
    pub supplier_name: String,
}

/// Raw form input for the item dialog. Numbers stay text until submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDraft {
    pub name: String,
    pub location: String,
    pub brand: String,
    pub category: String,
    pub supplier_name: String,
    pub stock_unit: String,
    pub unit_price: String,
    #[serde(serialize_with = "serialize_image_names")]
    pub images: Vec<ItemImage>,
    pub status: String,
}

impl Default for ItemDraft {
    fn default() -> Self {
        ItemDraft {
            name: String::new(),
            location: String::new(),
            brand: String::new(),
            category: String::new(),
            supplier_name: String::new(),
            stock_unit: String::new(),
            unit_price: String::new(),
            images: Vec::new(),
            status: ItemStatus::default().as_str().to_string(),
        }
    }
}

fn serialize_image_names<S>(images: &[ItemImage], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(images.iter().map(|image| image.file_name.as_str()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemDraft {
    pub item_no: String,
    pub item_name: String,
    pub stock_unit: String,
    pub unit_price: String,
    pub packing_unit: String,
    pub order_qty: String,
}

/// Which overlay a screen is showing. Only one can be visible at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    #[default]
    Closed,
    ShowingItemForm,
    ShowingSupplierPicker,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemSummary {
    pub sequence_number: u32,
    pub name: String,
    pub location: String,
    pub brand: String,
    pub category: String,
    pub supplier_name: String,
    pub stock_unit: StockUnit,
    pub unit_price: String,
    pub images: Vec<String>,
    pub status: ItemStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub items: Vec<ItemSummary>,
    pub draft: ItemDraft,
    pub dialog: DialogState,
    pub suppliers: Vec<Supplier>,
    pub stock_units: Vec<StockUnit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineItemSummary {
    pub item_no: String,
    pub item_name: String,
    pub stock_unit: StockUnit,
    pub unit_price: String,
    pub packing_unit: String,
    pub order_qty: f64,
    pub net_amount: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderView {
    pub header: OrderHeader,
    pub line_items: Vec<LineItemSummary>,
    pub total: f64,
    pub formatted_total: String,
    pub draft: LineItemDraft,
    pub dialog: DialogState,
    pub suppliers: Vec<Supplier>,
    pub stock_units: Vec<StockUnit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub label: String,
    pub path: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavigationView {
    pub links: Vec<NavLink>,
    pub active: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub order_no_prefix: String,
    pub export_file_name: String,
    pub sheet_name: String,
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            order_no_prefix: "PO-".to_string(),
            export_file_name: "purchase_order.xlsx".to_string(),
            sheet_name: "Purchase Order".to_string(),
            currency_symbol: "$".to_string(),
            date_format: "%m/%d/%Y".to_string(),
        }
    }
}

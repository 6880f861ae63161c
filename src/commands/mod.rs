pub mod catalog;
pub mod navigation;
pub mod purchase_order;

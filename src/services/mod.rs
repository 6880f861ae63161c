pub mod catalog;
pub mod export;
pub mod navigation;
pub mod print;
pub mod purchase_order;
pub mod settings;
pub mod state;
pub mod suppliers;
#[cfg(feature = "desktop")]
pub mod print_window;

use std::sync::{Mutex, MutexGuard};

use crate::error::AppError;
use crate::models::Settings;
use crate::services::catalog::CatalogScreen;
use crate::services::purchase_order::PurchaseOrderScreen;
use crate::services::suppliers::SupplierDirectory;

/// Everything the UI talks to. Each screen owns its own data; nothing is
/// shared between them except the supplier list and settings.
pub struct AppState {
    pub catalog: Mutex<CatalogScreen>,
    pub purchase_order: Mutex<PurchaseOrderScreen>,
    pub suppliers: SupplierDirectory,
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let suppliers = SupplierDirectory::builtin();
        AppState {
            catalog: Mutex::new(CatalogScreen::new(suppliers.clone())),
            purchase_order: Mutex::new(PurchaseOrderScreen::new(suppliers.clone(), &settings)),
            suppliers,
            settings,
        }
    }

    pub fn catalog(&self) -> Result<MutexGuard<'_, CatalogScreen>, AppError> {
        self.catalog.lock().map_err(|_| AppError::Lock("Catalog"))
    }

    pub fn purchase_order(&self) -> Result<MutexGuard<'_, PurchaseOrderScreen>, AppError> {
        self.purchase_order.lock().map_err(|_| AppError::Lock("Purchase order"))
    }

    pub fn reset_catalog(&self) -> Result<(), AppError> {
        self.catalog()?.reset();
        Ok(())
    }

    /// Remounts the purchase order screen, which issues a new order number.
    pub fn reset_purchase_order(&self) -> Result<(), AppError> {
        let mut screen = self.purchase_order()?;
        *screen = PurchaseOrderScreen::new(self.suppliers.clone(), &self.settings);
        Ok(())
    }
}

use crate::error::ValidationError;
use crate::models::Supplier;

/// Fixed supplier list shared by both screens.
#[derive(Debug, Clone)]
pub struct SupplierDirectory {
    suppliers: Vec<Supplier>,
}

impl SupplierDirectory {
    pub fn builtin() -> Self {
        let suppliers = [(1, "Supplier A"), (2, "Supplier B"), (3, "Supplier C")]
            .into_iter()
            .map(|(id, name)| Supplier {
                id,
                name: name.to_string(),
            })
            .collect();
        SupplierDirectory { suppliers }
    }

    pub fn all(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn find(&self, id: u32) -> Result<&Supplier, ValidationError> {
        self.suppliers
            .iter()
            .find(|supplier| supplier.id == id)
            .ok_or(ValidationError::UnknownSupplier(id))
    }
}

impl Default for SupplierDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

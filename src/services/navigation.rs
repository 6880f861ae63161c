use crate::models::{NavLink, NavigationView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ItemCatalog,
    PurchaseOrder,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::ItemCatalog, Route::PurchaseOrder];

    pub fn path(&self) -> &'static str {
        match self {
            Route::ItemCatalog => "/",
            Route::PurchaseOrder => "/purchase-order",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::ItemCatalog => "Item Master",
            Route::PurchaseOrder => "Purchase Order",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" if trimmed.starts_with('/') => "/",
            other => other,
        };
        Route::ALL.into_iter().find(|route| route.path() == normalized)
    }
}

pub fn resolve_navigation(path: &str) -> NavigationView {
    let active = Route::from_path(path);
    NavigationView {
        links: Route::ALL
            .into_iter()
            .map(|route| NavLink {
                label: route.label().to_string(),
                path: route.path().to_string(),
                active: active == Some(route),
            })
            .collect(),
        active: active.map(|route| route.path().to_string()),
    }
}

use serde::Serialize;
use thiserror::Error;

/// Rejected form input. Raised before anything reaches a repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("unknown stock unit {0:?}")]
    UnknownStockUnit(String),
    #[error("unknown status {0:?}")]
    UnknownStatus(String),
    #[error("unknown supplier id {0}")]
    UnknownSupplier(u32),
    #[error("unknown field {0:?}")]
    UnknownField(String),
    #[error("invalid image {name:?}: {reason}")]
    InvalidImage { name: String, reason: String },
    #[error("no supplier picker is open")]
    PickerClosed,
}

impl ValidationError {
    /// Form field the error should be shown next to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Required { field }
            | ValidationError::InvalidNumber { field, .. }
            | ValidationError::Negative { field } => Some(*field),
            ValidationError::UnknownStockUnit(_) => Some("stock_unit"),
            ValidationError::UnknownStatus(_) => Some("status"),
            ValidationError::UnknownSupplier(_) => Some("supplier_name"),
            ValidationError::InvalidImage { .. } => Some("images"),
            ValidationError::UnknownField(_) | ValidationError::PickerClosed => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet build failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
    #[error("writing {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("print surface could not be opened: {0}")]
    Open(String),
    #[error("print failed: {0}")]
    Print(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Print(#[from] PrintError),
    #[error("{0} lock poisoned")]
    Lock(&'static str),
}

/// Error shape handed to the frontend. `field` names the form input to mark,
/// when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandError {
    pub message: String,
    pub field: Option<String>,
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError {
            field: err.field().map(str::to_string),
            message: err.to_string(),
        }
    }
}

impl From<AppError> for CommandError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(inner) => inner.into(),
            other => CommandError {
                message: other.to_string(),
                field: None,
            },
        }
    }
}

impl From<ExportError> for CommandError {
    fn from(err: ExportError) -> Self {
        AppError::from(err).into()
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcilerError {
    #[error("Malformed invoice number '{number}': {details}")]
    MalformedInvoiceNumber { number: String, details: String },

    #[error("Per-unit cost is undefined: total quantity is zero")]
    UndefinedPerUnitCost,

    #[error("Invalid line item '{name}' on invoice '{invoice}': {details}")]
    InvalidLineItem {
        invoice: String,
        name: String,
        details: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReconcilerError>;

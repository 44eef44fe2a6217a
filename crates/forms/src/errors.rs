use thiserror::Error;

use crate::store::RecordId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown form type: {0}")]
    UnknownFormType(String),

    #[error("missing required fields: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("no form type selected")]
    NoFormSelected,
}

//! Form engine: a fixed catalog of field schemas, a draft with derived
//! completion progress, and an in-memory record store with create/edit/delete.
//!
//! All mutable state is owned by [`FormController`]; the UI layer only reads
//! through its accessors and mutates through its operations.

pub mod catalog;
pub mod controller;
pub mod draft;
pub mod errors;
pub mod schema;
pub mod store;

pub use catalog::SchemaCatalog;
pub use controller::FormController;
pub use draft::Draft;
pub use errors::FormError;
pub use schema::{FieldDef, FieldKind, FormSchema};
pub use store::{Record, RecordId, RecordStore};

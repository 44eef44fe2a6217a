//! The fixed schema catalog.
//!
//! Lookup is modeled as an asynchronous call so callers treat the catalog
//! like a remote schema service, but it always resolves immediately; the data
//! is static and constant-time to retrieve, so there is no caching layer.

use indexmap::IndexMap;
use serde::Serialize;

use crate::errors::FormError;
use crate::schema::{FieldDef, FieldKind, FormSchema};

pub const USER_INFORMATION: &str = "User Information";
pub const ADDRESS_INFORMATION: &str = "Address Information";
pub const PAYMENT_INFORMATION: &str = "Payment Information";

/// Maps form-type names to their schemas, in presentation order.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaCatalog {
    schemas: IndexMap<String, FormSchema>,
}

impl SchemaCatalog {
    /// The built-in catalog with the three supported form types.
    pub fn builtin() -> Self {
        let mut schemas = IndexMap::new();

        schemas.insert(
            USER_INFORMATION.to_string(),
            FormSchema::new(
                USER_INFORMATION,
                vec![
                    FieldDef::new("firstName", "First Name", FieldKind::Text).required(),
                    FieldDef::new("lastName", "Last Name", FieldKind::Text).required(),
                    FieldDef::new("age", "Age", FieldKind::Number),
                ],
            ),
        );

        schemas.insert(
            ADDRESS_INFORMATION.to_string(),
            FormSchema::new(
                ADDRESS_INFORMATION,
                vec![
                    FieldDef::new("street", "Street", FieldKind::Text).required(),
                    FieldDef::new("city", "City", FieldKind::Text).required(),
                    FieldDef::new(
                        "state",
                        "State",
                        FieldKind::Select {
                            options: vec![
                                "California".to_string(),
                                "Texas".to_string(),
                                "New York".to_string(),
                            ],
                        },
                    )
                    .required(),
                    FieldDef::new("zipCode", "Zip Code", FieldKind::Text),
                ],
            ),
        );

        schemas.insert(
            PAYMENT_INFORMATION.to_string(),
            FormSchema::new(
                PAYMENT_INFORMATION,
                vec![
                    FieldDef::new("cardNumber", "Card Number", FieldKind::Text).required(),
                    FieldDef::new("expiryDate", "Expiry Date", FieldKind::Date).required(),
                    FieldDef::new("cvv", "CVV", FieldKind::Secret).required(),
                    FieldDef::new("cardholderName", "Cardholder Name", FieldKind::Text)
                        .required(),
                ],
            ),
        );

        Self { schemas }
    }

    /// Form-type names in presentation order.
    pub fn type_names(&self) -> Vec<String> {
        self.schemas.keys().cloned().collect()
    }

    /// Synchronous lookup without the service-call shape.
    pub fn get(&self, name: &str) -> Option<&FormSchema> {
        self.schemas.get(name)
    }

    /// Resolve the schema for `name`. Always completes immediately; fails for
    /// names outside the catalog.
    pub async fn fetch(&self, name: &str) -> Result<FormSchema, FormError> {
        self.schemas
            .get(name)
            .cloned()
            .ok_or_else(|| FormError::UnknownFormType(name.to_string()))
    }

    /// All schemas keyed by type name (used by the schema dump).
    pub fn schemas(&self) -> &IndexMap<String, FormSchema> {
        &self.schemas
    }
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_types_in_presentation_order() {
        let catalog = SchemaCatalog::builtin();
        assert_eq!(
            catalog.type_names(),
            vec![USER_INFORMATION, ADDRESS_INFORMATION, PAYMENT_INFORMATION]
        );
    }

    #[tokio::test]
    async fn fetch_resolves_known_types() {
        let catalog = SchemaCatalog::builtin();
        let schema = catalog.fetch(USER_INFORMATION).await.unwrap();
        let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["firstName", "lastName", "age"]);
        assert!(!schema.field("age").unwrap().required);
    }

    #[tokio::test]
    async fn fetch_rejects_unknown_types() {
        let catalog = SchemaCatalog::builtin();
        let err = catalog.fetch("Shipping Information").await.unwrap_err();
        assert_eq!(
            err,
            FormError::UnknownFormType("Shipping Information".to_string())
        );
    }

    #[test]
    fn state_field_is_a_closed_choice() {
        let catalog = SchemaCatalog::builtin();
        let schema = catalog.get(ADDRESS_INFORMATION).unwrap();
        match &schema.field("state").unwrap().kind {
            FieldKind::Select { options } => {
                assert_eq!(options, &["California", "Texas", "New York"]);
            }
            other => panic!("expected a select field, got {other:?}"),
        }
    }

    #[test]
    fn payment_schema_masks_cvv() {
        let catalog = SchemaCatalog::builtin();
        let schema = catalog.get(PAYMENT_INFORMATION).unwrap();
        assert_eq!(schema.field("cvv").unwrap().kind, FieldKind::Secret);
        assert_eq!(schema.field_count(), 4);
    }
}

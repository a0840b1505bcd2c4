//! Project source port - Reads the translation project content fragment

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::value_objects::{PreconditionError, ProjectId, TranslationRequest};

#[derive(Debug, thiserror::Error)]
pub enum ProjectSourceError {
    /// Any failure to obtain a readable fragment
    #[error("Failed to fetch translation project: {0}")]
    Fetch(String),
}

/// Content fragment holding a translation project
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub fields: Vec<ProjectField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectField {
    pub name: String,
    #[serde(default)]
    pub values: Vec<serde_json::Value>,
}

const ITEMS_FIELD: &str = "items";
const TARGET_LOCALES_FIELD: &str = "targetLocales";

impl ProjectRecord {
    /// String values of the named field, empty when the field is absent
    pub fn field_values(&self, name: &str) -> Vec<String> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| {
                f.values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Items and target locales of this project
    pub fn translation_request(&self) -> Result<TranslationRequest, PreconditionError> {
        TranslationRequest::new(
            self.field_values(ITEMS_FIELD),
            self.field_values(TARGET_LOCALES_FIELD),
        )
    }
}

#[async_trait]
pub trait ProjectSourcePort: Send + Sync {
    async fn get_project(
        &self,
        project_id: &ProjectId,
        token: &str,
    ) -> Result<ProjectRecord, ProjectSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> ProjectRecord {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_translation_request_from_fields() {
        let project = record(serde_json::json!({
            "id": "abc",
            "fields": [
                { "name": "title", "values": ["Spring campaign"] },
                { "name": "items", "values": ["/content/dam/a", "/content/dam/b"] },
                { "name": "targetLocales", "values": ["de_DE", "fr_FR"] },
            ],
        }));

        let request = project.translation_request().unwrap();
        assert_eq!(request.items(), ["/content/dam/a", "/content/dam/b"]);
        assert_eq!(request.locales(), ["de_DE", "fr_FR"]);
    }

    #[test]
    fn test_missing_fields_count_as_empty() {
        let no_items = record(serde_json::json!({
            "fields": [{ "name": "targetLocales", "values": ["de_DE"] }],
        }));
        assert_eq!(
            no_items.translation_request().unwrap_err(),
            PreconditionError::NoItems
        );

        let no_locales = record(serde_json::json!({
            "fields": [
                { "name": "items", "values": ["/a"] },
                { "name": "targetLocales", "values": [] },
            ],
        }));
        assert_eq!(
            no_locales.translation_request().unwrap_err(),
            PreconditionError::NoLocales
        );

        assert_eq!(
            record(serde_json::json!({})).translation_request().unwrap_err(),
            PreconditionError::NoItems
        );
    }
}

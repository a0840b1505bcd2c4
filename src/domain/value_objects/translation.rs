//! Translation request value object
//!
//! A translation request is the validated pair of content paths to localise
//! and the locales to localise them into. It is built once per invocation and
//! never mutated afterwards.

use std::collections::HashSet;

/// Raised when a project does not carry enough data to dispatch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    #[error("No items to translate found in translation project")]
    NoItems,
    #[error("No locales found in translation project")]
    NoLocales,
}

/// Items and target locales for a single dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    items: Vec<String>,
    locales: Vec<String>,
}

impl TranslationRequest {
    /// Validate and build a request
    ///
    /// Duplicate items and locales are collapsed, keeping the order of first
    /// occurrence. Blank entries are ignored.
    pub fn new(
        items: impl IntoIterator<Item = String>,
        locales: impl IntoIterator<Item = String>,
    ) -> Result<Self, PreconditionError> {
        let items = dedup_preserving_order(items);
        if items.is_empty() {
            return Err(PreconditionError::NoItems);
        }

        let locales = dedup_preserving_order(locales);
        if locales.is_empty() {
            return Err(PreconditionError::NoLocales);
        }

        Ok(Self { items, locales })
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }
}

fn dedup_preserving_order(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_new_keeps_order_and_drops_duplicates() {
        let request = TranslationRequest::new(
            strings(&["/c", "/a", "/c", "/b", "/a"]),
            strings(&["de_DE", "fr_FR", "de_DE"]),
        )
        .unwrap();

        assert_eq!(request.items(), strings(&["/c", "/a", "/b"]).as_slice());
        assert_eq!(request.locales(), strings(&["de_DE", "fr_FR"]).as_slice());
    }

    #[test]
    fn test_new_rejects_empty_items() {
        let err = TranslationRequest::new(Vec::new(), strings(&["de_DE"])).unwrap_err();
        assert_eq!(err, PreconditionError::NoItems);
    }

    #[test]
    fn test_new_rejects_blank_items_and_empty_locales() {
        let err = TranslationRequest::new(strings(&["  "]), strings(&["de_DE"])).unwrap_err();
        assert_eq!(err, PreconditionError::NoItems);

        let err = TranslationRequest::new(strings(&["/a"]), Vec::new()).unwrap_err();
        assert_eq!(err, PreconditionError::NoLocales);
    }
}

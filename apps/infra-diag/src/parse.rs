//! The two decoding stages applied to every candidate file.
//!
//! `parse_document` only proves the bytes are a well-formed YAML mapping.
//! `parse_schema` decodes the same bytes into a typed schema whose structs
//! deny unknown fields. Both are pure; the pipeline composes them.

use crate::error::StageError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::{Mapping, Value as Yaml};
use std::collections::BTreeMap;

/// Generic document: string keys mapped to arbitrary YAML values.
pub type GenericDocument = BTreeMap<String, Yaml>;

/// Deserializer for the first document in `bytes`. Later documents in a
/// multi-document stream are not decoded.
fn first_document(bytes: &[u8]) -> Option<serde_yaml::Deserializer<'_>> {
    serde_yaml::Deserializer::from_slice(bytes).next()
}

/// Decode `bytes` as a generic YAML mapping.
///
/// Field names are not checked here. Repeated top-level keys are left to
/// the schema stage. An empty or null document decodes as an empty mapping.
pub fn parse_document(bytes: &[u8]) -> Result<GenericDocument, StageError> {
    let Some(doc) = first_document(bytes) else {
        return Ok(GenericDocument::new());
    };
    Option::<GenericDocument>::deserialize(doc)
        .map(Option::unwrap_or_default)
        .map_err(StageError::Syntax)
}

/// Decode `bytes` strictly into the schema type `T`.
///
/// An empty or null document is decoded as an empty mapping, so it passes
/// whenever every field of `T` is optional.
pub fn parse_schema<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StageError> {
    let parsed = match first_document(bytes) {
        Some(doc) => Option::<T>::deserialize(doc).map_err(StageError::Schema)?,
        None => None,
    };
    match parsed {
        Some(value) => Ok(value),
        None => serde_yaml::from_value(Yaml::Mapping(Mapping::new())).map_err(StageError::Schema),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::integration::IntegrationsConfig;

    #[test]
    fn test_document_accepts_unknown_keys() {
        let doc = parse_document(b"totally_unrecognized_key: 1\nother: [a, b]\n").unwrap();
        assert_eq!(doc.len(), 2);
        assert!(doc.contains_key("totally_unrecognized_key"));
    }

    #[test]
    fn test_document_rejects_malformed_yaml_with_location() {
        let err = parse_document(b"foo: [unclosed").unwrap_err();
        match err {
            StageError::Syntax(e) => assert!(e.location().is_some()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_document_rejects_non_mapping() {
        assert!(matches!(
            parse_document(b"- just\n- a list\n"),
            Err(StageError::Syntax(_))
        ));
    }

    #[test]
    fn test_schema_rejects_unknown_field() {
        let err = parse_schema::<IntegrationsConfig>(b"totally_unrecognized_key: 1\n").unwrap_err();
        assert!(matches!(err, StageError::Schema(_)));
        assert!(err.to_string().contains("totally_unrecognized_key"));
    }

    #[test]
    fn test_schema_rejects_duplicate_top_level_key() {
        let bytes = b"integrations: []\nintegrations: []\n";
        assert!(matches!(
            parse_schema::<IntegrationsConfig>(bytes),
            Err(StageError::Schema(_))
        ));
    }

    #[test]
    fn test_null_document_is_an_empty_mapping() {
        for bytes in [&b"~\n"[..], b"null\n", b""] {
            assert!(parse_document(bytes).unwrap().is_empty());
            let cfg = parse_schema::<IntegrationsConfig>(bytes).unwrap();
            assert!(cfg.integrations.is_empty());
        }
    }

    #[test]
    fn test_only_first_document_is_decoded() {
        let bytes = b"a: 1\n---\nb: 2\n";
        let doc = parse_document(bytes).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.contains_key("a"));
        let cfg = parse_schema::<IntegrationsConfig>(b"integrations: []\n---\nbogus: 1\n");
        assert!(cfg.is_ok());
        assert!(matches!(
            parse_schema::<IntegrationsConfig>(bytes),
            Err(StageError::Schema(_))
        ));
    }

    #[test]
    fn test_schema_accepts_minimal_config() {
        let cfg = parse_schema::<IntegrationsConfig>(b"integrations:\n  - name: nri-flex\n").unwrap();
        assert_eq!(cfg.integrations[0].name.as_deref(), Some("nri-flex"));
    }
}

//! Document-level tests: encodings, namespaces, determinism and malformed input

use arxml_export::{ErrorKind, Model, ParserConfig};

use crate::common::{
    BRAKE_SYSTEM, brake_system, fixture_bytes, fixture_path, two_component_system, utf16_le,
    with_namespace_prefix,
};

#[test]
fn test_fixture_parses() {
    let model = brake_system();
    assert_eq!(
        model.schema_namespace.as_deref(),
        Some("http://autosar.org/schema/r4.0")
    );
    assert_eq!(model.packages.len(), 3);
    assert_eq!(model.components().len(), 4);
    assert_eq!(model.interfaces().len(), 2);
    assert!(model.external_references.is_empty());
}

#[test]
fn test_parsing_is_deterministic() {
    let bytes = fixture_bytes(BRAKE_SYSTEM);
    let first = Model::from_bytes(&bytes).unwrap();
    let second = Model::from_bytes(&bytes).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_from_path_matches_from_bytes() {
    let from_path = Model::from_path(fixture_path(BRAKE_SYSTEM)).unwrap();
    assert_eq!(from_path, brake_system());
}

#[test]
fn test_from_reader() {
    let bytes = fixture_bytes(BRAKE_SYSTEM);
    let model = Model::from_reader(bytes.as_slice(), &ParserConfig::new()).unwrap();
    assert_eq!(model, brake_system());
}

#[test]
fn test_from_path_rejects_other_extensions() {
    let err = Model::from_path("model.json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedInput);
}

#[test]
fn test_from_path_missing_file() {
    let err = Model::from_path("/nonexistent/system.arxml").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_namespace_prefix_is_equivalent() {
    let plain = String::from_utf8(fixture_bytes(BRAKE_SYSTEM)).unwrap();
    let prefixed = with_namespace_prefix(&plain, "ar");
    assert!(prefixed.contains("<ar:AUTOSAR xmlns:ar="));
    assert!(prefixed.contains("</ar:SHORT-NAME>"));

    let expected = Model::from_bytes(plain.as_bytes()).unwrap();
    let actual = Model::from_bytes(prefixed.as_bytes()).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn test_utf16_input_is_equivalent() {
    let text = two_component_system();
    let expected = Model::from_bytes(text.as_bytes()).unwrap();
    let actual = Model::from_bytes(&utf16_le(&text)).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn test_utf8_bom_is_accepted() {
    let text = two_component_system();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(text.as_bytes());
    assert_eq!(
        Model::from_bytes(&bytes).unwrap(),
        Model::from_bytes(text.as_bytes()).unwrap()
    );
}

#[test]
fn test_truncated_input_fails() {
    let bytes = fixture_bytes(BRAKE_SYSTEM);
    for cut in [bytes.len() / 4, bytes.len() / 2, bytes.len() - 12] {
        let err = Model::from_bytes(&bytes[..cut]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedXml, "cut at {}", cut);
    }
}

#[test]
fn test_mismatched_tags_fail() {
    let err = Model::from_bytes(b"<AUTOSAR><AR-PACKAGES></AUTOSAR>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedXml);
}

#[test]
fn test_empty_input_fails() {
    let err = Model::from_bytes(b"").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedXml);
}

#[test]
fn test_odd_length_utf16_fails() {
    let mut bytes = utf16_le(&two_component_system());
    bytes.push(0);
    let err = Model::from_bytes(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedXml);
}

#[test]
fn test_wrong_root_is_structural() {
    let err = Model::from_bytes(b"<PROJECT><AR-PACKAGES/></PROJECT>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StructuralViolation);
    assert!(err.to_string().contains("PROJECT"));
}

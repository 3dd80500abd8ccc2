//! Purpose: Load the policy document from a file path or stdin.
//! Exports: `load_document`.
//! Role: Input boundary for the CLI; maps read and decode failures onto domain errors.
//! Invariants: The whole input is read before any decoding happens.
//! Invariants: Decode failures keep the underlying parser error in the source chain.
use std::fs;
use std::io::{self, Read};

use polwrap::core::{Error, ErrorKind};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse JSON from a string slice.
fn json_from_str<T: DeserializeOwned>(s: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(s)
}

pub(crate) fn load_document(source: &str) -> Result<Value, Error> {
    let text = read_source(source)?;
    json_from_str(&text).map_err(|err| {
        let mut mapped = Error::new(ErrorKind::Parse)
            .with_message("invalid JSON in policy document")
            .with_source(err);
        if source != "-" {
            mapped = mapped.with_path(source);
        }
        mapped
    })
}

fn read_source(source: &str) -> Result<String, Error> {
    if source == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read stdin")
                .with_source(err)
        })?;
        return Ok(text);
    }
    fs::read_to_string(source).map_err(|err| {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => ErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => ErrorKind::Permission,
            _ => ErrorKind::Io,
        };
        Error::new(kind)
            .with_message("failed to read policy file")
            .with_path(source)
            .with_source(err)
    })
}

#[cfg(test)]
mod tests {
    use super::load_document;
    use polwrap::core::ErrorKind;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn loads_valid_document() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(br#"{"a": "b"}"#).expect("write");
        let value = load_document(file.path().to_str().expect("utf8")).expect("load");
        assert_eq!(value, json!({"a": "b"}));
    }

    #[test]
    fn accepts_any_json_value() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(b"[1, 2, 3]").expect("write");
        let value = load_document(file.path().to_str().expect("utf8")).expect("load");
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("absent.json");
        let err = load_document(path.to_str().expect("utf8")).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.path().is_some());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(b"{bad}").expect("write");
        let err = load_document(file.path().to_str().expect("utf8")).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.message(), Some("invalid JSON in policy document"));
    }
}

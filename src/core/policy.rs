//! Purpose: Build shell-embeddable queue-attribute payloads from JSON documents.
//! Exports: `escape_quotes`, `attribute_envelope`, `escaped_attribute`,
//! `set_attributes_command`, `validate_attribute_name`, default constants.
//! Role: Pure string assembly for the CLI; no I/O.
//! Invariants: Only `"` characters are escaped; everything else passes through.
//! Invariants: Replacing `\"` with `"` in the escaped text recovers the rendered text.
use serde_json::Value;

use crate::core::error::{Error, ErrorKind};
use crate::core::format::render_json;

pub const DEFAULT_ATTRIBUTE: &str = "Policy";
pub const DEFAULT_QUEUE_URL: &str = "$QUEUE_URL";

const COMMAND_PREFIX: &str = "aws sqs set-queue-attributes --queue-url";

/// Escape every double quote so the text can sit inside an outer
/// double-quoted JSON string.
pub fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Wrap already-escaped text as `{"<attribute>": "<escaped>"}`.
pub fn attribute_envelope(attribute: &str, escaped: &str) -> String {
    format!("{{\"{attribute}\": \"{escaped}\"}}")
}

/// Render, escape, and wrap a document in one step.
pub fn escaped_attribute(attribute: &str, document: &Value) -> String {
    attribute_envelope(attribute, &escape_quotes(&render_json(document)))
}

/// Compose the copy-pasteable `aws sqs set-queue-attributes` invocation.
/// The queue URL is emitted verbatim; a `$QUEUE_URL` default is left for the
/// user's shell to expand.
pub fn set_attributes_command(queue_url: &str, envelope: &str) -> String {
    format!("{COMMAND_PREFIX} {queue_url} --attributes ' {envelope} '")
}

/// Attribute names become raw JSON keys in the envelope, so quote and
/// backslash characters are rejected up front.
pub fn validate_attribute_name(attribute: &str) -> Result<(), Error> {
    if attribute.is_empty() {
        return Err(Error::new(ErrorKind::Usage).with_message("attribute name must not be empty"));
    }
    if attribute.contains('"') || attribute.contains('\\') {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("attribute name must not contain quotes or backslashes")
            .with_hint("Use a plain attribute name like Policy or RedrivePolicy."));
    }
    Ok(())
}

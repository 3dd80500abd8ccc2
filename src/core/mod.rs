// Core modules implementing canonical rendering, escaping, and error modeling.
pub mod error;
pub mod format;
pub mod policy;

pub use error::{Error, ErrorKind, to_exit_code};
pub use format::render_json;
pub use policy::{
    DEFAULT_ATTRIBUTE, DEFAULT_QUEUE_URL, attribute_envelope, escape_quotes, escaped_attribute,
    set_attributes_command, validate_attribute_name,
};

//! Decode errors
//!
//! Every decoder runs its body through [`with_context`], so whatever goes
//! wrong inside surfaces as one [`DecodeError`] carrying:
//!
//! - the name of the decoder that failed (`context`)
//! - the cause ([`DecodeErrorKind`])
//! - a JSON dump of the wire object being decoded
//!
//! Failures inside a dictionary child keep the child's own error as the
//! source of a [`DecodeErrorKind::Entry`], so the full path to the offending
//! node can be walked with [`DecodeError::chain`].

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::config::Codec;

/// Cause of a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// Input text is not JSON
    #[error("invalid JSON: {message}")]
    InvalidJson {
        /// Parser message
        message: String,
    },

    /// Node is not an object with a string `type` field
    #[error("not a valid attribute")]
    NotAnAttribute,

    /// `type` names no known attribute
    #[error("unknown attribute type `{name}`")]
    UnknownType {
        /// The offending type name
        name: String,
    },

    /// `type` names an attribute that is never read from the wire
    #[error("`{name}` attributes cannot be decoded")]
    Undecodable {
        /// The type name
        name: String,
    },

    /// Array element type names no known element
    #[error("unknown array element type `{name}`")]
    UnknownElementType {
        /// The offending element type name
        name: String,
    },

    /// `type` names a different attribute than the one being decoded
    #[error("type mismatch: expected `{expected}`, found `{actual}`")]
    TypeMismatch {
        /// Type the decoder handles
        expected: String,
        /// Type found on the wire
        actual: String,
    },

    /// Required key absent
    #[error("missing key `{key}`")]
    MissingKey {
        /// The absent key
        key: &'static str,
    },

    /// Key present with the wrong JSON kind
    #[error("key `{key}` must be {expected}")]
    InvalidField {
        /// The offending key
        key: &'static str,
        /// Description of the accepted JSON kind
        expected: &'static str,
    },

    /// Scalar value does not fit the element type
    #[error("value {value} is not a valid {element}")]
    InvalidValue {
        /// JSON text of the value
        value: String,
        /// Target element wire name
        element: &'static str,
    },

    /// `encoding` is neither `base64` nor `list`, or not valid for the element type
    #[error("unsupported encoding `{encoding}` for `{element}` elements")]
    UnsupportedEncoding {
        /// Encoding found on the wire
        encoding: String,
        /// Element wire name
        element: &'static str,
    },

    /// `shape` is not a list of non-negative integers
    #[error("malformed shape: {reason}")]
    InvalidShape {
        /// What is wrong with it
        reason: String,
    },

    /// Payload text is not base64 in either alphabet
    #[error("invalid base64 payload: {reason}")]
    InvalidBase64 {
        /// Decoder message
        reason: String,
    },

    /// Decoded payload size disagrees with the shape
    #[error("payload holds {actual} bytes, shape requires {expected}")]
    PayloadLength {
        /// Bytes implied by shape and element width
        expected: usize,
        /// Bytes decoded
        actual: usize,
    },

    /// Nested list does not mirror the shape
    #[error("nested list does not match shape at depth {depth}: {reason}")]
    NestedList {
        /// Nesting depth of the mismatch
        depth: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Dictionary entry is neither `null` nor a JSON object
    #[error("entry `{key}` is not a JSON object")]
    InvalidEntry {
        /// Key of the offending entry
        key: String,
    },

    /// A dictionary entry failed to decode
    #[error("in entry `{key}`")]
    Entry {
        /// Key of the failing child
        key: String,
        /// The child's own error
        #[source]
        source: Box<DecodeError>,
    },
}

/// A decoding failure with its decoder context and the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{context}: {kind}\n{object}")]
pub struct DecodeError {
    context: &'static str,
    #[source]
    kind: DecodeErrorKind,
    object: String,
}

impl DecodeError {
    pub(crate) fn new(
        codec: &Codec,
        context: &'static str,
        kind: DecodeErrorKind,
        object: &Value,
    ) -> Self {
        Self {
            context,
            kind,
            object: dump(codec, object),
        }
    }

    pub(crate) fn invalid_json(err: &serde_json::Error, text: &str) -> Self {
        Self {
            context: "decode_str",
            kind: DecodeErrorKind::InvalidJson {
                message: err.to_string(),
            },
            object: text.to_string(),
        }
    }

    /// Name of the decoder that failed
    pub fn context(&self) -> &'static str {
        self.context
    }

    /// Cause of the failure
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Dump of the wire object being decoded
    pub fn object(&self) -> &str {
        &self.object
    }

    /// This error followed by every nested dictionary entry error, outermost first
    pub fn chain(&self) -> impl Iterator<Item = &DecodeError> {
        std::iter::successors(Some(self), |err| match &err.kind {
            DecodeErrorKind::Entry { source, .. } => Some(source.as_ref()),
            _ => None,
        })
    }

    /// Innermost error, the one raised at the node that actually failed
    pub fn root(&self) -> &DecodeError {
        self.chain().last().unwrap_or(self)
    }

    /// Keys from the outermost dictionary down to the failing node
    pub fn path(&self) -> Vec<&str> {
        self.chain()
            .filter_map(|err| match &err.kind {
                DecodeErrorKind::Entry { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn dump(codec: &Codec, object: &Value) -> String {
    let text = if codec.pretty_dumps() {
        serde_json::to_string_pretty(object)
    } else {
        serde_json::to_string(object)
    };
    text.unwrap_or_else(|_| object.to_string())
}

/// Run a decoder body, attaching the decoder name and the input dump to any failure.
pub(crate) fn with_context<T>(
    codec: &Codec,
    context: &'static str,
    object: &Value,
    body: impl FnOnce() -> Result<T, DecodeErrorKind>,
) -> Result<T, DecodeError> {
    body().map_err(|kind| {
        debug!(context, error = %kind, "decode failed");
        DecodeError::new(codec, context, kind, object)
    })
}

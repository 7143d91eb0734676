//! Codec configuration
//!
//! A [`Codec`] carries the knobs shared by every encoder and decoder. The
//! trait convenience methods (`encode()`, `decode()`) use [`Codec::default`].

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::engine::GeneralPurpose;

/// Alphabet used when encoding base64 array payloads.
///
/// Decoding always accepts both alphabets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Base64Alphabet {
    /// `-` and `_`, padded
    #[default]
    UrlSafe,
    /// `+` and `/`, padded
    Standard,
}

impl Base64Alphabet {
    pub(crate) fn engine(self) -> &'static GeneralPurpose {
        match self {
            Base64Alphabet::UrlSafe => &URL_SAFE,
            Base64Alphabet::Standard => &STANDARD,
        }
    }
}

/// Encoder/decoder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    alphabet: Base64Alphabet,
    strict_payload_length: bool,
    pretty_dumps: bool,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            alphabet: Base64Alphabet::UrlSafe,
            strict_payload_length: true,
            pretty_dumps: true,
        }
    }
}

impl Codec {
    /// Start from the default settings.
    ///
    /// # Example
    ///
    /// ```
    /// use sal_wire::{Base64Alphabet, Codec};
    ///
    /// let codec = Codec::builder()
    ///     .base64_alphabet(Base64Alphabet::Standard)
    ///     .strict_payload_length(false)
    ///     .build();
    /// assert!(!codec.strict_payload_length());
    /// ```
    pub fn builder() -> CodecBuilder {
        CodecBuilder::new()
    }

    /// Alphabet used for base64 output
    pub fn alphabet(&self) -> Base64Alphabet {
        self.alphabet
    }

    /// Whether base64 payload length must match the shape exactly
    pub fn strict_payload_length(&self) -> bool {
        self.strict_payload_length
    }

    /// Whether JSON dumps in decode errors are pretty-printed
    pub fn pretty_dumps(&self) -> bool {
        self.pretty_dumps
    }
}

/// Builder for [`Codec`].
#[derive(Debug, Clone)]
pub struct CodecBuilder {
    codec: Codec,
}

impl CodecBuilder {
    /// Builder holding the default settings
    pub fn new() -> Self {
        Self {
            codec: Codec::default(),
        }
    }

    /// Alphabet for base64 output
    pub fn base64_alphabet(mut self, alphabet: Base64Alphabet) -> Self {
        self.codec.alphabet = alphabet;
        self
    }

    /// Reject base64 payloads whose length does not match the shape.
    ///
    /// When disabled, a short payload leaves trailing elements zeroed and a
    /// long payload is truncated.
    pub fn strict_payload_length(mut self, strict: bool) -> Self {
        self.codec.strict_payload_length = strict;
        self
    }

    /// Pretty-print (default) or compact the JSON dump in decode errors
    pub fn pretty_dumps(mut self, pretty: bool) -> Self {
        self.codec.pretty_dumps = pretty;
        self
    }

    /// Finish building
    pub fn build(self) -> Codec {
        self.codec
    }
}

impl Default for CodecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

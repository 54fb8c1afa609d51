//! Legacy charset conversion on top of `encoding_rs`.
//!
//! Labels follow the WHATWG Encoding Standard (`utf-8`, `windows-1251`,
//! `koi8-r`, `euc-jp`, ...). Spellings such as `cp-1251` or `UTF_8` are
//! accepted by retrying without separators.

use crate::error::{Error, Result};
use encoding_rs::{EncoderResult, Encoding, UTF_16BE, UTF_16LE};
use std::fmt;

const DEFAULT_SUBSTITUTION: &[u8] = b"?";

/// Look up an encoding by label.
pub fn lookup(label: &str) -> Result<&'static Encoding> {
    let trimmed = label.trim();
    Encoding::for_label(trimmed.as_bytes())
        .or_else(|| {
            let compact: String = trimmed
                .chars()
                .filter(|c| !matches!(c, '-' | '_' | ' '))
                .collect();
            Encoding::for_label(compact.as_bytes())
        })
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

/// Re-encode `bytes` from charset `from` to charset `to`.
pub fn convert(to: &str, from: &str, bytes: &[u8]) -> Result<Vec<u8>> {
    let from = Converter::new(from)?;
    let to = Converter::new(to)?;
    Ok(from.convert(&to, bytes))
}

/// A charset codec.
#[derive(Clone)]
pub struct Converter {
    encoding: &'static Encoding,
    substitution: Vec<u8>,
}

impl Converter {
    /// Open a converter for `label`.
    pub fn new(label: &str) -> Result<Self> {
        Ok(Self {
            encoding: lookup(label)?,
            substitution: DEFAULT_SUBSTITUTION.to_vec(),
        })
    }

    /// Canonical name of the charset.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Bytes written in place of characters the charset cannot represent.
    #[must_use]
    pub fn substitution(&self) -> &[u8] {
        &self.substitution
    }

    /// Set the replacement for unmappable characters. The text is itself
    /// encoded in this charset.
    pub fn set_substitution(&mut self, text: &str) {
        self.substitution = self.encode_raw(text, b"");
    }

    /// Decode bytes. Malformed sequences become U+FFFD.
    #[must_use]
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (text, had_errors) = self.encoding.decode_without_bom_handling(bytes);
        if had_errors {
            tracing::debug!(charset = self.name(), "malformed input replaced");
        }
        text.into_owned()
    }

    /// Encode text, substituting unmappable characters.
    #[must_use]
    pub fn encode(&self, text: &str) -> Vec<u8> {
        self.encode_raw(text, &self.substitution)
    }

    /// Decode with this converter and encode with `to`.
    #[must_use]
    pub fn convert(&self, to: &Self, bytes: &[u8]) -> Vec<u8> {
        to.encode(&self.decode(bytes))
    }

    fn encode_raw(&self, text: &str, substitution: &[u8]) -> Vec<u8> {
        // encoding_rs only decodes UTF-16; its encoders emit UTF-8 instead.
        if self.encoding == UTF_16LE {
            return text.encode_utf16().flat_map(u16::to_le_bytes).collect();
        }
        if self.encoding == UTF_16BE {
            return text.encode_utf16().flat_map(u16::to_be_bytes).collect();
        }

        let mut encoder = self.encoding.new_encoder();
        let mut out = Vec::with_capacity(text.len() + 16);
        let mut src = text;
        loop {
            let (result, read) =
                encoder.encode_from_utf8_to_vec_without_replacement(src, &mut out, true);
            src = &src[read..];
            match result {
                EncoderResult::InputEmpty => break,
                EncoderResult::OutputFull => out.reserve(src.len() * 2 + 16),
                EncoderResult::Unmappable(_) => out.extend_from_slice(substitution),
            }
        }
        out
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("name", &self.name())
            .field("substitution", &self.substitution)
            .finish()
    }
}

//! Text decoding with a Latin-1 fallback
//!
//! Captured pages are usually UTF-8, but older sites still serve Latin-1.
//! Decoding never fails: UTF-8 is tried first and anything that is not valid
//! UTF-8 is read as Latin-1, which accepts every byte sequence. The encoding
//! that succeeded is kept so the primary document can be written back in it.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use serde::{Deserialize, Serialize};

/// Source encoding of a decoded text asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

impl TextEncoding {
    /// The label this encoding is known by in documents and on the wire
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "iso-8859-1",
        }
    }

    // The WHATWG encoding standard maps the iso-8859-1 label to windows-1252.
    // Decoding and re-encoding through it is byte-for-byte reversible.
    fn codec(self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Latin1 => WINDOWS_1252,
        }
    }

    /// Encode text for output
    ///
    /// Characters the encoding cannot represent are written as HTML numeric
    /// character references, so the output is always a valid document.
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        let (bytes, _, had_unmappable) = self.codec().encode(text);
        if had_unmappable {
            log::debug!(
                "Some characters are not representable in {}, wrote them as character references",
                self.label()
            );
        }
        bytes.into_owned()
    }
}

impl TextEncoding {
    /// Check whether every character of `text` can be written in this encoding
    #[must_use]
    pub fn can_encode(self, text: &str) -> bool {
        match self {
            TextEncoding::Utf8 => true,
            TextEncoding::Latin1 => !self.codec().encode(text).2,
        }
    }

    /// Replace the characters this encoding cannot represent using `escape`
    ///
    /// Used for raw text (script and style contents), where the numeric
    /// character references [`encode`](Self::encode) falls back to would be
    /// taken literally.
    pub fn escape_unmappable<'a>(self, text: &'a str, escape: impl Fn(char) -> String) -> Cow<'a, str> {
        if self.can_encode(text) {
            return Cow::Borrowed(text);
        }
        let mut out = String::with_capacity(text.len());
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            if self.can_encode(ch.encode_utf8(&mut buf)) {
                out.push(ch);
            } else {
                out.push_str(&escape(ch));
            }
        }
        Cow::Owned(out)
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Decode bytes as UTF-8, falling back to Latin-1
#[must_use]
pub fn decode_text(bytes: &[u8]) -> (String, TextEncoding) {
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        return (text.into_owned(), TextEncoding::Utf8);
    }
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    (text.into_owned(), TextEncoding::Latin1)
}

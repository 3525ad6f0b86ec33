//! The finished, self-contained document

use std::borrow::Cow;
use std::io::Write;

use kuchiki::NodeRef;

use crate::error::{InlinerError, InlinerResult};
use crate::inline_html::InlineStats;
use crate::inline_html::elements::{TagFilter, matching};
use crate::utils::{TextEncoding, css_escape_char, js_escape_char};

/// Serialized result of an inlining run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinedDocument {
    source_name: String,
    html: String,
    encoding: TextEncoding,
    stats: InlineStats,
}

impl InlinedDocument {
    /// Serialize a rewritten document tree
    ///
    /// Script and style text is first made representable in `encoding`, using
    /// the escapes of the embedded language.
    pub fn serialize(
        source_name: impl Into<String>,
        document: &NodeRef,
        encoding: TextEncoding,
        stats: InlineStats,
    ) -> InlinerResult<Self> {
        escape_raw_text(document, encoding);

        let mut buffer = Vec::new();
        document
            .serialize(&mut buffer)
            .map_err(InlinerError::Serialize)?;
        let html = String::from_utf8(buffer).map_err(|e| {
            InlinerError::Serialize(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(Self {
            source_name: source_name.into(),
            html,
            encoding,
            stats,
        })
    }

    /// File name of the document that was inlined
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Encoding the source document was read in, and the output is written in
    #[must_use]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    #[must_use]
    pub fn stats(&self) -> InlineStats {
        self.stats
    }

    /// The document encoded in its source encoding
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encoding.encode(&self.html)
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }
}

/// Rewrite characters `encoding` lacks inside `<script>` and `<style>`
///
/// Elsewhere the output encoder writes them as character references, but raw
/// text never decodes those.
fn escape_raw_text(document: &NodeRef, encoding: TextEncoding) {
    if encoding == TextEncoding::Utf8 {
        return;
    }
    let raw_text_tags: [(&'static str, fn(char) -> String); 2] =
        [("script", js_escape_char), ("style", css_escape_char)];

    for (tag, escape) in raw_text_tags {
        for element in matching(document, TagFilter::tag(tag)) {
            for child in element.as_node().children() {
                let Some(text) = child.as_text() else {
                    continue;
                };
                let escaped = match encoding.escape_unmappable(&text.borrow(), escape) {
                    Cow::Owned(escaped) => escaped,
                    Cow::Borrowed(_) => continue,
                };
                log::debug!("Escaped characters outside {encoding} in <{tag}>");
                text.replace(escaped);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchiki::traits::TendrilSink;

    #[test]
    fn test_latin1_document_is_written_back_in_latin1() {
        let document = kuchiki::parse_html().one("<html><body>caf\u{e9}</body></html>");
        let inlined =
            InlinedDocument::serialize("index.html", &document, TextEncoding::Latin1, InlineStats::default())
                .unwrap();
        let bytes = inlined.to_bytes();
        assert!(bytes.windows(4).any(|w| w == b"caf\xE9"));

        let mut written = Vec::new();
        inlined.write_to(&mut written).unwrap();
        assert_eq!(written, bytes);
    }

    #[test]
    fn test_raw_text_uses_language_escapes_in_latin1() {
        let document = kuchiki::parse_html().one(
            "<html><head><script>var arrow = '\u{2192}';</script>\
             <style>p::before{content:'\u{2192}'}</style></head>\
             <body>\u{2192} caf\u{e9}</body></html>",
        );
        let inlined =
            InlinedDocument::serialize("index.html", &document, TextEncoding::Latin1, InlineStats::default())
                .unwrap();

        let html = inlined.html();
        assert!(html.contains(r"var arrow = '\u2192';"));
        assert!(html.contains(r"content:'\2192 '"));
        let bytes = inlined.to_bytes();
        assert!(bytes.windows(7).any(|w| w == b"&#8594;"));
        assert!(bytes.windows(4).any(|w| w == b"caf\xE9"));
        // only the body text fell back to a character reference
        assert_eq!(bytes.windows(7).filter(|w| *w == b"&#8594;").count(), 1);
    }

    #[test]
    fn test_utf8_raw_text_is_untouched() {
        let document = kuchiki::parse_html().one("<html><head><script>var a = '\u{2192}';</script></head></html>");
        let inlined =
            InlinedDocument::serialize("index.html", &document, TextEncoding::Utf8, InlineStats::default())
                .unwrap();
        assert!(inlined.html().contains("var a = '\u{2192}';"));
    }
}

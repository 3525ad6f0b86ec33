//! Mime classification for captured assets
//!
//! The three text kinds the inliner treats specially (scripts, markup,
//! stylesheets) are recognized by extension. Everything else is classified by
//! its leading bytes, since fetchers routinely save images and fonts under
//! names without a usable extension.

use super::constants::SNIFF_LEN;

/// A magic-byte signature: every `(offset, bytes)` part must match
struct Signature {
    parts: &'static [(usize, &'static [u8])],
    mime: &'static str,
}

const FILE_SIGNATURES: &[Signature] = &[
    // Image
    Signature { parts: &[(0, b"GIF87a")], mime: "image/gif" },
    Signature { parts: &[(0, b"GIF89a")], mime: "image/gif" },
    Signature { parts: &[(0, b"\xFF\xD8\xFF")], mime: "image/jpeg" },
    Signature { parts: &[(0, b"\x89PNG\x0D\x0A\x1A\x0A")], mime: "image/png" },
    Signature { parts: &[(0, b"RIFF"), (8, b"WEBP")], mime: "image/webp" },
    Signature { parts: &[(0, b"\x00\x00\x01\x00")], mime: "image/x-icon" },
    Signature { parts: &[(0, b"BM"), (6, b"\x00\x00\x00\x00")], mime: "image/bmp" },
    Signature { parts: &[(4, b"ftypavif")], mime: "image/avif" },
    Signature { parts: &[(4, b"ftypheic")], mime: "image/heic" },
    // Video
    Signature { parts: &[(0, b"RIFF"), (8, b"AVI ")], mime: "video/x-msvideo" },
    Signature { parts: &[(4, b"ftypqt")], mime: "video/quicktime" },
    Signature { parts: &[(4, b"ftypM4V")], mime: "video/x-m4v" },
    Signature { parts: &[(4, b"ftyp")], mime: "video/mp4" },
    Signature { parts: &[(4, b"moov")], mime: "video/quicktime" },
    Signature { parts: &[(0, b"\x1A\x45\xDF\xA3")], mime: "video/webm" },
    Signature { parts: &[(0, b"\x00\x00\x01\xBA")], mime: "video/mpeg" },
    Signature { parts: &[(0, b"\x00\x00\x01\xB3")], mime: "video/mpeg" },
    Signature { parts: &[(0, b"OggS")], mime: "video/ogg" },
    // Font
    Signature { parts: &[(0, b"wOFF")], mime: "font/woff" },
    Signature { parts: &[(0, b"wOF2")], mime: "font/woff2" },
    Signature { parts: &[(0, b"\x00\x01\x00\x00")], mime: "font/ttf" },
    Signature { parts: &[(0, b"OTTO")], mime: "font/otf" },
    Signature { parts: &[(34, b"LP")], mime: "application/vnd.ms-fontobject" },
];

const OCTET_STREAM: &str = "application/octet-stream";

impl Signature {
    fn matches(&self, head: &[u8]) -> bool {
        self.parts.iter().all(|(offset, magic)| {
            head.get(*offset..offset + magic.len())
                .is_some_and(|window| window == *magic)
        })
    }
}

/// Classify an asset by file name, falling back to its content
///
/// Priority: `.js`, then `.html`/`.xhtml`, then `.css`, then content sniffing.
#[must_use]
pub fn classify_mime(file_name: &str, contents: &[u8]) -> &'static str {
    if file_name.ends_with(".js") {
        "text/javascript"
    } else if file_name.ends_with(".html") || file_name.ends_with(".xhtml") {
        "text/html"
    } else if file_name.ends_with(".css") {
        "text/css"
    } else {
        sniff_mime(contents)
    }
}

/// Derive a mime type from the leading bytes of a file
#[must_use]
pub fn sniff_mime(contents: &[u8]) -> &'static str {
    let head = &contents[..contents.len().min(SNIFF_LEN)];

    if let Some(signature) = FILE_SIGNATURES.iter().find(|s| s.matches(head)) {
        return signature.mime;
    }

    if looks_like_text(head) {
        sniff_text(head)
    } else {
        OCTET_STREAM
    }
}

/// Text has no NUL bytes and decodes as UTF-8, allowing a multi-byte
/// sequence to be cut at the end of the sample
fn looks_like_text(head: &[u8]) -> bool {
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() || head.iter().all(|b| *b >= 0x20 || b.is_ascii_whitespace()),
    }
}

fn sniff_text(head: &[u8]) -> &'static str {
    let lowered: Vec<u8> = head.iter().map(u8::to_ascii_lowercase).collect();
    let mut rest = lowered.as_slice();
    let mut xml_prolog = false;

    // Comments, processing instructions and doctypes may precede the root
    loop {
        rest = trim_start(rest);
        let skipped = if rest.starts_with(b"<!doctype html") {
            return "text/html";
        } else if rest.starts_with(b"<!--") {
            skip_past(rest, b"-->")
        } else if rest.starts_with(b"<?") {
            xml_prolog = true;
            skip_past(rest, b"?>")
        } else if rest.starts_with(b"<!doctype") {
            xml_prolog = true;
            skip_past(rest, b">")
        } else {
            break;
        };
        match skipped {
            Some(after) => rest = after,
            None => break,
        }
    }

    if rest.starts_with(b"<html") {
        "text/html"
    } else if rest.starts_with(b"<svg") {
        "image/svg+xml"
    } else if xml_prolog {
        "text/xml"
    } else {
        "text/plain"
    }
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

/// The bytes after the first `terminator`, if the head holds one
fn skip_past<'a>(bytes: &'a [u8], terminator: &[u8]) -> Option<&'a [u8]> {
    bytes
        .windows(terminator.len())
        .position(|w| w == terminator)
        .map(|at| &bytes[at + terminator.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_wins_for_text_kinds() {
        // Content would sniff as PNG, but the extension decides
        let png = b"\x89PNG\x0D\x0A\x1A\x0A....";
        assert_eq!(classify_mime("app.js", png), "text/javascript");
        assert_eq!(classify_mime("page.html", png), "text/html");
        assert_eq!(classify_mime("page.xhtml", png), "text/html");
        assert_eq!(classify_mime("site.css", png), "text/css");
    }

    #[test]
    fn test_sniffs_images_without_extension() {
        assert_eq!(classify_mime("logo", b"\x89PNG\x0D\x0A\x1A\x0A\x00\x00"), "image/png");
        assert_eq!(classify_mime("photo.php?id=3", b"\xFF\xD8\xFF\xE0\x00\x10JFIF"), "image/jpeg");
        assert_eq!(classify_mime("anim", b"GIF89a\x01\x00"), "image/gif");
        assert_eq!(classify_mime("pic", b"RIFF\x24\x00\x00\x00WEBPVP8 "), "image/webp");
    }

    #[test]
    fn test_riff_container_is_distinguished_by_form_type() {
        assert_eq!(sniff_mime(b"RIFF\x24\x00\x00\x00AVI LIST"), "video/x-msvideo");
        assert_eq!(sniff_mime(b"RIFF\x24\x00\x00\x00WAVEfmt "), OCTET_STREAM);
    }

    #[test]
    fn test_sniffs_video_and_fonts() {
        assert_eq!(sniff_mime(b"\x00\x00\x00\x20ftypisom\x00\x00"), "video/mp4");
        assert_eq!(sniff_mime(b"\x1A\x45\xDF\xA3\x9F\x42"), "video/webm");
        assert_eq!(sniff_mime(b"wOFF\x00\x01\x00\x00"), "font/woff");
        assert_eq!(sniff_mime(b"\x00\x01\x00\x00\x00\x0F"), "font/ttf");

        let mut eot = vec![0u8; 40];
        eot[34] = b'L';
        eot[35] = b'P';
        assert_eq!(sniff_mime(&eot), "application/vnd.ms-fontobject");
    }

    #[test]
    fn test_sniffs_text_content() {
        assert_eq!(sniff_mime(b"  <!DOCTYPE html><html></html>"), "text/html");
        assert_eq!(sniff_mime(b"<svg xmlns='http://www.w3.org/2000/svg'/>"), "image/svg+xml");
        assert_eq!(
            sniff_mime(b"<?xml version=\"1.0\"?>\n<svg xmlns='x'></svg>"),
            "image/svg+xml"
        );
        assert_eq!(sniff_mime(b"<?xml version=\"1.0\"?><feed/>"), "text/xml");
        assert_eq!(sniff_mime(b"User-agent: *\nDisallow: /"), "text/plain");
    }

    #[test]
    fn test_svg_after_comments_and_doctype() {
        assert_eq!(
            sniff_mime(b"<!-- Generator: Adobe Illustrator -->\n<svg xmlns='http://www.w3.org/2000/svg'></svg>"),
            "image/svg+xml"
        );
        assert_eq!(
            sniff_mime(
                b"<?xml version=\"1.0\"?>\n<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \
                  \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n<svg></svg>"
            ),
            "image/svg+xml"
        );
        assert_eq!(sniff_mime(b"<!-- saved page -->\n<html><body></body></html>"), "text/html");
        assert_eq!(sniff_mime(b"<!-- never closed <svg>"), "text/plain");
    }

    #[test]
    fn test_binary_without_signature_is_octet_stream() {
        assert_eq!(sniff_mime(b"\x00\xFE\x13\x37\x00"), OCTET_STREAM);
    }
}

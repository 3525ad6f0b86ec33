//! Text helpers shared by the resource map builder and the inliners

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// `<link ...>` and `<meta ...>` start tags
static VOID_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:link|meta)\b[^>]*>")
        .expect("BUG: hardcoded void tag regex is invalid")
});

/// A closing script tag as the HTML tokenizer recognizes it
static SCRIPT_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(script[\s/>])").expect("BUG: hardcoded script close regex is invalid")
});

/// A closing style tag as the HTML tokenizer recognizes it
static STYLE_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(style[\s/>])").expect("BUG: hardcoded style close regex is invalid")
});

/// An explicit `<html>` start tag
static HTML_ROOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<html(?:[\s/>]|$)").expect("BUG: hardcoded html root regex is invalid")
});

/// Canonical resource key for a directory entry name
///
/// Filesystems disagree on Unicode composition (macOS stores decomposed names),
/// while references inside documents are almost always composed. Keys are
/// normalized to NFC so both spellings meet.
#[must_use]
pub fn normalize_key(name: &str) -> String {
    name.nfc().collect()
}

/// Rewrite bare `<link ...>` and `<meta ...>` tags to self-close
///
/// Tags that already end in `/>` are left as they are.
#[must_use]
pub fn repair_void_tags(html: &str) -> Cow<'_, str> {
    VOID_TAG.replace_all(html, |caps: &Captures| {
        let tag = caps[0].trim();
        if tag.ends_with("/>") {
            tag.to_string()
        } else {
            // The space keeps an unquoted attribute value from absorbing the slash
            format!("{} />", tag[..tag.len() - 1].trim_end())
        }
    })
}

/// Make script text safe to embed inside a `<script>` element
///
/// Every `</script` that would end the element is written as `<\/script`.
/// Inside string, template and regex literals `\/` evaluates to `/`, so the
/// runtime value is unchanged.
#[must_use]
pub fn escape_script_close(script: &str) -> Cow<'_, str> {
    SCRIPT_CLOSE.replace_all(script, r"<\/$1")
}

/// Make stylesheet text safe to embed inside a `<style>` element
///
/// `</style` is written as `<\/style`; in CSS `\/` is an escaped `/`.
#[must_use]
pub fn escape_style_close(css: &str) -> Cow<'_, str> {
    STYLE_CLOSE.replace_all(css, r"<\/$1")
}

/// Escape closing tags in text about to become the content of `tag`
///
/// Only `<script>` and `<style>` hold raw text; other tags get the text back
/// unchanged since the serializer escapes it.
#[must_use]
pub fn escape_raw_text_close<'a>(tag: &str, text: &'a str) -> Cow<'a, str> {
    if tag.eq_ignore_ascii_case("script") {
        escape_script_close(text)
    } else if tag.eq_ignore_ascii_case("style") {
        escape_style_close(text)
    } else {
        Cow::Borrowed(text)
    }
}

/// `\uXXXX` escape for a character in script text
///
/// Characters outside the basic plane become a surrogate pair.
#[must_use]
pub fn js_escape_char(ch: char) -> String {
    let mut units = [0u16; 2];
    ch.encode_utf16(&mut units)
        .iter()
        .map(|unit| format!("\\u{unit:04X}"))
        .collect()
}

/// `\XXXX ` escape for a character in stylesheet text
#[must_use]
pub fn css_escape_char(ch: char) -> String {
    format!("\\{:X} ", u32::from(ch))
}

/// Check whether markup declares an `<html>` root element
#[must_use]
pub fn has_html_root(text: &str) -> bool {
    HTML_ROOT.is_match(text)
}

/// Build a base64 data URI
#[must_use]
pub fn data_uri(mime: &str, base64_value: &str) -> String {
    let mut uri = String::with_capacity(base64_value.len() + mime.len() + 13);
    uri.push_str("data:");
    uri.push_str(mime);
    uri.push_str(";base64,");
    uri.push_str(base64_value);
    uri
}

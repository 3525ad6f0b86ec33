pub mod constants;
pub mod mime;
pub mod string_utils;
pub mod text_codec;

pub use constants::*;
pub use mime::classify_mime;
pub use string_utils::{
    css_escape_char, data_uri, escape_raw_text_close, escape_script_close, escape_style_close,
    has_html_root, js_escape_char, normalize_key, repair_void_tags,
};
pub use text_codec::{TextEncoding, decode_text};

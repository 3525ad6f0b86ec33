//! Test utilities and helper functions for the inliner test suite

use anyhow::Result;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use kodegen_tools_inliner::InlineConfig;

/// PNG signature followed by a few bytes; enough for content sniffing
#[allow(dead_code)]
pub const PNG_BYTES: &[u8] = b"\x89PNG\x0D\x0A\x1A\x0A\x00\x00\x00\x0DIHDR";

/// WOFF signature followed by a few bytes
#[allow(dead_code)]
pub const WOFF_BYTES: &[u8] = b"wOFF\x00\x01\x00\x00\x00\x00\x01\x00";

/// WebM (EBML) signature followed by a few bytes
#[allow(dead_code)]
pub const WEBM_BYTES: &[u8] = b"\x1A\x45\xDF\xA3\x9F\x42\x86\x81";

/// An asset directory populated file by file
pub struct AssetDir {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl AssetDir {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn text(self, name: &str, contents: &str) -> Result<Self> {
        self.dir.child(name).write_str(contents)?;
        Ok(self)
    }

    pub fn bytes(self, name: &str, contents: &[u8]) -> Result<Self> {
        self.dir.child(name).write_binary(contents)?;
        Ok(self)
    }

    /// Configuration with every resource kind enabled
    pub fn config(&self) -> InlineConfig {
        InlineConfig::builder().asset_dir(self.dir.path()).build()
    }
}

/// Creates a test HTML document with the given head and body markup
#[allow(dead_code)]
pub fn create_test_html(head: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Captured page</title>
    {head}
</head>
<body>
    {body}
</body>
</html>"#
    )
}

/// Base64 of `bytes`, for building expected data URIs
#[allow(dead_code)]
pub fn b64(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

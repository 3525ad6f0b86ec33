//! Resource map construction from an asset directory
//!
//! Walks the directory once, classifies every regular file, and decodes it into
//! a [`ResourceRecord`]. HTML documents found along the way compete to become
//! the [`PrimaryDocument`].

use std::fs;
use std::path::{Path, PathBuf};

use super::script_format::{IndentFormatter, ScriptFormatter};
use super::types::{PrimaryDocument, ResourceMap, ResourceRecord};
use crate::config::InlineConfig;
use crate::error::{InlinerError, InlinerResult};
use crate::utils::{
    FONT_EXTENSIONS, INDEX_DOCUMENT, TextEncoding, classify_mime, decode_text,
    escape_script_close, has_html_root, normalize_key,
};

/// Everything the inlining passes need from the asset directory
#[derive(Debug)]
pub struct BuiltResources {
    pub resources: ResourceMap,
    pub document: PrimaryDocument,
}

/// A directory entry queued for processing
struct AssetEntry {
    key: String,
    path: PathBuf,
}

/// Source text of the best HTML document seen so far
struct Candidate {
    key: String,
    text: String,
    encoding: TextEncoding,
}

/// Builds the resource map using the built-in script formatter
pub fn build_resource_map(config: &InlineConfig) -> InlinerResult<BuiltResources> {
    build_resource_map_with(config, &IndentFormatter::default())
}

/// Builds the resource map, beautifying scripts with `formatter` when
/// `prettify` is set
pub fn build_resource_map_with(
    config: &InlineConfig,
    formatter: &dyn ScriptFormatter,
) -> InlinerResult<BuiltResources> {
    let asset_dir = config.asset_dir();
    log::info!("Building resource map from {}", asset_dir.display());

    let requested = config.inline_file().map(normalize_key);
    let mut resources = ResourceMap::new();
    let mut explicit: Option<PrimaryDocument> = None;
    let mut candidate: Option<Candidate> = None;

    for entry in list_assets(asset_dir)? {
        let bytes = fs::read(&entry.path).map_err(|source| InlinerError::AssetRead {
            path: entry.path.clone(),
            source,
        })?;

        if requested.as_deref() == Some(entry.key.as_str()) {
            let (text, encoding) = decode_text(&bytes);
            if !has_html_root(&text) {
                return Err(InlinerError::NotHtml(entry.key));
            }
            log::info!("Using {} as requested", entry.key);
            explicit = Some(PrimaryDocument::parse(entry.key, &text, encoding));
            continue;
        }

        let mime = classify_mime(&entry.key, &bytes);
        log::debug!("{} -> {mime}", entry.key);

        let record = if mime.starts_with("text/") {
            let (text, encoding) = decode_text(&bytes);
            if mime != "text/javascript" && mime != "text/css" && has_html_root(&text) {
                offer_candidate(&mut candidate, &entry.key, &text, encoding);
            }
            let value = if mime == "text/javascript" {
                prepare_script(&text, config.prettify(), formatter)
            } else {
                text
            };
            ResourceRecord::text(entry.key, mime, value, encoding)
        } else if mime.starts_with("image/") && !config.exclude_images() {
            ResourceRecord::binary(entry.key, mime, &bytes)
        } else if mime.starts_with("video/") && !config.exclude_videos() {
            ResourceRecord::binary(entry.key, mime, &bytes)
        } else if !config.exclude_fonts() && is_font_file(&entry.key) {
            ResourceRecord::binary(entry.key, mime, &bytes)
        } else {
            log::debug!("Omitting {} ({mime})", entry.key);
            continue;
        };

        if let Some(replaced) = resources.insert(record) {
            log::warn!(
                "Two files map to the resource key '{}', keeping the later one",
                replaced.key()
            );
        }
    }

    let document = match (explicit, requested, candidate) {
        (Some(document), _, _) => document,
        (None, Some(name), _) => return Err(InlinerError::InlineFileNotFound(name)),
        (None, None, Some(found)) => {
            log::info!("Using {}", found.key);
            PrimaryDocument::parse(found.key, &found.text, found.encoding)
        }
        (None, None, None) => return Err(InlinerError::NoDocument(asset_dir.to_path_buf())),
    };

    log::info!("Resource map holds {} records", resources.len());
    Ok(BuiltResources {
        resources,
        document,
    })
}

/// Regular files in the directory, ordered by name
fn list_assets(dir: &Path) -> InlinerResult<Vec<AssetEntry>> {
    let unreadable = |source: std::io::Error| InlinerError::AssetDirUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, path));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(entries
        .into_iter()
        .map(|(name, path)| AssetEntry {
            key: normalize_key(&name),
            path,
        })
        .collect())
}

/// The first HTML document wins unless a later one is `index.html`
fn offer_candidate(current: &mut Option<Candidate>, key: &str, text: &str, encoding: TextEncoding) {
    let replace = match current {
        None => true,
        Some(existing) => key == INDEX_DOCUMENT && existing.key != INDEX_DOCUMENT,
    };
    if replace {
        log::debug!("Document candidate: {key}");
        *current = Some(Candidate {
            key: key.to_string(),
            text: text.to_string(),
            encoding,
        });
    }
}

fn prepare_script(text: &str, prettify: bool, formatter: &dyn ScriptFormatter) -> String {
    if prettify {
        escape_script_close(&formatter.format(text)).into_owned()
    } else {
        escape_script_close(text).into_owned()
    }
}

fn is_font_file(key: &str) -> bool {
    FONT_EXTENSIONS.iter().any(|ext| key.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &[u8]) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    fn config(dir: &TempDir) -> InlineConfig {
        InlineConfig::builder().asset_dir(dir.path()).build()
    }

    #[test]
    fn test_index_html_beats_earlier_candidate() {
        let dir = TempDir::new().unwrap();
        write(&dir, "about.html", b"<html><body>about</body></html>");
        write(&dir, "index.html", b"<html><body>home</body></html>");
        write(&dir, "zz.html", b"<html><body>last</body></html>");

        let built = build_resource_map(&config(&dir)).unwrap();
        assert_eq!(built.document.name(), "index.html");
    }

    #[test]
    fn test_first_document_wins_without_index() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.html", b"<html><body>b</body></html>");
        write(&dir, "a.html", b"<html><body>a</body></html>");

        let built = build_resource_map(&config(&dir)).unwrap();
        assert_eq!(built.document.name(), "a.html");
    }

    #[test]
    fn test_fragments_without_root_are_not_candidates() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.html", b"<div>fragment</div>");
        write(&dir, "b.html", b"<html><body>b</body></html>");

        let built = build_resource_map(&config(&dir)).unwrap();
        assert_eq!(built.document.name(), "b.html");
        assert!(built.resources.contains("a.html"));
    }

    #[test]
    fn test_no_document_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.css", b"body{}");

        let err = build_resource_map(&config(&dir)).unwrap_err();
        assert!(matches!(err, InlinerError::NoDocument(_)));
    }

    #[test]
    fn test_scripts_and_stylesheets_holding_markup_are_not_documents() {
        let dir = TempDir::new().unwrap();
        write(&dir, "template.js", b"document.write('<html><body>x</body></html>');");
        write(&dir, "print.css", b"/* <html> */ body{}");

        let err = build_resource_map(&config(&dir)).unwrap_err();
        assert!(matches!(err, InlinerError::NoDocument(_)));
    }

    #[test]
    fn test_explicit_file_must_be_html() {
        let dir = TempDir::new().unwrap();
        write(&dir, "page.html", b"just text");
        write(&dir, "index.html", b"<html></html>");

        let cfg = InlineConfig::builder()
            .asset_dir(dir.path())
            .inline_file(Some("page.html".into()))
            .build();
        let err = build_resource_map(&cfg).unwrap_err();
        assert!(matches!(err, InlinerError::NotHtml(name) if name == "page.html"));
    }

    #[test]
    fn test_explicit_file_wins_and_is_not_a_resource() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.html", b"<html><body>home</body></html>");
        write(&dir, "page.html", b"<html><body>page</body></html>");

        let cfg = InlineConfig::builder()
            .asset_dir(dir.path())
            .inline_file(Some("page.html".into()))
            .build();
        let built = build_resource_map(&cfg).unwrap();
        assert_eq!(built.document.name(), "page.html");
        assert!(!built.resources.contains("page.html"));
        assert!(built.resources.contains("index.html"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.html", b"<html></html>");

        let cfg = InlineConfig::builder()
            .asset_dir(dir.path())
            .inline_file(Some("nope.html".into()))
            .build();
        let err = build_resource_map(&cfg).unwrap_err();
        assert!(matches!(err, InlinerError::InlineFileNotFound(_)));
    }

    #[test]
    fn test_script_close_is_escaped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.html", b"<html></html>");
        write(&dir, "app.js", b"document.write('<script></script>');");

        let built = build_resource_map(&config(&dir)).unwrap();
        let script = built.resources.get("app.js").unwrap();
        assert!(!script.value().contains("</script>"));
        assert_eq!(script.mime(), "text/javascript");
    }

    #[test]
    fn test_prettify_formats_scripts() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.html", b"<html></html>");
        write(&dir, "app.js", b"function f(){return 1;}");

        let cfg = InlineConfig::builder().asset_dir(dir.path()).prettify(true).build();
        let built = build_resource_map(&cfg).unwrap();
        assert_eq!(
            built.resources.get("app.js").unwrap().value(),
            "function f(){\n    return 1;\n}\n"
        );
    }

    #[test]
    fn test_exclusion_flags() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.html", b"<html></html>");
        write(&dir, "logo.png", b"\x89PNG\x0D\x0A\x1A\x0A\x00\x00");
        write(&dir, "clip.webm", b"\x1A\x45\xDF\xA3\x9F\x42");
        write(&dir, "font.woff", b"wOFF\x00\x01\x00\x00");

        let all = build_resource_map(&config(&dir)).unwrap();
        assert!(all.resources.contains("logo.png"));
        assert!(all.resources.contains("clip.webm"));
        assert!(all.resources.contains("font.woff"));

        let cfg = InlineConfig::builder()
            .asset_dir(dir.path())
            .exclude_images(true)
            .exclude_videos(true)
            .exclude_fonts(true)
            .build();
        let none = build_resource_map(&cfg).unwrap();
        assert!(!none.resources.contains("logo.png"));
        assert!(!none.resources.contains("clip.webm"));
        assert!(!none.resources.contains("font.woff"));
    }

    #[test]
    fn test_unknown_binaries_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.html", b"<html></html>");
        write(&dir, "blob.bin", b"\x00\xFE\x13\x37\x00");

        let built = build_resource_map(&config(&dir)).unwrap();
        assert!(!built.resources.contains("blob.bin"));
        assert_eq!(built.resources.len(), 1);
    }

    #[test]
    fn test_subdirectories_are_ignored() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.html", b"<html></html>");
        fs::create_dir(dir.path().join("nested.css")).unwrap();

        let built = build_resource_map(&config(&dir)).unwrap();
        assert!(!built.resources.contains("nested.css"));
    }

    #[test]
    fn test_missing_directory_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let cfg = InlineConfig::builder()
            .asset_dir(dir.path().join("missing"))
            .build();
        let err = build_resource_map(&cfg).unwrap_err();
        assert!(matches!(err, InlinerError::AssetDirUnreadable { .. }));
    }
}

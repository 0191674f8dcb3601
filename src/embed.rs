//! Build-time image embedding for static pages.
//!
//! Rewrites every `<img src>` in a directory of HTML pages into a
//! `data:<mime>;base64,...` URI read from an images directory, then saves the
//! page in place. Images are looked up by the basename of their `src`.
//! Everything else in the page is left byte-for-byte intact.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use lol_html::{element, rewrite_str, RewriteStrSettings};
use serde::Serialize;

use crate::error::EmbedError;
use crate::utils::image_mime;

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedOptions {
    /// Report what would change without writing pages.
    pub dry_run: bool,
}

/// Per-page outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageReport {
    pub page: PathBuf,
    /// Image references replaced by data URIs.
    pub embedded: usize,
    /// References whose image file was not found.
    pub missing: usize,
    /// References to files that are not images.
    pub unsupported: usize,
    /// Remote, empty or already-embedded references.
    pub skipped: usize,
    /// Raw image bytes inlined into the page.
    pub bytes: u64,
    /// Whether the page was rewritten on disk.
    pub written: bool,
}

/// Outcome for a whole pages directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmbedReport {
    pub pages: Vec<PageReport>,
}

impl EmbedReport {
    pub fn embedded(&self) -> usize {
        self.pages.iter().map(|p| p.embedded).sum()
    }

    pub fn missing(&self) -> usize {
        self.pages.iter().map(|p| p.missing).sum()
    }

    pub fn pages_written(&self) -> usize {
        self.pages.iter().filter(|p| p.written).count()
    }

    pub fn bytes(&self) -> u64 {
        self.pages.iter().map(|p| p.bytes).sum()
    }
}

/// Build a base64 data URI.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// `*.html` files directly inside `dir`, sorted by name.
pub fn html_pages(dir: &Path) -> Result<Vec<PathBuf>, EmbedError> {
    let entries = fs::read_dir(dir).map_err(|source| EmbedError::PagesDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut pages = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| EmbedError::PagesDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_html = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("html"));
        if is_html && path.is_file() {
            pages.push(path);
        }
    }
    pages.sort();
    Ok(pages)
}

/// What to do with one `src` value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolution {
    Embed { uri: String, bytes: u64 },
    Missing,
    Unsupported,
    Skip,
}

fn is_external(src: &str) -> bool {
    let lower = src.trim().to_ascii_lowercase();
    lower.is_empty()
        || lower.starts_with("data:")
        || lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
}

fn resolve_image(src: &str, images_dir: &Path, page: &Path) -> Resolution {
    if is_external(src) {
        return Resolution::Skip;
    }

    let Some(basename) = Path::new(src.trim()).file_name() else {
        return Resolution::Skip;
    };
    let image_path = images_dir.join(basename);

    if !image_path.is_file() {
        tracing::warn!(
            "Image not found: {} for {}. Skipping.",
            image_path.display(),
            page.display()
        );
        return Resolution::Missing;
    }

    let Some(mime) = image_mime(&image_path) else {
        tracing::warn!(
            "Not an embeddable image: {} for {}. Skipping.",
            image_path.display(),
            page.display()
        );
        return Resolution::Unsupported;
    };

    match fs::read(&image_path) {
        Ok(bytes) => {
            tracing::info!("Embedded image in {}: {}", page.display(), image_path.display());
            Resolution::Embed {
                uri: data_uri(&mime, &bytes),
                bytes: bytes.len() as u64,
            }
        }
        Err(e) => {
            tracing::warn!("Failed to read image {}: {}. Skipping.", image_path.display(), e);
            Resolution::Missing
        }
    }
}

/// Rewrite image sources in `html`. Returns the new markup and the counts
/// (with `page` and `written` left for the caller).
///
/// Only `<img>` elements the tokenizer sees are touched; markup inside
/// comments or script text is passed through, as is everything outside the
/// rewritten `src` values.
fn rewrite_html(
    html: &str,
    images_dir: &Path,
    page: &Path,
) -> Result<(String, PageReport), EmbedError> {
    let mut cache: HashMap<String, Resolution> = HashMap::new();
    let mut report = PageReport::default();

    let rewritten = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("img[src]", |img| {
                let Some(raw) = img.get_attribute("src") else {
                    return Ok(());
                };
                let src = raw.replace("&amp;", "&");

                let resolution = cache
                    .entry(src.clone())
                    .or_insert_with(|| resolve_image(&src, images_dir, page))
                    .clone();

                match resolution {
                    Resolution::Embed { uri, bytes } => {
                        img.set_attribute("src", &uri)?;
                        report.embedded += 1;
                        report.bytes += bytes;
                    }
                    Resolution::Missing => report.missing += 1,
                    Resolution::Unsupported => report.unsupported += 1,
                    Resolution::Skip => report.skipped += 1,
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|source| EmbedError::Rewrite {
        path: page.to_path_buf(),
        source,
    })?;

    Ok((rewritten, report))
}

/// Embed the images of a single page, writing it back when anything changed.
pub fn embed_page(
    page: &Path,
    images_dir: &Path,
    options: EmbedOptions,
) -> Result<PageReport, EmbedError> {
    let html = fs::read_to_string(page).map_err(|source| EmbedError::ReadPage {
        path: page.to_path_buf(),
        source,
    })?;

    let (rewritten, mut report) = rewrite_html(&html, images_dir, page)?;
    report.page = page.to_path_buf();

    if report.embedded > 0 && !options.dry_run {
        fs::write(page, rewritten).map_err(|source| EmbedError::WritePage {
            path: page.to_path_buf(),
            source,
        })?;
        report.written = true;
    }

    Ok(report)
}

/// Embed images in every `*.html` page of `pages_dir`.
pub fn embed_directory(
    pages_dir: &Path,
    images_dir: &Path,
    options: EmbedOptions,
) -> Result<EmbedReport, EmbedError> {
    let mut report = EmbedReport::default();
    for page in html_pages(pages_dir)? {
        report.pages.push(embed_page(&page, images_dir, options)?);
    }
    Ok(report)
}

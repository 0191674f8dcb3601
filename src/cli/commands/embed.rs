//! Embed command: inline images into the day pages.

use std::path::Path;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use advent::embed::{embed_page, html_pages, EmbedOptions, EmbedReport};
use advent::utils::format_size;
use advent::Config;

pub fn cmd_embed(
    config: &Config,
    pages: Option<&Path>,
    images: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let pages_dir = pages
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.resolve_path(&config.embed.pages_dir));
    let images_dir = images
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.resolve_path(&config.embed.images_dir));

    println!(
        "{} Embedding images from {} into {}",
        style("→").cyan(),
        images_dir.display(),
        pages_dir.display()
    );

    let page_paths = html_pages(&pages_dir)?;
    let progress = ProgressBar::new(page_paths.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let options = EmbedOptions { dry_run };
    let mut report = EmbedReport::default();
    for page in &page_paths {
        progress.set_message(
            page.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        let page_report = embed_page(page, &images_dir, options)
            .with_context(|| format!("Failed to embed images in {}", page.display()))?;
        report.pages.push(page_report);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let verb = if dry_run { "Would embed" } else { "Embedded" };
    println!(
        "{} {} {} images ({}) across {} pages",
        style("✓").green(),
        verb,
        report.embedded(),
        format_size(report.bytes()),
        page_paths.len()
    );
    if !dry_run {
        println!("  {} pages rewritten", report.pages_written());
    }
    if report.missing() > 0 {
        println!(
            "{} {} images not found (left unchanged)",
            style("!").yellow(),
            report.missing()
        );
    }
    Ok(())
}

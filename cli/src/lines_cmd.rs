use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use municourt::{PageContent, StatsExtractor, TextExtractor, contains_filings, group_into_lines};

pub fn run(extractor: &StatsExtractor, file: &Path, page: Option<u32>) -> Result<()> {
    let pages = extractor
        .pages_from_path(file)
        .with_context(|| format!("error extracting text from {}", file.display()))?;

    if let Some(n) = page {
        if !pages.iter().any(|p| p.page == n) {
            bail!("page {} out of range, document has {} pages", n, pages.len());
        }
    }

    let mut text = extractor.text_extractor();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for content in pages.iter().filter(|p| page.is_none_or(|n| p.page == n)) {
        write_page(&mut out, &mut text, content)?;
    }
    Ok(())
}

fn write_page<W: Write>(out: &mut W, text: &mut TextExtractor, content: &PageContent) -> Result<()> {
    let items = text.extract(&content.content);
    if contains_filings(&items) {
        writeln!(out, "Page {}:", content.page)?;
    } else {
        writeln!(out, "Page {}: (no table data)", content.page)?;
    }
    for (name, map) in &content.glyph_maps {
        writeln!(out, "  Font {}: {} glyphs mapped", name, map.len())?;
    }

    let lines = group_into_lines(&items);
    if lines.is_empty() {
        writeln!(out, "  (empty)")?;
    }
    for (line_idx, line) in lines.iter().enumerate() {
        writeln!(out, "  Line {}: {:?}", line_idx, line)?;
    }
    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::{info, debug};
use crate::pptx::{PptxPackage, rewrite_slide_text};

// @module: Presentation translation walker

/// Summary of one translation run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Where the translated copy was written
    pub output_path: PathBuf,

    /// Number of slides processed
    pub slides: usize,

    /// Paragraphs sent for translation
    pub translated: usize,

    /// Blank paragraphs left untouched
    pub skipped: usize,
}

/// Translate a presentation into a copy at `output_path`.
///
/// Copies the input byte-for-byte, then walks every slide in presentation
/// order and rewrites each non-blank paragraph with the text returned by
/// `translate`. The package is saved exactly once, after the full walk;
/// any failure before that leaves the untranslated copy on disk. When no
/// paragraph needed translation the copy is left byte-identical.
pub fn translate_presentation<F>(
    input_path: &Path,
    output_path: &Path,
    translate: &mut F,
) -> Result<RunSummary>
where
    F: FnMut(&str) -> Result<String>,
{
    fs::copy(input_path, output_path).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            input_path.display(),
            output_path.display()
        )
    })?;

    let mut package =
        PptxPackage::open(output_path).context("Failed to open presentation copy")?;
    let slide_parts = package.slide_parts().to_vec();
    info!(
        "Translating {} slides from {}",
        slide_parts.len(),
        input_path.display()
    );

    let mut translated = 0usize;
    let mut skipped = 0usize;

    for (index, part) in slide_parts.iter().enumerate() {
        let xml = package.part_bytes(part)?;
        let (rewritten, counts) = rewrite_slide_text(&xml, translate)
            .with_context(|| format!("Failed to rewrite slide {}", index + 1))?;

        if counts.translated > 0 {
            package.replace_part(part, rewritten);
        }
        debug!(
            "Slide {}: {} paragraphs translated, {} blank",
            index + 1,
            counts.translated,
            counts.skipped
        );
        translated += counts.translated;
        skipped += counts.skipped;
    }

    if package.is_modified() {
        package
            .save(output_path)
            .context("Failed to save translated presentation")?;
    } else {
        debug!("No paragraphs translated, keeping the untouched copy");
    }

    info!(
        "Translated {} paragraphs ({} blank) across {} slides",
        translated,
        skipped,
        slide_parts.len()
    );

    Ok(RunSummary {
        output_path: output_path.to_path_buf(),
        slides: slide_parts.len(),
        translated,
        skipped,
    })
}

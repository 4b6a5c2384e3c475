//! PDF text extraction with a ranked engine pair.
//!
//! The primary engine is [`pdf_extract`]; since it can panic on malformed
//! input (rather than returning errors), calls into it are wrapped in
//! [`std::panic::catch_unwind`]. The fallback engine is [`lopdf`], which
//! extracts text page by page through `Document::extract_text`. Either way
//! the result is the cleaned text of every non-empty page, each page
//! followed by one blank-line separator.

use crate::capability::PdfEngine;
use crate::outcome::Extraction;

pub(crate) const UNAVAILABLE_NOTICE: &str =
    "PDF extraction is unavailable: this binary was built without a PDF engine";

/// Extract the text of every page of a PDF, best effort.
///
/// Engine selection is injected by the caller; extraction failures of any
/// kind surface as [`Extraction::Failed`], never as a panic or a fatal
/// error.
pub(crate) fn extract_text(data: &[u8], engine: PdfEngine) -> Extraction {
    match engine {
        #[cfg(feature = "pdf-extract")]
        PdfEngine::Primary => finish(primary_pages(data)),
        #[cfg(feature = "lopdf")]
        PdfEngine::Fallback => finish(fallback_pages(data)),
        PdfEngine::Unavailable => Extraction::Unavailable(UNAVAILABLE_NOTICE),
    }
}

#[cfg(any(feature = "pdf-extract", feature = "lopdf"))]
fn finish(pages: crate::error::Result<Vec<String>>) -> Extraction {
    match pages {
        Ok(pages) => assemble(&pages),
        Err(e) => Extraction::Failed(e.to_string()),
    }
}

/// Join cleaned pages into the final text: each non-empty page is followed
/// by exactly one blank line; empty pages contribute nothing.
#[cfg(any(feature = "pdf-extract", feature = "lopdf"))]
fn assemble(pages: &[String]) -> Extraction {
    let mut out = String::new();
    for page in pages {
        let cleaned = clean_page(page);
        if cleaned.is_empty() {
            continue;
        }
        out.push_str(cleaned.trim_end_matches('\n'));
        out.push_str("\n\n");
    }
    Extraction::from_text(out)
}

#[cfg(feature = "pdf-extract")]
fn primary_pages(data: &[u8]) -> crate::error::Result<Vec<String>> {
    use crate::error::ExtractError;
    use std::panic::{self, AssertUnwindSafe};

    let data = data.to_vec(); // owned copy for the unwind boundary
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&data)
    }));
    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(ExtractError::Document(format!(
            "pdf-extract failed: {e}"
        ))),
        Err(_) => Err(ExtractError::Document(
            "pdf-extract panicked (malformed document)".into(),
        )),
    }
}

#[cfg(feature = "lopdf")]
fn fallback_pages(data: &[u8]) -> crate::error::Result<Vec<String>> {
    use crate::error::ExtractError;

    let doc = lopdf::Document::load_mem(data)
        .map_err(|e| ExtractError::Document(format!("lopdf failed: {e}")))?;

    let mut pages = Vec::new();
    for (page_num, _page_id) in doc.get_pages() {
        // A page that fails to decode yields no text, not a failed run
        pages.push(doc.extract_text(&[page_num]).unwrap_or_default());
    }
    Ok(pages)
}

/// Clean up a page of extracted text: trim trailing whitespace from each
/// line, collapse runs of 3+ blank lines down to 2, and trim
/// leading/trailing blank lines from the whole page.
#[cfg(any(feature = "pdf-extract", feature = "lopdf"))]
fn clean_page(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0_u32;
    for line in raw.lines().map(str::trim_end) {
        if line.is_empty() {
            blank_run += 1;
            if blank_run <= 2 {
                out.push('\n');
            }
        } else {
            blank_run = 0;
            out.push_str(line);
            out.push('\n');
        }
    }

    let trimmed = out.trim_matches('\n');
    if trimmed.is_empty() {
        String::new()
    } else {
        let mut s = trimmed.to_string();
        s.push('\n');
        s
    }
}

//! Extractor outcomes.
//!
//! Extractors report a discriminated outcome instead of coercing failures
//! into empty strings, so the driver alone decides which outcomes produce
//! an output file and which only produce a console line.

/// What an extractor produced for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Extraction {
    /// Non-empty extracted content, ready to write.
    Content(String),
    /// Extraction ran but yielded nothing (e.g. an image-only PDF).
    Empty,
    /// The required capability was not compiled in; carries the notice text.
    Unavailable(&'static str),
    /// Extraction failed; carries a human-readable reason.
    Failed(String),
}

impl Extraction {
    /// Wrap extracted text, mapping whitespace-only text to [`Extraction::Empty`].
    pub(crate) fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            Extraction::Empty
        } else {
            Extraction::Content(text)
        }
    }
}

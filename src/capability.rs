//! Compiled-in extraction capabilities.
//!
//! Which engines exist is decided at compile time by cargo features:
//! `pdf-extract` (primary PDF engine), `lopdf` (fallback PDF engine), and
//! `xlsx` (spreadsheet parsing). [`Capabilities::detect`] collapses the
//! feature set into one value that the driver passes to the extractors,
//! so the engine ranking is resolved exactly once and tests can inject
//! any combination.

/// Ranked PDF engine selection. `Primary` wins over `Fallback` whenever
/// both are compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
// Which variants actually get constructed depends on the feature set
#[allow(dead_code)]
pub(crate) enum PdfEngine {
    /// `pdf-extract`, the preferred engine.
    #[cfg(feature = "pdf-extract")]
    Primary,
    /// `lopdf`, used when the primary engine is not compiled in.
    #[cfg(feature = "lopdf")]
    Fallback,
    /// No PDF engine; PDF extraction yields nothing.
    Unavailable,
}

/// The capability set resolved at startup. Read-only after detection.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Capabilities {
    pub(crate) pdf: PdfEngine,
    /// Whether spreadsheet (.xlsx) parsing was compiled in.
    pub(crate) tabular: bool,
}

impl Capabilities {
    /// Resolve capabilities from the compiled feature set, printing a
    /// notice for anything missing.
    pub(crate) fn detect() -> Self {
        let caps = Self {
            pdf: detect_pdf(),
            tabular: cfg!(feature = "xlsx"),
        };
        if !caps.tabular {
            eprintln!("xlsx support not compiled in, spreadsheets will not be extracted");
        }
        caps
    }
}

#[cfg(feature = "pdf-extract")]
fn detect_pdf() -> PdfEngine {
    PdfEngine::Primary
}

#[cfg(all(not(feature = "pdf-extract"), feature = "lopdf"))]
fn detect_pdf() -> PdfEngine {
    eprintln!("pdf-extract not compiled in, falling back to lopdf");
    PdfEngine::Fallback
}

#[cfg(all(not(feature = "pdf-extract"), not(feature = "lopdf")))]
fn detect_pdf() -> PdfEngine {
    eprintln!("no PDF engine compiled in, PDFs will not be extracted");
    PdfEngine::Unavailable
}

//! The per-document conversion loop.
//!
//! Walks a declared list of source → destination jobs, dispatches each
//! source to the right extractor, and writes non-empty results as
//! markdown files. Every per-document failure is reported on the console
//! and the loop moves on; the only fatal path is failing to create the
//! output directory.

use std::fs;
use std::path::Path;

use crate::capability::Capabilities;
use crate::error::Result;
use crate::outcome::Extraction;
use crate::{pdf, xlsx};

/// Which extractor a source file needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Pdf,
    Spreadsheet,
}

/// One source → destination conversion job.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocJob {
    /// Source file name under the base directory.
    pub(crate) source: &'static str,
    /// Destination markdown file name under the output directory.
    pub(crate) dest: &'static str,
    pub(crate) kind: Kind,
}

/// Convert every job in declared order.
///
/// Creates `out_dir` (with parents) up front; a missing source file or a
/// failed extraction only skips that job. Output files start with a
/// `# <title>` heading derived from the source file name.
pub(crate) fn run(
    jobs: &[DocJob],
    base_dir: &Path,
    out_dir: &Path,
    caps: Capabilities,
) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    for job in jobs {
        let src_path = base_dir.join(job.source);
        let dst_path = out_dir.join(job.dest);

        println!("Processing: {}", job.source);

        if !src_path.exists() {
            println!("  File not found: {}", src_path.display());
            continue;
        }

        let data = match fs::read(&src_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                println!("  Read failed: {e}");
                continue;
            }
        };

        let outcome = match job.kind {
            Kind::Pdf => pdf::extract_text(&data, caps.pdf),
            Kind::Spreadsheet => xlsx::extract_markdown(&data, caps.tabular),
        };

        let content = match outcome {
            Extraction::Content(content) => content,
            Extraction::Empty => {
                println!("  No content extracted");
                continue;
            }
            Extraction::Failed(reason) => {
                println!("  Extraction failed: {reason}");
                continue;
            }
            Extraction::Unavailable(notice) => match job.kind {
                // Spreadsheet docs carry the notice in place of tables;
                // an unextractable PDF produces no doc at all.
                Kind::Spreadsheet => {
                    println!("  Capability missing, writing notice");
                    notice.to_string()
                }
                Kind::Pdf => {
                    println!("  Skipped: {notice}");
                    continue;
                }
            },
        };

        match write_doc(&dst_path, job.source, &content) {
            Ok(()) => println!("  Saved to: {}", dst_path.display()),
            Err(e) => println!("  Write failed: {e}"),
        }
    }

    Ok(())
}

/// Write a destination doc: `# <title>`, a blank line, then the content.
fn write_doc(path: &Path, source_name: &str, content: &str) -> Result<()> {
    let mut doc = String::with_capacity(content.len() + 64);
    doc.push_str("# ");
    doc.push_str(&title_for(source_name));
    doc.push_str("\n\n");
    doc.push_str(content);
    fs::write(path, doc)?;
    Ok(())
}

/// Heading for a generated doc: the source file name minus its extension.
fn title_for(source_name: &str) -> String {
    Path::new(source_name).file_stem().map_or_else(
        || source_name.to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::PdfEngine;
    use std::fs;

    fn caps(tabular: bool) -> Capabilities {
        Capabilities {
            pdf: PdfEngine::Unavailable,
            tabular,
        }
    }

    const FOUR_JOBS: &[DocJob] = &[
        DocJob {
            source: "guide.pdf",
            dest: "guide.md",
            kind: Kind::Pdf,
        },
        DocJob {
            source: "crypto.pdf",
            dest: "crypto.md",
            kind: Kind::Pdf,
        },
        DocJob {
            source: "codes.xlsx",
            dest: "codes.md",
            kind: Kind::Spreadsheet,
        },
        DocJob {
            source: "apps.xlsx",
            dest: "apps.md",
            kind: Kind::Spreadsheet,
        },
    ];

    // ── title_for ────────────────────────────────────────────────

    #[test]
    fn title_strips_extension() {
        assert_eq!(title_for("guide_v3.1.pdf"), "guide_v3.1");
        assert_eq!(title_for("codes.xlsx"), "codes");
        assert_eq!(title_for("no_extension"), "no_extension");
    }

    // ── run ──────────────────────────────────────────────────────

    #[test]
    fn missing_sources_write_nothing() {
        let base = tempfile::tempdir().expect("tempdir");
        let out = base.path().join("docs");

        run(FOUR_JOBS, base.path(), &out, caps(true)).expect("run");

        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).expect("read_dir").count(), 0);
    }

    #[test]
    fn partial_source_set_completes() {
        let base = tempfile::tempdir().expect("tempdir");
        let out = base.path().join("docs");
        // Only one of the four sources exists, and it is garbage — the
        // run must still finish cleanly with no outputs
        fs::write(base.path().join("guide.pdf"), b"junk").expect("write");

        run(FOUR_JOBS, base.path(), &out, caps(true)).expect("run");
        assert_eq!(fs::read_dir(&out).expect("read_dir").count(), 0);
    }

    #[test]
    fn tabular_unavailable_still_writes_notice_doc() {
        let base = tempfile::tempdir().expect("tempdir");
        let out = base.path().join("docs");
        fs::write(base.path().join("codes.xlsx"), b"ignored").expect("write");

        let job = DocJob {
            source: "codes.xlsx",
            dest: "codes.md",
            kind: Kind::Spreadsheet,
        };
        run(&[job], base.path(), &out, caps(false)).expect("run");

        let doc = fs::read_to_string(out.join("codes.md")).expect("notice doc");
        assert!(doc.starts_with("# codes\n\n"));
        assert!(doc.contains(crate::xlsx::UNAVAILABLE_NOTICE));
    }

    #[test]
    fn pdf_engine_unavailable_writes_nothing() {
        let base = tempfile::tempdir().expect("tempdir");
        let out = base.path().join("docs");
        fs::write(base.path().join("guide.pdf"), b"%PDF-1.4").expect("write");

        let job = DocJob {
            source: "guide.pdf",
            dest: "guide.md",
            kind: Kind::Pdf,
        };
        run(&[job], base.path(), &out, caps(true)).expect("run");
        assert!(!out.join("guide.md").exists());
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn spreadsheet_converts_to_titled_markdown() {
        let base = tempfile::tempdir().expect("tempdir");
        let out = base.path().join("docs");
        fs::write(base.path().join("codes.xlsx"), crate::testdata::sample_xlsx())
            .expect("write");

        let job = DocJob {
            source: "codes.xlsx",
            dest: "codes.md",
            kind: Kind::Spreadsheet,
        };
        run(&[job], base.path(), &out, caps(true)).expect("run");

        let doc = fs::read_to_string(out.join("codes.md")).expect("doc");
        assert!(doc.starts_with("# codes\n\n"));
        assert!(doc.contains("## Codes"));
        assert!(doc.contains("| 0000 | Success |"));
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn rerun_with_unchanged_inputs_is_byte_identical() {
        let base = tempfile::tempdir().expect("tempdir");
        let out = base.path().join("docs");
        fs::write(base.path().join("codes.xlsx"), crate::testdata::sample_xlsx())
            .expect("write");

        let job = DocJob {
            source: "codes.xlsx",
            dest: "codes.md",
            kind: Kind::Spreadsheet,
        };
        run(&[job], base.path(), &out, caps(true)).expect("first run");
        let first = fs::read(out.join("codes.md")).expect("first");
        run(&[job], base.path(), &out, caps(true)).expect("second run");
        let second = fs::read(out.join("codes.md")).expect("second");
        assert_eq!(first, second);
    }
}

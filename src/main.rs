//! `extract-docs` — converts the CNSPay Non-PG vendor document set to markdown.
//!
//! Reads the integration guide and the crypto-sample appendix (PDF) plus
//! the response-code book and the app identifier list (xlsx) from a fixed
//! source directory and writes one markdown file per document under
//! `docs/`. Extraction is best effort: missing files, missing engines,
//! and malformed documents are reported on the console and never abort
//! the run.

mod capability;
#[cfg(feature = "xlsx")]
mod dateconv;
mod driver;
mod error;
mod outcome;
mod pdf;
#[cfg(feature = "xlsx")]
mod sheet;
#[cfg(all(test, feature = "xlsx"))]
mod testdata;
mod xlsx;

use std::path::Path;
use std::process;

use capability::Capabilities;
use driver::{DocJob, Kind};

/// Directory holding the vendor document set.
const BASE_DIR: &str = "CNSPay_Non-PG_연동가이드_v3.1_20250829";
/// Directory the markdown docs are written to.
const OUT_DIR: &str = "docs";

/// The four documents this tool exists to convert, in processing order.
const JOBS: &[DocJob] = &[
    DocJob {
        source: "CNSPay_Non-PG_연동가이드_v3.1_20250829.pdf",
        dest: "CNSPay_Non-PG_연동가이드.md",
        kind: Kind::Pdf,
    },
    DocJob {
        source: "별첨_CNSPay_Non-PG_암복호화_샘플_v1.2.pdf",
        dest: "CNSPay_암복호화_샘플.md",
        kind: Kind::Pdf,
    },
    DocJob {
        source: "별첨_CNSPay_Non-PG_응답코드집_v1.3.xlsx",
        dest: "CNSPay_응답코드집.md",
        kind: Kind::Spreadsheet,
    },
    DocJob {
        source: "별첨.Android패키지명 및 iOS앱스키마 리스트_20250407.xlsx",
        dest: "앱스키마_패키지명_리스트.md",
        kind: Kind::Spreadsheet,
    },
];

fn main() {
    let caps = Capabilities::detect();

    if let Err(e) = driver::run(JOBS, Path::new(BASE_DIR), Path::new(OUT_DIR), caps) {
        eprintln!("extract-docs: {e}");
        process::exit(1);
    }
}

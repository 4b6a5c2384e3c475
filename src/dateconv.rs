//! Excel serial date conversion.
//!
//! Excel stores dates as floating-point serial numbers: the integer part
//! counts days since 1899-12-30 (with the Lotus 1-2-3 bug that treats 1900
//! as a leap year), the fractional part is the time of day. Whether a
//! numeric cell is a date depends on its number format (`numFmtId`). This
//! module detects date formats and converts serials to ISO strings; the
//! calendar arithmetic itself goes through `chrono`.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

/// Built-in numFmtIds that Excel defines as date/time formats.
///
/// Source: ECMA-376 Part 1, §18.8.30. These IDs are hardcoded into Excel
/// and never appear in styles.xml.
const BUILTIN_DATE_FMT_IDS: &[u16] = &[
    14, 15, 16, 17, 18, 19, 20, 21, 22, // standard date/time
    27, 28, 29, 30, 31, 32, 33, 34, 35, 36, // CJK date formats
    45, 46, 47, // time formats (mm:ss, [h]:mm:ss, mm:ss.0)
    50, 51, 52, 53, 54, 55, 56, 57, 58, // CJK extended date formats
];

const SECS_PER_DAY: f64 = 86_400.0;

/// Check if a `numFmtId` refers to a built-in date/time format.
fn is_date_format_id(id: u16) -> bool {
    BUILTIN_DATE_FMT_IDS.contains(&id)
}

/// Check if a custom format string looks like a date/time format.
///
/// Heuristic: the format contains date/time tokens (`y`, `m`, `d`, `h`,
/// `s`) but no number tokens (`0`, `#`, `?`). Quoted literals and
/// backslash-escaped characters are ignored.
fn is_date_format_string(fmt: &str) -> bool {
    let mut has_date_token = false;
    let mut has_number_token = false;
    let mut in_quote = false;
    let mut chars = fmt.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '"' => in_quote = !in_quote,
            _ if in_quote => {}
            // 'm' is ambiguous (month or minute) but either way it's a date
            'y' | 'Y' | 'm' | 'M' | 'd' | 'D' | 'h' | 'H' | 's' | 'S' => has_date_token = true,
            '0' | '#' | '?' => has_number_token = true,
            _ => {}
        }
    }

    has_date_token && !has_number_token
}

/// Resolve which cellXf style indices are date formats.
///
/// `fmt_ids` holds one `numFmtId` per cellXf entry; `custom_formats` maps
/// custom numFmtIds (≥ 164) to their format codes.
pub(crate) fn resolve_date_styles(
    fmt_ids: &[u16],
    custom_formats: &HashMap<u16, String>,
) -> Vec<bool> {
    fmt_ids
        .iter()
        .map(|&id| {
            is_date_format_id(id)
                || custom_formats
                    .get(&id)
                    .is_some_and(|code| is_date_format_string(code))
        })
        .collect()
}

/// Convert an Excel serial number to an ISO 8601 string.
///
/// Returns `YYYY-MM-DD` for whole numbers, `YYYY-MM-DD HH:MM:SS` when
/// there is a time component, and `HH:MM:SS` for pure time values
/// (serial < 1). Returns `None` for serials that don't denote a
/// date/time (negative, non-finite, past year 9999, or plain zero) so
/// the caller can keep the raw cell text.
pub(crate) fn serial_to_iso(serial: f64) -> Option<String> {
    // 2_958_465 is 9999-12-31
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }

    #[allow(clippy::cast_possible_truncation)] // bounded above
    let days = serial.floor() as i64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let secs = (((serial - serial.floor()) * SECS_PER_DAY).round() as u32).min(86_399);

    if days == 0 {
        if secs == 0 {
            return None;
        }
        return Some(format_hms(secs));
    }

    // Serial 60 names the phantom 1900-02-29 that the Lotus bug invented;
    // chrono rightly refuses to represent it.
    if days == 60 {
        return Some(join_date_time("1900-02-29", secs));
    }

    // Serials 1..=59 predate the phantom day, so their epoch is one day later
    let epoch = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    #[allow(clippy::cast_sign_loss)] // days >= 1 here
    let date = epoch.checked_add_days(Days::new(days as u64))?;
    Some(join_date_time(&date.format("%Y-%m-%d").to_string(), secs))
}

fn format_hms(secs: u32) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}

fn join_date_time(date: &str, secs: u32) -> String {
    if secs == 0 {
        date.to_string()
    } else {
        format!("{date} {}", format_hms(secs))
    }
}

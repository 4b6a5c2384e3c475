//! OOXML `.xlsx` (Excel) spreadsheet extraction.
//!
//! Unzips the `.xlsx` archive, parses the shared string table, the style
//! sheet (for date-format detection), and each worksheet's XML, then
//! renders every sheet as a markdown section via [`crate::sheet`]. Sheets
//! are taken in workbook order and none is skipped — hidden or empty
//! sheets still produce their section heading.

use crate::outcome::Extraction;

/// Fixed notice written in place of table content when the tabular
/// capability is missing.
pub(crate) const UNAVAILABLE_NOTICE: &str =
    "Spreadsheet extraction is unavailable: this binary was built without the `xlsx` feature";

/// Extract a markdown rendering of every sheet in an `.xlsx` file.
///
/// `tabular` is the injected capability flag; when it is off the fixed
/// notice is returned instead of table content. Parse failures surface as
/// [`Extraction::Failed`], never as a fatal error.
#[cfg(feature = "xlsx")]
pub(crate) fn extract_markdown(data: &[u8], tabular: bool) -> Extraction {
    if !tabular {
        return Extraction::Unavailable(UNAVAILABLE_NOTICE);
    }
    match imp::parse_workbook(data) {
        Ok(sheets) => Extraction::from_text(crate::sheet::render_markdown(&sheets)),
        Err(e) => Extraction::Failed(e.to_string()),
    }
}

#[cfg(not(feature = "xlsx"))]
pub(crate) fn extract_markdown(_data: &[u8], _tabular: bool) -> Extraction {
    Extraction::Unavailable(UNAVAILABLE_NOTICE)
}

#[cfg(feature = "xlsx")]
mod imp {
    use std::collections::HashMap;
    use std::io::{Cursor, Read};

    use quick_xml::events::{BytesStart, Event};
    use quick_xml::reader::Reader;
    use zip::ZipArchive;

    use crate::dateconv;
    use crate::error::{ExtractError, Result};
    use crate::sheet::Sheet;

    type Archive<'a> = ZipArchive<Cursor<&'a [u8]>>;

    /// Parse the whole archive into a list of sheets, in workbook order.
    pub(crate) fn parse_workbook(data: &[u8]) -> Result<Vec<Sheet>> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;

        // Optional parts: files using only inline strings have no shared
        // string table, and styles.xml may be absent entirely
        let strings = read_part(&mut archive, "xl/sharedStrings.xml")
            .map(|xml| parse_shared_strings_xml(&xml))
            .unwrap_or_default();
        let date_styles = read_part(&mut archive, "xl/styles.xml")
            .map(|xml| parse_styles_xml(&xml))
            .unwrap_or_default();

        let mut sheets = Vec::new();
        for (name, path) in sheet_order(&mut archive)? {
            let Some(xml) = read_part(&mut archive, &path) else {
                continue;
            };
            sheets.push(Sheet {
                name,
                rows: parse_sheet_xml(&xml, &strings, &date_styles),
            });
        }

        Ok(sheets)
    }

    /// Read a ZIP entry as a UTF-8 string, `None` if absent or unreadable.
    fn read_part(archive: &mut Archive, name: &str) -> Option<String> {
        let mut xml = String::new();
        archive.by_name(name).ok()?.read_to_string(&mut xml).ok()?;
        Some(xml)
    }

    /// Get an attribute value from an XML element by name.
    fn attr(e: &BytesStart, name: &[u8]) -> Option<String> {
        e.attributes()
            .flatten()
            .find(|a| a.key.as_ref() == name)
            .and_then(|a| std::str::from_utf8(&a.value).ok().map(String::from))
    }

    // ── Sheet discovery ────────────────────────────────────────────

    /// Resolve `(sheet_name, zip_path)` pairs in workbook order from
    /// `xl/workbook.xml` and its relationships file. Hidden sheets are
    /// included; the stored order is the order pandas-style consumers see.
    fn sheet_order(archive: &mut Archive) -> Result<Vec<(String, String)>> {
        let workbook_xml = read_part(archive, "xl/workbook.xml")
            .ok_or_else(|| ExtractError::Document("missing xl/workbook.xml".into()))?;
        let rels_xml = read_part(archive, "xl/_rels/workbook.xml.rels")
            .ok_or_else(|| ExtractError::Document("missing workbook relationships".into()))?;

        // name → rId, in declaration order
        let mut entries: Vec<(String, String)> = Vec::new();
        let mut reader = Reader::from_str(&workbook_xml);
        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e) | Event::Start(ref e))
                    if e.local_name().as_ref() == b"sheet" =>
                {
                    if let (Some(name), Some(rid)) = (attr(e, b"name"), attr(e, b"r:id")) {
                        entries.push((name, rid));
                    }
                }
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
        }

        // rId → target path
        let mut targets: HashMap<String, String> = HashMap::new();
        let mut reader = Reader::from_str(&rels_xml);
        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e) | Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    if let (Some(id), Some(target)) = (attr(e, b"Id"), attr(e, b"Target")) {
                        targets.insert(id, target);
                    }
                }
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
        }

        Ok(entries
            .into_iter()
            .filter_map(|(name, rid)| {
                let target = targets.get(&rid)?;
                // Targets are relative to xl/ unless they start with /
                let path = target.strip_prefix('/').map_or_else(
                    || format!("xl/{target}"),
                    ToString::to_string,
                );
                Some((name, path))
            })
            .collect())
    }

    // ── Shared strings ─────────────────────────────────────────────

    /// Parse the shared string table: one string per `<si>`, collecting
    /// all text runs (plain `<t>` or rich `<r><t>`).
    fn parse_shared_strings_xml(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut strings = Vec::new();
        let mut in_si = false;
        let mut current = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"si" => {
                    in_si = true;
                    current.clear();
                }
                Ok(Event::End(ref e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(std::mem::take(&mut current));
                    in_si = false;
                }
                Ok(Event::Text(ref t)) if in_si => {
                    if let Ok(s) = t.unescape() {
                        current.push_str(&s);
                    }
                }
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
        }

        strings
    }

    // ── Styles / date detection ────────────────────────────────────

    /// Per-cellXf date flags resolved from `xl/styles.xml`.
    #[derive(Debug, Default)]
    pub(super) struct DateStyles {
        is_date: Vec<bool>,
    }

    impl DateStyles {
        fn is_date_style(&self, style_idx: usize) -> bool {
            self.is_date.get(style_idx).copied().unwrap_or(false)
        }
    }

    /// Read `<numFmt>` definitions and `<cellXfs>` entries, then resolve
    /// which style indices carry a date format.
    fn parse_styles_xml(xml: &str) -> DateStyles {
        let mut reader = Reader::from_str(xml);
        let mut custom_formats: HashMap<u16, String> = HashMap::new();
        let mut fmt_ids: Vec<u16> = Vec::new();
        let mut in_cell_xfs = false;

        loop {
            let event = match reader.read_event() {
                Ok(Event::Eof) | Err(_) => break,
                Ok(e) => e,
            };
            match event {
                Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                    b"cellXfs" => in_cell_xfs = true,
                    b"numFmt" => {
                        if let (Some(id), Some(code)) =
                            (attr(e, b"numFmtId"), attr(e, b"formatCode"))
                        {
                            if let Ok(id) = id.parse::<u16>() {
                                custom_formats.insert(id, code);
                            }
                        }
                    }
                    b"xf" if in_cell_xfs => {
                        fmt_ids.push(
                            attr(e, b"numFmtId")
                                .and_then(|s| s.parse().ok())
                                .unwrap_or(0),
                        );
                    }
                    _ => {}
                },
                Event::End(ref e) if e.local_name().as_ref() == b"cellXfs" => {
                    in_cell_xfs = false;
                }
                _ => {}
            }
        }

        DateStyles {
            is_date: dateconv::resolve_date_styles(&fmt_ids, &custom_formats),
        }
    }

    // ── Worksheet parsing ──────────────────────────────────────────

    /// Parse one worksheet's XML into a dense rectangular grid.
    ///
    /// Cells are placed by their `r` reference so gaps in sparse rows are
    /// preserved as empty cells.
    fn parse_sheet_xml(xml: &str, strings: &[String], styles: &DateStyles) -> Vec<Vec<String>> {
        let mut reader = Reader::from_str(xml);
        let mut sparse: Vec<Vec<(usize, String)>> = Vec::new();
        let mut ncols = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"row" => {
                    let row = parse_row(&mut reader, strings, styles);
                    for &(col, _) in &row {
                        ncols = ncols.max(col + 1);
                    }
                    sparse.push(row);
                }
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
        }

        sparse
            .into_iter()
            .map(|row| {
                let mut dense = vec![String::new(); ncols];
                for (col, value) in row {
                    if col < ncols {
                        dense[col] = value;
                    }
                }
                dense
            })
            .collect()
    }

    /// Parse a `<row>` element into `(column_index, value)` pairs.
    fn parse_row(
        reader: &mut Reader<&[u8]>,
        strings: &[String],
        styles: &DateStyles,
    ) -> Vec<(usize, String)> {
        let mut cells: Vec<(usize, String)> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"c" => {
                    let col = attr(e, b"r")
                        .as_deref()
                        .map_or(cells.len(), col_ref_to_index);
                    let cell_type = attr(e, b"t").unwrap_or_default();
                    let style_idx: usize =
                        attr(e, b"s").and_then(|s| s.parse().ok()).unwrap_or(0);
                    let value = parse_cell(reader, &cell_type, strings, style_idx, styles);
                    cells.push((col, value));
                }
                Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"c" => {
                    let col = attr(e, b"r")
                        .as_deref()
                        .map_or(cells.len(), col_ref_to_index);
                    cells.push((col, String::new()));
                }
                Ok(Event::End(ref e)) if e.local_name().as_ref() == b"row" => break,
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
        }

        cells
    }

    /// Parse one `<c>` cell element and return its display value.
    ///
    /// Handles shared string references (`t="s"`), inline strings
    /// (`t="inlineStr"`), and raw `<v>` values. Numeric cells whose style
    /// carries a date format are converted to ISO dates.
    fn parse_cell(
        reader: &mut Reader<&[u8]>,
        cell_type: &str,
        strings: &[String],
        style_idx: usize,
        styles: &DateStyles,
    ) -> String {
        let mut value = String::new();
        let mut inline_text = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"v" => {
                        if let Ok(Event::Text(t)) = reader.read_event() {
                            if let Ok(s) = t.unescape() {
                                value = s.into_owned();
                            }
                        }
                    }
                    b"is" => inline_text = parse_inline_string(reader),
                    _ => {}
                },
                Ok(Event::End(ref e)) if e.local_name().as_ref() == b"c" => break,
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
        }

        match cell_type {
            "s" => value
                .parse::<usize>()
                .ok()
                .and_then(|idx| strings.get(idx).cloned())
                .unwrap_or_default(),
            "inlineStr" => inline_text,
            "" | "n" => {
                if styles.is_date_style(style_idx) {
                    value
                        .parse::<f64>()
                        .ok()
                        .and_then(dateconv::serial_to_iso)
                        .unwrap_or(value)
                } else {
                    value
                }
            }
            // booleans ("b"), errors ("e"), formula strings ("str")
            _ => value,
        }
    }

    /// Collect all `<t>` text inside an `<is>` inline string element.
    fn parse_inline_string(reader: &mut Reader<&[u8]>) -> String {
        let mut text = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Text(ref t)) => {
                    if let Ok(s) = t.unescape() {
                        text.push_str(&s);
                    }
                }
                Ok(Event::End(ref e)) if e.local_name().as_ref() == b"is" => break,
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
        }

        text
    }

    /// Convert a cell reference like "B3" or "AA1" to a 0-based column
    /// index: A=0, B=1, ..., Z=25, AA=26.
    fn col_ref_to_index(cell_ref: &str) -> usize {
        let mut col = 0usize;
        for ch in cell_ref.bytes() {
            if !ch.is_ascii_alphabetic() {
                break;
            }
            col = col * 26 + usize::from(ch.to_ascii_uppercase() - b'A') + 1;
        }
        col.saturating_sub(1)
    }

}

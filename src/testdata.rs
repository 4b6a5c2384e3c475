//! In-test construction of minimal `.xlsx` archives.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Build a two-sheet workbook ("Codes", "Apps") as xlsx bytes.
///
/// Only the parts the parser reads are included: workbook, workbook
/// relationships, shared strings, and the two worksheets.
pub(crate) fn sample_xlsx() -> Vec<u8> {
    let workbook = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="Codes" sheetId="1" r:id="rId1"/>
        <sheet name="Apps" sheetId="2" r:id="rId2"/>
    </sheets>
</workbook>"#;

    let workbook_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
</Relationships>"#;

    let shared_strings = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="6" uniqueCount="6">
    <si><t>Code</t></si>
    <si><t>Meaning</t></si>
    <si><t>0000</t></si>
    <si><t>Success</t></si>
    <si><t>Package</t></si>
    <si><t>Scheme</t></si>
</sst>"#;

    let sheet1 = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>
        <row r="1">
            <c r="A1" t="s"><v>0</v></c>
            <c r="B1" t="s"><v>1</v></c>
        </row>
        <row r="2">
            <c r="A2" t="s"><v>2</v></c>
            <c r="B2" t="s"><v>3</v></c>
        </row>
    </sheetData>
</worksheet>"#;

    let sheet2 = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>
        <row r="1">
            <c r="A1" t="s"><v>4</v></c>
            <c r="B1" t="s"><v>5</v></c>
        </row>
        <row r="2">
            <c r="A2" t="inlineStr"><is><t>com.example.pay</t></is></c>
            <c r="B2" t="inlineStr"><is><t>examplepay://</t></is></c>
        </row>
    </sheetData>
</worksheet>"#;

    let mut zw = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default();
    for (name, content) in [
        ("xl/workbook.xml", workbook),
        ("xl/_rels/workbook.xml.rels", workbook_rels),
        ("xl/sharedStrings.xml", shared_strings),
        ("xl/worksheets/sheet1.xml", sheet1),
        ("xl/worksheets/sheet2.xml", sheet2),
    ] {
        zw.start_file(name, opts).expect("start zip entry");
        zw.write_all(content.as_bytes()).expect("write zip entry");
    }
    zw.finish().expect("finish zip").into_inner()
}

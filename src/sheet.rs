//! Markdown rendering of parsed worksheets.
//!
//! Provides the [`Sheet`] struct (a named 2D grid of cell values) and the
//! renderer that turns a workbook's sheets into one markdown section per
//! sheet. Every sheet gets a `## <name>` heading in workbook order, even
//! when it holds no data; the table itself uses the first row as header,
//! with no index column.

/// A parsed worksheet: a name and a 2D grid of cell values.
#[derive(Debug)]
pub(crate) struct Sheet {
    pub(crate) name: String,
    pub(crate) rows: Vec<Vec<String>>,
}

/// Render every sheet as a `## <name>` section followed by a markdown
/// table. Sheets appear in the given order; a sheet without any data
/// still contributes its heading.
pub(crate) fn render_markdown(sheets: &[Sheet]) -> String {
    let mut out = String::new();

    for sheet in sheets {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("## ");
        out.push_str(&sheet.name);
        out.push('\n');

        let rows = strip_trailing_empty_rows(&sheet.rows);
        let (rows, ncols) = strip_empty_cols(&rows);
        if ncols == 0 {
            continue;
        }

        out.push('\n');

        // First row is the header
        push_table_row(&mut out, &rows[0]);
        out.push('|');
        for _ in 0..ncols {
            out.push_str(" --- |");
        }
        out.push('\n');

        for row in rows.iter().skip(1) {
            push_table_row(&mut out, row);
        }
    }

    out
}

fn push_table_row(out: &mut String, row: &[String]) {
    out.push_str("| ");
    out.push_str(
        &row.iter()
            .map(|c| escape_cell(c))
            .collect::<Vec<_>>()
            .join(" | "),
    );
    out.push_str(" |\n");
}

/// Escape pipes and flatten embedded newlines so a cell can't break the
/// table.
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Strip trailing rows that are entirely empty.
fn strip_trailing_empty_rows(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let last_nonempty = rows
        .iter()
        .rposition(|row| row.iter().any(|cell| !cell.trim().is_empty()));
    last_nonempty.map_or_else(Vec::new, |idx| rows[..=idx].to_vec())
}

/// Strip leading and trailing columns that are entirely empty.
/// Returns the trimmed rows and the new column count.
fn strip_empty_cols(rows: &[Vec<String>]) -> (Vec<Vec<String>>, usize) {
    let ncols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if ncols == 0 {
        return (Vec::new(), 0);
    }

    let col_has_data = |c: usize| {
        rows.iter()
            .any(|r| r.get(c).is_some_and(|v| !v.trim().is_empty()))
    };
    let Some(first_col) = (0..ncols).find(|&c| col_has_data(c)) else {
        return (Vec::new(), 0);
    };
    let Some(last_col) = (0..ncols).rfind(|&c| col_has_data(c)) else {
        return (Vec::new(), 0);
    };

    let trimmed: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            (first_col..=last_col)
                .map(|c| row.get(c).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    (trimmed, last_col - first_col + 1)
}

//! Markdown Rendering
//!
//! Fixed-width GitHub-flavored markdown. Column widths are computed once from
//! the header and every cell; the first column is left-aligned and the rest
//! are centered.

/// Narrowest column, so the alignment markers always fit
pub const MIN_COLUMN_WIDTH: usize = 4;

/// Render a header and column-major cells as a markdown table.
///
/// Every column in `columns` must have the same length; that length is the
/// number of data rows.
pub fn render_markdown(header: &[String], columns: &[Vec<String>]) -> String {
    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, title)| {
            columns
                .get(i)
                .into_iter()
                .flatten()
                .map(|cell| cell.chars().count())
                .chain([title.chars().count(), MIN_COLUMN_WIDTH])
                .max()
                .unwrap_or(MIN_COLUMN_WIDTH)
        })
        .collect();

    let row_count = columns.first().map_or(0, Vec::len);
    let mut lines = Vec::with_capacity(row_count + 2);

    lines.push(render_row(header.iter().map(String::as_str), &widths));

    let separator: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            if i == 0 {
                format!(":{}", "-".repeat(w - 1))
            } else {
                format!(":{}:", "-".repeat(w - 2))
            }
        })
        .collect();
    lines.push(render_row(separator.iter().map(String::as_str), &widths));

    for row in 0..row_count {
        let cells = columns
            .iter()
            .map(|column| column.get(row).map_or("", String::as_str));
        lines.push(render_row(cells, &widths));
    }

    lines.join("\n")
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, &width) in cells.zip(widths) {
        line.push_str(&format!(" {cell:<width$} |"));
    }
    line
}

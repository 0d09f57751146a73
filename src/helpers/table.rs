//! Tabular presentation of report rows.

/// Shown instead of a table when a section has no rows.
pub const NO_ROWS_HTML: &str = r#"<div class="muted">No rows</div>"#;

/// A rendered section: either the empty-state placeholder or a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    NoRows,
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Map `rows` to a table with `headers` as the header row.
///
/// Rows keep the order they came in; nothing is sorted or removed. An absent
/// or empty row list yields [`Presentation::NoRows`].
pub fn render<R, F>(headers: &[&str], rows: Option<&[R]>, row_to_cells: F) -> Presentation
where
    F: Fn(&R) -> Vec<String>,
{
    match rows {
        Some(rows) if !rows.is_empty() => Presentation::Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows.iter().map(row_to_cells).collect(),
        },
        _ => Presentation::NoRows,
    }
}

impl Presentation {
    pub fn to_html(&self) -> String {
        match self {
            Presentation::NoRows => NO_ROWS_HTML.to_string(),
            Presentation::Table { headers, rows } => {
                let head: String = headers
                    .iter()
                    .map(|h| format!("<th>{}</th>", escape_html(h)))
                    .collect();
                let body: String = rows
                    .iter()
                    .map(|cells| {
                        let cells: String = cells
                            .iter()
                            .map(|c| format!("<td>{}</td>", escape_html(c)))
                            .collect();
                        format!("<tr>{}</tr>", cells)
                    })
                    .collect();
                format!("<table><thead><tr>{}</tr></thead><tbody>{}</tbody></table>", head, body)
            }
        }
    }

    /// Plain-text rendering used by the command line report.
    pub fn to_text(&self) -> String {
        match self {
            Presentation::NoRows => "No rows".to_string(),
            Presentation::Table { headers, rows } => {
                let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
                for row in rows {
                    for (i, cell) in row.iter().enumerate() {
                        if let Some(width) = widths.get_mut(i) {
                            *width = (*width).max(cell.chars().count());
                        }
                    }
                }

                let line = |cells: &[String]| {
                    cells
                        .iter()
                        .zip(&widths)
                        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                        .collect::<Vec<_>>()
                        .join("  ")
                        .trim_end()
                        .to_string()
                };

                let mut out = vec![line(headers)];
                out.extend(rows.iter().map(|row| line(row)));
                out.join("\n")
            }
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

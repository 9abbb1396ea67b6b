//! Naive CSV parsing and table rendering for data-backed notes.
//!
//! A note's front matter may point at a CSV file; its rows are shown as a
//! table under the rendered body. Parsing is a plain comma split with no
//! quoting rules, which matches the hand-maintained files this feeds on.

use crate::utils::html::html_escape;

/// Parsed CSV: first line is the header row, every later non-empty line a
/// data row padded to the header width.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Split CSV text into headers and rows. Cells are trimmed; rows shorter
/// than the header are padded with empty cells, longer ones truncated.
pub fn parse_csv(content: &str) -> CsvTable {
    let mut lines = content.lines();
    let headers: Vec<String> = match lines.next() {
        Some(line) => line.split(',').map(|h| h.trim().to_string()).collect(),
        None => Vec::new(),
    };
    let width = headers.len();
    let rows = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut cells: Vec<String> =
                line.split(',').map(|c| c.trim().to_string()).collect();
            cells.resize(width, String::new());
            cells
        })
        .collect();
    CsvTable { headers, rows }
}

/// Render a parsed table as HTML inside a scrollable wrapper.
///
/// `single_page` lifts the height cap and widens the wrapper, for detail
/// pages where the table is the main content.
pub fn render_csv_table(table: &CsvTable, single_page: bool) -> String {
    let wrapper_style = if single_page {
        "max-height:none;width:120%;overflow-y:auto;border:1px solid #ddd;margin-top:16px;"
    } else {
        "max-height:400px;overflow-y:auto;border:1px solid #ddd;margin-top:16px;"
    };

    let mut html = String::new();
    html.push_str(&format!("<div style=\"{wrapper_style}\">"));
    html.push_str(
        "<table style=\"width:100%;border-collapse:collapse;margin-top:16px;\
         border:1px solid #ddd;font-size:0.9rem;\">",
    );

    html.push_str("<thead><tr>");
    for header in &table.headers {
        html.push_str(&format!(
            "<th style=\"border:1px solid #ddd;padding:12px;background-color:#f2f2f2;\
             text-align:left;font-weight:bold;\">{}</th>",
            html_escape(header)
        ));
    }
    html.push_str("</tr></thead>");

    html.push_str("<tbody>");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!(
                "<td style=\"border:1px solid #ddd;padding:12px;text-align:left;\">{}</td>",
                html_escape(cell)
            ));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>");
    html
}

/// Error paragraph shown when the CSV file cannot be read.
pub fn render_csv_error() -> String {
    "<p style=\"color:red;\">Failed to load table data from CSV.</p>".to_string()
}

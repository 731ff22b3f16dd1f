//! Plain-text rendering of grid and input state.

use joist::grid::DataGrid;
use joist::input::{InputMessage, TextInput};
use joist::record::GridRecord;
use joist::selection::SelectionMode;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MARKER_WIDTH: usize = 4;

/// Pad or cut text to an exact display width.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn marker(mode: SelectionMode, checked: bool) -> &'static str {
    match (mode, checked) {
        (SelectionMode::Multiple, true) => "[x] ",
        (SelectionMode::Multiple, false) => "[ ] ",
        (SelectionMode::Single, true) => "(•) ",
        (SelectionMode::Single, false) => "( ) ",
    }
}

/// Render a grid as a text table.
pub fn render_grid<T: GridRecord>(grid: &DataGrid<T>) -> String {
    let columns = grid.columns();
    let selectable = grid.is_selectable();
    let mode = grid.selection_mode();

    let headers: Vec<String> = (0..columns.len())
        .filter_map(|i| grid.header_label(i))
        .collect();

    // Width hint, or the widest of header and cells
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| match column.width {
            Some(width) => usize::from(width),
            None => (0..grid.len())
                .filter_map(|row| grid.cell_text(row, i))
                .map(|text| text.width())
                .chain(std::iter::once(headers[i].width()))
                .max()
                .unwrap_or(0),
        })
        .collect();

    let mut out = String::new();
    if selectable {
        match mode {
            SelectionMode::Multiple => out.push_str(marker(mode, grid.all_selected())),
            SelectionMode::Single => out.push_str(&" ".repeat(MARKER_WIDTH)),
        }
    }
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| fit(header, *width))
        .collect();
    out.push_str(header_line.join(" │ ").trim_end());
    out.push('\n');

    let rule_width = widths.iter().sum::<usize>()
        + 3 * widths.len().saturating_sub(1)
        + if selectable { MARKER_WIDTH } else { 0 };
    out.push_str(&"─".repeat(rule_width));
    out.push('\n');

    if let Some(placeholder) = grid.status().placeholder() {
        out.push_str(placeholder);
        out.push('\n');
        return out;
    }

    grid.with_view(|rows| {
        for row in rows {
            if selectable {
                out.push_str(marker(mode, row.is_selected));
            }
            let cells: Vec<String> = columns
                .iter()
                .zip(&widths)
                .map(|(column, width)| fit(&column.cell_text(row.record), *width))
                .collect();
            out.push_str(cells.join(" │ ").trim_end());
            out.push('\n');
        }
    });
    out
}

/// Render an input as label, field and message lines.
pub fn render_input(input: &TextInput) -> String {
    let mut out = String::new();
    if let Some(label) = input.get_label() {
        out.push_str(&label);
        out.push('\n');
    }

    let mut field = format!("[{}", fit(&input.display_text(), 24));
    if input.shows_clear_button() {
        field.push_str(" ✕");
    }
    if input.shows_password_toggle() {
        field.push_str(if input.is_password_visible() { " hide" } else { " show" });
    }
    if input.shows_spinner() {
        field.push_str(" …");
    }
    field.push(']');
    if input.is_invalid() {
        field.push_str(" !");
    }
    out.push_str(&field);
    out.push('\n');

    match input.message() {
        Some(InputMessage::Error(text)) => out.push_str(&format!("error: {}\n", text)),
        Some(InputMessage::Helper(text)) => out.push_str(&format!("{}\n", text)),
        None => {}
    }
    out
}

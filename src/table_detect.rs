use crate::model::{PageText, RawTable};
use crate::table_parse::{rows_to_grid, soft_split_line_into_cells, split_line_into_cells};

fn line_cells(line: &str, min_cols: usize) -> Vec<String> {
    let cells = split_line_into_cells(line);
    if cells.len() >= min_cols {
        return cells;
    }

    let soft_cells = soft_split_line_into_cells(line);
    let has_numeric = soft_cells
        .iter()
        .any(|cell| cell.chars().any(|ch| ch.is_ascii_digit()));
    let looks_like_sentence = ['.', '!', '?']
        .iter()
        .any(|punctuation| line.trim_end().ends_with(*punctuation));
    if soft_cells.len() >= min_cols && !looks_like_sentence && (has_numeric || soft_cells.len() <= 6)
    {
        soft_cells
    } else {
        cells
    }
}

/// Groups consecutive multi-cell lines of a page into tables.
///
/// A run needs at least two rows; single stray lines are ignored.
pub(crate) fn detect_tables_in_page(page: &PageText, min_cols: usize) -> Vec<RawTable> {
    let mut tables = Vec::new();
    let mut current_rows: Vec<Vec<String>> = Vec::new();

    let flush = |rows: &mut Vec<Vec<String>>, tables: &mut Vec<RawTable>| {
        if rows.len() >= 2 {
            tables.push(RawTable::new(rows_to_grid(std::mem::take(rows))));
        } else {
            rows.clear();
        }
    };

    for line in page.text.lines() {
        let cells = line_cells(line, min_cols);
        if cells.len() >= min_cols {
            current_rows.push(cells);
        } else {
            flush(&mut current_rows, &mut tables);
        }
    }

    flush(&mut current_rows, &mut tables);
    tracing::debug!(
        page = page.page_number,
        tables = tables.len(),
        "line-based table detection finished"
    );
    tables
}

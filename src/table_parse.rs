/// Splits a text line on tabs or runs of two or more spaces.
pub(crate) fn split_line_into_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut whitespace_run = 0_usize;

    let flush = |current: &mut String, cells: &mut Vec<String>| {
        let cell = current.trim();
        if !cell.is_empty() {
            cells.push(cell.to_string());
        }
        current.clear();
    };

    for ch in trimmed.chars() {
        if ch == '\t' {
            flush(&mut current, &mut cells);
            whitespace_run = 0;
        } else if ch.is_whitespace() {
            whitespace_run += 1;
            if whitespace_run >= 2 {
                flush(&mut current, &mut cells);
            } else {
                current.push(' ');
            }
        } else {
            whitespace_run = 0;
            current.push(ch);
        }
    }

    flush(&mut current, &mut cells);
    cells
}

pub(crate) fn soft_split_line_into_cells(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Pads ragged rows to the widest one; empty cells become `None`.
pub(crate) fn rows_to_grid(rows: Vec<Vec<String>>) -> Vec<Vec<Option<String>>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    rows.into_iter()
        .map(|row| {
            let mut cells = row
                .into_iter()
                .map(|cell| (!cell.is_empty()).then_some(cell))
                .collect::<Vec<_>>();
            cells.resize(width, None);
            cells
        })
        .collect()
}

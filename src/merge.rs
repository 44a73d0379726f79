use crate::model::{MergedOutput, PageRecord};

/// Stacks every raw grid of `pages` into one sheet with leading
/// `page,table_id` columns. Table ids are 1-based within each page.
#[must_use]
pub fn merge_raw_tables(pages: &[PageRecord]) -> MergedOutput {
    let width = pages
        .iter()
        .flat_map(|page| page.raw_tables.iter().map(|table| table.width()))
        .max()
        .unwrap_or(0);

    let mut headers = vec!["page".to_string(), "table_id".to_string()];
    headers.extend((1..=width).map(|index| format!("col_{index}")));

    let mut rows = Vec::new();
    let mut table_count = 0;
    for page in pages {
        for (table_index, table) in page.raw_tables.iter().enumerate() {
            table_count += 1;
            for row_index in 0..table.height() {
                let mut row = Vec::with_capacity(width + 2);
                row.push(page.page_number.to_string());
                row.push((table_index + 1).to_string());
                row.extend(
                    table
                        .padded_row(row_index, width)
                        .into_iter()
                        .map(Option::unwrap_or_default),
                );
                rows.push(row);
            }
        }
    }

    MergedOutput {
        headers,
        row_count: rows.len(),
        table_count,
        rows,
    }
}

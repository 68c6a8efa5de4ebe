/// GridView Column Width Equalization
///
/// Pure geometry helper for renderers that want header and body cells of a
/// column to share one width. The engine itself never measures anything;
/// callers pass in widths they already measured and get back the per-column
/// maximum.

/// Equalize column widths from measured header and cell widths.
///
/// `cell_widths` holds one entry per visible row, each a per-column width in
/// the same order as `header_widths`. Rows shorter than the header are
/// treated as having no opinion on the missing columns.
pub fn compute_column_widths(header_widths: &[u32], cell_widths: &[Vec<u32>]) -> Vec<u32> {
    let mut widths: Vec<u32> = header_widths.to_vec();

    for row in cell_widths {
        for (column, &width) in row.iter().enumerate().take(widths.len()) {
            if width > widths[column] {
                widths[column] = width;
            }
        }
    }

    widths
}

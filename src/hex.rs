//! Hex dump of raw file bytes.
use std::fmt::Write;

pub const DEFAULT_COLUMNS: usize = 16;
pub const DEFAULT_MAX_COUNT: usize = 256;

/// Formats at most `max_count` bytes as lowercase hex, `columns` bytes per line.
///
/// Bytes in a row are separated by a single space and every row, including a final
/// partial one, ends with a newline.
pub fn format_hex_columns(bytes: &[u8], columns: usize, max_count: usize) -> String {
    let columns = columns.max(1);
    let shown = &bytes[..bytes.len().min(max_count)];
    let mut out = String::with_capacity(shown.len() * 3);
    for row in shown.chunks(columns) {
        for (i, byte) in row.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            // writing to a String cannot fail
            let _ = write!(out, "{:02x}", byte);
        }
        out.push('\n');
    }
    out
}

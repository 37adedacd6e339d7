//! Locates a table's INSERT statement inside a dump.

use memchr::memmem;

/// Marker substring identifying the start of a table's INSERT statement.
pub fn insert_marker(table: &str) -> String {
    format!("INSERT INTO `{}`", table)
}

/// Index of the first line containing the marker substring.
///
/// `None` means the table has no INSERT statement in this dump, which is
/// fatal for the run: there is nothing to extract.
pub fn find_marker(lines: &[String], marker: &str) -> Option<usize> {
    let finder = memmem::Finder::new(marker.as_bytes());
    lines
        .iter()
        .position(|line| finder.find(line.as_bytes()).is_some())
}

//! Reassembles SQL value tuples from the lines following an INSERT statement.
//!
//! String values may contain embedded newlines, so one tuple can span several
//! physical lines in the dump. Continuation lines are joined with a single
//! space until a line ending in `),` or `);` closes the tuple.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lines that end the INSERT statement's value list.
static STATEMENT_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(--|ALTER\s+TABLE|CREATE\s+TABLE)").unwrap());

/// Iterator yielding one raw value tuple at a time.
///
/// Scanning stops at a SQL comment, `ALTER TABLE`, or `CREATE TABLE` line,
/// or after `limit` lines when a bound is set. A tuple still open when the
/// bound is reached is dropped without being yielded.
pub struct RecordScanner<'a> {
    lines: std::slice::Iter<'a, String>,
    remaining: Option<usize>,
    pending: Vec<&'a str>,
    done: bool,
}

impl<'a> RecordScanner<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self::with_limit(lines, None)
    }

    /// Scan at most `limit` lines.
    pub fn with_limit(lines: &'a [String], limit: Option<usize>) -> Self {
        Self {
            lines: lines.iter(),
            remaining: limit,
            pending: Vec::new(),
            done: false,
        }
    }
}

impl<'a> Iterator for RecordScanner<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        loop {
            if self.remaining == Some(0) {
                self.done = true;
                return None;
            }

            let Some(line) = self.lines.next() else {
                self.done = true;
                return None;
            };
            if let Some(n) = self.remaining.as_mut() {
                *n -= 1;
            }

            let line = line.trim();

            if STATEMENT_END_RE.is_match(line) {
                self.done = true;
                return None;
            }

            if self.pending.is_empty() {
                if line.starts_with('(') {
                    if ends_tuple(line) {
                        return Some(line.to_string());
                    }
                    self.pending.push(line);
                }
                // anything else between tuples is ignored
            } else {
                self.pending.push(line);
                if ends_tuple(line) {
                    let record = self.pending.join(" ");
                    self.pending.clear();
                    return Some(record);
                }
            }
        }
    }
}

fn ends_tuple(line: &str) -> bool {
    line.ends_with("),") || line.ends_with(");")
}

//! Tables command: lists the built-in table schemas.

use crate::extract::TableKind;

pub fn run() -> anyhow::Result<()> {
    println!(
        "{:<18} {:<40} {:>8} {:>12}",
        "Name", "Source Table", "Fields", "Scan Limit"
    );
    println!("{}", "─".repeat(82));

    for kind in TableKind::ALL {
        let limit = kind
            .scan_limit()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<18} {:<40} {:>8} {:>12}",
            kind.to_string(),
            kind.table_name(),
            kind.field_count(),
            limit
        );
    }

    Ok(())
}

//! Shared test helpers for integration tests.

#![allow(dead_code)]

use judo_roster::store::Store;
use judo_roster::AthleteRecord;
use std::path::Path;

/// Answers for one Intermediate athlete, 78kg Light-Middleweight, 3 coaching
/// hours, 2 competitions. The weight already fits, so no reconciliation input.
pub const JOHN_SMITH: &[&str] = &[
    "  john   smith ",
    "Intermediate",
    "yes",
    "Light-Middleweight",
    "78",
    "yes",
    "3",
    "2",
];

/// Answers for one Elite athlete declared Lightweight at 95kg who then moves
/// to Light-Heavyweight (menu entry 5) during reconciliation.
pub const DANA_EKST: &[&str] = &[
    "dana ekst",
    "elite",
    "y",
    "lightweight",
    "95",
    "no",
    "1",
    "yes",
    "2",
    "5",
];

/// Join answers into a stdin payload, one per line.
pub fn script(parts: &[&[&str]]) -> String {
    let mut out = String::new();
    for part in parts {
        for line in *part {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Read back whatever the store at `path` holds.
pub fn stored(path: &Path) -> Vec<AthleteRecord> {
    Store::new(path).load_all()
}

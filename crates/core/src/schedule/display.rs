use alloc::string::String;
use core::fmt::{Display, Write};

use crate::schedule::types::Step;

/// Format a schedule as the compact step-per-line text format.
///
/// Each step becomes one line; cells are separated by a single space and
/// gaps are written as `-`. A step with no cells is written as a lone `-` so
/// that it survives a round trip through the parser. The output always ends
/// with a trailing newline when the schedule is non-empty.
#[must_use]
pub fn format_schedule<Txn, Item>(schedule: &[Step<Txn, Item>]) -> String
where
    Txn: Display,
    Item: Display,
{
    let mut output = String::new();
    for step in schedule {
        if step.is_empty() {
            output.push('-');
        }
        for (column, cell) in step.iter().enumerate() {
            if column > 0 {
                output.push(' ');
            }
            match cell {
                Some(operation) => {
                    let _ = write!(output, "{operation}");
                }
                None => output.push('-'),
            }
        }
        output.push('\n');
    }
    output
}

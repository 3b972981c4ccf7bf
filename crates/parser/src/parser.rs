//! Winnow-based parser for the compact schedule text DSL.
//!
//! Every non-blank, non-comment line is one step. Cells are separated by
//! inline whitespace; `-` is a gap.
//!
//! Grammar:
//! ```text
//! schedule   = (comment | blank | step)*
//! comment    = "//" REST_OF_LINE EOL
//! blank      = WHITESPACE* EOL
//! step       = cell (WHITESPACE cell)* EOL
//! cell       = "-"                          -- gap
//!            | IDENT "." kind "(" IDENT ")"  -- operation
//! kind       = "read" | "write" | "r" | "w"
//! IDENT      = [A-Za-z0-9_]+
//! EOL        = NEWLINE | END_OF_INPUT
//! ```
//!
//! A step that holds two operations of the same transaction is rejected.

use std::collections::HashSet;

use sercheck_core::schedule::types::{Access, Operation, Schedule, Step};
use winnow::ascii::{line_ending, till_line_ending};
use winnow::combinator::{alt, eof, separated};
use winnow::prelude::*;
use winnow::token::{literal, take_while};
use winnow::ModalResult;

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// A parse error with human-readable location information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// A cell tagged with the length of the input that remained before it.
type LocatedCell = (usize, Option<Operation<String, String>>);

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Parse a compact schedule DSL string into a list of steps.
///
/// # Errors
///
/// Returns a [`ParseError`] with line/column information when the input does
/// not conform to the grammar, or when a step contains two operations of the
/// same transaction.
pub fn parse_schedule(input: &str) -> Result<Schedule<String, String>, ParseError> {
    let original = input;
    let mut stream: &str = input;
    let located_steps = match schedule_parser.parse_next(&mut stream) {
        Ok(steps) => steps,
        Err(e) => {
            // Compute how many bytes were consumed before the error.
            let consumed = original.len().saturating_sub(stream.len());
            let (line, column) = offset_to_line_col(original, consumed);
            return Err(ParseError {
                message: e.to_string(),
                line,
                column,
            });
        }
    };

    let mut schedule = Vec::with_capacity(located_steps.len());
    for cells in located_steps {
        let mut seen: HashSet<String> = HashSet::new();
        let mut step: Step<String, String> = Vec::with_capacity(cells.len());
        for (remaining, cell) in cells {
            if let Some(operation) = &cell {
                if !seen.insert(operation.transaction.clone()) {
                    let consumed = original.len().saturating_sub(remaining);
                    let (line, column) = offset_to_line_col(original, consumed);
                    return Err(ParseError {
                        message: format!(
                            "transaction {} has more than one operation in this step",
                            operation.transaction
                        ),
                        line,
                        column,
                    });
                }
            }
            step.push(cell);
        }
        schedule.push(step);
    }

    tracing::debug!(steps = schedule.len(), "parsed schedule");
    Ok(schedule)
}

// ---------------------------------------------------------------------------
// Line/column helper
// ---------------------------------------------------------------------------

/// Convert a byte offset into the original input to 1-based (line, column).
fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let safe_offset = offset.min(input.len());
    let prefix = &input[..safe_offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = prefix
        .rfind('\n')
        .map_or_else(|| prefix.len() + 1, |pos| prefix.len() - pos);
    (line, column)
}

// ---------------------------------------------------------------------------
// Whitespace helpers
// ---------------------------------------------------------------------------

/// Inline whitespace: spaces and tabs only (no newlines).
fn inline_ws(input: &mut &str) -> ModalResult<()> {
    take_while(1.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

/// Optional inline whitespace.
fn opt_inline_ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

/// A newline (`\n` or `\r\n`) or the end of the input.
fn end_of_line(input: &mut &str) -> ModalResult<()> {
    alt((line_ending.void(), eof.void())).parse_next(input)
}

// ---------------------------------------------------------------------------
// Leaf parsers
// ---------------------------------------------------------------------------

/// Parse an identifier: one or more ASCII alphanumeric characters (or `_`).
fn identifier(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .map(|s: &str| s.to_string())
        .parse_next(input)
}

/// Long forms must be tried before the one-letter forms they start with.
fn access(input: &mut &str) -> ModalResult<Access> {
    alt((
        literal("read").value(Access::Read),
        literal("write").value(Access::Write),
        literal("r").value(Access::Read),
        literal("w").value(Access::Write),
    ))
    .parse_next(input)
}

// ---------------------------------------------------------------------------
// Cell parsers
// ---------------------------------------------------------------------------

/// `IDENT "." kind "(" IDENT ")"`
fn operation(input: &mut &str) -> ModalResult<Operation<String, String>> {
    let transaction = identifier.parse_next(input)?;
    literal(".").parse_next(input)?;
    let access = access.parse_next(input)?;
    literal("(").parse_next(input)?;
    let item = identifier.parse_next(input)?;
    literal(")").parse_next(input)?;
    Ok(Operation::new(transaction, access, item))
}

/// `"-"` -- a gap.
fn gap(input: &mut &str) -> ModalResult<Option<Operation<String, String>>> {
    literal("-").value(None).parse_next(input)
}

fn cell(input: &mut &str) -> ModalResult<LocatedCell> {
    let remaining = input.len();
    let cell = alt((gap, operation.map(Some))).parse_next(input)?;
    Ok((remaining, cell))
}

// ---------------------------------------------------------------------------
// Line parsers
// ---------------------------------------------------------------------------

/// A comment line: `"//" <rest-of-line> EOL`. Produces no step.
fn comment_line(input: &mut &str) -> ModalResult<Option<Vec<LocatedCell>>> {
    opt_inline_ws.parse_next(input)?;
    literal("//").parse_next(input)?;
    till_line_ending.parse_next(input)?;
    end_of_line.parse_next(input)?;
    Ok(None)
}

/// A blank line (only whitespace + EOL). Produces no step.
fn blank_line(input: &mut &str) -> ModalResult<Option<Vec<LocatedCell>>> {
    opt_inline_ws.parse_next(input)?;
    end_of_line.parse_next(input)?;
    Ok(None)
}

/// A step line: one or more cells separated by inline whitespace.
fn step_line(input: &mut &str) -> ModalResult<Option<Vec<LocatedCell>>> {
    opt_inline_ws.parse_next(input)?;
    let cells: Vec<LocatedCell> = separated(1.., cell, inline_ws).parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    end_of_line.parse_next(input)?;
    Ok(Some(cells))
}

fn schedule_parser(input: &mut &str) -> ModalResult<Vec<Vec<LocatedCell>>> {
    let mut steps = Vec::new();
    while !input.is_empty() {
        if let Some(cells) = alt((comment_line, blank_line, step_line)).parse_next(input)? {
            steps.push(cells);
        }
    }
    Ok(steps)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! sercheck CLI -- check, generate and format transaction schedules.

use std::fmt;
use std::fs;
use std::io;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use derive_more::From;
use sercheck_core::precedence::PrecedenceGraph;
use sercheck_core::schedule::error::OperationError;
use sercheck_core::schedule::types::{Operation, Schedule, Step};
use sercheck_core::serializability::error::Error;
use sercheck_core::serializability::Witness;
use sercheck_parser::ParseError;
use sercheck_testgen::generator::GeneratedSchedule;
use serde::{Deserialize, Serialize};

#[derive(Debug, Parser)]
#[command(
    name = "sercheck",
    about = "Conflict-serializability checking for transaction schedules"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check whether schedules are conflict-serializable
    Check(CheckArgs),
    /// Generate random schedules
    Generate(GenerateArgs),
    /// Format compact schedule (.sched) files
    Fmt(FmtArgs),
    /// Print the JSON Schema for the schedule input format to stdout
    Schema,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Schedule files (.sched or .json) or directories containing them
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Print the precedence graph and the serial orders (or the cycle)
    #[arg(long)]
    pub verbose: bool,
    /// Output results as JSON (one object per file)
    #[arg(long)]
    pub json: bool,
    /// Stop after this many serial orders
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Number of schedules to generate
    #[arg(long)]
    pub n_sched: u64,
    /// Number of transactions (columns) per schedule
    #[arg(long)]
    pub n_txn: u64,
    /// Number of data items
    #[arg(long)]
    pub n_item: u64,
    /// Number of steps per schedule
    #[arg(long)]
    pub n_step: u64,
    /// Output directory for generated schedule files
    #[arg(long)]
    pub output_dir: PathBuf,
}

#[derive(Debug, Parser)]
pub struct FmtArgs {
    /// Input files or directories to format. Comments are not preserved.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Check formatting without modifying files (exit 1 if unformatted)
    #[arg(long)]
    pub check: bool,
}

/// Extension of compact schedule files.
pub const SCHED_EXTENSION: &str = "sched";
/// Extension of JSON schedule files.
pub const JSON_EXTENSION: &str = "json";

/// Failure to read one schedule file.
#[derive(Debug, From)]
pub enum LoadError {
    Io(io::Error),
    Parse(ParseError),
    Json(serde_json::Error),
    /// The file has neither a `.sched` nor a `.json` extension.
    #[from(ignore)]
    UnknownFormat(PathBuf),
    /// A JSON operation has an empty transaction id or item.
    #[from(ignore)]
    InvalidOperation {
        step: usize,
        column: usize,
        error: OperationError,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "invalid schedule JSON: {e}"),
            Self::UnknownFormat(path) => {
                write!(f, "unknown schedule format: {}", path.display())
            }
            Self::InvalidOperation {
                step,
                column,
                error,
            } => {
                let reason = match error {
                    OperationError::EmptyTransactionId => "empty transaction id",
                    OperationError::EmptyItem => "empty item",
                };
                write!(f, "invalid operation at step {step}, column {column}: {reason}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// A JSON schedule file: either the output of `sercheck generate` or a bare
/// list of steps.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScheduleDocument {
    Generated(GeneratedSchedule),
    Bare(Schedule<String, String>),
}

/// Rebuild every operation through [`Operation::try_new`]. Positions in the
/// error are 0-based.
fn validate_operations(
    schedule: Schedule<String, String>,
) -> Result<Schedule<String, String>, LoadError> {
    let mut validated = Vec::with_capacity(schedule.len());
    for (step, cells) in schedule.into_iter().enumerate() {
        let mut row: Step<String, String> = Vec::with_capacity(cells.len());
        for (column, cell) in cells.into_iter().enumerate() {
            let cell = cell
                .map(|op| Operation::try_new(op.transaction, op.access, op.item))
                .transpose()
                .map_err(|error| LoadError::InvalidOperation {
                    step,
                    column,
                    error,
                })?;
            row.push(cell);
        }
        validated.push(row);
    }
    Ok(validated)
}

/// Load a schedule from a `.sched` or `.json` file.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read, does not parse, has
/// an unknown extension, or holds an operation with an empty identifier.
pub fn load_schedule(path: &Path) -> Result<Schedule<String, String>, LoadError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(SCHED_EXTENSION) => {
            let text = fs::read_to_string(path)?;
            Ok(sercheck_parser::parse_schedule(&text)?)
        }
        Some(JSON_EXTENSION) => {
            let text = fs::read_to_string(path)?;
            let schedule = match serde_json::from_str::<ScheduleDocument>(&text)? {
                ScheduleDocument::Generated(generated) => generated.into_data(),
                ScheduleDocument::Bare(schedule) => schedule,
            };
            validate_operations(schedule)
        }
        _ => Err(LoadError::UnknownFormat(path.to_path_buf())),
    }
}

/// Expand `paths` into a sorted list of files. Directories contribute every
/// entry whose extension is one of `extensions`; files are kept as given.
///
/// # Errors
///
/// Returns an [`io::Error`] if a directory cannot be read.
pub fn collect_inputs(paths: &[PathBuf], extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|p| {
                    p.is_file()
                        && p.extension()
                            .and_then(|ext| ext.to_str())
                            .is_some_and(|ext| extensions.contains(&ext))
                })
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Serial orders of an acyclic graph, at most `limit` of them. The flag is
/// `true` when orders were left out.
#[must_use]
pub fn limited_serial_orders(
    graph: &PrecedenceGraph<String>,
    limit: Option<usize>,
) -> (Vec<Vec<String>>, bool) {
    let Some(limit) = limit else {
        return (graph.serial_orders(), false);
    };
    let mut orders: Vec<Vec<String>> = Vec::new();
    let flow = graph.visit_serial_orders(|order| {
        if orders.len() == limit {
            return ControlFlow::Break(());
        }
        orders.push(order.iter().map(|&txn| txn.clone()).collect());
        ControlFlow::Continue(())
    });
    (orders, flow.is_break())
}

/// Result of checking one schedule, plus whether the serial orders were cut
/// short by `limit`.
#[must_use]
pub fn analyse(
    schedule: &Schedule<String, String>,
    limit: Option<usize>,
) -> (Result<Witness<String>, Error<String>>, bool) {
    let graph = PrecedenceGraph::new(schedule);
    if let Some(cycle) = graph.find_cycle() {
        return (Err(Error::Cycle { cycle, graph }), false);
    }
    let (serial_orders, truncated) = limited_serial_orders(&graph, limit);
    (
        Ok(Witness {
            graph,
            serial_orders,
        }),
        truncated,
    )
}

/// Precedence graph as emitted by `check --json`: transactions ascending and
/// edges sorted, so the output is the same on every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphReport {
    pub transactions: Vec<String>,
    pub edges: Vec<(String, String)>,
}

impl From<&PrecedenceGraph<String>> for GraphReport {
    fn from(graph: &PrecedenceGraph<String>) -> Self {
        let mut edges = graph.graph().to_edge_list();
        edges.sort();
        Self {
            transactions: graph.transactions().into_iter().cloned().collect(),
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sercheck-cli-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_cli_parses_check() {
        let app = App::try_parse_from([
            "sercheck", "check", "a.sched", "dir", "--verbose", "--limit", "3",
        ])
        .unwrap();
        match app.command {
            Command::Check(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("a.sched"), PathBuf::from("dir")]);
                assert!(args.verbose);
                assert!(!args.json);
                assert_eq!(args.limit, Some(3));
            }
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_generate() {
        let app = App::try_parse_from([
            "sercheck",
            "generate",
            "--n-sched",
            "2",
            "--n-txn",
            "3",
            "--n-item",
            "4",
            "--n-step",
            "5",
            "--output-dir",
            "out",
        ])
        .unwrap();
        let Command::Generate(args) = app.command else {
            panic!("expected generate");
        };
        assert_eq!((args.n_sched, args.n_txn, args.n_item, args.n_step), (2, 3, 4, 5));
        assert_eq!(args.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_check_requires_paths() {
        assert!(App::try_parse_from(["sercheck", "check"]).is_err());
    }

    #[test]
    fn test_load_sched_file() {
        let dir = scratch_dir("load-sched");
        let path = dir.join("cycle.sched");
        fs::write(&path, "T1.w(A) -\n- T3.r(A)\nT3.w(B) T1.w(A)\n").unwrap();

        let schedule = load_schedule(&path).unwrap();
        assert_eq!(schedule.len(), 3);
        assert!(!sercheck_core::is_conflict_serializable(&schedule));
    }

    #[test]
    fn test_load_bare_json() {
        let dir = scratch_dir("load-json");
        let path = dir.join("bare.json");
        fs::write(
            &path,
            r#"[[{"transaction":"T1","access":"Write","item":"A"},null]]"#,
        )
        .unwrap();

        let schedule = load_schedule(&path).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].len(), 2);
        assert!(schedule[0][1].is_none());
    }

    #[test]
    fn test_load_generated_json() {
        let dir = scratch_dir("load-generated");
        let generated = sercheck_testgen::generator::generate_mult_schedules(1, 3, 2, 4);
        let path = dir.join("0.json");
        fs::write(&path, serde_json::to_string(&generated[0]).unwrap()).unwrap();

        let schedule = load_schedule(&path).unwrap();
        assert_eq!(&schedule, generated[0].get_data());
    }

    #[test]
    fn test_load_errors() {
        let dir = scratch_dir("load-errors");

        let bad = dir.join("bad.sched");
        fs::write(&bad, "T1.x(A)\n").unwrap();
        assert!(matches!(load_schedule(&bad), Err(LoadError::Parse(_))));

        let unknown = dir.join("notes.txt");
        fs::write(&unknown, "").unwrap();
        assert!(matches!(
            load_schedule(&unknown),
            Err(LoadError::UnknownFormat(_))
        ));

        let missing = dir.join("missing.sched");
        assert!(matches!(load_schedule(&missing), Err(LoadError::Io(_))));
    }

    #[test]
    fn test_load_json_rejects_empty_identifiers() {
        let dir = scratch_dir("load-empty-ids");

        let empty_txn = dir.join("empty_txn.json");
        fs::write(
            &empty_txn,
            r#"[[{"transaction":"","access":"Write","item":"A"},{"transaction":"T2","access":"Read","item":"A"}]]"#,
        )
        .unwrap();
        assert!(matches!(
            load_schedule(&empty_txn),
            Err(LoadError::InvalidOperation {
                step: 0,
                column: 0,
                error: OperationError::EmptyTransactionId,
            })
        ));

        let empty_item = dir.join("empty_item.json");
        fs::write(
            &empty_item,
            r#"[[null],[{"transaction":"T1","access":"Read","item":""}]]"#,
        )
        .unwrap();
        let err = load_schedule(&empty_item).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidOperation {
                step: 1,
                column: 0,
                error: OperationError::EmptyItem,
            }
        ));
        assert_eq!(err.to_string(), "invalid operation at step 1, column 0: empty item");
    }

    fn two_free_transactions() -> PrecedenceGraph<String> {
        let schedule: Schedule<String, String> = vec![vec![
            Some(Operation::read("T1".to_string(), "A".to_string())),
            Some(Operation::read("T2".to_string(), "A".to_string())),
        ]];
        PrecedenceGraph::new(&schedule)
    }

    #[test]
    fn test_limit_reaching_every_order_is_not_truncated() {
        let graph = two_free_transactions();
        let (orders, truncated) = limited_serial_orders(&graph, Some(2));
        assert_eq!(orders.len(), 2);
        assert!(!truncated);

        let (orders, truncated) = limited_serial_orders(&graph, None);
        assert_eq!(orders.len(), 2);
        assert!(!truncated);
    }

    #[test]
    fn test_limit_below_order_count_truncates() {
        let graph = two_free_transactions();
        let (orders, truncated) = limited_serial_orders(&graph, Some(1));
        assert_eq!(orders, vec![vec!["T1".to_string(), "T2".to_string()]]);
        assert!(truncated);
    }

    #[test]
    fn test_zero_limit_returns_no_orders() {
        let graph = two_free_transactions();
        let (orders, truncated) = limited_serial_orders(&graph, Some(0));
        assert!(orders.is_empty());
        assert!(truncated);
    }

    #[test]
    fn test_analyse_cycle_is_never_truncated() {
        let schedule =
            sercheck_parser::parse_schedule("T1.w(A) -\n- T3.r(A)\nT3.w(B) T1.w(A)\n").unwrap();
        let (result, truncated) = analyse(&schedule, Some(0));
        assert!(matches!(result, Err(Error::Cycle { .. })));
        assert!(!truncated);
    }

    #[test]
    fn test_graph_report_is_sorted() {
        let schedule = sercheck_parser::parse_schedule(
            "T3.w(A) T2.w(B) T1.r(C)\nT1.r(A) - T2.w(C)\nT2.r(A) T1.r(B) -\n",
        )
        .unwrap();
        let graph = PrecedenceGraph::new(&schedule);
        let report = GraphReport::from(&graph);
        assert_eq!(report.transactions, vec!["T1", "T2", "T3"]);
        assert_eq!(
            report.edges,
            vec![
                ("T1".to_string(), "T2".to_string()),
                ("T2".to_string(), "T1".to_string()),
                ("T3".to_string(), "T1".to_string()),
                ("T3".to_string(), "T2".to_string()),
            ]
        );
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "transactions": ["T1", "T2", "T3"],
                "edges": [["T1", "T2"], ["T2", "T1"], ["T3", "T1"], ["T3", "T2"]],
            })
        );
    }

    #[test]
    fn test_collect_inputs_filters_and_sorts() {
        let dir = scratch_dir("collect");
        for name in ["b.sched", "a.json", "c.txt"] {
            fs::write(dir.join(name), "").unwrap();
        }
        let explicit = dir.join("c.txt");

        let files =
            collect_inputs(&[dir.clone(), explicit.clone()], &[SCHED_EXTENSION, JSON_EXTENSION])
                .unwrap();
        assert_eq!(files, vec![dir.join("a.json"), dir.join("b.sched"), explicit]);
    }
}

use std::path::Path;
use std::{fs, process};

use clap::Parser;
use sercheck_cli::{
    analyse, collect_inputs, load_schedule, App, CheckArgs, Command, FmtArgs, GenerateArgs,
    GraphReport, JSON_EXTENSION, SCHED_EXTENSION,
};
use sercheck_core::precedence::PrecedenceGraph;
use sercheck_core::schedule::display::format_schedule;
use sercheck_core::schedule::types::Schedule;
use sercheck_core::serializability::error::Error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = App::parse();
    match &app.command {
        Command::Check(args) => check(args),
        Command::Generate(args) => generate(args),
        Command::Fmt(args) => fmt(args),
        Command::Schema => schema(),
    }
}

fn generate(args: &GenerateArgs) {
    if args.n_txn > 0 && args.n_item == 0 {
        eprintln!("--n-item must be positive when --n-txn is");
        process::exit(1);
    }

    fs::create_dir_all(&args.output_dir).unwrap_or_else(|e| {
        eprintln!("Failed to create output directory: {e}");
        process::exit(1);
    });

    let schedules = sercheck_testgen::generator::generate_mult_schedules(
        args.n_sched,
        args.n_txn,
        args.n_item,
        args.n_step,
    );

    for schedule in &schedules {
        let path = args.output_dir.join(format!("{}.json", schedule.get_id()));
        let file = fs::File::create(&path).unwrap_or_else(|e| {
            eprintln!("Failed to create {}: {e}", path.display());
            process::exit(1);
        });
        serde_json::to_writer_pretty(file, schedule).unwrap_or_else(|e| {
            eprintln!("Failed to write {}: {e}", path.display());
            process::exit(1);
        });
    }

    println!(
        "Generated {} schedules to {}",
        schedules.len(),
        args.output_dir.display()
    );
}

fn print_graph(graph: &PrecedenceGraph<String>) {
    for line in graph.to_string().lines() {
        println!("  {line}");
    }
}

fn check(args: &CheckArgs) {
    let files = collect_inputs(&args.paths, &[SCHED_EXTENSION, JSON_EXTENSION])
        .unwrap_or_else(|e| {
            eprintln!("Failed to read input directory: {e}");
            process::exit(1);
        });

    if files.is_empty() {
        eprintln!("No .sched or .json files found");
        process::exit(1);
    }

    let mut any_failed = false;

    for path in &files {
        let filename = path.display();

        let schedule = match load_schedule(path) {
            Ok(schedule) => schedule,
            Err(e) => {
                any_failed = true;
                if args.json {
                    let result = serde_json::json!({
                        "file": filename.to_string(),
                        "ok": false,
                        "load_error": e.to_string(),
                    });
                    println!("{result}");
                } else {
                    eprintln!("Failed to load {filename}: {e}");
                }
                continue;
            }
        };

        match analyse(&schedule, args.limit) {
            (Ok(witness), truncated) => {
                if args.json {
                    let result = serde_json::json!({
                        "file": filename.to_string(),
                        "ok": true,
                        "truncated": truncated,
                        "graph": GraphReport::from(&witness.graph),
                        "serial_orders": witness.serial_orders,
                    });
                    println!("{result}");
                } else if args.verbose {
                    println!("{filename}: PASS");
                    print_graph(&witness.graph);
                    for order in &witness.serial_orders {
                        println!("  order: [{}]", order.join(", "));
                    }
                    if truncated {
                        println!("  (stopped after {} orders)", witness.serial_orders.len());
                    }
                } else {
                    println!("{filename}: PASS");
                }
            }
            (Err(e), _) => {
                any_failed = true;
                let Error::Cycle { cycle, graph } = &e;
                if args.json {
                    let result = serde_json::json!({
                        "file": filename.to_string(),
                        "ok": false,
                        "cycle": cycle,
                        "graph": GraphReport::from(graph),
                    });
                    println!("{result}");
                } else if args.verbose {
                    println!("{filename}: FAIL");
                    print_graph(graph);
                    println!("  cycle: {}", render_cycle(cycle));
                } else {
                    println!("{filename}: FAIL (cycle {})", render_cycle(cycle));
                }
            }
        }
    }

    if any_failed {
        process::exit(1);
    }
}

/// `T1 -> T3 -> T1`: the first transaction is repeated to close the cycle.
fn render_cycle(cycle: &[String]) -> String {
    let mut rendered = cycle.join(" -> ");
    if let Some(first) = cycle.first() {
        rendered.push_str(" -> ");
        rendered.push_str(first);
    }
    rendered
}

fn fmt(args: &FmtArgs) {
    let files = collect_inputs(&args.paths, &[SCHED_EXTENSION]).unwrap_or_else(|e| {
        eprintln!("Failed to read input directory: {e}");
        process::exit(1);
    });

    let mut any_unformatted = false;

    for path in &files {
        match fmt_file(path, args.check) {
            Ok(true) => {}
            Ok(false) => {
                any_unformatted = true;
                println!("{}: not formatted", path.display());
            }
            Err(e) => {
                any_unformatted = true;
                eprintln!("Failed to format {}: {e}", path.display());
            }
        }
    }

    if any_unformatted {
        process::exit(1);
    }
}

/// Returns `Ok(true)` if the file is already formatted. Outside of check mode
/// an unformatted file is rewritten and counts as formatted.
fn fmt_file(path: &Path, check_only: bool) -> Result<bool, sercheck_cli::LoadError> {
    let text = fs::read_to_string(path)?;
    let formatted = format_schedule(&sercheck_parser::parse_schedule(&text)?);
    if formatted == text {
        return Ok(true);
    }
    if check_only {
        return Ok(false);
    }
    fs::write(path, formatted)?;
    tracing::debug!(path = %path.display(), "formatted");
    Ok(true)
}

fn schema() {
    let schema = schemars::schema_for!(Schedule<String, String>);
    match serde_json::to_string_pretty(&schema) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize schema: {e}");
            process::exit(1);
        }
    }
}

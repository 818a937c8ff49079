//! sqldrill - a SQL practice grader.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sqldrill::catalog::Catalog;
use sqldrill::cli::Cli;
use sqldrill::config::Config;
use sqldrill::db::{self, ResultSet};
use sqldrill::error::{DrillError, Result};
use sqldrill::grade::{grade, CheckOptions, GradeOptions, GradeOutcome};

/// Exit code for an incorrect or failed candidate query.
const EXIT_INCORRECT: u8 = 1;

/// Exit code for configuration and catalog problems.
const EXIT_CONFIG: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{}: {}", e.category(), e);
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let catalog = if config.data.questions_file.exists() {
        Catalog::load(
            &config.data.databases_dir,
            &config.data.questions_file,
            config.data.display_names.clone(),
        )?
    } else {
        Catalog::empty(&config.data.databases_dir)
    };

    if cli.list_databases {
        for snapshot in catalog.snapshots()? {
            println!("{}\t{}", snapshot.file, snapshot.name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let snapshot_file = cli
        .database
        .as_deref()
        .ok_or_else(|| DrillError::config("no snapshot selected; pass --database <FILE>"))?;

    if cli.list_questions {
        for question in catalog.questions_for(snapshot_file) {
            println!("{}\t{}", question.id, question.title);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let snapshot_path = catalog.snapshot_path(snapshot_file)?;

    if cli.tables {
        let client = db::open_snapshot(&snapshot_path).await?;
        let previews = client.list_tables().await?;
        client.close().await?;

        for preview in previews {
            println!("{}", preview.name);
            print!("{}", render_result_set(&preview.rows, "  "));
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Grading
    let reference_query = match (&cli.solution, cli.question) {
        (Some(solution), _) => solution.clone(),
        (None, Some(id)) => catalog.question(snapshot_file, id)?.solution.clone(),
        (None, None) => {
            return Err(DrillError::config(
                "no reference solution; pass --question <ID> or --solution <SQL>",
            ))
        }
    };
    let candidate_query = cli.candidate_query()?;

    let options = GradeOptions {
        check: CheckOptions {
            ignore_row_order: cli.ignore_row_order || config.grading.ignore_row_order,
            ignore_column_naming: config.grading.ignore_column_naming,
            float_epsilon: cli.float_epsilon.unwrap_or(config.grading.float_epsilon),
        },
    };

    let outcome = grade(&snapshot_path, &reference_query, &candidate_query, &options).await?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome)
                .map_err(|e| DrillError::internal(format!("Failed to serialize outcome: {e}")))?
        );
    } else {
        print_outcome(&outcome);
    }

    if outcome.is_correct() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_INCORRECT))
    }
}

/// Prints the grading outcome in a human-readable form.
fn print_outcome(outcome: &GradeOutcome) {
    match outcome {
        GradeOutcome::ReferenceQueryFailed { message } => {
            println!("The reference solution failed to execute: {message}");
            println!("This question is broken; please report it.");
        }
        GradeOutcome::CandidateQueryFailed { message, expected } => {
            println!("Incorrect: your query failed to execute.");
            println!("  {message}");
            println!("\nExpected result:");
            print!("{}", render_result_set(expected, "  "));
        }
        GradeOutcome::Graded {
            correct: true,
            actual,
            ..
        } => {
            println!("Correct! ({} rows)", actual.len());
        }
        GradeOutcome::Graded {
            correct: false,
            expected,
            actual,
        } => {
            println!("Incorrect.");
            println!("\nExpected result:");
            print!("{}", render_result_set(expected, "  "));
            println!("\nYour result:");
            print!("{}", render_result_set(actual, "  "));
        }
    }
}

/// Renders a result set as a simple aligned text table.
fn render_result_set(result: &ResultSet, indent: &str) -> String {
    let Some(first) = result.records().first() else {
        return format!("{indent}(no rows)\n");
    };

    let headers: Vec<String> = first.columns().map(String::from).collect();
    let rows: Vec<Vec<String>> = result
        .records()
        .iter()
        .map(|record| record.values().map(|v| v.to_display_string()).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut out = String::new();
    let render_line = |cells: &[String]| -> String {
        let mut line = String::from(indent);
        for (i, cell) in cells.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(cell.len());
            line.push_str(&format!("{cell:<width$}  "));
        }
        line.trim_end().to_string()
    };

    out.push_str(&render_line(&headers));
    out.push('\n');
    for row in &rows {
        out.push_str(&render_line(row));
        out.push('\n');
    }
    out
}

mod exercise;

use anyhow::Context;
use clap::Parser;
use exercise::Exercise;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::info;

/// Runs parameter-shift gradient exercises and grades each test case.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The exercise to run.
    #[arg(value_enum)]
    exercise: Exercise,

    /// JSON file with test cases as [input, expected] string pairs,
    /// overriding the built-in cases. Pass "-" to read from stdin.
    #[arg(short, long)]
    input_file: Option<PathBuf>,

    /// The output file to write results to. If not provided, writes to stdout.
    #[arg(short, long)]
    output_file: Option<PathBuf>,
}

fn load_cases(cli: &Cli) -> anyhow::Result<Vec<(String, String)>> {
    let Some(path) = &cli.input_file else {
        return Ok(cli.exercise.built_in_cases());
    };
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    serde_json::from_str(&raw).context("test cases must be [input, expected] string pairs")
}

fn grade(exercise: Exercise, cases: &[(String, String)]) -> String {
    let mut report = String::new();
    for (i, (input, expected)) in cases.iter().enumerate() {
        report.push_str(&format!("Running test case {i} with input '{input}'...\n"));
        match exercise.run(input) {
            Err(err) => report.push_str(&format!("Runtime Error. {err}\n")),
            Ok(output) => match exercise::check(&output, expected) {
                Ok(true) => report.push_str("Correct!\n"),
                Ok(false) => report.push_str(&format!(
                    "Wrong Answer. Have: '{output}'. Want: '{expected}'.\n"
                )),
                Err(err) => report.push_str(&format!("Runtime Error. {err}\n")),
            },
        }
    }
    report
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cases = load_cases(&cli)?;
    info!(exercise = ?cli.exercise, cases = cases.len(), "grading test cases");

    let report = grade(cli.exercise, &cases);

    if let Some(output_path) = cli.output_file {
        let file = File::create(output_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(report.as_bytes())?;
    } else {
        print!("{report}");
    }
    Ok(())
}

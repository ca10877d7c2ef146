use anyhow::{Context, Result};
use clap::Parser;
use common::config::Config;
use common::logger::init_logger;
use grader::problem::Problem;
use grader::{grade_batch, grade_problem};
use grader::report::{BatchReport, GradingResponse};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Grade geometry problem submissions stored as JSON")]
struct Args {
    /// Case file: `{"problem": {...}, "submission": ...}` or an array of cases
    #[arg(required_unless_present = "problem", conflicts_with = "problem")]
    case: Option<PathBuf>,
    /// Problem record file (use with --submission)
    #[arg(long, requires = "submission")]
    problem: Option<PathBuf>,
    /// Submission payload file (use with --problem)
    #[arg(long, requires = "problem")]
    submission: Option<PathBuf>,
    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
    /// Environment file with logging settings
    #[arg(long, default_value = ".env")]
    env_file: String,
}

#[derive(Debug, Deserialize)]
struct Case {
    problem: Problem,
    #[serde(default)]
    submission: Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CaseFile {
    Batch(Vec<Case>),
    Single(Case),
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

fn read_json(path: &Path) -> Result<Value> {
    serde_json::from_str(&read_text(path)?).with_context(|| format!("Invalid JSON in {:?}", path))
}

fn load_input(args: &Args) -> Result<CaseFile> {
    if let (Some(problem), Some(submission)) = (&args.problem, &args.submission) {
        let problem = Problem::from_json_str(&read_text(problem)?)?;
        let submission = read_json(submission)?;
        return Ok(CaseFile::Single(Case {
            problem,
            submission,
        }));
    }

    let path = args.case.as_deref().context("No case file given")?;
    serde_json::from_value(read_json(path)?)
        .with_context(|| format!("{:?} is not a case or a list of cases", path))
}

/// JSON to print, and how many batch cases could not be graded.
struct Graded {
    output: Value,
    failed: usize,
}

fn grade_input(input: CaseFile) -> Result<Graded> {
    match input {
        CaseFile::Single(case) => {
            let result = grade_problem(&case.problem, &case.submission)?;
            Ok(Graded {
                output: serde_json::to_value(GradingResponse::from(result))?,
                failed: 0,
            })
        }
        CaseFile::Batch(cases) => {
            let items: Vec<(Problem, Value)> = cases
                .into_iter()
                .map(|case| (case.problem, case.submission))
                .collect();
            let report = BatchReport::from(grade_batch(&items));
            Ok(Graded {
                failed: report.failed,
                output: serde_json::to_value(report)?,
            })
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::init(&args.env_file);
    init_logger(&config.log_level, &config.log_file, config.log_to_stdout)
        .context("Failed to initialise logging")?;
    tracing::info!(
        project = %config.project_name,
        input = ?args.case.as_ref().or(args.problem.as_ref()),
        "grading"
    );

    let graded = grade_input(load_input(&args)?)?;
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&graded.output)?
    } else {
        serde_json::to_string(&graded.output)?
    };
    println!("{rendered}");

    if graded.failed > 0 {
        anyhow::bail!("{} case(s) could not be graded", graded.failed);
    }
    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use papercut::answers::{AnswerSource, MapAnswers, PendingAnswers, QAItem, DEFAULT_PLACEHOLDER};
use papercut::paper::{ExclusionFilter, Metadata, PaperParser, ParseStats};
use papercut::reader;
use papercut::session::{ExamRun, RunConfig, RunContext, RunOutcome};

#[derive(Parser, Debug)]
#[command(name = "papercut")]
#[command(about = "Structured question extractor for sectioned exam papers")]
#[command(version)]
struct Args {
    /// Exam paper (.docx) to parse
    paper: PathBuf,

    /// Answers document output path
    #[arg(long, default_value = "answers.docx")]
    out: PathBuf,

    /// Write metadata, questions and stats as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// JSON object mapping question labels to answers
    #[arg(long)]
    answers: Option<PathBuf>,

    /// Answer used for questions without one
    #[arg(long, default_value = DEFAULT_PLACEHOLDER)]
    placeholder: String,

    /// Additional boilerplate phrase to drop (repeatable)
    #[arg(long = "exclude")]
    exclude: Vec<String>,

    /// Exam duration in seconds
    #[arg(long, default_value_t = 7200)]
    duration_secs: u64,

    /// Continue even when candidate name or subject title is missing
    #[arg(long)]
    skip_metadata_check: bool,
}

#[derive(Serialize)]
struct RunReport<'a> {
    metadata: &'a Metadata,
    stats: &'a ParseStats,
    items: &'a [QAItem],
}

fn load_answer_source(args: &Args) -> Result<Box<dyn AnswerSource>> {
    let fallback = PendingAnswers::new(args.placeholder.clone());
    let Some(path) = &args.answers else {
        return Ok(Box::new(fallback));
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read answers file {}", path.display()))?;
    let answers: HashMap<String, String> = serde_json::from_str(&content)
        .with_context(|| format!("Answers file {} is not a label -> answer JSON object", path.display()))?;
    info!("Loaded {} answers from {}", answers.len(), path.display());

    Ok(Box::new(MapAnswers::new(answers).with_fallback(fallback)))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting papercut");
    info!(?args, "Parsed CLI arguments");

    if !args.paper.is_file() {
        anyhow::bail!("Paper does not exist or is not a file: {}", args.paper.display());
    }

    let (document, read_stats) = reader::read_paper_async(&args.paper).await?;
    info!(?read_stats, "Paper loaded");

    let parser = PaperParser::new(ExclusionFilter::with_extra(&args.exclude))?;
    let answers = load_answer_source(&args)?;
    let config = RunConfig {
        output_path: args.out.clone(),
        require_metadata: !args.skip_metadata_check,
        exam_duration: Duration::from_secs(args.duration_secs),
    };

    let context = RunContext::new();
    let outcome = ExamRun::new(&parser, config).execute_document(&document, answers.as_ref(), &context)?;

    match outcome {
        RunOutcome::MissingMetadata(metadata) => {
            println!("Could not find name/subject in the paper.");
            println!(
                "  Name: {}  Subject: {}",
                metadata.name.as_deref().unwrap_or("<missing>"),
                metadata.subject.as_deref().unwrap_or("<missing>")
            );
        }
        RunOutcome::Completed {
            metadata,
            items,
            stats,
            output_path,
        } => {
            println!("papercut v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "Candidate: {}, Subject: {}",
                metadata.name.as_deref().unwrap_or("<missing>"),
                metadata.subject.as_deref().unwrap_or("<missing>")
            );
            println!(
                "Extracted {} questions (A: {}, B: {}, C: {})",
                stats.total_questions(),
                stats.section_a_questions,
                stats.section_b_questions,
                stats.section_c_questions
            );
            println!("Saved answers to {}", output_path.display());

            if let Some(json_path) = &args.json_out {
                let report = RunReport {
                    metadata: &metadata,
                    stats: &stats,
                    items: &items,
                };
                let json = serde_json::to_string_pretty(&report)?;
                tokio::fs::write(json_path, json)
                    .await
                    .with_context(|| format!("Cannot write {}", json_path.display()))?;
                println!("Wrote report to {}", json_path.display());
            }
        }
    }

    Ok(())
}

// WHY: Run-level state lives with the caller; the parsing core only returns values
// Progress is an owned context object and the exam clock is a plain deadline value

use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tracing::{info, warn};

use crate::answers::{compile_answers, write_answers, AnswerSource, QAItem};
use crate::paper::{Metadata, PaperDocument, PaperParser, ParseStats};

/// Default exam length: two hours
pub const DEFAULT_EXAM_DURATION: Duration = Duration::from_secs(7200);

const MAX_EXAM_DURATION: Duration = Duration::from_secs(100 * 365 * 24 * 3600);

/// Live progress of one run, shared between the runner and any pollers
#[derive(Debug, Default)]
pub struct RunContext {
    items: RwLock<Vec<QAItem>>,
    running: AtomicBool,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one answered question
    pub fn append(&self, item: QAItem) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item);
    }

    /// Copy of the items recorded so far, in append order
    pub fn snapshot(&self) -> Vec<QAItem> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all recorded items before a new run
    pub fn clear(&self) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }
}

/// Absolute end time of an exam
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    pub end: DateTime<Local>,
}

impl Deadline {
    pub fn after(start: DateTime<Local>, duration: Duration) -> Self {
        // Clamped so the end time stays representable
        let duration = duration.min(MAX_EXAM_DURATION);
        let delta = chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero());
        let end = start.checked_add_signed(delta).unwrap_or(start);
        Self { end }
    }

    pub fn starting_now(duration: Duration) -> Self {
        Self::after(Local::now(), duration)
    }
}

/// Time left until the deadline; zero once it has passed
pub fn remaining(now: DateTime<Local>, deadline: &Deadline) -> Duration {
    (deadline.end - now).to_std().unwrap_or(Duration::ZERO)
}

/// "H hours M minutes S seconds remaining", or "Time is up." at zero
pub fn format_remaining(left: Duration) -> String {
    let seconds = left.as_secs();
    if seconds == 0 {
        return "Time is up.".to_string();
    }
    let (mins, secs) = (seconds / 60, seconds % 60);
    let (hrs, mins) = (mins / 60, mins % 60);
    format!("{hrs} hours {mins} minutes {secs} seconds remaining")
}

/// Knobs for a full exam run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Where the answers document is written
    pub output_path: PathBuf,
    /// Abort when name or subject is missing
    pub require_metadata: bool,
    pub exam_duration: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("answers.docx"),
            require_metadata: true,
            exam_duration: DEFAULT_EXAM_DURATION,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Name or subject missing; nothing was extracted or written
    MissingMetadata(Metadata),
    Completed {
        metadata: Metadata,
        items: Vec<QAItem>,
        stats: ParseStats,
        output_path: PathBuf,
    },
}

/// One exam run: paper in, answers document out
pub struct ExamRun<'a> {
    parser: &'a PaperParser,
    config: RunConfig,
    deadline: Deadline,
}

impl<'a> ExamRun<'a> {
    pub fn new(parser: &'a PaperParser, config: RunConfig) -> Self {
        let deadline = Deadline::starting_now(config.exam_duration);
        Self {
            parser,
            config,
            deadline,
        }
    }

    pub fn deadline(&self) -> &Deadline {
        &self.deadline
    }

    /// Load a paper from disk and run it
    pub fn execute<P: AsRef<Path>>(
        &self,
        paper_path: P,
        answers: &dyn AnswerSource,
        context: &RunContext,
    ) -> Result<RunOutcome> {
        let document = crate::paper::load_document(paper_path)?;
        self.execute_document(&document, answers, context)
    }

    /// Run an already loaded paper
    pub fn execute_document(
        &self,
        document: &PaperDocument,
        answers: &dyn AnswerSource,
        context: &RunContext,
    ) -> Result<RunOutcome> {
        context.clear();
        context.set_running(true);
        let outcome = self.run(document, answers, context);
        context.set_running(false);
        outcome
    }

    fn run(
        &self,
        document: &PaperDocument,
        answers: &dyn AnswerSource,
        context: &RunContext,
    ) -> Result<RunOutcome> {
        let parsed = self.parser.parse_document(document);

        if self.config.require_metadata && !parsed.metadata.is_complete() {
            warn!(
                name = ?parsed.metadata.name,
                subject = ?parsed.metadata.subject,
                "Could not find name/subject in the paper"
            );
            return Ok(RunOutcome::MissingMetadata(parsed.metadata));
        }

        info!(
            "Candidate: {}, Subject: {}",
            parsed.metadata.name.as_deref().unwrap_or("-"),
            parsed.metadata.subject.as_deref().unwrap_or("-")
        );
        info!("Extracted {} questions", parsed.questions.len());

        let items = compile_answers(&parsed.questions, answers);
        for item in &items {
            context.append(item.clone());
        }
        info!("{}", format_remaining(remaining(Local::now(), &self.deadline)));

        write_answers(&self.config.output_path, &items, Local::now().naive_local())?;

        Ok(RunOutcome::Completed {
            metadata: parsed.metadata,
            items,
            stats: parsed.stats,
            output_path: self.config.output_path.clone(),
        })
    }
}

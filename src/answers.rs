// WHY: Pairs parsed questions with externally supplied answers and renders the answers document

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use docx_rs::{
    AbstractNumbering, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat,
    Numbering, NumberingId, Paragraph, Run, Start, Style, StyleType,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

use crate::paper::{Question, Section};

/// Answer used when nothing was supplied for a question
pub const DEFAULT_PLACEHOLDER: &str = "[Pending answer via Web]";

/// Title paragraph of the rendered document
pub const DOCUMENT_TITLE: &str = "Answers Document";

const BULLET_NUMBERING_ID: usize = 1;

/// Question paired with its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QAItem {
    pub section: Section,
    pub label: String,
    pub text: String,
    pub answer: String,
}

impl QAItem {
    pub fn new(question: &Question, answer: impl Into<String>) -> Self {
        Self {
            section: question.section,
            label: question.label.clone(),
            text: question.text.clone(),
            answer: answer.into(),
        }
    }
}

/// Supplies answers obtained out-of-band (web form, transcription, file)
pub trait AnswerSource {
    fn answer_for(&self, question: &Question) -> String;
}

/// Every question gets the same placeholder answer
#[derive(Debug, Clone)]
pub struct PendingAnswers {
    placeholder: String,
}

impl PendingAnswers {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }
}

impl Default for PendingAnswers {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER)
    }
}

impl AnswerSource for PendingAnswers {
    fn answer_for(&self, _question: &Question) -> String {
        self.placeholder.clone()
    }
}

/// Answers keyed by question label, placeholder for the rest
#[derive(Debug, Clone, Default)]
pub struct MapAnswers {
    answers: HashMap<String, String>,
    fallback: PendingAnswers,
}

impl MapAnswers {
    pub fn new(answers: HashMap<String, String>) -> Self {
        Self {
            answers,
            fallback: PendingAnswers::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: PendingAnswers) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn insert(&mut self, label: impl Into<String>, answer: impl Into<String>) {
        self.answers.insert(label.into(), answer.into());
    }
}

impl AnswerSource for MapAnswers {
    fn answer_for(&self, question: &Question) -> String {
        match self.answers.get(&question.label) {
            Some(answer) => answer.clone(),
            None => self.fallback.answer_for(question),
        }
    }
}

/// Pair each question with its (trimmed) answer, preserving question order
pub fn compile_answers(questions: &[Question], source: &dyn AnswerSource) -> Vec<QAItem> {
    questions
        .iter()
        .map(|question| QAItem::new(question, source.answer_for(question).trim()))
        .collect()
}

/// Build the answers document
///
/// Title, a generation timestamp, then per item a bulleted
/// "Q<label>: <text>" paragraph followed by "A<label>: <answer>".
pub fn render_answers(items: &[QAItem], generated_at: NaiveDateTime) -> Docx {
    let bullets = AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(Level::new(
        0,
        Start::new(1),
        NumberFormat::new("bullet"),
        LevelText::new("\u{2022}"),
        LevelJc::new("left"),
    ));

    let mut docx = Docx::new()
        .add_style(Style::new("Title", StyleType::Paragraph).name("Title").size(56))
        .add_abstract_numbering(bullets)
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
        .add_paragraph(
            Paragraph::new()
                .style("Title")
                .add_run(Run::new().add_text(DOCUMENT_TITLE)),
        )
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(format!(
            "Generated: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ))));

    for item in items {
        docx = docx
            .add_paragraph(
                Paragraph::new()
                    .add_run(multiline_run(&format!("Q{}: {}", item.label, item.text)))
                    .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
            )
            .add_paragraph(
                Paragraph::new()
                    .add_run(multiline_run(&format!("A{}: {}", item.label, item.answer.trim()))),
            );
    }

    docx
}

/// Render the answers document into an in-memory .docx
pub fn render_answers_bytes(items: &[QAItem], generated_at: NaiveDateTime) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    render_answers(items, generated_at)
        .build()
        .pack(&mut buffer)
        .context("Failed to pack answers document")?;
    Ok(buffer.into_inner())
}

/// Render and write the answers document
pub fn write_answers<P: AsRef<Path>>(path: P, items: &[QAItem], generated_at: NaiveDateTime) -> Result<()> {
    let path = path.as_ref();
    let bytes = render_answers_bytes(items, generated_at)?;
    debug!("Rendered answers document: {} bytes", bytes.len());
    std::fs::write(path, bytes).with_context(|| format!("Cannot write '{}'", path.display()))?;
    info!("Saved {} answers to {}", items.len(), path.display());
    Ok(())
}

/// Text run with line breaks where the text has newlines
fn multiline_run(text: &str) -> Run {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::{extract_lines, parse_document};
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    fn questions() -> Vec<Question> {
        vec![
            Question::new(Section::A, "12", "Capital of X?\nA. Paris\nB. Rome"),
            Question::new(Section::B, "5 A", "Explain gravity."),
        ]
    }

    #[test]
    fn test_pending_answers_use_placeholder() {
        let items = compile_answers(&questions(), &PendingAnswers::default());
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.answer == DEFAULT_PLACEHOLDER));
        assert_eq!(items[1].label, "5 A");
        assert_eq!(items[1].section, Section::B);
    }

    #[test]
    fn test_map_answers_by_label_with_fallback() {
        let mut source = MapAnswers::default().with_fallback(PendingAnswers::new("skipped"));
        source.insert("5 A", "  Mass attracts mass.  ");

        let items = compile_answers(&questions(), &source);
        assert_eq!(items[0].answer, "skipped");
        assert_eq!(items[1].answer, "Mass attracts mass.");
    }

    #[test]
    fn test_rendered_document_reads_back() {
        let items = compile_answers(&questions(), &PendingAnswers::new("Gravity pulls."));
        let bytes = render_answers_bytes(&items, fixed_time()).unwrap();

        let document = parse_document(&bytes).unwrap();
        let lines = extract_lines(&document);

        assert_eq!(lines[0], DOCUMENT_TITLE);
        assert_eq!(lines[1], "Generated: 2026-01-02 03:04:05");
        assert!(lines[2].starts_with("Q12: Capital of X?"));
        assert!(lines[3].starts_with("A12: Gravity pulls."));
        assert_eq!(lines[4], "Q5 A: Explain gravity.");
        assert_eq!(lines[5], "A5 A: Gravity pulls.");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_write_answers_creates_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("answers.docx");

        write_answers(&path, &[], fixed_time()).unwrap();

        let document = crate::paper::load_document(&path).unwrap();
        assert_eq!(extract_lines(&document).len(), 2);
    }
}

// WHY: Main parser interface tying extraction, cleanup, section tracking and grammars together
// The whole line sequence is materialized first because both grammars look ahead

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, trace};

pub mod exclusions;
pub mod extractor;
pub mod free_response;
pub mod mcq;
pub mod metadata;
pub mod normalization;
pub mod section;

// Re-export core types
pub use exclusions::{ExclusionFilter, DEFAULT_EXCLUSIONS};
pub use extractor::{extract_lines, load_document, parse_document, PaperDocument, PaperTable};
pub use free_response::FreeResponseGrammar;
pub use mcq::McqGrammar;
pub use metadata::{extract_metadata, Metadata};
pub use normalization::{normalize_line, normalize_line_into, normalize_lines};
pub use section::{Section, SectionEvent, SectionTracker};

/// One labeled question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub section: Section,
    pub label: String,
    pub text: String,
}

impl Question {
    pub fn new(section: Section, label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            section,
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Result of trying a grammar at one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A question was read; scanning resumes at `next`
    Matched { question: Question, next: usize },
    /// Nothing recognizable here; skip this line
    NoMatch,
}

/// Counters for one parse run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Non-blank lines pulled from the document
    pub raw_lines: u64,
    /// Lines left after normalization and adjacent-duplicate suppression
    pub normalized_lines: u64,
    /// Lines dropped by the exclusion filter during the section scan
    pub excluded_lines: u64,
    /// Lines outside any section, or matching no grammar
    pub skipped_lines: u64,
    pub section_a_questions: u64,
    pub section_b_questions: u64,
    pub section_c_questions: u64,
    pub duration_ms: u64,
}

impl ParseStats {
    pub fn total_questions(&self) -> u64 {
        self.section_a_questions + self.section_b_questions + self.section_c_questions
    }

    fn record(&mut self, question: &Question) {
        match question.section {
            Section::A => self.section_a_questions += 1,
            Section::B => self.section_b_questions += 1,
            Section::C => self.section_c_questions += 1,
            Section::None => {}
        }
    }
}

/// Everything one parse run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPaper {
    pub metadata: Metadata,
    pub questions: Vec<Question>,
    pub stats: ParseStats,
}

/// Exam paper parser with precompiled grammars
///
/// Holds no per-run state, so one instance can serve concurrent runs.
pub struct PaperParser {
    exclusions: ExclusionFilter,
    mcq: McqGrammar,
    free_response: FreeResponseGrammar,
}

impl PaperParser {
    /// Create parser with a custom exclusion vocabulary
    pub fn new(exclusions: ExclusionFilter) -> Result<Self> {
        debug!("Compiling paper grammars with {} exclusion phrases", exclusions.phrases().len());
        Ok(Self {
            exclusions,
            mcq: McqGrammar::new()?,
            free_response: FreeResponseGrammar::new()?,
        })
    }

    /// Create parser with the default exclusion vocabulary
    pub fn with_default_rules() -> Result<Self> {
        Self::new(ExclusionFilter::new())
    }

    pub fn exclusions(&self) -> &ExclusionFilter {
        &self.exclusions
    }

    /// Load a .docx paper and parse it
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedPaper> {
        let document = load_document(path.as_ref())?;
        Ok(self.parse_document(&document))
    }

    /// Extract, normalize and parse a document model
    pub fn parse_document(&self, document: &PaperDocument) -> ParsedPaper {
        let start_time = Instant::now();

        let raw_lines = extract_lines(document);
        let lines = normalize_lines(&raw_lines);
        let metadata = extract_metadata(&lines);

        let mut stats = ParseStats {
            raw_lines: raw_lines.len() as u64,
            normalized_lines: lines.len() as u64,
            ..Default::default()
        };
        let questions = self.scan(&lines, &mut stats);
        stats.duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Parsed {} questions (A: {}, B: {}, C: {}) from {} lines in {}ms",
            stats.total_questions(),
            stats.section_a_questions,
            stats.section_b_questions,
            stats.section_c_questions,
            stats.normalized_lines,
            stats.duration_ms
        );

        ParsedPaper {
            metadata,
            questions,
            stats,
        }
    }

    /// Parse an already normalized line sequence into questions
    pub fn parse_lines(&self, lines: &[String]) -> Vec<Question> {
        let mut stats = ParseStats::default();
        self.scan(lines, &mut stats)
    }

    fn scan(&self, lines: &[String], stats: &mut ParseStats) -> Vec<Question> {
        let mut tracker = SectionTracker::new();
        let mut questions = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];

            let section = match tracker.observe(line) {
                SectionEvent::Header(section) => {
                    debug!("Entering section {} at line {}", section, i);
                    i += 1;
                    continue;
                }
                SectionEvent::Content(section) => section,
            };

            if section == Section::None {
                stats.skipped_lines += 1;
                i += 1;
                continue;
            }
            if self.exclusions.is_excluded(line) {
                stats.excluded_lines += 1;
                i += 1;
                continue;
            }

            let step = match section {
                Section::A => self.mcq.parse(lines, i),
                _ => self.free_response.parse(lines, i, section, &self.exclusions),
            };

            match step {
                Step::Matched { question, next } => {
                    trace!(label = %question.label, %section, "Matched question");
                    stats.record(&question);
                    questions.push(question);
                    i = next;
                }
                Step::NoMatch => {
                    trace!(line = i, %section, "No grammar matched, skipping line");
                    stats.skipped_lines += 1;
                    i += 1;
                }
            }
        }

        questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_content_before_first_header_is_dropped() {
        let parser = PaperParser::with_default_rules().unwrap();
        let input = lines(&["1 Orphan question", "A lost", "Section A", "2 Real question", "A yes"]);

        let questions = parser.parse_lines(&input);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].label, "2");
        assert!(questions.iter().all(|q| q.section != Section::None));
    }

    #[test]
    fn test_sections_switch_grammar() {
        let parser = PaperParser::with_default_rules().unwrap();
        let input = lines(&[
            "Section A",
            "1 Capital of X?",
            "A Paris",
            "B Rome",
            "Section B",
            "2 Explain gravity.",
            "Section C",
            "3 A",
            "Essay one.",
            "(OR)",
            "3 B",
            "Essay two.",
        ]);

        let questions = parser.parse_lines(&input);
        let summary: Vec<(Section, &str)> = questions.iter().map(|q| (q.section, q.label.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (Section::A, "1"),
                (Section::B, "2"),
                (Section::C, "3 A"),
                (Section::C, "3 B"),
            ]
        );
        assert_eq!(questions[0].text, "Capital of X?\nA. Paris\nB. Rome");
    }

    #[test]
    fn test_excluded_lines_never_reach_text() {
        let parser = PaperParser::with_default_rules().unwrap();
        let input = lines(&[
            "Section B",
            "Answer all questions",
            "1 Describe",
            "Max. Marks: 10",
            "the process.",
        ]);

        let questions = parser.parse_lines(&input);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Describe the process.");
        for question in &questions {
            for phrase in DEFAULT_EXCLUSIONS {
                assert!(!question.text.to_lowercase().contains(phrase));
            }
        }
    }

    #[test]
    fn test_parse_document_collects_stats_and_metadata() {
        let parser = PaperParser::with_default_rules().unwrap();
        let document = PaperDocument {
            paragraphs: lines(&[
                "XYZ College",
                "Name: Jane Doe",
                "Section A",
                "1  Pick",
                "1 Pick",
                "A one",
                "Choose wisely",
            ]),
            tables: vec![PaperTable {
                rows: vec![lines(&["Subject Title: Physics", "Batch: 2024"])],
            }],
        };

        let parsed = parser.parse_document(&document);
        assert_eq!(parsed.metadata.name.as_deref(), Some("Jane Doe"));
        assert_eq!(parsed.metadata.subject.as_deref(), Some("Physics"));
        assert_eq!(parsed.questions, vec![Question::new(Section::A, "1", "Pick\nA. one")]);
        assert_eq!(parsed.stats.raw_lines, 9);
        assert_eq!(parsed.stats.normalized_lines, 8);
        assert_eq!(parsed.stats.section_a_questions, 1);
        // "Subject Title" and "Batch" lines fall in section A and are excluded
        assert_eq!(parsed.stats.excluded_lines, 2);
    }
}

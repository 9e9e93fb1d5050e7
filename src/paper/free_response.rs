// WHY: Section B/C grammar - numbered prompts spanning several lines with optional either/or parts
// "5 A ... (OR) 5 B ..." offers two alternative questions under one number

use anyhow::Result;
use regex_automata::meta::Regex;

use super::{ExclusionFilter, Question, Section, Step};

/// Separator printed between the two alternatives of an either/or pair
pub const OR_MARKER: &str = "(OR)";

/// Label line parts: "5 A Explain gravity." -> ("5", Some("A"), "Explain gravity.")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLine<'a> {
    pub number: &'a str,
    pub marker: Option<&'a str>,
    pub rest: &'a str,
}

/// Free-response grammar with precompiled line patterns
pub struct FreeResponseGrammar {
    label: Regex,
    next_label: Regex,
}

impl FreeResponseGrammar {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // Marker must stand alone: "5 Apple" is number 5 with text "Apple"
            label: Regex::new(r"^(\d{1,2})\s*(?:([AB])\b)?\s*(.*)$")?,
            next_label: Regex::new(r"^\d{1,2}\s*[AB]?")?,
        })
    }

    /// Split a label line into number, optional sub-part marker and remaining text
    ///
    /// The marker must be a separate token, so "5 Apple" is number 5 with text
    /// "Apple" rather than part "5 A" with text "pple".
    pub fn split_label<'a>(&self, line: &'a str) -> Option<LabelLine<'a>> {
        let mut caps = self.label.create_captures();
        self.label.captures(line, &mut caps);
        let number = caps.get_group(1)?;
        let rest = caps.get_group(3)?;
        Some(LabelLine {
            number: &line[number.range()],
            marker: caps.get_group(2).map(|span| &line[span.range()]),
            rest: &line[rest.range()],
        })
    }

    /// Check if line closes the current block
    ///
    /// The closing line is left for the caller to re-examine.
    pub fn ends_block(&self, line: &str) -> bool {
        self.next_label.is_match(line) || line.to_lowercase().starts_with("section")
    }

    /// Try to read one question starting at `start`
    ///
    /// Block lines that are excluded or equal to `(OR)` are dropped without
    /// ending the block. A lone "A"/"B" line seen while the block is still
    /// empty fills a missing sub-part marker; it is never text.
    pub fn parse(
        &self,
        lines: &[String],
        start: usize,
        section: Section,
        filter: &ExclusionFilter,
    ) -> Step {
        let Some(head) = lines.get(start).and_then(|line| self.split_label(line)) else {
            return Step::NoMatch;
        };

        let mut marker = head.marker;
        let mut block: Vec<&str> = Vec::new();
        if !head.rest.is_empty() {
            block.push(head.rest);
        }

        let mut next = start + 1;
        while let Some(candidate) = lines.get(next) {
            if self.ends_block(candidate) {
                break;
            }
            next += 1;

            if filter.is_excluded(candidate) || candidate == OR_MARKER {
                continue;
            }
            if block.is_empty() && matches!(candidate.as_str(), "A" | "B") {
                if marker.is_none() {
                    marker = Some(candidate.as_str());
                }
                continue;
            }
            block.push(candidate.as_str());
        }

        let label = match marker {
            Some(marker) => format!("{} {}", head.number, marker),
            None => head.number.to_string(),
        };

        Step::Matched {
            question: Question::new(section, label, block.join(" ")),
            next,
        }
    }
}

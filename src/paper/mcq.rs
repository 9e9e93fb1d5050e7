// WHY: Section A grammar - numbered stem followed by up to four lettered options

use anyhow::Result;
use regex_automata::meta::Regex;

use super::{Question, Section, Step};

/// Option letters in output order
pub const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Multiple-choice grammar with precompiled line patterns
pub struct McqGrammar {
    /// "12 What is ...?" - label and stem on one line
    labeled_stem: Regex,
    /// "12" - label alone, stem (maybe) on the next line
    bare_label: Regex,
    /// "A Paris", "b) Rome" - option letter followed by a word boundary
    option_marker: Regex,
}

impl McqGrammar {
    pub fn new() -> Result<Self> {
        Ok(Self {
            labeled_stem: Regex::new(r"^(\d{1,2})\s+(.*)$")?,
            bare_label: Regex::new(r"^\d{1,2}$")?,
            option_marker: Regex::new(r"(?i)^[ABCD]\b")?,
        })
    }

    /// Check if line opens with an option letter
    pub fn is_option_marker(&self, line: &str) -> bool {
        self.option_marker.is_match(line)
    }

    /// Try to read one question starting at `start`
    ///
    /// Returns `Step::NoMatch` when the line carries no label; the caller
    /// advances a single line in that case.
    pub fn parse(&self, lines: &[String], start: usize) -> Step {
        let Some(line) = lines.get(start) else {
            return Step::NoMatch;
        };

        let mut next = start + 1;
        let (label, stem) = if let Some((label, stem)) = self.split_labeled_stem(line) {
            (label, stem)
        } else if self.bare_label.is_match(line.as_str()) {
            // Stem sits on the following line unless that line is already an option
            let stem = match lines.get(next) {
                Some(candidate) if !self.is_option_marker(candidate) => {
                    next += 1;
                    candidate.trim().to_string()
                }
                _ => String::new(),
            };
            (line.clone(), stem)
        } else {
            return Step::NoMatch;
        };

        let mut options: [Option<String>; 4] = Default::default();
        while let Some(candidate) = lines.get(next) {
            if !self.is_option_marker(candidate) {
                break;
            }
            if let Some(slot) = option_slot(candidate) {
                // Later duplicates of the same letter win
                options[slot] = Some(candidate[1..].trim().to_string());
            }
            next += 1;
        }

        let text = assemble_text(stem, &options);
        Step::Matched {
            question: Question::new(Section::A, label, text),
            next,
        }
    }

    fn split_labeled_stem(&self, line: &str) -> Option<(String, String)> {
        let mut caps = self.labeled_stem.create_captures();
        self.labeled_stem.captures(line, &mut caps);
        let label = caps.get_group(1)?;
        let stem = caps.get_group(2)?;
        Some((line[label.range()].to_string(), line[stem.range()].to_string()))
    }
}

/// Index into `OPTION_LETTERS` for an option line
fn option_slot(line: &str) -> Option<usize> {
    let letter = line.chars().next()?.to_ascii_uppercase();
    OPTION_LETTERS.iter().position(|&l| l == letter)
}

/// Stem followed by "\n<L>. <value>" for each present option, in A-D order
fn assemble_text(stem: String, options: &[Option<String>; 4]) -> String {
    let mut text = stem;
    for (letter, value) in OPTION_LETTERS.iter().zip(options.iter()) {
        if let Some(value) = value {
            text.push('\n');
            text.push(*letter);
            text.push_str(". ");
            text.push_str(value);
        }
    }
    text
}

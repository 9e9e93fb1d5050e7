// WHY: Paper-level state machine; each section owns a different question grammar

use serde::{Deserialize, Serialize};

/// Division of an exam paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Section {
    /// Before the first header; content here is discarded
    #[default]
    None,
    A,
    B,
    C,
}

impl Section {
    /// Recognize a header line ("Section A", "SECTION b - 2 marks", ...)
    pub fn from_header(line: &str) -> Option<Section> {
        let lowered = line.to_lowercase();
        if lowered.starts_with("section a") {
            Some(Section::A)
        } else if lowered.starts_with("section b") {
            Some(Section::B)
        } else if lowered.starts_with("section c") {
            Some(Section::C)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::None => "none",
            Section::A => "A",
            Section::B => "B",
            Section::C => "C",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of feeding one line to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEvent {
    /// Line was a header and has been consumed; state is now the given section
    Header(Section),
    /// Line is content under the given (possibly `None`) section
    Content(Section),
}

/// Tracks the active section across a scan
///
/// Starts at `Section::None`, moves only on header lines and never returns to
/// `None` because headers only name A, B or C.
#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    current: Section,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Section {
        self.current
    }

    /// Classify a line, updating state on headers
    pub fn observe(&mut self, line: &str) -> SectionEvent {
        match Section::from_header(line) {
            Some(section) => {
                self.current = section;
                SectionEvent::Header(section)
            }
            None => SectionEvent::Content(self.current),
        }
    }
}

// WHY: Centralized boilerplate vocabulary for exam paper cleanup
// Matching is substring containment on the lowercased line, so false positives are expected

/// Administrative phrases that never belong to question text
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "answer all questions",
    "name & signature",
    "department of data science",
    "max. marks",
    "time duration",
    "affiliated to",
    "college",
    "batch:",
    "class:",
    "subject title:",
    "semester:",
    "mid term",
    "reviewer",
];

/// Case-insensitive substring filter over a fixed phrase vocabulary
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    phrases: Vec<String>,
}

impl ExclusionFilter {
    /// Create filter with the default vocabulary
    pub fn new() -> Self {
        Self::from_phrases(DEFAULT_EXCLUSIONS.iter().copied())
    }

    /// Create filter from an explicit vocabulary, replacing the defaults
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self { phrases: Vec::new() };
        filter.extend(phrases);
        filter
    }

    /// Default vocabulary plus caller-supplied phrases
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::new();
        filter.extend(extra);
        filter
    }

    fn extend<I, S>(&mut self, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for phrase in phrases {
            let phrase = phrase.as_ref().trim().to_lowercase();
            // An empty phrase would match every line
            if phrase.is_empty() || self.phrases.contains(&phrase) {
                continue;
            }
            self.phrases.push(phrase);
        }
    }

    /// Check whether a line contains any excluded phrase
    pub fn is_excluded(&self, line: &str) -> bool {
        let lowered = line.to_lowercase();
        self.phrases.iter().any(|phrase| lowered.contains(phrase.as_str()))
    }

    /// Phrases currently in the vocabulary, lowercased
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::new()
    }
}

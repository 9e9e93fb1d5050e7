// WHY: Candidate name and subject come from labeled header lines, not from section content

use serde::{Deserialize, Serialize};

/// Labeled header fields found anywhere in the paper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: Option<String>,
    pub subject: Option<String>,
}

impl Metadata {
    /// Both fields were found
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.subject.is_some()
    }
}

const NAME_PREFIX: &str = "name:";
const SUBJECT_PREFIX: &str = "subject title:";

/// Scan normalized (unfiltered) lines for candidate name and subject title
///
/// First match wins for each field; section state is irrelevant here.
pub fn extract_metadata<I, S>(lines: I) -> Metadata
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut metadata = Metadata::default();

    for line in lines {
        let lowered = line.as_ref().trim().to_lowercase();
        if metadata.name.is_none() && lowered.starts_with(NAME_PREFIX) {
            metadata.name = Some(value_after_colon(line.as_ref()));
        }
        if metadata.subject.is_none() && lowered.starts_with(SUBJECT_PREFIX) {
            metadata.subject = Some(value_after_colon(line.as_ref()));
        }
        if metadata.is_complete() {
            break;
        }
    }

    metadata
}

fn value_after_colon(line: &str) -> String {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_both_fields() {
        let lines = [
            "XYZ College",
            "Section A",
            "Name: Jane Doe",
            "Subject Title: Data Mining: Concepts",
        ];
        let metadata = extract_metadata(lines);
        assert_eq!(metadata.name.as_deref(), Some("Jane Doe"));
        assert_eq!(metadata.subject.as_deref(), Some("Data Mining: Concepts"));
        assert!(metadata.is_complete());
    }

    #[test]
    fn test_first_match_wins() {
        let lines = ["NAME: First", "name: Second"];
        let metadata = extract_metadata(lines);
        assert_eq!(metadata.name.as_deref(), Some("First"));
        assert_eq!(metadata.subject, None);
        assert!(!metadata.is_complete());
    }

    #[test]
    fn test_prefix_must_start_line() {
        let lines = ["Candidate name: nobody", "Reviewer Name: x"];
        assert_eq!(extract_metadata(lines), Metadata::default());
    }

    #[test]
    fn test_empty_value_is_still_found() {
        let metadata = extract_metadata(["Name:"]);
        assert_eq!(metadata.name.as_deref(), Some(""));
    }
}

// WHY: File I/O is async at the edge; parsing stays synchronous and in-memory

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::paper::{parse_document, PaperDocument};

/// Statistics for one paper read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub paragraphs: u64,
    pub tables: u64,
    pub duration_ms: u64,
}

/// Read a .docx paper with async I/O, then parse it synchronously
///
/// The file is read in one piece; a missing or malformed file is an error.
pub async fn read_paper_async<P: AsRef<Path>>(file_path: P) -> Result<(PaperDocument, ReadStats)> {
    let path = file_path.as_ref();
    let start_time = std::time::Instant::now();

    debug!("Starting async read of paper: {}", path.display());

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to open paper {}", path.display()))?;
    let document = parse_document(&bytes)
        .with_context(|| format!("Failed to parse paper {}", path.display()))?;

    let stats = ReadStats {
        file_path: path.display().to_string(),
        bytes_read: bytes.len() as u64,
        paragraphs: document.paragraphs.len() as u64,
        tables: document.tables.len() as u64,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    info!(
        "Read {}: {} bytes, {} paragraphs, {} tables in {}ms",
        path.display(),
        stats.bytes_read,
        stats.paragraphs,
        stats.tables,
        stats.duration_ms
    );

    Ok((document, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{render_answers_bytes, QAItem};
    use crate::paper::Section;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_valid_paper() {
        let temp_dir = TempDir::new().unwrap();
        let items = vec![QAItem {
            section: Section::B,
            label: "1".to_string(),
            text: "Explain.".to_string(),
            answer: "Because.".to_string(),
        }];
        let generated_at = chrono::NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let bytes = render_answers_bytes(&items, generated_at).unwrap();
        let file_path = temp_dir.path().join("paper.docx");
        tokio::fs::write(&file_path, &bytes).await.unwrap();

        let (document, stats) = read_paper_async(&file_path).await.unwrap();

        assert_eq!(crate::paper::extract_lines(&document).len(), 4);
        assert_eq!(stats.bytes_read, bytes.len() as u64);
        assert_eq!(stats.tables, 0);
    }

    #[tokio::test]
    async fn test_read_nonexistent_paper() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nonexistent.docx");

        let result = read_paper_async(&file_path).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_read_malformed_paper() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("broken.docx");
        tokio::fs::write(&file_path, "plain text, not a zip").await.unwrap();

        let err = read_paper_async(&file_path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse paper"));
    }
}

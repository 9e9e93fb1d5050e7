// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

pub mod fixtures;

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture helper for creating temporary directories with .docx papers
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Write a .docx paper with body paragraphs followed by tables
    ///
    /// Each table is a list of rows, each row a list of cell texts.
    pub fn create_paper<P: AsRef<Path>>(
        &self,
        relative_path: P,
        paragraphs: &[&str],
        tables: &[Vec<Vec<&str>>],
    ) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        for rows in tables {
            let rows = rows
                .iter()
                .map(|cells| {
                    TableRow::new(
                        cells
                            .iter()
                            .map(|text| {
                                TableCell::new()
                                    .add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
                            })
                            .collect(),
                    )
                })
                .collect();
            docx = docx.add_table(Table::new(rows));
        }

        let file = File::create(&file_path).expect("Failed to create paper file");
        docx.build().pack(file).expect("Failed to pack paper");
        file_path
    }

    /// Write arbitrary bytes, e.g. a corrupt paper
    pub fn create_raw_file<P: AsRef<Path>>(&self, relative_path: P, content: &[u8]) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        std::fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }
}

// WHY: Format-neutral paragraph+table model so grammars never see docx internals
// A .docx is a zip of XML parts; docx-rs gives a typed tree over them

use anyhow::{Context, Result};
use docx_rs::{
    read_docx, DocumentChild, Docx, InsertChild, Paragraph, ParagraphChild, Run, RunChild, Table,
    TableCellContent, TableChild, TableRowChild,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Table as rows of cell text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperTable {
    pub rows: Vec<Vec<String>>,
}

/// Body paragraphs and tables of a paper, each in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDocument {
    pub paragraphs: Vec<String>,
    pub tables: Vec<PaperTable>,
}

impl PaperDocument {
    /// Build the model from a parsed .docx
    pub fn from_docx(docx: &Docx) -> Self {
        let mut document = PaperDocument::default();

        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(para) => {
                    document.paragraphs.push(paragraph_text(para));
                }
                DocumentChild::Table(table) => {
                    document.tables.push(table_model(table));
                }
                _ => {}
            }
        }

        document
    }
}

/// Parse an in-memory .docx buffer
pub fn parse_document(bytes: &[u8]) -> Result<PaperDocument> {
    let docx = read_docx(bytes).map_err(|e| anyhow::anyhow!("docx parse error: {:?}", e))?;
    Ok(PaperDocument::from_docx(&docx))
}

/// Read and parse a .docx file
///
/// Missing or malformed files are fatal; there is no partial read.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<PaperDocument> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("Cannot read '{}'", path.display()))?;
    let document = parse_document(&bytes).with_context(|| format!("Cannot parse '{}'", path.display()))?;
    debug!(
        "Loaded {}: {} paragraphs, {} tables",
        path.display(),
        document.paragraphs.len(),
        document.tables.len()
    );
    Ok(document)
}

/// Raw lines: paragraphs first, then table cells (table, row, cell order)
///
/// Each entry is trimmed; blank entries are skipped. Nothing is merged or
/// reordered.
pub fn extract_lines(document: &PaperDocument) -> Vec<String> {
    let cells = document
        .tables
        .iter()
        .flat_map(|table| table.rows.iter())
        .flat_map(|row| row.iter());

    document
        .paragraphs
        .iter()
        .chain(cells)
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect()
}

/// Paragraph -> Run -> Text, runs concatenated without separator
///
/// Runs nested in hyperlinks and tracked insertions count as paragraph text;
/// tracked deletions do not.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&para.children, &mut text);
    text
}

fn push_children_text(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, text),
            ParagraphChild::Hyperlink(link) => push_children_text(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for ic in &insert.children {
                    if let InsertChild::Run(run) = ic {
                        push_run_text(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, text: &mut String) {
    for rc in &run.children {
        match rc {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

// Row and cell enums have a single variant in current docx-rs releases
#[allow(irrefutable_let_patterns)]
fn table_model(table: &Table) -> PaperTable {
    let mut model = PaperTable::default();

    for child in &table.rows {
        if let TableChild::TableRow(row) = child {
            let mut cells = Vec::new();
            for cell in &row.cells {
                if let TableRowChild::TableCell(cell) = cell {
                    cells.push(cell_text(&cell.children));
                }
            }
            model.rows.push(cells);
        }
    }

    model
}

/// Cell paragraphs joined by newlines; nested tables are flattened in place
fn cell_text(contents: &[TableCellContent]) -> String {
    let mut parts = Vec::new();

    for content in contents {
        match content {
            TableCellContent::Paragraph(para) => parts.push(paragraph_text(para)),
            TableCellContent::Table(nested) => {
                for row in table_model(nested).rows {
                    parts.extend(row);
                }
            }
            _ => {}
        }
    }

    parts.join("\n")
}

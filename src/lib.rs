pub mod answers;
pub mod paper;
pub mod reader;
pub mod session;

// Re-export main types for convenient access
pub use paper::{
    ExclusionFilter, Metadata, PaperDocument, PaperParser, ParseStats, ParsedPaper, Question,
    Section, Step,
};

// Re-export answer compilation and run orchestration
pub use answers::{compile_answers, write_answers, AnswerSource, MapAnswers, PendingAnswers, QAItem};
pub use session::{format_remaining, remaining, Deadline, ExamRun, RunConfig, RunContext, RunOutcome};

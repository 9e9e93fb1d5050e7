// Test fixtures shaped like real sectioned exam papers
// WHY: Golden-style testing needs deterministic input/output pairs

/// Header block, metadata and all three sections in body paragraphs
pub const FULL_PAPER: &[&str] = &[
    "XYZ College of Engineering",
    "Affiliated to ABC University",
    "Department of Data Science",
    "Mid Term Examination",
    "Name: Jane Doe",
    "Subject Title: Physics",
    "Max. Marks: 50      Time Duration: 2 hrs",
    "Section A",
    "Answer all questions",
    "12 Capital of X?",
    "A Paris",
    "B Rome",
    "C Berlin",
    "7",
    "What is 2+2?",
    "8",
    "A 3",
    "B 4",
    "Section B",
    "5 A",
    "Explain gravity.",
    "(OR)",
    "5 B",
    "Explain friction.",
    "6",
    "A",
    "Define work.",
    "Section C",
    "9 Discuss Newton's laws",
    "with examples.",
    "Reviewer: Dr. Rao",
    "Use diagrams.",
];

/// Questions expected from FULL_PAPER as (section, label, text)
pub const FULL_PAPER_QUESTIONS: &[(&str, &str, &str)] = &[
    ("A", "12", "Capital of X?\nA. Paris\nB. Rome\nC. Berlin"),
    ("A", "7", "What is 2+2?"),
    ("A", "8", "\nA. 3\nB. 4"),
    ("B", "5 A", "Explain gravity."),
    ("B", "5 B", "Explain friction."),
    ("B", "6 A", "Define work."),
    ("C", "9", "Discuss Newton's laws with examples. Use diagrams."),
];

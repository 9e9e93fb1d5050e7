// WHY: extracted text carries Word indentation, tabs and non-breaking spaces
// Every grammar downstream assumes single-spaced, trimmed lines

/// Collapse whitespace runs into a single space and trim both ends
pub fn normalize_line(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_line_into(text, &mut result);
    result
}

/// Normalize line into supplied buffer to avoid allocation
pub fn normalize_line_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            // Leading whitespace never sets the flag, so the result is left-trimmed
            pending_space = !buffer.is_empty();
            continue;
        }
        if pending_space {
            buffer.push(' ');
            pending_space = false;
        }
        buffer.push(ch);
    }
}

/// Normalize every line and suppress adjacent duplicates
///
/// Blank lines are dropped. A line identical to the previously kept line is
/// dropped; the same text separated by any other line is kept.
pub fn normalize_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut kept: Vec<String> = Vec::new();
    let mut buffer = String::new();

    for line in lines {
        normalize_line_into(line.as_ref(), &mut buffer);
        if buffer.is_empty() {
            continue;
        }
        if kept.last().is_some_and(|prev| *prev == buffer) {
            continue;
        }
        kept.push(buffer.clone());
    }

    kept
}

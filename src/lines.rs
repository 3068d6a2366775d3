/// One logical line: trimmed, non-empty fragments in drawing order.
pub type Line = Vec<String>;

/// Group fragments into lines, using empty fragments as line breaks.
///
/// Fragments are trimmed; whitespace-only glyphs are dropped without ending
/// the line. Consecutive breaks collapse into one and leading or trailing
/// breaks produce nothing, so no returned line is empty.
pub fn group_into_lines<S: AsRef<str>>(items: &[S]) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current: Line = Vec::new();

    for item in items {
        let item = item.as_ref();
        if item.is_empty() {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            continue;
        }
        let s = item.trim();
        if !s.is_empty() {
            current.push(s.to_string());
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

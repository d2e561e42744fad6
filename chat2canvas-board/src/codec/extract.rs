//! Locate a JSON object inside free-form text.
//!
//! Canvas Code usually arrives pasted from an AI chat, wrapped in prose
//! ("You can copy the code below: { ... }") or a markdown fence. The scanner
//! returns the first `{` that has a matching `}`. Braces inside JSON string
//! literals are ignored, and so are backslash escapes within them.

/// Return the first balanced `{...}` span in `text`.
///
/// Single pass: open braces are kept on a stack, and string state is only
/// tracked while at least one brace is open, so quotes in surrounding prose
/// are ignored.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut open: Vec<usize> = Vec::new();
    let mut best: Option<(usize, usize)> = None;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' if !open.is_empty() => in_string = true,
            '{' => open.push(offset),
            '}' => {
                let Some(start) = open.pop() else {
                    continue;
                };
                if open.is_empty() {
                    // Nothing earlier is still open, so no later span can start first
                    return Some(&text[start..=offset]);
                }
                if best.is_none_or(|(best_start, _)| start < best_start) {
                    best = Some((start, offset));
                }
            }
            _ => {}
        }
    }

    best.map(|(start, end)| &text[start..=end])
}

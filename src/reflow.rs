//! Width-constrained re-wrapping of free-form model output.
//!
//! Every input line is handled on its own: blank lines stay blank, lines that
//! already fit are left alone, and longer lines are greedily packed word by
//! word. A leading indent or list marker is kept on the first emitted line and
//! its width is reused as the indent of the continuation lines. Words are
//! never split, so a single word wider than the limit gets a line of its own.

/// Width used for commit messages.
pub const COMMIT_WIDTH: usize = 72;

const BULLETS: [char; 4] = ['-', '*', '+', '•'];

/// Reflow `text` so no line is wider than `max_width` characters, unless a
/// single word alone is wider.
pub fn reflow(text: &str, max_width: usize) -> String {
    let mut out: Vec<String> = Vec::new();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            out.push(String::new());
        } else if width(line) <= max_width {
            out.push(line.to_string());
        } else {
            wrap_line(line, max_width, &mut out);
        }
    }

    out.join("\n")
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn wrap_line(line: &str, max_width: usize, out: &mut Vec<String>) {
    let (first_indent, content) = line.split_at(prefix_len(line));
    if content.trim().is_empty() {
        out.push(line.trim_end().to_string());
        return;
    }

    let next_indent = " ".repeat(width(first_indent));
    let mut current = first_indent.to_string();
    let mut has_content = false;

    for token in tokens(content) {
        let is_space = token.starts_with(char::is_whitespace);
        if is_space && !has_content {
            continue;
        }

        if width(&current) + width(token) <= max_width {
            current.push_str(token);
            has_content |= !is_space;
            continue;
        }

        if is_space {
            out.push(current.trim_end().to_string());
            current.clone_from(&next_indent);
            has_content = false;
            continue;
        }

        if has_content {
            out.push(current.trim_end().to_string());
            current.clone_from(&next_indent);
        }
        // Oversized words land here on an otherwise empty line and stay whole.
        current.push_str(token);
        has_content = true;
    }

    if has_content {
        out.push(current.trim_end().to_string());
    }
}

/// Byte length of the leading indent, plus a bullet or `N.`/`N)` marker and
/// the whitespace after it when one is present.
fn prefix_len(line: &str) -> usize {
    let indent = line.len() - line.trim_start().len();
    let rest = &line[indent..];

    let marker = match rest.chars().next() {
        Some(c) if BULLETS.contains(&c) => Some(c.len_utf8()),
        _ => {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            match rest.as_bytes().get(digits) {
                Some(b'.' | b')') if digits > 0 => Some(digits + 1),
                _ => None,
            }
        }
    };

    if let Some(marker) = marker {
        let after = &rest[marker..];
        let gap = after.len() - after.trim_start().len();
        if gap > 0 {
            return indent + marker + gap;
        }
    }

    indent
}

/// Split into alternating runs of non-whitespace and whitespace.
fn tokens(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_space: Option<bool> = None;

    for (i, c) in s.char_indices() {
        let space = c.is_whitespace();
        if prev_space.is_some_and(|p| p != space) {
            out.push(&s[start..i]);
            start = i;
        }
        prev_space = Some(space);
    }
    if start < s.len() {
        out.push(&s[start..]);
    }

    out
}

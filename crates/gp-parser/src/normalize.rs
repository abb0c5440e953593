//! Line splitting and normalization.

const NARROW_NO_BREAK_SPACE: char = '\u{202F}';
const NO_BREAK_SPACE: char = '\u{00A0}';

/// Map no-break space variants to ASCII spaces and trim.
pub fn normalize_line(line: &str) -> String {
    line.replace([NARROW_NO_BREAK_SPACE, NO_BREAK_SPACE], " ")
        .trim()
        .to_string()
}

/// Line boundaries: `\n`, `\r`, `\r\n`, vertical tab, form feed, the
/// file/group/record separators, NEL and the Unicode line/paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}' | '\u{1D}' | '\u{1E}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split `text` into lines without their terminators.
///
/// Unlike [`str::lines`], a lone `\r` also ends a line. A trailing terminator
/// does not produce an empty final line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && matches!(chars.peek(), Some(&(_, '\n'))) {
            chars.next();
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

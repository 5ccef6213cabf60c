/// Stands in for a space at either end of a token's text.
pub const SPACE_MARKER: char = '⍽';

/// Runs of one character at least this long are shown as `c × n`.
const REPEAT_THRESHOLD: usize = 5;

/// Renders token text on a single line with nothing invisible in it.
///
/// Control characters are backslash-escaped, spaces at either end become
/// [`SPACE_MARKER`], and text made of one repeated character is shown as
/// that character and a count.
pub fn escape(text: &str) -> String {
    let mut chars = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => chars.extend(['\\', '\\']),
            '\u{8}' => chars.extend(['\\', 'b']),
            '\u{c}' => chars.extend(['\\', 'f']),
            '\n' => chars.extend(['\\', 'n']),
            '\r' => chars.extend(['\\', 'r']),
            '\t' => chars.extend(['\\', 't']),
            _ => chars.push(ch),
        }
    }

    mark_spaces(chars.iter_mut());

    if let Some(&first) = chars.first() {
        if chars.len() >= REPEAT_THRESHOLD && chars.iter().all(|&ch| ch == first) {
            return format!("{first} × {}", chars.len());
        }
    }

    mark_spaces(chars.iter_mut().rev());
    chars.into_iter().collect()
}

fn mark_spaces<'a>(chars: impl Iterator<Item = &'a mut char>) {
    for ch in chars {
        if *ch != ' ' {
            break;
        }
        *ch = SPACE_MARKER;
    }
}

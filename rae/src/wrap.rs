//! Greedy word wrapping of definitions

/// Splits `text` into lines of at most `max_width` characters, breaking only at spaces.
///
/// Words are the pieces between single spaces, so consecutive spaces produce empty words which
/// are kept. Each line takes as many consecutive words as fit when joined by single spaces. A
/// word longer than `max_width` is never split and gets a line of its own, which means a
/// `max_width` of zero puts every word on its own line.
///
/// Lines borrow from `text`, and joining them with single spaces gives back `text` exactly.
/// Empty text gives a single empty line.
///
/// # Example
///
/// ```rust
/// use rae::wrap::wrap;
///
/// assert_eq!(wrap("uno dos tres cuatro", 8), vec!["uno dos", "tres", "cuatro"]);
/// ```
#[must_use]
pub fn wrap(text: &str, max_width: usize) -> Vec<&str> {
    // Byte span and character width of each word
    let mut words = Vec::new();
    let mut offset = 0;

    for word in text.split(' ') {
        words.push((offset, offset + word.len(), word.chars().count()));
        offset += word.len() + 1;
    }

    let mut lines = Vec::new();
    let mut first = 0;

    while first < words.len() {
        let (start, mut end, mut width) = words[first];
        let mut next = first + 1;

        while let Some(&(_, word_end, word_width)) = words.get(next) {
            if width + 1 + word_width > max_width {
                break;
            }

            width += 1 + word_width;
            end = word_end;
            next += 1;
        }

        lines.push(&text[start..end]);
        first = next;
    }

    lines
}

// ABOUTME: Plain-text helpers for serialized markup.
// ABOUTME: Strips tags without decoding entities or collapsing whitespace.

/// Removes everything between `<` and `>`, keeping the text in between.
///
/// A `>` inside a quoted attribute value does not end the tag.
pub fn strip_tags(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    let mut quote: Option<char> = None;

    for c in s.chars() {
        match (in_tag, quote, c) {
            (false, _, '<') => in_tag = true,
            (false, _, _) => result.push(c),
            (true, Some(q), _) if c == q => quote = None,
            (true, Some(_), _) => {}
            (true, None, '"' | '\'') => quote = Some(c),
            (true, None, '>') => in_tag = false,
            (true, None, _) => {}
        }
    }

    result
}

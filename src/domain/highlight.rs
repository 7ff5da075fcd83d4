/// A piece of display text split around the first match of a search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight<'a> {
    pub prefix: &'a str,
    pub matched: &'a str,
    pub suffix: &'a str,
}

impl<'a> Highlight<'a> {
    fn unmatched(text: &'a str) -> Self {
        Self {
            prefix: text,
            matched: "",
            suffix: "",
        }
    }

    pub fn is_match(&self) -> bool {
        !self.matched.is_empty()
    }
}

/// Splits `text` around the first case-insensitive occurrence of `term`.
///
/// The returned slices borrow from `text`, so the original casing is kept.
/// An empty term never matches.
///
/// ```
/// use typeahead::domain::highlight::highlight;
///
/// let h = highlight("GitHub", "it");
/// assert_eq!((h.prefix, h.matched, h.suffix), ("G", "it", "Hub"));
/// ```
pub fn highlight<'a>(text: &'a str, term: &str) -> Highlight<'a> {
    if term.is_empty() {
        return Highlight::unmatched(text);
    }

    for (start, _) in text.char_indices() {
        if let Some(len) = match_len_at(&text[start..], term) {
            let end = start + len;
            return Highlight {
                prefix: &text[..start],
                matched: &text[start..end],
                suffix: &text[end..],
            };
        }
    }

    Highlight::unmatched(text)
}

// Byte length of the prefix of `haystack` matching `term`, compared char by
// char with lowercase folding.
fn match_len_at(haystack: &str, term: &str) -> Option<usize> {
    let mut chars = haystack.char_indices();
    let mut consumed = 0;
    for expected in term.chars() {
        let (idx, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        consumed = idx + actual.len_utf8();
    }
    Some(consumed)
}

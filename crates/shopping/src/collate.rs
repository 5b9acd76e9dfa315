use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Orders names the way a reader expects in a list.
///
/// Names are decomposed (NFD) and compared in levels: base letters ignoring
/// accents and case, then accents, then case with lower case first. Exact
/// code point order only breaks the remaining ties.
pub fn compare(a: &str, b: &str) -> Ordering {
    let left = SortKey::new(a);
    let right = SortKey::new(b);

    left.base
        .cmp(&right.base)
        .then_with(|| left.accents.cmp(&right.accents))
        .then_with(|| left.case.cmp(&right.case))
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Default)]
struct SortKey {
    base: Vec<char>,
    /// Combining marks attached to each base character.
    accents: Vec<Vec<char>>,
    case: Vec<u8>,
}

impl SortKey {
    fn new(value: &str) -> Self {
        let mut key = Self::default();

        for c in value.nfd() {
            if is_combining_mark(c) {
                if let Some(marks) = key.accents.last_mut() {
                    marks.push(c);
                }
                continue;
            }

            key.base.extend(c.to_lowercase());
            key.accents.push(Vec::new());
            key.case.push(u8::from(c.is_uppercase()));
        }

        key
    }
}

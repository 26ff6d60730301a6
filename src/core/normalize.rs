//! Case- and accent-insensitive text folding.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks block (U+0300..=U+036F)
fn is_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Fold text for matching: lowercase, strip diacritics, trim and collapse whitespace.
///
/// `normalize(normalize(x)) == normalize(x)` for all inputs.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Lowercase on both sides of the decomposition: some characters only
    // decompose to an uppercase base (e.g. U+212B ANGSTROM SIGN).
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_diacritic(*c))
        .collect::<String>()
        .to_lowercase();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Natural ordering of two strings, ignoring case and accents.
///
/// Runs of ASCII digits compare by numeric value, so "Book 2" sorts
/// before "Book 10". Everything else compares by folded character.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    compare_folded(&normalize(a), &normalize(b))
}

/// Natural ordering of two already-normalized strings
pub(crate) fn compare_folded(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ln = take_digits(&mut left);
                let rn = take_digits(&mut right);
                let ord = compare_digit_runs(&ln, &rn);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.cmp(&r);
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

/// Compare two digit runs by value without overflowing on long runs
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("  The   Hobbit "), "the hobbit");
        assert_eq!(normalize("Café Müller"), "cafe muller");
        assert_eq!(normalize("CAFE"), "cafe");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_precomposed_and_decomposed_agree() {
        // "é" as one code point vs "e" + U+0301
        assert_eq!(normalize("\u{00E9}"), normalize("e\u{0301}"));
        assert_eq!(normalize("Ångström"), "angstrom");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["Ŝŧŕåñğê  Ŧëxŧ", "\u{212B}", "İstanbul", "Σίσυφος", "a\tb\nc"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_natural_cmp_numbers() {
        assert_eq!(natural_cmp("Book 2", "Book 10"), Ordering::Less);
        assert_eq!(natural_cmp("Book 10", "Book 2"), Ordering::Greater);
        assert_eq!(natural_cmp("book 007", "Book 7"), Ordering::Equal);
    }

    #[test]
    fn test_natural_cmp_case_and_accents() {
        assert_eq!(natural_cmp("émile", "Emile"), Ordering::Equal);
        assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
        assert_eq!(natural_cmp("", ""), Ordering::Equal);
    }
}

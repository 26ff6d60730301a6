//! Series index parsing.
//!
//! Tags carry a book's place in its series as free text: "3", "2.5",
//! "IV", "twenty-one", "1-3" for omnibus editions, or plain words such as
//! "Prequel". This module maps the numeric-looking ones onto a position.

const DASHES: [char; 3] = ['-', '\u{2013}', '\u{2014}'];

fn word_value(word: &str) -> Option<u32> {
    let value = match word {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        _ => return None,
    };
    Some(value)
}

/// "seven", "twenty", "twenty-one", "thirty five"
fn words_to_number(raw: &str) -> Option<u32> {
    let lowered = raw.trim().to_lowercase().replace('-', " ");
    let parts: Vec<&str> = lowered.split_whitespace().collect();

    match parts.as_slice() {
        [single] => word_value(single),
        [tens, units] => {
            let t = word_value(tens)?;
            let u = word_value(units)?;
            (t % 10 == 0 && u < 10).then_some(t + u)
        }
        _ => None,
    }
}

/// Subtractive roman numerals, case-insensitive
fn roman_to_number(raw: &str) -> Option<u32> {
    if raw.is_empty() {
        return None;
    }

    let mut total: u32 = 0;
    let mut prev: u32 = 0;
    for c in raw.chars().rev() {
        let value = match c.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => return None,
        };
        if value < prev {
            total = total.checked_sub(value)?;
        } else {
            total = total.checked_add(value)?;
            prev = value;
        }
    }
    Some(total)
}

/// Plain non-negative integer or decimal: "3", "2.5"
fn is_plain_number(s: &str) -> bool {
    let mut parts = s.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next();

    !whole.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && frac.map_or(true, |f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
}

/// "1-3", "2.5 – 3.5"
fn split_range(s: &str) -> Option<(&str, &str)> {
    let (start, end) = s.split_once(DASHES)?;
    let (start, end) = (start.trim(), end.trim());
    (is_plain_number(start) && is_plain_number(end)).then_some((start, end))
}

/// Canonical display form of a series index.
///
/// Ranges become `a-b`, numbers pass through, roman numerals and number
/// words become digits, anything else is returned trimmed.
pub fn normalize_index(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }

    if let Some((start, end)) = split_range(s) {
        return format!("{}-{}", start, end);
    }
    if is_plain_number(s) {
        return s.to_string();
    }
    if let Some(n) = roman_to_number(s).or_else(|| words_to_number(s)) {
        return n.to_string();
    }

    s.to_string()
}

/// Numeric position of a series index, `None` when it cannot be inferred.
///
/// A range sorts at its first number.
pub fn index_position(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some((start, _)) = split_range(s) {
        return start.parse().ok();
    }
    if is_plain_number(s) {
        return s.parse().ok();
    }

    roman_to_number(s)
        .or_else(|| words_to_number(s))
        .map(f64::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_index() {
        assert_eq!(normalize_index("1"), "1");
        assert_eq!(normalize_index("42"), "42");
        assert_eq!(normalize_index("  5  "), "5");
        assert_eq!(normalize_index("\t10\n"), "10");
        assert_eq!(index_position("2.5"), Some(2.5));
    }

    #[test]
    fn test_roman_numerals() {
        assert_eq!(normalize_index("I"), "1");
        assert_eq!(normalize_index("IV"), "4");
        assert_eq!(normalize_index("ix"), "9");
        assert_eq!(normalize_index("XII"), "12");
        assert_eq!(index_position("C"), Some(100.0));
    }

    #[test]
    fn test_number_words() {
        assert_eq!(normalize_index("one"), "1");
        assert_eq!(normalize_index("Twenty"), "20");
        assert_eq!(normalize_index("twenty-one"), "21");
        assert_eq!(normalize_index("thirty five"), "35");
        assert_eq!(index_position("twelve"), Some(12.0));
        // "ten twenty" is not a compound number
        assert_eq!(index_position("ten twenty"), None);
    }

    #[test]
    fn test_ranges() {
        assert_eq!(normalize_index("1-3"), "1-3");
        assert_eq!(normalize_index("2.5 \u{2013} 3.5"), "2.5-3.5");
        assert_eq!(index_position("1-3"), Some(1.0));
        assert_eq!(index_position("4\u{2014}6"), Some(4.0));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(normalize_index(""), "");
        assert_eq!(normalize_index(" Prequel "), "Prequel");
        assert_eq!(index_position("Prequel"), None);
        assert_eq!(index_position(""), None);
        assert_eq!(index_position("1."), None);
        assert_eq!(index_position(".5"), None);
    }
}

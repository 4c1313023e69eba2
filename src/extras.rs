//! Typed slots filled from a recognized utterance
//!
//! The mapping table's spoken forms carry slots: a bounded repeat count
//! (`<n>`), a large number (`<n2>`), a single spoken character (`<c>`) and
//! free-form dictation (`<text>`). One [`Extras`] is produced per
//! recognition event and discarded after execution.

use crate::executor::MAX_REPEAT;

/// Largest value the `<n2>` number slot accepts.
pub const MAX_BIG_NUMBER: u64 = 999_999;

/// Named sub-matches extracted from one recognized phrase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extras {
    /// Bounded count, 1..=100.
    pub n: Option<u32>,
    /// Large number, 0..=999_999.
    pub n2: Option<u64>,
    /// Single character from the spoken alphabet.
    pub c: Option<char>,
    /// Free-form dictation.
    pub text: Option<String>,
}

impl Extras {
    /// The repeat count, defaulting to 1 when unspecified.
    pub fn count(&self) -> u32 {
        self.n.unwrap_or(1)
    }
}

/// Resolve one spoken word to a character: bare letters and digits, the
/// radio alphabet, and spelled-out digit names.
pub fn spoken_char(word: &str) -> Option<char> {
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphanumeric() {
            return Some(c.to_ascii_lowercase());
        }
        return None;
    }

    let c = match word {
        "alpha" => 'a',
        "bravo" => 'b',
        "charlie" => 'c',
        "delta" => 'd',
        "echo" => 'e',
        "foxtrot" => 'f',
        "golf" => 'g',
        "hotel" => 'h',
        "india" => 'i',
        "juliet" | "juliett" => 'j',
        "kilo" => 'k',
        "lima" => 'l',
        "mike" => 'm',
        "november" => 'n',
        "oscar" => 'o',
        "papa" => 'p',
        "quebec" => 'q',
        "romeo" => 'r',
        "sierra" => 's',
        "tango" => 't',
        "uniform" => 'u',
        "victor" => 'v',
        "whiskey" => 'w',
        "xray" | "x-ray" => 'x',
        "yankee" => 'y',
        "zulu" => 'z',
        "zero" => '0',
        "one" => '1',
        "two" => '2',
        "three" => '3',
        "four" => '4',
        "five" => '5',
        "six" => '6',
        "seven" => '7',
        "eight" => '8',
        "nine" => '9',
        _ => return None,
    };
    Some(c)
}

/// Parse a run of words as one number: either a single digit string
/// ("43") or spelled-out number words up to six figures
/// ("forty three", "one hundred twenty", "five thousand").
pub fn parse_number<S: AsRef<str>>(words: &[S]) -> Option<u64> {
    if words.is_empty() {
        return None;
    }

    if words.len() == 1 {
        let w = words[0].as_ref();
        if !w.is_empty() && w.chars().all(|c| c.is_ascii_digit()) {
            return w.parse().ok().filter(|v| *v <= MAX_BIG_NUMBER);
        }
    }

    // transcripts sometimes hyphenate compounds ("forty-three")
    let mut parts = Vec::new();
    for word in words {
        for part in word.as_ref().split('-') {
            if !part.is_empty() {
                parts.push(part);
            }
        }
    }

    let mut total: u64 = 0;
    let mut current: u64 = 0;
    let mut prev_small: Option<u64> = None;
    let mut matched = false;

    for part in parts {
        if part == "hundred" {
            if current == 0 {
                current = 1;
            }
            if current >= 100 {
                return None;
            }
            current *= 100;
            prev_small = None;
        } else if part == "thousand" {
            if current == 0 {
                current = 1;
            }
            total = total.checked_add(current.checked_mul(1000)?)?;
            current = 0;
            prev_small = None;
        } else if let Some(v) = small_number(part) {
            match prev_small {
                None => {
                    if current % 100 != 0 {
                        return None;
                    }
                    current += v;
                }
                // only a unit may follow a round tens word ("forty three")
                Some(prev) => {
                    if prev >= 20 && prev % 10 == 0 && (1..10).contains(&v) {
                        current += v;
                    } else {
                        return None;
                    }
                }
            }
            prev_small = Some(v);
        } else {
            return None;
        }
        matched = true;
    }

    if !matched {
        return None;
    }
    let value = total.checked_add(current)?;
    if value > MAX_BIG_NUMBER {
        return None;
    }
    Some(value)
}

fn small_number(word: &str) -> Option<u64> {
    let v = match word {
        "zero" => 0,
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
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(v)
}

/// Match the longest run of number words starting at `start`.
/// Returns the value and the index just past the consumed words.
pub fn match_number(tokens: &[String], start: usize) -> Option<(u64, usize)> {
    let mut best = None;
    for end in start + 1..=tokens.len() {
        match parse_number(&tokens[start..end]) {
            Some(v) => best = Some((v, end)),
            None => break,
        }
    }
    best
}

/// Bounded count slot: 1..=[`MAX_REPEAT`].
pub fn match_count(tokens: &[String], start: usize) -> Option<(u32, usize)> {
    let (value, end) = match_number(tokens, start)?;
    if (1..=u64::from(MAX_REPEAT)).contains(&value) {
        Some((value as u32, end))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_spoken_char() {
        assert_eq!(spoken_char("a"), Some('a'));
        assert_eq!(spoken_char("B"), Some('b'));
        assert_eq!(spoken_char("bravo"), Some('b'));
        assert_eq!(spoken_char("xray"), Some('x'));
        assert_eq!(spoken_char("x-ray"), Some('x'));
        assert_eq!(spoken_char("7"), Some('7'));
        assert_eq!(spoken_char("seven"), Some('7'));
        assert_eq!(spoken_char("hello"), None);
        assert_eq!(spoken_char("?"), None);
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_number(&["43"]), Some(43));
        assert_eq!(parse_number(&["0"]), Some(0));
        assert_eq!(parse_number(&["999999"]), Some(999_999));
        assert_eq!(parse_number(&["1000000"]), None);
        assert_eq!(parse_number(&["4x"]), None);
    }

    #[test]
    fn test_parse_number_words() {
        assert_eq!(parse_number(&["three"]), Some(3));
        assert_eq!(parse_number(&["nineteen"]), Some(19));
        assert_eq!(parse_number(&["forty"]), Some(40));
        assert_eq!(parse_number(&["forty", "three"]), Some(43));
        assert_eq!(parse_number(&["forty-three"]), Some(43));
        assert_eq!(parse_number(&["hundred"]), Some(100));
        assert_eq!(parse_number(&["one", "hundred", "twenty"]), Some(120));
        assert_eq!(parse_number(&["two", "hundred", "twenty", "one"]), Some(221));
        assert_eq!(parse_number(&["five", "thousand"]), Some(5000));
        assert_eq!(
            parse_number(&["twelve", "thousand", "three", "hundred", "four"]),
            Some(12_304)
        );
    }

    #[test]
    fn test_parse_number_rejects_nonsense() {
        assert_eq!(parse_number::<&str>(&[]), None);
        assert_eq!(parse_number(&["banana"]), None);
        assert_eq!(parse_number(&["one", "two"]), None);
        assert_eq!(parse_number(&["sixteen", "five"]), None);
        assert_eq!(parse_number(&["twenty", "zero"]), None);
        assert_eq!(parse_number(&["forty", "three", "banana"]), None);
    }

    #[test]
    fn test_match_number_longest() {
        let tokens = toks("forty three times");
        assert_eq!(match_number(&tokens, 0), Some((43, 2)));

        let tokens = toks("three down");
        assert_eq!(match_number(&tokens, 0), Some((3, 1)));

        let tokens = toks("down three");
        assert_eq!(match_number(&tokens, 0), None);
        assert_eq!(match_number(&tokens, 1), Some((3, 2)));
    }

    #[test]
    fn test_match_count_bounds() {
        assert_eq!(match_count(&toks("100"), 0), Some((100, 1)));
        assert_eq!(match_count(&toks("101"), 0), None);
        assert_eq!(match_count(&toks("zero"), 0), None);
    }

    #[test]
    fn test_count_defaults_to_one() {
        assert_eq!(Extras::default().count(), 1);
        let extras = Extras {
            n: Some(7),
            ..Extras::default()
        };
        assert_eq!(extras.count(), 7);
    }
}

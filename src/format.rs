//! Dictation formatting functions
//!
//! Each formatter takes the written form of dictated text and renders it
//! as an identifier style: `"hello world"` becomes `"hello_world"`,
//! `"HelloWorld"`, `"helloWorld"` and so on. All of them are pure string
//! transforms over space-delimited input.

pub type FormatFn = fn(&str) -> String;

/// Spoken-form -> formatter registry. The grammar exposes these as an
/// alternative alongside the keystroke rules; `<text>` is a greedy
/// dictation slot.
///
/// "one word upper" precedes "one word" so the tie-break on equally long
/// matches picks the more specific rule.
pub const FORMAT_RULES: &[(&str, FormatFn)] = &[
    ("snake <text>", format_score),
    ("upper snake <text>", format_upper_score),
    ("studley <text>", format_studley),
    ("one word upper <text>", format_upper_one_word),
    ("[all] one word <text>", format_one_word),
    ("camel <text>", format_camel),
    ("say <text>", format_say),
];

/// `hello world` -> `hello_world`
pub fn format_score(dictation: &str) -> String {
    words(dictation).join("_")
}

/// `hello world` -> `HelloWorld`
pub fn format_studley(dictation: &str) -> String {
    words(dictation)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join("")
}

/// `hello world` -> `helloworld`
pub fn format_one_word(dictation: &str) -> String {
    words(dictation).join("")
}

/// `hello world` -> `HELLOWORLD`
pub fn format_upper_one_word(dictation: &str) -> String {
    words(dictation)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("")
}

/// `hello world` -> `HELLO_WORLD`
pub fn format_upper_score(dictation: &str) -> String {
    words(dictation)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `hello world` -> `helloWorld`
pub fn format_camel(dictation: &str) -> String {
    let words = words(dictation);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// `hello world` -> `hello world`
pub fn format_say(dictation: &str) -> String {
    words(dictation).join(" ")
}

fn words(dictation: &str) -> Vec<&str> {
    dictation.split_whitespace().collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score() {
        assert_eq!(format_score("hello world"), "hello_world");
        assert_eq!(format_score("single"), "single");
    }

    #[test]
    fn test_studley() {
        assert_eq!(format_studley("hello world"), "HelloWorld");
    }

    #[test]
    fn test_one_word() {
        assert_eq!(format_one_word("hello world"), "helloworld");
    }

    #[test]
    fn test_upper_one_word() {
        assert_eq!(format_upper_one_word("hello world"), "HELLOWORLD");
    }

    #[test]
    fn test_upper_score() {
        assert_eq!(format_upper_score("hello world"), "HELLO_WORLD");
    }

    #[test]
    fn test_camel() {
        assert_eq!(format_camel("hello world"), "helloWorld");
        assert_eq!(format_camel("hello there world"), "helloThereWorld");
        assert_eq!(format_camel("single"), "single");
    }

    #[test]
    fn test_say_is_identity_over_words() {
        assert_eq!(format_say("hello world"), "hello world");
        assert_eq!(format_say("  hello   world  "), "hello world");
    }

    #[test]
    fn test_formatters_total_on_extra_whitespace() {
        assert_eq!(format_score(" hello  world "), "hello_world");
        assert_eq!(format_studley("hello  world"), "HelloWorld");
    }
}

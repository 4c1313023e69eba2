//! Grammar assembly, utterance parsing, and lifecycle
//!
//! A [`Grammar`] is compiled once from the static mapping table, the
//! config's custom entries, and the dictation-format registry. Parsing a
//! transcribed utterance yields a [`Recognition`]: an ordered sequence of
//! 1..=16 resolved actions plus a repeat count from an optional trailing
//! clause (`... [[and] repeat [that]] <n> times`).
//!
//! [`Grammar::load`] returns a [`GrammarHandle`] that owns activation
//! state; dropping or unloading the handle deactivates the grammar.

use log::{debug, info};
use thiserror::Error;

use crate::action::Action;
use crate::config::{Config, CustomMapping};
use crate::context::AppContext;
use crate::executor::{MAX_REPEAT, MAX_SEQUENCE};
use crate::extras::{self, Extras, MAX_BIG_NUMBER};
use crate::format::{FormatFn, FORMAT_RULES};
use crate::keys::{parse_keyspec, KeyChord, KeyspecError};
use crate::mapping::{Entry, Piece, COMMAND_MAP};

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("bad key spec for '{phrase}': {source}")]
    BadKeyspec {
        phrase: String,
        #[source]
        source: KeyspecError,
    },
    #[error("mapping for '{0}' needs at least one of keys or text")]
    EmptyMapping(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty utterance")]
    Empty,
    #[error("no command matched at '{0}'")]
    NoMatch(String),
    #[error("more than {MAX_SEQUENCE} actions in one utterance")]
    TooLong,
    #[error("repeat count {0} out of range 1..={MAX_REPEAT}")]
    BadCount(u64),
}

/// The result of one recognition event.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub actions: Vec<Action>,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotKind {
    Count,
    BigNumber,
    Char,
    Dictation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Word(String),
    Opt(String),
    Slot(SlotKind),
}

enum RuleAction {
    Template(Vec<TemplatePiece>),
    Format(FormatFn),
}

enum TemplatePiece {
    Keys(Vec<KeyChord>),
    Text(String),
}

struct Rule {
    spoken: String,
    pattern: Vec<Tok>,
    action: RuleAction,
}

/// A compiled grammar: immutable after construction.
pub struct Grammar {
    name: String,
    context: AppContext,
    rules: Vec<Rule>,
}

impl Grammar {
    /// Compile the grammar from the built-in table, the config's custom
    /// mappings (which shadow built-ins), and the format registry.
    pub fn build(config: &Config) -> Result<Grammar, GrammarError> {
        let context = AppContext::new(&config.context.editors)
            .union(AppContext::new(&config.context.terminals));

        let mut rules = Vec::new();
        // customs first: the tie-break on equally long matches prefers
        // earlier rules, which is what makes shadowing work
        for mapping in &config.mapping {
            rules.push(compile_custom(mapping)?);
        }
        for entry in COMMAND_MAP {
            rules.push(compile_entry(entry)?);
        }
        for (spoken, func) in FORMAT_RULES {
            rules.push(Rule {
                spoken: (*spoken).to_string(),
                pattern: parse_pattern(spoken),
                action: RuleAction::Format(*func),
            });
        }

        Ok(Grammar {
            name: config.name.clone(),
            context,
            rules,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the grammar applies to the given foreground executable.
    pub fn is_active(&self, executable: &str) -> bool {
        self.context.matches(executable)
    }

    /// Activate the grammar, taking ownership of it.
    pub fn load(self) -> GrammarHandle {
        info!("grammar '{}' loaded: {} rules", self.name, self.rules.len());
        GrammarHandle {
            grammar: self,
            active: true,
        }
    }

    /// Parse one transcribed utterance into a recognition.
    pub fn parse(&self, utterance: &str) -> Result<Recognition, ParseError> {
        let tokens = tokenize(utterance);
        if tokens.is_empty() {
            return Err(ParseError::Empty);
        }

        let (body, count) = split_repeat_clause(&tokens)?;
        if body.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut actions = Vec::new();
        let mut i = 0;
        while i < body.len() {
            if actions.len() == MAX_SEQUENCE {
                return Err(ParseError::TooLong);
            }
            let Some((action, next)) = self.match_at(body, i) else {
                return Err(ParseError::NoMatch(body[i..].join(" ")));
            };
            actions.push(action);
            i = next;
        }

        debug!("recognized {} action(s), count {}", actions.len(), count);
        Ok(Recognition { actions, count })
    }

    /// Longest match over all rules at `start`; ties go to the earliest
    /// rule.
    fn match_at(&self, tokens: &[String], start: usize) -> Option<(Action, usize)> {
        let mut best: Option<(usize, &Rule, Extras)> = None;
        for rule in &self.rules {
            if let Some((extras, end)) = match_pattern(&rule.pattern, tokens, start) {
                if best.as_ref().is_none_or(|(prev, _, _)| end > *prev) {
                    best = Some((end, rule, extras));
                }
            }
        }
        let (end, rule, extras) = best?;
        debug!("matched '{}'", rule.spoken);
        Some((resolve(&rule.action, &extras), end))
    }
}

/// An owned, explicitly loadable grammar activation.
pub struct GrammarHandle {
    grammar: Grammar,
    active: bool,
}

impl GrammarHandle {
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn is_loaded(&self) -> bool {
        self.active
    }

    /// Parse an utterance if the grammar is loaded and the foreground
    /// executable matches the context; `None` otherwise.
    pub fn recognize(
        &self,
        foreground: &str,
        utterance: &str,
    ) -> Option<Result<Recognition, ParseError>> {
        if !self.active || !self.grammar.is_active(foreground) {
            return None;
        }
        Some(self.grammar.parse(utterance))
    }

    pub fn unload(&mut self) {
        if self.active {
            info!("grammar '{}' unloaded", self.grammar.name);
            self.active = false;
        }
    }
}

impl Drop for GrammarHandle {
    fn drop(&mut self) {
        self.unload();
    }
}

fn compile_entry(entry: &Entry) -> Result<Rule, GrammarError> {
    let mut pieces = Vec::new();
    for piece in entry.pieces {
        pieces.push(match piece {
            Piece::Keys(spec) => TemplatePiece::Keys(parse_keyspec(spec).map_err(|source| {
                GrammarError::BadKeyspec {
                    phrase: entry.spoken.to_string(),
                    source,
                }
            })?),
            Piece::Text(text) => TemplatePiece::Text((*text).to_string()),
        });
    }
    Ok(Rule {
        spoken: entry.spoken.to_string(),
        pattern: parse_pattern(entry.spoken),
        action: RuleAction::Template(pieces),
    })
}

fn compile_custom(mapping: &CustomMapping) -> Result<Rule, GrammarError> {
    let mut pieces = Vec::new();
    if let Some(keys) = &mapping.keys {
        pieces.push(TemplatePiece::Keys(parse_keyspec(keys).map_err(
            |source| GrammarError::BadKeyspec {
                phrase: mapping.phrase.clone(),
                source,
            },
        )?));
    }
    if let Some(text) = &mapping.text {
        pieces.push(TemplatePiece::Text(text.clone()));
    }
    if pieces.is_empty() {
        return Err(GrammarError::EmptyMapping(mapping.phrase.clone()));
    }
    Ok(Rule {
        spoken: mapping.phrase.clone(),
        pattern: parse_pattern(&mapping.phrase),
        action: RuleAction::Template(pieces),
    })
}

fn parse_pattern(spoken: &str) -> Vec<Tok> {
    spoken
        .split_whitespace()
        .map(|word| {
            if let Some(inner) = word.strip_prefix('[').and_then(|w| w.strip_suffix(']')) {
                Tok::Opt(inner.to_lowercase())
            } else {
                match word {
                    "<n>" => Tok::Slot(SlotKind::Count),
                    "<n2>" => Tok::Slot(SlotKind::BigNumber),
                    "<c>" => Tok::Slot(SlotKind::Char),
                    "<text>" => Tok::Slot(SlotKind::Dictation),
                    other => Tok::Word(other.to_lowercase()),
                }
            }
        })
        .collect()
}

fn match_pattern(pattern: &[Tok], tokens: &[String], start: usize) -> Option<(Extras, usize)> {
    let mut extras = Extras::default();
    let mut i = start;
    for tok in pattern {
        match tok {
            Tok::Word(word) => {
                if tokens.get(i)? != word {
                    return None;
                }
                i += 1;
            }
            Tok::Opt(word) => {
                if tokens.get(i).is_some_and(|t| t == word) {
                    i += 1;
                }
            }
            Tok::Slot(SlotKind::Count) => {
                let (value, next) = extras::match_count(tokens, i)?;
                extras.n = Some(value);
                i = next;
            }
            Tok::Slot(SlotKind::BigNumber) => {
                let (value, next) = extras::match_number(tokens, i)?;
                if value > MAX_BIG_NUMBER {
                    return None;
                }
                extras.n2 = Some(value);
                i = next;
            }
            Tok::Slot(SlotKind::Char) => {
                let c = extras::spoken_char(tokens.get(i)?)?;
                extras.c = Some(c);
                i += 1;
            }
            // dictation is greedy to the end of the body (the repeat
            // clause has already been stripped)
            Tok::Slot(SlotKind::Dictation) => {
                if i >= tokens.len() {
                    return None;
                }
                extras.text = Some(tokens[i..].join(" "));
                i = tokens.len();
            }
        }
    }
    Some((extras, i))
}

fn resolve(action: &RuleAction, extras: &Extras) -> Action {
    match action {
        RuleAction::Template(pieces) => {
            let mut actions: Vec<Action> = pieces
                .iter()
                .map(|piece| match piece {
                    TemplatePiece::Keys(chords) => Action::Keys(chords.clone()),
                    TemplatePiece::Text(template) => {
                        Action::Text(fill_template(template, extras))
                    }
                })
                .collect();
            if actions.len() == 1 {
                actions.remove(0)
            } else {
                Action::Seq(actions)
            }
        }
        RuleAction::Format(func) => Action::Text(func(extras.text.as_deref().unwrap_or_default())),
    }
}

fn fill_template(template: &str, extras: &Extras) -> String {
    let mut out = template.to_string();
    if let Some(n) = extras.n {
        out = out.replace("%n", &n.to_string());
    }
    if let Some(n2) = extras.n2 {
        out = out.replace("%d", &n2.to_string());
    }
    if let Some(c) = extras.c {
        out = out.replace("%c", &c.to_string());
    }
    if let Some(text) = &extras.text {
        out = out.replace("%s", text);
    }
    out
}

/// Lowercase word tokens, with surrounding punctuation stripped (the
/// transcriber likes to add trailing periods).
fn tokenize(utterance: &str) -> Vec<String> {
    utterance
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| matches!(c, '.' | ',' | '!' | '?' | ';' | ':'))
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Strip a trailing `[[and] repeat [that]] <n> times` clause, returning
/// the remaining body and the count (1 when absent).
fn split_repeat_clause(tokens: &[String]) -> Result<(&[String], u32), ParseError> {
    let Some(last) = tokens.last() else {
        return Err(ParseError::Empty);
    };
    if last != "times" || tokens.len() < 2 {
        return Ok((tokens, 1));
    }

    let end = tokens.len() - 1;
    // the longest run of number words directly before "times"
    let mut start = end;
    while start > 0 && extras::parse_number(&tokens[start - 1..end]).is_some() {
        start -= 1;
    }
    if start == end {
        // "times" with no count in front of it is not a repeat clause
        return Ok((tokens, 1));
    }
    let Some(count) = extras::parse_number(&tokens[start..end]) else {
        return Ok((tokens, 1));
    };
    if count == 0 || count > u64::from(MAX_REPEAT) {
        return Err(ParseError::BadCount(count));
    }

    let mut body_end = start;
    if body_end > 1 && tokens[body_end - 1] == "that" && tokens[body_end - 2] == "repeat" {
        body_end -= 2;
    } else if body_end > 0 && tokens[body_end - 1] == "repeat" {
        body_end -= 1;
    }
    if body_end < start && body_end > 0 && tokens[body_end - 1] == "and" {
        body_end -= 1;
    }

    Ok((&tokens[..body_end], count as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyPress;

    fn grammar() -> Grammar {
        Grammar::build(&Config::default()).unwrap()
    }

    fn chord_chars(action: &Action) -> String {
        match action {
            Action::Keys(chords) => chords.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" "),
            Action::Text(text) => format!("[{text}]"),
            Action::Seq(parts) => parts.iter().map(chord_chars).collect::<Vec<_>>().join(" "),
        }
    }

    #[test]
    fn test_single_word_command() {
        let rec = grammar().parse("up").unwrap();
        assert_eq!(rec.count, 1);
        assert_eq!(rec.actions, vec![Action::Keys(parse_keyspec("k").unwrap())]);
    }

    #[test]
    fn test_multi_word_longest_match() {
        // "delete line" must win over "delete" followed by no match
        let rec = grammar().parse("delete line").unwrap();
        assert_eq!(rec.actions.len(), 1);
        assert_eq!(chord_chars(&rec.actions[0]), "d d");
    }

    #[test]
    fn test_sequence_of_commands() {
        let rec = grammar().parse("delete line slap out").unwrap();
        assert_eq!(rec.actions.len(), 3);
        assert_eq!(chord_chars(&rec.actions[1]), "enter");
        assert_eq!(rec.actions[2], Action::Keys(parse_keyspec("escape").unwrap()));
    }

    #[test]
    fn test_count_slot_with_optional_word() {
        let rec = grammar().parse("4 lines down").unwrap();
        assert_eq!(rec.actions.len(), 1);
        assert_eq!(chord_chars(&rec.actions[0]), "[4] j");

        let rec = grammar().parse("4 down").unwrap();
        assert_eq!(chord_chars(&rec.actions[0]), "[4] j");

        let rec = grammar().parse("forty three up").unwrap();
        assert_eq!(chord_chars(&rec.actions[0]), "[43] k");
    }

    #[test]
    fn test_big_number_slot() {
        let rec = grammar().parse("go line 4321").unwrap();
        assert_eq!(rec.actions, vec![Action::Text("4321G".to_string())]);

        let rec = grammar().parse("number 12").unwrap();
        assert_eq!(rec.actions, vec![Action::Text("12".to_string())]);
    }

    #[test]
    fn test_char_slot() {
        let rec = grammar().parse("jump bravo").unwrap();
        assert_eq!(chord_chars(&rec.actions[0]), "f [b]");

        let rec = grammar().parse("replace x").unwrap();
        assert_eq!(chord_chars(&rec.actions[0]), "r [x]");

        // a bare spoken letter types itself
        let rec = grammar().parse("victor").unwrap();
        assert_eq!(rec.actions, vec![Action::Text("v".to_string())]);
    }

    #[test]
    fn test_repeat_clause_variants() {
        for utterance in [
            "slap 3 times",
            "slap three times",
            "slap repeat 3 times",
            "slap repeat that 3 times",
            "slap and repeat that 3 times",
        ] {
            let rec = grammar().parse(utterance).unwrap();
            assert_eq!(rec.count, 3, "{utterance}");
            assert_eq!(rec.actions.len(), 1, "{utterance}");
        }
    }

    #[test]
    fn test_default_count_is_one() {
        assert_eq!(grammar().parse("slap").unwrap().count, 1);
    }

    #[test]
    fn test_count_out_of_range() {
        assert_eq!(
            grammar().parse("slap 200 times"),
            Err(ParseError::BadCount(200))
        );
    }

    #[test]
    fn test_format_rules() {
        let rec = grammar().parse("snake hello world").unwrap();
        assert_eq!(rec.actions, vec![Action::Text("hello_world".to_string())]);

        let rec = grammar().parse("camel hello there world").unwrap();
        assert_eq!(
            rec.actions,
            vec![Action::Text("helloThereWorld".to_string())]
        );

        let rec = grammar().parse("one word upper hello world").unwrap();
        assert_eq!(rec.actions, vec![Action::Text("HELLOWORLD".to_string())]);

        let rec = grammar().parse("all one word hello world").unwrap();
        assert_eq!(rec.actions, vec![Action::Text("helloworld".to_string())]);
    }

    #[test]
    fn test_dictation_stops_before_repeat_clause() {
        let rec = grammar().parse("say hello there 2 times").unwrap();
        assert_eq!(rec.count, 2);
        assert_eq!(rec.actions, vec![Action::Text("hello there".to_string())]);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(
            grammar().parse("frobnicate wildly"),
            Err(ParseError::NoMatch("frobnicate wildly".to_string()))
        );
    }

    #[test]
    fn test_empty_utterance() {
        assert_eq!(grammar().parse("   "), Err(ParseError::Empty));
        assert_eq!(grammar().parse("3 times"), Err(ParseError::Empty));
    }

    #[test]
    fn test_sequence_cap() {
        let long = vec!["slap"; MAX_SEQUENCE + 1].join(" ");
        assert_eq!(grammar().parse(&long), Err(ParseError::TooLong));

        let max = vec!["slap"; MAX_SEQUENCE].join(" ");
        assert_eq!(grammar().parse(&max).unwrap().actions.len(), MAX_SEQUENCE);
    }

    #[test]
    fn test_trailing_transcription_punctuation() {
        let rec = grammar().parse("Delete line.").unwrap();
        assert_eq!(chord_chars(&rec.actions[0]), "d d");
    }

    #[test]
    fn test_custom_mapping_shadows_builtin() {
        let mut config = Config::default();
        config.mapping.push(CustomMapping {
            phrase: "slap".to_string(),
            keys: None,
            text: Some("!".to_string()),
        });
        let grammar = Grammar::build(&config).unwrap();
        let rec = grammar.parse("slap").unwrap();
        assert_eq!(rec.actions, vec![Action::Text("!".to_string())]);
    }

    #[test]
    fn test_custom_mapping_keys_then_text() {
        let mut config = Config::default();
        config.mapping.push(CustomMapping {
            phrase: "go to project".to_string(),
            keys: Some("colon, c, d, space".to_string()),
            text: Some("~/src/project".to_string()),
        });
        let grammar = Grammar::build(&config).unwrap();
        let rec = grammar.parse("go to project").unwrap();
        assert_eq!(rec.actions.len(), 1);
        match &rec.actions[0] {
            Action::Seq(parts) => {
                assert!(matches!(parts[0], Action::Keys(_)));
                assert_eq!(parts[1], Action::Text("~/src/project".to_string()));
            }
            other => panic!("expected Seq, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_mapping_requires_action() {
        let mut config = Config::default();
        config.mapping.push(CustomMapping {
            phrase: "nothing".to_string(),
            keys: None,
            text: None,
        });
        assert!(matches!(
            Grammar::build(&config),
            Err(GrammarError::EmptyMapping(_))
        ));
    }

    #[test]
    fn test_bad_custom_keyspec() {
        let mut config = Config::default();
        config.mapping.push(CustomMapping {
            phrase: "broken".to_string(),
            keys: Some("nonsense-token".to_string()),
            text: None,
        });
        assert!(matches!(
            Grammar::build(&config),
            Err(GrammarError::BadKeyspec { .. })
        ));
    }

    #[test]
    fn test_context_gating() {
        let grammar = grammar();
        assert!(grammar.is_active("gvim"));
        assert!(grammar.is_active("GVIM.EXE"));
        assert!(grammar.is_active("konsole"));
        assert!(!grammar.is_active("firefox"));
    }

    #[test]
    fn test_handle_lifecycle() {
        let mut handle = grammar().load();
        assert!(handle.is_loaded());
        assert!(handle.recognize("gvim", "slap").is_some());
        assert!(handle.recognize("firefox", "slap").is_none());

        handle.unload();
        assert!(!handle.is_loaded());
        assert!(handle.recognize("gvim", "slap").is_none());
    }

    #[test]
    fn test_shifted_keys_survive() {
        let rec = grammar().parse("big word").unwrap();
        assert_eq!(
            rec.actions,
            vec![Action::Keys(vec![KeyChord {
                modifiers: vec![],
                key: KeyPress::Char('W')
            }])]
        );
    }
}

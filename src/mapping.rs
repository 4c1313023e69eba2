//! The static spoken-form -> action table
//!
//! One table covers both target applications: the modal-editor command set
//! and the terminal shortcuts. Spoken forms may carry slot tokens (`<n>`
//! bounded count, `<n2>` large number, `<c>` spoken character, `<text>`
//! dictation) and optional words in brackets (`[lines]`). Text pieces may
//! carry the matching placeholders `%n`, `%d`, `%c`, `%s`.
//!
//! The table is data, not behavior: it is compiled once into a
//! [`crate::grammar::Grammar`] at load time and immutable thereafter.
//! User additions come from the `[[mapping]]` section of the config file
//! and shadow these entries on collision.

/// One piece of an action template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    /// A keyspec string for [`crate::keys::parse_keyspec`].
    Keys(&'static str),
    /// Literal text, possibly with slot placeholders.
    Text(&'static str),
}

/// One built-in command: a spoken form and the action template it maps to.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub spoken: &'static str,
    pub pieces: &'static [Piece],
}

use Piece::{Keys, Text};

macro_rules! entry {
    ($spoken:literal => $($piece:expr),+) => {
        Entry { spoken: $spoken, pieces: &[$($piece),+] }
    };
}

pub const COMMAND_MAP: &[Entry] = &[
    // symbols and punctuation
    entry!("assign" => Keys("space, equals, space")),
    entry!("kick" => Keys("comma, space")),
    entry!("come" => Keys("comma")),
    entry!("colon" => Keys("colon")),
    entry!("smack" => Keys("space")),
    entry!("score" => Keys("underscore")),
    entry!("tab" => Keys("tab")),
    entry!("equals" => Keys("equals")),
    entry!("dot" => Keys("dot")),
    entry!("and" => Keys("ampersand, ampersand")),
    entry!("or" => Keys("bar, bar")),
    entry!("bang" => Keys("bang")),
    entry!("reference" => Keys("ampersand")),
    entry!("plus" => Keys("plus")),
    entry!("quote" => Keys("dquote")),
    entry!("minus" => Keys("minus")),
    entry!("tick" => Keys("lparen")),
    entry!("tock" => Keys("rparen")),
    entry!("chick" => Keys("lbrace")),
    entry!("chuck" => Keys("rbrace")),
    entry!("click" => Keys("lbracket")),
    entry!("clark" => Keys("rbracket")),
    entry!("not equal" => Keys("bang, equals")),
    entry!("less equal" => Keys("langle, equals")),
    entry!("less than" => Keys("langle")),
    entry!("greater than" => Keys("rangle")),
    entry!("sammy" => Text(";")),
    entry!("falls" => Text("false")),
    entry!("hash" => Keys("hash")),
    entry!("back slash" => Keys("backslash")),
    entry!("slash" => Keys("slash")),
    entry!("dub slash" => Keys("slash, slash")),
    entry!("arrow" => Keys("minus, rangle")),
    // motion
    entry!("undo" => Keys("u")),
    entry!("redo" => Keys("c-r")),
    entry!("up" => Keys("k")),
    entry!("down" => Keys("j")),
    entry!("left" => Keys("h")),
    entry!("right" => Keys("l")),
    entry!("<n> [lines] down" => Text("%n"), Keys("j")),
    entry!("<n> [lines] up" => Text("%n"), Keys("k")),
    entry!("go line <n2>" => Text("%dG")),
    entry!("word" => Keys("w")),
    entry!("back" => Keys("b")),
    entry!("big word" => Keys("W")),
    entry!("big back" => Keys("B")),
    entry!("end" => Keys("dollar")),
    entry!("begin" => Keys("caret")),
    entry!("page up" => Keys("c-u")),
    entry!("page down" => Keys("c-d")),
    entry!("scroll top" => Keys("z, t")),
    entry!("scroll middle" => Keys("z, z")),
    entry!("pair match" => Keys("percent")),
    entry!("last position" => Keys("c-o")),
    entry!("jump <c>" => Keys("f"), Text("%c")),
    entry!("back jump <c>" => Keys("F"), Text("%c")),
    // search
    entry!("find" => Keys("slash")),
    entry!("find next" => Keys("n")),
    entry!("find previous" => Keys("N")),
    entry!("stop find" => Keys("colon, n, o, h, enter")),
    // editing
    entry!("change word" => Keys("c, i, w")),
    entry!("change line" => Keys("c, c")),
    entry!("change in quote" => Keys("c, i, dquote")),
    entry!("big open" => Keys("O")),
    entry!("open" => Keys("o")),
    entry!("join" => Keys("J")),
    entry!("substitute" => Keys("s")),
    entry!("dedent line" => Keys("langle, langle")),
    entry!("indent line" => Keys("rangle, rangle")),
    entry!("inner dedent" => Keys("c-d")),
    entry!("inner indent" => Keys("c-t")),
    entry!("out" => Keys("escape")),
    entry!("auto complete" => Keys("c-n")),
    entry!("scratch" => Keys("c-w")),
    entry!("yank" => Keys("y")),
    entry!("delete" => Keys("d")),
    entry!("change" => Keys("c")),
    entry!("until" => Keys("t")),
    entry!("big kill" => Keys("d, W")),
    entry!("kill" => Keys("d, w")),
    entry!("big append" => Keys("A")),
    entry!("append" => Keys("a")),
    entry!("insert" => Keys("i")),
    entry!("big insert" => Keys("I")),
    entry!("toggle comment" => Keys("backslash, c")),
    entry!("replace <c>" => Keys("r"), Text("%c")),
    entry!("slap" => Keys("enter")),
    entry!("delete line" => Keys("d, d")),
    entry!("yank line" => Keys("y, y")),
    entry!("yank word" => Keys("y, w")),
    entry!("put" => Keys("p")),
    entry!("big put" => Keys("P")),
    entry!("visual line" => Keys("V")),
    // windows, tabs, files
    entry!("split win" => Keys("c-w, v")),
    entry!("close win" => Keys("c-w, c")),
    entry!("swap win" => Keys("c-w, x")),
    entry!("left win" => Keys("c-w, h")),
    entry!("right win" => Keys("c-w, l")),
    entry!("next tab" => Keys("g, t")),
    entry!("previous tab" => Keys("g, T")),
    entry!("new tab" => Keys("c-t")),
    entry!("command" => Keys("colon")),
    entry!("double col" => Keys("colon, colon")),
    entry!("working" => Keys("colon, p, w, d, enter")),
    entry!("edit file" => Keys("colon, e, space")),
    entry!("save it" => Keys("colon, w, enter")),
    entry!("ship it" => Keys("colon, x, enter")),
    // spelled characters and numbers
    entry!("<c>" => Text("%c")),
    entry!("number <n2>" => Text("%d")),
    // terminal
    entry!("git stat" => Text("git status"), Keys("enter")),
    entry!("git fetch" => Text("git fetch"), Keys("enter")),
    entry!("git amend" => Text("git commit --amend"), Keys("enter")),
    entry!("git commit" => Text("git commit"), Keys("enter")),
    entry!("git push" => Text("git push"), Keys("enter")),
    entry!("git add" => Text("git add"), Keys("space")),
    entry!("git checkout" => Text("git checkout"), Keys("space")),
    entry!("git interactive rebase" => Text("git rebase -i"), Keys("space")),
    entry!("origin master" => Text("origin/master")),
    entry!("build debug" => Text("make debug"), Keys("enter")),
    entry!("build release" => Text("make release"), Keys("enter")),
];

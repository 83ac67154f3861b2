//! Correction of free-form license declarations into SPDX expressions.
//!
//! Expressions are split on `AND`, `OR`, `WITH` and parentheses; each license term is
//! matched against known SPDX identifiers, first exactly (ignoring case), then through a
//! squashed spelling that ignores punctuation, filler words and a trailing `.0`.

use std::collections::HashMap;
use std::sync::LazyLock;

const KNOWN_LICENSES: &[&str] = &[
    "0BSD",
    "AFL-2.1",
    "AFL-3.0",
    "AGPL-3.0",
    "AGPL-3.0-only",
    "AGPL-3.0-or-later",
    "Apache-1.1",
    "Apache-2.0",
    "Artistic-2.0",
    "BlueOak-1.0.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "BSD-3-Clause-Clear",
    "BSD-4-Clause",
    "BSL-1.0",
    "CC-BY-3.0",
    "CC-BY-4.0",
    "CC-BY-SA-4.0",
    "CC0-1.0",
    "CDDL-1.0",
    "CDDL-1.1",
    "EPL-1.0",
    "EPL-2.0",
    "EUPL-1.1",
    "EUPL-1.2",
    "GPL-2.0",
    "GPL-2.0-only",
    "GPL-2.0-or-later",
    "GPL-3.0",
    "GPL-3.0-only",
    "GPL-3.0-or-later",
    "ISC",
    "LGPL-2.0",
    "LGPL-2.1",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
    "LGPL-3.0",
    "LGPL-3.0-only",
    "LGPL-3.0-or-later",
    "MIT",
    "MIT-0",
    "MPL-1.1",
    "MPL-2.0",
    "MS-PL",
    "ODbL-1.0",
    "OFL-1.1",
    "PSF-2.0",
    "Python-2.0",
    "Unlicense",
    "UPL-1.0",
    "W3C",
    "WTFPL",
    "X11",
    "Zlib",
];

const KNOWN_EXCEPTIONS: &[&str] = &[
    "Autoconf-exception-3.0",
    "Bison-exception-2.2",
    "Classpath-exception-2.0",
    "Font-exception-2.0",
    "GCC-exception-3.1",
    "LLVM-exception",
    "OpenJDK-assembly-exception-1.0",
];

/// Squashed spellings that do not follow from an identifier itself.
const ALIASES: &[(&str, &str)] = &[
    ("apache", "Apache-2.0"),
    ("asl2", "Apache-2.0"),
    ("mitx11", "MIT"),
    ("expat", "MIT"),
    ("bsd", "BSD-2-Clause"),
    ("bsd2", "BSD-2-Clause"),
    ("simplifiedbsd", "BSD-2-Clause"),
    ("freebsd", "BSD-2-Clause"),
    ("bsd3", "BSD-3-Clause"),
    ("newbsd", "BSD-3-Clause"),
    ("modifiedbsd", "BSD-3-Clause"),
    ("revisedbsd", "BSD-3-Clause"),
    ("gpl", "GPL-3.0"),
    ("gplv2", "GPL-2.0"),
    ("gplv3", "GPL-3.0"),
    ("lgpl", "LGPL-3.0"),
    ("lgplv2.1", "LGPL-2.1"),
    ("lgplv3", "LGPL-3.0"),
    ("agpl", "AGPL-3.0"),
    ("agplv3", "AGPL-3.0"),
    ("mpl", "MPL-2.0"),
    ("cc0", "CC0-1.0"),
    ("boost", "BSL-1.0"),
];

const PHRASES: &[(&str, &str)] = &[
    ("lesser general public", "lgpl"),
    ("library general public", "lgpl"),
    ("affero general public", "agpl"),
    ("general public", "gpl"),
    ("mozilla public", "mpl"),
    ("eclipse public", "epl"),
    ("boost software", "bsl"),
    ("creative commons", "cc"),
];

const FILLER_WORDS: &[&str] = &[
    "the", "license", "licence", "licensed", "version", "ver", "gnu", "v",
];

static CORRECTIONS: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut corrections = HashMap::new();
    for id in KNOWN_LICENSES {
        corrections.entry(squash(id)).or_insert(*id);
    }
    for (alias, id) in ALIASES {
        corrections.insert((*alias).to_string(), *id);
    }
    corrections
});

/// Corrects a license declaration into canonical SPDX syntax.
///
/// Operators are kept as written (upper-cased); neither side of an `OR` is dropped.
/// Returns `None` when any term cannot be resolved.
#[must_use]
pub fn correct_spdx(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    correct_expression(input).or_else(|| correct_term(input))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Word(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Open,
    Close,
    Operator(&'static str),
    Term(String),
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, c) in input.char_indices() {
        if c.is_whitespace() || c == '(' || c == ')' {
            if let Some(s) = start.take() {
                tokens.push(Token::Word(&input[s..i]));
            }
            match c {
                '(' => tokens.push(Token::Open),
                ')' => tokens.push(Token::Close),
                _ => {}
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Token::Word(&input[s..]));
    }

    tokens
}

/// SPDX operators must be all upper or all lower case.
fn operator(word: &str) -> Option<&'static str> {
    match word {
        "OR" | "or" => Some("OR"),
        "AND" | "and" => Some("AND"),
        "WITH" | "with" => Some("WITH"),
        _ => None,
    }
}

fn correct_expression(input: &str) -> Option<String> {
    let mut pieces = Vec::new();
    let mut words: Vec<&str> = Vec::new();
    let mut depth = 0usize;

    for token in tokenize(input) {
        match token {
            Token::Word(word) => {
                if let Some(op) = operator(word) {
                    flush_term(&mut pieces, &mut words)?;
                    pieces.push(Piece::Operator(op));
                } else {
                    words.push(word);
                }
            }
            Token::Open => {
                if !words.is_empty() {
                    return None;
                }
                depth += 1;
                pieces.push(Piece::Open);
            }
            Token::Close => {
                flush_term(&mut pieces, &mut words)?;
                depth = depth.checked_sub(1)?;
                pieces.push(Piece::Close);
            }
        }
    }
    flush_term(&mut pieces, &mut words)?;

    if depth != 0 || !is_well_formed(&pieces) {
        return None;
    }

    Some(render(&pieces))
}

fn flush_term(pieces: &mut Vec<Piece>, words: &mut Vec<&str>) -> Option<()> {
    if words.is_empty() {
        return Some(());
    }

    let term = words.join(" ");
    words.clear();

    let corrected = if pieces.last() == Some(&Piece::Operator("WITH")) {
        correct_exception(&term)?
    } else {
        correct_term(&term)?
    };
    pieces.push(Piece::Term(corrected));
    Some(())
}

/// Operands and operators must alternate, and groups must not be empty.
fn is_well_formed(pieces: &[Piece]) -> bool {
    let mut expect_operand = true;
    for piece in pieces {
        match piece {
            Piece::Open if expect_operand => {}
            Piece::Term(_) if expect_operand => expect_operand = false,
            Piece::Close | Piece::Operator(_) if !expect_operand => {
                expect_operand = matches!(piece, Piece::Operator(_));
            }
            _ => return false,
        }
    }
    !pieces.is_empty() && !expect_operand
}

fn render(pieces: &[Piece]) -> String {
    let mut out = String::new();
    let mut previous: Option<&Piece> = None;

    for piece in pieces {
        let needs_space = match (previous, piece) {
            (None | Some(Piece::Open), _) | (_, Piece::Close) => false,
            _ => true,
        };
        if needs_space {
            out.push(' ');
        }
        match piece {
            Piece::Open => out.push('('),
            Piece::Close => out.push(')'),
            Piece::Operator(op) => out.push_str(op),
            Piece::Term(term) => out.push_str(term),
        }
        previous = Some(piece);
    }

    out
}

fn correct_term(term: &str) -> Option<String> {
    let term = term.trim().trim_matches(|c| c == '"' || c == '\'');
    if term.is_empty() {
        return None;
    }

    if let Some(base) = term.strip_suffix('+') {
        return correct_term(base).map(|id| format!("{id}+"));
    }

    if term.starts_with("LicenseRef-") || term.starts_with("DocumentRef-") {
        return Some(term.to_string());
    }

    if let Some(id) = KNOWN_LICENSES.iter().find(|id| id.eq_ignore_ascii_case(term)) {
        return Some((*id).to_string());
    }

    CORRECTIONS.get(&squash(term)).map(|id| (*id).to_string())
}

fn correct_exception(term: &str) -> Option<String> {
    KNOWN_EXCEPTIONS
        .iter()
        .find(|id| id.eq_ignore_ascii_case(term.trim()))
        .map(|id| (*id).to_string())
}

fn squash(term: &str) -> String {
    let mut lowered = term
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    for (phrase, short) in PHRASES {
        lowered = lowered.replace(phrase, short);
    }

    let mut words: Vec<&str> = lowered
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '.'))
        .map(|w| strip_version_prefix(w.trim_matches('.')))
        .filter(|w| !w.is_empty() && !FILLER_WORDS.contains(w))
        .collect();
    words.dedup();

    let key = words.concat();
    if let Some(stripped) = key.strip_suffix(".0") {
        return stripped.to_string();
    }
    key
}

fn strip_version_prefix(word: &str) -> &str {
    match word.strip_prefix('v') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => word,
    }
}

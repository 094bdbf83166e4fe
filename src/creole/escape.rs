//! The escape character and its two roles.
//!
//! A tilde immediately before a token suppresses that token's markup
//! meaning. Matching consults [`is_escaped`] wherever a token is about to
//! be recognized, and [`remove_escapes`] runs once on literal text at the
//! leaf of the parse recursion, dropping the tildes that did their job and
//! keeping the ones that were just text.

/// The escape character.
pub const ESCAPE_CHAR: char = '~';

/// Whether the byte position `pos` in `text` is escaped.
///
/// A position is escaped when it is preceded by an odd-length run of
/// escape characters: `~x` escapes `x`, `~~x` is a literal tilde followed
/// by an unescaped `x`.
pub fn is_escaped(text: &str, pos: usize) -> bool {
    let mut run = 0usize;
    for c in text[..pos].chars().rev() {
        if c == ESCAPE_CHAR {
            run += 1;
        } else {
            break;
        }
    }
    run % 2 == 1
}

/// Remove spent escape characters from literal text.
///
/// An escape followed by a space, a newline, or end of text never escaped
/// anything and stays. A doubled escape collapses to one literal tilde.
/// Any other escape is dropped, leaving the character it protected.
pub fn remove_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ESCAPE_CHAR {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&ESCAPE_CHAR) => {
                chars.next();
                out.push(ESCAPE_CHAR);
            }
            Some(&' ') | Some(&'\n') | None => out.push(ESCAPE_CHAR),
            Some(_) => {}
        }
    }
    out
}

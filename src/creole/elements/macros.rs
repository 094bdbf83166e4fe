//! Macro matchers.
//!
//! A macro name is a letter followed by letters and digits, optionally
//! continued by `.` or `-` separated runs. Inline macros match anywhere;
//! block macros only at column zero, with nothing but whitespace after
//! the closing `>>` on the line. Bodied macros close at the matching
//! `<</name>>`, counting same-name opens so bodies can nest.

use super::{Found, FoundData};
use crate::creole::escape::is_escaped;

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Scan a macro name starting exactly at `from`; returns the end offset.
fn scan_name(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if from >= bytes.len() || !is_name_start(bytes[from]) {
        return None;
    }
    let mut at = from + 1;
    while at < bytes.len() && is_name_byte(bytes[at]) {
        at += 1;
    }
    loop {
        if at < bytes.len() && (bytes[at] == b'.' || bytes[at] == b'-') {
            let mut next = at + 1;
            while next < bytes.len() && is_name_byte(bytes[next]) {
                next += 1;
            }
            if next == at + 1 {
                break;
            }
            at = next;
        } else {
            break;
        }
    }
    Some(at)
}

fn at_line_start(text: &str, pos: usize) -> bool {
    pos == 0 || text.as_bytes()[pos - 1] == b'\n'
}

/// Consume `[ \t]*\n` starting at `pos`; returns the offset past the
/// newline.
fn eat_line_tail(text: &str, pos: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut at = pos;
    while at < bytes.len() && (bytes[at] == b' ' || bytes[at] == b'\t') {
        at += 1;
    }
    if at < bytes.len() && bytes[at] == b'\n' {
        Some(at + 1)
    } else {
        None
    }
}

/// The open tag of a macro at `pos`: `<<name...>>`. Returns the name,
/// the argument string (verbatim, including its leading delimiter), and
/// the offset past the closing `>>`.
fn scan_open_tag(text: &str, pos: usize) -> Option<(String, String, usize)> {
    if !text[pos..].starts_with("<<") {
        return None;
    }
    let name_end = scan_name(text, pos + 2)?;
    let close = text[name_end..].find(">>").map(|i| name_end + i)?;
    Some((
        text[pos + 2..name_end].to_string(),
        text[name_end..close].to_string(),
        close + 2,
    ))
}

fn find_open(text: &str, from: usize, block: bool) -> Option<(usize, String, String, usize)> {
    let mut at = from;
    while let Some(rel) = text[at..].find("<<") {
        let pos = at + rel;
        at = pos + 1;
        if is_escaped(text, pos) {
            continue;
        }
        if block && !at_line_start(text, pos) {
            continue;
        }
        if let Some((name, arg, end)) = scan_open_tag(text, pos) {
            return Some((pos, name, arg, end));
        }
    }
    None
}

/// A macro without a body. The block variant consumes its whole line.
pub(crate) fn find_macro(text: &str, block: bool) -> Option<Found> {
    let mut at = 0usize;
    loop {
        let (pos, name, arg, tag_end) = find_open(text, at, block)?;
        let end = if block {
            match eat_line_tail(text, tag_end) {
                Some(e) => e,
                None => {
                    at = pos + 2;
                    continue;
                }
            }
        } else {
            tag_end
        };
        return Some(Found {
            start: pos,
            end,
            data: FoundData::Macro {
                name,
                arg,
                body: None,
            },
        });
    }
}

/// A macro with a body, closed by the matching `<</name>>`. Opens of the
/// same name inside the body nest; an unmatched open means no match. The
/// block variant requires both tags to sit on their own lines.
pub(crate) fn find_bodied_macro(text: &str, block: bool) -> Option<Found> {
    let mut at = 0usize;
    'outer: loop {
        let (pos, name, arg, tag_end) = find_open(text, at, block)?;
        at = pos + 2;
        let body_start = if block {
            match eat_line_tail(text, tag_end) {
                Some(e) => e,
                None => continue,
            }
        } else {
            tag_end
        };

        let mut depth = 1usize;
        let mut scan = body_start;
        while let Some(rel) = text[scan..].find("<<") {
            let open = scan + rel;
            scan = open + 2;
            if is_escaped(text, open) {
                continue;
            }
            if text[open..].starts_with("<</") {
                let name_end = match scan_name(text, open + 3) {
                    Some(e) => e,
                    None => continue,
                };
                if &text[open + 3..name_end] != name || !text[name_end..].starts_with(">>") {
                    continue;
                }
                if block && !at_line_start(text, open) {
                    continue;
                }
                depth -= 1;
                if depth > 0 {
                    scan = name_end + 2;
                    continue;
                }
                let close_end = if block {
                    match eat_line_tail(text, name_end + 2) {
                        Some(e) => e,
                        None => continue 'outer,
                    }
                } else {
                    name_end + 2
                };
                return Some(Found {
                    start: pos,
                    end: close_end,
                    data: FoundData::Macro {
                        name,
                        arg,
                        body: Some(text[body_start..open].to_string()),
                    },
                });
            } else if let Some((open_name, open_arg, tag_end)) = scan_open_tag(text, open) {
                // Only a complete open tag deepens the nesting; a stray
                // `<<name` in the body, or one whose arg reaches into a
                // close tag, stays body text.
                if open_name == name && !open_arg.contains("<<") {
                    depth += 1;
                    scan = tag_end;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_macro(found: &Found) -> (&str, &str, Option<&str>) {
        match &found.data {
            FoundData::Macro { name, arg, body } => (name, arg, body.as_deref()),
            _ => panic!("expected macro data"),
        }
    }

    #[test]
    fn test_inline_macro_keeps_arg_delimiter() {
        let text = "a <<luca boo>> b";
        let found = find_macro(text, false).unwrap();
        assert_eq!(as_macro(&found), ("luca", " boo", None));
        assert_eq!((found.start, found.end), (2, 14));
    }

    #[test]
    fn test_dotted_and_dashed_names() {
        let found = find_macro("<<lib.ReverseIt-now>>", false).unwrap();
        assert_eq!(as_macro(&found).0, "lib.ReverseIt-now");
        assert!(find_macro("<<1bad>>", false).is_none());
    }

    #[test]
    fn test_block_macro_needs_column_zero_and_own_line() {
        assert!(find_macro(" <<footer>>\n", true).is_none());
        assert!(find_macro("<<footer>> tail\n", true).is_none());
        let found = find_macro("<<footer>>  \n", true).unwrap();
        assert_eq!((found.start, found.end), (0, 13));
    }

    #[test]
    fn test_bodied_macro_nests_same_name() {
        let text = "<<x>>a<<x>>b<</x>>c<</x>>tail";
        let found = find_bodied_macro(text, false).unwrap();
        assert_eq!(as_macro(&found), ("x", "", Some("a<<x>>b<</x>>c")));
        assert_eq!(&text[found.end..], "tail");
    }

    #[test]
    fn test_stray_same_name_open_does_not_deepen_nesting() {
        let text = "<<x>>uses <<x literally<</x>>rest";
        let found = find_bodied_macro(text, false).unwrap();
        assert_eq!(as_macro(&found), ("x", "", Some("uses <<x literally")));
        assert_eq!(&text[found.end..], "rest");
    }

    #[test]
    fn test_bodied_macro_unclosed_is_no_match() {
        assert!(find_bodied_macro("<<x>>never closed", false).is_none());
    }

    #[test]
    fn test_block_bodied_macro_consumes_tag_lines() {
        let text = "<<center>>\n= Hello =\n<</center>>\nrest\n";
        let found = find_bodied_macro(text, true).unwrap();
        assert_eq!(as_macro(&found), ("center", "", Some("= Hello =\n")));
        assert_eq!(&text[found.end..], "rest\n");
    }

    #[test]
    fn test_stray_close_is_not_an_open() {
        assert!(find_macro("<</luca>>", false).is_none());
    }
}

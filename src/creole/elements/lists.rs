//! List matchers: list runs, items, nested lists, and definition
//! terms/bodies.
//!
//! A list run starts at the first line whose first marker character is the
//! list's own token and extends until a line that opens a different list
//! kind at top level. Items capture their exact marker run, so `**` only
//! closes at the next `**` and deeper runs stay inside the item content
//! for the nested-list element to pick up.

use super::{blocks::line_starts, Found, FoundData};
use crate::creole::escape::is_escaped;

fn is_marker_byte(b: u8) -> bool {
    b == b'*' || b == b'#'
}

fn is_ascii_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Whether the line starting at `ls` opens a list of kind `token`: after
/// optional indent, exactly one leading `token` not doubled into a deeper
/// run.
fn is_single_token_line(text: &str, ls: usize, token: char) -> bool {
    let bytes = text.as_bytes();
    let mut at = ls;
    while at < bytes.len() && (bytes[at] == b' ' || bytes[at] == b'\t') {
        at += 1;
    }
    if at >= bytes.len() || bytes[at] != token as u8 {
        return false;
    }
    at + 1 >= bytes.len() || bytes[at + 1] != token as u8
}

/// A run of lines belonging to one list. `stops` holds the tokens of the
/// other list kinds; a line opening one of those at top level ends the
/// run. Anything else, list line or not, is swallowed into the run.
pub(crate) fn find_list(token: char, stops: &str, text: &str) -> Option<Found> {
    let mut start: Option<usize> = None;
    for ls in line_starts(text) {
        match start {
            None => {
                if is_single_token_line(text, ls, token) {
                    start = Some(ls);
                }
            }
            Some(s) => {
                if stops.chars().any(|stop| is_single_token_line(text, ls, stop)) {
                    return Some(Found {
                        start: s,
                        end: ls,
                        data: FoundData::Content { start: s, end: ls },
                    });
                }
            }
        }
    }
    start.map(|s| Found {
        start: s,
        end: text.len(),
        data: FoundData::Content {
            start: s,
            end: text.len(),
        },
    })
}

/// One list item. The marker run is captured exactly; the item runs to
/// the next line carrying the same run at the same depth, or to the end
/// of the text. One trailing newline is stripped from the content.
pub(crate) fn find_list_item(text: &str) -> Option<Found> {
    let bytes = text.as_bytes();
    let mut at = 0usize;
    while at < bytes.len() && is_ascii_ws(bytes[at]) {
        at += 1;
    }
    let marker_start = at;
    while at < bytes.len() && is_marker_byte(bytes[at]) {
        at += 1;
    }
    if at == marker_start {
        return None;
    }
    let marker = &text[marker_start..at];
    while at < bytes.len() && (bytes[at] == b' ' || bytes[at] == b'\t') {
        at += 1;
    }
    let content_start = at;

    let mut search = content_start;
    let mut span_end = text.len();
    while let Some(rel) = text[search..].find('\n') {
        let nl = search + rel;
        let mut k = nl + 1;
        while k < bytes.len() && is_ascii_ws(bytes[k]) {
            k += 1;
        }
        if text[k..].starts_with(marker) {
            let after = k + marker.len();
            if after >= bytes.len() || !is_marker_byte(bytes[after]) {
                span_end = nl + 1;
                break;
            }
        }
        search = nl + 1;
    }

    let mut content_end = span_end;
    if content_end > content_start && bytes[content_end - 1] == b'\n' {
        content_end -= 1;
    }
    Some(Found {
        start: 0,
        end: span_end,
        data: FoundData::Content {
            start: content_start,
            end: content_end,
        },
    })
}

/// A deeper list inside an item: the first line after a newline that,
/// past any whitespace, starts with `token`. The nested list runs to the
/// end of the item content.
pub(crate) fn find_nested_list(token: char, text: &str) -> Option<Found> {
    let bytes = text.as_bytes();
    for ls in line_starts(text) {
        if ls == 0 {
            continue;
        }
        let mut at = ls;
        while at < bytes.len() && is_ascii_ws(bytes[at]) {
            at += 1;
        }
        if at < bytes.len() && bytes[at] == token as u8 {
            return Some(Found {
                start: ls,
                end: text.len(),
                data: FoundData::Content {
                    start: ls,
                    end: text.len(),
                },
            });
        }
    }
    None
}

/// A `;` definition term line.
///
/// The term ends at the first unescaped colon followed by whitespace; a
/// colon at the very end of the line is kept in the term. Without a
/// colon the term is the whole line, right-trimmed.
pub(crate) fn find_definition_term(text: &str) -> Option<Found> {
    let bytes = text.as_bytes();
    for ls in line_starts(text) {
        let mut at = ls;
        while at < bytes.len() && (bytes[at] == b' ' || bytes[at] == b'\t') {
            at += 1;
        }
        if at >= bytes.len() || bytes[at] != b';' {
            continue;
        }
        at += 1;
        while at < bytes.len() && (bytes[at] == b' ' || bytes[at] == b'\t') {
            at += 1;
        }
        let ts = at;
        let le = text[ls..]
            .find('\n')
            .map(|i| ls + i)
            .unwrap_or(text.len());

        let mut pos = ts;
        loop {
            // A colon with nothing but trailing whitespace after it stays
            // part of the term and the whole line is consumed.
            if pos < le
                && bytes[pos] == b':'
                && text[pos + 1..le].bytes().all(|b| b == b' ' || b == b'\t')
            {
                let end = if le < text.len() { le + 1 } else { le };
                return Some(Found {
                    start: ls,
                    end,
                    data: FoundData::Content {
                        start: ts,
                        end: pos + 1,
                    },
                });
            }
            let mut ws_end = pos;
            while ws_end < bytes.len() && is_ascii_ws(bytes[ws_end]) {
                ws_end += 1;
            }
            if ws_end == bytes.len()
                || (bytes[ws_end] == b':' && !is_escaped(text, ws_end))
            {
                // The term stops here; consumed whitespace may include
                // the line's newline but never the colon.
                return Some(Found {
                    start: ls,
                    end: ws_end,
                    data: FoundData::Content { start: ts, end: pos },
                });
            }
            if let Some(nl) = text[pos..ws_end].find('\n') {
                return Some(Found {
                    start: ls,
                    end: pos + nl + 1,
                    data: FoundData::Content { start: ts, end: pos },
                });
            }
            if pos >= le {
                break;
            }
            pos += 1;
            while pos < le && !text.is_char_boundary(pos) {
                pos += 1;
            }
        }
    }
    None
}

/// A `:` definition body, possibly spanning several lines; it ends before
/// the next line that starts with a colon, or at the end of the text.
pub(crate) fn find_definition_def(text: &str) -> Option<Found> {
    let bytes = text.as_bytes();
    let mut at = 0usize;
    while at < bytes.len() && (bytes[at] == b' ' || bytes[at] == b'\t') {
        at += 1;
    }
    if at < bytes.len() && bytes[at] == b':' {
        at += 1;
        while at < bytes.len() && (bytes[at] == b' ' || bytes[at] == b'\t') {
            at += 1;
        }
    }
    let content_start = at;
    if content_start >= text.len() {
        return None;
    }

    let mut search = content_start;
    let mut boundary: Option<usize> = None;
    while let Some(rel) = text[search..].find('\n') {
        let nl = search + rel;
        let mut k = nl + 1;
        while k < bytes.len() && (bytes[k] == b' ' || bytes[k] == b'\t') {
            k += 1;
        }
        if k >= bytes.len() || bytes[k] == b':' {
            boundary = Some(nl);
            break;
        }
        search = nl + 1;
    }
    let nl = boundary?;
    let mut content_end = nl;
    while content_end > content_start && is_ascii_ws(bytes[content_end - 1]) {
        content_end -= 1;
    }
    if content_end == content_start {
        return None;
    }
    Some(Found {
        start: 0,
        end: nl + 1,
        data: FoundData::Content {
            start: content_start,
            end: content_end,
        },
    })
}

//! Table matchers: the table run, its rows, and header/data cells.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{find_unescaped, Found, FoundData};

static TABLE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(?:[ \t]*\|.*\n)+").unwrap());

/// One or more consecutive lines starting with a pipe.
pub(crate) fn find_table(text: &str) -> Option<Found> {
    let m = TABLE_RUN.find(text)?;
    Some(Found {
        start: m.start(),
        end: m.end(),
        data: FoundData::Content {
            start: m.start(),
            end: m.end(),
        },
    })
}

static TABLE_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(\|.*?)\|?[ \t]*\n").unwrap());

/// One table line; an optional closing pipe and trailing whitespace are
/// dropped from the row content.
pub(crate) fn find_table_row(text: &str) -> Option<Found> {
    let caps = TABLE_ROW.captures(text)?;
    let whole = caps.get(0).unwrap();
    let row = caps.get(1).unwrap();
    Some(Found {
        start: whole.start(),
        end: whole.end(),
        data: FoundData::Content {
            start: row.start(),
            end: row.end(),
        },
    })
}

/// One cell, from its unescaped `|` (or `|=` for headers) to the next
/// unescaped pipe or the end of the row. Content is trimmed.
pub(crate) fn find_table_cell(text: &str, header: bool) -> Option<Found> {
    let token = if header { "|=" } else { "|" };
    let open = find_unescaped(text, token, 0)?;
    let mut cs = open + token.len();
    let bytes = text.as_bytes();
    while cs < bytes.len() && (bytes[cs] == b' ' || bytes[cs] == b'\t') {
        cs += 1;
    }
    let stop = find_unescaped(text, "|", cs).unwrap_or(text.len());
    let mut ce = stop;
    while ce > cs && (bytes[ce - 1] == b' ' || bytes[ce - 1] == b'\t') {
        ce -= 1;
    }
    Some(Found {
        start: open,
        end: stop,
        data: FoundData::Content { start: cs, end: ce },
    })
}

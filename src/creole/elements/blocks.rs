//! Block-level matchers: headings, paragraphs, preformatted blocks,
//! horizontal rules, and blank lines.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Found, FoundData};

/// Byte index of the start of each line, in order.
pub(crate) fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0).chain(text.match_indices('\n').filter_map(move |(i, _)| {
        if i + 1 < text.len() {
            Some(i + 1)
        } else {
            None
        }
    }))
}

fn line_end(text: &str, start: usize) -> usize {
    text[start..]
        .find('\n')
        .map(|i| start + i)
        .unwrap_or(text.len())
}

/// A heading line: optional indent, one to six `=`, content. Seven or
/// more equals signs make the line an ordinary paragraph. Trailing
/// whitespace and a trailing `=` run are trimmed from the content.
pub(crate) fn find_heading(text: &str) -> Option<Found> {
    let bytes = text.as_bytes();
    for ls in line_starts(text) {
        let le = line_end(text, ls);
        let mut at = ls;
        while at < le && (bytes[at] == b' ' || bytes[at] == b'\t') {
            at += 1;
        }
        let run_start = at;
        while at < le && bytes[at] == b'=' {
            at += 1;
        }
        let level = at - run_start;
        if level == 0 || level > 6 {
            continue;
        }
        while at < le && (bytes[at] == b' ' || bytes[at] == b'\t') {
            at += 1;
        }
        let mut ce = le;
        while ce > at && (bytes[ce - 1] == b' ' || bytes[ce - 1] == b'\t') {
            ce -= 1;
        }
        while ce > at && bytes[ce - 1] == b'=' {
            ce -= 1;
        }
        while ce > at && (bytes[ce - 1] == b' ' || bytes[ce - 1] == b'\t') {
            ce -= 1;
        }
        let end = if le < text.len() { le + 1 } else { le };
        return Some(Found {
            start: ls,
            end,
            data: FoundData::Heading {
                level: level as u8,
                start: at,
                end: ce,
            },
        });
    }
    None
}

/// A paragraph is everything up to and including the last newline of the
/// remaining text. It only matches from the start of that text, which is
/// always a line start here.
pub(crate) fn find_paragraph(text: &str) -> Option<Found> {
    let last = text.rfind('\n')?;
    Some(Found {
        start: 0,
        end: last + 1,
        data: FoundData::Content { start: 0, end: last },
    })
}

fn is_pre_fence(text: &str, ls: usize, fence: &str) -> Option<usize> {
    let le = line_end(text, ls);
    let line = &text[ls..le];
    let rest = line.strip_prefix(fence)?;
    if rest.bytes().all(|b| b == b' ' || b == b'\t') {
        Some(le)
    } else {
        None
    }
}

/// A preformatted block: a `{{{` line through a `}}}` line, both at
/// column zero. Content is kept verbatim, one line minimum.
pub(crate) fn find_pre_block(text: &str) -> Option<Found> {
    for ls in line_starts(text) {
        let le = match is_pre_fence(text, ls, "{{{") {
            Some(le) if le < text.len() => le,
            _ => continue,
        };
        let content_start = le + 1;
        if let Some(found) = find_pre_close(text, ls, content_start) {
            return Some(found);
        }
    }
    None
}

fn find_pre_close(text: &str, open_start: usize, content_start: usize) -> Option<Found> {
    let mut ls = content_start;
    while ls < text.len() {
        // The close fence cannot be the line the content starts on; the
        // content is at least one line.
        if ls > content_start {
            if let Some(le) = is_pre_fence(text, ls, "}}}") {
                let end = if le < text.len() { le + 1 } else { le };
                return Some(Found {
                    start: open_start,
                    end,
                    data: FoundData::Content {
                        start: content_start,
                        end: ls,
                    },
                });
            }
        }
        match text[ls..].find('\n') {
            Some(i) => ls = ls + i + 1,
            None => break,
        }
    }
    None
}

/// Lines of the form ` }}}` inside a preformatted block lose one leading
/// space when the block is built, so the close fence itself can be
/// written inside a block.
static PRE_ESCAPED_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^ ([ \t]*\}\}\}[ \t]*)$").unwrap());

pub(crate) fn unescape_pre_fences(content: &str) -> String {
    PRE_ESCAPED_FENCE.replace_all(content, "$1").into_owned()
}

static HR_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*----[ \t]*\n").unwrap());

/// `----` alone on a line.
pub(crate) fn find_lone(text: &str) -> Option<Found> {
    let m = HR_LINE.find(text)?;
    Some(Found {
        start: m.start(),
        end: m.end(),
        data: FoundData::Plain,
    })
}

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(?:[ \t]*\n)+").unwrap());

/// One or more whitespace-only lines.
pub(crate) fn find_blank_line(text: &str) -> Option<Found> {
    let m = BLANK_LINES.find(text)?;
    Some(Found {
        start: m.start(),
        end: m.end(),
        data: FoundData::Plain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(text: &str, found: &Found) -> String {
        match found.data {
            FoundData::Content { start, end } => text[start..end].to_string(),
            _ => panic!("expected content data"),
        }
    }

    #[test]
    fn test_heading_trims_trailing_equals() {
        let text = "== A Title ==  \n";
        let found = find_heading(text).unwrap();
        match found.data {
            FoundData::Heading { level, start, end } => {
                assert_eq!(level, 2);
                assert_eq!(&text[start..end], "A Title");
            }
            _ => panic!("expected heading data"),
        }
        assert_eq!(found.end, text.len());
    }

    #[test]
    fn test_heading_seven_equals_is_not_a_heading() {
        assert!(find_heading("======= nope\n").is_none());
    }

    #[test]
    fn test_heading_skips_earlier_plain_lines() {
        let text = "plain\n= found\n";
        let found = find_heading(text).unwrap();
        assert_eq!(found.start, 6);
    }

    #[test]
    fn test_paragraph_spans_to_last_newline() {
        let text = "one\ntwo\n";
        let found = find_paragraph(text).unwrap();
        assert_eq!(content(text, &found), "one\ntwo");
        assert_eq!(found.end, text.len());
        assert!(find_paragraph("no newline").is_none());
    }

    #[test]
    fn test_pre_block_fences_at_column_zero() {
        let text = "before\n{{{\ncode **here**\n}}}\nafter\n";
        let found = find_pre_block(text).unwrap();
        assert_eq!(found.start, 7);
        assert_eq!(content(text, &found), "code **here**\n");
        assert_eq!(&text[found.end..], "after\n");
    }

    #[test]
    fn test_pre_block_ignores_indented_close() {
        assert!(find_pre_block("{{{\n  }}}\n").is_none());
    }

    #[test]
    fn test_pre_fence_unescape_drops_one_space() {
        assert_eq!(unescape_pre_fences(" }}}\n"), "}}}\n");
        assert_eq!(unescape_pre_fences("  }}}\n"), " }}}\n");
        assert_eq!(unescape_pre_fences(" keep }}}\n"), " keep }}}\n");
    }

    #[test]
    fn test_lone_and_blank() {
        let found = find_lone("text\n ---- \nmore\n").unwrap();
        assert_eq!((found.start, found.end), (5, 12));
        let found = find_blank_line("a\n\n \n\nb\n").unwrap();
        assert_eq!((found.start, found.end), (2, 6));
    }
}

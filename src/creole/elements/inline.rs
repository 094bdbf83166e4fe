//! Inline span matchers: simple symmetric-token spans, inline no-wiki,
//! and line breaks.

use super::{find_unescaped, Found, FoundData};

/// Find the leftmost unescaped opening token of any entry in `tokens`.
/// The span closes at the next unescaped occurrence of the same token, or
/// at end of text when the author left it open.
pub(crate) fn find_simple(tokens: &[(&'static str, &'static str)], text: &str) -> Option<Found> {
    let mut best: Option<(usize, &'static str, &'static str)> = None;
    for &(token, tag) in tokens {
        if let Some(pos) = find_unescaped(text, token, 0) {
            match best {
                Some((b, _, _)) if b <= pos => {}
                _ => best = Some((pos, token, tag)),
            }
        }
    }
    let (open, token, tag) = best?;
    let content_start = open + token.len();
    if content_start >= text.len() {
        return None;
    }
    // Content is at least one character; a doubled close right after the
    // open is taken as content plus end-of-text fallback instead.
    let mut search_from = content_start + 1;
    while search_from < text.len() && !text.is_char_boundary(search_from) {
        search_from += 1;
    }
    match find_unescaped(text, token, search_from) {
        Some(close) => Some(Found {
            start: open,
            end: close + token.len(),
            data: FoundData::Simple {
                tag,
                start: content_start,
                end: close,
            },
        }),
        None => Some(Found {
            start: open,
            end: text.len(),
            data: FoundData::Simple {
                tag,
                start: content_start,
                end: text.len(),
            },
        }),
    }
}

/// Inline `{{{...}}}`. The close is the last three braces of the first
/// long-enough brace run; extra braces belong to the content. Content is
/// never de-escaped. No close means no match.
pub(crate) fn find_no_wiki(text: &str) -> Option<Found> {
    let open = find_unescaped(text, "{{{", 0)?;
    let content_start = open + 3;
    let bytes = text.as_bytes();
    let mut at = content_start;
    while let Some(rel) = text[at..].find("}}}") {
        let run_start = at + rel;
        let mut run_end = run_start + 3;
        while run_end < bytes.len() && bytes[run_end] == b'}' {
            run_end += 1;
        }
        if run_end - 3 > content_start {
            return Some(Found {
                start: open,
                end: run_end,
                data: FoundData::Content {
                    start: content_start,
                    end: run_end - 3,
                },
            });
        }
        at = run_end;
    }
    None
}

/// Forced line break `\\`; in blog style a bare newline breaks too.
/// The token is never subject to tilde escaping.
pub(crate) fn find_line_break(text: &str, blog_style: bool) -> Option<Found> {
    let forced = text.find(r"\\");
    let bare = if blog_style { text.find('\n') } else { None };
    let (pos, len) = match (forced, bare) {
        (Some(f), Some(b)) if b < f => (b, 1),
        (Some(f), _) => (f, 2),
        (None, Some(b)) => (b, 1),
        (None, None) => return None,
    };
    Some(Found {
        start: pos,
        end: pos + len,
        data: FoundData::Plain,
    })
}

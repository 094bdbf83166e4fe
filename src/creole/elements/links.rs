//! Links and images: bare URLs in running text, bracketed links with
//! their type dispatch (explicit URI, interwiki, wiki page), and images.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{find_unescaped, Found, FoundData};
use crate::creole::grammar::{ClassFunc, PageFunc, UriCheckFunc};

/// Options for bare wiki page links.
pub struct WikiLinkConfig {
    /// Prefix joined in front of the page path.
    pub base_url: String,
    /// Replacement for spaces in page names.
    pub space_char: String,
    /// Optional class attribute for the link, from the page name.
    pub class_func: Option<ClassFunc>,
    /// Page name to path; percent-encoding when absent.
    pub path_func: Option<PageFunc>,
}

/// Options for `wiki:Page` interwiki links, keyed by wiki name.
pub struct InterWikiConfig {
    pub base_urls: HashMap<String, String>,
    pub page_funcs: HashMap<String, PageFunc>,
    pub space_chars: HashMap<String, String>,
    /// Space replacement for wikis without an entry in `space_chars`.
    pub default_space_char: String,
}

/// Resolved target of a bracketed link or image.
pub(crate) struct ResolvedLink {
    /// `None` for an unsafe or unresolvable target; the caller falls back
    /// to literal text.
    pub href: Option<String>,
    /// Default link text when the author gave no alias.
    pub alias: String,
    pub class: Option<String>,
}

const RAW_SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

/// A bare URL in running text: scheme, then everything up to whitespace.
/// One trailing punctuation character (or a trailing `**`/`//`) stays out
/// of the URL. A tilde right before the scheme turns the URL into plain
/// text.
pub(crate) fn find_raw_link(text: &str) -> Option<Found> {
    let mut from = 0usize;
    loop {
        let mut best: Option<(usize, usize)> = None;
        for scheme in RAW_SCHEMES {
            if let Some(rel) = text[from..].find(scheme) {
                let pos = from + rel;
                match best {
                    Some((b, _)) if b <= pos => {}
                    _ => best = Some((pos, scheme.len())),
                }
            }
        }
        let (pos, scheme_len) = best?;
        let tail = &text[pos..];
        let mut url_len = tail
            .find(|c: char| c.is_whitespace())
            .unwrap_or(tail.len());
        if let Some(ph) = tail[..url_len].find("<<<") {
            url_len = ph;
        }
        if url_len > scheme_len {
            let url = &tail[..url_len];
            if url.ends_with("**") || url.ends_with("//") {
                if url_len - 2 > scheme_len {
                    url_len -= 2;
                }
            } else if matches!(
                url.as_bytes()[url_len - 1],
                b',' | b'.' | b'?' | b'!' | b':' | b';' | b'"' | b'\''
            ) && url_len - 1 > scheme_len
            {
                url_len -= 1;
            }
        }
        if url_len > scheme_len {
            let escaped = pos > 0 && text.as_bytes()[pos - 1] == b'~';
            return Some(Found {
                start: if escaped { pos - 1 } else { pos },
                end: pos + url_len,
                data: FoundData::RawLink {
                    start: pos,
                    end: pos + url_len,
                    escaped,
                },
            });
        }
        from = pos + scheme_len;
    }
}

/// A `[[...]]` link: must close on the same line, content nonempty.
pub(crate) fn find_link(text: &str) -> Option<Found> {
    let mut from = 0usize;
    while let Some(open) = find_unescaped(text, "[[", from) {
        let rest = &text[open + 2..];
        let line_len = rest.find('\n').unwrap_or(rest.len());
        let line = &rest[..line_len];
        // content must be nonempty, so a close right at the open is skipped
        let close = match find_unescaped(line, "]]", 0) {
            Some(0) => find_unescaped(line, "]]", 1),
            other => other,
        };
        if let Some(close) = close {
            return Some(Found {
                start: open,
                end: open + 2 + close + 2,
                data: FoundData::Content {
                    start: open + 2,
                    end: open + 2 + close,
                },
            });
        }
        from = open + 2;
    }
    None
}

/// A `{{...}}` image: must close on the same line, content nonempty.
pub(crate) fn find_image(text: &str) -> Option<Found> {
    let mut from = 0usize;
    while let Some(open) = find_unescaped(text, "{{", from) {
        let rest = &text[open + 2..];
        let line_len = rest.find('\n').unwrap_or(rest.len());
        let line = &rest[..line_len];
        let close = match find_unescaped(line, "}}", 0) {
            Some(0) => find_unescaped(line, "}}", 1),
            other => other,
        };
        if let Some(close) = close {
            return Some(Found {
                start: open,
                end: open + 2 + close + 2,
                data: FoundData::Content {
                    start: open + 2,
                    end: open + 2 + close,
                },
            });
        }
        from = open + 2;
    }
    None
}

/// Split a link or image body at its first unescaped pipe into target
/// and optional alias.
pub(crate) fn split_alias(body: &str) -> (&str, Option<&str>) {
    match find_unescaped(body, "|", 0) {
        Some(pipe) => (&body[..pipe], Some(&body[pipe + 1..])),
        None => (body, None),
    }
}

/// Schemes that are recognized without a `//` authority part.
const NO_SLASH_SCHEMES: &str = "mailto|javascript|data|vbscript|irc|news";

static URL_TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\s*([a-zA-Z][a-zA-Z0-9+.-]*://\S+|(?:{})\S+)\s*$",
        NO_SLASH_SCHEMES
            .split('|')
            .map(|s| format!("{}:", s))
            .collect::<Vec<_>>()
            .join("|")
    ))
    .unwrap()
});

/// Explicit-URI link type. Unsafe URIs resolve with no href so the link
/// falls back to literal text.
pub(crate) fn resolve_url(target: &str, check_uri: &UriCheckFunc) -> Option<ResolvedLink> {
    let caps = URL_TARGET.captures(target)?;
    let url = caps.get(1).unwrap().as_str().to_string();
    let href = if check_uri(&url) { Some(url.clone()) } else { None };
    Some(ResolvedLink {
        href,
        alias: url,
        class: None,
    })
}

static INTERWIKI_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\w+)[ ]*:[ ]*(\S+(?: \S+)*)[ ]*$").unwrap());

/// `wiki:Page Name` link type. Unknown wiki names do not resolve; a wiki
/// with neither base URL nor page function resolves with no href.
pub(crate) fn resolve_interwiki(cfg: &InterWikiConfig, target: &str) -> Option<ResolvedLink> {
    let caps = INTERWIKI_TARGET.captures(target)?;
    let wiki = caps.get(1).unwrap().as_str();
    let page = caps.get(2).unwrap().as_str();
    let base = cfg.base_urls.get(wiki);
    let page_func = cfg.page_funcs.get(wiki);
    if base.is_none() && page_func.is_none() {
        return Some(ResolvedLink {
            href: None,
            alias: format!("{}:{}", wiki, page),
            class: None,
        });
    }
    let space_char = cfg
        .space_chars
        .get(wiki)
        .map(String::as_str)
        .unwrap_or(&cfg.default_space_char);
    let spaced = page.replace(' ', space_char);
    let path = match page_func {
        Some(f) => f(&spaced),
        None => percent_encode(&spaced),
    };
    let href = match base {
        Some(base) if base.ends_with('/') => format!("{}{}", base, path),
        Some(base) => format!("{}/{}", base, path),
        None => path,
    };
    Some(ResolvedLink {
        href: Some(href),
        alias: format!("{}:{}", wiki, page),
        class: None,
    })
}

static WIKI_TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ ]*(\S+(?: \S+)*)[ ]*$").unwrap());

/// Bare page name link type. Resolves when the target is a run of words
/// separated by single spaces; runs of spaces do not resolve.
pub(crate) fn resolve_wiki(cfg: &WikiLinkConfig, target: &str) -> Option<ResolvedLink> {
    let caps = WIKI_TARGET.captures(target)?;
    let page = caps.get(1).unwrap().as_str();
    let spaced = page.replace(' ', &cfg.space_char);
    let path = match &cfg.path_func {
        Some(f) => f(&spaced),
        None => percent_encode(&spaced),
    };
    let class = cfg.class_func.as_ref().and_then(|f| f(&spaced));
    Some(ResolvedLink {
        href: Some(format!("{}{}", cfg.base_url, path)),
        alias: page.to_string(),
        class,
    })
}

/// Percent-encode a path component, keeping slashes and unreserved
/// characters.
pub(crate) fn percent_encode(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-' | b'~' | b'/' => {
                out.push(b as char)
            }
            _ => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0xf) as usize] as char);
            }
        }
    }
    out
}

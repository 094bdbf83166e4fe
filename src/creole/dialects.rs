//! Ready-made dialect assemblies.
//!
//! [`creole10_base`] is the plain Creole 1.0 grammar; [`creole11_base`]
//! adds the common additions: definition lists, more simple tokens, and
//! macros. Both take their knobs from [`DialectOptions`].

use std::collections::HashMap;

use crate::creole::elements::{ElementKind, InterWikiConfig, WikiLinkConfig};
use crate::creole::grammar::{
    Append, ClassFunc, Dialect, DialectBuilder, ElementId, GrammarItem, MacroFunc, PageFunc,
    UriCheckFunc,
};

/// Configuration shared by the dialect constructors. The default value
/// gives root-relative wiki links, no interwiki map, no macros, and the
/// scheme-blacklist URI check.
pub struct DialectOptions {
    /// Prefix for bare wiki page links.
    pub wiki_links_base_url: String,
    /// Replacement for spaces in page names, wiki and interwiki alike.
    pub wiki_links_space_char: String,
    /// Optional class attribute for wiki links.
    pub wiki_links_class_func: Option<ClassFunc>,
    /// Page name to path for wiki links; percent-encoding when absent.
    pub wiki_links_path_func: Option<PageFunc>,
    pub interwiki_links_base_urls: HashMap<String, String>,
    pub interwiki_links_funcs: HashMap<String, PageFunc>,
    pub interwiki_links_space_chars: HashMap<String, String>,
    /// Render inline no-wiki spans as `tt` instead of `span`.
    pub no_wiki_monospace: bool,
    /// Treat every newline inside a paragraph as a line break.
    pub blog_style_endings: bool,
    /// Macro callback; without one every macro is unknown.
    pub macro_func: Option<MacroFunc>,
    /// URI safety check for links and images.
    pub check_uri: UriCheckFunc,
}

impl Default for DialectOptions {
    fn default() -> Self {
        DialectOptions {
            wiki_links_base_url: String::new(),
            wiki_links_space_char: "_".to_string(),
            wiki_links_class_func: None,
            wiki_links_path_func: None,
            interwiki_links_base_urls: HashMap::new(),
            interwiki_links_funcs: HashMap::new(),
            interwiki_links_space_chars: HashMap::new(),
            no_wiki_monospace: false,
            blog_style_endings: false,
            macro_func: None,
            check_uri: Box::new(default_check_uri),
        }
    }
}

/// The default URI check: refuse schemes that execute in the reader's
/// browser.
pub fn default_check_uri(uri: &str) -> bool {
    let scheme = match uri.split_once(':') {
        Some((scheme, _)) => scheme.trim().to_ascii_lowercase(),
        None => return true,
    };
    !matches!(scheme.as_str(), "javascript" | "data" | "vbscript")
}

struct LinkParts {
    link: ElementId,
    img: ElementId,
    raw_link: ElementId,
}

fn add_link_elements(builder: &mut DialectBuilder, options: &mut DialectOptions) -> LinkParts {
    let url_link = builder.add(ElementKind::UrlLink, "a", Append::Never);
    let interwiki = builder.add(
        ElementKind::InterWikiLink(InterWikiConfig {
            base_urls: std::mem::take(&mut options.interwiki_links_base_urls),
            page_funcs: std::mem::take(&mut options.interwiki_links_funcs),
            space_chars: std::mem::take(&mut options.interwiki_links_space_chars),
            default_space_char: options.wiki_links_space_char.clone(),
        }),
        "a",
        Append::Never,
    );
    let wiki_link = builder.add(
        ElementKind::WikiLink(WikiLinkConfig {
            base_url: options.wiki_links_base_url.clone(),
            space_char: options.wiki_links_space_char.clone(),
            class_func: options.wiki_links_class_func.take(),
            path_func: options.wiki_links_path_func.take(),
        }),
        "a",
        Append::Never,
    );
    let link = builder.add(ElementKind::Link { types: Vec::new() }, "a", Append::Never);
    builder.set_link_types(link, vec![url_link, interwiki, wiki_link]);
    let img = builder.add(ElementKind::Image, "img", Append::Never);
    let raw_link = builder.add(ElementKind::RawLink, "a", Append::Never);
    LinkParts {
        link,
        img,
        raw_link,
    }
}

/// The Creole 1.0 grammar: headings, lists, tables, links, images,
/// preformatted blocks, strong and emphasis.
pub fn creole10_base(mut options: DialectOptions) -> Dialect {
    let mut builder = DialectBuilder::new();

    let no_wiki_tag = if options.no_wiki_monospace { "tt" } else { "span" };
    let no_wiki = builder.add(ElementKind::NoWiki, no_wiki_tag, Append::Never);
    let br = builder.add(
        ElementKind::LineBreak {
            blog_style: options.blog_style_endings,
        },
        "br",
        Append::Never,
    );
    let simple = builder.add(
        ElementKind::Simple {
            tokens: vec![("**", "strong"), ("//", "em")],
        },
        "",
        Append::Never,
    );
    builder.set_children(simple, vec![GrammarItem::Single(simple)]);
    let links = add_link_elements(&mut builder, &mut options);
    builder.set_children(
        links.link,
        vec![GrammarItem::Single(links.img), GrammarItem::Single(simple)],
    );

    let inline = vec![
        GrammarItem::Single(no_wiki),
        GrammarItem::Single(links.img),
        GrammarItem::Single(links.link),
        GrammarItem::Single(br),
        GrammarItem::Single(links.raw_link),
        GrammarItem::Single(simple),
    ];

    let blocks = add_block_elements(&mut builder, &inline, br, simple, links, None);
    let block = vec![
        GrammarItem::Single(blocks.pre),
        GrammarItem::Single(blocks.blank),
        GrammarItem::Single(blocks.table),
        GrammarItem::Single(blocks.heading),
        GrammarItem::Single(blocks.hr),
        GrammarItem::Single(blocks.ul),
        GrammarItem::Single(blocks.ol),
        GrammarItem::Single(blocks.p),
    ];

    builder.build(block, inline, None, options.check_uri)
}

/// The Creole 1.0 grammar plus the common additions: `##`/`^^`/`,,`/`__`
/// tokens, definition lists, and macros.
pub fn creole11_base(mut options: DialectOptions) -> Dialect {
    let mut builder = DialectBuilder::new();

    let no_wiki_tag = if options.no_wiki_monospace { "tt" } else { "span" };
    let no_wiki = builder.add(ElementKind::NoWiki, no_wiki_tag, Append::Never);
    let br = builder.add(
        ElementKind::LineBreak {
            blog_style: options.blog_style_endings,
        },
        "br",
        Append::Never,
    );
    let simple = builder.add(
        ElementKind::Simple {
            tokens: vec![
                ("**", "strong"),
                ("//", "em"),
                ("##", "code"),
                ("^^", "sup"),
                (",,", "sub"),
                ("__", "u"),
            ],
        },
        "",
        Append::Never,
    );
    builder.set_children(simple, vec![GrammarItem::Single(simple)]);
    let links = add_link_elements(&mut builder, &mut options);
    builder.set_children(
        links.link,
        vec![GrammarItem::Single(links.img), GrammarItem::Single(simple)],
    );

    let macro_el = builder.add(ElementKind::Macro { block: false }, "", Append::Never);
    let bodied_macro = builder.add(ElementKind::BodiedMacro { block: false }, "", Append::Never);
    let block_macro = builder.add(ElementKind::Macro { block: true }, "", Append::Always);
    let bodied_block_macro =
        builder.add(ElementKind::BodiedMacro { block: true }, "", Append::Always);

    let inline_macros = GrammarItem::Group(vec![no_wiki, bodied_macro, macro_el]);
    let inline = vec![
        inline_macros.clone(),
        GrammarItem::Single(links.img),
        GrammarItem::Single(links.link),
        GrammarItem::Single(br),
        GrammarItem::Single(links.raw_link),
        GrammarItem::Single(simple),
    ];

    let img = links.img;
    let link = links.link;
    let raw_link = links.raw_link;
    let blocks =
        add_block_elements(&mut builder, &inline, br, simple, links, Some(&inline_macros));

    // definition lists
    let dt = builder.add(ElementKind::DefinitionTerm, "dt", Append::Always);
    let dd = builder.add(ElementKind::DefinitionDef, "dd", Append::Always);
    let cell_inline = vec![
        GrammarItem::Single(br),
        GrammarItem::Single(raw_link),
        GrammarItem::Single(simple),
    ];
    builder.set_children(dt, cell_inline.clone());
    builder.set_children(dd, cell_inline);
    let dl = builder.add(
        ElementKind::List {
            token: ';',
            stops: "*#",
        },
        "dl",
        Append::Always,
    );
    builder.set_children(
        dl,
        vec![
            inline_macros.clone(),
            GrammarItem::Single(img),
            GrammarItem::Single(link),
            GrammarItem::Single(dt),
            GrammarItem::Single(dd),
        ],
    );

    let block = vec![
        GrammarItem::Group(vec![bodied_block_macro, blocks.pre, block_macro]),
        GrammarItem::Single(blocks.blank),
        GrammarItem::Single(blocks.table),
        GrammarItem::Single(blocks.heading),
        GrammarItem::Single(blocks.hr),
        GrammarItem::Single(dl),
        GrammarItem::Single(blocks.ul),
        GrammarItem::Single(blocks.ol),
        GrammarItem::Single(blocks.p),
    ];

    builder.build(block, inline, options.macro_func.take(), options.check_uri)
}

struct BlockParts {
    pre: ElementId,
    blank: ElementId,
    table: ElementId,
    heading: ElementId,
    hr: ElementId,
    ul: ElementId,
    ol: ElementId,
    p: ElementId,
}

fn add_block_elements(
    builder: &mut DialectBuilder,
    inline: &[GrammarItem],
    br: ElementId,
    simple: ElementId,
    links: LinkParts,
    macros: Option<&GrammarItem>,
) -> BlockParts {
    let pre = builder.add(ElementKind::PreBlock, "pre", Append::Always);
    let blank = builder.add(ElementKind::BlankLine, "", Append::Never);
    let hr = builder.add(ElementKind::Lone, "hr", Append::Always);

    let heading = builder.add(ElementKind::Heading, "h", Append::Always);
    builder.set_children(heading, inline.to_vec());
    let p = builder.add(ElementKind::Paragraph, "p", Append::Always);
    builder.set_children(p, inline.to_vec());

    // cells and their row
    let cell_inline = vec![
        GrammarItem::Single(br),
        GrammarItem::Single(links.raw_link),
        GrammarItem::Single(simple),
    ];
    let th = builder.add(ElementKind::TableCell { header: true }, "th", Append::Never);
    let td = builder.add(ElementKind::TableCell { header: false }, "td", Append::Never);
    builder.set_children(th, cell_inline.clone());
    builder.set_children(td, cell_inline);
    let tr = builder.add(ElementKind::TableRow, "tr", Append::Always);
    let mut tr_children = Vec::new();
    if let Some(macros) = macros {
        tr_children.push(macros.clone());
    }
    tr_children.push(GrammarItem::Single(links.img));
    tr_children.push(GrammarItem::Single(links.link));
    tr_children.push(GrammarItem::Single(th));
    tr_children.push(GrammarItem::Single(td));
    builder.set_children(tr, tr_children);
    let table = builder.add(ElementKind::Table, "table", Append::Always);
    builder.set_children(table, vec![GrammarItem::Single(tr)]);

    // lists
    let li = builder.add(ElementKind::ListItem, "li", Append::WhenFollowed);
    let nested_ul = builder.add(ElementKind::NestedList { token: '*' }, "ul", Append::Never);
    let nested_ol = builder.add(ElementKind::NestedList { token: '#' }, "ol", Append::Never);
    builder.set_children(nested_ul, vec![GrammarItem::Single(li)]);
    builder.set_children(nested_ol, vec![GrammarItem::Single(li)]);
    let mut li_children = vec![GrammarItem::Group(vec![nested_ol, nested_ul])];
    li_children.extend(inline.iter().cloned());
    builder.set_children(li, li_children);
    let ul = builder.add(
        ElementKind::List {
            token: '*',
            stops: "#",
        },
        "ul",
        Append::Always,
    );
    let ol = builder.add(
        ElementKind::List {
            token: '#',
            stops: "*",
        },
        "ol",
        Append::Always,
    );
    builder.set_children(ul, vec![GrammarItem::Single(li)]);
    builder.set_children(ol, vec![GrammarItem::Single(li)]);

    BlockParts {
        pre,
        blank,
        table,
        heading,
        hr,
        ul,
        ol,
        p,
    }
}

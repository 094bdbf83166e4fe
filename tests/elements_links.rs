use std::collections::HashMap;

use creole_parser::creole::dialects::{creole11_base, DialectOptions};
use creole_parser::creole::parser::Parser;
use creole_parser::creole::testing::{render11, wrap_p};

fn render_with(options: DialectOptions, text: &str) -> String {
    Parser::new(creole11_base(options)).render(text)
}

#[test]
fn explicit_url_link_with_alias() {
    assert_eq!(
        render11("[[http://www.google.com| Google]]"),
        wrap_p("<a href=\"http://www.google.com\">Google</a>")
    );
}

#[test]
fn explicit_url_link_without_alias() {
    assert_eq!(
        render11("[[http://www.google.com]]"),
        wrap_p("<a href=\"http://www.google.com\">http://www.google.com</a>")
    );
}

#[test]
fn wiki_link_replaces_spaces_and_encodes() {
    assert_eq!(
        render11("[[Home Page]]"),
        wrap_p("<a href=\"Home_Page\">Home Page</a>")
    );
    let options = DialectOptions {
        wiki_links_base_url: "http://example.com/wiki/".to_string(),
        ..DialectOptions::default()
    };
    assert_eq!(
        render_with(options, "[[New Page|the page]]"),
        wrap_p("<a href=\"http://example.com/wiki/New_Page\">the page</a>")
    );
}

#[test]
fn wiki_link_path_and_class_funcs() {
    let options = DialectOptions {
        wiki_links_base_url: "/wiki/".to_string(),
        wiki_links_path_func: Some(Box::new(|page: &str| page.to_lowercase())),
        wiki_links_class_func: Some(Box::new(|page: &str| {
            if page == "New_Page" {
                Some("nonexistent".to_string())
            } else {
                None
            }
        })),
        ..DialectOptions::default()
    };
    assert_eq!(
        render_with(options, "[[New Page]]"),
        wrap_p("<a class=\"nonexistent\" href=\"/wiki/new_page\">New Page</a>")
    );
}

#[test]
fn interwiki_link_joins_base_url() {
    let mut base_urls = HashMap::new();
    base_urls.insert("Ohana".to_string(), "http://wikiohana.net/cgi-bin".to_string());
    let options = DialectOptions {
        interwiki_links_base_urls: base_urls,
        ..DialectOptions::default()
    };
    assert_eq!(
        render_with(options, "[[Ohana:Wiki Family]]"),
        wrap_p("<a href=\"http://wikiohana.net/cgi-bin/Wiki_Family\">Ohana:Wiki Family</a>")
    );
}

#[test]
fn wiki_page_with_doubled_spaces_is_literal() {
    assert_eq!(render11("[[foo  bar]]"), wrap_p("[[foo  bar]]"));
}

#[test]
fn interwiki_link_with_unknown_wiki_is_literal() {
    assert_eq!(render11("[[Nowhere:Some Page]]"), wrap_p("[[Nowhere:Some Page]]"));
}

#[test]
fn unsafe_uri_link_is_literal() {
    assert_eq!(
        render11("[[javascript:alert()|click]]"),
        wrap_p("[[javascript:alert()|click]]")
    );
}

#[test]
fn link_must_close_on_the_same_line() {
    // the bracket pair does not match, so the bare URL inside is picked
    // up by the raw link element instead
    assert_eq!(
        render11("[[http://example.com\nbroken]]"),
        wrap_p("[[<a href=\"http://example.com\">http://example.com</a>\nbroken]]")
    );
}

#[test]
fn raw_link_in_running_text() {
    assert_eq!(
        render11("see http://www.example.com/a for more"),
        wrap_p("see <a href=\"http://www.example.com/a\">http://www.example.com/a</a> for more")
    );
}

#[test]
fn raw_link_drops_trailing_punctuation() {
    assert_eq!(
        render11("go to http://example.com/x."),
        wrap_p("go to <a href=\"http://example.com/x\">http://example.com/x</a>.")
    );
}

#[test]
fn tilde_makes_a_raw_link_literal() {
    assert_eq!(
        render11("plain ~http://example.com text"),
        wrap_p("plain http://example.com text")
    );
}

#[test]
fn image_with_and_without_alt() {
    assert_eq!(
        render11("{{campfire.jpg|Camp fire}}"),
        wrap_p("<img src=\"campfire.jpg\" alt=\"Camp fire\" />")
    );
    assert_eq!(
        render11("{{campfire.jpg}}"),
        wrap_p("<img src=\"campfire.jpg\" alt=\"campfire.jpg\" />")
    );
}

#[test]
fn image_src_with_spaces_is_rejected() {
    assert_eq!(
        render11("{{two words.jpg|alt}}"),
        wrap_p("<span>Bad Image src</span>")
    );
}

#[test]
fn unsafe_image_src_is_neutralized() {
    assert_eq!(
        render11("{{javascript:alert()|x}}"),
        wrap_p("<img src=\"unsafe_uri_detected\" alt=\"unsafe_uri_detected\" />")
    );
}

#[test]
fn image_inside_a_link_alias() {
    assert_eq!(
        render11("[[http://example.com|{{icon.png|icon}}]]"),
        wrap_p("<a href=\"http://example.com\"><img src=\"icon.png\" alt=\"icon\" /></a>")
    );
}

#[test]
fn wiki_page_with_special_characters_is_encoded() {
    assert_eq!(
        render11("[[a+b]]"),
        wrap_p("<a href=\"a%2Bb\">a+b</a>")
    );
}

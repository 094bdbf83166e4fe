use std::any::Any;

use creole_parser::creole::dialects::{creole11_base, DialectOptions};
use creole_parser::creole::fragment::{Fragment, Node};
use creole_parser::creole::grammar::{MacroFunc, MacroResult};
use creole_parser::creole::parser::Parser;
use creole_parser::creole::testing::{render11, wrap_p};

fn demo_macros() -> MacroFunc {
    Box::new(
        |name: &str, arg: &str, body: Option<&str>, _is_block: bool, environ: &dyn Any| {
            match name {
                // wiki markup back into the parser
                "strong" => Some(MacroResult::Text(format!("**{}**", arg.trim()))),
                "rule" => Some(MacroResult::Text("----\n".to_string())),
                "shout" => body.map(|b| MacroResult::Text(b.to_uppercase())),
                // ready-made fragments
                "smile" => Some(MacroResult::Fragments(vec![Fragment::Node(
                    Node::new("img")
                        .with_attr("src", "smile.png")
                        .with_attr("alt", ":-)"),
                )])),
                "quote" => body.map(|b| {
                    MacroResult::Fragments(vec![Fragment::Node(
                        Node::new("blockquote").with_text(b.trim()),
                    )])
                }),
                "term" => Some(MacroResult::Fragments(vec![Fragment::Node(
                    Node::new("var").with_text(arg.trim()),
                )])),
                "greet" => {
                    let who = environ
                        .downcast_ref::<String>()
                        .map(String::as_str)
                        .unwrap_or("nobody");
                    Some(MacroResult::Text(format!("Hello {}\n", who)))
                }
                _ => None,
            }
        },
    )
}

fn parser() -> Parser {
    let options = DialectOptions {
        macro_func: Some(demo_macros()),
        ..DialectOptions::default()
    };
    Parser::new(creole11_base(options))
}

#[test]
fn macro_markup_result_is_reparsed() {
    assert_eq!(parser().render("one <<strong two>> three"), wrap_p("one <strong>two</strong> three"));
}

#[test]
fn block_macro_markup_splices_into_the_document() {
    assert_eq!(
        parser().render("one\n<<rule>>\ntwo"),
        "<p>one</p>\n<hr />\n<p>two</p>\n"
    );
}

#[test]
fn indented_macro_is_inline_not_block() {
    // not at column zero, so it reaches the parser inside a paragraph
    assert_eq!(parser().render(" <<strong x>>"), wrap_p(" <strong>x</strong>"));
}

#[test]
fn bodied_macro_receives_its_body() {
    assert_eq!(parser().render("say <<shout>>hi there<</shout>>!"), wrap_p("say HI THERE!"));
}

#[test]
fn block_bodied_macro_body_spans_lines() {
    assert_eq!(
        parser().render("<<shout>>\n= title =\n<</shout>>"),
        "<h1>TITLE</h1>\n"
    );
}

#[test]
fn inline_fragment_result_is_frozen() {
    assert_eq!(
        parser().render("a <<smile>> b"),
        wrap_p("a <img src=\"smile.png\" alt=\":-)\" /> b")
    );
}

#[test]
fn block_fragment_result_with_inline_tags_gets_a_paragraph() {
    assert_eq!(parser().render("<<smile>>"), wrap_p("<img src=\"smile.png\" alt=\":-)\" />"));
}

#[test]
fn block_fragment_result_with_var_tag_gets_a_paragraph() {
    assert_eq!(parser().render("<<term x>>"), wrap_p("<var>x</var>"));
}

#[test]
fn stray_same_name_open_inside_a_body_stays_literal() {
    assert_eq!(
        parser().render("say <<shout>>use <<shout here<</shout>>!"),
        wrap_p("say USE &lt;&lt;SHOUT HERE!")
    );
}

#[test]
fn block_fragment_result_with_block_tags_stands_alone() {
    assert_eq!(
        parser().render("<<quote>>\nwise words\n<</quote>>"),
        "<blockquote>wise words</blockquote>"
    );
}

#[test]
fn unknown_inline_macro_renders_as_code() {
    assert_eq!(
        parser().render("a <<mystery>> b"),
        wrap_p("a <code class=\"unknown_macro\">&lt;&lt;mystery&gt;&gt;</code> b")
    );
}

#[test]
fn unknown_block_macro_renders_as_pre() {
    assert_eq!(
        parser().render("<<mystery>>"),
        "<pre class=\"unknown_macro\">&lt;&lt;mystery&gt;&gt;\n</pre>\n"
    );
}

#[test]
fn without_a_macro_func_every_macro_is_unknown() {
    assert_eq!(
        render11("a <<strong x>> b"),
        wrap_p("a <code class=\"unknown_macro\">&lt;&lt;strong x&gt;&gt;</code> b")
    );
}

#[test]
fn macro_arg_string_keeps_its_leading_delimiter() {
    let saw: std::sync::Arc<std::sync::Mutex<Option<String>>> =
        std::sync::Arc::new(std::sync::Mutex::new(None));
    let inner = saw.clone();
    let options = DialectOptions {
        macro_func: Some(Box::new(
            move |_name: &str, arg: &str, _body: Option<&str>, _block: bool, _env: &dyn Any| {
                *inner.lock().unwrap() = Some(arg.to_string());
                Some(MacroResult::Text(String::new()))
            },
        )),
        ..DialectOptions::default()
    };
    Parser::new(creole11_base(options)).render("<<luca boo>>");
    assert_eq!(saw.lock().unwrap().as_deref(), Some(" boo"));
}

#[test]
fn environ_reaches_the_callback() {
    let environ = "world".to_string();
    assert_eq!(
        parser().render_with("<<greet>>", &environ),
        wrap_p("Hello world")
    );
    assert_eq!(parser().render("<<greet>>"), wrap_p("Hello nobody"));
}

#[test]
fn escaped_macro_is_literal() {
    assert_eq!(parser().render("~<<strong x>>"), wrap_p("&lt;&lt;strong x&gt;&gt;"));
}

#[test]
fn dotted_macro_names_parse() {
    assert_eq!(
        render11("<<lib.Reverse-it now>>"),
        "<pre class=\"unknown_macro\">&lt;&lt;lib.Reverse-it now&gt;&gt;\n</pre>\n"
    );
}

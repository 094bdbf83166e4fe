use creole_parser::creole::testing::{render11, wrap_p};
use rstest::rstest;

#[rstest]
#[case("= Top =", "<h1>Top</h1>\n")]
#[case("== Sub ==", "<h2>Sub</h2>\n")]
#[case("====== Deep", "<h6>Deep</h6>\n")]
#[case("  === indented ===  ", "<h3>indented</h3>\n")]
fn headings(#[case] markup: &str, #[case] expected: &str) {
    assert_eq!(render11(markup), expected);
}

#[test]
fn heading_content_is_parsed_inline() {
    assert_eq!(
        render11("== A **strong** title =="),
        "<h2>A <strong>strong</strong> title</h2>\n"
    );
}

#[test]
fn seven_equals_is_a_paragraph() {
    assert_eq!(render11("======= nope"), wrap_p("======= nope"));
}

#[test]
fn escaped_heading_is_a_paragraph() {
    assert_eq!(render11("~= not a heading"), wrap_p("= not a heading"));
}

#[test]
fn paragraphs_split_on_blank_lines() {
    assert_eq!(
        render11("para one\ncontinued\n\npara two\n"),
        "<p>para one\ncontinued</p>\n<p>para two</p>\n"
    );
}

#[test]
fn text_before_a_block_match_becomes_its_own_block() {
    assert_eq!(
        render11("intro text\n== section ==\nbody"),
        "<p>intro text</p>\n<h2>section</h2>\n<p>body</p>\n"
    );
}

#[test]
fn horizontal_rule() {
    assert_eq!(render11("before\n----\nafter"), "<p>before</p>\n<hr />\n<p>after</p>\n");
}

#[test]
fn pre_block_keeps_content_verbatim() {
    assert_eq!(
        render11("{{{\n** no markup **\n~| no escapes\n}}}"),
        "<pre>** no markup **\n~| no escapes\n</pre>\n"
    );
}

#[test]
fn pre_block_fences_must_sit_at_column_zero() {
    assert_eq!(
        render11(" {{{\nnot a pre block"),
        wrap_p(" {{{\nnot a pre block")
    );
}

#[test]
fn pre_block_close_fence_can_be_space_escaped() {
    assert_eq!(
        render11("{{{\ninner\n }}}\n}}}"),
        "<pre>inner\n}}}\n</pre>\n"
    );
}

#[test]
fn blank_lines_produce_nothing() {
    assert_eq!(render11("\n\n  \n"), "");
}

#[test]
fn crlf_and_cr_documents_normalize() {
    assert_eq!(
        render11("= Title =\r\n\r\nbody\r"),
        "<h1>Title</h1>\n<p>body</p>\n"
    );
}

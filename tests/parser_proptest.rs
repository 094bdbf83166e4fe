use proptest::prelude::*;

use creole_parser::creole::testing::{render10, render11};

proptest! {
    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,200}") {
        render11(&text);
        render10(&text);
    }

    #[test]
    fn token_soup_never_panics(pieces in prop::collection::vec(prop_oneof![
        Just("**"), Just("//"), Just("##"), Just("^^"), Just(",,"), Just("__"),
        Just("{{{"), Just("}}}"), Just("{{"), Just("}}"),
        Just("[["), Just("]]"), Just("|"), Just("|="),
        Just("~"), Just("\n"), Just("\\\\"),
        Just("* "), Just("# "), Just("; "), Just(": "),
        Just("= "), Just("----"), Just("<<"), Just(">>"), Just("<</"),
        Just("http://x.y"), Just("word"), Just("é"), Just(" "),
    ], 0..48)) {
        let text: String = pieces.concat();
        render11(&text);
    }

    #[test]
    fn paragraph_tags_stay_balanced(text in "[a-zA-Z .,]{0,120}") {
        let html = render11(&text);
        prop_assert_eq!(html.matches("<p>").count(), html.matches("</p>").count());
    }

    #[test]
    fn rendering_is_deterministic(text in "\\PC{0,120}") {
        prop_assert_eq!(render11(&text), render11(&text));
    }
}

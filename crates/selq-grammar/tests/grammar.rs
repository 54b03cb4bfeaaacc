//! Integration tests for grammar compilation and tokenizing.
#![expect(clippy::expect_used, reason = "tests assert compile and tokenize paths")]

use selq_grammar::{
    Grammar, GrammarBuilder, GrammarError, Rule, SelectorKind, TokenizeError, TokenizeMode,
    Tokenizer,
};

#[test]
fn standard_grammar_smoke_test() {
    let grammar = Grammar::standard().expect("standard grammar should compile");
    assert_eq!(grammar.fragments().len(), Rule::ALL.len());
    assert!(grammar.scanner().as_str().starts_with("(?P<name_and_id>"));
}

#[test]
fn every_supported_rule_round_trips_through_the_tokenizer() {
    let grammar = Grammar::standard().expect("standard grammar should compile");
    let tokenizer = Tokenizer::new(&grammar).with_mode(TokenizeMode::Strict);
    let samples = [
        (SelectorKind::NameAndId, "form#login"),
        (SelectorKind::Id, "#login"),
        (SelectorKind::Class, ".btn-primary"),
        (SelectorKind::NameAndClass, "a.btn-primary"),
        (SelectorKind::Name, "article"),
    ];
    for (kind, text) in samples {
        let tokens = tokenizer.tokenize(text).expect("sample should tokenize");
        assert_eq!(tokens.len(), 1, "{text} should be one token");
        assert_eq!(tokens.kinds(), [kind], "{text} classified wrongly");
    }
}

#[test]
fn custom_grammar_can_narrow_identifiers() {
    let grammar = GrammarBuilder::standard()
        .with_macro("ident", "[a-z]+")
        .build()
        .expect("narrowed grammar should compile");
    let tokens = Tokenizer::new(&grammar)
        .tokenize("nav UL.menu")
        .expect("lenient tokenize succeeds");
    let texts: Vec<_> = tokens.iter().map(|t| t.text().to_string()).collect();
    assert_eq!(texts, ["nav", ".menu"]);
}

#[test]
fn malformed_macro_reference_aborts_compilation() {
    let Err(err) = GrammarBuilder::standard()
        .with_macro("ident", "#{nmstart")
        .build()
    else {
        panic!("grammar should not compile");
    };
    let GrammarError::Placeholder(info) = err else {
        panic!("expected placeholder error, got {err}");
    };
    assert_eq!(info.placeholder.as_deref(), Some("nmstart"));
    assert_eq!(info.position, 0);
}

#[test]
fn tokenizer_errors_do_not_poison_the_grammar() {
    let grammar = Grammar::standard().expect("standard grammar should compile");
    let tokenizer = Tokenizer::new(&grammar);
    assert!(matches!(
        tokenizer.tokenize("li:first-child"),
        Err(TokenizeError::Unsupported(_))
    ));
    let tokens = tokenizer.tokenize("li").expect("retry succeeds");
    assert_eq!(tokens.kinds(), [SelectorKind::Name]);
}

use rearley::{parse, rules, Grammar, Parser};

#[static_init::dynamic]
static INIT_LOGGER: () = {
    let _ = env_logger::builder().format_timestamp(None).try_init();
};

#[test]
fn single_terminal() {
    let gram = Grammar::new(rules! {
        start => [ 'a' ];
    });

    assert!(parse(&gram, "a"));
    assert!(!parse(&gram, "b"));
    assert!(!parse(&gram, "aa"));
    assert!(!parse(&gram, ""));
}

#[test]
fn sequence_of_terminals() {
    let gram = Grammar::new(rules! {
        start => [ 'a' 'b' 'c' ];
    });

    assert!(parse(&gram, "abc"));
    assert!(!parse(&gram, "ab"));
    assert!(!parse(&gram, "abcc"));
}

#[test]
fn push_and_query_incrementally() {
    let gram = Grammar::new(rules! {
        start => [ 'a' 'b' ];
    });

    let mut parser = Parser::new(&gram);
    assert!(!parser.success());
    parser.push("a");
    assert!(!parser.success());
    parser.push("b");
    assert!(parser.success());

    // success() is a pure query
    assert!(parser.success());
    assert_eq!(parser.accept_count(), 1);
}

#[test]
fn nullable_start() {
    // start : 'a' | (empty)
    let gram = Grammar::new(rules! {
        start => [ 'a' ];
        start => [ ];
    });

    assert!(parse(&gram, ""));
    assert!(parse(&gram, "a"));
    assert!(!parse(&gram, "aa"));
}

#[test]
fn empty_input_without_nullable_start() {
    let gram = Grammar::new(rules! {
        start => [ 'a' ];
    });

    let parser = Parser::new(&gram);
    assert!(!parser.success());
    assert_eq!(parser.accept_count(), 0);
}

#[test]
fn unknown_token_blocks_the_parse() {
    let gram = Grammar::new(rules! {
        start => [ 'a' ];
    });

    let mut parser = Parser::new(&gram);
    parser.push("z");
    assert!(!parser.success());

    // nothing after an unknown token can recover
    parser.push("a");
    assert!(!parser.success());
}

#[test]
fn grammar_without_start_rule_rejects_everything() {
    let gram = Grammar::new(rules! {
        thing => [ 'a' ];
    });

    assert!(!parse(&gram, "a"));
    assert!(!parse(&gram, ""));
}

#[test]
fn ambiguous_input_is_rejected() {
    // "a" derives through A and through B
    let gram = Grammar::new(rules! {
        start => [ A ];
        start => [ B ];
        A     => [ 'a' ];
        B     => [ 'a' ];
    });

    let mut parser = Parser::new(&gram);
    parser.push("a");
    assert_eq!(parser.accept_count(), 2);
    assert!(!parser.success());
}

#[test]
fn nullable_mid_rule() {
    let gram = Grammar::new(rules! {
        start => [ 'a' gap 'b' ];
        gap   => [ ];
        gap   => [ 'g' ];
    });

    assert!(parse(&gram, "ab"));
    assert!(parse(&gram, "agb"));
    assert!(!parse(&gram, "a"));
    assert!(!parse(&gram, "aggb"));
}

#[test]
fn nullable_completion_is_order_independent() {
    // The empty rule completes before `start : A . gap` exists in the
    // final set; the parse must still go through.
    let gram = Grammar::new(rules! {
        start => [ A gap ];
        A     => [ 'a' gap ];
        gap   => [ ];
    });

    assert!(parse(&gram, "a"));
    assert!(!parse(&gram, ""));
}

#[test]
fn nested_nonterminals() {
    let gram = Grammar::new(rules! {
        start => [ A B ];
        A     => [ 'a' ];
        B     => [ 'b' ];
    });

    assert!(parse(&gram, "ab"));
    assert!(!parse(&gram, "a"));
    assert!(!parse(&gram, "ba"));
}

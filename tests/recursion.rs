//! Recursive grammars, and the chart-size guarantee for right recursion.

use rearley::{parse, rules, Grammar, Parser};

#[static_init::dynamic]
static INIT_LOGGER: () = {
    let _ = env_logger::builder().format_timestamp(None).try_init();
};

fn right_recursive_grammar() -> Grammar {
    Grammar::new(rules! {
        start => [ A ];
        A     => [ 'a' A ];
        A     => [ 'a' ];
    })
}

#[test]
fn left_recursion() {
    let gram = Grammar::new(rules! {
        start => [ A ];
        A     => [ A 'a' ];
        A     => [ 'a' ];
    });

    assert!(parse(&gram, "a"));
    assert!(parse(&gram, "aaaaaaaaaaa")); // 11 a's
    assert!(!parse(&gram, ""));
}

#[test]
fn right_recursion() {
    let gram = right_recursive_grammar();

    assert!(parse(&gram, "a"));
    assert!(parse(&gram, "aaaaaaaaaaaaaaaaaa")); // 18 a's
    assert!(!parse(&gram, ""));
    assert!(!parse(&gram, "aab"));
}

#[test]
fn indirect_right_recursion() {
    // A and B recurse through each other's tails
    let gram = Grammar::new(rules! {
        start => [ A ];
        A     => [ 'a' B ];
        A     => [ 'a' ];
        B     => [ 'b' A ];
    });

    assert!(parse(&gram, "a"));
    assert!(parse(&gram, "aba"));
    assert!(parse(&gram, "ababababa"));
    assert!(!parse(&gram, "ab"));
}

#[test]
fn right_recursive_chart_stays_linear() {
    let gram = right_recursive_grammar();

    let items_for = |n: usize| {
        let mut parser = Parser::new(&gram);
        for _ in 0..n {
            parser.push("a");
        }
        assert!(parser.success());
        parser.num_items()
    };

    // Doubling the input must roughly double the chart, not quadruple it.
    let at_20 = items_for(20);
    let at_40 = items_for(40);
    assert!(
        at_40 <= 2 * at_20 + 8,
        "chart is not linear: {} items at 20 tokens, {} at 40",
        at_20,
        at_40
    );

    // With the Leo collapse, every set holds a bounded handful of items:
    // the scanned pair, the fresh predictions, one trailing completion,
    // and the accept chain.
    let mut parser = Parser::new(&gram);
    for _ in 0..40 {
        parser.push("a");
    }
    for k in 0..parser.num_sets() {
        assert!(
            parser.set_len(k) <= 10,
            "set {} holds {} items",
            k,
            parser.set_len(k)
        );
    }
}

#[test]
fn nested_parentheses() {
    // Center-embedding, neither purely left- nor right-recursive
    let gram = Grammar::new(rules! {
        start => [ P ];
        P     => [ '(' P ')' ];
        P     => [ ];
    });

    assert!(parse(&gram, ""));
    assert!(parse(&gram, "()"));
    assert!(parse(&gram, "((()))"));
    assert!(!parse(&gram, "(()"));
    assert!(!parse(&gram, ")("));
}

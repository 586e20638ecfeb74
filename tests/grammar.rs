//! Grammar construction: interning, the closure matrices, and the
//! determinism guarantees the recognizer relies on.

use rearley::grammar::ACCEPT_NAME;
use rearley::util::Bitmat;
use rearley::warshall::{reflexive_transitive_closure, transitive_closure};
use rearley::{parse, rules, Grammar, RuleDef};

#[static_init::dynamic]
static INIT_LOGGER: () = {
    let _ = env_logger::builder().format_timestamp(None).try_init();
};

fn sample_rules() -> Vec<RuleDef> {
    rules! {
        start => [ A ];
        A     => [ 'a' A ];
        A     => [ 'a' ];
        A     => [ B ];
        B     => [ 'b' ];
    }
}

#[test]
fn warshall_closure() {
    let mut m = Bitmat::new(4, 4);
    m.set(0, 1);
    m.set(1, 2);
    transitive_closure(&mut m);

    assert!(m.get(0, 2));
    assert!(!m.get(2, 0));
    assert!(!m.get(0, 0));
    assert!(!m.get(0, 3));

    let mut r = Bitmat::new(4, 4);
    r.set(0, 1);
    reflexive_transitive_closure(&mut r);
    for i in 0..4 {
        assert!(r.get(i, i));
    }
    assert!(r.get(0, 1));
}

#[test]
fn accept_rule_is_appended() {
    let gram = Grammar::new(sample_rules());

    // five input rules plus the synthetic one
    assert_eq!(gram.nrules, 6);
    assert_eq!(gram.accept_rule.index(), 5);
    assert_eq!(gram.name(gram.rlhs(gram.accept_rule)), ACCEPT_NAME);

    let rhs = gram.rule_rhs(gram.accept_rule);
    assert_eq!(rhs.len(), 1);
    assert_eq!(gram.name(rhs[0]), "start");
}

#[test]
fn symbols_are_interned_once() {
    let gram = Grammar::new(sample_rules());

    let a_sym = gram.symbol_of("A").unwrap();
    assert!(!gram.is_terminal(a_sym));
    let lit = gram.symbol_of("a").unwrap();
    assert!(gram.is_terminal(lit));
    assert_ne!(a_sym, lit);

    assert_eq!(gram.symbol_of("zebra"), None);

    // ids are stable across the whole table
    for s in gram.iter_syms() {
        assert_eq!(gram.symbol_of(gram.name(s)), Some(s));
    }
}

#[test]
fn by_symbol_indexes_every_rule() {
    let gram = Grammar::new(sample_rules());

    for rule in gram.iter_rules() {
        let lhs = gram.rlhs(rule);
        assert!(gram.by_symbol.values(lhs).contains(&rule));
    }
    assert_eq!(gram.by_symbol.num_values(), gram.nrules);
}

#[test]
fn closure_matrices_are_transitively_closed() {
    let gram = Grammar::new(sample_rules());
    let n = gram.nsyms;

    for m in [&gram.sympred, &gram.right_recursion] {
        for a in 0..n {
            for b in 0..n {
                if !m.get(a, b) {
                    continue;
                }
                for c in 0..n {
                    if m.get(b, c) {
                        assert!(m.get(a, c), "closure missing ({}, {})", a, c);
                    }
                }
            }
        }
    }

    // sympred is reflexive as well
    for s in 0..n {
        assert!(gram.sympred.get(s, s));
    }
}

#[test]
fn predictions_are_sorted_and_deduplicated() {
    let gram = Grammar::new(sample_rules());

    for s in gram.iter_syms() {
        let row = gram.predictions_for_symbols.values(s);
        for pair in row.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        // a non-terminal's own rules are always in its row
        for &rule in gram.by_symbol.values(s) {
            assert!(row.contains(&rule));
        }
    }
}

#[test]
fn rebuilding_recognizes_the_same_language() {
    let g1 = Grammar::new(sample_rules());
    let g2 = Grammar::new(sample_rules());

    for input in ["", "a", "b", "ab", "aa", "aab", "aaab", "ba"] {
        assert_eq!(parse(&g1, input), parse(&g2, input), "input {:?}", input);
    }
}

#[test]
fn parsing_is_deterministic() {
    let gram = Grammar::new(sample_rules());

    for input in ["", "a", "aaab", "zebra"] {
        let first = parse(&gram, input);
        for _ in 0..3 {
            assert_eq!(parse(&gram, input), first, "input {:?}", input);
        }
    }
}

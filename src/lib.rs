//! # REARLEY -- a general context-free recognizer
//!
//! This crate implements recognition for arbitrary context-free grammars, using the
//! Earley algorithm.  Two refinements keep it practical: prediction closures are
//! precomputed over bit matrices when the grammar is built (in the style of Aycock
//! and Horspool), and right-recursive reduction chains are collapsed into single
//! "transitive" chart items (Joop Leo's optimization), so right-recursive grammars
//! cost linear rather than quadratic chart space.
//!
//! # How to use it
//!
//! A grammar is a list of rules.  Each rule has a left-hand-side name and a
//! right-hand side mixing references to other rules with terminal literals.
//! The rule named `start` is the goal; recognition succeeds when the whole
//! input derives from `start`.
//!
//! ```
//! use rearley::{rules, Grammar, Parser};
//!
//! // start : A
//! // A : 'a' A | 'a'        (right-recursive; exercises the Leo machinery)
//! let gram = Grammar::new(rules! {
//!     start => [ A ];
//!     A     => [ 'a' A ];
//!     A     => [ 'a' ];
//! });
//!
//! let mut parser = Parser::new(&gram);
//! for _ in 0..18 {
//!     parser.push("a");
//! }
//! assert!(parser.success());
//! ```
//!
//! Or, when each character of a string is one token:
//!
//! ```
//! # use rearley::{rules, Grammar};
//! # let gram = Grammar::new(rules! {
//! #     start => [ A ];
//! #     A     => [ 'a' A ];
//! #     A     => [ 'a' ];
//! # });
//! assert!(rearley::parse(&gram, "aaaa"));
//! assert!(!rearley::parse(&gram, "aab"));
//! ```
//!
//! ## The parser model
//!
//! `Grammar::new` runs the whole precomputation pipeline: it interns symbol names
//! to integer ids, indexes rules by left-hand side, and computes the transitive
//! closure matrices that drive prediction and the Leo right-recursion test.  The
//! resulting `Grammar` is immutable and can be shared by any number of parsers,
//! including parsers on other threads.
//!
//! A `Parser` borrows a grammar and consumes one token stream.  The control flow
//! is inverted, in the same way as a push-model parser runtime: the application
//! calls `push(token)` once per token, and each call runs the recognizer to a
//! fixed point for that position before returning.  `success()` may be called at
//! any time and reports whether the tokens pushed so far form a sentence of the
//! grammar.  An ambiguous parse (more than one accepting derivation match in the
//! final chart position) is reported as failure; `accept_count()` exposes the raw
//! match count so an application can choose a different policy.
//!
//! There are no semantic actions and no parse trees; this is a recognizer.
//! Tokenization is also out of scope: tokens arrive already atomic, and are
//! matched against terminal literals by name.

#![warn(rust_2018_idioms)]

pub mod chart;
pub mod grammar;
pub mod parser;
pub mod ramp_table;
pub mod tvec;
pub mod util;
pub mod warshall;

pub use chart::{Item, ItemKind};
pub use grammar::{Grammar, RuleDef, Term};
pub use parser::{parse, Parser};

macro_rules! int_alias {
    (type $name:ident = $int:ty;) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
        pub struct $name(pub $int);

        impl $name {
            pub fn index(&self) -> usize {
                self.0 as usize
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, fmt)
            }
        }

        impl core::convert::From<$name> for usize {
            fn from(i: $name) -> usize {
                i.0 as usize
            }
        }

        impl core::convert::From<usize> for $name {
            fn from(i: usize) -> $name {
                $name(i as $int)
            }
        }
    };
}

// Type aliases
int_alias! {type Symbol = i16;}
int_alias! {type Rule = i16;}

/// Builds a `Vec<RuleDef>` from a declarative rule list.
///
/// Identifiers on a right-hand side are references to other rules; `char` or
/// string literals are terminals.  An empty right-hand side (`[ ]`) makes the
/// rule nullable.
///
/// ```
/// use rearley::rules;
///
/// let defs = rules! {
///     start => [ list ];
///     list  => [ item ',' list ];
///     list  => [ item ];
///     item  => [ 'x' ];
/// };
/// assert_eq!(defs.len(), 4);
/// ```
#[macro_export]
macro_rules! rules {
    ( $( $lhs:ident => [ $( $elem:tt )* ] ; )* ) => {
        vec![
            $(
                $crate::grammar::RuleDef::new(
                    stringify!($lhs),
                    vec![ $( $crate::rhs_term!($elem) ),* ],
                )
            ),*
        ]
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! rhs_term {
    ( $name:ident ) => {
        $crate::grammar::Term::nonterm(stringify!($name))
    };
    ( $lit:literal ) => {
        $crate::grammar::Term::terminal($lit)
    };
}

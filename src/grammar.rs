//! Builds a `Grammar` from a list of symbolic rule definitions.
//!
//! This module reads the caller's rules and produces the numbered form that the
//! recognizer runs on.  It builds a symbol table (names), which names both
//! terminals and the variables of the defined grammar, assigning each distinct
//! name a small-integer `Symbol` id in first-seen order.  Each rule's
//! right-hand side is rewritten from names to ids, and the rules themselves are
//! numbered in input order.
//!
//! After numbering, the module computes the tables that drive the hot path:
//!
//! * `by_symbol`, mapping each symbol to the rules it derives;
//! * `sympred`, the reflexive transitive closure over "predicting `a` predicts
//!   the rules of `b`", as a symbol-by-symbol bit matrix;
//! * `predictions_for_symbols`, the realized per-symbol rule lists read off
//!   `sympred`, which is what the parser actually iterates when predicting;
//! * `right_recursion`, the transitive closure over "some rule of `lhs` ends in
//!   symbol `s`", which decides Leo eligibility during completion.
//!
//! A `Grammar` is immutable once constructed and can be shared by any number of
//! parsers.

use crate::ramp_table::{RampTable, RampTableBuilder};
use crate::tvec::TVec;
use crate::util::Bitmat;
use crate::warshall::{reflexive_transitive_closure, transitive_closure};
use crate::{Rule, Symbol};
use log::{debug, warn};
use std::collections::HashMap;

/// The reserved left-hand-side name of the synthetic accept rule.
pub const ACCEPT_NAME: &str = "_accept";

/// The left-hand-side name of the goal rule.
pub const START_NAME: &str = "start";

/// One element of a rule's right-hand side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    /// A reference to some rule's left-hand side.
    Ref(String),
    /// A literal, matched by name against input tokens.
    Terminal(String),
}

impl Term {
    pub fn nonterm(name: &str) -> Term {
        Term::Ref(name.to_string())
    }

    pub fn terminal(lit: impl ToString) -> Term {
        Term::Terminal(lit.to_string())
    }

    fn name(&self) -> &str {
        match self {
            Term::Ref(s) => s,
            Term::Terminal(s) => s,
        }
    }
}

/// A production, as supplied by the caller.
#[derive(Clone, Debug)]
pub struct RuleDef {
    pub lhs: String,
    pub rhs: Vec<Term>,
}

impl RuleDef {
    pub fn new(lhs: &str, rhs: Vec<Term>) -> RuleDef {
        RuleDef {
            lhs: lhs.to_string(),
            rhs,
        }
    }
}

// Defines a grammar.  A grammar has these elements:
//
//     * a set of symbols, each having a name.  A symbol is a terminal if it
//       never appears as the lhs of any rule; terminals are matched by name
//       against input tokens.
//     * a set of rules, in the form A : B C ... , where A is a variable and
//       B and C are any combination of terminals or variables.  A rule's rhs
//       may be empty, which makes the rule nullable.
//     * the tables computed from the rules (see the module docs).
//
// All fields are exposed; the grammar is immutable after construction.
pub struct Grammar {
    pub nsyms: usize,
    pub nrules: usize,

    /// Symbol -> name; len = nsyms
    pub name: TVec<Symbol, String>,

    /// Symbol -> true iff the symbol appears as no rule's lhs; len = nsyms
    pub terminal: TVec<Symbol, bool>,

    /// Symbol -> true iff the symbol can derive the empty string; len = nsyms
    pub nullable: TVec<Symbol, bool>,

    /// name -> Symbol
    symbol_ids: HashMap<String, Symbol>,

    /// Rule -> lhs symbol; len = nrules
    pub rlhs: Vec<Symbol>,

    /// Rule -> rhs symbols, in order; len = nrules
    pub rrhs: Vec<Vec<Symbol>>,

    /// The synthetic `_accept : start` rule, always the last rule.
    pub accept_rule: Rule,

    /// Symbol -> [Rule]: the rules whose lhs is the symbol.
    pub by_symbol: RampTable<Rule>,

    /// nsyms x nsyms.  `sympred[a][b]` = 1 iff an item expecting symbol `a`
    /// could transitively require beginning a rule whose lhs is `b`.
    /// Reflexive and transitively closed.
    pub sympred: Bitmat,

    /// Symbol -> [Rule]: the rules that must be added to a chart position when
    /// the symbol is predicted there.  Row `s` realizes `by_symbol` over row
    /// `s` of `sympred`, sorted and deduplicated.
    pub predictions_for_symbols: RampTable<Rule>,

    /// nsyms x nsyms.  `right_recursion[lhs][s]` = 1 iff rules with that lhs
    /// can, through a chain of rules each taken at its rightmost symbol, reach
    /// a rule ending in `s`.  Transitively closed, not reflexive.
    pub right_recursion: Bitmat,
}

impl Grammar {
    /// Processes the rule list into an immutable grammar.
    ///
    /// The synthetic rule `_accept : start` is appended and recorded; callers
    /// must not use the reserved name `_accept`.  A grammar with no `start`
    /// rule is permitted, and rejects every input.
    pub fn new(defs: Vec<RuleDef>) -> Grammar {
        let mut defs = defs;

        if defs.iter().any(|def| def.lhs == ACCEPT_NAME) {
            warn!(
                "a rule is named `{}`, which is reserved for the accept rule",
                ACCEPT_NAME
            );
        }

        // The accept rule goes last; its id is how success is defined.
        defs.push(RuleDef::new(ACCEPT_NAME, vec![Term::nonterm(START_NAME)]));
        let accept_rule: Rule = (defs.len() - 1).into();

        // Census: assign each newly seen name a fresh id, and rewrite every
        // rule in numeric form.
        let mut symbol_ids: HashMap<String, Symbol> = HashMap::new();
        let mut name: TVec<Symbol, String> = TVec::new();
        let mut rlhs: Vec<Symbol> = Vec::with_capacity(defs.len());
        let mut rrhs: Vec<Vec<Symbol>> = Vec::with_capacity(defs.len());

        for def in &defs {
            let lhs = intern(&mut symbol_ids, &mut name, &def.lhs);
            let rhs: Vec<Symbol> = def
                .rhs
                .iter()
                .map(|term| intern(&mut symbol_ids, &mut name, term.name()))
                .collect();
            rlhs.push(lhs);
            rrhs.push(rhs);
        }

        let nsyms = name.len();
        let nrules = rlhs.len();
        assert!(nsyms <= i16::MAX as usize);
        assert!(nrules <= i16::MAX as usize);

        // A terminal is a symbol that no rule derives.
        let mut terminal: TVec<Symbol, bool> = TVec::from_vec(vec![true; nsyms]);
        for &lhs in rlhs.iter() {
            terminal[lhs] = false;
        }

        let nullable = set_nullable(nsyms, &rlhs, &rrhs);
        let by_symbol = set_by_symbol(nsyms, &rlhs);
        let sympred = set_sympred(nsyms, &rlhs, &rrhs);
        let predictions_for_symbols = set_predictions(nsyms, &sympred, &by_symbol);
        let right_recursion = set_right_recursion(nsyms, &rlhs, &rrhs);

        let gram = Grammar {
            nsyms,
            nrules,
            name,
            terminal,
            nullable,
            symbol_ids,
            rlhs,
            rrhs,
            accept_rule,
            by_symbol,
            sympred,
            predictions_for_symbols,
            right_recursion,
        };

        gram.print_nullable();
        gram.print_by_symbol();
        gram.print_sympred();
        gram.print_predictions();
        gram.print_right_recursion();
        gram
    }

    /// Looks up the symbol id for a name.  Input tokens whose literal has no
    /// id are unknown to the grammar and match nothing.
    pub fn symbol_of(&self, name: &str) -> Option<Symbol> {
        self.symbol_ids.get(name).copied()
    }

    pub fn is_terminal(&self, s: Symbol) -> bool {
        self.terminal[s]
    }

    pub fn name(&self, s: Symbol) -> &str {
        &self.name[s]
    }

    pub fn rlhs(&self, rule: Rule) -> Symbol {
        self.rlhs[rule.index()]
    }

    pub fn rule_rhs(&self, rule: Rule) -> &[Symbol] {
        &self.rrhs[rule.index()]
    }

    pub fn rhs_len(&self, rule: Rule) -> usize {
        self.rrhs[rule.index()].len()
    }

    pub fn iter_rules(&self) -> impl Iterator<Item = Rule> {
        (0..self.nrules).map(Rule::from)
    }

    pub fn iter_syms(&self) -> impl Iterator<Item = Symbol> {
        (0..self.nsyms).map(Symbol::from)
    }

    /// True iff the rule can participate in a Leo chain: its rightmost symbol
    /// is its own lhs, or reaches back to its lhs through a chain of
    /// rightmost symbols.
    pub fn is_right_recursive(&self, rule: Rule) -> bool {
        let lhs = self.rlhs(rule);
        match self.rule_rhs(rule).last() {
            None => false,
            Some(&last) => {
                last == lhs || self.right_recursion.get(last.index(), lhs.index())
            }
        }
    }

    pub fn rule_to_str(&self, r: Rule) -> String {
        let mut s = String::new();
        s.push_str(&format!("(r{}) {} :", r, self.name(self.rlhs(r))));
        for &sym in self.rule_rhs(r).iter() {
            s.push_str(&format!(" {}", self.name(sym)));
        }
        s
    }

    fn print_nullable(&self) {
        for s in self.iter_syms() {
            if self.nullable[s] {
                debug!("{} is nullable", self.name(s));
            }
        }
    }

    fn print_by_symbol(&self) {
        debug!("BY_SYMBOL:");
        for s in self.iter_syms() {
            if self.is_terminal(s) {
                continue;
            }
            debug!("    {} derives rules:", self.name(s));
            for &rule in self.by_symbol.values(s) {
                debug!("        {}", self.rule_to_str(rule));
            }
        }
    }

    fn print_sympred(&self) {
        debug!("SYMPRED:");
        for s in self.iter_syms() {
            debug!("    {} predicts:", self.name(s));
            for j in self.sympred.iter_ones_in_row(s.index()) {
                debug!("        {}", self.name(Symbol::from(j)));
            }
        }
    }

    fn print_predictions(&self) {
        debug!("PREDICTIONS:");
        for s in self.iter_syms() {
            debug!("    predicting {} adds:", self.name(s));
            for &rule in self.predictions_for_symbols.values(s) {
                debug!("        {}", self.rule_to_str(rule));
            }
        }
    }

    fn print_right_recursion(&self) {
        debug!("RIGHT_RECURSION:");
        for (i, j) in self.right_recursion.iter_ones() {
            debug!(
                "    {} ->> {}",
                self.name(Symbol::from(i)),
                self.name(Symbol::from(j))
            );
        }
    }
}

fn intern(
    symbol_ids: &mut HashMap<String, Symbol>,
    name: &mut TVec<Symbol, String>,
    s: &str,
) -> Symbol {
    if let Some(&id) = symbol_ids.get(s) {
        return id;
    }
    let id: Symbol = name.len().into();
    symbol_ids.insert(s.to_string(), id);
    name.push(s.to_string());
    id
}

/// Computes which symbols can derive the empty string, by iterating to a
/// fixed point: a symbol is nullable if some rule of it has an all-nullable
/// (possibly empty) rhs.
fn set_nullable(nsyms: usize, rlhs: &[Symbol], rrhs: &[Vec<Symbol>]) -> TVec<Symbol, bool> {
    let mut nullable: TVec<Symbol, bool> = TVec::from_vec(vec![false; nsyms]);
    loop {
        let mut done = true;
        for (r, rhs) in rrhs.iter().enumerate() {
            if nullable[rlhs[r]] {
                continue;
            }
            if rhs.iter().all(|&sym| nullable[sym]) {
                nullable[rlhs[r]] = true;
                done = false;
            }
        }
        if done {
            break;
        }
    }
    nullable
}

/// Computes the `by_symbol` table, mapping Symbol -> [Rule].
fn set_by_symbol(nsyms: usize, rlhs: &[Symbol]) -> RampTable<Rule> {
    let mut b = RampTableBuilder::<Rule>::with_capacity(nsyms, rlhs.len());
    for s in 0..nsyms {
        b.start_key();
        for (r, &lhs) in rlhs.iter().enumerate() {
            if lhs.index() == s {
                b.push_value(r.into());
            }
        }
    }
    b.finish()
}

/// Computes the symbol-predicts-symbol relation.  The base edge runs from a
/// rule's lhs to the first symbol of its rhs; the closure is reflexive, so
/// every symbol predicts itself.
fn set_sympred(nsyms: usize, rlhs: &[Symbol], rrhs: &[Vec<Symbol>]) -> Bitmat {
    let mut sympred = Bitmat::new(nsyms, nsyms);
    for (r, rhs) in rrhs.iter().enumerate() {
        if let Some(&first) = rhs.first() {
            sympred.set(rlhs[r].index(), first.index());
        }
    }
    reflexive_transitive_closure(&mut sympred);
    sympred
}

/// Realizes `sympred` into per-symbol prediction lists.  Row `s` is the union
/// of `by_symbol[b]` over all `b` in row `s` of `sympred`, sorted and
/// deduplicated for iteration-friendly access on the hot path.
fn set_predictions(nsyms: usize, sympred: &Bitmat, by_symbol: &RampTable<Rule>) -> RampTable<Rule> {
    let mut predictions = RampTable::<Rule>::new();
    let mut row: Vec<Rule> = Vec::new();
    for s in 0..nsyms {
        row.clear();
        for b in sympred.iter_ones_in_row(s) {
            row.extend_from_slice(by_symbol.values(b));
        }
        row.sort();
        row.dedup();
        for &rule in row.iter() {
            predictions.push_value(rule);
        }
        predictions.finish_key();
    }
    predictions
}

/// Computes the right-recursion relation.  The base edge runs from a rule's
/// lhs to the last symbol of its rhs; the closure is plain (not reflexive).
fn set_right_recursion(nsyms: usize, rlhs: &[Symbol], rrhs: &[Vec<Symbol>]) -> Bitmat {
    let mut rr = Bitmat::new(nsyms, nsyms);
    for (r, rhs) in rrhs.iter().enumerate() {
        if let Some(&last) = rhs.last() {
            rr.set(rlhs[r].index(), last.index());
        }
    }
    transitive_closure(&mut rr);
    rr
}

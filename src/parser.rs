//! The recognizer driver.
//!
//! A `Parser` holds the chart for one input stream.  Each `push(token)` call
//! runs the per-token pipeline to a fixed point: advance items of the previous
//! set over the token's symbol, predict from every advanced item, then run
//! completion for the new set.  Completion feeds its own iteration, so chains
//! of completions (including nullable and Leo chains) resolve within the one
//! pass.
//!
//! Completion takes one of two paths per finished item.  The plain Earley path
//! scans the item's origin set for items expecting the finished rule's lhs and
//! advances each.  The Leo path fires when the finished item carries a
//! collapsed right-recursion prefix: the origin set then holds exactly one
//! such expecting item, and the advance jumps straight to the base of the
//! chain, so a right-recursive reduction costs one item per set instead of a
//! ladder.

use crate::chart::{EarleySet, Item, ItemKind};
use crate::grammar::Grammar;
use crate::{Rule, Symbol};
use log::{debug, trace};

pub struct Parser<'g> {
    gram: &'g Grammar,
    /// Set k holds the items at input position k.  Set 0 is seeded at
    /// construction; set k (k >= 1) is populated when token k-1 is pushed.
    sets: Vec<EarleySet>,
}

impl<'g> Parser<'g> {
    /// Creates a parser and seeds set 0 with the accept symbol's predictions.
    pub fn new(gram: &'g Grammar) -> Parser<'g> {
        let mut parser = Parser {
            gram,
            sets: Vec::new(),
        };
        parser.sets.push(EarleySet::new(gram.nrules));

        let accept_sym = gram.rlhs(gram.accept_rule);
        let seeds = gram.predictions_for_symbols.values(accept_sym);
        for &rule in seeds {
            parser.sets[0].predictions.set(rule.index());
        }
        for &rule in seeds {
            parser.insert(0, rule, 0, 0, None, ItemKind::Initial);
        }

        // An immediately nullable start completes here, so that success()
        // holds on empty input with no special case.
        parser.complete(0);
        parser.print_set(0);
        parser
    }

    /// Number of tokens pushed so far.
    pub fn position(&self) -> usize {
        self.sets.len() - 1
    }

    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn set_len(&self, k: usize) -> usize {
        self.sets[k].len()
    }

    /// Total item count across all sets.  Bounded by a grammar-dependent
    /// constant times the input length when Leo collapsing applies.
    pub fn num_items(&self) -> usize {
        self.sets.iter().map(|s| s.len()).sum()
    }

    /// Advances the parse by one token.  A token whose literal is unknown to
    /// the grammar matches nothing; the new set stays empty and no later
    /// input can succeed.
    pub fn push(&mut self, token: &str) {
        let k = self.sets.len();
        self.sets.push(EarleySet::new(self.gram.nrules));

        match self.gram.symbol_of(token) {
            Some(sym) => {
                trace!("push {:?} = {} -> set {}", token, sym, k);
                self.advance(k, sym);
                self.complete(k);
            }
            None => {
                debug!("push {:?}: unknown token, set {} stays empty", token, k);
            }
        }
        self.print_set(k);
    }

    /// How many distinct derivations of the accept rule span the whole input.
    /// Zero means no parse; more than one means the parse is ambiguous.
    pub fn accept_count(&self) -> usize {
        self.sets.last().map_or(0, |s| s.accept_matches)
    }

    /// True iff the tokens pushed so far form an unambiguous sentence of the
    /// grammar.
    pub fn success(&self) -> bool {
        self.accept_count() == 1
    }

    /// Advance: move the dot over the token's symbol in every item of the
    /// previous set that expects it.  The previous set already contains the
    /// pos-0 predicted items for rules whose first symbol is the token, so a
    /// separate scan-of-predictions phase is not needed.
    fn advance(&mut self, k: usize, sym: Symbol) {
        let gram = self.gram;
        let prev_len = self.sets[k - 1].len();
        for i in 0..prev_len {
            let item = self.sets[k - 1].items[i];
            let rhs = gram.rule_rhs(item.rule);
            if item.pos < rhs.len() && rhs[item.pos] == sym {
                let kind = if item.pos == 0 {
                    ItemKind::Scanned
                } else {
                    ItemKind::Advanced
                };
                self.insert(k, item.rule, item.pos + 1, item.origin, item.leo, kind);
            }
        }
    }

    /// Every item insertion funnels through here: seeds, predictions, token
    /// advances, completion advances, and Leo advances.
    ///
    /// For advanced items (pos > 0), assigns the `leo` field: an existing
    /// collapse origin is carried forward, otherwise the item becomes a fresh
    /// Leo base when its rule is right-recursive and only the tail symbol
    /// remains.  After insertion the next expected symbol is predicted, and
    /// if that symbol is nullable the dot also advances over it in place
    /// (the Aycock-Horspool treatment, so completions of empty rules never
    /// depend on insertion order).
    fn insert(
        &mut self,
        k: usize,
        rule: Rule,
        pos: usize,
        origin: usize,
        leo: Option<usize>,
        kind: ItemKind,
    ) {
        let gram = self.gram;
        debug_assert!(origin <= k);

        let leo = if pos == 0 {
            None
        } else {
            leo.or_else(|| self.leo_base(rule, pos, origin))
        };

        if !self.sets[k].add(Item {
            rule,
            pos,
            origin,
            leo,
            kind,
        }) {
            return;
        }

        if let Some(&next) = gram.rule_rhs(rule).get(pos) {
            self.predict(k, next);
            if gram.nullable[next] {
                self.insert(k, rule, pos + 1, origin, leo, ItemKind::Completed);
            }
        }
    }

    /// A fresh Leo collapse origin for an advanced item: the rule must be
    /// right-recursive and the dot must leave exactly the tail symbol.
    fn leo_base(&self, rule: Rule, pos: usize, origin: usize) -> Option<usize> {
        if pos + 1 == self.gram.rhs_len(rule) && self.gram.is_right_recursive(rule) {
            Some(origin)
        } else {
            None
        }
    }

    /// Predict a symbol into set k: realize the precomputed prediction list
    /// as pos-0 items.  The per-set bitset records which rules are already
    /// realized, so each rule materializes at most once per position.
    fn predict(&mut self, k: usize, sym: Symbol) {
        let gram = self.gram;
        for &rule in gram.predictions_for_symbols.values(sym) {
            if self.sets[k].predictions.get(rule.index()) {
                continue;
            }
            self.sets[k].predictions.set(rule.index());
            self.insert(k, rule, 0, k, None, ItemKind::Predicted);
        }
    }

    /// Completion for set k, run as a single pass that tolerates growth:
    /// items appended while the pass runs are visited by the same pass.
    fn complete(&mut self, k: usize) {
        let gram = self.gram;
        let mut idx = 0;
        while idx < self.sets[k].len() {
            let d = self.sets[k].items[idx];
            idx += 1;
            if d.pos < gram.rhs_len(d.rule) {
                continue;
            }
            let lhs = gram.rlhs(d.rule);
            match d.leo {
                // A zero-width chain (leo == k) has no ladder to collapse;
                // the plain path covers it without the uniqueness demand.
                Some(w) if w < k => self.complete_leo(k, lhs, w),
                _ => self.complete_earley(k, lhs, d.origin),
            }
        }
    }

    /// Leo path: walk the deterministic reduction path to the base of the
    /// collapsed chain.  Each visited set holds exactly one item expecting
    /// the symbol being reduced; when advancing that item would just finish
    /// the next link of the chain, the walk climbs to the link's own collapse
    /// origin instead of materializing the intermediate item.  Only the
    /// topmost advance lands in the chart, which is what keeps a
    /// right-recursive reduction at one item per set.
    fn complete_leo(&mut self, k: usize, lhs: Symbol, w: usize) {
        let gram = self.gram;
        let mut lhs = lhs;
        let mut w = w;
        loop {
            let c = self.leo_target(lhs, w);
            let new_pos = c.pos + 1;
            if new_pos == gram.rhs_len(c.rule) {
                if let Some(w2) = c.leo {
                    if w2 < w {
                        lhs = gram.rlhs(c.rule);
                        w = w2;
                        continue;
                    }
                }
            }
            let origin = c.leo.unwrap_or(c.origin);
            self.note_accept(k, c.rule, new_pos, origin);
            self.insert(k, c.rule, new_pos, origin, c.leo, ItemKind::Leo);
            return;
        }
    }

    /// The unique item in set w whose next expected symbol is `lhs`.  The
    /// deterministic reduction path guarantees uniqueness; a violation is a
    /// consistency bug, not a property of any input.
    fn leo_target(&self, lhs: Symbol, w: usize) -> Item {
        let gram = self.gram;
        let mut target: Option<Item> = None;
        for c in self.sets[w].items.iter() {
            let rhs = gram.rule_rhs(c.rule);
            if c.pos < rhs.len() && rhs[c.pos] == lhs {
                assert!(
                    target.is_none(),
                    "multiple Leo targets for {} in set {}",
                    gram.name(lhs),
                    w
                );
                target = Some(*c);
            }
        }
        match target {
            Some(c) => c,
            None => panic!("no Leo target for {} in set {}", gram.name(lhs), w),
        }
    }

    /// Earley path: advance every item of the origin set that expects `lhs`.
    /// When origin == k (a zero-width completion) the scan re-reads the
    /// growing set's length, so later arrivals are still advanced.
    fn complete_earley(&mut self, k: usize, lhs: Symbol, origin: usize) {
        let gram = self.gram;
        let mut i = 0;
        while i < self.sets[origin].len() {
            let c = self.sets[origin].items[i];
            i += 1;
            let rhs = gram.rule_rhs(c.rule);
            if c.pos < rhs.len() && rhs[c.pos] == lhs {
                self.note_accept(k, c.rule, c.pos + 1, c.origin);
                self.insert(k, c.rule, c.pos + 1, c.origin, c.leo, ItemKind::Completed);
            }
        }
    }

    /// Tallies derivations of the full accept item.  Counted at the two
    /// completion sites (not at insertion) so that each derivation counts
    /// once, even when an identical item already occupies the set, and so
    /// that the eager nullable advance does not count the same derivation
    /// twice.
    fn note_accept(&mut self, k: usize, rule: Rule, pos: usize, origin: usize) {
        let gram = self.gram;
        if rule == gram.accept_rule && pos == gram.rhs_len(rule) && origin == 0 {
            self.sets[k].accept_matches += 1;
        }
    }

    fn print_set(&self, k: usize) {
        let gram = self.gram;
        debug!("set {}:", k);
        for item in self.sets[k].items.iter() {
            let mut line = String::new();
            line.push_str(&format!(
                "[{}] {} :",
                item.kind.code(),
                gram.name(gram.rlhs(item.rule))
            ));
            let rhs = gram.rule_rhs(item.rule);
            for (j, &sym) in rhs.iter().enumerate() {
                if j == item.pos {
                    line.push_str(" .");
                }
                line.push_str(&format!(" {}", gram.name(sym)));
            }
            if item.pos == rhs.len() {
                line.push_str(" .");
            }
            line.push_str(&format!("  @{}", item.origin));
            if let Some(w) = item.leo {
                line.push_str(&format!("  leo {}", w));
            }
            debug!("    {}", line);
        }
    }
}

/// Convenience entry point for the common case where every character of a
/// string is one token.
pub fn parse(gram: &Grammar, input: &str) -> bool {
    let mut parser = Parser::new(gram);
    let mut buf = [0u8; 4];
    for ch in input.chars() {
        parser.push(ch.encode_utf8(&mut buf));
    }
    parser.success()
}

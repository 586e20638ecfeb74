//! The Earley chart: ordered sets of dotted-rule items, one set per input
//! position.

use crate::util::Bitv32;
use crate::Rule;
use log::trace;

/// Which phase produced an item.  Diagnostic only; not part of item identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Seeded into set 0 from the accept symbol's predictions.
    Initial,
    /// Materialized by predicting a symbol.
    Predicted,
    /// A pos-0 item advanced over an input token.
    Scanned,
    /// A mid-rule item advanced over an input token.
    Advanced,
    /// Advanced over a completed non-terminal.
    Completed,
    /// Advanced through a Leo-collapsed reduction chain.
    Leo,
}

impl ItemKind {
    pub fn code(self) -> char {
        match self {
            ItemKind::Initial => 'I',
            ItemKind::Predicted => 'P',
            ItemKind::Scanned => 'S',
            ItemKind::Advanced => 'A',
            ItemKind::Completed => 'C',
            ItemKind::Leo => 'L',
        }
    }
}

/// A dotted rule: progress through `rule`'s rhs, begun at input position
/// `origin`.
///
/// Identity is `(rule, pos, origin)`; the `leo` and `kind` fields ride along
/// and the first inserted value wins.
#[derive(Copy, Clone, Debug)]
pub struct Item {
    pub rule: Rule,
    /// Dot position, in `0 ..= rhs len`.
    pub pos: usize,
    /// Index of the Earley set in which this rule instance began.
    pub origin: usize,
    /// When present, the origin of the Leo-collapsed prefix this item
    /// continues; completion consults that set directly instead of walking
    /// the reduction ladder.
    pub leo: Option<usize>,
    pub kind: ItemKind,
}

impl Item {
    pub fn identity(&self) -> (Rule, usize, usize) {
        (self.rule, self.pos, self.origin)
    }
}

/// The items at a single input position, plus the rules already predicted
/// there.
///
/// Iteration during a set's own construction is by index, re-reading `len()`
/// at each step, so items appended mid-pass are visited by the same pass.
pub struct EarleySet {
    pub items: Vec<Item>,

    /// Rules realized as predictions at this position; len = nrules.
    /// Doubles as the dedup filter for `Predicted` items.
    pub predictions: Bitv32,

    /// Number of times an accepting item was derived at this position,
    /// counting derivations that lost the insertion race to an identical
    /// item.  More than one distinct derivation means the parse is ambiguous.
    pub accept_matches: usize,
}

impl EarleySet {
    pub fn new(nrules: usize) -> EarleySet {
        EarleySet {
            items: Vec::new(),
            predictions: Bitv32::from_elem(nrules, false),
            accept_matches: 0,
        }
    }

    /// Inserts `item` iff no existing item has the same identity.  Returns
    /// true if the item was inserted.
    pub fn add(&mut self, item: Item) -> bool {
        for existing in self.items.iter() {
            if existing.identity() == item.identity() {
                trace!("dup item r{} pos {} @{}", item.rule, item.pos, item.origin);
                return false;
            }
        }
        trace!(
            "add item r{} pos {} @{} [{}]",
            item.rule,
            item.pos,
            item.origin,
            item.kind.code()
        );
        self.items.push(item);
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

//! Couple and children ledger
//!
//! Deduplicates partner pairs (by relation id) and parent-child links so
//! children per marriage can be computed without double counting: the same
//! couple appears on the rows of both partners, and a child may appear on
//! several rows (one per relation of the child).

use rustc_hash::{FxHashMap, FxHashSet};

use crate::models::PersonId;

/// Two person ids compared without regard to order
///
/// The smaller id is always stored first, so the derived equality and hash
/// are symmetric: `UnorderedPair::new(a, b) == UnorderedPair::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnorderedPair {
    low: PersonId,
    high: PersonId,
}

impl UnorderedPair {
    /// Build a pair from two ids in any order
    #[must_use]
    pub fn new(a: PersonId, b: PersonId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The two ids, smallest first
    #[must_use]
    pub const fn members(&self) -> (PersonId, PersonId) {
        (self.low, self.high)
    }
}

/// The two partners of a relation
pub type CoupleKey = UnorderedPair;

/// The two parents of a child
pub type ParentKey = UnorderedPair;

/// Per-bucket registry of couples and the children of parent pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    couples: FxHashMap<PersonId, CoupleKey>,
    children: FxHashMap<ParentKey, FxHashSet<PersonId>>,
}

impl Ledger {
    /// Create an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `child` under the parent pair; returns `false` if already known
    pub fn register_child(&mut self, child: PersonId, parent_a: PersonId, parent_b: PersonId) -> bool {
        self.children
            .entry(ParentKey::new(parent_a, parent_b))
            .or_default()
            .insert(child)
    }

    /// Register the couple of a relation; the first registration of a
    /// relation id wins and later ones are ignored (returns `false`)
    pub fn register_couple(
        &mut self,
        relation_id: PersonId,
        partner_a: PersonId,
        partner_b: PersonId,
    ) -> bool {
        if self.couples.contains_key(&relation_id) {
            return false;
        }
        self.couples
            .insert(relation_id, CoupleKey::new(partner_a, partner_b));
        true
    }

    /// The couple registered for a relation id
    #[must_use]
    pub fn couple(&self, relation_id: PersonId) -> Option<CoupleKey> {
        self.couples.get(&relation_id).copied()
    }

    /// Number of distinct children registered under a parent pair
    #[must_use]
    pub fn children_of(&self, parents: ParentKey) -> usize {
        self.children.get(&parents).map_or(0, FxHashSet::len)
    }

    /// Number of registered couples
    #[must_use]
    pub fn couple_count(&self) -> usize {
        self.couples.len()
    }

    /// Sum of children over all registered couples
    ///
    /// Two relations between the same partners both count their children.
    #[must_use]
    pub fn total_children_of_couples(&self) -> usize {
        self.couples
            .values()
            .map(|couple| self.children_of(*couple))
            .sum()
    }

    /// Average number of children per couple, rounded half up;
    /// `None` when no couple is registered
    #[must_use]
    pub fn average_children(&self) -> Option<u32> {
        if self.couples.is_empty() {
            return None;
        }
        let average = self.total_children_of_couples() as f64 / self.couples.len() as f64;
        Some(round_half_up(average) as u32)
    }

    /// Fold a ledger built from later records into this one
    ///
    /// Child sets are unioned; couples already registered here keep their
    /// first registration.
    pub fn merge(&mut self, other: Self) {
        for (relation_id, couple) in other.couples {
            self.couples.entry(relation_id).or_insert(couple);
        }
        for (parents, children) in other.children {
            self.children.entry(parents).or_default().extend(children);
        }
    }
}

/// Round to the nearest integer, ties toward positive infinity
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

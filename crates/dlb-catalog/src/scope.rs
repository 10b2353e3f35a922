//! # Scope Aggregator
//!
//! Derives act listings for a jurisdiction view.
//!
//! [`Catalog::acts_by_scope()`] models legal inheritance: a city sees the
//! acts of every jurisdiction on its ancestor chain, but only those of the
//! requested governmental tier. Bengaluru asking for `state` acts gets
//! Karnataka's state legislation; asking for `national` gets India's.
//!
//! [`Catalog::acts_by_jurisdiction_and_type()`] is a flat conjunctive
//! filter with no hierarchy walk.
//!
//! All queries are pure reads over the snapshot and return acts in
//! document order, each act at most once.

use std::collections::{BTreeSet, HashSet};

use dlb_core::{Act, JurisdictionId, LawType, LawTypeId, Scope};

use crate::store::Catalog;

impl Catalog {
    /// Acts of `scope` enacted by `jurisdiction_id` or any of its ancestors.
    pub fn acts_by_scope(&self, scope: Scope, jurisdiction_id: &JurisdictionId) -> Vec<&Act> {
        let chain: HashSet<&JurisdictionId> =
            self.ancestor_ids(jurisdiction_id).into_iter().collect();
        let acts: Vec<&Act> = self
            .acts()
            .filter(|act| act.scope == scope && chain.contains(&act.jurisdiction_id))
            .collect();
        tracing::debug!(
            %scope,
            jurisdiction_id = %jurisdiction_id,
            chain_len = chain.len(),
            matched = acts.len(),
            "acts by scope"
        );
        acts
    }

    /// Acts matching both optional filters. `None` matches everything.
    pub fn acts_by_jurisdiction_and_type(
        &self,
        jurisdiction_id: Option<&JurisdictionId>,
        law_type_id: Option<&LawTypeId>,
    ) -> Vec<&Act> {
        self.acts()
            .filter(|act| jurisdiction_id.map_or(true, |j| &act.jurisdiction_id == j))
            .filter(|act| law_type_id.map_or(true, |t| &act.law_type_id == t))
            .collect()
    }

    /// Law types owned directly by a jurisdiction.
    pub fn law_types_by_jurisdiction(&self, jurisdiction_id: &JurisdictionId) -> Vec<&LawType> {
        self.law_types()
            .filter(|lt| &lt.jurisdiction_id == jurisdiction_id)
            .collect()
    }

    /// Distinct act years, newest first.
    pub fn available_years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.acts().map(|a| a.year).collect();
        years.into_iter().rev().collect()
    }
}

/// Narrow an act listing by a title/description substring.
///
/// A blank query returns the input unchanged.
pub fn filter_acts<'a>(acts: Vec<&'a Act>, query: &str) -> Vec<&'a Act> {
    let query = query.trim();
    if query.is_empty() {
        return acts;
    }
    let needle = query.to_lowercase();
    acts.into_iter().filter(|a| a.matches_text(&needle)).collect()
}

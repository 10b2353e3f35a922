//! # Jurisdiction Hierarchy Resolver
//!
//! Jurisdictions form a forest through their `parent` ids. This module
//! walks those links.
//!
//! ## Ancestor chain
//!
//! ```text
//! India (jur-1) ──▶ Karnataka (jur-2) ──▶ Bengaluru (jur-3)
//!
//! ancestor_chain(jur-3) = [India, Karnataka, Bengaluru]
//! ```
//!
//! The chain is root-first and always ends with the queried jurisdiction.
//! An unknown id yields an empty chain. A parent id that resolves to
//! nothing ends the chain at the last resolvable jurisdiction.
//!
//! Cycles are rejected when the catalog is built, so the walk here only
//! needs to guard against dangling references. It still caps the number
//! of steps at the table size.

use std::collections::HashSet;

use dlb_core::{Jurisdiction, JurisdictionId};

use crate::error::{CatalogError, CatalogResult};
use crate::store::{Catalog, Table};

/// Reject parent cycles and log dangling parent references.
pub(crate) fn validate_parents(table: &Table<JurisdictionId, Jurisdiction>) -> CatalogResult<()> {
    // Jurisdictions already proven to reach a root or a dangling reference.
    let mut settled: HashSet<&JurisdictionId> = HashSet::new();

    for start in table.iter() {
        let mut path: HashSet<&JurisdictionId> = HashSet::new();
        let mut current = start;
        loop {
            if settled.contains(&current.id) {
                break;
            }
            if !path.insert(&current.id) {
                return Err(CatalogError::ParentCycle {
                    jurisdiction_id: current.id.clone(),
                });
            }
            let Some(parent_id) = current.parent.as_ref() else {
                break;
            };
            match table.get(parent_id) {
                Some(parent) => current = parent,
                None => {
                    tracing::warn!(
                        jurisdiction_id = %current.id,
                        parent_id = %parent_id,
                        "jurisdiction refers to an unknown parent"
                    );
                    break;
                }
            }
        }
        settled.extend(path);
    }
    Ok(())
}

impl Catalog {
    /// Root-first chain from the top of the tree down to `id`.
    ///
    /// Returns an empty vector when `id` is unknown.
    pub fn ancestor_chain(&self, id: &JurisdictionId) -> Vec<&Jurisdiction> {
        let Some(leaf) = self.jurisdiction(id) else {
            tracing::debug!(jurisdiction_id = %id, "ancestor chain requested for unknown jurisdiction");
            return Vec::new();
        };

        let mut chain = vec![leaf];
        let mut current = leaf;
        while let Some(parent_id) = current.parent.as_ref() {
            if chain.len() >= self.jurisdictions.len() {
                break;
            }
            match self.jurisdiction(parent_id) {
                Some(parent) => {
                    chain.push(parent);
                    current = parent;
                }
                None => {
                    tracing::warn!(
                        jurisdiction_id = %current.id,
                        parent_id = %parent_id,
                        "ancestor chain truncated at dangling parent reference"
                    );
                    break;
                }
            }
        }
        chain.reverse();
        chain
    }

    /// Ids of the ancestor chain, root-first.
    pub fn ancestor_ids(&self, id: &JurisdictionId) -> Vec<&JurisdictionId> {
        self.ancestor_chain(id).into_iter().map(|j| &j.id).collect()
    }

    /// Jurisdictions with no parent, in document order.
    pub fn root_jurisdictions(&self) -> Vec<&Jurisdiction> {
        self.jurisdictions().filter(|j| j.is_root()).collect()
    }

    /// Direct children of a jurisdiction, in document order.
    pub fn children_of(&self, id: &JurisdictionId) -> Vec<&Jurisdiction> {
        self.jurisdictions()
            .filter(|j| j.parent.as_ref() == Some(id))
            .collect()
    }

    /// Human-readable path such as `India › Karnataka › Bengaluru`.
    pub fn jurisdiction_path(&self, id: &JurisdictionId) -> String {
        self.ancestor_chain(id)
            .iter()
            .map(|j| j.name.as_str())
            .collect::<Vec<_>>()
            .join(" › ")
    }
}

//! # Section Search
//!
//! Case-insensitive substring search over section titles, content, and
//! display numbers, with optional filters applied against the owning act.

use serde::{Deserialize, Serialize};

use dlb_core::{JurisdictionId, LawCategory, LawTypeId, Scope, Section};

use crate::store::{Catalog, SectionContext};

/// Query plus optional act-level filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub query: String,
    pub jurisdiction_id: Option<JurisdictionId>,
    pub law_type_id: Option<LawTypeId>,
    pub year: Option<i32>,
    pub scope: Option<Scope>,
    pub category: Option<LawCategory>,
}

impl SearchFilters {
    /// Filters with only a query set.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    fn has_act_filters(&self) -> bool {
        self.jurisdiction_id.is_some()
            || self.law_type_id.is_some()
            || self.year.is_some()
            || self.scope.is_some()
            || self.category.is_some()
    }
}

impl Catalog {
    /// Sections whose title, content, or number contains `query`.
    ///
    /// A blank query returns nothing.
    pub fn search_sections(&self, query: &str) -> Vec<&Section> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.sections().filter(|s| s.matches_text(&needle)).collect()
    }

    /// Filtered search. Sections whose owning act cannot be resolved are
    /// dropped, since no act-level filter can be evaluated for them.
    pub fn search(&self, filters: &SearchFilters) -> Vec<SectionContext<'_>> {
        let hits: Vec<SectionContext<'_>> = self
            .search_sections(&filters.query)
            .into_iter()
            .map(|section| self.context_of(section))
            .filter(|ctx| self.passes(ctx, filters))
            .collect();
        tracing::debug!(
            query = %filters.query,
            act_filters = filters.has_act_filters(),
            hits = hits.len(),
            "section search"
        );
        hits
    }

    fn passes(&self, ctx: &SectionContext<'_>, filters: &SearchFilters) -> bool {
        let Some(act) = ctx.act else {
            return false;
        };
        if filters.jurisdiction_id.as_ref().is_some_and(|j| &act.jurisdiction_id != j) {
            return false;
        }
        if filters.law_type_id.as_ref().is_some_and(|t| &act.law_type_id != t) {
            return false;
        }
        if filters.year.is_some_and(|y| act.year != y) {
            return false;
        }
        if filters.scope.is_some_and(|s| act.scope != s) {
            return false;
        }
        if let Some(category) = filters.category {
            let act_category = self.law_type(&act.law_type_id).map(|lt| lt.category);
            if act_category != Some(category) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Catalog {
        Catalog::seeded().unwrap()
    }

    fn section_ids(sections: &[&Section]) -> Vec<String> {
        sections.iter().map(|s| s.id.to_string()).collect()
    }

    fn hit_ids(hits: &[SectionContext<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.section.id.to_string()).collect()
    }

    #[test]
    fn blank_query_returns_nothing() {
        let c = seeded();
        assert!(c.search_sections("").is_empty());
        assert!(c.search_sections("   \t").is_empty());
    }

    #[test]
    fn matches_title_content_and_number() {
        let c = seeded();
        assert_eq!(section_ids(&c.search_sections("EQUALITY")), vec!["sec-1"]);
        assert_eq!(section_ids(&c.search_sections("forced labour")), vec!["sec-2"]);
        assert_eq!(section_ids(&c.search_sections("39a")), vec!["sec-3"]);
    }

    #[test]
    fn query_is_trimmed() {
        let c = seeded();
        assert_eq!(section_ids(&c.search_sections("  legal aid ")), vec!["sec-3"]);
    }

    #[test]
    fn filters_by_jurisdiction() {
        let c = seeded();
        let mut filters = SearchFilters::query("india");
        assert_eq!(hit_ids(&c.search(&filters)), vec!["sec-1", "sec-4"]);

        filters.jurisdiction_id = Some("jur-2".parse().unwrap());
        assert_eq!(hit_ids(&c.search(&filters)), vec!["sec-1"]);

        filters.jurisdiction_id = Some("jur-3".parse().unwrap());
        assert_eq!(hit_ids(&c.search(&filters)), vec!["sec-4"]);
    }

    #[test]
    fn filters_by_year_scope_and_category() {
        let c = seeded();
        let mut filters = SearchFilters::query("India");
        filters.year = Some(2020);
        assert_eq!(hit_ids(&c.search(&filters)), vec!["sec-4"]);

        filters.year = None;
        filters.scope = Some(Scope::State);
        assert!(hit_ids(&c.search(&filters)).iter().all(|id| id != "sec-4"));

        filters.scope = None;
        filters.category = Some(LawCategory::Municipal);
        assert_eq!(hit_ids(&c.search(&filters)), vec!["sec-4"]);

        filters.category = Some(LawCategory::Tax);
        assert!(c.search(&filters).is_empty());
    }

    #[test]
    fn hits_carry_breadcrumb() {
        let c = seeded();
        let hits = c.search(&SearchFilters::query("39A"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chapter.unwrap().title, "Directive Principles of State Policy");
        assert_eq!(hits[0].act.unwrap().id, "act-1");
    }

    #[test]
    fn orphaned_sections_dropped_from_filtered_search() {
        let mut doc = crate::seed::seed_document().unwrap();
        doc.sections[0].chapter_id = "ch-missing".parse().unwrap();
        let c = Catalog::build(doc).unwrap();
        assert_eq!(section_ids(&c.search_sections("equality")), vec!["sec-1"]);
        assert!(c.search(&SearchFilters::query("equality")).is_empty());
    }
}

//! # Search Subcommand
//!
//! Substring search over sections with optional act-level filters.

use anyhow::Result;
use clap::Args;

use dlb_catalog::SearchFilters;
use dlb_core::{JurisdictionId, LawCategory, LawTypeId, Scope};

use crate::output::{print_json, section_label};
use crate::Context;

/// Arguments for `dlb search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for in section titles, content, and numbers.
    pub query: String,

    #[arg(long, short = 'j')]
    pub jurisdiction: Option<JurisdictionId>,

    #[arg(long)]
    pub law_type: Option<LawTypeId>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub scope: Option<Scope>,

    #[arg(long)]
    pub category: Option<LawCategory>,
}

impl SearchArgs {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            query: self.query.clone(),
            jurisdiction_id: self.jurisdiction.clone(),
            law_type_id: self.law_type.clone(),
            year: self.year,
            scope: self.scope,
            category: self.category,
        }
    }
}

/// Execute `dlb search`.
pub fn run_search(args: &SearchArgs, ctx: &Context) -> Result<u8> {
    let filters = args.filters();
    let hits = ctx.catalog.search(&filters);
    tracing::info!(query = %filters.query, hits = hits.len(), "search complete");

    if ctx.json {
        print_json(&hits)?;
        return Ok(0);
    }
    if hits.is_empty() {
        println!("No sections match \"{}\".", args.query);
        return Ok(0);
    }
    for hit in &hits {
        let act = hit.act.map(|a| a.title.as_str()).unwrap_or("?");
        println!(
            "{:<8} {:<8} {}  ({act})",
            hit.section.id,
            section_label(&hit.section.number),
            hit.section.title
        );
    }
    Ok(0)
}

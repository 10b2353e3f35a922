//! # Browse Subcommands
//!
//! `jurisdictions`, `chain`, `acts`, `act`, and `section`: read-only views
//! over the catalog. Each command builds a serializable view first and then
//! prints it as text or JSON.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use dlb_catalog::{filter_acts, Catalog, SectionContext};
use dlb_core::{
    Act, ActId, Annotation, Chapter, Jurisdiction, JurisdictionId, LawType, LawTypeId, Scope,
    Section, SectionId,
};
use dlb_state::{AnnotationStore, EventBus};

use crate::output::{format_amount, print_json, section_label};
use crate::{not_found, Context};

// ── jurisdictions ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct JurisdictionRow<'a> {
    #[serde(flatten)]
    jurisdiction: &'a Jurisdiction,
    path: String,
}

/// Execute `dlb jurisdictions`.
pub fn run_jurisdictions(ctx: &Context) -> Result<u8> {
    let rows: Vec<JurisdictionRow<'_>> = ctx
        .catalog
        .jurisdictions()
        .map(|j| JurisdictionRow {
            jurisdiction: j,
            path: ctx.catalog.jurisdiction_path(&j.id),
        })
        .collect();

    if ctx.json {
        print_json(&rows)?;
    } else {
        for row in &rows {
            println!(
                "{:<10} {:<10} {}",
                row.jurisdiction.id, row.jurisdiction.scope, row.path
            );
        }
    }
    Ok(0)
}

// ── chain ────────────────────────────────────────────────────────────

/// Arguments for `dlb chain`.
#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Jurisdiction to resolve.
    #[arg(value_name = "JURISDICTION")]
    pub id: JurisdictionId,
}

/// Execute `dlb chain`.
pub fn run_chain(args: &ChainArgs, ctx: &Context) -> Result<u8> {
    if ctx.catalog.jurisdiction(&args.id).is_none() {
        return Ok(not_found("jurisdiction", args.id.as_str()));
    }
    let chain = ctx.catalog.ancestor_chain(&args.id);
    if ctx.json {
        print_json(&chain)?;
    } else {
        for (depth, j) in chain.iter().enumerate() {
            println!("{}{} ({}, {})", "  ".repeat(depth), j.name, j.id, j.scope);
        }
    }
    Ok(0)
}

// ── acts ─────────────────────────────────────────────────────────────

/// Arguments for `dlb acts`.
#[derive(Args, Debug)]
pub struct ActsArgs {
    /// Jurisdiction whose acts to list.
    #[arg(long, short = 'j')]
    pub jurisdiction: JurisdictionId,

    /// Governmental tier. Includes acts inherited from ancestors.
    #[arg(long)]
    pub scope: Option<Scope>,

    /// Restrict to one law type.
    #[arg(long)]
    pub law_type: Option<LawTypeId>,

    /// Title/description filter.
    #[arg(long, short = 'q')]
    pub query: Option<String>,
}

/// Acts for the `acts` listing.
///
/// With a scope, the listing inherits along the ancestor chain and the
/// law-type filter narrows the result. Without one, it is the flat
/// jurisdiction/law-type filter.
pub fn list_acts<'a>(catalog: &'a Catalog, args: &ActsArgs) -> Vec<&'a Act> {
    let acts = match args.scope {
        Some(scope) => {
            let mut acts = catalog.acts_by_scope(scope, &args.jurisdiction);
            if let Some(lt) = &args.law_type {
                acts.retain(|a| &a.law_type_id == lt);
            }
            acts
        }
        None => catalog.acts_by_jurisdiction_and_type(
            Some(&args.jurisdiction),
            args.law_type.as_ref(),
        ),
    };
    filter_acts(acts, args.query.as_deref().unwrap_or_default())
}

/// Execute `dlb acts`.
pub fn run_acts(args: &ActsArgs, ctx: &Context) -> Result<u8> {
    if ctx.catalog.jurisdiction(&args.jurisdiction).is_none() {
        return Ok(not_found("jurisdiction", args.jurisdiction.as_str()));
    }
    let acts = list_acts(&ctx.catalog, args);
    if ctx.json {
        print_json(&acts)?;
    } else if acts.is_empty() {
        println!("No acts found.");
    } else {
        for act in &acts {
            let mark = if act.is_verified() { "✓" } else { " " };
            println!("{mark} {:<8} {} ({}, {})", act.id, act.title, act.year, act.scope);
        }
    }
    Ok(0)
}

// ── act ──────────────────────────────────────────────────────────────

/// Arguments for `dlb act`.
#[derive(Args, Debug)]
pub struct ActArgs {
    #[arg(value_name = "ACT")]
    pub id: ActId,
}

#[derive(Debug, Serialize)]
pub struct ChapterView<'a> {
    pub chapter: &'a Chapter,
    pub sections: Vec<&'a Section>,
}

/// An act with its table of contents.
#[derive(Debug, Serialize)]
pub struct ActView<'a> {
    pub act: &'a Act,
    pub jurisdiction_path: String,
    pub law_type: Option<&'a LawType>,
    pub chapters: Vec<ChapterView<'a>>,
}

pub fn act_view<'a>(catalog: &'a Catalog, id: &ActId) -> Option<ActView<'a>> {
    let act = catalog.act(id)?;
    let chapters = catalog
        .chapters_of(id)
        .into_iter()
        .map(|chapter| ChapterView {
            chapter,
            sections: catalog.sections_of(&chapter.id),
        })
        .collect();
    Some(ActView {
        act,
        jurisdiction_path: catalog.jurisdiction_path(&act.jurisdiction_id),
        law_type: catalog.law_type(&act.law_type_id),
        chapters,
    })
}

/// Execute `dlb act`.
pub fn run_act(args: &ActArgs, ctx: &Context) -> Result<u8> {
    let Some(view) = act_view(&ctx.catalog, &args.id) else {
        return Ok(not_found("act", args.id.as_str()));
    };
    if ctx.json {
        print_json(&view)?;
        return Ok(0);
    }

    let act = view.act;
    println!("{} ({})", act.title, act.year);
    println!("{}", view.jurisdiction_path);
    if let Some(lt) = view.law_type {
        println!("{} · {}", lt.name, lt.category);
    }
    println!("{}", act.description);
    println!("Last updated {}", act.last_updated.to_display_date());
    if let (Some(at), Some(by)) = (&act.verified_at, &act.verified_by) {
        println!("Verified {} by {}", at.to_display_date(), by);
    }
    if let Some(url) = &act.source_url {
        println!("Source: {url}");
    }
    if !act.amendments.is_empty() {
        println!("\nAmendments:");
        for amendment in &act.amendments {
            println!("  {}  {}", amendment.date.to_display_date(), amendment.description);
        }
    }
    for ch in &view.chapters {
        println!("\nChapter {}: {}", ch.chapter.number, ch.chapter.title);
        for section in &ch.sections {
            println!(
                "  {:<8} {}  [{}]",
                section_label(&section.number),
                section.title,
                section.id
            );
        }
    }
    Ok(0)
}

// ── section ──────────────────────────────────────────────────────────

/// Arguments for `dlb section`.
#[derive(Args, Debug)]
pub struct SectionArgs {
    #[arg(value_name = "SECTION")]
    pub id: SectionId,
}

/// A section with its breadcrumb and public annotations.
#[derive(Debug, Serialize)]
pub struct SectionView<'a> {
    #[serde(flatten)]
    pub context: SectionContext<'a>,
    pub paragraphs: Vec<&'a str>,
    pub annotations: Vec<Annotation>,
}

pub fn section_view<'a>(
    catalog: &'a Catalog,
    annotations: &AnnotationStore,
    id: &SectionId,
) -> Option<SectionView<'a>> {
    let context = catalog.section_context(id)?;
    Some(SectionView {
        paragraphs: context.section.paragraphs(),
        annotations: annotations.visible_for_section(id, None),
        context,
    })
}

/// Execute `dlb section`.
pub fn run_section(args: &SectionArgs, ctx: &Context) -> Result<u8> {
    let annotations =
        AnnotationStore::new(ctx.catalog.seed_annotations().to_vec(), EventBus::new());
    let Some(view) = section_view(&ctx.catalog, &annotations, &args.id) else {
        return Ok(not_found("section", args.id.as_str()));
    };
    if ctx.json {
        print_json(&view)?;
        return Ok(0);
    }

    let section = view.context.section;
    if let Some(act) = view.context.act {
        print!("{}", act.title);
        if let Some(ch) = view.context.chapter {
            print!(" › Chapter {}", ch.number);
        }
        println!();
    }
    println!("{} {}\n", section_label(&section.number), section.title);
    for paragraph in &view.paragraphs {
        println!("{paragraph}\n");
    }
    if !section.fines.is_empty() {
        println!("Fines:");
        for fine in &section.fines {
            println!("  {}  {}", format_amount(fine), fine.description);
        }
    }
    if !section.precedents.is_empty() {
        println!("Precedents:");
        for p in &section.precedents {
            println!("  {} ({}, {})", p.title, p.citation, p.court);
        }
    }
    println!("Last updated {}", section.last_updated.to_display_date());
    if !view.annotations.is_empty() {
        println!("\nPublic annotations:");
        for a in &view.annotations {
            println!("  [{}] {}: {}", a.updated_at.to_display_date(), a.user_id, a.content);
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::seeded().unwrap()
    }

    fn acts_args(jurisdiction: &str) -> ActsArgs {
        ActsArgs {
            jurisdiction: jurisdiction.parse().unwrap(),
            scope: None,
            law_type: None,
            query: None,
        }
    }

    fn ids(acts: &[&Act]) -> Vec<String> {
        acts.iter().map(|a| a.id.to_string()).collect()
    }

    #[test]
    fn city_inherits_state_acts_by_scope() {
        let c = catalog();
        let mut args = acts_args("jur-3");
        args.scope = Some(Scope::State);
        assert_eq!(ids(&list_acts(&c, &args)), vec!["act-1"]);

        args.scope = Some(Scope::Municipal);
        assert_eq!(ids(&list_acts(&c, &args)), vec!["act-2"]);
    }

    #[test]
    fn flat_listing_without_scope() {
        let c = catalog();
        assert!(list_acts(&c, &acts_args("jur-1")).is_empty());
        assert_eq!(ids(&list_acts(&c, &acts_args("jur-2"))), vec!["act-1"]);
    }

    #[test]
    fn law_type_and_query_narrow() {
        let c = catalog();
        let mut args = acts_args("jur-3");
        args.scope = Some(Scope::State);
        args.law_type = Some("lt-2".parse().unwrap());
        assert!(list_acts(&c, &args).is_empty());

        let mut args = acts_args("jur-3");
        args.query = Some("WASTE".into());
        assert_eq!(ids(&list_acts(&c, &args)), vec!["act-2"]);
        args.query = Some("motor".into());
        assert!(list_acts(&c, &args).is_empty());
    }

    #[test]
    fn act_view_orders_chapters() {
        let c = catalog();
        let view = act_view(&c, &"act-2".parse().unwrap()).unwrap();
        let numbers: Vec<u32> = view.chapters.iter().map(|ch| ch.chapter.number).collect();
        assert_eq!(numbers, vec![1, 6]);
        assert_eq!(view.chapters[0].sections.len(), 1);
        assert!(act_view(&c, &"act-404".parse().unwrap()).is_none());
    }

    #[test]
    fn section_view_shows_public_annotations_only() {
        let c = catalog();
        let store = AnnotationStore::new(c.seed_annotations().to_vec(), EventBus::new());
        store
            .add(&"user-3".parse().unwrap(), &"sec-1".parse().unwrap(), "draft", false)
            .unwrap();
        let view = section_view(&c, &store, &"sec-1".parse().unwrap()).unwrap();
        assert_eq!(view.paragraphs.len(), 2);
        assert_eq!(view.annotations.len(), 1);
        assert_eq!(view.annotations[0].id, "anno-1");
        assert!(section_view(&c, &store, &"sec-404".parse().unwrap()).is_none());
    }

    #[test]
    fn section_view_serializes_breadcrumb() {
        let c = catalog();
        let store = AnnotationStore::new(Vec::new(), EventBus::new());
        let view = section_view(&c, &store, &"sec-4".parse().unwrap()).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["act"]["id"], "act-2");
        assert_eq!(json["chapter"]["number"], 1);
        assert_eq!(json["section"]["number"], "2");
    }
}

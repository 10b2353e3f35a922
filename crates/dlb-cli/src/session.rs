//! # Session Subcommand
//!
//! Replays a scripted reader session against fresh state stores and
//! prints what happened at each step plus the resulting overlay of every
//! user who signed in.
//!
//! ```yaml
//! steps:
//!   - login: { email: john@example.com, password: hunter2 }
//!   - bookmark: { section: sec-2, notes: compare with art. 21 }
//!   - annotate: { section: sec-2, content: forced labour cases, public: false }
//!   - update: { annotation: last, content: forced labour cases, public: true }
//!   - toggle: { section: sec-4 }
//!   - logout
//! ```
//!
//! `last` in place of an id refers to the most recent bookmark or
//! annotation created by the script. A failing step is reported and the
//! script continues; the exit code is 1 if any step failed.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context as _, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::TryRecvError};

use dlb_core::{Annotation, AnnotationId, BookmarkId, DlbError, SectionId, UserId, VerificationStatus};
use dlb_state::{AppState, BookmarkDetail, Session, StateEvent, Toggled};

use crate::output::print_json;
use crate::Context;

/// Arguments for `dlb session`.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Session script (YAML).
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
    Login {
        email: String,
        password: String,
    },
    Logout,
    Bookmark {
        section: SectionId,
        #[serde(default)]
        notes: Option<String>,
    },
    Unbookmark {
        bookmark: String,
    },
    Notes {
        bookmark: String,
        notes: String,
    },
    Toggle {
        section: SectionId,
    },
    Annotate {
        section: SectionId,
        content: String,
        #[serde(default)]
        public: bool,
    },
    Update {
        annotation: String,
        content: String,
        #[serde(default)]
        public: bool,
    },
    Delete {
        annotation: String,
    },
    Verify {
        annotation: String,
        status: VerificationStatus,
    },
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::Bookmark { .. } => "bookmark",
            Self::Unbookmark { .. } => "unbookmark",
            Self::Notes { .. } => "notes",
            Self::Toggle { .. } => "toggle",
            Self::Annotate { .. } => "annotate",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Verify { .. } => "verify",
        }
    }
}

/// A parsed session script.
///
/// Steps are written as single-key maps (`- login: {...}`) or, for
/// `logout`, a bare string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("invalid session script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("in {}", path.display()))
    }
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub action: &'static str,
    pub ok: bool,
    pub detail: String,
}

/// Bookmarks and annotations of one user after the script ran.
#[derive(Debug, Serialize)]
pub struct UserOverlay<'a> {
    pub user_id: UserId,
    pub bookmarks: Vec<BookmarkDetail<'a>>,
    pub annotations: Vec<Annotation>,
}

/// Everything `dlb session` prints.
#[derive(Debug, Serialize)]
pub struct SessionReport<'a> {
    pub steps: Vec<StepOutcome>,
    pub events: Vec<StateEvent>,
    pub overlays: Vec<UserOverlay<'a>>,
}

impl SessionReport<'_> {
    pub fn succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.ok)
    }
}

fn resolve<I>(raw: &str, last: &Option<I>, kind: &str) -> Result<I>
where
    I: FromStr<Err = DlbError> + Clone,
{
    if raw == "last" {
        last.clone()
            .with_context(|| format!("no {kind} created yet in this session"))
    } else {
        Ok(raw.parse()?)
    }
}

/// Executes steps against shared state with its own [`Session`].
struct Runner<'s> {
    state: &'s AppState,
    session: Session,
    last_bookmark: Option<BookmarkId>,
    last_annotation: Option<AnnotationId>,
    users: Vec<UserId>,
}

impl<'s> Runner<'s> {
    fn new(state: &'s AppState) -> Self {
        Self {
            state,
            session: Session::anonymous(),
            last_bookmark: None,
            last_annotation: None,
            users: Vec::new(),
        }
    }

    fn actor(&self) -> Result<UserId> {
        Ok(self.session.require_user()?.id.clone())
    }

    async fn apply(&mut self, step: &Step) -> Result<String> {
        let state = self.state;
        match step {
            Step::Login { email, password } => {
                let user = state.auth.login(&mut self.session, email, password).await?;
                if !self.users.contains(&user.id) {
                    self.users.push(user.id.clone());
                }
                Ok(format!("signed in as {} ({})", user.name, user.role))
            }
            Step::Logout => {
                state.auth.logout(&mut self.session);
                Ok("signed out".into())
            }
            Step::Bookmark { section, notes } => {
                let me = self.actor()?;
                let b = state.bookmarks.add(&me, section, notes.clone())?;
                self.last_bookmark = Some(b.id.clone());
                Ok(format!("bookmarked {section} as {}", b.id))
            }
            Step::Unbookmark { bookmark } => {
                let me = self.actor()?;
                let id = resolve(bookmark, &self.last_bookmark, "bookmark")?;
                state.bookmarks.remove(&me, &id)?;
                Ok(format!("removed {id}"))
            }
            Step::Notes { bookmark, notes } => {
                let me = self.actor()?;
                let id = resolve(bookmark, &self.last_bookmark, "bookmark")?;
                state.bookmarks.update_notes(&me, &id, notes.as_str())?;
                Ok(format!("updated notes on {id}"))
            }
            Step::Toggle { section } => {
                let me = self.actor()?;
                match state.bookmarks.toggle(&me, section)? {
                    Toggled::Added(b) => {
                        self.last_bookmark = Some(b.id.clone());
                        Ok(format!("bookmarked {section} as {}", b.id))
                    }
                    Toggled::Removed(b) => Ok(format!("removed {}", b.id)),
                }
            }
            Step::Annotate {
                section,
                content,
                public,
            } => {
                let me = self.actor()?;
                let a = state
                    .annotations
                    .add(&me, section, content.as_str(), *public)?;
                self.last_annotation = Some(a.id.clone());
                let visibility = if a.is_public { "public" } else { "private" };
                Ok(format!("{visibility} annotation {} on {section}", a.id))
            }
            Step::Update {
                annotation,
                content,
                public,
            } => {
                let me = self.actor()?;
                let id = resolve(annotation, &self.last_annotation, "annotation")?;
                state
                    .annotations
                    .update(&me, &id, content.as_str(), *public)?;
                Ok(format!("updated {id}"))
            }
            Step::Delete { annotation } => {
                let me = self.actor()?;
                let id = resolve(annotation, &self.last_annotation, "annotation")?;
                state.annotations.delete(&me, &id)?;
                Ok(format!("deleted {id}"))
            }
            Step::Verify { annotation, status } => {
                let verifier = self.session.require_user()?.clone();
                let id = resolve(annotation, &self.last_annotation, "annotation")?;
                state.annotations.set_verification(&verifier, &id, *status)?;
                Ok(format!("marked {id} {status}"))
            }
        }
    }
}

/// Move every pending event into `out`. A lagged receiver skips what it
/// missed and keeps reading.
fn drain_events(rx: &mut broadcast::Receiver<StateEvent>, out: &mut Vec<StateEvent>) {
    loop {
        match rx.try_recv() {
            Ok(event) => out.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "session report missed state events");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

/// Run every step of `script` in order and collect the report.
pub async fn run_script<'a>(state: &'a AppState, script: &Script) -> SessionReport<'a> {
    let mut events = state.events.subscribe();
    let mut runner = Runner::new(state);
    let mut steps = Vec::with_capacity(script.steps.len());
    let mut emitted = Vec::new();

    for (i, step) in script.steps.iter().enumerate() {
        let index = i + 1;
        let (ok, detail) = match runner.apply(step).await {
            Ok(detail) => (true, detail),
            Err(e) => {
                tracing::warn!(index, action = step.action(), error = %e, "step failed");
                (false, format!("{e:#}"))
            }
        };
        steps.push(StepOutcome {
            index,
            action: step.action(),
            ok,
            detail,
        });
        drain_events(&mut events, &mut emitted);
    }

    let overlays = runner
        .users
        .iter()
        .map(|user_id| UserOverlay {
            user_id: user_id.clone(),
            bookmarks: state.bookmarks.details_for_user(user_id),
            annotations: state.annotations.by_user_newest_first(user_id),
        })
        .collect();

    SessionReport {
        steps,
        events: emitted,
        overlays,
    }
}

fn print_text(report: &SessionReport<'_>) {
    for s in &report.steps {
        let status = if s.ok { "ok" } else { "FAIL" };
        println!("{:>3}. {:<10} {:<4}  {}", s.index, s.action, status, s.detail);
    }
    for overlay in &report.overlays {
        println!("\n{}:", overlay.user_id);
        println!("  Bookmarks ({}):", overlay.bookmarks.len());
        for d in &overlay.bookmarks {
            let place = match d.context {
                Some(ctx) => match ctx.act {
                    Some(act) => format!("{} › § {} {}", act.title, ctx.section.number, ctx.section.title),
                    None => format!("§ {} {}", ctx.section.number, ctx.section.title),
                },
                None => format!("{} (section removed)", d.bookmark.section_id),
            };
            println!("    {:<8} {place}", d.bookmark.id);
            if let Some(notes) = &d.bookmark.notes {
                println!("             {notes}");
            }
        }
        println!("  Annotations ({}):", overlay.annotations.len());
        for a in &overlay.annotations {
            let visibility = if a.is_public { "public" } else { "private" };
            println!(
                "    {} on {} [{visibility}, {}]: {}",
                a.id,
                a.section_id,
                a.updated_at.to_display_date(),
                a.content
            );
        }
    }
}

/// Execute `dlb session`.
pub fn run_session(args: &SessionArgs, ctx: &Context) -> Result<u8> {
    let script = Script::load(&args.script)?;
    let state = AppState::new(ctx.catalog.clone(), ctx.auth);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    tracing::info!(steps = script.steps.len(), "running session script");
    let report = runtime.block_on(run_script(&state, &script));

    if ctx.json {
        print_json(&report)?;
    } else {
        print_text(&report);
    }
    Ok(if report.succeeded() { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use dlb_catalog::Catalog;
    use dlb_state::AuthConfig;

    fn state() -> AppState {
        AppState::new(Arc::new(Catalog::seeded().unwrap()), AuthConfig::instant())
    }

    const DEMO: &str = r#"
steps:
  - login: { email: JOHN@example.com, password: pw }
  - bookmark: { section: sec-2, notes: compare }
  - annotate: { section: sec-2, content: first pass }
  - update: { annotation: last, content: second pass, public: true }
  - toggle: { section: sec-4 }
  - logout
"#;

    #[test]
    fn parses_steps() {
        let script = Script::parse(DEMO).unwrap();
        assert_eq!(script.steps.len(), 6);
        assert_eq!(
            script.steps[0],
            Step::Login {
                email: "JOHN@example.com".into(),
                password: "pw".into()
            }
        );
        assert_eq!(script.steps[5], Step::Logout);
        assert!(matches!(script.steps[2], Step::Annotate { public: false, .. }));
    }

    #[test]
    fn logout_accepts_bare_string() {
        let script = Script::parse("steps:\n  - logout\n  - toggle: { section: sec-1 }\n").unwrap();
        assert_eq!(script.steps[0], Step::Logout);
        assert_eq!(
            script.steps[1],
            Step::Toggle {
                section: "sec-1".parse().unwrap()
            }
        );
    }

    #[test]
    fn rejects_unknown_field_in_step() {
        assert!(Script::parse("steps:\n  - toggle: { section: sec-1, colour: red }\n").is_err());
    }

    #[test]
    fn rejects_unknown_step() {
        assert!(Script::parse("steps:\n  - dance: { section: sec-1 }\n").is_err());
    }

    #[tokio::test]
    async fn demo_script_succeeds() {
        let state = state();
        let script = Script::parse(DEMO).unwrap();
        let report = run_script(&state, &script).await;
        assert!(report.succeeded(), "{:?}", report.steps);

        assert_eq!(report.overlays.len(), 1);
        let overlay = &report.overlays[0];
        assert_eq!(overlay.user_id, "user-1");
        // Seeded bm-1 stays; seeded bm-2 on sec-4 was toggled off.
        let sections: Vec<&str> = overlay
            .bookmarks
            .iter()
            .map(|d| d.bookmark.section_id.as_str())
            .collect();
        assert_eq!(sections, vec!["sec-1", "sec-2"]);
        assert_eq!(overlay.annotations[0].content, "second pass");
        assert!(overlay.annotations[0].is_public);
        assert_eq!(report.events.len(), 4);
    }

    #[tokio::test]
    async fn long_script_reports_every_event() {
        let state = state();
        let mut raw = String::from("steps:\n  - login: { email: admin@example.com, password: pw }\n");
        for _ in 0..300 {
            raw.push_str("  - bookmark: { section: sec-3 }\n");
        }
        let script = Script::parse(&raw).unwrap();
        let report = run_script(&state, &script).await;
        assert!(report.succeeded());
        assert_eq!(report.steps.len(), 301);
        assert_eq!(report.events.len(), 300);
        assert!(report
            .events
            .iter()
            .all(|e| matches!(e, StateEvent::BookmarkAdded { .. })));
    }

    #[test]
    fn lagged_receiver_keeps_newest_events() {
        let bus = dlb_state::EventBus::with_capacity(4);
        let mut rx = bus.subscribe();
        for i in 0..10 {
            bus.emit(StateEvent::BookmarkRemoved {
                id: format!("bm-{i}").parse().unwrap(),
            });
        }
        let mut out = Vec::new();
        drain_events(&mut rx, &mut out);
        assert_eq!(out.len(), 4);
        assert_eq!(
            out[3],
            StateEvent::BookmarkRemoved {
                id: "bm-9".parse().unwrap()
            }
        );
    }

    #[tokio::test]
    async fn bundled_demo_runs_clean() {
        let state = state();
        let script = Script::parse(include_str!("../../../demos/session.yaml")).unwrap();
        let report = run_script(&state, &script).await;
        assert!(report.succeeded(), "{:?}", report.steps);
        assert_eq!(report.overlays.len(), 2);
        assert_eq!(
            state
                .annotations
                .get(&"anno-1".parse().unwrap())
                .unwrap()
                .verification_status,
            Some(VerificationStatus::Verified)
        );
    }

    #[tokio::test]
    async fn anonymous_steps_fail_and_continue() {
        let state = state();
        let script = Script::parse(
            r#"
steps:
  - bookmark: { section: sec-1 }
  - login: { email: jane@example.com, password: pw }
  - delete: { annotation: anno-1 }
  - verify: { annotation: anno-1, status: verified }
  - update: { annotation: last, content: x }
"#,
        )
        .unwrap();
        let report = run_script(&state, &script).await;
        let ok: Vec<bool> = report.steps.iter().map(|s| s.ok).collect();
        assert_eq!(ok, vec![false, true, false, true, false]);
        assert!(report.steps[0].detail.contains("not authenticated"));
        assert!(report.steps[2].detail.contains("does not own"));
        assert!(!report.succeeded());
        assert!(state.annotations.get(&"anno-1".parse().unwrap()).is_some());
    }
}

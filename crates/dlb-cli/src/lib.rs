//! # dlb-cli: Command-Line Front End
//!
//! Provides the `dlb` binary.
//!
//! ## Subcommands
//!
//! - `dlb jurisdictions` lists every jurisdiction with its ancestor path.
//! - `dlb chain <id>` prints the root-first ancestor chain.
//! - `dlb acts --jurisdiction <id>` lists acts, by tier or by law type.
//! - `dlb act <id>` and `dlb section <id>` show a single record.
//! - `dlb search <query>` runs a filtered section search.
//! - `dlb session <script.yaml>` replays a reader session.
//!
//! ```bash
//! dlb acts --jurisdiction jur-3 --scope state
//! dlb --json search motor --category traffic
//! dlb -vv --config dlb.yaml session demo.yaml
//! ```
//!
//! Exit codes: 0 on success, 1 on error, 2 when the requested record does
//! not exist.

pub mod browse;
pub mod config;
pub mod output;
pub mod search;
pub mod session;

use std::sync::Arc;

use anyhow::Result;

use dlb_catalog::Catalog;
use dlb_state::AuthConfig;

pub use config::CliConfig;

/// Exit code for a record that does not exist.
pub const EXIT_NOT_FOUND: u8 = 2;

/// Everything a subcommand needs.
#[derive(Debug, Clone)]
pub struct Context {
    pub catalog: Arc<Catalog>,
    pub auth: AuthConfig,
    /// Emit pretty JSON instead of text.
    pub json: bool,
}

impl Context {
    /// Open the configured catalog.
    pub fn from_config(config: &CliConfig, json: bool) -> Result<Self> {
        Ok(Self {
            catalog: Arc::new(config.open_catalog()?),
            auth: config.auth_config(),
            json,
        })
    }
}

/// Report a missing record and return [`EXIT_NOT_FOUND`].
pub(crate) fn not_found(kind: &str, id: &str) -> u8 {
    eprintln!("{kind} not found: {id}");
    EXIT_NOT_FOUND
}

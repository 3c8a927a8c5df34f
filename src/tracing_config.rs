//! Tracing configuration for the template runtime.
//!
//! Output format is chosen with `TMPL_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented span hierarchy via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! # Which members each host type exposes, and how
//! TMPL_LOG=tmpl_access=debug my-app
//!
//! # Every lookup and call, as a tree
//! TMPL_LOG=trace TMPL_LOG_FORMAT=tree my-app
//! ```
//!
//! Nothing is installed unless `TMPL_LOG` or `RUST_LOG` is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "TMPL_LOG";
const LOG_FORMAT_VAR: &str = "TMPL_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Case-insensitive; anything unrecognized is `Text`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::from_name(&std::env::var(LOG_FORMAT_VAR).unwrap_or_default())
    }
}

/// `TMPL_LOG` wins over `RUST_LOG`; both use the `RUST_LOG` directive syntax.
fn build_filter() -> Option<EnvFilter> {
    if let Ok(directives) = std::env::var(LOG_VAR) {
        return Some(EnvFilter::builder().parse_lossy(directives));
    }
    std::env::var("RUST_LOG")
        .ok()
        .map(|_| EnvFilter::from_default_env())
}

/// Install the global subscriber, writing to stderr.
///
/// Returns `false` when logging was not requested, or when another
/// subscriber is already installed.
pub fn init_tracing() -> bool {
    let Some(filter) = build_filter() else {
        return false;
    };

    let installed = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish()
            .try_init(),
    };
    installed.is_ok()
}

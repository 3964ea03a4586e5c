//! Application state for the web layer.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{LineId, SectionPath};

/// Section paths by line.
pub type LineRegistry = HashMap<LineId, SectionPath>;

/// Shared application state.
///
/// The mutex serializes every request touching line data, so each
/// `SectionPath` sees one writer at a time.
#[derive(Clone, Default)]
pub struct AppState {
    pub lines: Arc<Mutex<LineRegistry>>,
}

impl AppState {
    /// Create an empty app state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an app state preloaded with the given paths.
    pub fn with_lines(paths: impl IntoIterator<Item = SectionPath>) -> Self {
        let lines: LineRegistry = paths.into_iter().map(|p| (p.line(), p)).collect();
        Self {
            lines: Arc::new(Mutex::new(lines)),
        }
    }
}

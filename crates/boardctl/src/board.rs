//! Board selection: explicit id, short link, or name match.

use anyhow::Result;
use trello::TrelloClient;

/// Board the scripts operate on unless told otherwise.
pub const DEFAULT_BOARD_NAME: &str = "ReThread Sprint Board";

/// Where to find the target board, in order of preference.
#[derive(Debug, Clone)]
pub struct BoardLocator {
    pub board_id: Option<String>,
    pub short_link: Option<String>,
    pub board_name: String,
}

impl BoardLocator {
    /// Build a locator from `TRELLO_BOARD_ID` / `TRELLO_BOARD_SHORT_LINK`
    /// with a name-match fallback.
    pub fn from_env(board_name: &str) -> Self {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            board_id: read("TRELLO_BOARD_ID"),
            short_link: read("TRELLO_BOARD_SHORT_LINK"),
            board_name: board_name.to_string(),
        }
    }

    /// Use a default short link when neither env variable is set.
    #[must_use]
    pub fn or_short_link(mut self, link: &str) -> Self {
        if self.board_id.is_none() && self.short_link.is_none() {
            self.short_link = Some(link.to_string());
        }
        self
    }

    /// True when an explicit board reference was supplied (as opposed to
    /// relying on the name-match fallback).
    pub fn is_explicit(&self) -> bool {
        self.board_id.is_some() || self.short_link.is_some()
    }

    /// Resolve to a canonical board id.
    ///
    /// # Errors
    /// Returns a "board not found" error when no step resolves; callers
    /// treat this as a precondition failure.
    pub async fn resolve(&self, client: &TrelloClient) -> Result<String> {
        client
            .resolve_board_id(
                self.board_id.as_deref(),
                self.short_link.as_deref(),
                &self.board_name,
            )
            .await
    }
}

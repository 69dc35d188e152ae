//! Trello entity type definitions.

use serde::{Deserialize, Serialize};

/// Trello board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique identifier
    pub id: String,
    /// Board name
    pub name: String,
    /// Short URL (e.g., "https://trello.com/b/m47dQixP")
    #[serde(default)]
    pub short_url: Option<String>,
    /// Full URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Trello list (a column on a board)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardList {
    /// Unique identifier
    pub id: String,
    /// List name (used as a lookup key; Trello does not enforce uniqueness)
    pub name: String,
    /// Position on the board
    #[serde(default)]
    pub pos: Option<f64>,
}

/// Trello card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier
    pub id: String,
    /// Card name
    pub name: String,
    /// Card description (markdown)
    #[serde(default)]
    pub desc: String,
    /// Id of the list the card currently belongs to
    pub id_list: String,
    /// Ids of labels attached to the card
    #[serde(default)]
    pub id_labels: Vec<String>,
}

/// Trello label
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Unique identifier
    pub id: String,
    /// Label name (may be empty for color-only labels)
    #[serde(default)]
    pub name: String,
    /// Label color
    #[serde(default)]
    pub color: Option<String>,
}

/// Trello board member
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique identifier
    pub id: String,
    /// Username (login handle)
    #[serde(default)]
    pub username: String,
    /// Display name
    #[serde(default)]
    pub full_name: String,
}

/// Trello checklist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    /// Unique identifier
    pub id: String,
    /// Checklist name
    pub name: String,
}

/// Input for creating a card.
#[derive(Debug, Clone)]
pub struct NewCard {
    /// Target list id
    pub list_id: String,
    /// Card name
    pub name: String,
    /// Card description (markdown)
    pub desc: String,
    /// Due date, pre-formatted (`%Y-%m-%dT%H:%M:%S.000Z`)
    pub due: Option<String>,
    /// Position hint ("top", "bottom", or a number)
    pub pos: String,
    /// Label ids to attach on creation
    pub label_ids: Vec<String>,
}

impl NewCard {
    /// Create a card input with the common defaults (no due date, no labels,
    /// appended at the bottom of the list).
    pub fn new(list_id: impl Into<String>, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            list_id: list_id.into(),
            name: name.into(),
            desc: desc.into(),
            due: None,
            pos: "bottom".to_string(),
            label_ids: Vec::new(),
        }
    }

    /// Set the position hint.
    #[must_use]
    pub fn pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = pos.into();
        self
    }

    /// Set the due date string.
    #[must_use]
    pub fn due(mut self, due: impl Into<String>) -> Self {
        self.due = Some(due.into());
        self
    }

    /// Attach label ids on creation.
    #[must_use]
    pub fn labels(mut self, label_ids: Vec<String>) -> Self {
        self.label_ids = label_ids;
        self
    }
}

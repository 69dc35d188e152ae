//! REST client for the Trello API.
//!
//! Authentication rides along as `key`/`token` query parameters on every
//! request, which is how Trello expects API-key auth to arrive.

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use crate::models::{Board, BoardList, Card, Checklist, Label, Member, NewCard};

/// Trello API endpoint
const TRELLO_API_URL: &str = "https://api.trello.com/1";

/// Card fields fetched for board-wide card listings.
const CARD_FIELDS: &str = "id,name,desc,idList,idLabels";

/// Trello REST client
#[derive(Debug, Clone)]
pub struct TrelloClient {
    client: reqwest::Client,
    base_url: String,
    key: String,
    token: String,
}

impl TrelloClient {
    /// Create a new Trello client with an API key and token.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(key: &str, token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: TRELLO_API_URL.to_string(),
            key: key.to_string(),
            token: token.to_string(),
        })
    }

    /// Create a client against a custom base URL (for tests).
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn with_base_url(key: &str, token: &str, base_url: &str) -> Result<Self> {
        let mut client = Self::new(key, token)?;
        client.base_url = base_url.trim_end_matches('/').to_string();
        Ok(client)
    }

    fn auth(&self) -> [(&'static str, &str); 2] {
        [("key", self.key.as_str()), ("token", self.token.as_str())]
    }

    /// Check the response status and parse the JSON body.
    ///
    /// Non-success statuses surface the raw body text, matching how the tool
    /// reports individual API failures.
    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Trello API returned {status}: {body}"));
        }
        response
            .json()
            .await
            .context("Failed to parse Trello API response")
    }

    // =========================================================================
    // Board Operations
    // =========================================================================

    /// Get a board by id or short link.
    #[instrument(skip(self), fields(board = %id_or_short_link))]
    pub async fn get_board(&self, id_or_short_link: &str) -> Result<Board> {
        let response = self
            .client
            .get(format!("{}/boards/{id_or_short_link}", self.base_url))
            .query(&self.auth())
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse(response).await
    }

    /// List the boards of the authenticated member.
    #[instrument(skip(self))]
    pub async fn member_boards(&self) -> Result<Vec<Board>> {
        let response = self
            .client
            .get(format!("{}/members/me/boards", self.base_url))
            .query(&self.auth())
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse(response).await
    }

    /// Create a board without default lists, optionally inside a workspace.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn create_board(&self, name: &str, org_id: Option<&str>) -> Result<Board> {
        let mut request = self
            .client
            .post(format!("{}/boards", self.base_url))
            .query(&self.auth())
            .query(&[("name", name), ("defaultLists", "false")]);
        if let Some(org) = org_id {
            request = request.query(&[("idOrganization", org)]);
        }
        let response = request
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse(response).await
    }

    /// Resolve a board id from an explicit id, a short link, or a board name,
    /// in that order of preference.
    ///
    /// A failed lookup at one step falls through to the next; the name step
    /// scans the member's own boards for an exact name match.
    ///
    /// # Errors
    /// Returns error when no step resolves a board.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn resolve_board_id(
        &self,
        board_id: Option<&str>,
        short_link: Option<&str>,
        name: &str,
    ) -> Result<String> {
        if let Some(id) = board_id {
            if let Ok(board) = self.get_board(id).await {
                return Ok(board.id);
            }
        }
        if let Some(link) = short_link {
            if let Ok(board) = self.get_board(link).await {
                return Ok(board.id);
            }
        }
        let boards = self.member_boards().await?;
        boards
            .into_iter()
            .find(|b| b.name == name)
            .map(|b| b.id)
            .ok_or_else(|| {
                anyhow!(
                    "Board not found. Set TRELLO_BOARD_SHORT_LINK or TRELLO_BOARD_ID, \
                     or ensure a board named '{name}' exists."
                )
            })
    }

    // =========================================================================
    // List Operations
    // =========================================================================

    /// Get the lists of a board.
    #[instrument(skip(self), fields(board_id = %board_id))]
    pub async fn get_lists(&self, board_id: &str) -> Result<Vec<BoardList>> {
        let response = self
            .client
            .get(format!("{}/boards/{board_id}/lists", self.base_url))
            .query(&self.auth())
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse(response).await
    }

    /// Create a list on a board with a position hint ("top", "bottom", or a
    /// number).
    #[instrument(skip(self), fields(board_id = %board_id, name = %name))]
    pub async fn create_list(&self, board_id: &str, name: &str, pos: &str) -> Result<BoardList> {
        let response = self
            .client
            .post(format!("{}/boards/{board_id}/lists", self.base_url))
            .query(&self.auth())
            .query(&[("name", name), ("pos", pos)])
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        let list: BoardList = Self::parse(response).await?;
        debug!("Created list: {}", list.name);
        Ok(list)
    }

    // =========================================================================
    // Card Operations
    // =========================================================================

    /// Get all cards on a board (id, name, desc, list id, label ids).
    #[instrument(skip(self), fields(board_id = %board_id))]
    pub async fn get_cards(&self, board_id: &str) -> Result<Vec<Card>> {
        let response = self
            .client
            .get(format!("{}/boards/{board_id}/cards", self.base_url))
            .query(&self.auth())
            .query(&[("fields", CARD_FIELDS)])
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse(response).await
    }

    /// Create a card.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_card(&self, input: &NewCard) -> Result<Card> {
        let mut request = self
            .client
            .post(format!("{}/cards", self.base_url))
            .query(&self.auth())
            .query(&[
                ("idList", input.list_id.as_str()),
                ("name", input.name.as_str()),
                ("desc", input.desc.as_str()),
                ("pos", input.pos.as_str()),
            ]);
        if let Some(due) = &input.due {
            request = request.query(&[("due", due.as_str())]);
        }
        if !input.label_ids.is_empty() {
            request = request.query(&[("idLabels", input.label_ids.join(",").as_str())]);
        }
        let response = request
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse(response).await
    }

    /// Move a card to another list.
    #[instrument(skip(self), fields(card_id = %card_id, list_id = %list_id))]
    pub async fn move_card(&self, card_id: &str, list_id: &str) -> Result<()> {
        let response = self
            .client
            .put(format!("{}/cards/{card_id}", self.base_url))
            .query(&self.auth())
            .json(&json!({ "idList": list_id }))
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse::<serde_json::Value>(response).await.map(|_| ())
    }

    /// Archive (close) a card.
    #[instrument(skip(self), fields(card_id = %card_id))]
    pub async fn archive_card(&self, card_id: &str) -> Result<()> {
        let response = self
            .client
            .put(format!("{}/cards/{card_id}", self.base_url))
            .query(&self.auth())
            .json(&json!({ "closed": true }))
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse::<serde_json::Value>(response).await.map(|_| ())
    }

    // =========================================================================
    // Label Operations
    // =========================================================================

    /// Get the labels of a board.
    #[instrument(skip(self), fields(board_id = %board_id))]
    pub async fn get_labels(&self, board_id: &str) -> Result<Vec<Label>> {
        let response = self
            .client
            .get(format!("{}/boards/{board_id}/labels", self.base_url))
            .query(&self.auth())
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse(response).await
    }

    /// Create a label on a board.
    #[instrument(skip(self), fields(board_id = %board_id, name = %name))]
    pub async fn create_label(&self, board_id: &str, name: &str, color: &str) -> Result<Label> {
        let response = self
            .client
            .post(format!("{}/labels", self.base_url))
            .query(&self.auth())
            .query(&[("name", name), ("color", color), ("idBoard", board_id)])
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse(response).await
    }

    /// Get a label by exact (trimmed) name, creating it if absent.
    #[instrument(skip(self), fields(board_id = %board_id, name = %name))]
    pub async fn get_or_create_label(
        &self,
        board_id: &str,
        name: &str,
        color: &str,
    ) -> Result<Label> {
        let labels = self.get_labels(board_id).await?;
        if let Some(label) = labels.into_iter().find(|l| l.name.trim() == name) {
            debug!("Found existing label: {}", label.name);
            return Ok(label);
        }
        debug!("Creating label: {name}");
        self.create_label(board_id, name, color).await
    }

    /// Attach a label to a card.
    #[instrument(skip(self), fields(card_id = %card_id, label_id = %label_id))]
    pub async fn add_label_to_card(&self, card_id: &str, label_id: &str) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/cards/{card_id}/idLabels", self.base_url))
            .query(&self.auth())
            .query(&[("value", label_id)])
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse::<serde_json::Value>(response).await.map(|_| ())
    }

    // =========================================================================
    // Member Operations
    // =========================================================================

    /// Get the members of a board.
    #[instrument(skip(self), fields(board_id = %board_id))]
    pub async fn get_members(&self, board_id: &str) -> Result<Vec<Member>> {
        let response = self
            .client
            .get(format!("{}/boards/{board_id}/members", self.base_url))
            .query(&self.auth())
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse(response).await
    }

    /// Assign a member to a card.
    #[instrument(skip(self), fields(card_id = %card_id, member_id = %member_id))]
    pub async fn add_member_to_card(&self, card_id: &str, member_id: &str) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/cards/{card_id}/idMembers", self.base_url))
            .query(&self.auth())
            .query(&[("value", member_id)])
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse::<serde_json::Value>(response).await.map(|_| ())
    }

    // =========================================================================
    // Checklist Operations
    // =========================================================================

    /// Create a checklist on a card.
    #[instrument(skip(self), fields(card_id = %card_id, name = %name))]
    pub async fn create_checklist(&self, card_id: &str, name: &str) -> Result<Checklist> {
        let response = self
            .client
            .post(format!("{}/checklists", self.base_url))
            .query(&self.auth())
            .query(&[("idCard", card_id), ("name", name)])
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse(response).await
    }

    /// Add an unchecked item to a checklist.
    #[instrument(skip(self), fields(checklist_id = %checklist_id))]
    pub async fn add_check_item(&self, checklist_id: &str, name: &str) -> Result<()> {
        let response = self
            .client
            .post(format!(
                "{}/checklists/{checklist_id}/checkItems",
                self.base_url
            ))
            .query(&self.auth())
            .json(&json!({ "name": name }))
            .send()
            .await
            .context("Failed to send request to Trello API")?;
        Self::parse::<serde_json::Value>(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let result = TrelloClient::new("test-key", "test-token");
        assert!(result.is_ok());
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let client = TrelloClient::with_base_url("k", "t", "http://localhost:9999/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}

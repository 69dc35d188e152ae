//! Trello REST API client.
//!
//! A thin, typed wrapper over the handful of Trello endpoints the board
//! tooling needs: board lookup and creation, lists, cards (create, move,
//! archive), labels, members, and checklists. Every run re-fetches remote
//! state; nothing is cached locally.
//!
//! # Example
//!
//! ```no_run
//! use trello::{NewCard, TrelloClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = TrelloClient::new("api-key", "token")?;
//! let board_id = client
//!     .resolve_board_id(None, Some("m47dQixP"), "ReThread Sprint Board")
//!     .await?;
//! let lists = client.get_lists(&board_id).await?;
//! client
//!     .create_card(&NewCard::new(lists[0].id.clone(), "Weekly sync", ""))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod models;

pub use client::TrelloClient;
pub use models::{Board, BoardList, Card, Checklist, Label, Member, NewCard};

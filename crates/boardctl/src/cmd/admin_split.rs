//! Add an "Admin / Setup" list and move setup/operational cards out of the
//! week columns so those hold phase work only.

use std::collections::HashSet;

use anyhow::{Context, Result};
use tracing::warn;
use trello::TrelloClient;

use crate::classify;

pub const ADMIN_LIST_NAME: &str = "Admin / Setup";

const WEEK_A_LIST: &str = "Week A: Discovery";
const WEEK_B_LIST: &str = "Week B: Execution";

/// Cards in Week A or Week B containing any of these move to Admin / Setup.
const ADMIN_CARD_SUBSTRINGS: &[&str] = &[
    "Social media (LinkedIn, Instagram)",
    "Content publishing",
    "Landing page",
    "Client-facing website",
    "Case studies / portfolio",
    "Publish Upwork automation analysis",
    "Publish Upwork automation",
    "Add research-as-a-service to backlog",
    "research-as-a-service",
];

/// Run the admin/setup split against a resolved board.
///
/// # Errors
/// Returns error on precondition failures: fetching lists or cards, or
/// creating the Admin / Setup list when it is missing.
pub async fn run(client: &TrelloClient, board_id: &str) -> Result<()> {
    let lists = client.get_lists(board_id).await?;

    let admin_list_id = match lists.iter().find(|l| l.name == ADMIN_LIST_NAME) {
        Some(list) => list.id.clone(),
        None => {
            // Insert after Backlog. Unlike card moves, the run is pointless
            // without this list, so creation failure aborts.
            let list = client
                .create_list(board_id, ADMIN_LIST_NAME, "2")
                .await
                .with_context(|| format!("Failed to create list '{ADMIN_LIST_NAME}'"))?;
            println!("Created list: {ADMIN_LIST_NAME}");
            list.id
        }
    };

    let watched: HashSet<String> = lists
        .iter()
        .filter(|l| l.name == WEEK_A_LIST || l.name == WEEK_B_LIST)
        .map(|l| l.id.clone())
        .collect();

    let cards = client.get_cards(board_id).await?;
    let mut moved = 0;
    for card in classify::admin_moves(&cards, &watched, ADMIN_CARD_SUBSTRINGS) {
        match client.move_card(&card.id, &admin_list_id).await {
            Ok(()) => {
                println!("  Moved to {ADMIN_LIST_NAME}: {}", card.name);
                moved += 1;
            }
            Err(e) => warn!("Failed to move '{}': {e:#}", card.name),
        }
    }

    println!("\nDone. Moved {moved} card(s) to {ADMIN_LIST_NAME}.");
    println!(
        "Board: Backlog | {ADMIN_LIST_NAME} | {WEEK_A_LIST} | {WEEK_B_LIST} | Blocked / Waiting | Done"
    );
    println!("Use Week A / Week B for phase work only; top card = in progress (or add label 'In progress').");
    Ok(())
}

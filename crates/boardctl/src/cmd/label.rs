//! Tag every card outside Admin / Setup with the "Transportation" label,
//! creating the label on the board if needed.

use std::collections::HashSet;

use anyhow::Result;
use tracing::warn;
use trello::TrelloClient;

use super::admin_split::ADMIN_LIST_NAME;
use crate::classify;

const LABEL_NAME: &str = "Transportation";
const LABEL_COLOR: &str = "green";

/// Run the label tagging against a resolved board.
///
/// # Errors
/// Returns error on precondition failures: fetching lists, cards, or labels,
/// or creating the label when it is missing.
pub async fn run(client: &TrelloClient, board_id: &str) -> Result<()> {
    let lists = client.get_lists(board_id).await?;
    let excluded: HashSet<String> = lists
        .iter()
        .filter(|l| l.name == ADMIN_LIST_NAME)
        .map(|l| l.id.clone())
        .collect();

    let label = client
        .get_or_create_label(board_id, LABEL_NAME, LABEL_COLOR)
        .await?;

    let cards = client.get_cards(board_id).await?;
    let mut added = 0;
    for card in classify::label_targets(&cards, &excluded, &label.id) {
        match client.add_label_to_card(&card.id, &label.id).await {
            Ok(()) => {
                println!("  + {LABEL_NAME}: {}", card.name);
                added += 1;
            }
            Err(e) => warn!("Failed to tag '{}': {e:#}", card.name),
        }
    }

    println!(
        "\nDone. Added '{LABEL_NAME}' to {added} card(s). Cards in {ADMIN_LIST_NAME} were left untagged."
    );
    Ok(())
}

//! Create (or extend) the sprint board from the process data: Backlog plus
//! one list per phase, each seeded with a template card and checklist, and
//! the spec template cards attached at their phases.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;
use trello::{Board, NewCard, TrelloClient};

use crate::board::{BoardLocator, DEFAULT_BOARD_NAME};
use crate::process::{Phase, SpecTemplate, SprintProcess};

const BACKLOG_LIST: &str = "Backlog";
const BACKLOG_CARD_NAME: &str = "📋 Backlog / Kill — Copy for new ideas or kill notes";
const BACKLOG_CARD_DESC: &str = "**Use this list for:**\n\
- New ideas (to triage into the sprint)\n\
- Kill decisions: when you kill an idea in Phase 3, add a card here with 1–2 sentences on why and what you learned.";

/// Phase numbers that get the problem spec template card.
const PROBLEM_SPEC_PHASES: &[u32] = &[1, 4];
/// Phase number that gets the solution spec template card.
const SOLUTION_SPEC_PHASE: u32 = 4;
/// Phase number that gets the release post template card.
const RELEASE_POST_PHASE: u32 = 6;

/// Run the board bootstrap.
///
/// Uses an existing board when `TRELLO_BOARD_ID` or `TRELLO_BOARD_SHORT_LINK`
/// is set; otherwise creates the board (inside `TRELLO_ORG_ID` when set).
///
/// # Errors
/// Returns error on precondition failures: unreadable process data, or the
/// board itself cannot be resolved/created. Individual list and card
/// creations are reported and skipped on failure.
pub async fn run(client: &TrelloClient, data_path: &Path) -> Result<()> {
    let process = SprintProcess::load(data_path)?;

    let locator = BoardLocator::from_env(DEFAULT_BOARD_NAME);
    let board = if locator.is_explicit() {
        let board_id = locator.resolve(client).await?;
        let board = client.get_board(&board_id).await?;
        println!(
            "Using existing board: {}",
            board.short_url.as_deref().unwrap_or(&board.id)
        );
        board
    } else {
        let org_id = std::env::var("TRELLO_ORG_ID")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let board = client
            .create_board(DEFAULT_BOARD_NAME, org_id.as_deref())
            .await
            .context("Failed to create board")?;
        println!(
            "Board created: {}",
            board.short_url.as_deref().unwrap_or(&board.id)
        );
        board
    };
    let extending_existing = locator.is_explicit();

    // Backlog first, then one list per phase.
    let mut list_names = vec![BACKLOG_LIST.to_string()];
    list_names.extend(process.phases.iter().map(Phase::display_name));

    let mut list_ids: HashMap<String, String> = if extending_existing {
        client
            .get_lists(&board.id)
            .await?
            .into_iter()
            .map(|l| (l.name, l.id))
            .collect()
    } else {
        HashMap::new()
    };

    for (i, name) in list_names.iter().enumerate() {
        if list_ids.contains_key(name) {
            println!("  List (existing): {name}");
            continue;
        }
        // Appending to an existing board goes to the end; a fresh board
        // gets explicit ordering.
        let pos = if extending_existing {
            "bottom".to_string()
        } else {
            (i + 1).to_string()
        };
        match client.create_list(&board.id, name, &pos).await {
            Ok(list) => {
                list_ids.insert(name.clone(), list.id);
                println!("  List: {name}");
            }
            Err(e) => warn!("Failed to create list '{name}': {e:#}"),
        }
    }

    if let Some(backlog_id) = list_ids.get(BACKLOG_LIST) {
        let input = NewCard::new(backlog_id.clone(), BACKLOG_CARD_NAME, BACKLOG_CARD_DESC)
            .pos("top");
        match client.create_card(&input).await {
            Ok(_) => println!("  Backlog template card created."),
            Err(e) => warn!("Failed to create backlog template card: {e:#}"),
        }
    }

    for phase in &process.phases {
        let Some(list_id) = list_ids.get(&phase.display_name()) else {
            continue;
        };

        let card_name = format!("Template: {}", phase.title);
        let input = NewCard::new(list_id.clone(), card_name.clone(), phase.template_desc())
            .pos("top");
        let card = match client.create_card(&input).await {
            Ok(card) => card,
            Err(e) => {
                warn!("Failed phase card '{card_name}': {e:#}");
                continue;
            }
        };
        if !phase.checklist.is_empty() {
            add_checklist(client, &card.id, "Phase checklist", phase).await;
        }
        println!("  Phase {}: {card_name}", phase.num);

        if PROBLEM_SPEC_PHASES.contains(&phase.num) {
            add_spec_card(client, list_id, process.templates.problem_spec.as_ref()).await;
        }
        if phase.num == SOLUTION_SPEC_PHASE {
            add_spec_card(client, list_id, process.templates.solution_spec.as_ref()).await;
        }
        if phase.num == RELEASE_POST_PHASE {
            add_spec_card(client, list_id, process.templates.release_post.as_ref()).await;
        }
    }

    println!(
        "\nDone. Board URL: {}",
        board_url(&board).unwrap_or_else(|| board.id.clone())
    );
    Ok(())
}

fn board_url(board: &Board) -> Option<String> {
    board.url.clone().or_else(|| board.short_url.clone())
}

async fn add_checklist(client: &TrelloClient, card_id: &str, name: &str, phase: &Phase) {
    let checklist = match client.create_checklist(card_id, name).await {
        Ok(checklist) => checklist,
        Err(e) => {
            warn!("Failed to create checklist on phase {} card: {e:#}", phase.num);
            return;
        }
    };
    for item in &phase.checklist {
        if let Err(e) = client.add_check_item(&checklist.id, item.label()).await {
            warn!("Failed to add check item '{}': {e:#}", item.label());
        }
    }
}

async fn add_spec_card(client: &TrelloClient, list_id: &str, template: Option<&SpecTemplate>) {
    let Some(template) = template else { return };
    let input = NewCard::new(
        list_id.to_string(),
        format!("📄 {}", template.title),
        template.card_desc(),
    );
    match client.create_card(&input).await {
        Ok(_) => println!("    + {}", template.title),
        Err(e) => warn!("Failed spec card '{}': {e:#}", template.title),
    }
}

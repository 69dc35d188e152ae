//! Restructure the sprint board to the Option A taxonomy:
//! Backlog | Week A: Discovery | Week B: Execution | Blocked / Waiting | Done.
//!
//! Cards move by old-list-name rule, a fixed denylist of unrelated product
//! ideas is archived, and the agreed follow-up tasks are appended with a
//! 2-day SLA. Safe to re-run.

use anyhow::Result;
use chrono::Utc;
use trello::TrelloClient;

use crate::plan::{self, BoardState, NewTask, Restructure};

/// Option A list names, in display order.
const OPTION_A_LISTS: &[&str] = &[
    "Backlog",
    "Week A: Discovery",
    "Week B: Execution",
    "Blocked / Waiting",
    "Done",
];

/// Old list name -> new list name (for moving cards).
const OLD_TO_NEW_LIST: &[(&str, &str)] = &[
    ("Idea Backlog", "Backlog"),
    ("Research (Pre-Sprint)", "Backlog"),
    ("Current Sprint", "Week A: Discovery"),
    ("Sprint Backlog", "Week A: Discovery"),
    ("Active", "Week B: Execution"),
    ("Blocked / Waiting", "Blocked / Waiting"),
    ("Done", "Done"),
];

/// Cards from unknown lists end up here.
const FALLBACK_LIST: &str = "Backlog";

/// Exact card names to archive (unrelated ideas; removed from the board).
const ARCHIVE_CARD_NAMES: &[&str] = &[
    "Camping checklist web app",
    "Vibe System Design Tool - IDE for Architecture Planning",
    "NetWorth Hub - Multi-Entity Financial Dashboard SaaS",
    "Open Source: Fitness on the Fly - Private LLM Personal Trainer",
];

/// Agreed tasks: (name, desc, target list, SLA days).
const AGREED_TASKS: &[(&str, &str, &str, i64)] = &[
    (
        "Ahmad: Publish branch for internal process",
        "Publish branch for our internal process.",
        "Week A: Discovery",
        2,
    ),
    (
        "Moaz: Scrutinize and provide feedback",
        "Scrutinize and provide feedback on internal process.",
        "Week A: Discovery",
        2,
    ),
    (
        "Moaz: Create board for new process in Trello",
        "Create board for new process in Trello.",
        "Week A: Discovery",
        2,
    ),
    (
        "Ahmad: Client-facing website for ReThread Research Lab",
        "Create client-facing website for ReThread Research Lab.",
        "Week B: Execution",
        2,
    ),
    (
        "Moaz/Ahmad: Case studies / portfolio",
        "Include case studies/portfolio: Microsoft, Tripadvisor, Japan Airlines, Alma Transport, Clearcasa.",
        "Week B: Execution",
        2,
    ),
    (
        "Ahmad: Landing page – process and who you've worked with",
        "Landing page explaining process and who you've worked with.",
        "Week B: Execution",
        2,
    ),
    (
        "Moaz: Social media (LinkedIn, Instagram) – ReThread brand",
        "Set up social media accounts (LinkedIn, Instagram) under ReThread brand. Research lab positioning: we're figuring out how to help SMBs.",
        "Week B: Execution",
        2,
    ),
    (
        "Moaz: Publish Upwork automation analysis as first public content",
        "Publish the Upwork automation analysis you already built as first public content piece.",
        "Week B: Execution",
        2,
    ),
    (
        "Moaz: Content publishing pipeline",
        "Create content publishing pipeline – automate posting across Substack, Instagram, Facebook, LinkedIn from single source.",
        "Week B: Execution",
        2,
    ),
    (
        "Ahmad/Moaz: Transportation research/content – organize and publish",
        "Add research/content from transportation; organize research and publish it.",
        "Week B: Execution",
        2,
    ),
    (
        "Ahmad: Fix errors – route optimizer MVP/POC",
        "Fix errors on route optimizer MVP/POC.",
        "Week B: Execution",
        2,
    ),
    (
        "Moaz: Add research-as-a-service to backlog for next sprint",
        "Add research as a service item to our backlog for next sprint.",
        "Week A: Discovery",
        2,
    ),
];

/// Build the declarative restructure description from the static tables.
pub fn restructure_spec() -> Restructure {
    Restructure {
        target_lists: OPTION_A_LISTS.iter().map(|s| s.to_string()).collect(),
        rename: OLD_TO_NEW_LIST
            .iter()
            .map(|(old, new)| (old.to_string(), new.to_string()))
            .collect(),
        fallback_list: FALLBACK_LIST.to_string(),
        archive: ARCHIVE_CARD_NAMES.iter().map(|s| s.to_string()).collect(),
        new_tasks: AGREED_TASKS
            .iter()
            .map(|(name, desc, list, sla_days)| NewTask {
                name: name.to_string(),
                desc: desc.to_string(),
                list: list.to_string(),
                sla_days: *sla_days,
            })
            .collect(),
    }
}

/// Run the restructure against a resolved board.
///
/// # Errors
/// Returns error only on precondition failures (fetching the board's lists
/// or cards); per-item mutation failures are reported and skipped.
pub async fn run(client: &TrelloClient, board_id: &str) -> Result<()> {
    let state = BoardState {
        lists: client.get_lists(board_id).await?,
        cards: client.get_cards(board_id).await?,
    };

    let actions = plan::plan(&state, &restructure_spec(), Utc::now());
    let report = plan::execute(client, board_id, &state, &actions).await;

    println!(
        "\nDone. {} action(s) applied, {} failed. Option A lists: {}",
        report.applied,
        report.failed,
        OPTION_A_LISTS.join(" | ")
    );
    println!(
        "If you still see old empty lists (e.g. Idea Backlog, Research, Current Sprint), archive them in Trello."
    );
    Ok(())
}

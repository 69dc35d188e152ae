//! Seed the week-of-Feb-3 working cards into a target list, creating any
//! missing labels along the way.

use std::collections::{BTreeSet, HashMap};

use anyhow::{bail, Result};
use tracing::warn;
use trello::{NewCard, TrelloClient};

/// Short link of the board these cards belong to, used when no explicit
/// board reference is configured.
pub const BOARD_SHORT_LINK: &str = "m47dQixP";

/// Default target list; override with `--list` or `TRELLO_LIST_NAME`.
pub const DEFAULT_TARGET_LIST: &str = "To Do";

struct SeedCard {
    name: &'static str,
    labels: &'static [&'static str],
    desc: &'static str,
    checklist: &'static [&'static str],
}

const SEED_CARDS: &[SeedCard] = &[
    SeedCard {
        name: "Demo Route Optimizer to Cousin",
        labels: &["Ahmad", "High Priority"],
        desc: "Schedule 30-min screen share with cousin\n\
Use his actual booking data (get sample CSV beforehand)\n\
Capture feedback: What's missing? What's confusing? What would make him use this daily?\n\
Document his tech stack specifics (Geotab, Hudson, Fleetio, +1 more)",
        checklist: &[
            "Schedule call",
            "Get sample CSV from cousin",
            "Run demo",
            "Write up feedback notes in Trello comments",
        ],
    },
    SeedCard {
        name: "MVP Polish + Google Maps Integration",
        labels: &["Moaz", "High Priority"],
        desc: "Implement \"Open in Google Maps\" button with optimized waypoints\n\
Add \"Copy Link\" for sending to drivers\n\
Test full flow on mobile (link → Google Maps app → navigation)\n\
Deploy to Vercel with shareable URL",
        checklist: &[
            "Google Maps URL generation working",
            "Copy link + toast working",
            "Tested on mobile",
            "Deployed to Vercel",
            "Share link with Ahmad",
        ],
    },
    SeedCard {
        name: "Research Geotab + Fleetio APIs",
        labels: &["Ahmad", "Research"],
        desc: "Cousin's company uses Geotab, Hudson, Fleetio — none talk to each other\n\
Investigate API access and what data we can pull\n\
Check if there's a marketplace/partner program opportunity",
        checklist: &[
            "Geotab developer signup + API docs review",
            "Fleetio API docs review",
            "Hudson — find out what this actually is (dispatch software?)",
            "Write up: what can we connect, level of effort, marketplace opportunity?",
        ],
    },
    SeedCard {
        name: "Explore Make.com Integration Partner Program",
        labels: &["Moaz", "Research"],
        desc: "Make.com has virtually zero transportation connectors — potential gap\n\
Research their partner/creator program requirements\n\
Identify 2-3 transportation platforms with APIs but no Make connector",
        checklist: &[
            "Review Make.com partner docs",
            "List transportation platforms with APIs (Limo Anywhere, Tobi Cloud, Samsara, etc.)",
            "Check which ones already have Make connectors",
            "Draft one-pager on opportunity",
        ],
    },
    SeedCard {
        name: "Scan Upwork/Fiverr for Transportation Automation Jobs",
        labels: &["Moaz", "Research"],
        desc: "Find what people are actually paying for today\n\
Search terms: \"QuickBooks transportation\", \"fleet automation\", \"route optimization\", \"dispatch software integration\"\n\
Document patterns in buyer language and budgets",
        checklist: &[
            "Find 10-15 relevant job postings",
            "Log in spreadsheet: job title, description snippet, budget, platform",
            "Identify top 3 patterns/themes",
            "Share findings in Slack",
        ],
    },
    SeedCard {
        name: "Draft Reservations Workflow Discovery Questions",
        labels: &["Ahmad", "Discovery"],
        desc: "Cousin said reservations + dispatch multitasking is the #1 bleed area\n\
Before building anything, we need to understand the current workflow\n\
Prep questions for next call with cousin",
        checklist: &[
            "How do bookings come in? (phone, email, web, broker?)",
            "What system are they entered into?",
            "What's the handoff from reservation to dispatch?",
            "Where do things fall through the cracks?",
            "What does \"losing bookings\" look like?",
        ],
    },
    SeedCard {
        name: "Weekly Sync - Wed/Thu",
        labels: &["Moaz", "Ahmad", "Recurring"],
        desc: "Mid-week check-in to share progress and unblock\n15-30 min max",
        checklist: &["Schedule time"],
    },
    SeedCard {
        name: "QuickBooks API Proof of Concept",
        labels: &["Moaz", "Build", "High Priority"],
        desc: "Build minimal POC proving we can read/write to QuickBooks Online.\n\
Unlocks accounting integration play across all verticals.",
        checklist: &[
            "QB Developer account + sandbox",
            "Create app + OAuth credentials",
            "Pull customers list",
            "Pull invoices list",
            "Create test invoice from trip data",
            "Document flow + gotchas",
            "Estimate LOE for full integration",
        ],
    },
];

/// Label name -> Trello color (for creating missing labels).
const LABEL_COLORS: &[(&str, &str)] = &[
    ("Ahmad", "blue"),
    ("Moaz", "sky"),
    ("High Priority", "red"),
    ("Research", "purple"),
    ("Recurring", "green"),
    ("Discovery", "lime"),
    ("Build", "orange"),
];

const DEFAULT_LABEL_COLOR: &str = "gray";

fn label_color(name: &str) -> &'static str {
    LABEL_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map_or(DEFAULT_LABEL_COLOR, |(_, c)| c)
}

/// Run the card seeding against a resolved board.
///
/// # Errors
/// Returns error on precondition failures: list/label fetches, or no list
/// matching `target_list` (trimmed name comparison). Missing labels degrade
/// to unlabelled cards; per-card creation failures are reported and skipped.
pub async fn run(client: &TrelloClient, board_id: &str, target_list: &str) -> Result<()> {
    let lists = client.get_lists(board_id).await?;
    let Some(list) = lists.iter().find(|l| l.name.trim() == target_list) else {
        let names: Vec<&str> = lists.iter().map(|l| l.name.as_str()).collect();
        bail!("No list named '{target_list}'. Existing: {names:?}");
    };

    // Resolve every referenced label up front, creating missing ones.
    let needed: BTreeSet<&str> = SEED_CARDS
        .iter()
        .flat_map(|c| c.labels.iter().copied())
        .collect();
    let mut label_ids: HashMap<String, String> = client
        .get_labels(board_id)
        .await?
        .into_iter()
        .filter(|l| !l.name.is_empty())
        .map(|l| (l.name, l.id))
        .collect();
    for name in needed {
        if label_ids.contains_key(name) {
            continue;
        }
        match client.create_label(board_id, name, label_color(name)).await {
            Ok(label) => {
                label_ids.insert(name.to_string(), label.id);
            }
            Err(e) => warn!("Could not create label '{name}': {e:#}"),
        }
    }

    let mut created = 0;
    for seed in SEED_CARDS {
        let ids: Vec<String> = seed
            .labels
            .iter()
            .filter_map(|name| label_ids.get(*name).cloned())
            .collect();
        let input = NewCard::new(list.id.clone(), seed.name, seed.desc).labels(ids);
        let card = match client.create_card(&input).await {
            Ok(card) => card,
            Err(e) => {
                warn!("Failed to create card '{}': {e:#}", seed.name);
                continue;
            }
        };
        if !seed.checklist.is_empty() {
            add_seed_checklist(client, &card.id, seed).await;
        }
        println!("  Created: {}", seed.name);
        created += 1;
    }

    println!("\nDone. Created {created} card(s) in '{target_list}'.");
    Ok(())
}

async fn add_seed_checklist(client: &TrelloClient, card_id: &str, seed: &SeedCard) {
    let checklist = match client.create_checklist(card_id, "Checklist").await {
        Ok(checklist) => checklist,
        Err(e) => {
            warn!("Failed to create checklist on '{}': {e:#}", seed.name);
            return;
        }
    };
    for item in seed.checklist {
        if let Err(e) = client.add_check_item(&checklist.id, item).await {
            warn!("Failed to add check item '{item}': {e:#}");
        }
    }
}

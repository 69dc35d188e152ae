//! Add phase placeholder cards to Week A and Week B, with the checklist from
//! the process data and the week lead assigned where resolvable.

use std::path::Path;

use anyhow::{bail, Result};
use tracing::warn;
use trello::{NewCard, TrelloClient};

use crate::members;
use crate::process::{ChecklistItem, SprintProcess};
use crate::secrets::Secrets;

const WEEK_A_LIST: &str = "Week A: Discovery";
const WEEK_B_LIST: &str = "Week B: Execution";

/// Lead per week tag: (week, person key, default Trello username, display name).
const LEAD_BY_WEEK: &[(&str, &str, &str, &str)] = &[
    ("A", "moaz", "moazelhag", "Moaz"),
    ("B", "ahmad", "ahmadtaleb", "Ahmad"),
];

struct Lead {
    member_id: Option<String>,
    display: &'static str,
}

/// The lead for a week tag, or `None` for an unknown tag.
fn lead_for_week<'a>(leads: &'a [(String, Lead)], week: &str) -> Option<&'a Lead> {
    leads.iter().find(|(w, _)| w == week).map(|(_, l)| l)
}

/// Run the placeholder creation against a resolved board.
///
/// # Errors
/// Returns error on precondition failures: unreadable process data, list or
/// card fetch failures, or missing Week A / Week B lists. Unresolved leads
/// and failed checklist/assignment posts degrade to warnings.
pub async fn run(
    client: &TrelloClient,
    board_id: &str,
    data_path: &Path,
    secrets: &Secrets,
) -> Result<()> {
    let process = SprintProcess::load(data_path)?;

    let lists = client.get_lists(board_id).await?;
    let week_a = lists.iter().find(|l| l.name == WEEK_A_LIST);
    let week_b = lists.iter().find(|l| l.name == WEEK_B_LIST);
    let (Some(week_a), Some(week_b)) = (week_a, week_b) else {
        bail!(
            "Need lists '{WEEK_A_LIST}' and '{WEEK_B_LIST}'. Create them first or run `boardctl restructure`."
        );
    };

    // Member fetch failure leaves every lead unresolved; cards are still
    // created, just unassigned.
    let board_members = match client.get_members(board_id).await {
        Ok(members) => members,
        Err(e) => {
            warn!("Failed to fetch board members: {e:#}");
            Vec::new()
        }
    };

    let leads: Vec<(String, Lead)> = LEAD_BY_WEEK
        .iter()
        .map(|&(week, person, default_username, display)| {
            let username = secrets
                .member_username(person)
                .unwrap_or_else(|| default_username.to_string());
            let member_id = members::resolve_member_id(&board_members, &username, person);
            if member_id.is_none() {
                // `display` would be shadowed by `tracing::field::display`
                // inside the macro expansion, so rebind it first.
                let lead_display = display;
                warn!(
                    "Could not resolve {lead_display} (Week {week} lead). \
                     Add trello.member_username_{person} to secrets.json (e.g. {default_username})."
                );
            }
            (week.to_string(), Lead { member_id, display })
        })
        .collect();

    for phase in &process.phases {
        let list = if phase.week == "B" { week_b } else { week_a };
        let lead = lead_for_week(&leads, &phase.week);

        let card_name = phase.display_name();
        let mut desc = phase.placeholder_desc();
        if let Some(lead) = lead {
            desc.push_str(&format!("\n\n**Lead:** {}", lead.display));
        }

        let card = match client
            .create_card(&NewCard::new(list.id.clone(), card_name.clone(), desc))
            .await
        {
            Ok(card) => card,
            Err(e) => {
                warn!("Failed to create card '{card_name}': {e:#}");
                continue;
            }
        };

        add_phase_checklist(client, &card.id, phase.num, &phase.checklist).await;

        match lead.and_then(|l| l.member_id.as_deref()) {
            Some(member_id) => match client.add_member_to_card(&card.id, member_id).await {
                Ok(()) => println!("  Created + assigned lead: {card_name}"),
                Err(e) => {
                    warn!("Failed to assign lead on '{card_name}': {e:#}");
                    println!("  Created (assign lead manually): {card_name}");
                }
            },
            None => println!("  Created (assign lead manually): {card_name}"),
        }
    }

    println!(
        "\nDone. Phase placeholders are in {WEEK_A_LIST} and {WEEK_B_LIST} with checklists from the process data."
    );
    Ok(())
}

/// Attach the phase checklist; failures leave the card in place with a note
/// to finish by hand.
async fn add_phase_checklist(
    client: &TrelloClient,
    card_id: &str,
    phase_num: u32,
    items: &[ChecklistItem],
) {
    if items.is_empty() {
        return;
    }
    let name = format!("Phase {phase_num} checklist");
    let checklist = match client.create_checklist(card_id, &name).await {
        Ok(checklist) => checklist,
        Err(e) => {
            warn!("Failed to create '{name}' (add checklist manually): {e:#}");
            return;
        }
    };
    for item in items {
        if let Err(e) = client.add_check_item(&checklist.id, item.label()).await {
            warn!(
                "Failed to add check item '{}' (add it manually): {e:#}",
                item.label()
            );
        }
    }
}

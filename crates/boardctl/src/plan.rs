//! Restructure planning and execution.
//!
//! The planner is pure: it compares a fetched [`BoardState`] with a
//! declarative [`Restructure`] and emits the [`Action`]s that converge the
//! board. Running the resulting actions and planning again yields nothing,
//! which is what makes the restructure safe to re-run. The executor applies
//! actions sequentially and never lets one failed item abort the batch.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::warn;
use trello::{BoardList, Card, NewCard, TrelloClient};

/// Trello's due-date format.
const DUE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

/// Format a due date `sla_days` calendar days after `now`.
pub fn due_date(now: DateTime<Utc>, sla_days: i64) -> String {
    (now + Duration::days(sla_days)).format(DUE_FORMAT).to_string()
}

/// Snapshot of a board's lists and cards, as fetched.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub lists: Vec<BoardList>,
    pub cards: Vec<Card>,
}

/// A task to append to the board, with a due date derived from its SLA.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub name: String,
    pub desc: String,
    pub list: String,
    pub sla_days: i64,
}

/// Declarative description of the target board taxonomy.
#[derive(Debug, Clone)]
pub struct Restructure {
    /// Target list names, in display order.
    pub target_lists: Vec<String>,
    /// Old list name to new list name, for relocating existing cards.
    pub rename: HashMap<String, String>,
    /// Where cards from unmapped lists end up.
    pub fallback_list: String,
    /// Exact card names to archive.
    pub archive: HashSet<String>,
    /// Tasks to append when no card with the same name exists.
    pub new_tasks: Vec<NewTask>,
}

/// A single remote mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateList {
        name: String,
        pos: String,
    },
    ArchiveCard {
        card_id: String,
        name: String,
    },
    MoveCard {
        card_id: String,
        name: String,
        to_list: String,
    },
    CreateCard {
        list: String,
        name: String,
        desc: String,
        due: String,
    },
}

/// Compute the actions that converge `state` to `spec`.
///
/// Idempotence guards: existing target lists are not re-created, a card
/// already in its target list is not moved, and a new task whose exact name
/// already appears among the fetched cards is not re-created.
pub fn plan(state: &BoardState, spec: &Restructure, now: DateTime<Utc>) -> Vec<Action> {
    let mut actions = Vec::new();

    // Ensure every target list exists, preserving the declared order via
    // explicit position hints.
    let mut known_lists: HashSet<String> =
        state.lists.iter().map(|l| l.name.clone()).collect();
    for (i, name) in spec.target_lists.iter().enumerate() {
        if known_lists.insert(name.clone()) {
            actions.push(Action::CreateList {
                name: name.clone(),
                pos: (i + 1).to_string(),
            });
        }
    }

    let list_name_by_id: HashMap<&str, &str> = state
        .lists
        .iter()
        .map(|l| (l.id.as_str(), l.name.as_str()))
        .collect();

    for card in &state.cards {
        if spec.archive.contains(&card.name) {
            actions.push(Action::ArchiveCard {
                card_id: card.id.clone(),
                name: card.name.clone(),
            });
            continue;
        }
        let current_list = list_name_by_id
            .get(card.id_list.as_str())
            .copied()
            .unwrap_or("");
        // Target lists map to themselves so a relocated card stays put on
        // the next run; anything else unmapped falls back.
        let target = match spec.rename.get(current_list) {
            Some(t) => t.as_str(),
            None if spec.target_lists.iter().any(|t| t == current_list) => current_list,
            None => spec.fallback_list.as_str(),
        };
        if target == current_list || !known_lists.contains(target) {
            continue;
        }
        actions.push(Action::MoveCard {
            card_id: card.id.clone(),
            name: card.name.clone(),
            to_list: target.to_string(),
        });
    }

    let existing_names: HashSet<&str> = state.cards.iter().map(|c| c.name.as_str()).collect();
    for task in &spec.new_tasks {
        if existing_names.contains(task.name.as_str()) || !known_lists.contains(&task.list) {
            continue;
        }
        let due = due_date(now, task.sla_days);
        let desc = format!(
            "{}\n\nSLA: {} day(s). Due: {}.",
            task.desc,
            task.sla_days,
            &due[..10]
        );
        actions.push(Action::CreateCard {
            list: task.list.clone(),
            name: task.name.clone(),
            desc,
            due,
        });
    }

    actions
}

/// Outcome counts for an executed plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecReport {
    pub applied: usize,
    pub failed: usize,
}

/// Apply planned actions in order, one blocking call at a time.
///
/// A failed item is reported and skipped; the batch always runs to
/// completion, so the overall run still counts as a success.
pub async fn execute(
    client: &TrelloClient,
    board_id: &str,
    state: &BoardState,
    actions: &[Action],
) -> ExecReport {
    let mut list_ids: HashMap<String, String> = state
        .lists
        .iter()
        .map(|l| (l.name.clone(), l.id.clone()))
        .collect();
    let mut report = ExecReport::default();

    for action in actions {
        match action {
            Action::CreateList { name, pos } => match client.create_list(board_id, name, pos).await
            {
                Ok(list) => {
                    println!("  Created list: {name}");
                    list_ids.insert(name.clone(), list.id);
                    report.applied += 1;
                }
                Err(e) => {
                    warn!("Failed to create list '{name}': {e:#}");
                    report.failed += 1;
                }
            },
            Action::ArchiveCard { card_id, name } => match client.archive_card(card_id).await {
                Ok(()) => {
                    println!("  Archived: {name}");
                    report.applied += 1;
                }
                Err(e) => {
                    warn!("Failed to archive '{name}': {e:#}");
                    report.failed += 1;
                }
            },
            Action::MoveCard {
                card_id,
                name,
                to_list,
            } => {
                let Some(list_id) = list_ids.get(to_list) else {
                    warn!("No list '{to_list}' to move '{name}' into");
                    report.failed += 1;
                    continue;
                };
                match client.move_card(card_id, list_id).await {
                    Ok(()) => {
                        println!("  Moved to {to_list}: {name}");
                        report.applied += 1;
                    }
                    Err(e) => {
                        warn!("Failed to move '{name}': {e:#}");
                        report.failed += 1;
                    }
                }
            }
            Action::CreateCard {
                list,
                name,
                desc,
                due,
            } => {
                let Some(list_id) = list_ids.get(list) else {
                    warn!("No list '{list}' to add '{name}' into");
                    report.failed += 1;
                    continue;
                };
                let input = NewCard::new(list_id.clone(), name.clone(), desc.clone()).due(due.clone());
                match client.create_card(&input).await {
                    Ok(_) => {
                        println!("  Added ({list}): {name}");
                        report.applied += 1;
                    }
                    Err(e) => {
                        warn!("Failed to add '{name}': {e:#}");
                        report.failed += 1;
                    }
                }
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn list(id: &str, name: &str) -> BoardList {
        BoardList {
            id: id.to_string(),
            name: name.to_string(),
            pos: None,
        }
    }

    fn card(id: &str, name: &str, list_id: &str) -> Card {
        Card {
            id: id.to_string(),
            name: name.to_string(),
            desc: String::new(),
            id_list: list_id.to_string(),
            id_labels: Vec::new(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 3, 9, 30, 0).unwrap()
    }

    fn sample_spec() -> Restructure {
        Restructure {
            target_lists: vec![
                "Backlog".to_string(),
                "Week A: Discovery".to_string(),
                "Done".to_string(),
            ],
            rename: [
                ("Idea Backlog".to_string(), "Backlog".to_string()),
                ("Current Sprint".to_string(), "Week A: Discovery".to_string()),
                ("Done".to_string(), "Done".to_string()),
            ]
            .into_iter()
            .collect(),
            fallback_list: "Backlog".to_string(),
            archive: ["Camping checklist web app".to_string()].into_iter().collect(),
            new_tasks: vec![NewTask {
                name: "Publish branch for internal process".to_string(),
                desc: "Publish branch.".to_string(),
                list: "Week A: Discovery".to_string(),
                sla_days: 2,
            }],
        }
    }

    /// Apply actions to a synthetic state the way the remote side would,
    /// so a second planning pass can observe the first run's outcome.
    fn apply(state: &BoardState, actions: &[Action]) -> BoardState {
        let mut next = state.clone();
        for (i, action) in actions.iter().enumerate() {
            match action {
                Action::CreateList { name, .. } => {
                    next.lists.push(list(&format!("new-list-{i}"), name));
                }
                Action::ArchiveCard { card_id, .. } => {
                    next.cards.retain(|c| &c.id != card_id);
                }
                Action::MoveCard {
                    card_id, to_list, ..
                } => {
                    let list_id = next
                        .lists
                        .iter()
                        .find(|l| &l.name == to_list)
                        .map(|l| l.id.clone())
                        .unwrap();
                    if let Some(c) = next.cards.iter_mut().find(|c| &c.id == card_id) {
                        c.id_list = list_id;
                    }
                }
                Action::CreateCard { list, name, .. } => {
                    let list_id = next
                        .lists
                        .iter()
                        .find(|l| &l.name == list)
                        .map(|l| l.id.clone())
                        .unwrap();
                    next.cards.push(card(&format!("new-card-{i}"), name, &list_id));
                }
            }
        }
        next
    }

    #[test]
    fn creates_missing_lists_with_ordered_positions() {
        let state = BoardState {
            lists: vec![list("l1", "Backlog")],
            cards: vec![],
        };
        let actions = plan(&state, &sample_spec(), fixed_now());
        assert!(actions.contains(&Action::CreateList {
            name: "Week A: Discovery".to_string(),
            pos: "2".to_string(),
        }));
        assert!(actions.contains(&Action::CreateList {
            name: "Done".to_string(),
            pos: "3".to_string(),
        }));
        assert!(!actions
            .iter()
            .any(|a| matches!(a, Action::CreateList { name, .. } if name == "Backlog")));
    }

    #[test]
    fn archives_exact_names_only() {
        let state = BoardState {
            lists: vec![list("l1", "Backlog")],
            cards: vec![
                card("c1", "Camping checklist web app", "l1"),
                card("c2", "Camping checklist web app v2", "l1"),
            ],
        };
        let actions = plan(&state, &sample_spec(), fixed_now());
        let archived: Vec<_> = actions
            .iter()
            .filter_map(|a| match a {
                Action::ArchiveCard { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(archived, vec!["Camping checklist web app"]);
    }

    #[test]
    fn moves_follow_rename_map_with_fallback() {
        let state = BoardState {
            lists: vec![
                list("l1", "Idea Backlog"),
                list("l2", "Some Random List"),
                list("l3", "Backlog"),
                list("l4", "Week A: Discovery"),
                list("l5", "Done"),
            ],
            cards: vec![
                card("c1", "Old idea", "l1"),
                card("c2", "Stray card", "l2"),
                card("c3", "Finished thing", "l5"),
            ],
        };
        let actions = plan(&state, &sample_spec(), fixed_now());
        let moves: Vec<_> = actions
            .iter()
            .filter_map(|a| match a {
                Action::MoveCard { name, to_list, .. } => Some((name.as_str(), to_list.as_str())),
                _ => None,
            })
            .collect();
        // Mapped list moves to its target, unknown list falls back to
        // Backlog, and the Done card stays put.
        assert_eq!(
            moves,
            vec![("Old idea", "Backlog"), ("Stray card", "Backlog")]
        );
    }

    #[test]
    fn skips_existing_task_names() {
        let state = BoardState {
            lists: vec![list("l1", "Week A: Discovery")],
            cards: vec![card("c1", "Publish branch for internal process", "l1")],
        };
        let actions = plan(&state, &sample_spec(), fixed_now());
        assert!(!actions.iter().any(|a| matches!(a, Action::CreateCard { .. })));
    }

    #[test]
    fn due_date_adds_calendar_days_in_trello_format() {
        let due = due_date(fixed_now(), 2);
        assert_eq!(due, "2026-02-05T09:30:00.000Z");
    }

    #[test]
    fn new_task_desc_carries_sla_note() {
        let state = BoardState {
            lists: vec![list("l1", "Backlog"), list("l2", "Week A: Discovery")],
            cards: vec![],
        };
        let actions = plan(&state, &sample_spec(), fixed_now());
        let created = actions
            .iter()
            .find_map(|a| match a {
                Action::CreateCard { desc, due, .. } => Some((desc, due)),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            created.0,
            "Publish branch.\n\nSLA: 2 day(s). Due: 2026-02-05."
        );
        assert_eq!(created.1, "2026-02-05T09:30:00.000Z");
    }

    #[test]
    fn second_run_plans_nothing() {
        let state = BoardState {
            lists: vec![
                list("l1", "Idea Backlog"),
                list("l2", "Current Sprint"),
                list("l3", "Done"),
            ],
            cards: vec![
                card("c1", "Old idea", "l1"),
                card("c2", "Research Geotab + Fleetio APIs", "l2"),
                card("c3", "Camping checklist web app", "l1"),
                card("c4", "Finished thing", "l3"),
            ],
        };
        let spec = sample_spec();

        let first = plan(&state, &spec, fixed_now());
        assert!(!first.is_empty());

        let converged = apply(&state, &first);
        let second = plan(&converged, &spec, fixed_now());
        assert_eq!(second, Vec::new());
    }
}

//! Name-based card classification.

use std::collections::HashSet;

use trello::Card;

/// True when the card name contains any marker substring.
///
/// Matching is ordinary case-sensitive containment, not whole-word; only the
/// name is consulted, never descriptions or checklists.
pub fn matches_any(name: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| name.contains(m))
}

/// Cards in one of the watched lists whose names mark them administrative.
pub fn admin_moves<'a>(
    cards: &'a [Card],
    watched_list_ids: &HashSet<String>,
    markers: &[&str],
) -> Vec<&'a Card> {
    cards
        .iter()
        .filter(|c| watched_list_ids.contains(&c.id_list))
        .filter(|c| matches_any(&c.name, markers))
        .collect()
}

/// Cards outside the excluded lists that do not yet carry the label.
pub fn label_targets<'a>(
    cards: &'a [Card],
    excluded_list_ids: &HashSet<String>,
    label_id: &str,
) -> Vec<&'a Card> {
    cards
        .iter()
        .filter(|c| !excluded_list_ids.contains(&c.id_list))
        .filter(|c| !c.id_labels.iter().any(|l| l == label_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKERS: &[&str] = &["Landing page", "Content publishing", "Case studies / portfolio"];

    fn card(id: &str, name: &str, list_id: &str, labels: &[&str]) -> Card {
        Card {
            id: id.to_string(),
            name: name.to_string(),
            desc: String::new(),
            id_list: list_id.to_string(),
            id_labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn substring_containment_classifies_admin() {
        assert!(matches_any("Landing page and stuff", MARKERS));
        assert!(!matches_any("Research Geotab APIs", MARKERS));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!matches_any("landing page and stuff", MARKERS));
    }

    #[test]
    fn matching_is_substring_not_whole_word() {
        assert!(matches_any("XLanding pageX", MARKERS));
    }

    #[test]
    fn admin_moves_skip_unwatched_lists() {
        let watched: HashSet<String> = ["week-a".to_string(), "week-b".to_string()].into();
        let cards = vec![
            card("c1", "Landing page draft", "week-a", &[]),
            card("c2", "Landing page copy", "backlog", &[]),
            card("c3", "Research Geotab APIs", "week-a", &[]),
        ];
        let moves = admin_moves(&cards, &watched, MARKERS);
        let ids: Vec<_> = moves.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1"]);
    }

    #[test]
    fn label_targets_skip_excluded_and_already_labelled() {
        let excluded: HashSet<String> = ["admin".to_string()].into();
        let cards = vec![
            card("c1", "Research task", "week-a", &[]),
            card("c2", "Landing page", "admin", &[]),
            card("c3", "Already tagged", "week-a", &["label-1"]),
        ];
        let targets = label_targets(&cards, &excluded, "label-1");
        let ids: Vec<_> = targets.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1"]);
    }
}

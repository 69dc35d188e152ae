//! Resolving people to Trello member ids.

use trello::Member;

/// Resolve a member id from a username, falling back to a substring match
/// on the full name or username.
///
/// Resolution order: exact username match (case-insensitive) wins; otherwise
/// the first member whose full name or username contains `hint`
/// (case-insensitive) is taken. `None` means unresolved — callers warn and
/// proceed without an assignee rather than failing.
pub fn resolve_member_id(members: &[Member], username: &str, hint: &str) -> Option<String> {
    let username = username.trim().to_lowercase();
    if let Some(m) = members
        .iter()
        .find(|m| m.username.to_lowercase() == username)
    {
        return Some(m.id.clone());
    }
    let hint = hint.trim().to_lowercase();
    if hint.is_empty() {
        return None;
    }
    members
        .iter()
        .find(|m| {
            m.full_name.to_lowercase().contains(&hint) || m.username.to_lowercase().contains(&hint)
        })
        .map(|m| m.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, username: &str, full_name: &str) -> Member {
        Member {
            id: id.to_string(),
            username: username.to_string(),
            full_name: full_name.to_string(),
        }
    }

    fn board_members() -> Vec<Member> {
        vec![
            member("m1", "moazelhag", "Moaz Elhag"),
            member("m2", "ahmadtaleb", "Ahmad Taleb"),
            member("m3", "somebody", "Someone Else"),
        ]
    }

    #[test]
    fn exact_username_match_wins() {
        let id = resolve_member_id(&board_members(), "moazelhag", "moaz");
        assert_eq!(id.as_deref(), Some("m1"));
    }

    #[test]
    fn falls_back_to_name_substring() {
        let id = resolve_member_id(&board_members(), "not-a-username", "ahmad");
        assert_eq!(id.as_deref(), Some("m2"));
    }

    #[test]
    fn unresolved_when_absent() {
        let id = resolve_member_id(&board_members(), "ghost", "nobody");
        assert_eq!(id, None);
    }
}

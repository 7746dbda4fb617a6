//! Actor classification
//!
//! Callers hand in loosely typed actor identifiers (paths, prefixed keys,
//! bare names). Review dashboards filter on the coarse [`ActorType`], so
//! anything unrecognised degrades to [`ActorType::Unknown`].

use crate::models::ActorType;

/// Infer the actor category from an explicit `hint` or the shape of `actor_id`.
///
/// A hint that names one of the four known categories wins. Otherwise the
/// identifier is matched case-insensitively against `/users/`, `user:`,
/// `/staff/`, `staff:`, `system` and `system:`.
pub fn classify_actor(hint: &str, actor_id: &str) -> ActorType {
    match hint.trim().to_lowercase().as_str() {
        "user" => return ActorType::User,
        "staff" => return ActorType::Staff,
        "system" => return ActorType::System,
        "service" => return ActorType::Service,
        _ => {}
    }

    let id = actor_id.to_lowercase();
    if id.starts_with("/users/") || id.starts_with("user:") {
        ActorType::User
    } else if id.starts_with("/staff/") || id.starts_with("staff:") {
        ActorType::Staff
    } else if id == "system" || id.starts_with("system:") {
        ActorType::System
    } else {
        ActorType::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_wins_over_identifier() {
        assert_eq!(classify_actor("Staff", "/users/42"), ActorType::Staff);
        assert_eq!(classify_actor("  SERVICE ", "anything"), ActorType::Service);
    }

    #[test]
    fn test_identifier_shapes() {
        let cases = [
            ("/users/42", ActorType::User),
            ("USER:abc", ActorType::User),
            ("/staff/alice", ActorType::Staff),
            ("staff:bob", ActorType::Staff),
            ("system", ActorType::System),
            ("System:cron", ActorType::System),
            ("systemd", ActorType::Unknown),
            ("alice", ActorType::Unknown),
            ("", ActorType::Unknown),
        ];

        for (id, expected) in cases {
            assert_eq!(classify_actor("", id), expected, "actor id {id:?}");
        }
    }

    #[test]
    fn test_unknown_hint_falls_through() {
        assert_eq!(classify_actor("robot", "/users/9"), ActorType::User);
        assert_eq!(classify_actor("unknown", "staff:x"), ActorType::Staff);
    }
}

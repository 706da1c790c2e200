//! Ownership and moderation rules shared by every view.
//!
//! Permission checks are derived predicates, recomputed on every call from the
//! current identity; nothing here is cached or persisted. A stale grant
//! self-corrects on the next evaluation after the identity changes.

use std::collections::BTreeSet;

use velina_api_types::{Comment, ContentStatus, Post, Role};

use super::session::Identity;
use super::types::EntityAction;

/// Anything the lifecycle rules apply to: posts and comments share the same
/// ownership/status shape.
pub trait Moderated {
    fn author_id(&self) -> &str;
    fn status(&self) -> ContentStatus;
}

impl Moderated for Post {
    fn author_id(&self) -> &str {
        &self.author.id
    }

    fn status(&self) -> ContentStatus {
        self.status
    }
}

impl Moderated for Comment {
    fn author_id(&self) -> &str {
        &self.author.id
    }

    fn status(&self) -> ContentStatus {
        self.status
    }
}

/// An identity owns an entity iff it authored it. Derived, never stored.
pub fn owns(identity: &Identity, entity: &impl Moderated) -> bool {
    identity.id == entity.author_id()
}

/// Edit/delete rights: admins, or the entity's author.
pub fn can_modify(identity: Option<&Identity>, entity: &impl Moderated) -> bool {
    match identity {
        Some(identity) => identity.role == Role::Admin || owns(identity, entity),
        None => false,
    }
}

/// Approve rights: admins only. The server independently enforces this; the
/// client-side check only gates what gets offered.
pub fn can_moderate(identity: Option<&Identity>) -> bool {
    matches!(identity, Some(identity) if identity.role == Role::Admin)
}

/// The exact action set a view may expose for `entity` under `identity`.
///
/// `Approve` appears only for admins and only while the entity is pending.
pub fn visible_actions(
    identity: Option<&Identity>,
    entity: &impl Moderated,
) -> BTreeSet<EntityAction> {
    let mut actions = BTreeSet::new();
    if can_modify(identity, entity) {
        actions.insert(EntityAction::Edit);
        actions.insert(EntityAction::Delete);
    }
    if can_moderate(identity) && entity.status() == ContentStatus::Pending {
        actions.insert(EntityAction::Approve);
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use velina_api_types::AuthorRef;

    fn identity(id: &str, role: Role) -> Identity {
        Identity {
            id: id.into(),
            username: format!("user-{id}"),
            email: format!("{id}@example.com"),
            role,
            created_at: None,
        }
    }

    fn post(author_id: &str, status: ContentStatus) -> Post {
        Post {
            id: "p1".into(),
            title: "Pending thoughts".into(),
            content: "…".into(),
            author: AuthorRef {
                id: author_id.into(),
                username: format!("user-{author_id}"),
            },
            status,
            created_at: datetime!(2026-01-01 00:00:00 UTC),
        }
    }

    fn comment(author_id: &str, status: ContentStatus) -> Comment {
        Comment {
            id: "c1".into(),
            content: "…".into(),
            author: AuthorRef {
                id: author_id.into(),
                username: format!("user-{author_id}"),
            },
            post: None,
            status,
            created_at: datetime!(2026-01-01 00:00:00 UTC),
        }
    }

    #[test]
    fn owner_gets_edit_and_delete_but_never_approve() {
        let u1 = identity("u1", Role::User);
        let actions = visible_actions(Some(&u1), &post("u1", ContentStatus::Pending));
        assert_eq!(
            actions.into_iter().collect::<Vec<_>>(),
            vec![EntityAction::Edit, EntityAction::Delete]
        );
    }

    #[test]
    fn admin_gets_approve_on_pending_entities() {
        let u2 = identity("u2", Role::Admin);
        let actions = visible_actions(Some(&u2), &post("u1", ContentStatus::Pending));
        assert_eq!(
            actions.into_iter().collect::<Vec<_>>(),
            vec![EntityAction::Edit, EntityAction::Delete, EntityAction::Approve]
        );
    }

    #[test]
    fn approve_disappears_once_published() {
        let admin = identity("u2", Role::Admin);
        let actions = visible_actions(Some(&admin), &post("u1", ContentStatus::Published));
        assert!(!actions.contains(&EntityAction::Approve));
        assert!(actions.contains(&EntityAction::Delete));
    }

    #[test]
    fn stranger_sees_no_actions() {
        let u3 = identity("u3", Role::User);
        assert!(visible_actions(Some(&u3), &post("u1", ContentStatus::Published)).is_empty());
    }

    #[test]
    fn anonymous_sees_no_actions() {
        assert!(visible_actions(None, &post("u1", ContentStatus::Pending)).is_empty());
        assert!(!can_modify(None, &post("u1", ContentStatus::Pending)));
        assert!(!can_moderate(None));
    }

    #[test]
    fn comments_follow_the_same_rules_as_posts() {
        let owner = identity("u1", Role::User);
        let admin = identity("u2", Role::Admin);
        let c = comment("u1", ContentStatus::Pending);

        assert!(can_modify(Some(&owner), &c));
        assert!(!visible_actions(Some(&owner), &c).contains(&EntityAction::Approve));
        assert!(visible_actions(Some(&admin), &c).contains(&EntityAction::Approve));
    }
}

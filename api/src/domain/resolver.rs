//! Name-or-ID resolution
//!
//! Clients address territories, domains and projects with a single string
//! that may be either an ID or a name. Resolution is a linear scan over a
//! collection in insertion order: ID matches win over name matches, and at
//! the root of the hierarchy the entity flagged as default answers for any
//! candidate that matches nothing.

use super::entities::AreaDesc;

/// Something that can be looked up by ID or name
pub trait Resolvable {
    fn resolve_id(&self) -> &str;
    fn resolve_name(&self) -> &str;
    fn is_default(&self) -> bool;
}

impl Resolvable for AreaDesc {
    fn resolve_id(&self) -> &str {
        self.id.as_str()
    }

    fn resolve_name(&self) -> &str {
        &self.name
    }

    fn is_default(&self) -> bool {
        self.is_default
    }
}

/// Whether an unmatched candidate may fall back to the default entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Collection root: use the first default-flagged entity
    Default,
    /// Nested collection: report not-found
    None,
}

/// Resolve `candidate` against `items`
///
/// A missing candidate matches no ID or name, so with `Fallback::Default`
/// it yields the default entity.
pub fn resolve<'a, T: Resolvable>(
    items: &'a [T],
    candidate: Option<&str>,
    fallback: Fallback,
) -> Option<&'a T> {
    if let Some(candidate) = candidate {
        if let Some(found) = items.iter().find(|i| i.resolve_id() == candidate) {
            return Some(found);
        }
        if let Some(found) = items.iter().find(|i| i.resolve_name() == candidate) {
            return Some(found);
        }
    }

    match fallback {
        Fallback::Default => items.iter().find(|i| i.is_default()),
        Fallback::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        id: &'static str,
        name: &'static str,
        default: bool,
    }

    impl Resolvable for Item {
        fn resolve_id(&self) -> &str {
            self.id
        }

        fn resolve_name(&self) -> &str {
            self.name
        }

        fn is_default(&self) -> bool {
            self.default
        }
    }

    fn item(id: &'static str, name: &'static str, default: bool) -> Item {
        Item { id, name, default }
    }

    #[test]
    fn id_match_takes_precedence_over_name_match() {
        // "b" is the name of the first item and the ID of the second
        let items = vec![item("a", "b", false), item("b", "c", false)];
        let found = resolve(&items, Some("b"), Fallback::None).unwrap();
        assert_eq!(found.id, "b");
    }

    #[test]
    fn falls_back_to_name() {
        let items = vec![item("1", "alpha", false), item("2", "beta", false)];
        let found = resolve(&items, Some("beta"), Fallback::None).unwrap();
        assert_eq!(found.id, "2");
    }

    #[test]
    fn first_match_wins_in_insertion_order() {
        let items = vec![item("1", "dup", false), item("2", "dup", false)];
        let found = resolve(&items, Some("dup"), Fallback::None).unwrap();
        assert_eq!(found.id, "1");
    }

    #[test]
    fn unknown_candidate_at_root_uses_default() {
        let items = vec![item("1", "alpha", false), item("2", "beta", true)];
        let found = resolve(&items, Some("gamma"), Fallback::Default).unwrap();
        assert_eq!(found.id, "2");
    }

    #[test]
    fn missing_candidate_at_root_uses_default() {
        let items = vec![item("1", "alpha", true)];
        let found = resolve(&items, None, Fallback::Default).unwrap();
        assert_eq!(found.id, "1");
    }

    #[test]
    fn unknown_candidate_without_default_is_not_found() {
        let items = vec![item("1", "alpha", false)];
        assert!(resolve(&items, Some("gamma"), Fallback::Default).is_none());
    }

    #[test]
    fn nested_collections_ignore_default() {
        let items = vec![item("1", "alpha", true)];
        assert!(resolve(&items, Some("gamma"), Fallback::None).is_none());
        assert!(resolve(&items, None, Fallback::None).is_none());
    }

    #[test]
    fn empty_collection_is_not_found() {
        let items: Vec<Item> = Vec::new();
        assert!(resolve(&items, Some("x"), Fallback::Default).is_none());
    }
}

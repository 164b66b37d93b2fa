//! The operations a host (CLI, editor, bot) performs against ownership data.

use crate::edit::{OwnershipEdit, plan_ownership_change};
use crate::parse::OwnershipRecord;
use crate::store::RuleSetStore;
use std::collections::BTreeMap;

/// Query and mutation contract for CODEOWNERS ownership.
pub trait OwnershipService {
    /// Returns the record that owns `path`, if any.
    fn owners_for(&mut self, path: &str) -> Option<&OwnershipRecord>;

    /// Returns every distinct owner token, sorted.
    fn list_teams(&self) -> Vec<String>;

    /// Returns how many rule slots each owner token occupies.
    fn team_counts(&self) -> BTreeMap<String, usize>;

    /// Replaces the ownership rules with freshly read CODEOWNERS text.
    fn reload(&mut self, text: &str);

    /// Plans the edit that makes `new_owner` the owner of `path`.
    fn plan_change(&mut self, path: &str, new_owner: &str) -> OwnershipEdit {
        let current = self.owners_for(path).cloned();
        plan_ownership_change(path, new_owner, current.as_ref())
    }
}

impl OwnershipService for RuleSetStore {
    fn owners_for(&mut self, path: &str) -> Option<&OwnershipRecord> {
        self.resolve(path)
    }

    fn list_teams(&self) -> Vec<String> {
        self.ruleset().teams()
    }

    fn team_counts(&self) -> BTreeMap<String, usize> {
        self.ruleset().team_stats()
    }

    fn reload(&mut self, text: &str) {
        RuleSetStore::reload(self, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::apply_edit;

    const RULES: &str = "* @default\n/src/ @dev @qa\n/src/main.rs @lead\n";

    #[test]
    fn store_answers_queries() {
        let mut service = RuleSetStore::from_text(RULES);
        assert_eq!(service.owners_for("src/main.rs").unwrap().owners, vec!["@lead"]);
        assert_eq!(service.list_teams(), vec!["@default", "@dev", "@lead", "@qa"]);
        assert_eq!(service.team_counts().get("@dev"), Some(&1));
    }

    #[test]
    fn plan_change_uses_current_winner() {
        let mut service = RuleSetStore::from_text(RULES);
        assert_eq!(
            service.plan_change("src/main.rs", "@new"),
            OwnershipEdit::ReplaceLine {
                line: 3,
                text: "/src/main.rs @new".into()
            }
        );
        assert_eq!(
            service.plan_change("src/lib.rs", "@new"),
            OwnershipEdit::AppendLine {
                text: "/src/lib.rs @new".into()
            }
        );
    }

    #[test]
    fn change_then_reload_round_trip() {
        let mut service = RuleSetStore::from_text(RULES);
        assert_eq!(service.owners_for("src/lib.rs").unwrap().pattern, "/src/");

        let edit = service.plan_change("src/lib.rs", "@new");
        let updated = apply_edit(RULES, &edit);
        OwnershipService::reload(&mut service, &updated);

        let winner = service.owners_for("src/lib.rs").unwrap();
        assert_eq!(winner.owners, vec!["@new"]);
        assert_eq!(winner.pattern, "/src/lib.rs");
    }

    #[test]
    fn works_through_trait_object() {
        let mut store = RuleSetStore::from_text(RULES);
        let service: &mut dyn OwnershipService = &mut store;
        assert!(service.owners_for("README.md").is_some());
        service.reload("");
        assert!(service.owners_for("README.md").is_none());
        assert!(service.list_teams().is_empty());
    }
}

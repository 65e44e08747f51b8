//! Maps action kind ids carried in action keys to action kinds.

use std::collections::BTreeMap;

use tactic_types::{ActionKey, ActionKind, ActionKindId};

/// Lookup table from [`ActionKindId`] to [`ActionKind`].
///
/// Built once when the executor is constructed and never mutated after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionClassifier {
    names: BTreeMap<ActionKindId, ActionKind>,
}

impl ActionClassifier {
    /// Build a classifier from an explicit table.
    pub fn new(table: impl IntoIterator<Item = (ActionKindId, ActionKind)>) -> Self {
        Self {
            names: table.into_iter().collect(),
        }
    }

    /// The classifier for every action kind in the Cover Tactic domain.
    pub fn cover_tactic() -> Self {
        Self::new(ActionKind::ALL.into_iter().map(|kind| (kind.kind_id(), kind)))
    }

    /// Classify the action kind carried by `key`.
    ///
    /// Returns `None` for ids missing from the table; the caller decides
    /// whether that is fatal.
    pub fn classify(&self, key: &ActionKey) -> Option<ActionKind> {
        self.classify_id(key.action_id)
    }

    /// Classify a bare action kind id.
    pub fn classify_id(&self, id: ActionKindId) -> Option<ActionKind> {
        self.names.get(&id).copied()
    }

    /// Iterate over every classifiable action kind.
    pub fn kinds(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.names.values().copied()
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ActionClassifier {
    fn default() -> Self {
        Self::cover_tactic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_domain_action() {
        let classifier = ActionClassifier::cover_tactic();
        assert_eq!(classifier.len(), ActionKind::ALL.len());
        for kind in ActionKind::ALL {
            let key = ActionKey::new(kind.kind_id(), Vec::new());
            assert_eq!(classifier.classify(&key), Some(kind));
        }
    }

    #[test]
    fn unknown_id_yields_none() {
        let classifier = ActionClassifier::cover_tactic();
        assert_eq!(classifier.classify_id(ActionKindId::new()), None);
    }

    #[test]
    fn custom_table_only_knows_its_entries() {
        let classifier =
            ActionClassifier::new([(ActionKind::SKIP_TURN_ID, ActionKind::SkipTurn)]);
        assert_eq!(classifier.classify_id(ActionKind::SKIP_TURN_ID), Some(ActionKind::SkipTurn));
        assert_eq!(classifier.classify_id(ActionKind::TAKE_COVER_ID), None);
    }
}

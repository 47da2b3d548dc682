use std::collections::{HashMap, HashSet};

use chrono::Utc;

use super::types::*;

/// In-memory suggestion list with reviewer decisions.
///
/// Records keep insertion order (fetched order, newest local submission
/// first). A remote `Id` identifies the same server record across fetches
/// and is kept unless another record in the list already holds it. Every
/// other id comes from wall-clock milliseconds; the allocator only moves
/// forward, so it never hands out the same id twice.
#[derive(Debug, Default)]
pub struct SuggestionStore {
    records: Vec<Suggestion>,
    decisions: HashMap<i64, Decision>,
    last_id: i64,
}

impl SuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next allocator id, skipping any id in `taken`.
    fn allocate_id(&mut self, taken: &HashSet<i64>) -> i64 {
        let mut id = Utc::now().timestamp_millis().max(self.last_id + 1);
        while taken.contains(&id) {
            id += 1;
        }
        self.last_id = id;
        id
    }

    /// Drop all records and decisions and install `drafts` in order.
    /// Returns the new record count.
    pub fn replace_all(&mut self, drafts: Vec<SuggestionDraft>) -> usize {
        self.decisions.clear();

        // First holder of a remote id keeps it; later duplicates get a fresh one.
        let mut remote_ids = HashSet::new();
        let claimed: Vec<Option<i64>> = drafts
            .iter()
            .map(|draft| draft.remote_id.filter(|id| remote_ids.insert(*id)))
            .collect();

        let mut records = Vec::with_capacity(drafts.len());
        for (mut draft, claimed) in drafts.into_iter().zip(claimed) {
            draft.remote_id = None;
            let id = match claimed {
                Some(id) => id,
                None => self.allocate_id(&remote_ids),
            };
            records.push(Suggestion::from_draft(id, draft));
        }
        self.records = records;
        self.records.len()
    }

    /// Prepend one record with a fresh id and return that id.
    pub fn insert_at_head(&mut self, mut draft: SuggestionDraft) -> i64 {
        draft.remote_id = None;
        let taken: HashSet<i64> = self.records.iter().map(|r| r.id).collect();
        let id = self.allocate_id(&taken);
        self.records.insert(0, Suggestion::from_draft(id, draft));
        id
    }

    /// Set or overwrite the decision for `id`. Unknown ids are left alone and
    /// report `false`. `Undecided` clears the entry.
    pub fn set_decision(&mut self, id: i64, decision: Decision) -> bool {
        if !self.contains(id) {
            return false;
        }
        match decision {
            Decision::Undecided => {
                self.decisions.remove(&id);
            }
            _ => {
                self.decisions.insert(id, decision);
            }
        }
        true
    }

    pub fn decision(&self, id: i64) -> Decision {
        self.decisions.get(&id).copied().unwrap_or_default()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn get_all(&self) -> &[Suggestion] {
        &self.records
    }

    /// Records paired with their display position and decision.
    pub fn rows(&self) -> Vec<SuggestionRow> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| SuggestionRow {
                position: index + 1,
                record: record.clone(),
                decision: self.decision(record.id),
                bars: ScoreBar::all(&record.scores),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::suggestion::normalize::new_local_draft;

    fn draft(name: &str) -> SuggestionDraft {
        new_local_draft(name, "$100", vec![], vec![])
    }

    #[test]
    fn insert_at_head_prepends() {
        let mut store = SuggestionStore::new();
        store.replace_all(vec![draft("a"), draft("b")]);
        store.insert_at_head(draft("c"));

        let names: Vec<&str> = store.get_all().iter().map(|r| r.work_name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
        let positions: Vec<usize> = store.rows().iter().map(|r| r.position).collect();
        assert_eq!(positions, [1, 2, 3]);
    }

    #[test]
    fn ids_are_unique_and_never_reused() {
        let mut store = SuggestionStore::new();
        store.replace_all(vec![draft("a"), draft("b"), draft("c")]);
        let first: Vec<i64> = store.get_all().iter().map(|r| r.id).collect();
        store.replace_all(vec![draft("d")]);
        let fresh = store.insert_at_head(draft("e"));

        let mut all: Vec<i64> = first.clone();
        all.extend(store.get_all().iter().map(|r| r.id));
        let unique: HashSet<i64> = all.iter().copied().collect();
        assert_eq!(unique.len(), all.len());
        assert!(!first.contains(&fresh));
    }

    #[test]
    fn remote_id_kept_unless_it_clashes() {
        let mut store = SuggestionStore::new();
        let mut with_id = draft("remote");
        with_id.remote_id = Some(42);
        let mut clash = draft("clash");
        clash.remote_id = Some(42);
        store.replace_all(vec![with_id, clash]);

        assert_eq!(store.get_all()[0].id, 42);
        assert_ne!(store.get_all()[1].id, 42);
    }

    #[test]
    fn remote_id_survives_repeated_fetches() {
        let mut store = SuggestionStore::new();
        for _ in 0..3 {
            let mut fetched = draft("remote");
            fetched.remote_id = Some(42);
            store.replace_all(vec![fetched, draft("local")]);
            assert_eq!(store.get_all()[0].id, 42);
            assert_ne!(store.get_all()[1].id, 42);
        }
    }

    #[test]
    fn allocator_skips_ids_held_by_remote_records() {
        let mut store = SuggestionStore::new();
        let next = Utc::now().timestamp_millis() + 60_000;
        store.last_id = next - 1;

        let mut fetched = draft("remote");
        fetched.remote_id = Some(next);
        store.replace_all(vec![draft("first"), fetched]);
        assert_eq!(store.get_all()[1].id, next);
        assert_eq!(store.get_all()[0].id, next + 1);

        let head = store.insert_at_head(draft("head"));
        assert_eq!(head, next + 2);
    }

    #[test]
    fn decisions_overwrite_and_default_to_undecided() {
        let mut store = SuggestionStore::new();
        let id = store.insert_at_head(draft("a"));
        assert_eq!(store.decision(id), Decision::Undecided);

        assert!(store.set_decision(id, Decision::Approved));
        assert_eq!(store.decision(id), Decision::Approved);
        assert!(store.set_decision(id, Decision::Rejected));
        assert_eq!(store.decision(id), Decision::Rejected);
        assert!(store.set_decision(id, Decision::Undecided));
        assert_eq!(store.decision(id), Decision::Undecided);
    }

    #[test]
    fn decision_for_unknown_id_is_inert() {
        let mut store = SuggestionStore::new();
        assert!(!store.set_decision(12345, Decision::Approved));
        assert_eq!(store.decision(12345), Decision::Undecided);
    }

    #[test]
    fn replace_all_resets_decisions() {
        let mut store = SuggestionStore::new();
        let mut kept = draft("a");
        kept.remote_id = Some(7);
        store.replace_all(vec![kept]);
        store.set_decision(7, Decision::Approved);

        store.replace_all(vec![draft("b")]);
        assert!(store.rows().iter().all(|r| r.decision == Decision::Undecided));
        assert_eq!(store.decision(7), Decision::Undecided);
    }
}

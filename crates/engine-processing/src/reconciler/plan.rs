use model::{
    core::date::normalize_timestamp,
    index::{state::IndexedState, update::UpdatePayload},
    tender::summary::TenderSummary,
};
use std::collections::HashMap;

/// What the catalog currently reports for one tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingState {
    pub status_code: i64,
    pub closing_date: Option<String>,
}

/// Catalog summaries keyed by id.
///
/// A repeated id keeps its first position but takes the values of the last
/// occurrence.
#[derive(Debug, Default)]
pub struct IncomingSet {
    order: Vec<String>,
    entries: HashMap<String, IncomingState>,
}

impl IncomingSet {
    pub fn from_summaries(summaries: Vec<TenderSummary>) -> Self {
        let mut set = IncomingSet::default();

        for summary in summaries {
            let state = IncomingState {
                status_code: summary.status_code,
                closing_date: normalize_timestamp(summary.closing_date.as_deref()),
            };
            if set.entries.insert(summary.id.clone(), state).is_none() {
                set.order.push(summary.id);
            }
        }

        set
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn get(&self, id: &str) -> Option<&IncomingState> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IncomingState)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|state| (id, state)))
    }
}

/// Partition of the incoming ids against the index.
#[derive(Debug, Default, PartialEq)]
pub struct DeltaPlan {
    pub new_ids: Vec<String>,
    pub updates: Vec<UpdatePayload>,
    pub skipped: Vec<String>,
}

impl DeltaPlan {
    /// Only the status code decides between update and skip. Closing-date
    /// drift is ignored.
    pub fn classify(incoming: &IncomingSet, indexed: &HashMap<String, IndexedState>) -> Self {
        let mut plan = DeltaPlan::default();

        for (id, state) in incoming.iter() {
            match indexed.get(id) {
                None => plan.new_ids.push(id.clone()),
                Some(current) if current.status_code != state.status_code => plan
                    .updates
                    .push(UpdatePayload::set_status(id.clone(), state.status_code)),
                Some(_) => plan.skipped.push(id.clone()),
            }
        }

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::index::state::STATUS_SENTINEL;

    fn indexed(pairs: &[(&str, i64)]) -> HashMap<String, IndexedState> {
        pairs
            .iter()
            .map(|(id, code)| (id.to_string(), IndexedState::new(*id, *code)))
            .collect()
    }

    #[test]
    fn test_duplicate_ids_keep_last_value() {
        let incoming = IncomingSet::from_summaries(vec![
            TenderSummary::new("A", 5),
            TenderSummary::new("B", 5),
            TenderSummary::new("A", 6),
        ]);

        assert_eq!(incoming.len(), 2);
        assert_eq!(incoming.ids(), ["A".to_string(), "B".to_string()]);
        assert_eq!(incoming.get("A").map(|s| s.status_code), Some(6));
    }

    #[test]
    fn test_closing_dates_are_normalized() {
        let incoming = IncomingSet::from_summaries(vec![
            TenderSummary::new("A", 5).with_closing_date("2026-02-16T15:00:00"),
            TenderSummary::new("B", 5).with_closing_date(""),
        ]);

        assert_eq!(
            incoming.get("A").and_then(|s| s.closing_date.as_deref()),
            Some("2026-02-16T15:00:00Z")
        );
        assert_eq!(incoming.get("B").and_then(|s| s.closing_date.clone()), None);
    }

    #[test]
    fn test_classify_partitions_every_id_once() {
        let incoming = IncomingSet::from_summaries(vec![
            TenderSummary::new("X", 5),
            TenderSummary::new("Y", 6),
            TenderSummary::new("Z", 8),
        ]);
        let plan = DeltaPlan::classify(&incoming, &indexed(&[("X", 5), ("Z", 5)]));

        assert_eq!(plan.new_ids, vec!["Y".to_string()]);
        assert_eq!(plan.skipped, vec!["X".to_string()]);
        assert_eq!(plan.updates, vec![UpdatePayload::set_status("Z", 8)]);
    }

    #[test]
    fn test_closing_date_drift_is_not_an_update() {
        let incoming = IncomingSet::from_summaries(vec![
            TenderSummary::new("X", 5).with_closing_date("2026-03-01T00:00:00Z"),
        ]);
        let mut current = indexed(&[("X", 5)]);
        if let Some(state) = current.get_mut("X") {
            state.closing_date = Some("2026-02-01T00:00:00Z".to_string());
        }

        let plan = DeltaPlan::classify(&incoming, &current);
        assert!(plan.updates.is_empty());
        assert_eq!(plan.skipped, vec!["X".to_string()]);
    }

    #[test]
    fn test_unreadable_indexed_status_forces_update() {
        let incoming = IncomingSet::from_summaries(vec![TenderSummary::new("X", 5)]);
        let plan = DeltaPlan::classify(&incoming, &indexed(&[("X", STATUS_SENTINEL)]));

        assert_eq!(plan.updates, vec![UpdatePayload::set_status("X", 5)]);
    }
}

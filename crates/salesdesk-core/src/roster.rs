//! The Record Store: an immutable, validated roster of sales reps.
//!
//! A [`Roster`] is constructed exactly once at startup from the loaded
//! records and then shared read-only across every request. There is no
//! update path; rebuilding the service is the only way to change it.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::models::{Deal, SalesRep, STATUS_CLOSED_LOST, STATUS_CLOSED_WON, STATUS_IN_PROGRESS};

/// Validation failures when assembling a roster from loaded records.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("duplicate sales rep id {id} ({first:?} and {second:?})")]
    DuplicateId {
        id: u32,
        first: String,
        second: String,
    },
}

/// A deal paired with the rep it belongs to, for cross-rep deal queries.
#[derive(Debug, Clone, Serialize)]
pub struct DealWithRep {
    pub rep_id: u32,
    pub rep_name: String,
    pub deal: Deal,
}

/// One row of the per-rep performance overview.
#[derive(Debug, Clone, Serialize)]
pub struct RepOverview {
    pub rep_id: u32,
    pub rep_name: String,
    pub region: String,
    pub total_value_won: u64,
    pub won_deals: usize,
    pub lost_deals: usize,
    pub in_progress_deals: usize,
    pub client_count: usize,
}

/// The full in-memory roster, read-only after construction.
#[derive(Debug)]
pub struct Roster {
    reps: Vec<SalesRep>,
    by_id: HashMap<u32, usize>,
}

impl Roster {
    /// Build a roster, rejecting duplicate rep ids.
    pub fn new(reps: Vec<SalesRep>) -> Result<Self, RosterError> {
        let mut by_id = HashMap::with_capacity(reps.len());
        for (idx, rep) in reps.iter().enumerate() {
            if let Some(prev) = by_id.insert(rep.id, idx) {
                return Err(RosterError::DuplicateId {
                    id: rep.id,
                    first: reps[prev].name.clone(),
                    second: rep.name.clone(),
                });
            }
        }
        Ok(Self { reps, by_id })
    }

    pub fn all(&self) -> &[SalesRep] {
        &self.reps
    }

    pub fn len(&self) -> usize {
        self.reps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reps.is_empty()
    }

    pub fn by_id(&self, id: u32) -> Option<&SalesRep> {
        self.by_id.get(&id).map(|&idx| &self.reps[idx])
    }

    /// Case-insensitive exact name lookup.
    pub fn by_name(&self, name: &str) -> Option<&SalesRep> {
        self.reps
            .iter()
            .find(|rep| rep.name.eq_ignore_ascii_case(name))
    }

    /// Reps whose full name appears as a case-insensitive substring of
    /// `text`, ordered by the position of the first occurrence.
    ///
    /// This is the structured half of hybrid retrieval: a question that
    /// names a rep directly always resolves here, no matter how the vector
    /// search ranks it.
    pub fn named_in(&self, text: &str) -> Vec<&SalesRep> {
        let haystack = text.to_lowercase();
        let mut matches: Vec<(usize, &SalesRep)> = self
            .reps
            .iter()
            .filter_map(|rep| {
                haystack
                    .find(&rep.name.to_lowercase())
                    .map(|pos| (pos, rep))
            })
            .collect();
        matches.sort_by_key(|(pos, rep)| (*pos, rep.id));
        matches.into_iter().map(|(_, rep)| rep).collect()
    }

    /// Reps whose region contains `region`, case-insensitively.
    pub fn by_region(&self, region: &str) -> Vec<&SalesRep> {
        let needle = region.to_lowercase();
        self.reps
            .iter()
            .filter(|rep| rep.region.to_lowercase().contains(&needle))
            .collect()
    }

    /// Reps listing the given skill, case-insensitively.
    pub fn with_skill(&self, skill: &str) -> Vec<&SalesRep> {
        self.reps
            .iter()
            .filter(|rep| rep.skills.iter().any(|s| s.eq_ignore_ascii_case(skill)))
            .collect()
    }

    /// Every deal with exactly the given status, with rep attribution.
    pub fn deals_with_status(&self, status: &str) -> Vec<DealWithRep> {
        let mut out = Vec::new();
        for rep in &self.reps {
            for deal in &rep.deals {
                if deal.status == status {
                    out.push(DealWithRep {
                        rep_id: rep.id,
                        rep_name: rep.name.clone(),
                        deal: deal.clone(),
                    });
                }
            }
        }
        out
    }

    /// Reps with at least one deal strictly above `value`.
    pub fn with_deal_above(&self, value: u64) -> Vec<&SalesRep> {
        self.reps
            .iter()
            .filter(|rep| rep.deals.iter().any(|d| d.value > value))
            .collect()
    }

    /// Per-rep performance rows, in roster order.
    pub fn overview(&self) -> Vec<RepOverview> {
        self.reps
            .iter()
            .map(|rep| {
                let counts = rep.deal_count_by_status();
                RepOverview {
                    rep_id: rep.id,
                    rep_name: rep.name.clone(),
                    region: rep.region.clone(),
                    total_value_won: rep.deals_value_with_status(STATUS_CLOSED_WON),
                    won_deals: counts.get(STATUS_CLOSED_WON).copied().unwrap_or(0),
                    lost_deals: counts.get(STATUS_CLOSED_LOST).copied().unwrap_or(0),
                    in_progress_deals: counts.get(STATUS_IN_PROGRESS).copied().unwrap_or(0),
                    client_count: rep.clients.len(),
                }
            })
            .collect()
    }
}

//! Analytics Engine: deterministic metrics over the roster.
//!
//! Every numeric claim the service makes comes from these functions, never
//! from free-text generation. The Query Router exists to force numeric
//! questions down this path.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::QueryError;
use crate::models::{SalesRep, STATUS_CLOSED_LOST, STATUS_CLOSED_WON, STATUS_IN_PROGRESS};
use crate::roster::Roster;

/// Single-rep performance summary.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceSummary {
    pub rep_id: u32,
    pub rep_name: String,
    pub role: String,
    pub region: String,
    pub total_deals: usize,
    pub status_counts: BTreeMap<String, usize>,
    pub total_value: u64,
    pub win_rate: f64,
}

/// One side of a two-rep comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSide {
    pub rep_id: u32,
    pub rep_name: String,
    pub role: String,
    pub region: String,
    pub total_deals: usize,
    pub closed_won_deals: usize,
    pub closed_won_value: u64,
    pub win_rate: f64,
    pub client_count: usize,
}

/// Two-rep comparison, labeled in argument order.
#[derive(Debug, Clone, Serialize)]
pub struct RepComparison {
    pub left: ComparisonSide,
    pub right: ComparisonSide,
}

/// An analytics answer: either a summary or a comparison.
#[derive(Debug, Clone, Serialize)]
pub enum AnalyticsReport {
    Performance(PerformanceSummary),
    Comparison(RepComparison),
}

impl AnalyticsReport {
    /// The rep names this report covers, in labeling order.
    pub fn rep_names(&self) -> Vec<String> {
        match self {
            AnalyticsReport::Performance(summary) => vec![summary.rep_name.clone()],
            AnalyticsReport::Comparison(cmp) => {
                vec![cmp.left.rep_name.clone(), cmp.right.rep_name.clone()]
            }
        }
    }

    /// Human-readable answer text.
    pub fn render(&self) -> String {
        match self {
            AnalyticsReport::Performance(s) => s.render(),
            AnalyticsReport::Comparison(c) => c.render(),
        }
    }
}

impl PerformanceSummary {
    fn render(&self) -> String {
        format!(
            "Performance for {} ({}, {}):\n\
             - Total deals: {}\n\
             - Closed Won: {}\n\
             - Closed Lost: {}\n\
             - In Progress: {}\n\
             - Win rate: {:.1}%\n\
             - Total pipeline value: {}",
            self.rep_name,
            self.role,
            self.region,
            self.total_deals,
            self.status_counts.get(STATUS_CLOSED_WON).unwrap_or(&0),
            self.status_counts.get(STATUS_CLOSED_LOST).unwrap_or(&0),
            self.status_counts.get(STATUS_IN_PROGRESS).unwrap_or(&0),
            self.win_rate,
            group_thousands(self.total_value),
        )
    }
}

impl RepComparison {
    fn render(&self) -> String {
        format!(
            "Performance comparison:\n\n{}\n\n{}",
            self.left.render(),
            self.right.render()
        )
    }
}

impl ComparisonSide {
    fn render(&self) -> String {
        format!(
            "{} ({}, {}):\n\
             - Closed Won deals: {} of {}\n\
             - Closed Won value: {}\n\
             - Win rate: {:.1}%\n\
             - Clients: {}",
            self.rep_name,
            self.role,
            self.region,
            self.closed_won_deals,
            self.total_deals,
            group_thousands(self.closed_won_value),
            self.win_rate,
            self.client_count,
        )
    }
}

/// Compute the performance summary for the named rep.
///
/// Name matching is case-insensitive exact, per the roster contract.
pub fn performance_summary(
    roster: &Roster,
    rep_name: &str,
) -> Result<PerformanceSummary, QueryError> {
    let rep = lookup(roster, rep_name)?;
    let status_counts: BTreeMap<String, usize> = rep
        .deal_count_by_status()
        .into_iter()
        .map(|(status, count)| (status.to_string(), count))
        .collect();

    Ok(PerformanceSummary {
        rep_id: rep.id,
        rep_name: rep.name.clone(),
        role: rep.role.clone(),
        region: rep.region.clone(),
        total_deals: rep.deals.len(),
        status_counts,
        total_value: rep.total_deal_value(),
        win_rate: rep.win_rate(),
    })
}

/// Compare two reps. Fails naming whichever rep is missing.
pub fn compare(roster: &Roster, rep1: &str, rep2: &str) -> Result<RepComparison, QueryError> {
    let left = lookup(roster, rep1)?;
    let right = lookup(roster, rep2)?;
    Ok(RepComparison {
        left: comparison_side(left),
        right: comparison_side(right),
    })
}

fn lookup<'a>(roster: &'a Roster, name: &str) -> Result<&'a SalesRep, QueryError> {
    roster.by_name(name).ok_or_else(|| QueryError::RepNotFound {
        name: name.to_string(),
    })
}

fn comparison_side(rep: &SalesRep) -> ComparisonSide {
    let counts = rep.deal_count_by_status();
    ComparisonSide {
        rep_id: rep.id,
        rep_name: rep.name.clone(),
        role: rep.role.clone(),
        region: rep.region.clone(),
        total_deals: rep.deals.len(),
        closed_won_deals: counts.get(STATUS_CLOSED_WON).copied().unwrap_or(0),
        closed_won_value: rep.deals_value_with_status(STATUS_CLOSED_WON),
        win_rate: rep.win_rate(),
        client_count: rep.clients.len(),
    }
}

/// Format an integer with thousands separators: `1500` → `"1,500"`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

//! Core data model for the sales roster.
//!
//! These types are deserialized once at the service boundary; after that the
//! rest of the engine treats them as structurally valid. `Deal::value` is a
//! `u64`, so the non-negative invariant holds by construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Deal status recognized by the analytics computations.
pub const STATUS_CLOSED_WON: &str = "Closed Won";
/// See [`STATUS_CLOSED_WON`].
pub const STATUS_CLOSED_LOST: &str = "Closed Lost";
/// See [`STATUS_CLOSED_WON`].
pub const STATUS_IN_PROGRESS: &str = "In Progress";

/// A single deal attributed to a sales rep.
///
/// `client` is an informational name reference, not a foreign key. `status`
/// is an open enumeration: the three constants above are load-bearing for
/// analytics, any other value passes through uninterpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub client: String,
    pub value: u64,
    pub status: String,
}

/// A client contact listed under a rep. Two reps may list clients with the
/// same name independently; there is no cross-rep identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub industry: String,
    pub contact: String,
}

/// A sales representative record, immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRep {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub region: String,
    pub skills: Vec<String>,
    pub deals: Vec<Deal>,
    pub clients: Vec<Client>,
}

/// Top-level shape of the roster data file.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesData {
    #[serde(rename = "salesReps")]
    pub sales_reps: Vec<SalesRep>,
}

impl SalesRep {
    /// Count deals per status in a single pass.
    pub fn deal_count_by_status(&self) -> BTreeMap<&str, usize> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for deal in &self.deals {
            *counts.entry(deal.status.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Win rate as a percentage: `won / (won + lost) × 100`.
    ///
    /// Defined as `0.0` when the rep has no closed deals at all, so reps
    /// with an entirely in-progress pipeline don't divide by zero.
    pub fn win_rate(&self) -> f64 {
        let counts = self.deal_count_by_status();
        let won = counts.get(STATUS_CLOSED_WON).copied().unwrap_or(0);
        let lost = counts.get(STATUS_CLOSED_LOST).copied().unwrap_or(0);
        let closed = won + lost;
        if closed == 0 {
            return 0.0;
        }
        won as f64 / closed as f64 * 100.0
    }

    /// Total pipeline value: the sum of every deal's value regardless of status.
    pub fn total_deal_value(&self) -> u64 {
        self.deals.iter().map(|d| d.value).sum()
    }

    /// Sum of deal values with exactly the given status.
    pub fn deals_value_with_status(&self, status: &str) -> u64 {
        self.deals
            .iter()
            .filter(|d| d.status == status)
            .map(|d| d.value)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rep_with_deals(deals: Vec<Deal>) -> SalesRep {
        SalesRep {
            id: 1,
            name: "Alice".to_string(),
            role: "Senior Rep".to_string(),
            region: "West".to_string(),
            skills: vec!["Negotiation".to_string()],
            deals,
            clients: vec![],
        }
    }

    fn deal(client: &str, value: u64, status: &str) -> Deal {
        Deal {
            client: client.to_string(),
            value,
            status: status.to_string(),
        }
    }

    #[test]
    fn test_win_rate_mixed() {
        let rep = rep_with_deals(vec![
            deal("Acme", 1000, STATUS_CLOSED_WON),
            deal("Globex", 500, STATUS_CLOSED_LOST),
        ]);
        assert!((rep.win_rate() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_win_rate_zero_when_no_closed_deals() {
        let rep = rep_with_deals(vec![
            deal("Acme", 1000, STATUS_IN_PROGRESS),
            deal("Globex", 500, "Negotiating"),
        ]);
        assert_eq!(rep.win_rate(), 0.0);
    }

    #[test]
    fn test_win_rate_zero_when_no_deals() {
        let rep = rep_with_deals(vec![]);
        assert_eq!(rep.win_rate(), 0.0);
    }

    #[test]
    fn test_status_counts_sum_to_deal_count() {
        let rep = rep_with_deals(vec![
            deal("Acme", 1000, STATUS_CLOSED_WON),
            deal("Globex", 500, STATUS_CLOSED_LOST),
            deal("Initech", 700, STATUS_IN_PROGRESS),
            deal("Umbrella", 300, "On Hold"),
        ]);
        let counts = rep.deal_count_by_status();
        let total: usize = counts.values().sum();
        assert_eq!(total, rep.deals.len());
        assert_eq!(counts.get("On Hold"), Some(&1));
    }

    #[test]
    fn test_pipeline_value_counts_every_status() {
        let rep = rep_with_deals(vec![
            deal("Acme", 1000, STATUS_CLOSED_WON),
            deal("Globex", 500, STATUS_CLOSED_LOST),
            deal("Initech", 700, STATUS_IN_PROGRESS),
        ]);
        assert_eq!(rep.total_deal_value(), 2200);
        assert_eq!(rep.deals_value_with_status(STATUS_CLOSED_WON), 1000);
    }

    #[test]
    fn test_deserialize_roster_file_shape() {
        let raw = r#"{
            "salesReps": [
                {
                    "id": 1,
                    "name": "Alice",
                    "role": "Senior Rep",
                    "region": "West",
                    "skills": ["Negotiation", "CRM"],
                    "deals": [
                        {"client": "Acme", "value": 1000, "status": "Closed Won"}
                    ],
                    "clients": [
                        {"name": "Acme", "industry": "Manufacturing", "contact": "jane@acme.com"}
                    ]
                }
            ]
        }"#;
        let data: SalesData = serde_json::from_str(raw).unwrap();
        assert_eq!(data.sales_reps.len(), 1);
        assert_eq!(data.sales_reps[0].deals[0].value, 1000);
        assert_eq!(data.sales_reps[0].clients[0].industry, "Manufacturing");
    }

    #[test]
    fn test_deserialize_rejects_negative_value() {
        let raw = r#"{
            "salesReps": [
                {
                    "id": 1,
                    "name": "Alice",
                    "role": "Rep",
                    "region": "West",
                    "skills": [],
                    "deals": [{"client": "Acme", "value": -5, "status": "Closed Won"}],
                    "clients": []
                }
            ]
        }"#;
        assert!(serde_json::from_str::<SalesData>(raw).is_err());
    }
}

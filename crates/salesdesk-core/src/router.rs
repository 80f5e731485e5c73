//! Query Router: deterministic classification of incoming questions.
//!
//! A closed set of routes selected by explicit keyword and name matching —
//! not a second model call — so routing is auditable and a numeric question
//! can never silently drift to free text when a rep name and a known metric
//! keyword both match. The flip side is accepted: phrasings outside the
//! trigger words ("who is winning more, Alice or Bob") take the general
//! path. That is expected behavior, not a bug.

use crate::roster::Roster;

/// Comparison trigger words, matched as whole tokens.
const COMPARE_KEYWORDS: [&str; 3] = ["compare", "vs", "versus"];

/// Performance trigger phrases, matched as substrings of the lowercased
/// question.
const PERFORMANCE_KEYWORDS: [&str; 3] = ["performance", "win rate", "total value"];

/// Where a question goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Retrieval-augmented generation.
    General,
    /// Single-rep analytics summary. Carries the roster's canonical name.
    Performance { rep: String },
    /// Two-rep analytics comparison, in question order.
    Compare { rep1: String, rep2: String },
}

/// Classify a question against the roster.
///
/// Precedence: a comparison keyword plus two recognized rep names routes to
/// [`Route::Compare`]; otherwise a performance keyword plus at least one
/// recognized name routes to [`Route::Performance`]; everything else is
/// [`Route::General`]. Names are recognized by full-name substring match and
/// reported in order of appearance.
pub fn classify(question: &str, roster: &Roster) -> Route {
    let lower = question.to_lowercase();
    let named = roster.named_in(question);

    let has_compare_keyword = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| COMPARE_KEYWORDS.contains(&token));

    if has_compare_keyword && named.len() >= 2 {
        return Route::Compare {
            rep1: named[0].name.clone(),
            rep2: named[1].name.clone(),
        };
    }

    let has_performance_keyword = PERFORMANCE_KEYWORDS.iter().any(|kw| lower.contains(kw));

    if has_performance_keyword {
        if let Some(rep) = named.first() {
            return Route::Performance {
                rep: rep.name.clone(),
            };
        }
    }

    Route::General
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SalesRep;

    fn rep(id: u32, name: &str) -> SalesRep {
        SalesRep {
            id,
            name: name.to_string(),
            role: "Rep".to_string(),
            region: "West".to_string(),
            skills: vec![],
            deals: vec![],
            clients: vec![],
        }
    }

    fn roster() -> Roster {
        Roster::new(vec![rep(1, "Alice"), rep(2, "Bob")]).unwrap()
    }

    #[test]
    fn test_compare_with_two_names() {
        let route = classify("Compare Alice and Bob", &roster());
        assert_eq!(
            route,
            Route::Compare {
                rep1: "Alice".to_string(),
                rep2: "Bob".to_string()
            }
        );
    }

    #[test]
    fn test_compare_respects_question_order() {
        let route = classify("bob vs alice, who closed more?", &roster());
        assert_eq!(
            route,
            Route::Compare {
                rep1: "Bob".to_string(),
                rep2: "Alice".to_string()
            }
        );
    }

    #[test]
    fn test_versus_keyword() {
        let route = classify("Alice versus Bob", &roster());
        assert!(matches!(route, Route::Compare { .. }));
    }

    #[test]
    fn test_vs_is_matched_as_a_token() {
        // "investors" contains "vs" but must not trigger a comparison.
        let route = classify("Which investors does Alice talk to?", &roster());
        assert_eq!(route, Route::General);
    }

    #[test]
    fn test_compare_keyword_single_name_falls_through() {
        let route = classify("How does Alice compare?", &roster());
        assert_eq!(route, Route::General);
    }

    #[test]
    fn test_performance_keywords() {
        for q in [
            "How is Alice's performance?",
            "What is the win rate of Alice?",
            "Show me Alice's total value",
        ] {
            assert_eq!(
                classify(q, &roster()),
                Route::Performance {
                    rep: "Alice".to_string()
                },
                "question {q:?} should route to the analytics summary"
            );
        }
    }

    #[test]
    fn test_performance_keyword_without_name_is_general() {
        assert_eq!(classify("What is our team win rate?", &roster()), Route::General);
    }

    #[test]
    fn test_plain_question_is_general() {
        assert_eq!(classify("What does Alice do?", &roster()), Route::General);
    }

    #[test]
    fn test_unanticipated_phrasing_stays_general() {
        // Deliberately outside the trigger vocabulary; see module docs.
        assert_eq!(
            classify("who is winning more, Alice or Bob", &roster()),
            Route::General
        );
    }

    #[test]
    fn test_compare_beats_performance() {
        let route = classify("Compare the performance of Alice and Bob", &roster());
        assert!(matches!(route, Route::Compare { .. }));
    }
}

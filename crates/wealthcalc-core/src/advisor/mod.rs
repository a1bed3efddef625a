//! Canned guidance for free-text questions.
//!
//! Rules are checked in order against the lowercased query and the first
//! rule with a matching keyword answers. Nothing here touches the projection
//! engine.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub topic: String,
    /// Lowercase substrings; any one of them triggers the rule.
    pub keywords: Vec<String>,
    pub response: String,
}

impl Rule {
    pub fn new(topic: &str, keywords: &[&str], response: &str) -> Self {
        Self {
            topic: topic.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            response: response.into(),
        }
    }

    pub fn matches(&self, normalized_query: &str) -> bool {
        self.keywords.iter().any(|k| normalized_query.contains(k.as_str()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisor {
    pub rules: Vec<Rule>,
    pub fallback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    /// Topic of the matching rule; `None` when the fallback answered.
    pub topic: Option<String>,
    pub response: String,
}

const FALLBACK: &str = "That's a great question! Start with the calculators to get specific \
numbers for your situation, and weigh your age, risk tolerance and financial goals. \
Ask about SIPs, lump sums, retirement, portfolios or tax saving for targeted guidance.";

impl Default for Advisor {
    fn default() -> Self {
        Self {
            rules: vec![
                Rule::new(
                    "sip",
                    &["sip", "systematic"],
                    "SIP (Systematic Investment Plan) builds wealth gradually and averages out \
                     market volatility through rupee cost averaging. Starting with ₹5,000-10,000 \
                     a month in diversified equity mutual funds keeps the habit affordable, \
                     disciplined and less exposed to timing risk.",
                ),
                Rule::new(
                    "retirement",
                    &["retirement", "retire"],
                    "For retirement, aim for 25 times your annual expenses. In your late 20s, \
                     invest 20-25% of income with a 70-80% equity allocation and shift towards \
                     debt as retirement approaches. EPF, PPF and equity mutual funds keep the \
                     plan tax efficient.",
                ),
                Rule::new(
                    "portfolio",
                    &["portfolio", "diversify"],
                    "A diversified portfolio might hold 60-70% equity across large, mid and \
                     small caps, 20-25% debt, 5-10% gold and around 5% international equity. \
                     Rebalance once a year and adjust the mix to your age and risk tolerance.",
                ),
                Rule::new(
                    "lump_sum",
                    &["lump sum", "one time"],
                    "Lump sums work best when markets are undervalued or correcting. For a large \
                     amount, park it in a debt fund and move it into equity through a Systematic \
                     Transfer Plan to keep rupee cost averaging while earning more than a \
                     savings account.",
                ),
                Rule::new(
                    "tax",
                    &["tax", "80c"],
                    "For tax efficiency use ELSS funds (80C, shortest 3-year lock-in), PPF (80C, \
                     tax-free returns), EPF contributions, NPS (80CCD) and health insurance \
                     (80D).",
                ),
            ],
            fallback: FALLBACK.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

impl Advisor {
    pub fn matching_rule(&self, query: &str) -> Option<&Rule> {
        let normalized = query.to_lowercase();
        self.rules.iter().find(|r| r.matches(&normalized))
    }

    /// Response of the first matching rule, or the fallback.
    pub fn respond(&self, query: &str) -> &str {
        self.matching_rule(query)
            .map(|r| r.response.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    pub fn advise(&self, query: &str) -> Advice {
        let rule = self.matching_rule(query);
        log::debug!(
            "advisor: query of {} chars matched {:?}",
            query.len(),
            rule.map(|r| r.topic.as_str())
        );
        Advice {
            topic: rule.map(|r| r.topic.clone()),
            response: self.respond(query).to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_is_case_insensitive() {
        let advisor = Advisor::default();
        let out = advisor.advise("Should I start a SIP?");
        assert_eq!(out.topic.as_deref(), Some("sip"));
    }

    #[test]
    fn test_first_rule_wins() {
        // Mentions both retirement and tax; retirement is declared first.
        let advisor = Advisor::default();
        let out = advisor.advise("how do I retire early and save tax");
        assert_eq!(out.topic.as_deref(), Some("retirement"));
    }

    #[test]
    fn test_multi_word_keyword() {
        let advisor = Advisor::default();
        assert_eq!(
            advisor.advise("Is a one time investment better?").topic.as_deref(),
            Some("lump_sum")
        );
    }

    #[test]
    fn test_unmatched_query_gets_fallback() {
        let advisor = Advisor::default();
        assert_eq!(advisor.respond("what about crypto?"), FALLBACK);
        assert!(advisor.advise("").topic.is_none());
    }

    #[test]
    fn test_custom_rules() {
        let advisor = Advisor {
            rules: vec![Rule::new("gold", &["GOLD"], "Keep gold under 10%.")],
            fallback: "n/a".into(),
        };
        assert_eq!(advisor.respond("gold etf?"), "Keep gold under 10%.");
        assert_eq!(advisor.respond("sip?"), "n/a");
    }
}

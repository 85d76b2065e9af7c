//! Resource ledger: parses `team amount` declarations into additive mappings

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Suffix that marks a team key as a dollar ask rather than headcount
pub const MONETARY_TAG: &str = " ($)";

/// Placeholder team for an explicit statement of zero need
pub const NO_TEAM: &str = "none";

const CURRENCY_MARKER: char = '$';
const UNKNOWN_AMOUNT: &str = "?";

/// Team key to allocation. `add` is the only way amounts enter the map, so
/// repeated teams always accumulate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResourceMap(BTreeMap<String, f64>);

impl ResourceMap {
    pub fn add(&mut self, team: &str, amount: f64) {
        *self.0.entry(team.to_string()).or_insert(0.0) += amount;
    }

    pub fn get(&self, team: &str) -> Option<f64> {
        self.0.get(team).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(team, amount)| (team.as_str(), *amount))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of headcount entries: monetary and empty keys are left out
    pub fn headcount_total(&self) -> f64 {
        self.iter()
            .filter(|(team, _)| !team.is_empty() && !is_monetary(team))
            .fold(0.0, |total, (_, amount)| total + amount)
    }

    /// Parse a declaration into a fresh map, dropping any fragment problems
    #[cfg(test)]
    pub fn from_declaration(declaration: &str) -> Self {
        let mut map = Self::default();
        for (team, amount) in parse_declaration(declaration).allocations {
            map.add(&team, amount);
        }
        map
    }
}

pub fn is_monetary(team: &str) -> bool {
    team.ends_with(MONETARY_TAG)
}

/// One successfully read fragment of a declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Allocation { team: String, amount: f64 },
    /// Amount given as `?`: contributes nothing
    Tbd { team: String },
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FragmentError {
    #[error("'{fragment}' has {tokens} tokens, expected a team and an amount")]
    TokenCount { fragment: String, tokens: usize },

    #[error("'{fragment}' has an unreadable amount '{amount}'")]
    Amount { fragment: String, amount: String },
}

/// Outcome of folding every fragment of one declaration
#[derive(Debug, Default)]
pub struct Declaration {
    pub allocations: Vec<(String, f64)>,
    pub tbd: Vec<String>,
    pub errors: Vec<FragmentError>,
}

pub fn parse_fragment(fragment: &str) -> Result<Fragment, FragmentError> {
    let fragment = fragment.trim();
    let fragment = if fragment == "0" {
        "none 0"
    } else {
        fragment
    };

    let tokens: Vec<&str> = fragment.split_whitespace().collect();
    let [team, amount] = tokens.as_slice() else {
        return Err(FragmentError::TokenCount {
            fragment: fragment.to_string(),
            tokens: tokens.len(),
        });
    };

    if *amount == UNKNOWN_AMOUNT {
        return Ok(Fragment::Tbd {
            team: team.to_string(),
        });
    }

    let (team, number) = match amount.strip_prefix(CURRENCY_MARKER) {
        Some(dollars) => (format!("{}{}", team, MONETARY_TAG), dollars),
        None => (team.to_string(), *amount),
    };

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Fragment::Allocation {
            team,
            amount: value,
        }),
        _ => Err(FragmentError::Amount {
            fragment: fragment.to_string(),
            amount: amount.to_string(),
        }),
    }
}

/// Split a comma-separated declaration and fold each fragment's result
pub fn parse_declaration(declaration: &str) -> Declaration {
    declaration
        .split(',')
        .filter(|fragment| !fragment.trim().is_empty())
        .map(parse_fragment)
        .fold(Declaration::default(), |mut acc, result| {
            match result {
                Ok(Fragment::Allocation { team, amount }) => acc.allocations.push((team, amount)),
                Ok(Fragment::Tbd { team }) => acc.tbd.push(team),
                Err(e) => acc.errors.push(e),
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_means_explicit_none() {
        let parsed = parse_declaration("0");
        assert!(parsed.errors.is_empty());
        assert!(parsed.tbd.is_empty());

        let map = ResourceMap::from_declaration("0");
        assert_eq!(map.get(NO_TEAM), Some(0.0));
        assert_eq!(map.iter().count(), 1);
    }

    #[test]
    fn test_repeated_team_accumulates() {
        let map = ResourceMap::from_declaration("eng 4, eng 6");
        assert_eq!(map.get("eng"), Some(10.0));
        assert_eq!(map.iter().count(), 1);
    }

    #[test]
    fn test_unknown_amount_is_dropped() {
        let parsed = parse_declaration("eng ?");
        assert!(parsed.allocations.is_empty());
        assert_eq!(parsed.tbd, vec!["eng".to_string()]);
        assert!(ResourceMap::from_declaration("eng ?").is_empty());
    }

    #[test]
    fn test_dollar_amount_is_tagged() {
        let map = ResourceMap::from_declaration("eng $50000");
        assert_eq!(map.get("eng ($)"), Some(50000.0));
        assert_eq!(map.headcount_total(), 0.0);
    }

    #[test]
    fn test_headcount_total_skips_empty_and_monetary_keys() {
        let mut map = ResourceMap::default();
        map.add("eng", 2.5);
        map.add("ops", 1.0);
        map.add("", 7.0);
        map.add("eng ($)", 1000.0);
        assert_eq!(map.headcount_total(), 3.5);
    }

    #[test]
    fn test_bad_fragments_do_not_stop_the_rest() {
        let parsed = parse_declaration("eng, ops 1, qa lots, dev 2 3, ux 0.5");
        assert_eq!(
            parsed.allocations,
            vec![("ops".to_string(), 1.0), ("ux".to_string(), 0.5)]
        );
        assert_eq!(parsed.errors.len(), 3);
        assert!(matches!(
            parsed.errors[0],
            FragmentError::TokenCount { tokens: 1, .. }
        ));
        assert!(matches!(parsed.errors[1], FragmentError::Amount { .. }));
        assert!(matches!(
            parsed.errors[2],
            FragmentError::TokenCount { tokens: 3, .. }
        ));
    }

    #[test]
    fn test_empty_fragments_are_ignored() {
        let parsed = parse_declaration("eng 1,, ops 2,");
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.allocations.len(), 2);
        assert!(parse_declaration("").allocations.is_empty());
    }

    #[test]
    fn test_non_finite_amount_is_rejected() {
        assert!(parse_fragment("eng inf").is_err());
        assert!(parse_fragment("eng NaN").is_err());
        assert!(parse_fragment("eng $").is_err());
    }

    proptest! {
        #[test]
        fn prop_allocations_are_additive(
            amounts in proptest::collection::vec((0usize..3, 0u32..400), 1..20)
        ) {
            let teams = ["eng", "ops", "qa"];
            let fragments: Vec<String> = amounts
                .iter()
                .map(|(t, quarters)| format!("{} {}", teams[*t], *quarters as f64 / 4.0))
                .collect();

            let forward = ResourceMap::from_declaration(&fragments.join(", "));
            let mut reversed_fragments = fragments.clone();
            reversed_fragments.reverse();
            let reversed = ResourceMap::from_declaration(&reversed_fragments.join(", "));

            for (idx, team) in teams.iter().enumerate() {
                let expected: f64 = amounts
                    .iter()
                    .filter(|(t, _)| *t == idx)
                    .map(|(_, quarters)| *quarters as f64 / 4.0)
                    .sum();
                prop_assert_eq!(forward.get(team).unwrap_or(0.0), expected);
                prop_assert_eq!(reversed.get(team).unwrap_or(0.0), expected);
            }
        }
    }
}

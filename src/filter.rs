// 🔎 Catalog Filter Engine - Search + facet filters over the catalog
// Pure function of (catalog, criteria): no state, no side effects, no errors
//
// A coin survives only if it passes every active predicate:
//   1. text search   (name / denomination / commemorative note)
//   2. denomination  (exact)
//   3. mint city     (exact)
//   4. status        (exact)
//   5. view mode     (regular / commemorative issue type)

use crate::coin::{CoinRecord, CoinStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sentinel used by selectors for "no constraint"
pub const ALL: &str = "all";

// ============================================================================
// SELECTION (categorical facet value or "all")
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Case-sensitive categorical equality; `All` admits everything
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(value) => value,
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }
}

impl From<Option<&str>> for Selection {
    fn from(value: Option<&str>) -> Self {
        value.map(Selection::from).unwrap_or_default()
    }
}

// ============================================================================
// STATUS FILTER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CoinStatus),
}

impl StatusFilter {
    pub fn admits(&self, status: CoinStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(selected) => *selected == status,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => ALL,
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    /// All → active → discontinued → All
    pub fn cycle(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(CoinStatus::Active),
            StatusFilter::Only(CoinStatus::Active) => StatusFilter::Only(CoinStatus::Discontinued),
            StatusFilter::Only(CoinStatus::Discontinued) => StatusFilter::All,
        }
    }
}

/// Unrecognized values fall back to `All`
impl From<&str> for StatusFilter {
    fn from(value: &str) -> Self {
        value
            .parse::<CoinStatus>()
            .map(StatusFilter::Only)
            .unwrap_or(StatusFilter::All)
    }
}

// ============================================================================
// VIEW MODE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    All,
    Regular,
    Commemorative,
}

impl ViewMode {
    pub fn admits(&self, coin: &CoinRecord) -> bool {
        match self {
            ViewMode::All => true,
            ViewMode::Regular => coin.is_regular(),
            ViewMode::Commemorative => coin.is_commemorative(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::All => "all",
            ViewMode::Regular => "regular",
            ViewMode::Commemorative => "commemorative",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::All => "All Coins",
            ViewMode::Regular => "Regular Issue",
            ViewMode::Commemorative => "Commemorative",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ViewMode::All => ViewMode::Regular,
            ViewMode::Regular => ViewMode::Commemorative,
            ViewMode::Commemorative => ViewMode::All,
        }
    }
}

/// Unrecognized values fall back to `All`
impl From<&str> for ViewMode {
    fn from(value: &str) -> Self {
        match value {
            "regular" => ViewMode::Regular,
            "commemorative" => ViewMode::Commemorative,
            _ => ViewMode::All,
        }
    }
}

// ============================================================================
// FILTER CRITERIA
// ============================================================================

/// Current combination of user-selected search and filter values.
///
/// `FilterCriteria::default()` is the unfiltered view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_query: String,
    pub denomination: Selection,
    pub mint_city: Selection,
    pub status: StatusFilter,
    pub view_mode: ViewMode,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn with_denomination(mut self, denomination: impl Into<Selection>) -> Self {
        self.denomination = denomination.into();
        self
    }

    pub fn with_mint_city(mut self, mint_city: impl Into<Selection>) -> Self {
        self.mint_city = mint_city.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_view_mode(mut self, view_mode: impl Into<ViewMode>) -> Self {
        self.view_mode = view_mode.into();
        self
    }

    /// Number of predicates that currently constrain the result
    pub fn active_filters(&self) -> usize {
        [
            !self.search_query.is_empty(),
            !self.denomination.is_all(),
            !self.mint_city.is_all(),
            self.status != StatusFilter::All,
            self.view_mode != ViewMode::All,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.active_filters() == 0
    }

    /// Check a single coin against every active predicate
    pub fn matches(&self, coin: &CoinRecord) -> bool {
        self.matches_search(coin)
            && self.denomination.admits(&coin.denomination)
            && self.mint_city.admits(&coin.mint_city)
            && self.status.admits(coin.status)
            && self.view_mode.admits(coin)
    }

    /// Case-insensitive substring match on name, denomination or note.
    /// A missing note contributes nothing.
    fn matches_search(&self, coin: &CoinRecord) -> bool {
        if self.search_query.is_empty() {
            return true;
        }

        let query = self.search_query.to_lowercase();

        coin.name.to_lowercase().contains(&query)
            || coin.denomination.to_lowercase().contains(&query)
            || coin
                .commemorative_note
                .as_ref()
                .map_or(false, |note| note.to_lowercase().contains(&query))
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Stable filter: surviving coins keep their catalog order
pub fn filter<'a>(coins: &'a [CoinRecord], criteria: &FilterCriteria) -> Vec<&'a CoinRecord> {
    coins.iter().filter(|coin| criteria.matches(coin)).collect()
}

/// Distinct denominations, sorted ascending
pub fn distinct_denominations(coins: &[CoinRecord]) -> Vec<String> {
    distinct(coins.iter().map(|c| c.denomination.as_str()))
}

/// Distinct mint cities, sorted ascending
pub fn distinct_mint_cities(coins: &[CoinRecord]) -> Vec<String> {
    distinct(coins.iter().map(|c| c.mint_city.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Step a facet selector: All → first value → ... → last value → All.
/// A selection no longer present in the facet restarts from All.
pub fn cycle_selection(current: &Selection, facet: &[String]) -> Selection {
    match current {
        Selection::All => facet
            .first()
            .map(|v| Selection::Only(v.clone()))
            .unwrap_or_default(),
        Selection::Only(value) => match facet.iter().position(|v| v == value) {
            Some(i) if i + 1 < facet.len() => Selection::Only(facet[i + 1].clone()),
            _ => Selection::All,
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_coins;
    use pretty_assertions::assert_eq;

    fn ids(coins: &[&CoinRecord]) -> Vec<String> {
        coins.iter().map(|c| c.id.clone()).collect()
    }

    fn is_subsequence(sub: &[&CoinRecord], of: &[&CoinRecord]) -> bool {
        let mut it = of.iter();
        sub.iter().all(|s| it.any(|o| o.id == s.id))
    }

    /// A spread of criteria covering every predicate
    fn criteria_grid() -> Vec<FilterCriteria> {
        vec![
            FilterCriteria::new(),
            FilterCriteria::new().with_search("gandhi"),
            FilterCriteria::new().with_search("₹"),
            FilterCriteria::new().with_search("steel"),
            FilterCriteria::new().with_denomination("₹10"),
            FilterCriteria::new().with_mint_city("Mumbai"),
            FilterCriteria::new().with_status("discontinued"),
            FilterCriteria::new().with_view_mode(ViewMode::Regular),
            FilterCriteria::new()
                .with_mint_city("Mumbai")
                .with_view_mode(ViewMode::Commemorative),
        ]
    }

    // ------------------------------------------------------------------------
    // Scenarios
    // ------------------------------------------------------------------------

    #[test]
    fn test_search_matches_commemorative_note() {
        let coins = sample_coins();
        let result = filter(&coins, &FilterCriteria::new().with_search("Gandhi"));

        assert_eq!(ids(&result), vec!["4"]);
        assert!(result[0]
            .commemorative_note
            .as_deref()
            .unwrap()
            .contains("Mahatma Gandhi"));
    }

    #[test]
    fn test_view_mode_commemorative() {
        let coins = sample_coins();
        let result = filter(
            &coins,
            &FilterCriteria::new().with_view_mode(ViewMode::Commemorative),
        );

        assert_eq!(ids(&result), vec!["4", "6"]);
        assert_eq!(result[0].denomination, "₹20");
        assert_eq!(result[1].denomination, "₹75");
    }

    #[test]
    fn test_denomination_and_status_combined() {
        let coins = sample_coins();

        let active = FilterCriteria::new()
            .with_denomination("₹10")
            .with_status("active");
        assert_eq!(ids(&filter(&coins, &active)), vec!["1"]);

        let discontinued = active.with_status("discontinued");
        assert!(filter(&coins, &discontinued).is_empty());
    }

    #[test]
    fn test_mint_filter_keeps_catalog_order() {
        let coins = sample_coins();
        let result = filter(&coins, &FilterCriteria::new().with_mint_city("Mumbai"));

        assert_eq!(ids(&result), vec!["1", "4", "6"]);
    }

    #[test]
    fn test_default_criteria_is_noop() {
        let coins = sample_coins();
        let result = filter(&coins, &FilterCriteria::default());

        let expected: Vec<&CoinRecord> = coins.iter().collect();
        assert_eq!(result, expected);
    }

    // ------------------------------------------------------------------------
    // Predicate details
    // ------------------------------------------------------------------------

    #[test]
    fn test_search_is_case_insensitive() {
        let coins = sample_coins();
        let lower = filter(&coins, &FilterCriteria::new().with_search("stainless"));
        let upper = filter(&coins, &FilterCriteria::new().with_search("STAINLESS"));

        assert_eq!(ids(&lower), vec!["3", "5"]);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_search_matches_denomination() {
        let coins = sample_coins();
        // "₹7" only appears in the ₹75 denomination and name
        let result = filter(&coins, &FilterCriteria::new().with_search("₹7"));
        assert_eq!(ids(&result), vec!["6"]);
    }

    #[test]
    fn test_search_ignores_descriptive_fields() {
        let coins = sample_coins();
        // Present in descriptions and series only
        let result = filter(&coins, &FilterCriteria::new().with_search("Ashoka"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_absent_note_never_matches_note_clause() {
        let mut coins = sample_coins();
        coins.truncate(1);
        assert!(coins[0].commemorative_note.is_none());

        let result = filter(&coins, &FilterCriteria::new().with_search("Anniversary"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_denomination_is_case_sensitive() {
        let mut coins = sample_coins();
        coins[1].denomination = "Rs5".to_string();

        let result = filter(&coins, &FilterCriteria::new().with_denomination("rs5"));
        assert!(result.is_empty());

        let result = filter(&coins, &FilterCriteria::new().with_denomination("Rs5"));
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn test_view_mode_regular() {
        let coins = sample_coins();
        let result = filter(&coins, &FilterCriteria::new().with_view_mode("regular"));
        assert_eq!(ids(&result), vec!["1", "2", "3", "5"]);
    }

    #[test]
    fn test_unrecognized_values_are_permissive() {
        assert_eq!(ViewMode::from("featured"), ViewMode::All);
        assert_eq!(StatusFilter::from("retired"), StatusFilter::All);
        assert_eq!(Selection::from("all"), Selection::All);
        assert_eq!(Selection::from(None::<&str>), Selection::All);

        let coins = sample_coins();
        let criteria = FilterCriteria::new()
            .with_view_mode("featured")
            .with_status("retired");
        assert_eq!(filter(&coins, &criteria).len(), coins.len());
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        let result = filter(&[], &FilterCriteria::new().with_search("anything"));
        assert!(result.is_empty());
        assert!(distinct_denominations(&[]).is_empty());
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    #[test]
    fn test_filter_is_idempotent() {
        let coins = sample_coins();
        for criteria in criteria_grid() {
            assert_eq!(filter(&coins, &criteria), filter(&coins, &criteria));
        }
    }

    #[test]
    fn test_output_is_ordered_subsequence() {
        let coins = sample_coins();
        let all: Vec<&CoinRecord> = coins.iter().collect();

        for criteria in criteria_grid() {
            let result = filter(&coins, &criteria);
            assert!(is_subsequence(&result, &all), "{:?}", criteria);
        }
    }

    #[test]
    fn test_adding_constraint_narrows() {
        let coins = sample_coins();
        let narrowings: Vec<(FilterCriteria, FilterCriteria)> = vec![
            (
                FilterCriteria::new(),
                FilterCriteria::new().with_mint_city("Mumbai"),
            ),
            (
                FilterCriteria::new().with_mint_city("Mumbai"),
                FilterCriteria::new()
                    .with_mint_city("Mumbai")
                    .with_status("active"),
            ),
            (
                FilterCriteria::new().with_search("coin"),
                FilterCriteria::new()
                    .with_search("coin")
                    .with_view_mode(ViewMode::Regular),
            ),
            (
                FilterCriteria::new().with_view_mode(ViewMode::Commemorative),
                FilterCriteria::new()
                    .with_view_mode(ViewMode::Commemorative)
                    .with_denomination("₹75"),
            ),
        ];

        for (wide, narrow) in narrowings {
            let wide_result = filter(&coins, &wide);
            let narrow_result = filter(&coins, &narrow);
            assert!(
                is_subsequence(&narrow_result, &wide_result),
                "{:?} should narrow {:?}",
                narrow,
                wide
            );
        }
    }

    #[test]
    fn test_facets_sorted_and_deduplicated() {
        let coins = sample_coins();

        assert_eq!(
            distinct_denominations(&coins),
            vec!["₹1", "₹10", "₹2", "₹20", "₹5", "₹75"]
        );
        assert_eq!(
            distinct_mint_cities(&coins),
            vec!["Hyderabad", "Kolkata", "Mumbai", "Noida"]
        );
    }

    #[test]
    fn test_facets_cover_every_catalog_value() {
        let coins = sample_coins();
        let denominations = distinct_denominations(&coins);

        for coin in &coins {
            assert!(denominations.contains(&coin.denomination));
        }
        let mut sorted = denominations.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, denominations);
    }

    // ------------------------------------------------------------------------
    // Criteria helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_active_filter_count() {
        assert_eq!(FilterCriteria::new().active_filters(), 0);
        assert!(FilterCriteria::new().is_unfiltered());

        let criteria = FilterCriteria::new()
            .with_search("x")
            .with_denomination("₹1")
            .with_mint_city("Noida")
            .with_status("active")
            .with_view_mode(ViewMode::Regular);
        assert_eq!(criteria.active_filters(), 5);
    }

    #[test]
    fn test_cycle_selection_walks_facet() {
        let facet = vec!["A".to_string(), "B".to_string()];

        let first = cycle_selection(&Selection::All, &facet);
        assert_eq!(first, Selection::Only("A".to_string()));

        let second = cycle_selection(&first, &facet);
        assert_eq!(second, Selection::Only("B".to_string()));

        assert_eq!(cycle_selection(&second, &facet), Selection::All);
        assert_eq!(
            cycle_selection(&Selection::Only("gone".to_string()), &facet),
            Selection::All
        );
        assert_eq!(cycle_selection(&Selection::All, &[]), Selection::All);
    }

    #[test]
    fn test_status_and_view_cycles_return_to_all() {
        let status = StatusFilter::All.cycle().cycle().cycle();
        assert_eq!(status, StatusFilter::All);

        let view = ViewMode::All.next().next().next();
        assert_eq!(view, ViewMode::All);
    }
}

use in_memory_adapter::InMemoryRepo;
use tracing::{debug, info};
use validator::Validate;

use crate::{
    allocation::Allocation,
    dataset::PortfolioDataset,
    holding::{Holding, Symbol},
    integrity::{self, IntegrityError},
    performance::Performance,
    summary::Summary,
};

pub type HoldingRepo = InMemoryRepo<Holding, Symbol>;

/// Immutable snapshot of the portfolio and every view derived from it.
///
/// Built once, checked once, then only read.
#[derive(Debug)]
pub struct PortfolioStore {
    holdings: HoldingRepo,
    allocation: Allocation,
    performance: Performance,
    summary: Summary,
}

impl PortfolioStore {
    /// Derives every view from `dataset` and checks the result.
    /// # Errors
    /// Returns the first `IntegrityError` found; nothing is served from a
    /// dataset that fails.
    pub fn new(dataset: PortfolioDataset) -> Result<Self, IntegrityError> {
        let PortfolioDataset {
            holdings: inputs,
            performance,
            diversification_score,
            risk_level,
        } = dataset;

        let mut holdings = HoldingRepo::new();
        for input in inputs {
            if let Err(errors) = input.validate() {
                return Err(IntegrityError::InvalidHolding {
                    symbol: input.symbol,
                    errors,
                });
            }
            let holding = Holding::from_input(input);
            holdings.insert(holding.symbol.clone(), holding)?;
        }

        let summary = Summary::from_holdings(holdings.values(), diversification_score, risk_level)
            .ok_or(IntegrityError::EmptyPortfolio)?;
        let allocation = Allocation::from_holdings(holdings.values());

        let store = Self {
            holdings,
            allocation,
            performance,
            summary,
        };
        store.validate()?;

        info!(
            holdings = store.holdings.len(),
            total_value = store.summary.total_value,
            "Portfolio store loaded"
        );
        Ok(store)
    }

    /// # Errors
    /// See [`PortfolioStore::new`].
    pub fn with_sample_data() -> Result<Self, IntegrityError> {
        Self::new(PortfolioDataset::sample())
    }

    /// Re-checks every cross-view invariant.
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), IntegrityError> {
        let holdings = self.holdings.values();
        if holdings.is_empty() {
            return Err(IntegrityError::EmptyPortfolio);
        }
        for holding in holdings {
            integrity::check_holding(holding)?;
        }
        let total_value: f64 = holdings.iter().map(|h| h.value).sum();
        integrity::check_allocation(&self.allocation, total_value)?;
        integrity::check_summary(&self.summary, holdings)?;
        integrity::check_performance(&self.performance)?;

        debug!("Portfolio integrity checks passed");
        Ok(())
    }

    /// Holdings in dataset order.
    #[must_use]
    pub fn get_holdings(&self) -> &[Holding] {
        self.holdings.values()
    }

    #[must_use]
    pub fn get_allocation(&self) -> &Allocation {
        &self.allocation
    }

    #[must_use]
    pub fn get_performance(&self) -> &Performance {
        &self.performance
    }

    #[must_use]
    pub fn get_summary(&self) -> &Summary {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::holding::{HoldingInput, MarketCap};

    fn sample_store() -> PortfolioStore {
        PortfolioStore::with_sample_data().unwrap()
    }

    #[test]
    fn test_sample_holdings_order() {
        let store = sample_store();
        let holdings = store.get_holdings();
        assert_eq!(holdings.len(), 12);
        assert_eq!(holdings[0].symbol, "RELIANCE");
        assert_eq!(holdings[11].symbol, "HINDUNILVR");
    }

    #[test]
    fn test_sample_holdings_derived_fields() {
        for h in sample_store().get_holdings() {
            let cost = h.quantity as f64 * h.avg_price;
            assert!((h.value - h.quantity as f64 * h.current_price).abs() < 1e-6);
            assert!((h.gain_loss - (h.value - cost)).abs() < 1e-6);
            assert!((h.gain_loss_percent - h.gain_loss / cost * 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_sample_summary() {
        let store = sample_store();
        let summary = store.get_summary();
        assert_eq!(summary.total_value, 1_400_000.0);
        assert_eq!(summary.total_invested, 1_200_000.0);
        assert_eq!(summary.total_gain_loss, 200_000.0);
        assert!((summary.total_gain_loss_percent - 16.67).abs() < 0.01);
        assert_eq!(summary.top_performer.symbol, "INFY");
        assert!((summary.top_performer.gain_percent - 28.5).abs() < 1e-9);
        assert_eq!(summary.worst_performer.symbol, "HDFC");

        let total: f64 = store.get_holdings().iter().map(|h| h.value).sum();
        assert_eq!(summary.total_value, total);
        for h in store.get_holdings() {
            assert!(summary.top_performer.gain_percent >= h.gain_loss_percent);
            assert!(summary.worst_performer.gain_percent <= h.gain_loss_percent);
        }
    }

    #[test]
    fn test_sample_allocation() {
        let store = sample_store();
        let allocation = store.get_allocation();

        assert_eq!(allocation.by_sector.len(), 8);
        assert_eq!(allocation.by_sector["Technology"].value, 311_900.0);
        assert_eq!(allocation.by_sector["FMCG"].value, 309_900.0);
        assert_eq!(allocation.by_market_cap["Large"].percentage, 100.0);

        let sum: f64 = allocation.by_sector.values().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.5);
    }

    #[test]
    fn test_many_sectors_with_uneven_shares_load() {
        let mut dataset = PortfolioDataset::sample();
        dataset.holdings = (0..20)
            .map(|i| HoldingInput {
                symbol: format!("STOCK{i}"),
                name: format!("Stock {i} Ltd"),
                quantity: 1,
                avg_price: 4000.0,
                current_price: if i == 19 { 23_240.0 } else { 4040.0 },
                sector: format!("Sector {i}"),
                market_cap: MarketCap::Mid,
            })
            .collect();

        let store = PortfolioStore::new(dataset).unwrap();
        let by_sector = &store.get_allocation().by_sector;
        assert_eq!(by_sector.len(), 20);
        assert_eq!(store.get_summary().total_value, 100_000.0);

        let sum: f64 = by_sector.values().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((by_sector["Sector 0"].percentage - 4.04).abs() < 1e-9);
    }

    #[test]
    fn test_sample_timeline_ends_at_portfolio_value() {
        let store = sample_store();
        let latest = store.get_performance().timeline.last().unwrap();
        assert_eq!(latest.portfolio, store.get_summary().total_value);
        assert_eq!(store.get_performance().timeline.len(), 6);
    }

    #[test]
    fn test_duplicate_symbol_is_rejected() {
        let mut dataset = PortfolioDataset::sample();
        let duplicate = dataset.holdings[1].clone();
        dataset.holdings.push(duplicate);

        let result = PortfolioStore::new(dataset);
        assert!(matches!(
            result,
            Err(IntegrityError::DuplicateSymbol { symbol }) if symbol == "INFY"
        ));
    }

    #[test]
    fn test_empty_portfolio_is_rejected() {
        let mut dataset = PortfolioDataset::sample();
        dataset.holdings.clear();
        assert!(matches!(
            PortfolioStore::new(dataset),
            Err(IntegrityError::EmptyPortfolio)
        ));
    }

    #[test]
    fn test_invalid_holding_is_rejected() {
        let mut dataset = PortfolioDataset::sample();
        dataset.holdings[3].quantity = 0;
        assert!(matches!(
            PortfolioStore::new(dataset),
            Err(IntegrityError::InvalidHolding { symbol, .. }) if symbol == "HDFC"
        ));
    }

    #[test]
    fn test_score_out_of_range_is_rejected() {
        let mut dataset = PortfolioDataset::sample();
        dataset.diversification_score = 11.0;
        assert!(matches!(
            PortfolioStore::new(dataset),
            Err(IntegrityError::ScoreOutOfRange { .. })
        ));
    }

    #[test]
    fn test_unordered_timeline_is_rejected() {
        let mut dataset = PortfolioDataset::sample();
        dataset.performance.timeline.swap(0, 1);
        assert!(matches!(
            PortfolioStore::new(dataset),
            Err(IntegrityError::TimelineOutOfOrder { .. })
        ));
    }

    #[test]
    fn test_repeated_timeline_date_is_rejected() {
        let mut dataset = PortfolioDataset::sample();
        dataset.performance.timeline[1].date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(matches!(
            PortfolioStore::new(dataset),
            Err(IntegrityError::TimelineOutOfOrder { .. })
        ));
    }

    #[test]
    fn test_non_positive_series_value_is_rejected() {
        let mut dataset = PortfolioDataset::sample();
        dataset.performance.timeline[2].commodity = 0.0;
        assert!(matches!(
            PortfolioStore::new(dataset),
            Err(IntegrityError::InvalidSeriesValue { series: "gold", .. })
        ));
    }

    #[test]
    fn test_empty_timeline_is_rejected() {
        let mut dataset = PortfolioDataset::sample();
        dataset.performance.timeline.clear();
        assert!(matches!(
            PortfolioStore::new(dataset),
            Err(IntegrityError::EmptyTimeline)
        ));
    }

    #[test]
    fn test_non_finite_return_is_rejected() {
        let mut dataset = PortfolioDataset::sample();
        dataset.performance.returns.benchmark.one_year = f64::INFINITY;
        assert!(matches!(
            PortfolioStore::new(dataset),
            Err(IntegrityError::InvalidReturn { series: "nifty50" })
        ));
    }

    #[test]
    fn test_validate_detects_tampered_views() {
        let mut store = sample_store();
        store.summary.top_performer.gain_percent = 1.0;
        assert!(matches!(
            store.validate(),
            Err(IntegrityError::PerformerMismatch { performer: "Top", .. })
        ));

        let mut store = sample_store();
        store.summary.total_value += 1_000.0;
        assert!(matches!(
            store.validate(),
            Err(IntegrityError::SummaryMismatch { field: "totalValue", .. })
        ));

        let mut store = sample_store();
        if let Some(slice) = store.allocation.by_sector.get_mut("Banking") {
            slice.percentage += 5.0;
        }
        assert!(matches!(
            store.validate(),
            Err(IntegrityError::AllocationMismatch { dimension: "bySector", .. })
        ));
    }

    #[test]
    fn test_mixed_market_caps() {
        let mut dataset = PortfolioDataset::sample();
        dataset.holdings[9].market_cap = MarketCap::Mid;
        dataset.holdings[5].market_cap = MarketCap::Small;

        let store = PortfolioStore::new(dataset).unwrap();
        let by_cap = &store.get_allocation().by_market_cap;
        assert_eq!(by_cap.len(), 3);
        assert_eq!(by_cap["Mid"].value, 105_000.0);
        assert_eq!(by_cap["Small"].value, 84_000.0);
        assert_eq!(by_cap["Large"].value, 1_400_000.0 - 105_000.0 - 84_000.0);
    }
}

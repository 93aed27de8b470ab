use chrono::NaiveDate;

use crate::{
    dataset::PortfolioDataset,
    holding::{HoldingInput, MarketCap},
    performance::{HorizonReturns, Performance, PerformancePoint, Returns},
    summary::RiskLevel,
};

fn position(
    symbol: &str,
    name: &str,
    quantity: u64,
    avg_price: f64,
    current_price: f64,
    sector: &str,
) -> HoldingInput {
    HoldingInput {
        symbol: symbol.to_string(),
        name: name.to_string(),
        quantity,
        avg_price,
        current_price,
        sector: sector.to_string(),
        market_cap: MarketCap::Large,
    }
}

fn month_start(month: u32, portfolio: f64, nifty50: f64, gold: f64) -> PerformancePoint {
    PerformancePoint {
        date: NaiveDate::from_ymd_opt(2024, month, 1).expect("sample months are 1..=6"),
        portfolio,
        benchmark: nifty50,
        commodity: gold,
    }
}

fn returns(one_month: f64, three_months: f64, one_year: f64) -> HorizonReturns {
    HorizonReturns {
        one_month,
        three_months,
        one_year,
    }
}

impl PortfolioDataset {
    /// Twelve large-cap NSE positions worth 1,400,000 against 1,200,000 invested.
    #[must_use]
    pub fn sample() -> Self {
        let holdings = vec![
            position("RELIANCE", "Reliance Industries Ltd", 50, 2400.0, 2640.0, "Energy"),
            position("INFY", "Infosys Limited", 100, 1400.0, 1799.0, "Technology"),
            position("TCS", "Tata Consultancy Services", 40, 3000.0, 3300.0, "Technology"),
            position("HDFC", "HDFC Bank Ltd", 80, 1650.0, 1615.0, "Banking"),
            position("ICICI", "ICICI Bank Ltd", 100, 900.0, 1080.0, "Banking"),
            position("SUNPHARMA", "Sun Pharmaceutical Industries", 100, 700.0, 840.0, "Healthcare"),
            position("BHARTIARTL", "Bharti Airtel Ltd", 100, 800.0, 1000.0, "Telecom"),
            position("ITC", "ITC Ltd", 200, 400.0, 450.0, "FMCG"),
            position("LT", "Larsen & Toubro Ltd", 40, 2500.0, 3000.0, "Infrastructure"),
            position("MARUTI", "Maruti Suzuki India Ltd", 10, 9000.0, 10500.0, "Automobile"),
            position("ASIANPAINT", "Asian Paints Ltd", 40, 2200.0, 2640.0, "FMCG"),
            position("HINDUNILVR", "Hindustan Unilever Ltd", 40, 2250.0, 2857.5, "FMCG"),
        ];

        let timeline = vec![
            month_start(1, 1_200_000.0, 21_000.0, 62_000.0),
            month_start(2, 1_250_000.0, 21_500.0, 63_000.0),
            month_start(3, 1_280_000.0, 22_100.0, 64_500.0),
            month_start(4, 1_320_000.0, 22_800.0, 66_000.0),
            month_start(5, 1_360_000.0, 23_200.0, 67_000.0),
            month_start(6, 1_400_000.0, 23_500.0, 68_000.0),
        ];

        Self {
            holdings,
            performance: Performance {
                timeline,
                returns: Returns {
                    portfolio: returns(2.9, 8.3, 16.7),
                    benchmark: returns(1.8, 6.2, 12.4),
                    commodity: returns(1.5, 4.1, 8.9),
                },
            },
            diversification_score: 8.2,
            risk_level: RiskLevel::Moderate,
        }
    }
}

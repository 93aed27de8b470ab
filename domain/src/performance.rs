use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One monthly snapshot of the portfolio against its reference series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub portfolio: f64,
    /// NIFTY 50 index level.
    #[serde(rename = "nifty50")]
    pub benchmark: f64,
    /// Gold price per 10g.
    #[serde(rename = "gold")]
    pub commodity: f64,
}

impl PerformancePoint {
    #[must_use]
    pub fn series(&self) -> [(&'static str, f64); 3] {
        [
            ("portfolio", self.portfolio),
            ("nifty50", self.benchmark),
            ("gold", self.commodity),
        ]
    }
}

/// Percentage returns of one series over the tracked horizons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HorizonReturns {
    #[serde(rename = "1month")]
    pub one_month: f64,
    #[serde(rename = "3months")]
    pub three_months: f64,
    #[serde(rename = "1year")]
    pub one_year: f64,
}

impl HorizonReturns {
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.one_month.is_finite() && self.three_months.is_finite() && self.one_year.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Returns {
    pub portfolio: HorizonReturns,
    #[serde(rename = "nifty50")]
    pub benchmark: HorizonReturns,
    #[serde(rename = "gold")]
    pub commodity: HorizonReturns,
}

impl Returns {
    #[must_use]
    pub fn series(&self) -> [(&'static str, &HorizonReturns); 3] {
        [
            ("portfolio", &self.portfolio),
            ("nifty50", &self.benchmark),
            ("gold", &self.commodity),
        ]
    }
}

/// Timeline ordered by ascending date, plus multi-horizon returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Performance {
    pub timeline: Vec<PerformancePoint>,
    pub returns: Returns,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub type Symbol = String;

/// Market capitalisation class of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum MarketCap {
    Large,
    Mid,
    Small,
}

impl MarketCap {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MarketCap::Large => "Large",
            MarketCap::Mid => "Mid",
            MarketCap::Small => "Small",
        }
    }
}

/// A position as supplied by a dataset, before any figure is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoldingInput {
    #[validate(custom(function = "validate_ticker"))]
    #[schema(value_type = String)]
    pub symbol: Symbol,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub quantity: u64,
    #[validate(custom(function = "validate_price"))]
    pub avg_price: f64,
    #[validate(custom(function = "validate_price"))]
    pub current_price: f64,
    #[validate(length(min = 1))]
    pub sector: String,
    pub market_cap: MarketCap,
}

fn validate_ticker(symbol: &str) -> Result<(), ValidationError> {
    let well_formed = !symbol.is_empty()
        && symbol
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '&' | '-' | '.'));
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("ticker"))
    }
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("positive_price"))
    }
}

/// A position with its market value and unrealised gain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    #[schema(value_type = String)]
    pub symbol: Symbol,
    pub name: String,
    pub quantity: u64,
    pub avg_price: f64,
    pub current_price: f64,
    pub sector: String,
    pub market_cap: MarketCap,
    pub value: f64,
    pub gain_loss: f64,
    pub gain_loss_percent: f64,
}

impl Holding {
    #[must_use]
    pub fn from_input(input: HoldingInput) -> Self {
        let quantity = input.quantity as f64;
        let value = quantity * input.current_price;
        let cost_basis = quantity * input.avg_price;
        let gain_loss = value - cost_basis;

        Self {
            symbol: input.symbol,
            name: input.name,
            quantity: input.quantity,
            avg_price: input.avg_price,
            current_price: input.current_price,
            sector: input.sector,
            market_cap: input.market_cap,
            value,
            gain_loss,
            gain_loss_percent: percentage_of(gain_loss, cost_basis),
        }
    }

    /// Amount paid for the position (quantity x average price).
    #[must_use]
    pub fn cost_basis(&self) -> f64 {
        self.quantity as f64 * self.avg_price
    }
}

/// `part / whole * 100`, or 0 when `whole` is zero.
#[must_use]
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        (part / whole) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(symbol: &str, quantity: u64, avg_price: f64, current_price: f64) -> HoldingInput {
        HoldingInput {
            symbol: symbol.to_string(),
            name: format!("{symbol} Ltd"),
            quantity,
            avg_price,
            current_price,
            sector: "Banking".to_string(),
            market_cap: MarketCap::Large,
        }
    }

    #[test]
    fn test_derived_figures_for_a_gain() {
        let holding = Holding::from_input(input("ICICI", 100, 900.0, 1080.0));
        assert_eq!(holding.value, 108_000.0);
        assert_eq!(holding.gain_loss, 18_000.0);
        assert!((holding.gain_loss_percent - 20.0).abs() < 1e-9);
        assert_eq!(holding.cost_basis(), 90_000.0);
    }

    #[test]
    fn test_derived_figures_for_a_loss() {
        let holding = Holding::from_input(input("HDFC", 80, 1650.0, 1615.0));
        assert_eq!(holding.value, 129_200.0);
        assert_eq!(holding.gain_loss, -2_800.0);
        assert!((holding.gain_loss_percent - (-2800.0 / 132_000.0 * 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_valid_input_passes_validation() {
        assert!(input("M&M", 10, 1.5, 2.0).validate().is_ok());
        assert!(input("BAJAJ-AUTO", 10, 1.5, 2.0).validate().is_ok());
    }

    #[test]
    fn test_lowercase_symbol_is_rejected() {
        let errors = input("infy", 10, 1.0, 1.0).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("symbol"));
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let errors = input("INFY", 0, 1.0, 1.0).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("quantity"));
    }

    #[test]
    fn test_non_positive_prices_are_rejected() {
        let errors = input("INFY", 10, 0.0, f64::NAN).validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let holding = Holding::from_input(input("ITC", 200, 400.0, 450.0));
        let json = serde_json::to_value(&holding).unwrap();
        assert_eq!(json["avgPrice"], 400.0);
        assert_eq!(json["currentPrice"], 450.0);
        assert_eq!(json["marketCap"], "Large");
        assert_eq!(json["gainLoss"], 10_000.0);
        assert_eq!(json["gainLossPercent"], 12.5);
    }
}

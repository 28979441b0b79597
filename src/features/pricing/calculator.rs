//! Price tables and the duration/animation quote calculator.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Published annual prices for one slot, per zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnnualPrices {
    /// VIP zone, first row
    pub homepage_top_price: Decimal,
    /// VIP zone, every other row
    pub homepage_other_price: Decimal,
    /// Any themed category
    pub category_price: Decimal,
}

impl Default for AnnualPrices {
    fn default() -> Self {
        Self {
            homepage_top_price: Decimal::from(49),
            homepage_other_price: Decimal::from(39),
            category_price: Decimal::from(29),
        }
    }
}

impl AnnualPrices {
    /// Annual price shown for a row, before any per-slot override
    pub fn for_row(&self, is_vip: bool, row_number: i32) -> Decimal {
        match (is_vip, normalize_row(row_number)) {
            (true, 1) => self.homepage_top_price,
            (true, _) => self.homepage_other_price,
            (false, _) => self.category_price,
        }
    }

    /// A positive per-slot price beats the zone table
    pub fn for_slot(&self, slot_price: Option<Decimal>, is_vip: bool, row_number: i32) -> Decimal {
        positive(slot_price).unwrap_or_else(|| self.for_row(is_vip, row_number))
    }
}

/// Replace a submitted settings value that is missing, not finite or negative.
pub fn sanitize_price(value: Option<f64>, default: Decimal) -> Decimal {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .and_then(|v| Decimal::from_f64(v))
        .map(|d| d.round_dp(2))
        .unwrap_or(default)
}

fn normalize_row(row_number: i32) -> i32 {
    if row_number > 0 {
        row_number
    } else {
        1
    }
}

fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}

/// Monthly list price used by the quote calculator.
///
/// | zone | row 1 | rows 2-3 | rows 4+ |
/// |------|-------|----------|---------|
/// | VIP  | 200   | 120      | 80      |
/// | other| 80    | 50       | 30      |
pub fn base_monthly_price(slot_price: Option<Decimal>, is_vip: bool, row_number: i32) -> Decimal {
    if let Some(price) = positive(slot_price) {
        return price;
    }

    let amount = match (is_vip, normalize_row(row_number)) {
        (true, 1) => 200,
        (true, 2..=3) => 120,
        (true, _) => 80,
        (false, 1) => 80,
        (false, 2..=3) => 50,
        (false, _) => 30,
    };
    Decimal::from(amount)
}

/// Long-term booking discount
pub fn duration_multiplier(months: i32) -> Decimal {
    match months {
        3 => Decimal::new(9, 1),
        6 => Decimal::new(8, 1),
        12 => Decimal::new(7, 1),
        _ => Decimal::ONE,
    }
}

const ANIMATION_SURCHARGE: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

#[derive(Debug, Clone, Copy)]
pub struct QuoteInput {
    pub slot_price: Option<Decimal>,
    pub is_vip: bool,
    pub row_number: i32,
    pub duration_months: Option<i32>,
    pub is_animated: bool,
}

/// `base × months × discount (× 1.2 if animated)`, rounded half-up to cents.
pub fn calculate_ad_price(input: QuoteInput) -> Decimal {
    let months = input.duration_months.filter(|m| *m > 0).unwrap_or(1);
    let base = base_monthly_price(input.slot_price, input.is_vip, input.row_number);

    let mut price = base * Decimal::from(months) * duration_multiplier(months);
    if input.is_animated {
        price *= ANIMATION_SURCHARGE;
    }

    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(is_vip: bool, row: i32, months: Option<i32>, animated: bool) -> Decimal {
        calculate_ad_price(QuoteInput {
            slot_price: None,
            is_vip,
            row_number: row,
            duration_months: months,
            is_animated: animated,
        })
    }

    #[test]
    fn test_default_annual_prices() {
        let prices = AnnualPrices::default();
        assert_eq!(prices.for_row(true, 1), Decimal::from(49));
        assert_eq!(prices.for_row(true, 2), Decimal::from(39));
        assert_eq!(prices.for_row(true, 8), Decimal::from(39));
        assert_eq!(prices.for_row(false, 1), Decimal::from(29));
        assert_eq!(prices.for_row(true, 0), Decimal::from(49));
    }

    #[test]
    fn test_slot_override_wins() {
        let prices = AnnualPrices::default();
        assert_eq!(
            prices.for_slot(Some(Decimal::from(99)), true, 1),
            Decimal::from(99)
        );
        assert_eq!(prices.for_slot(Some(Decimal::ZERO), true, 1), Decimal::from(49));
        assert_eq!(prices.for_slot(None, false, 3), Decimal::from(29));
    }

    #[test]
    fn test_base_monthly_price_table() {
        assert_eq!(base_monthly_price(None, true, 1), Decimal::from(200));
        assert_eq!(base_monthly_price(None, true, 3), Decimal::from(120));
        assert_eq!(base_monthly_price(None, true, 4), Decimal::from(80));
        assert_eq!(base_monthly_price(None, false, 1), Decimal::from(80));
        assert_eq!(base_monthly_price(None, false, 2), Decimal::from(50));
        assert_eq!(base_monthly_price(None, false, 7), Decimal::from(30));
        assert_eq!(
            base_monthly_price(Some(Decimal::new(1550, 2)), false, 7),
            Decimal::new(1550, 2)
        );
    }

    #[test]
    fn test_quote_with_discount_and_animation() {
        // 200 × 12 × 0.7 × 1.2
        assert_eq!(quote(true, 1, Some(12), true), Decimal::new(201600, 2));
        // 50 × 3 × 0.9
        assert_eq!(quote(false, 2, Some(3), false), Decimal::new(13500, 2));
        // 30 × 2 × 1 (no discount tier for 2 months)
        assert_eq!(quote(false, 5, Some(2), false), Decimal::from(60));
    }

    #[test]
    fn test_quote_defaults_to_one_month() {
        assert_eq!(quote(false, 1, None, false), Decimal::from(80));
        assert_eq!(quote(false, 1, Some(0), false), Decimal::from(80));
    }

    #[test]
    fn test_quote_rounds_to_cents() {
        let price = calculate_ad_price(QuoteInput {
            slot_price: Some(Decimal::new(3333, 3)),
            is_vip: false,
            row_number: 1,
            duration_months: Some(1),
            is_animated: true,
        });
        // 3.333 × 1.2 = 3.9996
        assert_eq!(price, Decimal::new(400, 2));
    }

    #[test]
    fn test_sanitize_price() {
        let default = Decimal::from(49);
        assert_eq!(sanitize_price(Some(59.5), default), Decimal::new(595, 1));
        assert_eq!(sanitize_price(Some(0.0), default), Decimal::ZERO);
        assert_eq!(sanitize_price(Some(-1.0), default), default);
        assert_eq!(sanitize_price(Some(f64::NAN), default), default);
        assert_eq!(sanitize_price(Some(f64::INFINITY), default), default);
        assert_eq!(sanitize_price(None, default), default);
    }
}

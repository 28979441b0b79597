//! Dashboard aggregates over ads.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Europe::Vilnius;
use rust_decimal::Decimal;

use crate::features::ads::dtos::MonthlyAdStatDto;
use crate::features::ads::lifecycle::is_ad_active;
use crate::features::ads::models::Ad;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveTotals {
    pub count: i64,
    /// Sum of full-period prices
    pub total_price: Decimal,
    /// Sum of `price / duration_months`, the full price when the duration is not positive
    pub monthly_total: Decimal,
}

fn monthly_share(ad: &Ad) -> Decimal {
    if ad.duration_months > 0 {
        ad.price / Decimal::from(ad.duration_months)
    } else {
        ad.price
    }
}

/// Totals over the ads that are still shown at `now`
pub fn active_totals<'a, I>(ads: I, now: DateTime<Utc>) -> ActiveTotals
where
    I: IntoIterator<Item = &'a Ad>,
{
    let totals = ads
        .into_iter()
        .filter(|ad| is_ad_active(Some(*ad), now))
        .fold(ActiveTotals::default(), |acc, ad| ActiveTotals {
            count: acc.count + 1,
            total_price: acc.total_price + ad.price,
            monthly_total: acc.monthly_total + monthly_share(ad),
        });

    ActiveTotals {
        monthly_total: totals.monthly_total.round_dp(2),
        ..totals
    }
}

/// Count and price sum per creation month (`YYYY-MM`, Vilnius time), oldest first
pub fn monthly_stats<'a, I>(ads: I) -> Vec<MonthlyAdStatDto>
where
    I: IntoIterator<Item = &'a Ad>,
{
    let mut months: BTreeMap<String, (i64, Decimal)> = BTreeMap::new();

    for ad in ads {
        let key = ad.created_at.with_timezone(&Vilnius).format("%Y-%m").to_string();
        let entry = months.entry(key).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += ad.price;
    }

    months
        .into_iter()
        .map(|(month, (count, sum))| MonthlyAdStatDto { month, count, sum })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn ad(price: i64, months: i32, valid_until: Option<DateTime<Utc>>) -> Ad {
        Ad {
            id: Uuid::new_v4(),
            slot_id: None,
            title: "Reklama".to_string(),
            url: "https://example.lt".to_string(),
            image_url: None,
            price: Decimal::from(price),
            duration_months: months,
            valid_until,
            is_animated: false,
            created_by: "test-admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_active_totals_skip_expired() {
        let now = Utc::now();
        let ads = vec![
            ad(120, 12, Some(now + Duration::days(30))),
            ad(30, 0, None),
            ad(500, 12, Some(now - Duration::days(1))),
        ];

        let totals = active_totals(&ads, now);
        assert_eq!(totals.count, 2);
        assert_eq!(totals.total_price, Decimal::from(150));
        // 120 / 12 + 30
        assert_eq!(totals.monthly_total, Decimal::from(40));
    }

    #[test]
    fn test_monthly_stats_group_and_sort() {
        let mut jan = ad(10, 12, None);
        jan.created_at = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        let mut feb = ad(20, 12, None);
        feb.created_at = Utc.with_ymd_and_hms(2025, 2, 3, 12, 0, 0).unwrap();
        let mut jan_late = ad(5, 12, None);
        // 23:30 UTC on Jan 31 is already February in Vilnius
        jan_late.created_at = Utc.with_ymd_and_hms(2025, 1, 31, 23, 30, 0).unwrap();

        let stats = monthly_stats(&[feb, jan, jan_late]);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].month, "2025-01");
        assert_eq!(stats[0].count, 1);
        assert_eq!(stats[1].month, "2025-02");
        assert_eq!(stats[1].count, 2);
        assert_eq!(stats[1].sum, Decimal::from(25));
    }
}

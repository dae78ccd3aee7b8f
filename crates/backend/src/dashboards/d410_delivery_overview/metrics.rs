use std::collections::{BTreeMap, BTreeSet};

use contracts::shared::rating_band::RatingBand;

use crate::shared::data::orders::OrderRow;

pub const CANCELLED_STATUS: &str = "Cancelled";

/// Scalar KPIs for the dashboard cards. Means are `None` for degenerate
/// input (empty table, all-null rating column) and render blank; counts,
/// sums and the cancellation rate degrade to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewKpis {
    pub total_orders: u64,
    pub total_revenue: f64,
    pub avg_order_value: Option<f64>,
    pub avg_delivery_time: Option<f64>,
    pub total_customers: u64,
    pub avg_delivery_rating: Option<f64>,
    pub cancellation_rate: f64,
}

/// One group of the rating distribution. The group key is the raw rating
/// value, not the band: distinct numeric ratings produce distinct groups.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingBucket {
    pub rating: f64,
    pub count: u64,
    pub band: RatingBand,
}

/// Revenue and order value for one month, two parallel series sharing the
/// month as x-axis key.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPoint {
    pub month: String,
    pub revenue: f64,
    pub order_value: f64,
}

/// Revenue for one observed (city, cuisine) combination.
#[derive(Debug, Clone, PartialEq)]
pub struct CityCuisineRevenue {
    pub city: String,
    pub cuisine: String,
    pub revenue: f64,
}

pub fn compute_kpis(rows: &[OrderRow]) -> OverviewKpis {
    OverviewKpis {
        total_orders: total_orders(rows),
        total_revenue: total_revenue(rows),
        avg_order_value: mean(rows.iter().map(|r| r.final_amount)),
        avg_delivery_time: mean(rows.iter().map(|r| r.delivery_time_min)),
        total_customers: total_customers(rows),
        avg_delivery_rating: avg_delivery_rating(rows),
        cancellation_rate: cancellation_rate(rows),
    }
}

/// Count of distinct Order_ID values, independent of row order.
pub fn total_orders(rows: &[OrderRow]) -> u64 {
    rows.iter()
        .map(|r| r.order_id.as_str())
        .collect::<BTreeSet<_>>()
        .len() as u64
}

pub fn total_customers(rows: &[OrderRow]) -> u64 {
    rows.iter()
        .map(|r| r.customer_id.as_str())
        .collect::<BTreeSet<_>>()
        .len() as u64
}

pub fn total_revenue(rows: &[OrderRow]) -> f64 {
    // fold with +0.0: the stdlib `Sum<f64>` identity is -0.0, which would
    // render the empty-table total as "$-0.00M"
    rows.iter().map(|r| r.final_amount).fold(0.0, |acc, v| acc + v)
}

/// Mean of Delivery_Rating with null ratings excluded. `None` when every
/// rating is null.
pub fn avg_delivery_rating(rows: &[OrderRow]) -> Option<f64> {
    mean(rows.iter().filter_map(|r| r.delivery_rating))
}

/// Share of cancelled orders in percent. Defined as 0.0 for an empty
/// table rather than a division fault.
pub fn cancellation_rate(rows: &[OrderRow]) -> f64 {
    let total = total_orders(rows);
    if total == 0 {
        return 0.0;
    }
    let cancelled = rows
        .iter()
        .filter(|r| r.order_status == CANCELLED_STATUS)
        .count();
    cancelled as f64 / total as f64 * 100.0
}

/// Sum of Final_Amount grouped by Cuisine_Type, keys sorted ascending.
pub fn revenue_by_cuisine(rows: &[OrderRow]) -> Vec<(String, f64)> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for row in rows {
        *groups.entry(row.cuisine_type.as_str()).or_insert(0.0) += row.final_amount;
    }
    groups
        .into_iter()
        .map(|(cuisine, revenue)| (cuisine.to_string(), revenue))
        .collect()
}

/// Count of orders grouped by raw Delivery_Rating value, sorted ascending
/// by rating, each bucket tagged with its color band. Null ratings carry
/// no group key and are excluded, matching the rule used for the mean.
pub fn rating_distribution(rows: &[OrderRow]) -> Vec<RatingBucket> {
    let mut counts: Vec<(f64, u64)> = Vec::new();
    for row in rows {
        let Some(rating) = row.delivery_rating else {
            continue;
        };
        match counts.iter_mut().find(|(r, _)| *r == rating) {
            Some((_, count)) => *count += 1,
            None => counts.push((rating, 1)),
        }
    }
    counts.sort_by(|a, b| a.0.total_cmp(&b.0));
    counts
        .into_iter()
        .map(|(rating, count)| RatingBucket {
            rating,
            count,
            band: RatingBand::from_rating(Some(rating)),
        })
        .collect()
}

/// Mean of Restaurant_Rating grouped by Restaurant_Name, sorted ascending
/// by mean. The stable sort over key-ordered groups breaks ties by name.
pub fn restaurant_ratings(rows: &[OrderRow]) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for row in rows {
        let entry = sums.entry(row.restaurant_name.as_str()).or_insert((0.0, 0));
        entry.0 += row.restaurant_rating;
        entry.1 += 1;
    }
    let mut means: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(name, (sum, n))| (name.to_string(), sum / n as f64))
        .collect();
    means.sort_by(|a, b| a.1.total_cmp(&b.1));
    means
}

/// Count of orders grouped by Payment_Mode, keys sorted ascending.
pub fn orders_by_payment_mode(rows: &[OrderRow]) -> Vec<(String, u64)> {
    let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
    for row in rows {
        *groups.entry(row.payment_mode.as_str()).or_insert(0) += 1;
    }
    groups
        .into_iter()
        .map(|(mode, count)| (mode.to_string(), count))
        .collect()
}

/// Sum of Final_Amount and sum of Order_Value per Order_Month, months
/// sorted lexicographically.
pub fn revenue_by_month(rows: &[OrderRow]) -> Vec<MonthlyPoint> {
    let mut groups: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(row.order_month.as_str()).or_insert((0.0, 0.0));
        entry.0 += row.final_amount;
        entry.1 += row.order_value;
    }
    groups
        .into_iter()
        .map(|(month, (revenue, order_value))| MonthlyPoint {
            month: month.to_string(),
            revenue,
            order_value,
        })
        .collect()
}

/// Sum of Final_Amount grouped by (City, Cuisine_Type). One row per
/// observed combination, not a dense cross-product.
pub fn city_cuisine_revenue(rows: &[OrderRow]) -> Vec<CityCuisineRevenue> {
    let mut groups: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for row in rows {
        *groups
            .entry((row.city.as_str(), row.cuisine_type.as_str()))
            .or_insert(0.0) += row.final_amount;
    }
    groups
        .into_iter()
        .map(|((city, cuisine), revenue)| CityCuisineRevenue {
            city: city.to_string(),
            cuisine: cuisine.to_string(),
            revenue,
        })
        .collect()
}

fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0u64;
    for v in values {
        sum += v;
        n += 1;
    }
    (n > 0).then(|| sum / n as f64)
}

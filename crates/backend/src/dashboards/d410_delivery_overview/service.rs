use anyhow::Result;
use contracts::dashboards::d410_delivery_overview::{
    Bar, ChartCard, ChartSpec, GroupedBar, KpiCard, LineSeries, OverviewResponse, PieSlice,
};
use contracts::shared::palette::category_color;
use contracts::shared::rating_band::RATING_COLOR_SCALE;

use super::metrics;
use crate::shared::data::orders::{self, OrderRow};
use crate::shared::format;

/// Run the full derivation pass over the cached order snapshot.
pub async fn get_overview() -> Result<OverviewResponse> {
    let rows = orders::snapshot().await?;
    Ok(build_overview(&rows))
}

/// Pure derivation: raw order rows to the full dashboard payload.
/// Each chart is derived in isolation, so a failed derivation yields an
/// errored card instead of blanking the whole page.
pub fn build_overview(rows: &[OrderRow]) -> OverviewResponse {
    OverviewResponse {
        kpis: build_kpi_cards(rows),
        charts: vec![
            chart_card(
                "cuisine_revenue",
                "Cuisine-wise Revenue",
                cuisine_revenue_pie(rows),
            ),
            chart_card(
                "rating_distribution",
                "Delivery Rating Distribution",
                rating_distribution_donut(rows),
            ),
            chart_card(
                "restaurant_ratings",
                "Restaurant Ratings",
                restaurant_ratings_bar(rows),
            ),
            chart_card(
                "payment_mode",
                "Orders by Payment Mode",
                payment_mode_bar(rows),
            ),
            chart_card(
                "revenue_vs_order_value",
                "Revenue vs Order Value",
                revenue_vs_order_value_line(rows),
            ),
            chart_card(
                "city_cuisine",
                "City vs Cuisine (Revenue)",
                city_cuisine_bar(rows),
            ),
        ],
    }
}

fn build_kpi_cards(rows: &[OrderRow]) -> Vec<KpiCard> {
    let k = metrics::compute_kpis(rows);
    vec![
        KpiCard {
            id: "total_orders".to_string(),
            label: "Total Orders".to_string(),
            value: Some(k.total_orders as f64),
            display: format::format_count(k.total_orders),
        },
        KpiCard {
            id: "total_revenue".to_string(),
            label: "Total Revenue".to_string(),
            value: Some(k.total_revenue),
            display: format::format_millions(k.total_revenue),
        },
        KpiCard {
            id: "avg_delivery_time".to_string(),
            label: "Avg Delivery Time (min)".to_string(),
            value: k.avg_delivery_time,
            display: format::format_mean(k.avg_delivery_time),
        },
        KpiCard {
            id: "total_customers".to_string(),
            label: "Total Customers".to_string(),
            value: Some(k.total_customers as f64),
            display: format::format_count(k.total_customers),
        },
        KpiCard {
            id: "avg_order_value".to_string(),
            label: "Average Order Value".to_string(),
            value: k.avg_order_value,
            display: format::format_mean(k.avg_order_value),
        },
        KpiCard {
            id: "avg_delivery_rating".to_string(),
            label: "Average Delivery Ratings".to_string(),
            value: k.avg_delivery_rating,
            display: format::format_mean(k.avg_delivery_rating),
        },
        KpiCard {
            id: "cancellation_rate".to_string(),
            label: "Cancellation Rate".to_string(),
            value: Some(k.cancellation_rate),
            display: format!("{:.2}%", k.cancellation_rate),
        },
    ]
}

fn chart_card(id: &str, title: &str, spec: Result<ChartSpec>) -> ChartCard {
    match spec {
        Ok(spec) => ChartCard {
            id: id.to_string(),
            title: title.to_string(),
            spec: Some(spec),
            error: None,
        },
        Err(e) => {
            tracing::error!("D410 Dashboard: chart '{}' failed: {}", id, e);
            ChartCard {
                id: id.to_string(),
                title: title.to_string(),
                spec: None,
                error: Some(e.to_string()),
            }
        }
    }
}

fn cuisine_revenue_pie(rows: &[OrderRow]) -> Result<ChartSpec> {
    let slices = metrics::revenue_by_cuisine(rows)
        .into_iter()
        .map(|(cuisine, revenue)| PieSlice {
            label: cuisine,
            value: revenue,
            color: None,
        })
        .collect();
    Ok(ChartSpec::Pie { slices })
}

fn rating_distribution_donut(rows: &[OrderRow]) -> Result<ChartSpec> {
    let slices = metrics::rating_distribution(rows)
        .into_iter()
        .map(|bucket| PieSlice {
            label: bucket.rating.to_string(),
            value: bucket.count as f64,
            color: Some(bucket.band.hex().to_string()),
        })
        .collect();
    Ok(ChartSpec::Donut { hole: 0.5, slices })
}

fn restaurant_ratings_bar(rows: &[OrderRow]) -> Result<ChartSpec> {
    let bars = metrics::restaurant_ratings(rows)
        .into_iter()
        .map(|(name, rating)| Bar {
            label: name,
            value: rating,
            color: None,
        })
        .collect();
    Ok(ChartSpec::HBar {
        x_title: "Rating".to_string(),
        y_title: "Restaurant".to_string(),
        bars,
        color_scale: Some(RATING_COLOR_SCALE.iter().map(|c| c.to_string()).collect()),
        x_range: Some((0.0, 5.0)),
    })
}

fn payment_mode_bar(rows: &[OrderRow]) -> Result<ChartSpec> {
    // One color per payment mode
    let bars = metrics::orders_by_payment_mode(rows)
        .into_iter()
        .enumerate()
        .map(|(i, (mode, count))| Bar {
            label: mode,
            value: count as f64,
            color: Some(category_color(i).to_string()),
        })
        .collect();
    Ok(ChartSpec::HBar {
        x_title: "Orders".to_string(),
        y_title: "Payment Mode".to_string(),
        bars,
        color_scale: None,
        x_range: None,
    })
}

fn revenue_vs_order_value_line(rows: &[OrderRow]) -> Result<ChartSpec> {
    let points = metrics::revenue_by_month(rows);
    let x_labels = points.iter().map(|p| p.month.clone()).collect();
    let revenue = points.iter().map(|p| p.revenue).collect();
    let order_value = points.iter().map(|p| p.order_value).collect();
    Ok(ChartSpec::Line {
        x_title: "Order Month".to_string(),
        y_title: "Amount".to_string(),
        x_labels,
        series: vec![
            LineSeries {
                name: "Revenue".to_string(),
                values: revenue,
            },
            LineSeries {
                name: "Order Value".to_string(),
                values: order_value,
            },
        ],
    })
}

fn city_cuisine_bar(rows: &[OrderRow]) -> Result<ChartSpec> {
    let bars = metrics::city_cuisine_revenue(rows)
        .into_iter()
        .map(|group| GroupedBar {
            text: format::format_kilo(group.revenue),
            category: group.city,
            series: group.cuisine,
            value: group.revenue,
        })
        .collect();
    Ok(ChartSpec::GroupedBar {
        x_title: "City".to_string(),
        y_title: "Revenue".to_string(),
        legend_title: "Cuisine".to_string(),
        bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str) -> OrderRow {
        OrderRow {
            order_id: id.to_string(),
            customer_id: format!("C-{id}"),
            restaurant_name: "Spice Hub".to_string(),
            city: "Pune".to_string(),
            cuisine_type: "Indian".to_string(),
            order_month: "2025-01".to_string(),
            payment_mode: "UPI".to_string(),
            order_status: "Delivered".to_string(),
            order_value: 100.0,
            final_amount: 90.0,
            delivery_time_min: 30.0,
            delivery_rating: Some(4.5),
            restaurant_rating: 4.0,
        }
    }

    #[test]
    fn test_empty_table_renders_full_page() {
        let overview = build_overview(&[]);

        assert_eq!(overview.kpis.len(), 7);
        let by_id = |id: &str| {
            overview
                .kpis
                .iter()
                .find(|k| k.id == id)
                .unwrap_or_else(|| panic!("missing kpi {id}"))
        };
        assert_eq!(by_id("total_orders").display, "0");
        assert_eq!(by_id("total_revenue").display, "$0.00M");
        assert_eq!(by_id("avg_order_value").display, "");
        assert_eq!(by_id("cancellation_rate").display, "0.00%");

        // All six charts present, none errored
        assert_eq!(overview.charts.len(), 6);
        assert!(overview.charts.iter().all(|c| c.error.is_none()));
        assert!(overview.charts.iter().all(|c| c.spec.is_some()));
    }

    #[test]
    fn test_donut_slices_carry_band_colors() {
        let mut a = order("O-1");
        a.delivery_rating = Some(4.5);
        let mut b = order("O-2");
        b.delivery_rating = Some(1.0);

        let overview = build_overview(&[a, b]);
        let donut = overview
            .charts
            .iter()
            .find(|c| c.id == "rating_distribution")
            .unwrap();
        let Some(ChartSpec::Donut { hole, slices }) = &donut.spec else {
            panic!("expected donut spec");
        };
        assert_eq!(*hole, 0.5);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "1");
        assert_eq!(slices[0].color.as_deref(), Some("#E53935"));
        assert_eq!(slices[1].label, "4.5");
        assert_eq!(slices[1].color.as_deref(), Some("#1B5E20"));
    }

    #[test]
    fn test_city_cuisine_bars_labeled_in_thousands() {
        let mut row = order("O-1");
        row.final_amount = 1500.0;
        let overview = build_overview(&[row]);
        let chart = overview
            .charts
            .iter()
            .find(|c| c.id == "city_cuisine")
            .unwrap();
        let Some(ChartSpec::GroupedBar { bars, .. }) = &chart.spec else {
            panic!("expected grouped bar spec");
        };
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].text, "1.50K");
        assert_eq!(bars[0].category, "Pune");
        assert_eq!(bars[0].series, "Indian");
    }

    #[test]
    fn test_restaurant_bar_presentation_hints() {
        let overview = build_overview(&[order("O-1")]);
        let chart = overview
            .charts
            .iter()
            .find(|c| c.id == "restaurant_ratings")
            .unwrap();
        let Some(ChartSpec::HBar {
            color_scale,
            x_range,
            ..
        }) = &chart.spec
        else {
            panic!("expected hbar spec");
        };
        assert_eq!(*x_range, Some((0.0, 5.0)));
        assert_eq!(color_scale.as_ref().map(|s| s.len()), Some(5));
    }

    #[test]
    fn test_line_chart_series_share_month_axis() {
        let mut a = order("O-1");
        a.order_month = "2025-01".to_string();
        let mut b = order("O-2");
        b.order_month = "2025-02".to_string();
        let overview = build_overview(&[a, b]);
        let chart = overview
            .charts
            .iter()
            .find(|c| c.id == "revenue_vs_order_value")
            .unwrap();
        let Some(ChartSpec::Line {
            x_labels, series, ..
        }) = &chart.spec
        else {
            panic!("expected line spec");
        };
        assert_eq!(x_labels, &["2025-01", "2025-02"]);
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|s| s.values.len() == x_labels.len()));
    }

    #[test]
    fn test_payment_mode_bars_colored_per_category() {
        let mut rows = Vec::new();
        for (i, mode) in ["UPI", "Card", "Cash", "UPI"].iter().enumerate() {
            let mut row = order(&format!("O-{i}"));
            row.payment_mode = mode.to_string();
            rows.push(row);
        }
        let overview = build_overview(&rows);
        let chart = overview
            .charts
            .iter()
            .find(|c| c.id == "payment_mode")
            .unwrap();
        let Some(ChartSpec::HBar { bars, .. }) = &chart.spec else {
            panic!("expected hbar spec");
        };
        assert_eq!(bars.len(), 3);
        assert!(bars.iter().all(|b| b.color.is_some()));

        // Every mode gets its own color
        let mut colors: Vec<&str> = bars.iter().filter_map(|b| b.color.as_deref()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 3);
    }

    #[test]
    fn test_failed_derivation_yields_errored_card() {
        let card = chart_card(
            "city_cuisine",
            "City vs Cuisine (Revenue)",
            Err(anyhow::anyhow!("boom")),
        );
        assert_eq!(card.id, "city_cuisine");
        assert_eq!(card.title, "City vs Cuisine (Revenue)");
        assert!(card.spec.is_none());
        assert_eq!(card.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let mut rows = Vec::new();
        for (i, cuisine) in ["Indian", "Chinese", "Thai"].iter().enumerate() {
            let mut row = order(&format!("O-{i}"));
            row.cuisine_type = cuisine.to_string();
            row.delivery_rating = Some(1.0 + i as f64);
            rows.push(row);
        }
        let first = serde_json::to_string(&build_overview(&rows)).unwrap();
        let second = serde_json::to_string(&build_overview(&rows)).unwrap();
        assert_eq!(first, second);
    }
}

use serde::{Deserialize, Serialize};

/// Scalar KPI rendered as a dashboard card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    /// Card identifier (e.g., "total_orders")
    pub id: String,
    /// Display label (e.g., "Total Orders")
    pub label: String,
    /// Raw numeric value; `None` when the metric is undefined (empty table)
    pub value: Option<f64>,
    /// Preformatted display string; empty when the value is undefined
    pub display: String,
}

/// One slice of a pie or donut chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Explicit slice color; `None` lets the rendering host pick
    pub color: Option<String>,
}

/// One bar of a horizontal bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Option<String>,
}

/// One named series of a multi-series line chart. Values are aligned
/// positionally with the chart's shared `x_labels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// One bar of a grouped bar chart: a single observed (category, series)
/// pair. Unobserved combinations produce no bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedBar {
    pub category: String,
    pub series: String,
    pub value: f64,
    /// Text label rendered inside the bar
    pub text: String,
}

/// Chart-specification object handed to the rendering host, carrying the
/// derived table plus presentation hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie {
        slices: Vec<PieSlice>,
    },
    Donut {
        /// Fraction of the radius cut out of the middle
        hole: f64,
        slices: Vec<PieSlice>,
    },
    HBar {
        x_title: String,
        y_title: String,
        bars: Vec<Bar>,
        /// Continuous color scale applied over the value axis
        color_scale: Option<Vec<String>>,
        /// Fixed value-axis range
        x_range: Option<(f64, f64)>,
    },
    Line {
        x_title: String,
        y_title: String,
        x_labels: Vec<String>,
        series: Vec<LineSeries>,
    },
    GroupedBar {
        x_title: String,
        y_title: String,
        legend_title: String,
        bars: Vec<GroupedBar>,
    },
}

/// One chart slot of the dashboard. A failed derivation fills `error`
/// instead of blanking the whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartCard {
    pub id: String,
    pub title: String,
    pub spec: Option<ChartSpec>,
    pub error: Option<String>,
}

/// Full dashboard payload: 7 KPI cards and 6 charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub kpis: Vec<KpiCard>,
    pub charts: Vec<ChartCard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_spec_is_tagged_by_kind() {
        let spec = ChartSpec::Donut {
            hole: 0.5,
            slices: vec![PieSlice {
                label: "4.5".to_string(),
                value: 12.0,
                color: Some("#1B5E20".to_string()),
            }],
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "donut");
        assert_eq!(json["hole"], 0.5);
        assert_eq!(json["slices"][0]["color"], "#1B5E20");
    }

    #[test]
    fn test_errored_card_has_no_spec() {
        let card = ChartCard {
            id: "cuisine_revenue".to_string(),
            title: "Cuisine-wise Revenue".to_string(),
            spec: None,
            error: Some("derivation failed".to_string()),
        };
        let json = serde_json::to_value(&card).unwrap();
        assert!(json["spec"].is_null());
        assert_eq!(json["error"], "derivation failed");
    }
}

//! Read-only engagement aggregates for a listing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate engagement numbers for a single listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingInsights {
    /// Total view count.
    pub views: u64,
    /// Total save count.
    pub saves: u64,
    /// Total message count.
    pub messages: u64,
    /// Distinct viewers.
    pub unique_viewers: u64,
    /// Messages per view.
    pub conversion_rate: f64,
    /// Daily engagement buckets.
    #[serde(default)]
    pub time_series: Vec<InsightPoint>,
}

/// One day of engagement counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightPoint {
    /// Bucket date.
    pub date: NaiveDate,
    /// Views on that date.
    pub views: u64,
    /// Saves on that date.
    pub saves: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insights_wire_names() {
        let json = serde_json::json!({
            "views": 250,
            "saves": 12,
            "messages": 5,
            "uniqueViewers": 198,
            "conversionRate": 0.02,
            "timeSeries": [{"date": "2026-02-01", "views": 40, "saves": 3}]
        });
        let insights: ListingInsights = serde_json::from_value(json).unwrap();
        assert_eq!(insights.unique_viewers, 198);
        assert_eq!(insights.time_series.len(), 1);
        assert_eq!(insights.time_series[0].views, 40);
    }
}

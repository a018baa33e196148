//! Data models for campaign analytics.
//!
//! This module contains the input schema for the marketing-data document
//! (deserialized leniently, so missing or malformed fields degrade to
//! zero/empty values) and the derived metric types produced by the
//! aggregation operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Device category a campaign primarily targets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "String")]
pub enum Device {
    /// Default bucket; campaigns with no declared or recognized device land here.
    #[default]
    Mobile,
    Desktop,
    Tablet,
}

impl From<String> for Device {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Desktop" => Device::Desktop,
            "Tablet" => Device::Tablet,
            _ => Device::Mobile,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Mobile => write!(f, "Mobile"),
            Device::Desktop => write!(f, "Desktop"),
            Device::Tablet => write!(f, "Tablet"),
        }
    }
}

/// The root document retrieved from the marketing-data endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketingDocument {
    /// All campaigns in the document. Absent or non-array input becomes empty.
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

impl MarketingDocument {
    /// Build a document from an arbitrary JSON value.
    ///
    /// The endpoint is not under our control, so this is deliberately
    /// forgiving: a non-object document or a missing/non-array `campaigns`
    /// field yields an empty document, and individual campaign entries that
    /// fail to deserialize are skipped with a warning.
    pub fn from_value(value: Value) -> Self {
        let Some(entries) = value.get("campaigns").and_then(Value::as_array) else {
            warn!("Document has no `campaigns` array; treating as empty");
            return Self::default();
        };

        let campaigns = entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                match serde_json::from_value::<Campaign>(entry.clone()) {
                    Ok(campaign) => Some(campaign),
                    Err(e) => {
                        warn!("Skipping malformed campaign at index {}: {}", idx, e);
                        None
                    }
                }
            })
            .collect();

        Self { campaigns }
    }
}

/// One marketing campaign. Every field is optional in the wire format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign display name.
    #[serde(default)]
    pub name: String,
    /// Total spend for the whole campaign.
    #[serde(default)]
    pub spend: f64,
    /// Total revenue for the whole campaign.
    #[serde(default)]
    pub revenue: f64,
    /// Campaign-level impressions (device breakdown granularity).
    #[serde(default)]
    pub impressions: u64,
    /// Campaign-level clicks.
    #[serde(default)]
    pub clicks: u64,
    /// Campaign-level conversions.
    #[serde(default)]
    pub conversions: u64,
    /// Gender x age-group split of the campaign audience.
    #[serde(default)]
    pub demographic_breakdown: Vec<DemographicSlice>,
    /// Per-region revenue/spend slices.
    #[serde(default)]
    pub regional_performance: Vec<RegionSlice>,
    /// Per-week revenue/spend slices.
    #[serde(default)]
    pub weekly_performance: Vec<WeekSlice>,
    /// Targeting metadata; only `primary_device` is read.
    #[serde(default)]
    pub target_demographics: TargetDemographics,
}

/// Targeting metadata attached to a campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetDemographics {
    #[serde(default)]
    pub primary_device: Device,
}

/// One gender x age-group slice of a campaign's audience.
///
/// Slices carry their own engagement counters but not spend/revenue; those
/// are campaign totals split proportionally by `percentage_of_audience`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemographicSlice {
    /// Age bracket label, e.g. "25-34" or "65+".
    #[serde(default)]
    pub age_group: String,
    /// "Male" or "Female"; any other value is ignored by the gender breakdown.
    #[serde(default)]
    pub gender: String,
    /// Share of the campaign audience in this slice, 0-100.
    #[serde(default)]
    pub percentage_of_audience: f64,
    /// Engagement counters for this slice.
    #[serde(default)]
    pub performance: SlicePerformance,
}

/// Engagement counters nested inside a demographic slice.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SlicePerformance {
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
}

/// One regional revenue/spend slice of a campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionSlice {
    /// Region display name, the grouping key.
    #[serde(default)]
    pub region: String,
    /// Country, used as a fallback key for coordinate lookup.
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub spend: f64,
}

/// One weekly revenue/spend slice of a campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekSlice {
    /// Week start date string; the grouping key, matched exactly.
    #[serde(default)]
    pub week_start: String,
    #[serde(default)]
    pub week_end: String,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub revenue: f64,
    // Present in the wire format but unused by the weekly breakdown.
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
}

// === Derived metrics ===

/// Accumulated totals for one gender across all campaigns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenderMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    /// Proportionally allocated spend, rounded to 2 decimals.
    pub spend: f64,
    /// Proportionally allocated revenue, rounded to the nearest integer.
    pub revenue: f64,
}

/// Gender breakdown of the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenderSplit {
    pub male: GenderMetrics,
    pub female: GenderMetrics,
}

/// Allocated spend/revenue for one age group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeGroupMetric {
    pub age_group: String,
    pub spend: f64,
    pub revenue: f64,
}

/// Engagement metrics for one (gender, age group) bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderAgeGroupMetric {
    pub age_group: String,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    /// Click-through rate in percent, 0 when there are no impressions.
    pub ctr: f64,
    /// Conversions per click in percent, 0 when there are no clicks.
    pub conversion_rate: f64,
}

/// Gender x age-group breakdown, one ordered sequence per gender.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenderAgeGroupSplit {
    pub male: Vec<GenderAgeGroupMetric>,
    pub female: Vec<GenderAgeGroupMetric>,
}

/// Accumulated campaign totals for one device category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceMetrics {
    pub device: Device,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
    pub ctr: f64,
    pub conversion_rate: f64,
    /// This device's share of all impressions, in percent.
    pub percentage_of_traffic: f64,
}

/// Accumulated totals for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMetric {
    pub region: String,
    pub country: String,
    pub revenue: f64,
    pub spend: f64,
    /// Combined revenue + spend; drives bubble sizing downstream.
    pub value: f64,
    /// Approximate ROAS: revenue / spend, with spend 0 treated as 1.
    pub performance: f64,
}

/// A region resolved to map coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionBubble {
    /// Region display name (the bubble label).
    pub city: String,
    pub lat: f64,
    pub lng: f64,
    pub value: f64,
    pub performance: f64,
}

/// Regional breakdown: every aggregated region, plus the subset that
/// resolved to coordinates for map rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegionBreakdown {
    pub regions: Vec<RegionMetric>,
    pub map_points: Vec<RegionBubble>,
}

/// Accumulated spend/revenue for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekMetric {
    /// The raw grouping key, exactly as reported.
    pub week_start: String,
    /// Short human label, e.g. "Oct 6".
    pub week_label: String,
    pub spend: f64,
    pub revenue: f64,
}

/// Metadata about one report run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Where the document came from (URL or file path).
    pub source: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of campaigns in the document.
    pub campaign_count: usize,
    /// End-to-end duration in seconds.
    pub duration_seconds: f64,
}

/// The complete set of computed breakdowns for one document.
///
/// Breakdowns not requested on the command line stay `None` and are
/// omitted from JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub metadata: ReportMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<GenderSplit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_groups: Option<Vec<AgeGroupMetric>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_age_groups: Option<GenderAgeGroupSplit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<DeviceMetrics>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<RegionBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly: Option<Vec<WeekMetric>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_default_is_mobile() {
        assert_eq!(Device::default(), Device::Mobile);
    }

    #[test]
    fn test_device_unknown_string_maps_to_mobile() {
        let device: Device = serde_json::from_value(json!("SmartFridge")).unwrap();
        assert_eq!(device, Device::Mobile);
    }

    #[test]
    fn test_campaign_defaults_when_fields_missing() {
        let campaign: Campaign = serde_json::from_value(json!({})).unwrap();
        assert_eq!(campaign.spend, 0.0);
        assert_eq!(campaign.revenue, 0.0);
        assert!(campaign.demographic_breakdown.is_empty());
        assert_eq!(campaign.target_demographics.primary_device, Device::Mobile);
    }

    #[test]
    fn test_document_from_non_object_value() {
        let doc = MarketingDocument::from_value(json!([1, 2, 3]));
        assert!(doc.campaigns.is_empty());

        let doc = MarketingDocument::from_value(json!("nope"));
        assert!(doc.campaigns.is_empty());
    }

    #[test]
    fn test_document_from_value_without_campaigns() {
        let doc = MarketingDocument::from_value(json!({"company_info": {}}));
        assert!(doc.campaigns.is_empty());
    }

    #[test]
    fn test_document_skips_malformed_campaign_entries() {
        let doc = MarketingDocument::from_value(json!({
            "campaigns": [
                {"name": "Good", "spend": 10.0},
                "not a campaign",
                {"name": "Also good", "revenue": 5.0}
            ]
        }));
        assert_eq!(doc.campaigns.len(), 2);
        assert_eq!(doc.campaigns[0].name, "Good");
        assert_eq!(doc.campaigns[1].revenue, 5.0);
    }

    #[test]
    fn test_demographic_slice_parses_nested_performance() {
        let slice: DemographicSlice = serde_json::from_value(json!({
            "age_group": "25-34",
            "gender": "Female",
            "percentage_of_audience": 40.0,
            "performance": {"impressions": 100, "clicks": 10, "conversions": 2}
        }))
        .unwrap();
        assert_eq!(slice.performance.clicks, 10);
        assert_eq!(slice.percentage_of_audience, 40.0);
    }
}

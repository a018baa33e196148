//! Campaign breakdown aggregation.
//!
//! This module reshapes raw campaign records into grouped derived metrics:
//! by gender, age group, gender x age group, device, region, and week.
//! Every operation is pure and total: inputs are never mutated and malformed
//! or missing data degrades to zero/empty output instead of erroring.

use crate::analysis::geo;
use crate::models::{
    AgeGroupMetric, Device, DeviceMetrics, GenderAgeGroupMetric, GenderAgeGroupSplit,
    GenderMetrics, GenderSplit, MarketingDocument, RegionBreakdown, RegionBubble, RegionMetric,
    WeekMetric,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

const MALE: &str = "Male";
const FEMALE: &str = "Female";

/// Round to two decimal places. Used for spend and percentage values.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Split a campaign total proportionally to one bucket's percentage share.
///
/// The denominator is the sum of all buckets' percentages for that campaign,
/// not 100, so partial splits still allocate the full total. Returns 0 when
/// the denominator is 0 so such campaigns contribute nothing.
pub fn allocate_share(total: f64, bucket_pct: f64, total_pct: f64) -> f64 {
    if total_pct > 0.0 {
        total * (bucket_pct / total_pct)
    } else {
        0.0
    }
}

/// Zero-guarded percentage rate: `numerator / denominator * 100`, or 0 when
/// the denominator is 0. Keeps CTR and conversion rate free of NaN/inf.
pub fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64 * 100.0
    } else {
        0.0
    }
}

/// Sort key for age-group labels: the integer prefix before the first `-`
/// ("18-24" sorts by 18). Labels with no leading digits sort as 0.
pub fn age_group_sort_key(label: &str) -> u32 {
    let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

#[derive(Default)]
struct GenderAccumulator {
    impressions: u64,
    clicks: u64,
    conversions: u64,
    spend: f64,
    revenue: f64,
}

/// Aggregate engagement and allocated spend/revenue per gender.
///
/// Engagement counters come straight from the demographic slices. Spend and
/// revenue are campaign totals split between the genders in proportion to
/// their accumulated `percentage_of_audience` within each campaign.
pub fn compute_gender_metrics(document: &MarketingDocument) -> GenderSplit {
    let mut male = GenderAccumulator::default();
    let mut female = GenderAccumulator::default();

    for campaign in &document.campaigns {
        let mut male_pct = 0.0;
        let mut female_pct = 0.0;

        for slice in &campaign.demographic_breakdown {
            let (bucket, pct) = match slice.gender.as_str() {
                MALE => (&mut male, &mut male_pct),
                FEMALE => (&mut female, &mut female_pct),
                _ => continue,
            };

            bucket.impressions += slice.performance.impressions;
            bucket.clicks += slice.performance.clicks;
            bucket.conversions += slice.performance.conversions;
            *pct += slice.percentage_of_audience;
        }

        let total_pct = male_pct + female_pct;
        male.spend += allocate_share(campaign.spend, male_pct, total_pct);
        male.revenue += allocate_share(campaign.revenue, male_pct, total_pct);
        female.spend += allocate_share(campaign.spend, female_pct, total_pct);
        female.revenue += allocate_share(campaign.revenue, female_pct, total_pct);
    }

    let finalize = |acc: GenderAccumulator| GenderMetrics {
        impressions: acc.impressions,
        clicks: acc.clicks,
        conversions: acc.conversions,
        spend: round2(acc.spend),
        revenue: acc.revenue.round(),
    };

    GenderSplit {
        male: finalize(male),
        female: finalize(female),
    }
}

#[derive(Default)]
struct MoneyAccumulator {
    spend: f64,
    revenue: f64,
    // First-seen index, so equal sort keys keep arrival order.
    order: usize,
}

/// Aggregate allocated spend/revenue per age group across all campaigns.
///
/// Within each campaign, spend and revenue are split across its slices by
/// `percentage_of_audience` share; campaigns whose slices sum to 0% are
/// skipped entirely. Output is sorted by the numeric prefix of the label.
pub fn compute_age_group_metrics(document: &MarketingDocument) -> Vec<AgeGroupMetric> {
    let mut groups: HashMap<String, MoneyAccumulator> = HashMap::new();

    for campaign in &document.campaigns {
        let total_pct: f64 = campaign
            .demographic_breakdown
            .iter()
            .map(|s| s.percentage_of_audience)
            .sum();

        if total_pct == 0.0 {
            continue;
        }

        for slice in &campaign.demographic_breakdown {
            let next_order = groups.len();
            let entry = groups
                .entry(slice.age_group.clone())
                .or_insert_with(|| MoneyAccumulator {
                    order: next_order,
                    ..Default::default()
                });
            entry.spend += allocate_share(campaign.spend, slice.percentage_of_audience, total_pct);
            entry.revenue +=
                allocate_share(campaign.revenue, slice.percentage_of_audience, total_pct);
        }
    }

    let mut metrics: Vec<(usize, AgeGroupMetric)> = groups
        .into_iter()
        .map(|(age_group, acc)| {
            (
                acc.order,
                AgeGroupMetric {
                    age_group,
                    spend: round2(acc.spend),
                    revenue: acc.revenue.round(),
                },
            )
        })
        .collect();

    metrics.sort_by_key(|(order, m)| (age_group_sort_key(&m.age_group), *order));
    metrics.into_iter().map(|(_, m)| m).collect()
}

#[derive(Default)]
struct EngagementAccumulator {
    impressions: u64,
    clicks: u64,
    conversions: u64,
    order: usize,
}

/// Aggregate engagement per (gender, age group) bucket with derived rates.
pub fn compute_gender_age_group_metrics(document: &MarketingDocument) -> GenderAgeGroupSplit {
    let mut male: HashMap<String, EngagementAccumulator> = HashMap::new();
    let mut female: HashMap<String, EngagementAccumulator> = HashMap::new();

    for campaign in &document.campaigns {
        for slice in &campaign.demographic_breakdown {
            let buckets = match slice.gender.as_str() {
                MALE => &mut male,
                FEMALE => &mut female,
                _ => continue,
            };

            let next_order = buckets.len();
            let entry = buckets
                .entry(slice.age_group.clone())
                .or_insert_with(|| EngagementAccumulator {
                    order: next_order,
                    ..Default::default()
                });
            entry.impressions += slice.performance.impressions;
            entry.clicks += slice.performance.clicks;
            entry.conversions += slice.performance.conversions;
        }
    }

    let finalize = |buckets: HashMap<String, EngagementAccumulator>| -> Vec<GenderAgeGroupMetric> {
        let mut metrics: Vec<(usize, GenderAgeGroupMetric)> = buckets
            .into_iter()
            .map(|(age_group, acc)| {
                (
                    acc.order,
                    GenderAgeGroupMetric {
                        age_group,
                        impressions: acc.impressions,
                        clicks: acc.clicks,
                        conversions: acc.conversions,
                        ctr: round2(rate(acc.clicks, acc.impressions)),
                        conversion_rate: round2(rate(acc.conversions, acc.clicks)),
                    },
                )
            })
            .collect();

        metrics.sort_by_key(|(order, m)| (age_group_sort_key(&m.age_group), *order));
        metrics.into_iter().map(|(_, m)| m).collect()
    };

    GenderAgeGroupSplit {
        male: finalize(male),
        female: finalize(female),
    }
}

#[derive(Default)]
struct DeviceAccumulator {
    impressions: u64,
    clicks: u64,
    conversions: u64,
    spend: f64,
    revenue: f64,
}

/// Aggregate campaign-level totals per primary device.
///
/// Unlike the demographic breakdowns this uses whole-campaign counters, not
/// slice sums. Campaigns with no declared device count as Mobile. One entry
/// per device actually seen, in Mobile/Desktop/Tablet order.
pub fn compute_device_metrics(document: &MarketingDocument) -> Vec<DeviceMetrics> {
    let mut devices: BTreeMap<Device, DeviceAccumulator> = BTreeMap::new();

    for campaign in &document.campaigns {
        let entry = devices
            .entry(campaign.target_demographics.primary_device)
            .or_default();
        entry.impressions += campaign.impressions;
        entry.clicks += campaign.clicks;
        entry.conversions += campaign.conversions;
        entry.spend += campaign.spend;
        entry.revenue += campaign.revenue;
    }

    let total_impressions: u64 = devices.values().map(|d| d.impressions).sum();

    devices
        .into_iter()
        .map(|(device, acc)| DeviceMetrics {
            device,
            impressions: acc.impressions,
            clicks: acc.clicks,
            conversions: acc.conversions,
            spend: acc.spend,
            revenue: acc.revenue,
            ctr: rate(acc.clicks, acc.impressions),
            conversion_rate: rate(acc.conversions, acc.clicks),
            percentage_of_traffic: if total_impressions > 0 {
                acc.impressions as f64 / total_impressions as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

#[derive(Default)]
struct RegionAccumulator {
    country: String,
    revenue: f64,
    spend: f64,
    order: usize,
}

/// Aggregate revenue/spend per region and resolve map coordinates.
///
/// Regions are keyed by name with the first-seen country kept as a fallback
/// lookup key. Only regions with a positive combined value are listed; the
/// map subset additionally requires a resolvable coordinate.
pub fn compute_region_metrics(document: &MarketingDocument) -> RegionBreakdown {
    let mut region_map: HashMap<String, RegionAccumulator> = HashMap::new();

    for campaign in &document.campaigns {
        for slice in &campaign.regional_performance {
            let next_order = region_map.len();
            let entry = region_map
                .entry(slice.region.clone())
                .or_insert_with(|| RegionAccumulator {
                    country: slice.country.clone(),
                    order: next_order,
                    ..Default::default()
                });
            entry.revenue += slice.revenue;
            entry.spend += slice.spend;
        }
    }

    let mut entries: Vec<(usize, RegionMetric)> = region_map
        .into_iter()
        .map(|(region, acc)| {
            let value = acc.revenue + acc.spend;
            // `spend || 1`: zero spend divides by 1 rather than reporting an
            // undefined ROAS. Downstream displays rely on this exact figure.
            let performance = if acc.revenue > 0.0 {
                acc.revenue / if acc.spend != 0.0 { acc.spend } else { 1.0 }
            } else {
                0.0
            };
            (
                acc.order,
                RegionMetric {
                    region,
                    country: acc.country,
                    revenue: acc.revenue,
                    spend: acc.spend,
                    value,
                    performance,
                },
            )
        })
        .filter(|(_, m)| m.value > 0.0)
        .collect();

    entries.sort_by_key(|(order, _)| *order);
    let regions: Vec<RegionMetric> = entries.into_iter().map(|(_, m)| m).collect();

    let map_points = regions
        .iter()
        .filter_map(|r| {
            let coords = geo::coordinates(&r.region).or_else(|| geo::coordinates(&r.country))?;
            Some(RegionBubble {
                city: r.region.clone(),
                lat: coords.lat,
                lng: coords.lng,
                value: r.value,
                performance: r.performance,
            })
        })
        .collect();

    RegionBreakdown {
        regions,
        map_points,
    }
}

struct WeekAccumulator {
    label: String,
    spend: f64,
    revenue: f64,
}

/// Aggregate spend/revenue per week, keyed by the exact `week_start` string.
///
/// Differently formatted dates for the same calendar week do not merge; this
/// mirrors the upstream data contract. Output is sorted by parsed date, with
/// unparseable dates first.
pub fn compute_weekly_metrics(document: &MarketingDocument) -> Vec<WeekMetric> {
    let mut weeks: HashMap<String, WeekAccumulator> = HashMap::new();

    for campaign in &document.campaigns {
        for slice in &campaign.weekly_performance {
            let entry = weeks
                .entry(slice.week_start.clone())
                .or_insert_with(|| WeekAccumulator {
                    label: week_label(&slice.week_start),
                    spend: 0.0,
                    revenue: 0.0,
                });
            entry.spend += slice.spend;
            entry.revenue += slice.revenue;
        }
    }

    let mut metrics: Vec<WeekMetric> = weeks
        .into_iter()
        .map(|(week_start, acc)| WeekMetric {
            week_start,
            week_label: acc.label,
            spend: acc.spend,
            revenue: acc.revenue,
        })
        .collect();

    metrics.sort_by_key(|m| parse_week_start(&m.week_start).unwrap_or(NaiveDate::MIN));
    metrics
}

/// Parse a week-start date string. Accepts plain `YYYY-MM-DD` as well as
/// full RFC 3339 timestamps.
fn parse_week_start(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Short month + day label for chart axes, e.g. "Oct 6". Falls back to the
/// raw string when the date cannot be parsed.
fn week_label(raw: &str) -> String {
    match parse_week_start(raw) {
        Some(date) => date.format("%b %-d").to_string(),
        None => raw.to_string(),
    }
}

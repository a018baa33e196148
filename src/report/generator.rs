//! Markdown report generation.
//!
//! This module renders the computed breakdowns into a Markdown report
//! with one section per breakdown, or into pretty-printed JSON.

use crate::config::ReportConfig;
use crate::models::{
    AgeGroupMetric, Dashboard, DeviceMetrics, GenderAgeGroupMetric, GenderMetrics,
    RegionBreakdown, ReportMetadata, WeekMetric,
};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(dashboard: &Dashboard, config: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str("# Campaign Analytics Report\n\n");

    output.push_str(&generate_metadata_section(&dashboard.metadata));

    if let Some(ref gender) = dashboard.gender {
        output.push_str("## Gender Breakdown\n\n");
        output.push_str(&format!(
            "| Gender | Impressions | Clicks | Conversions | Spend | Revenue |\n\
             |:---|---:|---:|---:|---:|---:|\n{}{}\n",
            gender_row("Male", &gender.male, config),
            gender_row("Female", &gender.female, config),
        ));
    }

    if let Some(ref age_groups) = dashboard.age_groups {
        output.push_str(&generate_age_group_section(age_groups, config));
    }

    if let Some(ref split) = dashboard.gender_age_groups {
        output.push_str("## Engagement by Gender and Age Group\n\n");
        output.push_str(&generate_engagement_table("Male", &split.male));
        output.push_str(&generate_engagement_table("Female", &split.female));
    }

    if let Some(ref devices) = dashboard.devices {
        output.push_str(&generate_device_section(devices, config));
    }

    if let Some(ref regions) = dashboard.regions {
        output.push_str(&generate_region_section(regions, config));
    }

    if let Some(ref weekly) = dashboard.weekly {
        output.push_str(&generate_weekly_section(weekly, config));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate a JSON report.
pub fn generate_json_report(dashboard: &Dashboard) -> Result<String> {
    serde_json::to_string_pretty(dashboard).map_err(Into::into)
}

fn money(symbol: &str, value: f64) -> String {
    format!("{}{:.2}", symbol, value)
}

fn whole_money(symbol: &str, value: f64) -> String {
    format!("{}{:.0}", symbol, value)
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Campaigns:** {}\n", metadata.campaign_count));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

fn gender_row(label: &str, metrics: &GenderMetrics, config: &ReportConfig) -> String {
    format!(
        "| {} | {} | {} | {} | {} | {} |\n",
        label,
        metrics.impressions,
        metrics.clicks,
        metrics.conversions,
        money(&config.currency_symbol, metrics.spend),
        whole_money(&config.currency_symbol, metrics.revenue),
    )
}

/// Generate the age-group allocation section.
fn generate_age_group_section(age_groups: &[AgeGroupMetric], config: &ReportConfig) -> String {
    let mut section = String::new();

    section.push_str("## Spend and Revenue by Age Group\n\n");

    if age_groups.is_empty() {
        section.push_str("No demographic data available.\n\n");
        return section;
    }

    section.push_str("| Age Group | Spend | Revenue |\n|:---|---:|---:|\n");
    for metric in age_groups {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            metric.age_group,
            money(&config.currency_symbol, metric.spend),
            whole_money(&config.currency_symbol, metric.revenue),
        ));
    }
    section.push('\n');

    section
}

/// Generate one gender's engagement table.
fn generate_engagement_table(label: &str, metrics: &[GenderAgeGroupMetric]) -> String {
    let mut section = String::new();

    section.push_str(&format!("### {}\n\n", label));

    if metrics.is_empty() {
        section.push_str("No data.\n\n");
        return section;
    }

    section.push_str(
        "| Age Group | Impressions | Clicks | Conversions | CTR | Conversion Rate |\n\
         |:---|---:|---:|---:|---:|---:|\n",
    );
    for metric in metrics {
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            metric.age_group,
            metric.impressions,
            metric.clicks,
            metric.conversions,
            percent(metric.ctr),
            percent(metric.conversion_rate),
        ));
    }
    section.push('\n');

    section
}

/// Generate the device section.
fn generate_device_section(devices: &[DeviceMetrics], config: &ReportConfig) -> String {
    let mut section = String::new();

    section.push_str("## Device Performance\n\n");

    if devices.is_empty() {
        section.push_str("No campaigns in document.\n\n");
        return section;
    }

    section.push_str(
        "| Device | Impressions | Clicks | Conversions | Spend | Revenue | CTR | Conv. Rate | Traffic |\n\
         |:---|---:|---:|---:|---:|---:|---:|---:|---:|\n",
    );
    for device in devices {
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
            device.device,
            device.impressions,
            device.clicks,
            device.conversions,
            money(&config.currency_symbol, device.spend),
            whole_money(&config.currency_symbol, device.revenue),
            percent(device.ctr),
            percent(device.conversion_rate),
            percent(device.percentage_of_traffic),
        ));
    }
    section.push('\n');

    section
}

/// Generate the regional section, optionally with the resolved map points.
fn generate_region_section(breakdown: &RegionBreakdown, config: &ReportConfig) -> String {
    let mut section = String::new();

    section.push_str("## Regional Performance\n\n");

    if breakdown.regions.is_empty() {
        section.push_str("No regional data available.\n\n");
        return section;
    }

    section.push_str("| Region | Revenue | Spend | Value | ROAS |\n|:---|---:|---:|---:|---:|\n");
    for region in &breakdown.regions {
        section.push_str(&format!(
            "| {} | {} | {} | {} | {:.2}x |\n",
            region.region,
            money(&config.currency_symbol, region.revenue),
            money(&config.currency_symbol, region.spend),
            money(&config.currency_symbol, region.value),
            region.performance,
        ));
    }
    section.push('\n');

    if config.include_map_points && !breakdown.map_points.is_empty() {
        section.push_str("### Map Points\n\n");
        section.push_str("| Region | Lat | Lng | Value |\n|:---|---:|---:|---:|\n");
        for point in &breakdown.map_points {
            section.push_str(&format!(
                "| {} | {:.4} | {:.4} | {} |\n",
                point.city,
                point.lat,
                point.lng,
                money(&config.currency_symbol, point.value),
            ));
        }
        section.push('\n');
    }

    section
}

/// Generate the weekly section.
fn generate_weekly_section(weekly: &[WeekMetric], config: &ReportConfig) -> String {
    let mut section = String::new();

    section.push_str("## Weekly Revenue vs Spend\n\n");

    if weekly.is_empty() {
        section.push_str("No weekly data available.\n\n");
        return section;
    }

    section.push_str("| Week | Spend | Revenue |\n|:---|---:|---:|\n");
    for week in weekly {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            week.week_label,
            money(&config.currency_symbol, week.spend),
            money(&config.currency_symbol, week.revenue),
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by marketlens*\n".to_string()
}

//! Turns lookup records and the provider list into terminal tables.

use crate::api::ProviderRegistry;
use crate::models::{LookupResult, Ownership};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One bordered block per provider record.
///
/// ISP and ORG collapse into a single `ISP/ORG` row when they match
/// case-insensitively. Failed records show their status instead of data.
pub fn result_table(result: &LookupResult) -> Table {
    let mut table = base_table();

    if !result.is_usable() {
        table.set_header(vec![Cell::new(&result.provider), Cell::new("no data")]);
        table.add_row(vec![Cell::new("Status"), Cell::new(result.status.to_string())]);
        return table;
    }

    table.set_header(vec![Cell::new(&result.provider), Cell::new(&result.source_url)]);
    table.add_row(vec![Cell::new("Country"), Cell::new(&result.country_name)]);
    table.add_row(vec![Cell::new("City"), Cell::new(&result.city)]);
    match result.ownership() {
        Ownership::Combined(owner) => {
            table.add_row(vec![Cell::new("ISP/ORG"), Cell::new(owner)]);
        },
        Ownership::Split { isp, org } => {
            table.add_row(vec![Cell::new("ISP"), Cell::new(isp)]);
            table.add_row(vec![Cell::new("ORG"), Cell::new(org)]);
        },
    }
    table
}

/// Lists every registered provider with its field mapping.
pub fn providers_table(registry: &ProviderRegistry) -> Table {
    let mut table = base_table();
    table.set_header(vec!["Provider", "URL template", "Country", "City", "ISP", "ORG"]);
    for p in registry.providers() {
        table.add_row(vec![
            &p.name,
            &p.url_template,
            &p.country_path,
            &p.city_path,
            &p.isp_path,
            &p.org_path,
        ]);
    }
    table
}

/// Closing line printed once every provider has reported.
pub fn summary_line(ip: &str, usable: usize, total: usize) -> String {
    let counts = format!("{}/{}", usable, total);
    let counts = if usable == 0 {
        counts.red().bold()
    } else {
        counts.green().bold()
    };
    format!("{} providers returned a location for {}", counts, ip.cyan())
}

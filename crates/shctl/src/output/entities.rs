//! Search result output formatting.

use serde::Serialize;
use sortinghat_api_rs::models::{Country, Entity, Individual, Organization};
use sortinghat_api_rs::query::Collection;
use sortinghat_search_rs::ControllerSnapshot;

use super::helpers::{dimmed, format_status, short_key, truncate_str};

/// JSON output structure for a search.
#[derive(Serialize)]
pub struct SearchOutput<'a> {
    pub collection: Collection,
    #[serde(flatten)]
    pub snapshot: &'a ControllerSnapshot,
}

/// Formats a search snapshot as JSON.
pub fn format_snapshot_json(
    collection: Collection,
    snapshot: &ControllerSnapshot,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&SearchOutput {
        collection,
        snapshot,
    })
}

/// Formats a search snapshot as a table followed by a page summary.
pub fn format_snapshot_table(snapshot: &ControllerSnapshot, use_colors: bool) -> String {
    let mut output = String::new();

    if snapshot.entities.is_empty() {
        output.push_str("No results found.\n");
    } else {
        let header = match snapshot.entities[0] {
            Entity::Individual(_) => format!("{:<10} {:<30} {:<4} {}", "MK", "Name", "Lock", "Sources"),
            Entity::Organization(_) => format!("{:<30} {:<25} {}", "Name", "Domain", "Enrollments"),
            Entity::Country(_) => format!("{:<6} {}", "Code", "Name"),
        };
        output.push_str(&dimmed(&header, use_colors));
        output.push('\n');

        for entity in &snapshot.entities {
            let line = match entity {
                Entity::Individual(i) => individual_row(i),
                Entity::Organization(o) => organization_row(o),
                Entity::Country(c) => country_row(c),
            };
            output.push_str(&line);
            output.push('\n');
        }
    }

    output.push('\n');
    output.push_str(&page_summary(snapshot, use_colors));
    output.push('\n');
    output
}

fn individual_row(individual: &Individual) -> String {
    let name = individual.display_name().unwrap_or("-");
    let lock = if individual.is_locked { "yes" } else { "" };
    format!(
        "{:<10} {:<30} {:<4} {}",
        short_key(&individual.mk),
        truncate_str(name, 30),
        lock,
        individual.sources().join(", ")
    )
}

fn organization_row(organization: &Organization) -> String {
    let domain = organization
        .top_domain()
        .or_else(|| organization.domains.first())
        .map(|d| d.domain.as_str())
        .unwrap_or("-");
    format!(
        "{:<30} {:<25} {}",
        truncate_str(&organization.name, 30),
        truncate_str(domain, 25),
        organization.enrollment_count()
    )
}

fn country_row(country: &Country) -> String {
    format!("{:<6} {}", country.code, country.name)
}

fn page_summary(snapshot: &ControllerSnapshot, use_colors: bool) -> String {
    let state = &snapshot.page_state;
    let shown = format!(
        "page {} of {} ({} shown, {} total,",
        if state.num_pages == 0 { 0 } else { state.current_page },
        state.num_pages,
        snapshot.entities.len(),
        state.total_results,
    );
    format!(
        "{} {})",
        dimmed(&shown, use_colors),
        format_status(snapshot.status, use_colors)
    )
}

//! Table output formatting for CLI commands
//!
//! Renders pages, search results and pokemon details using comfy-table.

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::{CatalogRecord, EntityRecord, PageView, PokemonRecord};
use crate::services::presentation::{stat_percentage, title_case};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format a pokedex page: one row per pokemon.
    pub fn format_pokedex(&self, view: &PageView) -> String {
        let mut table = self.create_base_table(&["#", "Name", "Types", "Artwork"]);

        for pokemon in view.records.iter().filter_map(record_pokemon) {
            table.add_row(vec![
                Cell::new(pokemon.id).set_alignment(CellAlignment::Right),
                Cell::new(title_case(&pokemon.name)),
                Cell::new(pokemon.type_names().join(", ")),
                Cell::new(pokemon.artwork_url().unwrap_or("-")),
            ]);
        }

        format!("{table}\n{}", page_footer(view))
    }

    /// Format a berries page: one row per berry with its item and the
    /// item's sprite, `-` when the item has none.
    pub fn format_berries(&self, view: &PageView) -> String {
        let mut table = self.create_base_table(&["#", "Berry", "Item", "Effect", "Sprite"]);

        for record in &view.records {
            let CatalogRecord::Composite(composite) = record else {
                continue;
            };
            let Some((berry, item)) = composite.as_berry_item() else {
                continue;
            };
            table.add_row(vec![
                Cell::new(berry.id).set_alignment(CellAlignment::Right),
                Cell::new(title_case(&berry.name)),
                Cell::new(title_case(&item.name)),
                Cell::new(truncate_text(item.short_effect().unwrap_or("-"), 60)),
                Cell::new(item.sprite_url().unwrap_or("-")),
            ]);
        }

        format!("{table}\n{}", page_footer(view))
    }

    /// Format search results of any kind.
    pub fn format_records(&self, records: &[CatalogRecord]) -> String {
        if records.is_empty() {
            return "No matches found.".to_string();
        }

        let mut table = self.create_base_table(&["#", "Name", "Kind"]);
        for record in records {
            let entity = match record {
                CatalogRecord::Entity(entity) => entity,
                CatalogRecord::Composite(composite) => &composite.primary,
            };
            table.add_row(vec![
                Cell::new(entity.id()).set_alignment(CellAlignment::Right),
                Cell::new(title_case(entity.name())),
                Cell::new(entity.kind()),
            ]);
        }

        format!(
            "{table}\n{} match{}",
            records.len(),
            if records.len() == 1 { "" } else { "es" }
        )
    }

    /// Format a single pokemon with its base stats.
    pub fn format_pokemon(&self, pokemon: &PokemonRecord) -> String {
        let mut table = self.create_base_table(&["Stat", "Base", "% of max"]);

        for slot in &pokemon.stats {
            let percentage = stat_percentage(i64::from(slot.base_stat));
            let mut percentage_cell =
                Cell::new(format!("{percentage:.2}")).set_alignment(CellAlignment::Right);
            if self.use_colors {
                percentage_cell = percentage_cell.fg(stat_color(percentage));
            }
            table.add_row(vec![
                Cell::new(title_case(&slot.stat.name)),
                Cell::new(slot.base_stat).set_alignment(CellAlignment::Right),
                percentage_cell,
            ]);
        }

        format!(
            "#{} {}\nTypes: {}\nArtwork: {}\n{table}",
            pokemon.id,
            title_case(&pokemon.name),
            pokemon.type_names().join(", "),
            pokemon.artwork_url().unwrap_or("-"),
        )
    }

    /// Create a base table with common settings
    fn create_base_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                headers
                    .iter()
                    .map(|header| Cell::new(header).add_attribute(Attribute::Bold)),
            );

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// "Page 2 of 3 (45 total)" plus navigation hints.
pub fn page_footer(view: &PageView) -> String {
    let mut footer = format!(
        "Page {} of {} ({} total)",
        view.page_number, view.last_page, view.total_count
    );
    if let Some(previous) = view.previous_page {
        footer.push_str(&format!(" | previous: {previous}"));
    }
    if let Some(next) = view.next_page {
        footer.push_str(&format!(" | next: {next}"));
    }
    footer
}

fn record_pokemon(record: &CatalogRecord) -> Option<&PokemonRecord> {
    match record {
        CatalogRecord::Entity(EntityRecord::Pokemon(pokemon)) => Some(pokemon),
        _ => None,
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

fn stat_color(percentage: f64) -> Color {
    if percentage >= 50.0 {
        Color::Green
    } else if percentage >= 25.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Truncate text to max length with ellipsis
fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

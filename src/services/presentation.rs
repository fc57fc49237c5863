//! Small helpers for whoever renders resolved records.

/// Highest base stat any pokemon can have.
pub const MAX_BASE_STAT: u32 = 255;

/// A base stat as a percentage of [`MAX_BASE_STAT`], rounded to two decimals.
pub fn stat_percentage(value: i64) -> f64 {
    if value < 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let percentage = value as f64 / f64::from(MAX_BASE_STAT) * 100.0;
    (percentage * 100.0).round() / 100.0
}

/// Capitalise the first letter of each hyphen-separated word (`"special-attack"` → `"Special-Attack"`).
pub fn title_case(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join("-")
}

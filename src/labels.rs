//! German display labels for categories, stats and release dates.

use chrono::{Datelike, NaiveDate};

/// Category keys in filter-chip order.
pub const CATEGORY_KEYS: [&str; 18] = [
    "normal", "fire", "water", "grass", "electric", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "steel", "dark", "fairy",
];

/// Display name for a category key; unknown keys are returned unchanged.
pub fn category_label(key: &str) -> &str {
    match key {
        "normal" => "Normal",
        "fire" => "Feuer",
        "water" => "Wasser",
        "grass" => "Pflanze",
        "electric" => "Elektro",
        "ice" => "Eis",
        "fighting" => "Kampf",
        "poison" => "Gift",
        "ground" => "Boden",
        "flying" => "Flug",
        "psychic" => "Psycho",
        "bug" => "Käfer",
        "rock" => "Gestein",
        "ghost" => "Geist",
        "dragon" => "Drache",
        "steel" => "Stahl",
        "dark" => "Unlicht",
        "fairy" => "Fee",
        other => other,
    }
}

/// Short stat label, e.g. "special-attack" -> "SP. ANG".
pub fn stat_label(name: &str) -> String {
    name.replace("special-", "Sp. ")
        .replace("attack", "Ang")
        .replace("defense", "Vert")
        .replace("speed", "Init")
        .to_uppercase()
}

/// Bar width for a base stat, scaled so 150 fills the bar.
pub fn stat_percent(value: u32) -> f64 {
    (value as f64 / 150.0 * 100.0).min(100.0)
}

const MONTHS: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
    "Oktober", "November", "Dezember",
];

/// "2023/03/31" -> "31. März 2023". Unparseable dates are shown as given.
pub fn format_release_date(date: Option<&str>) -> String {
    let Some(raw) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        return "Unbekannt".to_string();
    };
    match NaiveDate::parse_from_str(raw, "%Y/%m/%d").or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d")) {
        Ok(d) => format!("{}. {} {}", d.day(), MONTHS[d.month0() as usize], d.year()),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(category_label("fire"), "Feuer");
        assert_eq!(category_label("bug"), "Käfer");
        assert_eq!(category_label("shadow"), "shadow");
        assert!(CATEGORY_KEYS.iter().all(|k| category_label(k) != *k || *k == "normal"));
    }

    #[test]
    fn test_stat_labels() {
        assert_eq!(stat_label("hp"), "HP");
        assert_eq!(stat_label("attack"), "ANG");
        assert_eq!(stat_label("special-defense"), "SP. VERT");
        assert_eq!(stat_label("speed"), "INIT");
        assert_eq!(stat_percent(75), 50.0);
        assert_eq!(stat_percent(255), 100.0);
    }

    #[test]
    fn test_release_dates() {
        assert_eq!(format_release_date(Some("2023/03/31")), "31. März 2023");
        assert_eq!(format_release_date(Some("1999-01-09")), "9. Januar 1999");
        assert_eq!(format_release_date(None), "Unbekannt");
        assert_eq!(format_release_date(Some("soon")), "soon");
    }
}

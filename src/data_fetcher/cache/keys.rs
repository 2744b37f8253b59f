//! Deterministic cache keys: endpoint name followed by every query parameter in a
//! fixed order, so logically identical queries always share an entry.

/// Key for a single league looked up by id (current season)
pub fn league_key(league_id: i32) -> String {
    format!("league:{league_id}")
}

/// Key for all leagues of a country. Country names are case-insensitive upstream.
pub fn leagues_by_country_key(country: &str) -> String {
    format!("leagues:country:{}", country.trim().to_lowercase())
}

/// Key for the fixtures of one league season, optionally filtered by status
pub fn fixtures_key(league_id: i32, season: i32, status: Option<&str>) -> String {
    format!("fixtures:{league_id}:{season}:{}", status.unwrap_or("all"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_key() {
        assert_eq!(league_key(39), "league:39");
    }

    #[test]
    fn test_country_key_is_case_insensitive() {
        assert_eq!(leagues_by_country_key("Brazil"), "leagues:country:brazil");
        assert_eq!(
            leagues_by_country_key(" brazil "),
            leagues_by_country_key("BRAZIL")
        );
    }

    #[test]
    fn test_fixtures_key_parameter_order() {
        assert_eq!(fixtures_key(71, 2024, Some("FT")), "fixtures:71:2024:FT");
        assert_eq!(fixtures_key(71, 2024, None), "fixtures:71:2024:all");
        assert_ne!(fixtures_key(71, 2024, None), fixtures_key(2024, 71, None));
    }

    #[test]
    fn test_seasons_are_distinct_keys() {
        assert_ne!(fixtures_key(39, 2023, None), fixtures_key(39, 2024, None));
    }
}

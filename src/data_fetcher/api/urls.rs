//! URL and query building utilities for provider endpoints

use crate::data_fetcher::models::Endpoint;

/// Query parameters in the order they are sent and keyed
pub type QueryParams = Vec<(&'static str, String)>;

/// Builds the endpoint URL without query string.
///
/// # Example
/// ```
/// use football_gateway::data_fetcher::api::build_endpoint_url;
/// use football_gateway::data_fetcher::models::Endpoint;
///
/// let url = build_endpoint_url("https://v3.football.api-sports.io/", Endpoint::Fixtures);
/// assert_eq!(url, "https://v3.football.api-sports.io/fixtures");
/// ```
pub fn build_endpoint_url(base_url: &str, endpoint: Endpoint) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint.as_str())
}

/// `leagues?id={id}&current=true`
pub fn league_by_id_params(league_id: i32) -> QueryParams {
    vec![("id", league_id.to_string()), ("current", "true".to_string())]
}

/// `leagues?country={country}`
pub fn leagues_by_country_params(country: &str) -> QueryParams {
    vec![("country", country.trim().to_string())]
}

/// `fixtures?league={id}&season={year}[&status={code}]`
pub fn fixtures_params(league_id: i32, season: i32, status: Option<&str>) -> QueryParams {
    let mut params = vec![
        ("league", league_id.to_string()),
        ("season", season.to_string()),
    ];
    if let Some(status) = status {
        params.push(("status", status.to_string()));
    }
    params
}

/// `fixtures?live=all`
pub fn live_fixtures_params() -> QueryParams {
    vec![("live", "all".to_string())]
}

/// Normalizes a status filter: trimmed, upper-cased, and `None` when blank.
/// Multiple statuses may be joined with `-` (e.g. `FT-AET-PEN`).
pub fn normalize_status(status: Option<&str>) -> Option<String> {
    status
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_endpoint_url() {
        assert_eq!(
            build_endpoint_url("http://localhost:1234", Endpoint::Leagues),
            "http://localhost:1234/leagues"
        );
    }

    #[test]
    fn test_fixture_params_order() {
        assert_eq!(
            fixtures_params(71, 2024, Some("FT")),
            vec![
                ("league", "71".to_string()),
                ("season", "2024".to_string()),
                ("status", "FT".to_string()),
            ]
        );
        assert_eq!(fixtures_params(71, 2024, None).len(), 2);
    }

    #[test]
    fn test_league_params() {
        assert_eq!(
            league_by_id_params(39),
            vec![("id", "39".to_string()), ("current", "true".to_string())]
        );
        assert_eq!(
            leagues_by_country_params(" Brazil "),
            vec![("country", "Brazil".to_string())]
        );
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status(Some(" ft ")), Some("FT".to_string()));
        assert_eq!(normalize_status(Some("ft-aet-pen")), Some("FT-AET-PEN".to_string()));
        assert_eq!(normalize_status(Some("  ")), None);
        assert_eq!(normalize_status(None), None);
    }
}

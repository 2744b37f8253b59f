//! Wire shapes of the provider's responses.
//!
//! Only the fields the canonical model needs are declared; anything else the provider
//! sends is ignored. Fields that identify a record (ids, names) are required.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::fmt;

/// Provider endpoints used by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Leagues,
    Fixtures,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Leagues => "leagues",
            Endpoint::Fixtures => "fixtures",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outer object of every provider response. `response` is kept raw and decoded in a
/// second step against the endpoint's own shape.
#[derive(Debug, Deserialize)]
pub struct UpstreamEnvelope {
    #[serde(default)]
    pub get: String,
    #[serde(default)]
    pub parameters: Value,
    #[serde(default, deserialize_with = "deserialize_errors")]
    pub errors: Vec<String>,
    #[serde(default)]
    pub results: Option<u32>,
    #[serde(default)]
    pub response: Option<Box<RawValue>>,
}

/// The provider reports errors as a list of strings, but rejects some queries with an
/// object keyed by parameter name instead. Both become a flat message list.
fn deserialize_errors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ErrorsField {
        List(Vec<Value>),
        Map(BTreeMap<String, Value>),
        Null,
    }

    fn message(value: Value) -> String {
        match value {
            Value::String(s) => s,
            other => other.to_string(),
        }
    }

    Ok(match Option::<ErrorsField>::deserialize(deserializer)? {
        Some(ErrorsField::List(items)) => items.into_iter().map(message).collect(),
        Some(ErrorsField::Map(entries)) => entries
            .into_iter()
            .map(|(key, value)| format!("{key}: {}", message(value)))
            .collect(),
        Some(ErrorsField::Null) | None => Vec::new(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ApiLeagueItem {
    pub league: ApiLeagueInfo,
    pub country: ApiCountry,
    #[serde(default)]
    pub seasons: Vec<ApiSeason>,
}

#[derive(Debug, Deserialize)]
pub struct ApiLeagueInfo {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiCountry {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiSeason {
    pub year: i32,
    #[serde(default)]
    pub current: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApiFixtureItem {
    pub fixture: ApiFixtureInfo,
    pub league: ApiFixtureLeague,
    pub teams: ApiTeams,
    pub goals: ApiScorePair,
    #[serde(default)]
    pub score: Option<ApiScore>,
}

#[derive(Debug, Deserialize)]
pub struct ApiFixtureInfo {
    pub id: i32,
    /// Kept as text so that a bad date is reported against this field
    pub date: String,
    pub status: ApiStatus,
}

#[derive(Debug, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub long: Option<String>,
    pub short: String,
    #[serde(default)]
    pub elapsed: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ApiFixtureLeague {
    pub season: i32,
    #[serde(default)]
    pub round: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiTeams {
    pub home: ApiTeam,
    pub away: ApiTeam,
}

#[derive(Debug, Deserialize)]
pub struct ApiTeam {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiScorePair {
    #[serde(default)]
    pub home: Option<u32>,
    #[serde(default)]
    pub away: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiScore {
    #[serde(default)]
    pub halftime: Option<ApiScorePair>,
    #[serde(default)]
    pub fulltime: Option<ApiScorePair>,
    #[serde(default)]
    pub extratime: Option<ApiScorePair>,
    #[serde(default)]
    pub penalty: Option<ApiScorePair>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_error_list() {
        let json = r#"{"get":"fixtures","parameters":{"league":"39"},"errors":["bad season"],"results":0,"response":[]}"#;
        let envelope: UpstreamEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.get, "fixtures");
        assert_eq!(envelope.errors, vec!["bad season".to_string()]);
        assert_eq!(envelope.results, Some(0));
        assert_eq!(envelope.response.unwrap().get(), "[]");
    }

    #[test]
    fn test_envelope_with_error_object() {
        let json = r#"{"get":"status","parameters":[],"errors":{"token":"Error/Missing application key.","requests":"limit reached"},"results":0,"response":[]}"#;
        let envelope: UpstreamEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(
            envelope.errors,
            vec![
                "requests: limit reached".to_string(),
                "token: Error/Missing application key.".to_string()
            ]
        );
    }

    #[test]
    fn test_envelope_with_empty_error_shapes() {
        for errors in ["[]", "{}", "null"] {
            let json = format!(r#"{{"get":"leagues","errors":{errors},"results":1,"response":[{{}}]}}"#);
            let envelope: UpstreamEnvelope = serde_json::from_str(&json).unwrap();
            assert!(envelope.errors.is_empty(), "errors={errors}");
        }
    }

    #[test]
    fn test_envelope_without_response() {
        let envelope: UpstreamEnvelope = serde_json::from_str(r#"{"errors":[]}"#).unwrap();
        assert!(envelope.response.is_none());
        assert!(envelope.results.is_none());
    }

    #[test]
    fn test_score_pair_keeps_null_distinct_from_zero() {
        let absent: ApiScorePair = serde_json::from_str(r#"{"home":null}"#).unwrap();
        let zero: ApiScorePair = serde_json::from_str(r#"{"home":0,"away":0}"#).unwrap();
        assert_eq!(absent.home, None);
        assert_eq!(absent.away, None);
        assert_eq!(zero.home, Some(0));
    }

    #[test]
    fn test_endpoint_names() {
        assert_eq!(Endpoint::Leagues.as_str(), "leagues");
        assert_eq!(Endpoint::Fixtures.to_string(), "fixtures");
    }
}

//! Maps provider payloads onto canonical records.
//!
//! Decoding happens in two typed phases: the envelope first, then each element of its
//! raw `response` against the endpoint's own shape. A single bad element fails the
//! whole batch.

use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use tracing::{debug, warn};

use crate::data_fetcher::models::{
    ApiFixtureItem, ApiLeagueItem, ApiScorePair, Endpoint, Fixture, FixtureStatus, League,
    Score, ScorePair, Team, UpstreamEnvelope,
};
use crate::error::AppError;

/// A canonical record built from one element of an endpoint's `response` array.
pub trait FromUpstream: Sized {
    /// Wire shape of one element
    type Raw: DeserializeOwned;

    /// Endpoint whose responses carry this record
    const ENDPOINT: Endpoint;

    /// Converts one decoded element. `path` locates the element for error messages.
    fn from_upstream(raw: Self::Raw, path: &str) -> Result<Self, AppError>;
}

/// Decodes the envelope and rejects it if the provider reported errors.
pub fn decode_envelope(endpoint: Endpoint, body: &str) -> Result<UpstreamEnvelope, AppError> {
    let envelope: UpstreamEnvelope = serde_json::from_str(body)
        .map_err(|e| AppError::mapping(endpoint.as_str(), "envelope", e.to_string()))?;

    if !envelope.errors.is_empty() {
        warn!(
            "Upstream reported {} error(s) for '{}' with parameters {}: {:?}",
            envelope.errors.len(),
            endpoint,
            envelope.parameters,
            envelope.errors
        );
        return Err(AppError::upstream_logical(
            endpoint.as_str(),
            envelope.errors,
        ));
    }

    if !envelope.get.is_empty() && envelope.get != endpoint.as_str() {
        return Err(AppError::mapping(
            endpoint.as_str(),
            "get",
            format!("expected '{}', got '{}'", endpoint, envelope.get),
        ));
    }

    Ok(envelope)
}

/// Maps a full response body into canonical records, preserving upstream order.
pub fn map_response<T: FromUpstream>(body: &str) -> Result<Vec<T>, AppError> {
    let endpoint = T::ENDPOINT;
    let envelope = decode_envelope(endpoint, body)?;

    let raw = envelope
        .response
        .as_deref()
        .ok_or_else(|| AppError::mapping(endpoint.as_str(), "response", "field is missing"))?;

    let items: Vec<&RawValue> = serde_json::from_str(raw.get()).map_err(|e| {
        AppError::mapping(
            endpoint.as_str(),
            "response",
            format!("expected an array: {e}"),
        )
    })?;

    if let Some(results) = envelope.results
        && results as usize != items.len()
    {
        warn!(
            "Upstream '{}' reported {} results but returned {} items",
            endpoint,
            results,
            items.len()
        );
    }

    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let path = format!("response[{index}]");
            let decoded: T::Raw = serde_json::from_str(item.get())
                .map_err(|e| AppError::mapping(endpoint.as_str(), path.as_str(), e.to_string()))?;
            T::from_upstream(decoded, &path)
        })
        .collect::<Result<Vec<T>, AppError>>()?;

    debug!("Mapped {} '{}' records", records.len(), endpoint);
    Ok(records)
}

impl FromUpstream for League {
    type Raw = ApiLeagueItem;
    const ENDPOINT: Endpoint = Endpoint::Leagues;

    fn from_upstream(raw: ApiLeagueItem, path: &str) -> Result<Self, AppError> {
        let season = raw
            .seasons
            .iter()
            .find(|s| s.current)
            .or_else(|| raw.seasons.first())
            .map(|s| s.year)
            .ok_or_else(|| {
                AppError::mapping(
                    Endpoint::Leagues.as_str(),
                    format!("{path}.seasons"),
                    "no season listed",
                )
            })?;

        Ok(League {
            id: raw.league.id,
            name: raw.league.name,
            country: raw.country.name,
            country_code: raw.country.code,
            flag: raw.country.flag,
            logo: raw.league.logo,
            season,
        })
    }
}

impl FromUpstream for Fixture {
    type Raw = ApiFixtureItem;
    const ENDPOINT: Endpoint = Endpoint::Fixtures;

    fn from_upstream(raw: ApiFixtureItem, path: &str) -> Result<Self, AppError> {
        let date = DateTime::parse_from_rfc3339(&raw.fixture.date).map_err(|e| {
            AppError::mapping(
                Endpoint::Fixtures.as_str(),
                format!("{path}.fixture.date"),
                format!("'{}' is not RFC 3339: {e}", raw.fixture.date),
            )
        })?;

        let score = raw.score.unwrap_or_default();

        Ok(Fixture {
            id: raw.fixture.id,
            date,
            status: FixtureStatus::from_short(&raw.fixture.status.short),
            status_long: raw.fixture.status.long,
            elapsed: raw.fixture.status.elapsed,
            season: raw.league.season,
            round: raw.league.round,
            home_team: Team {
                id: raw.teams.home.id,
                name: raw.teams.home.name,
                logo: raw.teams.home.logo,
            },
            away_team: Team {
                id: raw.teams.away.id,
                name: raw.teams.away.name,
                logo: raw.teams.away.logo,
            },
            home_goals: raw.goals.home,
            away_goals: raw.goals.away,
            score: Score {
                halftime: score_pair(score.halftime),
                fulltime: score_pair(score.fulltime),
                extratime: score_pair(score.extratime),
                penalty: score_pair(score.penalty),
            },
        })
    }
}

fn score_pair(raw: Option<ApiScorePair>) -> ScorePair {
    raw.map(|p| ScorePair::new(p.home, p.away))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::{PayloadBuilder, envelope_json, error_envelope_json};
    use serde_json::json;

    #[test]
    fn test_fixture_with_all_fields_maps_exactly() {
        let body = envelope_json(
            "fixtures",
            vec![PayloadBuilder::fixture(868_034, "2024-08-16T19:00:00+00:00", "FT")
                .with_teams((33, "Manchester United"), (36, "Fulham"))
                .with_goals(Some(1), Some(0))
                .with_extratime(Some(0), Some(0))
                .with_penalty(Some(4), Some(3))
                .build()],
        );

        let fixtures = map_response::<Fixture>(&body).unwrap();
        assert_eq!(fixtures.len(), 1);
        let fixture = &fixtures[0];

        assert_eq!(fixture.id, 868_034);
        assert_eq!(fixture.date.to_rfc3339(), "2024-08-16T19:00:00+00:00");
        assert_eq!(fixture.status, FixtureStatus::Finished);
        assert_eq!(fixture.status_long.as_deref(), Some("Match Finished"));
        assert_eq!(fixture.elapsed, Some(90));
        assert_eq!(fixture.season, 2024);
        assert_eq!(fixture.round.as_deref(), Some("Regular Season - 1"));
        assert_eq!(fixture.home_team.id, 33);
        assert_eq!(fixture.home_team.name, "Manchester United");
        assert_eq!(
            fixture.home_team.logo.as_deref(),
            Some("https://media.api-sports.io/football/teams/33.png")
        );
        assert_eq!(fixture.away_team.id, 36);
        assert_eq!(fixture.away_team.name, "Fulham");
        assert_eq!(fixture.goals(), ScorePair::new(Some(1), Some(0)));
        assert_eq!(fixture.score.halftime, ScorePair::new(Some(0), Some(0)));
        assert_eq!(fixture.score.fulltime, ScorePair::new(Some(1), Some(0)));
        assert_eq!(fixture.score.extratime, ScorePair::new(Some(0), Some(0)));
        assert_eq!(fixture.score.penalty, ScorePair::new(Some(4), Some(3)));
    }

    #[test]
    fn test_absent_extratime_is_not_zero() {
        let absent = envelope_json(
            "fixtures",
            vec![PayloadBuilder::fixture(1, "2024-08-16T19:00:00+00:00", "FT").build()],
        );
        let explicit_zero = envelope_json(
            "fixtures",
            vec![PayloadBuilder::fixture(1, "2024-08-16T19:00:00+00:00", "FT")
                .with_extratime(Some(0), Some(0))
                .build()],
        );

        let absent = map_response::<Fixture>(&absent).unwrap();
        let explicit_zero = map_response::<Fixture>(&explicit_zero).unwrap();

        assert_eq!(absent[0].score.extratime.home, None);
        assert_eq!(explicit_zero[0].score.extratime.home, Some(0));
        assert_ne!(absent[0].score.extratime, explicit_zero[0].score.extratime);
    }

    #[test]
    fn test_unplayed_fixture_has_no_goals() {
        let body = envelope_json(
            "fixtures",
            vec![PayloadBuilder::fixture(5, "2025-05-25T15:00:00+00:00", "NS")
                .with_goals(None, None)
                .build()],
        );
        let fixtures = map_response::<Fixture>(&body).unwrap();
        assert_eq!(fixtures[0].home_goals, None);
        assert_eq!(fixtures[0].away_goals, None);
        assert!(fixtures[0].status.is_scheduled());
    }

    #[test]
    fn test_score_block_missing_entirely() {
        let mut item = PayloadBuilder::fixture(9, "2024-08-16T19:00:00+00:00", "1H").build();
        item.as_object_mut().unwrap().remove("score");
        let body = envelope_json("fixtures", vec![item]);

        let fixtures = map_response::<Fixture>(&body).unwrap();
        assert_eq!(fixtures[0].score, Score::default());
    }

    #[test]
    fn test_bad_date_fails_with_field_name() {
        let body = envelope_json(
            "fixtures",
            vec![
                PayloadBuilder::fixture(1, "2024-08-16T19:00:00+00:00", "FT").build(),
                PayloadBuilder::fixture(2, "16/08/2024 19:00", "FT").build(),
            ],
        );

        let err = map_response::<Fixture>(&body).unwrap_err();
        match err {
            AppError::Mapping {
                endpoint, field, ..
            } => {
                assert_eq!(endpoint, "fixtures");
                assert_eq!(field, "response[1].fixture.date");
            }
            other => panic!("expected mapping error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_field_fails_whole_batch() {
        let mut broken = PayloadBuilder::fixture(2, "2024-08-16T19:00:00+00:00", "FT").build();
        broken["teams"]["home"]
            .as_object_mut()
            .unwrap()
            .remove("name");
        let body = envelope_json(
            "fixtures",
            vec![
                PayloadBuilder::fixture(1, "2024-08-16T19:00:00+00:00", "FT").build(),
                broken,
            ],
        );

        let err = map_response::<Fixture>(&body).unwrap_err();
        match err {
            AppError::Mapping { field, message, .. } => {
                assert_eq!(field, "response[1]");
                assert!(message.contains("name"), "{message}");
            }
            other => panic!("expected mapping error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut item = PayloadBuilder::fixture(3, "2024-08-16T19:00:00+00:00", "FT").build();
        item["fixture"]["brand_new_field"] = json!({"nested": true});
        item["odds"] = json!([1.5, 2.5]);
        let body = envelope_json("fixtures", vec![item]);

        assert_eq!(map_response::<Fixture>(&body).unwrap()[0].id, 3);
    }

    #[test]
    fn test_upstream_order_is_preserved() {
        let body = envelope_json(
            "fixtures",
            vec![
                PayloadBuilder::fixture(30, "2024-08-18T15:00:00+00:00", "NS").build(),
                PayloadBuilder::fixture(10, "2024-08-16T19:00:00+00:00", "NS").build(),
                PayloadBuilder::fixture(20, "2024-08-17T15:00:00+00:00", "NS").build(),
            ],
        );
        let ids: Vec<i32> = map_response::<Fixture>(&body)
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[test]
    fn test_league_maps_current_season() {
        let body = envelope_json(
            "leagues",
            vec![PayloadBuilder::league(71, "Serie A", "Brazil")
                .with_seasons(&[(2023, false), (2024, true)])
                .build()],
        );
        let leagues = map_response::<League>(&body).unwrap();

        assert_eq!(
            leagues,
            vec![League {
                id: 71,
                name: "Serie A".to_string(),
                country: "Brazil".to_string(),
                country_code: Some("BR".to_string()),
                flag: Some("https://media.api-sports.io/flags/br.svg".to_string()),
                logo: Some("https://media.api-sports.io/football/leagues/71.png".to_string()),
                season: 2024,
            }]
        );
    }

    #[test]
    fn test_league_without_current_flag_uses_first_season() {
        let body = envelope_json(
            "leagues",
            vec![PayloadBuilder::league(2, "UEFA Champions League", "World")
                .with_seasons(&[(2022, false), (2021, false)])
                .without_country_code()
                .build()],
        );
        let league = &map_response::<League>(&body).unwrap()[0];
        assert_eq!(league.season, 2022);
        assert_eq!(league.country_code, None);
        assert_eq!(league.flag, None);
    }

    #[test]
    fn test_league_without_seasons_is_mapping_error() {
        let body = envelope_json(
            "leagues",
            vec![PayloadBuilder::league(39, "Premier League", "England")
                .with_seasons(&[])
                .build()],
        );
        let err = map_response::<League>(&body).unwrap_err();
        assert!(
            matches!(&err, AppError::Mapping { field, .. } if field == "response[0].seasons"),
            "{err:?}"
        );
    }

    #[test]
    fn test_envelope_errors_become_logical_error() {
        let body = error_envelope_json("fixtures", &["The Season field must contain 4 characters."]);
        let err = map_response::<Fixture>(&body).unwrap_err();
        match err {
            AppError::UpstreamLogical { endpoint, errors } => {
                assert_eq!(endpoint, "fixtures");
                assert_eq!(errors, vec!["The Season field must contain 4 characters."]);
            }
            other => panic!("expected logical error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_body_is_envelope_mapping_error() {
        let err = map_response::<League>("<html>gateway timeout</html>").unwrap_err();
        assert!(matches!(&err, AppError::Mapping { field, .. } if field == "envelope"));
    }

    #[test]
    fn test_response_must_be_array() {
        let body = json!({"get": "leagues", "errors": [], "results": 1, "response": {"id": 1}})
            .to_string();
        let err = map_response::<League>(&body).unwrap_err();
        assert!(matches!(&err, AppError::Mapping { field, .. } if field == "response"));

        let body = json!({"get": "leagues", "errors": [], "results": 0}).to_string();
        let err = map_response::<League>(&body).unwrap_err();
        assert!(matches!(&err, AppError::Mapping { field, .. } if field == "response"));
    }

    #[test]
    fn test_envelope_for_other_endpoint_is_rejected() {
        let body = envelope_json(
            "leagues",
            vec![PayloadBuilder::league(39, "Premier League", "England").build()],
        );
        let err = map_response::<Fixture>(&body).unwrap_err();
        assert!(matches!(&err, AppError::Mapping { field, .. } if field == "get"));
    }

    #[test]
    fn test_empty_response_maps_to_empty_list() {
        let body = envelope_json("fixtures", vec![]);
        assert!(map_response::<Fixture>(&body).unwrap().is_empty());
    }
}

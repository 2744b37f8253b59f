use serde_json::{Value, json};

/// Builders for provider-shaped JSON payloads used by unit and integration tests
pub struct PayloadBuilder;

impl PayloadBuilder {
    /// Starts a fixture item with the given id, kickoff date and short status code
    pub fn fixture(id: i32, date: &str, short_status: &str) -> FixturePayload {
        FixturePayload {
            id,
            date: date.to_string(),
            short_status: short_status.to_string(),
            home: (1, "Home FC".to_string()),
            away: (2, "Away FC".to_string()),
            goals: (Some(1), Some(0)),
            halftime: (Some(0), Some(0)),
            extratime: (None, None),
            penalty: (None, None),
            season: 2024,
        }
    }

    /// Starts a league item. The country code is derived from the country name.
    pub fn league(id: i32, name: &str, country: &str) -> LeaguePayload {
        let code: String = country.chars().take(2).collect::<String>().to_uppercase();
        LeaguePayload {
            id,
            name: name.to_string(),
            country: country.to_string(),
            code: Some(code),
            seasons: vec![(2024, true)],
        }
    }
}

pub struct FixturePayload {
    id: i32,
    date: String,
    short_status: String,
    home: (i32, String),
    away: (i32, String),
    goals: (Option<u32>, Option<u32>),
    halftime: (Option<u32>, Option<u32>),
    extratime: (Option<u32>, Option<u32>),
    penalty: (Option<u32>, Option<u32>),
    season: i32,
}

impl FixturePayload {
    pub fn with_teams(mut self, home: (i32, &str), away: (i32, &str)) -> Self {
        self.home = (home.0, home.1.to_string());
        self.away = (away.0, away.1.to_string());
        self
    }

    /// Sets the current goals; the full-time score follows them
    pub fn with_goals(mut self, home: Option<u32>, away: Option<u32>) -> Self {
        self.goals = (home, away);
        self
    }

    pub fn with_halftime(mut self, home: Option<u32>, away: Option<u32>) -> Self {
        self.halftime = (home, away);
        self
    }

    pub fn with_extratime(mut self, home: Option<u32>, away: Option<u32>) -> Self {
        self.extratime = (home, away);
        self
    }

    pub fn with_penalty(mut self, home: Option<u32>, away: Option<u32>) -> Self {
        self.penalty = (home, away);
        self
    }

    pub fn with_season(mut self, season: i32) -> Self {
        self.season = season;
        self
    }

    pub fn build(self) -> Value {
        let (long, elapsed) = status_details(&self.short_status);
        json!({
            "fixture": {
                "id": self.id,
                "referee": null,
                "timezone": "UTC",
                "date": self.date,
                "status": {
                    "long": long,
                    "short": self.short_status,
                    "elapsed": elapsed,
                },
            },
            "league": {
                "id": 39,
                "name": "Premier League",
                "country": "England",
                "season": self.season,
                "round": "Regular Season - 1",
            },
            "teams": {
                "home": team_json(self.home.0, &self.home.1),
                "away": team_json(self.away.0, &self.away.1),
            },
            "goals": pair_json(self.goals),
            "score": {
                "halftime": pair_json(self.halftime),
                "fulltime": pair_json(self.goals),
                "extratime": pair_json(self.extratime),
                "penalty": pair_json(self.penalty),
            },
        })
    }
}

pub struct LeaguePayload {
    id: i32,
    name: String,
    country: String,
    code: Option<String>,
    seasons: Vec<(i32, bool)>,
}

impl LeaguePayload {
    pub fn with_seasons(mut self, seasons: &[(i32, bool)]) -> Self {
        self.seasons = seasons.to_vec();
        self
    }

    /// International competitions carry no country code or flag
    pub fn without_country_code(mut self) -> Self {
        self.code = None;
        self
    }

    pub fn build(self) -> Value {
        let flag = self
            .code
            .as_ref()
            .map(|code| format!("https://media.api-sports.io/flags/{}.svg", code.to_lowercase()));
        let seasons: Vec<Value> = self
            .seasons
            .iter()
            .map(|(year, current)| {
                json!({
                    "year": year,
                    "start": format!("{year}-08-01"),
                    "end": format!("{}-05-31", year + 1),
                    "current": current,
                })
            })
            .collect();

        json!({
            "league": {
                "id": self.id,
                "name": self.name,
                "type": "League",
                "logo": format!("https://media.api-sports.io/football/leagues/{}.png", self.id),
            },
            "country": {
                "name": self.country,
                "code": self.code,
                "flag": flag,
            },
            "seasons": seasons,
        })
    }
}

/// Wraps items in a successful provider envelope
pub fn envelope_json(get: &str, items: Vec<Value>) -> String {
    json!({
        "get": get,
        "parameters": {},
        "errors": [],
        "results": items.len(),
        "paging": {"current": 1, "total": 1},
        "response": items,
    })
    .to_string()
}

/// Provider envelope reporting query errors with an empty response
pub fn error_envelope_json(get: &str, errors: &[&str]) -> String {
    json!({
        "get": get,
        "parameters": {},
        "errors": errors,
        "results": 0,
        "paging": {"current": 1, "total": 1},
        "response": [],
    })
    .to_string()
}

fn team_json(id: i32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "logo": format!("https://media.api-sports.io/football/teams/{id}.png"),
    })
}

fn pair_json((home, away): (Option<u32>, Option<u32>)) -> Value {
    json!({"home": home, "away": away})
}

fn status_details(short: &str) -> (&'static str, Option<u32>) {
    match short {
        "TBD" => ("Time To Be Defined", None),
        "NS" => ("Not Started", None),
        "1H" => ("First Half", Some(23)),
        "HT" => ("Halftime", Some(45)),
        "2H" => ("Second Half", Some(67)),
        "ET" => ("Extra Time", Some(105)),
        "P" => ("Penalty In Progress", Some(120)),
        "FT" => ("Match Finished", Some(90)),
        "AET" => ("Match Finished After Extra Time", Some(120)),
        "PEN" => ("Match Finished After Penalty", Some(120)),
        "PST" => ("Match Postponed", None),
        "CANC" => ("Match Cancelled", None),
        _ => ("Unknown", None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_payload_derives_country_code() {
        let league = PayloadBuilder::league(71, "Serie A", "Brazil").build();
        assert_eq!(league["country"]["code"], "BR");
        assert_eq!(league["country"]["flag"], "https://media.api-sports.io/flags/br.svg");
    }

    #[test]
    fn test_envelope_counts_results() {
        let body = envelope_json(
            "fixtures",
            vec![PayloadBuilder::fixture(1, "2024-08-16T19:00:00+00:00", "NS").build()],
        );
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["results"], 1);
        assert_eq!(value["response"][0]["fixture"]["status"]["elapsed"], Value::Null);
    }
}

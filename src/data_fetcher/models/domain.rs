//! Canonical records handed to callers of the gateway.
//!
//! These types are stable across provider schema revisions. Numbers the provider may
//! omit are `Option`s so that "no data" never reads as zero.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: i32,
    pub name: String,
    pub country: String,
    /// ISO country code; absent for international competitions
    pub country_code: Option<String>,
    pub flag: Option<String>,
    pub logo: Option<String>,
    pub season: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub logo: Option<String>,
}

/// Home/away pair where either side may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScorePair {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

impl ScorePair {
    pub fn new(home: Option<u32>, away: Option<u32>) -> Self {
        Self { home, away }
    }

    /// True when neither side carries a value
    pub fn is_empty(&self) -> bool {
        self.home.is_none() && self.away.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub halftime: ScorePair,
    pub fulltime: ScorePair,
    pub extratime: ScorePair,
    pub penalty: ScorePair,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: i32,
    pub date: DateTime<FixedOffset>,
    pub status: FixtureStatus,
    /// Provider's long status text, e.g. "Match Finished"
    pub status_long: Option<String>,
    /// Minutes played, for fixtures in progress or finished
    pub elapsed: Option<u32>,
    pub season: i32,
    pub round: Option<String>,
    pub home_team: Team,
    pub away_team: Team,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub score: Score,
}

impl Fixture {
    pub fn goals(&self) -> ScorePair {
        ScorePair::new(self.home_goals, self.away_goals)
    }
}

/// Short status codes used by the provider. Unrecognised codes are kept verbatim
/// so a new provider status never fails a whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FixtureStatus {
    ToBeDefined,
    NotStarted,
    FirstHalf,
    Halftime,
    SecondHalf,
    ExtraTime,
    BreakTime,
    Penalties,
    Suspended,
    Interrupted,
    Finished,
    FinishedAfterExtraTime,
    FinishedAfterPenalties,
    Postponed,
    Cancelled,
    Abandoned,
    TechnicalLoss,
    WalkOver,
    InProgress,
    Other(String),
}

impl FixtureStatus {
    pub fn from_short(code: &str) -> Self {
        match code {
            "TBD" => Self::ToBeDefined,
            "NS" => Self::NotStarted,
            "1H" => Self::FirstHalf,
            "HT" => Self::Halftime,
            "2H" => Self::SecondHalf,
            "ET" => Self::ExtraTime,
            "BT" => Self::BreakTime,
            "P" => Self::Penalties,
            "SUSP" => Self::Suspended,
            "INT" => Self::Interrupted,
            "FT" => Self::Finished,
            "AET" => Self::FinishedAfterExtraTime,
            "PEN" => Self::FinishedAfterPenalties,
            "PST" => Self::Postponed,
            "CANC" => Self::Cancelled,
            "ABD" => Self::Abandoned,
            "AWD" => Self::TechnicalLoss,
            "WO" => Self::WalkOver,
            "LIVE" => Self::InProgress,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn short_code(&self) -> &str {
        match self {
            Self::ToBeDefined => "TBD",
            Self::NotStarted => "NS",
            Self::FirstHalf => "1H",
            Self::Halftime => "HT",
            Self::SecondHalf => "2H",
            Self::ExtraTime => "ET",
            Self::BreakTime => "BT",
            Self::Penalties => "P",
            Self::Suspended => "SUSP",
            Self::Interrupted => "INT",
            Self::Finished => "FT",
            Self::FinishedAfterExtraTime => "AET",
            Self::FinishedAfterPenalties => "PEN",
            Self::Postponed => "PST",
            Self::Cancelled => "CANC",
            Self::Abandoned => "ABD",
            Self::TechnicalLoss => "AWD",
            Self::WalkOver => "WO",
            Self::InProgress => "LIVE",
            Self::Other(code) => code,
        }
    }

    /// Ball in play or a break inside the match
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            Self::FirstHalf
                | Self::Halftime
                | Self::SecondHalf
                | Self::ExtraTime
                | Self::BreakTime
                | Self::Penalties
                | Self::Suspended
                | Self::Interrupted
                | Self::InProgress
        )
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            Self::Finished
                | Self::FinishedAfterExtraTime
                | Self::FinishedAfterPenalties
                | Self::TechnicalLoss
                | Self::WalkOver
        )
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::ToBeDefined | Self::NotStarted)
    }
}

impl From<String> for FixtureStatus {
    fn from(code: String) -> Self {
        Self::from_short(&code)
    }
}

impl From<FixtureStatus> for String {
    fn from(status: FixtureStatus) -> Self {
        status.short_code().to_string()
    }
}

impl fmt::Display for FixtureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_code())
    }
}

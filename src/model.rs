use serde::{Deserialize, Serialize};

/// A named grouping of fixtures. `name` doubles as a filter key; category
/// detection ("challenge", "camogie", ...) is case-insensitive substring match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub shortname: String,
    #[serde(default)]
    pub year: i32,
    #[serde(rename = "seniorGrade", default)]
    pub senior_grade: bool,
}

/// A scheduled match as the gateway returns it. Wire names are a mix of
/// camelCase and snake_case, preserved as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: i64,
    #[serde(rename = "externalId", default)]
    pub external_id: i64,
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub pitch: String,
    /// Kick-off as epoch milliseconds.
    #[serde(default)]
    pub date: i64,
    #[serde(rename = "homeScore", default)]
    pub home_score: String,
    #[serde(rename = "awayScore", default)]
    pub away_score: String,
    #[serde(default)]
    pub referee_name: String,
    #[serde(default)]
    pub permission_sought: bool,
    #[serde(default)]
    pub permission_obtained: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "competitionId", default)]
    pub competition_id: i64,
    /// Denormalized snapshot; may be stale relative to the competition store,
    /// or absent entirely.
    #[serde(default)]
    pub competition: Option<Competition>,
    /// Display mirror of `date`, set client-side on every collection replace.
    #[serde(default)]
    pub time: i64,
}

/// All-optional mirror of `Fixture`. Single-fixture mutation responses decode
/// into this; absent fields are preserved when the patch is merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixturePatch {
    pub id: i64,
    #[serde(rename = "externalId", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<i64>,
    #[serde(rename = "homeTeam", skip_serializing_if = "Option::is_none")]
    pub home_team: Option<String>,
    #[serde(rename = "awayTeam", skip_serializing_if = "Option::is_none")]
    pub away_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
    #[serde(rename = "homeScore", skip_serializing_if = "Option::is_none")]
    pub home_score: Option<String>,
    #[serde(rename = "awayScore", skip_serializing_if = "Option::is_none")]
    pub away_score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_sought: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_obtained: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "competitionId", skip_serializing_if = "Option::is_none")]
    pub competition_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition: Option<Competition>,
}

/// Descriptor for a fixture to be created. Kick-off is carried in epoch
/// milliseconds; the gateway endpoint wants seconds and the conversion
/// happens at the wire boundary.
#[derive(Debug, Clone)]
pub struct NewFixture {
    pub home_team: String,
    pub away_team: String,
    pub venue: String,
    pub kickoff_ms: i64,
    pub competition_id: i64,
}

/// Response of the partial-edit endpoint: which fields changed, the record
/// after the change, and a full refreshed collection.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveOutcome {
    #[serde(rename = "updatedFields", default)]
    pub updated_fields: Vec<String>,
    #[serde(rename = "updatedFixture")]
    pub updated_fixture: FixturePatch,
    #[serde(rename = "updatedFixturesList", default)]
    pub updated_fixtures_list: Vec<Fixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

/// The closed set of fields the single-field update endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureField {
    Pitch,
    Comment,
    PermissionSought,
    PermissionObtained,
    RefereeName,
    Venue,
    HomeScore,
    AwayScore,
}

impl FixtureField {
    pub fn wire_name(self) -> &'static str {
        match self {
            FixtureField::Pitch => "pitch",
            FixtureField::Comment => "comment",
            FixtureField::PermissionSought => "permission_sought",
            FixtureField::PermissionObtained => "permission_obtained",
            FixtureField::RefereeName => "referee_name",
            FixtureField::Venue => "venue",
            FixtureField::HomeScore => "homeScore",
            FixtureField::AwayScore => "awayScore",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "pitch" => Some(FixtureField::Pitch),
            "comment" => Some(FixtureField::Comment),
            "permission_sought" => Some(FixtureField::PermissionSought),
            "permission_obtained" => Some(FixtureField::PermissionObtained),
            "referee_name" => Some(FixtureField::RefereeName),
            "venue" => Some(FixtureField::Venue),
            "homeScore" => Some(FixtureField::HomeScore),
            "awayScore" => Some(FixtureField::AwayScore),
            _ => None,
        }
    }
}

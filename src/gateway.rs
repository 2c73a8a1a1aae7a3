use std::time::Duration;

use log::debug;
use once_cell::sync::OnceCell;
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::model::{Competition, Fixture, FixtureField, FixturePatch, NewFixture, SaveOutcome, User};

const REQUEST_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

fn shared_client() -> GatewayResult<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(GatewayError::Network)
    })
}

#[derive(Debug, Clone, Serialize)]
struct CreateFixtureBody {
    #[serde(rename = "homeTeam")]
    home_team: String,
    #[serde(rename = "awayTeam")]
    away_team: String,
    venue: String,
    /// Epoch seconds, not milliseconds.
    #[serde(rename = "fixtureDate")]
    fixture_date: i64,
    #[serde(rename = "competitionId")]
    competition_id: i64,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Blocking client for the remote fixture service. Cheap to clone; the
/// underlying HTTP client is shared process-wide.
#[derive(Debug, Clone)]
pub struct FixtureGateway {
    base_url: String,
}

impl FixtureGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn fetch_fixtures(&self) -> GatewayResult<Vec<Fixture>> {
        self.get_json(&format!("{}/fixtures", self.base_url))
    }

    /// Single-field mutation; the response carries only the fields the
    /// service chose to echo back.
    pub fn update_fixture_field(
        &self,
        fixture_id: i64,
        field: FixtureField,
        value: &str,
    ) -> GatewayResult<FixturePatch> {
        let url = format!(
            "{}/fixtures/updateFixture/{fixture_id}/{}/{value}",
            self.base_url,
            field.wire_name()
        );
        self.get_json(&url)
    }

    pub fn save_fixture_edits(&self, patch: &FixturePatch) -> GatewayResult<SaveOutcome> {
        let url = format!("{}/fixtures/update", self.base_url);
        debug!("posting partial edit for fixture {}", patch.id);
        let resp = shared_client()?.post(&url).json(patch).send()?;
        read_json(resp)
    }

    /// Returns the full refreshed fixture collection.
    pub fn create_fixture(&self, new_fixture: &NewFixture) -> GatewayResult<Vec<Fixture>> {
        let body = CreateFixtureBody {
            home_team: new_fixture.home_team.clone(),
            away_team: new_fixture.away_team.clone(),
            venue: new_fixture.venue.clone(),
            fixture_date: new_fixture.kickoff_ms / 1000,
            competition_id: new_fixture.competition_id,
        };
        let url = format!("{}/fixtures", self.base_url);
        let resp = shared_client()?.post(&url).json(&body).send()?;
        read_json(resp)
    }

    /// Server-side refresh of one competition's fixtures; the response is the
    /// refreshed list, of which only the count is useful to callers.
    pub fn refresh_fixtures(&self, competition_id: &str) -> GatewayResult<usize> {
        let url = format!("{}/fixtures/updateFixtures/{competition_id}", self.base_url);
        let value: Value = self.get_json(&url)?;
        let count = match &value {
            Value::Array(items) => items.len(),
            Value::Number(n) => n.as_u64().unwrap_or(0) as usize,
            _ => 0,
        };
        Ok(count)
    }

    /// Kicks the service into pulling fixtures for a competition from its
    /// upstream source. The body is opaque text.
    pub fn populate_fixtures(&self, competition_id: &str) -> GatewayResult<String> {
        let url = format!(
            "{}/fixtures/fetchAndPopulateByCompetitionId/{competition_id}",
            self.base_url
        );
        let resp = shared_client()?.get(&url).send()?;
        read_text(resp)
    }

    pub fn fetch_competitions(&self) -> GatewayResult<Vec<Competition>> {
        self.get_json(&format!("{}/competition", self.base_url))
    }

    pub fn add_competition(&self, name: &str) -> GatewayResult<Vec<Competition>> {
        let url = format!("{}/competition/{name}", self.base_url);
        let resp = shared_client()?.post(&url).send()?;
        read_json(resp)
    }

    pub fn set_senior_grade(
        &self,
        competition_id: &str,
        senior_grade: bool,
    ) -> GatewayResult<Vec<Competition>> {
        let url = format!(
            "{}/competition/{competition_id}/seniorGrade/{senior_grade}",
            self.base_url
        );
        let resp = shared_client()?.patch(&url).send()?;
        read_json(resp)
    }

    /// Any received response resolves; only transport failure is an error.
    pub fn login(&self, email: &str, password: &str) -> GatewayResult<bool> {
        let url = format!("{}/authentication/login", self.base_url);
        let body = LoginBody { email, password };
        let resp = shared_client()?.post(&url).json(&body).send()?;
        Ok(resp.status() == reqwest::StatusCode::OK)
    }

    pub fn register(&self, name: &str, email: &str, password: &str) -> GatewayResult<User> {
        let url = format!("{}/authentication/user", self.base_url);
        let body = RegisterBody {
            name,
            email,
            password,
        };
        let resp = shared_client()?.post(&url).json(&body).send()?;
        read_json(resp)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> GatewayResult<T> {
        debug!("GET {url}");
        let resp = shared_client()?.get(url).send()?;
        read_json(resp)
    }
}

fn read_json<T: DeserializeOwned>(resp: Response) -> GatewayResult<T> {
    let body = read_text(resp)?;
    Ok(serde_json::from_str(&body)?)
}

fn read_text(resp: Response) -> GatewayResult<String> {
    let status = resp.status();
    let body = resp.text()?;
    if !status.is_success() {
        return Err(GatewayError::UnexpectedStatus { status, body });
    }
    Ok(body)
}

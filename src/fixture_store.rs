use std::collections::HashSet;

use chrono::{Days, NaiveDate, NaiveTime};
use log::warn;

use crate::config::FilterLexicon;
use crate::error::GatewayResult;
use crate::gateway::FixtureGateway;
use crate::model::{Fixture, FixtureField, FixturePatch, NewFixture};

/// Sentinel disabling the competition-name filter stage.
pub const ALL_COMPETITIONS: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    From,
    To,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Senior,
    Underage,
}

#[derive(Debug, Clone)]
pub struct FilterState {
    /// Exact competition name, or [`ALL_COMPETITIONS`].
    pub competition_name: String,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    /// `YYYY-MM-DD` mirrors of the bounds, empty when unset.
    pub from_display: String,
    pub to_display: String,
    pub show_senior_grade: bool,
    pub show_underage_grade: bool,
    pub lexicon: FilterLexicon,
}

impl FilterState {
    pub fn new(lexicon: FilterLexicon) -> Self {
        Self {
            competition_name: ALL_COMPETITIONS.to_string(),
            from_date: None,
            to_date: None,
            from_display: String::new(),
            to_display: String::new(),
            show_senior_grade: true,
            show_underage_grade: true,
            lexicon,
        }
    }
}

/// Holds the full fetched fixture collection and the derived filtered view.
///
/// The raw collection changes in exactly two ways: wholesale replacement
/// (load/create/save) or an identity-matched in-place patch after a
/// single-fixture mutation. The filtered view is recomputed from scratch on
/// every change, so it is always a pure function of raw collection and
/// filter state.
pub struct FixtureStore {
    gateway: FixtureGateway,
    fixtures: Vec<Fixture>,
    current_fixtures: Vec<Fixture>,
    competition_names: HashSet<String>,
    filter: FilterState,
}

impl FixtureStore {
    pub fn new(gateway: FixtureGateway, lexicon: FilterLexicon) -> Self {
        Self {
            gateway,
            fixtures: Vec::new(),
            current_fixtures: Vec::new(),
            competition_names: HashSet::new(),
            filter: FilterState::new(lexicon),
        }
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn current_fixtures(&self) -> &[Fixture] {
        &self.current_fixtures
    }

    pub fn competition_names(&self) -> &HashSet<String> {
        &self.competition_names
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Fetches the full collection. On failure the previous collection is
    /// kept as-is; there is no partial overwrite.
    pub fn load(&mut self) -> GatewayResult<()> {
        let fetched = self.gateway.fetch_fixtures()?;
        self.replace_fixtures(fetched);
        Ok(())
    }

    /// Wholesale replacement: stamps the display mirror, rebuilds the
    /// distinct-competition-name set and reruns the pipeline.
    pub fn replace_fixtures(&mut self, mut fetched: Vec<Fixture>) {
        for fixture in &mut fetched {
            fixture.time = fixture.date;
        }
        self.fixtures = fetched;
        self.competition_names.clear();
        for fixture in &self.fixtures {
            // Fixtures with a missing competition reference contribute nothing.
            if let Some(competition) = &fixture.competition {
                self.competition_names.insert(competition.name.clone());
            }
        }
        self.run_filters();
    }

    /// In-place reconciliation: merges the patch into the fixture with the
    /// matching id, touching only fields present in the patch. An unknown id
    /// drops the patch; the collection never grows here.
    pub fn apply_patch(&mut self, patch: FixturePatch) {
        let Some(existing) = self.fixtures.iter_mut().find(|f| f.id == patch.id) else {
            warn!("no fixture with id {} in collection, dropping update", patch.id);
            return;
        };
        merge_patch(existing, patch);
        self.run_filters();
    }

    pub fn set_competition_filter(&mut self, name: &str) {
        self.filter.competition_name = name.to_string();
        self.run_filters();
    }

    pub fn set_date_bound(&mut self, bound: DateBound, date: Option<NaiveDate>) {
        let display = date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        match bound {
            DateBound::From => {
                self.filter.from_date = date;
                self.filter.from_display = display;
            }
            DateBound::To => {
                self.filter.to_date = date;
                self.filter.to_display = display;
            }
        }
        self.run_filters();
    }

    pub fn toggle_grade(&mut self, grade: Grade) {
        match grade {
            Grade::Senior => self.filter.show_senior_grade = !self.filter.show_senior_grade,
            Grade::Underage => self.filter.show_underage_grade = !self.filter.show_underage_grade,
        }
        self.run_filters();
    }

    pub fn update_field(
        &mut self,
        fixture_id: i64,
        field: FixtureField,
        value: &str,
    ) -> GatewayResult<()> {
        let patch = self.gateway.update_fixture_field(fixture_id, field, value)?;
        self.apply_patch(patch);
        Ok(())
    }

    /// Two sequential single-field updates, home then away. If the first
    /// fails the second is never issued, which can leave the server with the
    /// home side updated and the away side not. Only the second response is
    /// reconciled locally.
    pub fn set_score(&mut self, fixture_id: i64, home: &str, away: &str) -> GatewayResult<()> {
        self.gateway
            .update_fixture_field(fixture_id, FixtureField::HomeScore, home)?;
        let patch = self
            .gateway
            .update_fixture_field(fixture_id, FixtureField::AwayScore, away)?;
        self.apply_patch(patch);
        Ok(())
    }

    pub fn create(&mut self, new_fixture: &NewFixture) -> GatewayResult<()> {
        let list = self.gateway.create_fixture(new_fixture)?;
        self.replace_fixtures(list);
        Ok(())
    }

    /// Posts an arbitrary partial-field patch and swaps in the refreshed
    /// collection the service returns. The changed-field names go back to the
    /// caller for UI feedback.
    pub fn save_edits(&mut self, patch: &FixturePatch) -> GatewayResult<Vec<String>> {
        let outcome = self.gateway.save_fixture_edits(patch)?;
        self.replace_fixtures(outcome.updated_fixtures_list);
        Ok(outcome.updated_fields)
    }

    /// Synchronous and idempotent; safe to call redundantly.
    pub fn run_filters(&mut self) {
        self.current_fixtures = run_pipeline(&self.fixtures, &self.filter);
    }
}

/// The predicate pipeline, applied in fixed order, each stage consuming the
/// previous stage's output. Always recomputes from the raw collection.
pub fn run_pipeline(fixtures: &[Fixture], filter: &FilterState) -> Vec<Fixture> {
    let mut out: Vec<Fixture> = fixtures
        .iter()
        .filter(|f| involves_club_or_event(f, &filter.lexicon))
        .cloned()
        .collect();

    if filter.competition_name != ALL_COMPETITIONS {
        out.retain(|f| {
            f.competition
                .as_ref()
                .is_some_and(|c| c.name == filter.competition_name)
        });
    }

    out.retain(|f| within_window(f.date, filter.from_date, filter.to_date));

    if !filter.show_senior_grade {
        // A fixture without a competition reference always passes the grade
        // stages.
        out.retain(|f| f.competition.as_ref().is_none_or(|c| !c.senior_grade));
    }
    if !filter.show_underage_grade {
        out.retain(|f| f.competition.as_ref().is_none_or(|c| c.senior_grade));
    }

    out
}

fn involves_club_or_event(fixture: &Fixture, lexicon: &FilterLexicon) -> bool {
    let club = lexicon.club_marker.to_lowercase();
    let event = lexicon.event_marker.to_lowercase();
    fixture.home_team.to_lowercase().contains(&club)
        || fixture.away_team.to_lowercase().contains(&club)
        || fixture
            .competition
            .as_ref()
            .is_some_and(|c| c.name.to_lowercase().contains(&event))
}

// Lower bound inclusive at start of day; upper bound keeps the whole
// selected day.
fn within_window(date_ms: i64, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    if let Some(from) = from {
        if date_ms < start_of_day_ms(from) {
            return false;
        }
    }
    if let Some(to) = to {
        if let Some(end) = to.checked_add_days(Days::new(1)) {
            if date_ms >= start_of_day_ms(end) {
                return false;
            }
        }
    }
    true
}

fn start_of_day_ms(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

fn merge_patch(fixture: &mut Fixture, patch: FixturePatch) {
    if let Some(v) = patch.external_id {
        fixture.external_id = v;
    }
    if let Some(v) = patch.home_team {
        fixture.home_team = v;
    }
    if let Some(v) = patch.away_team {
        fixture.away_team = v;
    }
    if let Some(v) = patch.venue {
        fixture.venue = v;
    }
    if let Some(v) = patch.pitch {
        fixture.pitch = v;
    }
    if let Some(v) = patch.date {
        fixture.date = v;
        fixture.time = v;
    }
    if let Some(v) = patch.home_score {
        fixture.home_score = v;
    }
    if let Some(v) = patch.away_score {
        fixture.away_score = v;
    }
    if let Some(v) = patch.referee_name {
        fixture.referee_name = v;
    }
    if let Some(v) = patch.permission_sought {
        fixture.permission_sought = v;
    }
    if let Some(v) = patch.permission_obtained {
        fixture.permission_obtained = v;
    }
    if let Some(v) = patch.comment {
        fixture.comment = Some(v);
    }
    if let Some(v) = patch.competition_id {
        fixture.competition_id = v;
    }
    if let Some(v) = patch.competition {
        fixture.competition = Some(v);
    }
}

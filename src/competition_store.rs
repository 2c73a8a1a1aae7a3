use crate::config::FilterLexicon;
use crate::error::GatewayResult;
use crate::gateway::FixtureGateway;
use crate::model::Competition;

/// Holds the full competition collection plus the derived subset the user is
/// allowed to edit. The collection is only ever replaced wholesale; every
/// mutation endpoint returns the full refreshed list.
pub struct CompetitionStore {
    gateway: FixtureGateway,
    competitions: Vec<Competition>,
    editable_competitions: Vec<Competition>,
    editable_markers: Vec<String>,
}

impl CompetitionStore {
    pub fn new(gateway: FixtureGateway, lexicon: &FilterLexicon) -> Self {
        Self {
            gateway,
            competitions: Vec::new(),
            editable_competitions: Vec::new(),
            editable_markers: lexicon.editable_markers.clone(),
        }
    }

    pub fn competitions(&self) -> &[Competition] {
        &self.competitions
    }

    pub fn editable_competitions(&self) -> &[Competition] {
        &self.editable_competitions
    }

    pub fn load(&mut self) -> GatewayResult<()> {
        let list = self.gateway.fetch_competitions()?;
        self.replace_competitions(list);
        Ok(())
    }

    pub fn replace_competitions(&mut self, list: Vec<Competition>) {
        self.editable_competitions = list
            .iter()
            .filter(|c| is_editable(&c.name, &self.editable_markers))
            .cloned()
            .collect();
        self.competitions = list;
    }

    /// Asks the service to refresh one competition's fixtures; returns the
    /// refreshed fixture count. Does not touch local state.
    pub fn refresh_fixture_count(&self, competition_id: &str) -> GatewayResult<usize> {
        self.gateway.refresh_fixtures(competition_id)
    }

    /// Triggers a server-side pull of fixtures for the competition, then
    /// reloads the competition list. Fixtures themselves are not reloaded.
    pub fn trigger_fixture_sync(&mut self, competition_id: &str) -> GatewayResult<()> {
        self.gateway.populate_fixtures(competition_id)?;
        self.load()
    }

    pub fn add_by_name(&mut self, name: &str) -> GatewayResult<()> {
        let list = self.gateway.add_competition(name)?;
        self.replace_competitions(list);
        Ok(())
    }

    pub fn set_senior_grade(&mut self, competition_id: &str, value: bool) -> GatewayResult<()> {
        let list = self.gateway.set_senior_grade(competition_id, value)?;
        self.replace_competitions(list);
        Ok(())
    }
}

pub fn is_editable(name: &str, markers: &[String]) -> bool {
    let lower = name.to_lowercase();
    markers.iter().any(|marker| lower.contains(marker))
}

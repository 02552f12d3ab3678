// Teams - Data fetch and mapping for the teams API
//
// Fetches the `{ "teams": [...] }` feed, maps it into immutable Division and
// Team values in input order, and provides the relational queries the API
// scenarios assert on.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Division id of the Metropolitan division in the teams feed
pub const METROPOLITAN_DIVISION_ID: i64 = 2;

/// A grouping of teams. Identity is the `id`; the name is informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Division {
    pub name: String,
    pub id: i64,
}

impl PartialEq for Division {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Division {}

impl Hash for Division {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// One element of the `teams` array.
///
/// Equality is structural over every field, division name included, unlike
/// [`Division`] on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub division: Division,
    pub first_year_of_play: i32,
    pub name: String,
    pub founded: i32,
    pub official_site_url: String,
    pub location: String,
}

impl Team {
    fn key(&self) -> (&str, i64, i32, &str, i32, &str, &str) {
        (
            self.division.name.as_str(),
            self.division.id,
            self.first_year_of_play,
            self.name.as_str(),
            self.founded,
            self.official_site_url.as_str(),
            self.location.as_str(),
        )
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Team {}

impl Hash for Team {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[derive(Deserialize)]
struct TeamsPayload {
    teams: Vec<Team>,
}

/// Fetches and maps the teams feed at `url`.
///
/// No retries: an unreachable endpoint or non-2xx status is an
/// [`Error::Network`], a body that is not the expected JSON is an
/// [`Error::Parse`]. The full payload is logged at `info`.
pub async fn fetch_teams(url: &str) -> Result<Vec<Team>> {
    tracing::debug!("Fetching teams from {}", url);

    let response = reqwest::get(url)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| Error::Network(format!("GET {} failed: {}", url, e)))?;

    let body = response
        .text()
        .await
        .map_err(|e| Error::Network(format!("reading body from {} failed: {}", url, e)))?;

    let payload = parse_payload(&body)?;
    tracing::info!("Fetched data from {}:\n{:#}", url, payload);

    teams_from_payload(payload)
}

/// Maps a teams feed body into teams, preserving array order.
pub fn parse_teams(body: &str) -> Result<Vec<Team>> {
    teams_from_payload(parse_payload(body)?)
}

fn parse_payload(body: &str) -> Result<serde_json::Value> {
    serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("teams feed is not valid JSON: {}", e)))
}

fn teams_from_payload(payload: serde_json::Value) -> Result<Vec<Team>> {
    let payload: TeamsPayload = serde_json::from_value(payload)
        .map_err(|e| Error::Parse(format!("unexpected teams feed shape: {}", e)))?;
    Ok(payload.teams)
}

/// Teams ordered by founding year, oldest first. Ties keep feed order.
pub fn sorted_by_founded(teams: &[Team]) -> Vec<&Team> {
    let mut sorted: Vec<&Team> = teams.iter().collect();
    sorted.sort_by_key(|team| team.founded);
    sorted
}

/// The team with the smallest `founded`, first in feed order on ties.
pub fn oldest_team(teams: &[Team]) -> Option<&Team> {
    teams.iter().min_by_key(|team| team.founded)
}

/// Looks a team up by exact name.
pub fn find_team<'a>(teams: &'a [Team], name: &str) -> Option<&'a Team> {
    teams.iter().find(|team| team.name == name)
}

/// Locations shared by more than one team, sorted by name.
pub fn cities_with_multiple_teams(teams: &[Team]) -> Vec<String> {
    let mut per_location: BTreeMap<&str, usize> = BTreeMap::new();
    for team in teams {
        *per_location.entry(team.location.as_str()).or_default() += 1;
    }
    per_location
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(location, _)| location.to_string())
        .collect()
}

/// Teams grouped by division id; each group keeps feed order.
pub fn group_by_division(teams: &[Team]) -> BTreeMap<i64, Vec<&Team>> {
    let mut groups: BTreeMap<i64, Vec<&Team>> = BTreeMap::new();
    for team in teams {
        groups.entry(team.division.id).or_default().push(team);
    }
    groups
}

/// Names of the teams in division `division_id`, in feed order.
pub fn team_names_in_division(teams: &[Team], division_id: i64) -> Vec<&str> {
    group_by_division(teams)
        .remove(&division_id)
        .unwrap_or_default()
        .into_iter()
        .map(|team| team.name.as_str())
        .collect()
}

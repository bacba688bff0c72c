use crate::models::{Club, Game, League, Season};
use crate::publish::{Failures, Page};

use anyhow::Result;
use std::collections::HashSet;
use tracing::debug;

/// Derived pages that depend on game records.
pub trait Regenerate {
    fn club_index(&self, club: &Club, season: &Season) -> Result<()>;
    fn league_index(&self, league: &League) -> Result<()>;
    fn site_index(&self) -> Result<()>;
}

/// Pages made stale by the games added or edited during one workflow run.
#[derive(Debug, Default)]
pub struct DirtySet {
    clubs: HashSet<(Club, Season)>,
    leagues: HashSet<League>,
}

impl DirtySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, game: &Game) {
        self.clubs.insert((game.home.clone(), game.season.clone()));
        self.clubs.insert((game.away.clone(), game.season.clone()));
        self.leagues.insert(game.season.league.clone());
    }

    pub fn clubs(&self) -> &HashSet<(Club, Season)> {
        &self.clubs
    }

    pub fn leagues(&self) -> &HashSet<League> {
        &self.leagues
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty() && self.leagues.is_empty()
    }

    /// Regenerates every stale club and league index, then the site index
    /// exactly once. A failing page does not stop the remaining ones.
    pub fn drain(self, regen: &impl Regenerate) -> Failures {
        debug!(
            clubs = self.clubs.len(),
            leagues = self.leagues.len(),
            "regenerating dirty pages"
        );

        let mut failures = Failures::default();
        for (club, season) in &self.clubs {
            failures.record(
                Page::club_index(club, season),
                regen.club_index(club, season),
            );
        }
        for league in &self.leagues {
            failures.record(Page::league_index(league), regen.league_index(league));
        }
        failures.record(Page::SiteIndex, regen.site_index());
        failures
    }
}

use crate::dirty::Regenerate;
use crate::models::{Club, Game, League, Season};
use crate::repository::{GameFilter, Repository, SeasonFilter};
use crate::site::DocumentGenerator;

use anyhow::{Result, bail};
use std::fmt;
use tracing::{error, info};

/// League and site indices show this many of the most recent games.
pub const RECENT_GAMES: i64 = 20;

/// A generated artifact, named for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Game(i32),
    ClubIndex {
        league: String,
        year: i32,
        season_type: String,
        club_id: i32,
    },
    LeagueIndex(String),
    SiteIndex,
    ClubSidebar {
        league: String,
        club_id: i32,
    },
    LeagueSidebar(String),
    IndexSidebar,
}

impl Page {
    pub fn club_index(club: &Club, season: &Season) -> Self {
        Page::ClubIndex {
            league: season.league.code.clone(),
            year: season.year,
            season_type: season.season_type.clone(),
            club_id: club.id,
        }
    }

    pub fn league_index(league: &League) -> Self {
        Page::LeagueIndex(league.code.clone())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Game(id) => write!(f, "game {id}"),
            Page::ClubIndex {
                league,
                year,
                season_type,
                club_id,
            } => write!(f, "club {club_id} index for {year} {league} {season_type}"),
            Page::LeagueIndex(league) => write!(f, "{league} index"),
            Page::SiteIndex => write!(f, "site index"),
            Page::ClubSidebar { league, club_id } => {
                write!(f, "club {club_id} sidebar for {league}")
            }
            Page::LeagueSidebar(league) => write!(f, "{league} sidebar"),
            Page::IndexSidebar => write!(f, "index sidebar"),
        }
    }
}

/// Pages that failed to regenerate during one action.
#[derive(Debug, Default)]
pub struct Failures {
    pages: Vec<Page>,
}

impl Failures {
    /// Logs and keeps `page` when `result` is an error.
    pub fn record(&mut self, page: Page, result: Result<()>) {
        if let Err(e) = result {
            error!(%page, "failed to regenerate: {e:#}");
            self.pages.push(page);
        }
    }

    pub fn append(&mut self, mut other: Failures) {
        self.pages.append(&mut other.pages);
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn into_result(self) -> Result<()> {
        if self.pages.is_empty() {
            return Ok(());
        }
        bail!("{} page(s) failed to regenerate", self.pages.len())
    }
}

/// Reads records from the store and hands them to the document generator.
///
/// The bulk operations return `Err` only when the records that decide
/// which pages exist cannot be read; a page that fails to build is
/// recorded in the returned [`Failures`] and the rest are still built.
pub struct Publisher<'a> {
    repo: &'a Repository,
    docs: &'a DocumentGenerator,
}

impl<'a> Publisher<'a> {
    pub fn new(repo: &'a Repository, docs: &'a DocumentGenerator) -> Self {
        Self { repo, docs }
    }

    pub fn game_page(&self, game: &Game) -> Result<()> {
        let resources = self.repo.resources(game)?;
        self.docs.game_page(game, &resources)
    }

    pub fn index_sidebar(&self) -> Result<()> {
        let leagues = self.repo.leagues()?;
        self.docs.index_sidebar(&leagues)
    }

    pub fn league_sidebar(&self, league: &League) -> Result<()> {
        let season = self.repo.active_season(league)?;
        let clubs = self.repo.clubs_by_league(league, true)?;
        self.docs.league_sidebar(league, &season, &clubs)
    }

    pub fn club_sidebar(&self, club: &Club, league: &League) -> Result<()> {
        let seasons = self
            .repo
            .seasons(&SeasonFilter::new().league(league).club(club))?;
        self.docs.club_sidebar(club, league, &seasons)
    }

    pub fn sidebars(&self) -> Result<Failures> {
        let mut failures = Failures::default();
        failures.record(Page::IndexSidebar, self.index_sidebar());

        for league in self.repo.leagues()? {
            failures.record(
                Page::LeagueSidebar(league.code.clone()),
                self.league_sidebar(&league),
            );
            for club in self.repo.clubs_by_league(&league, false)? {
                failures.record(
                    Page::ClubSidebar {
                        league: league.code.clone(),
                        club_id: club.id,
                    },
                    self.club_sidebar(&club, &league),
                );
            }
        }

        info!(failed = failures.len(), "generated sidebars");
        Ok(failures)
    }

    pub fn indices(&self) -> Result<Failures> {
        let mut failures = Failures::default();

        for league in self.repo.leagues()? {
            for season in self.repo.seasons(&SeasonFilter::new().league(&league))? {
                for club in self.repo.clubs_by_season(&season)? {
                    failures.record(
                        Page::club_index(&club, &season),
                        self.club_index(&club, &season),
                    );
                }
            }
            failures.record(Page::league_index(&league), self.league_index(&league));
        }
        failures.record(Page::SiteIndex, self.site_index());

        info!(failed = failures.len(), "generated indices");
        Ok(failures)
    }

    /// Every game page, then every sidebar, then every index.
    pub fn site(&self) -> Result<Failures> {
        let mut failures = Failures::default();

        let games = self.repo.games(&GameFilter::new())?;
        for game in &games {
            failures.record(Page::Game(game.id), self.game_page(game));
        }
        info!(games = games.len(), "generated game pages");

        failures.append(self.sidebars()?);
        failures.append(self.indices()?);
        Ok(failures)
    }
}

impl Regenerate for Publisher<'_> {
    fn club_index(&self, club: &Club, season: &Season) -> Result<()> {
        let games = self
            .repo
            .games(&GameFilter::new().club(club).season(season))?;
        self.docs.club_index(club, season, &games)
    }

    fn league_index(&self, league: &League) -> Result<()> {
        let games = self
            .repo
            .games(&GameFilter::new().league(league).limit(RECENT_GAMES))?;
        self.docs.league_index(league, &games)
    }

    fn site_index(&self) -> Result<()> {
        let games = self
            .repo
            .games(&GameFilter::new().limit(RECENT_GAMES))?;
        self.docs.index(&games)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_failures_collect_only_errors() {
        let mut failures = Failures::default();
        failures.record(Page::SiteIndex, Ok(()));
        failures.record(Page::Game(3), Err(anyhow::anyhow!("disk full")));
        assert_eq!(failures.pages(), &[Page::Game(3)]);

        let mut more = Failures::default();
        more.record(
            Page::league_index(&fixtures::nfl()),
            Err(anyhow::anyhow!("locked")),
        );
        failures.append(more);
        assert_eq!(failures.len(), 2);

        let err = failures.into_result().unwrap_err();
        assert_eq!(err.to_string(), "2 page(s) failed to regenerate");
    }

    #[test]
    fn test_no_failures_is_ok() {
        assert!(Failures::default().into_result().is_ok());
    }

    #[test]
    fn test_page_names() {
        let game = fixtures::game();
        assert_eq!(
            Page::club_index(&game.home, &game.season).to_string(),
            "club 1 index for 2020 NFL regular"
        );
        assert_eq!(Page::league_index(&game.season.league).to_string(), "NFL index");
        assert_eq!(Page::Game(game.id).to_string(), "game 1");
    }
}

use super::upper;
use crate::models::{Club, League, Season};
use crate::schema::{game_club, game_view, season_club, season_view};

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

/// Optional criteria narrowing a game listing. Every non-empty criterion
/// adds one `IN (..)` clause; clauses are always emitted in the order
/// ids, clubs, seasons, leagues regardless of how the filter was built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    ids: Vec<i32>,
    clubs: Vec<i32>,
    seasons: Vec<i32>,
    leagues: Vec<String>,
    limit: Option<i64>,
}

impl GameFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i32) -> Self {
        self.ids.push(id);
        self
    }

    /// Games in which the club played on either side.
    pub fn club(mut self, club: &Club) -> Self {
        self.clubs.push(club.id);
        self
    }

    pub fn season(mut self, season: &Season) -> Self {
        self.seasons.push(season.id);
        self
    }

    pub fn league(self, league: &League) -> Self {
        self.league_code(&league.code)
    }

    pub fn league_code(mut self, code: &str) -> Self {
        self.leagues.push(code.to_uppercase());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of values bound by the criteria, the limit excluded.
    pub fn bind_count(&self) -> usize {
        self.ids.len() + self.clubs.len() + self.seasons.len() + self.leagues.len()
    }

    /// Most recent first: date descending, then id descending.
    pub fn query(&self) -> game_view::BoxedQuery<'static, Sqlite> {
        let mut query = game_view::table.into_boxed();

        if !self.ids.is_empty() {
            query = query.filter(game_view::game_id.eq_any(self.ids.clone()));
        }

        if !self.clubs.is_empty() {
            let played = game_club::table
                .filter(game_club::club_id.eq_any(self.clubs.clone()))
                .select(game_club::game_id);
            query = query.filter(game_view::game_id.eq_any(played));
        }

        if !self.seasons.is_empty() {
            query = query.filter(game_view::season_id.eq_any(self.seasons.clone()));
        }

        if !self.leagues.is_empty() {
            query = query.filter(upper(game_view::league_code).eq_any(self.leagues.clone()));
        }

        query = query.order((game_view::game_date.desc(), game_view::game_id.desc()));

        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        query
    }
}

/// Season listing narrowed to one league and/or the seasons one club
/// belonged to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonFilter {
    league: Option<String>,
    club: Option<i32>,
    limit: Option<i64>,
}

impl SeasonFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn league(mut self, league: &League) -> Self {
        self.league = Some(league.code.to_uppercase());
        self
    }

    pub fn club(mut self, club: &Club) -> Self {
        self.club = Some(club.id);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Chronological: start year ascending, then id descending.
    pub fn query(&self) -> season_view::BoxedQuery<'static, Sqlite> {
        let mut query = season_view::table.into_boxed();

        if let Some(code) = &self.league {
            query = query.filter(upper(season_view::league_code).eq(code.clone()));
        }

        if let Some(club_id) = self.club {
            let member_of = season_club::table
                .filter(season_club::club_id.eq(club_id))
                .select(season_club::season_id);
            query = query.filter(season_view::season_id.eq_any(member_of));
        }

        query = query.order((season_view::start_year.asc(), season_view::season_id.desc()));

        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        query
    }
}

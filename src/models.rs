use chrono::NaiveDate;
use diesel::{Insertable, Queryable, Selectable};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Queryable)]
pub struct League {
    pub sport: String,
    pub code: String,
    pub name: String,
}

impl League {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.sport)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Season {
    pub id: i32,
    pub league: League,
    pub year: i32,
    pub season_type: String,
    pub exhibition: bool,
}

/// A club incarnation. `id` is shared by every iteration of the same
/// franchise; `(id, iteration)` identifies one incarnation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Queryable)]
pub struct Club {
    pub id: i32,
    pub iteration: i32,
    pub represents: String,
    pub nickname: String,
}

impl Club {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.represents, self.nickname)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i32,
    pub season: Season,
    pub date: NaiveDate,
    pub title: String,
    pub venue: String,
    pub home: Club,
    pub home_score: i32,
    pub away: Club,
    pub away_score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name=crate::schema::resource)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Resource {
    #[diesel(column_name = resource_id)]
    pub id: i32,
    pub title: String,
    pub url: String,
}

/// Everything needed to record a played game.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub season: Season,
    pub date: NaiveDate,
    pub home: Club,
    pub home_score: i32,
    pub away: Club,
    pub away_score: i32,
    pub title: String,
    pub venue: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name=crate::schema::season_view)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SeasonRow {
    pub season_id: i32,
    pub sport_name: String,
    pub league_code: String,
    pub league_name: String,
    pub start_year: i32,
    pub season_type: String,
    pub exhibition: bool,
}

impl From<SeasonRow> for Season {
    fn from(row: SeasonRow) -> Self {
        Season {
            id: row.season_id,
            league: League {
                sport: row.sport_name,
                code: row.league_code,
                name: row.league_name,
            },
            year: row.start_year,
            season_type: row.season_type,
            exhibition: row.exhibition,
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name=crate::schema::game_view)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRow {
    pub game_id: i32,
    pub season_id: i32,
    pub sport_name: String,
    pub league_code: String,
    pub league_name: String,
    pub start_year: i32,
    pub season_type: String,
    pub exhibition: bool,
    pub game_date: NaiveDate,
    pub title: String,
    pub venue: String,
    pub home_id: i32,
    pub home_iteration: i32,
    pub home_represents: String,
    pub home_nickname: String,
    pub home_score: i32,
    pub away_id: i32,
    pub away_iteration: i32,
    pub away_represents: String,
    pub away_nickname: String,
    pub away_score: i32,
}

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        Game {
            id: row.game_id,
            season: Season {
                id: row.season_id,
                league: League {
                    sport: row.sport_name,
                    code: row.league_code,
                    name: row.league_name,
                },
                year: row.start_year,
                season_type: row.season_type,
                exhibition: row.exhibition,
            },
            date: row.game_date,
            title: row.title,
            venue: row.venue,
            home: Club {
                id: row.home_id,
                iteration: row.home_iteration,
                represents: row.home_represents,
                nickname: row.home_nickname,
            },
            home_score: row.home_score,
            away: Club {
                id: row.away_id,
                iteration: row.away_iteration,
                represents: row.away_represents,
                nickname: row.away_nickname,
            },
            away_score: row.away_score,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name=crate::schema::game)]
pub struct GameInsert<'a> {
    pub season_id: i32,
    pub game_date: NaiveDate,
    pub title: Option<&'a str>,
    pub venue: Option<&'a str>,
}

#[derive(Insertable)]
#[diesel(table_name=crate::schema::game_club)]
pub struct GameClubInsert {
    pub game_id: i32,
    pub club_id: i32,
    pub club_iteration: i32,
    pub home: bool,
    pub score: i32,
}

#[derive(Insertable)]
#[diesel(table_name=crate::schema::resource)]
pub struct ResourceInsert<'a> {
    pub game_id: i32,
    pub title: &'a str,
    pub url: &'a str,
}

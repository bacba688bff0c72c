//! Site-relative locations of every generated artifact.

use crate::models::{Club, Game, League, Season};

pub fn game_path(game: &Game) -> String {
    format!(
        "/{}/{}/{}/games/{}.html",
        game.season.league.code, game.season.year, game.season.season_type, game.id
    )
}

pub fn club_path(club: &Club, season: &Season) -> String {
    format!(
        "/{}/{}/{}/teams/{}.html",
        season.league.code, season.year, season.season_type, club.id
    )
}

pub fn league_path(league: &League) -> String {
    format!("/{}/index.html", league.code)
}

pub fn index_path() -> &'static str {
    "/index.html"
}

// Sidebars are relative to the template directory.

pub fn club_sidebar_path(club: &Club, league: &League) -> String {
    format!("sidebar/{}/{}.tmpl", league.code, club.id)
}

pub fn league_sidebar_path(league: &League) -> String {
    format!("sidebar/{}/index.tmpl", league.code)
}

pub fn index_sidebar_path() -> &'static str {
    "sidebar/index.tmpl"
}

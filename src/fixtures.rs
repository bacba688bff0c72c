use crate::models::{Club, Game, League, Season};
use chrono::NaiveDate;

pub fn nfl() -> League {
    League {
        sport: "Football".to_string(),
        code: "NFL".to_string(),
        name: "National Football League".to_string(),
    }
}

pub fn cfl() -> League {
    League {
        sport: "Football".to_string(),
        code: "CFL".to_string(),
        name: "Canadian Football League".to_string(),
    }
}

pub fn season(id: i32, league: &League, year: i32) -> Season {
    Season {
        id,
        league: league.clone(),
        year,
        season_type: "regular".to_string(),
        exhibition: false,
    }
}

pub fn preseason(id: i32, league: &League, year: i32) -> Season {
    Season {
        season_type: "preseason".to_string(),
        exhibition: true,
        ..season(id, league, year)
    }
}

pub fn club(id: i32, represents: &str, nickname: &str) -> Club {
    Club {
        id,
        iteration: 1,
        represents: represents.to_string(),
        nickname: nickname.to_string(),
    }
}

pub fn bears() -> Club {
    club(1, "Chicago", "Bears")
}

pub fn packers() -> Club {
    club(2, "Green Bay", "Packers")
}

pub fn lions() -> Club {
    club(3, "Detroit", "Lions")
}

pub fn game_between(id: i32, season: &Season, home: &Club, away: &Club) -> Game {
    Game {
        id,
        season: season.clone(),
        date: NaiveDate::from_ymd_opt(2020, 9, 13).unwrap(),
        title: "Week 1".to_string(),
        venue: "Soldier Field".to_string(),
        home: home.clone(),
        home_score: 27,
        away: away.clone(),
        away_score: 23,
    }
}

/// Chicago hosts Green Bay in the 2020 NFL regular season.
pub fn game() -> Game {
    game_between(1, &season(2, &nfl(), 2020), &bears(), &packers())
}

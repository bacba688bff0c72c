#![allow(dead_code)]

use chrono::NaiveDate;
use diesel::connection::SimpleConnection;
use recap::Repository;
use recap::models::{Game, NewGame, Season};
use recap::repository::SeasonFilter;
use recap::site::DocumentGenerator;
use std::fs;
use std::path::PathBuf;

pub const SEED: &str = r#"
INSERT INTO sport (sport_id, sport_name) VALUES (1, 'Football');

INSERT INTO league (league_code, sport_id, league_name) VALUES
    ('NFL', 1, 'National Football League'),
    ('CFL', 1, 'Canadian Football League');

INSERT INTO season (season_id, league_code, start_year, season_type, exhibition) VALUES
    (1, 'NFL', 2019, 'regular', 0),
    (2, 'NFL', 2020, 'regular', 0),
    (3, 'NFL', 2020, 'preseason', 1),
    (4, 'CFL', 2020, 'regular', 0);

INSERT INTO active_league_season (league_code, season_id) VALUES
    ('NFL', 2),
    ('CFL', 4);

INSERT INTO club (club_id, club_iteration, represents, nickname) VALUES
    (1, 1, 'Chicago', 'Bears'),
    (2, 1, 'Green Bay', 'Packers'),
    (3, 1, 'Detroit', 'Lions'),
    (4, 1, 'Toronto', 'Argonauts'),
    (5, 1, 'Oakland', 'Raiders'),
    (5, 2, 'Las Vegas', 'Raiders');

INSERT INTO season_club (season_id, club_id, club_iteration) VALUES
    (1, 1, 1), (1, 2, 1), (1, 3, 1), (1, 5, 1),
    (2, 1, 1), (2, 2, 1), (2, 3, 1), (2, 5, 2),
    (3, 1, 1), (3, 2, 1),
    (4, 4, 1);
"#;

/// A fresh directory under the OS temp dir, unique per test name.
pub fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("recap-test-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn empty_repo(name: &str) -> Repository {
    let db = scratch(name).join("recap.db");
    Repository::new(db.to_str().unwrap()).unwrap()
}

pub fn seeded_repo(name: &str) -> Repository {
    let repo = empty_repo(name);
    execute(&repo, SEED);
    repo
}

pub fn execute(repo: &Repository, sql: &str) {
    repo.conn().unwrap().batch_execute(sql).unwrap();
}

pub fn docs(name: &str) -> DocumentGenerator {
    let root = scratch(&format!("{name}-site"));
    DocumentGenerator::new(root.join("www"), root.join("templates"))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn season(repo: &Repository, id: i32) -> Season {
    repo.seasons(&SeasonFilter::new())
        .unwrap()
        .into_iter()
        .find(|s| s.id == id)
        .unwrap()
}

pub fn new_game(repo: &Repository, season_id: i32, home: i32, away: i32, date: NaiveDate) -> NewGame {
    let season = season(repo, season_id);
    let clubs = repo.clubs_by_season(&season).unwrap();
    let club = |id: i32| clubs.iter().find(|c| c.id == id).unwrap().clone();

    NewGame {
        home: club(home),
        away: club(away),
        season,
        date,
        home_score: 21,
        away_score: 14,
        title: String::new(),
        venue: String::new(),
    }
}

pub fn add_game(repo: &Repository, season_id: i32, home: i32, away: i32, date: NaiveDate) -> Game {
    repo.create_game(&new_game(repo, season_id, home, away, date))
        .unwrap()
}

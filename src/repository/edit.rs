use crate::models::Game;
use crate::schema::{game, game_club};

use anyhow::{Result, bail};
use chrono::NaiveDate;
use diesel::prelude::*;

/// A partial update of a game. Unset fields are never written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameEdit {
    date: Option<NaiveDate>,
    title: Option<String>,
    venue: Option<String>,
    home_score: Option<i32>,
    away_score: Option<i32>,
}

impl GameEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    /// An empty title is a real value, distinct from leaving it unset.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_venue(&mut self, venue: impl Into<String>) {
        self.venue = Some(venue.into());
    }

    pub fn set_home_score(&mut self, score: i32) {
        self.home_score = Some(score);
    }

    pub fn set_away_score(&mut self, score: i32) {
        self.away_score = Some(score);
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.title.is_none()
            && self.venue.is_none()
            && self.home_score.is_none()
            && self.away_score.is_none()
    }

    /// Plans the statements needed for this edit of `game`: at most one
    /// update of the game row, then one per changed score.
    pub fn compile(&self, game: &Game) -> Vec<Mutation> {
        let mut mutations = Vec::with_capacity(3);

        let changes = GameChanges {
            game_date: self.date,
            title: self.title.clone(),
            venue: self.venue.clone(),
        };
        if !changes.is_empty() {
            mutations.push(Mutation::Game {
                game_id: game.id,
                changes,
            });
        }

        if let Some(score) = self.home_score {
            mutations.push(Mutation::Score {
                game_id: game.id,
                club_id: game.home.id,
                score,
            });
        }

        if let Some(score) = self.away_score {
            mutations.push(Mutation::Score {
                game_id: game.id,
                club_id: game.away.id,
                score,
            });
        }

        mutations
    }
}

#[derive(Debug, Clone, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = game)]
pub struct GameChanges {
    pub game_date: Option<NaiveDate>,
    pub title: Option<String>,
    pub venue: Option<String>,
}

impl GameChanges {
    fn is_empty(&self) -> bool {
        self.game_date.is_none() && self.title.is_none() && self.venue.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Game {
        game_id: i32,
        changes: GameChanges,
    },
    Score {
        game_id: i32,
        club_id: i32,
        score: i32,
    },
}

impl Mutation {
    /// Runs one planned statement. Callers own the transaction.
    pub fn apply(&self, conn: &mut SqliteConnection) -> Result<()> {
        match self {
            Mutation::Game { game_id, changes } => {
                let updated = diesel::update(game::table.find(*game_id))
                    .set(changes)
                    .execute(conn)?;
                if updated == 0 {
                    bail!("game {game_id} does not exist");
                }
            }
            Mutation::Score {
                game_id,
                club_id,
                score,
            } => {
                let updated = diesel::update(game_club::table.find((*game_id, *club_id)))
                    .set(game_club::score.eq(*score))
                    .execute(conn)?;
                if updated == 0 {
                    bail!("club {club_id} did not play in game {game_id}");
                }
            }
        }
        Ok(())
    }
}

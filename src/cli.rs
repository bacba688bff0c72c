use crate::dirty::DirtySet;
use crate::models::{Club, Game, NewGame};
use crate::prompt::Prompter;
use crate::publish::{Failures, Page, Publisher};
use crate::repository::{GameEdit, Repository, SeasonFilter};
use crate::site::DocumentGenerator;

use anyhow::Result;
use clap::ValueEnum;
use std::io::{BufRead, Write};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    AddGame,
    EditGame,
    GenerateSidebars,
    GenerateIndices,
    GenerateSite,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::AddGame,
        Action::EditGame,
        Action::GenerateSidebars,
        Action::GenerateIndices,
        Action::GenerateSite,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::AddGame => "Add game",
            Action::EditGame => "Edit game",
            Action::GenerateSidebars => "Generate sidebars",
            Action::GenerateIndices => "Generate indices",
            Action::GenerateSite => "Generate site",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Date,
    Title,
    Venue,
    HomeScore,
    AwayScore,
    Resources,
}

impl Field {
    const ALL: [Field; 6] = [
        Field::Date,
        Field::Title,
        Field::Venue,
        Field::HomeScore,
        Field::AwayScore,
        Field::Resources,
    ];

    fn label(self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::Title => "Title",
            Field::Venue => "Venue",
            Field::HomeScore => "Home Score",
            Field::AwayScore => "Away Score",
            Field::Resources => "Resources",
        }
    }
}

/// The interactive front end: one action per run.
pub struct App<'a, R, W> {
    repo: &'a Repository,
    docs: &'a DocumentGenerator,
    prompt: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> App<'a, R, W> {
    pub fn new(repo: &'a Repository, docs: &'a DocumentGenerator, prompt: Prompter<R, W>) -> Self {
        Self { repo, docs, prompt }
    }

    pub fn into_prompt(self) -> Prompter<R, W> {
        self.prompt
    }

    fn publisher(&self) -> Publisher<'a> {
        Publisher::new(self.repo, self.docs)
    }

    /// Runs `action`, or asks for one from the menu.
    pub fn run(&mut self, action: Option<Action>) -> Result<()> {
        let action = match action {
            Some(action) => action,
            None => {
                let labels = Action::ALL.map(Action::label);
                Action::ALL[self.prompt.choose(&labels)?]
            }
        };
        info!(action = action.label(), "starting");

        let failures = match action {
            Action::AddGame => self.add_game()?,
            Action::EditGame => self.edit_game()?,
            Action::GenerateSidebars => self.publisher().sidebars()?,
            Action::GenerateIndices => self.publisher().indices()?,
            Action::GenerateSite => self.publisher().site()?,
        };
        failures.into_result()
    }

    fn add_game(&mut self) -> Result<Failures> {
        let mut dirty = DirtySet::new();
        let mut failures = Failures::default();
        let batch = self.add_batch(&mut dirty, &mut failures);
        self.finish(batch, dirty, failures)
    }

    fn add_batch(&mut self, dirty: &mut DirtySet, failures: &mut Failures) -> Result<()> {
        while let Some(game) = self.add_one()? {
            dirty.mark(&game);
            let resources = self.add_resources(&game);
            failures.record(Page::Game(game.id), self.publisher().game_page(&game));
            resources?;
            if !self.prompt.confirm("Add another game")? {
                break;
            }
        }
        Ok(())
    }

    /// Drains the batch's dirty pages, even when the batch stopped on an
    /// error, so records it already committed are never left stale.
    fn finish(&self, batch: Result<()>, dirty: DirtySet, mut failures: Failures) -> Result<Failures> {
        if let Err(e) = batch {
            if !dirty.is_empty() {
                failures.append(dirty.drain(&self.publisher()));
            }
            return Err(e);
        }
        failures.append(dirty.drain(&self.publisher()));
        Ok(failures)
    }

    /// Returns `None` when there is nothing left to pick from.
    fn add_one(&mut self) -> Result<Option<Game>> {
        let leagues = self.repo.leagues()?;
        if leagues.is_empty() {
            self.prompt.say("No leagues")?;
            return Ok(None);
        }
        self.prompt.say("Select league:")?;
        let names: Vec<_> = leagues.iter().map(|l| l.display_name()).collect();
        let league = &leagues[self.prompt.choose(&names)?];

        let seasons = self.repo.seasons(&SeasonFilter::new().league(league))?;
        if seasons.is_empty() {
            self.prompt.say("No seasons")?;
            return Ok(None);
        }
        self.prompt.say("Select season:")?;
        let names: Vec<_> = seasons
            .iter()
            .map(|s| format!("{} {}", s.year, s.season_type))
            .collect();
        let season = seasons[self.prompt.choose(&names)?].clone();

        let clubs = self.repo.clubs_by_season(&season)?;
        if clubs.is_empty() {
            self.prompt.say("No clubs")?;
            return Ok(None);
        }
        self.prompt.say("Select home team:")?;
        let home = self.pick_club(&clubs)?;
        let away = loop {
            self.prompt.say("Select away team:")?;
            let away = self.pick_club(&clubs)?;
            if away.id != home.id {
                break away;
            }
            self.prompt.say("A team cannot play itself")?;
        };

        let date = self.prompt.date()?;
        let home_score = self.prompt.score("home score")?;
        let away_score = self.prompt.score("away score")?;
        let title = self.prompt.string("title", 0, 128)?;
        let venue = self.prompt.string("venue", 0, 128)?;

        let game = self.repo.create_game(&NewGame {
            season,
            date,
            home,
            home_score,
            away,
            away_score,
            title,
            venue,
        })?;
        self.prompt.say(format!("Added game {}", game.id))?;
        Ok(Some(game))
    }

    fn add_resources(&mut self, game: &Game) -> Result<()> {
        while self.prompt.confirm("Add a resource")? {
            let title = self.prompt.string("title", 1, 128)?;
            let url = self.prompt.string("url", 1, 256)?;
            self.repo.create_resource(game, &title, &url)?;
        }
        Ok(())
    }

    fn pick_club(&mut self, clubs: &[Club]) -> Result<Club> {
        let names: Vec<_> = clubs.iter().map(|c| c.display_name()).collect();
        Ok(clubs[self.prompt.choose(&names)?].clone())
    }

    fn edit_game(&mut self) -> Result<Failures> {
        let mut dirty = DirtySet::new();
        let mut failures = Failures::default();
        let batch = self.edit_batch(&mut dirty, &mut failures);
        self.finish(batch, dirty, failures)
    }

    fn edit_batch(&mut self, dirty: &mut DirtySet, failures: &mut Failures) -> Result<()> {
        loop {
            let game = self.pick_game()?;
            // resource changes commit before the edit does
            dirty.mark(&game);

            let edited = self.edit_one(&game);
            let current = edited.as_ref().unwrap_or(&game);
            failures.record(Page::Game(game.id), self.publisher().game_page(current));
            edited?;

            if !self.prompt.confirm("Edit another game")? {
                break;
            }
        }
        Ok(())
    }

    fn pick_game(&mut self) -> Result<Game> {
        loop {
            let id = self.prompt.int("game ID")?;
            match self.repo.find_game(id)? {
                Some(game) => return Ok(game),
                None => self.prompt.say(format!("No game {id}"))?,
            }
        }
    }

    fn edit_one(&mut self, game: &Game) -> Result<Game> {
        self.show(game)?;

        let labels = Field::ALL.map(Field::label);
        let mut edit = GameEdit::new();
        loop {
            self.prompt.say("Select field:")?;
            match Field::ALL[self.prompt.choose(&labels)?] {
                Field::Date => edit.set_date(self.prompt.date()?),
                Field::Title => edit.set_title(self.prompt.string("title", 0, 128)?),
                Field::Venue => edit.set_venue(self.prompt.string("venue", 0, 128)?),
                Field::HomeScore => edit.set_home_score(self.prompt.score("home score")?),
                Field::AwayScore => edit.set_away_score(self.prompt.score("away score")?),
                Field::Resources => self.edit_resources(game)?,
            }
            if !self.prompt.confirm("Continue editing")? {
                break;
            }
        }

        if edit.is_empty() {
            self.prompt.say("Game fields unchanged")?;
        }
        self.repo.edit_game(game, &edit)
    }

    fn show(&mut self, game: &Game) -> Result<()> {
        self.prompt.say(format!("Game: {}", game.id))?;
        self.prompt.say(format!("Home: {}", game.home.display_name()))?;
        self.prompt.say(format!("Away: {}", game.away.display_name()))?;
        self.prompt.say(format!("Date: {}", game.date))?;
        self.prompt.say(format!("Title: {}", game.title))?;
        self.prompt.say(format!("Venue: {}", game.venue))?;
        self.prompt.say(format!("Home Score: {}", game.home_score))?;
        self.prompt.say(format!("Away Score: {}", game.away_score))
    }

    /// Resource changes are not part of the game edit and apply at once.
    fn edit_resources(&mut self, game: &Game) -> Result<()> {
        match self.prompt.choose(&["Add Resource", "Delete Resource"])? {
            0 => {
                let title = self.prompt.string("title", 1, 128)?;
                let url = self.prompt.string("url", 1, 256)?;
                self.repo.create_resource(game, &title, &url)?;
            }
            _ => {
                let resources = self.repo.resources(game)?;
                if resources.is_empty() {
                    return self.prompt.say("No resources to delete");
                }
                let names: Vec<_> = resources
                    .iter()
                    .map(|r| format!("Title: {}\tURL: {}", r.title, r.url))
                    .collect();
                self.prompt.say("Select resource to delete:")?;
                let res = &resources[self.prompt.choose(&names)?];
                self.repo.delete_resource(res)?;
            }
        }
        Ok(())
    }
}

mod edit;
mod filter;

pub use edit::{GameChanges, GameEdit, Mutation};
pub use filter::{GameFilter, SeasonFilter};

use crate::models::{
    self, Club, Game, GameClubInsert, GameInsert, League, NewGame, Resource, ResourceInsert,
    Season,
};
use crate::schema;

use anyhow::{Context, Result, anyhow, bail};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sql_types::Text;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

diesel::define_sql_function! {
    /// League codes are stored upper-case; every code comparison goes through this.
    fn upper(x: Text) -> Text;
}

#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub struct Repository {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl Repository {
    /// Opens (creating if needed) the database and applies pending migrations.
    pub fn new(database_url: &str) -> Result<Self> {
        let mgr = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .connection_customizer(Box::new(ConnectionOptions))
            .build(mgr)
            .with_context(|| format!("failed to connect db {database_url}"))?;

        let repo = Self { pool };
        repo.migrate()?;
        Ok(repo)
    }

    fn migrate(&self) -> Result<()> {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow!(e))
            .context("failed to migrate db")?;
        for version in applied {
            info!(%version, "applied migration");
        }
        Ok(())
    }

    pub fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        Ok(self.pool.get()?)
    }

    pub fn leagues(&self) -> Result<Vec<League>> {
        use schema::{league, sport};

        let mut conn = self.conn()?;
        let leagues = league::table
            .inner_join(sport::table)
            .select((sport::sport_name, league::league_code, league::league_name))
            .order(league::league_code.asc())
            .load::<League>(&mut conn)
            .context("failed to load leagues")?;
        Ok(leagues)
    }

    pub fn league(&self, code: &str) -> Result<League> {
        use schema::{league, sport};

        let mut conn = self.conn()?;
        league::table
            .inner_join(sport::table)
            .filter(league::league_code.eq(upper(code)))
            .select((sport::sport_name, league::league_code, league::league_name))
            .first::<League>(&mut conn)
            .with_context(|| format!("failed to load league {code}"))
    }

    pub fn seasons(&self, filter: &SeasonFilter) -> Result<Vec<Season>> {
        let mut conn = self.conn()?;
        let rows = filter
            .query()
            .load::<models::SeasonRow>(&mut conn)
            .context("failed to load seasons")?;
        Ok(rows.into_iter().map(Season::from).collect())
    }

    pub fn active_season(&self, league: &League) -> Result<Season> {
        use schema::{active_league_season, season_view};

        let mut conn = self.conn()?;
        let active = active_league_season::table
            .filter(active_league_season::league_code.eq(upper(league.code.as_str())))
            .select(active_league_season::season_id);

        let row = season_view::table
            .filter(season_view::season_id.eq_any(active))
            .first::<models::SeasonRow>(&mut conn)
            .with_context(|| format!("failed to load active season of {}", league.code))?;
        Ok(row.into())
    }

    /// Clubs of the league's active season when `active`, otherwise every
    /// club that ever played in the league at its latest iteration.
    pub fn clubs_by_league(&self, league: &League, active: bool) -> Result<Vec<Club>> {
        use schema::{active_league_club_view as alc, season_club_view as scv};

        let mut conn = self.conn()?;
        let code = league.code.as_str();

        if active {
            return alc::table
                .filter(alc::league_code.eq(upper(code)))
                .select((alc::club_id, alc::club_iteration, alc::represents, alc::nickname))
                .order((alc::represents.asc(), alc::nickname.asc()))
                .load::<Club>(&mut conn)
                .with_context(|| format!("failed to load active clubs of {code}"));
        }

        let mut clubs = scv::table
            .filter(scv::league_code.eq(upper(code)))
            .select((scv::club_id, scv::club_iteration, scv::represents, scv::nickname))
            .order((scv::club_id.asc(), scv::club_iteration.desc()))
            .load::<Club>(&mut conn)
            .with_context(|| format!("failed to load clubs of {code}"))?;
        clubs.dedup_by_key(|club| club.id);
        Ok(clubs)
    }

    pub fn clubs_by_season(&self, season: &Season) -> Result<Vec<Club>> {
        use schema::season_club_view as scv;

        let mut conn = self.conn()?;
        scv::table
            .filter(scv::season_id.eq(season.id))
            .select((scv::club_id, scv::club_iteration, scv::represents, scv::nickname))
            .order((scv::represents.asc(), scv::nickname.asc()))
            .load::<Club>(&mut conn)
            .with_context(|| format!("failed to load clubs of season {}", season.id))
    }

    pub fn game(&self, id: i32) -> Result<Game> {
        self.find_game(id)?
            .with_context(|| format!("game {id} does not exist"))
    }

    /// Like [`Repository::game`], but a missing game is `None`.
    pub fn find_game(&self, id: i32) -> Result<Option<Game>> {
        use schema::game_view;

        let mut conn = self.conn()?;
        let row = game_view::table
            .find(id)
            .first::<models::GameRow>(&mut conn)
            .optional()
            .with_context(|| format!("failed to load game {id}"))?;
        Ok(row.map(Game::from))
    }

    pub fn games(&self, filter: &GameFilter) -> Result<Vec<Game>> {
        let mut conn = self.conn()?;
        let rows = filter
            .query()
            .load::<models::GameRow>(&mut conn)
            .context("failed to load games")?;
        Ok(rows.into_iter().map(Game::from).collect())
    }

    /// Records a game and both participant rows in one transaction.
    pub fn create_game(&self, new: &NewGame) -> Result<Game> {
        use schema::{game, game_club, season_club};

        if new.home.id == new.away.id {
            bail!("{} cannot play itself", new.home.display_name());
        }

        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;

        let id = conn
            .transaction::<_, anyhow::Error, _>(|conn| {
                for club in [&new.home, &new.away] {
                    let members: i64 = season_club::table
                        .filter(season_club::season_id.eq(new.season.id))
                        .filter(season_club::club_id.eq(club.id))
                        .filter(season_club::club_iteration.eq(club.iteration))
                        .count()
                        .get_result(conn)?;
                    if members == 0 {
                        bail!(
                            "{} is not a member of the {} {} {} season",
                            club.display_name(),
                            new.season.year,
                            new.season.league.code,
                            new.season.season_type
                        );
                    }
                }

                let game_id: i32 = diesel::insert_into(game::table)
                    .values(&GameInsert {
                        season_id: new.season.id,
                        game_date: new.date,
                        title: Some(new.title.as_str()).filter(|t| !t.is_empty()),
                        venue: Some(new.venue.as_str()).filter(|v| !v.is_empty()),
                    })
                    .returning(game::game_id)
                    .get_result(conn)?;

                let sides = [
                    (&new.home, new.home_score, true),
                    (&new.away, new.away_score, false),
                ];
                for (club, score, home) in sides {
                    diesel::insert_into(game_club::table)
                        .values(&GameClubInsert {
                            game_id,
                            club_id: club.id,
                            club_iteration: club.iteration,
                            home,
                            score,
                        })
                        .execute(conn)?;
                }

                Ok(game_id)
            })
            .context("failed to create game")?;

        info!(game_id = id, "created game");
        self.game(id)
    }

    /// Applies a sparse edit atomically and returns the re-read record.
    pub fn edit_game(&self, game: &Game, edit: &GameEdit) -> Result<Game> {
        let mutations = edit.compile(game);

        {
            let mut pooled = self.conn()?;
            let conn: &mut SqliteConnection = &mut pooled;
            conn.transaction::<_, anyhow::Error, _>(|conn| {
                for mutation in &mutations {
                    mutation.apply(conn)?;
                }
                Ok(())
            })
            .with_context(|| format!("failed to edit game {}", game.id))?;
        }

        debug!(game_id = game.id, mutations = mutations.len(), "edited game");
        self.game(game.id)
    }

    pub fn resources(&self, game: &Game) -> Result<Vec<Resource>> {
        use schema::resource;

        let mut conn = self.conn()?;
        resource::table
            .filter(resource::game_id.eq(game.id))
            .select(Resource::as_select())
            .order(resource::resource_id.asc())
            .load(&mut conn)
            .with_context(|| format!("failed to load resources of game {}", game.id))
    }

    pub fn create_resource(&self, game: &Game, title: &str, url: &str) -> Result<Resource> {
        use schema::resource;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(resource::table)
            .values(&ResourceInsert {
                game_id: game.id,
                title,
                url,
            })
            .returning(Resource::as_returning())
            .get_result(&mut conn)
            .with_context(|| format!("failed to add resource to game {}", game.id))?;

        debug!(game_id = game.id, resource_id = created.id, "created resource");
        Ok(created)
    }

    pub fn delete_resource(&self, res: &Resource) -> Result<()> {
        use schema::resource;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(resource::table.find(res.id))
            .execute(&mut conn)
            .with_context(|| format!("failed to delete resource {}", res.id))?;
        if deleted == 0 {
            bail!("resource {} does not exist", res.id);
        }
        Ok(())
    }
}

pub mod html;
pub mod paths;

use crate::config::AppConfig;
use crate::models::{Club, Game, League, Resource, Season};
use html::{Breadcrumb, IndexPage, Sidebar};

use anyhow::{Context, Result, anyhow};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Writes pages under the static root and sidebar fragments under the
/// template root.
#[derive(Debug, Clone)]
pub struct DocumentGenerator {
    static_path: PathBuf,
    template_path: PathBuf,
}

impl DocumentGenerator {
    pub fn new(static_path: impl Into<PathBuf>, template_path: impl Into<PathBuf>) -> Self {
        Self {
            static_path: static_path.into(),
            template_path: template_path.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.static_dir(), config.template_dir())
    }

    pub fn static_path(&self) -> &Path {
        &self.static_path
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn game_page(&self, game: &Game, resources: &[Resource]) -> Result<()> {
        let mut doc = String::new();
        html::render_game(&mut doc, game, resources)?;
        self.write_page(&paths::game_path(game), &doc)
    }

    pub fn club_index(&self, club: &Club, season: &Season, games: &[Game]) -> Result<()> {
        let sidebar = self.read_sidebar(&paths::club_sidebar_path(club, &season.league))?;
        let page = IndexPage {
            breadcrumb: Breadcrumb::club(season),
            title: club.display_name(),
            subtitle: format!(
                "{} {} {}",
                season.year, season.league.name, season.season_type
            ),
            games,
        };

        let mut doc = String::new();
        html::render_index(&mut doc, &page, &sidebar)?;
        self.write_page(&paths::club_path(club, season), &doc)
    }

    pub fn league_index(&self, league: &League, games: &[Game]) -> Result<()> {
        let sidebar = self.read_sidebar(&paths::league_sidebar_path(league))?;
        let page = IndexPage {
            breadcrumb: Breadcrumb::root(".."),
            title: league.display_name(),
            subtitle: String::new(),
            games,
        };

        let mut doc = String::new();
        html::render_index(&mut doc, &page, &sidebar)?;
        self.write_page(&paths::league_path(league), &doc)
    }

    pub fn index(&self, games: &[Game]) -> Result<()> {
        let sidebar = self.read_sidebar(paths::index_sidebar_path())?;
        let page = IndexPage {
            breadcrumb: Breadcrumb::root("."),
            title: "Recent Games".to_string(),
            subtitle: String::new(),
            games,
        };

        let mut doc = String::new();
        html::render_index(&mut doc, &page, &sidebar)?;
        self.write_page(paths::index_path(), &doc)
    }

    pub fn club_sidebar(&self, club: &Club, league: &League, seasons: &[Season]) -> Result<()> {
        self.write_sidebar(
            &paths::club_sidebar_path(club, league),
            &Sidebar::club(club, seasons),
        )
    }

    pub fn league_sidebar(&self, league: &League, season: &Season, clubs: &[Club]) -> Result<()> {
        self.write_sidebar(
            &paths::league_sidebar_path(league),
            &Sidebar::league(season, clubs),
        )
    }

    pub fn index_sidebar(&self, leagues: &[League]) -> Result<()> {
        self.write_sidebar(paths::index_sidebar_path(), &Sidebar::index(leagues))
    }

    fn write_sidebar(&self, rel: &str, sidebar: &Sidebar) -> Result<()> {
        let mut doc = String::new();
        html::render_sidebar(&mut doc, sidebar)?;

        let path = self.template_path.join(rel);
        create_file(&path, doc.as_bytes())?;
        debug!(path = %path.display(), "wrote sidebar");
        Ok(())
    }

    fn read_sidebar(&self, rel: &str) -> Result<String> {
        let path = self.template_path.join(rel);
        match fs::read_to_string(&path) {
            Ok(doc) => Ok(doc),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "sidebar missing, rendering without it");
                Ok(String::new())
            }
            Err(e) => Err(anyhow!(e).context(format!("failed to read {}", path.display()))),
        }
    }

    /// Writes `<page>` and a best-compression `<page>.gz` with the same
    /// content.
    fn write_page(&self, site_path: &str, doc: &str) -> Result<()> {
        let path = self.static_path.join(site_path.trim_start_matches('/'));
        create_file(&path, doc.as_bytes())?;

        let mut gz = GzEncoder::new(Vec::new(), Compression::best());
        gz.write_all(doc.as_bytes())?;
        let compressed = gz.finish()?;

        let mut gz_path = path.clone().into_os_string();
        gz_path.push(".gz");
        create_file(Path::new(&gz_path), &compressed)?;

        debug!(path = %path.display(), "wrote page");
        Ok(())
    }
}

fn create_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

use super::paths;
use crate::models::{Club, Game, League, Resource, Season};

use chrono::NaiveDate;
use std::fmt::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub display: String,
}

impl Link {
    pub fn new(href: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            display: display.into(),
        }
    }
}

/// Navigation header. Link targets are site-absolute and are prefixed
/// with `path_to_root` when rendered so the pages work from any mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumb {
    pub path_to_root: &'static str,
    pub league: Option<Link>,
    pub home: Option<Link>,
    pub away: Option<Link>,
}

impl Breadcrumb {
    pub fn root(path_to_root: &'static str) -> Self {
        Self {
            path_to_root,
            ..Default::default()
        }
    }

    pub fn game(game: &Game) -> Self {
        Self {
            path_to_root: "../../../..",
            league: Some(Link::new(
                paths::league_path(&game.season.league),
                game.season.league.name.as_str(),
            )),
            home: Some(Link::new(
                paths::club_path(&game.home, &game.season),
                game.home.display_name(),
            )),
            away: Some(Link::new(
                paths::club_path(&game.away, &game.season),
                game.away.display_name(),
            )),
        }
    }

    pub fn club(season: &Season) -> Self {
        Self {
            league: Some(Link::new(
                paths::league_path(&season.league),
                season.league.name.as_str(),
            )),
            ..Self::root("../../../..")
        }
    }

    fn href(&self, link: &Link) -> String {
        format!("{}{}", self.path_to_root, link.href)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavSection {
    pub header: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    pub breadcrumb: Breadcrumb,
    pub sections: Vec<NavSection>,
}

impl Sidebar {
    /// Regular seasons newest first, then exhibition seasons newest first.
    pub fn club(club: &Club, seasons: &[Season]) -> Self {
        let (mut exhibition, mut regular): (Vec<&Season>, Vec<&Season>) =
            seasons.iter().partition(|s| s.exhibition);
        regular.sort_by(|a, b| b.year.cmp(&a.year));
        exhibition.sort_by(|a, b| b.year.cmp(&a.year));

        let mut sections = Vec::with_capacity(2);
        if !regular.is_empty() {
            sections.push(NavSection {
                header: "Other Seasons".to_string(),
                links: regular
                    .iter()
                    .map(|s| {
                        Link::new(
                            paths::club_path(club, s),
                            format!("{} {} Season", s.year, s.league.name),
                        )
                    })
                    .collect(),
            });
        }
        if !exhibition.is_empty() {
            sections.push(NavSection {
                header: "See also".to_string(),
                links: exhibition
                    .iter()
                    .map(|s| {
                        Link::new(
                            paths::club_path(club, s),
                            format!("{} {} {}", s.year, s.league.name, s.season_type),
                        )
                    })
                    .collect(),
            });
        }

        Self {
            breadcrumb: Breadcrumb::root("../../../.."),
            sections,
        }
    }

    pub fn league(season: &Season, clubs: &[Club]) -> Self {
        let mut clubs: Vec<&Club> = clubs.iter().collect();
        clubs.sort_by_key(|c| c.represents.to_lowercase());

        let links = clubs
            .iter()
            .map(|c| Link::new(paths::club_path(c, season), c.display_name()))
            .collect();

        Self {
            breadcrumb: Breadcrumb::root(".."),
            sections: vec![NavSection {
                header: "Teams".to_string(),
                links,
            }],
        }
    }

    pub fn index(leagues: &[League]) -> Self {
        let mut leagues: Vec<&League> = leagues.iter().collect();
        leagues.sort_by_key(|l| l.name.to_lowercase());

        let links = leagues
            .iter()
            .map(|l| Link::new(paths::league_path(l), l.display_name()))
            .collect();

        Self {
            breadcrumb: Breadcrumb::root("."),
            sections: vec![NavSection {
                header: "Leagues".to_string(),
                links,
            }],
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndexPage<'a> {
    pub breadcrumb: Breadcrumb,
    pub title: String,
    pub subtitle: String,
    pub games: &'a [Game],
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Replaces a link target whose scheme could run script in the page. Only
/// `http`, `https` and `mailto` pass, along with relative references.
pub fn safe_url(url: &str) -> &str {
    const BLOCKED: &str = "#ZgotmplZ";

    let Some(colon) = url.find(':') else {
        return url;
    };
    let scheme = &url[..colon];
    if scheme.contains(['/', '?', '#']) {
        return url;
    }
    // browsers ignore whitespace and control characters inside a scheme
    let scheme: String = scheme
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect::<String>()
        .to_ascii_lowercase();
    match scheme.as_str() {
        "http" | "https" | "mailto" => url,
        _ => BLOCKED,
    }
}

/// `Sep 13 2020`
pub fn date_short(date: NaiveDate) -> String {
    date.format("%b %d %Y").to_string()
}

/// `Sun September 13, 2020`
pub fn date_long(date: NaiveDate) -> String {
    date.format("%a %B %d, %Y").to_string()
}

fn header(out: &mut impl Write, title: &str, crumbs: &Breadcrumb) -> fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{}</title>", escape(title))?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    write_breadcrumb(out, crumbs)
}

fn footer(out: &mut impl Write) -> fmt::Result {
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_link(out: &mut impl Write, crumbs: &Breadcrumb, link: &Link) -> fmt::Result {
    write!(
        out,
        "<a href=\"{}\">{}</a>",
        escape(&crumbs.href(link)),
        escape(&link.display)
    )
}

fn write_breadcrumb(out: &mut impl Write, crumbs: &Breadcrumb) -> fmt::Result {
    write!(
        out,
        "<nav class=\"breadcrumb\"><a href=\"{}/index.html\">Home</a>",
        escape(crumbs.path_to_root)
    )?;
    for link in [&crumbs.league, &crumbs.home, &crumbs.away]
        .into_iter()
        .flatten()
    {
        write!(out, " / ")?;
        write_link(out, crumbs, link)?;
    }
    writeln!(out, "</nav>")
}

pub fn render_sidebar(out: &mut impl Write, sidebar: &Sidebar) -> fmt::Result {
    writeln!(out, "<aside class=\"sidebar\">")?;
    for section in &sidebar.sections {
        writeln!(out, "<h3>{}</h3>", escape(&section.header))?;
        writeln!(out, "<ul>")?;
        for link in &section.links {
            write!(out, "<li>")?;
            write_link(out, &sidebar.breadcrumb, link)?;
            writeln!(out, "</li>")?;
        }
        writeln!(out, "</ul>")?;
    }
    writeln!(out, "</aside>")
}

/// Game listing page with an embedded, already rendered, sidebar fragment.
pub fn render_index(out: &mut impl Write, page: &IndexPage, sidebar: &str) -> fmt::Result {
    header(out, &page.title, &page.breadcrumb)?;
    out.write_str(sidebar)?;
    writeln!(out, "<main>")?;
    writeln!(out, "<h1>{}</h1>", escape(&page.title))?;
    if !page.subtitle.is_empty() {
        writeln!(out, "<h2>{}</h2>", escape(&page.subtitle))?;
    }

    writeln!(out, "<table class=\"games\">")?;
    for game in page.games {
        let link = Link::new(
            paths::game_path(game),
            format!(
                "{} {} - {} {}",
                game.away.display_name(),
                game.away_score,
                game.home.display_name(),
                game.home_score
            ),
        );
        write!(out, "<tr><td>{}</td><td>", date_short(game.date))?;
        write_link(out, &page.breadcrumb, &link)?;
        writeln!(out, "</td></tr>")?;
    }
    writeln!(out, "</table>")?;
    writeln!(out, "</main>")?;
    footer(out)
}

pub fn render_game(out: &mut impl Write, game: &Game, resources: &[Resource]) -> fmt::Result {
    let crumbs = Breadcrumb::game(game);
    let matchup = format!(
        "{} at {}",
        game.away.display_name(),
        game.home.display_name()
    );

    header(out, &matchup, &crumbs)?;
    writeln!(out, "<main>")?;
    if !game.title.is_empty() {
        writeln!(out, "<h2>{}</h2>", escape(&game.title))?;
    }
    writeln!(out, "<h1>{}</h1>", escape(&matchup))?;
    writeln!(out, "<p class=\"date\">{}</p>", date_long(game.date))?;
    if !game.venue.is_empty() {
        writeln!(out, "<p class=\"venue\">{}</p>", escape(&game.venue))?;
    }

    writeln!(out, "<table class=\"score\">")?;
    for (club, score) in [(&game.away, game.away_score), (&game.home, game.home_score)] {
        write!(out, "<tr><td>")?;
        write_link(
            out,
            &crumbs,
            &Link::new(paths::club_path(club, &game.season), club.display_name()),
        )?;
        writeln!(out, "</td><td>{score}</td></tr>")?;
    }
    writeln!(out, "</table>")?;

    if !resources.is_empty() {
        writeln!(out, "<ul class=\"resources\">")?;
        for res in resources {
            writeln!(
                out,
                "<li><a href=\"{}\">{}</a></li>",
                escape(safe_url(&res.url)),
                escape(&res.title)
            )?;
        }
        writeln!(out, "</ul>")?;
    }
    writeln!(out, "</main>")?;
    footer(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&#34;x&#34;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_safe_url() {
        assert_eq!(safe_url("https://example.com/box"), "https://example.com/box");
        assert_eq!(safe_url("HTTP://example.com"), "HTTP://example.com");
        assert_eq!(safe_url("mailto:scores@example.com"), "mailto:scores@example.com");
        assert_eq!(safe_url("../games/1.html"), "../games/1.html");
        assert_eq!(safe_url("/box?at=10:30"), "/box?at=10:30");

        assert_eq!(safe_url("javascript:alert(1)"), "#ZgotmplZ");
        assert_eq!(safe_url("JavaScript:alert(1)"), "#ZgotmplZ");
        assert_eq!(safe_url(" java\tscript:alert(1)"), "#ZgotmplZ");
        assert_eq!(safe_url("data:text/html,<script>"), "#ZgotmplZ");
        assert_eq!(safe_url("vbscript:msgbox"), "#ZgotmplZ");
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2020, 9, 13).unwrap();
        assert_eq!(date_short(date), "Sep 13 2020");
        assert_eq!(date_long(date), "Sun September 13, 2020");
        let date = NaiveDate::from_ymd_opt(2021, 1, 3).unwrap();
        assert_eq!(date_short(date), "Jan 03 2021");
    }

    #[test]
    fn test_club_sidebar_sections() {
        let nfl = fixtures::nfl();
        let seasons = vec![
            fixtures::season(1, &nfl, 2019),
            fixtures::preseason(3, &nfl, 2020),
            fixtures::season(2, &nfl, 2020),
        ];
        let sidebar = Sidebar::club(&fixtures::bears(), &seasons);

        assert_eq!(sidebar.sections.len(), 2);
        assert_eq!(sidebar.sections[0].header, "Other Seasons");
        assert_eq!(
            sidebar.sections[0].links,
            vec![
                Link::new(
                    "/NFL/2020/regular/teams/1.html",
                    "2020 National Football League Season"
                ),
                Link::new(
                    "/NFL/2019/regular/teams/1.html",
                    "2019 National Football League Season"
                ),
            ]
        );
        assert_eq!(sidebar.sections[1].header, "See also");
        assert_eq!(
            sidebar.sections[1].links,
            vec![Link::new(
                "/NFL/2020/preseason/teams/1.html",
                "2020 National Football League preseason"
            )]
        );
    }

    #[test]
    fn test_club_sidebar_omits_empty_sections() {
        let nfl = fixtures::nfl();
        let sidebar = Sidebar::club(&fixtures::bears(), &[fixtures::preseason(3, &nfl, 2020)]);
        assert_eq!(sidebar.sections.len(), 1);
        assert_eq!(sidebar.sections[0].header, "See also");
    }

    #[test]
    fn test_league_sidebar_sorts_by_city_ignoring_case() {
        let season = fixtures::season(2, &fixtures::nfl(), 2020);
        let clubs = vec![
            fixtures::packers(),
            fixtures::club(9, "arizona", "Cardinals"),
            fixtures::bears(),
        ];
        let sidebar = Sidebar::league(&season, &clubs);
        let names: Vec<_> = sidebar.sections[0]
            .links
            .iter()
            .map(|l| l.display.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["arizona Cardinals", "Chicago Bears", "Green Bay Packers"]
        );
    }

    #[test]
    fn test_index_sidebar_links_leagues() {
        let sidebar = Sidebar::index(&[fixtures::nfl(), fixtures::cfl()]);
        assert_eq!(
            sidebar.sections[0].links,
            vec![
                Link::new("/CFL/index.html", "Canadian Football League Football"),
                Link::new("/NFL/index.html", "National Football League Football"),
            ]
        );

        let mut out = String::new();
        render_sidebar(&mut out, &sidebar).unwrap();
        assert!(out.contains("<a href=\"./NFL/index.html\">National Football League Football</a>"));
    }

    #[test]
    fn test_game_page() {
        let mut game = fixtures::game();
        game.title = "Week 1 <Opener>".to_string();
        let resources = vec![Resource {
            id: 1,
            title: "Box score".to_string(),
            url: "https://example.com/box?a=1&b=2".to_string(),
        }];

        let mut out = String::new();
        render_game(&mut out, &game, &resources).unwrap();

        assert!(out.contains("<title>Green Bay Packers at Chicago Bears</title>"));
        assert!(out.contains("<h2>Week 1 &lt;Opener&gt;</h2>"));
        assert!(out.contains("Sun September 13, 2020"));
        assert!(out.contains("<a href=\"../../../../NFL/index.html\">National Football League</a>"));
        assert!(out.contains(
            "<a href=\"../../../../NFL/2020/regular/teams/1.html\">Chicago Bears</a>"
        ));
        assert!(out.contains("https://example.com/box?a=1&amp;b=2"));
    }

    #[test]
    fn test_game_page_blocks_script_links() {
        let resources = vec![Resource {
            id: 1,
            title: "Highlights".to_string(),
            url: "javascript:alert(document.cookie)".to_string(),
        }];

        let mut out = String::new();
        render_game(&mut out, &fixtures::game(), &resources).unwrap();

        assert!(out.contains("<li><a href=\"#ZgotmplZ\">Highlights</a></li>"));
        assert!(!out.contains("javascript:"));
    }

    #[test]
    fn test_index_page_lists_games() {
        let games = vec![fixtures::game()];
        let page = IndexPage {
            breadcrumb: Breadcrumb::root(".."),
            title: "National Football League Football".to_string(),
            subtitle: String::new(),
            games: &games,
        };

        let mut out = String::new();
        render_index(&mut out, &page, "<aside>teams</aside>\n").unwrap();

        assert!(out.contains("<aside>teams</aside>"));
        assert!(!out.contains("<h2>"));
        assert!(out.contains("<td>Sep 13 2020</td>"));
        assert!(out.contains(
            "<a href=\"../NFL/2020/regular/games/1.html\">Green Bay Packers 23 - Chicago Bears 27</a>"
        ));
    }
}

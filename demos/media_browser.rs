//! # Media Browser Example
//!
//! A remote-control style media browser:
//! - Arrow keys move focus between buttons, carousel tiles and grid tiles
//! - Carousels scroll horizontally to keep the focused tile centered
//! - `Tab` opens the sidebar menu as a stacked focus scope
//! - `o` steals focus to the sidebar; the content scope pulls it back
//! - `x` removes the focused tile, `v` hides the next one
//!
//! Run with: `cargo run --example media_browser`
//! Pass `--vim` to also navigate with `h`/`j`/`k`/`l`. Set `WAYFIND_LOG` to
//! a file path to capture navigation logs (filter with `RUST_LOG`).

use wayfind::widgets::{SectionKind, TileBoard};
use wayfind::{NavConfig, NavKeyMap, Program, ProgramOptions};

const MOVIES: &[&str] = &[
    "Dune: Part Two",
    "Arrival",
    "Blade Runner 2049",
    "Sicario",
    "Prisoners",
    "Enemy",
    "Incendies",
    "Polytechnique",
];

const SHOWS: &[&str] = &[
    "Severance",
    "The Bear",
    "Andor",
    "Succession",
    "Shōgun",
    "Slow Horses",
];

fn build_board() -> TileBoard {
    let mut board = TileBoard::new();
    for item in ["Home", "Movies", "TV Shows", "Settings"] {
        board.add_sidebar_item(item);
    }

    let hero = board.add_section("Featured: Dune: Part Two", SectionKind::Row);
    board.push_tile(hero, "▶ Play");
    board.push_tile(hero, "More Info");

    let continue_watching = board.add_section("Continue Watching", SectionKind::Row);
    for (i, show) in SHOWS.iter().enumerate().take(4) {
        board.push_tile(continue_watching, format!("{show} · E{}", i + 1));
    }

    let movies = board.add_section("Recently Added Movies", SectionKind::Row);
    for movie in MOVIES {
        board.push_tile(movies, *movie);
    }

    let shows = board.add_section("Popular Shows", SectionKind::Row);
    for show in SHOWS {
        board.push_tile(shows, *show);
    }

    let library = board.add_section("Browse All", SectionKind::Grid { columns: 3 });
    for title in MOVIES.iter().chain(SHOWS) {
        board.push_tile(library, *title);
    }
    board
}

#[wayfind::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let vim = std::env::args().any(|a| a == "--vim");
    let keymap = if vim {
        NavKeyMap::with_vim_keys()
    } else {
        NavKeyMap::default()
    };

    let options = ProgramOptions {
        title: Some("wayfind media browser".into()),
        log_file: std::env::var_os("WAYFIND_LOG").map(Into::into),
        nav: NavConfig {
            keymap,
            ..NavConfig::default()
        },
        ..ProgramOptions::default()
    };

    let board = Program::new(build_board(), options)?.run().await?;
    let opened: Vec<_> = board
        .sections()
        .iter()
        .flat_map(|s| s.tiles())
        .filter(|t| t.opened > 0)
        .map(|t| t.label.as_str())
        .collect();
    if !opened.is_empty() {
        println!("Opened: {}", opened.join(", "));
    }
    Ok(())
}

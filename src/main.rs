//! Gridfall — classic falling-block puzzle game in the terminal.

mod app;
mod grid;
mod input;
mod piece;
mod scoring;
mod session;
mod tetromino;
mod theme;
mod ui;

use anyhow::Result;
use app::App;
use clap::{Parser, ValueEnum};

/// Options that affect the simulation itself (piece set, RNG seed).
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub piece_set: PieceSet,
    pub seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_default();
    let config = GameConfig {
        piece_set: args.piece_set,
        seed: args.seed,
    };
    let mut app = App::new(config, theme, args.autostart);
    app.run()?;
    Ok(())
}

/// Classic falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "gridfall",
    version,
    about = "Classic falling-block puzzle in the terminal. Stack tetrominoes and clear full rows to score.",
    long_about = "Gridfall is a terminal rendition of the classic falling-block puzzle.\n\n\
        Pieces fall on a 10x20 board; full rows clear for points and the fall speed \
        increases as your score crosses fixed thresholds.\n\n\
        CONTROLS:\n  Left/Right or h/l  Move    Up or k  Rotate    Down or j  Soft drop\n  \
        Space/P  Start / pause    R  Restart    Q / Esc  Quit\n\n\
        Use --theme to load a btop-style theme (e.g. onedark.theme), and --seed for a \
        reproducible piece sequence."
)]
pub struct Args {
    /// Path to theme file (btop-style theme[key]="value"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<std::path::PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Piece set: all seven tetromino kinds, or the classic five (L, Z, T, O, I).
    #[arg(long, default_value = "seven")]
    pub piece_set: PieceSet,

    /// RNG seed for the piece sequence (reproducible games).
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Start the gravity timer immediately instead of waiting for Space.
    #[arg(long)]
    pub autostart: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PieceSet {
    #[default]
    Seven,
    Five,
}

//! Rendering layer: all terminal I/O lives here.
//!
//! A [`Frame`] draw list is rasterised into a grid of character cells
//! (one cell covers `CELL_W`×`CELL_H` pixels) in command order, then the grid
//! is written out row by row. No game logic happens here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use tide_runner::assets::SpriteKey;
use tide_runner::frame::{DrawCommand, Frame};
use tide_runner::settings::{SCREEN_HEIGHT, SCREEN_WIDTH};

// ── Geometry ──────────────────────────────────────────────────────────────────

const CELL_W: i32 = 16;
const CELL_H: i32 = 32;
pub const VIEW_COLS: usize = (SCREEN_WIDTH / CELL_W) as usize;
pub const VIEW_ROWS: usize = (SCREEN_HEIGHT / CELL_H) as usize;

/// Playfield starts below the HUD row.
const TOP: u16 = 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY_TOP: Color = Color::Rgb { r: 221, g: 198, b: 161 };
const C_SKY_MIDDLE: Color = Color::Rgb { r: 236, g: 173, b: 118 };
const C_SKY_BOTTOM: Color = Color::Rgb { r: 250, g: 138, b: 96 };
const C_WATER: Color = Color::Rgb { r: 38, g: 92, b: 140 };
const C_HUD_COINS: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self { glyph: ' ', fg: Color::White, bg: Color::Black }
    }
}

/// What a sprite looks like in the terminal: `None` glyph paints only the
/// background.
fn look(sprite: SpriteKey) -> (Option<char>, Color, Option<Color>) {
    match sprite {
        SpriteKey::Terrain(_) => (Some('█'), Color::Rgb { r: 120, g: 84, b: 52 }, None),
        SpriteKey::Grass(_) => (Some('"'), Color::Green, None),
        SpriteKey::Crate => (Some('▤'), Color::Rgb { r: 170, g: 120, b: 60 }, None),
        SpriteKey::Constraint => (None, Color::Reset, None),
        SpriteKey::Goal => (Some('♛'), Color::Magenta, None),
        SpriteKey::CoinGold => (Some('●'), Color::Yellow, None),
        SpriteKey::CoinSilver => (Some('•'), Color::Grey, None),
        SpriteKey::PalmSmall | SpriteKey::PalmLarge => (Some('¥'), Color::DarkGreen, None),
        SpriteKey::PalmBackground => (Some('¥'), Color::Rgb { r: 150, g: 120, b: 90 }, None),
        SpriteKey::Enemy => (Some('▼'), Color::Red, None),
        SpriteKey::PlayerIdle
        | SpriteKey::PlayerRun
        | SpriteKey::PlayerJump
        | SpriteKey::PlayerFall => (Some('█'), Color::White, None),
        SpriteKey::RunDust | SpriteKey::JumpDust | SpriteKey::LandDust => {
            (Some('░'), Color::Grey, None)
        }
        SpriteKey::Explosion => (Some('*'), Color::Yellow, None),
        SpriteKey::SkyTop => (Some(' '), Color::Reset, Some(C_SKY_TOP)),
        SpriteKey::SkyMiddle => (Some(' '), Color::Reset, Some(C_SKY_MIDDLE)),
        SpriteKey::SkyBottom => (Some(' '), Color::Reset, Some(C_SKY_BOTTOM)),
        SpriteKey::Cloud(_) => (Some('▒'), Color::White, None),
        SpriteKey::WaterTop => (Some('~'), Color::Cyan, Some(C_WATER)),
    }
}

/// Session readout for the HUD row.
pub struct Hud<'a> {
    pub level_name: &'a str,
    pub coins: u32,
    pub health: i32,
    pub max_health: i32,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame, hud: &Hud) -> std::io::Result<()> {
    let mut cells = vec![Cell::default(); VIEW_COLS * VIEW_ROWS];
    for cmd in &frame.commands {
        paint(&mut cells, cmd);
    }

    draw_hud(out, hud)?;
    draw_cells(out, &cells)?;
    draw_controls_hint(out)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, TOP + VIEW_ROWS as u16 + 1))?;
    out.flush()?;
    Ok(())
}

// ── Rasterising ───────────────────────────────────────────────────────────────

fn paint(cells: &mut [Cell], cmd: &DrawCommand) {
    let (glyph, fg, bg) = look(cmd.sprite);
    if glyph.is_none() && bg.is_none() {
        return;
    }

    let r = cmd.rect;
    let col0 = r.left().div_euclid(CELL_W).max(0);
    let col1 = (r.right() + CELL_W - 1).div_euclid(CELL_W).min(VIEW_COLS as i32);
    let row0 = r.top().div_euclid(CELL_H).max(0);
    let row1 = (r.bottom() + CELL_H - 1).div_euclid(CELL_H).min(VIEW_ROWS as i32);

    for row in row0..row1 {
        for col in col0..col1 {
            let cell = &mut cells[row as usize * VIEW_COLS + col as usize];
            if let Some(bg) = bg {
                cell.bg = bg;
            }
            if let Some(glyph) = glyph {
                cell.glyph = glyph;
                cell.fg = fg;
            }
        }
    }

    // Mark which way the player faces on its top row.
    if matches!(
        cmd.sprite,
        SpriteKey::PlayerIdle | SpriteKey::PlayerRun | SpriteKey::PlayerJump | SpriteKey::PlayerFall
    ) && row0 < row1
        && col0 < col1
    {
        let (col, glyph) = if cmd.flip_x { (col0, '◄') } else { (col1 - 1, '►') };
        cells[row0 as usize * VIEW_COLS + col as usize].glyph = glyph;
    }
}

fn draw_cells<W: Write>(out: &mut W, cells: &[Cell]) -> std::io::Result<()> {
    for (row, line) in cells.chunks(VIEW_COLS).enumerate() {
        out.queue(cursor::MoveTo(0, TOP + row as u16))?;
        let mut current: Option<(Color, Color)> = None;
        for cell in line {
            if current != Some((cell.fg, cell.bg)) {
                out.queue(style::SetForegroundColor(cell.fg))?;
                out.queue(style::SetBackgroundColor(cell.bg))?;
                current = Some((cell.fg, cell.bg));
            }
            out.queue(Print(cell.glyph))?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_COINS))?;
    out.queue(Print(format!("● {:>4}", hud.coins)))?;

    let name = format!("[ {} ]", hud.level_name);
    let cx = (VIEW_COLS as u16 / 2).saturating_sub(name.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&name))?;

    // Ten-segment health bar, right aligned.
    let filled = (hud.health.clamp(0, hud.max_health) * 10 / hud.max_health.max(1)) as usize;
    let bar = format!("♥ {}{}", "█".repeat(filled), "░".repeat(10 - filled));
    let rx = (VIEW_COLS as u16).saturating_sub(bar.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&bar))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, TOP + VIEW_ROWS as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE / ↑ : Jump   Q : Quit"))?;
    Ok(())
}

//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; arena coordinates are scaled onto
//! whatever terminal size is current and translated into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use dodge_arena::durability;
use dodge_arena::entities::{GameState, GameStatus, Tint};
use dodge_arena::geometry::Rect;
use dodge_arena::level::MAX_LEVEL;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_PLAYER: Color = Color::Green;
const C_PLAYER_POWER: Color = Color::Yellow;
const C_PLAYER_INVINCIBLE: Color = Color::DarkYellow;
const C_BULLET: Color = Color::White;
const C_POWERUP: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Purple => Color::Magenta,
        Tint::DarkPurple => Color::DarkMagenta,
        Tint::MidnightPurple => Color::DarkBlue,
        Tint::Red => Color::Red,
    }
}

/// Terminal geometry of the play field (inside the border).
struct Viewport {
    width: u16,
    height: u16,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(width: u16, height: u16, state: &GameState) -> Self {
        let cols = width.saturating_sub(2).max(1) as f32;
        let rows = height.saturating_sub(4).max(1) as f32;
        Self {
            width,
            height,
            scale_x: cols / state.tunables.arena_width,
            scale_y: rows / state.tunables.arena_height,
        }
    }

    /// Cell span `(col, row, cols, rows)` covered by an arena box; never
    /// smaller than one cell, never outside the field.
    fn cells(&self, rect: &Rect) -> (u16, u16, u16, u16) {
        let max_col = self.width.saturating_sub(2).max(1);
        let max_row = self.height.saturating_sub(3).max(2);
        let col = (1.0 + rect.x * self.scale_x).max(1.0) as u16;
        let row = (2.0 + rect.y * self.scale_y).max(2.0) as u16;
        let cols = ((rect.w * self.scale_x).round() as u16).max(1);
        let rows = ((rect.h * self.scale_y).round() as u16).max(1);
        let col = col.min(max_col);
        let row = row.min(max_row);
        (
            col,
            row,
            cols.min(max_col + 1 - col),
            rows.min(max_row + 1 - row),
        )
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, now: u64) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(width, height, state);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.status {
        GameStatus::Menu => draw_menu(out, &view)?,
        GameStatus::Playing | GameStatus::GameOver | GameStatus::Victory => {
            draw_border(out, &view)?;
            draw_hud(out, state, &view)?;
            draw_field(out, state, &view, now)?;
            draw_controls_hint(out, &view)?;
            match state.status {
                GameStatus::GameOver => draw_banner(
                    out,
                    &view,
                    "GAME  OVER",
                    Color::Red,
                    "R - Retry level   M - Menu   Q - Quit",
                )?,
                GameStatus::Victory => draw_banner(
                    out,
                    &view,
                    "VICTORY!",
                    Color::Green,
                    "R - Play again   M - Menu   Q - Quit",
                )?,
                _ => {}
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let cx = view.width / 2;
    let cy = view.height / 2;

    let title = "■  DODGE  ARENA  ■";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select a level:"))?;

    for level in 1..=MAX_LEVEL {
        let row = cy.saturating_sub(2) + level as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", level)))?;
        out.queue(style::SetForegroundColor(Color::Green))?;
        out.queue(Print(format!("Level {}", level)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 3))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Grab ★ to smash one enemy or bullet."))?;
    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 5))?;
    out.queue(Print("ESC / Q : Quit"))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Level {}/{}   Enemies: {}",
        state.level,
        MAX_LEVEL,
        state.enemies.len()
    )))?;

    if state.player.has_power {
        let tag = "[★ POWER]";
        let rx = view.width.saturating_sub(tag.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(C_PLAYER_POWER))?;
        out.queue(Print(tag))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_field<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    now: u64,
) -> std::io::Result<()> {
    if let Some(powerup) = &state.powerup {
        fill(out, view, &powerup.rect, C_POWERUP, '★')?;
    }

    let player_color = if state.player.is_invincible(now) {
        C_PLAYER_INVINCIBLE
    } else if state.player.has_power {
        C_PLAYER_POWER
    } else {
        C_PLAYER
    };
    fill(out, view, &state.player.rect, player_color, '█')?;

    for enemy in &state.enemies {
        fill(out, view, &enemy.rect, tint_color(durability::tint(enemy)), '▓')?;
        for bullet in enemy.bullets() {
            fill(out, view, &bullet.rect, C_BULLET, '•')?;
        }
    }
    Ok(())
}

fn fill<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    color: Color,
    glyph: char,
) -> std::io::Result<()> {
    let (col, row, cols, rows) = view.cells(rect);
    let line: String = std::iter::repeat(glyph).take(cols as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for r in row..row + rows {
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD / ←↑↓→ : Move   SPACE : Sprint   ESC : Menu   Q : Quit"))?;
    Ok(())
}

// ── Game-over / victory overlay ───────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    view: &Viewport,
    title: &str,
    color: Color,
    hint: &str,
) -> std::io::Result<()> {
    let inner = format!("║{:^20}║", title);
    let lines = ["╔════════════════════╗", inner.as_str(), "╚════════════════════╝"];

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(2);

    out.queue(style::SetForegroundColor(color))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }

    let hint_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;
    Ok(())
}

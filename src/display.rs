/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// logical-pixel state into terminal commands.  The simulation runs in
/// logical pixels, so this is also where pixels become cells: one terminal
/// cell covers 10×20 logical px, making one 100×100 enemy a 10×5-cell box.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use beetlemorph::entities::{Enemy, Game};

/// Logical pixels covered by one terminal cell.
pub const CELL_W: f32 = 10.0;
pub const CELL_H: f32 = 20.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_LIVES_TAG: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_MESSAGE_BIG: Color = Color::Yellow;
const C_MESSAGE_SUB: Color = Color::White;
// One colour per sprite-sheet variant row.
const C_VARIANT: [Color; 4] = [Color::Green, Color::Yellow, Color::Magenta, Color::Cyan];

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Logical playfield size for a terminal of `cols`×`rows` cells.
pub fn playfield_size(cols: u16, rows: u16) -> (f32, f32) {
    (cols as f32 * CELL_W, rows as f32 * CELL_H)
}

/// Logical position of the centre of a terminal cell (used to place the
/// pointer from mouse events).
pub fn cell_to_logical(col: u16, row: u16) -> (f32, f32) {
    (
        col as f32 * CELL_W + CELL_W * 0.5,
        row as f32 * CELL_H + CELL_H * 0.5,
    )
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, game: &Game) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cols = (game.width / CELL_W) as u16;
    let rows = (game.height / CELL_H) as u16;

    draw_hud(out, game)?;

    for enemy in game.enemy_pool.iter().filter(|e| !e.free) {
        draw_enemy(out, enemy, cols, rows)?;
    }

    draw_controls_hint(out, cols, rows)?;

    if game.game_over {
        draw_game_over(out, game, cols, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, game: &Game) -> std::io::Result<()> {
    let score_str = format!("Score: {}", game.score);
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_str))?;

    // One heart per remaining crew member, right of the score.
    if game.lives > 0 {
        let hearts: String = "♥".repeat(game.lives as usize);
        out.queue(cursor::MoveTo(score_str.chars().count() as u16 + 3, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
        out.queue(Print(hearts))?;
    }

    Ok(())
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Sprite body rows (the inside of the bounding box) for a given animation
/// frame.  Column 0 is the live pose, picked per variant row; columns 1..=3
/// are the shared death burst fading out.
fn enemy_art(frame_x: u32, frame_y: u32) -> [&'static str; 3] {
    match frame_x {
        0 => match frame_y % 4 {
            0 => ["  ▄██▄  ", " ▟████▙ ", " ▝█▀▀█▘ "],
            1 => ["  ▟██▙  ", " ▐████▌ ", " ▞▀▀▀▀▚ "],
            2 => ["  ▛██▜  ", " ▙████▟ ", " ▘▀▀▀▀▝ "],
            _ => ["  ▞██▚  ", " ▜████▛ ", " ▚▄▄▄▄▞ "],
        },
        1 => ["  ▚▓▓▞  ", " ▒▓██▓▒ ", "  ▞▒▒▚  "],
        2 => ["  ░  ░  ", "  ▒░░▒  ", "  ░  ░  "],
        _ => ["   ·    ", "  ·  ·  ", "    ·   "],
    }
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, cols: u16, rows: u16) -> std::io::Result<()> {
    let box_cols = (enemy.width / CELL_W) as i32; // 10
    let box_rows = (enemy.height / CELL_H) as i32; // 5

    // Top-left cell; clamp horizontally so the box never wraps.
    let col = ((enemy.x / CELL_W).round() as i32)
        .min(cols as i32 - box_cols)
        .max(0);
    let top = (enemy.y / CELL_H).round() as i32;

    let art = enemy_art(enemy.frame_x, enemy.frame_y);
    out.queue(style::SetForegroundColor(
        C_VARIANT[(enemy.frame_y % 4) as usize],
    ))?;

    for i in 0..box_rows {
        let row = top + i;
        // Row 0 is the HUD; anything above it or below the screen is clipped
        // (enemies float in from above the top edge).
        if row < 1 || row >= rows as i32 {
            continue;
        }
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        let line = match i {
            0 => "┌────────┐".to_string(),
            4 => "└────────┘".to_string(),
            _ => format!("│{}│", art[(i - 1) as usize]),
        };
        out.queue(Print(line))?;
    }

    // Remaining lives, centred on the sprite.
    let mid_row = top + box_rows / 2;
    if mid_row >= 1 && mid_row < rows as i32 {
        out.queue(cursor::MoveTo((col + box_cols / 2) as u16, mid_row as u16))?;
        out.queue(style::SetForegroundColor(C_LIVES_TAG))?;
        out.queue(Print(enemy.lives.to_string()))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, _cols: u16, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Click : Shoot   ENTER / R : Restart   Q : Quit"))?;
    Ok(())
}

// ── Game-over / idle overlay ──────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, game: &Game, cols: u16, rows: u16) -> std::io::Result<()> {
    let cx = cols / 2;
    let cy = rows / 2;

    // message1 is the headline; letter spacing stands in for a large font.
    let big: String = game
        .message1
        .chars()
        .flat_map(|c| [c, ' '])
        .collect::<String>()
        .trim_end()
        .to_string();

    let lines: &[(&str, Color)] = &[
        (big.as_str(), C_MESSAGE_BIG),
        (game.message2, C_MESSAGE_SUB),
        (game.message3, C_HINT),
    ];

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}

//! Rendering layer: all terminal output lives here.
//!
//! Every function receives a writer and an immutable view of the session.
//! Logical pixel coordinates are projected onto terminal cells; no game
//! logic runs here.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::actors::Visual;
use space_invaders::collision::{Bounded, Rect};
use space_invaders::entities::{AlienKind, BulletOwner, Screen};
use space_invaders::persistence::ScoreStore;
use space_invaders::session::Session;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ALIEN: Color = Color::Magenta;
const C_BARRIER: Color = Color::Green;
const C_BONUS: Color = Color::White;
const C_EXPLOSION: Color = Color::Yellow;
const C_BUTTON: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

fn alien_color(kind: AlienKind) -> Color {
    match kind {
        AlienKind::Red => Color::Red,
        AlienKind::Pink => Color::Magenta,
        AlienKind::Blue => Color::Blue,
        AlienKind::Green => Color::Green,
    }
}

// ── Sprites ──────────────────────────────────────────────────────────────────

fn alien_sprite(kind: AlienKind, frame: usize) -> &'static str {
    let frames: [&str; 2] = match kind {
        AlienKind::Red => ["{@}", "}@{"],
        AlienKind::Pink => ["/o\\", "\\o/"],
        AlienKind::Blue => ["<#>", ">#<"],
        AlienKind::Green => ["(v)", "(^)"],
    };
    frames[frame % frames.len()]
}

const EXPLOSION_SPRITES: [&str; 3] = ["\\|/", "-*-", " . "];
const SHIP_SPRITE: &str = "/A\\";
const BONUS_SPRITE: &str = "<=O=>";

// ── Projection ───────────────────────────────────────────────────────────────

/// Maps the logical play field onto the terminal rows between the HUD
/// (row 0) and the hint line (last row).
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    field_w: i32,
    field_h: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, field_w: i32, field_h: i32) -> Self {
        Self {
            cols,
            rows,
            field_w: field_w.max(1),
            field_h: field_h.max(1),
        }
    }

    fn play_rows(&self) -> i64 {
        (self.rows as i64 - 2).max(1)
    }

    /// Terminal cell for a logical point, or `None` when it falls outside.
    pub fn project(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= self.field_w || y >= self.field_h {
            return None;
        }
        let col = x as i64 * self.cols as i64 / self.field_w as i64;
        let row = 1 + y as i64 * self.play_rows() / self.field_h as i64;
        Some((col as u16, row as u16))
    }

    /// Logical area of one terminal cell.
    fn cell_area(&self) -> f32 {
        let w = self.field_w as f32 / self.cols.max(1) as f32;
        let h = self.field_h as f32 / self.play_rows() as f32;
        w * h
    }
}

// ── Menu buttons ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    HighScores,
    Back,
}

#[derive(Clone, Copy, Debug)]
pub struct Button {
    pub label: &'static str,
    /// In terminal cells.
    pub rect: Rect,
    pub action: MenuAction,
}

fn button(label: &'static str, col: u16, row: u16, action: MenuAction) -> Button {
    let w = label.chars().count() as i32 + 4;
    Button {
        label,
        rect: Rect::new(col as i32, row as i32, w, 1),
        action,
    }
}

/// Buttons on the given screen, laid out for a `cols` x `rows` terminal.
pub fn buttons(screen: Screen, cols: u16, rows: u16) -> Vec<Button> {
    let cx = (cols / 2).saturating_sub(8);
    let cy = rows / 2;
    match screen {
        Screen::Launch => vec![
            button("PLAY GAME", cx, cy + 4, MenuAction::Play),
            button("HIGH SCORES", cx, cy + 6, MenuAction::HighScores),
        ],
        Screen::HighScores => vec![button(
            "BACK",
            cx,
            rows.saturating_sub(3),
            MenuAction::Back,
        )],
        Screen::Playing => Vec::new(),
    }
}

/// Which button (if any) sits under a mouse click.
pub fn hit_test(screen: Screen, cols: u16, rows: u16, col: u16, row: u16) -> Option<MenuAction> {
    buttons(screen, cols, rows)
        .into_iter()
        .find(|b| b.rect.contains_point(col as i32, row as i32))
        .map(|b| b.action)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whichever screen is current.
pub fn render<W: Write, S: ScoreStore>(
    out: &mut W,
    session: &Session<S>,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match session.screen {
        Screen::Launch => draw_launch(out, session, cols, rows)?,
        Screen::HighScores => draw_high_scores(out, session, cols, rows)?,
        Screen::Playing => draw_play(out, session, cols, rows)?,
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn put<W: Write>(out: &mut W, col: u16, row: u16, color: Color, text: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn put_centered<W: Write>(
    out: &mut W,
    cols: u16,
    row: u16,
    color: Color,
    text: &str,
) -> std::io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    put(out, col, row, color, text)
}

fn draw_buttons<W: Write>(
    out: &mut W,
    screen: Screen,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    for b in buttons(screen, cols, rows) {
        put(out, b.rect.x as u16, b.rect.y as u16, C_BUTTON, &format!("[ {} ]", b.label))?;
    }
    Ok(())
}

// ── Launch screen ────────────────────────────────────────────────────────────

fn draw_launch<W: Write, S: ScoreStore>(
    out: &mut W,
    session: &Session<S>,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let cy = rows / 2;
    put_centered(out, cols, cy.saturating_sub(9), Color::Cyan, "S P A C E   I N V A D E R S")?;
    if session.stats.high_score > 0 {
        let best = format!("HIGH: {}", session.stats.high_score);
        put_centered(out, cols, cy.saturating_sub(8), C_HUD_SCORE, &best)?;
    }

    let cx = (cols / 2).saturating_sub(8);
    for (i, kind) in AlienKind::ALL.iter().enumerate() {
        let row = cy.saturating_sub(6) + i as u16;
        put(out, cx, row, alien_color(*kind), alien_sprite(*kind, 0))?;
        put(out, cx + 4, row, C_HINT, &format!("= {} POINTS", kind.spec().points))?;
    }
    let row = cy.saturating_sub(2);
    put(out, cx.saturating_sub(1), row, C_BONUS, BONUS_SPRITE)?;
    put(out, cx + 5, row, C_HINT, "= ???")?;

    draw_buttons(out, Screen::Launch, cols, rows)?;
    put_centered(
        out,
        cols,
        rows.saturating_sub(1),
        C_HINT,
        "P / Enter : Play   H : High scores   Q : Quit",
    )
}

// ── High-score screen ────────────────────────────────────────────────────────

fn draw_high_scores<W: Write, S: ScoreStore>(
    out: &mut W,
    session: &Session<S>,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    put_centered(out, cols, 2, Color::White, "HIGH SCORES")?;
    if session.stats.leaderboard.is_empty() {
        put_centered(out, cols, 4, C_HINT, "no scores yet")?;
    }
    for (i, entry) in session.stats.leaderboard.iter().enumerate() {
        let line = format!("{:>2}. {:<10} {:>7}", i + 1, entry.name, entry.score);
        put_centered(out, cols, 4 + i as u16, Color::White, &line)?;
    }
    draw_buttons(out, Screen::HighScores, cols, rows)?;
    put_centered(out, cols, rows.saturating_sub(1), C_HINT, "B : Back   Q : Quit")
}

// ── Play screen ──────────────────────────────────────────────────────────────

fn draw_play<W: Write, S: ScoreStore>(
    out: &mut W,
    session: &Session<S>,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let field = session.settings.screen();
    let view = Viewport::new(cols, rows, field.width, field.height);

    draw_hud(out, session, cols)?;
    draw_barriers(out, session, &view)?;

    for alien in &session.fleet.aliens {
        let r = alien.rect();
        if let Some((col, row)) = view.project(r.x, r.y) {
            match alien.visual() {
                Visual::Exploding(f) => {
                    put(out, col, row, C_EXPLOSION, EXPLOSION_SPRITES[f % 3])?
                }
                Visual::Idle(f) => put(
                    out,
                    col,
                    row,
                    alien_color(alien.kind),
                    alien_sprite(alien.kind, f),
                )?,
                Visual::Value(_) => {}
            }
        }
    }

    if let Some(bonus) = &session.bonus {
        let r = bonus.rect();
        if let Some((col, row)) = view.project(r.x.max(0), r.y) {
            match bonus.visual() {
                Visual::Value(points) => put(out, col, row, C_BONUS, &points.to_string())?,
                _ => put(out, col, row, C_BONUS, BONUS_SPRITE)?,
            }
        }
    }

    for bullet in session.projectiles.player.iter().chain(&session.projectiles.alien) {
        let r = bullet.rect();
        if let Some((col, row)) = view.project(r.x, r.y.max(0)) {
            match bullet.owner {
                BulletOwner::Player => put(out, col, row, C_BULLET_PLAYER, "║")?,
                BulletOwner::Alien => put(out, col, row, C_BULLET_ALIEN, "↓")?,
            }
        }
    }

    let r = session.ship.rect();
    if let Some((col, row)) = view.project(r.x, r.y) {
        match session.ship.visual() {
            Visual::Exploding(f) => put(out, col, row, C_EXPLOSION, EXPLOSION_SPRITES[f % 3])?,
            _ => put(out, col, row, C_PLAYER, SHIP_SPRITE)?,
        }
    }

    if session.paused {
        put_centered(out, cols, rows / 2, Color::White, "PAUSED - P to resume")?;
    }
    put(
        out,
        1,
        rows.saturating_sub(1),
        C_HINT,
        "Arrows : Move   SPACE : Shoot   P : Pause   Q : Quit",
    )
}

fn draw_hud<W: Write, S: ScoreStore>(
    out: &mut W,
    session: &Session<S>,
    cols: u16,
) -> std::io::Result<()> {
    let hearts = "♥".repeat(session.stats.ships_left as usize);
    put(out, 1, 0, C_HUD_LIVES, &format!("Lives:{}", hearts))?;

    let high = format!("HIGH: {}", session.stats.high_score);
    put_centered(out, cols, 0, C_HUD_SCORE, &high)?;

    let score = format!("Score:{:>7}", session.stats.score);
    let col = cols.saturating_sub(score.chars().count() as u16 + 1);
    put(out, col, 0, C_HUD_SCORE, &score)
}

/// Barrier cells are much smaller than a terminal cell, so opacity is
/// summed per terminal cell and shown as a shade.
fn draw_barriers<W: Write, S: ScoreStore>(
    out: &mut W,
    session: &Session<S>,
    view: &Viewport,
) -> std::io::Result<()> {
    let mut coverage: HashMap<(u16, u16), f32> = HashMap::new();
    for barrier in &session.barriers {
        for cell in &barrier.cells {
            let r = cell.rect();
            if let Some(pos) = view.project(r.x + r.w / 2, r.y + r.h / 2) {
                *coverage.entry(pos).or_default() += cell.opaque_pixels() as f32;
            }
        }
    }

    let area = view.cell_area();
    for ((col, row), opaque) in coverage {
        let shade = match opaque / area {
            c if c > 0.75 => "█",
            c if c > 0.5 => "▓",
            c if c > 0.25 => "▒",
            c if c > 0.0 => "░",
            _ => continue,
        };
        put(out, col, row, C_BARRIER, shade)?;
    }
    Ok(())
}

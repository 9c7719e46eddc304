/// Rendering layer — all terminal I/O lives here.
///
/// `TerminalPresenter` consumes the render commands produced by the game
/// logic into a sprite table, and `render` turns that table into terminal
/// commands once per frame.  No game logic is performed here.

use std::collections::BTreeMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use tracing::warn;

use board_shooter::entities::{EntityId, EntityKind, GameState};
use board_shooter::geometry::{Size, Vector};
use board_shooter::render::{LayoutConstant, Presenter, RenderCommand};
use board_shooter::viewport::{self, BOARD_COLUMN, BOARD_ROW, CELL_HEIGHT, CELL_WIDTH};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_SHOOTER: Color = Color::White;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_WARNING: Color = Color::Red;

// ── Sprite table ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Sprite {
    kind: EntityKind,
    size: Size,
    /// `None` until the first `Place`.
    offset: Option<Vector>,
}

#[derive(Default)]
pub struct TerminalPresenter {
    sprites: BTreeMap<EntityId, Sprite>,
    layout: Vec<LayoutConstant>,
}

impl Presenter for TerminalPresenter {
    fn layout(&mut self, constants: &[LayoutConstant]) {
        self.layout = constants.to_vec();
    }

    fn present(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::Attach { id, kind, size } => {
                self.sprites.insert(
                    *id,
                    Sprite {
                        kind: *kind,
                        size: *size,
                        offset: None,
                    },
                );
            }
            RenderCommand::Place { id, offset } => match self.sprites.get_mut(id) {
                Some(sprite) => sprite.offset = Some(*offset),
                None => warn!(id = %id, "place for a sprite that was never attached"),
            },
            RenderCommand::Remove { id } => {
                self.sprites.remove(id);
            }
        }
    }
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn layout_value(&self, name: &str) -> Option<f32> {
        self.layout.iter().find(|c| c.name == name).map(|c| c.value)
    }

    fn count(&self, kind: EntityKind) -> usize {
        self.sprites.values().filter(|s| s.kind == kind).count()
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    presenter: &TerminalPresenter,
    state: &GameState,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let bounds = state.board.bounds();
    let columns = (bounds.width / CELL_WIDTH).round() as u16;
    let rows = (bounds.height / CELL_HEIGHT).round() as u16;

    if columns == 0 || rows == 0 {
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(style::SetForegroundColor(C_WARNING))?;
        out.queue(Print("Terminal too small — enlarge the window"))?;
    } else {
        draw_border(out, columns, rows)?;
        draw_hud(out, presenter, state, columns)?;

        // Bullets after shooters so a fresh shot is visible over the sprite
        for kind in [EntityKind::Shooter, EntityKind::Bullet] {
            for sprite in presenter.sprites.values().filter(|s| s.kind == kind) {
                draw_sprite(out, sprite, state)?;
            }
        }

        draw_controls_hint(out, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, BOARD_ROW + rows + 2))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, columns: u16, rows: u16) -> std::io::Result<()> {
    let bar = "─".repeat(columns as usize);

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(BOARD_COLUMN - 1, BOARD_ROW - 1))?;
    out.queue(Print(format!("┌{}┐", bar)))?;

    out.queue(cursor::MoveTo(BOARD_COLUMN - 1, BOARD_ROW + rows))?;
    out.queue(Print(format!("└{}┘", bar)))?;

    for row in BOARD_ROW..BOARD_ROW + rows {
        out.queue(cursor::MoveTo(BOARD_COLUMN - 1, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(BOARD_COLUMN + columns, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    presenter: &TerminalPresenter,
    state: &GameState,
    columns: u16,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(BOARD_COLUMN, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Bullets:{:>4}  Tick:{:>7}",
        presenter.count(EntityKind::Bullet),
        state.tick_count
    )))?;

    if let (Some(w), Some(h)) = (
        presenter.layout_value("board-width"),
        presenter.layout_value("board-height"),
    ) {
        let dims = format!("{}×{}", w, h);
        let x = (BOARD_COLUMN + columns).saturating_sub(dims.chars().count() as u16);
        out.queue(cursor::MoveTo(x, 0))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(dims))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, sprite: &Sprite, state: &GameState) -> std::io::Result<()> {
    let Some(offset) = sprite.offset else {
        return Ok(());
    };
    let cells = viewport::sprite_cells(&state.board, offset, sprite.size);
    let top_row = cells.iter().map(|&(_, row)| row).min();

    for (column, row) in cells {
        out.queue(cursor::MoveTo(column, row))?;
        match sprite.kind {
            EntityKind::Shooter => {
                // Nose on the top row, hull below it
                out.queue(style::SetForegroundColor(C_SHOOTER))?;
                out.queue(Print(if Some(row) == top_row { "▲" } else { "█" }))?;
            }
            EntityKind::Bullet => {
                out.queue(style::SetForegroundColor(C_BULLET))?;
                out.queue(Print("║"))?;
            }
        }
    }
    Ok(())
}

// ── Controls hint (below the board) ───────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(BOARD_COLUMN, BOARD_ROW + rows + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Mouse : Move   Click : Shoot   Q : Quit"))?;
    Ok(())
}

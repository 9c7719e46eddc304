/// Mapping between terminal cells and absolute board units.
///
/// One column is `CELL_WIDTH` units wide and one row `CELL_HEIGHT` units tall,
/// so the default 400×600 board occupies 40×30 cells.  Layout, top to bottom:
/// HUD row, frame top, board rows, frame bottom, hint row.

use crate::board::{Board, BoundingBox};
use crate::geometry::{Position, Size, Vector};

pub const CELL_WIDTH: f32 = 10.0;
pub const CELL_HEIGHT: f32 = 20.0;

/// First column inside the left frame wall.
pub const BOARD_COLUMN: u16 = 1;
/// First row inside the top frame bar (row 0 is the HUD).
pub const BOARD_ROW: u16 = 2;

/// Rows that are never board: HUD, two frame bars, hint line.
const RESERVED_ROWS: u16 = 4;
/// Columns that are never board: two frame walls.
const RESERVED_COLUMNS: u16 = 2;

/// Centre of a terminal cell in absolute units.
pub fn cell_to_absolute(column: u16, row: u16) -> Position {
    Vector::new(
        (column as f32 + 0.5) * CELL_WIDTH,
        (row as f32 + 0.5) * CELL_HEIGHT,
    )
}

/// Cell containing an absolute point, `None` left of or above the screen.
pub fn absolute_to_cell(pos: Position) -> Option<(u16, u16)> {
    if pos.x < 0.0 || pos.y < 0.0 {
        return None;
    }
    let column = (pos.x / CELL_WIDTH).floor();
    let row = (pos.y / CELL_HEIGHT).floor();
    if column > u16::MAX as f32 || row > u16::MAX as f32 {
        return None;
    }
    Some((column as u16, row as u16))
}

/// Board size in whole cells: the logical size, shrunk to what the terminal
/// can show.
pub fn board_cells(logical: Size, term_columns: u16, term_rows: u16) -> (u16, u16) {
    let want_columns = (logical.width / CELL_WIDTH).floor().max(1.0) as u16;
    let want_rows = (logical.height / CELL_HEIGHT).floor().max(1.0) as u16;
    let fit_columns = term_columns.saturating_sub(RESERVED_COLUMNS);
    let fit_rows = term_rows.saturating_sub(RESERVED_ROWS);
    (want_columns.min(fit_columns), want_rows.min(fit_rows))
}

/// Measure where the board lands on a terminal of the given size.
pub fn measure_board(logical: Size, term_columns: u16, term_rows: u16) -> BoundingBox {
    let (columns, rows) = board_cells(logical, term_columns, term_rows);
    BoundingBox::new(
        BOARD_COLUMN as f32 * CELL_WIDTH,
        BOARD_ROW as f32 * CELL_HEIGHT,
        columns as f32 * CELL_WIDTH,
        rows as f32 * CELL_HEIGHT,
    )
}

/// Cells covered by a sprite whose lower-left corner sits at `offset`
/// (board-relative), clipped to the board.
pub fn sprite_cells(board: &Board, offset: Vector, size: Size) -> Vec<(u16, u16)> {
    let bounds = board.bounds();
    let top_left = board.to_absolute(offset + Vector::new(0.0, size.height));
    let columns = (size.width / CELL_WIDTH).round().max(1.0) as i64;
    let rows = (size.height / CELL_HEIGHT).round().max(1.0) as i64;

    let first_column = (top_left.x / CELL_WIDTH).floor() as i64;
    let first_row = (top_left.y / CELL_HEIGHT).floor() as i64;

    let min_column = (bounds.left / CELL_WIDTH).round() as i64;
    let min_row = (bounds.top / CELL_HEIGHT).round() as i64;
    let max_column = min_column + (bounds.width / CELL_WIDTH).round() as i64;
    let max_row = min_row + (bounds.height / CELL_HEIGHT).round() as i64;

    // Clip before walking: only cells on the board are ever visited.
    let row_range = first_row.max(min_row)..first_row.saturating_add(rows).min(max_row);
    let column_range =
        first_column.max(min_column)..first_column.saturating_add(columns).min(max_column);

    let mut cells = Vec::new();
    for row in row_range {
        for column in column_range.clone() {
            cells.push((column as u16, row as u16));
        }
    }
    cells
}

use std::fmt;

use minefield_core::{Board, CellView, EngineCell, GameStatus};
use serde::Serialize;

/// Machine-readable view of the whole board.
#[derive(Serialize, Debug)]
pub struct Snapshot {
    pub status: GameStatus,
    pub rows: u8,
    pub cols: u8,
    pub mine_count: u16,
    pub mines_left: i32,
    pub cells: Vec<Vec<CellView>>,
}

impl Snapshot {
    pub fn from_board(board: &Board) -> Self {
        let (rows, cols) = board.size();
        let cells = (0..rows)
            .map(|row| {
                (0..cols)
                    .filter_map(|col| board.cell((row, col)).ok())
                    .collect()
            })
            .collect();

        Self {
            status: board.status(),
            rows,
            cols,
            mine_count: board.mine_count(),
            mines_left: board.mines_left(),
            cells,
        }
    }
}

pub fn status_line(board: &Board) -> String {
    match board.status() {
        GameStatus::InProgress => format!("Mines: {}", board.mine_count()),
        GameStatus::Lost => "Game Over".to_owned(),
        GameStatus::Won => "You Win!".to_owned(),
    }
}

fn cell_glyph(board: &Board, coords: (u8, u8)) -> char {
    match board.cell_at(coords) {
        EngineCell::Revealed(0) => '.',
        EngineCell::Revealed(count) => char::from(b'0' + count),
        EngineCell::Exploded => 'X',
        EngineCell::Flagged => 'F',
        EngineCell::Hidden => match board.mine_layout_if_finished() {
            Some(layout) if layout.contains_mine(coords) => '*',
            _ => '#',
        },
    }
}

/// Text grid with column and row labels, followed by the status line.
pub struct TextBoard<'a>(pub &'a Board);

impl fmt::Display for TextBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let (rows, cols) = board.size();

        write!(f, "    ")?;
        for col in 0..cols {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{:>3} ", row)?;
            for col in 0..cols {
                write!(f, "{:>3}", cell_glyph(board, (row, col)))?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", status_line(board))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minefield_core::{MineLayout, RevealOutcome};

    fn board(size: (u8, u8), mines: &[(u8, u8)]) -> Board {
        Board::from_layout(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn hidden_board_shows_static_mine_count() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.toggle_flag((1, 1)).unwrap();

        assert_eq!(status_line(&board), "Mines: 1");
        assert_eq!(
            TextBoard(&board).to_string(),
            "      0  1\n  0   #  #\n  1   #  F\nMines: 1\n"
        );
    }

    #[test]
    fn lost_board_shows_mines() {
        let mut board = board((1, 4), &[(0, 0), (0, 2)]);
        assert_eq!(board.reveal((0, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);

        assert_eq!(
            TextBoard(&board).to_string(),
            "      0  1  2  3\n  0   X  2  *  #\nGame Over\n"
        );
    }

    #[test]
    fn won_board_reports_win() {
        let mut board = board((1, 3), &[(0, 0)]);
        board.reveal((0, 2)).unwrap();

        assert_eq!(TextBoard(&board).to_string(), "      0  1  2\n  0   *  1  .\nYou Win!\n");
    }

    #[test]
    fn snapshot_masks_hidden_mines() {
        let board = board((2, 2), &[(0, 0)]);
        let snapshot = Snapshot::from_board(&board);

        assert_eq!(snapshot.cells.len(), 2);
        assert!(snapshot.cells.iter().flatten().all(|cell| !cell.is_mine));
        assert_eq!(snapshot.mines_left, 1);
    }
}

//! Board tests

use jam_tetris::core::Board;
use jam_tetris::types::{BOARD_WIDTH, EMPTY_STYLE, INVISIBLE_ROWS, VISIBLE_ROWS};

const HEIGHT: usize = VISIBLE_ROWS + INVISIBLE_ROWS;

fn fill_row(board: &mut Board, y: i16, style: u8) {
    for x in 0..board.width() as i16 {
        board.set(x, y, style);
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(BOARD_WIDTH, HEIGHT);
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), HEIGHT);

    for y in 0..HEIGHT as i16 {
        for x in 0..BOARD_WIDTH as i16 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.get(x, y), Some(EMPTY_STYLE));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(BOARD_WIDTH, HEIGHT);

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i16, 0), None);
    assert_eq!(board.get(0, HEIGHT as i16), None);

    // Out of bounds is never a valid position.
    assert!(!board.is_valid(-1, 5));
    assert!(!board.is_occupied(-1, 5));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new(BOARD_WIDTH, HEIGHT);

    assert!(board.set(5, 10, 6));
    assert_eq!(board.get(5, 10), Some(6));
    assert!(board.is_occupied(5, 10));
    assert!(!board.is_valid(5, 10));

    assert!(!board.set(10, 10, 6));
    assert!(board.set(5, 10, EMPTY_STYLE));
    assert!(board.is_valid(5, 10));
}

#[test]
fn test_row_full_detection() {
    let mut board = Board::new(BOARD_WIDTH, HEIGHT);
    fill_row(&mut board, 20, 1);
    assert!(board.is_row_full(20));

    board.set(3, 20, EMPTY_STYLE);
    assert!(!board.is_row_full(20));
}

#[test]
fn test_full_rows_reported_top_to_bottom() {
    let mut board = Board::new(BOARD_WIDTH, HEIGHT);
    fill_row(&mut board, 20, 1);
    fill_row(&mut board, 18, 2);
    board.set(0, 19, 3);

    let rows = board.full_rows_in(17, 20);
    assert_eq!(rows.as_slice(), &[18, 20]);
}

#[test]
fn test_remove_rows_compacts_downward() {
    let mut board = Board::new(BOARD_WIDTH, HEIGHT);
    fill_row(&mut board, 20, 1);
    board.set(4, 19, 5);
    fill_row(&mut board, 18, 2);
    board.set(7, 17, 6);

    let removed = board.remove_rows(&[18, 20]);
    assert_eq!(removed, 2);

    // Survivors fall by the number of removed rows below them.
    assert_eq!(board.get(4, 20), Some(5));
    assert_eq!(board.get(7, 19), Some(6));
    assert!(board.row(18).iter().all(|&c| c == EMPTY_STYLE));
    assert!(board.row(0).iter().all(|&c| c == EMPTY_STYLE));
    assert_eq!(board.cells().iter().filter(|&&c| c != EMPTY_STYLE).count(), 2);
}

#[test]
fn test_any_filled_above_counts_from_top() {
    let mut board = Board::new(BOARD_WIDTH, HEIGHT);
    board.set(2, INVISIBLE_ROWS as i16, 4);

    assert!(!board.any_filled_above(INVISIBLE_ROWS));
    assert!(board.any_filled_above(INVISIBLE_ROWS + 1));
}

#[test]
fn test_clear_empties_board() {
    let mut board = Board::new(BOARD_WIDTH, HEIGHT);
    fill_row(&mut board, 20, 7);
    board.clear();
    assert_eq!(board, Board::new(BOARD_WIDTH, HEIGHT));
}

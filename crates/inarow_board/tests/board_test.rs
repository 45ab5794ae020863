//! Tests for placement rules, gravity, fullness and square-grid wins.

use inarow_board::{
    Board, BoardSize, Coord, ExpansionPolicy, GridTopology, Line, PlacementError, PlayerColor,
    RoomOptions, from_storage_index, to_storage_index,
};

fn gomoku() -> Board {
    Board::new(5, false, GridTopology::Square, BoardSize::Infinite)
}

fn fixed(width: u32, height: u32, n: u32, gravity: bool) -> Board {
    Board::new(
        n,
        gravity,
        GridTopology::Square,
        BoardSize::Finite {
            width,
            height,
            expansion: ExpansionPolicy::default(),
        },
    )
}

#[test]
fn test_storage_index_round_trip() {
    for n in -1000..=1000 {
        assert_eq!(from_storage_index(to_storage_index(n)), n);
    }
    for i in 0..2000u64 {
        assert_eq!(to_storage_index(from_storage_index(i)), i);
    }
}

#[test]
fn test_set_cell_then_occupied() {
    let mut board = gomoku();
    assert!(!board.has_cell(-3, 7));

    let placement = board.set_cell(-3, 7, PlayerColor::Blue).expect("Valid placement");
    assert_eq!(placement.at, Coord::new(-3, 7));
    assert!(!placement.is_win());
    assert!(board.has_cell(-3, 7));
    assert_eq!(board.cell(-3, 7), Some(PlayerColor::Blue));

    let again = board.set_cell(-3, 7, PlayerColor::Red);
    assert_eq!(again, Err(PlacementError::Occupied));
    assert_eq!(board.cell(-3, 7), Some(PlayerColor::Blue));
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_five_in_a_row_wins() {
    let mut board = gomoku();
    for x in 0..4 {
        let placement = board.set_cell(x, 0, PlayerColor::Red).expect("Valid placement");
        assert!(!placement.is_win(), "No win after {} pieces", x + 1);
    }
    let placement = board.set_cell(4, 0, PlayerColor::Red).expect("Valid placement");
    assert_eq!(
        placement.winning_lines,
        Some(vec![Line::new(Coord::new(0, 0), Coord::new(4, 0))])
    );
}

#[test]
fn test_gap_filled_in_the_middle_wins() {
    let mut board = gomoku();
    for x in [0, 1, 3, 4] {
        board.set_cell(x, 2, PlayerColor::Green).expect("Valid placement");
    }
    let placement = board.set_cell(2, 2, PlayerColor::Green).expect("Valid placement");
    assert_eq!(
        placement.winning_lines,
        Some(vec![Line::new(Coord::new(0, 2), Coord::new(4, 2))])
    );
}

#[test]
fn test_simultaneous_lines_all_reported() {
    let mut board = gomoku();
    for i in [0, 1, 3, 4] {
        board.set_cell(i, 2, PlayerColor::Red).expect("Valid placement");
        board.set_cell(2, i, PlayerColor::Red).expect("Valid placement");
    }
    let placement = board.set_cell(2, 2, PlayerColor::Red).expect("Valid placement");
    assert_eq!(
        placement.winning_lines,
        Some(vec![
            Line::new(Coord::new(0, 2), Coord::new(4, 2)),
            Line::new(Coord::new(2, 0), Coord::new(2, 4)),
        ])
    );
}

#[test]
fn test_uphill_diagonal_wins() {
    let mut board = gomoku();
    for (x, y) in [(0, 4), (1, 3), (2, 2), (3, 1)] {
        board.set_cell(x, y, PlayerColor::Yellow).expect("Valid placement");
    }
    let placement = board.set_cell(4, 0, PlayerColor::Yellow).expect("Valid placement");
    assert_eq!(
        placement.winning_lines,
        Some(vec![Line::new(Coord::new(0, 4), Coord::new(4, 0))])
    );
}

#[test]
fn test_other_color_breaks_run() {
    let mut board = gomoku();
    for x in [0, 1, 3, 4] {
        board.set_cell(x, 0, PlayerColor::Red).expect("Valid placement");
    }
    let placement = board.set_cell(2, 0, PlayerColor::Green).expect("Valid placement");
    assert!(!placement.is_win());
}

#[test]
fn test_finite_bounds_reject() {
    let mut board = fixed(3, 3, 3, false);
    assert_eq!(board.set_cell(-1, 0, PlayerColor::Red), Err(PlacementError::OutOfBounds));
    assert_eq!(board.set_cell(3, 0, PlayerColor::Red), Err(PlacementError::OutOfBounds));
    assert_eq!(board.set_cell(0, 3, PlayerColor::Red), Err(PlacementError::OutOfBounds));
    assert_eq!(board.occupied_count(), 0);
    assert!(board.set_cell(2, 2, PlayerColor::Red).is_ok());
}

#[test]
fn test_gravity_drops_to_lowest_free_row() {
    let mut board = Board::from_options(&RoomOptions::connect_four());

    let first = board.set_cell(3, 0, PlayerColor::Red).expect("Valid placement");
    assert_eq!(first.at, Coord::new(3, 5));

    let second = board.set_cell(3, 5, PlayerColor::Green).expect("Valid placement");
    assert_eq!(second.at, Coord::new(3, 4));

    let third = board.set_cell(3, 100, PlayerColor::Red).expect("Requested row is ignored");
    assert_eq!(third.at, Coord::new(3, 3));
    assert_eq!(*board.last_placed(), Some(Coord::new(3, 3)));
}

#[test]
fn test_gravity_full_column_rejected() {
    let mut board = Board::from_options(&RoomOptions::connect_four());
    let colors = [PlayerColor::Red, PlayerColor::Green];
    for i in 0..6 {
        board.set_cell(3, 0, colors[i % 2]).expect("Column has room");
    }
    assert_eq!(board.set_cell(3, 0, PlayerColor::Red), Err(PlacementError::OutOfBounds));
    assert_eq!(board.set_cell(7, 0, PlayerColor::Red), Err(PlacementError::OutOfBounds));
    assert_eq!(board.occupied_count(), 6);
}

#[test]
fn test_gravity_vertical_win() {
    let mut board = Board::from_options(&RoomOptions::connect_four());
    for _ in 0..3 {
        board.set_cell(0, 0, PlayerColor::Red).expect("Valid placement");
    }
    let placement = board.set_cell(0, 0, PlayerColor::Red).expect("Valid placement");
    assert_eq!(placement.at, Coord::new(0, 2));
    assert_eq!(
        placement.winning_lines,
        Some(vec![Line::new(Coord::new(0, 2), Coord::new(0, 5))])
    );
}

#[test]
fn test_unbounded_gravity_uses_fixed_floor() {
    let mut board = Board::new(4, true, GridTopology::Square, BoardSize::Infinite);
    let first = board.set_cell(-40, 0, PlayerColor::Red).expect("Valid placement");
    assert_eq!(first.at, Coord::new(-40, 9));
    let second = board.set_cell(-40, 0, PlayerColor::Green).expect("Valid placement");
    assert_eq!(second.at, Coord::new(-40, 8));
}

#[test]
fn test_full_only_when_every_cell_taken() {
    let mut board = fixed(3, 3, 3, false);
    let moves = [
        (0, 0, PlayerColor::Red),
        (1, 0, PlayerColor::Green),
        (2, 0, PlayerColor::Red),
        (1, 1, PlayerColor::Green),
        (0, 1, PlayerColor::Red),
        (2, 1, PlayerColor::Green),
        (1, 2, PlayerColor::Red),
        (0, 2, PlayerColor::Green),
    ];
    for (x, y, color) in moves {
        let placement = board.set_cell(x, y, color).expect("Valid placement");
        assert!(!placement.is_win());
        assert!(!board.is_full());
    }
    let last = board.set_cell(2, 2, PlayerColor::Red).expect("Valid placement");
    assert!(!last.is_win());
    assert!(board.is_full());
}

#[test]
fn test_unbounded_and_expanding_boards_never_full() {
    let mut unbounded = gomoku();
    unbounded.set_cell(0, 0, PlayerColor::Red).expect("Valid placement");
    assert!(!unbounded.is_full());

    let mut growing = Board::new(
        3,
        false,
        GridTopology::Square,
        BoardSize::Finite {
            width: 1,
            height: 1,
            expansion: ExpansionPolicy {
                margin: 1,
                ..ExpansionPolicy::default()
            },
        },
    );
    growing.set_cell(0, 0, PlayerColor::Red).expect("Valid placement");
    assert!(!growing.is_full());
}

#[test]
fn test_iter_visits_every_cell() {
    let mut board = gomoku();
    let cells = [(0, 0), (-1, 0), (5, -5), (-7, 3)];
    for (x, y) in cells {
        board.set_cell(x, y, PlayerColor::Cyan).expect("Valid placement");
    }
    let mut seen: Vec<Coord> = board.iter().map(|(c, _)| c).collect();
    seen.sort();
    let mut expected: Vec<Coord> = cells.iter().map(|&(x, y)| Coord::new(x, y)).collect();
    expected.sort();
    assert_eq!(seen, expected);
    assert!((&board).into_iter().all(|(_, color)| color == PlayerColor::Cyan));
}

#[test]
fn test_color_out_of_range_rejected() {
    let err = PlayerColor::try_from(8u8).expect_err("Only 8 colors");
    assert_eq!(err, PlacementError::InvalidColor(8));
    assert_eq!(err.to_string(), "Color must be between 0 and 7");
    assert_eq!(PlayerColor::try_from(7u8), Ok(PlayerColor::Pink));
}

#[test]
fn test_rejection_reasons() {
    assert_eq!(PlacementError::OutOfBounds.to_string(), "Cell out of bounds.");
    assert_eq!(PlacementError::Occupied.to_string(), "Cell already set");
}

#[test]
fn test_placements_at_coordinate_limits() {
    let extremes = [
        (i64::MAX, 0),
        (i64::MIN, 0),
        (0, i64::MAX),
        (0, i64::MIN),
        (i64::MAX, i64::MAX),
        (i64::MIN, i64::MIN),
        (i64::MAX, i64::MIN),
        (i64::MIN, i64::MAX),
    ];
    for topology in [GridTopology::Square, GridTopology::Hex, GridTopology::Triangle] {
        let mut board = Board::new(5, false, topology, BoardSize::Infinite);
        for (x, y) in extremes {
            let placement = board
                .set_cell(x, y, PlayerColor::Red)
                .expect("Any i64 coordinate is playable");
            assert_eq!(placement.at, Coord::new(x, y));
            assert_eq!(placement.winning_lines, None);
        }
        assert_eq!(board.occupied_count(), extremes.len());
    }
}

#[test]
fn test_win_ending_at_coordinate_limit() {
    let mut board = Board::new(3, false, GridTopology::Square, BoardSize::Infinite);
    board
        .set_cell(i64::MAX - 2, i64::MIN, PlayerColor::Blue)
        .expect("Valid placement");
    board
        .set_cell(i64::MAX, i64::MIN, PlayerColor::Blue)
        .expect("Valid placement");
    let placement = board
        .set_cell(i64::MAX - 1, i64::MIN, PlayerColor::Blue)
        .expect("Valid placement");
    assert_eq!(
        placement.winning_lines,
        Some(vec![Line::new(
            Coord::new(i64::MAX - 2, i64::MIN),
            Coord::new(i64::MAX, i64::MIN)
        )])
    );
}

#[test]
fn test_gravity_column_at_coordinate_limit() {
    let mut board = Board::new(4, true, GridTopology::Square, BoardSize::Infinite);
    let first = board
        .set_cell(i64::MIN, i64::MAX, PlayerColor::Green)
        .expect("Column is open");
    assert_eq!(first.at, Coord::new(i64::MIN, 9));
    let second = board
        .set_cell(i64::MIN, 0, PlayerColor::Green)
        .expect("Column is open");
    assert_eq!(second.at, Coord::new(i64::MIN, 8));
}

//! Tests for growing finite boards.

use inarow_board::{Board, BoardSize, Bounds, Coord, ExpansionPolicy, GridTopology, PlayerColor};

fn growing(width: u32, height: u32, policy: ExpansionPolicy, topology: GridTopology) -> Board {
    Board::new(
        5,
        false,
        topology,
        BoardSize::Finite {
            width,
            height,
            expansion: policy,
        },
    )
}

fn margin(m: u32) -> ExpansionPolicy {
    ExpansionPolicy {
        margin: m,
        ..ExpansionPolicy::default()
    }
}

#[test]
fn test_placement_near_right_edge_grows_right_only() {
    let mut board = growing(5, 5, margin(2), GridTopology::Square);
    board.set_cell(4, 2, PlayerColor::Red).expect("Valid placement");
    assert_eq!(
        *board.bounds(),
        Bounds {
            min_x: Some(0),
            max_x: Some(7),
            min_y: Some(0),
            max_y: Some(5),
        }
    );
    assert!(board.within_bounds(6, 2));
    assert!(!board.within_bounds(7, 2));
}

#[test]
fn test_corner_placement_grows_two_edges() {
    let mut board = growing(5, 5, margin(2), GridTopology::Square);
    board.set_cell(0, 0, PlayerColor::Red).expect("Valid placement");
    let bounds = *board.bounds();
    assert_eq!(bounds.min_x, Some(-2));
    assert_eq!(bounds.min_y, Some(-2));
    assert_eq!(bounds.max_x, Some(5));
    assert_eq!(bounds.max_y, Some(5));
}

#[test]
fn test_centre_placement_does_not_grow() {
    let mut board = growing(5, 5, margin(1), GridTopology::Square);
    board.set_cell(2, 2, PlayerColor::Red).expect("Valid placement");
    assert_eq!(*board.bounds(), Bounds::sized(5, 5));
}

#[test]
fn test_absolute_density_gates_growth() {
    let policy = ExpansionPolicy {
        margin: 2,
        density: 2,
        density_is_percent: false,
    };
    let mut board = growing(5, 5, policy, GridTopology::Square);

    board.set_cell(4, 2, PlayerColor::Red).expect("Valid placement");
    assert_eq!(board.bounds().max_x, Some(5), "One piece is below the gate");

    board.set_cell(4, 3, PlayerColor::Green).expect("Valid placement");
    assert_eq!(board.bounds().max_x, Some(7));
    assert_eq!(board.bounds().max_y, Some(5), "Bottom band holds one piece");
}

#[test]
fn test_percent_density_gates_growth() {
    let policy = ExpansionPolicy {
        margin: 1,
        density: 40,
        density_is_percent: true,
    };
    let mut board = growing(5, 5, policy, GridTopology::Square);

    board.set_cell(4, 2, PlayerColor::Red).expect("Valid placement");
    assert_eq!(board.bounds().max_x, Some(5), "20% of the band");

    board.set_cell(4, 0, PlayerColor::Red).expect("Valid placement");
    assert_eq!(board.bounds().max_x, Some(6), "40% of the band");
    assert_eq!(board.bounds().min_y, Some(0), "Top band is only 20% full");
}

#[test]
fn test_gravity_board_grows_sideways_only() {
    let mut board = Board::new(
        4,
        true,
        GridTopology::Square,
        BoardSize::Finite {
            width: 7,
            height: 6,
            expansion: margin(1),
        },
    );
    let placement = board.set_cell(6, 0, PlayerColor::Red).expect("Valid placement");
    assert_eq!(placement.at, Coord::new(6, 5));
    assert_eq!(board.bounds().max_x, Some(8));
    assert_eq!(board.bounds().min_y, Some(0));
    assert_eq!(board.bounds().max_y, Some(6));
}

#[test]
fn test_triangle_growth_adds_row_pairs() {
    let mut bottom = growing(4, 3, margin(1), GridTopology::Triangle);
    bottom.set_cell(1, 5, PlayerColor::Red).expect("Valid placement");
    assert_eq!(bottom.bounds().max_y, Some(9));
    assert_eq!(bottom.bounds().min_x, Some(0));
    assert_eq!(bottom.bounds().max_x, Some(4));

    let mut top = growing(4, 3, margin(1), GridTopology::Triangle);
    top.set_cell(1, 1, PlayerColor::Red).expect("Valid placement");
    assert_eq!(top.bounds().min_y, Some(-1));
    assert_eq!(top.bounds().max_y, Some(6));
}

#[test]
fn test_bounds_stay_ordered_through_growth() {
    let mut board = growing(3, 3, margin(1), GridTopology::Square);
    let moves = [(0, 0), (2, 2), (-1, 3), (3, -1), (-2, -2), (4, 4), (1, 1)];
    for (i, (x, y)) in moves.into_iter().enumerate() {
        let color = PlayerColor::from_index(i % 2).expect("Two colors");
        board.set_cell(x, y, color).expect("Placement within grown bounds");
        let rect = board.bounds().rect().expect("Finite board keeps every edge");
        assert!(rect.min_x < rect.max_x);
        assert!(rect.min_y < rect.max_y);
        assert!(rect.contains(Coord::new(x, y)));
    }
    assert!(!board.is_full());
}

use crate::config::{BoardConfig, EngineConfig};
use crate::geometry::{Point, Tag};
use crate::land::merge::DeleteOutcome;
use crate::land::{Board, EraseOutcome, LandError, MergeKind};

fn pts(coords: &[[f64; 2]]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

/// Board with a single green square made from ambient corners and a centre point.
fn board_with_square() -> Board {
    let mut board = Board::default();
    board.add_ambient(pts(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [2.0, 2.0]]));
    board.reveal(&Point::new(2.0, 2.0), Some(3.0), Tag::new("green")).unwrap();
    board
}

#[test]
fn test_add_ambient_dedups_and_tags() {
    let mut board = Board::default();
    let added = board.add_ambient(pts(&[[1.0, 1.0], [1.0, 1.0], [3.0, 2.0]]));

    assert_eq!(added, 2);
    assert!(board.ambient().all(|p| p.tag == Some(Tag::new("red"))));

    let kept = board.add_ambient(vec![Point::tagged(5.0, 5.0, Tag::new("blue"))]);
    assert_eq!(kept, 1);
    assert!(board.ambient().any(|p| p.tag == Some(Tag::new("blue"))));
}

#[test]
fn test_add_ambient_skips_owned_coordinates() {
    let mut board = board_with_square();
    assert_eq!(board.add_ambient(pts(&[[4.0, 0.0]])), 0);
    assert_eq!(board.add_ambient(pts(&[[9.0, 9.0]])), 1);
}

#[test]
fn test_reveal_consumes_swept_ambient() {
    let mut board = Board::default();
    board.add_ambient(pts(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [2.0, 2.0], [50.0, 50.0]]));

    let outcome = board.reveal(&Point::new(2.0, 2.0), Some(3.0), Tag::new("green")).unwrap();

    assert_eq!(outcome.merge.kind, MergeKind::Created);
    assert_eq!(outcome.consumed, 5);
    assert_eq!(outcome.returned, 0);
    assert_eq!(board.ambient_len(), 1);

    let land = board.lands().get(&outcome.merge.land).unwrap();
    assert_eq!(land.boundary(), pts(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]).as_slice());
}

#[test]
fn test_reveal_with_tied_leftmost_points() {
    let mut board = Board::default();
    board.add_ambient(pts(&[[0.0, 2.0], [0.0, 0.0], [0.0, 4.0], [4.0, 0.0], [4.0, 4.0], [2.0, 2.0]]));

    let outcome = board.reveal(&Point::new(2.0, 2.0), Some(5.0), Tag::new("green")).unwrap();

    let land = board.lands().get(&outcome.merge.land).unwrap();
    assert_eq!(land.boundary(), pts(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]).as_slice());
    assert_eq!(land.edges().len(), 4);
}

#[test]
fn test_reveal_uses_configured_radius() {
    let config = EngineConfig {
        board: BoardConfig { reveal_radius: 1.0, ..BoardConfig::default() },
        ..EngineConfig::default()
    };
    let mut board = Board::new(&config);
    board.add_ambient(pts(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0]]));

    let result = board.reveal(&Point::new(0.0, 0.0), None, Tag::new("green"));
    assert_eq!(result, Err(LandError::DegenerateHull { points: 1 }));
    assert_eq!(board.ambient_len(), 3);
    assert!(board.lands().is_empty());
}

#[test]
fn test_contested_reveal_returns_released_points() {
    let mut board = Board::default();
    board.add_ambient(pts(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]));
    board.reveal(&Point::new(2.0, 2.0), Some(3.0), Tag::new("red")).unwrap();

    board.add_ambient(pts(&[[6.0, 2.0], [5.5, 1.0], [5.5, 3.0]]));
    let outcome = board.reveal(&Point::new(5.0, 2.0), Some(2.5), Tag::new("green")).unwrap();

    assert_eq!(outcome.merge.kind, MergeKind::Contested);
    assert_eq!(outcome.merge.removed.len(), 1);
    assert_eq!(outcome.consumed, 3);
    assert_eq!(outcome.returned, 2);
    assert_eq!(board.lands().len(), 1);

    let pool: Vec<Point> = board.ambient().cloned().collect();
    assert_eq!(pool, pts(&[[0.0, 0.0], [0.0, 4.0]]));
}

#[test]
fn test_erase_reshapes_then_removes() {
    let mut board = board_with_square();
    let id = board.lands().lands().next().unwrap().id;

    match board.erase(&Point::new(4.5, 0.2), None).unwrap() {
        EraseOutcome::Erased { point, outcome } => {
            assert_eq!(point, Point::new(4.0, 0.0));
            assert!(matches!(outcome, DeleteOutcome::Reshaped { land, .. } if land == id));
        }
        EraseOutcome::Missed => panic!("(4, 0) is within the default threshold"),
    }
    assert_eq!(board.lands().get(&id).unwrap().len(), 3);
    assert_eq!(board.ambient_len(), 0);

    match board.erase(&Point::new(4.0, 4.1), None).unwrap() {
        EraseOutcome::Erased { outcome: DeleteOutcome::Removed { released, .. }, .. } => {
            assert_eq!(released.len(), 2);
        }
        other => panic!("expected the land to be removed, got {:?}", other),
    }
    assert!(board.lands().is_empty());
    assert_eq!(board.ambient_len(), 2);
}

#[test]
fn test_erase_out_of_reach_misses() {
    let mut board = board_with_square();
    assert_eq!(board.erase(&Point::new(20.0, 20.0), Some(1.0)).unwrap(), EraseOutcome::Missed);
    assert_eq!(board.lands().lands().next().unwrap().len(), 4);
}

#[test]
fn test_save_then_load_on_fresh_board() {
    let board = board_with_square();
    let json = board.save_lands().unwrap();

    let mut fresh = Board::default();
    fresh.add_ambient(pts(&[[0.0, 0.0], [10.0, 10.0]]));
    assert_eq!(fresh.load_lands(&json).unwrap(), 1);

    let loaded = fresh.lands().lands().next().unwrap();
    assert_eq!(loaded.boundary(), board.lands().lands().next().unwrap().boundary());
    // (0, 0) now belongs to the loaded land.
    assert_eq!(fresh.ambient_len(), 1);
}

#[test]
fn test_failed_load_keeps_lands() {
    let mut board = board_with_square();
    assert!(matches!(board.load_lands("[{\"tag\": 1}]"), Err(LandError::Persistence(_))));
    assert_eq!(board.lands().len(), 1);
}

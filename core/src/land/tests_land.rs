use crate::geometry::{Point, Tag};
use crate::land::sequencer::{is_simple, Sequencer};
use crate::land::types::grow_set;
use crate::land::{Land, LandError, LandId};
use indexmap::IndexSet;

fn pts(coords: &[[f64; 2]]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

fn set(coords: &[[f64; 2]]) -> IndexSet<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

fn square(tag: &str) -> Land {
    Land::from_hull(Tag::new(tag), pts(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]])).unwrap()
}

#[test]
fn test_from_hull_builds_closed_edges() {
    let land = square("green");
    assert_eq!(land.len(), 4);
    assert_eq!(land.edges().len(), 4);
    assert_eq!(land.edges()[3].p1, Point::new(0.0, 4.0));
    assert_eq!(land.edges()[3].p2, Point::new(0.0, 0.0));
    assert!(land.boundary().iter().all(|p| p.tag == Some(Tag::new("green"))));
    assert!(land.edges().iter().all(|e| e.tag == Some(Tag::new("green"))));
}

#[test]
fn test_from_hull_rejects_degenerate() {
    let result = Land::from_hull(Tag::new("green"), pts(&[[0.0, 0.0], [1.0, 1.0]]));
    assert_eq!(result, Err(LandError::DegenerateHull { points: 2 }));
}

#[test]
fn test_from_hull_collapses_repeated_points() {
    let land = Land::from_hull(
        Tag::new("green"),
        pts(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]),
    )
    .unwrap();
    assert_eq!(land.boundary(), pts(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]).as_slice());
    assert_eq!(land.edges().len(), 4);

    let short = Land::from_hull(Tag::new("green"), pts(&[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]));
    assert_eq!(short, Err(LandError::DegenerateHull { points: 2 }));
}

#[test]
fn test_grow_with_nothing_is_noop() {
    let mut land = square("green");
    let before = land.point_set();

    let dropped = land.grow(&[], &IndexSet::new(), &IndexSet::new(), &Sequencer::default()).unwrap();

    assert!(dropped.is_empty());
    assert_eq!(land.point_set(), before);
    assert_eq!(land.edges().len(), 4);
}

#[test]
fn test_grow_absorbs_hull() {
    let mut land = square("green");
    let hull = pts(&[[4.0, 0.0], [5.5, 1.0], [6.0, 2.0], [5.5, 3.0], [4.0, 4.0]]);
    let inside = set(&[[4.0, 0.0], [4.0, 4.0]]);

    land.grow(&hull, &inside, &IndexSet::new(), &Sequencer::default()).unwrap();

    assert_eq!(land.point_set(), set(&[[0.0, 0.0], [0.0, 4.0], [5.5, 1.0], [6.0, 2.0], [5.5, 3.0]]));
    assert_eq!(land.edges().len(), 5);
    assert!(is_simple(land.boundary()));
    assert!(land.boundary().iter().all(|p| p.tag == Some(Tag::new("green"))));
}

#[test]
fn test_grow_set_keeps_ceded_points() {
    let boundary = set(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]);
    let hull = pts(&[[4.0, 0.0], [6.0, 0.0], [6.0, 4.0]]);
    let inside = set(&[[4.0, 0.0], [4.0, 4.0]]);

    let without = grow_set(&boundary, &hull, &inside, &IndexSet::new());
    assert_eq!(without, set(&[[0.0, 0.0], [0.0, 4.0], [6.0, 0.0], [6.0, 4.0]]));

    let ceded = set(&[[4.0, 4.0]]);
    let with = grow_set(&boundary, &hull, &inside, &ceded);
    assert_eq!(with, set(&[[0.0, 0.0], [4.0, 4.0], [0.0, 4.0], [6.0, 0.0], [6.0, 4.0]]));
}

#[test]
fn test_mini_grow_takes_only_swept_slice() {
    let foreign = square("red");
    let mut land = Land::from_hull(Tag::new("green"), pts(&[[5.0, 0.0], [8.0, 2.0], [5.0, 4.0]])).unwrap();
    let inside = set(&[[4.0, 0.0], [4.0, 4.0]]);

    land.mini_grow(&foreign, &inside, &Sequencer::default()).unwrap();

    let expected: Vec<Point> = pts(&[[5.0, 0.0], [4.0, 0.0], [4.0, 4.0], [5.0, 4.0], [8.0, 2.0]]);
    assert_eq!(land.boundary(), expected.as_slice());
    assert!(land.boundary().iter().all(|p| p.tag == Some(Tag::new("green"))));
    // The foreign land is left for the orchestrator to update.
    assert_eq!(foreign.len(), 4);
    assert!(foreign.boundary().iter().all(|p| p.tag == Some(Tag::new("red"))));
}

#[test]
fn test_delete_point_resequences() {
    let mut land = Land::from_boundary(
        LandId::new(),
        Tag::new("blue"),
        pts(&[[0.0, 0.0], [4.0, 0.0], [6.0, 2.0], [4.0, 4.0], [0.0, 4.0]]),
    )
    .unwrap();

    land.delete_point(&Point::new(6.0, 2.0), &Sequencer::default()).unwrap();

    assert_eq!(land.point_set(), set(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]));
    assert_eq!(land.edges().len(), 4);
    assert!(is_simple(land.boundary()));
}

#[test]
fn test_delete_point_on_triangle_is_underpopulated() {
    let mut land = Land::from_hull(Tag::new("blue"), pts(&[[0.0, 0.0], [4.0, 0.0], [2.0, 3.0]])).unwrap();
    let before = land.clone();

    let result = land.delete_point(&Point::new(2.0, 3.0), &Sequencer::default());

    assert_eq!(result, Err(LandError::UnderpopulatedRegion { land: land.id, remaining: 2 }));
    assert_eq!(land, before);
}

#[test]
fn test_delete_unknown_point_is_noop() {
    let mut land = square("green");
    let before = land.clone();
    let dropped = land.delete_point(&Point::new(100.0, 100.0), &Sequencer::default()).unwrap();
    assert!(dropped.is_empty());
    assert_eq!(land, before);
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Ownership key and display colour of a land.
///
/// Two lands with the same tag are allowed to merge; lands with different tags
/// only trade the slice of boundary an interaction sweeps over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Tag carried by points computed from two segments rather than revealed by the user.
    pub fn intersection() -> Self {
        Self("intersection".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Bit-level coordinate key. `-0.0` is folded onto `0.0` so both compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(u64, u64);

impl PointKey {
    fn of(x: f64, y: f64) -> Self {
        // Adding 0.0 turns -0.0 into +0.0 and leaves every other value alone.
        Self((x + 0.0).to_bits(), (y + 0.0).to_bits())
    }
}

/// A point on the survey plane.
///
/// Equality and hashing only look at the coordinates: the tag is display state
/// and changes whenever a point is handed from one land to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, tag: None }
    }

    pub fn tagged(x: f64, y: f64, tag: Tag) -> Self {
        Self { x, y, tag: Some(tag) }
    }

    pub fn key(&self) -> PointKey {
        PointKey::of(self.x, self.y)
    }

    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn distance(&self, other: &Point) -> f64 {
        super::utils_2d::distance(self.coords(), other.coords())
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

/// A straight edge between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,
}

impl Segment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2, tag: None }
    }

    pub fn tagged(p1: Point, p2: Point, tag: Tag) -> Self {
        Self { p1, p2, tag: Some(tag) }
    }

    /// True when both segments use the same coordinate as one of their endpoints.
    pub fn shares_endpoint(&self, other: &Segment) -> bool {
        self.p1 == other.p1 || self.p1 == other.p2 || self.p2 == other.p1 || self.p2 == other.p2
    }

    pub fn intersects(&self, other: &Segment) -> bool {
        super::intersection::segments_intersect(self, other)
    }

    pub fn intersection_point(&self, other: &Segment) -> Option<Point> {
        super::intersection::intersection_point(self, other)
    }
}

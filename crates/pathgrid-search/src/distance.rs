use pathgrid_core::Point;

/// Manhattan (L1) distance between two points. On an open grid this is the
/// number of moves in a shortest path.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

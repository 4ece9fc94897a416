//! Basic geometric types used by keyboard geometry documents.

/// A point in keyboard coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }
}

/// An axis-aligned rectangle given by its top-left corner and its size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Bounds {
    /// Creates new bounds from the top-left corner and dimensions.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the smallest bounds containing every point, or `None` when
    /// there are no points.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x, first.y);

        for point in &points[1..] {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the top-left corner
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns true if the point lies inside or on the edge of the bounds
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.width
            && point.y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_bounds_accessors() {
        let bounds = Bounds::new(1.5, 2.0, 100.0, 40.0);
        assert_approx_eq!(f64, bounds.x(), 1.5);
        assert_approx_eq!(f64, bounds.y(), 2.0);
        assert_approx_eq!(f64, bounds.width(), 100.0);
        assert_approx_eq!(f64, bounds.height(), 40.0);
        assert_eq!(bounds.origin(), Point::new(1.5, 2.0));
    }

    #[test]
    fn test_enclosing_empty() {
        assert!(Bounds::enclosing(&[]).is_none());
    }

    #[test]
    fn test_enclosing_points() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(37.4, 0.0),
            Point::new(37.4, 52.0),
            Point::new(-2.0, 52.0),
        ];
        let bounds = Bounds::enclosing(&points).unwrap();
        assert_approx_eq!(f64, bounds.x(), -2.0);
        assert_approx_eq!(f64, bounds.y(), 0.0);
        assert_approx_eq!(f64, bounds.width(), 39.4);
        assert_approx_eq!(f64, bounds.height(), 52.0);
    }

    #[test]
    fn test_contains_edges() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(bounds.contains(Point::new(0.0, 0.0)));
        assert!(bounds.contains(Point::new(10.0, 10.0)));
        assert!(!bounds.contains(Point::new(10.1, 5.0)));
        assert!(!bounds.contains(Point::new(5.0, -0.1)));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Enclosing bounds must contain every point they were built from.
    fn check_enclosing_contains_all(points: Vec<Point>) -> Result<(), TestCaseError> {
        let bounds = Bounds::enclosing(&points).unwrap();
        for point in &points {
            prop_assert!(point.x() >= bounds.x() - 1e-9);
            prop_assert!(point.y() >= bounds.y() - 1e-9);
            prop_assert!(point.x() <= bounds.x() + bounds.width() + 1e-9);
            prop_assert!(point.y() <= bounds.y() + bounds.height() + 1e-9);
        }
        prop_assert!(bounds.width() >= 0.0);
        prop_assert!(bounds.height() >= 0.0);
        Ok(())
    }

    proptest! {
        #[test]
        fn enclosing_contains_all(points in prop::collection::vec(point_strategy(), 1..32)) {
            check_enclosing_contains_all(points)?;
        }
    }
}

use crate::shared::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    FaceOutline,
    EyeOutline,
}

/// Outline colour for the presentation layer to stroke with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeColor {
    Yellow,
    Green,
}

impl ShapeKind {
    pub fn stroke(&self) -> StrokeColor {
        match self {
            ShapeKind::FaceOutline => StrokeColor::Yellow,
            ShapeKind::EyeOutline => StrokeColor::Green,
        }
    }
}

/// One unfilled outline in view pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub points: Vec<Point>,
    /// Whether the last point joins back to the first.
    pub closed: bool,
}

impl Shape {
    pub fn face(points: Vec<Point>) -> Self {
        Self {
            kind: ShapeKind::FaceOutline,
            points,
            closed: true,
        }
    }

    pub fn eye(points: Vec<Point>) -> Self {
        Self {
            kind: ShapeKind::EyeOutline,
            points,
            closed: true,
        }
    }

    pub fn stroke(&self) -> StrokeColor {
        self.kind.stroke()
    }
}

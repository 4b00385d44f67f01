// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable primitives emitted by geometry builders.
//!
//! Primitives are plain data in scene coordinates. A rendering surface walks a list of
//! [`Mark`]s in `z_index` order and draws each primitive; hit testing uses the same
//! shapes, so what is drawn is what is hovered.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::f64::consts::TAU;

use kurbo::{BezPath, Circle, Line, Point, Rect, Shape};
use peniko::Brush;
use peniko::color::palette::css;

/// A paint + width pair for stroked paths (lines, outlines, gridlines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Horizontal text alignment relative to a label's anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The anchor is the start of the text.
    Start,
    /// The anchor is the middle of the text.
    #[default]
    Middle,
    /// The anchor is the end of the text.
    End,
}

/// Vertical text alignment relative to a label's anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor is the top of the text.
    Hanging,
    /// The anchor is the vertical middle of the text.
    #[default]
    Middle,
    /// The anchor is the alphabetic baseline.
    Alphabetic,
}

/// Unshaped text placed at an anchor point.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// Anchor point.
    pub anchor: Point,
    /// Text content.
    pub text: String,
    /// Fill paint.
    pub fill: Brush,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Horizontal alignment.
    pub align: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Rotation around the anchor, in degrees.
    pub angle: f64,
}

impl Label {
    /// Creates a centered 12px label.
    pub fn new(anchor: Point, text: impl Into<String>, fill: impl Into<Brush>) -> Self {
        Self {
            anchor,
            text: text.into(),
            fill: fill.into(),
            font_size: 12.0,
            align: TextAnchor::Middle,
            baseline: TextBaseline::Middle,
            angle: 0.0,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the alignment.
    pub fn with_align(mut self, align: TextAnchor, baseline: TextBaseline) -> Self {
        self.align = align;
        self.baseline = baseline;
        self
    }

    /// Sets the rotation in degrees.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

/// A drawable shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// An open path through points.
    Polyline {
        /// Vertices in order.
        points: Vec<Point>,
        /// Line stroke.
        stroke: StrokeStyle,
    },
    /// A closed path through points.
    Polygon {
        /// Vertices in order; the path closes back to the first vertex.
        points: Vec<Point>,
        /// Optional fill.
        fill: Option<Brush>,
        /// Optional outline.
        stroke: Option<StrokeStyle>,
    },
    /// An axis-aligned rectangle.
    Rect {
        /// Rectangle in scene coordinates.
        rect: Rect,
        /// Fill paint.
        fill: Brush,
    },
    /// An annular sector (pie or donut slice).
    ///
    /// Angles are in radians, measured clockwise on screen from the positive x axis, so
    /// `-π/2` is 12 o'clock.
    Arc {
        /// Center point.
        center: Point,
        /// Inner radius (0 for a pie slice).
        inner_radius: f64,
        /// Outer radius.
        outer_radius: f64,
        /// Start angle.
        start_angle: f64,
        /// End angle.
        end_angle: f64,
        /// Fill paint.
        fill: Brush,
        /// Optional outline.
        stroke: Option<StrokeStyle>,
    },
    /// A circle.
    Circle {
        /// Circle geometry.
        circle: Circle,
        /// Optional fill.
        fill: Option<Brush>,
        /// Optional outline.
        stroke: Option<StrokeStyle>,
    },
    /// A straight line segment.
    Segment {
        /// Segment geometry.
        line: Line,
        /// Line stroke.
        stroke: StrokeStyle,
    },
    /// A text label.
    Label(Label),
}

/// Curve flattening tolerance used when converting primitives to paths.
const TOLERANCE: f64 = 0.1;

impl Primitive {
    /// Converts the primitive to a path. Labels produce an empty path.
    pub fn to_path(&self) -> BezPath {
        match self {
            Self::Polyline { points, .. } => polyline_path(points, false),
            Self::Polygon { points, .. } => polyline_path(points, true),
            Self::Rect { rect, .. } => rect.to_path(TOLERANCE),
            Self::Arc {
                center,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
                ..
            } => Circle::new(*center, *outer_radius)
                .segment(*inner_radius, *start_angle, end_angle - start_angle)
                .to_path(TOLERANCE),
            Self::Circle { circle, .. } => circle.to_path(TOLERANCE),
            Self::Segment { line, .. } => line.to_path(TOLERANCE),
            Self::Label(_) => BezPath::new(),
        }
    }

    /// Returns the bounding box. Labels report a zero-size box at their anchor.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect { rect, .. } => rect.abs(),
            Self::Circle { circle, .. } => circle.bounding_box(),
            Self::Segment { line, .. } => line.bounding_box(),
            Self::Label(label) => Rect::from_points(label.anchor, label.anchor),
            _ => self.to_path().bounding_box(),
        }
    }

    /// Returns `true` if `pt` is inside a filled area of the primitive.
    ///
    /// Strokes and labels are not hit targets.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Rect { rect, .. } => rect.abs().contains(pt),
            Self::Circle { circle, .. } => circle.contains(pt),
            Self::Polygon { points, .. } => {
                points.len() >= 3 && polyline_path(points, true).contains(pt)
            }
            Self::Arc {
                center,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
                ..
            } => {
                let d = pt - *center;
                let r2 = d.hypot2();
                if r2 > outer_radius * outer_radius || r2 < inner_radius * inner_radius {
                    return false;
                }
                // Angle of `pt` measured from the start of the sweep, in [0, 2π).
                let mut rel = (d.atan2() - start_angle) % TAU;
                if rel < 0.0 {
                    rel += TAU;
                }
                rel <= end_angle - start_angle
            }
            Self::Polyline { .. } | Self::Segment { .. } | Self::Label(_) => false,
        }
    }
}

fn polyline_path(points: &[Point], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
        if closed {
            path.close_path();
        }
    }
    path
}

/// A primitive plus render order and the record it represents.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Row key of the originating record, for marks that represent one.
    pub row_key: Option<u64>,
    /// Rendering order hint; see [`crate::z_order`].
    pub z_index: i32,
    /// The shape to draw.
    pub primitive: Primitive,
}

impl Mark {
    /// Creates a mark that does not represent a record (guides, series paths).
    pub fn new(z_index: i32, primitive: Primitive) -> Self {
        Self {
            row_key: None,
            z_index,
            primitive,
        }
    }

    /// Creates a mark for a record.
    pub fn for_row(row_key: u64, z_index: i32, primitive: Primitive) -> Self {
        Self {
            row_key: Some(row_key),
            z_index,
            primitive,
        }
    }
}

/// Sorts marks into paint order: ascending `z_index`, stable within a layer.
pub fn sort_marks(marks: &mut [Mark]) {
    marks.sort_by_key(|m| m.z_index);
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use core::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn arc_contains_points_inside_its_sweep() {
        // 12 o'clock to 3 o'clock.
        let arc = Primitive::Arc {
            center: Point::new(0.0, 0.0),
            inner_radius: 0.0,
            outer_radius: 10.0,
            start_angle: -FRAC_PI_2,
            end_angle: 0.0,
            fill: css::RED.into(),
            stroke: None,
        };
        assert!(arc.contains(Point::new(3.0, -3.0)));
        assert!(!arc.contains(Point::new(-3.0, 3.0)));
        assert!(!arc.contains(Point::new(20.0, 0.0)));
    }

    #[test]
    fn full_pie_slice_contains_every_quadrant() {
        let arc = Primitive::Arc {
            center: Point::new(0.0, 0.0),
            inner_radius: 0.0,
            outer_radius: 10.0,
            start_angle: -FRAC_PI_2,
            end_angle: 3.0 * FRAC_PI_2,
            fill: css::RED.into(),
            stroke: None,
        };
        for pt in [(3.0, 3.0), (-3.0, 3.0), (-3.0, -3.0), (3.0, -3.0)] {
            assert!(arc.contains(Point::new(pt.0, pt.1)), "missed {pt:?}");
        }
    }

    #[test]
    fn donut_hole_is_not_a_hit() {
        let arc = Primitive::Arc {
            center: Point::new(0.0, 0.0),
            inner_radius: 5.0,
            outer_radius: 10.0,
            start_angle: -FRAC_PI_2,
            end_angle: 3.0 * FRAC_PI_2 - 1e-6,
            fill: css::RED.into(),
            stroke: None,
        };
        assert!(!arc.contains(Point::new(1.0, 1.0)));
        assert!(arc.contains(Point::new(7.0, 0.5)));
        assert!(arc.bounds().width() > 19.0);
    }

    #[test]
    fn polygon_hits_and_bounds() {
        let poly = Primitive::Polygon {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ],
            fill: Some(css::BLUE.into()),
            stroke: None,
        };
        assert!(poly.contains(Point::new(8.0, 2.0)));
        assert!(!poly.contains(Point::new(2.0, 8.0)));
        assert_eq!(poly.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn strokes_and_labels_are_not_hit_targets() {
        let seg = Primitive::Segment {
            line: Line::new((0.0, 0.0), (10.0, 10.0)),
            stroke: StrokeStyle::default(),
        };
        assert!(!seg.contains(Point::new(5.0, 5.0)));
        let label = Primitive::Label(Label::new(Point::new(1.0, 2.0), "x", css::BLACK));
        assert!(!label.contains(Point::new(1.0, 2.0)));
        assert_eq!(label.bounds(), Rect::new(1.0, 2.0, 1.0, 2.0));
    }

    #[test]
    fn sort_marks_is_stable_by_z() {
        let rect = |x: f64| Primitive::Rect {
            rect: Rect::new(x, 0.0, x + 1.0, 1.0),
            fill: css::RED.into(),
        };
        let mut marks = vec![
            Mark::for_row(1, 10, rect(0.0)),
            Mark::new(-50, rect(1.0)),
            Mark::for_row(2, 10, rect(2.0)),
        ];
        sort_marks(&mut marks);
        let keys: Vec<_> = marks.iter().map(|m| m.row_key).collect();
        assert_eq!(keys, [None, Some(1), Some(2)]);
    }
}

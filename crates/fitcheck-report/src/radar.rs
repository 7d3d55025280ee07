//! Geometry of the six-axis readiness profile.
//!
//! Axes follow [`Dimension::ALL`], the first pointing to 12 o'clock and the
//! rest placed clockwise at equal angles. Coordinates are SVG user units with
//! the y axis pointing down.

use std::f64::consts::PI;

use fitcheck_core::model::Dimension;
use fitcheck_core::results::ReadinessScores;

/// Width and height of the chart.
pub const SIZE: f64 = 280.0;
pub const CENTER: f64 = SIZE / 2.0;
/// Radius of a score of 100.
pub const RADIUS: f64 = 100.0;
/// Distance of axis labels from the center.
pub const LABEL_DISTANCE: f64 = RADIUS + 25.0;
/// Number of concentric grid rings.
pub const GRID_RINGS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One spoke of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarAxis {
    pub dimension: Dimension,
    pub value: u8,
    /// Outer end of the spoke.
    pub end: Point,
    /// Vertex of the data polygon.
    pub vertex: Point,
    pub label_at: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarChart {
    pub axes: Vec<RadarAxis>,
}

fn axis_angle(index: usize, count: usize) -> f64 {
    index as f64 * (2.0 * PI / count as f64) - PI / 2.0
}

fn polar(angle: f64, distance: f64) -> Point {
    Point {
        x: CENTER + angle.cos() * distance,
        y: CENTER + angle.sin() * distance,
    }
}

impl RadarChart {
    pub fn new(scores: &ReadinessScores) -> Self {
        let count = Dimension::ALL.len();
        let axes = scores
            .iter()
            .enumerate()
            .map(|(index, (dimension, value))| {
                let angle = axis_angle(index, count);
                RadarAxis {
                    dimension,
                    value,
                    end: polar(angle, RADIUS),
                    vertex: polar(angle, f64::from(value.min(100)) / 100.0 * RADIUS),
                    label_at: polar(angle, LABEL_DISTANCE),
                }
            })
            .collect();
        Self { axes }
    }

    /// Vertices of the data polygon, in axis order.
    pub fn polygon(&self) -> Vec<Point> {
        self.axes.iter().map(|a| a.vertex).collect()
    }

    /// Radii of the grid rings, innermost first.
    pub fn grid_radii() -> [f64; GRID_RINGS] {
        std::array::from_fn(|i| RADIUS / GRID_RINGS as f64 * (i + 1) as f64)
    }

    /// Render the chart as an inline SVG element.
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            "<svg class=\"radar\" width=\"{SIZE}\" height=\"{SIZE}\" viewBox=\"0 0 {SIZE} {SIZE}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
        );

        for r in Self::grid_radii() {
            svg.push_str(&format!(
                "  <circle cx=\"{CENTER}\" cy=\"{CENTER}\" r=\"{r:.1}\" fill=\"none\" stroke=\"#e5e7eb\"/>\n"
            ));
        }

        for axis in &self.axes {
            svg.push_str(&format!(
                "  <line x1=\"{CENTER}\" y1=\"{CENTER}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#e5e7eb\"/>\n",
                axis.end.x, axis.end.y
            ));
        }

        let points: Vec<String> = self
            .polygon()
            .iter()
            .map(|p| format!("{:.1},{:.1}", p.x, p.y))
            .collect();
        svg.push_str(&format!(
            "  <polygon points=\"{}\" fill=\"rgba(59, 130, 246, 0.2)\" stroke=\"#3b82f6\" stroke-width=\"2\"/>\n",
            points.join(" ")
        ));

        for axis in &self.axes {
            svg.push_str(&format!(
                "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"currentColor\" text-anchor=\"middle\">{}</text>\n",
                axis.label_at.x,
                axis.label_at.y + 4.0,
                axis.dimension.label()
            ));
        }

        svg.push_str("</svg>\n");
        svg
    }
}

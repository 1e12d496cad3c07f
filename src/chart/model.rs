// ---------------------------------------------------------------------------
// Backend-independent description of a chart
// ---------------------------------------------------------------------------

/// X axis scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    None,
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
}

/// One labelled series of (x, y) points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    /// CSS colour name, resolved by [`crate::color::named`].
    pub color: &'static str,
    pub line: LineStyle,
    pub marker: Marker,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>, color: &'static str, points: Vec<(f64, f64)>) -> Self {
        Series {
            label: label.into(),
            color,
            line: LineStyle::Solid,
            marker: Marker::None,
            points,
        }
    }

    pub fn line(mut self, line: LineStyle) -> Self {
        self.line = line;
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }
}

/// A horizontal line across the whole plot, e.g. speedup = 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub label: String,
    pub y: f64,
    pub color: &'static str,
}

/// Everything needed to draw and save one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// File name inside the output directory.
    pub file_name: &'static str,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x_scale: Scale,
    pub series: Vec<Series>,
    pub reference: Option<ReferenceLine>,
}

impl ChartSpec {
    /// Bounds of all series points (and the reference line) as
    /// `((x_min, x_max), (y_min, y_max))`. `None` when there are no points.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut points = self.series.iter().flat_map(|s| s.points.iter().copied());
        let (x0, y0) = points.next()?;
        let mut x = (x0, x0);
        let mut y = (y0, y0);
        for (px, py) in points {
            x = (x.0.min(px), x.1.max(px));
            y = (y.0.min(py), y.1.max(py));
        }
        if let Some(r) = &self.reference {
            y = (y.0.min(r.y), y.1.max(r.y));
        }
        Some((x, y))
    }
}

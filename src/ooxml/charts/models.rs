//! Chart data models.
//!
//! A [`Chart`] is the writer-side description of one DrawingML chart part:
//! the chart family, the shared category axis and its series.

use crate::common::RGBColor;

/// Colors assigned to series (or to categories of a pie), cycled by index.
pub const SERIES_PALETTE: [RGBColor; 5] = [
    RGBColor::new(0x38, 0xBD, 0xF8),
    RGBColor::new(0x34, 0xD3, 0x99),
    RGBColor::new(0xFB, 0xBF, 0x24),
    RGBColor::new(0xF4, 0x72, 0xB6),
    RGBColor::new(0xA7, 0x8B, 0xFA),
];

/// Palette color for an index.
#[inline]
pub fn palette_color(index: usize) -> RGBColor {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// Chart families the writer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    /// Clustered columns
    Bar,
    /// Lines with markers
    Line,
    /// Pie with one slice per category
    Pie,
}

impl ChartType {
    /// Whether each category gets its own color by default.
    #[inline]
    pub fn varies_colors(&self) -> bool {
        matches!(self, Self::Pie)
    }
}

/// One data series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Series name shown in the legend
    pub name: String,
    /// One value per category
    pub values: Vec<f64>,
    /// Series color; the palette color for its index when unset
    pub color: Option<RGBColor>,
    /// Per-category colors, written as data point overrides
    pub point_colors: Option<Vec<RGBColor>>,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            color: None,
            point_colors: None,
        }
    }

    pub fn with_color(mut self, color: RGBColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_point_colors(mut self, colors: Vec<RGBColor>) -> Self {
        self.point_colors = Some(colors);
        self
    }

    /// Resolved fill for the series at `index`.
    pub fn fill(&self, index: usize) -> RGBColor {
        self.color.unwrap_or_else(|| palette_color(index))
    }

    /// Resolved color of the data point at `category`, if points are colored individually.
    pub(crate) fn point_fill(&self, category: usize, vary_colors: bool) -> Option<RGBColor> {
        match &self.point_colors {
            Some(colors) => Some(
                colors
                    .get(category)
                    .copied()
                    .unwrap_or_else(|| palette_color(category)),
            ),
            None if vary_colors => Some(palette_color(category)),
            None => None,
        }
    }
}

/// A complete chart part.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub chart_type: ChartType,
    /// Category labels shared by all series
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    /// Color for axis labels, legend and data labels
    pub text_color: Option<RGBColor>,
    /// Show values as data labels
    pub show_values: bool,
    pub show_legend: bool,
}

impl Chart {
    pub fn new(chart_type: ChartType, categories: Vec<String>) -> Self {
        Self {
            chart_type,
            categories,
            series: Vec::new(),
            text_color: None,
            show_values: true,
            show_legend: true,
        }
    }

    pub fn with_series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_text_color(mut self, color: RGBColor) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn with_show_values(mut self, show: bool) -> Self {
        self.show_values = show;
        self
    }

    pub fn with_show_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// Number of data rows: categories, or the longest series if that is longer.
    pub fn row_count(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.values.len())
            .max()
            .unwrap_or(0)
            .max(self.categories.len())
    }
}

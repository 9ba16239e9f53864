//! Page geometry stored in points, with derived content metrics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::line_breaker;

/// Average glyph width as a fraction of the font size.
pub const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_RATIO: f64 = 2.0;
/// Default font size in points.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
/// One inch in points.
pub const INCH: f64 = 72.0;

/// Length unit accepted by geometry setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// PostScript point, 1/72 inch
    Point,
    /// 72 points
    Inch,
    /// 2.83465 points
    #[serde(rename = "mm")]
    Millimeter,
    /// CSS pixel at 96 dpi, 0.75 points
    Pixel,
}

impl Unit {
    /// Convert a length in this unit to points.
    pub fn to_points(self, value: f64) -> f64 {
        match self {
            Unit::Point => value,
            Unit::Inch => value * 72.0,
            Unit::Millimeter => value * 2.83465,
            Unit::Pixel => value / 1.33333,
        }
    }

    /// Identifier used by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Point => "point",
            Unit::Inch => "inch",
            Unit::Millimeter => "mm",
            Unit::Pixel => "pixel",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" | "points" | "pt" => Ok(Unit::Point),
            "inch" | "inches" | "in" => Ok(Unit::Inch),
            "mm" | "millimeter" | "millimeters" => Ok(Unit::Millimeter),
            "pixel" | "pixels" | "px" => Ok(Unit::Pixel),
            _ => Err(Error::InvalidUnit(s.to_string())),
        }
    }
}

/// Named page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// US Letter, 8.5 x 11 in
    Letter,
    /// ISO A4, 210 x 297 mm
    A4,
    /// US Legal, 8.5 x 14 in
    Legal,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.276, 841.89),
            PageSize::Legal => (612.0, 1008.0),
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(PageSize::Letter),
            "a4" => Ok(PageSize::A4),
            "legal" => Ok(PageSize::Legal),
            other => Err(Error::InvalidGeometry(format!("unknown page size: {other}"))),
        }
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: f64,
    /// Right margin
    pub right: f64,
    /// Bottom margin
    pub bottom: f64,
    /// Left margin
    pub left: f64,
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(INCH)
    }
}

/// Page dimensions and margins, all in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width in points
    pub page_width: f64,
    /// Page height in points
    pub page_height: f64,
    /// Margins in points
    pub margins: Margins,
}

impl PageGeometry {
    /// Check that every dimension is usable and the content area is positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.page_width.is_finite() && self.page_width > 0.0)
            || !(self.page_height.is_finite() && self.page_height > 0.0)
        {
            return Err(Error::InvalidGeometry(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        let m = &self.margins;
        for (side, value) in [
            ("top", m.top),
            ("right", m.right),
            ("bottom", m.bottom),
            ("left", m.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidGeometry(format!(
                    "{side} margin must be non-negative, got {value}"
                )));
            }
        }
        if self.content_width() <= 0.0 || self.content_height() <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "margins leave no content area ({:.2}x{:.2} pt)",
                self.content_width(),
                self.content_height()
            )));
        }
        Ok(())
    }

    /// Width left between the side margins.
    pub fn content_width(&self) -> f64 {
        self.page_width - self.margins.left - self.margins.right
    }

    /// Height left between the top and bottom margins.
    pub fn content_height(&self) -> f64 {
        self.page_height - self.margins.top - self.margins.bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        let (page_width, page_height) = PageSize::Letter.dimensions();
        Self {
            page_width,
            page_height,
            margins: Margins::default(),
        }
    }
}

/// Metrics derived from the geometry and a font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentMetrics {
    /// Content width in points
    pub content_width: f64,
    /// Content height in points
    pub content_height: f64,
    /// Characters that fit on one line
    pub chars_per_line: usize,
    /// Lines that fit on one page
    pub lines_per_page: usize,
    /// Font size the counts were derived from
    pub font_size: f64,
}

impl ContentMetrics {
    /// Derive metrics for a validated geometry.
    pub fn compute(geometry: &PageGeometry, font_size: f64) -> Self {
        let content_width = geometry.content_width();
        let content_height = geometry.content_height();
        Self {
            content_width,
            content_height,
            chars_per_line: floor_count(content_width / (font_size * CHAR_WIDTH_RATIO)),
            lines_per_page: floor_count(content_height / (font_size * LINE_HEIGHT_RATIO)),
            font_size,
        }
    }
}

/// Session-scoped layout configuration.
///
/// Every setter validates the candidate geometry first and only then commits
/// it, recomputing [`ContentMetrics`] in the same step. A failed setter leaves
/// the previous state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutGeometry {
    geometry: PageGeometry,
    font_size: f64,
    metrics: ContentMetrics,
}

impl Default for LayoutGeometry {
    fn default() -> Self {
        let geometry = PageGeometry::default();
        Self {
            geometry,
            font_size: DEFAULT_FONT_SIZE,
            metrics: ContentMetrics::compute(&geometry, DEFAULT_FONT_SIZE),
        }
    }
}

impl LayoutGeometry {
    /// US Letter, one-inch margins, 12pt font.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a named page size with default margins.
    pub fn with_page(size: PageSize) -> Self {
        let mut layout = Self::default();
        let (width, height) = size.dimensions();
        layout.geometry.page_width = width;
        layout.geometry.page_height = height;
        layout.refresh();
        layout
    }

    /// A fresh preset page with default margins, keeping this font size.
    pub fn on_page(&self, size: PageSize) -> Self {
        let mut layout = Self::with_page(size);
        layout.font_size = self.font_size;
        layout.refresh();
        layout
    }

    /// Build from a complete page geometry and font size.
    ///
    /// Both are validated together, so margins only have to fit the final
    /// page, not any intermediate one.
    pub fn from_parts(geometry: PageGeometry, font_size: f64) -> Result<Self> {
        geometry.validate()?;
        validate_font_size(font_size)?;
        Ok(Self {
            geometry,
            font_size,
            metrics: ContentMetrics::compute(&geometry, font_size),
        })
    }

    /// Page dimensions and margins.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Current margins.
    pub fn margins(&self) -> &Margins {
        &self.geometry.margins
    }

    /// Font size in points.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Current metrics; always reflects the latest successful write.
    pub fn metrics(&self) -> ContentMetrics {
        self.metrics
    }

    /// Metrics for a different font size on the same page.
    pub fn metrics_for_font(&self, font_size: f64) -> Result<ContentMetrics> {
        validate_font_size(font_size)?;
        Ok(ContentMetrics::compute(&self.geometry, font_size))
    }

    /// Set the page size, converting from `unit` to points.
    pub fn set_page_size(&mut self, width: f64, height: f64, unit: Unit) -> Result<()> {
        let mut candidate = self.geometry;
        candidate.page_width = unit.to_points(width);
        candidate.page_height = unit.to_points(height);
        self.commit(candidate)
    }

    /// Set the page size from a named preset.
    pub fn set_page_preset(&mut self, size: PageSize) -> Result<()> {
        let (width, height) = size.dimensions();
        self.set_page_size(width, height, Unit::Point)
    }

    /// Set any subset of margins; omitted sides keep their value.
    pub fn set_margins(
        &mut self,
        top: Option<f64>,
        right: Option<f64>,
        bottom: Option<f64>,
        left: Option<f64>,
        unit: Unit,
    ) -> Result<()> {
        let mut candidate = self.geometry;
        let m = &mut candidate.margins;
        if let Some(v) = top {
            m.top = unit.to_points(v);
        }
        if let Some(v) = right {
            m.right = unit.to_points(v);
        }
        if let Some(v) = bottom {
            m.bottom = unit.to_points(v);
        }
        if let Some(v) = left {
            m.left = unit.to_points(v);
        }
        self.commit(candidate)
    }

    /// Set all four margins to the same value.
    pub fn set_uniform_margins(&mut self, value: f64, unit: Unit) -> Result<()> {
        self.set_margins(Some(value), Some(value), Some(value), Some(value), unit)
    }

    /// Set the font size in points.
    pub fn set_font_size(&mut self, font_size: f64) -> Result<()> {
        validate_font_size(font_size)?;
        self.font_size = font_size;
        self.refresh();
        Ok(())
    }

    /// Solve for equal left/right margins giving `target_line_length`
    /// characters per line, and apply them.
    ///
    /// `page_width - 2x = target_line_length * font_size * 0.6`
    pub fn calculate_optimal_margins(&mut self, target_line_length: usize) -> Result<Margins> {
        let line_width = target_line_length as f64 * self.font_size * CHAR_WIDTH_RATIO;
        let x = (self.geometry.page_width - line_width) / 2.0;
        if x < 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "a {target_line_length}-character line ({line_width:.2} pt) does not fit a {:.2} pt page",
                self.geometry.page_width
            )));
        }
        let mut candidate = self.geometry;
        candidate.margins.left = x;
        candidate.margins.right = x;
        self.commit(candidate)?;
        log::debug!("optimal side margins for {target_line_length} chars/line: {x:.3} pt");
        Ok(self.geometry.margins)
    }

    /// Line width in characters, rejecting a content area too narrow for
    /// a single character.
    pub fn wrap_width(&self) -> Result<usize> {
        match self.metrics.chars_per_line {
            0 => Err(Error::InvalidParameter(format!(
                "{:.2} pt of content width holds no {}pt characters",
                self.metrics.content_width, self.font_size
            ))),
            width => Ok(width),
        }
    }

    /// Wrap text at the current `chars_per_line`.
    pub fn break_lines(&self, text: &str) -> Result<Vec<String>> {
        Ok(line_breaker::break_lines(text, self.wrap_width()?))
    }

    fn commit(&mut self, candidate: PageGeometry) -> Result<()> {
        candidate.validate()?;
        self.geometry = candidate;
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        self.metrics = ContentMetrics::compute(&self.geometry, self.font_size);
    }
}

// Exact quotients such as 468 / 7.2 may land just below the integer.
fn floor_count(ratio: f64) -> usize {
    (ratio + 1e-9).floor().max(0.0) as usize
}

fn validate_font_size(font_size: f64) -> Result<()> {
    if font_size.is_finite() && font_size > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "font size must be positive, got {font_size}"
        )))
    }
}

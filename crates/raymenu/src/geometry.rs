use derive_more::{Display, From, Into};
use thiserror::Error;

/// A position reported by the host, in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Natural size of a child, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, From, Into)]
#[display("{width}x{height}")]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    fn is_negative(&self) -> bool {
        self.width < 0 || self.height < 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(left: i32, right: i32) -> Self {
        Self::new(left, 0, right, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[display("[{left},{top}][{right},{bottom}]")]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) as f64 / 2.0,
            (self.top + self.bottom) as f64 / 2.0,
        )
    }

    /// Half-open containment, so adjacent rectangles never both claim a point.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left as f64
            && point.x < self.right as f64
            && point.y >= self.top as f64
            && point.y < self.bottom as f64
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeasureError {
    #[error("menu has no children, a toggle control is required")]
    NoToggle,
    #[error("expected {expected} child sizes, got {got}")]
    ChildCountMismatch { expected: usize, got: usize },
    #[error("negative size reported: container {container}, child {child:?}")]
    NegativeSize {
        container: Size,
        child: Option<usize>,
    },
}

/// Everything the host reports in one measure pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub container: Size,
    pub padding: Padding,
    pub children: Vec<Size>,
}

impl Measurement {
    pub fn new(
        container: Size,
        padding: Padding,
        children: Vec<Size>,
    ) -> Result<Self, MeasureError> {
        if children.is_empty() {
            return Err(MeasureError::NoToggle);
        }
        if container.is_negative() {
            return Err(MeasureError::NegativeSize {
                container,
                child: None,
            });
        }
        if let Some(idx) = children.iter().position(Size::is_negative) {
            return Err(MeasureError::NegativeSize {
                container,
                child: Some(idx),
            });
        }

        Ok(Self {
            container,
            padding,
            children,
        })
    }

    /// Width left for the grid once horizontal padding is removed.
    pub fn usable_width(&self) -> i32 {
        self.container.width - self.padding.left - self.padding.right
    }

    /// Every child is laid out at the toggle's natural size.
    pub fn item_size(&self) -> Size {
        self.children.first().copied().unwrap_or_default()
    }
}

/// Density-independent units to whole pixels, rounded half up.
pub fn dp_to_px(dp: f64, density: f64) -> i32 {
    (dp * density + 0.5) as i32
}

/// A physical size, in millimetres unless stated otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The same size with width and height swapped.
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Dimensions of a raster, in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height. Infinite for zero-height sizes.
    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Scales both dimensions by `factor`, rounding to the nearest pixel and
    /// never collapsing a non-empty dimension to zero.
    pub fn scaled(self, factor: f32) -> Self {
        let scale = |v: u32| {
            if v == 0 {
                0
            } else {
                ((v as f32 * factor).round() as u32).max(1)
            }
        };
        Self {
            width: scale(self.width),
            height: scale(self.height),
        }
    }
}

//! Address window geometry and the clipping policy shared by every drawing
//! call.

/// A rectangle of panel memory with inclusive corners, in the order pixels
/// are consumed (row-major from `(sx, sy)` to `(ex, ey)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    pub sx: u16,
    pub sy: u16,
    pub ex: u16,
    pub ey: u16,
}

impl Window {
    /// Clips the request `(x, y, width, height)` against a panel of
    /// `size = (columns, rows)`.
    ///
    /// Returns `None` when the origin lies outside the panel or the request
    /// is empty. Otherwise an extent running past the panel is cut so the far
    /// edge lands on the last column or row.
    pub fn clip(x: u16, y: u16, width: u16, height: u16, size: (u16, u16)) -> Option<Self> {
        let (columns, rows) = size;
        if x >= columns || y >= rows || width == 0 || height == 0 {
            return None;
        }

        let width = width.min(columns - x);
        let height = height.min(rows - y);

        Some(Self {
            sx: x,
            sy: y,
            ex: x + (width - 1),
            ey: y + (height - 1),
        })
    }

    pub fn width(&self) -> u16 {
        self.ex - self.sx + 1
    }

    pub fn height(&self) -> u16 {
        self.ey - self.sy + 1
    }

    /// Number of pixels the panel expects after `RAMWR`.
    pub fn pixel_count(&self) -> u32 {
        u32::from(self.width()) * u32::from(self.height())
    }
}

//! An off-screen RGB565 canvas.
//!
//! Render text or primitives into it with `embedded-graphics`, then push the
//! whole thing with [`crate::Display::show_framebuf`], which streams it as a
//! single bitmap.

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    primitives::Rectangle,
    Pixel,
};

use crate::Rgb565;

pub struct FrameBuf<'a> {
    pixels: &'a mut [Rgb565],
    width: u16,
    height: u16,
}

impl<'a> FrameBuf<'a> {
    /// Wraps `pixels` as a `width × height` canvas, row-major.
    ///
    /// Returns `None` if `pixels` is too small.
    pub fn new(pixels: &'a mut [Rgb565], width: u16, height: u16) -> Option<Self> {
        let len = usize::from(width) * usize::from(height);
        let pixels = pixels.get_mut(..len)?;
        Some(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb565] {
        self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < usize::from(self.width) && y < usize::from(self.height))
            .then(|| y * usize::from(self.width) + x)
    }
}

impl OriginDimensions for FrameBuf<'_> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

impl DrawTarget for FrameBuf<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(i) = self.index(coord.x, coord.y) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let drawable = area.intersection(&self.bounding_box());
        if drawable.is_zero_sized() {
            return Ok(());
        }

        let width = usize::from(self.width);
        let (x0, y0) = (drawable.top_left.x as usize, drawable.top_left.y as usize);
        let run = drawable.size.width as usize;
        for y in y0..y0 + drawable.size.height as usize {
            let start = y * width + x0;
            self.pixels[start..start + run].fill(color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_core::{geometry::Point, pixelcolor::RgbColor};

    use super::*;

    #[test]
    fn rejects_short_buffer() {
        let mut pixels = [Rgb565::BLACK; 15];
        assert!(FrameBuf::new(&mut pixels, 4, 4).is_none());
    }

    #[test]
    fn fill_solid_is_clipped_to_canvas() {
        let mut pixels = [Rgb565::BLACK; 16];
        let mut fb = FrameBuf::new(&mut pixels, 4, 4).unwrap();
        fb.fill_solid(
            &Rectangle::new(Point::new(2, 3), Size::new(10, 10)),
            Rgb565::RED,
        )
        .unwrap();

        let red: usize = fb.pixels().iter().filter(|&&c| c == Rgb565::RED).count();
        assert_eq!(red, 2);
        assert_eq!(fb.pixels()[14], Rgb565::RED);
        assert_eq!(fb.pixels()[15], Rgb565::RED);
    }

    #[test]
    fn draw_iter_ignores_outside_points() {
        let mut pixels = [Rgb565::BLACK; 4];
        let mut fb = FrameBuf::new(&mut pixels, 2, 2).unwrap();
        fb.draw_iter([
            Pixel(Point::new(-1, 0), Rgb565::RED),
            Pixel(Point::new(1, 1), Rgb565::BLUE),
            Pixel(Point::new(2, 0), Rgb565::RED),
        ])
        .unwrap();
        assert_eq!(
            fb.pixels(),
            [Rgb565::BLACK, Rgb565::BLACK, Rgb565::BLACK, Rgb565::BLUE]
        );
    }
}

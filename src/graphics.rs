use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Point, Size},
    primitives::Rectangle,
    Pixel,
};
use embedded_hal::digital::OutputPin;

use crate::{interface::Interface, pixel_bytes, window::Window, Display, Rgb565};

impl<DI, RST, BL> DrawTarget for Display<DI, RST, BL>
where
    DI: Interface,
    RST: OutputPin,
    BL: OutputPin,
{
    type Color = Rgb565;
    type Error = DI::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = to_u16(point) {
                self.fill_rect(x, y, 1, 1, color)?;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let Some(window) = visible_window(area, self.bounding_box(), self.display_size()) else {
            return Ok(());
        };

        let (columns, rows) = (
            i32::from(window.sx)..=i32::from(window.ex),
            i32::from(window.sy)..=i32::from(window.ey),
        );
        let area_columns = area.columns();
        let pixels = area
            .rows()
            .flat_map(move |y| area_columns.clone().map(move |x| Point::new(x, y)))
            .zip(colors)
            .filter(move |(p, _)| columns.contains(&p.x) && rows.contains(&p.y))
            .map(|(_, color)| pixel_bytes(color));

        self.write_window(window, pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        match visible_window(area, self.bounding_box(), self.display_size()) {
            Some(w) => self.fill_rect(w.sx, w.sy, w.width(), w.height(), color),
            None => Ok(()),
        }
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(color)
    }
}

impl<DI, RST, BL> OriginDimensions for Display<DI, RST, BL>
where
    DI: Interface,
    RST: OutputPin,
    BL: OutputPin,
{
    fn size(&self) -> Size {
        let (width, height) = self.display_size();
        Size::new(u32::from(width), u32::from(height))
    }
}

fn to_u16(point: Point) -> Option<(u16, u16)> {
    Some((u16::try_from(point.x).ok()?, u16::try_from(point.y).ok()?))
}

// Part of `area` that lands on the panel, as an address window.
fn visible_window(area: &Rectangle, bounds: Rectangle, size: (u16, u16)) -> Option<Window> {
    let drawable = area.intersection(&bounds);
    if drawable.is_zero_sized() {
        return None;
    }
    let (x, y) = to_u16(drawable.top_left)?;
    let width = u16::try_from(drawable.size.width).ok()?;
    let height = u16::try_from(drawable.size.height).ok()?;
    Window::clip(x, y, width, height, size)
}

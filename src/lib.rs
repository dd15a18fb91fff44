#![no_std]

//! Blocking driver for a 320×240 ST7789 TFT panel on a four-wire SPI bus,
//! plus a raw register reader for the MPU-6050 inertial sensor.
//!
//! The display side is built around one protocol: set a rectangular address
//! window in panel memory (`RASET`, `CASET`, `RAMWR`), then stream the
//! window's pixels as big-endian RGB565 in a single data-framed bus session.
//! Every drawing call re-establishes its window; the driver keeps no window
//! state between calls.
//!
//! Requests are clipped against the panel instead of rejected: an origin
//! outside the panel draws nothing, and an extent running past the edge is
//! cut at the last column or row.
//!
//! ```
//! use embedded_graphics_core::pixelcolor::{Rgb565, RgbColor};
//! use st7789_lite::{Builder, _mock::{MockDelay, MockDisplayInterface}};
//!
//! let mut display = Builder::new(MockDisplayInterface)
//!     .init(&mut MockDelay)
//!     .unwrap();
//!
//! display.fill_screen(Rgb565::BLACK).unwrap();
//! display.fill_rect(110, 140, 100, 40, Rgb565::RED).unwrap();
//! // clipped to columns 300..=319
//! display.fill_rect(300, 0, 50, 10, Rgb565::GREEN).unwrap();
//! ```
//!
//! ## Features
//!
//! - `batch` (default): gathers pixel bytes into a small `heapless` buffer
//!   so the bus sees a few large writes instead of one write per pixel.
//! - `defmt`: `defmt::Format` on public enums and debug/trace logging.

#[cfg(test)]
#[macro_use]
extern crate std;

use embedded_graphics_core::pixelcolor::raw::{RawData, RawU16};
use embedded_hal::digital::OutputPin;

pub use embedded_graphics_core::pixelcolor::Rgb565;

pub mod interface;
use interface::{Framing, Interface};

mod builder;
pub use builder::*;

pub mod dcs;
use dcs::{InterfaceExt, SetColumnAddress, SetRowAddress, WriteMemoryStart};

pub mod framebuf;
mod graphics;
pub mod mpu6050;

pub mod window;
use window::Window;

/// Bytes per pushed chunk when `batch` is enabled. Must stay even so a pixel
/// never straddles two writes.
#[cfg(feature = "batch")]
const BATCH_SIZE: usize = 64;

/// Big-endian wire encoding of a pixel.
#[inline]
pub fn pixel_bytes(color: Rgb565) -> [u8; 2] {
    RawU16::from(color).into_inner().to_be_bytes()
}

///
/// Display driver for the ST7789 panel.
///
/// Built by [`Builder::init`], which runs the power-up sequence first.
///
pub struct Display<DI, RST, BL>
where
    DI: Interface,
    RST: OutputPin,
    BL: OutputPin,
{
    // Bus transport
    di: DI,
    // Reset pin
    rst: Option<RST>,
    // Backlight pin
    bl: Option<BL>,
    // Visible (columns, rows)
    size: (u16, u16),
}

impl<DI, RST, BL> Display<DI, RST, BL>
where
    DI: Interface,
    RST: OutputPin,
    BL: OutputPin,
{
    pub fn width(&self) -> u16 {
        self.size.0
    }

    pub fn height(&self) -> u16 {
        self.size.1
    }

    /// `(width, height)` in pixels.
    pub fn display_size(&self) -> (u16, u16) {
        self.size
    }

    ///
    /// Fills the rectangle at `(x, y)` of `width × height` pixels with `color`.
    ///
    /// The rectangle is clipped against the panel first. Nothing is sent when
    /// the origin is off the panel or the clipped rectangle is empty.
    ///
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Rgb565,
    ) -> Result<(), DI::Error> {
        let Some(window) = self.clip(x, y, width, height) else {
            return Ok(());
        };

        let pixel = pixel_bytes(color);
        let count = window.pixel_count() as usize;
        self.write_window(window, core::iter::repeat(pixel).take(count))
    }

    /// Fills the whole panel with `color`.
    pub fn fill_screen(&mut self, color: Rgb565) -> Result<(), DI::Error> {
        let (width, height) = self.size;
        self.fill_rect(0, 0, width, height, color)
    }

    ///
    /// Draws a `width × height` bitmap stored row-major in `pixels` with its
    /// top left corner at `(x, y)`.
    ///
    /// Clipping follows [`Display::fill_rect`]. When the right side is clipped
    /// the rest of each source row is skipped, so rows stay aligned. A source
    /// shorter than the window leaves the remaining window pixels untouched.
    ///
    /// ```
    /// use embedded_graphics_core::pixelcolor::{Rgb565, RgbColor};
    ///
    /// let mut display = st7789_lite::_mock::new_mock_display();
    /// let sprite = [Rgb565::RED, Rgb565::GREEN, Rgb565::BLUE, Rgb565::WHITE];
    /// display.draw_bitmap(10, 10, 2, 2, &sprite).unwrap();
    /// ```
    ///
    pub fn draw_bitmap(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        pixels: &[Rgb565],
    ) -> Result<(), DI::Error> {
        let Some(window) = self.clip(x, y, width, height) else {
            return Ok(());
        };

        let visible = usize::from(window.width());
        let rows = pixels
            .chunks(usize::from(width))
            .take(usize::from(window.height()));
        self.write_window(
            window,
            rows.flat_map(|row| row.iter().take(visible).map(|&c| pixel_bytes(c))),
        )
    }

    ///
    /// Same as [`Display::draw_bitmap`] for images that are already encoded as
    /// big-endian RGB565 byte pairs, two bytes per pixel.
    ///
    pub fn draw_raw_bitmap(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        bytes: &[u8],
    ) -> Result<(), DI::Error> {
        let Some(window) = self.clip(x, y, width, height) else {
            return Ok(());
        };

        let visible = usize::from(window.width());
        let rows = bytes
            .chunks(usize::from(width) * 2)
            .take(usize::from(window.height()));
        self.write_window(
            window,
            rows.flat_map(|row| {
                row.chunks_exact(2)
                    .take(visible)
                    .map(|pair| [pair[0], pair[1]])
            }),
        )
    }

    /// Pushes an off-screen [`framebuf::FrameBuf`] with its top left corner at
    /// `(x, y)`.
    pub fn show_framebuf(
        &mut self,
        x: u16,
        y: u16,
        framebuf: &framebuf::FrameBuf<'_>,
    ) -> Result<(), DI::Error> {
        self.draw_bitmap(
            x,
            y,
            framebuf.width(),
            framebuf.height(),
            framebuf.pixels(),
        )
    }

    ///
    /// Latches the inclusive window `(sx, sy)..=(ex, ey)` and starts a memory
    /// write into it. Every data-framed byte sent afterwards is pixel payload.
    ///
    /// The caller must pass an in-bounds window with `sx <= ex` and
    /// `sy <= ey`; drawing methods clip before calling this. The row opcode
    /// carries the y range and goes first, then the column opcode with the
    /// x range.
    ///
    pub fn set_address_window(
        &mut self,
        sx: u16,
        sy: u16,
        ex: u16,
        ey: u16,
    ) -> Result<(), DI::Error> {
        debug_assert!(sx <= ex && ex < self.size.0, "column range out of bounds");
        debug_assert!(sy <= ey && ey < self.size.1, "row range out of bounds");

        self.di.write_command(SetRowAddress::new(sy, ey))?;
        self.di.write_command(SetColumnAddress::new(sx, ex))?;
        self.di.write_command(WriteMemoryStart)
    }

    ///
    /// Release resources allocated to this driver back.
    /// This returns the bus transport and the reset and backlight pins.
    ///
    pub fn release(self) -> (DI, Option<RST>, Option<BL>) {
        (self.di, self.rst, self.bl)
    }

    /// Returns the transport for sending raw commands.
    ///
    /// # Safety
    ///
    /// Raw commands can change controller state (pixel format, address mode,
    /// sleep) that the drawing methods assume is fixed. The caller must leave
    /// the controller configured as [`Builder::init`] set it up.
    pub unsafe fn raw_interface_mut(&mut self) -> &mut DI {
        &mut self.di
    }

    fn clip(&self, x: u16, y: u16, width: u16, height: u16) -> Option<Window> {
        let window = Window::clip(x, y, width, height, self.size);

        #[cfg(feature = "defmt")]
        {
            if window.is_none() {
                defmt::trace!("st7789: ({}, {}) {}x{} clipped away", x, y, width, height);
            }
        }

        window
    }

    // Sets `window` and streams `pixels` into it under one chip select.
    pub(crate) fn write_window<I>(&mut self, window: Window, pixels: I) -> Result<(), DI::Error>
    where
        I: IntoIterator<Item = [u8; 2]>,
    {
        self.set_address_window(window.sx, window.sy, window.ex, window.ey)?;
        self.di
            .session(Framing::Data, |di| stream_pixels(di, pixels))
    }
}

#[cfg(feature = "batch")]
fn stream_pixels<DI, I>(di: &mut DI, pixels: I) -> Result<(), DI::Error>
where
    DI: Interface,
    I: IntoIterator<Item = [u8; 2]>,
{
    let mut chunk = heapless::Vec::<u8, BATCH_SIZE>::new();
    for pixel in pixels {
        if chunk.extend_from_slice(&pixel).is_err() {
            di.write(&chunk)?;
            chunk.clear();
            // an empty chunk always has room for one pixel
            let _ = chunk.extend_from_slice(&pixel);
        }
    }
    if !chunk.is_empty() {
        di.write(&chunk)?;
    }
    Ok(())
}

#[cfg(not(feature = "batch"))]
fn stream_pixels<DI, I>(di: &mut DI, pixels: I) -> Result<(), DI::Error>
where
    DI: Interface,
    I: IntoIterator<Item = [u8; 2]>,
{
    for pixel in pixels {
        di.write(&pixel)?;
    }
    Ok(())
}

/// Mock implementations of embedded-hal and interface traits.
///
/// Do not use types in this module outside of doc tests.
#[doc(hidden)]
pub mod _mock {
    use core::convert::Infallible;

    use embedded_hal::{delay::DelayNs, digital, i2c, spi};

    use crate::interface::{Framing, Interface};
    use crate::{Builder, Display, NoPin};

    pub fn new_mock_display() -> Display<MockDisplayInterface, NoPin, NoPin> {
        match Builder::new(MockDisplayInterface).init(&mut MockDelay) {
            Ok(display) => display,
            Err(_) => unreachable!("mock interface cannot fail"),
        }
    }

    pub struct MockOutputPin;

    impl digital::OutputPin for MockOutputPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl digital::ErrorType for MockOutputPin {
        type Error = Infallible;
    }

    pub struct MockSpi;

    impl spi::SpiBus for MockSpi {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl spi::ErrorType for MockSpi {
        type Error = Infallible;
    }

    pub struct MockI2c;

    impl i2c::I2c for MockI2c {
        fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [i2c::Operation<'_>],
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl i2c::ErrorType for MockI2c {
        type Error = Infallible;
    }

    pub struct MockDelay;

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    pub struct MockDisplayInterface;

    impl Interface for MockDisplayInterface {
        type Error = Infallible;

        fn select(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn deselect(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn set_framing(&mut self, _framing: Framing) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, _bytes: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }
    }
}

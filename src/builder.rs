//! [super::Display] builder module

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};

use crate::{
    dcs::{ExitSleepMode, InterfaceExt, SetAddressMode, SetDisplayOn, SetPixelFormat},
    interface::Interface,
    Display,
};

/// Controller RAM in the panel's landscape wiring, in pixels.
///
/// With MADCTL 0x00 the ST7789 itself addresses 240 columns by 320 rows.
/// [`Display::set_address_window`] sends the y range with RASET and the x
/// range with CASET, so at the default 320×240 size CASET end values run up
/// to 319, past the controller's 240 columns. Boards whose panel is wired
/// landscape this way need the x range on RASET instead (swap the two
/// commands in `set_address_window`), or a portrait size such as 240×320.
pub const FRAMEBUFFER_SIZE: (u16, u16) = (320, 240);

/// Width of the active-low reset pulse, and the wait after releasing it.
const RESET_PULSE_MS: u32 = 50;
const RESET_SETTLE_MS: u32 = 50;
/// The controller ignores commands for 120 ms after SLPOUT.
const SLEEP_OUT_SETTLE_MS: u32 = 120;
/// DISPON needs some time, otherwise early RAMWR data can be lost.
const DISPLAY_ON_SETTLE_MS: u32 = 120;

/// Builder for [Display] instances.
///
/// Calling [`Builder::init`] runs the power-up sequence exactly once and
/// hands back the [Display]; drawing is only reachable after that.
///
/// ```
/// use st7789_lite::{Builder, _mock::{MockDelay, MockDisplayInterface, MockOutputPin}};
///
/// let display = Builder::new(MockDisplayInterface)
///     .reset_pin(MockOutputPin)
///     .backlight_pin(MockOutputPin)
///     .init(&mut MockDelay)
///     .unwrap();
/// assert_eq!((display.width(), display.height()), (320, 240));
/// ```
pub struct Builder<DI, RST, BL>
where
    DI: Interface,
{
    di: DI,
    rst: Option<RST>,
    bl: Option<BL>,
    display_size: (u16, u16),
}

impl<DI> Builder<DI, NoPin, NoPin>
where
    DI: Interface,
{
    #[must_use]
    pub fn new(di: DI) -> Self {
        Self {
            di,
            rst: None,
            bl: None,
            display_size: FRAMEBUFFER_SIZE,
        }
    }
}

impl<DI, RST, BL> Builder<DI, RST, BL>
where
    DI: Interface,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Visible area in pixels. Defaults to [`FRAMEBUFFER_SIZE`].
    #[must_use]
    pub fn display_size(mut self, width: u16, height: u16) -> Self {
        self.display_size = (width, height);
        self
    }

    #[must_use]
    pub fn reset_pin<RST2: OutputPin>(self, rst: RST2) -> Builder<DI, RST2, BL> {
        Builder {
            di: self.di,
            rst: Some(rst),
            bl: self.bl,
            display_size: self.display_size,
        }
    }

    #[must_use]
    pub fn backlight_pin<BL2: OutputPin>(self, bl: BL2) -> Builder<DI, RST, BL2> {
        Builder {
            di: self.di,
            rst: self.rst,
            bl: Some(bl),
            display_size: self.display_size,
        }
    }

    /// Resets and configures the panel, then returns the ready [Display].
    ///
    /// Order matters on real hardware: nothing may be sent before the reset
    /// pulse has settled, and nothing but DISPON setup before the SLPOUT
    /// delay has elapsed.
    pub fn init(
        mut self,
        delay: &mut impl DelayNs,
    ) -> Result<Display<DI, RST, BL>, InitError<DI::Error, RST::Error, BL::Error>> {
        let (width, height) = self.display_size;
        let (max_width, max_height) = FRAMEBUFFER_SIZE;
        let fits = (width <= max_width && height <= max_height)
            || (width <= max_height && height <= max_width);
        if width == 0 || height == 0 || !fits {
            return Err(InitError::InvalidConfiguration(
                ConfigurationError::InvalidDisplaySize,
            ));
        }

        // chip select idles inactive
        self.di.deselect().map_err(InitError::Interface)?;

        if let Some(ref mut rst) = self.rst {
            rst.set_high().map_err(InitError::ResetPin)?;
            rst.set_low().map_err(InitError::ResetPin)?;
            delay.delay_ms(RESET_PULSE_MS);
            rst.set_high().map_err(InitError::ResetPin)?;
            delay.delay_ms(RESET_SETTLE_MS);
        }

        if let Some(ref mut bl) = self.bl {
            bl.set_high().map_err(InitError::BacklightPin)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("st7789: reset done, leaving sleep");

        self.di
            .write_command(ExitSleepMode)
            .map_err(InitError::Interface)?;
        delay.delay_ms(SLEEP_OUT_SETTLE_MS);

        self.di
            .write_command(SetPixelFormat::RGB565)
            .map_err(InitError::Interface)?;
        self.di
            .write_command(SetAddressMode::default())
            .map_err(InitError::Interface)?;

        self.di
            .write_command(SetDisplayOn)
            .map_err(InitError::Interface)?;
        delay.delay_ms(DISPLAY_ON_SETTLE_MS);

        #[cfg(feature = "defmt")]
        defmt::debug!("st7789: display on, {}x{}", width, height);

        Ok(Display {
            di: self.di,
            rst: self.rst,
            bl: self.bl,
            size: self.display_size,
        })
    }
}

/// Error returned by [`Builder::init`].
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError<DIError, RstError, BlError> {
    Interface(DIError),
    ResetPin(RstError),
    BacklightPin(BlError),
    InvalidConfiguration(ConfigurationError),
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigurationError {
    InvalidDisplaySize,
}

/// Placeholder for an unconnected reset or backlight line.
pub enum NoPin {}

impl digital::OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl digital::ErrorType for NoPin {
    type Error = core::convert::Infallible;
}

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::{Framing, Interface};

/// Spi interface error
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError<SPI, DC, CS> {
    Spi(SPI),
    Dc(DC),
    Cs(CS),
}

/// Four-wire SPI transport: clock, MOSI, D/C and a chip select driven by
/// this interface rather than by the bus.
///
/// ```
/// use st7789_lite::{interface::SpiInterface, Builder, _mock::{MockDelay, MockOutputPin, MockSpi}};
///
/// let di = SpiInterface::new(MockSpi, MockOutputPin, MockOutputPin);
/// let display = Builder::new(di).init(&mut MockDelay).unwrap();
/// let (di, _, _) = display.release();
/// let (_spi, _dc, _cs) = di.release();
/// ```
pub struct SpiInterface<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC, CS> SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create new interface
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self { spi, dc, cs }
    }

    /// Release the SPI bus and both control pins, deconstructing the interface
    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }
}

impl<SPI, DC, CS> Interface for SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    type Error = SpiError<SPI::Error, DC::Error, CS::Error>;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(SpiError::Cs)
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        // SpiBus::write may return before the last byte is clocked out.
        let flushed = self.spi.flush().map_err(SpiError::Spi);
        self.cs.set_high().map_err(SpiError::Cs)?;
        flushed
    }

    fn set_framing(&mut self, framing: Framing) -> Result<(), Self::Error> {
        match framing {
            Framing::Command => self.dc.set_low(),
            Framing::Data => self.dc.set_high(),
        }
        .map_err(SpiError::Dc)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes).map_err(SpiError::Spi)
    }
}

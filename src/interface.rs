//! Bus transport.

mod spi;
pub use spi::*;

/// Interpretation of the bytes sent during one bus session, selected by the
/// D/C line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Framing {
    /// Bytes are opcodes (D/C low).
    Command,
    /// Bytes are parameters or pixel payload (D/C high).
    Data,
}

/// Raw byte transport to the panel.
///
/// A session is `select`, one `set_framing`, any number of `write`s, then
/// `deselect`. Sessions never nest. Prefer [`Interface::session`], which
/// keeps select and deselect paired.
pub trait Interface {
    /// Error type
    type Error: core::fmt::Debug;

    /// Takes the bus (chip select active).
    fn select(&mut self) -> Result<(), Self::Error>;

    /// Releases the bus. Any buffered bytes must be on the wire before the
    /// chip select goes inactive.
    fn deselect(&mut self) -> Result<(), Self::Error>;

    /// Fixes the framing for the rest of the current session.
    fn set_framing(&mut self, framing: Framing) -> Result<(), Self::Error>;

    /// Sends `bytes`, blocking until the bus has accepted all of them.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Runs `f` inside a single session with `framing`.
    ///
    /// The bus is deselected even if `f` fails; the first error wins.
    fn session<F>(&mut self, framing: Framing, f: F) -> Result<(), Self::Error>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.select()?;
        let result = self.set_framing(framing).and_then(|()| f(self));
        let released = self.deselect();
        result.and(released)
    }
}

impl<T: Interface + ?Sized> Interface for &mut T {
    type Error = T::Error;

    fn select(&mut self) -> Result<(), Self::Error> {
        T::select(self)
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        T::deselect(self)
    }

    fn set_framing(&mut self, framing: Framing) -> Result<(), Self::Error> {
        T::set_framing(self, framing)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        T::write(self, bytes)
    }
}

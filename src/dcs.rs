//! ST7789 command set.
//!
//! Every command is an opcode sent in its own command-framed session,
//! followed, when it has parameters, by one data-framed session carrying
//! them. Commands are never batched under a single chip select.

use crate::interface::{Framing, Interface};

/// ST7789 opcodes used by this driver.
///
/// Values and section numbers are from the Sitronix ST7789V datasheet,
/// "System function command" table.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    /// Sleep out, 9.1.12.
    SLPOUT = 0x11,
    /// Display on, 9.1.19.
    DISPON = 0x29,
    /// Column address set, 9.1.20.
    CASET = 0x2A,
    /// Row address set, 9.1.21.
    RASET = 0x2B,
    /// Memory write, 9.1.22.
    RAMWR = 0x2C,
    /// Memory data access control, 9.1.28.
    MADCTL = 0x36,
    /// Interface pixel format, 9.1.32.
    COLMOD = 0x3A,
}

/// A command with its encoded parameters.
pub trait DcsCommand {
    /// Opcode sent in command framing.
    fn instruction(&self) -> Instruction;

    /// Writes the parameter bytes into `buffer` and returns how many were
    /// written.
    fn fill_params_buf(&self, buffer: &mut [u8]) -> usize;
}

/// Command helpers for every [`Interface`].
pub trait InterfaceExt: Interface + Sized {
    /// Sends a typed command.
    fn write_command(&mut self, command: impl DcsCommand) -> Result<(), Self::Error> {
        let mut param_bytes = [0u8; 4];
        let n = command.fill_params_buf(&mut param_bytes);
        self.write_raw(command.instruction() as u8, &param_bytes[..n])
    }

    /// Sends a raw opcode, then its parameters if there are any.
    fn write_raw(&mut self, instruction: u8, params: &[u8]) -> Result<(), Self::Error> {
        self.session(Framing::Command, |di| di.write(&[instruction]))?;
        if !params.is_empty() {
            self.session(Framing::Data, |di| di.write(params))?;
        }
        Ok(())
    }
}

impl<T: Interface> InterfaceExt for T {}

macro_rules! dcs_basic_command {
    ($(#[$meta:meta])* $name:ident = $instruction:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl DcsCommand for $name {
            fn instruction(&self) -> Instruction {
                Instruction::$instruction
            }

            fn fill_params_buf(&self, _buffer: &mut [u8]) -> usize {
                0
            }
        }
    };
}

dcs_basic_command!(
    /// Leaves sleep mode. Needs 120 ms before the next command.
    ExitSleepMode = SLPOUT
);
dcs_basic_command!(
    /// Turns the panel output on.
    SetDisplayOn = DISPON
);
dcs_basic_command!(
    /// Starts a memory write into the current address window. Every
    /// data-framed byte after it is pixel payload until the next command.
    WriteMemoryStart = RAMWR
);

fn fill_range(buffer: &mut [u8], start: u16, end: u16) -> usize {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    buffer[..4].copy_from_slice(&[s_hi, s_lo, e_hi, e_lo]);
    4
}

/// Inclusive column range of the address window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetColumnAddress {
    start: u16,
    end: u16,
}

impl SetColumnAddress {
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }
}

impl DcsCommand for SetColumnAddress {
    fn instruction(&self) -> Instruction {
        Instruction::CASET
    }

    fn fill_params_buf(&self, buffer: &mut [u8]) -> usize {
        fill_range(buffer, self.start, self.end)
    }
}

/// Inclusive row range of the address window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetRowAddress {
    start: u16,
    end: u16,
}

impl SetRowAddress {
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }
}

impl DcsCommand for SetRowAddress {
    fn instruction(&self) -> Instruction {
        Instruction::RASET
    }

    fn fill_params_buf(&self, buffer: &mut [u8]) -> usize {
        fill_range(buffer, self.start, self.end)
    }
}

/// COLMOD parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPixelFormat(u8);

impl SetPixelFormat {
    /// 16 bits per pixel on both the RGB and the MCU interface (0b101 in
    /// each nibble).
    pub const RGB565: Self = Self(0x55);
}

impl DcsCommand for SetPixelFormat {
    fn instruction(&self) -> Instruction {
        Instruction::COLMOD
    }

    fn fill_params_buf(&self, buffer: &mut [u8]) -> usize {
        buffer[0] = self.0;
        1
    }
}

/// MADCTL parameter. The default is no rotation, no mirroring, RGB order
/// and top-to-bottom refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetAddressMode(u8);

impl DcsCommand for SetAddressMode {
    fn instruction(&self) -> Instruction {
        Instruction::MADCTL
    }

    fn fill_params_buf(&self, buffer: &mut [u8]) -> usize {
        buffer[0] = self.0;
        1
    }
}

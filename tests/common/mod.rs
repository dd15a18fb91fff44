//! Recording collaborators: every bus, pin and delay event lands in one
//! shared log so tests can check ordering across all of them.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::{delay::DelayNs, digital};
use st7789_lite::{
    interface::{Framing, Interface},
    Builder, Display,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Select,
    Deselect,
    Framing(Framing),
    Write(Vec<u8>),
    Pin(&'static str, bool),
    DelayMs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

/// Transport that logs every call and panics on session misuse: nested
/// selects, writes outside a session, or writes before framing is set.
pub struct Recorder {
    log: Log,
    selected: bool,
    framing: Option<Framing>,
}

impl Recorder {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            selected: false,
            framing: None,
        }
    }
}

impl Interface for Recorder {
    type Error = Infallible;

    fn select(&mut self) -> Result<(), Self::Error> {
        assert!(!self.selected, "nested select");
        self.selected = true;
        self.framing = None;
        self.log.borrow_mut().push(Event::Select);
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        self.selected = false;
        self.log.borrow_mut().push(Event::Deselect);
        Ok(())
    }

    fn set_framing(&mut self, framing: Framing) -> Result<(), Self::Error> {
        assert!(self.selected, "framing outside a session");
        assert!(self.framing.is_none(), "framing changed mid-session");
        self.framing = Some(framing);
        self.log.borrow_mut().push(Event::Framing(framing));
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        assert!(self.selected, "write outside a session");
        assert!(self.framing.is_some(), "write before framing");
        self.log.borrow_mut().push(Event::Write(bytes.to_vec()));
        Ok(())
    }
}

pub struct RecordingPin {
    log: Log,
    name: &'static str,
}

impl RecordingPin {
    pub fn new(log: Log, name: &'static str) -> Self {
        Self { log, name }
    }
}

impl digital::ErrorType for RecordingPin {
    type Error = Infallible;
}

impl digital::OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Pin(self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Pin(self.name, true));
        Ok(())
    }
}

pub struct RecordingDelay(pub Log);

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().push(Event::DelayMs(us / 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(Event::DelayMs(ms));
    }
}

/// One select..deselect interval: its framing and every byte written in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Command(Vec<u8>),
    Data(Vec<u8>),
}

/// Folds bus events into sessions, ignoring pins and delays.
pub fn sessions(log: &Log) -> Vec<Session> {
    let mut out = Vec::new();
    let mut current: Option<(Option<Framing>, Vec<u8>)> = None;
    for event in log.borrow().iter() {
        match event {
            Event::Select => current = Some((None, Vec::new())),
            Event::Framing(f) => current.as_mut().expect("framing outside session").0 = Some(*f),
            Event::Write(bytes) => current
                .as_mut()
                .expect("write outside session")
                .1
                .extend_from_slice(bytes),
            Event::Deselect => {
                if let Some((framing, bytes)) = current.take() {
                    out.push(match framing.expect("session without framing") {
                        Framing::Command => Session::Command(bytes),
                        Framing::Data => Session::Data(bytes),
                    });
                }
            }
            Event::Pin(..) | Event::DelayMs(_) => {}
        }
    }
    out
}

pub fn cmd(opcode: u8) -> Session {
    Session::Command(vec![opcode])
}

pub fn data(bytes: &[u8]) -> Session {
    Session::Data(bytes.to_vec())
}

/// The three-command window sequence for `(sx, sy)..=(ex, ey)`.
pub fn window(sx: u16, sy: u16, ex: u16, ey: u16) -> Vec<Session> {
    let range = |a: u16, b: u16| {
        let mut v = a.to_be_bytes().to_vec();
        v.extend_from_slice(&b.to_be_bytes());
        Session::Data(v)
    };
    vec![cmd(0x2B), range(sy, ey), cmd(0x2A), range(sx, ex), cmd(0x2C)]
}

pub type TestDisplay = Display<Recorder, RecordingPin, RecordingPin>;

/// Initialised 320×240 display whose log has been cleared after init.
pub fn display() -> (TestDisplay, Log) {
    display_sized(320, 240)
}

pub fn display_sized(width: u16, height: u16) -> (TestDisplay, Log) {
    let log = Log::default();
    let display = Builder::new(Recorder::new(log.clone()))
        .reset_pin(RecordingPin::new(log.clone(), "rst"))
        .backlight_pin(RecordingPin::new(log.clone(), "bl"))
        .display_size(width, height)
        .init(&mut RecordingDelay(log.clone()))
        .expect("init");
    log.borrow_mut().clear();
    (display, log)
}

/// Splits a pixel payload into big-endian 16-bit values.
pub fn pixels(payload: &[u8]) -> Vec<u16> {
    payload
        .chunks_exact(2)
        .map(|p| u16::from_be_bytes([p[0], p[1]]))
        .collect()
}

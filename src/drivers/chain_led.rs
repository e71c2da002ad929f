//! Chainable RGB indicator driver (P9813-style two-wire clock/data bus).
//!
//! Frame layout, every byte MSB first:
//!
//! ```text
//!  00 00 00 00 │ prefix B G R │ prefix B G R │ … │ 00 00 00 00
//!    start         element 0      element 1          end
//! ```
//!
//! The prefix carries inverted copies of the top two bits of each channel
//! as a checksum: `0xC0`, plus one flag per zero bit (B7→0x20, B6→0x10,
//! G7→0x08, G6→0x04, R7→0x02, R6→0x01).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

const FRAME_MARKER: [u8; 4] = [0x00; 4];

/// Prefix byte for one colour word.
pub const fn color_prefix(r: u8, g: u8, b: u8) -> u8 {
    let mut prefix = 0xC0;
    if b & 0x80 == 0 {
        prefix |= 0x20;
    }
    if b & 0x40 == 0 {
        prefix |= 0x10;
    }
    if g & 0x80 == 0 {
        prefix |= 0x08;
    }
    if g & 0x40 == 0 {
        prefix |= 0x04;
    }
    if r & 0x80 == 0 {
        prefix |= 0x02;
    }
    if r & 0x40 == 0 {
        prefix |= 0x01;
    }
    prefix
}

/// Wire order for one element: prefix, then B, G, R.
pub const fn color_word(r: u8, g: u8, b: u8) -> [u8; 4] {
    [color_prefix(r, g, b), b, g, r]
}

pub struct ChainableLed<P, D> {
    clk: P,
    data: P,
    delay: D,
    count: usize,
    half_period_us: u32,
    current: (u8, u8, u8),
}

impl<P, D> ChainableLed<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the bus lines.  Call [`initialize`](Self::initialize)
    /// before first use.
    pub fn new(clk: P, data: P, delay: D, count: usize, half_period_us: u32) -> Self {
        Self {
            clk,
            data,
            delay,
            count,
            half_period_us,
            current: (0, 0, 0),
        }
    }

    /// Blank every element in the chain.
    pub fn initialize(&mut self) -> Result<(), P::Error> {
        for index in 0..self.count {
            self.set_color(index, 0, 0, 0)?;
        }
        Ok(())
    }

    /// Send one full frame painting the chain `(r, g, b)`.
    ///
    /// `_index` is not used for addressing: every element in the chain
    /// receives the same colour word.
    pub fn set_color(&mut self, _index: usize, r: u8, g: u8, b: u8) -> Result<(), P::Error> {
        self.send_bytes(&FRAME_MARKER)?;
        let word = color_word(r, g, b);
        for _ in 0..self.count {
            self.send_bytes(&word)?;
        }
        self.send_bytes(&FRAME_MARKER)?;
        self.current = (r, g, b);
        Ok(())
    }

    /// Colour most recently latched onto the chain.
    pub fn current_colour(&self) -> (u8, u8, u8) {
        self.current
    }

    fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), P::Error> {
        for &byte in bytes {
            self.send_byte(byte)?;
        }
        Ok(())
    }

    fn send_byte(&mut self, mut byte: u8) -> Result<(), P::Error> {
        for _ in 0..8 {
            self.data.set_state((byte & 0x80 != 0).into())?;
            self.clock_pulse()?;
            byte <<= 1;
        }
        Ok(())
    }

    fn clock_pulse(&mut self) -> Result<(), P::Error> {
        self.clk.set_low()?;
        self.delay.delay_us(self.half_period_us);
        self.clk.set_high()?;
        self.delay.delay_us(self.half_period_us);
        Ok(())
    }
}

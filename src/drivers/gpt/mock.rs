//! Simulated GPT register file.

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use super::regs::{field_bits, GptReg, RegisterIo, CR, GPT_REGISTER_COUNT};

/// In-memory register file that models the self-clearing reset bit.
///
/// After `SWR` is written, the bit reads back set for `reset_latency`
/// control register reads, then clears along with the rest of the block.
/// A stuck reset never clears.
pub struct MockRegisters {
    words: [Cell<u32>; GPT_REGISTER_COUNT],
    reset_latency: u32,
    reset_pending: Cell<Option<u32>>,
    stuck_reset: bool,
    writes: RefCell<Vec<(GptReg, u32)>>,
}

impl MockRegisters {
    pub fn new() -> Self {
        Self::with_reset_latency(3)
    }

    pub fn with_reset_latency(reset_latency: u32) -> Self {
        MockRegisters {
            words: Default::default(),
            reset_latency,
            reset_pending: Cell::new(None),
            stuck_reset: false,
            writes: RefCell::new(Vec::new()),
        }
    }

    pub fn stuck() -> Self {
        MockRegisters {
            stuck_reset: true,
            ..Self::new()
        }
    }

    /// Forces a register value, bypassing read-only rules.
    pub fn poke(&self, reg: GptReg, value: u32) {
        self.words[reg.index()].set(value);
    }

    pub fn peek(&self, reg: GptReg) -> u32 {
        self.words[reg.index()].get()
    }

    pub fn writes(&self) -> Vec<(GptReg, u32)> {
        self.writes.borrow().clone()
    }

    pub fn reset_count(&self) -> usize {
        self.writes
            .borrow()
            .iter()
            .filter(|(reg, value)| *reg == GptReg::Cr && value & field_bits(CR::SWR) != 0)
            .count()
    }
}

impl RegisterIo for MockRegisters {
    fn read32(&self, reg: GptReg) -> u32 {
        if reg == GptReg::Cr && !self.stuck_reset {
            match self.reset_pending.get() {
                Some(0) => {
                    self.reset_pending.set(None);
                    for word in self.words.iter() {
                        word.set(0);
                    }
                }
                Some(n) => self.reset_pending.set(Some(n - 1)),
                None => {}
            }
        }
        self.peek(reg)
    }

    fn write32(&self, reg: GptReg, value: u32) {
        self.writes.borrow_mut().push((reg, value));
        if !reg.is_writable() {
            return;
        }
        if reg == GptReg::Cr
            && value & field_bits(CR::SWR) != 0
            && self.reset_pending.get().is_none()
        {
            self.reset_pending.set(Some(self.reset_latency));
        }
        self.poke(reg, value);
    }
}

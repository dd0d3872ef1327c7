//! GPT register block and the register access seam used by the driver.
//!
//! The layout is fixed by the peripheral: ten consecutive 32-bit words.

use tock_registers::fields::Field;
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::RegisterLongName;
use tock_registers::{register_bitfields, register_structs};

use crate::drivers::error::DriverError;

register_bitfields![u32,
    pub CR [
        /// GPT enable.
        EN OFFSET(0) NUMBITS(1) [],
        /// Clock source select.
        CLKSRC OFFSET(6) NUMBITS(3) [
            NoClock = 0,
            PeripheralClock = 1,
            HighFrequencyClock = 2,
            ExternalClock = 3,
            LowFrequencyClock = 4,
            Crystal24M = 5
        ],
        /// Enable the 24 MHz crystal input.
        EN_24M OFFSET(14) NUMBITS(1) [],
        /// Software reset, self-clearing.
        SWR OFFSET(15) NUMBITS(1) []
    ],
    pub PR [
        PRESCALER OFFSET(0) NUMBITS(12) [],
        PRESCALER24M OFFSET(12) NUMBITS(4) []
    ]
];

register_structs! {
    /// The layout of the GPT peripheral.
    #[allow(non_snake_case)]
    pub GptRegisterBlock {
        (0x00 => CR: ReadWrite<u32, CR::Register>),  // Control Register
        (0x04 => PR: ReadWrite<u32, PR::Register>),  // Prescaler Register
        (0x08 => SR: ReadWrite<u32>),                // Status Register
        (0x0c => IR: ReadWrite<u32>),                // Interrupt Register
        (0x10 => OCR1: ReadWrite<u32>),              // Output Compare Register 1
        (0x14 => OCR2: ReadWrite<u32>),              // Output Compare Register 2
        (0x18 => OCR3: ReadWrite<u32>),              // Output Compare Register 3
        (0x1c => ICR1: ReadOnly<u32>),               // Input Capture Register 1
        (0x20 => ICR2: ReadOnly<u32>),               // Input Capture Register 2
        (0x24 => CNT: ReadOnly<u32>),                // Counter Register
        (0x28 => @END),
    }
}

const_assert_eq!(core::mem::size_of::<GptRegisterBlock>(), GPT_REGISTER_COUNT * 4);

/// Number of 32-bit registers in the block.
pub const GPT_REGISTER_COUNT: usize = 10;

/// A GPT register, by byte offset from the block base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum GptReg {
    Cr = 0x00,
    Pr = 0x04,
    Sr = 0x08,
    Ir = 0x0c,
    Ocr1 = 0x10,
    Ocr2 = 0x14,
    Ocr3 = 0x18,
    Icr1 = 0x1c,
    Icr2 = 0x20,
    Cnt = 0x24,
}

impl GptReg {
    pub const ALL: [GptReg; GPT_REGISTER_COUNT] = [
        GptReg::Cr,
        GptReg::Pr,
        GptReg::Sr,
        GptReg::Ir,
        GptReg::Ocr1,
        GptReg::Ocr2,
        GptReg::Ocr3,
        GptReg::Icr1,
        GptReg::Icr2,
        GptReg::Cnt,
    ];

    pub const fn offset(self) -> usize {
        self as usize
    }

    /// Word index of the register inside the block.
    pub const fn index(self) -> usize {
        self.offset() / 4
    }

    /// Whether software writes reach the hardware.
    pub const fn is_writable(self) -> bool {
        !matches!(self, GptReg::Icr1 | GptReg::Icr2 | GptReg::Cnt)
    }
}

/// Raw in-register bits covered by `field`.
pub fn field_bits<R: RegisterLongName>(field: Field<u32, R>) -> u32 {
    field.mask << field.shift
}

/// Word-level access to a GPT register block.
///
/// The driver only talks to hardware through this trait, so a simulated
/// register file can stand in for the peripheral.
pub trait RegisterIo {
    fn read32(&self, reg: GptReg) -> u32;
    fn write32(&self, reg: GptReg, value: u32);

    fn setbits32(&self, reg: GptReg, bits: u32) {
        let value = self.read32(reg);
        self.write32(reg, value | bits);
    }

    fn clearbits32(&self, reg: GptReg, bits: u32) {
        let value = self.read32(reg);
        self.write32(reg, value & !bits);
    }
}

impl<T: RegisterIo + ?Sized> RegisterIo for &T {
    fn read32(&self, reg: GptReg) -> u32 {
        (**self).read32(reg)
    }

    fn write32(&self, reg: GptReg, value: u32) {
        (**self).write32(reg, value)
    }
}

/// Memory-mapped GPT instance.
#[derive(Debug)]
pub struct GptMmio {
    base_addr: usize,
}

impl core::ops::Deref for GptMmio {
    type Target = GptRegisterBlock;

    fn deref(&self) -> &Self::Target {
        unsafe { &*self.ptr() }
    }
}

impl GptMmio {
    /// Wraps the register block at `base_addr`.
    ///
    /// # Safety
    ///
    /// `base_addr` must point at a mapped GPT register block that nothing
    /// else accesses for the lifetime of the returned value.
    pub const unsafe fn new(base_addr: usize) -> Self {
        GptMmio { base_addr }
    }

    /// Checks an address resolved from the hardware description.
    ///
    /// # Safety
    ///
    /// Same contract as [`GptMmio::new`] once the address is resolved.
    pub unsafe fn from_addr(addr: Option<usize>) -> Result<Self, DriverError> {
        match addr {
            Some(base) if base != 0 && base % core::mem::align_of::<u32>() == 0 => {
                Ok(Self::new(base))
            }
            _ => Err(DriverError::InvalidAddress),
        }
    }

    pub fn base_addr(&self) -> usize {
        self.base_addr
    }

    fn ptr(&self) -> *const GptRegisterBlock {
        self.base_addr as *const _
    }
}

impl RegisterIo for GptMmio {
    fn read32(&self, reg: GptReg) -> u32 {
        match reg {
            GptReg::Cr => self.CR.get(),
            GptReg::Pr => self.PR.get(),
            GptReg::Sr => self.SR.get(),
            GptReg::Ir => self.IR.get(),
            GptReg::Ocr1 => self.OCR1.get(),
            GptReg::Ocr2 => self.OCR2.get(),
            GptReg::Ocr3 => self.OCR3.get(),
            GptReg::Icr1 => self.ICR1.get(),
            GptReg::Icr2 => self.ICR2.get(),
            GptReg::Cnt => self.CNT.get(),
        }
    }

    fn write32(&self, reg: GptReg, value: u32) {
        if !reg.is_writable() {
            warn!("gpt@{:#x}: write {:#x} to read-only {:?} dropped", self.base_addr, value, reg);
            return;
        }
        match reg {
            GptReg::Cr => self.CR.set(value),
            GptReg::Pr => self.PR.set(value),
            GptReg::Sr => self.SR.set(value),
            GptReg::Ir => self.IR.set(value),
            GptReg::Ocr1 => self.OCR1.set(value),
            GptReg::Ocr2 => self.OCR2.set(value),
            GptReg::Ocr3 => self.OCR3.set(value),
            GptReg::Icr1 | GptReg::Icr2 | GptReg::Cnt => {}
        }
    }
}

// The block is owned by exactly one driver instance.
unsafe impl Send for GptMmio {}
unsafe impl Sync for GptMmio {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_hardware_layout() {
        for (i, reg) in GptReg::ALL.iter().enumerate() {
            assert_eq!(reg.index(), i);
            assert_eq!(reg.offset(), i * 4);
        }
        assert_eq!(GptReg::Cnt.offset(), 0x24);
    }

    #[test]
    fn control_fields_match_bit_positions() {
        assert_eq!(field_bits(CR::EN), 0x0000_0001);
        assert_eq!(field_bits(CR::CLKSRC), 0x0000_01c0);
        assert_eq!(field_bits(CR::EN_24M), 0x0000_4000);
        assert_eq!(field_bits(CR::SWR), 0x0000_8000);
        assert_eq!(field_bits(PR::PRESCALER), 0x0000_0fff);
        assert_eq!(field_bits(PR::PRESCALER24M), 0x0000_f000);
        assert_eq!(CR::CLKSRC::PeripheralClock.value, 1 << 6);
        assert_eq!(CR::CLKSRC::Crystal24M.value, 5 << 6);
    }

    #[test]
    fn unresolved_address_is_rejected() {
        assert_eq!(
            unsafe { GptMmio::from_addr(None) }.unwrap_err(),
            DriverError::InvalidAddress
        );
        assert_eq!(
            unsafe { GptMmio::from_addr(Some(0)) }.unwrap_err(),
            DriverError::InvalidAddress
        );
        assert_eq!(
            unsafe { GptMmio::from_addr(Some(0x401e_c002)) }.unwrap_err(),
            DriverError::InvalidAddress
        );
        let mmio = unsafe { GptMmio::from_addr(Some(0x401e_c000)) }.unwrap();
        assert_eq!(mmio.base_addr(), 0x401e_c000);
    }

    #[test]
    fn mmio_accesses_backing_words() {
        let mut words = [0u32; GPT_REGISTER_COUNT];
        let base = words.as_mut_ptr() as usize;
        let mmio = unsafe { GptMmio::new(base) };

        mmio.write32(GptReg::Pr, 24);
        mmio.setbits32(GptReg::Cr, field_bits(CR::EN) | CR::CLKSRC::PeripheralClock.value);
        mmio.clearbits32(GptReg::Cr, field_bits(CR::EN));
        assert_eq!(mmio.read32(GptReg::Pr), 24);
        assert_eq!(mmio.read32(GptReg::Cr), 1 << 6);

        unsafe { core::ptr::write_volatile((base as *mut u32).add(GptReg::Cnt.index()), 0xdead_beef) };
        assert_eq!(mmio.read32(GptReg::Cnt), 0xdead_beef);

        // Read-only registers ignore writes.
        for reg in GptReg::ALL.iter().filter(|reg| !reg.is_writable()) {
            mmio.write32(*reg, 7);
        }
        assert_eq!(mmio.read32(GptReg::Cnt), 0xdead_beef);
        assert_eq!(mmio.read32(GptReg::Icr1), 0);
        assert_eq!(mmio.read32(GptReg::Icr2), 0);
        drop(mmio);
        assert_eq!(words[GptReg::Pr.index()], 24);
    }
}

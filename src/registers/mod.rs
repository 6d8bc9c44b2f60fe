//! Memory-mapped register definitions for the PLC subsystem controller.
//!
//! The register layout is described using [`tock_registers`], which provides a
//! safe and zero-cost abstraction over volatile MMIO access. The two control
//! registers each get their own module holding the bit-field description and
//! the handshake helpers the driver uses; the data windows are plain word
//! arrays so every access is a full 32-bit volatile load or store.

use core::{ops::Deref, ptr::NonNull};

use tock_registers::{interfaces::Readable, register_structs, registers::ReadWrite};

pub mod consts;
pub mod rx;
pub mod tx;

use consts::DATA_WINDOW_WORDS;
pub use rx::RX_CON;
pub use tx::TX_CON;

register_structs! {
    pub PlcRegs {
        (0x00 => pub tx_con: ReadWrite<u8, TX_CON::Register>),
        (0x01 => pub rx_con: ReadWrite<u8, RX_CON::Register>),
        (0x02 => _reserved0),
        (0x04 => pub tx_data: [ReadWrite<u32>; DATA_WINDOW_WORDS]),
        (0x44 => pub rx_data: [ReadWrite<u32>; DATA_WINDOW_WORDS]),
        (0x84 => @END),
    }
}

impl PlcRegs {
    /// Raw contents of both control registers, for diagnostics.
    pub fn control_snapshot(&self) -> (u8, u8) {
        (self.tx_con.get(), self.rx_con.get())
    }
}

/// Handle onto the PLC register block.
///
/// The handle is a plain pointer, so copies all alias the same hardware.
/// Nothing here arbitrates between them: callers keep at most one transmit
/// and one receive in flight.
#[derive(Debug, Clone, Copy)]
pub struct PlcRegisters {
    base: NonNull<PlcRegs>,
}

unsafe impl Send for PlcRegisters {}
unsafe impl Sync for PlcRegisters {}

impl PlcRegisters {
    /// Create a new facade over the PLC MMIO region.
    ///
    /// # Safety
    ///
    /// The caller must ensure the provided pointer is a valid, 4-byte aligned
    /// mapping of the PLC register block for the lifetime of the returned
    /// object.
    pub const unsafe fn new(base_addr: NonNull<u8>) -> Self {
        Self {
            base: base_addr.cast(),
        }
    }

    pub fn as_ptr(&self) -> *mut u8 {
        self.base.as_ptr().cast()
    }
}

impl Deref for PlcRegisters {
    type Target = PlcRegs;

    fn deref(&self) -> &Self::Target {
        unsafe { self.base.as_ref() }
    }
}

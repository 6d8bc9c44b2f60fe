//! Register-level driver for the power-line communication (PLC) subsystem.
//!
//! The controller exposes two control bytes and two 64-byte data windows
//! through MMIO. A transfer is a strict handshake: fill the transmit window
//! and raise Start until the core reports Done, or acknowledge stale input
//! and wait for Pending before draining the receive window. Both directions
//! block the caller and poll with a short delay between reads, which makes
//! the driver usable on targets with no scheduler at all.
//!
//! ```rust,no_run
//! use plc::{Plc, PlcConfig, SpinDelay};
//!
//! let mut plc = unsafe { Plc::map_default(PlcConfig::default(), SpinDelay::new(50_000)) }.unwrap();
//! plc.init();
//! plc.send(&[0xde, 0xad, 0xbe, 0xef], 0, 4).unwrap();
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

use core::ptr::NonNull;

mod config;
mod err;
mod osal;
pub mod registers;

pub use config::*;
pub use err::*;
pub use osal::*;
use rdif_base::DriverGeneric;
use spin::Once;

use crate::registers::{
    PlcRegisters, PlcRegs,
    consts::{DATA_WINDOW_BYTES, WORD_BYTES},
};

/// Number of polls between two progress reports of a long wait.
const LOG_INTERVAL: usize = 1000;

static PLC_MMIO: Once<PlcRegisters> = Once::new();

/// Map the process-wide PLC register handle.
///
/// Only the first call takes effect; later calls return the handle created
/// by the first one regardless of `base`.
///
/// # Safety
///
/// `base` must be a valid mapping of the PLC register block for the rest of
/// the program.
pub unsafe fn map_plc_mmio(base: NonNull<u8>) -> PlcRegisters {
    *PLC_MMIO.call_once(|| unsafe { PlcRegisters::new(base) })
}

/// The process-wide PLC register handle, if it has been mapped.
pub fn plc_mmio() -> Option<PlcRegisters> {
    PLC_MMIO.get().copied()
}

/// Validate a `index..length` transfer over a buffer of `capacity` bytes and
/// return its size.
fn transfer_bytes(capacity: usize, index: usize, length: usize) -> Result<usize, PlcError> {
    if index > length || length > capacity {
        return Err(PlcError::InvalidRange {
            index,
            length,
            capacity,
        });
    }

    let bytes = length - index;
    if bytes % WORD_BYTES != 0 {
        return Err(PlcError::Unaligned { bytes });
    }
    if bytes > DATA_WINDOW_BYTES {
        return Err(PlcError::Overflow { bytes });
    }

    Ok(bytes)
}

/// Blocking driver for one PLC subsystem controller.
pub struct Plc<O: Osal> {
    regs: PlcRegisters,
    config: PlcConfig,
    osal: O,
}

impl<O: Osal> Plc<O> {
    /// Creates a driver over an already mapped register block.
    ///
    /// Several drivers may share one block; each direction must still see at
    /// most one transfer at a time.
    pub fn new(regs: PlcRegisters, config: PlcConfig, osal: O) -> Self {
        Self { regs, config, osal }
    }

    /// Creates a driver over the process-wide handle set up by
    /// [`map_plc_mmio`].
    pub fn from_global(config: PlcConfig, osal: O) -> Result<Self, PlcError> {
        let regs = plc_mmio().ok_or(PlcError::NotMapped)?;
        Ok(Self::new(regs, config, osal))
    }

    /// Maps `config.mmio_base` as the process-wide handle and creates a
    /// driver over it.
    ///
    /// Fails with [`PlcError::AlreadyMapped`] when the process-wide handle
    /// already points at a different address.
    ///
    /// # Safety
    ///
    /// `config.mmio_base` must be the identity-mapped address of the PLC
    /// register block.
    pub unsafe fn map_default(config: PlcConfig, osal: O) -> Result<Self, PlcError> {
        let base = NonNull::new(config.mmio_base as *mut u8).ok_or(PlcError::NotMapped)?;
        let regs = unsafe { map_plc_mmio(base) };
        let mapped = regs.as_ptr() as usize;
        if mapped != config.mmio_base {
            warn!(
                "PLC block already mapped at {mapped:#x}, refusing {:#x}",
                config.mmio_base
            );
            return Err(PlcError::AlreadyMapped { mapped });
        }
        Ok(Self::new(regs, config, osal))
    }

    /// Apply the configured divisor and gain. Running it again restores the
    /// same state.
    pub fn init(&mut self) {
        self.regs.set_tx_divisor(self.config.tx_divisor);
        self.regs.set_rx_gain(self.config.rx_gain);
        debug!(
            "PLC initialized: tx divisor {}, rx gain {}",
            self.regs.tx_divisor(),
            self.regs.rx_gain()
        );
    }

    /// Transmit `buf[index..length]` and block until the core has sent it.
    ///
    /// The range must be a whole number of words and fit the 64-byte
    /// transmit window. A rejected range leaves the hardware untouched.
    pub fn send(&mut self, buf: &[u8], index: usize, length: usize) -> Result<(), PlcError> {
        let bytes = transfer_bytes(buf.len(), index, length).inspect_err(|err| {
            warn!("PLC send rejected: {err}");
        })?;

        trace!("PLC send: priming {} words", bytes / WORD_BYTES);
        for (i, word) in buf[index..length].chunks_exact(WORD_BYTES).enumerate() {
            self.regs
                .write_tx_word(i, u32::from_ne_bytes([word[0], word[1], word[2], word[3]]));
        }

        self.regs.start_transmit();
        let waited = self.wait_for("tx done", PlcRegs::tx_done);

        // Start must drop even after a timeout, or the core refuses the next frame.
        self.regs.end_transmit();
        let polls = waited?;
        trace!("PLC send: complete after {polls} polls");

        Ok(())
    }

    /// Block until a packet arrives and copy its first `length - index` bytes
    /// into `buf[index..length]`.
    ///
    /// Anything the core received before this call is dropped. The same
    /// range rules as [`Plc::send`] apply.
    pub fn receive(&mut self, buf: &mut [u8], index: usize, length: usize) -> Result<(), PlcError> {
        let bytes = transfer_bytes(buf.len(), index, length).inspect_err(|err| {
            warn!("PLC receive rejected: {err}");
        })?;

        self.regs.ack_receive();
        trace!("PLC receive: waiting for a fresh packet");
        let polls = self.wait_for("rx pending", PlcRegs::rx_pending)?;

        trace!(
            "PLC receive: copying {} words after {polls} polls",
            bytes / WORD_BYTES
        );
        for (i, word) in buf[index..length].chunks_exact_mut(WORD_BYTES).enumerate() {
            word.copy_from_slice(&self.regs.read_rx_word(i).to_ne_bytes());
        }

        self.regs.ack_receive();

        Ok(())
    }

    /// Set the transmit output-level divisor. Only the low three bits are kept.
    pub fn set_tx_divisor(&mut self, div: u8) {
        self.regs.set_tx_divisor(div);
        debug!("PLC tx divisor set to {}", self.regs.tx_divisor());
    }

    /// Set the receive amplifier gain. Only the low three bits are kept.
    pub fn set_rx_gain(&mut self, gain: u8) {
        self.regs.set_rx_gain(gain);
        debug!("PLC rx gain set to {}", self.regs.rx_gain());
    }

    pub fn tx_divisor(&self) -> u8 {
        self.regs.tx_divisor()
    }

    pub fn rx_gain(&self) -> u8 {
        self.regs.rx_gain()
    }

    pub fn is_tx_done(&self) -> bool {
        self.regs.tx_done()
    }

    pub fn is_rx_pending(&self) -> bool {
        self.regs.rx_pending()
    }

    pub fn config(&self) -> &PlcConfig {
        &self.config
    }

    pub fn registers(&self) -> PlcRegisters {
        self.regs
    }

    /// Busy-wait until `ready` reports true, sleeping between polls.
    ///
    /// Returns the number of polls that found the flag clear.
    fn wait_for(&self, what: &str, ready: fn(&PlcRegs) -> bool) -> Result<usize, PlcError> {
        self.wait_from(what, ready, 0)
    }

    /// [`Plc::wait_for`] with the poll counter starting at `polls`. The
    /// counter saturates, so an unbounded wait never overflows it.
    fn wait_from(
        &self,
        what: &str,
        ready: fn(&PlcRegs) -> bool,
        mut polls: usize,
    ) -> Result<usize, PlcError> {

        while !ready(&*self.regs) {
            if let Some(max) = self.config.max_polls {
                if polls >= max {
                    let (tx_con, rx_con) = self.regs.control_snapshot();
                    error!(
                        "PLC wait for {what} timed out after {polls} polls: tx_con=0x{tx_con:02x} rx_con=0x{rx_con:02x}"
                    );
                    return Err(PlcError::Timeout { polls });
                }
            }

            if polls > 0 && polls % LOG_INTERVAL == 0 {
                let (tx_con, rx_con) = self.regs.control_snapshot();
                debug!(
                    "PLC waiting for {what}: polls={polls} tx_con=0x{tx_con:02x} rx_con=0x{rx_con:02x}"
                );
            }

            self.osal.msleep(self.config.poll_interval_ms);
            polls = polls.saturating_add(1);
        }

        Ok(polls)
    }
}

impl<O: Osal + Send + 'static> DriverGeneric for Plc<O> {
    fn open(&mut self) -> Result<(), rdif_base::KError> {
        self.init();
        Ok(())
    }

    fn close(&mut self) -> Result<(), rdif_base::KError> {
        Ok(())
    }
}

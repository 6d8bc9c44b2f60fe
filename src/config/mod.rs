//! Driver configuration for the PLC subsystem controller.
//!
//! The defaults reproduce the behavior of the firmware the controller was
//! designed against: output divisor 2, amplifier gain 2, a 1 ms delay between
//! status polls and no upper bound on how long a transfer may wait.

use crate::registers::consts::PLC_MMIO_BASE;

/// Default transmit output-level divisor applied by [`crate::Plc::init`].
pub const DEFAULT_TX_DIVISOR: u8 = 2;
/// Default receive amplifier gain applied by [`crate::Plc::init`].
pub const DEFAULT_RX_GAIN: u8 = 2;
/// Default delay between two polls of a handshake flag.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlcConfig {
    /// Address the register block is mapped at.
    pub mmio_base: usize,
    pub tx_divisor: u8,
    pub rx_gain: u8,
    pub poll_interval_ms: u32,
    /// Upper bound on polls per wait. `None` waits forever.
    pub max_polls: Option<usize>,
}

impl PlcConfig {
    pub const fn new() -> Self {
        Self {
            mmio_base: PLC_MMIO_BASE,
            tx_divisor: DEFAULT_TX_DIVISOR,
            rx_gain: DEFAULT_RX_GAIN,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_polls: None,
        }
    }

    pub const fn with_max_polls(mut self, polls: usize) -> Self {
        self.max_polls = Some(polls);
        self
    }
}

impl Default for PlcConfig {
    fn default() -> Self {
        Self::new()
    }
}

use tock_registers::interfaces::{ReadWriteable, Readable};

use super::{
    PlcRegs,
    consts::{DATA_WINDOW_WORDS, FIELD_3BIT_MAX},
};

tock_registers::register_bitfields! {u8,
    pub RX_CON [
        /// Set by hardware when a packet has landed in the receive window.
        PENDING OFFSET(0) NUMBITS(1) [],
        /// Write 1 to drop or consume the current packet.
        ACK OFFSET(1) NUMBITS(1) [],
        /// Amplifier gain.
        GAIN OFFSET(2) NUMBITS(3) []
    ]
}

impl PlcRegs {
    /// Write 1 to Ack.
    ///
    /// Before a receive this discards whatever the core already holds; after
    /// one it marks the packet consumed. Hardware is expected to clear
    /// Pending in response.
    pub fn ack_receive(&self) {
        self.rx_con.modify(RX_CON::ACK::SET);
    }

    pub fn rx_pending(&self) -> bool {
        self.rx_con.is_set(RX_CON::PENDING)
    }

    /// Write the low three bits of `gain` into the gain field.
    pub fn set_rx_gain(&self, gain: u8) {
        self.rx_con.modify(RX_CON::GAIN.val(gain & FIELD_3BIT_MAX));
    }

    pub fn rx_gain(&self) -> u8 {
        self.rx_con.read(RX_CON::GAIN)
    }

    /// Load one word from the receive window.
    ///
    /// `index` must be below [`DATA_WINDOW_WORDS`].
    pub fn read_rx_word(&self, index: usize) -> u32 {
        debug_assert!(index < DATA_WINDOW_WORDS);
        self.rx_data[index].get()
    }
}

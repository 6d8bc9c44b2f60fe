use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};

use super::{
    PlcRegs,
    consts::{DATA_WINDOW_WORDS, FIELD_3BIT_MAX},
};

tock_registers::register_bitfields! {u8,
    pub TX_CON [
        /// Write 1 to begin a transmit sequence, 0 to end it.
        START OFFSET(0) NUMBITS(1) [],
        /// Set by hardware once the frame has gone out.
        DONE OFFSET(1) NUMBITS(1) [],
        /// Output-level divisor.
        DIVISOR OFFSET(2) NUMBITS(3) []
    ]
}

impl PlcRegs {
    /// Assert Start, handing the contents of the transmit window to the core.
    pub fn start_transmit(&self) {
        self.tx_con.modify(TX_CON::START::SET);
    }

    /// Deassert Start so the core can accept the next transmit.
    pub fn end_transmit(&self) {
        self.tx_con.modify(TX_CON::START::CLEAR);
    }

    pub fn tx_done(&self) -> bool {
        self.tx_con.is_set(TX_CON::DONE)
    }

    /// Write the low three bits of `div` into the divisor field.
    pub fn set_tx_divisor(&self, div: u8) {
        self.tx_con.modify(TX_CON::DIVISOR.val(div & FIELD_3BIT_MAX));
    }

    pub fn tx_divisor(&self) -> u8 {
        self.tx_con.read(TX_CON::DIVISOR)
    }

    /// Store one word into the transmit window.
    ///
    /// `index` must be below [`DATA_WINDOW_WORDS`].
    pub fn write_tx_word(&self, index: usize, word: u32) {
        debug_assert!(index < DATA_WINDOW_WORDS);
        self.tx_data[index].set(word);
    }
}

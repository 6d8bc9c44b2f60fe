//! Raw offsets and constants of the PLC subsystem controller register block.

/// Address the controller's register block is mapped at on the reference
/// platform.
pub const PLC_MMIO_BASE: usize = 0x9200;

/// Offset of the transmit control register.
pub const OFFSET_TX_CON: usize = 0x00;
/// Offset of the receive control register.
pub const OFFSET_RX_CON: usize = 0x01;
/// Offset of the transmit data window.
pub const OFFSET_TX_DATA: usize = 0x04;
/// Offset of the receive data window.
pub const OFFSET_RX_DATA: usize = 0x44;
/// Size of the whole register block.
pub const REGISTER_BLOCK_SIZE: usize = 0x84;

/// Size of each data window in bytes.
pub const DATA_WINDOW_BYTES: usize = 64;
/// Width of a single data window access.
pub const WORD_BYTES: usize = 4;
/// Number of words in each data window.
pub const DATA_WINDOW_WORDS: usize = DATA_WINDOW_BYTES / WORD_BYTES;

/// Largest value the 3-bit divisor and gain fields can hold.
pub const FIELD_3BIT_MAX: u8 = 0b111;

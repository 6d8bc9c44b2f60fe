#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlcError {
    #[error("range {index}..{length} does not fit a buffer of {capacity} bytes")]
    InvalidRange {
        index: usize,
        length: usize,
        capacity: usize,
    },
    #[error("transfer of {bytes} bytes is not a whole number of words")]
    Unaligned { bytes: usize },
    #[error("transfer of {bytes} bytes exceeds the 64-byte data window")]
    Overflow { bytes: usize },
    #[error("hardware did not respond after {polls} polls")]
    Timeout { polls: usize },
    #[error("PLC register block is not mapped")]
    NotMapped,
    #[error("PLC register block is already mapped at {mapped:#x}")]
    AlreadyMapped { mapped: usize },
}

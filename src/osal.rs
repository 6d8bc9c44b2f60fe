//! Operating System Abstraction Layer (OSAL) for the PLC driver
//!
//! The driver only needs one platform service: an approximate millisecond
//! delay used to throttle its status polling loops.

/// OSAL trait for platform-specific implementations
pub trait Osal {
    /// Sleep for specified milliseconds
    fn msleep(&self, ms: u32);
}

impl<F: Fn(u32)> Osal for F {
    fn msleep(&self, ms: u32) {
        self(ms)
    }
}

/// Calibrated spin-loop delay for targets without a timer service.
///
/// `loops_per_ms` is the number of [`core::hint::spin_loop`] iterations the
/// target executes in roughly one millisecond.
#[derive(Debug, Clone, Copy)]
pub struct SpinDelay {
    loops_per_ms: u32,
}

impl SpinDelay {
    pub const fn new(loops_per_ms: u32) -> Self {
        Self { loops_per_ms }
    }
}

impl Osal for SpinDelay {
    fn msleep(&self, ms: u32) {
        let loops = u64::from(ms) * u64::from(self.loops_per_ms);
        for _ in 0..loops {
            core::hint::spin_loop();
        }
    }
}

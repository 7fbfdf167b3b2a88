//! Memory-mapped register window over `/dev/mem`.
//!
//! One `RegisterWindow` owns one 4 KiB mapping of a physical CRU/GRF page.
//! Reads and writes are volatile and bounds-checked; nothing is cached, so
//! every read reflects live hardware state. A `write32` mutates physical
//! device state (clock switches, PLL resets) and must be treated as an
//! irreversible external effect.

use crate::error::{ClkError, Result};
use rk3588_soc::{Window, WINDOW_SIZE};
use rustix::mm::{mmap, munmap, MapFlags, ProtFlags};
use std::fs::OpenOptions;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsFd;
use std::ptr::NonNull;

/// One live 4 KiB mapping of a register window.
#[derive(Debug)]
pub struct RegisterWindow {
    ptr: NonNull<u8>,
    window: Window,
}

// SAFETY: the mapping is owned exclusively and is process-wide; moving the
// handle between threads does not invalidate it.
unsafe impl Send for RegisterWindow {}

impl RegisterWindow {
    /// Map the window's physical page from `/dev/mem`.
    ///
    /// Must be called at most once per distinct base address per process:
    /// a second live mapping of the same page would race the hardware.
    ///
    /// # Errors
    ///
    /// Returns [`ClkError::Io`] if `/dev/mem` cannot be opened (usually a
    /// permissions problem — this tool needs root) or the mmap fails.
    pub fn map(window: Window) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open("/dev/mem")
            .map_err(|e| ClkError::io(format!("cannot open /dev/mem: {e} (need root?)")))?;

        // SAFETY: fd is valid (just opened), length is one non-zero page,
        // offset is the page-aligned physical base; rustix returns Result
        // and the pointer is unmapped exactly once in Drop.
        let ptr = unsafe {
            let addr = mmap(
                std::ptr::null_mut(),
                WINDOW_SIZE,
                ProtFlags::READ | ProtFlags::WRITE,
                MapFlags::SHARED,
                file.as_fd(),
                window.base(),
            )
            .map_err(|e| {
                ClkError::io(format!("mmap of {window} @ {:#x} failed: {e}", window.base()))
            })?;
            NonNull::new(addr.cast::<u8>())
                .ok_or_else(|| ClkError::io(format!("mmap of {window} returned null")))?
        };

        tracing::debug!("mapped {window} ({:#x}, {WINDOW_SIZE} bytes)", window.base());

        // The fd can be closed now; the mapping stays valid without it.
        Ok(Self { ptr, window })
    }

    /// Which window this mapping covers.
    #[must_use]
    pub const fn window(&self) -> Window {
        self.window
    }

    /// Read the 32-bit register at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`ClkError::Io`] if `offset + 4` exceeds the window.
    pub fn read32(&self, offset: u32) -> Result<u32> {
        self.check_bounds(offset)?;

        // SAFETY: bounds checked above; ptr is valid for WINDOW_SIZE bytes;
        // CRU/GRF registers are 4-byte aligned; read_volatile is required
        // because hardware changes these values behind our back.
        #[allow(clippy::cast_ptr_alignment)]
        let value = unsafe {
            self.ptr
                .as_ptr()
                .add(offset as usize)
                .cast::<u32>()
                .read_volatile()
        };

        tracing::trace!("{} read32 {offset:#05x} = {value:#010x}", self.window);
        Ok(value)
    }

    /// Write the 32-bit register at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`ClkError::Io`] if `offset + 4` exceeds the window.
    pub fn write32(&mut self, offset: u32, value: u32) -> Result<()> {
        self.check_bounds(offset)?;

        tracing::trace!("{} write32 {offset:#05x} = {value:#010x}", self.window);

        // SAFETY: bounds checked above; write_volatile is required because
        // MMIO writes have side effects and must not be reordered or elided.
        #[allow(clippy::cast_ptr_alignment)]
        unsafe {
            self.ptr
                .as_ptr()
                .add(offset as usize)
                .cast::<u32>()
                .write_volatile(value);
        }

        Ok(())
    }

    fn check_bounds(&self, offset: u32) -> Result<()> {
        if offset as usize + 4 > WINDOW_SIZE {
            return Err(ClkError::io(format!(
                "offset {offset:#x} out of bounds for {} (window size {WINDOW_SIZE:#x})",
                self.window
            )));
        }
        Ok(())
    }
}

impl Drop for RegisterWindow {
    fn drop(&mut self) {
        // SAFETY: ptr/length are exactly what mmap returned in map(); Drop
        // runs at most once and no references outlive the handle.
        unsafe {
            if let Err(e) = munmap(self.ptr.as_ptr().cast(), WINDOW_SIZE) {
                tracing::error!("munmap of {} failed: {e}", self.window);
            }
        }
        tracing::debug!("unmapped {}", self.window);
    }
}

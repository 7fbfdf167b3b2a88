//! Register window identifiers and physical base addresses.
//!
//! Each window is one 4 KiB page of memory-mapped CRU (clock/reset unit) or
//! GRF (general register file) space. Addresses are from the RK3588 TRM.
//!
//! Two windows are hazardous to read:
//!
//! - `GrfGpu` locks the device when the GPU power policy is not
//!   `always_on` — callers must gate it (see the CLI's power-policy check).
//! - `GrfNpu` locks the device when the NPU PVTPLL is inactive. Nothing in
//!   this model reads it; it is listed for completeness only.
//!
//! The four DDR PHY CRU windows (`0xFD80_0000` + n·`0x4000`) bus-error on
//! `/dev/mem` reads and freeze the system, so they are deliberately absent.

/// Size of every register window in bytes (one page).
pub const WINDOW_SIZE: usize = 0x1000;

/// One memory-mapped register window.
///
/// Identifies a distinct physical base address; at most one live mapping
/// may exist per window (re-mapping a live base races the hardware).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Window {
    /// Central CRU (GPU/NPU source muxes live here).
    Cru,
    /// Big-core cluster 0 CRU (B0PLL, core muxes for b0/b1).
    CruBigcore0,
    /// Big-core cluster 1 CRU (B1PLL, core muxes for b2/b3).
    CruBigcore1,
    /// DSU CRU (LPLL, little-core muxes, DSU clock fan-out).
    CruDsu,
    /// Big-core cluster 0 GRF (PVTPLL control/status).
    GrfBigcore0,
    /// Big-core cluster 1 GRF (PVTPLL control/status).
    GrfBigcore1,
    /// Little-core cluster GRF (PVTPLL control/status).
    GrfLitcore,
    /// DSU GRF (PVTPLL control/status).
    GrfDsu,
    /// GPU GRF (PVTPLL control/status). Gated: see module docs.
    GrfGpu,
    /// NPU GRF (PVTPLL control/status). Hazardous: see module docs.
    GrfNpu,
}

impl Window {
    /// Physical base address of this window.
    #[must_use]
    pub const fn base(self) -> u64 {
        match self {
            Self::Cru => 0xFD7C_0000,
            Self::CruBigcore0 => 0xFD81_0000,
            Self::CruBigcore1 => 0xFD81_2000,
            Self::CruDsu => 0xFD81_8000,
            Self::GrfBigcore0 => 0xFD59_0000,
            Self::GrfBigcore1 => 0xFD59_2000,
            Self::GrfLitcore => 0xFD59_4000,
            Self::GrfDsu => 0xFD59_8000,
            Self::GrfGpu => 0xFD5A_0000,
            Self::GrfNpu => 0xFD5A_2000,
        }
    }

    /// Whether reading this window is only safe under an external condition.
    #[must_use]
    pub const fn gated(self) -> bool {
        matches!(self, Self::GrfGpu | Self::GrfNpu)
    }

    /// Short name used in logs and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cru => "CRU",
            Self::CruBigcore0 => "CRU_BIGCORE0",
            Self::CruBigcore1 => "CRU_BIGCORE1",
            Self::CruDsu => "CRU_DSU",
            Self::GrfBigcore0 => "GRF_BIGCORE0",
            Self::GrfBigcore1 => "GRF_BIGCORE1",
            Self::GrfLitcore => "GRF_LITCORE",
            Self::GrfDsu => "GRF_DSU",
            Self::GrfGpu => "GRF_GPU",
            Self::GrfNpu => "GRF_NPU",
        }
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bases_are_distinct_and_page_aligned() {
        let all = [
            Window::Cru,
            Window::CruBigcore0,
            Window::CruBigcore1,
            Window::CruDsu,
            Window::GrfBigcore0,
            Window::GrfBigcore1,
            Window::GrfLitcore,
            Window::GrfDsu,
            Window::GrfGpu,
            Window::GrfNpu,
        ];
        for (i, a) in all.iter().enumerate() {
            assert_eq!(a.base() % WINDOW_SIZE as u64, 0, "{a} not page aligned");
            for b in &all[i + 1..] {
                assert_ne!(a.base(), b.base(), "{a} and {b} share a base");
            }
        }
    }

    #[test]
    fn hazard_windows_are_gated() {
        assert!(Window::GrfGpu.gated());
        assert!(Window::GrfNpu.gated());
        assert!(!Window::CruBigcore0.gated());
    }
}

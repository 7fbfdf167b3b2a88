//! Oscillator constants, reference PLL frequencies, and PLL output math.
//!
//! All frequencies are in MHz. The fixed system PLLs (GPLL, CPLL, …) are
//! treated as constants: their m/p/s registers sit in windows this tool does
//! not remap, and the values below were read back from a live RK3588.
//!
//! PLL output formulas (RK3588 TRM):
//!
//! ```text
//! integer:     FOUT = (m · FIN) / (p · 2^s)
//! fractional:  FOUT = ((m + k/65536) · FIN) / (p · 2^s)
//! DDR:         FOUT = ((m + k/65536) · 2 · FIN) / (p · 2^s)
//! ```

/// 24 MHz crystal oscillator (`xin_osc0_func`).
pub const XIN_OSC0_MHZ: f64 = 24.0;

/// 32.768 kHz deep-slow clock.
pub const DEEPSLOW_MHZ: f64 = 0.032_768;

/// 100 MHz "clean" clock fed to the per-core glitch-free muxes.
pub const CLEAN_MHZ: f64 = 100.0;

/// AUPLL — 1572.9 MHz (m=262, p=2, s=1, k=9437).
pub const AUPLL_MHZ: f64 = 1572.9;
/// CPLL — 1500 MHz (m=250, p=2, s=1).
pub const CPLL_MHZ: f64 = 1500.0;
/// GPLL — 1188 MHz (m=425, p=2, s=1... as read back; feeds most muxes).
pub const GPLL_MHZ: f64 = 1188.0;
/// PPLL — 2200 MHz (m=550, p=3, s=1).
pub const PPLL_MHZ: f64 = 2200.0;
/// NPLL — 1700 MHz (m=425, p=3, s=1).
pub const NPLL_MHZ: f64 = 1700.0;
/// SPLL — 702 MHz (from the device tree; its window is not devmem-readable).
pub const SPLL_MHZ: f64 = 702.0;
/// V0PLL — 1188 MHz (m=198, p=2, s=1).
pub const V0PLL_MHZ: f64 = 1188.0;

/// Integer PLL output for reference input `osc`.
///
/// An unprogrammed PLL (`m == 0` or `p == 0`) resolves to 0 rather than
/// dividing by zero.
#[must_use]
pub fn integer_pll_mhz(osc: f64, m: u32, p: u32, s: u32) -> f64 {
    if m == 0 || p == 0 {
        return 0.0;
    }
    (osc * f64::from(m)) / (f64::from(p) * f64::from(1u32 << s))
}

/// Fractional PLL output: integer formula with a `k/65536` term added to `m`.
#[must_use]
pub fn fractional_pll_mhz(osc: f64, m: u32, k: u32, p: u32, s: u32) -> f64 {
    if m == 0 || p == 0 {
        return 0.0;
    }
    let m_frac = f64::from(m) + f64::from(k) / 65536.0;
    (osc * m_frac) / (f64::from(p) * f64::from(1u32 << s))
}

/// DDR PLL output: fractional formula with the oscillator input doubled.
#[must_use]
pub fn ddr_pll_mhz(osc: f64, m: u32, k: u32, p: u32, s: u32) -> f64 {
    fractional_pll_mhz(2.0 * osc, m, k, p, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpll_reference_configuration() {
        // m=250, p=2, s=1 is the stock CPLL setting: 24*250/(2*2) = 1500
        let f = integer_pll_mhz(XIN_OSC0_MHZ, 250, 2, 1);
        assert!((f - 1500.0).abs() < 1e-9);
        assert!((f - CPLL_MHZ).abs() < 1e-9);
    }

    #[test]
    fn unprogrammed_pll_is_zero() {
        assert_eq!(integer_pll_mhz(XIN_OSC0_MHZ, 0, 2, 1), 0.0);
        assert_eq!(integer_pll_mhz(XIN_OSC0_MHZ, 250, 0, 1), 0.0);
        assert_eq!(fractional_pll_mhz(XIN_OSC0_MHZ, 0, 100, 2, 1), 0.0);
    }

    #[test]
    fn fractional_matches_aupll_readback() {
        // AUPLL stock: m=262, p=2, s=1, k=9437 → ≈1572.9 MHz
        let f = fractional_pll_mhz(XIN_OSC0_MHZ, 262, 9437, 2, 1);
        assert!((f - AUPLL_MHZ).abs() < 0.05, "got {f}");
    }

    #[test]
    fn fractional_with_zero_k_equals_integer() {
        let a = fractional_pll_mhz(XIN_OSC0_MHZ, 425, 0, 2, 1);
        let b = integer_pll_mhz(XIN_OSC0_MHZ, 425, 2, 1);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn ddr_doubles_the_input() {
        let a = ddr_pll_mhz(XIN_OSC0_MHZ, 400, 0, 2, 1);
        let b = fractional_pll_mhz(XIN_OSC0_MHZ, 400, 0, 2, 1);
        assert!((a - 2.0 * b).abs() < 1e-9);
    }
}

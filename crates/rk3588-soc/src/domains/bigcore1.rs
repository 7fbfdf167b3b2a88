//! Big-core cluster 1 (Cortex-A76 pair b2/b3).
//!
//! Mirror of bigcore0 with the B1PLL register block (CON0 at 0x20) and its
//! own CRU/GRF windows.

use crate::field::{DomainSpec, FieldKind, FieldSpec, InterlockRule, Section};
use crate::memory_map::Window;
use crate::pll::{CLEAN_MHZ, DEEPSLOW_MHZ, GPLL_MHZ, XIN_OSC0_MHZ};
use crate::NodeSpec;

// CRU_BIGCORE1 register offsets
const B1PLL_CON0: u32 = 0x0020;
const B1PLL_CON1: u32 = 0x0024;
const B1PLL_CON6: u32 = 0x0038;
const MODE_CON00: u32 = 0x0280;
const CLKSEL_CON00: u32 = 0x0300;
const CLKSEL_CON01: u32 = 0x0304;

// GRF_BIGCORE1 register offsets
const PVTPLL_CON0_L: u32 = 0x0000;
const PVTPLL_CON0_H: u32 = 0x0004;
const PVTPLL_STATUS: u32 = 0x0018;

/// Build the bigcore1 domain spec.
#[must_use]
pub fn bigcore1() -> DomainSpec {
    let cru = Window::CruBigcore1;
    let grf = Window::GrfBigcore1;

    let sections = vec![
        Section::new(
            "bigcore1 pvtpll configuration",
            vec![
                FieldSpec::new("osc_ring_sel", grf, PVTPLL_CON0_L, 8, 10, FieldKind::int(0, 7)),
                FieldSpec::new("ring_length_sel", grf, PVTPLL_CON0_H, 0, 5, FieldKind::int(0, 63)),
            ],
        ),
        Section::new(
            "b1pll configuration",
            vec![
                FieldSpec::new("m_b1pll", cru, B1PLL_CON0, 0, 9, FieldKind::int(64, 1023)),
                FieldSpec::new("p_b1pll", cru, B1PLL_CON1, 0, 5, FieldKind::int(1, 63)),
                FieldSpec::new("s_b1pll", cru, B1PLL_CON1, 6, 8, FieldKind::int(0, 6)),
                FieldSpec::new(
                    "clk_b1pll_mux",
                    cru,
                    MODE_CON00,
                    0,
                    1,
                    FieldKind::options(&[
                        ("xin_osc0_func", 0b00),
                        ("clk_b1pll", 0b01),
                        ("clk_deepslow", 0b10),
                    ]),
                ),
                FieldSpec::new("b1pll_pll_reset", cru, B1PLL_CON1, 13, 13, FieldKind::int(0, 1)),
                FieldSpec::new("b1pll_lock", cru, B1PLL_CON6, 15, 15, FieldKind::int(0, 1)),
            ],
        ),
        Section::new(
            "bigcore1 mux configuration",
            vec![
                FieldSpec::new(
                    "bigcore1_slow_sel",
                    cru,
                    CLKSEL_CON00,
                    0,
                    0,
                    FieldKind::options(&[("xin_osc0_func", 0b0), ("clk_deepslow", 0b1)]),
                ),
                FieldSpec::new("bigcore1_gpll_div", cru, CLKSEL_CON00, 1, 5, FieldKind::int(0, 31)),
                FieldSpec::new(
                    "bigcore1_mux_sel",
                    cru,
                    CLKSEL_CON00,
                    6,
                    7,
                    FieldKind::options(&[("slow", 0b00), ("gpll", 0b01), ("b1pll", 0b10)]),
                ),
            ],
        ),
        Section::new(
            "core configuration",
            vec![
                FieldSpec::new("b2_uc_div", cru, CLKSEL_CON00, 8, 12, FieldKind::int(0, 31)),
                FieldSpec::new(
                    "b2_clk_sel",
                    cru,
                    CLKSEL_CON00,
                    13,
                    14,
                    FieldKind::options(&[("UC_b2", 0b00), ("Clean", 0b01), ("PVTPLL", 0b10)]),
                ),
                FieldSpec::new("b3_uc_div", cru, CLKSEL_CON01, 0, 4, FieldKind::int(0, 31)),
                FieldSpec::new(
                    "b3_clk_sel",
                    cru,
                    CLKSEL_CON01,
                    5,
                    6,
                    FieldKind::options(&[("UC_b3", 0b00), ("Clean", 0b01), ("PVTPLL", 0b10)]),
                ),
            ],
        ),
    ];

    let nodes = vec![
        NodeSpec::osc("xin_osc0", XIN_OSC0_MHZ),
        NodeSpec::osc("clk_deepslow", DEEPSLOW_MHZ),
        NodeSpec::osc("clk_clean", CLEAN_MHZ),
        NodeSpec::osc("gpll", GPLL_MHZ),
        NodeSpec::pll("b1pll", "m_b1pll", "p_b1pll", "s_b1pll"),
        NodeSpec::mux(
            "bigcore1_slow",
            "bigcore1_slow_sel",
            &[(0b0, "xin_osc0"), (0b1, "clk_deepslow")],
        ),
        NodeSpec::div("bigcore1_gpll", "bigcore1_gpll_div", "gpll"),
        NodeSpec::mux(
            "bigcore1_mux",
            "bigcore1_mux_sel",
            &[(0b00, "bigcore1_slow"), (0b01, "bigcore1_gpll"), (0b10, "b1pll")],
        ),
        NodeSpec::div("b2_uc", "b2_uc_div", "bigcore1_mux"),
        NodeSpec::div("b3_uc", "b3_uc_div", "bigcore1_mux"),
        NodeSpec::pvtpll("bigcore1_pvtpll", grf, PVTPLL_STATUS),
        NodeSpec::mux(
            "b2_clk",
            "b2_clk_sel",
            &[(0b00, "b2_uc"), (0b01, "clk_clean"), (0b10, "bigcore1_pvtpll")],
        ),
        NodeSpec::mux(
            "b3_clk",
            "b3_clk_sel",
            &[(0b00, "b3_uc"), (0b01, "clk_clean"), (0b10, "bigcore1_pvtpll")],
        ),
    ];

    DomainSpec {
        name: "bigcore1",
        sections,
        interlocks: vec![InterlockRule {
            reset_field: "b1pll_pll_reset",
            mux_field: "bigcore1_mux_sel",
            guarded_source: "b1pll",
            lock_field: "b1pll_lock",
        }],
        nodes,
    }
}

//! Big-core cluster 0 (Cortex-A76 pair b0/b1).

use crate::field::{DomainSpec, FieldKind, FieldSpec, InterlockRule, Section};
use crate::memory_map::Window;
use crate::pll::{CLEAN_MHZ, DEEPSLOW_MHZ, GPLL_MHZ, XIN_OSC0_MHZ};
use crate::NodeSpec;

// CRU_BIGCORE0 register offsets
const B0PLL_CON0: u32 = 0x0000;
const B0PLL_CON1: u32 = 0x0004;
const B0PLL_CON6: u32 = 0x0018;
const MODE_CON00: u32 = 0x0280;
const CLKSEL_CON00: u32 = 0x0300;
const CLKSEL_CON01: u32 = 0x0304;

// GRF_BIGCORE0 register offsets
const PVTPLL_CON0_L: u32 = 0x0000;
const PVTPLL_CON0_H: u32 = 0x0004;
const PVTPLL_STATUS: u32 = 0x0018;

/// Build the bigcore0 domain spec.
#[must_use]
pub fn bigcore0() -> DomainSpec {
    let cru = Window::CruBigcore0;
    let grf = Window::GrfBigcore0;

    let sections = vec![
        Section::new(
            "bigcore0 pvtpll configuration",
            vec![
                // ring types 0..=7 per TRM table (2 and 6 reserved)
                FieldSpec::new("osc_ring_sel", grf, PVTPLL_CON0_L, 8, 10, FieldKind::int(0, 7)),
                // inverter count = (n + 5) * 2
                FieldSpec::new("ring_length_sel", grf, PVTPLL_CON0_H, 0, 5, FieldKind::int(0, 63)),
            ],
        ),
        Section::new(
            "b0pll configuration",
            vec![
                FieldSpec::new("m_b0pll", cru, B0PLL_CON0, 0, 9, FieldKind::int(64, 1023)),
                FieldSpec::new("p_b0pll", cru, B0PLL_CON1, 0, 5, FieldKind::int(1, 63)),
                FieldSpec::new("s_b0pll", cru, B0PLL_CON1, 6, 8, FieldKind::int(0, 6)),
                FieldSpec::new(
                    "clk_b0pll_mux",
                    cru,
                    MODE_CON00,
                    0,
                    1,
                    FieldKind::options(&[
                        ("xin_osc0_func", 0b00),
                        ("clk_b0pll", 0b01),
                        ("clk_deepslow", 0b10),
                    ]),
                ),
                FieldSpec::new("b0pll_pll_reset", cru, B0PLL_CON1, 13, 13, FieldKind::int(0, 1)),
                FieldSpec::new("b0pll_lock", cru, B0PLL_CON6, 15, 15, FieldKind::int(0, 1)),
            ],
        ),
        Section::new(
            "bigcore0 mux configuration",
            vec![
                FieldSpec::new(
                    "bigcore0_slow_sel",
                    cru,
                    CLKSEL_CON00,
                    0,
                    0,
                    FieldKind::options(&[("xin_osc0_func", 0b0), ("clk_deepslow", 0b1)]),
                ),
                FieldSpec::new("bigcore0_gpll_div", cru, CLKSEL_CON00, 1, 5, FieldKind::int(0, 31)),
                FieldSpec::new(
                    "bigcore0_mux_sel",
                    cru,
                    CLKSEL_CON00,
                    6,
                    7,
                    FieldKind::options(&[("slow", 0b00), ("gpll", 0b01), ("b0pll", 0b10)]),
                ),
            ],
        ),
        Section::new(
            "core configuration",
            vec![
                FieldSpec::new("b0_uc_div", cru, CLKSEL_CON00, 8, 12, FieldKind::int(0, 31)),
                FieldSpec::new(
                    "b0_clk_sel",
                    cru,
                    CLKSEL_CON00,
                    13,
                    14,
                    FieldKind::options(&[("UC_b0", 0b00), ("Clean", 0b01), ("PVTPLL", 0b10)]),
                ),
                FieldSpec::new("b1_uc_div", cru, CLKSEL_CON01, 0, 4, FieldKind::int(0, 31)),
                FieldSpec::new(
                    "b1_clk_sel",
                    cru,
                    CLKSEL_CON01,
                    5,
                    6,
                    FieldKind::options(&[("UC_b1", 0b00), ("Clean", 0b01), ("PVTPLL", 0b10)]),
                ),
            ],
        ),
    ];

    let nodes = vec![
        NodeSpec::osc("xin_osc0", XIN_OSC0_MHZ),
        NodeSpec::osc("clk_deepslow", DEEPSLOW_MHZ),
        NodeSpec::osc("clk_clean", CLEAN_MHZ),
        NodeSpec::osc("gpll", GPLL_MHZ),
        NodeSpec::pll("b0pll", "m_b0pll", "p_b0pll", "s_b0pll"),
        NodeSpec::mux(
            "bigcore0_slow",
            "bigcore0_slow_sel",
            &[(0b0, "xin_osc0"), (0b1, "clk_deepslow")],
        ),
        NodeSpec::div("bigcore0_gpll", "bigcore0_gpll_div", "gpll"),
        NodeSpec::mux(
            "bigcore0_mux",
            "bigcore0_mux_sel",
            &[(0b00, "bigcore0_slow"), (0b01, "bigcore0_gpll"), (0b10, "b0pll")],
        ),
        NodeSpec::div("b0_uc", "b0_uc_div", "bigcore0_mux"),
        NodeSpec::div("b1_uc", "b1_uc_div", "bigcore0_mux"),
        NodeSpec::pvtpll("bigcore0_pvtpll", grf, PVTPLL_STATUS),
        NodeSpec::mux(
            "b0_clk",
            "b0_clk_sel",
            &[(0b00, "b0_uc"), (0b01, "clk_clean"), (0b10, "bigcore0_pvtpll")],
        ),
        NodeSpec::mux(
            "b1_clk",
            "b1_clk_sel",
            &[(0b00, "b1_uc"), (0b01, "clk_clean"), (0b10, "bigcore0_pvtpll")],
        ),
    ];

    DomainSpec {
        name: "bigcore0",
        sections,
        interlocks: vec![InterlockRule {
            reset_field: "b0pll_pll_reset",
            mux_field: "bigcore0_mux_sel",
            guarded_source: "b0pll",
            lock_field: "b0pll_lock",
        }],
        nodes,
    }
}

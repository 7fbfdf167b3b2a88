//! Little-core cluster (Cortex-A55 quad l0–l3).
//!
//! The LPLL and the little-core muxes live in the DSU CRU; the PVTPLL sits
//! in the little-core GRF.

use crate::field::{DomainSpec, FieldKind, FieldSpec, InterlockRule, Section};
use crate::memory_map::Window;
use crate::pll::{CLEAN_MHZ, DEEPSLOW_MHZ, GPLL_MHZ, XIN_OSC0_MHZ};
use crate::NodeSpec;

// CRU_DSU register offsets
const LPLL_CON0: u32 = 0x0040;
const LPLL_CON1: u32 = 0x0044;
const LPLL_CON6: u32 = 0x0058;
const MODE_CON00: u32 = 0x0280;
const CLKSEL_CON00: u32 = 0x0300;
const CLKSEL_CON05: u32 = 0x0314;
const CLKSEL_CON06: u32 = 0x0318;
const CLKSEL_CON07: u32 = 0x031C;

// GRF_LITCORE register offsets
const PVTPLL_CON0_L: u32 = 0x0040;
const PVTPLL_CON0_H: u32 = 0x0044;
const PVTPLL_STATUS: u32 = 0x0060;

fn core_clk_options(uc: &'static str) -> FieldKind {
    FieldKind::options(&[(uc, 0b00), ("Clean", 0b01), ("PVTPLL", 0b10)])
}

/// Build the littlecore domain spec.
#[must_use]
pub fn littlecore() -> DomainSpec {
    let cru = Window::CruDsu;
    let grf = Window::GrfLitcore;

    let sections = vec![
        Section::new(
            "littlecore pvtpll configuration",
            vec![
                FieldSpec::new("osc_ring_sel", grf, PVTPLL_CON0_L, 8, 10, FieldKind::int(0, 7)),
                FieldSpec::new("ring_length_sel", grf, PVTPLL_CON0_H, 0, 5, FieldKind::int(0, 63)),
            ],
        ),
        Section::new(
            "lpll configuration",
            vec![
                FieldSpec::new("m_lpll", cru, LPLL_CON0, 0, 9, FieldKind::int(64, 1023)),
                FieldSpec::new("p_lpll", cru, LPLL_CON1, 0, 5, FieldKind::int(1, 63)),
                FieldSpec::new("s_lpll", cru, LPLL_CON1, 6, 8, FieldKind::int(0, 6)),
                FieldSpec::new(
                    "clk_lpll_mux",
                    cru,
                    MODE_CON00,
                    0,
                    1,
                    FieldKind::options(&[
                        ("xin_osc0_func", 0b00),
                        ("clk_lpll", 0b01),
                        ("clk_deepslow", 0b10),
                    ]),
                ),
                FieldSpec::new("lpll_pll_reset", cru, LPLL_CON1, 13, 13, FieldKind::int(0, 1)),
                FieldSpec::new("lpll_lock", cru, LPLL_CON6, 15, 15, FieldKind::int(0, 1)),
            ],
        ),
        Section::new(
            "littlecore mux configuration",
            vec![
                FieldSpec::new(
                    "littlecore_slow_sel",
                    cru,
                    CLKSEL_CON00,
                    0,
                    0,
                    FieldKind::options(&[("xin_osc0_func", 0b0), ("clk_deepslow", 0b1)]),
                ),
                FieldSpec::new("littlecore_gpll_div", cru, CLKSEL_CON05, 9, 13, FieldKind::int(0, 31)),
                FieldSpec::new(
                    "littlecore_mux_sel",
                    cru,
                    CLKSEL_CON05,
                    14,
                    15,
                    FieldKind::options(&[("slow", 0b00), ("gpll", 0b01), ("lpll", 0b10)]),
                ),
            ],
        ),
        Section::new(
            "core configuration",
            vec![
                FieldSpec::new("l0_uc_div", cru, CLKSEL_CON06, 0, 4, FieldKind::int(0, 31)),
                FieldSpec::new("l0_clk_sel", cru, CLKSEL_CON06, 5, 6, core_clk_options("UC_l0")),
                FieldSpec::new("l1_uc_div", cru, CLKSEL_CON06, 7, 11, FieldKind::int(0, 31)),
                FieldSpec::new("l1_clk_sel", cru, CLKSEL_CON06, 12, 13, core_clk_options("UC_l1")),
                FieldSpec::new("l2_uc_div", cru, CLKSEL_CON07, 0, 4, FieldKind::int(0, 31)),
                FieldSpec::new("l2_clk_sel", cru, CLKSEL_CON07, 5, 6, core_clk_options("UC_l2")),
                FieldSpec::new("l3_uc_div", cru, CLKSEL_CON07, 7, 11, FieldKind::int(0, 31)),
                FieldSpec::new("l3_clk_sel", cru, CLKSEL_CON07, 12, 13, core_clk_options("UC_l3")),
            ],
        ),
    ];

    let mut nodes = vec![
        NodeSpec::osc("xin_osc0", XIN_OSC0_MHZ),
        NodeSpec::osc("clk_deepslow", DEEPSLOW_MHZ),
        NodeSpec::osc("clk_clean", CLEAN_MHZ),
        NodeSpec::osc("gpll", GPLL_MHZ),
        NodeSpec::pll("lpll", "m_lpll", "p_lpll", "s_lpll"),
        NodeSpec::mux(
            "littlecore_slow",
            "littlecore_slow_sel",
            &[(0b0, "xin_osc0"), (0b1, "clk_deepslow")],
        ),
        NodeSpec::div("littlecore_gpll", "littlecore_gpll_div", "gpll"),
        NodeSpec::mux(
            "littlecore_mux",
            "littlecore_mux_sel",
            &[(0b00, "littlecore_slow"), (0b01, "littlecore_gpll"), (0b10, "lpll")],
        ),
        NodeSpec::pvtpll("littlecore_pvtpll", grf, PVTPLL_STATUS),
    ];
    let cores: [(&'static str, &'static str, &'static str, &'static str); 4] = [
        ("l0_uc", "l0_uc_div", "l0_clk_sel", "l0_clk"),
        ("l1_uc", "l1_uc_div", "l1_clk_sel", "l1_clk"),
        ("l2_uc", "l2_uc_div", "l2_clk_sel", "l2_clk"),
        ("l3_uc", "l3_uc_div", "l3_clk_sel", "l3_clk"),
    ];
    for (uc, div_field, sel_field, clk) in cores {
        nodes.push(NodeSpec::div(uc, div_field, "littlecore_mux"));
        nodes.push(NodeSpec::mux(
            clk,
            sel_field,
            &[(0b00, uc), (0b01, "clk_clean"), (0b10, "littlecore_pvtpll")],
        ));
    }

    DomainSpec {
        name: "littlecore",
        sections,
        interlocks: vec![InterlockRule {
            reset_field: "lpll_pll_reset",
            mux_field: "littlecore_mux_sel",
            guarded_source: "lpll",
            lock_field: "lpll_lock",
        }],
        nodes,
    }
}

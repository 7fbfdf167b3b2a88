//! NPU (RKNN) clock domain.
//!
//! Only the central-CRU mux/divider fields are modelled. The NPU PVTPLL
//! status register sits in GRF_NPU, and reading that window hangs the SoC
//! whenever the PVTPLL is inactive — so no node touches it, and a mux
//! selector pointing at the PVTPLL resolves to 0 MHz instead of risking a
//! read.

use crate::field::{DomainSpec, FieldKind, FieldSpec, Section};
use crate::memory_map::Window;
use crate::pll::{AUPLL_MHZ, CPLL_MHZ, GPLL_MHZ, NPLL_MHZ, SPLL_MHZ};
use crate::NodeSpec;

// Central CRU register offsets
const CLKSEL_CON73: u32 = 0x0424;
const CLKSEL_CON74: u32 = 0x0428;

/// Build the npu domain spec.
#[must_use]
pub fn npu() -> DomainSpec {
    let cru = Window::Cru;

    let sections = vec![Section::new(
        "npu mux configuration",
        vec![
            FieldSpec::new(
                "rknn_dsu0_src_sel",
                cru,
                CLKSEL_CON73,
                7,
                9,
                FieldKind::options(&[
                    ("gpll", 0b000),
                    ("cpll", 0b001),
                    ("aupll", 0b010),
                    ("npll", 0b011),
                    ("spll", 0b100),
                ]),
            ),
            FieldSpec::new("rknn_dsu0_src_div", cru, CLKSEL_CON73, 2, 6, FieldKind::int(0, 31)),
            FieldSpec::new(
                "rknn_dsu0_mux_sel",
                cru,
                CLKSEL_CON74,
                0,
                0,
                FieldKind::options(&[("dsu0_src", 0b0), ("PVTPLL", 0b1)]),
            ),
            FieldSpec::new("npu_cm0_rtc_div", cru, CLKSEL_CON74, 7, 11, FieldKind::int(0, 31)),
        ],
    )];

    let nodes = vec![
        NodeSpec::osc("gpll", GPLL_MHZ),
        NodeSpec::osc("cpll", CPLL_MHZ),
        NodeSpec::osc("aupll", AUPLL_MHZ),
        NodeSpec::osc("npll", NPLL_MHZ),
        NodeSpec::osc("spll", SPLL_MHZ),
        NodeSpec::mux(
            "rknn_dsu0_pll",
            "rknn_dsu0_src_sel",
            &[
                (0b000, "gpll"),
                (0b001, "cpll"),
                (0b010, "aupll"),
                (0b011, "npll"),
                (0b100, "spll"),
            ],
        ),
        NodeSpec::div("rknn_dsu0_src", "rknn_dsu0_src_div", "rknn_dsu0_pll"),
        // PVTPLL input intentionally absent: selector 1 resolves to 0 MHz
        NodeSpec::mux("npu_clk", "rknn_dsu0_mux_sel", &[(0b0, "rknn_dsu0_src")]),
        NodeSpec::div("npu_cm0_rtc", "npu_cm0_rtc_div", "rknn_dsu0_src"),
    ];

    DomainSpec {
        name: "npu",
        sections,
        interlocks: Vec::new(),
        nodes,
    }
}

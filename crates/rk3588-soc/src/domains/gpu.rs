//! GPU (Mali-G610) clock domain.
//!
//! The source mux picks among five fixed system PLLs in the central CRU.
//! The PVTPLL status lives in GRF_GPU, which is only safe to read while the
//! GPU power policy is `always_on` — callers must gate the window before
//! mapping it (see [`crate::memory_map::Window::gated`]).

use crate::field::{DomainSpec, FieldKind, FieldSpec, Section};
use crate::memory_map::Window;
use crate::pll::{AUPLL_MHZ, CPLL_MHZ, GPLL_MHZ, NPLL_MHZ, SPLL_MHZ};
use crate::NodeSpec;

// Central CRU register offsets
const CLKSEL_CON158: u32 = 0x0578;

// GRF_GPU register offsets
const PVTPLL_CON0_L: u32 = 0x0000;
const PVTPLL_CON0_H: u32 = 0x0004;
const PVTPLL_STATUS: u32 = 0x0018;

/// Build the gpu domain spec.
#[must_use]
pub fn gpu() -> DomainSpec {
    let cru = Window::Cru;
    let grf = Window::GrfGpu;

    let sections = vec![
        Section::new(
            "gpu pvtpll configuration",
            vec![
                // ring types: 0 = UDBLVT20_INV_S_4, 1 = UDBSVT20_INV_S_4
                FieldSpec::new("osc_ring_sel", grf, PVTPLL_CON0_L, 8, 10, FieldKind::int(0, 1)),
                // inverter count = (n + 20) * 2
                FieldSpec::new("ring_length_sel", grf, PVTPLL_CON0_H, 0, 5, FieldKind::int(0, 63)),
            ],
        ),
        Section::new(
            "gpu mux configuration",
            vec![
                FieldSpec::new("gpu_src_div", cru, CLKSEL_CON158, 0, 4, FieldKind::int(0, 31)),
                FieldSpec::new(
                    "gpu_src_sel",
                    cru,
                    CLKSEL_CON158,
                    5,
                    7,
                    FieldKind::options(&[
                        ("gpll", 0b000),
                        ("cpll", 0b001),
                        ("aupll", 0b010),
                        ("npll", 0b011),
                        ("spll", 0b100),
                    ]),
                ),
                FieldSpec::new(
                    "gpu_src_mux_sel",
                    cru,
                    CLKSEL_CON158,
                    14,
                    14,
                    FieldKind::options(&[("gpu_src", 0b0), ("PVTPLL", 0b1)]),
                ),
            ],
        ),
    ];

    let nodes = vec![
        NodeSpec::osc("gpll", GPLL_MHZ),
        NodeSpec::osc("cpll", CPLL_MHZ),
        NodeSpec::osc("aupll", AUPLL_MHZ),
        NodeSpec::osc("npll", NPLL_MHZ),
        NodeSpec::osc("spll", SPLL_MHZ),
        NodeSpec::mux(
            "gpu_pll",
            "gpu_src_sel",
            &[
                (0b000, "gpll"),
                (0b001, "cpll"),
                (0b010, "aupll"),
                (0b011, "npll"),
                (0b100, "spll"),
            ],
        ),
        NodeSpec::div("gpu_src", "gpu_src_div", "gpu_pll"),
        NodeSpec::pvtpll("gpu_pvtpll", grf, PVTPLL_STATUS),
        NodeSpec::mux(
            "gpu_clk",
            "gpu_src_mux_sel",
            &[(0b0, "gpu_src"), (0b1, "gpu_pvtpll")],
        ),
    ];

    DomainSpec {
        name: "gpu",
        sections,
        interlocks: Vec::new(),
        nodes,
    }
}

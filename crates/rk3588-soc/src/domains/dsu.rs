//! DSU (DynamIQ shared unit) interconnect clocks.
//!
//! The DSU sclk/pclk roots mux between the two big-core PLLs, the LPLL, and
//! GPLL. Those PLLs are programmed through other windows, so their m/p/s
//! descriptors are carried here in a "pll sources" section — the domain's
//! clock graph is then a pure function of its own field table.

use crate::field::{DomainSpec, FieldKind, FieldSpec, Section};
use crate::memory_map::Window;
use crate::pll::GPLL_MHZ;
use crate::NodeSpec;

// CRU_DSU register offsets
const CLKSEL_CON00: u32 = 0x0300;
const CLKSEL_CON01: u32 = 0x0304;
const CLKSEL_CON02: u32 = 0x0308;
const CLKSEL_CON03: u32 = 0x030C;
const CLKSEL_CON04: u32 = 0x0310;

// Remote PLL register blocks (see bigcore0/bigcore1/littlecore)
const B0PLL_CON0: u32 = 0x0000;
const B0PLL_CON1: u32 = 0x0004;
const B1PLL_CON0: u32 = 0x0020;
const B1PLL_CON1: u32 = 0x0024;
const LPLL_CON0: u32 = 0x0040;
const LPLL_CON1: u32 = 0x0044;

// GRF_DSU register offsets
const PVTPLL_CON0_L: u32 = 0x0060;
const PVTPLL_CON0_H: u32 = 0x0064;
const PVTPLL_STATUS: u32 = 0x0080;

fn pll_source_options() -> FieldKind {
    FieldKind::options(&[("b0pll", 0b00), ("b1pll", 0b01), ("lpll", 0b10), ("gpll", 0b11)])
}

/// Build the dsu domain spec.
#[must_use]
pub fn dsu() -> DomainSpec {
    let cru = Window::CruDsu;
    let grf = Window::GrfDsu;

    let sections = vec![
        Section::new(
            "dsu pvtpll configuration",
            vec![
                FieldSpec::new("osc_ring_sel", grf, PVTPLL_CON0_L, 8, 10, FieldKind::int(0, 7)),
                FieldSpec::new("ring_length_sel", grf, PVTPLL_CON0_H, 0, 5, FieldKind::int(0, 63)),
            ],
        ),
        Section::new(
            "sclk_dsu configuration",
            vec![
                FieldSpec::new(
                    "dsu_sclk_df_src_mux_sel",
                    cru,
                    CLKSEL_CON00,
                    12,
                    13,
                    pll_source_options(),
                ),
                FieldSpec::new("dsu_sclk_df_src_mux_div", cru, CLKSEL_CON00, 7, 11, FieldKind::int(0, 31)),
                FieldSpec::new(
                    "dsu_sclk_src_t_sel",
                    cru,
                    CLKSEL_CON01,
                    0,
                    0,
                    FieldKind::options(&[("dsu_src", 0b0), ("PVTPLL", 0b1)]),
                ),
            ],
        ),
        Section::new(
            "pclk_dsu configuration",
            vec![
                FieldSpec::new("dsu_pclk_root_mux_sel", cru, CLKSEL_CON04, 5, 6, pll_source_options()),
                FieldSpec::new("dsu_pclk_root_mux_div", cru, CLKSEL_CON04, 0, 4, FieldKind::int(0, 31)),
            ],
        ),
        Section::new(
            "dsu_other configuration",
            vec![
                FieldSpec::new("dsu_aclkm_div", cru, CLKSEL_CON01, 1, 5, FieldKind::int(0, 31)),
                FieldSpec::new("dsu_aclks_div", cru, CLKSEL_CON01, 6, 10, FieldKind::int(0, 31)),
                FieldSpec::new("dsu_aclkmp_div", cru, CLKSEL_CON01, 11, 15, FieldKind::int(0, 31)),
                FieldSpec::new("dsu_periphclk_div", cru, CLKSEL_CON02, 0, 4, FieldKind::int(0, 31)),
                FieldSpec::new("dsu_cntclk_div", cru, CLKSEL_CON02, 5, 9, FieldKind::int(0, 31)),
                FieldSpec::new("dsu_tsclk_div", cru, CLKSEL_CON02, 10, 14, FieldKind::int(0, 31)),
                FieldSpec::new("dsu_atclk_div", cru, CLKSEL_CON03, 0, 4, FieldKind::int(0, 31)),
                FieldSpec::new("dsu_gicclk_t_div", cru, CLKSEL_CON03, 5, 9, FieldKind::int(0, 31)),
            ],
        ),
        Section::new(
            "pll sources",
            vec![
                FieldSpec::new("m_b0pll", Window::CruBigcore0, B0PLL_CON0, 0, 9, FieldKind::int(64, 1023)),
                FieldSpec::new("p_b0pll", Window::CruBigcore0, B0PLL_CON1, 0, 5, FieldKind::int(1, 63)),
                FieldSpec::new("s_b0pll", Window::CruBigcore0, B0PLL_CON1, 6, 8, FieldKind::int(0, 6)),
                FieldSpec::new("m_b1pll", Window::CruBigcore1, B1PLL_CON0, 0, 9, FieldKind::int(64, 1023)),
                FieldSpec::new("p_b1pll", Window::CruBigcore1, B1PLL_CON1, 0, 5, FieldKind::int(1, 63)),
                FieldSpec::new("s_b1pll", Window::CruBigcore1, B1PLL_CON1, 6, 8, FieldKind::int(0, 6)),
                FieldSpec::new("m_lpll", cru, LPLL_CON0, 0, 9, FieldKind::int(64, 1023)),
                FieldSpec::new("p_lpll", cru, LPLL_CON1, 0, 5, FieldKind::int(1, 63)),
                FieldSpec::new("s_lpll", cru, LPLL_CON1, 6, 8, FieldKind::int(0, 6)),
            ],
        ),
    ];

    let pll_inputs: [(u32, &'static str); 4] =
        [(0b00, "b0pll"), (0b01, "b1pll"), (0b10, "lpll"), (0b11, "gpll")];

    let mut nodes = vec![
        NodeSpec::osc("gpll", GPLL_MHZ),
        NodeSpec::pll("b0pll", "m_b0pll", "p_b0pll", "s_b0pll"),
        NodeSpec::pll("b1pll", "m_b1pll", "p_b1pll", "s_b1pll"),
        NodeSpec::pll("lpll", "m_lpll", "p_lpll", "s_lpll"),
        NodeSpec::mux("dsu_sclk_src", "dsu_sclk_df_src_mux_sel", &pll_inputs),
        NodeSpec::div("dsu_sclk_df_src", "dsu_sclk_df_src_mux_div", "dsu_sclk_src"),
        NodeSpec::pvtpll("dsu_pvtpll", grf, PVTPLL_STATUS),
        NodeSpec::mux(
            "dsu_sclk",
            "dsu_sclk_src_t_sel",
            &[(0b0, "dsu_sclk_df_src"), (0b1, "dsu_pvtpll")],
        ),
        NodeSpec::mux("dsu_pclk_root", "dsu_pclk_root_mux_sel", &pll_inputs),
        NodeSpec::div("dsu_pclk", "dsu_pclk_root_mux_div", "dsu_pclk_root"),
    ];
    // The remaining DSU clocks fan out from the undivided sclk source
    for (id, div_field) in [
        ("dsu_aclkm", "dsu_aclkm_div"),
        ("dsu_aclks", "dsu_aclks_div"),
        ("dsu_aclkmp", "dsu_aclkmp_div"),
        ("dsu_periphclk", "dsu_periphclk_div"),
        ("dsu_cntclk", "dsu_cntclk_div"),
        ("dsu_tsclk", "dsu_tsclk_div"),
        ("dsu_atclk", "dsu_atclk_div"),
        ("dsu_gicclk", "dsu_gicclk_t_div"),
    ] {
        nodes.push(NodeSpec::div(id, div_field, "dsu_sclk_src"));
    }

    DomainSpec {
        name: "dsu",
        sections,
        interlocks: Vec::new(),
        nodes,
    }
}

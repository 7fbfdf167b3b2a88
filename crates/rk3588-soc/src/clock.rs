//! Clock-node specifications.
//!
//! A domain's clock tree is a small directed acyclic graph of named nodes.
//! Every node's frequency is a pure function of fixed oscillator constants
//! and the field values current at evaluation time; the runtime crate
//! validates the graph and resolves it in dependency order.

use crate::memory_map::Window;

/// PLL output formula variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PllKind {
    /// `(m · osc) / (p · 2^s)`.
    Integer,
    /// `((m + k/65536) · osc) / (p · 2^s)`.
    Fractional,
    /// Fractional with doubled oscillator input (DDR PHY PLLs).
    Ddr,
}

/// How one clock node derives its frequency.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Fixed reference frequency in MHz.
    Oscillator(f64),
    /// PLL programmed through m/p/s (and optionally k) fields.
    Pll {
        /// Formula variant.
        kind: PllKind,
        /// Feedback divider field name.
        m_field: &'static str,
        /// Pre-divider field name.
        p_field: &'static str,
        /// Post-divider exponent field name.
        s_field: &'static str,
        /// Fractional term field name, for [`PllKind::Fractional`] / [`PllKind::Ddr`].
        k_field: Option<&'static str>,
    },
    /// Selects one upstream node by the current value of an enum field.
    ///
    /// An unrecognized selector code resolves to 0 MHz.
    Mux {
        /// Selector field name.
        selector_field: &'static str,
        /// `(selector code, source node id)` pairs.
        inputs: Vec<(u32, &'static str)>,
    },
    /// Divides its source by `field value + 1`.
    Divider {
        /// Divider field name.
        div_field: &'static str,
        /// Source node id.
        source: &'static str,
    },
    /// PVTPLL ring-oscillator: the frequency is read live, in MHz, from a
    /// dedicated status register rather than computed.
    PvtpllStatus {
        /// Window holding the status register.
        window: Window,
        /// Byte offset of the status register.
        offset: u32,
    },
}

/// One named node in a domain's clock tree.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    /// Node id, unique within the domain.
    pub id: &'static str,
    /// Derivation rule.
    pub kind: NodeKind,
}

impl NodeSpec {
    /// Fixed-frequency reference.
    #[must_use]
    pub const fn osc(id: &'static str, mhz: f64) -> Self {
        Self {
            id,
            kind: NodeKind::Oscillator(mhz),
        }
    }

    /// Integer PLL from m/p/s fields.
    #[must_use]
    pub const fn pll(
        id: &'static str,
        m_field: &'static str,
        p_field: &'static str,
        s_field: &'static str,
    ) -> Self {
        Self {
            id,
            kind: NodeKind::Pll {
                kind: PllKind::Integer,
                m_field,
                p_field,
                s_field,
                k_field: None,
            },
        }
    }

    /// Mux over `(selector code, source id)` inputs.
    #[must_use]
    pub fn mux(
        id: &'static str,
        selector_field: &'static str,
        inputs: &[(u32, &'static str)],
    ) -> Self {
        Self {
            id,
            kind: NodeKind::Mux {
                selector_field,
                inputs: inputs.to_vec(),
            },
        }
    }

    /// Divider by `field + 1`.
    #[must_use]
    pub const fn div(id: &'static str, div_field: &'static str, source: &'static str) -> Self {
        Self {
            id,
            kind: NodeKind::Divider { div_field, source },
        }
    }

    /// PVTPLL status-register leaf.
    #[must_use]
    pub const fn pvtpll(id: &'static str, window: Window, offset: u32) -> Self {
        Self {
            id,
            kind: NodeKind::PvtpllStatus { window, offset },
        }
    }
}

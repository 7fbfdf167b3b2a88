//! Clock-tree evaluation: from node specs to a frequency report.
//!
//! A [`ClockGraph`] is validated once at construction (every field and
//! source reference resolves, no cycles) and then evaluated in a single
//! pass: each node's frequency is computed exactly once, in dependency
//! order, from one consistent set of register reads.

use crate::bus::RegisterBus;
use crate::error::{ClkError, Result};
use crate::table::FieldTable;
use rk3588_soc::{pll, NodeKind, NodeSpec, PllKind};
use std::collections::BTreeMap;

/// Frequencies of every node in a domain, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyReport {
    entries: Vec<(&'static str, f64)>,
}

impl FrequencyReport {
    /// Node frequencies in declaration order, MHz.
    #[must_use]
    pub fn entries(&self) -> &[(&'static str, f64)] {
        &self.entries
    }

    /// Frequency of one node in MHz, if it exists.
    #[must_use]
    pub fn mhz(&self, id: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(node, _)| *node == id)
            .map(|(_, mhz)| *mhz)
    }
}

/// A validated clock tree for one domain.
#[derive(Debug)]
pub struct ClockGraph {
    nodes: Vec<NodeSpec>,
    /// Indices into `nodes`, sources before consumers.
    topo: Vec<usize>,
}

impl ClockGraph {
    /// Validate node specs against a field table and order them for
    /// evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`ClkError::Config`] for a duplicate node id, a field name no
    /// descriptor covers, a source id no node carries, or a dependency cycle.
    pub fn new(nodes: &[NodeSpec], table: &FieldTable) -> Result<Self> {
        let mut index: BTreeMap<&'static str, usize> = BTreeMap::new();
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id, i).is_some() {
                return Err(ClkError::config(format!("duplicate clock node '{}'", node.id)));
            }
        }

        let field_of = |node: &str, name: &str| -> Result<()> {
            table.get(name).map_err(|_| {
                ClkError::config(format!("clock node '{node}' references unknown field '{name}'"))
            })?;
            Ok(())
        };

        // deps[i] lists the node indices i reads frequencies from
        let mut deps: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for (i, node) in nodes.iter().enumerate() {
            match &node.kind {
                NodeKind::Oscillator(_) | NodeKind::PvtpllStatus { .. } => {}
                NodeKind::Pll {
                    m_field,
                    p_field,
                    s_field,
                    k_field,
                    ..
                } => {
                    field_of(node.id, m_field)?;
                    field_of(node.id, p_field)?;
                    field_of(node.id, s_field)?;
                    if let Some(k) = k_field {
                        field_of(node.id, k)?;
                    }
                }
                NodeKind::Mux {
                    selector_field,
                    inputs,
                } => {
                    field_of(node.id, selector_field)?;
                    for (_, source) in inputs {
                        let Some(&src) = index.get(source) else {
                            return Err(ClkError::config(format!(
                                "mux '{}' references unknown node '{source}'",
                                node.id
                            )));
                        };
                        deps[i].push(src);
                    }
                }
                NodeKind::Divider { div_field, source } => {
                    field_of(node.id, div_field)?;
                    let Some(&src) = index.get(source) else {
                        return Err(ClkError::config(format!(
                            "divider '{}' references unknown node '{source}'",
                            node.id
                        )));
                    };
                    deps[i].push(src);
                }
            }
        }

        let topo = topo_order(&deps).ok_or_else(|| {
            ClkError::config("clock graph contains a cycle".to_owned())
        })?;

        Ok(Self {
            nodes: nodes.to_vec(),
            topo,
        })
    }

    /// Evaluate every node once against the current register state.
    ///
    /// A mux whose selector holds a code with no listed input resolves to
    /// 0 MHz: the report must always cover the whole tree, and a reserved
    /// selector means "no modelled source", not a failure.
    ///
    /// # Errors
    ///
    /// Propagates bus read failures.
    pub fn evaluate(&self, bus: &dyn RegisterBus, table: &FieldTable) -> Result<FrequencyReport> {
        let mut mhz: Vec<f64> = vec![0.0; self.nodes.len()];
        let by_id: BTreeMap<&'static str, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id, i))
            .collect();

        for &i in &self.topo {
            let node = &self.nodes[i];
            mhz[i] = match &node.kind {
                NodeKind::Oscillator(f) => *f,
                NodeKind::Pll {
                    kind,
                    m_field,
                    p_field,
                    s_field,
                    k_field,
                } => {
                    let m = table.read_raw(bus, m_field)?;
                    let p = table.read_raw(bus, p_field)?;
                    let s = table.read_raw(bus, s_field)?;
                    let k = match k_field {
                        Some(k) => table.read_raw(bus, k)?,
                        None => 0,
                    };
                    match kind {
                        PllKind::Integer => pll::integer_pll_mhz(pll::XIN_OSC0_MHZ, m, p, s),
                        PllKind::Fractional => {
                            pll::fractional_pll_mhz(pll::XIN_OSC0_MHZ, m, k, p, s)
                        }
                        PllKind::Ddr => pll::ddr_pll_mhz(pll::XIN_OSC0_MHZ, m, k, p, s),
                    }
                }
                NodeKind::Mux {
                    selector_field,
                    inputs,
                } => {
                    let selected = table.read_raw(bus, selector_field)?;
                    inputs
                        .iter()
                        .find(|(code, _)| *code == selected)
                        .map_or(0.0, |(_, source)| mhz[by_id[source]])
                }
                NodeKind::Divider { div_field, source } => {
                    let div = table.read_raw(bus, div_field)?;
                    mhz[by_id[source]] / f64::from(div + 1)
                }
                NodeKind::PvtpllStatus { window, offset } => {
                    // the status register reports the ring frequency in MHz
                    f64::from(bus.read32(*window, *offset)?)
                }
            };
        }

        Ok(FrequencyReport {
            entries: self
                .nodes
                .iter()
                .enumerate()
                .map(|(i, n)| (n.id, mhz[i]))
                .collect(),
        })
    }
}

/// Kahn's algorithm; `None` if the dependency graph has a cycle.
fn topo_order(deps: &[Vec<usize>]) -> Option<Vec<usize>> {
    let n = deps.len();
    let mut remaining: Vec<usize> = deps.iter().map(Vec::len).collect();
    let mut consumers: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, d) in deps.iter().enumerate() {
        for &src in d {
            consumers[src].push(i);
        }
    }

    let mut ready: Vec<usize> = (0..n).filter(|&i| remaining[i] == 0).collect();
    let mut order = Vec::with_capacity(n);
    while let Some(i) = ready.pop() {
        order.push(i);
        for &c in &consumers[i] {
            remaining[c] -= 1;
            if remaining[c] == 0 {
                ready.push(c);
            }
        }
    }
    (order.len() == n).then_some(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::SimBus;
    use rk3588_soc::{DomainSpec, FieldKind, FieldSpec, Section, Window};

    const CON0: u32 = 0x00;
    const SEL: u32 = 0x300;

    fn fields() -> FieldTable {
        FieldTable::new(&DomainSpec {
            name: "test",
            sections: vec![Section::new(
                "pll",
                vec![
                    FieldSpec::new("pll_m", Window::CruBigcore0, CON0, 0, 9, FieldKind::int(0, 1023)),
                    FieldSpec::new("pll_p", Window::CruBigcore0, CON0, 10, 15, FieldKind::int(0, 63)),
                    FieldSpec::new("pll_s", Window::CruBigcore0, 0x04, 0, 2, FieldKind::int(0, 6)),
                    FieldSpec::new(
                        "mux_sel",
                        Window::CruBigcore0,
                        SEL,
                        6,
                        7,
                        FieldKind::options(&[("osc", 0b00), ("pll", 0b01)]),
                    ),
                    FieldSpec::new("core_div", Window::CruBigcore0, SEL, 0, 4, FieldKind::int(0, 31)),
                ],
            )],
            interlocks: Vec::new(),
            nodes: Vec::new(),
        })
        .unwrap()
    }

    fn nodes() -> Vec<NodeSpec> {
        vec![
            NodeSpec::osc("osc", pll::XIN_OSC0_MHZ),
            NodeSpec::pll("pll", "pll_m", "pll_p", "pll_s"),
            NodeSpec::mux("core_src", "mux_sel", &[(0b00, "osc"), (0b01, "pll")]),
            NodeSpec::div("core", "core_div", "core_src"),
        ]
    }

    #[test]
    fn evaluates_pll_mux_divider_chain() {
        let table = fields();
        let graph = ClockGraph::new(&nodes(), &table).unwrap();
        let mut bus = SimBus::new();
        // m=250, p=2 in CON0; s=1; mux on pll; divide by 3+1
        bus.poke(Window::CruBigcore0, CON0, (2 << 10) | 250);
        bus.poke(Window::CruBigcore0, 0x04, 1);
        bus.poke(Window::CruBigcore0, SEL, (0b01 << 6) | 3);

        let report = graph.evaluate(&bus, &table).unwrap();
        assert!((report.mhz("pll").unwrap() - 1500.0).abs() < 1e-9);
        assert!((report.mhz("core").unwrap() - 375.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_selector_code_reads_zero_without_failing() {
        let table = fields();
        let graph = ClockGraph::new(&nodes(), &table).unwrap();
        let mut bus = SimBus::new();
        bus.poke(Window::CruBigcore0, SEL, 0b11 << 6); // reserved code

        let report = graph.evaluate(&bus, &table).unwrap();
        assert_eq!(report.mhz("core_src").unwrap(), 0.0);
        assert_eq!(report.mhz("core").unwrap(), 0.0);
        // the rest of the tree still evaluated
        assert_eq!(report.mhz("osc").unwrap(), pll::XIN_OSC0_MHZ);
    }

    #[test]
    fn cycle_is_rejected_at_construction() {
        let table = fields();
        let cyclic = vec![
            NodeSpec::div("a", "core_div", "b"),
            NodeSpec::div("b", "core_div", "a"),
        ];
        assert!(matches!(
            ClockGraph::new(&cyclic, &table),
            Err(ClkError::Config { .. })
        ));
    }

    #[test]
    fn dangling_source_is_rejected() {
        let table = fields();
        let dangling = vec![NodeSpec::div("a", "core_div", "ghost")];
        assert!(matches!(
            ClockGraph::new(&dangling, &table),
            Err(ClkError::Config { .. })
        ));
    }

    #[test]
    fn unknown_field_reference_is_rejected() {
        let table = fields();
        let bad = vec![NodeSpec::pll("pll", "pll_m", "pll_p", "no_such_field")];
        assert!(matches!(
            ClockGraph::new(&bad, &table),
            Err(ClkError::Config { .. })
        ));
    }

    #[test]
    fn report_preserves_declaration_order() {
        let table = fields();
        let graph = ClockGraph::new(&nodes(), &table).unwrap();
        let report = graph.evaluate(&SimBus::new(), &table).unwrap();
        let ids: Vec<_> = report.entries().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, ["osc", "pll", "core_src", "core"]);
    }
}

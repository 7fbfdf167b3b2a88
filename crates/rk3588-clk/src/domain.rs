//! One clock domain, validated and ready for register access.
//!
//! [`ClockDomain`] bundles a domain's field table, interlock rules, and
//! clock graph behind a small surface: read a field, write a field through
//! the guarded protocol, or snapshot every derived frequency.

use crate::bus::RegisterBus;
use crate::error::Result;
use crate::graph::{ClockGraph, FrequencyReport};
use crate::table::{FieldTable, ResolvedValue};
use crate::writer::GuardedWriter;
use rk3588_soc::{DomainSpec, FieldSpec, Section, Window};

/// A fully validated clock domain.
#[derive(Debug)]
pub struct ClockDomain {
    spec: DomainSpec,
    table: FieldTable,
    graph: ClockGraph,
}

impl ClockDomain {
    /// Validate a domain spec into a live domain.
    ///
    /// All static checks run here: the field table, the interlock rules,
    /// and the clock graph. A spec that fails any of them is a table bug
    /// and the whole domain is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClkError::Config`] for any malformed table entry.
    pub fn new(spec: DomainSpec) -> Result<Self> {
        let table = FieldTable::new(&spec)?;
        GuardedWriter::new(&table, &spec.interlocks)?;
        let graph = ClockGraph::new(&spec.nodes, &table)?;
        Ok(Self { spec, table, graph })
    }

    /// Domain name (`bigcore0`, `dsu`, …).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Field sections in display order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.spec.sections
    }

    /// Every window this domain needs mapped, deduplicated.
    #[must_use]
    pub fn windows(&self) -> Vec<Window> {
        self.spec.windows()
    }

    /// Look up one field descriptor by name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClkError::FieldNotFound`].
    pub fn field(&self, name: &str) -> Result<&FieldSpec> {
        self.table.get(name)
    }

    /// Read a field and interpret it through its kind.
    ///
    /// # Errors
    ///
    /// Propagates lookup and bus errors.
    pub fn read(&self, bus: &dyn RegisterBus, name: &str) -> Result<ResolvedValue> {
        self.table.read(bus, name)
    }

    /// Read a field's raw span value.
    ///
    /// # Errors
    ///
    /// Propagates lookup and bus errors.
    pub fn read_raw(&self, bus: &dyn RegisterBus, name: &str) -> Result<u32> {
        self.table.read_raw(bus, name)
    }

    /// Write a field through the full guarded protocol.
    ///
    /// Returns the raw value that was written and verified.
    ///
    /// # Errors
    ///
    /// See [`GuardedWriter::write`].
    pub fn write(&self, bus: &mut dyn RegisterBus, name: &str, input: &str) -> Result<u32> {
        let writer = GuardedWriter::new(&self.table, &self.spec.interlocks)?;
        writer.write(bus, name, input)
    }

    /// Snapshot every clock-node frequency from the current register state.
    ///
    /// # Errors
    ///
    /// Propagates bus read failures.
    pub fn frequencies(&self, bus: &dyn RegisterBus) -> Result<FrequencyReport> {
        self.graph.evaluate(bus, &self.table)
    }
}

/// Validate every built-in domain.
///
/// # Errors
///
/// Returns [`crate::ClkError::Config`] if any static table is malformed;
/// the tables are compiled in, so this only fails on a table bug.
pub fn all_domains() -> Result<Vec<ClockDomain>> {
    rk3588_soc::domains::all()
        .into_iter()
        .map(ClockDomain::new)
        .collect()
}

/// Validate one built-in domain by name.
///
/// # Errors
///
/// Returns [`crate::ClkError::FieldNotFound`]-style lookup failure as
/// [`crate::ClkError::Config`] for an unknown domain name, or a config
/// error for a malformed table.
pub fn domain_by_name(name: &str) -> Result<ClockDomain> {
    let spec = rk3588_soc::domains::by_name(name)
        .ok_or_else(|| crate::ClkError::config(format!("no such domain: {name}")))?;
    ClockDomain::new(spec)
}

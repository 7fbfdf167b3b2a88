//! Guarded field writes: parse, range-check, interlock, RMW, verify.
//!
//! Every mutation of a CRU/GRF field goes through [`GuardedWriter::write`],
//! which runs a fixed five-step protocol. A failure at any step aborts the
//! attempt with nothing written (steps 1–3) or reports exactly what the
//! hardware kept (step 5). Nothing is ever retried automatically.

use crate::bus::RegisterBus;
use crate::error::{ClkError, Result};
use crate::table::FieldTable;
use rk3588_soc::{bits, FieldKind, InterlockRule};

/// An interlock rule with its mux selector code resolved against the table.
#[derive(Debug, Clone, Copy)]
struct ResolvedInterlock {
    rule: InterlockRule,
    /// Code of `rule.guarded_source` in `rule.mux_field`'s enum table.
    guarded_code: u32,
}

/// Performs protocol-checked writes against one domain's field table.
#[derive(Debug)]
pub struct GuardedWriter<'a> {
    table: &'a FieldTable,
    interlocks: Vec<ResolvedInterlock>,
}

impl<'a> GuardedWriter<'a> {
    /// Bind a writer to a field table and resolve its interlock rules.
    ///
    /// Each rule's three fields must exist in the table, the mux field must
    /// be an enum, and the guarded source must be one of its options; a rule
    /// that cannot be resolved is a table bug, not a runtime condition.
    ///
    /// # Errors
    ///
    /// Returns [`ClkError::Config`] for an unresolvable rule.
    pub fn new(table: &'a FieldTable, rules: &[InterlockRule]) -> Result<Self> {
        let mut interlocks = Vec::with_capacity(rules.len());
        for rule in rules {
            table.get(rule.reset_field).map_err(|_| {
                ClkError::config(format!("interlock reset field '{}' not in table", rule.reset_field))
            })?;
            table.get(rule.lock_field).map_err(|_| {
                ClkError::config(format!("interlock lock field '{}' not in table", rule.lock_field))
            })?;
            let mux = table.get(rule.mux_field).map_err(|_| {
                ClkError::config(format!("interlock mux field '{}' not in table", rule.mux_field))
            })?;
            let FieldKind::Enum { options } = &mux.kind else {
                return Err(ClkError::config(format!(
                    "interlock mux field '{}' is not an enum",
                    rule.mux_field
                )));
            };
            let guarded_code = options
                .iter()
                .find(|(name, _)| *name == rule.guarded_source)
                .map(|(_, code)| *code)
                .ok_or_else(|| {
                    ClkError::config(format!(
                        "interlock source '{}' is not an option of '{}'",
                        rule.guarded_source, rule.mux_field
                    ))
                })?;
            interlocks.push(ResolvedInterlock {
                rule: *rule,
                guarded_code,
            });
        }
        Ok(Self { table, interlocks })
    }

    /// Parse `input` for the named field and write it through the full
    /// protocol. Returns the raw value that was written and verified.
    ///
    /// Integer fields take a decimal value. Enum fields take an option name,
    /// or a decimal code that maps to one.
    ///
    /// # Errors
    ///
    /// Any protocol step can fail: [`ClkError::InvalidInteger`] /
    /// [`ClkError::InvalidEnumValue`] (parse), [`ClkError::OutOfRange`]
    /// (range), [`ClkError::InterlockViolation`] / [`ClkError::PllNotLocked`]
    /// (interlock), bus errors (RMW), [`ClkError::VerificationFailed`]
    /// (read-back).
    pub fn write(&self, bus: &mut dyn RegisterBus, name: &str, input: &str) -> Result<u32> {
        let value = self.parse(name, input)?;
        self.write_raw(bus, name, value)?;
        Ok(value)
    }

    /// Write an already-parsed raw value through steps 2–5 of the protocol.
    ///
    /// # Errors
    ///
    /// See [`GuardedWriter::write`].
    pub fn write_raw(&self, bus: &mut dyn RegisterBus, name: &str, value: u32) -> Result<()> {
        let field = self.table.get(name)?;

        // Step 2: range.
        match &field.kind {
            FieldKind::Integer { min, max } => {
                if value < *min || value > *max {
                    return Err(ClkError::OutOfRange {
                        field: name.to_owned(),
                        value,
                        min: *min,
                        max: *max,
                    });
                }
            }
            FieldKind::Enum { options } => {
                if !options.iter().any(|(_, code)| *code == value) {
                    return Err(ClkError::OutOfRange {
                        field: name.to_owned(),
                        value,
                        min: 0,
                        max: bits::span_mask(field.lsb, field.msb),
                    });
                }
            }
        }

        // Step 3: interlocks, checked against live register state.
        self.check_interlocks(bus, name, value)?;

        // Step 4: read-modify-write with the enable mask over just this span.
        let current = bus.read32(field.window, field.offset)?;
        let updated = bits::set_bits(current, value, field.lsb, field.msb);
        let word = bits::write_word(updated, field.lsb, field.msb);
        tracing::info!(
            field = name,
            window = %field.window,
            offset = field.offset,
            value,
            "guarded write"
        );
        bus.write32(field.window, field.offset, word)?;

        // Step 5: verify the span latched.
        let read_back = bits::get_bits(bus.read32(field.window, field.offset)?, field.lsb, field.msb);
        if read_back != value {
            return Err(ClkError::VerificationFailed {
                field: name.to_owned(),
                wrote: value,
                read_back,
            });
        }
        Ok(())
    }

    /// Step 1: turn user input into a raw field value.
    ///
    /// # Errors
    ///
    /// Returns [`ClkError::InvalidInteger`] or [`ClkError::InvalidEnumValue`].
    pub fn parse(&self, name: &str, input: &str) -> Result<u32> {
        let field = self.table.get(name)?;
        match &field.kind {
            FieldKind::Integer { .. } => input.trim().parse::<u32>().map_err(|_| {
                ClkError::InvalidInteger {
                    field: name.to_owned(),
                    input: input.to_owned(),
                }
            }),
            FieldKind::Enum { options } => {
                let input = input.trim();
                if let Some((_, code)) = options.iter().find(|(n, _)| *n == input) {
                    return Ok(*code);
                }
                if let Ok(code) = input.parse::<u32>() {
                    if options.iter().any(|(_, c)| *c == code) {
                        return Ok(code);
                    }
                }
                Err(ClkError::InvalidEnumValue {
                    field: name.to_owned(),
                    input: input.to_owned(),
                    options: options
                        .iter()
                        .map(|(n, _)| *n)
                        .collect::<Vec<_>>()
                        .join(", "),
                })
            }
        }
    }

    /// Both directions of every interlock rule touching `name`.
    fn check_interlocks(&self, bus: &dyn RegisterBus, name: &str, value: u32) -> Result<()> {
        for il in &self.interlocks {
            // Writing the PLL's reset control while a core consumes the PLL
            // would stop that core's clock.
            if il.rule.reset_field == name {
                let selected = self.table.read_raw(bus, il.rule.mux_field)?;
                if selected == il.guarded_code {
                    return Err(ClkError::InterlockViolation {
                        reset_field: il.rule.reset_field.to_owned(),
                        mux_field: il.rule.mux_field.to_owned(),
                        source: il.rule.guarded_source.to_owned(),
                    });
                }
            }
            // Switching a core onto a PLL that is not reporting lock would
            // feed it an invalid clock.
            if il.rule.mux_field == name && value == il.guarded_code {
                let locked = self.table.read_raw(bus, il.rule.lock_field)?;
                if locked == 0 {
                    return Err(ClkError::PllNotLocked {
                        lock_field: il.rule.lock_field.to_owned(),
                        reset_field: il.rule.reset_field.to_owned(),
                        source: il.rule.guarded_source.to_owned(),
                    });
                }
            }
        }
        Ok(())
    }
}

//! Validated field tables: name-indexed access to a domain's bit-fields.
//!
//! A [`FieldTable`] is built once from a [`DomainSpec`] and checks the static
//! tables up front (unique names, legal spans, aligned offsets, bijective
//! enum tables), so every later lookup and read can trust the descriptors.

use crate::bus::RegisterBus;
use crate::error::{ClkError, Result};
use rk3588_soc::{bits, FieldKind, FieldSpec, WINDOW_SIZE};
use std::collections::BTreeMap;
use std::fmt;

/// A field value interpreted through its descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    /// Integer field: the raw span value.
    Integer(u32),
    /// Enum field whose code matched an option.
    Enum(&'static str),
    /// Enum field whose code matched no option.
    UnknownCode(u32),
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Enum(name) => f.write_str(name),
            Self::UnknownCode(code) => write!(f, "?{code:#x}"),
        }
    }
}

/// Name-indexed, pre-validated view of one domain's fields.
#[derive(Debug)]
pub struct FieldTable {
    fields: BTreeMap<&'static str, FieldSpec>,
}

impl FieldTable {
    /// Validate a domain's field descriptors and index them by name.
    ///
    /// # Errors
    ///
    /// Returns [`ClkError::Config`] if any descriptor is malformed: a
    /// duplicate name, a span outside the writable low half-word, a
    /// misaligned or out-of-window offset, an inverted integer range, a
    /// range wider than the span, or a non-bijective enum table.
    pub fn new(spec: &rk3588_soc::DomainSpec) -> Result<Self> {
        let mut fields = BTreeMap::new();
        for field in spec.fields() {
            validate_field(spec.name, field)?;
            if fields.insert(field.name, field.clone()).is_some() {
                return Err(ClkError::config(format!(
                    "{}: duplicate field name '{}'",
                    spec.name, field.name
                )));
            }
        }
        Ok(Self { fields })
    }

    /// Look up a descriptor by name.
    ///
    /// # Errors
    ///
    /// Returns [`ClkError::FieldNotFound`] if no field has that name.
    pub fn get(&self, name: &str) -> Result<&FieldSpec> {
        self.fields
            .get(name)
            .ok_or_else(|| ClkError::field_not_found(name))
    }

    /// Iterate over descriptors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    /// Read a field's raw span value from the bus.
    ///
    /// # Errors
    ///
    /// Propagates [`ClkError::FieldNotFound`] and bus errors.
    pub fn read_raw(&self, bus: &dyn RegisterBus, name: &str) -> Result<u32> {
        let field = self.get(name)?;
        let word = bus.read32(field.window, field.offset)?;
        Ok(bits::get_bits(word, field.lsb, field.msb))
    }

    /// Read a field and interpret it through its kind.
    ///
    /// An enum code with no matching option comes back as
    /// [`ResolvedValue::UnknownCode`] rather than an error: hardware can
    /// legitimately hold reserved codes and a read must still succeed.
    ///
    /// # Errors
    ///
    /// Propagates [`ClkError::FieldNotFound`] and bus errors.
    pub fn read(&self, bus: &dyn RegisterBus, name: &str) -> Result<ResolvedValue> {
        let field = self.get(name)?;
        let raw = self.read_raw(bus, name)?;
        Ok(match &field.kind {
            FieldKind::Integer { .. } => ResolvedValue::Integer(raw),
            FieldKind::Enum { options } => match options.iter().find(|(_, code)| *code == raw) {
                Some(&(name, _)) => ResolvedValue::Enum(name),
                None => ResolvedValue::UnknownCode(raw),
            },
        })
    }
}

fn validate_field(domain: &str, field: &FieldSpec) -> Result<()> {
    let fail = |reason: String| {
        Err(ClkError::config(format!(
            "{domain}: field '{}': {reason}",
            field.name
        )))
    };

    if field.lsb > field.msb {
        return fail(format!("inverted span {}..={}", field.lsb, field.msb));
    }
    // Writes use the half-word enable convention, so spans must sit in 0..=15.
    if field.msb > 15 {
        return fail(format!("span ends at bit {} (past the low half-word)", field.msb));
    }
    if field.offset % 4 != 0 {
        return fail(format!("offset {:#x} not 4-byte aligned", field.offset));
    }
    if field.offset as usize + 4 > WINDOW_SIZE {
        return fail(format!("offset {:#x} outside the window", field.offset));
    }

    let span_max = bits::span_mask(field.lsb, field.msb);
    match &field.kind {
        FieldKind::Integer { min, max } => {
            if min > max {
                return fail(format!("inverted range {min}..={max}"));
            }
            if *max > span_max {
                return fail(format!("max {max} does not fit a {}-bit span", field.width()));
            }
        }
        FieldKind::Enum { options } => {
            if options.is_empty() {
                return fail("empty enum table".to_owned());
            }
            for (i, (name, code)) in options.iter().enumerate() {
                if *code > span_max {
                    return fail(format!("code {code} for '{name}' does not fit the span"));
                }
                for (other_name, other_code) in &options[..i] {
                    if name == other_name {
                        return fail(format!("duplicate option name '{name}'"));
                    }
                    if code == other_code {
                        return fail(format!(
                            "options '{other_name}' and '{name}' share code {code}"
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::SimBus;
    use rk3588_soc::{DomainSpec, Section, Window};

    fn table_with(fields: Vec<FieldSpec>) -> Result<FieldTable> {
        FieldTable::new(&DomainSpec {
            name: "test",
            sections: vec![Section::new("fields", fields)],
            interlocks: Vec::new(),
            nodes: Vec::new(),
        })
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = table_with(vec![
            FieldSpec::new("div", Window::Cru, 0x300, 0, 4, FieldKind::int(0, 31)),
            FieldSpec::new("div", Window::Cru, 0x304, 0, 4, FieldKind::int(0, 31)),
        ])
        .unwrap_err();
        assert!(matches!(err, ClkError::Config { .. }));
    }

    #[test]
    fn rejects_span_past_low_half() {
        let err = table_with(vec![FieldSpec::new(
            "bad",
            Window::Cru,
            0x300,
            12,
            16,
            FieldKind::int(0, 1),
        )])
        .unwrap_err();
        assert!(matches!(err, ClkError::Config { .. }));
    }

    #[test]
    fn rejects_enum_code_collision() {
        let err = table_with(vec![FieldSpec::new(
            "sel",
            Window::Cru,
            0x300,
            0,
            1,
            FieldKind::options(&[("a", 0), ("b", 0)]),
        )])
        .unwrap_err();
        assert!(matches!(err, ClkError::Config { .. }));
    }

    #[test]
    fn rejects_range_wider_than_span() {
        let err = table_with(vec![FieldSpec::new(
            "div",
            Window::Cru,
            0x300,
            0,
            3,
            FieldKind::int(0, 31),
        )])
        .unwrap_err();
        assert!(matches!(err, ClkError::Config { .. }));
    }

    #[test]
    fn resolves_enum_and_unknown_codes() {
        let table = table_with(vec![FieldSpec::new(
            "sel",
            Window::Cru,
            0x300,
            6,
            7,
            FieldKind::options(&[("osc", 0b00), ("gpll", 0b10)]),
        )])
        .unwrap();
        let mut bus = SimBus::new();

        bus.poke(Window::Cru, 0x300, 0b10 << 6);
        assert_eq!(table.read(&bus, "sel").unwrap(), ResolvedValue::Enum("gpll"));

        bus.poke(Window::Cru, 0x300, 0b01 << 6);
        assert_eq!(
            table.read(&bus, "sel").unwrap(),
            ResolvedValue::UnknownCode(0b01)
        );
    }

    #[test]
    fn unknown_name_is_field_not_found() {
        let table = table_with(Vec::new()).unwrap();
        let bus = SimBus::new();
        assert!(matches!(
            table.read(&bus, "nope"),
            Err(ClkError::FieldNotFound { .. })
        ));
    }
}

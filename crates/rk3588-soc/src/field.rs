//! Field descriptors, sections, interlock rules, and domain specifications.
//!
//! These are immutable configuration data: each clock domain constructs its
//! spec once at startup (see [`crate::domains`]) and the runtime crate
//! validates it into live tables. Nothing here touches hardware.

use crate::clock::NodeSpec;
use crate::memory_map::Window;

/// What a bit-field's raw value means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain integer with an inclusive legal range.
    Integer {
        /// Smallest legal value.
        min: u32,
        /// Largest legal value.
        max: u32,
    },
    /// Enumerated value with a bijective name↔code table.
    Enum {
        /// `(name, code)` pairs; names and codes must each be unique.
        options: Vec<(&'static str, u32)>,
    },
}

impl FieldKind {
    /// Convenience constructor for an integer range.
    #[must_use]
    pub const fn int(min: u32, max: u32) -> Self {
        Self::Integer { min, max }
    }

    /// Convenience constructor for an enum table.
    #[must_use]
    pub fn options(options: &[(&'static str, u32)]) -> Self {
        Self::Enum {
            options: options.to_vec(),
        }
    }
}

/// One named bit-field inside a register window.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name, unique within its domain.
    pub name: &'static str,
    /// Window the field's register lives in.
    pub window: Window,
    /// Byte offset of the 32-bit register within the window.
    pub offset: u32,
    /// Least significant bit of the span.
    pub lsb: u8,
    /// Most significant bit of the span (`lsb <= msb <= 31`).
    pub msb: u8,
    /// Value interpretation.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Construct a field descriptor.
    #[must_use]
    pub fn new(
        name: &'static str,
        window: Window,
        offset: u32,
        lsb: u8,
        msb: u8,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            window,
            offset,
            lsb,
            msb,
            kind,
        }
    }

    /// Width of the span in bits.
    #[must_use]
    pub const fn width(&self) -> u8 {
        self.msb - self.lsb + 1
    }
}

/// A titled group of fields, displayed and validated together.
#[derive(Debug, Clone)]
pub struct Section {
    /// Section title (per the TRM register grouping).
    pub title: &'static str,
    /// Fields in display order.
    pub fields: Vec<FieldSpec>,
}

impl Section {
    /// Construct a section.
    #[must_use]
    pub fn new(title: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self { title, fields }
    }
}

/// A hardware hazard rule tying a PLL's reset field to its consumer mux.
///
/// One rule expresses both directions of the hazard:
/// - `reset_field` must not be written while `mux_field` currently selects
///   `guarded_source` (the core would lose its clock);
/// - `mux_field` must not be switched to `guarded_source` unless
///   `lock_field` reads 1 (an unlocked PLL is not a valid clock).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterlockRule {
    /// The PLL reset-control field.
    pub reset_field: &'static str,
    /// The mux-select field that can consume the PLL.
    pub mux_field: &'static str,
    /// Enum option name of `mux_field` that selects the PLL.
    pub guarded_source: &'static str,
    /// The PLL lock-status field (1 = locked).
    pub lock_field: &'static str,
}

/// Everything one clock domain needs: its fields, hazards, and clock graph.
#[derive(Debug, Clone)]
pub struct DomainSpec {
    /// Domain name (`bigcore0`, `dsu`, …).
    pub name: &'static str,
    /// Ordered field sections.
    pub sections: Vec<Section>,
    /// Interlock rules enforced before guarded writes.
    pub interlocks: Vec<InterlockRule>,
    /// Clock-node specifications for frequency derivation.
    pub nodes: Vec<NodeSpec>,
}

impl DomainSpec {
    /// Iterate over every field in section order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// The set of windows this domain's fields and nodes touch, deduplicated.
    #[must_use]
    pub fn windows(&self) -> Vec<Window> {
        let mut out: Vec<Window> = self.fields().map(|f| f.window).collect();
        for node in &self.nodes {
            if let crate::clock::NodeKind::PvtpllStatus { window, .. } = node.kind {
                out.push(window);
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }
}

//! Silicon model for the Rockchip RK3588 clock/reset unit.
//!
//! This crate has **no dependencies** and **no hardware access** — it is a
//! pure model of the silicon: CRU/GRF register window addresses, bit-field
//! descriptors for the hand-curated set of clock-tree fields, PLL frequency
//! math, per-domain interlock rules, and the clock-node graphs from which
//! operating frequencies are derived.
//!
//! Register offsets, bit ranges, and enum encodings come from the RK3588
//! Technical Reference Manual; the fixed system PLL frequencies were read
//! back from a live board.
//!
//! # Crate organisation
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`memory_map`] | Register window identifiers and physical base addresses |
//! | [`bits`] | Bit-span extraction/insertion and write-enable word composition |
//! | [`pll`] | Oscillator constants, reference PLL frequencies, PLL formulas |
//! | [`field`] | Field descriptors, sections, interlock rules, domain specs |
//! | [`clock`] | Clock-node specifications (oscillator/PLL/mux/divider/PVTPLL) |
//! | [`domains`] | The six hand-curated domain specs (bigcore0 … npu) |

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bits;
pub mod clock;
pub mod domains;
pub mod field;
pub mod memory_map;
pub mod pll;

pub use clock::{NodeKind, NodeSpec, PllKind};
pub use field::{DomainSpec, FieldKind, FieldSpec, InterlockRule, Section};
pub use memory_map::{Window, WINDOW_SIZE};

//! RK3588 clock-tree runtime: mapped register windows, guarded field
//! writes, and live frequency derivation.
//!
//! The static description of the hardware (windows, fields, interlocks,
//! clock nodes) lives in `rk3588-soc`; this crate turns those tables into
//! live access:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`window`] | One 4 KiB `/dev/mem` mapping per register window |
//! | [`bus`] | [`RegisterBus`] seam: [`DevMemBus`] on hardware, [`SimBus`] in tests |
//! | [`table`] | Validated name-indexed field tables and resolved reads |
//! | [`writer`] | The parse → range → interlock → RMW → verify write protocol |
//! | [`graph`] | Clock-graph validation and one-pass frequency evaluation |
//! | [`domain`] | [`ClockDomain`]: one domain's table, writer, and graph together |
//!
//! Everything above the bus seam is hardware-agnostic, so the whole stack
//! runs against [`SimBus`] without an RK3588 present.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod bus;
pub mod domain;
pub mod error;
pub mod graph;
pub mod table;
pub mod window;
pub mod writer;

pub use bus::{DevMemBus, RegisterBus, SimBus};
pub use domain::{all_domains, domain_by_name, ClockDomain};
pub use error::{ClkError, Result};
pub use graph::{ClockGraph, FrequencyReport};
pub use table::{FieldTable, ResolvedValue};
pub use window::RegisterWindow;
pub use writer::GuardedWriter;

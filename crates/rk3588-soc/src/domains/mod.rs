//! The six hand-curated clock domains.
//!
//! Offsets, bit ranges, legal ranges, and enum encodings are per the RK3588
//! TRM sections for the big-core / DSU / central CRUs and the cluster GRFs.
//! Each constructor builds an immutable [`DomainSpec`] once; callers pass it
//! by reference into the runtime validators.

mod bigcore0;
mod bigcore1;
mod dsu;
mod gpu;
mod littlecore;
mod npu;

pub use bigcore0::bigcore0;
pub use bigcore1::bigcore1;
pub use dsu::dsu;
pub use gpu::gpu;
pub use littlecore::littlecore;
pub use npu::npu;

use crate::field::DomainSpec;

/// All domain specs, in display order.
#[must_use]
pub fn all() -> Vec<DomainSpec> {
    vec![bigcore0(), bigcore1(), littlecore(), dsu(), gpu(), npu()]
}

/// Look up one domain spec by name.
#[must_use]
pub fn by_name(name: &str) -> Option<DomainSpec> {
    all().into_iter().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn six_domains() {
        let names: Vec<_> = all().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            ["bigcore0", "bigcore1", "littlecore", "dsu", "gpu", "npu"]
        );
    }

    #[test]
    fn field_names_unique_per_domain() {
        for spec in all() {
            let mut seen = HashSet::new();
            for f in spec.fields() {
                assert!(seen.insert(f.name), "{}: duplicate field {}", spec.name, f.name);
            }
        }
    }

    #[test]
    fn node_ids_unique_per_domain() {
        for spec in all() {
            let mut seen = HashSet::new();
            for n in &spec.nodes {
                assert!(seen.insert(n.id), "{}: duplicate node {}", spec.name, n.id);
            }
        }
    }

    #[test]
    fn spans_fit_in_registers() {
        for spec in all() {
            for f in spec.fields() {
                assert!(f.lsb <= f.msb && f.msb <= 31, "{}: bad span", f.name);
                assert!(
                    u64::from(f.offset) + 4 <= crate::memory_map::WINDOW_SIZE as u64,
                    "{}: offset out of window",
                    f.name
                );
            }
        }
    }

    #[test]
    fn writable_fields_stay_in_low_half_word() {
        // The write-enable convention needs every tunable span below bit 16
        for spec in all() {
            for f in spec.fields() {
                assert!(f.msb <= 15, "{}: span crosses into enable half", f.name);
            }
        }
    }

    #[test]
    fn interlock_fields_exist() {
        for spec in all() {
            let names: HashSet<_> = spec.fields().map(|f| f.name).collect();
            for rule in &spec.interlocks {
                for field in [rule.reset_field, rule.mux_field, rule.lock_field] {
                    assert!(names.contains(field), "{}: missing {field}", spec.name);
                }
            }
        }
    }

    #[test]
    fn npu_never_touches_its_grf() {
        // GRF_NPU reads hang the SoC while the PVTPLL is inactive
        assert!(!npu().windows().contains(&crate::memory_map::Window::GrfNpu));
    }
}

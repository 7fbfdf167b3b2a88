//! GPU power-policy gate for the GRF_GPU register window.
//!
//! Reading GRF_GPU while the GPU power domain is down hangs the SoC, so the
//! window is only mapped after the Mali devfreq power policy is pinned to
//! `always_on`. The policy file lists every policy with the current one in
//! brackets, e.g. `coarse_demand [always_on]`.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const POWER_POLICY: &str =
    "/sys/devices/platform/fb000000.gpu/devfreq/fb000000.gpu/device/power_policy";

/// The currently selected GPU power policy.
pub fn gpu_power_policy() -> Result<String> {
    let raw = fs::read_to_string(POWER_POLICY)
        .with_context(|| format!("cannot read {POWER_POLICY} (is this an RK3588?)"))?;
    parse_current(&raw)
        .with_context(|| format!("no selected policy in {POWER_POLICY}: '{}'", raw.trim()))
}

/// Whether the GPU power domain is pinned up, making GRF_GPU safe to read.
pub fn gpu_always_on() -> Result<bool> {
    Ok(gpu_power_policy()? == "always_on")
}

/// Pin the GPU power domain up.
pub fn set_gpu_always_on() -> Result<()> {
    write_policy(Path::new(POWER_POLICY), "always_on")
}

fn write_policy(path: &Path, policy: &str) -> Result<()> {
    fs::write(path, policy)
        .with_context(|| format!("cannot write '{policy}' to {} (need root?)", path.display()))
}

fn parse_current(raw: &str) -> Option<String> {
    let start = raw.find('[')?;
    let end = raw[start..].find(']')? + start;
    Some(raw[start + 1..end].to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bracketed_policy() {
        assert_eq!(
            parse_current("coarse_demand [always_on] demand\n").as_deref(),
            Some("always_on")
        );
        assert_eq!(
            parse_current("[coarse_demand] always_on\n").as_deref(),
            Some("coarse_demand")
        );
        assert_eq!(parse_current("coarse_demand always_on\n"), None);
    }
}

//! `rk3588ctl` — command-line interface for the RK3588 clock tree.
//!
//! ```text
//! USAGE:
//!   rk3588ctl domains                        List clock domains
//!   rk3588ctl fields <domain>                List a domain's tunable fields
//!   rk3588ctl read <domain> <field>          Read one field (root)
//!   rk3588ctl write <domain> <field> <value> Guarded write to one field (root)
//!   rk3588ctl freqs <domain>                 Derive the domain's frequencies (root)
//!   rk3588ctl gpu-policy [--always-on]       Show or pin the GPU power policy
//! ```

mod power;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rk3588_clk::{ClockDomain, DevMemBus};
use rk3588_soc::{FieldKind, Window};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rk3588ctl", about = "RK3588 clock-tree inspection and tuning", version)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// List the clock domains.
    Domains,
    /// List a domain's tunable fields, grouped by section.
    Fields {
        /// Domain name (e.g. bigcore0).
        domain: String,
    },
    /// Read one field from live registers.
    Read {
        /// Domain name.
        domain: String,
        /// Field name (see `fields`).
        field: String,
    },
    /// Write one field through the guarded protocol.
    Write {
        /// Domain name.
        domain: String,
        /// Field name.
        field: String,
        /// Integer value, or an enum option name.
        value: String,
    },
    /// Derive every clock frequency in a domain from live registers.
    Freqs {
        /// Domain name.
        domain: String,
    },
    /// Show the GPU power policy, or pin it to always_on.
    GpuPolicy {
        /// Pin the policy to always_on (requires root).
        #[arg(long)]
        always_on: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Cmd::Domains => cmd_domains()?,
        Cmd::Fields { domain } => cmd_fields(&domain)?,
        Cmd::Read { domain, field } => cmd_read(&domain, &field)?,
        Cmd::Write {
            domain,
            field,
            value,
        } => cmd_write(&domain, &field, &value)?,
        Cmd::Freqs { domain } => cmd_freqs(&domain)?,
        Cmd::GpuPolicy { always_on } => cmd_gpu_policy(always_on)?,
    }

    Ok(())
}

/// Map every window a domain needs, refusing gated windows whose
/// preconditions are not met.
fn open_bus(domain: &ClockDomain) -> Result<DevMemBus> {
    let windows = domain.windows();
    for w in &windows {
        if w.gated() {
            match *w {
                Window::GrfGpu => {
                    if !power::gpu_always_on()? {
                        bail!(
                            "GRF_GPU is only safe to read with the GPU power policy \
                             pinned to always_on; run `rk3588ctl gpu-policy --always-on` first"
                        );
                    }
                }
                // No domain table maps GRF_NPU; refuse rather than hang.
                _ => bail!("window {w} cannot be mapped safely"),
            }
        }
    }
    Ok(DevMemBus::open(&windows)?)
}

fn cmd_domains() -> Result<()> {
    for domain in rk3588_clk::all_domains()? {
        let windows: Vec<String> = domain.windows().iter().map(|w| w.to_string()).collect();
        println!("{:<12} {}", domain.name(), windows.join(", "));
    }
    Ok(())
}

fn cmd_fields(name: &str) -> Result<()> {
    let domain = rk3588_clk::domain_by_name(name)?;
    // Without root (or on another machine) still print the static listing.
    let bus = open_bus(&domain).ok();

    for section in domain.sections() {
        println!("{}", section.title);
        for f in &section.fields {
            let kind = match &f.kind {
                FieldKind::Integer { min, max } => format!("{min}..={max}"),
                FieldKind::Enum { options } => options
                    .iter()
                    .map(|(n, _)| *n)
                    .collect::<Vec<_>>()
                    .join(" | "),
            };
            let value = match &bus {
                Some(bus) => domain.read(bus, f.name)?.to_string(),
                None => "-".to_owned(),
            };
            println!(
                "  {:<22} {:>12}  {} +{:#05x} [{}:{}]  {kind}",
                f.name, value, f.window, f.offset, f.msb, f.lsb
            );
        }
        println!();
    }
    Ok(())
}

fn cmd_read(domain_name: &str, field: &str) -> Result<()> {
    let domain = rk3588_clk::domain_by_name(domain_name)?;
    let bus = open_bus(&domain)?;

    let value = domain.read(&bus, field)?;
    let raw = domain.read_raw(&bus, field)?;
    println!("{field} = {value} (raw {raw:#x})");
    Ok(())
}

fn cmd_write(domain_name: &str, field: &str, value: &str) -> Result<()> {
    let domain = rk3588_clk::domain_by_name(domain_name)?;
    let mut bus = open_bus(&domain)?;

    let written = domain.write(&mut bus, field, value)?;
    println!("{field} = {} (raw {written:#x})", domain.read(&bus, field)?);
    Ok(())
}

fn cmd_freqs(domain_name: &str) -> Result<()> {
    let domain = rk3588_clk::domain_by_name(domain_name)?;
    let bus = open_bus(&domain)?;

    let report = domain.frequencies(&bus)?;
    println!("{} clock tree:", domain.name());
    for (id, mhz) in report.entries() {
        println!("  {id:<18} {mhz:>10.3} MHz");
    }
    Ok(())
}

fn cmd_gpu_policy(pin: bool) -> Result<()> {
    if pin {
        power::set_gpu_always_on()?;
    }
    println!("GPU power policy: {}", power::gpu_power_policy()?);
    Ok(())
}

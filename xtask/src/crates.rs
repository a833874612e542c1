use std::process::Command;

use anyhow::{Context, Result};

/// Workspace crates in dependency order.
const CRATES: &[&str] = &["fieldpulse-domain", "fieldpulse-core", "fieldpulse-infra"];

/// Check that every crate compiles on its own, so a dependency that is only
/// satisfied through workspace feature unification gets caught.
pub fn check_each_crate() -> Result<()> {
    println!("Checking {} crates in isolation...", CRATES.len());

    for (index, name) in CRATES.iter().enumerate() {
        println!("\n[{}/{}] cargo check -p {name} --all-targets", index + 1, CRATES.len());

        let status = Command::new("cargo")
            .args(["check", "-p", name, "--all-targets"])
            .status()
            .with_context(|| format!("Failed to run cargo check for '{name}'"))?;

        if !status.success() {
            anyhow::bail!("Crate '{name}' failed to compile on its own");
        }

        println!("✅ {name} compiled successfully");
    }

    println!("\n✅ All {} crates compile in isolation!", CRATES.len());

    Ok(())
}

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// Run `cargo <args>` as one reported step.
///
/// `detail` turns the captured stdout into the text shown after "passed"
/// (e.g. a test summary). A failing step prints its output and aborts.
pub fn step(label: &str, args: &[&str], detail: fn(&str) -> String) -> Result<()> {
    println!("{}", format!("  Running {label}...").cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run {label}"))?;

    if !output.status.success() {
        eprintln!("{}", format!("  ✗ {label} failed").red().bold());
        eprintln!();
        print_indented(&output);
        anyhow::bail!("{label} failed");
    }

    let detail = detail(&String::from_utf8_lossy(&output.stdout));
    println!(
        "{}",
        format!(
            "  ✓ {label} passed{detail} in {:.2}s",
            start.elapsed().as_secs_f64()
        )
        .green()
    );
    println!();
    Ok(())
}

/// No extra detail after "passed".
pub fn no_detail(_stdout: &str) -> String {
    String::new()
}

fn print_indented(output: &Output) {
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        eprintln!("  {line}");
    }
    for line in String::from_utf8_lossy(&output.stderr).lines() {
        eprintln!("  {line}");
    }
}

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// Embedded target the driver must keep building for.
pub const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

/// One `cargo` invocation and how to report it.
struct Step {
    label: &'static str,
    args: &'static [&'static str],
    /// Failing steps abort the run; advisory ones only warn.
    required: bool,
}

const STEPS: &[Step] = &[
    Step {
        label: "ad9833 (no_std, no features)",
        args: &["check", "-p", "ad9833", "--target", EMBEDDED_TARGET],
        required: true,
    },
    Step {
        label: "ad9833 (no_std, defmt)",
        args: &[
            "check",
            "-p",
            "ad9833",
            "--target",
            EMBEDDED_TARGET,
            "--features",
            "defmt",
        ],
        required: true,
    },
    Step {
        label: "ad9833 (host, std + tracing)",
        args: &["check", "-p", "ad9833", "--all-targets", "--features", "std,tracing"],
        required: true,
    },
    Step {
        label: "clippy",
        args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        required: false,
    },
    Step {
        label: "formatting",
        args: &["fmt", "--all", "--check"],
        required: false,
    },
];

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking AD9833 driver builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    for step in STEPS {
        println!("{}", format!("  Checking {}...", step.label).cyan());
        let start = Instant::now();

        let output = Command::new("cargo")
            .args(step.args)
            .output()
            .with_context(|| format!("Failed to run cargo for {}", step.label))?;

        if output.status.success() {
            println!(
                "{}",
                format!(
                    "  ✓ {} passed in {:.2}s",
                    step.label,
                    start.elapsed().as_secs_f64()
                )
                .green()
            );
        } else if step.required {
            eprintln!("{}", format!("  ✗ {} failed", step.label).red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("{} failed", step.label);
        } else {
            eprintln!("{}", format!("  ⚠ {} reported issues", step.label).yellow().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        }
        println!();
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

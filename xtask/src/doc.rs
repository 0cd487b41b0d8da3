use anyhow::Result;
use colored::Colorize;

use crate::cargo;

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building AD9833 documentation...".cyan().bold());
    println!();

    let mut args = vec!["doc", "-p", "ad9833", "--no-deps", "--features", "std"];
    if open {
        args.push("--open");
    }
    cargo::step("documentation build", &args, cargo::no_detail)?;

    if !open {
        println!("   {}", "Open target/doc/ad9833/index.html in your browser".dimmed());
        println!("   {}", "Or run 'cargo run -p xtask -- doc --open'".dimmed());
        println!();
    }
    Ok(())
}

use clap::Parser;
use colored::*;
use std::process;
use zero_docs::prelude::*;

fn main() -> Result<()> {
    zero_docs::init_logging();

    let config = Args::parse().into_config()?;
    config.validate()?;

    let generator = ChatCompletionsGenerator::new(&config)?;
    let driver = Driver::new(&generator, &config);
    let summary = driver.run(&config.input_paths);

    print_summary(&summary, config.check);

    let failed = summary.files_failed > 0 || (config.check && summary.files_changed > 0);
    if failed {
        process::exit(1);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary, check: bool) {
    let changed_label = if check { "would change" } else { "changed" };

    println!("{}", "Summary".bold());
    println!("  {:<16} {}", "files scanned", summary.files_scanned);
    println!(
        "  {:<16} {}",
        changed_label,
        summary.files_changed.to_string().green()
    );
    println!(
        "  {:<16} {}",
        "docstrings added",
        summary.documented.to_string().green()
    );

    if summary.unit_failures > 0 {
        println!(
            "  {:<16} {}",
            "units skipped",
            summary.unit_failures.to_string().yellow()
        );
    }
    if summary.files_failed > 0 {
        println!(
            "  {:<16} {}",
            "files failed",
            summary.files_failed.to_string().red().bold()
        );
    }
}

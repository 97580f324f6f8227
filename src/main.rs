//! nuscan - NuGet dependency checker CLI tool
//!
//! Scans .NET project files for NuGet package references, looks up the latest
//! published versions and reports outdated or unknown packages.

use clap::Parser;
use nuscan::cli::CliArgs;
use nuscan::config::ScanConfig;
use nuscan::orchestrator::Orchestrator;
use nuscan::output::{
    attachment_marker, create_formatter, write_attachment, write_badge, write_report,
    OutputConfig,
};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG takes precedence over --verbose/--quiet
fn init_tracing(args: &CliArgs) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = ScanConfig::load(&args)?;

    // Print version info in verbose mode
    if config.verbose {
        eprintln!("nuscan v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", config.root.display());
        for source in &config.sources {
            eprintln!("Source: {} ({})", source.name, source.url);
        }
    }

    // Create and run the orchestrator
    let mut orchestrator = Orchestrator::new(config.clone())?;
    let result = orchestrator.run().await?;

    // Output results
    let output_config = OutputConfig::from_cli(config.json, config.verbose, config.quiet)
        .with_color(io::stdout().is_terminal());
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;

    // Write artifacts
    if let Some(path) = &config.report {
        write_report(path, &result.projects, config.css_url.as_deref())?;
        if config.verbose {
            eprintln!("Report written to {}", path.display());
        }
    }
    if let Some(path) = &config.badge {
        write_badge(path, result.badge_state())?;
        if config.verbose {
            eprintln!("Badge written to {}", path.display());
        }
    }
    if config.ci_attach {
        let path = write_attachment(&std::env::current_dir()?, &result.projects)?;
        writeln!(stdout, "{}", attachment_marker(&path))?;
    }
    stdout.flush()?;

    // Lookup failures and unparsable manifests are partial success
    if result.has_errors() {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

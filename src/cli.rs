//! CLI argument parsing module for nuscan

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// NuGet dependency checker
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "nuscan", version, about = "NuGet dependency checker")]
pub struct CliArgs {
    /// Directory or project file to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Scan options
    /// Scan subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Combine all projects into one package list
    #[arg(short, long)]
    pub combine: bool,

    /// Consider pre-release versions when looking for the latest version
    #[arg(long)]
    pub prerelease: bool,

    /// NuGet v3 service index URL (can be specified multiple times, in priority order)
    #[arg(long = "source", value_name = "URL", action = ArgAction::Append)]
    pub sources: Vec<String>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    // Output options
    /// Write an HTML report to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Stylesheet URL referenced by the HTML report
    #[arg(long, value_name = "URL")]
    pub css_url: Option<String>,

    /// Write an SVG status badge to this file
    #[arg(long, value_name = "FILE")]
    pub badge: Option<PathBuf>,

    /// Write nuscan-result.json and announce it as a build attachment
    #[arg(long)]
    pub ci_attach: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["nuscan"]);
        assert_eq!(args.path, PathBuf::from("."));
        assert!(!args.recursive);
        assert!(!args.combine);
        assert!(!args.prerelease);
        assert!(args.sources.is_empty());
        assert!(args.config.is_none());
        assert!(args.report.is_none());
        assert!(args.css_url.is_none());
        assert!(args.badge.is_none());
        assert!(!args.ci_attach);
        assert!(!args.json);
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_path_argument() {
        let args = CliArgs::parse_from(["nuscan", "/some/path"]);
        assert_eq!(args.path, PathBuf::from("/some/path"));
    }

    #[test]
    fn test_recursive_flags() {
        let args = CliArgs::parse_from(["nuscan", "-r"]);
        assert!(args.recursive);

        let args = CliArgs::parse_from(["nuscan", "--recursive"]);
        assert!(args.recursive);
    }

    #[test]
    fn test_combine_flags() {
        let args = CliArgs::parse_from(["nuscan", "-c"]);
        assert!(args.combine);

        let args = CliArgs::parse_from(["nuscan", "--combine"]);
        assert!(args.combine);
    }

    #[test]
    fn test_prerelease_flag() {
        let args = CliArgs::parse_from(["nuscan", "--prerelease"]);
        assert!(args.prerelease);
    }

    #[test]
    fn test_source_multiple() {
        let args = CliArgs::parse_from([
            "nuscan",
            "--source",
            "https://a.example/v3/index.json",
            "--source",
            "https://b.example/v3/index.json",
        ]);
        assert_eq!(
            args.sources,
            vec![
                "https://a.example/v3/index.json",
                "https://b.example/v3/index.json"
            ]
        );
    }

    #[test]
    fn test_output_files() {
        let args = CliArgs::parse_from([
            "nuscan",
            "--report",
            "report.html",
            "--css-url",
            "https://cdn.example/report.css",
            "--badge",
            "badge.svg",
            "--ci-attach",
        ]);
        assert_eq!(args.report, Some(PathBuf::from("report.html")));
        assert_eq!(
            args.css_url.as_deref(),
            Some("https://cdn.example/report.css")
        );
        assert_eq!(args.badge, Some(PathBuf::from("badge.svg")));
        assert!(args.ci_attach);
    }

    #[test]
    fn test_config_file() {
        let args = CliArgs::parse_from(["nuscan", "--config", "nuscan.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("nuscan.toml")));
    }

    #[test]
    fn test_json_output() {
        let args = CliArgs::parse_from(["nuscan", "--json"]);
        assert!(args.json);
    }

    #[test]
    fn test_quiet_flags() {
        let args = CliArgs::parse_from(["nuscan", "-q"]);
        assert!(args.quiet);

        let args = CliArgs::parse_from(["nuscan", "--quiet"]);
        assert!(args.quiet);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = CliArgs::try_parse_from(["nuscan", "--verbose", "--quiet"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_combined_flags() {
        let args = CliArgs::parse_from(["nuscan", "-r", "-c", "--json", "./src"]);
        assert!(args.recursive);
        assert!(args.combine);
        assert!(args.json);
        assert_eq!(args.path, PathBuf::from("./src"));
    }
}

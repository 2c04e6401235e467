//! pageview - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// pageview - browse project pages with a pinned header and export them
#[derive(Parser, Debug)]
#[command(name = "pageview")]
#[command(version)]
#[command(about = "Scrollable project pages with a pinned header and full-page export")]
pub struct Args {
    /// Open this page first (matched by name, ignoring case)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Directory screenshots are written to
    #[arg(long)]
    pub screenshot_dir: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = pageview::config::resolve(
        args.config.clone(),
        args.screenshot_dir.clone(),
        args.no_color,
    )?;

    pageview::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    pageview::app::run(&config, args.page.as_deref())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["pageview", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["pageview", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["pageview"]);
        assert_eq!(args.page, None);
        assert_eq!(args.screenshot_dir, None);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_page_short_and_long_flags() {
        let args = Args::parse_from(["pageview", "-p", "Summary"]);
        assert_eq!(args.page.as_deref(), Some("Summary"));

        let args = Args::parse_from(["pageview", "--page", "circuits"]);
        assert_eq!(args.page.as_deref(), Some("circuits"));
    }

    #[test]
    fn test_screenshot_dir_flag() {
        let args = Args::parse_from(["pageview", "--screenshot-dir", "/tmp/shots"]);
        assert_eq!(args.screenshot_dir, Some(PathBuf::from("/tmp/shots")));
    }

    #[test]
    fn test_no_color_flag() {
        let args = Args::parse_from(["pageview", "--no-color"]);
        assert!(args.no_color);
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["pageview", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_cli_screenshot_dir_wins_over_config_file() {
        use pageview::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            screenshot_dir: Some(PathBuf::from("/from/file")),
            ..ConfigFile::default()
        };
        let merged = merge_config(Some(config_file));
        let args = Args::parse_from(["pageview", "--screenshot-dir", "/from/cli"]);

        let resolved = apply_cli_overrides(merged, args.screenshot_dir, args.no_color);
        assert_eq!(resolved.screenshot_dir, PathBuf::from("/from/cli"));
    }
}

use std::path::PathBuf;

use clap::Parser;
use webinix_common::Browser;
use webinix_config::WebinixConfig;

/// webinix: show a page in the installed browser and answer its calls.
#[derive(Parser, Debug)]
#[command(name = "webinix", version, about)]
pub struct Args {
    /// HTML file, URL or inline HTML to show instead of the demo page.
    pub content: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory searched for the webinix library after the working directory.
    #[arg(long)]
    pub library_dir: Option<PathBuf>,

    /// Browser to open (any, chrome, firefox, edge, safari, chromium, custom).
    #[arg(long, value_parser = parse_browser)]
    pub browser: Option<Browser>,

    /// Seconds to wait for the browser to connect.
    #[arg(long)]
    pub timeout: Option<u32>,
}

fn parse_browser(name: &str) -> Result<Browser, String> {
    Browser::from_name(name).ok_or_else(|| format!("unknown browser `{name}`"))
}

impl Args {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut WebinixConfig) {
        if let Some(dir) = &self.library_dir {
            config.library.search_dir = Some(dir.clone());
        }
        if let Some(browser) = self.browser {
            config.window.browser = browser;
        }
        if let Some(timeout) = self.timeout {
            config.startup.timeout_secs = timeout;
        }
    }

    /// Filter directive for `tracing-subscriber`. A bare level applies to
    /// the webinix crates only.
    pub fn log_directive(&self, config: &WebinixConfig) -> String {
        match self.log_level.as_deref() {
            Some(level) if level.contains('=') => level.to_string(),
            Some(level) => format!("webinix={level}"),
            None => config.logging.directive(),
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let args = Args::try_parse_from([
            "webinix",
            "--config",
            "/tmp/webinix.toml",
            "--log-level",
            "debug",
            "--library-dir",
            "/opt/webinix",
            "--browser",
            "firefox",
            "--timeout",
            "10",
            "index.html",
        ])
        .unwrap();

        assert_eq!(args.content.as_deref(), Some("index.html"));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/webinix.toml")));
        assert_eq!(args.browser, Some(Browser::Firefox));
        assert_eq!(args.timeout, Some(10));
    }

    #[test]
    fn custom_browser_is_accepted() {
        let args = Args::try_parse_from(["webinix", "--browser", "custom"]).unwrap();
        assert_eq!(args.browser, Some(Browser::Custom));
    }

    #[test]
    fn unknown_browser_is_rejected() {
        assert!(Args::try_parse_from(["webinix", "--browser", "netscape"]).is_err());
    }

    #[test]
    fn overrides_replace_config_values() {
        let args = Args::try_parse_from([
            "webinix",
            "--library-dir",
            "/opt/webinix",
            "--browser",
            "chrome",
            "--timeout",
            "5",
        ])
        .unwrap();
        let mut config = WebinixConfig::default();
        args.apply(&mut config);

        assert_eq!(config.library.search_dir, Some(PathBuf::from("/opt/webinix")));
        assert_eq!(config.window.browser, Browser::Chrome);
        assert_eq!(config.startup.timeout_secs, 5);
    }

    #[test]
    fn absent_flags_keep_config() {
        let args = Args::try_parse_from(["webinix"]).unwrap();
        let mut config = WebinixConfig::default();
        args.apply(&mut config);
        assert_eq!(config, WebinixConfig::default());
    }

    #[test]
    fn log_directive_sources() {
        let config = WebinixConfig::default();

        let args = Args::try_parse_from(["webinix"]).unwrap();
        assert_eq!(args.log_directive(&config), "webinix=info");

        let args = Args::try_parse_from(["webinix", "--log-level", "trace"]).unwrap();
        assert_eq!(args.log_directive(&config), "webinix=trace");

        let args =
            Args::try_parse_from(["webinix", "--log-level", "webinix_bridge=debug"]).unwrap();
        assert_eq!(args.log_directive(&config), "webinix_bridge=debug");
    }
}

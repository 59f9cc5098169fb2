mod cli;
mod demo;

use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use webinix_bridge::{js, Webinix};
use webinix_common::WebinixError;
use webinix_config::WebinixConfig;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- webinix crashed ---");
        eprintln!("Run again with --log-level debug and include the log when reporting.");
        eprintln!("-----------------------\n");

        default_hook(info);
    }));
}

fn init_logging(directive: &str) {
    let mut filter = EnvFilter::from_default_env();
    match directive.parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("invalid log directive `{directive}`: {e}"),
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: &cli::Args, config: &WebinixConfig) -> Result<(), WebinixError> {
    let webinix = Webinix::from_config(config);

    webinix.set_timeout(config.startup.timeout_secs)?;
    if let Some(path) = webinix.library_path() {
        tracing::info!("Library loaded from {}", path.display());
    }

    let window = webinix.new_window()?;
    window.set_runtime(config.window.runtime)?;
    window.set_multi_access(config.window.multi_access)?;
    window.set_kiosk(config.window.kiosk)?;
    window.set_icon(demo::ICON_SVG, "image/svg+xml")?;
    demo::bind_handlers(&window)?;

    let content = args.content.as_deref().unwrap_or(demo::DEMO_PAGE);
    if !window.show_browser(content, config.window.browser)? {
        return Err(WebinixError::Other(format!(
            "could not open a browser window ({:?})",
            config.window.browser
        )));
    }

    if args.content.is_none() {
        let title_js = js::js_return("document.title");
        let title = window.run_script(&title_js, Duration::from_secs(5), 256);
        if title.is_ok() {
            tracing::info!("Page title: {}", title.data);
        } else {
            tracing::warn!("Could not read page title: {}", title.data);
        }
    }

    tracing::info!("Window {} shown, waiting", window.id());
    webinix.wait()?;
    drop(window);
    Ok(())
}

fn main() -> ExitCode {
    install_panic_hook();

    let args = cli::parse();

    // Logging depends on the config, so config errors are reported after init.
    let loaded = webinix_config::load_config(args.config.as_deref());
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&args.log_directive(&config));

    tracing::info!("webinix v{} starting...", env!("CARGO_PKG_VERSION"));
    match &loaded {
        Ok(_) => tracing::info!("Config loaded"),
        Err(e) => tracing::warn!("Config load failed, using defaults: {e}"),
    }
    args.apply(&mut config);

    match run(&args, &config) {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("webinix: {e}");
            ExitCode::FAILURE
        }
    }
}

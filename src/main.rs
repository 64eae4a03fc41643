mod action;
mod app;
mod config;
mod display;
mod gesture;
mod source;
mod stats;

use std::time::Duration;

use config::Config;
use source::SourceInput;

fn main() {
    env_logger::init();
    log::info!("Palm Switch starting");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::load();

    if args.first().map(String::as_str) == Some("--init-config") {
        match config.save() {
            Ok(()) => log::info!("Config written"),
            Err(e) => {
                log::error!("Failed to save config: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let input = SourceInput::from_arg(args.first().map(String::as_str));

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(app::run(config, input));
    // Blocking action tasks past the grace period are abandoned here.
    runtime.shutdown_timeout(Duration::from_millis(100));

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

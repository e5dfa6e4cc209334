//=========================================================================
// pane_engine binary
//
// Usage: pane_engine [seed]
//
// Logging is configured through RUST_LOG (default: info).
//
//=========================================================================

use log::{error, warn};

use pane_engine::SessionBuilder;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut builder = SessionBuilder::new();
    if let Some(arg) = std::env::args().nth(1) {
        match arg.parse::<u64>() {
            Ok(seed) => builder = builder.with_seed(seed),
            Err(_) => warn!("ignoring invalid seed {:?}", arg),
        }
    }

    if let Err(e) = builder.build().run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

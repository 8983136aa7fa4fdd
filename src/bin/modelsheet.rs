//! Provides the `modelsheet-cli` tool for batch-rendering model galleries.
//!
//! Takes no flags; configuration comes from the environment:
//!
//! ```text
//! RENDER_MODELS="$(echo prints/*.stl)" modelsheet-cli
//! ```
//!
//! Renders a PNG thumbnail (and a zoomed variant) next to each model and
//! writes `stl.html` / `stl_zoom.html` gallery pages to the working
//! directory.

use std::process;

use modelsheet::config::Config;
use modelsheet::host::software::SoftwareHost;
use modelsheet::runner;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    log::info!(
        "rendering {} models at {}x{} px, {} per row",
        config.models.len(),
        config.thumb_size,
        config.thumb_size,
        config.row_width
    );

    let mut host = SoftwareHost::new(config.thumb_size);

    match runner::run(&config, &mut host) {
        Ok(summary) => {
            for gallery in &summary.galleries {
                log::info!("gallery ready: {}", gallery.display());
            }
            log::info!("done: {} models rendered", summary.models_rendered);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting SketchGrid");

    let config = sketchgrid_app::AppConfig::from_env();
    if let Err(e) = sketchgrid_app::App::with_config(config).run() {
        log::error!("SketchGrid stopped: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    eprintln!("Native feature not enabled. Use `cargo run --features native`");
    std::process::exit(1);
}

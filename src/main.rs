use horizon_shadow::{DumpConfig, InteractiveViewer, ViewerConfig, dump_shadow_series, run_benchmark};
use std::path::PathBuf;

fn main() {
    env_logger::init();

    // Check for command line arguments
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--interactive") => run_interactive(),
        Some("--benchmark") => run_benchmark(),
        Some("--dump") => run_dump(args.get(2).map(PathBuf::from)),
        _ => {
            println!("Horizon Shadow");
            println!("Run with --dump [dir] to write height/shadow images");
            println!("Run with --interactive for minifb viewer");
            println!("Run with --benchmark to test performance");
        }
    }
}

fn run_dump(output_dir: Option<PathBuf>) {
    let mut config = DumpConfig::default();
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    if let Err(e) = dump_shadow_series(&config) {
        log::error!("Dump failed: {}", e);
        std::process::exit(1);
    }
}

fn run_interactive() {
    let config = ViewerConfig::default();

    match InteractiveViewer::new(config) {
        Ok(mut viewer) => {
            if let Err(e) = viewer.run() {
                log::error!("Error: {}", e);
            }
        }
        Err(e) => {
            log::error!("Failed to create viewer: {}", e);
        }
    }
}

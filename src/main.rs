use clap::Parser;
use egui::Vec2;

use chemviz::FileSessionStore;
use chemviz::ui::VisualizerApp;

const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the analytics API
    #[arg(short, long, default_value = DEFAULT_API_URL)]
    api_url: String,
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let args = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    let store = FileSessionStore::new_default().expect("could not open session storage");

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_inner_size(Vec2::new(1000., 700.));

    eframe::run_native(
        "Chemical Equipment Visualizer",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(VisualizerApp::new(
                &args.api_url,
                Box::new(store),
                cc,
            )))
        }),
    )
    .expect("could not start app");
}

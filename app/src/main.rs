#![allow(non_snake_case)]

use dioxus_logger::tracing::{info, Level};

use prism_app::app::App;

fn main() {
    dioxus_logger::init(Level::INFO).expect("failed to init logger");
    info!("starting prism frontend");
    dioxus::launch(App);
}

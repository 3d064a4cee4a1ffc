use std::process::exit;

use address_book::prelude::run_app;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run_app() {
        eprintln!("Error: {}", err);
        exit(1);
    }
}

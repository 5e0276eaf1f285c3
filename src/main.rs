//! # Dorfdelf Entry Point
//!
//! Runs the headless demo from the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! DORFDELF_CONFIG=world.json RUST_LOG=info cargo run --release
//! ```

fn main() {
    if let Err(err) = dorfdelf::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

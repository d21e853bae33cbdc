//! Binary entry point for `bump-versions`.

use std::process;

fn main() {
    if let Err(e) = bump_versions::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `librarium_core` linkage and
//!   schema bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use librarium_core::db::migrations::latest_version;
use librarium_core::db::open_db_in_memory;

fn main() {
    println!("librarium_core version={}", librarium_core::core_version());
    match open_db_in_memory() {
        Ok(_) => println!("librarium_core schema_version={}", latest_version()),
        Err(err) => {
            eprintln!("librarium_core bootstrap failed: {err}");
            std::process::exit(1);
        }
    }
}

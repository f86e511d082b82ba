//! Console demo over the stockpile core crate.
//!
//! # Responsibility
//! - Print a fixed narrative transcript for each repository use-case.
//! - Report failures and keep going; no single failed step aborts the run.

mod demos;

use std::io::{BufRead, IsTerminal};
use stockpile_core::{init_logging, DemoConfig};

fn main() {
    let config = DemoConfig::from_env().unwrap_or_else(|err| {
        println!("Configuration error: {err}. Using defaults.");
        DemoConfig::default()
    });

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            println!("Logging disabled: {err}");
        }
    }

    println!("stockpile {}", stockpile_core::core_version());
    println!();

    demos::warehouse();
    demos::healthcare();
    demos::finance();
    demos::inventory_records(&config.data_file);
    demos::grading(&config.data_file);

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        println!("Press Enter to exit...");
        if let Err(err) = stdin.lock().read_line(&mut String::new()) {
            println!("Could not read from stdin: {err}");
        }
    }
}

//! Condenser server binary.
//! Run with: cargo run --bin condenser-server

use std::process::ExitCode;

use condenser::startup;

fn main() -> ExitCode {
    startup::run()
}

//! # acme-checkout binary
//!
//! Setup lives in lib.rs so it can be tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    acme_checkout::run()
}

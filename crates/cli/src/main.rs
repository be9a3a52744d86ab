// Copyright 2025 k6-compare Contributors
// SPDX-License-Identifier: Apache-2.0

//! k6-compare CLI entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match k6_compare_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `addressbook_core` linkage and bootstrap from `ADDRESSBOOK_*`
//!   environment variables.
//! - Print the current projection in a deterministic layout.

use addressbook_core::{bootstrap, core_version, ping, CoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("addressbook_core ping={}", ping());
    println!("addressbook_core version={}", core_version());

    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let logic = match bootstrap(&config) {
        Ok(logic) => logic,
        Err(err) => {
            eprintln!("bootstrap error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let model = logic.model();
    println!(
        "addressbook_core contacts={} sort={}",
        model.address_book().len(),
        model.sort_mode().as_str()
    );
    for (index, contact) in model.projection().iter().enumerate() {
        let tags: Vec<&str> = contact.tags.iter().map(|tag| tag.as_str()).collect();
        println!("{}. {} [{}]", index + 1, contact.name, tags.join(","));
    }
    ExitCode::SUCCESS
}

//! The `gabarito resolve` command.

use anyhow::Result;

use gabarito_core::resolve::{resolve_to_canonical, OPTION_LETTERS};

pub fn execute(answer: String, options: Vec<String>) -> Result<()> {
    anyhow::ensure!(
        options.len() <= OPTION_LETTERS.len(),
        "at most {} options are supported, got {}",
        OPTION_LETTERS.len(),
        options.len()
    );

    let option_list = if options.is_empty() {
        None
    } else {
        Some(options.as_slice())
    };

    println!("{}", resolve_to_canonical(&answer, option_list));
    Ok(())
}

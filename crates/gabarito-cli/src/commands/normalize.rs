//! The `gabarito normalize` command.

use anyhow::Result;

use gabarito_core::normalize::normalize;

pub fn execute(raw: Vec<String>) -> Result<()> {
    for answer in &raw {
        println!("{}", normalize(answer.as_str()));
    }
    Ok(())
}

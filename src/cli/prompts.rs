//! Interactive prompts using dialoguer

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::{Confirm, Input};

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Ask for a different export after the current one had no usable rows.
///
/// Returns `None` when the user declines.
pub fn prompt_for_other_input() -> Result<Option<PathBuf>> {
    if !confirm_step("No usable keyword rows found. Try a different export?")? {
        return Ok(None);
    }

    let path: String = Input::new()
        .with_prompt("Path to a CSV, Parquet or Excel export")
        .validate_with(|input: &String| -> Result<(), String> {
            if std::path::Path::new(input.trim()).is_file() {
                Ok(())
            } else {
                Err(format!("'{}' is not a file", input.trim()))
            }
        })
        .interact_text()?;

    Ok(Some(PathBuf::from(path.trim())))
}

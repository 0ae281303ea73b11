//! Interactive prompts used when a value is not given on the command line.

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

/// Prompt for the login e-mail unless one was given.
pub fn prompt_email(given: Option<String>) -> Result<String> {
    if let Some(email) = given {
        return Ok(email);
    }
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    Ok(email)
}

/// Prompt for the password unless one was given. Input is hidden.
pub fn prompt_password(given: Option<String>) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    let password: String = Password::new().with_prompt("Password").interact()?;
    Ok(password)
}

/// Ask before marking an order completed. `--yes` skips the prompt.
pub fn confirm_completion(order_id: i64, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let confirmed = Confirm::new()
        .with_prompt(format!("Mark order {order_id} as COMPLETED?"))
        .default(false)
        .interact()?;
    Ok(confirmed)
}

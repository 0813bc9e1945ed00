// User prompts
// Modal questions and error notifications via zenity, falling back to kdialog

use std::process::Command;

use log::{error, warn};

/// Ask a yes/no question. Returns false when no dialog tool is available,
/// which is always the conservative answer for the questions this crate asks.
pub fn confirm(title: &str, text: &str) -> bool {
    let result = Command::new("zenity")
        .arg("--question")
        .arg("--title")
        .arg(title)
        .arg("--text")
        .arg(text)
        .status();

    match result {
        Ok(status) => status.success(),
        Err(_) => {
            // Fallback to kdialog
            let result = Command::new("kdialog")
                .arg("--title")
                .arg(title)
                .arg("--yesno")
                .arg(text)
                .status();

            match result {
                Ok(status) => status.success(),
                Err(e) => {
                    warn!(
                        "No dialog tool available ({}), assuming 'no' for: {}",
                        e, text
                    );
                    false
                }
            }
        }
    }
}

/// Report an error to the user. Always logs; shows a dialog when possible.
pub fn notify_error(title: &str, text: &str) {
    error!("{}: {}", title, text);

    let result = Command::new("zenity")
        .arg("--error")
        .arg("--title")
        .arg(title)
        .arg("--text")
        .arg(text)
        .status();

    if result.is_err() {
        let result = Command::new("kdialog")
            .arg("--title")
            .arg(title)
            .arg("--error")
            .arg(text)
            .status();

        if let Err(e) = result {
            warn!("No dialog tool available: {}. Install zenity or kdialog.", e);
        }
    }
}

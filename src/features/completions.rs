//! Shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::QuotebookError;

const BIN_NAME: &str = "quotebook";

/// Render the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, QuotebookError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf)
        .map_err(|e| QuotebookError::Validation(format!("Completion script is not UTF-8: {e}")))
}

/// Where to put the script for `shell`.
#[must_use]
pub fn install_hint(shell: Shell) -> &'static str {
    match shell {
        Shell::Bash => "# ~/.bashrc\nsource <(quotebook completions bash)\n",
        Shell::Zsh => "# ~/.zshrc, before compinit\nsource <(quotebook completions zsh)\n",
        Shell::Fish => "quotebook completions fish > ~/.config/fish/completions/quotebook.fish\n",
        Shell::PowerShell => {
            "# $PROFILE\nquotebook completions powershell | Out-String | Invoke-Expression\n"
        }
        _ => "# Save the script where your shell loads completions from.\n",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_mentions_subcommands() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("quotebook"));
        assert!(script.contains("import"));
        assert!(script.contains("categories"));
    }

    #[test]
    fn test_zsh_and_fish_generate() {
        assert!(generate_completions(Shell::Zsh).unwrap().contains("quotebook"));
        assert!(generate_completions(Shell::Fish).unwrap().contains("quotebook"));
    }

    #[test]
    fn test_install_hint() {
        assert!(install_hint(Shell::Bash).contains("source"));
        assert!(install_hint(Shell::Fish).contains("quotebook.fish"));
    }
}

//! Completions command - Generate shell completion scripts

use std::io;

use clap::Command;
use clap_complete::{generate, Shell};
use colored::Colorize;
use serde::Serialize;

use crate::output::{Output, OutputFormat, TableDisplay};

const BIN_NAME: &str = "drift";

/// Instructions for installing completions
#[derive(Debug, Serialize)]
pub struct CompletionInstructions {
    pub shell: String,
    pub instructions: Vec<String>,
}

impl TableDisplay for CompletionInstructions {
    fn to_table(&self) -> String {
        let mut output = format!(
            "{} completions for {}\n\n{}\n",
            "drift".cyan().bold(),
            self.shell.yellow(),
            "Installation:".cyan().bold()
        );
        for instruction in &self.instructions {
            output.push_str(&format!("  {}\n", instruction));
        }
        output
    }

    fn to_markdown(&self) -> String {
        format!(
            "### {} completions\n\n```sh\n{}\n```\n",
            self.shell,
            self.instructions.join("\n")
        )
    }
}

fn get_instructions(shell: Shell) -> Vec<String> {
    let lines: &[&str] = match shell {
        Shell::Bash => &[
            "# Add to ~/.bashrc:",
            "eval \"$(drift completions bash)\"",
        ],
        Shell::Zsh => &[
            "# Save to a file in fpath:",
            "drift completions zsh > ~/.zfunc/_drift",
            "# Then add to ~/.zshrc before compinit:",
            "fpath=(~/.zfunc $fpath)",
        ],
        Shell::Fish => &[
            "# Save to fish completions directory:",
            "drift completions fish > ~/.config/fish/completions/drift.fish",
        ],
        Shell::PowerShell => &[
            "# Add to $PROFILE:",
            "Invoke-Expression (& drift completions powershell | Out-String)",
        ],
        Shell::Elvish => &[
            "# Add to ~/.elvish/rc.elv:",
            "eval (drift completions elvish | slurp)",
        ],
        _ => &["# Write the script wherever your shell loads completions from"],
    };
    lines.iter().map(|line| line.to_string()).collect()
}

/// Generate completions for `cmd` and write them to stdout
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    generate(shell, cmd, BIN_NAME, &mut io::stdout());
}

/// Print installation instructions for a shell
pub fn run_instructions(shell: Shell, format: OutputFormat) -> anyhow::Result<()> {
    let instructions = CompletionInstructions {
        shell: shell.to_string(),
        instructions: get_instructions(shell),
    };
    Output::new(instructions, format).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_instructions() {
        let bash_instructions = get_instructions(Shell::Bash);
        assert!(bash_instructions.iter().any(|i| i.contains("bashrc")));

        let zsh_instructions = get_instructions(Shell::Zsh);
        assert!(zsh_instructions.iter().any(|i| i.contains("_drift")));
    }

    #[test]
    fn test_instructions_markdown() {
        let instructions = CompletionInstructions {
            shell: Shell::Fish.to_string(),
            instructions: get_instructions(Shell::Fish),
        };
        let output = instructions.to_markdown();

        assert!(output.starts_with("### fish completions\n\n```sh\n"));
        assert!(output.contains("drift.fish"));
    }
}

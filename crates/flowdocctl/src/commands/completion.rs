//! Shell completion generation for flowdocctl
//!
//! Commands:
//! - flowdocctl completion bash  > /etc/bash_completion.d/flowdocctl
//! - flowdocctl completion zsh   > ~/.zsh/completion/_flowdocctl
//! - flowdocctl completion fish  > ~/.config/fish/completions/flowdocctl.fish

use anyhow::Result;
use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate, Shell as ClapShell};
use std::io;

use crate::cli::Cli;

/// Supported shells for completion
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    Powershell,
    /// Elvish shell
    Elvish,
}

impl From<Shell> for ClapShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => ClapShell::Bash,
            Shell::Zsh => ClapShell::Zsh,
            Shell::Fish => ClapShell::Fish,
            Shell::Powershell => ClapShell::PowerShell,
            Shell::Elvish => ClapShell::Elvish,
        }
    }
}

/// Generate shell completion script
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(ClapShell::from(shell), &mut cmd, name, &mut io::stdout());

    match shell {
        Shell::Bash => eprintln!("\n# Install: source <(flowdocctl completion bash)"),
        Shell::Zsh => eprintln!("\n# Install: flowdocctl completion zsh > \"${{fpath[1]}}/_flowdocctl\""),
        Shell::Fish => {
            eprintln!("\n# Install: flowdocctl completion fish > ~/.config/fish/completions/flowdocctl.fish")
        }
        Shell::Powershell => {
            eprintln!("\n# Install: flowdocctl completion powershell >> $PROFILE")
        }
        Shell::Elvish => eprintln!("\n# Install: flowdocctl completion elvish >> ~/.elvish/rc.elv"),
    }

    Ok(())
}

//! # Shell Completion Module
//!
//! Generates completion scripts through clap's completion system.
//!
//! ```bash
//! # Generate bash completions
//! radiosift completion bash > ~/.local/share/bash-completion/completions/radiosift
//!
//! # Generate zsh completions
//! radiosift completion zsh > ~/.config/zsh/completions/_radiosift
//! ```

use crate::cli::Shell;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::{self, Write};

/// Generate shell completions for the given shell on stdout
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate_completions_to(gen, cmd, &mut io::stdout());
}

/// Generate shell completions into any writer
pub fn generate_completions_to<G: Generator>(gen: G, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(gen, cmd, name, out);
}

/// Convert our Shell enum to clap_complete's Shell enum
pub fn shell_to_completion_shell(shell: Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

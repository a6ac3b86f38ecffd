//! `linkpad completions` – emit shell completion scripts.

use clap_complete::{generate, Shell};
use std::io;

pub fn run_completions(shell: Shell, cmd: &mut clap::Command) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, &mut io::stdout());
}

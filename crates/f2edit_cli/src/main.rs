use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;

mod completion;
mod error;
mod input;
mod launcher;
mod modifier;
mod shell;
#[cfg(test)]
mod test_support;

use input::Terminal;
use shell::Shell;

/// Interactive editor for the skills, perks and stats of a Fallout 2 save.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory holding the save slots (SLOT01, SLOT02, ...).
    #[arg(value_name = "SAVE_DIR")]
    save_dir: PathBuf,
}

fn main() {
    env_logger::init();

    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() { 1 } else { 0 };
        let _ = e.print();
        process::exit(code);
    });

    let mut terminal = match Terminal::new() {
        Ok(terminal) => terminal,
        Err(e) => {
            eprintln!("Error starting line editor: {e}");
            process::exit(1);
        }
    };
    let mut stdout = io::stdout();

    let session = match launcher::launch(&cli.save_dir, &mut terminal, &mut stdout) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let mut shell = Shell::new(session);
    terminal.set_completions(shell.completion_table());
    if let Err(e) = shell.run(&mut terminal, &mut stdout) {
        eprintln!("Error reading input: {e}");
        process::exit(1);
    }
    info!("session closed");
}

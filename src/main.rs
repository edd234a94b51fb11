/*!
 * Command-line interface for codecopy
 */

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use codecopy::config::{Args, Config};
use codecopy::init::{ensure_ignore_entry, init_project, InitOutcome, IGNORE_ENTRY};
use codecopy::pipeline::Pipeline;
use codecopy::{CodeCopyError, SystemClipboard, TokenCounter};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        clap_complete::generate(shell, &mut command, "codecopy", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    if args.no_color {
        colored::control::set_override(false);
    }

    let result = if args.init {
        run_init(&args)
    } else {
        run(args)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CodeCopyError> {
    let config = Config::load(args)?;
    config.validate()?;

    let counter = TokenCounter::load(config.model).unwrap_or_else(|e| {
        eprintln!("{}", format!("Warning: token counting disabled: {}", e).yellow());
        TokenCounter::unavailable()
    });
    let clipboard = SystemClipboard;
    Pipeline::new(&config, counter, &clipboard).run()?;

    Ok(())
}

fn run_init(args: &Args) -> Result<(), CodeCopyError> {
    let dir = PathBuf::from(args.path.as_deref().unwrap_or("."));
    if !dir.is_dir() {
        return Err(CodeCopyError::RootNotFound(dir));
    }

    match init_project(&dir, args.overwrite)? {
        InitOutcome::Created(path) => println!("Created {}", path.display()),
        InitOutcome::Overwritten(path) => println!("Overwrote {}", path.display()),
        InitOutcome::Skipped(path) => println!(
            "{}",
            format!(
                "{} already exists, use --overwrite to replace it",
                path.display()
            )
            .yellow()
        ),
    }

    // Failing to update .gitignore does not undo the project file
    match ensure_ignore_entry(&dir.join(".gitignore"), IGNORE_ENTRY) {
        Ok(true) => println!("Added {} to .gitignore", IGNORE_ENTRY),
        Ok(false) => {}
        Err(e) => eprintln!("{}", format!("Warning: {}", e).yellow()),
    }

    Ok(())
}

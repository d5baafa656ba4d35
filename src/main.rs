//! histalias entry point.

use clap::Parser;
use histalias::activity::{ActivityLog, FileLog, NullLog};
use histalias::cli::{Cli, Command};
use histalias::config::Config;
use histalias::generate;
use histalias::output::{
    format_inspection, format_inspection_json, format_parsed, format_parsed_json, format_report,
    format_report_json,
};
use histalias::shell::parse_command_line;

use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let home = dirs::home_dir();
    let settings = match config.resolve(cli.global.overrides(), home.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Logging problems never stop a run.
    let mut log: Box<dyn ActivityLog> = match &settings.log {
        Some(path) => match FileLog::open(path) {
            Ok(file_log) => Box::new(file_log),
            Err(e) => {
                eprintln!("Cannot open log file {}: {}", path.display(), e);
                Box::new(NullLog)
            }
        },
        None => Box::new(NullLog),
    };

    let json = cli.global.json;
    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => {
            let report = generate::run(&settings, log.as_mut());
            if json {
                match format_report_json(&report) {
                    Ok(out) => println!("{}", out),
                    Err(e) => eprintln!("Output error: {}", e),
                }
            } else {
                print!("{}", format_report(&report));
                for error in &report.errors {
                    eprintln!("warning: {}", error);
                }
            }
            ExitCode::SUCCESS
        }
        Command::Parse { words } => {
            let line = words.join(" ");
            let parsed = parse_command_line(&line, &settings.parse);
            log.debug(&format!("Parsed {:?} as {:?}", line, parsed));
            if json {
                match format_parsed_json(&parsed) {
                    Ok(out) => println!("{}", out),
                    Err(e) => eprintln!("Output error: {}", e),
                }
            } else {
                print!("{}", format_parsed(&parsed));
            }
            ExitCode::SUCCESS
        }
        Command::Inspect => {
            let entries = match generate::parse_history(&settings.history, settings.parse) {
                Ok(entries) => entries,
                Err(e) => {
                    log.warn(&format!("Error reading history file: {e}"));
                    eprintln!("Error reading history file {}: {}", settings.history.display(), e);
                    return ExitCode::FAILURE;
                }
            };
            for (original, parsed) in entries {
                if json {
                    match format_inspection_json(&original, &parsed) {
                        Ok(out) => println!("{}", out),
                        Err(e) => eprintln!("Output error: {}", e),
                    }
                } else {
                    println!("{}", format_inspection(&original, &parsed));
                }
            }
            ExitCode::SUCCESS
        }
    }
}

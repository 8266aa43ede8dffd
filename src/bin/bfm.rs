/// Interactive flight model aero data console

use bfmaero::*;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

/// Command completer for the REPL
struct CommandCompleter {
    commands: Vec<&'static str>,
}

impl CommandCompleter {
    fn new() -> Self {
        Self {
            commands: vec![
                "alpha",
                "breakpoints",
                "exit",
                "help",
                "info",
                "insert-mach",
                "load",
                "mach",
                "open",
                "options",
                "quit",
                "save",
                "set-mul",
                "table",
            ],
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only complete the first word (command name)
        let line_to_cursor = &line[..pos];
        if line_to_cursor.contains(' ') {
            return Ok((pos, vec![]));
        }

        let prefix = line_to_cursor.to_lowercase();
        let matches: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// Get the path to the history file
fn history_path() -> Option<std::path::PathBuf> {
    dirs::home_dir().map(|mut p| {
        p.push(".bfm_history");
        p
    })
}

/// Install a stderr subscriber filtered by RUST_LOG (default: warn)
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loaded model and the path it came from
struct Session {
    model: FlightModel,
    path: String,
    changed: bool,
}

fn main() {
    init_logging();

    println!("=== BFM Aero ===");
    println!("Interactive console for basic flight model aero data.");
    println!("Type 'help' for available commands\n");

    let mut rl = match Editor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to create editor: {}", e);
            std::process::exit(1);
        }
    };
    rl.set_helper(Some(CommandCompleter::new()));

    if let Some(history_path) = history_path() {
        let _ = rl.load_history(&history_path);
    }

    let mut session: Option<Session> = None;

    // Open a file given on the command line
    if let Some(path) = std::env::args().nth(1) {
        session = open_session(&path);
    }

    loop {
        let input = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let _ = rl.add_history_entry(input);

        let parts: Vec<&str> = input.split_whitespace().collect();
        let command = parts[0].to_lowercase();

        match command.as_str() {
            "help" => print_help(),
            "quit" | "exit" => break,
            "open" | "load" => {
                if parts.len() < 2 {
                    println!("Usage: open <path>");
                    continue;
                }
                if let Some(s) = open_session(parts[1]) {
                    session = Some(s);
                }
            }
            "info" => match session {
                Some(ref s) => print_info(s),
                None => println!("No model loaded. Use 'open <path>' first."),
            },
            "options" => match session {
                Some(ref s) => print_options(&s.model.aerodata_options),
                None => println!("No model loaded."),
            },
            "breakpoints" | "mach" | "alpha" => match session {
                Some(ref s) => {
                    if command != "alpha" {
                        print_breakpoints("Mach", &s.model.mach_breakpoints);
                    }
                    if command != "mach" {
                        print_breakpoints("Alpha", &s.model.alpha_breakpoints);
                    }
                }
                None => println!("No model loaded."),
            },
            "table" => match session {
                Some(ref s) => {
                    if parts.len() < 2 {
                        println!("Usage: table <cl|cd|cy|tef-cl|tef-cd> [multiplied]");
                        continue;
                    }
                    let multiplied = parts.get(2).is_some_and(|p| p.starts_with("mul"));
                    print_table_command(&s.model, parts[1], multiplied);
                }
                None => println!("No model loaded."),
            },
            "insert-mach" => match session {
                Some(ref mut s) => {
                    let Some(value) = parts.get(1).and_then(|p| p.parse::<f64>().ok()) else {
                        println!("Usage: insert-mach <value>");
                        continue;
                    };
                    match s.model.insert_mach_breakpoint(value) {
                        Ok(true) => {
                            s.changed = true;
                            println!(
                                "Inserted Mach {} ({} breakpoints)",
                                value,
                                s.model.mach_breakpoints.len()
                            );
                        }
                        Ok(false) => println!("Mach {} already present", value),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                None => println!("No model loaded."),
            },
            "set-mul" => match session {
                Some(ref mut s) => {
                    if parts.len() < 3 {
                        println!("Usage: set-mul <cl|cd|cy> <value>");
                        continue;
                    }
                    let Some(coefficient) = Coefficient::from_str(parts[1]) else {
                        println!("Unknown table: {}", parts[1]);
                        continue;
                    };
                    match parts[2].parse::<f64>() {
                        Ok(value) => {
                            s.model.set_multiplier(coefficient, value);
                            s.changed = true;
                            println!("{} multiplier set to {}", coefficient, value);
                        }
                        Err(_) => println!("Invalid multiplier: {}", parts[2]),
                    }
                }
                None => println!("No model loaded."),
            },
            "save" => match session {
                Some(ref mut s) => {
                    let path = parts.get(1).map_or_else(|| s.path.clone(), |p| p.to_string());
                    match s.model.save(&path) {
                        Ok(()) => {
                            println!("Saved to: {}", path);
                            s.path = path;
                            s.changed = false;
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                }
                None => println!("No model loaded."),
            },
            _ => {
                println!("Unknown command: {}", command);
                println!("Type 'help' for available commands");
            }
        }
    }

    if let Some(history_path) = history_path() {
        let _ = rl.save_history(&history_path);
    }
    if session.as_ref().is_some_and(|s| s.changed) {
        println!("Warning: unsaved changes discarded.");
    }
    println!("Goodbye!");
}

fn open_session(path: &str) -> Option<Session> {
    match FlightModel::open(path) {
        Ok(model) => {
            println!("Opened: {}", path);
            Some(Session {
                model,
                path: path.to_string(),
                changed: false,
            })
        }
        Err(e) => {
            println!("Error: {}", e);
            None
        }
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  open <path>              - Open a flight model .dat file");
    println!("  info                     - Show a summary of the loaded aero data");
    println!("  options                  - Show aerodata options");
    println!("  breakpoints              - Show Mach and alpha breakpoints");
    println!("  mach | alpha             - Show Mach or alpha breakpoints only");
    println!("  table <name> [multiplied]");
    println!("                           - Show cl, cd, cy, tef-cl or tef-cd");
    println!("  insert-mach <value>      - Insert a Mach breakpoint (interpolated rows)");
    println!("  set-mul <cl|cd|cy> <v>   - Set a table multiplier");
    println!("  save [path]              - Save to path (default: the opened file)");
    println!("  help                     - Show this help");
    println!("  quit | exit              - Exit the program");
}

fn print_info(session: &Session) {
    let fm = &session.model;
    println!("File: {}{}", session.path, if session.changed { " (modified)" } else { "" });
    println!("Mach breakpoints:  {}", fm.mach_breakpoints.len());
    println!("Alpha breakpoints: {}", fm.alpha_breakpoints.len());
    for coefficient in Coefficient::ALL {
        println!(
            "{} table: {} x {} (multiplier {})",
            coefficient,
            fm.table(coefficient).len(),
            fm.table(coefficient).first().map_or(0, |r| r.len()),
            fm.multiplier(coefficient)
        );
    }
    if fm.aerodata_options.advanced_tef {
        println!(
            "TEF tables: {} x {}",
            fm.tef_mach_breakpoints.len(),
            fm.tef_alpha_breakpoints.len()
        );
    }
}

fn print_options(options: &AerodataOptions) {
    if !options.any() {
        println!("No aerodata options set.");
        return;
    }
    if options.advanced_tef {
        println!("AdvancedTEF");
    }
    if options.lef_included_in_cl {
        println!("LefIncludedinCL");
    }
}

fn print_breakpoints(label: &str, values: &[f64]) {
    let list: Vec<String> = values.iter().map(|v| format!("{}", v)).collect();
    println!("{} ({}): {}", label, values.len(), list.join(", "));
}

fn print_table_command(fm: &FlightModel, name: &str, multiplied: bool) {
    match name.to_lowercase().as_str() {
        "tef-cl" | "tef-cd" => {
            if !fm.aerodata_options.advanced_tef {
                println!("No advanced TEF data.");
                return;
            }
            let table = if name.eq_ignore_ascii_case("tef-cl") {
                &fm.tef_cl
            } else {
                &fm.tef_cd
            };
            print_table(table, &fm.tef_mach_breakpoints, &fm.tef_alpha_breakpoints);
        }
        other => match Coefficient::from_str(other) {
            Some(coefficient) => {
                let table = if multiplied {
                    fm.multiplied(coefficient)
                } else {
                    fm.table(coefficient).clone()
                };
                print_table(&table, &fm.mach_breakpoints, &fm.alpha_breakpoints);
            }
            None => println!("Unknown table: {}", name),
        },
    }
}

fn print_table(table: &Table, mach: &[f64], alpha: &[f64]) {
    print!("{:>8}", "M\\a");
    for a in alpha {
        print!(" {:>10.3}", a);
    }
    println!();
    println!("{}", "-".repeat(8 + alpha.len() * 11));

    for (row, m) in table.iter().zip(mach) {
        print!("{:>8.3}", m);
        for v in row {
            print!(" {:>10.5}", v);
        }
        println!();
    }
}

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;

use voicedit::action::{InputError, Keyboard};
use voicedit::config::Config;
use voicedit::executor::execute_sequence;
use voicedit::format;
use voicedit::grammar::Grammar;
use voicedit::input::{EnigoKeyboard, InputMethod};
use voicedit::keys::KeyChord;
use voicedit::mapping::{Piece, COMMAND_MAP};

#[derive(Parser)]
#[command(name = "voicedit")]
#[command(about = "Voice-command grammar for editor and terminal control")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read transcripts from stdin and inject the resolved keystrokes
    Run {
        /// Foreground executable to assume (context gating)
        #[arg(long)]
        app: Option<String>,
    },
    /// Dry run: print resolved actions without injecting anything
    Parse {
        /// Foreground executable to assume (context gating)
        #[arg(long)]
        app: Option<String>,
    },
    /// Print the command reference
    Commands,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::load_from(&cli.config);

    match cli.command {
        Command::Commands => {
            print_reference();
            Ok(())
        }
        Command::Parse { app } => {
            let mut kb = PrintKeyboard;
            recognition_loop(&config, app, &mut kb)
        }
        Command::Run { app } => {
            let method = InputMethod::from_str(&config.input.method);
            let mut kb = EnigoKeyboard::new(method, config.input.chord_delay_ms)?;
            recognition_loop(&config, app, &mut kb)
        }
    }
}

/// One line of stdin is one recognition event.
fn recognition_loop(config: &Config, app: Option<String>, kb: &mut dyn Keyboard) -> Result<()> {
    let foreground = app
        .or_else(|| config.context.editors.first().cloned())
        .unwrap_or_default();

    let grammar = Grammar::build(config)?;
    let mut handle = grammar.load();

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))?;
    }

    for line in io::stdin().lock().lines() {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match handle.recognize(&foreground, &line) {
            None => debug!("grammar inactive for '{foreground}', ignoring"),
            Some(Err(e)) => eprintln!("[voicedit] {e}"),
            Some(Ok(rec)) => {
                if let Err(e) = execute_sequence(kb, &rec.actions, rec.count) {
                    eprintln!("[voicedit] injection failed: {e}");
                }
            }
        }
    }

    // leave no modifier held if we were interrupted mid-phrase
    let _ = kb.release_modifiers();
    handle.unload();
    Ok(())
}

/// Dry-run backend: prints what would be injected.
struct PrintKeyboard;

impl Keyboard for PrintKeyboard {
    fn send_chord(&mut self, chord: &KeyChord) -> Result<(), InputError> {
        println!("  key  {chord}");
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> Result<(), InputError> {
        println!("  text {text:?}");
        Ok(())
    }

    fn release_modifiers(&mut self) -> Result<(), InputError> {
        println!("  release shift+ctrl");
        Ok(())
    }
}

fn print_reference() {
    println!("COMMANDS  (say several in a row; add '... <n> times' to repeat)\n");
    for entry in COMMAND_MAP {
        println!("  {:26} {}", entry.spoken, describe(entry.pieces));
    }
    println!("\nDICTATION FORMATTING\n");
    for (spoken, func) in format::FORMAT_RULES {
        println!("  {:26} e.g. \"hello world\" -> {}", spoken, func("hello world"));
    }
}

fn describe(pieces: &[Piece]) -> String {
    pieces
        .iter()
        .map(|piece| match piece {
            Piece::Keys(spec) => format!("keys {spec}"),
            Piece::Text(text) => format!("text {text:?}"),
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use strand_core::Story;
use strand_engine::{Engine, EngineConfig, OutputEvent, SaveState};

use crate::demo;

pub fn run(seed: u64, save_path: Option<&Path>, load_path: Option<&Path>) -> Result<(), String> {
    let mut engine = match load_path {
        Some(path) => {
            let json =
                fs::read_to_string(path).map_err(|e| format!("cannot read save file: {e}"))?;
            let save = SaveState::from_json(&json).map_err(|e| e.to_string())?;
            Engine::restore(demo::build(), &save).map_err(|e| e.to_string())?
        }
        None => {
            let mut engine = Engine::new(demo::build(), EngineConfig::default().with_seed(seed))
                .map_err(|e| e.to_string())?;
            engine.begin().map_err(|e| e.to_string())?;
            engine
        }
    };

    println!("  {} The Lantern Road", "Playing".bold());
    println!("  Pick a choice by number, or type a command.");
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let mut rendered = 0;
    render_new(&engine, &mut rendered);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "q" => break,
            "help" => print_help(),
            "stats" => print_stats(&engine),
            "save" => match save_path {
                Some(path) => {
                    write_save(&engine, path)?;
                    println!("  Saved to {}.\n", path.display());
                }
                None => println!("{}\n", "No save path given (use --save <path>).".yellow()),
            },
            _ => {
                let link = resolve_input(&engine, input);
                match link {
                    Ok(link) => match engine.process_link(&link) {
                        Ok(()) => render_new(&engine, &mut rendered),
                        Err(e) => println!("{}\n", e.to_string().yellow()),
                    },
                    Err(msg) => println!("{}\n", msg.yellow()),
                }
            }
        }
    }

    if let Some(path) = save_path {
        write_save(&engine, path)?;
        println!("  Saved to {}.", path.display());
    }

    Ok(())
}

/// Turn player input into a link: a number indexes the last choice list,
/// anything else passes through as a raw link.
fn resolve_input(engine: &Engine, input: &str) -> Result<String, String> {
    let Ok(number) = input.parse::<usize>() else {
        return Ok(input.to_string());
    };

    let Some(lines) = engine.transcript().last_choices() else {
        return Err("There are no choices to pick from.".to_string());
    };
    let Some(line) = number.checked_sub(1).and_then(|i| lines.get(i)) else {
        return Err(format!("There is no choice {number}."));
    };
    if !line.choosable {
        return Err(format!("\"{}\" is not available right now.", line.label));
    }
    Ok(line.id.clone())
}

fn write_save(engine: &Engine, path: &Path) -> Result<(), String> {
    let json = engine
        .save_state()
        .to_json()
        .map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write save file: {e}"))
}

/// Print transcript events added since the last render.
fn render_new(engine: &Engine, rendered: &mut usize) {
    let events = engine.transcript().events();
    for event in &events[*rendered..] {
        match event {
            OutputEvent::Heading(text) => println!("{}\n", text.bold()),
            OutputEvent::Paragraph(text) => println!("{text}\n"),
            OutputEvent::QualityChanged { name, new, .. } => {
                if let Some(text) = format_quality(engine.story(), name, *new) {
                    println!("{}\n", format!("  * {text}").dimmed());
                }
            }
            OutputEvent::Choices(lines) => {
                for (i, line) in lines.iter().enumerate() {
                    if line.choosable {
                        println!("  {} {}", format!("[{}]", i + 1).cyan(), line.label);
                    } else {
                        println!(
                            "  {} {} {}",
                            format!("[{}]", i + 1).dimmed(),
                            line.label.dimmed(),
                            "(unavailable)".dimmed()
                        );
                    }
                }
                println!();
            }
        }
    }
    *rendered = events.len();
}

/// Format one quality per its story definition. `None` when hidden.
fn format_quality(story: &Story, name: &str, value: f64) -> Option<String> {
    match story.quality_definition(name) {
        Some(def) => {
            let formatted = def.format.format(value)?;
            if formatted.is_empty() {
                Some(def.title.clone())
            } else {
                Some(format!("{}: {formatted}", def.title))
            }
        }
        None => Some(format!("{name}: {value}")),
    }
}

fn print_stats(engine: &Engine) {
    let story = engine.story();
    let mut lines: Vec<String> = engine
        .character()
        .qualities()
        .filter_map(|(name, value)| format_quality(story, name, value))
        .collect();
    lines.sort();

    if lines.is_empty() {
        println!("  Nothing to show yet.\n");
        return;
    }
    for line in lines {
        println!("  {line}");
    }
    println!();
}

fn print_help() {
    println!(
        "{}\n\
         <number> - pick a choice from the last list\n\
         <id> or <id>/<action> or ./<action> - follow a link directly\n\
         stats - show your qualities\n\
         save - write the save file (needs --save <path>)\n\
         help - show this help\n\
         quit - exit (writes the save file if --save was given)\n",
        "Commands".bold()
    );
}

//! REPL – interactive shell that stands in for the gaze camera.
//!
//! Supported slash-commands:
//!   /look x y     – one open-eye reading at (x, y)
//!   /blink x y    – a full blink gesture at (x, y)
//!   /path         – current depth path and section count
//!   /tree         – outline of the layout
//!   /start        – start the tracking session
//!   /end          – end the tracking session
//!   /help         – show this list
//!   /quit | /exit – end the session and exit

use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gazeos_types::{NavError, Point};

use crate::shell::{Shell, render_tree};

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Look(Point),
    Blink(Point),
    Path,
    Tree,
    Start,
    End,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line.  The error is the message shown to the user.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err("empty command".to_string());
        };
        let args: Vec<&str> = words.collect();
        let no_args = |cmd: ShellCommand| {
            if args.is_empty() {
                Ok(cmd)
            } else {
                Err(format!("{head} takes no arguments"))
            }
        };
        match head {
            "/look" => parse_point(head, &args).map(ShellCommand::Look),
            "/blink" => parse_point(head, &args).map(ShellCommand::Blink),
            "/path" => no_args(ShellCommand::Path),
            "/tree" => no_args(ShellCommand::Tree),
            "/start" => no_args(ShellCommand::Start),
            "/end" => no_args(ShellCommand::End),
            "/help" => no_args(ShellCommand::Help),
            "/quit" | "/exit" => no_args(ShellCommand::Quit),
            other => Err(format!("unknown command '{other}'")),
        }
    }
}

fn parse_point(head: &str, args: &[&str]) -> Result<Point, String> {
    let usage = || format!("usage: {head} <x> <y>");
    let [x, y] = args else {
        return Err(usage());
    };
    let x: f64 = x.parse().map_err(|_| usage())?;
    let y: f64 = y.parse().map_err(|_| usage())?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(format!("{head}: coordinates must be finite"));
    }
    Ok(Point::new(x, y))
}

/// Entry point for the interactive REPL.
///
/// `shutdown` is polled each iteration; when set the REPL exits cleanly.
pub fn run(shell: &Shell, shutdown: Arc<AtomicBool>) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        print!("{} ", "gazeos>".bold().cyan());
        stdout.flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("{}: {}", "Read error".red(), e);
                break;
            }
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match ShellCommand::parse(line) {
            Ok(command) => command,
            Err(msg) => {
                println!(
                    "{} {}. Type {} for available commands.",
                    "Error:".red(),
                    msg.yellow(),
                    "/help".bold()
                );
                continue;
            }
        };

        if command == ShellCommand::Quit {
            println!("{}", "Goodbye.".green());
            shutdown.store(true, Ordering::SeqCst);
            break;
        }
        if let Err(e) = execute(shell, command) {
            println!("{}: {}", "Error".red(), e);
        }
    }
}

fn execute(shell: &Shell, command: ShellCommand) -> Result<(), NavError> {
    match command {
        ShellCommand::Look(point) => shell.look(point)?,
        ShellCommand::Blink(point) => shell.blink(point)?,
        ShellCommand::Start => shell.start()?,
        ShellCommand::End => shell.end()?,
        ShellCommand::Path => {
            let snapshot = shell.snapshot()?;
            let state = if snapshot.running {
                "running".green()
            } else {
                "stopped".yellow()
            };
            println!("  session : {state}");
            println!("  path    : {}", format!("{:?}", snapshot.depth_path).bold());
            println!("  sections: {}", snapshot.section_count.to_string().bold());
            return Ok(());
        }
        ShellCommand::Tree => {
            print!("{}", render_tree(shell.tree()));
            return Ok(());
        }
        ShellCommand::Help => {
            cmd_help();
            return Ok(());
        }
        ShellCommand::Quit => return Ok(()),
    }
    // Wait until the driver has consumed what was just sent, so its output
    // lands before the next prompt.
    shell.snapshot().map(|_| ())
}

fn cmd_help() {
    println!();
    println!("{}", "gazeos Commands".bold().underline());
    println!("  {}   – gaze at (x, y); negative y leaves, negative x goes back", "/look x y".bold().cyan());
    println!("  {}  – blink at (x, y) to select", "/blink x y".bold().cyan());
    println!("  {}       – show depth path and section count", "/path".bold().cyan());
    println!("  {}       – show the layout", "/tree".bold().cyan());
    println!("  {}      – start tracking", "/start".bold().cyan());
    println!("  {}        – end tracking", "/end".bold().cyan());
    println!("  {} – exit the CLI", "/quit  /exit".bold().cyan());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_point_commands() {
        assert_eq!(
            ShellCommand::parse("/look 10 -2.5"),
            Ok(ShellCommand::Look(Point::new(10.0, -2.5)))
        );
        assert_eq!(
            ShellCommand::parse("  /blink 0 300 "),
            Ok(ShellCommand::Blink(Point::new(0.0, 300.0)))
        );
    }

    #[test]
    fn point_commands_need_two_numbers() {
        assert!(ShellCommand::parse("/look 10").is_err());
        assert!(ShellCommand::parse("/look 1 2 3").is_err());
        assert_eq!(
            ShellCommand::parse("/blink x 2"),
            Err("usage: /blink <x> <y>".to_string())
        );
    }

    #[test]
    fn point_commands_reject_non_finite_numbers() {
        for line in ["/look nan 10", "/blink 10 inf", "/look -inf 0"] {
            assert!(ShellCommand::parse(line).is_err(), "{line} accepted");
        }
    }

    #[test]
    fn plain_commands_reject_arguments() {
        assert_eq!(ShellCommand::parse("/path"), Ok(ShellCommand::Path));
        assert_eq!(ShellCommand::parse("/exit"), Ok(ShellCommand::Quit));
        assert!(ShellCommand::parse("/start now").is_err());
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            ShellCommand::parse("/settings"),
            Err("unknown command '/settings'".to_string())
        );
    }
}

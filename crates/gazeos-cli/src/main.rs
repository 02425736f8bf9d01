//! `gazeos-cli` – gazeos interactive host
//!
//! This binary drives a gaze-navigation session from the keyboard.  It:
//!
//! 1. Checks for `~/.gazeos/config.toml` (or the file named by `--config`);
//!    runs a **First-Run Wizard** when the file is absent.
//! 2. Builds the region tree from the configured layout and starts the
//!    session driver on a Tokio runtime.
//! 3. Drops the user into an **interactive REPL** with slash-commands
//!    (`/look`, `/blink`, `/path`, `/tree`, `/start`, `/end`, `/help`).
//! 4. Intercepts **Ctrl-C** to end the tracking session and exit.

mod config;
mod repl;
mod shell;

use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

use gazeos_runtime::SessionMessage;

use crate::config::Config;
use crate::shell::Shell;

#[derive(Parser, Debug)]
#[command(name = "gazeos", version, about = "Gaze-driven hierarchical navigation")]
struct Cli {
    /// Config file to use instead of `~/.gazeos/config.toml`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config::config_path)
    }
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG filters (default "info"); GAZEOS_LOG_FORMAT=json switches to
    // JSON lines.  User-facing output stays on println!.
    let _tracing = gazeos_runtime::init_tracing("gazeos");

    print_banner();

    let config_path = cli.config_path();
    let cfg = match config::load_from(&config_path) {
        Ok(None) => run_first_run_wizard(&config_path),
        Ok(Some(cfg)) => {
            println!(
                "  Config loaded from {}",
                config_path.display().to_string().bold()
            );
            cfg
        }
        Err(e) => {
            println!("{}: {}", "Config error".red(), e);
            println!("  Using default configuration.");
            Config::default()
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}: {}", "Failed to start async runtime".red(), e);
            std::process::exit(1);
        }
    };

    let shell = match Shell::launch(&cfg, runtime.handle().clone()) {
        Ok(shell) => shell,
        Err(e) => {
            println!("{}: {}", "Layout error".red(), e);
            println!("  Falling back to the built-in layout.");
            let fallback = Config {
                layout: Config::default().layout,
                ..cfg.clone()
            };
            match Shell::launch(&fallback, runtime.handle().clone()) {
                Ok(shell) => shell,
                Err(e) => {
                    eprintln!("{}: {}", "Cannot start session".red(), e);
                    std::process::exit(1);
                }
            }
        }
    };

    // ── Ctrl-C handler ────────────────────────────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    let tx = shell.sender();
    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        println!("{}", "⚠  Ctrl-C received – ending tracking session …".yellow().bold());
        if tx.send(SessionMessage::End).is_ok() {
            println!("{}", "  ✓ Session end requested.".green());
        }
        println!("{}", "  ✓ Exiting gazeos.".green());
        shutdown_clone.store(true, Ordering::SeqCst);
    }) {
        warn!(error = %e, "Failed to install Ctrl-C handler; graceful shutdown on Ctrl-C will not be available");
    }

    println!(
        "  Screen {}×{}, {} top-level section(s). Type {} to begin, {} for help.\n",
        cfg.screen_width,
        cfg.screen_height,
        shell.tree().section_count_at(&[]),
        "/start".bold().cyan(),
        "/help".bold().cyan()
    );

    repl::run(&shell, shutdown);
    shell.shutdown();
}

// ─────────────────────────────────────────────────────────────────────────────
// First-Run Wizard
// ─────────────────────────────────────────────────────────────────────────────

fn run_first_run_wizard(path: &Path) -> Config {
    println!();
    println!("{}", "  ╔══════════════════════════════════════╗".bold().cyan());
    println!("{}", "  ║       gazeos First-Run Wizard        ║".bold().cyan());
    println!("{}", "  ╚══════════════════════════════════════╝".bold().cyan());
    println!();
    println!("  No configuration found.  Let's describe your screen.\n");

    let mut cfg = Config::default();

    let width = prompt_line(
        &format!("  Screen width in points [{}]: ", cfg.screen_width),
        &cfg.screen_width.to_string(),
    );
    if let Ok(w) = width.trim().parse::<f64>()
        && w > 0.0
    {
        cfg.screen_width = w;
    }

    let height = prompt_line(
        &format!("  Screen height in points [{}]: ", cfg.screen_height),
        &cfg.screen_height.to_string(),
    );
    if let Ok(h) = height.trim().parse::<f64>()
        && h > 0.0
    {
        cfg.screen_height = h;
    }

    let mirror = prompt_line("  Mirror front-camera projection? [y/N]: ", "n");
    cfg.mirror_projection = matches!(mirror.trim(), "y" | "Y" | "yes");

    match config::save_to(&cfg, path) {
        Ok(()) => println!(
            "\n  {} Config saved to {}\n",
            "✓".green().bold(),
            path.display().to_string().bold()
        ),
        Err(e) => println!("{}: {}", "Error saving config".red(), e),
    }
    cfg
}

// ─────────────────────────────────────────────────────────────────────────────
// Banner
// ─────────────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("{}", r#"   ____                 ___  ____ "#.bold().cyan());
    println!("{}", r#"  / ___| __ _ _______  / _ \/ ___|"#.bold().cyan());
    println!("{}", r#" | |  _ / _` |_  / _ \| | | \___ \"#.bold().cyan());
    println!("{}", r#" | |_| | (_| |/ /  __/| |_| |___) |"#.bold().cyan());
    println!("{}", r#"  \____|\__,_/___\___| \___/|____/ "#.bold().cyan());
    println!();
    println!(
        "  {} {}",
        "gazeos".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  Gaze-driven hierarchical navigation");
    println!();
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn prompt_line(msg: &str, default: &str) -> String {
    use std::io::{BufRead, Write};
    print!("{}", msg);
    std::io::stdout().flush().ok();
    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line) {
        Ok(_) => {
            let t = line.trim().to_string();
            if t.is_empty() { default.to_string() } else { t }
        }
        Err(_) => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_flag_overrides_default_path() {
        let cli = Cli::try_parse_from(["gazeos", "--config", "/tmp/shop.toml"]).expect("parse");
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/shop.toml"));
    }

    #[test]
    fn default_path_is_home_config() {
        let cli = Cli::try_parse_from(["gazeos"]).expect("parse");
        assert!(cli.config.is_none());
        assert_eq!(cli.config_path(), config::config_path());
    }

    #[test]
    fn config_flag_needs_a_value() {
        assert!(Cli::try_parse_from(["gazeos", "--config"]).is_err());
    }
}

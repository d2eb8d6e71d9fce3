use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

use crate::cli::parser::Commands;
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
        set_rate,
        currency,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PAY SETTINGS ----
        if set_rate.is_some() || currency.is_some() {
            // start from the file so a --db override is not persisted
            let mut stored = Config::load()?;
            if let Some(rate) = set_rate {
                stored.set_rate(*rate)?;
            }
            if let Some(code) = currency {
                stored.set_currency(code)?;
            }
            stored.save()?;
            success(format!(
                "Pay settings saved: {} {}/h",
                stored.currency, stored.salary_rate
            ));
        }

        // ---- PRINT CONFIG ----
        if *print_config {
            let yaml = serde_yaml::to_string(cfg)
                .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", yaml);
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            edit(&path, editor.as_deref())?;
        }
    }

    Ok(())
}

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn edit(path: &Path, requested: Option<&str>) -> AppResult<()> {
    if !path.exists() {
        Config::default().save_to(path)?;
    }

    let fallback = default_editor();
    let first = requested.map(str::to_string).unwrap_or_else(|| fallback.clone());

    if run_editor(&first, path) {
        success(format!("Configuration file edited using '{}'", first));
        return Ok(());
    }

    if first != fallback {
        warning(format!(
            "Editor '{}' not available, falling back to '{}'",
            first, fallback
        ));
        if run_editor(&fallback, path) {
            success(format!("Configuration file edited using fallback '{}'", fallback));
            return Ok(());
        }
    }

    Err(AppError::Config(format!(
        "Failed to edit {} with '{}'",
        path.display(),
        fallback
    )))
}

fn run_editor(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

use crate::cli::commands::AppContext;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub async fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing timepay…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    // opening the store creates the schema
    let app = AppContext::open(cfg, None)?;

    println!("✅ Database initialized at {}", &db_path);
    app.audit(
        "init",
        "database",
        &format!("Database initialized at {}", &db_path),
    )
    .await;

    println!("🎉 timepay initialization completed!");
    Ok(())
}

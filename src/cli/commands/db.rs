use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        // every action needs the schema, so migrations always run
        if *migrate {
            info("Running migrations…");
        }
        init_db(&pool.conn)?;
        if *migrate {
            success("Migration completed.");
        }

        if *show_info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        if *check {
            integrity_check(&pool)?;
        }

        if *vacuum {
            info("Running VACUUM…");
            pool.conn.execute_batch("VACUUM;")?;
            success("Vacuum completed.");
        }
    }

    Ok(())
}

fn integrity_check(pool: &DbPool) -> AppResult<()> {
    info("Running integrity check…");

    let mut stmt = pool.conn.prepare("PRAGMA integrity_check;")?;
    let problems: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<_, _>>()?;

    if problems.len() == 1 && problems[0] == "ok" {
        success("Integrity check passed.");
    } else {
        error(format!("Integrity check failed: {}", problems.join("; ")));
    }
    Ok(())
}

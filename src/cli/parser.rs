use clap::{Parser, Subcommand};

/// Command-line interface definition for timepay
/// CLI application to plan work days and track paid hours with SQLite
#[derive(Parser)]
#[command(
    name = "timepay",
    version = env!("CARGO_PKG_VERSION"),
    about = "A work-day ledger: plan days, log worked hours and see weekly/monthly earnings",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(global = true, long = "today", hide = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, edit, pay settings)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            requires = "edit_config",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,

        #[arg(long = "set-rate", value_name = "RATE", help = "Set the hourly salary rate")]
        set_rate: Option<f64>,

        #[arg(long = "currency", value_name = "CODE", help = "Set the currency code (e.g. EUR)")]
        currency: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Plan a work day
    Schedule {
        /// Day to plan (YYYY-MM-DD)
        date: String,
    },

    /// Mark a planned day as worked
    Done {
        /// Day worked (YYYY-MM-DD)
        date: String,

        /// Clock-in time (HH:MM)
        #[arg(long = "in", help = "Clock-in time (HH:MM)")]
        start: String,

        /// Clock-out time (HH:MM)
        #[arg(long = "out", help = "Clock-out time (HH:MM)")]
        end: String,
    },

    /// Unplan a day
    Remove {
        /// Day to unplan (YYYY-MM-DD)
        date: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Set the note of a planned or worked day (empty text clears it)
    Note {
        /// Day (YYYY-MM-DD)
        date: String,

        /// Note text
        text: String,
    },

    /// Show the days of a month
    Show {
        #[arg(long = "month", value_name = "YYYY-MM", help = "Month to show (default: current)")]
        month: Option<String>,

        #[arg(long = "json", help = "Print the month as JSON documents keyed by date")]
        json: bool,
    },

    /// Weekly and monthly totals, and the next planned day
    Stats {
        #[arg(long = "month", value_name = "YYYY-MM", help = "Month for the monthly totals")]
        month: Option<String>,
    },
}

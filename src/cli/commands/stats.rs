use crate::cli::commands::AppContext;
use crate::cli::parser::Commands;
use crate::core::aggregation::WorkSummary;
use crate::core::window::week_window;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREY, RESET, YELLOW};
use crate::utils::formatting::{describe_days_until, format_hours, format_money};

pub async fn handle(cmd: &Commands, app: &AppContext) -> AppResult<()> {
    if let Commands::Stats { month } = cmd {
        let ym = app.month_or_current(month.as_deref())?;
        app.ledger.load_month(ym).await?;

        let week = week_window(app.ledger.today());
        let weekly = app.ledger.weekly_stats().await?;
        let monthly = app.ledger.monthly_stats().await?;
        let next = app.ledger.next_work_day().await?;

        header(format!(
            "Week {} → {}",
            week.start.format("%Y-%m-%d"),
            week.end.format("%Y-%m-%d")
        ));
        print_summary(&weekly);

        header(ym.first_day().format("%B %Y"));
        print_summary(&monthly);

        println!();
        match next {
            Some(n) => println!(
                "{}• Next work day:{} {}{}{} ({})",
                CYAN,
                RESET,
                YELLOW,
                n.date.format("%A %Y-%m-%d"),
                RESET,
                describe_days_until(n.days_until)
            ),
            None => println!("{}• Next work day:{} {}none planned{}", CYAN, RESET, GREY, RESET),
        }
    }
    Ok(())
}

fn print_summary(s: &WorkSummary) {
    println!("{}• Days worked:{} {}", CYAN, RESET, s.days_worked);
    println!("{}• Hours:{} {}", CYAN, RESET, format_hours(s.total_hours));
    println!(
        "{}• Earnings:{} {}",
        CYAN,
        RESET,
        format_money(s.total_earnings, &s.currency)
    );
}

//! timepay main entrypoint.

use timepay::run;
use timepay::ui::messages::error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error(e);
        std::process::exit(1);
    }
}

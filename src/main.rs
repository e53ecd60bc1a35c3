//! tt main entrypoint.

use timetracker::run;
use timetracker::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

//! Current week command.

use anyhow::Result;
use colored::Colorize;
use wardiya_core::controller::RosterController;
use wardiya_core::schedule::model::WeekFilter;

use crate::output;

/// Rows shown on each side of the current week.
const CONTEXT_ROWS: usize = 2;

pub fn execute(mut controller: RosterController) -> Result<()> {
    let events = controller.start();

    match controller.current_index() {
        Some(index) => {
            let from = index.saturating_sub(CONTEXT_ROWS);
            let to = (index + CONTEXT_ROWS + 1).min(controller.schedule().len());
            let rows: Vec<_> = controller.schedule().weeks()[from..to].iter().collect();
            output::print_schedule_table(&rows, Some(index), &WeekFilter::none());
        }
        None => {
            println!(
                "{} {} is outside the schedule.",
                "!".yellow().bold(),
                controller.today().format("%d/%m/%Y")
            );
        }
    }

    output::print_notifications(&events);
    Ok(())
}

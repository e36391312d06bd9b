//! Dashboard command.

use anyhow::Result;
use wardiya_core::controller::RosterController;

use crate::output;

pub fn execute(mut controller: RosterController) -> Result<()> {
    let events = controller.start();
    output::print_dashboard(&controller);
    output::print_notifications(&events);
    Ok(())
}

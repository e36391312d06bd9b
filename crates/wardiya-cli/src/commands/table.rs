//! Schedule table command.

use anyhow::Result;
use clap::Args;
use wardiya_core::controller::RosterController;
use wardiya_core::rotation::model::{Participant, Role};
use wardiya_core::schedule::model::WeekFilter;

use crate::output;

#[derive(Args)]
pub struct TableArgs {
    /// Only weeks involving this person (Ahmed, Yousef, Omar)
    #[arg(long)]
    pub person: Option<String>,

    /// With --person, only weeks where they hold this shift (first, second, third)
    #[arg(long, requires = "person")]
    pub role: Option<String>,
}

impl TableArgs {
    fn filter(&self) -> Result<WeekFilter> {
        let participant = self.person.as_deref().map(Participant::parse).transpose()?;
        let role = self.role.as_deref().map(Role::parse).transpose()?;
        Ok(WeekFilter { participant, role })
    }
}

pub fn execute(args: &TableArgs, mut controller: RosterController) -> Result<()> {
    let filter = args.filter()?;
    let events = controller.start();

    controller.set_filter(filter);
    output::print_schedule_table(&controller.filtered_weeks(), controller.current_index(), &filter);
    output::print_notifications(&events);
    Ok(())
}

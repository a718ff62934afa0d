use crate::context::Context;
use crate::event::{Event, EventHandled};
use anyhow::Result;

mod debug;
mod exclude;
mod excluded;
mod help;
mod ignore_bots;
mod reactions;
mod reload;
mod reset;
mod restore;
mod roll;
mod weapons;

#[serenity::async_trait]
pub trait Plugin: Sync + Send {
    /// Plugin name.  Used for debug
    fn name(&self) -> &'static str;
    /// Help message line.  None if no help message
    async fn usage(&self, ctx: &Context) -> Option<String>;
    /// Potentially handle event.  Returns:
    /// - Ok(EventHandled::Yes) if the event has been handled and no other plugin should attempt to
    /// handle it
    /// - Ok(EventHandled::No) if another plugin should attempt to handle the event
    /// - Err if an error occurred
    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled>;
}

/// Ordered list of available plugins
pub fn plugins() -> Vec<Box<dyn Plugin>> {
    use crate::plugin::*;

    vec![
        // Core bot operations
        Box::new(debug::Debug),
        Box::new(ignore_bots::IgnoreBots),
        Box::new(help::Help),
        Box::new(reload::Reload),
        // Weapon rolls
        Box::new(roll::Roll),
        Box::new(reactions::Reactions),
        // Roster upkeep
        Box::new(exclude::Exclude),
        Box::new(restore::Restore),
        Box::new(excluded::Excluded),
        Box::new(weapons::Weapons),
        Box::new(reset::Reset),
    ]
}

//! Runtime system trait

use crate::clock::FrameTick;
use crate::event_bus::EventBus;
use tinsel_core::Result;

/// A system that can be ticked by the frame loop
///
/// Systems are updated in registration order, once per frame. Events pushed
/// by the host are visible to every system until the loop drains them.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame
    fn update(&mut self, tick: &FrameTick, events: &mut EventBus) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}

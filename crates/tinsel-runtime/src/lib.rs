//! Tinsel Runtime - frame loop infrastructure
//!
//! Provides the building blocks every animated entity is driven by:
//! - `FrameClock` / `FrameTick`: elapsed and clamped delta time per frame
//! - `Scheduler` / `TaskHandle`: cancellable deferred and repeating tasks
//! - `ExperienceController`: idle → countdown → active → idle sequencing
//! - `SceneEvent` / `EventBus`: typed queue of user requests
//! - `RuntimeSystem`: trait for systems ticked by the frame loop

mod clock;
mod event;
mod event_bus;
mod experience;
mod system;
mod timer;

pub use clock::{FrameClock, FrameTick};
pub use event::SceneEvent;
pub use event_bus::EventBus;
pub use experience::{ExperienceController, ExperiencePhase, ExperienceSignal};
pub use system::RuntimeSystem;
pub use timer::{Scheduler, TaskHandle};

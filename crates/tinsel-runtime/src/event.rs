//! Scene event types

use serde::{Deserialize, Serialize};

/// User-originated requests routed through the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// Start button; acts as a close while the experience is active
    StartRequested,
    CloseRequested,
    /// Replay the ribbon wrap without leaving the experience
    ReplayRibbon,
    /// Show or hide the control panel
    TogglePanel,
    PointerEnter(usize),
    PointerLeave(usize),
    PointerClick(usize),
    /// Click that hit nothing but the background plane
    BackgroundClick,
}

impl SceneEvent {
    /// Requests aimed at the experience controller rather than a photo
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Self::StartRequested | Self::CloseRequested | Self::ReplayRibbon | Self::TogglePanel
        )
    }
}

//! Which photo ornament, if any, is pulled up in front of the camera

/// Single shared focus slot; at most one ornament is focused at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhotoFocus {
    active: Option<usize>,
}

impl PhotoFocus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Click on an ornament: focus it, or unfocus it if it already was
    pub fn toggle(&mut self, index: usize) {
        self.active = if self.active == Some(index) {
            None
        } else {
            Some(index)
        };
        log::debug!("[focus] active photo {:?}", self.active);
    }

    /// Background click
    pub fn dismiss(&mut self) {
        if self.active.take().is_some() {
            log::debug!("[focus] dismissed");
        }
    }

    /// Drop the focus if it points past a shrunken gallery
    pub fn retain_below(&mut self, len: usize) {
        if self.active.is_some_and(|i| i >= len) {
            self.active = None;
        }
    }
}

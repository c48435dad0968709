//! Per-frame queue of user requests.
//!
//! Hosts push whenever input arrives; the scene drains once per frame. A
//! control request that repeats the last control request already queued this
//! frame is dropped, so a double click on the start button inside one frame
//! cannot open and immediately close the experience. Pointer events are never
//! collapsed: enter, click and leave on the same photo all matter.

use crate::event::SceneEvent;

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<SceneEvent>,
    last_control: Option<SceneEvent>,
    collapsed: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event. Returns false when it was collapsed into a pending one.
    pub fn push(&mut self, event: SceneEvent) -> bool {
        if event.is_control() {
            if self.last_control == Some(event) {
                self.collapsed += 1;
                log::debug!("[events] collapsed repeated {:?}", event);
                return false;
            }
            self.last_control = Some(event);
        }
        self.queue.push(event);
        true
    }

    /// Everything queued this frame, in arrival order. Starts a new frame.
    pub fn drain(&mut self) -> Vec<SceneEvent> {
        self.last_control = None;
        std::mem::take(&mut self.queue)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Repeated control requests dropped since the bus was created
    pub fn collapsed(&self) -> usize {
        self.collapsed
    }
}

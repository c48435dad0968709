//! Background music gate. Playback itself belongs to the host.

use serde::Serialize;

/// What the host's audio player should do this frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MusicCommand {
    /// Start from time 0. `None` means the built-in track.
    Restart { source: Option<String> },
    Pause,
}

/// Music plays iff it is enabled and the experience is active
#[derive(Debug, Clone, Default)]
pub struct MusicGate {
    playing: bool,
    source: Option<String>,
}

impl MusicGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Feed the current inputs; returns a command only on a change
    pub fn update(&mut self, should_play: bool, source: Option<&str>) -> Option<MusicCommand> {
        let source_changed = self.source.as_deref() != source;
        if source_changed {
            self.source = source.map(str::to_owned);
        }

        match (self.playing, should_play) {
            (false, true) => {
                self.playing = true;
                log::debug!("[music] restart");
                Some(MusicCommand::Restart {
                    source: self.source.clone(),
                })
            }
            (true, false) => {
                self.playing = false;
                log::debug!("[music] pause");
                Some(MusicCommand::Pause)
            }
            (true, true) if source_changed => Some(MusicCommand::Restart {
                source: self.source.clone(),
            }),
            _ => None,
        }
    }
}

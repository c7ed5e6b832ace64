//! Playback commands accepted by the gateway.

use std::fmt;

/// One of the four transport commands, each mapping to exactly one provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackCommand {
    Play,
    Pause,
    Next,
    Previous,
}

impl PlaybackCommand {
    /// Fixed confirmation message returned to the widget on success.
    #[must_use]
    pub fn confirmation(self) -> &'static str {
        match self {
            Self::Play => "Playback started.",
            Self::Pause => "Playback paused.",
            Self::Next => "Skipped to the next song.",
            Self::Previous => "Went back to the previous song.",
        }
    }

    /// Only `play` insists on the target being the provider's active device.
    #[must_use]
    pub fn requires_active_device(self) -> bool {
        matches!(self, Self::Play)
    }
}

impl fmt::Display for PlaybackCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Next => "next",
            Self::Previous => "previous",
        })
    }
}

//! Background music. Playback is handed to the reader's preferred player
//! through the system opener, so there is no audio stack to carry.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub trait MusicPlayer {
    /// Begin playback. Implementations must not block the UI thread.
    fn play(&mut self) -> Result<()>;
}

/// Hands the configured track to the operating system's default player.
/// With no track configured this is a silent no-op.
pub struct SystemPlayer {
    source: Option<PathBuf>,
}

impl SystemPlayer {
    pub fn new(source: Option<PathBuf>) -> Self {
        Self { source }
    }
}

impl MusicPlayer for SystemPlayer {
    fn play(&mut self) -> Result<()> {
        let Some(source) = &self.source else {
            return Ok(());
        };
        open::that_detached(source)
            .with_context(|| format!("could not start playback of {}", source.display()))
    }
}

/// Playback that only counts how often it was asked to start.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingPlayer {
    started: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

#[cfg(test)]
impl RecordingPlayer {
    pub fn counter(&self) -> std::sync::Arc<std::sync::atomic::AtomicUsize> {
        std::sync::Arc::clone(&self.started)
    }
}

#[cfg(test)]
impl MusicPlayer for RecordingPlayer {
    fn play(&mut self) -> Result<()> {
        self.started.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}

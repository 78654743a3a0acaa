use std::time::Duration;

/// Cadence at which playing reels advance one frame.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(120);

/// A frame-sequence animation. Paused on construction; `advance` moves
/// one frame per call while playing. A non-looped reel reports its end
/// edge exactly once per playthrough and pauses itself there.
#[derive(Debug)]
pub struct Reel {
    frames: &'static [&'static str],
    frame: usize,
    playing: bool,
    looped: bool,
}

impl Reel {
    pub fn new(frames: &'static [&'static str]) -> Self {
        debug_assert!(!frames.is_empty());
        Self { frames, frame: 0, playing: false, looped: false }
    }

    pub fn looped(frames: &'static [&'static str]) -> Self {
        Self { looped: true, ..Self::new(frames) }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Back to the first frame. Does not change the playing flag.
    pub fn rewind(&mut self) {
        self.frame = 0;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current(&self) -> &'static str {
        self.frames[self.frame]
    }

    pub fn frame_index(&self) -> usize {
        self.frame
    }

    /// Advance one frame. Returns true exactly when a non-looped reel
    /// reaches its final frame.
    pub fn advance(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        if self.frame + 1 < self.frames.len() {
            self.frame += 1;
            return false;
        }
        if self.looped {
            self.frame = 0;
            return false;
        }
        self.playing = false;
        true
    }
}

//! Progressive text reveal.
//!
//! A [`Typewriter`] maps elapsed time to a prefix of its text. Text is cut on
//! `char` boundaries only, so multi-byte characters are never split.

use crate::constants::{TYPEWRITER_DELAY_MS, TYPEWRITER_DURATION_MS};
use crate::ticker::{AnimationClock, TickControl};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Trigger {
    /// Start counting from mount.
    #[default]
    Immediate,
    /// Wait for the first visibility event.
    OnVisible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypewriterPhase {
    Idle,
    Running,
    Done,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    // byte offset after each char; boundaries[n - 1] ends the n-char prefix
    boundaries: Vec<usize>,
    duration_ms: f64,
    start_delay_ms: f64,
    phase: TypewriterPhase,
    clock: AnimationClock,
    visible: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, duration_ms: f64, start_delay_ms: f64, trigger: Trigger) -> Self {
        let text = text.into();
        let boundaries = text.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
        let phase = match trigger {
            Trigger::Immediate => TypewriterPhase::Running,
            Trigger::OnVisible => TypewriterPhase::Idle,
        };
        Self {
            text,
            boundaries,
            duration_ms: duration_ms.max(0.0),
            start_delay_ms: start_delay_ms.max(0.0),
            phase,
            clock: AnimationClock::new(),
            visible: 0,
        }
    }

    pub fn with_defaults(text: impl Into<String>, trigger: Trigger) -> Self {
        Self::new(text, TYPEWRITER_DURATION_MS, TYPEWRITER_DELAY_MS, trigger)
    }

    /// Leave `Idle`. Later calls, or calls on an immediate typewriter, do
    /// nothing.
    pub fn trigger(&mut self) {
        if self.phase == TypewriterPhase::Idle {
            self.phase = TypewriterPhase::Running;
        }
    }

    /// Visible character count for a given time since the start timestamp.
    pub fn count_at(&self, since_start_ms: f64) -> usize {
        let progress = self.progress_at(since_start_ms);
        (progress * self.char_count() as f64).round() as usize
    }

    fn progress_at(&self, since_start_ms: f64) -> f64 {
        let t = (since_start_ms - self.start_delay_ms).max(0.0);
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (t / self.duration_ms).min(1.0)
    }

    /// Advance to `timestamp_ms`. The first running tick latches the start.
    pub fn tick(&mut self, timestamp_ms: f64) -> TickControl {
        match self.phase {
            TypewriterPhase::Idle => TickControl::Continue,
            TypewriterPhase::Done => TickControl::Stop,
            TypewriterPhase::Running => {
                let elapsed = self.clock.tick(timestamp_ms);
                let progress = self.progress_at(elapsed);
                // counts can only grow within one play-through
                self.visible = self.visible.max(self.count_at(elapsed));
                if progress >= 1.0 {
                    self.visible = self.char_count();
                    self.phase = TypewriterPhase::Done;
                    TickControl::Stop
                } else {
                    TickControl::Continue
                }
            }
        }
    }

    pub fn visible_text(&self) -> &str {
        match self.visible {
            0 => "",
            n => &self.text[..self.boundaries[n - 1]],
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn char_count(&self) -> usize {
        self.boundaries.len()
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

//! Rotating headline words.
//!
//! A [`RotationSchedule`] cycles through a list of words. Timeline, with
//! `n` words and `interval` per word:
//!
//! ```text
//! t = 0                        word 0 shown
//! t = interval + hold(0)       word 1 in, word 0 outgoing
//! t = ... + hold(1)            word 2 in, word 1 outgoing
//! ...
//! hold(i) = interval, plus `emphasis` for the last word
//! ```
//!
//! The first word gets an extra `interval` before the regular schedule
//! starts. An outgoing word stays on screen for [`OUTGOING_VISIBLE`] after
//! each switch so its exit animation can play. Letters animate in one after
//! another, `letter_delay` apart.
//!
//! [`RotatingText`] wraps a schedule with an elapsed clock that the host
//! advances with [`RotatingText::advance`].

use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1750);
pub const DEFAULT_LETTER_DELAY: Duration = Duration::from_millis(100);
pub const OUTGOING_VISIBLE: Duration = Duration::from_millis(500);

/// Non-breaking space, so a space letter keeps its width.
const NBSP: char = '\u{a0}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationSchedule {
    words: Vec<String>,
    pub interval: Duration,
    /// Extra hold on the last word.
    pub emphasis: Duration,
    pub letter_delay: Duration,
}

/// What is on screen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationFrame {
    pub current: usize,
    pub outgoing: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    pub glyph: char,
    /// Start offset of this letter's entry animation.
    pub delay: Duration,
}

impl RotationSchedule {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            interval: DEFAULT_INTERVAL,
            emphasis: Duration::ZERO,
            letter_delay: DEFAULT_LETTER_DELAY,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_emphasis(mut self, emphasis: Duration) -> Self {
        self.emphasis = emphasis;
        self
    }

    pub fn with_letter_delay(mut self, delay: Duration) -> Self {
        self.letter_delay = delay;
        self
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// How long word `index` stays before the next switch.
    pub fn hold(&self, index: usize) -> Duration {
        if index + 1 == self.words.len() {
            self.interval + self.emphasis
        } else {
            self.interval
        }
    }

    /// Time of the first switch.
    pub fn first_switch(&self) -> Duration {
        self.interval + self.hold(0)
    }

    /// Length of one full pass over every word once switching has begun.
    pub fn cycle(&self) -> Duration {
        (0..self.words.len()).map(|i| self.hold(i)).sum()
    }

    /// The words on screen at `elapsed`. `None` for an empty list.
    pub fn frame_at(&self, elapsed: Duration) -> Option<RotationFrame> {
        let count = self.words.len();
        if count == 0 {
            return None;
        }

        let first = self.first_switch();
        let cycle = self.cycle();
        if elapsed < first || cycle.is_zero() {
            return Some(RotationFrame {
                current: 0,
                outgoing: None,
            });
        }

        // Time since the most recent switch, walking forward from the
        // start of the current cycle.
        let into_cycle = nanos_rem(elapsed - first, cycle);
        let mut current = 1 % count;
        let mut since_switch = into_cycle;
        loop {
            let hold = self.hold(current);
            if since_switch < hold {
                break;
            }
            since_switch -= hold;
            current = (current + 1) % count;
        }

        let outgoing = (since_switch < OUTGOING_VISIBLE).then_some((current + count - 1) % count);
        Some(RotationFrame { current, outgoing })
    }

    /// Letters of word `index` with their staggered delays. Spaces become
    /// non-breaking spaces.
    pub fn letters(&self, index: usize) -> Vec<Letter> {
        let Some(word) = self.words.get(index) else {
            return Vec::new();
        };
        word.chars()
            .enumerate()
            .map(|(i, c)| Letter {
                glyph: if c == ' ' { NBSP } else { c },
                delay: self
                    .letter_delay
                    .saturating_mul(u32::try_from(i).unwrap_or(u32::MAX)),
            })
            .collect()
    }

    /// The longest word, used to reserve a stable width. The first one wins
    /// a tie.
    pub fn measurement_text(&self) -> &str {
        self.words
            .iter()
            .fold("", |longest, word| {
                if word.chars().count() > longest.chars().count() {
                    word
                } else {
                    longest
                }
            })
    }
}

/// A schedule plus the elapsed time driven by the host.
#[derive(Debug, Clone)]
pub struct RotatingText {
    schedule: RotationSchedule,
    elapsed: Duration,
}

impl RotatingText {
    pub fn new(schedule: RotationSchedule) -> Self {
        Self {
            schedule,
            elapsed: Duration::ZERO,
        }
    }

    pub fn schedule(&self) -> &RotationSchedule {
        &self.schedule
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn advance(&mut self, dt: Duration) -> Option<RotationFrame> {
        self.elapsed += dt;
        self.frame()
    }

    pub fn frame(&self) -> Option<RotationFrame> {
        self.schedule.frame_at(self.elapsed)
    }

    pub fn current_word(&self) -> Option<&str> {
        self.frame()
            .map(|f| self.schedule.words[f.current].as_str())
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

fn nanos_rem(value: Duration, modulus: Duration) -> Duration {
    let rem = value.as_nanos() % modulus.as_nanos();
    // rem < modulus, which came from a Duration
    Duration::from_nanos(rem as u64)
}

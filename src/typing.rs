//! Tagline that types a phrase, holds, deletes it and moves to the next one,
//! forever.

use crate::config::TypingConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    Deleting,
}

/// Result of one tick: what to show and how long until the next tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub next_delay_ms: u32,
}

#[derive(Clone, Debug)]
pub struct TypingEffect {
    words: Vec<Vec<char>>,
    word_index: usize,
    char_index: usize,
    phase: TypingPhase,
    timing: TypingConfig,
}

impl TypingEffect {
    /// `None` when the config has no non-empty words; an empty word could
    /// never reach its own length and would stall the cycle.
    pub fn new(config: &TypingConfig) -> Option<Self> {
        let words: Vec<Vec<char>> = config
            .words
            .iter()
            .filter(|w| !w.is_empty())
            .map(|w| w.chars().collect())
            .collect();
        if words.is_empty() {
            return None;
        }
        Some(Self {
            words,
            word_index: 0,
            char_index: 0,
            phase: TypingPhase::Typing,
            timing: config.clone(),
        })
    }

    pub fn start_delay_ms(&self) -> u32 {
        self.timing.start_delay_ms
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn tick(&mut self) -> TypingFrame {
        let word_len = self.words[self.word_index].len();
        match self.phase {
            TypingPhase::Typing => self.char_index = (self.char_index + 1).min(word_len),
            TypingPhase::Deleting => self.char_index = self.char_index.saturating_sub(1),
        }
        let text: String = self.words[self.word_index][..self.char_index].iter().collect();

        let next_delay_ms = match self.phase {
            TypingPhase::Typing if self.char_index == word_len => {
                self.phase = TypingPhase::Deleting;
                self.timing.hold_ms
            }
            TypingPhase::Typing => self.timing.type_ms,
            TypingPhase::Deleting if self.char_index == 0 => {
                self.phase = TypingPhase::Typing;
                self.word_index = (self.word_index + 1) % self.words.len();
                self.timing.next_word_ms
            }
            TypingPhase::Deleting => self.timing.delete_ms,
        };
        TypingFrame { text, next_delay_ms }
    }
}

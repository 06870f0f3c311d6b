//! Character input for the `,` instruction

use std::collections::VecDeque;

/// Supplies one character per prompt, or `None` when nothing is available
pub trait InputSource: Send {
    fn next_char(&mut self) -> Option<char>;
}

impl<T: InputSource + ?Sized> InputSource for Box<T> {
    fn next_char(&mut self) -> Option<char> {
        (**self).next_char()
    }
}

/// Input that never supplies anything; prompts leave the cell unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputSource for NoInput {
    fn next_char(&mut self) -> Option<char> {
        None
    }
}

/// Pre-filled input consumed front to back
#[derive(Debug, Default, Clone)]
pub struct QueuedInput {
    pending: VecDeque<char>,
}

impl QueuedInput {
    pub fn new(text: &str) -> Self {
        QueuedInput {
            pending: text.chars().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl InputSource for QueuedInput {
    fn next_char(&mut self) -> Option<char> {
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queued_input_drains_in_order() {
        let mut input = QueuedInput::new("ab");
        assert_eq!(input.next_char(), Some('a'));
        assert_eq!(input.remaining(), 1);
        assert_eq!(input.next_char(), Some('b'));
        assert_eq!(input.next_char(), None);
    }
}

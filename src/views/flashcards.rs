//! Flashcard viewer with its local navigation state.

use crate::backend::Flashcard;

/// Cursor and flip state for browsing a deck.
///
/// The deck itself is not stored; every call takes the current cards so the
/// viewer never shows a stale deck.
#[derive(Debug, Clone, Default)]
pub struct FlashcardViewer {
    current: usize,
    show_answer: bool,
}

impl FlashcardViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the card being shown, clamped to the deck.
    pub fn position(&self, cards: &[Flashcard]) -> Option<usize> {
        if cards.is_empty() {
            None
        } else {
            Some(self.current % cards.len())
        }
    }

    pub fn showing_answer(&self) -> bool {
        self.show_answer
    }

    /// Turn the current card over.
    pub fn flip(&mut self) {
        self.show_answer = !self.show_answer;
    }

    /// Advance to the next card, wrapping at the end. Shows the question side.
    pub fn next(&mut self, cards: &[Flashcard]) {
        if let Some(position) = self.position(cards) {
            self.current = (position + 1) % cards.len();
        }
        self.show_answer = false;
    }

    /// Go back one card, wrapping at the start. Shows the question side.
    pub fn prev(&mut self, cards: &[Flashcard]) {
        if let Some(position) = self.position(cards) {
            self.current = (position + cards.len() - 1) % cards.len();
        }
        self.show_answer = false;
    }

    /// Start over at the first card, e.g. when a new deck arrives.
    pub fn reset(&mut self) {
        self.current = 0;
        self.show_answer = false;
    }

    pub fn render(&self, cards: &[Flashcard]) -> String {
        let Some(position) = self.position(cards) else {
            return "No flashcards available.".to_string();
        };

        let card = &cards[position];
        let (side, text) = if self.show_answer {
            ("A", &card.answer)
        } else {
            ("Q", &card.question)
        };

        format!("Card {}/{}\n{}: {}", position + 1, cards.len(), side, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Vec<Flashcard> {
        vec![
            Flashcard::new("What owns a value?", "Exactly one variable"),
            Flashcard::new("What is a borrow?", "A reference"),
            Flashcard::new("What is a lifetime?", "A scope for references"),
        ]
    }

    #[test]
    fn test_empty_deck() {
        let viewer = FlashcardViewer::new();
        assert_eq!(viewer.render(&[]), "No flashcards available.");
        assert_eq!(viewer.position(&[]), None);
    }

    #[test]
    fn test_flip_shows_answer() {
        let cards = deck();
        let mut viewer = FlashcardViewer::new();
        assert_eq!(viewer.render(&cards), "Card 1/3\nQ: What owns a value?");

        viewer.flip();
        assert!(viewer.showing_answer());
        assert_eq!(viewer.render(&cards), "Card 1/3\nA: Exactly one variable");
    }

    #[test]
    fn test_navigation_wraps_and_hides_answer() {
        let cards = deck();
        let mut viewer = FlashcardViewer::new();

        viewer.prev(&cards);
        assert_eq!(viewer.position(&cards), Some(2));

        viewer.flip();
        viewer.next(&cards);
        assert_eq!(viewer.position(&cards), Some(0));
        assert!(!viewer.showing_answer());

        viewer.next(&cards);
        viewer.next(&cards);
        viewer.next(&cards);
        assert_eq!(viewer.position(&cards), Some(0));
    }

    #[test]
    fn test_smaller_deck_clamps_position() {
        let cards = deck();
        let mut viewer = FlashcardViewer::new();
        viewer.prev(&cards);

        let smaller = &cards[..2];
        assert_eq!(viewer.position(smaller), Some(0));

        viewer.reset();
        assert_eq!(viewer.position(&cards), Some(0));
    }
}

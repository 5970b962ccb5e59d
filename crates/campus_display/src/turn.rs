use campus_domain::{Card, ConversationTurn};

use crate::CardFormat;
use crate::color::palette;

/// A transcript entry with the cards rendered from its function results
/// indented underneath.
pub struct TurnFormat<'a> {
    turn: &'a ConversationTurn,
    cards: &'a [Card],
}

impl<'a> TurnFormat<'a> {
    pub fn new(turn: &'a ConversationTurn) -> Self {
        Self { turn, cards: &[] }
    }

    pub fn cards(mut self, cards: &'a [Card]) -> Self {
        self.cards = cards;
        self
    }

    pub fn format(&self) -> String {
        let speaker = if self.turn.is_user() {
            palette::accent("you")
        } else {
            palette::success("assistant")
        };

        let mut out = format!("{speaker} › {}", self.turn.content);
        for card in self.cards {
            out.push('\n');
            let body = CardFormat::new(card).format();
            let indented: Vec<String> = body
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        String::new()
                    } else {
                        format!("  {line}")
                    }
                })
                .collect();
            out.push_str(&indented.join("\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use campus_domain::{Posting, UserProfile};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_user_turn() {
        let fixture = ConversationTurn::user("find me a tutoring gig");

        let actual = strip_ansi_escapes::strip_str(TurnFormat::new(&fixture).format());

        assert_eq!(actual, "you › find me a tutoring gig");
    }

    #[test]
    fn test_assistant_turn_with_cards() {
        let fixture = ConversationTurn::assistant("Here is what I found.", None);
        let cards = vec![
            Card::PostingList(vec![Posting::default().id(1u64).title("Tutor")]),
            Card::UserProfile(UserProfile::default().name("Kim").role(campus_domain::Role::Admin)),
        ];

        let actual =
            strip_ansi_escapes::strip_str(TurnFormat::new(&fixture).cards(&cards).format());

        let expected = [
            "assistant › Here is what I found.",
            "  Postings (1)",
            "    #1 Tutor · - · - · apply by -",
            "  Kim (Admin)",
            "    Email: -",
            "  → /mypage",
        ]
        .join("\n");
        assert_eq!(actual, expected);
    }
}

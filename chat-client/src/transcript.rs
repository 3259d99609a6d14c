use ai_llm_service::ConversationTurn;

/// Caller-owned conversation history, oldest turn first.
///
/// The relay never stores this; a snapshot (`turns()`) goes out with every
/// request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Records a completed exchange: the user's query, then the answer.
    pub fn record_exchange(&mut self, query: impl Into<String>, answer: impl Into<String>) {
        self.append(ConversationTurn::user(query));
        self.append(ConversationTurn::model(answer));
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of questions asked so far.
    pub fn user_turn_count(&self) -> usize {
        self.turns.iter().filter(|t| t.is_user()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchanges_append_in_order() {
        let mut t = Transcript::new();
        t.record_exchange("q1", "a1");
        t.record_exchange("q2", "a2");

        let texts: Vec<&str> = t.turns().iter().map(|turn| turn.text.as_str()).collect();
        assert_eq!(texts, ["q1", "a1", "q2", "a2"]);
        assert_eq!(t.turns()[1].role, "model");
        assert_eq!(t.user_turn_count(), 2);
    }

    #[test]
    fn clear_empties_history() {
        let mut t = Transcript::new();
        t.append(ConversationTurn::user("hello"));
        assert_eq!(t.len(), 1);

        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.user_turn_count(), 0);
    }
}

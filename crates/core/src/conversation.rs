//! Conversation-related types.

use popchat_model::Message;

/// Represents a conversation.
///
/// Messages are kept in creation order. The sequence only grows, except
/// when it's cleared or replaced as a whole.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Conversation {
    pub(crate) items: Vec<Message>,
}

impl Conversation {
    /// Creates a conversation from existing messages.
    #[inline]
    pub fn from_messages(items: Vec<Message>) -> Self {
        Self { items }
    }

    /// Returns all the messages.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.items
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns at most `max_len` most recent messages, oldest first.
    ///
    /// This is what gets transmitted with a request. The conversation
    /// itself is left untouched.
    #[inline]
    pub fn tail(&self, max_len: usize) -> &[Message] {
        let start = self.items.len().saturating_sub(max_len);
        &self.items[start..]
    }

    #[inline]
    pub(crate) fn push(&mut self, msg: Message) {
        self.items.push(msg);
    }

    #[inline]
    pub(crate) fn replace(&mut self, items: Vec<Message>) {
        self.items = items;
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Conversation {
        Conversation::from_messages(
            (0..count).map(|i| Message::user(format!("#{i}"))).collect(),
        )
    }

    #[test]
    fn test_tail_truncates_from_the_front() {
        let conversation = numbered(6);
        let tail = conversation.tail(4);
        let contents: Vec<_> = tail.iter().map(|m| &m.content[..]).collect();
        assert_eq!(contents, ["#2", "#3", "#4", "#5"]);
        assert_eq!(conversation.len(), 6);
    }

    #[test]
    fn test_tail_of_short_conversation() {
        let conversation = numbered(3);
        assert_eq!(conversation.tail(10), conversation.messages());
        assert_eq!(conversation.tail(3), conversation.messages());
    }

    #[test]
    fn test_tail_zero() {
        let conversation = numbered(3);
        assert!(conversation.tail(0).is_empty());
        assert!(Conversation::default().tail(10).is_empty());
    }
}

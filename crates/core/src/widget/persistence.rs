use popchat_model::Message;

use super::ChatWidget;
use crate::store::STORAGE_KEY;

impl ChatWidget {
    /// Writes the full conversation to the store.
    ///
    /// Failures are logged and otherwise ignored, the conversation keeps
    /// working in memory.
    pub fn save(&self) {
        let serialized = {
            let conversation = self.state.conversation.borrow();
            serde_json::to_string(conversation.messages())
        };
        let serialized = match serialized {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!("failed to serialize conversation: {err}");
                return;
            }
        };
        if let Err(err) = self.state.store.set(STORAGE_KEY, &serialized) {
            warn!("failed to save conversation: {err}");
        }
    }

    /// Restores the stored conversation, replacing the one in memory, and
    /// displays every restored message.
    ///
    /// Returns `false` when nothing usable was stored. A stored entry that
    /// can't be parsed is removed.
    pub fn load(&self) -> bool {
        let store = &self.state.store;
        let raw = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(err) => {
                warn!("failed to load conversation: {err}");
                return false;
            }
        };

        let messages = match serde_json::from_str::<Vec<Message>>(&raw) {
            Ok(messages) => messages,
            Err(err) => {
                warn!("discarding corrupted conversation: {err}");
                if let Err(err) = store.remove(STORAGE_KEY) {
                    warn!("failed to remove corrupted conversation: {err}");
                }
                return false;
            }
        };

        self.state.conversation.borrow_mut().replace(messages);
        self.display_conversation();
        true
    }

    /// Forgets the conversation, both in memory and in the store, and
    /// starts over with the welcome message.
    pub fn clear(&self) {
        self.state.conversation.borrow_mut().clear();
        if let Err(err) = self.state.store.remove(STORAGE_KEY) {
            warn!("failed to remove stored conversation: {err}");
        }
        self.state.view.clear_messages();
        self.insert_welcome_message();
    }
}

//! Prompt templates for the discussion flow

use crate::role::entities::Role;
use crate::session::message::Message;

/// Builds every prompt a discussion run sends
pub trait PromptAssembler: Send + Sync {
    /// Opening discussion prompt for round 1
    fn opening(&self, narrative_state: &str, initiator: &Role, topic: &str) -> String;

    /// Prompt for one role's turn, scoped to that role
    fn role_scoped(&self, role: &Role, discussion_prompt: &str) -> String;

    /// Discussion prompt for the next speaker, derived from the latest response
    fn follow_up(&self, latest_response: &str) -> String;

    /// Prefix a prompt with the session's bounded history
    fn grounded(&self, context: &[Message], prompt: &str) -> String;

    /// Prompt asking the final editor for the draft
    fn finalize(&self, narrative_state: &str) -> String;
}

/// Plain-text templates
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPromptAssembler;

impl PromptAssembler for DefaultPromptAssembler {
    fn opening(&self, narrative_state: &str, initiator: &Role, topic: &str) -> String {
        format!(
            "Current story state: {}\n\
             Discussion started by: {}\n\
             Topic: {}\n\
             Please share your professional opinions in turn:",
            narrative_state, initiator.name, topic
        )
    }

    fn role_scoped(&self, role: &Role, discussion_prompt: &str) -> String {
        format!(
            "You are now acting as: {}\n\
             Your responsibility: {}\n\
             {}",
            role.name, role.description, discussion_prompt
        )
    }

    fn follow_up(&self, latest_response: &str) -> String {
        format!(
            "Latest opinion: {}\nNext speaker, please continue:",
            latest_response
        )
    }

    fn grounded(&self, context: &[Message], prompt: &str) -> String {
        if context.is_empty() {
            return prompt.to_string();
        }

        let mut grounded = String::new();
        for message in context {
            grounded.push_str(&format!("{}: {}\n", message.role, message.content));
        }
        grounded.push_str(&format!("user: {}\nassistant:", prompt));
        grounded
    }

    fn finalize(&self, narrative_state: &str) -> String {
        format!(
            "Please integrate the following discussion into a final draft:\n{}",
            narrative_state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::message::MessageRole;
    use chrono::Utc;

    fn writer() -> Role {
        Role::new("writer", "Writer", "m", "creative").with_description("Writes scenes")
    }

    #[test]
    fn test_opening_mentions_state_initiator_and_topic() {
        let prompt = DefaultPromptAssembler.opening("a quiet town", &writer(), "opening scene");
        assert!(prompt.contains("a quiet town"));
        assert!(prompt.contains("Writer"));
        assert!(prompt.contains("opening scene"));
    }

    #[test]
    fn test_role_scoped_embeds_description_and_discussion() {
        let prompt = DefaultPromptAssembler.role_scoped(&writer(), "Topic: x");
        assert!(prompt.starts_with("You are now acting as: Writer"));
        assert!(prompt.contains("Writes scenes"));
        assert!(prompt.ends_with("Topic: x"));
    }

    #[test]
    fn test_follow_up_references_latest_response() {
        let prompt = DefaultPromptAssembler.follow_up("make it rain");
        assert!(prompt.contains("make it rain"));
    }

    #[test]
    fn test_grounded_without_context_is_unchanged() {
        assert_eq!(DefaultPromptAssembler.grounded(&[], "hello"), "hello");
    }

    #[test]
    fn test_grounded_prefixes_history() {
        let context = vec![
            Message::new("s1", MessageRole::User, "q1", Utc::now()),
            Message::new("s1", MessageRole::Assistant, "a1", Utc::now()),
        ];
        let prompt = DefaultPromptAssembler.grounded(&context, "q2");
        assert_eq!(prompt, "user: q1\nassistant: a1\nuser: q2\nassistant:");
    }

    #[test]
    fn test_finalize_includes_state() {
        let prompt = DefaultPromptAssembler.finalize("Round 1: writer");
        assert!(prompt.contains("Round 1: writer"));
    }
}

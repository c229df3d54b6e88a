//! convo-utils - formatting, template and statistics helpers for chat UIs
//!
//! The library has two main parts: message templates with `{{ variable }}`
//! placeholders filled from conversation data, and quantile estimation over
//! numeric samples. Smaller display helpers and idle timers round it out.
//!
//! # Example
//!
//! ```rust
//! use convo_utils::{render_message, Conversation, Person};
//!
//! let conversation = Conversation::new(1i64)
//!     .with_sender(Person::named("jane doe"))
//!     .with_assignee(Person::named("sam"));
//!
//! let text = render_message("Hi {{contact.first_name}}, {{agent.name}} here", &conversation, None);
//! assert_eq!(text, "Hi Jane, Sam here");
//! ```

pub mod error;
pub mod format;
pub mod settings;
pub mod stats;
pub mod telemetry;
pub mod template;
pub mod timer;

pub use error::Error;
pub use settings::{Settings, SettingsError};
pub use stats::{quantile, quantile_intervals, QuantileError, SortedSamples};
pub use template::{
    build_variable_map, find_undefined_variables, substitute, Contact, Conversation, Person,
    UndefinedVariable, Value, VariableMap,
};

/// Fill a message template from a conversation and optional contact
///
/// # Example
///
/// ```rust
/// use convo_utils::{render_message, Contact, Conversation};
///
/// let conversation = Conversation::new(99i64);
/// let contact = Contact::new().with_attribute("plan", "pro");
///
/// let text = render_message(
///     "#{{conversation.id}} on {{contact.custom_attribute.plan}}",
///     &conversation,
///     Some(&contact),
/// );
/// assert_eq!(text, "#99 on pro");
/// ```
pub fn render_message(message: &str, conversation: &Conversation, contact: Option<&Contact>) -> String {
    let variables = build_variable_map(conversation, contact);
    substitute(message, &variables)
}

/// Placeholders in a message template that the conversation cannot fill
///
/// Placeholders inside fenced code blocks are ignored.
pub fn check_message(
    message: &str,
    conversation: &Conversation,
    contact: Option<&Contact>,
) -> Vec<UndefinedVariable> {
    let variables = build_variable_map(conversation, contact);
    template::undefined_placeholders(message, &variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_message() {
        let conversation = Conversation::new(5i64).with_sender(Person::named("ann lee"));
        assert_eq!(
            render_message("{{contact.last_name}} #{{conversation.id}}", &conversation, None),
            "Lee #5"
        );
    }

    #[test]
    fn test_check_message_reports_missing_email() {
        let conversation = Conversation::new(5i64);
        let missing = check_message("Mail {{contact.email}} or {{agent.email}}", &conversation, None);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name, "contact.email");
    }

    #[test]
    fn test_check_message_ignores_code() {
        let conversation = Conversation::new(5i64);
        let missing = check_message("```{{contact.email}}```", &conversation, None);
        assert!(missing.is_empty());
    }
}

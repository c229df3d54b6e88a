//! Message template variables
//!
//! Message templates reference variables with `{{ name }}` placeholders.
//! This module builds the variable map for a conversation, substitutes
//! variables into a message and reports placeholders with no value.
//!
//! # Example
//!
//! ```rust
//! use convo_utils::template::{build_variable_map, substitute, Conversation, Person};
//!
//! let conversation = Conversation::new(7i64).with_sender(Person::named("jane doe"));
//! let variables = build_variable_map(&conversation, None);
//!
//! assert_eq!(substitute("Hi {{contact.first_name}}", &variables), "Hi Jane");
//! ```

mod diagnostic;
mod engine;
pub mod lexer;
mod records;
mod variables;

pub use diagnostic::UndefinedVariable;
pub use engine::{
    build_variable_map, capitalize_name, find_undefined_variables, first_name, last_name,
    substitute, substitute_optional, undefined_placeholders,
};
pub use lexer::{placeholders, strip_code_blocks, Span};
pub use records::{Contact, Conversation, ConversationMeta, Person};
pub use variables::{Value, VariableMap};

//! Variable map construction, substitution and undefined-variable detection

use tracing::{debug, trace};

use super::diagnostic::UndefinedVariable;
use super::lexer::{placeholders, strip_code_blocks};
use super::records::{Contact, Conversation, Person};
use super::variables::{Value, VariableMap};

/// Uppercase the first character of every word, leaving the rest untouched
///
/// A word starts at the beginning of the string or right after whitespace.
/// This is not title-casing: `mcDONALD` becomes `McDONALD`.
pub fn capitalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_boundary = true;
    for c in name.chars() {
        if at_boundary && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = c.is_whitespace();
    }
    out
}

fn name_of(person: Option<&Person>) -> &str {
    person.and_then(|p| p.name.as_deref()).unwrap_or("")
}

/// Capitalized first token of a person's name, empty when unnamed
pub fn first_name(person: Option<&Person>) -> String {
    let first = name_of(person).split_whitespace().next().unwrap_or("");
    capitalize_name(first)
}

/// Capitalized last token of a person's name
///
/// Empty unless the name has more than one token.
pub fn last_name(person: Option<&Person>) -> String {
    let tokens: Vec<&str> = name_of(person).split_whitespace().collect();
    match tokens.as_slice() {
        [_, .., last] => capitalize_name(last),
        _ => String::new(),
    }
}

fn standard_variables(conversation: &Conversation) -> VariableMap {
    let sender = conversation.meta.sender.as_ref();
    let assignee = conversation.meta.assignee.as_ref();

    let mut vars = VariableMap::new();
    vars.insert("contact.name", capitalize_name(name_of(sender)));
    vars.insert("contact.first_name", first_name(sender));
    vars.insert("contact.last_name", last_name(sender));
    vars.insert_optional(
        "contact.email",
        sender.and_then(|s| s.email.clone()).map(Value::Text),
    );
    vars.insert_optional(
        "contact.phone",
        sender.and_then(|s| s.phone_number.clone()).map(Value::Text),
    );
    vars.insert_optional("contact.id", sender.and_then(|s| s.id.clone()));
    vars.insert("conversation.id", conversation.id.clone());
    vars.insert("agent.name", capitalize_name(name_of(assignee)));
    vars.insert("agent.first_name", first_name(assignee));
    vars.insert("agent.last_name", last_name(assignee));
    // Unlike contact.email, a missing agent email is defined but empty.
    vars.insert(
        "agent.email",
        assignee.and_then(|a| a.email.clone()).unwrap_or_default(),
    );
    vars
}

/// Build the variables available to message templates
///
/// Standard variables come first, then conversation custom attributes as
/// `conversation.custom_attribute.<key>`, then contact custom attributes as
/// `contact.custom_attribute.<key>`. Later entries win on identical keys.
pub fn build_variable_map(conversation: &Conversation, contact: Option<&Contact>) -> VariableMap {
    let mut vars = standard_variables(conversation);

    let conversation_attributes: VariableMap = conversation
        .custom_attributes
        .iter()
        .map(|(key, value)| (format!("conversation.custom_attribute.{}", key), value.clone()))
        .collect();
    vars.merge(conversation_attributes);

    if let Some(contact) = contact {
        let contact_attributes: VariableMap = contact
            .custom_attributes
            .iter()
            .map(|(key, value)| (format!("contact.custom_attribute.{}", key), value.clone()))
            .collect();
        vars.merge(contact_attributes);
    }

    debug!(count = vars.len(), "built message variables");
    vars
}

/// Replace every `{{ name }}` placeholder in a message
///
/// A placeholder is replaced by the value of its lowercased, trimmed name
/// when the name (as written or lowercased) holds a truthy value, and by an
/// empty string otherwise. Code blocks are not treated specially here.
pub fn substitute(message: &str, variables: &VariableMap) -> String {
    let mut out = String::with_capacity(message.len());
    let mut last = 0;

    for (raw, span) in placeholders(message) {
        out.push_str(&message[last..span.start]);
        last = span.end;

        let name = raw.trim();
        let key = name.to_lowercase();
        if variables.is_truthy(name) || variables.is_truthy(&key) {
            trace!(name, "substituting variable");
            out.push_str(&variables.render(&key));
        } else {
            trace!(name, "dropping unset variable");
        }
    }

    out.push_str(&message[last..]);
    out
}

/// [`substitute`] for a message that may be missing
pub fn substitute_optional(message: Option<&str>, variables: &VariableMap) -> Option<String> {
    message.map(|m| substitute(m, variables))
}

/// Placeholders outside code blocks whose variable is undefined, with spans
///
/// Spans point into the original message. Duplicates are kept in order of
/// appearance. Variables holding `0`, `""` or null are defined.
pub fn undefined_placeholders(message: &str, variables: &VariableMap) -> Vec<UndefinedVariable> {
    let stripped = strip_code_blocks(message);
    placeholders(&stripped.text)
        .filter_map(|(raw, span)| {
            let name = raw.trim();
            if variables.is_defined(name) {
                None
            } else {
                Some(UndefinedVariable::new(name, stripped.original_span(&span)))
            }
        })
        .collect()
}

/// Names of undefined variables referenced outside code blocks
pub fn find_undefined_variables(message: &str, variables: &VariableMap) -> Vec<String> {
    undefined_placeholders(message, variables)
        .into_iter()
        .map(|undefined| undefined.name)
        .collect()
}

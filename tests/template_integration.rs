//! Integration tests for message templates built from conversation records

use convo_utils::template::{
    build_variable_map, find_undefined_variables, substitute, undefined_placeholders,
};
use convo_utils::{check_message, render_message, Contact, Conversation, Value};
use pretty_assertions::assert_eq;

fn records() -> (Conversation, Contact) {
    let conversation = Conversation::from_json(include_str!("fixtures/conversation.json"))
        .expect("Should parse conversation");
    let contact =
        Contact::from_json(include_str!("fixtures/contact.json")).expect("Should parse contact");
    (conversation, contact)
}

#[test]
fn test_variables_from_fixture() {
    let (conversation, contact) = records();
    let vars = build_variable_map(&conversation, Some(&contact));

    assert_eq!(vars.render("contact.name"), "Jane Van Doe");
    assert_eq!(vars.render("contact.first_name"), "Jane");
    assert_eq!(vars.render("contact.last_name"), "Doe");
    assert_eq!(vars.render("contact.id"), "311");
    assert_eq!(vars.render("conversation.id"), "1042");
    assert_eq!(vars.render("agent.name"), "Sam");
    assert_eq!(vars.render("agent.last_name"), "");
    assert_eq!(vars.get("agent.email"), Some(&Value::from("")));
    assert_eq!(
        vars.get("conversation.custom_attribute.priority"),
        Some(&Value::Number(0.0))
    );
    assert_eq!(vars.get("contact.custom_attribute.referrer"), Some(&Value::Null));
}

#[test]
fn test_render_fixture_message() {
    let (conversation, contact) = records();
    let rendered = render_message(include_str!("fixtures/reply.md"), &conversation, Some(&contact));

    insta::assert_snapshot!(rendered.trim_end(), @r###"
    Hi Jane,

    Your order A-778 (enterprise, 25 seats) is with Sam.
    To look it up yourself run:

    ```
    orders show  --verbose
    ```

    Reply to  or ask .
    "###);
}

#[test]
fn test_check_fixture_message() {
    let (conversation, contact) = records();
    let message = include_str!("fixtures/reply.md");
    let missing = check_message(message, &conversation, Some(&contact));

    let names: Vec<&str> = missing.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["contact.custom_attribute.manager"]);
    assert_eq!(
        &message[missing[0].span.clone()],
        "{{ contact.custom_attribute.manager }}"
    );
}

#[test]
fn test_falsy_attributes_are_defined_but_not_rendered() {
    let (conversation, contact) = records();
    let vars = build_variable_map(&conversation, Some(&contact));
    let message = "[{{conversation.custom_attribute.priority}}][{{conversation.custom_attribute.escalated}}][{{contact.custom_attribute.referrer}}]";

    assert_eq!(substitute(message, &vars), "[][][]");
    assert!(find_undefined_variables(message, &vars).is_empty());
}

#[test]
fn test_missing_contact_record() {
    let (conversation, _) = records();
    let vars = build_variable_map(&conversation, None);
    assert_eq!(
        find_undefined_variables("{{contact.custom_attribute.plan}}", &vars),
        vec!["contact.custom_attribute.plan"]
    );
}

#[test]
fn test_documented_examples() {
    let empty = convo_utils::VariableMap::new();
    assert_eq!(
        find_undefined_variables("Hello {{contact.name}}", &empty),
        vec!["contact.name"]
    );
    assert!(find_undefined_variables("```{{x}}```", &empty).is_empty());

    let conversation = Conversation::new(1i64).with_sender(convo_utils::Person::named("jane doe"));
    let vars = build_variable_map(&conversation, None);
    assert_eq!(vars.render("contact.name"), "Jane Doe");
    assert_eq!(vars.render("contact.first_name"), "Jane");
    assert_eq!(vars.render("contact.last_name"), "Doe");

    let ann = convo_utils::VariableMap::from([("contact.name", "Ann")]);
    assert_eq!(substitute("Hi {{CONTACT.NAME}}", &ann), "Hi Ann");
}

#[test]
fn test_diagnostic_points_at_placeholder() {
    let (conversation, contact) = records();
    let message = include_str!("fixtures/reply.md");
    let missing = undefined_placeholders(
        message,
        &build_variable_map(&conversation, Some(&contact)),
    );
    let report = missing[0].report(message, "reply.md", false);
    assert!(report.contains("undefined variable 'contact.custom_attribute.manager'"));
    assert!(report.contains("reply.md"));
}

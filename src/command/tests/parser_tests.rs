//! Tests for the invocation parser.

use crate::command::domain::{CommandDomainError, ParsedInvocation};
use rstest::rstest;

#[rstest]
fn bare_command_has_no_arguments() {
    let parsed = ParsedInvocation::parse("  /Hello  ").expect("parses");
    assert_eq!(parsed.command(), "hello");
    assert!(parsed.arguments().is_empty());
}

#[rstest]
#[case(r#"/send text="hello there""#, "hello there")]
#[case("/send text='hello there'", "hello there")]
#[case(r#"/send text="say \"hi\"""#, r#"say "hi""#)]
#[case(r"/send text='it\'s'", "it's")]
#[case("/send text=plain", "plain")]
#[case(r#"/send text="""#, "")]
fn quoted_values_are_unwrapped(#[case] input: &str, #[case] expected: &str) {
    let parsed = ParsedInvocation::parse(input).expect("parses");
    assert_eq!(
        parsed.arguments().get("text").map(String::as_str),
        Some(expected)
    );
}

#[rstest]
fn keys_are_lowercased_and_values_kept() {
    let (command, arguments) =
        ParsedInvocation::parse("/r2r Character_Name=Beymax character_server=Arygos")
            .expect("parses")
            .into_parts();
    assert_eq!(command, "r2r");
    assert_eq!(
        arguments.get("character_name").map(String::as_str),
        Some("Beymax")
    );
    assert_eq!(
        arguments.get("character_server").map(String::as_str),
        Some("Arygos")
    );
}

#[rstest]
#[case("", CommandDomainError::EmptyInput)]
#[case("   ", CommandDomainError::EmptyInput)]
#[case("hello", CommandDomainError::MissingLeadingSlash)]
#[case("/", CommandDomainError::InvalidCommandName(String::new()))]
#[case("/he.llo", CommandDomainError::InvalidCommandName("he.llo".to_owned()))]
#[case("/send text", CommandDomainError::InvalidArgumentToken { token: "text".to_owned() })]
#[case("/send =value", CommandDomainError::InvalidArgumentToken { token: "=value".to_owned() })]
#[case(r"/send text=a\b", CommandDomainError::InvalidArgumentToken { token: r"text=a\".to_owned() })]
#[case(r#"/send text="open"#, CommandDomainError::UnterminatedQuotedValue)]
#[case("/send a=1 A=2", CommandDomainError::DuplicateArgument("a".to_owned()))]
fn malformed_input_is_rejected(#[case] input: &str, #[case] expected: CommandDomainError) {
    assert_eq!(ParsedInvocation::parse(input), Err(expected));
}

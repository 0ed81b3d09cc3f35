//! Property-based tests for agent source rendering and publish helpers.

use proptest::prelude::*;
use starter_cli::domain::AgentSource;
use starter_cli::domain::publish::redact;
use starter_cli::domain::source::{env_default_literal, py_string};
use starter_cli::domain::validate_request;
use starter_common::ProjectRequest;

use crate::helpers::tool;

fn tool_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("t_[a-z0-9_]{0,8}", 1..6).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn every_tool_is_defined_once_and_listed_in_order(
        names in tool_names(),
        description in "[A-Za-z ]{0,20}",
    ) {
        let mut request = ProjectRequest::new("agent", "d", "p");
        request.tools = names.iter().map(|n| tool(n, &description)).collect();
        prop_assert!(validate_request(&request).is_ok());

        let source = AgentSource::from_request(&request).render();
        let listed = format!("tools=[{}],", names.join(", "));
        prop_assert!(source.contains(&listed), "missing `{}`", listed);
        for name in &names {
            let def = format!("def {name}(query: str) -> str:");
            prop_assert_eq!(source.matches(&def).count(), 1);
        }
    }

    #[test]
    fn integer_defaults_are_bare(value in any::<u32>()) {
        let text = value.to_string();
        prop_assert_eq!(env_default_literal(&text), text);
    }

    #[test]
    fn word_defaults_are_quoted(value in "[a-z][a-z_]{0,12}") {
        prop_assert_eq!(env_default_literal(&value), format!("\"{value}\""));
    }

    #[test]
    fn python_strings_stay_on_one_line(value in any::<String>()) {
        let literal = py_string(&value);
        prop_assert!(literal.starts_with('"') && literal.ends_with('"'));
        prop_assert!(!literal.contains('\n'));
        prop_assert!(!literal.contains('\r'));
        // Every inner quote is escaped.
        let inner = &literal[1..literal.len() - 1];
        let mut backslashes = 0_usize;
        for c in inner.chars() {
            if c == '"' {
                prop_assert!(backslashes % 2 == 1, "unescaped quote in {}", literal);
            }
            backslashes = if c == '\\' { backslashes + 1 } else { 0 };
        }
    }

    #[test]
    fn redacted_text_never_holds_a_long_token(
        token in "[A-Za-z0-9]{8,16}",
        prefix in "[ -~]{0,20}",
        suffix in "[ -~]{0,20}",
    ) {
        let text = format!("{prefix}{token}{suffix}");
        let cleaned = redact(&text, &token);
        prop_assert!(!cleaned.contains(&token));
        prop_assert!(cleaned.contains("***"));
    }

    #[test]
    fn short_tokens_only_masked_in_credentials(
        token in "[A-Za-z0-9]{1,7}",
        prefix in "[a-z ]{0,20}",
        path in "[a-z/]{0,20}",
    ) {
        let text = format!("{prefix} https://{token}@github.com/{path}");
        prop_assert_eq!(
            redact(&text, &token),
            format!("{prefix} https://***@github.com/{path}")
        );
    }
}

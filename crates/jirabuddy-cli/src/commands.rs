use anyhow::bail;
use anyhow::Result;
use serde_json::Value;

/// Canned prompts offered next to the input, as (label, prompt).
pub const QUICK_ACTIONS: [(&str, &str); 4] = [
    ("Find Issues", "Find all open issues in project TEST"),
    ("Report Bug", "I want to report a bug in the login flow"),
    ("New Story", "Create a new user story for the dashboard"),
    ("My Status", "What are my assigned tasks?"),
];

#[derive(Debug, Clone, PartialEq)]
pub enum SlashCommand {
    Help,
    New,
    Tools,
    Call { tool: String, arguments: Value },
    Quick(Option<usize>),
    Quit,
}

impl SlashCommand {
    /// `Ok(None)` means the line is ordinary chat input.
    pub fn parse(input: &str) -> Result<Option<SlashCommand>> {
        let trimmed = input.trim();
        if !trimmed.starts_with('/') {
            return Ok(None);
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        let command = match name {
            "/help" | "/h" => SlashCommand::Help,
            "/new" | "/clear" => SlashCommand::New,
            "/tools" => SlashCommand::Tools,
            "/quit" | "/exit" | "/q" => SlashCommand::Quit,
            "/call" => parse_call(rest)?,
            "/quick" => parse_quick(rest)?,
            _ => bail!("Unknown command '{name}'. Type /help to see what's available."),
        };

        return Ok(Some(command));
    }
}

fn parse_call(rest: &str) -> Result<SlashCommand> {
    let (tool, raw_args) = match rest.split_once(char::is_whitespace) {
        Some((tool, raw_args)) => (tool, raw_args.trim()),
        None => (rest, ""),
    };

    if tool.is_empty() {
        bail!("Usage: /call TOOL_NAME [JSON_ARGUMENTS]");
    }

    let arguments = if raw_args.is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        match serde_json::from_str::<Value>(raw_args) {
            Ok(value) if value.is_object() => value,
            Ok(_) => bail!("Tool arguments must be a JSON object"),
            Err(err) => bail!("Tool arguments are not valid JSON: {err}"),
        }
    };

    return Ok(SlashCommand::Call {
        tool: tool.to_string(),
        arguments,
    });
}

fn parse_quick(rest: &str) -> Result<SlashCommand> {
    if rest.is_empty() {
        return Ok(SlashCommand::Quick(None));
    }

    let index = match rest.parse::<usize>() {
        Ok(index) if (1..=QUICK_ACTIONS.len()).contains(&index) => index,
        _ => bail!(
            "Quick action must be a number between 1 and {}",
            QUICK_ACTIONS.len()
        ),
    };

    return Ok(SlashCommand::Quick(Some(index)));
}

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /quick [NUMBER] - Lists the quick actions, or sends the numbered one.
- /tools - Lists the Jira tools the backend can use.
- /call TOOL_NAME [JSON_ARGUMENTS] - Calls a backend tool directly. The result is not added to the conversation.
- /new (/clear) - Starts a new conversation.
- /quit /exit (/q) - Exit JiraBuddy.
- /help (/h) - Provides this help menu.

Anything else is sent to the JiraBuddy agent along with the whole conversation so far.
While a reply is pending, new messages are not sent.
        "#;

    text.trim().to_string()
}

pub fn quick_actions_text() -> String {
    QUICK_ACTIONS
        .iter()
        .enumerate()
        .map(|(idx, (label, prompt))| format!("{}. {label} - {prompt}", idx + 1))
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(SlashCommand::parse("List open issues").unwrap(), None);
        assert_eq!(SlashCommand::parse("  what about /tools?").unwrap(), None);
    }

    #[test]
    fn test_aliases() {
        for (input, expected) in [
            ("/h", SlashCommand::Help),
            ("/help", SlashCommand::Help),
            ("/clear", SlashCommand::New),
            ("/new", SlashCommand::New),
            ("/q", SlashCommand::Quit),
            ("/exit", SlashCommand::Quit),
            (" /tools ", SlashCommand::Tools),
        ] {
            assert_eq!(SlashCommand::parse(input).unwrap(), Some(expected));
        }
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        let err = SlashCommand::parse("/deploy prod").unwrap_err();
        assert!(err.to_string().contains("Unknown command '/deploy'"));
    }

    #[test]
    fn test_call_with_arguments() {
        let command = SlashCommand::parse(r#"/call jira_get_issue {"issue_key": "TEST-1"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            command,
            SlashCommand::Call {
                tool: "jira_get_issue".to_string(),
                arguments: json!({"issue_key": "TEST-1"}),
            }
        );
    }

    #[test]
    fn test_call_defaults_to_empty_arguments() {
        let command = SlashCommand::parse("/call jira_search").unwrap().unwrap();
        assert_eq!(
            command,
            SlashCommand::Call {
                tool: "jira_search".to_string(),
                arguments: json!({}),
            }
        );
    }

    #[test]
    fn test_call_rejects_bad_arguments() {
        assert!(SlashCommand::parse("/call").is_err());
        assert!(SlashCommand::parse("/call jira_search [1, 2]").is_err());
        assert!(SlashCommand::parse("/call jira_search {oops").is_err());
    }

    #[test]
    fn test_quick_actions() {
        assert_eq!(
            SlashCommand::parse("/quick").unwrap(),
            Some(SlashCommand::Quick(None))
        );
        assert_eq!(
            SlashCommand::parse("/quick 4").unwrap(),
            Some(SlashCommand::Quick(Some(4)))
        );
        assert!(SlashCommand::parse("/quick 0").is_err());
        assert!(SlashCommand::parse("/quick 5").is_err());
        assert!(SlashCommand::parse("/quick two").is_err());
    }

    #[test]
    fn test_quick_actions_text_is_numbered() {
        let text = quick_actions_text();
        assert!(text.starts_with("1. Find Issues - Find all open issues in project TEST"));
        assert!(text.ends_with("4. My Status - What are my assigned tasks?"));
    }
}

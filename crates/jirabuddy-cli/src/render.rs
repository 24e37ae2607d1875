use jirabuddy_client::Message;
use jirabuddy_client::Role;
use jirabuddy_client::SessionEvent;
use jirabuddy_client::Status;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use yansi::Paint;

fn prefix(role: Role) -> &'static str {
    match role {
        Role::User => "you>",
        Role::Assistant => "jirabuddy>",
        Role::System => "system>",
    }
}

/// Lays a message out as a prefixed block, with continuation lines aligned
/// under the first one.
pub fn format_message(message: &Message) -> String {
    let prefix = prefix(message.role);
    let indent = " ".repeat(prefix.len() + 1);

    message
        .content
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 {
                format!("{prefix} {line}")
            } else if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn paint_message(message: &Message) -> String {
    let formatted = format_message(message);
    let prefix = prefix(message.role);
    let body = formatted.strip_prefix(prefix).unwrap_or(&formatted);

    let painted = match message.role {
        Role::User => Paint::green(prefix).bold(),
        Role::Assistant => Paint::cyan(prefix).bold(),
        Role::System => Paint::yellow(prefix).bold(),
    };

    format!("{painted}{body}")
}

fn print_event(event: SessionEvent) {
    match event {
        // The terminal already shows what was typed.
        SessionEvent::MessageAppended { message, .. } if message.role == Role::User => {}
        SessionEvent::MessageAppended { message, .. } => {
            println!("{}\n", paint_message(&message));
        }
        SessionEvent::StatusChanged(Status::Pending) => {
            println!("{}", Paint::new("Thinking...").dimmed());
        }
        SessionEvent::StatusChanged(_) => {}
        SessionEvent::Reset => {
            println!("{}\n", Paint::new("Started a new conversation.").dimmed());
        }
    }
}

/// Prints session changes until `stop` fires, then prints whatever was
/// already queued and returns.
pub async fn print_session_events(
    mut rx: mpsc::UnboundedReceiver<SessionEvent>,
    mut stop: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => print_event(event),
                None => return,
            },
            _ = &mut stop => break,
        }
    }

    while let Ok(event) = rx.try_recv() {
        print_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_message() {
        assert_eq!(
            format_message(&Message::user("List open issues")),
            "you> List open issues"
        );
    }

    #[test]
    fn test_multi_line_message_is_aligned() {
        let message = Message::assistant("3 issues found:\n- TEST-1\n\n- TEST-2");
        assert_eq!(
            format_message(&message),
            "jirabuddy> 3 issues found:\n           - TEST-1\n\n           - TEST-2"
        );
    }

    #[test]
    fn test_system_prefix() {
        let message = Message::new(Role::System, "Jira is read-only today");
        assert_eq!(format_message(&message), "system> Jira is read-only today");
    }
}

use std::sync::Arc;

use anyhow::Result;
use jirabuddy_client::DispatchController;
use jirabuddy_client::HttpChatTransport;
use jirabuddy_client::Status;
use jirabuddy_client::SubmitOutcome;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use yansi::Paint;

use crate::commands;
use crate::commands::SlashCommand;
use crate::commands::QUICK_ACTIONS;
use crate::render;

enum Flow {
    Continue,
    Submitted(JoinHandle<SubmitOutcome>),
    Quit,
}

/// Line-oriented chat loop over stdin. Replies are printed by a subscriber to
/// the session store, so input keeps being read while a request is pending.
pub async fn run(controller: Arc<DispatchController>, tools: HttpChatTransport) -> Result<()> {
    return run_with_input(controller, tools, BufReader::new(tokio::io::stdin())).await;
}

async fn run_with_input<R>(
    controller: Arc<DispatchController>,
    tools: HttpChatTransport,
    input: R,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let (stop_tx, stop_rx) = oneshot::channel();
    let printer = tokio::spawn(render::print_session_events(
        controller.store().subscribe(),
        stop_rx,
    ));

    println!(
        "{}",
        Paint::new("Start a conversation to interact with Jira. Type /help for commands.").dimmed()
    );
    println!("{}\n", commands::quick_actions_text());

    let mut in_flight = vec![];
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match SlashCommand::parse(&line) {
            Err(err) => println!("{}\n", Paint::red(err)),
            Ok(None) => {
                in_flight.extend(submit(&controller, &line, false));
            }
            Ok(Some(command)) => match handle_command(command, &controller, &tools).await {
                Flow::Continue => {}
                Flow::Submitted(handle) => in_flight.push(handle),
                Flow::Quit => break,
            },
        }
    }

    // Input is gone but a reply may still be on its way.
    for handle in in_flight {
        if let Err(err) = handle.await {
            log::error!("chat request task failed: {err}");
        }
    }

    let _ = stop_tx.send(());
    printer.await?;

    Ok(())
}

/// Hands `text` to the controller unless a reply is still pending. `echo`
/// prints the user turn for prompts the user did not type themselves.
fn submit(
    controller: &Arc<DispatchController>,
    text: &str,
    echo: bool,
) -> Option<JoinHandle<SubmitOutcome>> {
    if text.trim().is_empty() {
        return None;
    }

    if controller.store().status() != Status::Idle {
        println!(
            "{}\n",
            Paint::new("Still waiting on the last reply, that message was not sent.").dimmed()
        );
        return None;
    }

    if echo {
        println!("{} {}\n", Paint::green("you>").bold(), text.trim());
    }

    return Some(controller.spawn_submit(text));
}

async fn handle_command(
    command: SlashCommand,
    controller: &Arc<DispatchController>,
    tools: &HttpChatTransport,
) -> Flow {
    match command {
        SlashCommand::Quit => return Flow::Quit,
        SlashCommand::Help => println!("{}\n", commands::help_text()),
        SlashCommand::New => {
            if !controller.reset() {
                println!(
                    "{}\n",
                    Paint::new("Wait for the current reply before starting over.").dimmed()
                );
            }
        }
        SlashCommand::Quick(None) => println!("{}\n", commands::quick_actions_text()),
        SlashCommand::Quick(Some(index)) => {
            let (_, prompt) = QUICK_ACTIONS[index - 1];
            if let Some(handle) = submit(controller, prompt, true) {
                return Flow::Submitted(handle);
            }
        }
        SlashCommand::Tools => match tools.list_tools().await {
            Ok(list) if list.is_empty() => println!("The backend has no tools available.\n"),
            Ok(list) => {
                for tool in list {
                    let description = tool.description.unwrap_or_default();
                    println!("- {} {description}", Paint::cyan(&tool.name).bold());
                }
                println!();
            }
            Err(err) => {
                log::error!("listing tools failed: {err}");
                println!("{}\n", Paint::red("Could not load the tool list from the backend."));
            }
        },
        SlashCommand::Call { tool, arguments } => match tools.call_tool(&tool, arguments).await {
            Ok(result) => {
                let pretty = serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string());
                println!("{pretty}\n");
            }
            Err(err) => {
                log::error!("calling tool {tool} failed: {err}");
                println!("{}\n", Paint::red(format!("Tool call '{tool}' failed.")));
            }
        },
    }

    Flow::Continue
}

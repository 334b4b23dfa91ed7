use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

use aura_client::{AgentService, Reply};
use chat_core::{Selection, Transcript};
use colored::Colorize;

use crate::render;

/// One line typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Exit,
    Prompts,
    History,
    Clear,
    Empty,
    Question(String),
    UnknownPrompt(usize),
}

impl ChatInput {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ChatInput::Empty;
        }
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            return ChatInput::Exit;
        }
        match trimmed {
            "/prompts" => return ChatInput::Prompts,
            "/history" => return ChatInput::History,
            "/clear" => return ChatInput::Clear,
            _ => {}
        }

        let selection = Selection::parse(trimmed);
        match (selection.resolve(), selection) {
            (Some(question), _) => ChatInput::Question(question),
            (None, Selection::Canned(index)) => ChatInput::UnknownPrompt(index),
            (None, Selection::FreeText(text)) => ChatInput::Question(text),
        }
    }
}

pub async fn run_interactive_chat(service: &AgentService) -> anyhow::Result<()> {
    let mut transcript = Transcript::new();

    println!(
        "{}",
        "🤖 Conversational Agent - Swiss Diplomatic Archives".cyan().bold()
    );
    println!(
        "{}",
        "Graph knowledge base • 1940-1945 • answers take 15-45 seconds".dimmed()
    );
    println!(
        "{}",
        "Type a question, /N for a suggested question, /prompts, /history, /clear, or 'exit'"
            .dimmed()
    );
    println!();

    loop {
        print!("{} ", "You:".cyan().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        match ChatInput::parse(&line) {
            ChatInput::Empty => continue,
            ChatInput::Exit => {
                println!("{}", "👋 Goodbye!".cyan());
                break;
            }
            ChatInput::Prompts => render::print_catalogue(),
            ChatInput::History => render::print_history(transcript.all()),
            ChatInput::Clear => {
                transcript.clear();
                println!("{}", "🗑️ History cleared".yellow());
            }
            ChatInput::UnknownPrompt(index) => {
                println!(
                    "{}",
                    format!("❓ No suggested question #{index}. Type /prompts to list them.").yellow()
                );
            }
            ChatInput::Question(question) => {
                if line.trim() != question {
                    println!("{} {}", "→".dimmed(), question);
                }
                let reply = ask(service, &mut transcript, &question).await;
                print_reply(&reply);
            }
        }
        println!();
    }

    Ok(())
}

pub async fn ask(service: &AgentService, transcript: &mut Transcript, question: &str) -> Reply {
    with_indicator(
        "🔍 Searching... (15-45 sec)",
        io::stdout().is_terminal(),
        service.handle_question(transcript, question),
    )
    .await
}

pub fn print_reply(reply: &Reply) {
    println!("{}", "Assistant:".green().bold());
    match reply {
        Reply::Answer(answer) => println!("{answer}"),
        Reply::Failure(_) => println!("{}", reply.text().red()),
    }
}

/// Shows a spinner with elapsed seconds until `work` completes. Nothing is
/// drawn unless `show` is set (stdout is a terminal).
async fn with_indicator<F: Future>(label: &str, show: bool, work: F) -> F::Output {
    if !show {
        return work.await;
    }

    let label = label.to_string();
    let spinner = tokio::spawn(async move {
        let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        let started = Instant::now();
        let mut tick = tokio::time::interval(Duration::from_millis(120));
        for frame in frames.iter().cycle() {
            tick.tick().await;
            print!(
                "\r{} {}",
                frame,
                format!("{label} {}s", started.elapsed().as_secs()).dimmed()
            );
            let _ = io::stdout().flush();
        }
    });

    let output = work.await;
    spinner.abort();
    let _ = spinner.await;
    print!("\r\x1b[2K");
    let _ = io::stdout().flush();
    output
}

//! Terminal rendering for the prompt catalogue, the transcript and query results.

use chat_core::prompts::in_category;
use chat_core::{Message, PromptCategory, Role};
use colored::Colorize;
use graph_client::{GraphView, QueryResult, QueryTemplate, TEMPLATES};
use serde_json::Value;

const MAX_CELL_WIDTH: usize = 40;

pub fn print_catalogue() {
    println!("{}", "📚 Suggested questions".cyan().bold());
    for category in PromptCategory::ALL {
        println!();
        println!("{}", category.title().yellow());
        for (index, prompt) in in_category(category) {
            println!("  {} {}", format!("{:>3}", format!("/{index}")).green(), prompt.question);
        }
    }
    println!();
    println!("{}", "Type /N to ask question N.".dimmed());
}

pub fn print_templates() {
    println!("{}", "🧩 Query templates".cyan().bold());
    for QueryTemplate {
        name,
        description,
        parameters,
        ..
    } in TEMPLATES
    {
        let params = parameters
            .iter()
            .map(|p| format!("--param {p}=..."))
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {} {}", format!("{name:<16}").green(), description);
        if !params.is_empty() {
            println!("  {:<16} {}", "", params.dimmed());
        }
    }
}

pub fn print_message(message: &Message) {
    let time = message
        .created_at
        .with_timezone(&chrono::Local)
        .format("%H:%M:%S");
    let who = match message.role {
        Role::User => "You:".cyan().bold(),
        Role::Assistant => "Assistant:".green().bold(),
    };
    println!("{} {}", format!("[{time}]").dimmed(), who);
    println!("{}", message.content);
}

pub fn print_history(messages: &[Message]) {
    if messages.is_empty() {
        println!("{}", "📭 No messages yet.".dimmed());
        return;
    }
    println!("{}", "─".repeat(50).dimmed());
    for message in messages {
        print_message(message);
        println!();
    }
    println!("{}", "─".repeat(50).dimmed());
}

pub fn print_query_result(result: &QueryResult) {
    if result.is_empty() {
        println!("{}", "📭 No rows.".dimmed());
        return;
    }

    let lines = table_lines(result);
    if let Some((header, body)) = lines.split_first() {
        println!("{}", header.bold());
        for line in body {
            println!("{line}");
        }
    }
    println!("{}", format!("{} row(s)", result.len()).dimmed());

    let view = GraphView::from_result(result);
    if !view.is_empty() {
        println!();
        println!(
            "{}",
            format!(
                "🕸️ Network: {} node(s), {} relationship(s)",
                view.nodes.len(),
                view.relationships.len()
            )
            .cyan()
        );
        for node in &view.nodes {
            println!(
                "  {} {}",
                format!("({})", node.labels.join(":")).yellow(),
                node.display_name()
            );
        }
        for edge in view.edges() {
            println!("  {edge}");
        }
    }
}

/// Header, separator and one line per row, columns padded to the widest cell.
pub fn table_lines(result: &QueryResult) -> Vec<String> {
    let rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| result.ordered_row(row).iter().map(format_cell).collect())
        .collect();

    let widths: Vec<usize> = result
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(field.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join(" │ ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(result.fields.as_slice()));
    lines.push(
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─"),
    );
    lines.extend(rows.iter().map(|row| line(row.as_slice())));
    lines
}

/// Strings unquoted, graph entities by name, everything else as compact JSON.
pub fn format_cell(value: &Value) -> String {
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(map) if map.contains_key("elementId") => {
            let props = map.get("properties").and_then(Value::as_object);
            let name = props
                .and_then(|p| p.get("name").or_else(|| p.get("title")))
                .and_then(Value::as_str);
            let kind = map
                .get("type")
                .and_then(Value::as_str)
                .map(|t| format!("[:{t}]"));
            let labels = map.get("labels").and_then(Value::as_array).map(|labels| {
                labels
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(":")
            });
            match (name, kind, labels) {
                (Some(name), _, Some(labels)) => format!("({labels} {name})"),
                (None, _, Some(labels)) => format!("({labels})"),
                (_, Some(kind), None) => kind,
                _ => value.to_string(),
            }
        }
        other => other.to_string(),
    };
    let single_line = text.replace(['\n', '\r'], " ");
    truncate(&single_line, MAX_CELL_WIDTH)
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    format!("{cell}{}", " ".repeat(fill))
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let kept: String = text.chars().take(limit.saturating_sub(1)).collect();
    format!("{kept}…")
}

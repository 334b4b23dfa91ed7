use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use aura_client::build_http_client;
use chat_core::Config;
use colored::Colorize;
use graph_client::{parse_parameter, GraphClient, QueryTemplate};
use serde_json::{Map, Value};

use crate::render;

/// Where the statement comes from: a named template or raw Cypher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementSource {
    Template(String),
    Raw(String),
}

/// Resolves the statement and the parameters to send with it.
pub fn prepare(
    source: &StatementSource,
    params: &[String],
) -> anyhow::Result<(String, Map<String, Value>)> {
    let mut supplied = Map::new();
    for arg in params {
        let (key, value) = parse_parameter(arg)?;
        supplied.insert(key, value);
    }

    match source {
        StatementSource::Template(name) => {
            let template = QueryTemplate::find(name)?;
            let bound = template.bind(&supplied)?;
            Ok((template.statement.to_string(), bound))
        }
        StatementSource::Raw(statement) => Ok((statement.clone(), supplied)),
    }
}

pub async fn run_query(
    config: &Config,
    source: StatementSource,
    params: &[String],
    database: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let graph_config = config.graph().context("graph database is not configured")?;
    let (statement, parameters) = prepare(&source, params)?;

    let http = Arc::new(build_http_client(config)?);
    let graph = GraphClient::new(http, graph_config)?;
    let session = graph.session(database);

    println!(
        "{}",
        format!("🚀 Running query on {}", session.database()).cyan()
    );
    log::debug!("Statement: {statement}");

    let start = Instant::now();
    let result = session.run(&statement, &parameters).await?;
    let elapsed = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&result.rows)?);
    } else {
        render::print_query_result(&result);
    }
    println!("{}", format!("⏱️ {elapsed:.2?}").dimmed());
    Ok(())
}

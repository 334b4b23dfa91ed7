use serde_json::{Map, Value};

use crate::error::{GraphError, GraphResult};

/// A named Cypher statement with the parameters it expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub statement: &'static str,
    pub parameters: &'static [&'static str],
}

pub const TEMPLATES: &[QueryTemplate] = &[
    QueryTemplate {
        name: "people",
        description: "Persons in the archive, alphabetically",
        statement: "MATCH (p:Person) RETURN p.name AS name ORDER BY name LIMIT 100",
        parameters: &[],
    },
    QueryTemplate {
        name: "person",
        description: "A person and their direct neighbourhood",
        statement: "MATCH (p:Person {name: $name})-[r]-(n) RETURN p, r, n LIMIT 50",
        parameters: &["name"],
    },
    QueryTemplate {
        name: "labels",
        description: "Node count per label",
        statement: "MATCH (n) UNWIND labels(n) AS label \
                    RETURN label, count(*) AS count ORDER BY count DESC",
        parameters: &[],
    },
    QueryTemplate {
        name: "correspondence",
        description: "Letters sent or received by a person",
        statement: "MATCH (p:Person {name: $name})-[r:SENT|RECEIVED]-(l:Letter) \
                    RETURN p, r, l ORDER BY l.date LIMIT 50",
        parameters: &["name"],
    },
];

impl QueryTemplate {
    pub fn find(name: &str) -> GraphResult<&'static QueryTemplate> {
        let name = name.trim();
        TEMPLATES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| GraphError::UnknownTemplate(name.to_string()))
    }

    /// Keeps only the declared parameters; every one of them must be supplied.
    pub fn bind(&self, supplied: &Map<String, Value>) -> GraphResult<Map<String, Value>> {
        self.parameters
            .iter()
            .map(|key| {
                supplied
                    .get(*key)
                    .map(|value| (key.to_string(), value.clone()))
                    .ok_or_else(|| GraphError::MissingParameter(key.to_string()))
            })
            .collect()
    }
}

/// Parses a `key=value` argument. The value is read as JSON when it parses
/// (`born=1901`, `active=true`) and kept as a string otherwise.
pub fn parse_parameter(arg: &str) -> GraphResult<(String, Value)> {
    let (key, raw) = arg
        .split_once('=')
        .ok_or_else(|| GraphError::InvalidParameter(arg.to_string()))?;
    let key = key.trim().trim_start_matches('$');
    if key.is_empty() {
        return Err(GraphError::InvalidParameter(arg.to_string()));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn declared_parameters_appear_in_statements() {
        for template in TEMPLATES {
            for param in template.parameters {
                assert!(
                    template.statement.contains(&format!("${param}")),
                    "{} does not use ${param}",
                    template.name
                );
            }
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(QueryTemplate::find(" Person ").unwrap().name, "person");
        assert_eq!(
            QueryTemplate::find("nope"),
            Err(GraphError::UnknownTemplate("nope".to_string()))
        );
    }

    #[test]
    fn bind_requires_every_parameter() {
        let template = QueryTemplate::find("person").unwrap();
        assert_eq!(
            template.bind(&Map::new()),
            Err(GraphError::MissingParameter("name".to_string()))
        );

        let mut supplied = Map::new();
        supplied.insert("name".to_string(), json!("Marcel Nussbaumer"));
        supplied.insert("unused".to_string(), json!(1));
        let bound = template.bind(&supplied).unwrap();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound["name"], json!("Marcel Nussbaumer"));
    }

    #[test]
    fn parameters_parse_as_json_or_string() {
        assert_eq!(parse_parameter("born=1901").unwrap(), ("born".to_string(), json!(1901)));
        assert_eq!(
            parse_parameter("$name=Elisabeth Müller").unwrap(),
            ("name".to_string(), json!("Elisabeth Müller"))
        );
        assert_eq!(parse_parameter("empty=").unwrap().1, json!(""));
        assert!(parse_parameter("novalue").is_err());
        assert!(parse_parameter("=x").is_err());
    }
}

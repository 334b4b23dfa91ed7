//! graph_client - direct access to the archives graph database
//!
//! - `client` - scoped sessions running one parameterized statement at a time
//! - `network` - nodes and relationships pulled out of result rows
//! - `templates` - named Cypher statements offered as shortcuts

pub mod client;
pub mod error;
pub mod network;
pub mod templates;

pub use client::{query_base_url, GraphClient, GraphSession, QueryResult, Record};
pub use error::{GraphError, GraphResult};
pub use network::{GraphNode, GraphRelationship, GraphView};
pub use templates::{parse_parameter, QueryTemplate, TEMPLATES};

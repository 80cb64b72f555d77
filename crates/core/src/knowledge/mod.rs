//! Read-only knowledge store.
//!
//! Records are populated once from the built-in tables and never written
//! afterwards. A store is shared between request handlers behind an `Arc`;
//! since there is no mutation path, no locking is involved.

mod environments;
mod installation;
mod reference;
mod troubleshooting;

use crate::types::{KnowledgeRecord, MatchKind};
use serde_json::Value;
use std::collections::BTreeMap;

/// Table prefixes used in composite record keys.
pub mod tables {
    pub const PREREQUISITES: &str = "prerequisites";
    pub const SEQUENCES: &str = "sequence";
    pub const ENVIRONMENTS: &str = "environment";
    pub const SERVER_MANAGER: &str = "server_manager";
    pub const CENTRALIZED: &str = "centralized";
    pub const ESU_ASU: &str = "esu_asu";
    pub const UTILITIES: &str = "utilities";
    pub const TROUBLESHOOTING: &str = "troubleshooting";
    pub const LOGS: &str = "logs";
    pub const DOCUMENTATION: &str = "documentation";
    pub const DEPLOYMENT_MODELS: &str = "deployment_model";
    pub const REFERENCE: &str = "reference";
}

/// Topic holding the generic record of a table, where one exists.
pub const GENERAL_TOPIC: &str = "general";

static MISSING: Value = Value::Null;

/// Build the composite key `<table>/<topic>`.
pub fn record_key(table: &str, topic: &str) -> String {
    format!("{}/{}", table, topic)
}

/// A payload found by [`KnowledgeStore::resolve`]
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub payload: &'a Value,
    pub matched: MatchKind,
}

/// Immutable mapping from composite keys to knowledge records
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    records: BTreeMap<String, KnowledgeRecord>,
}

impl KnowledgeStore {
    /// Populate the store from the built-in tables.
    pub fn load() -> Self {
        let store = Self::from_records(
            installation::records()
                .into_iter()
                .chain(environments::records())
                .chain(troubleshooting::records())
                .chain(reference::records()),
        );

        tracing::debug!(records = store.len(), "Knowledge store populated");
        store
    }

    pub fn from_records(records: impl IntoIterator<Item = KnowledgeRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.key.clone(), record))
                .collect(),
        }
    }

    pub fn lookup(&self, table: &str, topic: &str) -> Option<&KnowledgeRecord> {
        self.records.get(&record_key(table, topic))
    }

    /// Payload of a record, or `null` if the record does not exist.
    pub fn payload(&self, table: &str, topic: &str) -> &Value {
        self.lookup(table, topic)
            .map(|record| &record.payload)
            .unwrap_or(&MISSING)
    }

    /// Look up `topic`, falling back to `fallback_topic` in the same table.
    pub fn resolve(&self, table: &str, topic: &str, fallback_topic: &str) -> Resolved<'_> {
        match self.lookup(table, topic) {
            Some(record) => Resolved {
                payload: &record.payload,
                matched: MatchKind::Exact,
            },
            None => {
                tracing::debug!(table, topic, fallback_topic, "No exact record, using fallback");
                Resolved {
                    payload: self.payload(table, fallback_topic),
                    matched: MatchKind::Fallback,
                }
            }
        }
    }

    /// Records of one table in key order, paired with their topic.
    pub fn table<'a>(
        &'a self,
        table: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a KnowledgeRecord)> + 'a {
        self.records.iter().filter_map(move |(key, record)| {
            key.strip_prefix(table)
                .and_then(|rest| rest.strip_prefix('/'))
                .map(|topic| (topic, record))
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for KnowledgeStore {
    fn default() -> Self {
        Self::load()
    }
}

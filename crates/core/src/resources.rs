//! Static documents addressed by fixed URIs.
//!
//! Every document is rendered once when the provider is built, so repeated
//! reads of a URI return the same bytes for the life of the process.

use crate::domain::*;
use crate::error::{KbError, KbResult};
use crate::knowledge::{tables, KnowledgeStore};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

pub const JSON_MIME_TYPE: &str = "application/json";

domain_enum! {
    pub enum ResourceUri {
        InstallationChecklist => "jde://config/installation-checklist",
        ProductionTemplate => "jde://config/environment-templates/production",
        TestTemplate => "jde://config/environment-templates/test",
        DevelopmentTemplate => "jde://config/environment-templates/development",
        PortAssignments => "jde://reference/port-assignments",
        ToolsReleaseMatrix => "jde://reference/tools-release-matrix",
        ErrorCodes => "jde://reference/error-codes",
    }
}

/// Catalog entry for a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

impl ResourceUri {
    pub fn descriptor(&self) -> ResourceDescriptor {
        let (name, description) = match self {
            ResourceUri::InstallationChecklist => (
                "Installation Checklist",
                "Production installation sequence with the prerequisites of every component",
            ),
            ResourceUri::ProductionTemplate => (
                "Production Template (PD920)",
                "Configuration template for the PD920 production environment",
            ),
            ResourceUri::TestTemplate => (
                "Test Template (PY920)",
                "Configuration template for the PY920 test environment",
            ),
            ResourceUri::DevelopmentTemplate => (
                "Development Template (DV920)",
                "Configuration template for the DV920 development environment",
            ),
            ResourceUri::PortAssignments => (
                "Port Assignments",
                "Default WebLogic, AIS and HTTP port assignments",
            ),
            ResourceUri::ToolsReleaseMatrix => (
                "Tools Release Matrix",
                "Current Tools Release with certified databases and WebLogic versions",
            ),
            ResourceUri::ErrorCodes => (
                "Error Codes Reference",
                "Common security and database error codes",
            ),
        };

        ResourceDescriptor {
            uri: self.as_str(),
            name,
            description,
            mime_type: JSON_MIME_TYPE,
        }
    }
}

/// A rendered resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub uri: &'static str,
    pub mime_type: &'static str,
    pub text: String,
}

/// Serves the fixed resource documents
#[derive(Debug, Clone)]
pub struct ResourceProvider {
    documents: BTreeMap<ResourceUri, Document>,
}

impl ResourceProvider {
    pub fn new(store: &KnowledgeStore) -> Self {
        let documents = ResourceUri::all()
            .iter()
            .map(|uri| {
                let document = Document {
                    uri: uri.as_str(),
                    mime_type: JSON_MIME_TYPE,
                    text: render(&content(store, *uri)),
                };
                (*uri, document)
            })
            .collect();

        Self { documents }
    }

    pub fn list(&self) -> Vec<ResourceDescriptor> {
        ResourceUri::all().iter().map(ResourceUri::descriptor).collect()
    }

    /// Exact-match lookup; URIs are not normalized.
    pub fn read(&self, uri: &str) -> KbResult<&Document> {
        let document = ResourceUri::parse(uri).and_then(|known| self.documents.get(&known));

        match document {
            Some(document) => {
                tracing::info!(uri, "Resource read");
                Ok(document)
            }
            None => Err(KbError::UnknownResource(uri.to_string())),
        }
    }
}

fn content(store: &KnowledgeStore, uri: ResourceUri) -> Value {
    let environment = |env: Environment| store.payload(tables::ENVIRONMENTS, env.as_str()).clone();
    let reference = |topic: &str| store.payload(tables::REFERENCE, topic).clone();

    match uri {
        ResourceUri::InstallationChecklist => {
            let prerequisites: Map<String, Value> = store
                .table(tables::PREREQUISITES)
                .map(|(topic, record)| (topic.to_string(), record.payload.clone()))
                .collect();
            json!({
                "checklist": store.payload(tables::SEQUENCES, EnvironmentType::Production.as_str()),
                "prerequisites": prerequisites,
            })
        }
        ResourceUri::ProductionTemplate => environment(Environment::Production),
        ResourceUri::TestTemplate => environment(Environment::Test),
        ResourceUri::DevelopmentTemplate => environment(Environment::Development),
        ResourceUri::PortAssignments => reference("port_assignments"),
        ResourceUri::ToolsReleaseMatrix => reference("tools_release_matrix"),
        ResourceUri::ErrorCodes => reference("error_codes"),
    }
}

fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ResourceProvider {
        ResourceProvider::new(&KnowledgeStore::load())
    }

    #[test]
    fn test_every_uri_is_readable() {
        let provider = provider();
        let listed = provider.list();
        assert_eq!(listed.len(), 7);

        for descriptor in listed {
            let document = provider.read(descriptor.uri).unwrap();
            assert_eq!(document.mime_type, "application/json");
            let parsed: Value = serde_json::from_str(&document.text).unwrap();
            assert!(!parsed.is_null(), "{} is empty", descriptor.uri);
        }
    }

    #[test]
    fn test_reads_are_identical() {
        let provider = provider();
        for uri in ResourceUri::all() {
            let first = provider.read(uri.as_str()).unwrap().text.clone();
            let second = provider.read(uri.as_str()).unwrap().text.clone();
            assert_eq!(first, second);
        }

        // A second provider renders the same bytes
        let other = ResourceProvider::new(&KnowledgeStore::load());
        assert_eq!(
            provider.read("jde://config/installation-checklist").unwrap(),
            other.read("jde://config/installation-checklist").unwrap()
        );
    }

    #[test]
    fn test_port_assignments() {
        let provider = provider();
        let document = provider.read("jde://reference/port-assignments").unwrap();
        let ports: Value = serde_json::from_str(&document.text).unwrap();
        assert_eq!(
            ports,
            json!({"weblogic_admin": 7001, "managed": 7003, "ais": 7075, "http": 80, "https": 443})
        );
        assert!(document.text.contains("\n  \"ais\": 7075"));
    }

    #[test]
    fn test_unknown_resource() {
        let provider = provider();
        for uri in [
            "jde://reference/port-assignment",
            "JDE://reference/port-assignments",
            " jde://reference/port-assignments",
            "",
        ] {
            assert_eq!(
                provider.read(uri).unwrap_err(),
                KbError::UnknownResource(uri.to_string())
            );
        }
    }

    #[test]
    fn test_checklist_contents() {
        let provider = provider();
        let document = provider.read("jde://config/installation-checklist").unwrap();
        let checklist: Value = serde_json::from_str(&document.text).unwrap();
        assert_eq!(checklist["checklist"].as_array().unwrap().len(), 10);
        assert!(checklist["prerequisites"]["html_server"]["windows"]["ports"].is_object());
    }

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let value = serde_json::to_value(ResourceUri::ErrorCodes.descriptor()).unwrap();
        assert_eq!(value["mimeType"], "application/json");
        assert_eq!(value["name"], "Error Codes Reference");
    }
}

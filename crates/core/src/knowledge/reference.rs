// Reference tables: documentation links, deployment models and the static
// reference documents published as resources

use super::tables;
use super::record_key;
use crate::types::{KnowledgeRecord, RecordCategory};
use serde_json::{json, Value};

const DOC_LIBRARY: &str = "https://docs.oracle.com/en/applications/jd-edwards/";
const SUPPORT: &str = "https://support.oracle.com";

pub(super) fn records() -> Vec<KnowledgeRecord> {
    let documentation = [
        ("installation_guide", doc("JD Edwards EnterpriseOne Applications Installation Guide", "Installing the Deployment, Enterprise and HTML servers, plus the database")),
        ("admin_guide", doc("JD Edwards EnterpriseOne Tools Server Manager Guide", "Administering managed servers, packages and ESU/ASU deployment")),
        ("security_guide", doc("JD Edwards EnterpriseOne Tools Security Administration Guide", "Authentication, authorization, row and application security")),
        ("upgrade_guide", doc("JD Edwards EnterpriseOne Applications Upgrade Guide", "Planning and performing Tools Release and application upgrades")),
        ("release_notes", doc("JD Edwards EnterpriseOne Tools Release 9.2 Release Notes", "Features, fixes and certifications for each Tools Release")),
        ("general", json!([
            {"title": "JDE Documentation Library", "url": DOC_LIBRARY},
            {"title": "My Oracle Support", "url": SUPPORT}
        ])),
    ];

    let deployment_models = [
        ("single_server", json!({
            "description": "All environments on single server",
            "port_offsets": 10,
            "notes": "Give every environment its own managed server; offset ports by 10 per environment"
        })),
        ("distributed", json!({
            "description": "Separate servers per environment",
            "recommended": true
        })),
        ("cloud_hybrid", json!({
            "description": "Mix of on-prem and cloud",
            "cloud_options": ["OCI", "AWS", "Azure"]
        })),
    ];

    let reference = [
        ("port_assignments", json!({
            "weblogic_admin": 7001,
            "managed": 7003,
            "ais": 7075,
            "http": 80,
            "https": 443
        })),
        ("tools_release_matrix", json!({
            "current": "9.2.7",
            "databases": ["Oracle 19c", "SQL Server 2019+"],
            "weblogic": ["12.2.1.4", "14.1.1"]
        })),
        ("error_codes", json!({
            "security": {"0001": "Invalid credentials"},
            "database": {"DB001": "Connection failed"}
        })),
    ];

    documentation
        .into_iter()
        .map(|(topic, payload)| (tables::DOCUMENTATION, topic, payload))
        .chain(
            deployment_models
                .into_iter()
                .map(|(topic, payload)| (tables::DEPLOYMENT_MODELS, topic, payload)),
        )
        .chain(
            reference
                .into_iter()
                .map(|(topic, payload)| (tables::REFERENCE, topic, payload)),
        )
        .map(|(table, topic, payload)| {
            KnowledgeRecord::new(
                record_key(table, topic),
                RecordCategory::ReferenceTable,
                payload,
            )
        })
        .collect()
}

fn doc(title: &str, summary: &str) -> Value {
    json!([{"title": title, "summary": summary, "url": DOC_LIBRARY}])
}

// Environment templates, Server Manager, Centralized Configuration and ESU/ASU tables

use super::tables;
use super::record_key;
use crate::types::{KnowledgeRecord, RecordCategory};
use serde_json::{json, Value};

pub(super) fn records() -> Vec<KnowledgeRecord> {
    let mut records = Vec::new();

    let environment_config = [
        (tables::ENVIRONMENTS, "PD920_production", production()),
        (tables::ENVIRONMENTS, "PY920_test", test()),
        (tables::ENVIRONMENTS, "DV920_development", development()),
        (tables::SERVER_MANAGER, "deployment_server", sm_deployment_server()),
        (tables::SERVER_MANAGER, "enterprise_server", sm_enterprise_server()),
        (tables::SERVER_MANAGER, "html_server", sm_html_server()),
        (tables::SERVER_MANAGER, "general", sm_general()),
        (tables::CENTRALIZED, "overview", central_overview()),
        (tables::CENTRALIZED, "setup", central_setup()),
        (tables::CENTRALIZED, "inheritance", central_inheritance()),
        (tables::CENTRALIZED, "troubleshooting", central_troubleshooting()),
    ];
    for (table, topic, payload) in environment_config {
        records.push(KnowledgeRecord::new(
            record_key(table, topic),
            RecordCategory::EnvironmentConfig,
            payload,
        ));
    }

    for (topic, payload) in esu_asu() {
        records.push(KnowledgeRecord::new(
            record_key(tables::ESU_ASU, topic),
            RecordCategory::ReferenceTable,
            payload,
        ));
    }

    records
}

fn data_source(name: &str, database: &str, kind: &str) -> Value {
    json!({"name": name, "database": database, "type": kind})
}

/// Data sources common to every path code; only production lists its tables.
fn data_sources(path_code: &str, suffix: &str) -> Value {
    json!({
        "system": data_source(&format!("System - {}", path_code), &format!("JDE_SYSTEM_{}", suffix), "System Tables"),
        "business_data": data_source(&format!("Business Data - {}", path_code), &format!("JDE_BUSDATA_{}", suffix), "Business Data Tables"),
        "central_objects": data_source(&format!("Central Objects - {}", path_code), &format!("JDE_CENTRAL_{}", suffix), "Central Objects"),
        "versions": data_source(&format!("Versions - {}", path_code), &format!("JDE_VERSIONS_{}", suffix), "Report Versions"),
        "control_tables": data_source(&format!("Control Tables - {}", path_code), &format!("JDE_CONTROL_{}", suffix), "Control Tables")
    })
}

fn production() -> Value {
    let mut sources = data_sources("PD920", "PD");
    let table_lists = [
        ("system", json!(["F0092", "F0093", "F0094", "F98101"])),
        ("business_data", json!(["F0101", "F0411", "F4211", "F4311"])),
        ("central_objects", json!(["F9860", "F9861", "F9862"])),
        ("versions", json!(["F983051", "F98306"])),
        ("control_tables", json!(["F0004", "F0005", "F0006", "F0010"])),
    ];
    for (source, list) in table_lists {
        if let Some(entry) = sources.get_mut(source).and_then(Value::as_object_mut) {
            entry.insert("tables".to_string(), list);
        }
    }

    json!({
        "path_code": "PD920",
        "environment_name": "Production",
        "description": "Production Environment - Live business operations",
        "release": "9.2 R24",
        "data_sources": sources,
        "server_map": {
            "enterprise_server": {
                "name": "ENT_PD920",
                "host": "jde-ent-prod.company.com",
                "port_range": "6000-6100"
            },
            "html_server": {
                "name": "HTML_PD920",
                "host": "jde-web-prod.company.com",
                "port": 7003,
                "url": "https://jde.company.com/jde"
            }
        },
        "ocm_mappings": {
            "description": "Object Configuration Manager mappings for production",
            "rules": [
                "All objects default to production data sources",
                "No development objects allowed in production OCM",
                "Custom objects must follow naming convention (55-59)"
            ]
        },
        "best_practices": [
            "Implement strict change control procedures - all changes via OMW projects",
            "Regular backups before any changes (daily differential, weekly full)",
            "Use Server Manager for all deployments - never manual file copies",
            "Monitor performance metrics continuously via Server Manager",
            "Implement row-level security for sensitive data",
            "Enable audit logging for compliance",
            "Schedule batch jobs during off-peak hours",
            "Maintain disaster recovery procedures"
        ],
        "security_level": "Highest",
        "change_control": "Required - All changes must be approved"
    })
}

fn test() -> Value {
    json!({
        "path_code": "PY920",
        "environment_name": "Prototype/Test",
        "description": "Test/QA Environment - UAT and integration testing",
        "release": "9.2 R24",
        "data_sources": data_sources("PY920", "PY"),
        "best_practices": [
            "Mirror production configuration where possible",
            "Use for UAT and integration testing before production",
            "Refresh data from production periodically (monthly recommended)",
            "Document all test scenarios and results",
            "Use realistic data volumes for performance testing",
            "Test all customizations thoroughly before promotion"
        ],
        "security_level": "Medium",
        "change_control": "Recommended"
    })
}

fn development() -> Value {
    json!({
        "path_code": "DV920",
        "environment_name": "Development",
        "description": "Development Environment - Object development and unit testing",
        "release": "9.2 R24",
        "data_sources": data_sources("DV920", "DV"),
        "development_tools": {
            "omw": {
                "name": "Object Management Workbench",
                "program": "P98220",
                "purpose": "Manage development projects and object lifecycle"
            },
            "oda": {"name": "Object Design Aid", "purpose": "Design and modify JDE objects"},
            "fda": {"name": "Form Design Aid", "purpose": "Create and modify interactive applications"},
            "rda": {"name": "Report Design Aid", "purpose": "Create and modify batch reports"}
        },
        "best_practices": [
            "Allow more flexibility for development activities",
            "Regular code promotions to test (weekly)",
            "Use Object Management Workbench (OMW) for all object changes",
            "Maintain development standards documentation",
            "Follow naming conventions for custom objects (55-59 prefix)",
            "Implement code review process before promotion",
            "Unit test all changes before moving to test environment"
        ],
        "security_level": "Lower",
        "change_control": "Optional - Developer discretion"
    })
}

fn steps(items: &[(&str, &str)]) -> Value {
    Value::Array(
        items
            .iter()
            .enumerate()
            .map(|(i, (action, details))| {
                json!({"step": i + 1, "action": action, "details": details})
            })
            .collect(),
    )
}

fn sm_deployment_server() -> Value {
    json!({
        "initial_setup": {
            "description": "Configure Deployment Server for JDE E1 9.2 R24",
            "steps": steps(&[
                ("Install Server Manager", "Run Server Manager installer on Windows Server"),
                ("Configure Database Connection", "Set up ODBC connection to JDE system database"),
                ("Set Up Shared Directories", "Configure network shares for package deployment"),
                ("Configure Deployment Locations", "Define paths for package builds and deployment"),
                ("Register Managed Servers", "Add Enterprise and HTML servers to Server Manager"),
            ])
        },
        "package_deployment": {
            "description": "Deploy packages to target environments",
            "steps": steps(&[
                ("Create Package Build", "Use Package Build to create deployment package"),
                ("Select Target Environment", "Choose destination environment (DEV/TEST/PROD)"),
                ("Deploy Package", "Execute deployment and monitor progress"),
                ("Verify Deployment", "Check deployment status and logs"),
            ])
        }
    })
}

fn sm_enterprise_server() -> Value {
    json!({
        "initial_setup": {
            "description": "Configure Enterprise Server for JDE E1 9.2 R24",
            "steps": steps(&[
                ("Install Enterprise Server Components", "Use Server Manager to install Enterprise Server"),
                ("Configure Host Code", "Set up host code for server identification"),
                ("Configure Kernel Processes", "Set up JDENET, JDEQUEUE, and JDEIPC kernels"),
                ("Configure Batch Processing", "Set up batch queues and job scheduling"),
                ("Start Enterprise Server", "Start all kernel processes and verify status"),
            ])
        },
        "kernel_configuration": {
            "JDENET": {
                "description": "Network kernel for JDE communications",
                "settings": {"max_connections": 100, "timeout": 300, "port_range": "6000-6100"}
            },
            "JDEQUEUE": {
                "description": "Queue kernel for asynchronous processing",
                "settings": {"max_workers": 10, "queue_size": 1000}
            },
            "JDEIPC": {
                "description": "IPC kernel for inter-process communication",
                "settings": {"shared_memory_size": "512MB"}
            }
        }
    })
}

fn sm_html_server() -> Value {
    json!({
        "initial_setup": {
            "description": "Configure HTML Server (Web Client) for JDE E1 9.2 R24",
            "steps": steps(&[
                ("Install WebLogic Server Prerequisites", "Install JDK and configure JAVA_HOME"),
                ("Deploy HTML Server via Server Manager", "Use Server Manager to deploy JAS instance"),
                ("Configure WebLogic Domain", "Create JDE HTML domain with managed servers"),
                ("Configure Managed Servers", "Set up managed server instances for each environment"),
                ("Set Up AIS Services", "Configure Application Interface Services if required"),
                ("Configure SSL (Optional)", "Set up SSL certificates for HTTPS access"),
                ("Start HTML Server", "Start WebLogic admin and managed servers"),
            ])
        },
        "ports": {
            "admin_server": {"default": 7001, "description": "WebLogic Administration Server"},
            "managed_server": {"default": 7003, "description": "JDE HTML Managed Server"},
            "ais_server": {"default": 7075, "description": "Application Interface Services"}
        },
        "jvm_settings": {
            "initial_heap": "-Xms4096m",
            "max_heap": "-Xmx8192m",
            "metaspace": "-XX:MetaspaceSize=512m",
            "gc_options": "-XX:+UseG1GC"
        }
    })
}

/// Generic guidance for Server Manager areas without a dedicated table.
fn sm_general() -> Value {
    json!({
        "initial_setup": {
            "description": "General Server Manager procedure for registering and configuring a managed server",
            "steps": steps(&[
                ("Install Management Agent", "Install the Server Manager agent on the target host"),
                ("Register Managed Home", "Register the agent's managed home in Server Manager"),
                ("Create Managed Instance", "Create the server instance from the Server Manager console"),
                ("Apply Configuration", "Review and save configuration settings for the instance"),
                ("Start and Verify", "Start the instance and confirm status in Server Manager"),
            ])
        },
        "notes": "Batch and logic servers are Enterprise Server instances dedicated to a role; most settings follow the Enterprise Server configuration"
    })
}

fn central_overview() -> Value {
    json!({
        "description": "Release 24 introduces Centralized Configuration to simplify management of settings across servers from Server Manager",
        "version_introduced": "Release 24 (9.2.7+)",
        "benefits": [
            "Set up default configuration that servers can inherit",
            "Reduces manual configuration effort across environments",
            "Ensures consistent settings across all managed servers",
            "Easier maintenance and updates - change once, apply everywhere",
            "Simplified onboarding of new servers",
            "Audit trail for configuration changes"
        ],
        "components": [
            "Server Manager Central Configuration",
            "Configuration Templates",
            "Inheritance Rules",
            "Override Management"
        ]
    })
}

fn central_setup() -> Value {
    json!({
        "prerequisites": [
            "Server Manager 9.2.7 or higher",
            "Administrative access to Server Manager",
            "All managed servers registered in Server Manager"
        ],
        "steps": steps(&[
            ("Access Server Manager", "Log in to Server Manager with administrator credentials"),
            ("Navigate to Centralized Configuration", "Select 'Centralized Configuration' from the Configuration menu"),
            ("Define Default Configuration Templates", "Create templates for common configurations (Enterprise Server, HTML Server, etc.)"),
            ("Assign Templates to Server Groups", "Group servers by type or environment and assign appropriate templates"),
            ("Configure Inheritance Rules", "Define which settings can be overridden at server level"),
            ("Test Configuration Deployment", "Deploy configuration to test servers first, then production"),
        ])
    })
}

fn central_inheritance() -> Value {
    json!({
        "description": "Inheritance allows servers to receive default settings while permitting local overrides",
        "hierarchy": [
            "Global Defaults -> Server Type Defaults -> Environment Defaults -> Individual Server"
        ],
        "override_behavior": [
            "Child settings override parent settings",
            "Locked settings cannot be overridden",
            "Audit log tracks all overrides"
        ]
    })
}

fn central_troubleshooting() -> Value {
    json!({
        "common_issues": [
            {
                "issue": "Configuration not applying to server",
                "causes": ["Server not registered", "Template not assigned", "Inheritance blocked"],
                "resolution": "Verify server registration, check template assignment, review inheritance rules"
            },
            {
                "issue": "Unexpected configuration values",
                "causes": ["Override in effect", "Wrong template assigned", "Stale cache"],
                "resolution": "Check for local overrides, verify template assignment, refresh server configuration"
            }
        ]
    })
}

fn esu_asu() -> Vec<(&'static str, Value)> {
    vec![
        (
            "orchestrator",
            json!({
                "description": "JDE Orchestrator for workflow automation",
                "required_components": [
                    {
                        "type": "ESU",
                        "name": "Orchestrator Foundation",
                        "mos_reference": "Check MOS for current Bug number",
                        "notes": "Required for basic Orchestrator functionality"
                    },
                    {
                        "type": "ASU",
                        "name": "Orchestrator Studio",
                        "version": "TL92500102+",
                        "notes": "Design-time component for creating orchestrations"
                    }
                ],
                "prerequisites": [
                    "AIS Server configured and running",
                    "HTML Server with REST services enabled"
                ]
            }),
        ),
        (
            "ux_one",
            json!({
                "description": "UX One role-based user experience",
                "required_components": [
                    {"type": "ASU", "name": "UX One Foundation", "notes": "Base components for UX One"},
                    {"type": "Content", "name": "UX One Role Content", "notes": "Role-specific content packages"}
                ]
            }),
        ),
        (
            "cafe_one",
            json!({
                "description": "CafeOne landing pages and dashboards",
                "required_components": [
                    {"type": "ASU", "name": "CafeOne Framework", "notes": "Landing page framework"}
                ]
            }),
        ),
        (
            "e1_page",
            json!({
                "description": "E1 Page Composer for custom pages",
                "required_components": [
                    {"type": "Tools", "name": "E1 Page Composer Tools", "notes": "Design tools for creating custom pages"}
                ]
            }),
        ),
        (
            "mobile",
            json!({
                "description": "JDE Mobile Enterprise applications",
                "required_components": [
                    {"type": "ESU", "name": "Mobile Foundation", "notes": "Required for mobile app connectivity"},
                    {"type": "Content", "name": "Mobile Application Content", "notes": "Pre-built mobile applications"}
                ],
                "prerequisites": [
                    "AIS Server with mobile services enabled",
                    "SSL certificate for secure mobile connections"
                ]
            }),
        ),
        (
            "general",
            json!({
                "description": "General ESU/ASU patching guidance for Tools Release 9.2",
                "required_components": [
                    {"type": "ESU", "name": "Planner ESU", "mos_reference": "Bug 26501747", "notes": "Install before any other ESU"},
                    {"type": "ESU", "name": "Tools Rollup ESU", "mos_reference": "Check MOS for current Bug number", "notes": "Apply the latest rollup for the installed Tools Release"},
                    {"type": "ASU", "name": "Tools Application Enhancement Rollup", "notes": "Deploy via P96470 (GH9612)"}
                ],
                "prerequisites": [
                    "Current backup of the Deployment Server and Server Manager configuration",
                    "Special instructions reviewed for every ESU/ASU"
                ]
            }),
        ),
    ]
}

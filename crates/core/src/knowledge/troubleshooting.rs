// Troubleshooting entries, log patterns and Configuration Utilities programs

use super::tables;
use super::record_key;
use crate::types::{KnowledgeRecord, RecordCategory};
use serde_json::{json, Value};

pub(super) fn records() -> Vec<KnowledgeRecord> {
    let issues = [
        ("deployment_server", deployment_server_issues()),
        ("html_server", html_server_issues()),
        ("enterprise_server", enterprise_server_issues()),
        ("database", database_issues()),
        ("general", general_steps()),
    ];

    let utilities = [
        ("overview", utilities_overview()),
        ("business_data", programs("Configure master data and business rules", &[
            ("P0004A", "User Defined Codes", "Maintain user defined code tables"),
            ("P0006A", "Business Unit Master", "Configure business unit hierarchy"),
            ("P0010", "Company Setup", "Configure company-level settings"),
        ])),
        ("task_views", programs("Configure task views and navigation", &[
            ("P9000", "Task View Configuration", "Set up task views for different user roles"),
        ])),
        ("roles", programs("Configure user roles and permissions", &[
            ("P00950", "Role Master", "Define and maintain user roles"),
            ("P00951", "Role Relationship", "Configure role hierarchies and relationships"),
        ])),
        ("security", programs("Configure security settings", &[
            ("P00950", "User Security", "Configure user-level security"),
            ("P00105", "Application Security", "Configure application-level security"),
            ("P00950W", "Row Security", "Configure row-level data security"),
        ])),
        ("program_versions", programs("Configure program versions", &[
            ("P98305", "Version Prompting Setup", "Configure version selection behavior"),
            ("P983051", "Batch Version Configuration", "Configure batch job versions"),
        ])),
    ];

    let issue_records = issues.into_iter().map(|(topic, payload)| {
        KnowledgeRecord::new(
            record_key(tables::TROUBLESHOOTING, topic),
            RecordCategory::TroubleshootingEntry,
            payload,
        )
    });

    let log_records = logs().into_iter().map(|(topic, payload)| {
        KnowledgeRecord::new(
            record_key(tables::LOGS, topic),
            RecordCategory::LogPattern,
            payload,
        )
    });

    let utility_records = utilities.into_iter().map(|(topic, payload)| {
        KnowledgeRecord::new(
            record_key(tables::UTILITIES, topic),
            RecordCategory::ReferenceTable,
            payload,
        )
    });

    issue_records
        .chain(log_records)
        .chain(utility_records)
        .collect()
}

fn deployment_server_issues() -> Value {
    json!({
        "common_issues": [
            {
                "symptom": "Package build fails",
                "error_messages": [
                    "Package build terminated with errors",
                    "Object check-out conflict",
                    "Insufficient disk space"
                ],
                "causes": [
                    "Insufficient disk space on deployment server",
                    "Object check-out conflicts in OMW",
                    "Database connectivity issues",
                    "Missing specifications"
                ],
                "diagnostic_steps": [
                    "Check disk space: dir /s on package build directory",
                    "Review Package Build log in Server Manager",
                    "Check OMW for conflicting check-outs",
                    "Verify database connectivity"
                ],
                "resolution": [
                    "Free up disk space or add storage",
                    "Resolve OMW check-out conflicts",
                    "Verify database connection settings",
                    "Rebuild specifications if needed"
                ],
                "log_files": [
                    "Server Manager Package Build Log",
                    "JDE.LOG on Deployment Server"
                ]
            },
            {
                "symptom": "Server Manager won't start",
                "error_messages": [
                    "Cannot connect to database",
                    "Port already in use",
                    "Service failed to start"
                ],
                "causes": [
                    "Database connection failure",
                    "Port conflicts with other applications",
                    "Service account credential issues",
                    "Corrupted configuration"
                ],
                "diagnostic_steps": [
                    "Check Windows Event Log for service errors",
                    "Verify database connectivity via ODBC",
                    "Check port availability: netstat -an | find \"7001\"",
                    "Validate service account credentials"
                ],
                "resolution": [
                    "Verify and fix database connection",
                    "Change ports or stop conflicting service",
                    "Reset service account password",
                    "Reinstall Server Manager if configuration corrupted"
                ],
                "log_files": [
                    "Windows Event Log > Application",
                    "Server Manager logs in install directory"
                ]
            },
            {
                "symptom": "ESU/ASU deployment fails",
                "causes": [
                    "Missing prerequisites",
                    "Incorrect deployment sequence",
                    "Database errors"
                ],
                "resolution": [
                    "Verify all prerequisites are met",
                    "Follow deployment sequence in special instructions",
                    "Check database for errors",
                    "Review ESU/ASU deployment log"
                ]
            }
        ]
    })
}

fn html_server_issues() -> Value {
    json!({
        "common_issues": [
            {
                "symptom": "Cannot access web client",
                "error_messages": [
                    "Connection refused",
                    "404 Not Found",
                    "503 Service Unavailable"
                ],
                "causes": [
                    "WebLogic server not running",
                    "Port blocked by firewall",
                    "SSL certificate issues",
                    "JAS application not deployed"
                ],
                "diagnostic_steps": [
                    "Check WebLogic Admin Console status",
                    "Verify managed server is running",
                    "Test port connectivity: telnet server 7003",
                    "Check firewall rules"
                ],
                "resolution": [
                    "Start WebLogic admin and managed servers",
                    "Open required ports in firewall",
                    "Renew or fix SSL certificates",
                    "Redeploy JAS application"
                ],
                "log_files": [
                    "WebLogic Server Log: $DOMAIN_HOME/servers/*/logs/*.log",
                    "JAS Log: $DOMAIN_HOME/servers/*/logs/jas*.log"
                ]
            },
            {
                "symptom": "Slow web client performance",
                "causes": [
                    "Insufficient JVM heap memory",
                    "Network latency",
                    "Database query performance",
                    "Too many concurrent users"
                ],
                "resolution": [
                    "Increase JVM heap settings (-Xmx)",
                    "Optimize network configuration",
                    "Review and optimize slow queries",
                    "Scale out with additional managed servers"
                ]
            },
            {
                "symptom": "Session timeout issues",
                "causes": [
                    "Incorrect timeout configuration",
                    "Load balancer timeout mismatch"
                ],
                "resolution": [
                    "Adjust session timeout in jas.ini",
                    "Align load balancer timeout settings",
                    "Configure sticky sessions if using load balancer"
                ]
            }
        ]
    })
}

fn enterprise_server_issues() -> Value {
    json!({
        "common_issues": [
            {
                "symptom": "Batch jobs not running",
                "causes": [
                    "Batch queue not started",
                    "Job scheduler issue",
                    "Database connectivity"
                ],
                "diagnostic_steps": [
                    "Check batch queue status in Server Manager",
                    "Review job scheduler configuration",
                    "Verify Enterprise Server kernels are running"
                ],
                "resolution": [
                    "Start batch queue via Server Manager",
                    "Restart job scheduler",
                    "Verify database connectivity",
                    "Check UBE logs for specific errors"
                ],
                "log_files": [
                    "JDE.LOG on Enterprise Server",
                    "UBE output files in PrintQueue directory"
                ]
            },
            {
                "symptom": "JDENET kernel crashes",
                "causes": ["Memory exhaustion", "Too many connections", "Network issues"],
                "resolution": [
                    "Increase kernel memory allocation",
                    "Optimize connection pooling",
                    "Review network configuration"
                ]
            }
        ]
    })
}

fn database_issues() -> Value {
    json!({
        "common_issues": [
            {
                "symptom": "Database connection timeouts",
                "causes": ["Network issues", "Database overloaded", "Connection pool exhausted"],
                "resolution": [
                    "Check network connectivity",
                    "Review database performance",
                    "Increase connection pool size"
                ]
            },
            {
                "symptom": "Table conversion errors",
                "causes": ["Missing indexes", "Data integrity issues", "Insufficient space"],
                "resolution": [
                    "Rebuild missing indexes",
                    "Clean up data integrity issues",
                    "Add database storage"
                ]
            }
        ]
    })
}

fn general_steps() -> Value {
    json!({
        "general_steps": [
            "Check Server Manager logs",
            "Verify database connectivity",
            "Review JDE.LOG"
        ]
    })
}

fn logs() -> Vec<(&'static str, Value)> {
    vec![
        (
            "jde_log",
            json!({
                "location": {
                    "windows": "C:\\JDEdwards\\E920\\system\\bin32\\jde.log",
                    "linux": "/u01/jdedwards/e920/system/bin32/jde.log"
                },
                "description": "Main JDE application log",
                "key_patterns": [
                    {"pattern": "Error", "meaning": "General error condition", "action": "Review error details and context"},
                    {"pattern": "BSFN ERROR", "meaning": "Business function error", "action": "Check BSFN name and error code"},
                    {"pattern": "SQL Error", "meaning": "Database query error", "action": "Review SQL statement and database logs"}
                ]
            }),
        ),
        (
            "jas_log",
            json!({
                "location": "$DOMAIN_HOME/servers/*/logs/jas*.log",
                "description": "JDE Application Server log for web client",
                "key_patterns": [
                    {"pattern": "Exception", "meaning": "Java exception occurred", "action": "Review full stack trace"},
                    {"pattern": "OutOfMemoryError", "meaning": "JVM heap exhausted", "action": "Increase heap size or investigate memory leak"}
                ]
            }),
        ),
        (
            "weblogic_log",
            json!({
                "location": "$DOMAIN_HOME/servers/*/logs/*server.log",
                "description": "WebLogic server log",
                "key_patterns": [
                    {"pattern": "BEA-", "meaning": "WebLogic-specific message", "action": "Look up BEA error code"},
                    {"pattern": "Stuck Thread", "meaning": "Thread blocked for extended period", "action": "Review thread dump, check for deadlocks"}
                ]
            }),
        ),
        (
            "server_manager_log",
            json!({
                "location": "Server Manager installation directory/logs",
                "description": "Server Manager operation logs",
                "key_patterns": [
                    {"pattern": "Deployment", "meaning": "Package deployment activity", "action": "Review deployment status"}
                ]
            }),
        ),
        (
            "package_build_log",
            json!({
                "location": "Server Manager > Package Build History",
                "description": "Package build detailed log",
                "key_patterns": [
                    {"pattern": "BLDPKG ERROR", "meaning": "Package build error", "action": "Review error details, check object status"}
                ]
            }),
        ),
    ]
}

fn utilities_overview() -> Value {
    json!({
        "program": "P01RS01",
        "name": "JD Edwards EnterpriseOne Configuration Utilities",
        "description": "Central point for configuration programs and tools to set up and configure business data, task views, roles, security, and program versions",
        "menu": "GH9612",
        "capabilities": [
            "Import and export large amounts of data during initial setup",
            "Configure business processes across modules",
            "Set up valid configurations and implementations",
            "Manage roles and security settings",
            "Configure program versions"
        ]
    })
}

fn programs(description: &str, entries: &[(&str, &str, &str)]) -> Value {
    let programs: Vec<Value> = entries
        .iter()
        .map(|(program, name, purpose)| {
            json!({"program": program, "name": name, "purpose": purpose})
        })
        .collect();

    json!({"description": description, "programs": programs})
}

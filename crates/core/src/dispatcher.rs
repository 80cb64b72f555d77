//! Tool dispatcher.
//!
//! Turns a validated [`ToolRequest`] into a [`ToolResponse`] by looking up
//! the knowledge store. Once arguments have been validated, execution never
//! fails: a missing record is replaced by the documented substitute for that
//! tool, and the response says so.

use crate::catalog::ToolRequest;
use crate::domain::*;
use crate::error::KbResult;
use crate::knowledge::{tables, KnowledgeStore, GENERAL_TOPIC};
use crate::types::{MatchKind, ToolResponse};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::sync::Arc;

const MANAGED_SERVER_PORT: u64 = 7003;
const DEFAULT_PORT_OFFSET: u64 = 10;

// Words too common to identify a symptom
const STOP_WORDS: &[&str] = &["the", "and", "for", "with", "from", "when", "are", "was"];

/// Executes tool calls against a shared, read-only knowledge store
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: Arc<KnowledgeStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<KnowledgeStore>) -> Self {
        Self { store }
    }

    /// Validate and execute a call arriving from a transport.
    pub fn invoke(&self, name: &str, arguments: &Value) -> KbResult<ToolResponse> {
        let request = ToolRequest::from_call(name, arguments)?;

        tracing::info!(tool = %request.tool(), "Tool called");
        Ok(self.execute(&request))
    }

    pub fn execute(&self, request: &ToolRequest) -> ToolResponse {
        match request {
            ToolRequest::InstallationPrerequisites {
                component,
                platform,
            } => self.prerequisites(*component, *platform),
            ToolRequest::InstallationSequence { environment_type } => {
                self.installation_sequence(*environment_type)
            }
            ToolRequest::EnvironmentConfiguration {
                environment,
                section,
            } => self.environment_configuration(*environment, *section),
            ToolRequest::ServerManagerConfig { area, operation } => {
                self.server_manager(*area, *operation)
            }
            ToolRequest::CentralizedConfiguration { scope } => self.centralized(*scope),
            ToolRequest::DiagnoseIssue {
                symptom,
                component,
                environment,
            } => self.diagnose(symptom, *component, environment),
            ToolRequest::EsuAsuRequirements {
                feature_area,
                tools_release,
            } => self.esu_asu(*feature_area, tools_release),
            ToolRequest::WeblogicConfiguration { server_type, area } => {
                self.weblogic(*server_type, *area)
            }
            ToolRequest::ConfigurationUtilities { area } => self.utilities(*area),
            ToolRequest::SearchDocumentation { topic, doc_type } => {
                self.documentation(topic, *doc_type)
            }
            ToolRequest::LogAnalysis {
                log_type,
                issue_type,
            } => self.log_analysis(*log_type, issue_type.as_deref()),
            ToolRequest::MultiEnvironment { model, environments } => {
                self.multi_environment(*model, environments)
            }
        }
    }

    fn prerequisites(&self, component: PrereqComponent, platform: Platform) -> ToolResponse {
        let (mut result, matched) = if component == PrereqComponent::All {
            let mut collected = Map::new();
            let mut unavailable = Vec::new();

            for comp in PrereqComponent::CONCRETE {
                let record = self.store.payload(tables::PREREQUISITES, comp.as_str());
                match platform_section(comp, record, platform) {
                    Some(section) => {
                        collected.insert(comp.as_str().to_string(), section.clone());
                    }
                    None => unavailable.push(comp.as_str()),
                }
            }

            let matched = if unavailable.is_empty() {
                MatchKind::Exact
            } else {
                MatchKind::Fallback
            };
            let mut result = json!({
                "platform": platform.as_str(),
                "prerequisites": collected,
            });
            if !unavailable.is_empty() {
                result["unavailable_for_platform"] = json!(unavailable);
            }
            (result, matched)
        } else {
            let record = self.store.payload(tables::PREREQUISITES, component.as_str());
            let (prerequisites, matched) = match platform_section(component, record, platform) {
                Some(section) => (section.clone(), MatchKind::Exact),
                None => {
                    tracing::debug!(
                        component = %component,
                        platform = %platform,
                        "No platform record, returning all platforms"
                    );
                    (record.clone(), MatchKind::Fallback)
                }
            };
            let result = json!({
                "component": component.as_str(),
                "platform": platform.as_str(),
                "prerequisites": prerequisites,
            });
            (result, matched)
        };

        result["notes"] = json!([
            "Verify against Oracle Certifications",
            "Check MOS for latest patches"
        ]);
        structured(result, matched)
    }

    fn installation_sequence(&self, environment_type: EnvironmentType) -> ToolResponse {
        let resolved = self.store.resolve(
            tables::SEQUENCES,
            environment_type.as_str(),
            EnvironmentType::Production.as_str(),
        );

        structured(
            json!({
                "environment_type": environment_type.as_str(),
                "installation_sequence": resolved.payload,
                "notes": ["Follow steps in order", "Do not skip backups", "Document all changes"],
            }),
            resolved.matched,
        )
    }

    fn environment_configuration(
        &self,
        environment: Environment,
        section: EnvironmentSection,
    ) -> ToolResponse {
        let record = self.store.payload(tables::ENVIRONMENTS, environment.as_str());

        let (field, data, matched) = match section {
            EnvironmentSection::All => ("configuration", record.clone(), MatchKind::Exact),
            EnvironmentSection::PathCodes => {
                let identity: Map<String, Value> =
                    ["path_code", "environment_name", "description", "release"]
                        .into_iter()
                        .filter_map(|key| record.get(key).map(|v| (key.to_string(), v.clone())))
                        .collect();
                ("data", Value::Object(identity), MatchKind::Exact)
            }
            EnvironmentSection::DataSources => {
                section_or_record(record, section.as_str(), "data_sources")
            }
            EnvironmentSection::OcmMappings | EnvironmentSection::ServerMap => {
                section_or_record(record, section.as_str(), "data")
            }
        };

        let mut result = json!({"environment": environment.as_str()});
        if section != EnvironmentSection::All {
            result["component"] = json!(section.as_str());
        }
        result[field] = data;
        structured(result, matched)
    }

    fn server_manager(
        &self,
        area: ServerManagerArea,
        operation: ServerManagerOperation,
    ) -> ToolResponse {
        let area_record = self
            .store
            .resolve(tables::SERVER_MANAGER, area.as_str(), GENERAL_TOPIC);

        let (configuration, operation_match) = match area_record.payload.get(operation.as_str()) {
            Some(data) => (data.clone(), MatchKind::Exact),
            None => {
                tracing::debug!(
                    area = %area,
                    operation = %operation,
                    "No operation record, using initial setup"
                );
                let setup = area_record
                    .payload
                    .get(ServerManagerOperation::InitialSetup.as_str())
                    .cloned()
                    .unwrap_or(Value::Null);
                (setup, MatchKind::Fallback)
            }
        };

        let mut result = json!({
            "config_area": area.as_str(),
            "operation": operation.as_str(),
            "configuration": configuration,
        });
        if let Some(notes) = area_record.payload.get("notes") {
            result["notes"] = notes.clone();
        }
        structured(result, area_record.matched.and(operation_match))
    }

    fn centralized(&self, scope: CentralizedScope) -> ToolResponse {
        let resolved = self.store.resolve(
            tables::CENTRALIZED,
            scope.as_str(),
            CentralizedScope::Overview.as_str(),
        );

        structured(
            json!({
                "feature": "Centralized Configuration (Release 24)",
                "scope": scope.as_str(),
                "details": resolved.payload,
            }),
            resolved.matched,
        )
    }

    fn diagnose(
        &self,
        symptom: &str,
        component: DiagnosticComponent,
        environment: &str,
    ) -> ToolResponse {
        let issues = self
            .store
            .payload(tables::TROUBLESHOOTING, component.as_str())
            .get("common_issues")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let reported = words(symptom);
        let matching: Vec<&Value> = issues
            .iter()
            .filter(|issue| {
                let known = words(field_str(issue, "symptom"));
                !known.is_disjoint(&reported)
            })
            .collect();

        let mut lines = vec![
            format!("Diagnosis for {} (environment: {})", component, environment),
            format!("Symptom: {}", symptom),
            String::new(),
        ];

        if matching.is_empty() {
            lines.push("No exact match for this symptom; use the general troubleshooting steps.".to_string());
            if !issues.is_empty() {
                lines.push(String::new());
                lines.push(format!("Known issues for {}:", component));
                lines.extend(issues.iter().map(|i| format!("  - {}", field_str(i, "symptom"))));
            }
        } else {
            lines.push("Matching issues:".to_string());
            for (i, issue) in matching.iter().enumerate() {
                lines.push(format!("{}. {}", i + 1, field_str(issue, "symptom")));
                for (key, heading) in [
                    ("error_messages", "Error messages"),
                    ("causes", "Likely causes"),
                    ("diagnostic_steps", "Diagnostic steps"),
                    ("resolution", "Resolution"),
                    ("log_files", "Log files"),
                ] {
                    let items = string_items(issue.get(key));
                    if !items.is_empty() {
                        lines.push(format!("   {}:", heading));
                        lines.extend(items.iter().map(|item| format!("     - {}", item)));
                    }
                }
            }
        }

        lines.push(String::new());
        lines.push("General steps:".to_string());
        let general = self.store.payload(tables::TROUBLESHOOTING, GENERAL_TOPIC);
        lines.extend(
            string_items(general.get("general_steps"))
                .iter()
                .map(|step| format!("  - {}", step)),
        );

        if matching.is_empty() {
            tracing::debug!(component = %component, "No symptom match, using general steps");
            narrative(lines, Some("general troubleshooting steps"))
        } else {
            narrative(lines, None)
        }
    }

    fn esu_asu(&self, feature_area: FeatureArea, tools_release: &str) -> ToolResponse {
        let resolved = self
            .store
            .resolve(tables::ESU_ASU, feature_area.as_str(), GENERAL_TOPIC);

        structured(
            json!({
                "feature_area": feature_area.as_str(),
                "tools_release": tools_release,
                "requirements": resolved.payload,
                "note": "Check My Oracle Support for current patch numbers",
            }),
            resolved.matched,
        )
    }

    fn weblogic(&self, server_type: WeblogicServer, area: WeblogicArea) -> ToolResponse {
        let html = self
            .store
            .payload(tables::SERVER_MANAGER, ServerManagerArea::HtmlServer.as_str());
        let ports = html.get("ports").cloned().unwrap_or(Value::Null);
        let jvm_settings = html.get("jvm_settings").cloned().unwrap_or(Value::Null);
        let setup_steps = html
            .get(WeblogicArea::InitialSetup.as_str())
            .and_then(|setup| setup.get("steps"))
            .cloned()
            .unwrap_or(Value::Null);

        let (focus, matched) = match area {
            WeblogicArea::InitialSetup => (setup_steps.clone(), MatchKind::Exact),
            WeblogicArea::Ports => (ports.clone(), MatchKind::Exact),
            WeblogicArea::JvmSettings => (jvm_settings.clone(), MatchKind::Exact),
            WeblogicArea::ManagedServers | WeblogicArea::Clustering | WeblogicArea::Ssl => {
                tracing::debug!(area = %area, "No WebLogic area record, using setup steps");
                (setup_steps.clone(), MatchKind::Fallback)
            }
        };

        structured(
            json!({
                "server_type": server_type.as_str(),
                "config_area": area.as_str(),
                "default_port": ports.get(server_type.port_key()).and_then(|p| p.get("default")),
                "focus": focus,
                "ports": ports,
                "jvm_settings": jvm_settings,
                "setup_steps": setup_steps,
            }),
            matched,
        )
    }

    fn utilities(&self, area: UtilityArea) -> ToolResponse {
        let resolved = self.store.resolve(
            tables::UTILITIES,
            area.as_str(),
            UtilityArea::Overview.as_str(),
        );

        structured(
            json!({
                "program": "P01RS01",
                "utility_area": area.as_str(),
                "details": resolved.payload,
                "menu": "GH9612",
            }),
            resolved.matched,
        )
    }

    fn documentation(&self, topic: &str, doc_type: DocType) -> ToolResponse {
        let guides: Vec<(DocType, &Value)> = DocType::all()
            .iter()
            .copied()
            .filter(|d| *d != DocType::All && (doc_type == DocType::All || *d == doc_type))
            .flat_map(|d| {
                self.store
                    .payload(tables::DOCUMENTATION, d.as_str())
                    .as_array()
                    .map(Vec::as_slice)
                    .unwrap_or_default()
                    .iter()
                    .map(move |entry| (d, entry))
            })
            .collect();

        let mut lines = vec![
            format!("Documentation for \"{}\" (doc type: {})", topic, doc_type),
            String::new(),
        ];
        for (kind, entry) in &guides {
            lines.push(format!("- {} [{}]", field_str(entry, "title"), kind));
            let summary = field_str(entry, "summary");
            if !summary.is_empty() {
                lines.push(format!("  {}", summary));
            }
            lines.push(format!("  {}", field_str(entry, "url")));
        }

        lines.push(String::new());
        lines.push("General resources:".to_string());
        let general = self.store.payload(tables::DOCUMENTATION, GENERAL_TOPIC);
        for entry in general.as_array().map(Vec::as_slice).unwrap_or_default() {
            lines.push(format!(
                "- {}: {}",
                field_str(entry, "title"),
                field_str(entry, "url")
            ));
        }

        narrative(lines, None)
    }

    fn log_analysis(&self, log_type: LogType, issue_type: Option<&str>) -> ToolResponse {
        let selected: Vec<LogType> = if log_type == LogType::All {
            LogType::all()
                .iter()
                .copied()
                .filter(|l| *l != LogType::All)
                .collect()
        } else {
            vec![log_type]
        };

        let wanted = issue_type.map(words).unwrap_or_default();
        let mentions_issue = |pattern: &Value| {
            let haystack = format!(
                "{} {}",
                field_str(pattern, "pattern"),
                field_str(pattern, "meaning")
            )
            .to_lowercase();
            wanted.iter().any(|word| haystack.contains(word.as_str()))
        };

        let filtering = !wanted.is_empty()
            && selected.iter().any(|l| {
                patterns(self.store.payload(tables::LOGS, l.as_str()))
                    .iter()
                    .any(&mentions_issue)
            });

        let mut lines = vec![format!("Log analysis guidance: {}", log_type)];
        if let Some(issue) = issue_type {
            lines.push(format!("Issue filter: {}", issue));
        }

        for log in &selected {
            let record = self.store.payload(tables::LOGS, log.as_str());
            let shown: Vec<&Value> = patterns(record)
                .iter()
                .filter(|p| !filtering || mentions_issue(*p))
                .collect();
            if filtering && shown.is_empty() {
                continue;
            }

            lines.push(String::new());
            lines.push(format!("{} - {}", log, field_str(record, "description")));
            match record.get("location") {
                Some(Value::Object(by_platform)) => {
                    for (platform, path) in by_platform {
                        lines.push(format!(
                            "  Location ({}): {}",
                            platform,
                            path.as_str().unwrap_or_default()
                        ));
                    }
                }
                Some(Value::String(path)) => lines.push(format!("  Location: {}", path)),
                _ => {}
            }
            lines.push("  Patterns:".to_string());
            for pattern in shown {
                lines.push(format!(
                    "    - \"{}\": {} -> {}",
                    field_str(pattern, "pattern"),
                    field_str(pattern, "meaning"),
                    field_str(pattern, "action")
                ));
            }
        }

        if issue_type.is_some() && !filtering {
            tracing::debug!(log_type = %log_type, "No pattern mentions the issue, listing all");
            narrative(lines, Some("no pattern mentions the issue, listing all patterns"))
        } else {
            narrative(lines, None)
        }
    }

    fn multi_environment(&self, model: DeploymentModel, environments: &[String]) -> ToolResponse {
        let guidance = self.store.payload(tables::DEPLOYMENT_MODELS, model.as_str());
        let offset = guidance
            .get("port_offsets")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_PORT_OFFSET);

        let mut matched = MatchKind::Exact;
        let plan: Vec<Value> = environments
            .iter()
            .filter(|name| !name.is_empty())
            .enumerate()
            .map(|(i, name)| {
                let (path_code, known) = match known_environment(name) {
                    Some(env) => (env.path_code().to_string(), true),
                    None => {
                        matched = MatchKind::Fallback;
                        (derived_path_code(name), false)
                    }
                };
                let html_port = match model {
                    DeploymentModel::SingleServer => MANAGED_SERVER_PORT + offset * i as u64,
                    DeploymentModel::Distributed | DeploymentModel::CloudHybrid => {
                        MANAGED_SERVER_PORT
                    }
                };
                json!({
                    "name": name,
                    "path_code": path_code,
                    "standard_path_code": known,
                    "html_port": html_port,
                })
            })
            .collect();

        let mut result = json!({
            "deployment_model": model.as_str(),
            "guidance": guidance,
            "environments": plan,
        });
        if environments.iter().all(|name| name.is_empty()) {
            result["notes"] = json!(["No environments named; guidance covers the model only"]);
        }
        structured(result, matched)
    }
}

/// Structured payload tagged with the lookup outcome.
fn structured(mut value: Value, matched: MatchKind) -> ToolResponse {
    if let Value::Object(map) = &mut value {
        map.insert("match".to_string(), json!(matched.as_str()));
    }
    ToolResponse::Structured(value)
}

/// Narrative text. A fallback adds a trailing line naming the substitute.
fn narrative(mut lines: Vec<String>, fallback: Option<&str>) -> ToolResponse {
    if let Some(reason) = fallback {
        lines.push(String::new());
        lines.push(format!("Fallback: {}", reason));
    }
    ToolResponse::Text(lines.join("\n"))
}

/// A component's record for one platform. Database requirements are not
/// split by platform and are returned whole.
fn platform_section(component: PrereqComponent, record: &Value, platform: Platform) -> Option<&Value> {
    if component == PrereqComponent::Database {
        return (!record.is_null()).then_some(record);
    }
    record.get(platform.as_str())
}

fn section_or_record(record: &Value, section: &str, field: &'static str) -> (&'static str, Value, MatchKind) {
    match record.get(section) {
        Some(data) => (field, data.clone(), MatchKind::Exact),
        None => {
            tracing::debug!(section, "Environment has no such section, returning whole record");
            (field, record.clone(), MatchKind::Fallback)
        }
    }
}

fn field_str<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn string_items(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

fn patterns(record: &Value) -> &[Value] {
    record
        .get("key_patterns")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Lowercased words of at least three characters, minus stop words.
fn words(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\'').to_lowercase())
        .filter(|w| w.chars().count() >= 3 && !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

fn known_environment(name: &str) -> Option<Environment> {
    if let Some(env) = Environment::parse_lenient(name) {
        return Some(env);
    }

    let name = name.trim().to_ascii_lowercase();
    Environment::all().iter().copied().find(|env| {
        let aliases: &[&str] = match env {
            Environment::Production => &["production", "prod", "pd"],
            Environment::Test => &["test", "py", "qa", "prototype"],
            Environment::Development => &["development", "dev", "dv"],
        };
        env.path_code().eq_ignore_ascii_case(&name) || aliases.contains(&name.as_str())
    })
}

/// Path code for a custom environment: two leading letters plus the release.
fn derived_path_code(name: &str) -> String {
    let prefix: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(2)
        .collect::<String>()
        .to_ascii_uppercase();

    if prefix.is_empty() {
        "CUSTOM920".to_string()
    } else {
        format!("{}920", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ParamKind, ToolName};
    use crate::error::KbError;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(KnowledgeStore::load()))
    }

    /// Every combination of enumerated values for a tool, with sample text
    /// for free-text and list arguments.
    fn combinations(tool: ToolName) -> Vec<Value> {
        let mut combos = vec![Map::new()];
        for param in tool.descriptor().params {
            let choices: Vec<Value> = match &param.kind {
                ParamKind::Choice(values) => values.iter().map(|v| json!(v)).collect(),
                ParamKind::Text => vec![json!("package build fails with errors")],
                ParamKind::TextList => vec![json!(["PD920", "CRP"]), json!([])],
            };
            let mut next = Vec::new();
            for combo in &combos {
                if !param.required {
                    next.push(combo.clone());
                }
                for choice in &choices {
                    let mut extended = combo.clone();
                    extended.insert(param.name.to_string(), choice.clone());
                    next.push(extended);
                }
            }
            combos = next;
        }
        combos.into_iter().map(Value::Object).collect()
    }

    #[test]
    fn test_every_valid_call_yields_guidance() {
        let dispatcher = dispatcher();
        for tool in ToolName::all() {
            for args in combinations(*tool) {
                let response = dispatcher
                    .invoke(tool.as_str(), &args)
                    .unwrap_or_else(|e| panic!("{} {} failed: {}", tool, args, e));
                assert!(!response.is_empty(), "{} {} returned nothing", tool, args);
            }
        }
    }

    #[test]
    fn test_response_shapes() {
        let dispatcher = dispatcher();
        let narrative_tools = [
            ToolName::DiagnoseConfigurationIssue,
            ToolName::GetLogAnalysisGuidance,
            ToolName::SearchJdeDocumentation,
        ];

        for tool in ToolName::all() {
            let args = combinations(*tool).remove(0);
            let response = dispatcher.invoke(tool.as_str(), &args).unwrap();
            if narrative_tools.contains(tool) {
                assert!(response.as_text().is_some(), "{} should be narrative", tool);
            } else {
                let payload = response.as_structured().unwrap();
                assert!(payload.get("match").is_some(), "{} has no match tag", tool);
            }
        }
    }

    #[test]
    fn test_invalid_component() {
        let err = dispatcher()
            .invoke(
                "research_installation_prerequisites",
                &json!({"component": "bogus_component", "platform": "windows"}),
            )
            .unwrap_err();

        match err {
            KbError::InvalidArgument { field, value, allowed } => {
                assert_eq!(field, "component");
                assert_eq!(value, "bogus_component");
                assert!(allowed.contains(&"deployment_server".to_string()));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tool_is_checked_first() {
        let err = dispatcher().invoke("no_such_tool", &json!("not an object")).unwrap_err();
        assert_eq!(err, KbError::UnknownTool("no_such_tool".into()));
    }

    #[test]
    fn test_production_data_sources() {
        let response = dispatcher()
            .invoke(
                "get_environment_configuration",
                &json!({"environment": "PD920_production", "component": "data_sources"}),
            )
            .unwrap();

        let payload = response.as_structured().unwrap();
        assert_eq!(payload["environment"], "PD920_production");
        assert_eq!(payload["match"], "exact");
        assert_eq!(payload["data_sources"]["system"]["database"], "JDE_SYSTEM_PD");
        assert!(payload["data_sources"]["business_data"]["tables"].is_array());
    }

    #[test]
    fn test_missing_environment_section_falls_back() {
        let response = dispatcher()
            .invoke(
                "get_environment_configuration",
                &json!({"environment": "PY920_test", "component": "server_map"}),
            )
            .unwrap();

        let payload = response.as_structured().unwrap();
        assert_eq!(payload["match"], "fallback");
        assert_eq!(payload["data"]["path_code"], "PY920");
    }

    #[test]
    fn test_prerequisites_platform_fallback() {
        let dispatcher = dispatcher();

        let linux = dispatcher
            .invoke(
                "research_installation_prerequisites",
                &json!({"component": "enterprise_server", "platform": "linux"}),
            )
            .unwrap();
        let payload = linux.as_structured().unwrap();
        assert_eq!(payload["match"], "fallback");
        assert!(payload["prerequisites"]["windows"].is_object());

        let all = dispatcher
            .invoke(
                "research_installation_prerequisites",
                &json!({"component": "all", "platform": "linux"}),
            )
            .unwrap();
        let payload = all.as_structured().unwrap();
        assert!(payload["prerequisites"]["deployment_server"]["os"].is_array());
        assert!(payload["prerequisites"]["database"]["oracle_db"].is_object());
        assert_eq!(
            payload["unavailable_for_platform"],
            json!(["enterprise_server", "html_server"])
        );
    }

    #[test]
    fn test_kernel_configuration() {
        let response = dispatcher()
            .invoke(
                "research_server_manager_config",
                &json!({"config_area": "enterprise_server", "operation": "kernel_configuration"}),
            )
            .unwrap();
        let payload = response.as_structured().unwrap();
        assert_eq!(payload["match"], "exact");
        assert!(payload["configuration"]["JDENET"].is_object());

        let batch = dispatcher()
            .invoke(
                "research_server_manager_config",
                &json!({"config_area": "batch_server"}),
            )
            .unwrap();
        let payload = batch.as_structured().unwrap();
        assert_eq!(payload["match"], "fallback");
        assert!(payload["configuration"]["steps"].is_array());
    }

    #[test]
    fn test_diagnose_matches_symptom_words() {
        let response = dispatcher()
            .invoke(
                "diagnose_configuration_issue",
                &json!({"symptom": "Package BUILD keeps failing", "component": "deployment_server"}),
            )
            .unwrap();

        let text = response.as_text().unwrap();
        assert!(text.contains("1. Package build fails"));
        assert!(text.contains("environment: Not specified"));
        assert!(!text.contains("Fallback:"));
    }

    #[test]
    fn test_diagnose_without_match() {
        let response = dispatcher()
            .invoke(
                "diagnose_configuration_issue",
                &json!({"symptom": "printer jammed", "component": "client", "environment": "PD920"}),
            )
            .unwrap();

        let text = response.as_text().unwrap();
        assert!(text.contains("No exact match"));
        assert!(text.contains("Review JDE.LOG"));
        assert!(text.ends_with("Fallback: general troubleshooting steps"));
    }

    #[test]
    fn test_weblogic_default_port() {
        let response = dispatcher()
            .invoke("get_weblogic_configuration", &json!({"server_type": "ais_server"}))
            .unwrap();
        let payload = response.as_structured().unwrap();
        assert_eq!(payload["default_port"], 7075);
        assert_eq!(payload["config_area"], "initial_setup");
        assert_eq!(payload["focus"], payload["setup_steps"]);
    }

    #[test]
    fn test_log_issue_filter() {
        let dispatcher = dispatcher();

        let filtered = dispatcher
            .invoke(
                "get_log_analysis_guidance",
                &json!({"log_type": "all", "issue_type": "memory"}),
            )
            .unwrap();
        let text = filtered.as_text().unwrap();
        assert!(text.contains("OutOfMemoryError"));
        assert!(!text.contains("BLDPKG ERROR"));

        let unfiltered = dispatcher
            .invoke(
                "get_log_analysis_guidance",
                &json!({"log_type": "jde_log", "issue_type": "printer"}),
            )
            .unwrap();
        let text = unfiltered.as_text().unwrap();
        assert!(text.contains("BSFN ERROR"));
        assert!(text.contains("Location (linux)"));
        assert!(text.contains("Fallback:"));
    }

    #[test]
    fn test_documentation_filter() {
        let dispatcher = dispatcher();

        let security = dispatcher
            .invoke(
                "search_jde_documentation",
                &json!({"topic": "row security", "doc_type": "security_guide"}),
            )
            .unwrap();
        let text = security.as_text().unwrap();
        assert!(text.contains("Security Administration Guide"));
        assert!(!text.contains("Upgrade Guide"));
        assert!(text.contains("My Oracle Support"));

        let every = dispatcher
            .invoke(
                "search_jde_documentation",
                &json!({"topic": "upgrade planning", "doc_type": "all"}),
            )
            .unwrap();
        let text = every.as_text().unwrap();
        for title in [
            "Applications Installation Guide",
            "Server Manager Guide",
            "Security Administration Guide",
            "Applications Upgrade Guide",
            "Release Notes",
        ] {
            assert!(text.contains(title), "doc_type all should list {}", title);
        }
        assert!(text.contains("JDE Documentation Library"));
        assert!(!text.contains("Fallback:"));

        let defaulted = dispatcher
            .invoke("search_jde_documentation", &json!({"topic": "anything"}))
            .unwrap();
        assert!(defaulted.as_text().unwrap().contains("Applications Installation Guide"));
    }

    #[test]
    fn test_multi_environment_ports() {
        let response = dispatcher()
            .invoke(
                "configure_multi_environment",
                &json!({
                    "deployment_model": "single_server",
                    "environments": ["prod", "PY920_test", "crp"]
                }),
            )
            .unwrap();

        let payload = response.as_structured().unwrap();
        let envs = payload["environments"].as_array().unwrap();
        assert_eq!(envs[0]["path_code"], "PD920");
        assert_eq!(envs[1]["path_code"], "PY920");
        assert_eq!(envs[2]["path_code"], "CR920");
        assert_eq!(envs[2]["standard_path_code"], false);
        let ports: Vec<u64> = envs.iter().map(|e| e["html_port"].as_u64().unwrap()).collect();
        assert_eq!(ports, vec![7003, 7013, 7023]);
        assert_eq!(payload["match"], "fallback");
    }

    #[test]
    fn test_words() {
        let w = words("Server Manager won't start!");
        assert!(w.contains("won't"));
        assert!(w.contains("server"));
        assert!(words("is it on").is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_calls() {
        let dispatcher = Arc::new(dispatcher());
        let mut handles = Vec::new();

        for i in 0..16 {
            let dispatcher = dispatcher.clone();
            handles.push(tokio::spawn(async move {
                let tool = ToolName::all()[i % ToolName::all().len()];
                let args = combinations(tool).remove(0);
                dispatcher.invoke(tool.as_str(), &args)
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
    }
}

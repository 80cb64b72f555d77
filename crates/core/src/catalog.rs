//! Tool catalog.
//!
//! The set of tools is closed: [`ToolName`] enumerates it and every tool's
//! arguments are parsed into a [`ToolRequest`] variant before any lookup.
//! [`ToolName::descriptor`] publishes the same argument schema to clients.

use crate::args::Arguments;
use crate::domain::*;
use crate::error::{KbError, KbResult};

domain_enum! {
    pub enum ToolName {
        ResearchInstallationPrerequisites => "research_installation_prerequisites",
        GetInstallationSequence => "get_installation_sequence",
        GetEnvironmentConfiguration => "get_environment_configuration",
        ResearchServerManagerConfig => "research_server_manager_config",
        GetCentralizedConfigurationGuide => "get_centralized_configuration_guide",
        DiagnoseConfigurationIssue => "diagnose_configuration_issue",
        LookupEsuAsuRequirements => "lookup_esu_asu_requirements",
        GetWeblogicConfiguration => "get_weblogic_configuration",
        GetConfigurationUtilitiesGuide => "get_configuration_utilities_guide",
        SearchJdeDocumentation => "search_jde_documentation",
        GetLogAnalysisGuidance => "get_log_analysis_guidance",
        ConfigureMultiEnvironment => "configure_multi_environment",
    }
}

// Defaults for optional arguments
const DEFAULT_PLATFORM: Platform = Platform::Windows;
const DEFAULT_ENV_SECTION: EnvironmentSection = EnvironmentSection::All;
const DEFAULT_SM_OPERATION: ServerManagerOperation = ServerManagerOperation::InitialSetup;
const DEFAULT_WEBLOGIC_AREA: WeblogicArea = WeblogicArea::InitialSetup;
const DEFAULT_DOC_TYPE: DocType = DocType::All;
pub const DEFAULT_TOOLS_RELEASE: &str = "9.2.7";
pub const DEFAULT_ENVIRONMENT_LABEL: &str = "Not specified";

/// Shape of an argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Choice(Vec<&'static str>),
    TextList,
}

/// One declared argument of a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<&'static str>,
}

impl ParamSpec {
    fn text(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: ParamKind::Text,
            required: true,
            default: None,
        }
    }

    fn list(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: ParamKind::TextList,
            required: true,
            default: None,
        }
    }

    fn choice<T: Domain>(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: ParamKind::Choice(T::values()),
            required: true,
            default: None,
        }
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn with_default(mut self, default: &'static str) -> Self {
        self.required = false;
        self.default = Some(default);
        self
    }
}

/// Published description of a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: ToolName,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl ToolDescriptor {
    pub fn required(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| p.required)
    }

}

impl ToolName {
    pub fn descriptor(&self) -> ToolDescriptor {
        let (description, params) = match self {
            ToolName::ResearchInstallationPrerequisites => (
                "Research and return the mandatory installation prerequisites for JDE E1 9.2 R24 components",
                vec![
                    ParamSpec::choice::<PrereqComponent>("component", "The JDE component to get prerequisites for"),
                    ParamSpec::choice::<Platform>("platform", "Target platform")
                        .with_default(DEFAULT_PLATFORM.as_str()),
                ],
            ),
            ToolName::GetInstallationSequence => (
                "Returns the mandatory installation sequence for JDE E1 9.2 R24 components",
                vec![ParamSpec::choice::<EnvironmentType>(
                    "environment_type",
                    "Type of environment being installed",
                )],
            ),
            ToolName::GetEnvironmentConfiguration => (
                "Provides configuration guidance for specific JDE environment types (PD920, PY920, DV920)",
                vec![
                    ParamSpec::choice::<Environment>("environment", "The target environment"),
                    ParamSpec::choice::<EnvironmentSection>("component", "Configuration component to retrieve")
                        .with_default(DEFAULT_ENV_SECTION.as_str()),
                ],
            ),
            ToolName::ResearchServerManagerConfig => (
                "Research Server Manager configuration options for JDE E1 9.2 R24",
                vec![
                    ParamSpec::choice::<ServerManagerArea>("config_area", "Server Manager configuration area"),
                    ParamSpec::choice::<ServerManagerOperation>("operation", "Type of operation")
                        .with_default(DEFAULT_SM_OPERATION.as_str()),
                ],
            ),
            ToolName::GetCentralizedConfigurationGuide => (
                "Returns guidance on Release 24's new Centralized Configuration feature",
                vec![ParamSpec::choice::<CentralizedScope>(
                    "scope",
                    "Aspect of Centralized Configuration",
                )],
            ),
            ToolName::DiagnoseConfigurationIssue => (
                "Diagnose common JDE E1 9.2 R24 configuration issues",
                vec![
                    ParamSpec::text("symptom", "Description of the issue or symptom"),
                    ParamSpec::choice::<DiagnosticComponent>("component", "Affected component"),
                    ParamSpec::text("environment", "Environment where issue occurs (optional)")
                        .optional(),
                ],
            ),
            ToolName::LookupEsuAsuRequirements => (
                "Research required ESUs and ASUs for specific JDE E1 9.2 R24 features",
                vec![
                    ParamSpec::choice::<FeatureArea>("feature_area", "Feature area requiring ESU/ASU information"),
                    ParamSpec::text("tools_release", "Tools release version")
                        .with_default(DEFAULT_TOOLS_RELEASE),
                ],
            ),
            ToolName::GetWeblogicConfiguration => (
                "Returns WebLogic Server configuration for JDE HTML/AIS servers",
                vec![
                    ParamSpec::choice::<WeblogicServer>("server_type", "Type of WebLogic server"),
                    ParamSpec::choice::<WeblogicArea>("config_area", "Configuration area")
                        .with_default(DEFAULT_WEBLOGIC_AREA.as_str()),
                ],
            ),
            ToolName::GetConfigurationUtilitiesGuide => (
                "Returns guidance on using JDE Configuration Utilities (P01RS01)",
                vec![ParamSpec::choice::<UtilityArea>(
                    "utility_area",
                    "Configuration Utilities area",
                )],
            ),
            ToolName::SearchJdeDocumentation => (
                "Search and summarize relevant Oracle JDE E1 9.2 R24 documentation",
                vec![
                    ParamSpec::text("topic", "Topic to search for"),
                    ParamSpec::choice::<DocType>("doc_type", "Type of documentation")
                        .with_default(DEFAULT_DOC_TYPE.as_str()),
                ],
            ),
            ToolName::GetLogAnalysisGuidance => (
                "Returns guidance on analyzing JDE log files",
                vec![
                    ParamSpec::choice::<LogType>("log_type", "Type of log file to analyze"),
                    ParamSpec::text("issue_type", "Specific issue type (optional)").optional(),
                ],
            ),
            ToolName::ConfigureMultiEnvironment => (
                "Guidance for multi-environment setup (PROD/TEST/DEV)",
                vec![
                    ParamSpec::choice::<DeploymentModel>("deployment_model", "Deployment model"),
                    ParamSpec::list("environments", "List of environments"),
                ],
            ),
        };

        ToolDescriptor {
            name: *self,
            description,
            params,
        }
    }
}

/// A validated tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    InstallationPrerequisites {
        component: PrereqComponent,
        platform: Platform,
    },
    InstallationSequence {
        environment_type: EnvironmentType,
    },
    EnvironmentConfiguration {
        environment: Environment,
        section: EnvironmentSection,
    },
    ServerManagerConfig {
        area: ServerManagerArea,
        operation: ServerManagerOperation,
    },
    CentralizedConfiguration {
        scope: CentralizedScope,
    },
    DiagnoseIssue {
        symptom: String,
        component: DiagnosticComponent,
        environment: String,
    },
    EsuAsuRequirements {
        feature_area: FeatureArea,
        tools_release: String,
    },
    WeblogicConfiguration {
        server_type: WeblogicServer,
        area: WeblogicArea,
    },
    ConfigurationUtilities {
        area: UtilityArea,
    },
    SearchDocumentation {
        topic: String,
        doc_type: DocType,
    },
    LogAnalysis {
        log_type: LogType,
        issue_type: Option<String>,
    },
    MultiEnvironment {
        model: DeploymentModel,
        environments: Vec<String>,
    },
}

impl ToolRequest {
    /// Resolve a tool name, then validate its JSON arguments. The name is
    /// checked before the shape of the arguments.
    pub fn from_call(name: &str, arguments: &serde_json::Value) -> KbResult<Self> {
        let tool = ToolName::parse(name).ok_or_else(|| KbError::UnknownTool(name.to_string()))?;
        let args = Arguments::from_value(arguments)?;
        Self::parse(tool, &args)
    }

    /// Validate arguments for a known tool.
    ///
    /// Required arguments are checked in declaration order, so the first
    /// missing or invalid field is the one reported.
    pub fn parse(tool: ToolName, args: &Arguments) -> KbResult<Self> {
        let request = match tool {
            ToolName::ResearchInstallationPrerequisites => Self::InstallationPrerequisites {
                component: args.require_choice("component")?,
                platform: args.choice_or("platform", DEFAULT_PLATFORM)?,
            },
            ToolName::GetInstallationSequence => Self::InstallationSequence {
                environment_type: args.require_choice("environment_type")?,
            },
            ToolName::GetEnvironmentConfiguration => Self::EnvironmentConfiguration {
                environment: args.require_choice("environment")?,
                section: args.choice_or("component", DEFAULT_ENV_SECTION)?,
            },
            ToolName::ResearchServerManagerConfig => Self::ServerManagerConfig {
                area: args.require_choice("config_area")?,
                operation: args.choice_or("operation", DEFAULT_SM_OPERATION)?,
            },
            ToolName::GetCentralizedConfigurationGuide => Self::CentralizedConfiguration {
                scope: args.require_choice("scope")?,
            },
            ToolName::DiagnoseConfigurationIssue => Self::DiagnoseIssue {
                symptom: args.require_text("symptom")?.to_string(),
                component: args.require_choice("component")?,
                environment: args
                    .text("environment")?
                    .unwrap_or(DEFAULT_ENVIRONMENT_LABEL)
                    .to_string(),
            },
            ToolName::LookupEsuAsuRequirements => Self::EsuAsuRequirements {
                feature_area: args.require_choice("feature_area")?,
                tools_release: args
                    .text("tools_release")?
                    .unwrap_or(DEFAULT_TOOLS_RELEASE)
                    .to_string(),
            },
            ToolName::GetWeblogicConfiguration => Self::WeblogicConfiguration {
                server_type: args.require_choice("server_type")?,
                area: args.choice_or("config_area", DEFAULT_WEBLOGIC_AREA)?,
            },
            ToolName::GetConfigurationUtilitiesGuide => Self::ConfigurationUtilities {
                area: args.require_choice("utility_area")?,
            },
            ToolName::SearchJdeDocumentation => Self::SearchDocumentation {
                topic: args.require_text("topic")?.to_string(),
                doc_type: args.choice_or("doc_type", DEFAULT_DOC_TYPE)?,
            },
            ToolName::GetLogAnalysisGuidance => Self::LogAnalysis {
                log_type: args.require_choice("log_type")?,
                issue_type: args.text("issue_type")?.map(str::to_string),
            },
            ToolName::ConfigureMultiEnvironment => Self::MultiEnvironment {
                model: args.require_choice("deployment_model")?,
                environments: args.require_list("environments")?,
            },
        };

        Ok(request)
    }

    pub fn tool(&self) -> ToolName {
        match self {
            Self::InstallationPrerequisites { .. } => ToolName::ResearchInstallationPrerequisites,
            Self::InstallationSequence { .. } => ToolName::GetInstallationSequence,
            Self::EnvironmentConfiguration { .. } => ToolName::GetEnvironmentConfiguration,
            Self::ServerManagerConfig { .. } => ToolName::ResearchServerManagerConfig,
            Self::CentralizedConfiguration { .. } => ToolName::GetCentralizedConfigurationGuide,
            Self::DiagnoseIssue { .. } => ToolName::DiagnoseConfigurationIssue,
            Self::EsuAsuRequirements { .. } => ToolName::LookupEsuAsuRequirements,
            Self::WeblogicConfiguration { .. } => ToolName::GetWeblogicConfiguration,
            Self::ConfigurationUtilities { .. } => ToolName::GetConfigurationUtilitiesGuide,
            Self::SearchDocumentation { .. } => ToolName::SearchJdeDocumentation,
            Self::LogAnalysis { .. } => ToolName::GetLogAnalysisGuidance,
            Self::MultiEnvironment { .. } => ToolName::ConfigureMultiEnvironment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_has_twelve_tools() {
        assert_eq!(ToolName::all().len(), 12);
        for tool in ToolName::all() {
            let descriptor = tool.descriptor();
            assert_eq!(descriptor.name, *tool);
            assert!(!descriptor.description.is_empty());
            assert!(descriptor.required().count() >= 1);
        }
    }

    #[test]
    fn test_defaults_are_members_of_their_domain() {
        for tool in ToolName::all() {
            for param in tool.descriptor().params {
                if let (ParamKind::Choice(values), Some(default)) = (&param.kind, param.default) {
                    assert!(values.contains(&default), "{}.{}", tool, param.name);
                }
            }
        }
    }

    #[test]
    fn test_unknown_tool() {
        let err = ToolRequest::from_call("reboot_everything", &json!("not an object")).unwrap_err();
        assert_eq!(err, KbError::UnknownTool("reboot_everything".into()));
    }

    #[test]
    fn test_parse_applies_defaults() {
        let request = ToolRequest::from_call(
            "research_installation_prerequisites",
            &json!({"component": "html_server"}),
        )
        .unwrap();

        assert_eq!(
            request,
            ToolRequest::InstallationPrerequisites {
                component: PrereqComponent::HtmlServer,
                platform: Platform::Windows,
            }
        );
        assert_eq!(request.tool(), ToolName::ResearchInstallationPrerequisites);
    }

    #[test]
    fn test_parse_reports_offending_field() {
        let err = ToolRequest::from_call(
            "research_installation_prerequisites",
            &json!({"component": "bogus_component", "platform": "windows"}),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "invalid_argument");
        assert_eq!(err.field(), Some("component"));

        let err = ToolRequest::from_call(
            "diagnose_configuration_issue",
            &json!({"component": "database"}),
        )
        .unwrap_err();
        assert_eq!(err, KbError::missing("symptom"));
    }

    #[test]
    fn test_optional_free_text() {
        let request = ToolRequest::from_call(
            "diagnose_configuration_issue",
            &json!({"symptom": "batch jobs stuck", "component": "enterprise_server"}),
        )
        .unwrap();

        match request {
            ToolRequest::DiagnoseIssue { environment, .. } => {
                assert_eq!(environment, DEFAULT_ENVIRONMENT_LABEL)
            }
            other => panic!("unexpected request {:?}", other),
        }
    }
}

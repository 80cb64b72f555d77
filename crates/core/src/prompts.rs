//! Guided prompt templates.
//!
//! A template is a fixed, ordered list of role-tagged steps with `{{name}}`
//! placeholders. Optional steps are switched by boolean-like arguments; the
//! order never changes.

use crate::args::Arguments;
use crate::domain::*;
use crate::error::{KbError, KbResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

domain_enum! {
    pub enum PromptName {
        NewEnvironmentSetup => "new-environment-setup",
        TroubleshootDeployment => "troubleshoot-deployment",
        UpgradePlanning => "upgrade-planning",
        SecurityConfiguration => "security-configuration",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One rendered step of a guidance script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceStep {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptArgumentKind {
    Text,
    /// Boolean-like switch for optional steps
    Flag,
}

/// Declared argument of a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptArgumentSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub kind: PromptArgumentKind,
    pub default: Option<&'static str>,
}

impl PromptArgumentSpec {
    fn text(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: true,
            kind: PromptArgumentKind::Text,
            default: None,
        }
    }

    fn flag(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: false,
            kind: PromptArgumentKind::Flag,
            default: Some("true"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StepTemplate {
    role: Role,
    text: &'static str,
    /// Flag that must be on for the step to be included
    when: Option<&'static str>,
}

impl StepTemplate {
    fn user(text: &'static str) -> Self {
        Self {
            role: Role::User,
            text,
            when: None,
        }
    }

    fn assistant(text: &'static str) -> Self {
        Self {
            role: Role::Assistant,
            text,
            when: None,
        }
    }

    fn only_if(mut self, flag: &'static str) -> Self {
        self.when = Some(flag);
        self
    }
}

/// A named guidance script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: PromptName,
    pub description: &'static str,
    pub arguments: Vec<PromptArgumentSpec>,
    summary: &'static str,
    steps: Vec<StepTemplate>,
}

impl PromptTemplate {
    fn new(name: PromptName) -> Self {
        match name {
            PromptName::NewEnvironmentSetup => Self {
                name,
                description: "New environment setup workflow",
                summary: "Setup guide for {{environment_name}}",
                arguments: vec![
                    PromptArgumentSpec::text("environment_name", "Name of the new environment"),
                    PromptArgumentSpec::text("environment_type", "Type of environment (production, test, development)"),
                    PromptArgumentSpec::text("database_platform", "Database platform (SQL Server, Oracle)"),
                    PromptArgumentSpec::flag("include_verification", "Include post-installation verification steps"),
                ],
                steps: vec![
                    StepTemplate::user(
                        "Set up JDE E1 9.2 R24 environment {{environment_name}} ({{environment_type}}) with {{database_platform}}. Provide prerequisites, installation steps, and verification.",
                    ),
                    StepTemplate::assistant(
                        "Start with the prerequisites for {{environment_name}}: confirm server hardware, the {{database_platform}} version and collation, and network access between the Deployment, Enterprise and HTML servers. research_installation_prerequisites covers each component.",
                    ),
                    StepTemplate::assistant(
                        "Follow the installation sequence for a {{environment_type}} environment (get_installation_sequence), then define the path code, data sources and OCM mappings for {{environment_name}} (get_environment_configuration).",
                    ),
                    StepTemplate::assistant(
                        "Verify {{environment_name}}: sign on through the web client, submit a test batch job, confirm package deployment in Server Manager and check JDE.LOG for errors.",
                    )
                    .only_if("include_verification"),
                ],
            },
            PromptName::TroubleshootDeployment => Self {
                name,
                description: "Deployment troubleshooting",
                summary: "Troubleshoot {{package_name}}",
                arguments: vec![
                    PromptArgumentSpec::text("package_name", "Name of the package that failed"),
                    PromptArgumentSpec::text("target_environment", "Environment the package was deployed to"),
                    PromptArgumentSpec::text("error_description", "Error reported by the deployment"),
                    PromptArgumentSpec::flag("include_log_review", "Include the log review step"),
                ],
                steps: vec![
                    StepTemplate::user(
                        "Troubleshoot deployment of {{package_name}} to {{target_environment}}. Error: {{error_description}}",
                    ),
                    StepTemplate::assistant(
                        "Check the build history of {{package_name}} in Server Manager and confirm the build finished without BLDPKG errors before it was deployed to {{target_environment}}.",
                    ),
                    StepTemplate::assistant(
                        "Review the logs for the reported error ({{error_description}}): the Server Manager deployment log, JDE.LOG on the Enterprise Server and the JAS log on the HTML Server. get_log_analysis_guidance lists the patterns to look for.",
                    )
                    .only_if("include_log_review"),
                    StepTemplate::assistant(
                        "Match the error against known deployment issues with diagnose_configuration_issue, apply the resolution, then redeploy {{package_name}} to {{target_environment}} and confirm the deployment status.",
                    ),
                ],
            },
            PromptName::UpgradePlanning => Self {
                name,
                description: "Tools Release upgrade planning",
                summary: "Upgrade from {{current_tools_release}} to {{target_tools_release}}",
                arguments: vec![
                    PromptArgumentSpec::text("current_tools_release", "Tools Release currently installed"),
                    PromptArgumentSpec::text("target_tools_release", "Tools Release to upgrade to"),
                    PromptArgumentSpec::flag("include_rollback_plan", "Include a rollback plan"),
                ],
                steps: vec![
                    StepTemplate::user(
                        "Plan upgrade from Tools {{current_tools_release}} to {{target_tools_release}}. Include ESUs/ASUs, sequence, and rollback plan.",
                    ),
                    StepTemplate::assistant(
                        "Confirm certifications for Tools {{target_tools_release}} (database, WebLogic and JDK versions) and compare them with what runs on {{current_tools_release}} today.",
                    ),
                    StepTemplate::assistant(
                        "List the ESUs and ASUs required for {{target_tools_release}} with lookup_esu_asu_requirements, starting with the Planner ESU and the current Tools Rollup.",
                    ),
                    StepTemplate::assistant(
                        "Upgrade DV920 first, then PY920, then PD920, deploying Tools {{target_tools_release}} through Server Manager on every managed server.",
                    ),
                    StepTemplate::assistant(
                        "Rollback plan: back up the Deployment Server, the Server Manager configuration and the system tables before starting, and keep Tools {{current_tools_release}} registered in Server Manager so each server can be switched back.",
                    )
                    .only_if("include_rollback_plan"),
                ],
            },
            PromptName::SecurityConfiguration => Self {
                name,
                description: "Security configuration guidance",
                summary: "Security for {{environment}}",
                arguments: vec![
                    PromptArgumentSpec::text("security_level", "Target security level (e.g. high, medium)"),
                    PromptArgumentSpec::text("environment", "Environment to secure"),
                    PromptArgumentSpec::flag("include_audit", "Include audit settings"),
                ],
                steps: vec![
                    StepTemplate::user(
                        "Configure {{security_level}} security for {{environment}}. Include authentication, authorization, and audit settings.",
                    ),
                    StepTemplate::assistant(
                        "Authentication for {{environment}}: configure sign-on security and single sign-on, and require SSL on the HTML Server.",
                    ),
                    StepTemplate::assistant(
                        "Authorization at the {{security_level}} level: define roles in P00950, application security in P00105 and row security wherever sensitive data requires it.",
                    ),
                    StepTemplate::assistant(
                        "Audit: enable audit logging for security changes in {{environment}} and review the audit trail on a fixed schedule.",
                    )
                    .only_if("include_audit"),
                ],
            },
        }
    }
}

/// A prompt rendered for one set of arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPrompt {
    pub name: &'static str,
    pub description: String,
    pub steps: Vec<GuidanceStep>,
}

/// Holds the prompt templates and renders them
#[derive(Debug, Clone)]
pub struct PromptEngine {
    templates: Vec<PromptTemplate>,
}

impl PromptEngine {
    pub fn new() -> Self {
        Self {
            templates: PromptName::all().iter().copied().map(PromptTemplate::new).collect(),
        }
    }

    pub fn list(&self) -> &[PromptTemplate] {
        &self.templates
    }

    pub fn template(&self, name: &str) -> KbResult<&PromptTemplate> {
        PromptName::parse(name)
            .and_then(|name| self.templates.iter().find(|t| t.name == name))
            .ok_or_else(|| KbError::UnknownPrompt(name.to_string()))
    }

    /// Validate arguments and render the steps of a prompt.
    pub fn render(&self, name: &str, args: &Arguments) -> KbResult<RenderedPrompt> {
        let template = self.template(name)?;

        let mut values = BTreeMap::new();
        let mut flags = BTreeMap::new();
        for spec in &template.arguments {
            match spec.kind {
                PromptArgumentKind::Text => {
                    let value = if spec.required {
                        Some(args.require_text(spec.name)?)
                    } else {
                        args.text(spec.name)?.or(spec.default)
                    };
                    values.insert(spec.name, value.unwrap_or_default().to_string());
                }
                PromptArgumentKind::Flag => {
                    let default = spec.default.map_or(false, |d| d == "true");
                    flags.insert(spec.name, args.flag(spec.name, default)?);
                }
            }
        }

        let steps = template
            .steps
            .iter()
            .filter(|step| step.when.map_or(true, |flag| flags.get(flag).copied().unwrap_or(false)))
            .map(|step| GuidanceStep {
                role: step.role,
                text: render_template(step.text, &values),
            })
            .collect();

        tracing::info!(prompt = %template.name, "Prompt rendered");
        Ok(RenderedPrompt {
            name: template.name.as_str(),
            description: render_template(template.summary, &values),
            steps,
        })
    }
}

impl Default for PromptEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// A piece of template text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    /// Trimmed name between `{{` and `}}`
    Placeholder(&'a str),
}

/// Split template text into literals and placeholders. An unclosed `{{`
/// stays literal.
fn segments(text: &str) -> impl Iterator<Item = Segment<'_>> {
    let mut rest = text;
    let mut pending: Option<Segment<'_>> = None;

    std::iter::from_fn(move || {
        if let Some(segment) = pending.take() {
            return Some(segment);
        }
        if rest.is_empty() {
            return None;
        }

        let Some((start, end)) = rest
            .find("{{")
            .and_then(|start| rest[start + 2..].find("}}").map(|end| (start, start + 2 + end)))
        else {
            let literal = rest;
            rest = "";
            return Some(Segment::Literal(literal));
        };

        let literal = &rest[..start];
        let name = rest[start + 2..end].trim();
        rest = &rest[end + 2..];

        if literal.is_empty() {
            Some(Segment::Placeholder(name))
        } else {
            pending = Some(Segment::Placeholder(name));
            Some(Segment::Literal(literal))
        }
    })
}

/// Replace `{{name}}` placeholders in one pass. Substituted values are not
/// scanned again, and a placeholder without a value renders as empty text.
pub fn render_template(text: &str, values: &BTreeMap<&str, String>) -> String {
    let mut result = String::with_capacity(text.len());
    for segment in segments(text) {
        match segment {
            Segment::Literal(literal) => result.push_str(literal),
            Segment::Placeholder(name) => {
                if let Some(value) = values.get(name) {
                    result.push_str(value);
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn placeholders(template: &PromptTemplate) -> BTreeSet<&'static str> {
        std::iter::once(template.summary)
            .chain(template.steps.iter().map(|step| step.text))
            .flat_map(segments)
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) => Some(name),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    fn full_args(template: &PromptTemplate) -> Vec<(&'static str, String)> {
        template
            .arguments
            .iter()
            .filter(|spec| spec.kind == PromptArgumentKind::Text)
            .map(|spec| (spec.name, format!("value-of-{}", spec.name)))
            .collect()
    }

    #[test]
    fn test_render_template() {
        let mut values = BTreeMap::new();
        values.insert("name", "PD920".to_string());

        assert_eq!(render_template("Hello {{name}}!", &values), "Hello PD920!");
        assert_eq!(render_template("{{ name }}/{{name}}", &values), "PD920/PD920");
        assert_eq!(render_template("missing: {{other}}.", &values), "missing: .");
        assert_eq!(render_template("no placeholders", &values), "no placeholders");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let mut values = BTreeMap::new();
        values.insert("a", "{{b}}".to_string());
        values.insert("b", "oops".to_string());

        assert_eq!(render_template("x {{a}} y", &values), "x {{b}} y");
    }

    #[test]
    fn test_segments() {
        let pieces: Vec<Segment> = segments("Plan {{current}} to {{ target }}{{x").collect();
        assert_eq!(
            pieces,
            vec![
                Segment::Literal("Plan "),
                Segment::Placeholder("current"),
                Segment::Literal(" to "),
                Segment::Placeholder("target"),
                Segment::Literal("{{x"),
            ]
        );
        assert_eq!(segments("").count(), 0);
    }

    #[test]
    fn test_every_placeholder_is_declared() {
        let engine = PromptEngine::new();
        assert_eq!(engine.list().len(), 4);

        for template in engine.list() {
            let declared: Vec<&str> = template.arguments.iter().map(|a| a.name).collect();
            for name in placeholders(template) {
                assert!(declared.contains(&name), "{} uses undeclared {}", template.name, name);
            }
        }
    }

    #[test]
    fn test_rendered_output_has_no_markers() {
        let engine = PromptEngine::new();

        for template in engine.list() {
            for flag_value in ["true", "false"] {
                let mut pairs = full_args(template);
                for spec in &template.arguments {
                    if spec.kind == PromptArgumentKind::Flag {
                        pairs.push((spec.name, flag_value.to_string()));
                    }
                }

                let rendered = engine
                    .render(template.name.as_str(), &Arguments::from_pairs(pairs))
                    .unwrap();
                assert!(!rendered.description.contains("{{"));
                assert!(!rendered.steps.is_empty());
                for step in &rendered.steps {
                    assert!(!step.text.contains("{{"), "{}: {}", template.name, step.text);
                    assert!(!step.text.contains("}}"), "{}: {}", template.name, step.text);
                }
            }
        }
    }

    #[test]
    fn test_flags_toggle_optional_steps() {
        let engine = PromptEngine::new();
        let base = [
            ("current_tools_release", "9.2.5"),
            ("target_tools_release", "9.2.7"),
        ];

        let with_plan = engine
            .render("upgrade-planning", &Arguments::from_pairs(base))
            .unwrap();
        let without_plan = engine
            .render(
                "upgrade-planning",
                &Arguments::from_pairs(base.into_iter().chain([("include_rollback_plan", "No")])),
            )
            .unwrap();

        assert_eq!(with_plan.steps.len(), without_plan.steps.len() + 1);
        assert!(with_plan.steps.last().unwrap().text.starts_with("Rollback plan"));
        assert_eq!(with_plan.description, "Upgrade from 9.2.5 to 9.2.7");
        assert_eq!(with_plan.steps[0].role, Role::User);
        assert_eq!(with_plan.steps[1].role, Role::Assistant);
    }

    #[test]
    fn test_missing_required_argument() {
        let err = PromptEngine::new()
            .render(
                "troubleshoot-deployment",
                &Arguments::from_pairs([("package_name", "PKG01"), ("error_description", " ")]),
            )
            .unwrap_err();

        assert_eq!(err, KbError::missing("target_environment"));
    }

    #[test]
    fn test_invalid_flag() {
        let err = PromptEngine::new()
            .render(
                "security-configuration",
                &Arguments::from_pairs([
                    ("security_level", "high"),
                    ("environment", "PD920"),
                    ("include_audit", "sometimes"),
                ]),
            )
            .unwrap_err();

        assert_eq!(err.kind(), "invalid_argument");
        assert_eq!(err.field(), Some("include_audit"));
    }

    #[test]
    fn test_unknown_prompt() {
        let err = PromptEngine::new()
            .render("New-Environment-Setup", &Arguments::default())
            .unwrap_err();
        assert_eq!(err, KbError::UnknownPrompt("New-Environment-Setup".into()));
    }

    #[test]
    fn test_role_serialization() {
        let step = GuidanceStep {
            role: Role::Assistant,
            text: "hi".into(),
        };
        assert_eq!(
            serde_json::to_value(&step).unwrap(),
            serde_json::json!({"role": "assistant", "text": "hi"})
        );
    }
}

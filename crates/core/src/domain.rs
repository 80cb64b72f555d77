// Closed argument domains shared by the tool catalog and its schemas

/// A closed set of string values.
///
/// `parse` is an exact match on the wire spelling. Argument validation uses
/// [`Domain::parse_lenient`], which also accepts surrounding whitespace and
/// a different ASCII case.
pub trait Domain: Sized + Copy + 'static {
    fn all() -> &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.as_str() == value)
    }

    fn parse_lenient(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::all()
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(value))
    }

    fn values() -> Vec<&'static str> {
        Self::all().iter().map(|v| v.as_str()).collect()
    }
}

/// Declare a [`Domain`] enum with its wire spellings.
macro_rules! domain_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::domain::Domain for $name {
            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::domain::Domain::as_str(self))
            }
        }
    };
}

pub(crate) use domain_enum;

domain_enum! {
    /// Component named by `research_installation_prerequisites`.
    pub enum PrereqComponent {
        DeploymentServer => "deployment_server",
        EnterpriseServer => "enterprise_server",
        HtmlServer => "html_server",
        Database => "database",
        All => "all",
    }
}

impl PrereqComponent {
    /// Concrete components, in reporting order.
    pub const CONCRETE: [PrereqComponent; 4] = [
        PrereqComponent::DeploymentServer,
        PrereqComponent::EnterpriseServer,
        PrereqComponent::HtmlServer,
        PrereqComponent::Database,
    ];
}

domain_enum! {
    pub enum Platform {
        Windows => "windows",
        Linux => "linux",
        Aix => "aix",
    }
}

domain_enum! {
    pub enum EnvironmentType {
        Production => "production",
        TestPy => "test_py",
        Development => "development",
        StandaloneDemo => "standalone_demo",
    }
}

domain_enum! {
    /// Environment keyed by path code.
    pub enum Environment {
        Production => "PD920_production",
        Test => "PY920_test",
        Development => "DV920_development",
    }
}

impl Environment {
    pub fn path_code(&self) -> &'static str {
        match self {
            Environment::Production => "PD920",
            Environment::Test => "PY920",
            Environment::Development => "DV920",
        }
    }
}

domain_enum! {
    /// Section of an environment record.
    pub enum EnvironmentSection {
        PathCodes => "path_codes",
        DataSources => "data_sources",
        OcmMappings => "ocm_mappings",
        ServerMap => "server_map",
        All => "all",
    }
}

domain_enum! {
    pub enum ServerManagerArea {
        DeploymentServer => "deployment_server",
        EnterpriseServer => "enterprise_server",
        HtmlServer => "html_server",
        BatchServer => "batch_server",
        LogicServer => "logic_server",
    }
}

domain_enum! {
    pub enum ServerManagerOperation {
        InitialSetup => "initial_setup",
        AddEnvironment => "add_environment",
        PackageDeployment => "package_deployment",
        EsusAsus => "esus_asus",
        KernelConfiguration => "kernel_configuration",
    }
}

domain_enum! {
    pub enum CentralizedScope {
        Overview => "overview",
        Setup => "setup",
        Inheritance => "inheritance",
        Troubleshooting => "troubleshooting",
    }
}

domain_enum! {
    /// Component named by `diagnose_configuration_issue`.
    pub enum DiagnosticComponent {
        DeploymentServer => "deployment_server",
        EnterpriseServer => "enterprise_server",
        HtmlServer => "html_server",
        Database => "database",
        Client => "client",
    }
}

domain_enum! {
    pub enum FeatureArea {
        Orchestrator => "orchestrator",
        UxOne => "ux_one",
        CafeOne => "cafe_one",
        E1Page => "e1_page",
        Mobile => "mobile",
        General => "general",
    }
}

domain_enum! {
    pub enum WeblogicServer {
        HtmlServer => "html_server",
        AisServer => "ais_server",
        AdminServer => "admin_server",
    }
}

impl WeblogicServer {
    /// Key of this server's entry in the HTML Server port table.
    pub fn port_key(&self) -> &'static str {
        match self {
            WeblogicServer::HtmlServer => "managed_server",
            WeblogicServer::AisServer => "ais_server",
            WeblogicServer::AdminServer => "admin_server",
        }
    }
}

domain_enum! {
    pub enum WeblogicArea {
        InitialSetup => "initial_setup",
        ManagedServers => "managed_servers",
        Clustering => "clustering",
        Ssl => "ssl",
        Ports => "ports",
        JvmSettings => "jvm_settings",
    }
}

domain_enum! {
    pub enum UtilityArea {
        BusinessData => "business_data",
        TaskViews => "task_views",
        Roles => "roles",
        Security => "security",
        ProgramVersions => "program_versions",
        Overview => "overview",
    }
}

domain_enum! {
    pub enum DocType {
        InstallationGuide => "installation_guide",
        AdminGuide => "admin_guide",
        SecurityGuide => "security_guide",
        UpgradeGuide => "upgrade_guide",
        ReleaseNotes => "release_notes",
        All => "all",
    }
}

domain_enum! {
    pub enum LogType {
        JdeLog => "jde_log",
        JasLog => "jas_log",
        WeblogicLog => "weblogic_log",
        ServerManagerLog => "server_manager_log",
        PackageBuildLog => "package_build_log",
        All => "all",
    }
}

domain_enum! {
    pub enum DeploymentModel {
        SingleServer => "single_server",
        Distributed => "distributed",
        CloudHybrid => "cloud_hybrid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_parse() {
        assert_eq!(Platform::parse("linux"), Some(Platform::Linux));
        assert_eq!(Platform::parse("Linux"), None);
        assert_eq!(Platform::parse("solaris"), None);
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!(
            Environment::parse_lenient(" pd920_PRODUCTION "),
            Some(Environment::Production)
        );
        assert_eq!(Environment::parse_lenient("PD920"), None);
    }

    #[test]
    fn test_values_follow_declaration_order() {
        assert_eq!(
            PrereqComponent::values(),
            vec!["deployment_server", "enterprise_server", "html_server", "database", "all"]
        );
        assert_eq!(Environment::Test.to_string(), "PY920_test");
        assert_eq!(Environment::Test.path_code(), "PY920");
    }
}

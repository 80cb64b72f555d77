// Core knowledge base and lookup layer for the JDE E1 9.2 R24 configuration server
#![recursion_limit = "256"]

pub mod args;
pub mod catalog;
pub mod dispatcher;
pub mod domain;
pub mod error;
pub mod knowledge;
pub mod prompts;
pub mod resources;
pub mod types;

pub use args::Arguments;
pub use catalog::{ParamKind, ParamSpec, ToolDescriptor, ToolName, ToolRequest};
pub use dispatcher::Dispatcher;
pub use domain::Domain;
pub use error::{ErrorDetail, KbError, KbResult};
pub use knowledge::KnowledgeStore;
pub use prompts::{
    GuidanceStep, PromptArgumentKind, PromptArgumentSpec, PromptEngine, PromptName,
    PromptTemplate, RenderedPrompt, Role,
};
pub use resources::{Document, ResourceDescriptor, ResourceProvider, ResourceUri};
pub use types::*;

use std::sync::Arc;

/// The three lookup components over one shared knowledge store.
///
/// Built once at startup; every component is read-only afterwards, so a
/// `KnowledgeBase` can be shared between request handlers without locking.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub tools: Dispatcher,
    pub resources: ResourceProvider,
    pub prompts: PromptEngine,
}

impl KnowledgeBase {
    pub fn load() -> Self {
        let store = Arc::new(KnowledgeStore::load());
        let resources = ResourceProvider::new(&store);
        tracing::info!(
            records = store.len(),
            tools = ToolName::all().len(),
            resources = ResourceUri::all().len(),
            prompts = PromptName::all().len(),
            "Knowledge base loaded"
        );

        Self {
            tools: Dispatcher::new(store),
            resources,
            prompts: PromptEngine::new(),
        }
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::load()
    }
}

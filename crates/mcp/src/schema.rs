// Protocol schemas for the tool, resource and prompt catalogs

use crate::protocol::{PromptArgumentSchema, PromptSchema, ResourceSchema, ToolSchema};
use jde_config_core::{
    Domain, ParamKind, PromptEngine, PromptTemplate, ResourceDescriptor, ResourceProvider,
    ToolDescriptor, ToolName,
};

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_enum(values: &[&str], description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": values,
        "description": description
    })
}

pub fn json_schema_array(items: serde_json::Value, description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "array",
        "items": items,
        "description": description
    })
}

/// Input schema for one tool, derived from its parameter declarations.
pub fn tool_schema(descriptor: &ToolDescriptor) -> ToolSchema {
    let mut properties = serde_json::Map::new();
    for param in &descriptor.params {
        let mut property = match &param.kind {
            ParamKind::Text => json_schema_string(param.description),
            ParamKind::Choice(values) => json_schema_enum(values, param.description),
            ParamKind::TextList => {
                json_schema_array(json_schema_string("Environment name"), param.description)
            }
        };
        if let Some(default) = param.default {
            property["default"] = serde_json::json!(default);
        }
        properties.insert(param.name.to_string(), property);
    }

    ToolSchema {
        name: descriptor.name.as_str().to_string(),
        description: descriptor.description.to_string(),
        input_schema: json_schema_object(
            serde_json::Value::Object(properties),
            descriptor.required().map(|p| p.name).collect(),
        ),
    }
}

pub fn list_tools() -> Vec<ToolSchema> {
    ToolName::all()
        .iter()
        .map(|tool| tool_schema(&tool.descriptor()))
        .collect()
}

pub fn resource_schema(descriptor: &ResourceDescriptor) -> ResourceSchema {
    ResourceSchema {
        uri: descriptor.uri.to_string(),
        name: descriptor.name.to_string(),
        description: descriptor.description.to_string(),
        mime_type: descriptor.mime_type.to_string(),
    }
}

pub fn list_resources(provider: &ResourceProvider) -> Vec<ResourceSchema> {
    provider.list().iter().map(resource_schema).collect()
}

pub fn prompt_schema(template: &PromptTemplate) -> PromptSchema {
    PromptSchema {
        name: template.name.as_str().to_string(),
        description: template.description.to_string(),
        arguments: template
            .arguments
            .iter()
            .map(|arg| PromptArgumentSchema {
                name: arg.name.to_string(),
                description: match arg.default {
                    Some(default) => format!("{} (default: {})", arg.description, default),
                    None => arg.description.to_string(),
                },
                required: arg.required,
            })
            .collect(),
    }
}

pub fn list_prompts(engine: &PromptEngine) -> Vec<PromptSchema> {
    engine.list().iter().map(prompt_schema).collect()
}

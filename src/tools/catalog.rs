//! Tool catalog — typed descriptors and argument shape checking.
//!
//! Every tool advertises a [`ToolEntry`]. Incoming arguments are checked
//! against it before anything else happens; all offending fields are
//! reported together.

use crate::types::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

// =============================================================================
// Parameter types
// =============================================================================

/// Parameter type for tool inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    /// String restricted to a fixed set of values.
    Enum(Vec<String>),
    /// JSON object whose values are all strings.
    StringMap,
    /// Any JSON value, including `null`. Only presence is checked.
    Any,
}

impl ParamType {
    /// Validate a JSON value against this parameter type.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        match self {
            ParamType::String => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(format!("expected string, got {}", value_type_name(value)))
                }
            }
            ParamType::Enum(variants) => {
                if let Some(s) = value.as_str() {
                    if variants.iter().any(|v| v == s) {
                        Ok(())
                    } else {
                        Err(format!(
                            "invalid enum value '{}', expected one of: {}",
                            s,
                            variants.join(", ")
                        ))
                    }
                } else {
                    Err(format!("expected string for enum, got {}", value_type_name(value)))
                }
            }
            ParamType::StringMap => {
                if let Some(map) = value.as_object() {
                    for (key, item) in map {
                        if !item.is_string() {
                            return Err(format!(
                                "expected string at key '{}', got {}",
                                key,
                                value_type_name(item)
                            ));
                        }
                    }
                    Ok(())
                } else {
                    Err(format!("expected object, got {}", value_type_name(value)))
                }
            }
            ParamType::Any => Ok(()),
        }
    }

    /// JSON Schema fragment advertised in `inputSchema.properties`.
    pub fn json_schema(&self) -> Value {
        match self {
            ParamType::String => json!({ "type": "string" }),
            ParamType::Enum(variants) => json!({ "type": "string", "enum": variants }),
            ParamType::StringMap => json!({
                "type": "object",
                "additionalProperties": { "type": "string" },
            }),
            ParamType::Any => json!({}),
        }
    }
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Parameter definition
// =============================================================================

/// A single required parameter of a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDef {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
}

impl ParamDef {
    pub fn new(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            description: description.to_string(),
        }
    }
}

// =============================================================================
// Tool entry
// =============================================================================

/// Tool descriptor: dispatch key, description and input shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamDef>,
}

impl ToolEntry {
    /// JSON Schema object advertised as `inputSchema`.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.parameters {
            let mut schema = param.param_type.json_schema();
            if let Some(obj) = schema.as_object_mut() {
                obj.insert("description".to_string(), json!(param.description));
            }
            properties.insert(param.name.clone(), schema);
        }
        let required: Vec<&str> = self.parameters.iter().map(|p| p.name.as_str()).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Descriptor in the shape `tools/list` returns.
    pub fn to_descriptor(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }

    /// Check presence and type of every parameter.
    ///
    /// Returns the list of problems (empty = valid). Keys not declared by the
    /// tool are ignored.
    pub fn check_params(&self, params: &Value) -> Vec<String> {
        let Some(param_map) = params.as_object() else {
            return vec![format!(
                "arguments: expected object, got {}",
                value_type_name(params)
            )];
        };

        let mut errors = Vec::new();
        for param_def in &self.parameters {
            match param_map.get(&param_def.name) {
                None => errors.push(format!("{}: missing required parameter", param_def.name)),
                Some(value) => {
                    if let Err(e) = param_def.param_type.validate(value) {
                        errors.push(format!("{}: {}", param_def.name, e));
                    }
                }
            }
        }
        errors
    }

    /// Like [`check_params`](Self::check_params) but folds the problems into
    /// one validation error.
    pub fn validate(&self, params: &Value) -> Result<()> {
        let errors = self.check_params(params);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(errors.join(", ")))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

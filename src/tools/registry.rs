//! Tool registry — the fixed set of tools this server exposes.
//!
//! Built once at startup and shared read-only. Each entry pairs a descriptor
//! with the handler kind the dispatcher runs for it.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use super::catalog::{ParamDef, ParamType, ToolEntry};
use super::http::{HttpMethod, HttpRequest};
use crate::types::{Error, Result};
use crate::validation::validate_file_name;

pub const TOOL_REQUEST: &str = "request";
pub const TOOL_SAVE_FILE: &str = "save_environment_variable_or_api_doc";
pub const TOOL_GET_FILE: &str = "get_file";
pub const TOOL_LIST_FILES: &str = "list_files";

/// Handler selected for a registered tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Request,
    SaveFile,
    GetFile,
    ListFiles,
}

/// Strongly-typed arguments of a tool call that passed its schema check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedRequest {
    Request(HttpRequest),
    SaveFile {
        file_name: String,
        file_content: String,
    },
    GetFile {
        file_name: String,
    },
    ListFiles,
}

impl ValidatedRequest {
    /// Project `args` onto the typed request for `entry`.
    ///
    /// The schema check runs first; nothing is constructed unless every
    /// required field is present and well-typed.
    pub fn parse(kind: ToolKind, entry: &ToolEntry, args: &Value) -> Result<Self> {
        entry.validate(args)?;

        match kind {
            ToolKind::Request => {
                let method: HttpMethod = string_arg(args, "type")?.parse()?;
                let url = string_arg(args, "url")?.to_string();
                let headers = string_map_arg(args, "headers")?;
                let body = args.get("body").and_then(serialize_body);
                Ok(Self::Request(HttpRequest {
                    method,
                    url,
                    headers,
                    body,
                }))
            }
            ToolKind::SaveFile => {
                let file_name = string_arg(args, "file_name")?;
                validate_file_name(file_name, "file_name")?;
                Ok(Self::SaveFile {
                    file_name: file_name.to_string(),
                    file_content: string_arg(args, "file_content")?.to_string(),
                })
            }
            ToolKind::GetFile => {
                let file_name = string_arg(args, "file_name")?;
                validate_file_name(file_name, "file_name")?;
                Ok(Self::GetFile {
                    file_name: file_name.to_string(),
                })
            }
            ToolKind::ListFiles => Ok(Self::ListFiles),
        }
    }
}

fn string_arg<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::validation(format!("{}: expected string", key)))
}

fn string_map_arg(args: &Value, key: &str) -> Result<BTreeMap<String, String>> {
    let map = args
        .get(key)
        .and_then(|v| v.as_object())
        .ok_or_else(|| Error::validation(format!("{}: expected object", key)))?;
    map.iter()
        .map(|(k, v)| {
            v.as_str()
                .map(|s| (k.clone(), s.to_string()))
                .ok_or_else(|| Error::validation(format!("{}: expected string at key '{}'", key, k)))
        })
        .collect()
}

/// Pre-serialize the caller's body. Falsy values (`null`, `false`, `0`,
/// `""`) mean "no body".
fn serialize_body(body: &Value) -> Option<String> {
    match body {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct RegisteredTool {
    pub entry: ToolEntry,
    pub kind: ToolKind,
}

/// Immutable name → (descriptor, handler) mapping.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    fn from_tools(tools: Vec<RegisteredTool>) -> Self {
        let by_name = tools
            .iter()
            .enumerate()
            .map(|(i, t)| (t.entry.name.clone(), i))
            .collect();
        Self { tools, by_name }
    }

    /// The four tools this server exposes.
    pub fn builtin() -> Self {
        let methods = HttpMethod::ALL
            .iter()
            .map(|m| m.as_str().to_string())
            .collect();

        Self::from_tools(vec![
            RegisteredTool {
                entry: ToolEntry {
                    name: TOOL_REQUEST.to_string(),
                    description: "Make an HTTP request".to_string(),
                    parameters: vec![
                        ParamDef::new(
                            "type",
                            ParamType::Enum(methods),
                            "Type of the request. GET, POST, PUT, DELETE",
                        ),
                        ParamDef::new("url", ParamType::String, "Url to make the request to"),
                        ParamDef::new(
                            "headers",
                            ParamType::StringMap,
                            "Headers to include in the request",
                        ),
                        ParamDef::new(
                            "body",
                            ParamType::Any,
                            "Body to include in the request. Sent as JSON for POST and PUT, ignored otherwise",
                        ),
                    ],
                },
                kind: ToolKind::Request,
            },
            RegisteredTool {
                entry: ToolEntry {
                    name: TOOL_SAVE_FILE.to_string(),
                    description:
                        "Save an environment variable or api doc to a file in the apis folder"
                            .to_string(),
                    parameters: vec![
                        ParamDef::new("file_name", ParamType::String, "What the file will be named"),
                        ParamDef::new(
                            "file_content",
                            ParamType::String,
                            "Content of the file to save",
                        ),
                    ],
                },
                kind: ToolKind::SaveFile,
            },
            RegisteredTool {
                entry: ToolEntry {
                    name: TOOL_GET_FILE.to_string(),
                    description: "Get a file from the apis folder, such as an environment variable or api doc".to_string(),
                    parameters: vec![ParamDef::new(
                        "file_name",
                        ParamType::String,
                        "Name of the file to get",
                    )],
                },
                kind: ToolKind::GetFile,
            },
            RegisteredTool {
                entry: ToolEntry {
                    name: TOOL_LIST_FILES.to_string(),
                    description: "List all files in the apis folder. They might include API docs or environment variables".to_string(),
                    parameters: Vec::new(),
                },
                kind: ToolKind::ListFiles,
            },
        ])
    }

    /// Look a tool up, failing with [`Error::UnknownTool`].
    pub fn resolve(&self, name: &str) -> Result<&RegisteredTool> {
        self.by_name
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| Error::unknown_tool(name))
    }

    /// Descriptors in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &ToolEntry> {
        self.tools.iter().map(|t| &t.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(name: &str, args: Value) -> Result<ValidatedRequest> {
        let registry = ToolRegistry::builtin();
        let tool = registry.resolve(name)?;
        ValidatedRequest::parse(tool.kind, &tool.entry, &args)
    }

    #[test]
    fn test_builtin_has_four_tools_in_order() {
        let registry = ToolRegistry::builtin();
        let names: Vec<&str> = registry.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![TOOL_REQUEST, TOOL_SAVE_FILE, TOOL_GET_FILE, TOOL_LIST_FILES]
        );
    }

    #[test]
    fn test_resolve_unknown_tool() {
        let err = ToolRegistry::builtin().resolve("frobnicate").unwrap_err();
        assert!(matches!(err, Error::UnknownTool(_)));
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn test_parse_request() {
        let parsed = parse(
            TOOL_REQUEST,
            json!({
                "type": "POST",
                "url": "https://api.example.com/items",
                "headers": {"Authorization": "Bearer t"},
                "body": {"name": "x"},
            }),
        )
        .unwrap();

        let ValidatedRequest::Request(req) = parsed else {
            panic!("expected request variant");
        };
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.headers["Authorization"], "Bearer t");
        assert_eq!(req.body.as_deref(), Some("{\"name\":\"x\"}"));
    }

    #[test]
    fn test_parse_request_falsy_body_is_no_body() {
        for body in [json!(null), json!(""), json!(false), json!(0), json!(0.0)] {
            let parsed = parse(
                TOOL_REQUEST,
                json!({"type": "PUT", "url": "u", "headers": {}, "body": body}),
            )
            .unwrap();
            let ValidatedRequest::Request(req) = parsed else {
                panic!("expected request variant");
            };
            assert_eq!(req.body, None);
        }
    }

    #[test]
    fn test_parse_request_truthy_scalars_are_sent() {
        for (body, expected) in [(json!(true), "true"), (json!(1), "1"), (json!([]), "[]")] {
            let parsed = parse(
                TOOL_REQUEST,
                json!({"type": "POST", "url": "u", "headers": {}, "body": body}),
            )
            .unwrap();
            let ValidatedRequest::Request(req) = parsed else {
                panic!("expected request variant");
            };
            assert_eq!(req.body.as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_parse_request_string_body_is_json_encoded() {
        let parsed = parse(
            TOOL_REQUEST,
            json!({"type": "POST", "url": "u", "headers": {}, "body": "raw"}),
        )
        .unwrap();
        let ValidatedRequest::Request(req) = parsed else {
            panic!("expected request variant");
        };
        assert_eq!(req.body.as_deref(), Some("\"raw\""));
    }

    #[test]
    fn test_parse_request_rejects_bad_method() {
        let err = parse(
            TOOL_REQUEST,
            json!({"type": "PATCH", "url": "u", "headers": {}, "body": null}),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("type"));
    }

    #[test]
    fn test_parse_save_file() {
        let parsed = parse(
            TOOL_SAVE_FILE,
            json!({"file_name": "OURA_API_KEY", "file_content": "secret"}),
        )
        .unwrap();
        assert_eq!(
            parsed,
            ValidatedRequest::SaveFile {
                file_name: "OURA_API_KEY".to_string(),
                file_content: "secret".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_save_file_rejects_traversal() {
        let err = parse(
            TOOL_SAVE_FILE,
            json!({"file_name": "../escape", "file_content": "x"}),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_parse_get_file_missing_name() {
        let err = parse(TOOL_GET_FILE, json!({})).unwrap_err();
        assert!(err.to_string().contains("file_name: missing required parameter"));
    }

    #[test]
    fn test_parse_list_files_ignores_extra_args() {
        assert_eq!(
            parse(TOOL_LIST_FILES, json!({"anything": 1})).unwrap(),
            ValidatedRequest::ListFiles
        );
    }
}

//! C#-specific template context builder for client generation.

// Internal imports (std, crate)
use std::collections::HashSet;

use super::ClientContextBuilder;
use crate::error::Error;
use crate::naming;
use crate::options::{GenerationOptions, MethodNameType};
use crate::schema::{ApiDocument, ApiOperation, ApiParameter};
use crate::utils::to_pascal_case;

// External imports (alphabetized)
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Placeholder namespace wrapping the generated unit; removed by post-processing
pub const PLACEHOLDER_NAMESPACE: &str = "DummyNamespace";

/// Full template context for the client compilation unit
#[derive(Clone, Debug, Serialize)]
pub struct CSharpClientContext {
    /// Name of the generated client class
    pub class_name: String,
    /// Name of the generated exception class
    pub exception_class: String,
    /// Placeholder namespace the unit is wrapped in
    pub namespace: String,
    /// Base URL the client is seeded with
    pub base_url: String,
    /// API title, if declared
    pub title: Option<String>,
    /// API version, if declared
    pub version: Option<String>,
    /// One entry per generated client method
    pub operations: Vec<CSharpOperationContext>,
    /// One entry per generated model class
    pub models: Vec<CSharpModelContext>,
}

/// Template context for one generated client method
#[derive(Clone, Debug, Serialize)]
pub struct CSharpOperationContext {
    pub method_name: String,
    pub http_method: String,
    pub path: String,
    pub summary: Option<String>,
    pub parameters: Vec<CSharpParameterContext>,
    pub body_parameter: Option<CSharpParameterContext>,
    pub return_type: Option<String>,
}

/// Template context for one method parameter
#[derive(Clone, Debug, Serialize)]
pub struct CSharpParameterContext {
    /// Name as defined in the schema
    pub name: String,
    /// Identifier-safe camelCase argument name
    pub arg_name: String,
    /// Mapped C# type
    pub cs_type: String,
    /// Literal path placeholder this parameter substitutes (e.g. "{petId}")
    pub placeholder: String,
    /// "path", "query", "header" or "body"
    pub kind: String,
    /// Query-string separator, "?" for the first query parameter, "&" after
    pub separator: String,
    pub required: bool,
}

/// Template context for one generated model class
#[derive(Clone, Debug, Serialize)]
pub struct CSharpModelContext {
    pub name: String,
    pub properties: Vec<CSharpPropertyContext>,
}

/// Template context for one model property
#[derive(Clone, Debug, Serialize)]
pub struct CSharpPropertyContext {
    /// Wire name as defined in the schema
    pub name: String,
    /// PascalCase property name
    pub cs_name: String,
    /// Mapped C# type
    pub cs_type: String,
    pub required: bool,
}

/// Builds the tera context for the C# client template
#[derive(Debug, Clone)]
pub struct CSharpContextBuilder;

impl ClientContextBuilder for CSharpContextBuilder {
    fn build(&self, doc: &ApiDocument, options: &GenerationOptions) -> crate::Result<JsonValue> {
        let mut used_names = HashSet::new();
        let operations = doc
            .operations()?
            .iter()
            .map(|op| build_operation(op, options, &mut used_names))
            .collect();

        let context = CSharpClientContext {
            class_name: options.class_name.clone(),
            exception_class: options.exception_class(),
            namespace: PLACEHOLDER_NAMESPACE.to_string(),
            base_url: doc.base_path().unwrap_or_default(),
            title: doc.title().map(String::from),
            version: doc.version().map(String::from),
            operations,
            models: build_models(doc),
        };

        serde_json::to_value(&context)
            .map_err(|e| Error::generation(format!("failed to serialize template context: {}", e)))
    }
}

fn build_operation(
    op: &ApiOperation,
    options: &GenerationOptions,
    used: &mut HashSet<String>,
) -> CSharpOperationContext {
    // An operation with no declared id always falls back to the path rule
    let candidate = match (options.method_name_type, &op.operation_id) {
        (MethodNameType::OperationId, Some(id)) => naming::operation_id_name(id),
        _ => naming::path_segments_name(&op.path, &op.http_method),
    };
    let method_name = naming::disambiguate(candidate, used);

    let mut parameters: Vec<CSharpParameterContext> = op
        .parameters
        .iter()
        .filter(|p| matches!(p.location.as_str(), "path" | "query" | "header"))
        .map(build_parameter)
        .collect();
    // Path parameters first for a stable, readable signature
    parameters.sort_by_key(|p| match p.kind.as_str() {
        "path" => 0,
        "query" => 1,
        _ => 2,
    });
    let mut first_query = true;
    for param in parameters.iter_mut().filter(|p| p.kind == "query") {
        param.separator = if first_query { "?" } else { "&" }.to_string();
        first_query = false;
    }

    let body_parameter = op.body_schema.as_ref().map(|schema| CSharpParameterContext {
        name: "body".to_string(),
        arg_name: "body".to_string(),
        cs_type: map_schema_type(Some(schema)),
        placeholder: String::new(),
        kind: "body".to_string(),
        separator: String::new(),
        required: true,
    });

    CSharpOperationContext {
        method_name,
        http_method: op.http_method.clone(),
        path: op.path.clone(),
        summary: op.summary.clone(),
        parameters,
        body_parameter,
        return_type: op.response_schema.as_ref().map(|s| map_schema_type(Some(s))),
    }
}

fn build_parameter(param: &ApiParameter) -> CSharpParameterContext {
    CSharpParameterContext {
        name: param.name.clone(),
        arg_name: to_arg_name(&param.name),
        cs_type: map_schema_type(param.schema.as_ref()),
        placeholder: format!("{{{}}}", param.name),
        kind: param.location.clone(),
        separator: String::new(),
        required: param.required,
    }
}

/// Lower-camel, identifier-safe argument name (`pet-id` becomes `petId`)
fn to_arg_name(name: &str) -> String {
    let pascal = to_pascal_case(name);
    let mut chars = pascal.chars();
    let ident: String = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => "value".to_string(),
    };
    if ident
        .chars()
        .next()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(true)
    {
        format!("_{}", ident)
    } else {
        ident
    }
}

/// Map an OpenAPI schema fragment to a C# type
fn map_schema_type(schema: Option<&JsonValue>) -> String {
    let Some(schema) = schema else {
        return "string".to_string();
    };

    if let Some(ref_str) = schema.get("$ref").and_then(JsonValue::as_str) {
        if let Some(name) = ref_str.rsplit('/').next() {
            return to_pascal_case(name);
        }
    }

    let format = schema.get("format").and_then(JsonValue::as_str);
    match schema.get("type").and_then(JsonValue::as_str) {
        Some("string") => "string".to_string(),
        Some("integer") => match format {
            Some("int64") => "long",
            _ => "int",
        }
        .to_string(),
        Some("number") => match format {
            Some("float") => "float",
            _ => "double",
        }
        .to_string(),
        Some("boolean") => "bool".to_string(),
        Some("array") => format!(
            "System.Collections.Generic.List<{}>",
            map_schema_type(schema.get("items"))
        ),
        _ => "object".to_string(),
    }
}

fn build_models(doc: &ApiDocument) -> Vec<CSharpModelContext> {
    let Some(definitions) = doc.schema_definitions() else {
        return Vec::new();
    };
    definitions
        .iter()
        .filter_map(|(name, schema)| {
            let properties = schema.get("properties").and_then(JsonValue::as_object)?;
            let required: HashSet<&str> = schema
                .get("required")
                .and_then(JsonValue::as_array)
                .map(|entries| entries.iter().filter_map(JsonValue::as_str).collect())
                .unwrap_or_default();
            let properties = properties
                .iter()
                .map(|(prop_name, prop_schema)| CSharpPropertyContext {
                    name: prop_name.clone(),
                    cs_name: to_pascal_case(prop_name),
                    cs_type: map_schema_type(Some(prop_schema)),
                    required: required.contains(prop_name.as_str()),
                })
                .collect();
            Some(CSharpModelContext {
                name: to_pascal_case(name),
                properties,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn petstore_doc() -> ApiDocument {
        ApiDocument {
            json: json!({
                "openapi": "3.0.0",
                "info": {"title": "Petstore", "version": "1.0.0"},
                "servers": [{"url": "https://petstore.example.com/v1"}],
                "paths": {
                    "/pet/{petId}": {
                        "get": {
                            "operationId": "getPetById",
                            "parameters": [
                                {"name": "petId", "in": "path", "required": true,
                                 "schema": {"type": "integer", "format": "int64"}}
                            ],
                            "responses": {"200": {"content": {"application/json": {
                                "schema": {"$ref": "#/components/schemas/Pet"}
                            }}}}
                        }
                    }
                },
                "components": {"schemas": {"Pet": {
                    "required": ["name"],
                    "properties": {
                        "id": {"type": "integer", "format": "int64"},
                        "name": {"type": "string"}
                    }
                }}}
            }),
        }
    }

    #[test]
    fn test_build_context_by_path() -> crate::Result<()> {
        let context = CSharpContextBuilder.build(&petstore_doc(), &GenerationOptions::default())?;

        assert_eq!(context["class_name"], "OpenApiClient");
        assert_eq!(context["exception_class"], "OpenApiClientException");
        assert_eq!(context["namespace"], PLACEHOLDER_NAMESPACE);
        assert_eq!(context["base_url"], "https://petstore.example.com/v1");

        let operations = context["operations"].as_array().unwrap();
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0]["method_name"], "PetGetAsync");
        assert_eq!(operations[0]["return_type"], "Pet");
        assert_eq!(operations[0]["parameters"][0]["cs_type"], "long");
        assert_eq!(operations[0]["parameters"][0]["placeholder"], "{petId}");

        let models = context["models"].as_array().unwrap();
        assert_eq!(models[0]["name"], "Pet");

        Ok(())
    }

    #[test]
    fn test_build_context_by_operation_id() -> crate::Result<()> {
        let options = GenerationOptions {
            method_name_type: MethodNameType::OperationId,
            ..GenerationOptions::default()
        };
        let context = CSharpContextBuilder.build(&petstore_doc(), &options)?;
        assert_eq!(
            context["operations"][0]["method_name"],
            "GetPetByIdAsync"
        );
        Ok(())
    }

    #[test]
    fn test_operation_id_strategy_falls_back_to_path_rule() {
        let op = ApiOperation {
            path: "/status".to_string(),
            http_method: "GET".to_string(),
            operation_id: None,
            summary: None,
            parameters: Vec::new(),
            body_schema: None,
            response_schema: None,
        };
        let options = GenerationOptions {
            method_name_type: MethodNameType::OperationId,
            ..GenerationOptions::default()
        };
        let mut used = HashSet::new();
        let built = build_operation(&op, &options, &mut used);
        assert_eq!(built.method_name, "StatusGetAsync");
    }

    #[test]
    fn test_colliding_names_get_numeric_suffixes() {
        let op = ApiOperation {
            path: "/pet".to_string(),
            http_method: "GET".to_string(),
            operation_id: None,
            summary: None,
            parameters: Vec::new(),
            body_schema: None,
            response_schema: None,
        };
        let options = GenerationOptions::default();
        let mut used = HashSet::new();
        assert_eq!(
            build_operation(&op, &options, &mut used).method_name,
            "PetGetAsync"
        );
        assert_eq!(
            build_operation(&op, &options, &mut used).method_name,
            "PetGetAsync2"
        );
    }

    #[test]
    fn test_query_separators() {
        let op = ApiOperation {
            path: "/pet/findByStatus".to_string(),
            http_method: "GET".to_string(),
            operation_id: None,
            summary: None,
            parameters: vec![
                ApiParameter {
                    name: "status".to_string(),
                    location: "query".to_string(),
                    required: false,
                    schema: Some(json!({"type": "string"})),
                },
                ApiParameter {
                    name: "limit".to_string(),
                    location: "query".to_string(),
                    required: false,
                    schema: Some(json!({"type": "integer"})),
                },
            ],
            body_schema: None,
            response_schema: None,
        };
        let built = build_operation(&op, &GenerationOptions::default(), &mut HashSet::new());
        assert_eq!(built.parameters[0].separator, "?");
        assert_eq!(built.parameters[1].separator, "&");
    }

    #[test]
    fn test_map_schema_type() {
        assert_eq!(map_schema_type(Some(&json!({"type": "string"}))), "string");
        assert_eq!(
            map_schema_type(Some(&json!({"type": "integer", "format": "int64"}))),
            "long"
        );
        assert_eq!(map_schema_type(Some(&json!({"type": "integer"}))), "int");
        assert_eq!(map_schema_type(Some(&json!({"type": "boolean"}))), "bool");
        assert_eq!(
            map_schema_type(Some(&json!({"type": "array", "items": {"type": "string"}}))),
            "System.Collections.Generic.List<string>"
        );
        assert_eq!(
            map_schema_type(Some(&json!({"$ref": "#/components/schemas/Pet"}))),
            "Pet"
        );
        assert_eq!(map_schema_type(None), "string");
        assert_eq!(map_schema_type(Some(&json!({"type": "object"}))), "object");
    }

    #[test]
    fn test_to_arg_name() {
        assert_eq!(to_arg_name("petId"), "petId");
        assert_eq!(to_arg_name("pet-id"), "petId");
        assert_eq!(to_arg_name("X-Request-Id"), "xRequestId");
        assert_eq!(to_arg_name("2fa"), "_2fa");
    }
}

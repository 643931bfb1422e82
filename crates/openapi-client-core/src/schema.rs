//! OpenAPI schema loading and document access.
//!
//! This module resolves a schema reference (local path or URL, JSON or YAML)
//! into a parsed in-memory document and provides accessors for the fields the
//! generator needs. Both OpenAPI 3.x and Swagger 2.0 documents are accepted.
//!
//! # Examples
//!
//! ```no_run
//! use openapi_client_core::schema::{ApiDocument, SchemaReference};
//! use openapi_client_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let reference = SchemaReference::new("petstore.yaml");
//! assert!(!reference.is_remote());
//! assert!(reference.is_yaml());
//!
//! let document = ApiDocument::load(&reference).await?;
//! if let Some(title) = document.title() {
//!     println!("API Title: {}", title);
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::error::{Error, Result};

// External imports (alphabetized)
use log::debug;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tokio::fs;
use url::Url;

/// HTTP verbs that can carry an operation in a path item
const HTTP_METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// A schema locator plus the two facts derived from it
///
/// Immutable once constructed; created from user input and consumed once by
/// the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReference {
    location: String,
    is_remote: bool,
    is_yaml: bool,
}

impl SchemaReference {
    /// Classify a user-supplied schema locator
    ///
    /// `http://`/`https://` prefixes select the remote transport; a
    /// `.yml`/`.yaml` extension selects the YAML parser, anything else JSON.
    pub fn new(location: impl Into<String>) -> Self {
        let location = location.into();
        let is_remote = location.starts_with("http://") || location.starts_with("https://");
        let is_yaml = location.ends_with(".yml") || location.ends_with(".yaml");
        Self {
            location,
            is_remote,
            is_yaml,
        }
    }

    /// The locator as supplied by the caller
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Whether the schema is fetched over HTTP rather than read from disk
    pub fn is_remote(&self) -> bool {
        self.is_remote
    }

    /// Whether the schema content is parsed as YAML rather than JSON
    pub fn is_yaml(&self) -> bool {
        self.is_yaml
    }
}

/// Parsed, in-memory representation of an OpenAPI schema
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ApiDocument {
    /// The raw JSON value of the schema
    pub json: JsonValue,
}

impl ApiDocument {
    /// Load a schema according to the reference's transport and format
    ///
    /// One fetch/read attempt, no retries, no caching. Transport failures are
    /// `Error::SchemaFetch`; parser and validation failures are
    /// `Error::SchemaParse`.
    pub async fn load(reference: &SchemaReference) -> Result<Self> {
        let content = if reference.is_remote() {
            Self::fetch_remote(reference.location()).await?
        } else {
            fs::read_to_string(Path::new(reference.location()))
                .await
                .map_err(|e| {
                    Error::fetch(format!(
                        "failed to read schema file {}: {}",
                        reference.location(),
                        e
                    ))
                })?
        };
        Self::from_content(&content, reference)
    }

    async fn fetch_remote(location: &str) -> Result<String> {
        let url = Url::parse(location)
            .map_err(|e| Error::fetch(format!("invalid schema URL {}: {}", location, e)))?;

        let response = reqwest::get(url).await.map_err(|e| {
            Error::fetch(format!("failed to fetch schema from {}: {}", location, e))
        })?;

        if !response.status().is_success() {
            return Err(Error::fetch(format!(
                "failed to fetch schema from {}: HTTP {}",
                location,
                response.status()
            )));
        }

        response.text().await.map_err(|e| {
            Error::fetch(format!("failed to read response from {}: {}", location, e))
        })
    }

    /// Parse content with the parser selected by the reference's extension
    fn from_content(content: &str, reference: &SchemaReference) -> Result<Self> {
        let json: JsonValue = if reference.is_yaml() {
            serde_yaml::from_str(content).map_err(|e| {
                Error::parse(format!(
                    "schema at {} is not valid YAML: {}",
                    reference.location(),
                    e
                ))
            })?
        } else {
            serde_json::from_str(content).map_err(|e| {
                Error::parse(format!(
                    "schema at {} is not valid JSON: {}",
                    reference.location(),
                    e
                ))
            })?
        };
        Self::validate(&json, reference.location())?;
        debug!("loaded schema from {}", reference.location());
        Ok(Self { json })
    }

    /// Structural validation: an object with a version marker and a paths object
    fn validate(json: &JsonValue, location: &str) -> Result<()> {
        let root = json
            .as_object()
            .ok_or_else(|| Error::parse(format!("schema at {} is not an object", location)))?;
        if !root.contains_key("openapi") && !root.contains_key("swagger") {
            return Err(Error::parse(format!(
                "schema at {} declares neither an openapi nor a swagger version",
                location
            )));
        }
        if !root.get("paths").map(JsonValue::is_object).unwrap_or(false) {
            return Err(Error::parse(format!(
                "schema at {} has no paths object",
                location
            )));
        }
        Ok(())
    }

    /// Get a reference to the raw JSON value
    pub fn as_json(&self) -> &JsonValue {
        &self.json
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.json.get("info")?.get("version")?.as_str()
    }

    /// Get the base URL of the API
    ///
    /// Tries the OpenAPI 3.x `servers` entry first, then falls back to the
    /// Swagger 2.0 `schemes`/`host`/`basePath` triple.
    pub fn base_path(&self) -> Option<String> {
        if let Some(url) = self
            .json
            .get("servers")
            .and_then(JsonValue::as_array)
            .and_then(|servers| servers.first())
            .and_then(|server| server.get("url"))
            .and_then(JsonValue::as_str)
        {
            return Some(url.to_string());
        }

        let host = self.json.get("host").and_then(JsonValue::as_str)?;
        let base_path = self
            .json
            .get("basePath")
            .and_then(JsonValue::as_str)
            .unwrap_or("");
        let scheme = match self.json.get("schemes").and_then(JsonValue::as_array) {
            Some(schemes) if schemes.iter().any(|s| s.as_str() == Some("https")) => "https",
            Some(schemes) => schemes
                .first()
                .and_then(JsonValue::as_str)
                .unwrap_or("https"),
            None => "https",
        };
        Some(format!("{}://{}{}", scheme, host, base_path))
    }

    /// Schema definitions: OpenAPI 3.x `components.schemas` or Swagger 2.0 `definitions`
    pub fn schema_definitions(&self) -> Option<&serde_json::Map<String, JsonValue>> {
        self.json
            .get("components")
            .and_then(|components| components.get("schemas"))
            .or_else(|| self.json.get("definitions"))
            .and_then(JsonValue::as_object)
    }

    /// Extract one operation per path and HTTP verb
    ///
    /// Path-level parameters are merged into each operation; operation-level
    /// definitions win on name collisions. A Swagger 2.0 `in: body` parameter
    /// or an OpenAPI 3.x `requestBody` becomes the operation's body schema.
    pub fn operations(&self) -> Result<Vec<ApiOperation>> {
        let paths = self
            .json
            .get("paths")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| Error::parse("missing 'paths' object"))?;

        let mut operations = Vec::new();
        for (path, item) in paths {
            let shared = self.resolve_parameters(item.get("parameters"));
            for method in HTTP_METHODS {
                let Some(op_item) = item.get(method).and_then(JsonValue::as_object) else {
                    continue;
                };

                let mut parameters = self.resolve_parameters(op_item.get("parameters"));
                for param in &shared {
                    let overridden = parameters
                        .iter()
                        .any(|p| p.name == param.name && p.location == param.location);
                    if !overridden {
                        parameters.push(param.clone());
                    }
                }

                let mut body_schema = parameters
                    .iter()
                    .find(|p| p.location == "body")
                    .and_then(|p| p.schema.clone());
                if body_schema.is_none() {
                    body_schema = op_item
                        .get("requestBody")
                        .and_then(|body| body.get("content"))
                        .and_then(|content| content.get("application/json"))
                        .and_then(|json_content| json_content.get("schema"))
                        .cloned();
                }
                parameters.retain(|p| p.location != "body");

                operations.push(ApiOperation {
                    path: path.clone(),
                    http_method: method.to_uppercase(),
                    operation_id: op_item
                        .get("operationId")
                        .and_then(JsonValue::as_str)
                        .map(String::from),
                    summary: op_item
                        .get("summary")
                        .and_then(JsonValue::as_str)
                        .map(String::from),
                    parameters,
                    body_schema,
                    response_schema: Self::success_response_schema(op_item),
                });
            }
        }
        Ok(operations)
    }

    /// Resolve a `parameters` array, following `$ref` entries into the document
    fn resolve_parameters(&self, list: Option<&JsonValue>) -> Vec<ApiParameter> {
        let Some(entries) = list.and_then(JsonValue::as_array) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|param| {
                let resolved = match param.get("$ref").and_then(JsonValue::as_str) {
                    Some(ref_str) => self.json.pointer(&ref_str[1..])?,
                    None => param,
                };
                ApiParameter::from_json(resolved)
            })
            .collect()
    }

    /// Schema of the 200 response, if any
    ///
    /// OpenAPI 3.x nests it under `content.application/json`; Swagger 2.0
    /// carries it directly on the response object.
    fn success_response_schema(op_item: &serde_json::Map<String, JsonValue>) -> Option<JsonValue> {
        let response = op_item.get("responses")?.get("200")?;
        response
            .get("content")
            .and_then(|content| content.get("application/json"))
            .and_then(|json_content| json_content.get("schema"))
            .or_else(|| response.get("schema"))
            .cloned()
    }
}

/// A single path + verb operation extracted from the document
#[derive(Clone, Debug, Serialize)]
pub struct ApiOperation {
    /// The path where this operation is defined (e.g., "/pet/{petId}")
    pub path: String,
    /// Uppercase HTTP verb
    pub http_method: String,
    /// The operation's declared identifier, if any
    pub operation_id: Option<String>,
    /// A short summary of what the operation does
    pub summary: Option<String>,
    /// Applicable parameters, path-level and operation-level merged
    pub parameters: Vec<ApiParameter>,
    /// Schema of the JSON request body, if the operation takes one
    pub body_schema: Option<JsonValue>,
    /// Schema of the 200 response, if declared
    pub response_schema: Option<JsonValue>,
}

/// A single operation parameter
#[derive(Clone, Debug, Serialize)]
pub struct ApiParameter {
    /// Name of the parameter as defined in the schema
    pub name: String,
    /// The location of the parameter: "query", "header", "path" or "cookie"
    /// ("body" and "formData" also occur in Swagger 2.0 documents)
    pub location: String,
    /// Whether the parameter is mandatory
    pub required: bool,
    /// The schema defining the parameter's type
    pub schema: Option<JsonValue>,
}

impl ApiParameter {
    fn from_json(value: &JsonValue) -> Option<Self> {
        let name = value.get("name").and_then(JsonValue::as_str)?.to_string();
        let location = value
            .get("in")
            .and_then(JsonValue::as_str)
            .unwrap_or("query")
            .to_string();
        let required = value
            .get("required")
            .and_then(JsonValue::as_bool)
            .unwrap_or(location == "path");

        // OpenAPI 3.x carries the type under `schema`; Swagger 2.0 inlines it
        let schema = value.get("schema").cloned().or_else(|| {
            value.get("type")?;
            let mut inline = serde_json::Map::new();
            for key in ["type", "format", "items", "enum"] {
                if let Some(v) = value.get(key) {
                    inline.insert(key.to_string(), v.clone());
                }
            }
            Some(JsonValue::Object(inline))
        });

        Some(Self {
            name,
            location,
            required,
            schema,
        })
    }
}

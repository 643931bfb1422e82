//! Post-processing of generated client source.
//!
//! Three pure text transforms turn the generator's compilation unit into
//! script-embeddable source: stripping generator-internal directive and
//! comment lines, unwrapping the placeholder namespace, and appending the
//! supplemental partial definitions (shared default transport, parameterless
//! constructor, optional response-tracing hook).
//!
//! Each structural assumption about the generator's output is verified before
//! the corresponding splice; a mismatch is an explicit `Error::PostProcess`
//! instead of dead code that only fails once it reaches the execution context.

// Internal imports (std, crate)
use crate::builders::csharp::PLACEHOLDER_NAMESPACE;
use crate::error::{Error, Result};
use crate::generator::GeneratedSource;
use crate::options::GenerationOptions;

// External imports (alphabetized)
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Lines that only make sense inside the generator's own compilation unit:
/// pragma directives and column-zero pass-through comments
static DIRECTIVE_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#pragma|//).*$").unwrap());

/// The partial-method signature the tracing hook attaches to
const PROCESS_RESPONSE_HOOK: &str = "partial void ProcessResponse(System.Net.Http.HttpClient client, System.Net.Http.HttpResponseMessage response);";

/// Post-processed source, ready for submission to an execution context
#[derive(Debug, Clone)]
pub struct FinalSource {
    /// The single public client type the source defines
    pub class_name: String,
    /// The finished source text
    pub text: String,
}

/// Apply the post-processing transforms in order
pub fn post_process(source: GeneratedSource, options: &GenerationOptions) -> Result<FinalSource> {
    let stripped = DIRECTIVE_LINE_RE.replace_all(&source.text, "");
    let unwrapped = unwrap_namespace(&stripped, PLACEHOLDER_NAMESPACE)?;
    let mut text = unwrapped.trim().to_string();

    let transport_ctor = format!(
        "public {}(System.Net.Http.HttpClient httpClient)",
        options.class_name
    );
    if !text.contains(&transport_ctor) {
        return Err(Error::post_process(format!(
            "generated source has no transport-accepting constructor for {}",
            options.class_name
        )));
    }
    text.push_str(&class_addition(
        &options.class_name,
        &format!(
            "    private static readonly System.Net.Http.HttpClient DefaultHttpClient = new System.Net.Http.HttpClient();\n\n    public {}()\n        : this(DefaultHttpClient) {{ }}",
            options.class_name
        ),
    ));

    if options.enable_tracing {
        if !text.contains(PROCESS_RESPONSE_HOOK) {
            return Err(Error::post_process(
                "generated source has no ProcessResponse hook declaration",
            ));
        }
        text.push_str(&class_addition(
            &options.class_name,
            "    partial void ProcessResponse(System.Net.Http.HttpClient client, System.Net.Http.HttpResponseMessage response)\n    {\n        display(response);\n    }",
        ));
    }

    debug!(
        "post-processed source for {}: {} bytes",
        source.class_name,
        text.len()
    );
    Ok(FinalSource {
        class_name: source.class_name,
        text,
    })
}

/// Splice out the placeholder namespace wrapper, keeping its body verbatim
///
/// The closing brace is located by depth scanning; braces inside generated
/// string literals always come in matched pairs, so a plain scan stays
/// balanced.
fn unwrap_namespace(text: &str, namespace: &str) -> Result<String> {
    let token = format!("namespace {}", namespace);
    let start = text.find(&token).ok_or_else(|| {
        Error::post_process(format!(
            "generated source does not contain the '{}' wrapper",
            token
        ))
    })?;
    let after_token = start + token.len();
    let open = text[after_token..]
        .find('{')
        .ok_or_else(|| Error::post_process("namespace wrapper has no opening brace"))?;
    let body_start = after_token + open + 1;

    let mut depth = 1usize;
    let mut body_end = None;
    for (idx, ch) in text[body_start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    body_end = Some(body_start + idx);
                    break;
                }
            }
            _ => {}
        }
    }
    let body_end =
        body_end.ok_or_else(|| Error::post_process("namespace wrapper is not brace-balanced"))?;

    let mut result = String::with_capacity(text.len());
    result.push_str(&text[..start]);
    result.push_str(&text[body_start..body_end]);
    result.push_str(&text[body_end + 1..]);
    Ok(result)
}

fn class_addition(class_name: &str, body: &str) -> String {
    format!("\n\npublic partial class {} {{\n{}\n}}", class_name, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fabricated_source(class_name: &str, enable_hook_decl: bool) -> GeneratedSource {
        let hook = if enable_hook_decl {
            format!("        {}\n", PROCESS_RESPONSE_HOOK)
        } else {
            String::new()
        };
        GeneratedSource {
            class_name: class_name.to_string(),
            text: format!(
                "#pragma warning disable 108\n\
                 //----------------------\n\
                 // <auto-generated>\n\
                 //----------------------\n\
                 \n\
                 namespace DummyNamespace\n\
                 {{\n\
                 \x20   public partial class {name}\n\
                 \x20   {{\n\
                 \x20       public {name}(System.Net.Http.HttpClient httpClient) {{ }}\n\
                 {hook}\
                 \x20   }}\n\
                 }}\n",
                name = class_name,
                hook = hook
            ),
        }
    }

    #[test]
    fn test_directive_lines_are_stripped() -> crate::Result<()> {
        let finished = post_process(
            fabricated_source("OpenApiClient", true),
            &GenerationOptions::default(),
        )?;
        assert!(!finished.text.contains("#pragma"));
        assert!(!finished.text.contains("auto-generated"));
        Ok(())
    }

    #[test]
    fn test_namespace_wrapper_is_unwrapped() -> crate::Result<()> {
        let finished = post_process(
            fabricated_source("OpenApiClient", true),
            &GenerationOptions::default(),
        )?;
        assert!(!finished.text.contains("namespace DummyNamespace"));
        // The unwrapped body keeps its leading type declaration
        assert!(finished.text.starts_with("public partial class OpenApiClient"));
        Ok(())
    }

    #[test]
    fn test_default_constructor_is_appended() -> crate::Result<()> {
        let finished = post_process(
            fabricated_source("OpenApiClient", true),
            &GenerationOptions::default(),
        )?;
        assert!(finished.text.contains("private static readonly System.Net.Http.HttpClient DefaultHttpClient"));
        assert!(finished.text.contains("public OpenApiClient()"));
        assert!(finished.text.contains(": this(DefaultHttpClient) { }"));
        Ok(())
    }

    #[test]
    fn test_tracing_hook_is_appended_exactly_once() -> crate::Result<()> {
        let options = GenerationOptions {
            enable_tracing: true,
            ..GenerationOptions::default()
        };
        let finished = post_process(fabricated_source("OpenApiClient", true), &options)?;
        assert_eq!(finished.text.matches("display(response);").count(), 1);

        let without = post_process(
            fabricated_source("OpenApiClient", true),
            &GenerationOptions::default(),
        )?;
        assert_eq!(without.text.matches("display(response);").count(), 0);
        Ok(())
    }

    #[test]
    fn test_missing_namespace_is_an_explicit_error() {
        let source = GeneratedSource {
            class_name: "OpenApiClient".to_string(),
            text: "public partial class OpenApiClient { }".to_string(),
        };
        let err = post_process(source, &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, Error::PostProcess(_)));
    }

    #[test]
    fn test_missing_transport_constructor_is_an_explicit_error() {
        let source = GeneratedSource {
            class_name: "OpenApiClient".to_string(),
            text: "namespace DummyNamespace\n{\n    public partial class OpenApiClient { }\n}\n"
                .to_string(),
        };
        let err = post_process(source, &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, Error::PostProcess(_)));
    }

    #[test]
    fn test_missing_hook_declaration_is_an_explicit_error() {
        let options = GenerationOptions {
            enable_tracing: true,
            ..GenerationOptions::default()
        };
        let err = post_process(fabricated_source("OpenApiClient", false), &options).unwrap_err();
        assert!(matches!(err, Error::PostProcess(_)));
    }

    #[test]
    fn test_unwrap_preserves_inner_braces() -> crate::Result<()> {
        let text = "namespace DummyNamespace\n{\n    class A { void M() { } }\n}\ntrailing";
        let result = unwrap_namespace(text, "DummyNamespace")?;
        assert!(result.contains("class A { void M() { } }"));
        assert!(result.contains("trailing"));
        assert!(!result.contains("namespace"));
        Ok(())
    }
}

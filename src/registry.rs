//! Explicit registration of the server's resources.
//!
//! Each resource is declared with its URI template, metadata and handler.
//! The table is compiled and checked once at startup; a bad template or a
//! mismatch between expected and routed tools stops the server before it
//! accepts any request.

use std::collections::{HashMap, HashSet};

use rmcp::model::{AnnotateAble, RawResource, Resource, ResourceTemplate};
use serde_json::json;

use crate::error::RegistryError;

/// Parameters captured from a templated URI, keyed by placeholder name
pub type ResourceParams = HashMap<String, String>;

pub type ResourceHandler = fn(&ResourceParams) -> String;

const TEXT_PLAIN: &str = "text/plain";

/// One readable resource as declared by the server
#[derive(Clone)]
pub struct ResourceEntry {
    /// `scheme://path`, optionally with `{name}` placeholders
    pub template: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub handler: ResourceHandler,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone)]
struct UriPattern {
    segments: Vec<Segment>,
}

impl UriPattern {
    fn parse(template: &str) -> Result<Self, RegistryError> {
        let malformed = |reason: &str| RegistryError::MalformedTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        match template.find("://") {
            Some(i) if i > 0 => {}
            _ => return Err(malformed("missing scheme")),
        }

        let mut segments = Vec::new();
        let mut seen = HashSet::new();
        let mut rest = template;

        while !rest.is_empty() {
            match rest.find(['{', '}']) {
                None => {
                    segments.push(Segment::Literal(rest.to_string()));
                    break;
                }
                Some(i) if rest[i..].starts_with('}') => return Err(malformed("unbalanced '}'")),
                Some(i) => {
                    if i > 0 {
                        segments.push(Segment::Literal(rest[..i].to_string()));
                    }
                    let after = &rest[i + 1..];
                    let close = after.find('}').ok_or_else(|| malformed("unclosed '{'"))?;
                    let name = &after[..close];
                    if name.is_empty() {
                        return Err(malformed("empty parameter name"));
                    }
                    if name.contains(['{', '/']) {
                        return Err(malformed("invalid parameter name"));
                    }
                    if matches!(segments.last(), Some(Segment::Param(_))) {
                        return Err(malformed("adjacent parameters"));
                    }
                    if !seen.insert(name.to_string()) {
                        return Err(malformed("duplicate parameter name"));
                    }
                    segments.push(Segment::Param(name.to_string()));
                    rest = &after[close + 1..];
                }
            }
        }

        Ok(Self { segments })
    }

    fn has_params(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Param(_)))
    }

    /// Matches the whole of `uri`. A parameter captures a non-empty run
    /// without `/`, taking the longest run that lets the rest still match.
    fn matches(&self, uri: &str) -> Option<ResourceParams> {
        let mut params = ResourceParams::new();
        match_segments(&self.segments, uri, &mut params).then_some(params)
    }
}

fn match_segments(segments: &[Segment], rest: &str, params: &mut ResourceParams) -> bool {
    let Some((segment, tail)) = segments.split_first() else {
        return rest.is_empty();
    };

    match segment {
        Segment::Literal(lit) => rest
            .strip_prefix(lit.as_str())
            .is_some_and(|rest| match_segments(tail, rest, params)),
        Segment::Param(name) => {
            let run = rest.find('/').map_or(rest, |i| &rest[..i]);
            let ends: Vec<usize> = run.char_indices().map(|(i, c)| i + c.len_utf8()).collect();

            for end in ends.into_iter().rev() {
                params.insert(name.clone(), run[..end].to_string());
                if match_segments(tail, &rest[end..], params) {
                    return true;
                }
            }
            params.remove(name);
            false
        }
    }
}

#[derive(Clone)]
struct Route {
    entry: ResourceEntry,
    pattern: UriPattern,
}

/// Compiled resource table shared by all requests
#[derive(Clone)]
pub struct ResourceRegistry {
    routes: Vec<Route>,
    resources: Vec<Resource>,
    templates: Vec<ResourceTemplate>,
}

impl ResourceRegistry {
    /// Compiles every entry, rejecting malformed or duplicate templates
    pub fn new(entries: Vec<ResourceEntry>) -> Result<Self, RegistryError> {
        let mut routes = Vec::with_capacity(entries.len());
        let mut resources = Vec::new();
        let mut templates = Vec::new();
        let mut seen = HashSet::new();

        for entry in entries {
            if !seen.insert(entry.template) {
                return Err(RegistryError::DuplicateTemplate(entry.template.to_string()));
            }
            let pattern = UriPattern::parse(entry.template)?;

            if pattern.has_params() {
                templates.push(template_descriptor(&entry)?);
            } else {
                let mut raw = RawResource::new(entry.template, entry.name);
                raw.description = Some(entry.description.to_string());
                raw.mime_type = Some(TEXT_PLAIN.to_string());
                resources.push(raw.no_annotation());
            }

            tracing::debug!("Registered resource {}", entry.template);
            routes.push(Route { entry, pattern });
        }

        Ok(Self {
            routes,
            resources,
            templates,
        })
    }

    /// Runs the handler of the first route matching `uri`
    pub fn resolve(&self, uri: &str) -> Option<String> {
        self.routes.iter().find_map(|route| {
            route
                .pattern
                .matches(uri)
                .map(|params| (route.entry.handler)(&params))
        })
    }

    /// Fixed-URI resources, for `resources/list`
    pub fn resources(&self) -> Vec<Resource> {
        self.resources.clone()
    }

    /// Parameterised resources, for `resources/templates/list`
    pub fn resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }
}

fn template_descriptor(entry: &ResourceEntry) -> Result<ResourceTemplate, RegistryError> {
    serde_json::from_value(json!({
        "uriTemplate": entry.template,
        "name": entry.name,
        "description": entry.description,
        "mimeType": TEXT_PLAIN,
    }))
    .map_err(|source| RegistryError::Descriptor {
        template: entry.template.to_string(),
        source,
    })
}

/// Checks that the tool router publishes exactly the expected tool names
pub fn check_tools<S: AsRef<str>>(expected: &[&str], routed: &[S]) -> Result<(), RegistryError> {
    let routed: HashSet<&str> = routed.iter().map(AsRef::as_ref).collect();

    if let Some(missing) = expected.iter().find(|name| !routed.contains(*name)) {
        return Err(RegistryError::MissingTool(missing.to_string()));
    }
    if let Some(extra) = routed.iter().find(|name| !expected.contains(*name)) {
        return Err(RegistryError::UnexpectedTool(extra.to_string()));
    }
    Ok(())
}

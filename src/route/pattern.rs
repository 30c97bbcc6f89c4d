//! Path-pattern compilation, matching, and reverse building.
//!
//! A pattern is a path template made of literal segments and named
//! placeholders:
//!
//! - `/users/:id`: required parameter
//! - `/posts/:id?`: optional parameter
//! - `/docs/*slug`: catch-all (one or more segments)
//! - `/files/*path?`: optional catch-all (zero or more segments)
//!
//! Compilation happens once per route. The compiled form matches candidate
//! paths into ordered captures and reverse-builds concrete paths from a
//! parameter map.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::RouteError;
use crate::params::{plain_value, Params};

/// One segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternSegment {
    /// Literal text, compared against the candidate segment.
    Static(String),
    /// Named parameter capturing exactly one segment: `:id` or `:id?`.
    Param { name: String, optional: bool },
    /// Named parameter capturing the rest of the path: `*slug` or `*slug?`.
    CatchAll { name: String, optional: bool },
}

/// Classifies a raw pattern segment.
///
/// Rejects placeholders with an empty name (`:`, `:?`, `*`). Anything that
/// does not start with `:` or `*` is a literal.
pub fn classify_segment(segment: &str) -> Result<PatternSegment, String> {
    let (body, catch_all) = match segment.strip_prefix('*') {
        Some(rest) => (rest, true),
        None => match segment.strip_prefix(':') {
            Some(rest) => (rest, false),
            None => return Ok(PatternSegment::Static(segment.to_string())),
        },
    };

    let (name, optional) = match body.strip_suffix('?') {
        Some(name) => (name, true),
        None => (body, false),
    };

    if name.is_empty() {
        return Err(format!("segment \"{segment}\" has no parameter name"));
    }

    let name = name.to_string();
    Ok(if catch_all {
        PatternSegment::CatchAll { name, optional }
    } else {
        PatternSegment::Param { name, optional }
    })
}

/// A pattern compiled into segments, a matcher, and a reverse builder.
///
/// Invariant: the i-th capture produced by [`CompiledPattern::matches`]
/// corresponds to `param_names()[i]`.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: String,
    segments: Vec<PatternSegment>,
    param_names: Vec<String>,
}

impl CompiledPattern {
    /// Compiles a path template.
    ///
    /// # Examples
    ///
    /// ```
    /// use named_routes::CompiledPattern;
    ///
    /// let compiled = CompiledPattern::compile("/users/:id").unwrap();
    /// assert_eq!(compiled.param_names(), ["id"]);
    ///
    /// assert!(CompiledPattern::compile("/users/:").is_err());
    /// ```
    pub fn compile(pattern: &str) -> Result<Self, RouteError> {
        let mut segments = Vec::new();
        let mut param_names = Vec::new();

        for raw in pattern.split('/').filter(|s| !s.is_empty()) {
            let segment =
                classify_segment(raw).map_err(|reason| RouteError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason,
                })?;

            match &segment {
                PatternSegment::Param { name, .. } | PatternSegment::CatchAll { name, .. } => {
                    param_names.push(name.clone());
                }
                PatternSegment::Static(_) => {}
            }

            segments.push(segment);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
            param_names,
        })
    }

    /// The source template this pattern was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Capture names in declaration order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Matches a candidate path, returning raw captures aligned with
    /// [`param_names`](Self::param_names).
    ///
    /// A `None` capture means the placeholder was structurally absent (an
    /// unconsumed optional, or an optional catch-all with zero segments).
    /// Trailing and duplicate slashes in the candidate are tolerated.
    pub fn matches(&self, path: &str, case_insensitive: bool) -> Option<Vec<Option<String>>> {
        let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut captured = match_segments(
            &self.segments,
            &path_segments,
            0,
            0,
            HashMap::new(),
            case_insensitive,
        )?;

        Some(
            self.param_names
                .iter()
                .map(|name| captured.remove(name.as_str()))
                .collect(),
        )
    }

    /// Reverse-builds a concrete path by substituting parameter values.
    ///
    /// Required placeholders with no value (or a null value) fail with
    /// [`RouteError::MissingParam`]. Values are percent-encoded per segment;
    /// catch-all values may be arrays (elements joined with `/`) or
    /// pre-joined strings (separators preserved). Returns an empty string
    /// when every segment is omitted.
    pub fn build(&self, params: &Params) -> Result<String, RouteError> {
        let mut parts: Vec<String> = Vec::new();

        for segment in &self.segments {
            match segment {
                PatternSegment::Static(text) => parts.push(text.clone()),
                PatternSegment::Param { name, optional } => {
                    match params.get(name.as_str()).and_then(plain_value) {
                        Some(value) => parts.push(urlencoding::encode(&value).into_owned()),
                        None if *optional => {}
                        None => return Err(self.missing_param(name)),
                    }
                }
                PatternSegment::CatchAll { name, optional } => {
                    let joined = match params.get(name.as_str()) {
                        Some(Value::Array(items)) => items
                            .iter()
                            .filter_map(plain_value)
                            .map(|part| urlencoding::encode(&part).into_owned())
                            .collect::<Vec<_>>()
                            .join("/"),
                        Some(value) => plain_value(value)
                            .map(|joined| {
                                joined
                                    .split('/')
                                    .map(|part| urlencoding::encode(part).into_owned())
                                    .collect::<Vec<_>>()
                                    .join("/")
                            })
                            .unwrap_or_default(),
                        None => String::new(),
                    };

                    if joined.is_empty() {
                        if !optional {
                            return Err(self.missing_param(name));
                        }
                    } else {
                        parts.push(joined);
                    }
                }
            }
        }

        let filtered: Vec<String> = parts.into_iter().filter(|part| !part.is_empty()).collect();
        if filtered.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("/{}", filtered.join("/")))
        }
    }

    fn missing_param(&self, name: &str) -> RouteError {
        RouteError::MissingParam {
            param: name.to_string(),
            pattern: self.pattern.clone(),
        }
    }
}

fn segment_eq(expected: &str, actual: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        expected.eq_ignore_ascii_case(actual)
    } else {
        expected == actual
    }
}

/// Walks pattern and path segments simultaneously.
///
/// An optional parameter consumes the current path segment unless the next
/// pattern segment is a literal that matches it, in which case the optional
/// is skipped and the literal takes the segment instead.
fn match_segments(
    segments: &[PatternSegment],
    path_segments: &[&str],
    seg_idx: usize,
    path_idx: usize,
    captured: HashMap<String, String>,
    case_insensitive: bool,
) -> Option<HashMap<String, String>> {
    // Consumed all pattern segments: success if the path is consumed too.
    if seg_idx >= segments.len() {
        return (path_idx == path_segments.len()).then_some(captured);
    }

    match &segments[seg_idx] {
        PatternSegment::CatchAll { name, optional } => {
            let remaining = &path_segments[path_idx..];
            if remaining.is_empty() && !optional {
                return None;
            }
            let mut captured = captured;
            if !remaining.is_empty() {
                captured.insert(name.clone(), remaining.join("/"));
            }
            Some(captured)
        }
        PatternSegment::Param {
            name,
            optional: true,
        } => {
            let consume = path_idx < path_segments.len()
                && match segments.get(seg_idx + 1) {
                    Some(PatternSegment::Static(text)) => {
                        !segment_eq(text, path_segments[path_idx], case_insensitive)
                    }
                    Some(_) | None => true,
                };

            if consume {
                let mut captured = captured;
                captured.insert(name.clone(), path_segments[path_idx].to_string());
                return match_segments(
                    segments,
                    path_segments,
                    seg_idx + 1,
                    path_idx + 1,
                    captured,
                    case_insensitive,
                );
            }

            match_segments(
                segments,
                path_segments,
                seg_idx + 1,
                path_idx,
                captured,
                case_insensitive,
            )
        }
        PatternSegment::Param {
            name,
            optional: false,
        } => {
            if path_idx >= path_segments.len() {
                return None;
            }
            let mut captured = captured;
            captured.insert(name.clone(), path_segments[path_idx].to_string());
            match_segments(
                segments,
                path_segments,
                seg_idx + 1,
                path_idx + 1,
                captured,
                case_insensitive,
            )
        }
        PatternSegment::Static(text) => {
            if path_idx >= path_segments.len() {
                return None;
            }
            if !segment_eq(text, path_segments[path_idx], case_insensitive) {
                return None;
            }
            match_segments(
                segments,
                path_segments,
                seg_idx + 1,
                path_idx + 1,
                captured,
                case_insensitive,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::params_from;
    use serde_json::json;

    fn captures(pattern: &str, path: &str) -> Option<Vec<Option<String>>> {
        CompiledPattern::compile(pattern).unwrap().matches(path, false)
    }

    #[test]
    fn test_classify_static() {
        let seg = classify_segment("about").unwrap();
        assert_eq!(seg, PatternSegment::Static("about".to_string()));
    }

    #[test]
    fn test_classify_required() {
        let seg = classify_segment(":id").unwrap();
        assert_eq!(
            seg,
            PatternSegment::Param {
                name: "id".to_string(),
                optional: false
            }
        );
    }

    #[test]
    fn test_classify_optional() {
        let seg = classify_segment(":id?").unwrap();
        assert_eq!(
            seg,
            PatternSegment::Param {
                name: "id".to_string(),
                optional: true
            }
        );
    }

    #[test]
    fn test_classify_catch_all() {
        let seg = classify_segment("*slug").unwrap();
        assert_eq!(
            seg,
            PatternSegment::CatchAll {
                name: "slug".to_string(),
                optional: false
            }
        );
    }

    #[test]
    fn test_classify_rejects_empty_name() {
        assert!(classify_segment(":").is_err());
        assert!(classify_segment(":?").is_err());
        assert!(classify_segment("*").is_err());
    }

    #[test]
    fn test_compile_collects_param_names_in_order() {
        let compiled = CompiledPattern::compile("/posts/:year/:slug").unwrap();
        assert_eq!(compiled.param_names(), ["year", "slug"]);
    }

    #[test]
    fn test_match_static() {
        assert_eq!(captures("/about", "/about"), Some(vec![]));
        assert_eq!(captures("/about", "/about/"), Some(vec![]));
        assert_eq!(captures("/about", "/other"), None);
    }

    #[test]
    fn test_match_required_param() {
        assert_eq!(
            captures("/users/:id", "/users/123"),
            Some(vec![Some("123".to_string())])
        );
        assert_eq!(captures("/users/:id", "/users"), None);
        assert_eq!(captures("/users/:id", "/users/1/2"), None);
    }

    #[test]
    fn test_match_optional_param_absent() {
        assert_eq!(captures("/posts/:id?", "/posts"), Some(vec![None]));
    }

    #[test]
    fn test_match_optional_param_skips_for_literal() {
        // The optional yields to a literal that matches the current segment.
        assert_eq!(captures("/posts/:id?/edit", "/posts/edit"), Some(vec![None]));
        assert_eq!(
            captures("/posts/:id?/edit", "/posts/7/edit"),
            Some(vec![Some("7".to_string())])
        );
    }

    #[test]
    fn test_match_catch_all() {
        assert_eq!(
            captures("/docs/*slug", "/docs/guide/intro"),
            Some(vec![Some("guide/intro".to_string())])
        );
        assert_eq!(captures("/docs/*slug", "/docs"), None);
    }

    #[test]
    fn test_match_optional_catch_all_empty() {
        assert_eq!(captures("/docs/*slug?", "/docs"), Some(vec![None]));
    }

    #[test]
    fn test_match_case_insensitive_statics() {
        let compiled = CompiledPattern::compile("/about").unwrap();
        assert!(compiled.matches("/About", true).is_some());
        assert!(compiled.matches("/About", false).is_none());
    }

    #[test]
    fn test_build_substitutes_params() {
        let compiled = CompiledPattern::compile("/users/:id").unwrap();
        let path = compiled.build(&params_from([("id", "42")])).unwrap();
        assert_eq!(path, "/users/42");
    }

    #[test]
    fn test_build_missing_required_param() {
        let compiled = CompiledPattern::compile("/users/:id").unwrap();
        let err = compiled.build(&Params::new()).unwrap_err();
        assert!(matches!(err, RouteError::MissingParam { .. }));
    }

    #[test]
    fn test_build_null_counts_as_missing() {
        let compiled = CompiledPattern::compile("/users/:id").unwrap();
        let err = compiled.build(&params_from([("id", json!(null))])).unwrap_err();
        assert!(matches!(err, RouteError::MissingParam { .. }));
    }

    #[test]
    fn test_build_omits_optional() {
        let compiled = CompiledPattern::compile("/posts/:id?").unwrap();
        assert_eq!(compiled.build(&Params::new()).unwrap(), "/posts");
    }

    #[test]
    fn test_build_encodes_values() {
        let compiled = CompiledPattern::compile("/tags/:tag").unwrap();
        let path = compiled.build(&params_from([("tag", "a b")])).unwrap();
        assert_eq!(path, "/tags/a%20b");
    }

    #[test]
    fn test_build_catch_all_from_array() {
        let compiled = CompiledPattern::compile("/docs/*slug").unwrap();
        let path = compiled
            .build(&params_from([("slug", json!(["guide", "intro"]))]))
            .unwrap();
        assert_eq!(path, "/docs/guide/intro");
    }

    #[test]
    fn test_build_catch_all_preserves_string_separators() {
        let compiled = CompiledPattern::compile("/docs/*slug").unwrap();
        let path = compiled
            .build(&params_from([("slug", "guide/getting started")]))
            .unwrap();
        assert_eq!(path, "/docs/guide/getting%20started");
    }

    #[test]
    fn test_build_empty_pattern_yields_empty_string() {
        let compiled = CompiledPattern::compile("/:id?").unwrap();
        assert_eq!(compiled.build(&Params::new()).unwrap(), "");
    }

    #[test]
    fn test_match_build_round_trip() {
        let compiled = CompiledPattern::compile("/posts/:year/*slug").unwrap();
        let built = compiled
            .build(&params_from([
                ("year", json!("2024")),
                ("slug", json!("hello/world")),
            ]))
            .unwrap();
        assert_eq!(built, "/posts/2024/hello/world");

        let captures = compiled.matches(&built, false).unwrap();
        assert_eq!(
            captures,
            vec![Some("2024".to_string()), Some("hello/world".to_string())]
        );
    }
}

//! Style configuration: default attribute sets and glob-matched node rules.
//!
//! The on-disk configuration is a YAML document with three recognized
//! default sections (`task`, `dependency`, `invocation`) and an ordered
//! `node-styles` rule list. Unknown keys are rejected at decode time. Rule
//! patterns are compiled into matchers once, when the configuration is
//! turned into a [`StyleSheet`], so matching against every node in the
//! graph needs no mutable cached state.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::attributes::Attributes;
use crate::graph::Node;
use crate::{Error, Result};

/// Decoded style configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Default attributes applied to the shared `node` block.
    #[serde(default)]
    pub task: Attributes,

    /// Default attributes for the dependency-edge section.
    #[serde(default)]
    pub dependency: Attributes,

    /// Default attributes for the call-edge section.
    #[serde(default)]
    pub invocation: Attributes,

    /// Ordered per-node style rules, applied in declaration order.
    #[serde(default, rename = "node-styles")]
    pub node_styles: Vec<StyleRule>,
}

/// A single glob-pattern style rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleRule {
    /// Glob pattern matched against node labels. `*` matches any run of
    /// characters, `?` exactly one; matching is case-insensitive and
    /// anchored to the whole label.
    #[serde(rename = "match")]
    pub pattern: String,

    /// Attributes merged into every matching node.
    #[serde(default)]
    pub attributes: Attributes,
}

impl StyleConfig {
    /// The built-in configuration used when no file is given.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            task: [
                ("shape", "box"),
                ("style", "rounded, filled"),
                ("fontname", "Segoe UI"),
                ("penwidth", "2"),
            ]
            .into_iter()
            .collect(),
            dependency: [
                ("style", "dashed"),
                ("arrowhead", "none"),
                ("arrowtail", "none"),
            ]
            .into_iter()
            .collect(),
            invocation: [
                ("style", "solid"),
                ("arrowhead", "normal"),
                ("arrowtail", "none"),
            ]
            .into_iter()
            .collect(),
            node_styles: Vec::new(),
        }
    }

    /// Load a configuration document from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to decode,
    /// including when it contains unrecognized keys.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&text).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Compile all rule patterns, producing an immutable [`StyleSheet`].
    ///
    /// Patterns are compiled up front to catch errors early and avoid
    /// recompilation while matching against every node in the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule pattern cannot be compiled.
    pub fn compile(self) -> Result<StyleSheet> {
        let rules = self
            .node_styles
            .into_iter()
            .map(|rule| {
                Ok(CompiledRule {
                    matcher: glob_matcher(&rule.pattern)?,
                    attributes: rule.attributes,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(StyleSheet {
            task: self.task,
            dependency: self.dependency,
            invocation: self.invocation,
            rules,
        })
    }
}

/// A compiled, ready-to-apply style configuration.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    /// Default attributes for the shared `node` block.
    pub task: Attributes,
    /// Default attributes for the dependency-edge section.
    pub dependency: Attributes,
    /// Default attributes for the call-edge section.
    pub invocation: Attributes,
    rules: Vec<CompiledRule>,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    matcher: Regex,
    attributes: Attributes,
}

impl StyleSheet {
    /// Merge every rule matching the node's label into its attribute set,
    /// in declaration order. Later rules win on conflicting keys.
    pub fn apply(&self, node: &mut Node) {
        for rule in &self.rules {
            if rule.matcher.is_match(&node.label) {
                node.attributes.merge(&rule.attributes);
            }
        }
    }
}

/// Translate a glob pattern into an anchored, case-insensitive matcher.
fn glob_matcher(pattern: &str) -> Result<Regex> {
    let escaped = regex::escape(pattern)
        .replace("\\*", ".*")
        .replace("\\?", ".");

    Regex::new(&format!("(?i)^{escaped}$")).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, label: &str) -> bool {
        glob_matcher(pattern).unwrap().is_match(label)
    }

    #[test]
    fn test_star_matches_any_run() {
        assert!(matches("build*", "build"));
        assert!(matches("build*", "build-all"));
        assert!(!matches("build*", "rebuild"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert!(matches("Build*", "build-all"));
        assert!(matches("lint", "LINT"));
    }

    #[test]
    fn test_question_mark_matches_one_character() {
        assert!(matches("v?", "v1"));
        assert!(!matches("v?", "v12"));
        assert!(!matches("v?", "v"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(matches("a.b", "a.b"));
        assert!(!matches("a.b", "axb"));
        assert!(matches("c++", "C++"));
    }

    #[test]
    fn test_match_is_anchored() {
        assert!(!matches("build", "prebuild"));
        assert!(!matches("build", "builder"));
    }

    #[test]
    fn test_builtin_defaults() {
        let config = StyleConfig::builtin();
        assert_eq!(config.task.get("shape"), Some("box"));
        assert_eq!(config.task.get("style"), Some("rounded, filled"));
        assert_eq!(config.dependency.get("style"), Some("dashed"));
        assert_eq!(config.invocation.get("arrowhead"), Some("normal"));
        assert!(config.node_styles.is_empty());
    }

    #[test]
    fn test_decode_full_document() {
        let config: StyleConfig = serde_yaml::from_str(
            r#"
task:
  shape: ellipse
dependency:
  style: dotted
invocation:
  style: bold
node-styles:
  - match: "build*"
    attributes:
      fillcolor: lightblue
"#,
        )
        .unwrap();

        assert_eq!(config.task.get("shape"), Some("ellipse"));
        assert_eq!(config.node_styles.len(), 1);
        assert_eq!(config.node_styles[0].pattern, "build*");
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        let result: std::result::Result<StyleConfig, _> =
            serde_yaml::from_str("task: {}\nedges: {}\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_rule_key_is_rejected() {
        let result: std::result::Result<StyleConfig, _> = serde_yaml::from_str(
            "node-styles:\n  - match: '*'\n    colour: red\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = StyleConfig::load(Path::new("/nonexistent/styles.yml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_and_compile_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.yml");
        fs::write(
            &path,
            "node-styles:\n  - match: 'deploy*'\n    attributes:\n      color: red\n",
        )
        .unwrap();

        let sheet = StyleConfig::load(&path).unwrap().compile().unwrap();

        let mut node = Node::new("deploy_prod", "deploy:prod");
        sheet.apply(&mut node);
        assert_eq!(node.attributes.get("color"), Some("red"));
    }

    #[test]
    fn test_later_rule_wins_conflicting_keys() {
        let config: StyleConfig = serde_yaml::from_str(
            r#"
node-styles:
  - match: "build*"
    attributes:
      color: blue
      shape: box
  - match: "*all"
    attributes:
      color: green
"#,
        )
        .unwrap();
        let sheet = config.compile().unwrap();

        let mut node = Node::new("build_all", "build-all");
        sheet.apply(&mut node);

        assert_eq!(node.attributes.get("color"), Some("green"));
        assert_eq!(node.attributes.get("shape"), Some("box"));
    }

    #[test]
    fn test_non_matching_rule_is_a_no_op() {
        let config: StyleConfig = serde_yaml::from_str(
            "node-styles:\n  - match: 'deploy*'\n    attributes:\n      color: red\n",
        )
        .unwrap();
        let sheet = config.compile().unwrap();

        let mut node = Node::new("lint", "lint");
        sheet.apply(&mut node);

        assert_eq!(node.attributes.get("color"), None);
        assert_eq!(node.attributes.len(), 1);
    }
}

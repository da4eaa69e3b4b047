//! Taskfile schema and loading.
//!
//! A taskfile is a YAML document mapping task names to task definitions.
//! Decoding is deliberately tolerant about the polymorphic list entries the
//! format allows: a dependency is either a bare name or a `{task: name}`
//! mapping, and a command is either a bare shell string, a `{cmd: ...}`
//! mapping, or a `{task: name}` call into another task.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

/// File names probed, in order, when the input path is a directory.
const ENTRYPOINTS: &[&str] = &[
    "Taskfile.yml",
    "Taskfile.yaml",
    "taskfile.yml",
    "taskfile.yaml",
];

/// A decoded taskfile.
///
/// Task iteration order is the YAML declaration order; every downstream
/// consumer that iterates `tasks` inherits that order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Taskfile {
    /// Schema version declared by the document, if any.
    #[serde(default)]
    pub version: Option<Version>,

    /// All tasks, keyed by name, in declaration order.
    #[serde(default)]
    pub tasks: IndexMap<String, Task>,
}

/// Taskfile schema version.
///
/// Accepts both the quoted form (`version: '3'`) and the bare scalar some
/// documents use (`version: 3`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Version {
    /// Quoted string version.
    Text(String),
    /// Bare numeric version.
    Number(u64),
}

/// A single task definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Task {
    /// Human-readable description.
    #[serde(default)]
    pub desc: Option<String>,

    /// Tasks that must run before this one.
    #[serde(default)]
    pub deps: Vec<Dep>,

    /// Ordered command list.
    #[serde(default)]
    pub cmds: Vec<Cmd>,
}

/// A dependency reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Dep {
    /// Bare task name: `- lint`
    Name(String),
    /// Mapping form: `- task: lint`
    Detailed {
        /// The referenced task name.
        task: String,
    },
}

impl Dep {
    /// The name of the task this dependency refers to.
    #[must_use]
    pub fn task(&self) -> &str {
        match self {
            Self::Name(name) | Self::Detailed { task: name } => name,
        }
    }
}

/// A command entry in a task's `cmds` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Cmd {
    /// Bare shell command: `- echo hi`
    Shell(String),
    /// Call into another task: `- task: lint`
    Call {
        /// The invoked task name.
        task: String,
    },
    /// Mapping form of a shell command: `- cmd: echo hi`
    Command {
        /// The shell command text.
        cmd: String,
    },
}

impl Cmd {
    /// The referenced task name, if this entry is a call rather than a
    /// shell command.
    #[must_use]
    pub fn task_ref(&self) -> Option<&str> {
        match self {
            Self::Call { task } => Some(task),
            Self::Shell(_) | Self::Command { .. } => None,
        }
    }
}

impl Taskfile {
    /// Load a taskfile from `path`.
    ///
    /// `path` may name the taskfile itself or a directory containing one;
    /// directories are probed for the standard entrypoint names in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be read, no entrypoint exists in
    /// a given directory, or the document fails to decode.
    pub fn load(path: &Path) -> Result<Self> {
        let file = resolve_entrypoint(path)?;
        debug!("loading taskfile from '{}'", file.display());

        let text = fs::read_to_string(&file).map_err(|source| Error::Io {
            path: file.clone(),
            source,
        })?;

        serde_yaml::from_str(&text).map_err(|source| Error::Parse { path: file, source })
    }
}

/// Resolve the actual file to load from a file-or-directory path.
fn resolve_entrypoint(path: &Path) -> Result<PathBuf> {
    let metadata = fs::metadata(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Ok(path.to_path_buf());
    }

    for name in ENTRYPOINTS {
        let candidate = path.join(name);
        if candidate.is_file() {
            debug!("resolved taskfile entrypoint '{}'", candidate.display());
            return Ok(candidate);
        }
    }

    Err(Error::NoTaskfile {
        dir: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Taskfile {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_parse_minimal_taskfile() {
        let taskfile = parse(
            r#"
version: '3'

tasks:
  build:
    deps: [lint]
    cmds:
      - echo hi
  lint: {}
"#,
        );

        assert_eq!(taskfile.version, Some(Version::Text("3".to_string())));
        assert_eq!(taskfile.tasks.len(), 2);

        let build = &taskfile.tasks["build"];
        assert_eq!(build.deps.len(), 1);
        assert_eq!(build.deps[0].task(), "lint");
        assert_eq!(build.cmds.len(), 1);
        assert_eq!(build.cmds[0].task_ref(), None);
    }

    #[test]
    fn test_parse_numeric_version() {
        let taskfile = parse("version: 3\ntasks: {}\n");
        assert_eq!(taskfile.version, Some(Version::Number(3)));
    }

    #[test]
    fn test_task_declaration_order_preserved() {
        let taskfile = parse(
            r#"
tasks:
  zeta: {}
  alpha: {}
  mid: {}
"#,
        );

        let names: Vec<&str> = taskfile.tasks.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_dep_forms() {
        let taskfile = parse(
            r#"
tasks:
  all:
    deps:
      - lint
      - task: test
"#,
        );

        let deps = &taskfile.tasks["all"].deps;
        assert_eq!(deps[0].task(), "lint");
        assert_eq!(deps[1].task(), "test");
    }

    #[test]
    fn test_cmd_call_classification() {
        let taskfile = parse(
            r#"
tasks:
  release:
    cmds:
      - cargo build --release
      - task: changelog
      - cmd: git push
"#,
        );

        let cmds = &taskfile.tasks["release"].cmds;
        assert_eq!(cmds[0].task_ref(), None);
        assert_eq!(cmds[1].task_ref(), Some("changelog"));
        assert_eq!(cmds[2].task_ref(), None);
    }

    #[test]
    fn test_load_from_directory_probes_entrypoints() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Taskfile.yml"),
            "version: '3'\ntasks:\n  build: {}\n",
        )
        .unwrap();

        let taskfile = Taskfile::load(dir.path()).unwrap();
        assert!(taskfile.tasks.contains_key("build"));
    }

    #[test]
    fn test_load_from_directory_without_taskfile() {
        let dir = tempfile::tempdir().unwrap();
        let err = Taskfile::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NoTaskfile { .. }));
    }

    #[test]
    fn test_load_missing_path() {
        let err = Taskfile::load(Path::new("/nonexistent/Taskfile.yml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_invalid_yaml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Taskfile.yml");
        fs::write(&file, "tasks: [not, a, mapping]\n").unwrap();

        let err = Taskfile::load(&file).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}

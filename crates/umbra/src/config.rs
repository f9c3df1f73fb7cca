//! Layered configuration.
//!
//! Built-in defaults, then `umbra.toml` (in the source root unless another
//! file is given), then `UMBRA_*` environment variables. Command-line flags
//! are applied on top by the binary.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use umbra_fs::LineEnding;
use umbra_mirror::TraversalPolicy;
use umbra_package::Layout;
use umbra_platform::{PlatformTag, RuntimeVersion};
use umbra_resolve::{Zones, normalize};

use crate::{Error, Result};

pub const CONFIG_FILE: &str = "umbra.toml";
pub const DEFAULT_SHADOW_DIR: &str = ".umbra";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub source_root:         PathBuf,
    /// Defaults to `<source_root>/.umbra`; relative paths are taken from the
    /// source root.
    pub shadow_root:         Option<PathBuf>,
    pub verbose:             bool,
    /// Explicit `major.minor` runtime ABI version. Takes precedence over the probe.
    pub runtime_version:     Option<String>,
    /// Program and arguments whose output contains the runtime ABI version.
    pub runtime_probe:       Vec<String>,
    /// Directory-name patterns the mirror never walks into.
    pub exclude:             Vec<String>,
    pub private_depth:       usize,
    pub min_depth:           usize,
    pub portable_extensions: Option<Vec<String>>,
    pub binary_extensions:   Option<Vec<String>>,
    pub line_endings:        LineEnding,
    pub layout:              Layout,
}

impl Default for Options {
    fn default() -> Self { Self::new(".") }
}

impl Options {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root:         source_root.into(),
            shadow_root:         None,
            verbose:             false,
            runtime_version:     None,
            runtime_probe:       ["node", "-p", "process.versions.v8"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude:             Vec::new(),
            private_depth:       2,
            min_depth:           1,
            portable_extensions: None,
            binary_extensions:   None,
            line_endings:        LineEnding::Native,
            layout:              Layout::default(),
        }
    }

    /// Load options for `source_root`, reading `config` or `<source_root>/umbra.toml`.
    ///
    /// A missing file is not an error.
    pub fn load(source_root: impl Into<PathBuf>, config: Option<&Path>) -> Result<Self> {
        let defaults = Self::new(source_root);
        let file = match config {
            Some(path) => path.to_path_buf(),
            None => expand(&defaults.source_root).join(CONFIG_FILE),
        };

        Figment::from(Serialized::defaults(defaults))
            .merge(Toml::file(file))
            .merge(Env::prefixed("UMBRA_").ignore(&["config"]))
            .extract()
            .map_err(|e| Error::Config(Box::new(e)))
    }

    pub fn shadow_root(mut self, shadow: impl Into<PathBuf>) -> Self {
        self.shadow_root = Some(shadow.into());
        self
    }

    pub fn runtime_version(mut self, version: impl Into<String>) -> Self {
        self.runtime_version = Some(version.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Absolute, normalized source root.
    pub fn source(&self) -> Result<PathBuf> { absolute(&expand(&self.source_root)) }

    /// Absolute, normalized shadow root.
    pub fn shadow(&self) -> Result<PathBuf> {
        let source = self.source()?;
        let shadow = match &self.shadow_root {
            Some(path) => source.join(expand(path)),
            None => source.join(DEFAULT_SHADOW_DIR),
        };
        Ok(normalize(&shadow))
    }

    pub fn runtime(&self) -> Result<RuntimeVersion> {
        if let Some(version) = &self.runtime_version {
            return Ok(RuntimeVersion::parse(version)?);
        }
        let (program, args) = self.runtime_probe.split_first().ok_or(Error::NoRuntime)?;
        Ok(RuntimeVersion::probe(program, args)?)
    }

    pub fn tag(&self) -> Result<PlatformTag> { Ok(PlatformTag::detect(self.runtime()?)) }

    pub fn policy(&self) -> Result<TraversalPolicy> {
        let mut policy = TraversalPolicy::new()
            .layout(self.layout.clone())
            .exclude(&self.exclude)?
            .private_depth(self.private_depth)
            .min_depth(self.min_depth)
            .line_ending(self.line_endings);
        if let Some(extensions) = &self.portable_extensions {
            policy = policy.portable_extensions(extensions);
        }
        if let Some(extensions) = &self.binary_extensions {
            policy = policy.binary_extensions(extensions);
        }
        Ok(policy)
    }

    pub fn zones(&self) -> Result<Zones> {
        Ok(Zones::new(self.source()?, self.shadow()?, self.tag()?, self.layout.clone()))
    }
}

/// Expand a leading `~` to the home directory.
fn expand(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match home::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .map(|p| normalize(&p))
        .map_err(|e| Error::Path {
            path:   path.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_shadow_root() {
        let options = Options::new("/work/app");
        assert_eq!(options.shadow().unwrap(), PathBuf::from("/work/app/.umbra"));
    }

    #[test]
    fn test_relative_shadow_root() {
        let options = Options::new("/work/app").shadow_root("../cache");
        assert_eq!(options.shadow().unwrap(), PathBuf::from("/work/cache"));

        let options = Options::new("/work/app").shadow_root("/var/cache/umbra");
        assert_eq!(options.shadow().unwrap(), PathBuf::from("/var/cache/umbra"));
    }

    #[test]
    fn test_tilde_expansion() {
        if let Some(home) = home::home_dir() {
            assert_eq!(expand(Path::new("~/cache")), home.join("cache"));
        }
        assert_eq!(expand(Path::new("cache/~")), PathBuf::from("cache/~"));
    }

    #[test]
    fn test_explicit_runtime_wins() {
        let options = Options::new("/work/app").runtime_version("9.4.146");
        assert_eq!(options.runtime().unwrap(), RuntimeVersion::new(9, 4));
    }

    #[test]
    fn test_empty_probe() {
        let mut options = Options::new("/work/app");
        options.runtime_probe.clear();
        assert!(matches!(options.runtime(), Err(Error::NoRuntime)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
shadow_root = "../cache"
runtime_version = "8.1"
private_depth = 3
exclude = ["^build$"]
line_endings = "lf"

[layout]
boundary = "deps"
"#,
        )
        .unwrap();

        let options = Options::load(dir.path(), None).unwrap();
        assert_eq!(options.source_root, dir.path());
        assert_eq!(options.shadow_root, Some(PathBuf::from("../cache")));
        assert_eq!(options.private_depth, 3);
        assert_eq!(options.min_depth, 1);
        assert_eq!(options.exclude, vec!["^build$".to_string()]);
        assert_eq!(options.line_endings, LineEnding::Lf);
        assert_eq!(options.layout.boundary, "deps");
        assert_eq!(options.layout.descriptor, "package.json");
        assert!(options.policy().is_ok());
    }

    #[test]
    fn test_load_without_file() {
        let dir = tempdir().unwrap();
        let options = Options::load(dir.path(), None).unwrap();
        assert_eq!(options, Options::new(dir.path()));
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        let mut options = Options::new("/work/app");
        options.exclude.push("(".into());
        assert!(matches!(options.policy(), Err(Error::Mirror(_))));
    }
}

//! The engine's own configuration surface: [`Config`], built through [`ConfigBuilder`]
//! and validated once, up front, before any side effect runs.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::migrate::MigrationTool;

/// Maximum length of [`Config::db_prefix`], chosen so the minted name
/// (prefix + `_` + 19-digit timestamp + `_` + 8 hex chars) never exceeds
/// Postgres's 63-byte identifier limit.
pub const MAX_PREFIX_LEN: usize = 34;

/// Resolved, validated configuration for a single [`crate::engine::Engine::new`] call.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub(crate) admin_dsn_override: Option<String>,
    pub(crate) migration_dir: Option<PathBuf>,
    pub(crate) migration_tool: Option<MigrationTool>,
    pub(crate) migration_tool_path: Option<PathBuf>,
    pub(crate) db_prefix: String,
    pub(crate) verbose: bool,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn admin_dsn_override(&self) -> Option<&str> {
        self.admin_dsn_override.as_deref()
    }

    pub fn migration_dir(&self) -> Option<&std::path::Path> {
        self.migration_dir.as_deref()
    }

    pub fn migration_tool(&self) -> Option<MigrationTool> {
        self.migration_tool
    }

    pub fn migration_tool_path(&self) -> Option<&std::path::Path> {
        self.migration_tool_path.as_deref()
    }

    pub fn db_prefix(&self) -> &str {
        &self.db_prefix
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Validate the exclusive-or of `migration_dir`/`migration_tool` and the
    /// prefix length bound. Called once by the engine before any side effect.
    pub(crate) fn validate(&self) -> Result<()> {
        match (&self.migration_dir, &self.migration_tool) {
            (Some(_), None) => return Err(Error::MigrationDirWithoutTool),
            (None, Some(_)) => return Err(Error::MigrationToolWithoutDir),
            _ => {}
        }

        if self.db_prefix.len() > MAX_PREFIX_LEN {
            return Err(Error::PrefixTooLong {
                len: self.db_prefix.len(),
            });
        }

        Ok(())
    }
}

/// Builder for [`Config`]. `db_prefix` defaults to `"test"`.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    admin_dsn_override: Option<String>,
    migration_dir: Option<PathBuf>,
    migration_tool: Option<MigrationTool>,
    migration_tool_path: Option<PathBuf>,
    db_prefix: String,
    verbose: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            admin_dsn_override: None,
            migration_dir: None,
            migration_tool: None,
            migration_tool_path: None,
            db_prefix: "test".to_string(),
            verbose: false,
        }
    }
}

impl ConfigBuilder {
    pub fn admin_dsn_override(mut self, dsn: impl Into<String>) -> Self {
        self.admin_dsn_override = Some(dsn.into());
        self
    }

    pub fn migration_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.migration_dir = Some(dir.into());
        self
    }

    pub fn migration_tool(mut self, tool: MigrationTool) -> Self {
        self.migration_tool = Some(tool);
        self
    }

    pub fn migration_tool_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.migration_tool_path = Some(path.into());
        self
    }

    pub fn db_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.db_prefix = prefix.into();
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Build and validate the [`Config`].
    pub fn build(self) -> Result<Config> {
        let config = Config {
            admin_dsn_override: self.admin_dsn_override,
            migration_dir: self.migration_dir,
            migration_tool: self.migration_tool,
            migration_tool_path: self.migration_tool_path,
            db_prefix: self.db_prefix,
            verbose: self.verbose,
        };
        config.validate()?;
        Ok(config)
    }
}

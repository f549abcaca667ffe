//! The migration runner: dispatches to one of three external CLI tools.
//! The runner never parses migration files itself — success is "the tool exited 0".

mod goose;
mod migrate_tool;
mod tern;

use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::provider::Provider;

/// Which external migration CLI to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationTool {
    Tern,
    Goose,
    Migrate,
}

impl std::fmt::Display for MigrationTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MigrationTool::Tern => "tern",
            MigrationTool::Goose => "goose",
            MigrationTool::Migrate => "migrate",
        };
        f.write_str(name)
    }
}

/// Run `config.migration_tool` against `per_db_dsn`, if one is configured.
/// No-op (`Ok(())`) if `config.migration_tool` is unset.
pub(crate) async fn run(config: &Config, provider: &dyn Provider, per_db_dsn: &str) -> Result<()> {
    let Some(tool) = config.migration_tool() else {
        return Ok(());
    };
    // `Config::validate` already enforced dir-iff-tool, so this is always `Some`.
    let dir = config.migration_dir().expect("migration_dir set alongside migration_tool");
    let tool_path = config.migration_tool_path();

    match tool {
        MigrationTool::Tern => tern::run(provider, tool_path, dir, per_db_dsn).await,
        MigrationTool::Goose => goose::run(tool_path, dir, per_db_dsn).await,
        MigrationTool::Migrate => migrate_tool::run(tool_path, dir, per_db_dsn).await,
    }
}

/// Resolve which binary to exec: the configured path, or the bare tool name
/// (letting the OS's process launcher search `PATH`).
fn binary(tool: MigrationTool, configured_path: Option<&Path>) -> std::ffi::OsString {
    match configured_path {
        Some(path) => path.as_os_str().to_owned(),
        None => tool.to_string().into(),
    }
}

/// Run `cmd`, capturing combined stdout+stderr, and turn a non-zero exit into
/// [`Error::MigrationFailed`]. Failing to launch the process at all is
/// [`Error::MigrationToolLaunchFailed`].
pub(crate) async fn exec(tool: MigrationTool, mut cmd: tokio::process::Command) -> Result<()> {
    let program = cmd.as_std().get_program().to_string_lossy().into_owned();

    let output = cmd
        .output()
        .await
        .map_err(|source| Error::MigrationToolLaunchFailed {
            tool,
            path: program,
            source,
        })?;

    if output.status.success() {
        return Ok(());
    }

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    Err(Error::MigrationFailed {
        tool,
        status: output.status.code().unwrap_or(-1),
        output: combined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_defaults_to_bare_tool_name() {
        assert_eq!(binary(MigrationTool::Goose, None), "goose");
    }

    #[test]
    fn binary_prefers_configured_path() {
        let path = Path::new("/opt/bin/goose");
        assert_eq!(binary(MigrationTool::Goose, Some(path)), "/opt/bin/goose");
    }

    #[test]
    fn display_matches_cli_names() {
        assert_eq!(MigrationTool::Tern.to_string(), "tern");
        assert_eq!(MigrationTool::Goose.to_string(), "goose");
        assert_eq!(MigrationTool::Migrate.to_string(), "migrate");
    }
}

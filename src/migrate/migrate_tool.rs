//! `golang-migrate`'s CLI wants a `file://`-prefixed absolute path for its
//! source, and the DSN as-is for its database:
//! `migrate -source file://<abs-dir> -database <dsn> up`.

use std::path::Path;

use super::MigrationTool;
use crate::error::{Error, Result};

pub(super) async fn run(tool_path: Option<&Path>, dir: &Path, per_db_dsn: &str) -> Result<()> {
    let abs_dir = std::path::absolute(dir).map_err(Error::PathResolutionFailed)?;
    let source = format!("file://{}", abs_dir.display());

    let mut cmd = tokio::process::Command::new(super::binary(MigrationTool::Migrate, tool_path));
    cmd.arg("-source")
        .arg(source)
        .arg("-database")
        .arg(per_db_dsn)
        .arg("up");

    super::exec(MigrationTool::Migrate, cmd).await
}

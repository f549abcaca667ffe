//! Goose takes a driver tag and a DSN directly on the command line:
//! `goose -dir <dir> <driver> <dsn> up`.

use std::path::Path;

use super::MigrationTool;
use crate::error::{Error, Result};

pub(super) async fn run(tool_path: Option<&Path>, dir: &Path, per_db_dsn: &str) -> Result<()> {
    let driver = driver_for(per_db_dsn)?;

    let mut cmd = tokio::process::Command::new(super::binary(MigrationTool::Goose, tool_path));
    cmd.arg("-dir").arg(dir).arg(driver).arg(per_db_dsn).arg("up");

    super::exec(MigrationTool::Goose, cmd).await
}

fn driver_for(dsn: &str) -> Result<&'static str> {
    let url = url::Url::parse(dsn).map_err(Error::BadAdminDsn)?;
    match url.scheme() {
        "postgres" | "postgresql" => Ok("postgres"),
        "mysql" => Ok("mysql"),
        "sqlite" | "sqlite3" => Ok("sqlite3"),
        other => Err(Error::UnknownDriver(other.to_string())),
    }
}

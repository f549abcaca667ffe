//! Tern needs a local config file rather than a DSN on the command line:
//! `tern migrate -c <conf> -m <dir>`.

use std::path::Path;

use tempfile::NamedTempFile;

use super::MigrationTool;
use crate::error::{Error, Result};
use crate::provider::{parse_for_migrations, Provider};

pub(super) async fn run(
    provider: &dyn Provider,
    tool_path: Option<&Path>,
    dir: &Path,
    per_db_dsn: &str,
) -> Result<()> {
    let admin_dsn = provider
        .resolved_admin_dsn()
        .ok_or(Error::IncompleteAdminDsn("provider has no resolved admin DSN"))?;
    let admin_fields = parse_for_migrations(&admin_dsn)?;
    let database = database_name_from_dsn(per_db_dsn)?;

    if admin_fields.host.is_empty() || admin_fields.user.is_empty() {
        return Err(Error::IncompleteAdminDsn(
            "admin DSN is missing host or user, required to write a Tern config",
        ));
    }

    let conf_contents = format!(
        "[database]\nhost = {}\nport = {}\ndatabase = {}\nuser = {}\npassword = {}\n",
        admin_fields.host, admin_fields.port, database, admin_fields.user, admin_fields.password,
    );

    // Named so Tern's `-c` flag sees a predictable filename, but still a
    // `tempfile::NamedTempFile` so it is removed on every exit path, including panics.
    let conf_path = std::env::temp_dir().join(format!("tern_{database}.conf"));
    let mut conf_file = NamedTempFile::new_in(std::env::temp_dir()).map_err(Error::TempFileFailed)?;
    std::io::Write::write_all(&mut conf_file, conf_contents.as_bytes()).map_err(Error::TempFileFailed)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = conf_file.as_file().metadata().map_err(Error::TempFileFailed)?.permissions();
        perms.set_mode(0o600);
        conf_file.as_file().set_permissions(perms).map_err(Error::TempFileFailed)?;
    }

    // Persist under the predictable `tern_<dbname>.conf` name so the spawned
    // `tern` CLI can be pointed at it; `_guard` still removes it on drop.
    let _persisted_file = conf_file
        .persist(&conf_path)
        .map_err(|e| Error::TempFileFailed(e.error))?;
    let cleanup = TempFileGuard(conf_path.clone());

    let mut cmd = tokio::process::Command::new(super::binary(MigrationTool::Tern, tool_path));
    cmd.arg("migrate")
        .arg("-c")
        .arg(&conf_path)
        .arg("-m")
        .arg(dir);

    let result = super::exec(MigrationTool::Tern, cmd).await;
    drop(cleanup);
    result
}

/// Deletes the Tern config file on drop, including on panic unwind.
struct TempFileGuard(std::path::PathBuf);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn database_name_from_dsn(dsn: &str) -> Result<String> {
    let url = url::Url::parse(dsn).map_err(Error::BadAdminDsn)?;
    Ok(url.path().trim_start_matches('/').to_string())
}

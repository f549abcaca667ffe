//! Admin DSN resolution: override → `TEST_DATABASE_URL` → `DATABASE_URL` → default.

/// The DSN used when no override, `TEST_DATABASE_URL`, or `DATABASE_URL` is set.
pub const DEFAULT_ADMIN_DSN: &str = "postgres://postgres@localhost:5432/postgres";

/// Pick the admin DSN. Pure and infallible: the caller's override wins, then the
/// two environment variables in priority order, then [`DEFAULT_ADMIN_DSN`].
pub fn resolve(admin_dsn_override: Option<&str>) -> String {
    if let Some(dsn) = admin_dsn_override
        && !dsn.is_empty()
    {
        return dsn.to_string();
    }

    for var in ["TEST_DATABASE_URL", "DATABASE_URL"] {
        if let Ok(dsn) = std::env::var(var)
            && !dsn.is_empty()
        {
            return dsn;
        }
    }

    DEFAULT_ADMIN_DSN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // std::env mutation races across tests in the same process; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        unsafe {
            std::env::remove_var("TEST_DATABASE_URL");
            std::env::remove_var("DATABASE_URL");
        }
    }

    #[test]
    fn override_wins_over_everything() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("TEST_DATABASE_URL", "postgres://a/db");
            std::env::set_var("DATABASE_URL", "postgres://b/db");
        }
        assert_eq!(resolve(Some("postgres://override/db")), "postgres://override/db");
        clear_env();
    }

    #[test]
    fn test_database_url_beats_database_url() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("TEST_DATABASE_URL", "postgres://a/db");
            std::env::set_var("DATABASE_URL", "postgres://b/db");
        }
        assert_eq!(resolve(None), "postgres://a/db");
        clear_env();
    }

    #[test]
    fn database_url_used_when_no_override_or_test_url() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("DATABASE_URL", "postgres://b/db");
        }
        assert_eq!(resolve(None), "postgres://b/db");
        clear_env();
    }

    #[test]
    fn falls_back_to_default() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        assert_eq!(resolve(None), DEFAULT_ADMIN_DSN);
    }
}

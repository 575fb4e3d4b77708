use std::net::SocketAddr;

/// Runtime settings read from the environment. CLI flags override individual
/// fields after loading.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file (`KB_DB`).
    pub db_path: String,
    /// Listen address (`KB_BIND`, or `0.0.0.0:$PORT`).
    pub bind: SocketAddr,
    /// Header carrying the proxy-authenticated user (`KB_IDENTITY_HEADER`).
    pub identity_header: String,
    /// Bare usernames allowed on `/api/admin/*` (`KB_ADMIN_USERS`).
    pub admin_users: Vec<String>,
    /// Allowlist entries inserted at start if missing (`KB_SEED_USERS`).
    pub seed_users: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "./knowledge.db".into(),
            bind: SocketAddr::from(([0, 0, 0, 0], 3001)),
            identity_header: "x-auth-user".into(),
            admin_users: Vec::new(),
            seed_users: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup("KB_DB") {
            config.db_path = path;
        }
        if let Some(bind) = lookup("KB_BIND") {
            config.bind = bind
                .parse()
                .map_err(|e| format!("Invalid KB_BIND '{bind}': {e}"))?;
        } else if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|e| format!("Invalid PORT '{port}': {e}"))?;
            config.bind.set_port(port);
        }
        if let Some(header) = lookup("KB_IDENTITY_HEADER") {
            config.identity_header = header.trim().to_lowercase();
        }
        if let Some(admins) = lookup("KB_ADMIN_USERS") {
            config.admin_users = split_list(&admins);
        }
        if let Some(seed) = lookup("KB_SEED_USERS") {
            config.seed_users = split_list(&seed);
        }
        Ok(config)
    }

    pub fn is_admin(&self, display_name: &str) -> bool {
        !display_name.is_empty() && self.admin_users.iter().any(|a| a == display_name)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

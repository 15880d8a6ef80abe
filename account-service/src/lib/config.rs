use std::env;
use std::fmt;
use std::time::Duration;

use auth::HashCost;
use auth::TokenSecret;
use config::builder::ConfigBuilder as ConfigBuilderOf;
use config::builder::DefaultState;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub hashing: HashingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime such as `24h`, `15m`, `30s`, `7d` or bare seconds
    #[serde(default = "default_expires_in")]
    pub expires_in: String,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Argon2id work factor. `cost` is the iteration count.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HashingConfig {
    #[serde(default = "default_hash_cost")]
    pub cost: u32,
    #[serde(default = "default_hash_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_hash_parallelism")]
    pub parallelism: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            cost: default_hash_cost(),
            memory_kib: default_hash_memory_kib(),
            parallelism: default_hash_parallelism(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_http_port() -> u16 {
    5000
}

fn default_cors_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_expires_in() -> String {
    "24h".to_string()
}

fn default_hash_cost() -> u32 {
    2
}

fn default_hash_memory_kib() -> u32 {
    19 * 1024
}

fn default_hash_parallelism() -> u32 {
    1
}

/// Validated authentication settings, built once before serving.
#[derive(Debug)]
pub struct AuthSettings {
    pub secret: TokenSecret,
    pub token_ttl: Duration,
    pub hash_cost: HashCost,
}

/// Flat environment variable names accepted next to the nested `__` form.
const ENV_ALIASES: [(&str, &str); 8] = [
    ("PORT", "server.http_port"),
    ("CORS_ORIGIN", "server.cors_origin"),
    ("DATABASE_URL", "database.url"),
    ("JWT_SECRET", "jwt.secret"),
    ("JWT_EXPIRES_IN", "jwt.expires_in"),
    ("HASH_COST", "hashing.cost"),
    ("HASH_MEMORY_KIB", "hashing.memory_kib"),
    ("HASH_PARALLELISM", "hashing.parallelism"),
];

/// Apply the flat aliases found by `lookup` as overrides.
fn apply_env_aliases(
    mut builder: ConfigBuilderOf<DefaultState>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConfigBuilderOf<DefaultState>, ConfigError> {
    for (variable, key) in ENV_ALIASES {
        builder = builder.set_override_option(key, lookup(variable))?;
    }
    Ok(builder)
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Flat environment variables (DATABASE_URL, JWT_SECRET, PORT, ...)
    /// 2. Nested environment variables (DATABASE__URL, JWT__SECRET, SERVER__HTTP_PORT, ...)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"));

        let builder = apply_env_aliases(builder, |variable| env::var(variable).ok())?;

        let config: Config = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the authentication settings.
    ///
    /// Startup must abort on error: a short secret, unparsable or zero ttl, or
    /// an out-of-range hashing cost are never silently replaced by defaults.
    pub fn auth_settings(&self) -> Result<AuthSettings, ConfigError> {
        let secret = TokenSecret::new(self.jwt.secret.clone())
            .map_err(|e| ConfigError::Message(format!("jwt.secret: {}", e)))?;

        let token_ttl = parse_ttl(&self.jwt.expires_in)
            .map_err(|e| ConfigError::Message(format!("jwt.expires_in: {}", e)))?;

        let hash_cost = HashCost::new(
            self.hashing.cost,
            self.hashing.memory_kib,
            self.hashing.parallelism,
        )
        .map_err(|e| ConfigError::Message(format!("hashing: {}", e)))?;

        Ok(AuthSettings {
            secret,
            token_ttl,
            hash_cost,
        })
    }
}

/// Parse a token lifetime: `<n>s`, `<n>m`, `<n>h`, `<n>d`, or bare seconds.
pub fn parse_ttl(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (amount, unit) = value.split_at(split);

    let amount: u64 = amount
        .parse()
        .map_err(|_| format!("invalid duration '{}'", value))?;

    let multiplier = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        other => return Err(format!("unknown duration unit '{}'", other)),
    };

    match amount.checked_mul(multiplier) {
        Some(0) => Err("duration must be greater than zero".to_string()),
        Some(seconds) => Ok(Duration::from_secs(seconds)),
        None => Err(format!("duration '{}' is too large", value)),
    }
}

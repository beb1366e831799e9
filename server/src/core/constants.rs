// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "Barters";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".barters";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "barters.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "BARTERS_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "BARTERS_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "BARTERS_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "BARTERS_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// Authentication
// =============================================================================

/// Environment variable for the session signing secret
pub const ENV_SESSION_SECRET: &str = "BARTERS_SESSION_SECRET";

/// Environment variable selecting the account table (barter or dashboard)
pub const ENV_ACCOUNTS: &str = "BARTERS_ACCOUNTS";

/// Cookie name for session token
pub const SESSION_COOKIE_NAME: &str = "barters_session";

/// Default session TTL in days
pub const DEFAULT_SESSION_TTL_DAYS: u32 = 30;

/// Length of the generated signing key when none is configured
pub const GENERATED_SESSION_SECRET_LEN: usize = 32;

/// bcrypt work factor for stored passwords
pub const PASSWORD_HASH_COST: u32 = 10;

/// Column width of the email and username columns
pub const EMAIL_COLUMN_LEN: usize = 64;

// =============================================================================
// PostgreSQL Database
// =============================================================================

/// Environment variable for the PostgreSQL connection URL
pub const ENV_POSTGRES_URL: &str = "POSTGRES_URL";

/// SSL mode appended to the connection URL when it names none
pub const POSTGRES_DEFAULT_SSLMODE: &str = "disable";

/// Default max connections in pool
pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default min connections to keep warm
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Default connection acquire timeout in seconds
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Default idle connection timeout in seconds (10 minutes)
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default statement timeout in seconds
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 60;

/// Advisory lock key serializing schema provisioning across processes
pub const PROVISION_LOCK_KEY: i64 = 0x6261_7274_6572_73;

// =============================================================================
// Request Body Limits
// =============================================================================

/// Default body limit for requests (1 MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Body limit for form posts on auth pages (64 KB)
pub const AUTH_BODY_LIMIT: usize = 64 * 1024;

// =============================================================================
// Shutdown
// =============================================================================

/// Graceful shutdown timeout in seconds
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Sample Data
// =============================================================================

/// Subject recorded on seeded grades
pub const SEED_GRADE_SUBJECT: &str = "Mathematics";

/// Inclusive score range for seeded grades
pub const SEED_SCORE_MIN: i32 = 60;
pub const SEED_SCORE_MAX: i32 = 100;

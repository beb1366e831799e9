//! Session manager

use anyhow::Result;

use super::jwt::{JwtError, SessionClaims, create_session_token, validate_session_token};
use crate::core::config::AuthConfig;
use crate::core::constants::GENERATED_SESSION_SECRET_LEN;
use crate::data::types::AccountRow;
use crate::utils::crypto;

/// Issues and checks session tokens
#[derive(Debug)]
pub struct AuthManager {
    signing_key: Vec<u8>,
    session_ttl_days: u32,
}

impl AuthManager {
    /// Use the configured secret, or a random key that lives as long as the process
    pub fn new(config: &AuthConfig) -> Self {
        let signing_key = match config.session_secret.as_deref() {
            Some(secret) if !secret.is_empty() => secret.as_bytes().to_vec(),
            _ => {
                tracing::warn!("No session secret configured; generated a signing key, sessions end on restart");
                crypto::generate_key(GENERATED_SESSION_SECRET_LEN)
            }
        };

        Self {
            signing_key,
            session_ttl_days: config.session_ttl_days,
        }
    }

    pub fn session_ttl_days(&self) -> u32 {
        self.session_ttl_days
    }

    /// Sign a session token for a logged-in account
    pub fn create_session(&self, account: &AccountRow) -> Result<String> {
        let claims = SessionClaims::new(account.id, &account.email, self.session_ttl_days);
        create_session_token(&self.signing_key, &claims)
    }

    /// Validate a JWT session token
    pub fn validate_session(&self, jwt: &str) -> Result<SessionClaims, JwtError> {
        validate_session_token(jwt, &self.signing_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AccountTable;

    fn config(secret: Option<&str>) -> AuthConfig {
        AuthConfig {
            accounts: AccountTable::Barter,
            session_secret: secret.map(String::from),
            session_ttl_days: 7,
        }
    }

    fn account() -> AccountRow {
        AccountRow {
            id: 9,
            email: "a@b.com".to_string(),
            username: Some("a".to_string()),
            password_hash: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_round_trip_session() {
        let manager = AuthManager::new(&config(Some("secret")));
        let token = manager.create_session(&account()).unwrap();
        let claims = manager.validate_session(&token).unwrap();
        assert_eq!(claims.account_id(), Some(9));
        assert_eq!(claims.email, "a@b.com");
    }

    #[test]
    fn test_configured_secret_is_shared() {
        let a = AuthManager::new(&config(Some("secret")));
        let b = AuthManager::new(&config(Some("secret")));
        let token = a.create_session(&account()).unwrap();
        assert!(b.validate_session(&token).is_ok());
    }

    #[test]
    fn test_generated_keys_differ() {
        let a = AuthManager::new(&config(None));
        let b = AuthManager::new(&config(Some("")));
        let token = a.create_session(&account()).unwrap();
        assert!(b.validate_session(&token).is_err());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn logs_while(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_generated_key_warns() {
        let output = logs_while(|| {
            AuthManager::new(&config(None));
        });
        assert!(output.contains("WARN"));
        assert!(output.contains("No session secret configured"));

        let output = logs_while(|| {
            AuthManager::new(&config(Some("secret")));
        });
        assert!(output.is_empty());
    }
}

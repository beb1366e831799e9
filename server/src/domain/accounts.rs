//! Account registration and password checks
//!
//! Passwords are stored as bcrypt hashes (cost 10, random salt). Hashing runs
//! on the blocking pool so it never stalls the request executor.

use thiserror::Error;

use crate::core::config::AccountTable;
use crate::core::constants::{EMAIL_COLUMN_LEN, PASSWORD_HASH_COST};
use crate::data::PostgresError;
use crate::data::postgres::{PgPool, repositories};
use crate::data::types::AccountRow;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Storage(#[from] PostgresError),
}

impl AccountError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_conflict())
    }
}

/// Result of a registration attempt
#[derive(Debug)]
pub enum RegisterOutcome {
    Registered(AccountRow),
    AlreadyExists,
}

/// Account operations against the configured account table
#[derive(Debug, Clone)]
pub struct AccountService {
    pool: PgPool,
    table: AccountTable,
}

impl AccountService {
    pub fn new(pool: PgPool, table: AccountTable) -> Self {
        Self { pool, table }
    }

    pub fn table(&self) -> AccountTable {
        self.table
    }

    /// Hash the password and insert the account
    ///
    /// Fails with a conflict when the email is taken.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> Result<AccountRow, AccountError> {
        let password_hash = hash_password(password.to_string()).await?;
        let username = resolve_username(email, username);

        let account =
            repositories::insert_account(&self.pool, self.table, email, &password_hash, &username)
                .await?;

        tracing::debug!(account_id = account.id, table = %self.table, "Account created");
        Ok(account)
    }

    /// Accounts registered under `email`
    pub async fn get_user(&self, email: &str) -> Result<Vec<AccountRow>, AccountError> {
        Ok(repositories::find_accounts_by_email(&self.pool, self.table, email).await?)
    }

    /// Register unless the email is already in use
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> Result<RegisterOutcome, AccountError> {
        if !self.get_user(email).await?.is_empty() {
            return Ok(RegisterOutcome::AlreadyExists);
        }

        // A concurrent registration can pass the check above; the unique
        // constraint rejects the second insert.
        match self.create_user(email, password, username).await {
            Ok(account) => Ok(RegisterOutcome::Registered(account)),
            Err(e) if e.is_conflict() => Ok(RegisterOutcome::AlreadyExists),
            Err(e) => Err(e),
        }
    }

    /// Look up the account and check its password
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AccountRow>, AccountError> {
        let Some(account) = self.get_user(email).await?.into_iter().next() else {
            return Ok(None);
        };

        if verify_password(password.to_string(), account.password_hash.clone()).await? {
            Ok(Some(account))
        } else {
            Ok(None)
        }
    }
}

/// bcrypt-hash a password on the blocking pool
pub async fn hash_password(password: String) -> Result<String, AccountError> {
    let hash =
        tokio::task::spawn_blocking(move || bcrypt::hash(password, PASSWORD_HASH_COST)).await??;
    Ok(hash)
}

/// Check a password against a stored hash; a malformed hash never matches
pub async fn verify_password(password: String, hash: String) -> Result<bool, AccountError> {
    let result = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await?;
    match result {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is not valid bcrypt");
            Ok(false)
        }
    }
}

/// Username stored for barter accounts
///
/// Falls back to the local part of the email when none is given.
fn resolve_username(email: &str, username: Option<&str>) -> String {
    let chosen = username
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| match email.split_once('@') {
            Some((local, _)) if !local.is_empty() => local,
            _ => email,
        });

    chosen.chars().take(EMAIL_COLUMN_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_username_prefers_given() {
        assert_eq!(resolve_username("a@b.com", Some("trader")), "trader");
        assert_eq!(resolve_username("a@b.com", Some("  trader  ")), "trader");
    }

    #[test]
    fn test_resolve_username_defaults_to_local_part() {
        assert_eq!(resolve_username("noa.levi@school.org", None), "noa.levi");
        assert_eq!(resolve_username("noa.levi@school.org", Some("   ")), "noa.levi");
        assert_eq!(resolve_username("@school.org", None), "@school.org");
        assert_eq!(resolve_username("plain", None), "plain");
    }

    #[test]
    fn test_resolve_username_fits_column() {
        let long = "x".repeat(100);
        assert_eq!(resolve_username("a@b.com", Some(&long)).len(), EMAIL_COLUMN_LEN);
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("hunter22".to_string()).await.unwrap();
        assert!(hash.starts_with("$2"));
        assert!(hash.len() <= 64);
        assert!(verify_password("hunter22".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("hunter23".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("same".to_string()).await.unwrap();
        let b = hash_password("same".to_string()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_malformed_hash_does_not_match() {
        assert!(!verify_password("x".to_string(), "not-bcrypt".to_string()).await.unwrap());
    }

    #[test]
    fn test_conflict_detection() {
        let err = AccountError::Storage(PostgresError::Conflict("account already exists".into()));
        assert!(err.is_conflict());
        let err = AccountError::Storage(PostgresError::Config("x".into()));
        assert!(!err.is_conflict());
    }

    fn unique_email() -> String {
        format!("{}@example.test", uuid::Uuid::new_v4().simple())
    }

    #[tokio::test]
    #[ignore]
    async fn test_create_user_then_get_user_verifies() {
        let pool = crate::data::postgres::test_support::pool().await;
        let email = unique_email();

        for table in [AccountTable::Barter, AccountTable::Dashboard] {
            let service = AccountService::new(pool.clone(), table);
            service.create_user(&email, "s3cret", None).await.unwrap();

            let rows = service.get_user(&email).await.unwrap();
            assert_eq!(rows.len(), 1);
            assert!(bcrypt::verify("s3cret", &rows[0].password_hash).unwrap());
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_register_twice_leaves_one_row() {
        let pool = crate::data::postgres::test_support::pool().await;
        let service = AccountService::new(pool, AccountTable::Barter);
        let email = unique_email();

        let first = service.register(&email, "pw-one", Some("first")).await.unwrap();
        assert!(matches!(first, RegisterOutcome::Registered(_)));

        let second = service.register(&email, "pw-two", Some("second")).await.unwrap();
        assert!(matches!(second, RegisterOutcome::AlreadyExists));

        assert_eq!(service.get_user(&email).await.unwrap().len(), 1);
    }

    #[tokio::test]
    #[ignore]
    async fn test_concurrent_registration_leaves_one_row() {
        let pool = crate::data::postgres::test_support::pool().await;
        let service = AccountService::new(pool, AccountTable::Barter);
        let email = unique_email();

        let (a, b) = tokio::join!(
            service.register(&email, "pw", None),
            service.register(&email, "pw", None)
        );
        let registered = [a.unwrap(), b.unwrap()]
            .iter()
            .filter(|o| matches!(o, RegisterOutcome::Registered(_)))
            .count();

        assert_eq!(registered, 1);
        assert_eq!(service.get_user(&email).await.unwrap().len(), 1);
    }

    #[tokio::test]
    #[ignore]
    async fn test_authenticate() {
        let pool = crate::data::postgres::test_support::pool().await;
        let service = AccountService::new(pool, AccountTable::Barter);
        let email = unique_email();
        service.register(&email, "correct", None).await.unwrap();

        assert!(service.authenticate(&email, "correct").await.unwrap().is_some());
        assert!(service.authenticate(&email, "wrong").await.unwrap().is_none());
        assert!(service.authenticate(&unique_email(), "correct").await.unwrap().is_none());
    }
}

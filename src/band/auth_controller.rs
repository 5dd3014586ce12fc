use super::{
    BandError,
    band_repository::BandRepository,
    model::{DemoUser, StoredUser, new_id},
};
use crate::info;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Demo account handling and the signed-in user of this application instance.
pub struct AuthController {
    repo: Arc<dyn BandRepository>,
    /// The signed-in user, `None` after start-up and after logout.
    current: RwLock<Option<DemoUser>>,
    /// Serializes read-modify-write cycles on the repository, shared with the band controller.
    write_lock: Arc<Mutex<()>>,
}

impl AuthController {
    const MIN_PASSWORD_LEN: usize = 6;

    pub fn new(repo: Arc<dyn BandRepository>) -> Self {
        Self { repo, current: RwLock::new(None), write_lock: Arc::new(Mutex::new(())) }
    }

    /// Lock every writer of this controller's repository has to hold.
    pub(super) fn store_lock(&self) -> Arc<Mutex<()>> { Arc::clone(&self.write_lock) }

    fn hash_password(password: &str) -> Result<String, BandError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| BandError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify_password(password: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .is_ok_and(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    }

    /// Creates an account and signs it in.
    pub async fn signup(&self, email: &str, password: &str, nickname: &str) -> Result<DemoUser, BandError> {
        let email = email.trim();
        let nickname = nickname.trim();
        if email.is_empty() || nickname.is_empty() {
            return Err(BandError::MissingField);
        }
        if password.chars().count() < Self::MIN_PASSWORD_LEN {
            return Err(BandError::WeakPassword);
        }
        let _guard = self.write_lock.lock().await;
        let mut store = self.repo.load().await?;
        if store.users.iter().any(|u| u.user.email == email) {
            return Err(BandError::EmailTaken);
        }
        let user = DemoUser {
            id: new_id(),
            email: email.to_string(),
            nickname: nickname.to_string(),
            created_at: Utc::now(),
        };
        store.users.push(StoredUser { user: user.clone(), password_hash: Self::hash_password(password)? });
        self.repo.store(&store).await?;
        info!("Created account {}", user.email);
        *self.current.write().await = Some(user.clone());
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<DemoUser, BandError> {
        let store = self.repo.load().await?;
        let user = store
            .users
            .into_iter()
            .find(|u| u.user.email == email.trim() && Self::verify_password(password, &u.password_hash))
            .map(|u| u.user)
            .ok_or(BandError::InvalidCredentials)?;
        *self.current.write().await = Some(user.clone());
        Ok(user)
    }

    pub async fn logout(&self) { *self.current.write().await = None; }

    pub async fn current_user(&self) -> Option<DemoUser> { self.current.read().await.clone() }

    pub(super) async fn require_user(&self) -> Result<DemoUser, BandError> {
        self.current_user().await.ok_or(BandError::NotSignedIn)
    }
}

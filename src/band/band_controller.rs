use super::{
    BandError,
    auth_controller::AuthController,
    band_repository::{BandRepository, BandStore},
    model::{Band, BandMember, BandSchedule, MemberRole, ScheduleDraft, SchedulePatch, new_id},
};
use crate::info;
use chrono::{NaiveDate, Utc};
use itertools::Itertools;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Band membership and band calendar operations on behalf of the signed-in user.
pub struct BandController {
    repo: Arc<dyn BandRepository>,
    auth: Arc<AuthController>,
    /// Serializes read-modify-write cycles on the repository, taken from the auth controller.
    write_lock: Arc<Mutex<()>>,
}

impl BandController {
    const INVITE_CODE_LEN: usize = 6;
    const INVITE_ALPHABET: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    pub fn new(repo: Arc<dyn BandRepository>, auth: Arc<AuthController>) -> Self {
        let write_lock = auth.store_lock();
        Self { repo, auth, write_lock }
    }

    fn generate_invite_code(store: &BandStore) -> String {
        let mut rng = rand::rng();
        loop {
            let code: String = (0..Self::INVITE_CODE_LEN)
                .map(|_| char::from(Self::INVITE_ALPHABET[rng.random_range(0..Self::INVITE_ALPHABET.len())]))
                .collect();
            if store.bands.iter().all(|b| b.invite_code != code) {
                return code;
            }
        }
    }

    fn band_mut<'a>(store: &'a mut BandStore, band_id: &str) -> Result<&'a mut Band, BandError> {
        store.bands.iter_mut().find(|b| b.id == band_id).ok_or(BandError::NotFound)
    }

    /// Creates a band owned by the signed-in user.
    pub async fn create_band(&self, name: &str, description: &str) -> Result<Band, BandError> {
        let user = self.auth.require_user().await?;
        let name = name.trim();
        if name.is_empty() {
            return Err(BandError::MissingField);
        }
        let _guard = self.write_lock.lock().await;
        let mut store = self.repo.load().await?;
        let band = Band {
            id: new_id(),
            name: name.to_string(),
            description: description.trim().to_string(),
            owner_id: user.id,
            member_ids: Vec::new(),
            invite_code: Self::generate_invite_code(&store),
            created_at: Utc::now(),
        };
        store.bands.push(band.clone());
        self.repo.store(&store).await?;
        info!("Created band {} with invite code {}", band.name, band.invite_code);
        Ok(band)
    }

    /// Joins the band with the given invite code (case-insensitive).
    pub async fn join_band(&self, invite_code: &str) -> Result<Band, BandError> {
        let user = self.auth.require_user().await?;
        let code = invite_code.trim().to_uppercase();
        let _guard = self.write_lock.lock().await;
        let mut store = self.repo.load().await?;
        let band = store.bands.iter_mut().find(|b| b.invite_code == code).ok_or(BandError::InvalidInviteCode)?;
        if band.includes(&user.id) {
            return Err(BandError::AlreadyMember);
        }
        band.member_ids.push(user.id);
        let joined = band.clone();
        self.repo.store(&store).await?;
        Ok(joined)
    }

    /// Bands the signed-in user owns or belongs to; empty when signed out.
    pub async fn bands(&self) -> Result<Vec<Band>, BandError> {
        let Some(user) = self.auth.current_user().await else {
            return Ok(Vec::new());
        };
        let store = self.repo.load().await?;
        Ok(store.bands.into_iter().filter(|b| b.includes(&user.id)).collect())
    }

    pub async fn leave_band(&self, band_id: &str) -> Result<(), BandError> {
        let user = self.auth.require_user().await?;
        let _guard = self.write_lock.lock().await;
        let mut store = self.repo.load().await?;
        let band = Self::band_mut(&mut store, band_id)?;
        if band.is_owner(&user.id) {
            return Err(BandError::OwnerCannotLeave);
        }
        if !band.includes(&user.id) {
            return Err(BandError::NotMember);
        }
        band.member_ids.retain(|m| *m != user.id);
        self.repo.store(&store).await?;
        Ok(())
    }

    /// Deletes a band together with all of its schedules. Owner only.
    pub async fn delete_band(&self, band_id: &str) -> Result<(), BandError> {
        let user = self.auth.require_user().await?;
        let _guard = self.write_lock.lock().await;
        let mut store = self.repo.load().await?;
        if !Self::band_mut(&mut store, band_id)?.is_owner(&user.id) {
            return Err(BandError::NotOwner);
        }
        store.bands.retain(|b| b.id != band_id);
        store.schedules.retain(|s| s.band_id != band_id);
        self.repo.store(&store).await?;
        Ok(())
    }

    /// Owner first, then members in joining order. Unknown accounts are skipped.
    pub async fn members(&self, band_id: &str) -> Result<Vec<BandMember>, BandError> {
        let store = self.repo.load().await?;
        let band = store.bands.iter().find(|b| b.id == band_id).ok_or(BandError::NotFound)?;
        let members = std::iter::once(&band.owner_id)
            .chain(band.member_ids.iter())
            .filter_map(|id| store.users.iter().find(|u| u.user.id == *id))
            .map(|u| BandMember {
                id: u.user.id.clone(),
                nickname: u.user.nickname.clone(),
                email: u.user.email.clone(),
                role: if band.is_owner(&u.user.id) { MemberRole::Owner } else { MemberRole::Member },
            })
            .collect();
        Ok(members)
    }

    pub async fn add_schedule(&self, draft: ScheduleDraft) -> Result<BandSchedule, BandError> {
        let user = self.auth.require_user().await?;
        if draft.title.trim().is_empty() {
            return Err(BandError::MissingField);
        }
        let _guard = self.write_lock.lock().await;
        let mut store = self.repo.load().await?;
        if !Self::band_mut(&mut store, &draft.band_id)?.includes(&user.id) {
            return Err(BandError::NotMember);
        }
        let schedule = BandSchedule {
            id: new_id(),
            band_id: draft.band_id,
            title: draft.title.trim().to_string(),
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            location: draft.location,
            memo: draft.memo,
            created_by: user.id,
            created_at: Utc::now(),
        };
        store.schedules.push(schedule.clone());
        self.repo.store(&store).await?;
        Ok(schedule)
    }

    pub async fn update_schedule(&self, schedule_id: &str, patch: SchedulePatch) -> Result<BandSchedule, BandError> {
        let user = self.auth.require_user().await?;
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(BandError::MissingField);
        }
        let _guard = self.write_lock.lock().await;
        let mut store = self.repo.load().await?;
        let band_id = store.schedules.iter().find(|s| s.id == schedule_id).ok_or(BandError::NotFound)?.band_id.clone();
        if !Self::band_mut(&mut store, &band_id)?.includes(&user.id) {
            return Err(BandError::NotMember);
        }
        let schedule = store.schedules.iter_mut().find(|s| s.id == schedule_id).ok_or(BandError::NotFound)?;
        patch.apply(schedule);
        let updated = schedule.clone();
        self.repo.store(&store).await?;
        Ok(updated)
    }

    pub async fn delete_schedule(&self, schedule_id: &str) -> Result<(), BandError> {
        let user = self.auth.require_user().await?;
        let _guard = self.write_lock.lock().await;
        let mut store = self.repo.load().await?;
        let band_id = store.schedules.iter().find(|s| s.id == schedule_id).ok_or(BandError::NotFound)?.band_id.clone();
        if !Self::band_mut(&mut store, &band_id)?.includes(&user.id) {
            return Err(BandError::NotMember);
        }
        store.schedules.retain(|s| s.id != schedule_id);
        self.repo.store(&store).await?;
        Ok(())
    }

    /// All schedules of a band ordered by date and start time.
    pub async fn schedules_for(&self, band_id: &str) -> Result<Vec<BandSchedule>, BandError> {
        let store = self.repo.load().await?;
        Ok(store
            .schedules
            .into_iter()
            .filter(|s| s.band_id == band_id)
            .sorted_by_key(|s| (s.date, s.start_time))
            .collect())
    }

    pub async fn schedules_on(&self, band_id: &str, date: NaiveDate) -> Result<Vec<BandSchedule>, BandError> {
        Ok(self.schedules_for(band_id).await?.into_iter().filter(|s| s.date == date).collect())
    }
}

use super::{
    AuthController, BandController, BandError, BandRepository, BandStore, InMemoryBandRepository,
    JsonFileBandRepository, MemberRole, RepositoryError, ScheduleDraft, SchedulePatch,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use rand::Rng;
use std::{sync::Arc, time::Duration};

/// Repository whose writes take a while, so overlapping read-modify-write cycles show up.
#[derive(Default)]
struct SlowRepository {
    inner: InMemoryBandRepository,
}

#[async_trait]
impl BandRepository for SlowRepository {
    async fn load(&self) -> Result<BandStore, RepositoryError> { self.inner.load().await }

    async fn store(&self, store: &BandStore) -> Result<(), RepositoryError> {
        let snapshot = store.clone();
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.inner.store(&snapshot).await
    }
}

fn controllers(repo: Arc<dyn BandRepository>) -> (Arc<AuthController>, BandController) {
    let auth = Arc::new(AuthController::new(Arc::clone(&repo)));
    let bands = BandController::new(repo, Arc::clone(&auth));
    (auth, bands)
}

fn draft(band_id: &str, title: &str, day: u32, hour: u32) -> ScheduleDraft {
    ScheduleDraft {
        band_id: band_id.to_string(),
        title: title.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
        start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(hour + 2, 0, 0).unwrap(),
        location: "Hongdae".to_string(),
        memo: String::new(),
    }
}

#[tokio::test]
async fn test_signup_login_logout() {
    let (auth, _) = controllers(Arc::new(InMemoryBandRepository::new()));
    assert!(matches!(auth.signup("a@b.c", "12345", "Mina").await, Err(BandError::WeakPassword)));
    assert!(matches!(auth.signup(" ", "123456", "Mina").await, Err(BandError::MissingField)));

    let user = auth.signup("mina@band.kr", "secret1", "Mina").await.unwrap();
    assert_eq!(auth.current_user().await, Some(user.clone()));
    assert!(matches!(auth.signup("mina@band.kr", "another", "Other").await, Err(BandError::EmailTaken)));

    auth.logout().await;
    assert_eq!(auth.current_user().await, None);
    assert!(matches!(auth.login("mina@band.kr", "wrong!!").await, Err(BandError::InvalidCredentials)));
    assert!(matches!(auth.login("nobody@band.kr", "secret1").await, Err(BandError::InvalidCredentials)));
    assert_eq!(auth.login("mina@band.kr", "secret1").await.unwrap(), user);
}

#[tokio::test]
async fn test_band_membership_lifecycle() {
    let (auth, bands) = controllers(Arc::new(InMemoryBandRepository::new()));
    assert!(matches!(bands.create_band("Nope", "").await, Err(BandError::NotSignedIn)));
    assert!(bands.bands().await.unwrap().is_empty());

    let owner = auth.signup("owner@band.kr", "secret1", "Owner").await.unwrap();
    assert!(matches!(bands.create_band("   ", "").await, Err(BandError::MissingField)));
    let band = bands.create_band(" Night Shift ", "indie rock").await.unwrap();
    assert_eq!(band.name, "Night Shift");
    assert_eq!(band.invite_code.len(), 6);
    assert!(band.invite_code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    assert!(matches!(bands.join_band(&band.invite_code).await, Err(BandError::AlreadyMember)));
    assert!(matches!(bands.leave_band(&band.id).await, Err(BandError::OwnerCannotLeave)));

    auth.logout().await;
    let guest = auth.signup("guest@band.kr", "secret2", "Guest").await.unwrap();
    assert!(bands.bands().await.unwrap().is_empty());
    assert!(matches!(bands.join_band("ZZZZZZ").await, Err(BandError::InvalidInviteCode)));
    let joined = bands.join_band(&band.invite_code.to_lowercase()).await.unwrap();
    assert_eq!(joined.member_ids, vec![guest.id.clone()]);
    assert_eq!(joined.size(), 2);
    assert_eq!(bands.bands().await.unwrap().len(), 1);

    let members = bands.members(&band.id).await.unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!((members[0].id.as_str(), members[0].role), (owner.id.as_str(), MemberRole::Owner));
    assert_eq!((members[1].nickname.as_str(), members[1].role), ("Guest", MemberRole::Member));
    assert_eq!(MemberRole::Owner.to_string(), "owner");

    assert!(matches!(bands.delete_band(&band.id).await, Err(BandError::NotOwner)));
    bands.leave_band(&band.id).await.unwrap();
    assert!(matches!(bands.leave_band(&band.id).await, Err(BandError::NotMember)));
    assert!(bands.bands().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_band_schedules() {
    let (auth, bands) = controllers(Arc::new(InMemoryBandRepository::new()));
    auth.signup("owner@band.kr", "secret1", "Owner").await.unwrap();
    let band = bands.create_band("Night Shift", "").await.unwrap();

    assert!(matches!(bands.add_schedule(draft(&band.id, "  ", 2, 19)).await, Err(BandError::MissingField)));
    assert!(matches!(bands.add_schedule(draft("missing", "Jam", 2, 19)).await, Err(BandError::NotFound)));
    let late = bands.add_schedule(draft(&band.id, "Late jam", 2, 21)).await.unwrap();
    let early = bands.add_schedule(draft(&band.id, "Early jam", 2, 15)).await.unwrap();
    let other_day = bands.add_schedule(draft(&band.id, "Gig", 5, 18)).await.unwrap();

    let all = bands.schedules_for(&band.id).await.unwrap();
    let ids: Vec<&str> = all.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![early.id.as_str(), late.id.as_str(), other_day.id.as_str()]);
    let day_two = bands.schedules_on(&band.id, NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()).await.unwrap();
    assert_eq!(day_two.len(), 2);

    let patch = SchedulePatch { title: Some("Soundcheck".to_string()), memo: Some("bring cables".to_string()), ..Default::default() };
    let updated = bands.update_schedule(&late.id, patch).await.unwrap();
    assert_eq!(updated.title, "Soundcheck");
    assert_eq!(updated.memo, "bring cables");
    assert_eq!(updated.start_time, late.start_time);
    let blank = SchedulePatch { title: Some(" ".to_string()), ..Default::default() };
    assert!(matches!(bands.update_schedule(&late.id, blank).await, Err(BandError::MissingField)));

    bands.delete_schedule(&early.id).await.unwrap();
    assert!(matches!(bands.delete_schedule(&early.id).await, Err(BandError::NotFound)));
    assert_eq!(bands.schedules_for(&band.id).await.unwrap().len(), 2);

    bands.delete_band(&band.id).await.unwrap();
    assert!(bands.schedules_for(&band.id).await.unwrap().is_empty());
    assert!(matches!(bands.members(&band.id).await, Err(BandError::NotFound)));
}

#[tokio::test]
async fn test_outsiders_cannot_touch_schedules() {
    let (auth, bands) = controllers(Arc::new(InMemoryBandRepository::new()));
    auth.signup("owner@band.kr", "secret1", "Owner").await.unwrap();
    let band = bands.create_band("Night Shift", "").await.unwrap();
    let jam = bands.add_schedule(draft(&band.id, "Jam", 2, 19)).await.unwrap();

    auth.logout().await;
    auth.signup("stranger@band.kr", "secret3", "Stranger").await.unwrap();
    assert!(matches!(bands.add_schedule(draft(&band.id, "Mine", 3, 19)).await, Err(BandError::NotMember)));
    assert!(matches!(bands.delete_schedule(&jam.id).await, Err(BandError::NotMember)));
    assert!(matches!(bands.update_schedule(&jam.id, SchedulePatch::default()).await, Err(BandError::NotMember)));
}

#[tokio::test]
async fn test_json_file_repository_persists_and_recovers() {
    let path = std::env::temp_dir().join(format!("bandroom-test-{:016x}.json", rand::rng().random::<u64>()));
    let repo: Arc<dyn BandRepository> = Arc::new(JsonFileBandRepository::new(path.clone()));
    assert!(repo.load().await.unwrap().bands.is_empty());

    let (auth, bands) = controllers(Arc::clone(&repo));
    auth.signup("owner@band.kr", "secret1", "Owner").await.unwrap();
    let band = bands.create_band("Night Shift", "").await.unwrap();

    let reopened: Arc<dyn BandRepository> = Arc::new(JsonFileBandRepository::new(path.clone()));
    let (auth_again, bands_again) = controllers(reopened);
    auth_again.login("owner@band.kr", "secret1").await.unwrap();
    assert_eq!(bands_again.bands().await.unwrap(), vec![band]);

    tokio::fs::write(&path, b"{not json").await.unwrap();
    assert!(repo.load().await.unwrap().users.is_empty());
    tokio::fs::remove_file(&path).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_account_and_band_writes_do_not_overwrite_each_other() {
    let repo: Arc<dyn BandRepository> = Arc::new(SlowRepository::default());
    let (owner_auth, bands) = controllers(Arc::clone(&repo));
    owner_auth.signup("owner@band.kr", "secret1", "Owner").await.unwrap();

    let (signup, created) =
        tokio::join!(owner_auth.signup("drummer@band.kr", "secret2", "Drummer"), bands.create_band("Night Shift", ""));
    signup.unwrap();
    let band = created.unwrap();

    let store = repo.load().await.unwrap();
    let emails: Vec<&str> = store.users.iter().map(|u| u.user.email.as_str()).collect();
    assert_eq!(emails, vec!["owner@band.kr", "drummer@band.kr"]);
    assert_eq!(store.bands.len(), 1);
    assert_eq!(store.bands[0].id, band.id);
}

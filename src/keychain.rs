use crate::band::{AuthController, BandController, BandRepository, InMemoryBandRepository, JsonFileBandRepository};
use crate::community::{NoticeBoard, PostBoard};
use crate::config::AppConfig;
use crate::http_handler::http_client::HTTPClient;
use crate::studio_search::{SearchController, SearchPolicy, SseTransport};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Struct representing the key components of the application, providing access
/// to the availability search, the demo accounts, the band features and the
/// community boards.
///
/// Created once at start-up and handed to every consumer; signing out resets the
/// account state it carries.
#[derive(Clone)]
pub struct Keychain {
    /// Configuration the components were built from.
    config: Arc<AppConfig>,
    /// The search controller owning the visible result list.
    search: Arc<SearchController>,
    /// Demo accounts and the signed-in user.
    auth: Arc<AuthController>,
    /// Band membership and band calendars.
    bands: Arc<BandController>,
    /// Community posts, seeded with the welcome posts.
    posts: Arc<RwLock<PostBoard>>,
    /// Service announcements.
    notices: Arc<RwLock<NoticeBoard>>,
}

impl Keychain {
    /// Creates a new instance of `Keychain`.
    ///
    /// # Arguments
    /// - `config`: Base URL, search policy and storage location.
    ///
    /// # Returns
    /// A new instance of `Keychain` or the error raised while building the HTTP client.
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let client = Arc::new(HTTPClient::new(config.base_url())?);
        let transport = Arc::new(SseTransport::new(client));
        let search = Arc::new(SearchController::new(transport, SearchPolicy::new(config.connect_timeout())));
        let repo: Arc<dyn BandRepository> = match config.data_file() {
            Some(path) => Arc::new(JsonFileBandRepository::new(path.clone())),
            None => Arc::new(InMemoryBandRepository::new()),
        };
        let auth = Arc::new(AuthController::new(Arc::clone(&repo)));
        let bands = Arc::new(BandController::new(repo, Arc::clone(&auth)));
        let now = Utc::now();
        let posts = Arc::new(RwLock::new(PostBoard::with_samples(now)));
        let notices = Arc::new(RwLock::new(NoticeBoard::with_samples(now)));
        Ok(Self { config: Arc::new(config), search, auth, bands, posts, notices })
    }

    /// Provides a cloned reference to the configuration.
    pub fn config(&self) -> Arc<AppConfig> { Arc::clone(&self.config) }

    /// Provides a cloned reference to the search controller.
    pub fn search(&self) -> Arc<SearchController> { Arc::clone(&self.search) }

    /// Provides a cloned reference to the account controller.
    pub fn auth(&self) -> Arc<AuthController> { Arc::clone(&self.auth) }

    /// Provides a cloned reference to the band controller.
    pub fn bands(&self) -> Arc<BandController> { Arc::clone(&self.bands) }

    /// Provides a cloned reference to the community board.
    pub fn posts(&self) -> Arc<RwLock<PostBoard>> { Arc::clone(&self.posts) }

    /// Provides a cloned reference to the notice board.
    pub fn notices(&self) -> Arc<RwLock<NoticeBoard>> { Arc::clone(&self.notices) }

    /// Signs out and tears down the running search.
    pub async fn reset(&self) {
        self.search.cancel();
        self.auth.logout().await;
    }
}

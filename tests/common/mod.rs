#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use shortlink::api::handlers::{health_handler, redirect_handler};
use shortlink::api::routes::url_routes;
use shortlink::application::services::ShortenerService;
use shortlink::domain::entities::UrlRecord;
use shortlink::domain::repositories::{StoreError, UrlRepository};
use shortlink::infrastructure::cache::{CacheError, CacheResult, CacheService, MemoryCache};
use shortlink::infrastructure::persistence::InMemoryUrlRepository;
use shortlink::state::AppState;
use shortlink::utils::key_generator::{KeyGenerator, RandomKeyGenerator};
use std::sync::Arc;

pub const BASE_URL: &str = "http://localhost/";

/// In-memory stores plus the state wired on top of them.
///
/// The store handles share storage with the ones inside the service, so tests
/// can seed or inspect them directly.
pub struct TestContext {
    pub state: AppState,
    pub repo: InMemoryUrlRepository,
    pub cache: MemoryCache,
}

impl TestContext {
    pub fn shortener(&self) -> &ShortenerService {
        &self.state.shortener
    }
}

pub fn create_test_context() -> TestContext {
    create_test_context_with_keys(Arc::new(RandomKeyGenerator::default()))
}

pub fn create_test_context_with_keys(key_generator: Arc<dyn KeyGenerator>) -> TestContext {
    let repo = InMemoryUrlRepository::new();
    let cache = MemoryCache::new();

    let shortener = ShortenerService::new(
        Arc::new(repo.clone()),
        Arc::new(cache.clone()),
        key_generator,
        BASE_URL,
    )
    .with_cache_ttl(3600);

    TestContext {
        state: AppState::new(Arc::new(shortener)),
        repo,
        cache,
    }
}

/// State whose cache fails every call.
pub fn create_failing_cache_state() -> (AppState, InMemoryUrlRepository) {
    let repo = InMemoryUrlRepository::new();
    let shortener = ShortenerService::new(
        Arc::new(repo.clone()),
        Arc::new(FailingCache),
        Arc::new(RandomKeyGenerator::default()),
        BASE_URL,
    );

    (AppState::new(Arc::new(shortener)), repo)
}

/// State whose durable store fails every call.
pub fn create_unavailable_store_state() -> (AppState, MemoryCache) {
    let cache = MemoryCache::new();
    let shortener = ShortenerService::new(
        Arc::new(UnavailableRepository),
        Arc::new(cache.clone()),
        Arc::new(RandomKeyGenerator::default()),
        BASE_URL,
    );

    (AppState::new(Arc::new(shortener)), cache)
}

/// All routes without the path normalization wrapper.
pub fn create_test_router(state: AppState) -> Router {
    Router::new()
        .route("/{key}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(url_routes())
        .with_state(state)
}

/// Returns the key part of a short URL produced under [`BASE_URL`].
pub fn key_of(short_url: &str) -> &str {
    short_url
        .strip_prefix(BASE_URL)
        .expect("short URL must start with the base URL")
}

/// Key generator that always yields the same key.
pub struct FixedKeyGenerator(pub &'static str);

impl KeyGenerator for FixedKeyGenerator {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

/// Cache that is down: every call fails.
pub struct FailingCache;

#[async_trait]
impl CacheService for FailingCache {
    async fn get_url(&self, _short_url: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn set_url(
        &self,
        _short_url: &str,
        _long_url: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn invalidate(&self, _short_url: &str) -> CacheResult<()> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Durable store that is down: every call fails with a non-NotFound error.
pub struct UnavailableRepository;

fn unavailable() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl UrlRepository for UnavailableRepository {
    async fn save(&self, _short_url: &str, _long_url: &str) -> Result<String, StoreError> {
        Err(unavailable())
    }

    async fn get_long_url(&self, _short_url: &str) -> Result<String, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _short_url: &str) -> Result<String, StoreError> {
        Err(unavailable())
    }

    async fn get_stats(&self, _short_url: &str) -> Result<UrlRecord, StoreError> {
        Err(unavailable())
    }

    async fn increment_access_count(&self, _short_url: &str) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

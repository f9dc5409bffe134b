//! CLI runner - executes commands

use crate::auth::{Authenticator, Credential, SessionContext};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::collection::{resolve_collection, JsonCollectionStore};
use crate::config::{AppConfig, RetryConfig};
use crate::error::{Error, Result};
use crate::fetcher::{FetchEvent, FetchOutcome, PagedFetcher};
use crate::http::HttpClient;
use crate::query::QueryDescriptor;
use crate::source::{AlbumCatalog, Item, SpotifySource};
use crate::types::OptionStringExt;
use serde_json::{json, Value};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// User id for commands that browse without a stored profile
const BROWSE_USER: &str = "cli";

/// CLI runner
pub struct Runner {
    cli: Cli,
    config: Option<AppConfig>,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli, config: None }
    }

    /// Create a runner with an already loaded config (ignores `--config`)
    ///
    /// The config is validated when the command runs.
    pub fn with_config(cli: Cli, config: AppConfig) -> Self {
        Self {
            cli,
            config: Some(config),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Search { term, pages } => {
                self.browse(&config, QueryDescriptor::search(term.as_str()), *pages)
                    .await
            }
            Commands::Discover {
                seeds,
                popularity,
                pages,
            } => {
                let descriptor = QueryDescriptor::discover(seeds.iter().cloned(), *popularity);
                self.browse(&config, descriptor, *pages).await
            }
            Commands::Genres => self.genres(&config).await,
            Commands::Albums { ids } => self.albums(&config, ids).await,
            Commands::Collection { id, user, store } => {
                self.collection(&config, id, user, store).await
            }
        }
    }

    /// Load configuration and apply command-line overrides
    fn load_config(&self) -> Result<AppConfig> {
        let mut config = match (&self.config, &self.cli.config) {
            (Some(config), _) => {
                config.validate()?;
                config.clone()
            }
            (None, Some(path)) => AppConfig::load(path)?,
            (None, None) => AppConfig::default(),
        };

        if let Some(retries) = self.cli.retries {
            config.retry.max_retries = retries;
        }
        Ok(config)
    }

    /// Session for the token given on the command line
    fn session(&self, user_id: &str) -> Result<SessionContext> {
        let token = self.cli.token.clone().none_if_empty().ok_or_else(|| {
            Error::unauthorized("no access token (use --token or SPOTIFY_ACCESS_TOKEN)")
        })?;
        Ok(SessionContext::new(user_id, Credential::new(token)))
    }

    /// Build the Spotify source for a session
    fn build_source(config: &AppConfig, session: SessionContext) -> Result<SpotifySource> {
        let client = HttpClient::with_auth(config.http_client_config(), Authenticator::new(session))?;
        let source = SpotifySource::new(client);

        Ok(match config.fetch.market.clone().none_if_empty() {
            Some(market) => source.with_market(market),
            None => source,
        })
    }

    /// Page through a search or discovery session
    async fn browse(&self, config: &AppConfig, descriptor: QueryDescriptor, pages: u32) -> Result<()> {
        descriptor.validate()?;

        let source = Arc::new(Self::build_source(config, self.session(BROWSE_USER)?)?);
        let fetcher = PagedFetcher::new(source, &config.fetch);
        fetcher.submit(descriptor)?;

        for number in 1..=pages.max(1) {
            let outcome = retry_with_policy(&config.retry, || {
                fetcher.handle(FetchEvent::NearBottom)
            })
            .await?;

            let FetchOutcome::Page(page) = outcome else {
                debug!(?outcome, "No page applied");
                break;
            };

            for item in &page.items {
                self.emit_record(item);
            }
            self.emit(&json!({
                "type": "PAGE",
                "page": {
                    "number": number,
                    "items": page.len(),
                    "next_cursor": page.next_cursor,
                }
            }));

            if page.is_last() {
                break;
            }
        }

        let snapshot = fetcher.snapshot();
        self.emit(&json!({
            "type": "SESSION",
            "session": {
                "descriptor": snapshot.descriptor,
                "pages": snapshot.pages,
                "total": snapshot.items.len(),
                "next_cursor": snapshot.next_cursor,
                "state": snapshot.loading,
            }
        }));

        Ok(())
    }

    /// List seed genres
    async fn genres(&self, config: &AppConfig) -> Result<()> {
        let source = Self::build_source(config, self.session(BROWSE_USER)?)?;
        let genres = retry_with_policy(&config.retry, || source.available_genre_seeds()).await?;

        self.emit(&json!({
            "type": "GENRES",
            "genres": genres,
        }));
        Ok(())
    }

    /// Look up albums by id
    async fn albums(&self, config: &AppConfig, ids: &[String]) -> Result<()> {
        let ids: Vec<String> = ids
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        if ids.is_empty() {
            return Err(Error::invalid_query("no album ids given"));
        }

        let source = Self::build_source(config, self.session(BROWSE_USER)?)?;
        let items = retry_with_policy(&config.retry, || source.several_albums(&ids)).await?;

        for item in &items {
            self.emit_record(item);
        }
        Ok(())
    }

    /// Show a stored collection
    async fn collection(
        &self,
        config: &AppConfig,
        collection_id: &str,
        user_id: &str,
        store_path: &Path,
    ) -> Result<()> {
        let store = JsonCollectionStore::from_file(store_path).await?;
        let session = self.session(user_id)?;
        let source = Self::build_source(config, session.clone())?;

        let (collection, items) = retry_with_policy(&config.retry, || {
            resolve_collection(&store, &source, &session, collection_id)
        })
        .await?;

        self.emit(&json!({
            "type": "COLLECTION",
            "collection": {
                "id": collection.id,
                "name": collection.name,
                "created_at": collection.created_at,
                "albums": collection.len(),
                "resolved": items.len(),
            }
        }));
        for item in &items {
            self.emit_record(item);
        }
        Ok(())
    }

    /// Output one album
    fn emit_record(&self, item: &Item) {
        self.emit(&json!({
            "type": "RECORD",
            "record": item,
        }));
    }

    /// Output a message
    fn emit(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Run `op`, retrying retryable failures with the configured backoff
///
/// A `Retry-After` hint from the source takes precedence over the backoff
/// delay. Non-retryable errors are returned immediately.
pub async fn retry_with_policy<T, F, Fut>(policy: &RetryConfig, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                let delay = e
                    .retry_after()
                    .map_or_else(|| policy.delay(attempt), Duration::from_secs);
                attempt += 1;
                warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Source unavailable, retrying: {e}"
                );
                tokio::time::sleep(delay).await;
            }
            result => return result,
        }
    }
}

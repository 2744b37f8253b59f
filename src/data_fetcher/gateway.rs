//! Query orchestration: cache lookup, upstream fetch, mapping and cache fill.
//!
//! Every operation either returns a complete canonical result or an error. Nothing is
//! retried here and no default is substituted for a failure.

use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::data_fetcher::api::{
    QueryParams, UpstreamClient, fixtures_params, league_by_id_params, leagues_by_country_params,
    live_fixtures_params, normalize_status,
};
use crate::constants::MAX_CONCURRENT_LEAGUE_FETCHES;
use crate::data_fetcher::cache::{
    Cacheable, CachedRecords, InFlight, ResultCache, fixtures_key, league_key,
    leagues_by_country_key,
};
use crate::data_fetcher::mapper::{FromUpstream, map_response};
use crate::data_fetcher::models::{Fixture, League};
use crate::error::AppError;

/// Cache shared between gateways (and any administrative tooling)
pub type SharedCache = Arc<ResultCache<CachedRecords>>;

pub struct Gateway {
    client: UpstreamClient,
    cache: SharedCache,
    in_flight: InFlight<CachedRecords>,
    ttl: Duration,
}

impl Gateway {
    /// Creates a gateway over an explicitly constructed cache.
    /// `ttl` applies to league and fixture-by-league results.
    pub fn new(client: UpstreamClient, cache: SharedCache, ttl: Duration) -> Self {
        Self {
            client,
            cache,
            in_flight: InFlight::new(),
            ttl,
        }
    }

    /// Builds the client and gateway from configuration.
    pub fn from_config(config: &Config, cache: SharedCache) -> Result<Self, AppError> {
        let client = UpstreamClient::new(config)?;
        Ok(Self::new(client, cache, config.cache_ttl()))
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fetches the current season of each league id, in input order with duplicates
    /// removed.
    ///
    /// The provider cannot batch this query, so each uncached id costs one upstream
    /// call. At most [`MAX_CONCURRENT_LEAGUE_FETCHES`] ids are in flight at once. If
    /// any id fails, the whole call fails, ids after the failure are not requested and
    /// no partial list is returned.
    #[instrument(skip(self))]
    pub async fn get_leagues(&self, ids: &[i32]) -> Result<Vec<League>, AppError> {
        let mut seen = HashSet::new();
        let unique: Vec<i32> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let per_id: Vec<Vec<League>> = stream::iter(unique.iter().copied())
            .map(|id| self.load_cached::<League>(league_key(id), league_by_id_params(id)))
            .buffered(MAX_CONCURRENT_LEAGUE_FETCHES)
            .try_collect()
            .await?;

        let leagues: Vec<League> = per_id.into_iter().flatten().collect();
        info!(
            "Resolved {} league(s) for {} requested id(s)",
            leagues.len(),
            unique.len()
        );
        Ok(leagues)
    }

    /// Fetches every league of a country (all seasons collapse to the current one).
    #[instrument(skip(self))]
    pub async fn get_leagues_by_country(&self, country: &str) -> Result<Vec<League>, AppError> {
        if country.trim().is_empty() {
            return Err(AppError::invalid_query("Country name cannot be empty"));
        }
        self.load_cached::<League>(
            leagues_by_country_key(country),
            leagues_by_country_params(country),
        )
        .await
    }

    /// Fetches the fixtures of one league season, optionally filtered by status.
    #[instrument(skip(self))]
    pub async fn get_fixtures(
        &self,
        league_id: i32,
        season: i32,
        status: Option<&str>,
    ) -> Result<Vec<Fixture>, AppError> {
        let status = normalize_status(status);
        self.load_cached::<Fixture>(
            fixtures_key(league_id, season, status.as_deref()),
            fixtures_params(league_id, season, status.as_deref()),
        )
        .await
    }

    /// Fetches fixtures currently in play. Always goes upstream; never cached.
    #[instrument(skip(self))]
    pub async fn get_live_fixtures(&self) -> Result<Vec<Fixture>, AppError> {
        let body = self
            .client
            .fetch(Fixture::ENDPOINT, &live_fixtures_params())
            .await?;
        let fixtures = map_response::<Fixture>(&body)?;
        info!("Fetched {} live fixture(s)", fixtures.len());
        Ok(fixtures)
    }

    /// Drops the cached fixtures for a query so the next call refetches
    pub async fn invalidate_fixtures(
        &self,
        league_id: i32,
        season: i32,
        status: Option<&str>,
    ) -> bool {
        let status = normalize_status(status);
        self.cache
            .invalidate(&fixtures_key(league_id, season, status.as_deref()))
            .await
    }

    /// Drops the cached league so the next call refetches
    pub async fn invalidate_league(&self, league_id: i32) -> bool {
        self.cache.invalidate(&league_key(league_id)).await
    }

    async fn cached<T: Cacheable>(&self, key: &str) -> Option<Vec<T>> {
        let records = self.cache.get(key).await?;
        let items = T::from_cached(records);
        if items.is_none() {
            warn!("Cache entry has unexpected record kind: key={}", key);
        }
        items
    }

    /// Returns cached records for `key`, or fetches, maps and caches them.
    ///
    /// Concurrent misses on the same key share one load: every caller gets its result,
    /// or its error, when that single upstream call finishes. Failures are never cached.
    async fn load_cached<T>(&self, key: String, params: QueryParams) -> Result<Vec<T>, AppError>
    where
        T: FromUpstream + Cacheable + Send + 'static,
    {
        if let Some(hit) = self.cached::<T>(&key).await {
            return Ok(hit);
        }

        let client = self.client.clone();
        let cache = Arc::clone(&self.cache);
        let ttl = self.ttl;
        let load_key = key.clone();

        let records = self
            .in_flight
            .run(&key, move || {
                fetch_and_store::<T>(client, cache, load_key, params, ttl)
            })
            .await
            .map_err(AppError::from_shared)?;

        T::from_cached(records).ok_or_else(|| {
            warn!("Cache entry has unexpected record kind: key={}", key);
            AppError::mapping(T::ENDPOINT.as_str(), "response", "records of another kind")
        })
    }
}

/// One upstream load for `key`: fetch, map, then cache on success.
async fn fetch_and_store<T>(
    client: UpstreamClient,
    cache: SharedCache,
    key: String,
    params: QueryParams,
    ttl: Duration,
) -> Result<CachedRecords, AppError>
where
    T: FromUpstream + Cacheable,
{
    // A load that finished just before this one registered may have filled it
    if let Some(records) = cache.get(&key).await {
        debug!("Cache filled by a concurrent load: key={}", key);
        return Ok(records);
    }

    let body = client.fetch(T::ENDPOINT, &params).await?;
    let records = T::into_cached(map_response::<T>(&body)?);
    cache.set(&key, records.clone(), ttl).await;
    Ok(records)
}

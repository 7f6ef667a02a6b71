/// Business logic services layer
use crate::clients::{ApodClient, NeoClient};
use crate::domain::{Asteroid, BrowseEntry, DisplayImage, NeoLookupResponse};
use crate::errors::{ApiError, ApiResult};
use chrono::{NaiveDate, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

/// Everything the screen needs from the NASA APIs.
pub struct LookupService {
    neo: NeoClient,
    apod: ApodClient,
}

impl LookupService {
    pub fn new(neo: NeoClient, apod: ApodClient) -> Self {
        Self { neo, apod }
    }

    /// Look up a single asteroid, mapping the catalog's error envelope to a
    /// not-found error that carries the displayable message.
    pub async fn lookup_by_id(&self, id: &str) -> ApiResult<Asteroid> {
        info!(%id, "looking up asteroid");
        match self.neo.lookup(id).await? {
            NeoLookupResponse::Record(asteroid) => {
                info!(id = %asteroid.id, name = %asteroid.name, "lookup succeeded");
                Ok(*asteroid)
            }
            NeoLookupResponse::Error(envelope) => {
                warn!(%id, "catalog reported not found");
                Err(ApiError::NotFound(envelope.message()))
            }
        }
    }

    /// Pick one identifier from the first browse page of the catalog.
    pub async fn random_candidate(&self) -> ApiResult<String> {
        let page = self.neo.browse().await?;
        let entry = choose_entry(&page.near_earth_objects, &mut rand::thread_rng())
            .ok_or_else(|| ApiError::Internal("browse returned an empty page".to_string()))?;
        info!(id = %entry.id, name = %entry.name, "picked random asteroid");
        Ok(entry.id.clone())
    }

    /// Fetch a decorative picture of the day for a random archive date.
    /// Failures never propagate; the placeholder stands in instead.
    pub async fn fetch_image(&self, name: &str) -> DisplayImage {
        let date = random_apod_date(Utc::now().date_naive(), &mut rand::thread_rng());
        debug!(asteroid = %name, %date, "fetching picture of the day");
        match self.apod.fetch(date).await {
            Ok(media) => DisplayImage::from_apod(media),
            Err(err) => {
                debug!(error = %err, "picture of the day unavailable, using placeholder");
                DisplayImage::fallback()
            }
        }
    }
}

fn choose_entry<'a, R: Rng>(entries: &'a [BrowseEntry], rng: &mut R) -> Option<&'a BrowseEntry> {
    if entries.is_empty() {
        return None;
    }
    entries.get(rng.gen_range(0..entries.len()))
}

/// A uniformly random date between the first APOD (1995-06-16) and `today`,
/// both inclusive.
fn random_apod_date<R: Rng>(today: NaiveDate, rng: &mut R) -> NaiveDate {
    let start = NaiveDate::from_ymd_opt(1995, 6, 16).unwrap_or_default();
    let span = (today - start).num_days().max(0);
    let offset = rng.gen_range(0..=span);
    start + chrono::Days::new(offset as u64)
}

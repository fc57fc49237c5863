//! Fan-out fetcher: concurrent, order-preserving, all-or-nothing batch retrieval.

use futures::future::try_join_all;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::models::{EntityRecord, ResourceKind};
use crate::domain::ports::CatalogClient;

/// Reject an empty batch; callers must never ask for zero entities.
pub(crate) fn ensure_non_empty<S>(identifiers: &[S]) -> CatalogResult<()> {
    if identifiers.is_empty() {
        return Err(CatalogError::ContractViolation(
            "batch fetch requires at least one identifier".to_string(),
        ));
    }
    Ok(())
}

/// Retrieves many entities of one family concurrently.
///
/// Results come back in input order whatever the completion order. The first
/// failure fails the whole batch and the remaining in-flight requests are
/// dropped.
pub struct FanOutFetcher<C: CatalogClient + ?Sized> {
    client: Arc<C>,
    /// `None` dispatches the whole batch at once
    max_in_flight: Option<usize>,
}

impl<C: CatalogClient + ?Sized> Clone for FanOutFetcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            max_in_flight: self.max_in_flight,
        }
    }
}

impl<C: CatalogClient + ?Sized> FanOutFetcher<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            max_in_flight: None,
        }
    }

    /// Cap the number of simultaneous requests per batch.
    pub fn with_max_in_flight(mut self, max_in_flight: Option<usize>) -> Self {
        self.max_in_flight = max_in_flight.map(|cap| cap.max(1));
        self
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub const fn max_in_flight(&self) -> Option<usize> {
        self.max_in_flight
    }

    /// Fetch every identifier of `kind`; the i-th result answers the i-th key.
    #[instrument(skip(self, identifiers), fields(kind = %kind, batch = identifiers.len()))]
    pub async fn fetch_many<S>(
        &self,
        kind: ResourceKind,
        identifiers: &[S],
    ) -> CatalogResult<Vec<EntityRecord>>
    where
        S: AsRef<str> + Sync,
    {
        ensure_non_empty(identifiers)?;

        let records = self
            .gather(
                identifiers
                    .iter()
                    .map(|key| self.client.fetch_entity(kind, key.as_ref())),
            )
            .await?;

        debug!(resolved = records.len(), "batch resolved");
        Ok(records)
    }

    /// Drive a batch of fallible futures to completion, keeping input order.
    pub(crate) async fn gather<I, F, T>(&self, pending: I) -> CatalogResult<Vec<T>>
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = CatalogResult<T>>,
    {
        match self.max_in_flight {
            None => try_join_all(pending).await,
            Some(cap) => stream::iter(pending).buffered(cap).try_collect().await,
        }
    }
}

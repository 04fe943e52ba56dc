//! iTranvias query client
//!
//! Each operation performs exactly one round trip to the query endpoint and
//! maps the response into owned entities. Nothing is cached between calls:
//! the stop lookups fetch and decode the whole network snapshot every time,
//! so their cost is O(network) per call.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::config::ItranviasConfig;
use crate::error::ItranviasError;
use crate::mapper::{parse_stop, parse_stop_buses};
use crate::models::{Bus, Stop};
use crate::raw::{self, RawNetworkResponse, RawSnapshot, RawStopBusesResponse};
use crate::search::filter_by_keywords;
use crate::transport::{FunctionCode, HttpQueryTransport, QueryTransport};

/// Trait for iTranvias query clients
#[async_trait]
pub trait ItranviasClient: Send + Sync {
    /// Real-time arrivals at a stop, keyed by line id
    ///
    /// Buses are listed in the order the service reports them, which is not
    /// guaranteed to be arrival order.
    async fn get_stop_buses(
        &self,
        stop_id: i64,
    ) -> Result<HashMap<i64, Vec<Bus>>, ItranviasError>;

    /// Every stop of the network, in snapshot order
    async fn get_all_stops(&self) -> Result<Vec<Stop>, ItranviasError>;

    /// The stop with the given id, or `None` if the network has no such stop
    async fn get_stop_by_id(&self, stop_id: i64) -> Result<Option<Stop>, ItranviasError>;

    /// Stops whose name contains every space-separated keyword, ignoring case
    async fn get_stop_by_keywords(&self, keywords: &str) -> Result<Vec<Stop>, ItranviasError>;
}

/// Client for the iTranvias `queryitr` endpoint
#[derive(Clone)]
pub struct QueryItrClient {
    transport: Arc<dyn QueryTransport>,
    dataset_version: String,
}

impl QueryItrClient {
    /// Create a client that talks HTTP to the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &ItranviasConfig) -> Result<Self, ItranviasError> {
        let transport = HttpQueryTransport::new(config)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            config.dataset_version.clone(),
        ))
    }

    /// Create a client over an arbitrary transport
    #[must_use]
    pub fn with_transport(
        transport: Arc<dyn QueryTransport>,
        dataset_version: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            dataset_version: dataset_version.into(),
        }
    }

    /// Dataset version requested for network snapshots
    #[must_use]
    pub fn dataset_version(&self) -> &str {
        &self.dataset_version
    }

    /// Fetch and decode the network snapshot
    async fn fetch_snapshot(&self) -> Result<RawSnapshot, ItranviasError> {
        let data = self
            .transport
            .fetch(FunctionCode::NetworkSnapshot, &self.dataset_version)
            .await?;
        let response: RawNetworkResponse = raw::decode(data)?;
        Ok(response.itranvias.actualizacion)
    }
}

impl fmt::Debug for QueryItrClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryItrClient")
            .field("dataset_version", &self.dataset_version)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ItranviasClient for QueryItrClient {
    #[instrument(skip(self))]
    async fn get_stop_buses(
        &self,
        stop_id: i64,
    ) -> Result<HashMap<i64, Vec<Bus>>, ItranviasError> {
        let data = self
            .transport
            .fetch(FunctionCode::StopBuses, &stop_id.to_string())
            .await?;
        let response: RawStopBusesResponse = raw::decode(data)?;

        let lines = parse_stop_buses(response);
        debug!(lines = lines.len(), "Stop arrivals fetched");
        Ok(lines)
    }

    #[instrument(skip(self))]
    async fn get_all_stops(&self) -> Result<Vec<Stop>, ItranviasError> {
        let snapshot = self.fetch_snapshot().await?;

        let stops = snapshot
            .paradas
            .iter()
            .map(|stop| parse_stop(stop, &snapshot))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = stops.len(), "Network stops fetched");
        Ok(stops)
    }

    #[instrument(skip(self))]
    async fn get_stop_by_id(&self, stop_id: i64) -> Result<Option<Stop>, ItranviasError> {
        let snapshot = self.fetch_snapshot().await?;

        let Some(stop) = snapshot.stop(stop_id) else {
            warn!("No stop with this id");
            return Ok(None);
        };

        parse_stop(stop, &snapshot).map(Some)
    }

    #[instrument(skip(self))]
    async fn get_stop_by_keywords(&self, keywords: &str) -> Result<Vec<Stop>, ItranviasError> {
        let stops = self.get_all_stops().await?;
        let total = stops.len();

        let found = filter_by_keywords(stops, keywords);
        debug!(found = found.len(), total, "Stops matched by keywords");
        Ok(found)
    }
}

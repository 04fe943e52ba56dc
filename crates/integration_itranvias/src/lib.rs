//! Client for the iTranvias real-time service
//!
//! Queries the [iTranvias](https://itranvias.com) endpoint of the A Coruña
//! tram and bus network for live arrivals at a stop, the full stop catalog,
//! and keyword search over stop names.
//!
//! # Architecture
//!
//! [`QueryTransport`] is the single request primitive: a function code plus
//! one datum in, nested JSON out. [`HttpQueryTransport`] implements it over
//! HTTP. Payloads are decoded into the record types of [`raw`] and turned into
//! [`Stop`], [`Line`] and [`Bus`] values by the pure functions in [`mapper`].
//! [`ItranviasClient`] is the query interface, implemented by
//! [`QueryItrClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_itranvias::{ItranviasClient, ItranviasConfig, QueryItrClient};
//!
//! let client = QueryItrClient::new(&ItranviasConfig::default())?;
//!
//! for (line, buses) in client.get_stop_buses(523).await? {
//!     for bus in buses {
//!         println!("line {line}: {bus}");
//!     }
//! }
//!
//! let stops = client.get_stop_by_keywords("plaza pontevedra").await?;
//! ```

mod client;
mod config;
mod error;
pub mod mapper;
mod models;
pub mod raw;
pub mod search;
mod transport;

pub use client::{ItranviasClient, QueryItrClient};
pub use config::{DEFAULT_DATASET_VERSION, ItranviasConfig};
pub use error::ItranviasError;
pub use models::{Bus, Line, Reading, Stop};
pub use transport::{FunctionCode, HttpQueryTransport, QueryTransport};

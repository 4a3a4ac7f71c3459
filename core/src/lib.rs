//! Client for the vegetable inventory REST API.
//!
//! # Overview
//! Four operations against one endpoint: paginated listing, creation, partial
//! update and deletion of vegetable records. The remote store owns every
//! record and allocates ids; this crate only validates input, builds URLs and
//! normalizes errors.
//!
//! # Design
//! - `VegetableClient` is stateless; it holds only the endpoint URL.
//! - Each operation is split into `build_*` (validates, produces a request)
//!   and `parse_*` (consumes a response), with a composed method that runs
//!   both around an injected `Transport`.
//! - `UreqTransport` is the shipped transport; tests inject fakes.
//! - Results implement `Display` for printing to a person.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```no_run
//! use vegetable_core::{ClientConfig, ListParams, UreqTransport, VegetableClient};
//!
//! let config = ClientConfig::from_env()?;
//! let client = VegetableClient::from_config(&config);
//! let transport = UreqTransport::from_config(&config);
//! let page = client.list(&transport, ListParams::page(1))?;
//! println!("{page}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
mod render;
pub mod transport;
pub mod types;

pub use client::VegetableClient;
pub use config::{ClientConfig, ConfigError, DEFAULT_ENDPOINT};
pub use error::{ApiError, Failure};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use transport::UreqTransport;
pub use types::{
    Created, Deleted, ListParams, NewVegetable, Updated, Vegetable, VegetableChanges, VegetablePage,
    DEFAULT_PAGE_LIMIT,
};

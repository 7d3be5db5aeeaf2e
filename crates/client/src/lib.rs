//! Client side of the staffing backend.
//!
//! [`StaffingApi`] is the single boundary every flow talks through.
//! [`HttpStaffingApi`] speaks the backend's REST API; [`InMemoryStaffingApi`]
//! serves seeded data for offline use and tests.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod memory;

pub use api::{ApiOperation, StaffingApi};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::HttpStaffingApi;
pub use memory::{InMemoryStaffingApi, MemoryFixture};

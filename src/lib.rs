//! `sitedash-http` is an async HTTP client for the SiteDash project-tracking API.
//!
//! The crate wraps the dashboard's JSON endpoints with ergonomic methods:
//! - [`SiteDashClient::progress`]
//! - [`SiteDashClient::map_data`]
//! - [`SiteDashClient::performance`]
//! - [`SiteDashClient::weekly_report`]
//!
//! Every request runs through a bounded retry loop with linear backoff; once
//! the attempt budget is exhausted the last failure is surfaced unchanged.

mod client;
mod config;
mod decode;
mod error;
mod options;
mod retry;
mod types;

pub use client::SiteDashClient;
pub use config::{ClientConfig, Environment, SocketAuth, SocketOptions};
pub use error::SiteDashError;
pub use options::{ClientOptions, OutagePolicy};
pub use retry::{CancelToken, RetryPolicy};
pub use types::{
    Kpi, MonthlyMetric, OperationItem, PerformanceReport, ProjectProgress, WeeklyProject, WorkItem,
};

pub type Result<T> = std::result::Result<T, SiteDashError>;

//! fund-chart-rs: fund valuation charts and their backend plumbing.
//!
//! The crate turns intraday estimate series and net-value trend series into
//! declarative chart options, drives a host charting engine through a
//! mount / update / resize / unmount lifecycle, and talks to an optional
//! backend-as-a-service project for auth and cloud sync.

pub mod announcement;
pub mod api;
pub mod backend;
pub mod core;
pub mod error;
pub mod lifecycle;
pub mod render;
pub mod settings;
pub mod telemetry;

pub use api::{ChartOption, ChartPipeline, IntradayChartBuilder, TrendChartBuilder};
pub use backend::{BackendClient, BackendConfig, BackendError, DisabledBackend};
pub use error::{ChartError, ChartResult};
pub use lifecycle::{ChartController, IntradayChart, LifecycleState, TrendChart};

//! notedeck - note board client with multi-endpoint failover
//!
//! Every request to the note API goes through a [`dispatch::Dispatcher`],
//! which orders the configured endpoints by recent success and health,
//! retries each a bounded number of times, and fails over to the next one.
//!
//! # Layout
//!
//! - [`registry`] - the ordered, immutable endpoint list and request tunables
//! - [`health`] - per-endpoint health records with a staleness window, and probes
//! - [`dispatch`] - candidate ordering, retry and failover execution
//! - [`notes`] - typed note API on top of the dispatcher
//! - [`realtime`] - push notification decoding and fan-out
//! - [`board`] - headless note board controller
//! - [`config`], [`logging`], [`metrics`], [`cli`] - ambient plumbing

pub mod board;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod notes;
pub mod realtime;
pub mod registry;

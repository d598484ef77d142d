#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Jobflow Core
//!
//! Job-control command dispatcher with an authorization gate for workflow,
//! coordinator, and bundle jobs.
//!
//! ## Overview
//!
//! Given an inbound command naming a job id and an action (or a show query),
//! the dispatcher authorizes the caller, routes to exactly one job-lifecycle
//! operation of an abstract engine, brackets the operation with a
//! maintenance-pause protocol so background scheduling never races a
//! mutation, and renders the result into a structured response.
//!
//! The underlying engine and the authorization policy are external
//! collaborators behind the [`engine::JobEngine`] and
//! [`auth::AuthorizationGate`] traits; this crate owns only the
//! control-flow contract around them:
//!
//! - authorization strictly precedes any side effect,
//! - the pause bracket spans exactly the engine invocation and releases on
//!   every exit path,
//! - selectors are closed enumerations matched exhaustively, with unknown
//!   strings rejected as client errors,
//! - every branch terminates in one well-defined response.
//!
//! ## Module Organization
//!
//! - [`dispatch`] - the command model and dispatcher state machine
//! - [`auth`] - authorization gate interface and application-path authorizer
//! - [`engine`] - abstract job engine interface and error contract
//! - [`scheduler`] - maintenance pause/resume signaling
//! - [`render`] - terminal outcome to status/body rendering
//! - [`config`] - job configuration documents
//! - [`error`] - structured error taxonomy
//! - [`logging`] - structured tracing initialization
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use jobflow_core::dispatch::{Action, Caller, Command, JobDispatcher};
//! # use jobflow_core::auth::AuthorizationGate;
//! # use jobflow_core::engine::JobEngine;
//!
//! # async fn example(engine: Arc<dyn JobEngine>, gate: Arc<dyn AuthorizationGate>) {
//! let dispatcher = JobDispatcher::new(engine, gate);
//! let command = Command::action("wf-1", Caller::authenticated("alice"), Action::Start);
//! let response = dispatcher.handle(&command).await;
//! println!("start returned {}", response.status);
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod logging;
pub mod render;
pub mod scheduler;

pub use auth::{AuthError, AuthorizationGate};
pub use config::JobConfig;
pub use dispatch::{Action, Caller, Command, ContentType, JobDispatcher, Selector, ShowKind};
pub use engine::{ByteStream, EngineError, JobEngine, StreamBody};
pub use error::{DispatchError, DispatchResult};
pub use render::{render, JobResponse, ResponseBody};
pub use scheduler::{MaintenancePauseController, PauseGuard, SchedulerPauseState};

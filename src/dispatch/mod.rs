//! # Command Dispatch
//!
//! Request model and the dispatcher state machine.

pub mod action;
pub mod command;
pub mod dispatcher;
pub mod show;

pub use action::Action;
pub use command::{Caller, Command, ContentType, Selector};
pub use dispatcher::JobDispatcher;
pub use show::ShowKind;

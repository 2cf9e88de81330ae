//! Company Core Library
//!
//! This crate provides the core functionality for `company`, a small
//! manager for departments and the employees assigned to them.
//!
//! # Architecture
//!
//! - **Store**: SQLite persistence; each mutation is one transaction
//! - **Controller**: session state (selected department, derived views,
//!   notifications) driven by user intents
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::open()?;
//! let mut controller = Controller::new(store, config.notification_ttl());
//!
//! controller.create_department("Engineering");
//! controller.create_employee("Ada");
//! assert_eq!(controller.employee_count(), 1);
//!
//! controller.into_repository().close()?;
//! ```
//!
//! # Modules
//!
//! - `store`: SQLite-backed store (main entry point)
//! - `repository`: data-access trait the controller depends on
//! - `controller`: intents and derived views
//! - `notification`: auto-dismissing user messages
//! - `models`: departments and employees
//! - `storage`: schema and error types
//! - `config`: application configuration

pub mod config;
pub mod controller;
pub mod models;
pub mod notification;
pub mod repository;
pub mod storage;
pub mod store;

pub use config::Config;
pub use controller::{Controller, EmployeeSource, Refresh};
pub use models::{Department, DepartmentId, Employee, EmployeeId, EmployeeRow};
pub use notification::{Notification, NotificationLevel, Notifier};
pub use repository::Repository;
pub use storage::{ErrorKind, StoreError, StoreResult};
pub use store::Store;

//! # Platebook Architecture
//!
//! Platebook keeps a small registry of license plates: each record holds a
//! two-part plate number, a phone number and an optional note, in a single
//! SQLite file. It is a **UI-agnostic library** that happens to ship a CLI.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (plate text → Plate)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation and the duplicate-check policy                │
//! │  - Search query construction                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore trait                                        │
//! │  - SqliteStore (production), InMemoryStore (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Uniqueness
//!
//! `(part1, part2, phone_number)` is unique. A plate alone is not: the same
//! plate may be registered with several phone numbers. Adding a record is
//! therefore checked in two tiers (see [`commands::add`]):
//! - same plate and phone: **hard duplicate**, always rejected
//! - same plate, other phone: **soft duplicate**, written only if the user confirms
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values, returns `Result<CmdResult>`,
//! logs through `tracing`, and never touches stdout, stderr or stdin.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Plate`, `PlateRecord`, `RecordQuery`)
//! - [`validation`]: Form field rules
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context wiring
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;
pub mod validation;

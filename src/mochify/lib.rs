//! # Mochify Architecture
//!
//! Mochify is a **UI-agnostic flashcard export library**. It takes a markdown note,
//! finds the cards tagged inside it, and packs them (with the images they embed) into
//! a `.mochi` archive that the Mochi app can import. The CLI is one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts for a folder, prints messages  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the document source and the resolved config         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - export, preview, config                                  │
//! │  - Returns `CmdResult` with an outcome and leveled messages │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (scanner, media, ids, deck, edn, package)           │
//! │  - text → cards → data.edn → zip bytes                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Source Layer (source/)                                     │
//! │  - Abstract DocumentSource trait                            │
//! │  - FileSource (production), InMemorySource (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Export Pipeline
//!
//! Data flows strictly forward:
//!
//! 1. [`scanner::scan`] walks the note line by line. A line containing the card marker
//!    (`#card` by default, case-insensitive) starts a card; the following lines up to a
//!    `---` or `***` line are its body.
//! 2. Every body line goes through [`media::rewrite_line`], which turns `[[image.png]]`
//!    embeds into `[image_png](@media/x7Gk2a.png)` links and records which vault file
//!    must travel with the deck.
//! 3. [`edn::render`] writes the deck as Mochi's `data.edn` description.
//! 4. [`package::build`] zips `data.edn` with the referenced attachments and
//!    [`package::write`] puts the archive on disk as `<deck>.mochi`.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** calls `std::process::exit`
//! - **Never** asks the user anything directly; folder selection is a [`commands::export::FolderPrompt`]
//!
//! Configuration is resolved by the caller before the core sees it (see
//! [`config::ResolvedConfig`]), so nothing in here mutates settings on first use.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`source`]: Document source abstraction and implementations
//! - [`model`]: Core data types (`Card`, `MediaRef`, `Deck`)
//! - [`ids`]: Collision-free archive id tokens
//! - [`media`]: Embed link rewriting
//! - [`scanner`]: Card extraction
//! - [`deck`]: Deck naming strategies
//! - [`edn`]: `data.edn` serialization
//! - [`package`]: Archive assembly and persistence
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod deck;
pub mod edn;
pub mod error;
pub mod ids;
pub mod media;
pub mod model;
pub mod package;
pub mod scanner;
pub mod source;

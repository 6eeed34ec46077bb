//! WinClip - typed access to the Windows clipboard
//!
//! This crate opens the shared clipboard safely under contention, keeps a
//! registry of clipboard formats, and converts native clipboard buffers to
//! and from text and file lists.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Format descriptors, the file-list block layout, retry policy, config and errors
//! - **Application**: Clipboard access, format registry, text catalog, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Win32 clipboard, in-memory clipboard, config store)
//! - **CLI**: Command-line interface, argument parsing, and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

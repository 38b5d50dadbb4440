//! loose-config-loader is the "reader" part of loose configuration tooling.
//!
//! The builder (`loose-config-builder`) writes a descriptor document,
//! describing a virtual archive assembled from files and directories on disk.
//! This crate reads such document back into
//! [common::archive::VirtualArchive], so it can be inspected, compared or
//! resolved by the consumer.
//!
//! # Examples
//!
//! ```
//! # use anyhow::Error;
//! # use loose_config_loader::{common::entry::Entry, loader::load_str};
//! #
//! # fn main() -> Result<(), Error> {
//! #
//! let archive = load_str(
//!     r#"<?xml version="1.0" encoding="UTF-8"?>
//! <archive>
//!     <dir sourceOnDisk="APP_ROOT/src/main/webapp" targetInArchive="/"/>
//!     <archive targetInArchive="/WEB-INF/lib/module.jar">
//!         <dir sourceOnDisk="APP_ROOT/module/target/classes" targetInArchive="/"/>
//!     </archive>
//! </archive>
//! "#,
//! )?;
//!
//! assert_eq!(archive.entries.len(), 2);
//! assert!(matches!(archive.entries[0], Entry::Dir(_)));
//! assert_eq!(archive.entries_count_recursive(), 3);
//! #
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub use loose_config_common as common;

pub mod loader;

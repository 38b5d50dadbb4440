//! loose-config-builder creates loose configuration documents: xml
//! descriptors telling an application runtime how to assemble a virtual
//! archive (eg. `war` or `ear`) directly from files and directories on disk,
//! without packaging them.
//!
//! This crate is usually used in build tooling. Build compiles classes,
//! collects resources and dependencies, and instead of zipping them, asks the
//! builder to describe where each piece lives. The runtime later reads the
//! document with `loose-config-loader` (or its own parser) and serves the
//! archive straight from the sources, so edits are picked up without
//! repackaging.
//!
//! This crate can be used in two ways:
//! - As a standalone application, `$ loose-config-builder --help` lists
//!   available subcommands.
//! - As a library, imported to your build tool.
//!
//! # Document format
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <archive>
//!     <dir sourceOnDisk="/proj/src/main/webapp" targetInArchive="/"/>
//!     <file sourceOnDisk="/proj/server.env" targetInArchive="/server.env"/>
//!     <archive targetInArchive="/WEB-INF/lib/module.jar">
//!         <dir sourceOnDisk="/proj/module/target/classes" targetInArchive="/"/>
//!     </archive>
//! </archive>
//! ```
//!
//! # Using as a library
//! Create a [builder::Builder], optionally with [relocation::Relocation] to
//! make paths portable, register entries and store the result with
//! [builder::Builder::store_file].
//!
//! ### Examples
//! ```no_run
//! # use anyhow::Error;
//! # use std::path::PathBuf;
//! # use loose_config_builder::{builder::Builder, relocation::Relocation};
//!
//! # fn main() -> Result<(), Error> {
//! // paths under /proj will be written as APP_ROOT/...
//! let mut builder = Builder::with_relocation(Relocation::new(
//!     "/proj".to_owned(),
//!     "APP_ROOT".to_owned(),
//! ));
//! let root = builder.root();
//!
//! // web resources at the archive root
//! builder.dir_add(&root, &PathBuf::from("/proj/src/main/webapp"), "/")?;
//!
//! // compiled classes
//! builder.dir_add(
//!     &root,
//!     &PathBuf::from("/proj/target/classes"),
//!     "/WEB-INF/classes",
//! )?;
//!
//! // dependency from outside of the project, copied into staging directory
//! builder.file_add_staged(
//!     &root,
//!     &PathBuf::from("/home/me/.m2/repository/lib.jar"),
//!     "/WEB-INF/lib/lib.jar",
//!     &PathBuf::from("/proj/target/staging"),
//! )?;
//!
//! // module of the project, as nested archive
//! builder.archive_dir_add(
//!     &root,
//!     "/WEB-INF/lib/module.jar",
//!     &PathBuf::from("/proj/module/target/classes"),
//! )?;
//!
//! builder.store_file(&PathBuf::from("/proj/target/app.war.xml"))?;
//! # Ok(())
//! # }
//! ```
//!
//! For more examples browse through modules of this crate.

#![allow(clippy::new_without_default)]
#![warn(missing_docs)]

pub use loose_config_common as common;

pub mod archive_path;
pub mod builder;
pub mod descriptor;
pub mod relocation;
pub mod staging;

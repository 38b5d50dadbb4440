//! Main builder executable, to be used as cli tool. For help run this command
//! with `-h`.

#![warn(missing_docs)]

use anyhow::{Context, Error, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use loose_config_builder::{archive_path, builder::Builder, relocation::Relocation};
use simple_logger::SimpleLogger;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Arguments {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
struct BuilderGlobalOptions {
    /// Absolute path prefix replaced by `--source-on-disk-name` in written
    /// source paths. Must be used together with `--source-on-disk-name`.
    #[arg(long, requires = "source_on_disk_name")]
    pub project_root: Option<String>,
    /// Symbolic name written instead of `--project-root`, eg. `APP_ROOT`.
    #[arg(long, requires = "project_root")]
    pub source_on_disk_name: Option<String>,
}
impl BuilderGlobalOptions {
    pub fn into_builder(self) -> Builder {
        let builder = match (self.project_root, self.source_on_disk_name) {
            (Some(project_root), Some(source_on_disk_name)) => {
                Builder::with_relocation(Relocation::new(project_root, source_on_disk_name))
            }
            _ => Builder::new(),
        };

        if let Some(relocation) = builder.relocation() {
            log::info!(
                "relocating {} as {}",
                relocation.project_root(),
                relocation.source_on_disk_name()
            );
        }

        builder
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Creates a descriptor mapping single directory to the archive root.
    DirectorySingle {
        #[command(flatten)]
        builder_global_options: BuilderGlobalOptions,

        /// The directory to be served as the archive.
        input_directory_path: PathBuf,

        /// Output descriptor path.
        output_file_path: PathBuf,
    },
    /// Creates a descriptor from list of files supplied through command line.
    FilesCmd {
        #[command(flatten)]
        builder_global_options: BuilderGlobalOptions,

        /// Copy files located outside of this directory into it before
        /// registering them.
        #[arg(long)]
        staging_directory_path: Option<PathBuf>,

        /// Output descriptor path.
        output_file_path: PathBuf,

        /// Base directory path, used to resolve path of a file inside the
        /// archive. All added files must be inside this directory.
        input_base_directory_path: PathBuf,

        /// List of files to be added to the archive.
        input_file_paths: Vec<PathBuf>,
    },
    /// Creates a descriptor made of nested archives, each containing whole
    /// directory.
    ArchiveDirs {
        #[command(flatten)]
        builder_global_options: BuilderGlobalOptions,

        /// Output descriptor path.
        output_file_path: PathBuf,

        /// Nested archives, as `TARGET=DIRECTORY`, eg. `/web.war=web/target/classes`.
        #[arg(value_parser = archive_directory_parse)]
        archive_directories: Vec<(String, PathBuf)>,
    },
}

fn archive_directory_parse(value: &str) -> Result<(String, PathBuf), Error> {
    let (target, directory) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("expected TARGET=DIRECTORY, got {value}"))?;

    Ok((target.to_owned(), PathBuf::from(directory)))
}

fn main() -> Result<(), Error> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()?;

    let arguments = Arguments::parse();

    match arguments.command {
        Command::DirectorySingle {
            builder_global_options,
            input_directory_path,
            output_file_path,
        } => {
            let mut builder = builder_global_options.into_builder();
            let root = builder.root();

            if builder
                .dir_add(&root, &input_directory_path, "/")?
                .is_none()
            {
                bail!(
                    "input directory {} does not exist",
                    input_directory_path.display()
                );
            }

            builder.store_file(&output_file_path)?;
        }
        Command::FilesCmd {
            builder_global_options,
            staging_directory_path,
            output_file_path,
            input_base_directory_path,
            input_file_paths,
        } => {
            let mut builder = builder_global_options.into_builder();
            let root = builder.root();

            for input_file_path in input_file_paths {
                let input_file_error_context = || input_file_path.to_string_lossy().into_owned();

                let file_base_relative_path = input_file_path
                    .strip_prefix(&input_base_directory_path)
                    .context("resolve file_base_relative_path")
                    .with_context(input_file_error_context)?;
                let target = archive_path::from_file_base_relative_path(file_base_relative_path)
                    .with_context(input_file_error_context)?;

                let entry_handle = match &staging_directory_path {
                    Some(staging_directory_path) => builder.file_add_staged(
                        &root,
                        &input_file_path,
                        &target,
                        staging_directory_path,
                    ),
                    None => builder.file_add(&root, &input_file_path, &target),
                }
                .with_context(input_file_error_context)?;

                if entry_handle.is_none() {
                    log::warn!("skipping {}: not a file", input_file_path.display());
                }
            }

            builder.store_file(&output_file_path)?;
        }
        Command::ArchiveDirs {
            builder_global_options,
            output_file_path,
            archive_directories,
        } => {
            let mut builder = builder_global_options.into_builder();
            let root = builder.root();

            for (target, directory) in archive_directories {
                if !directory.is_dir() {
                    log::warn!(
                        "archive {target} will be empty: {} is not a directory",
                        directory.display()
                    );
                }

                builder.archive_dir_add(&root, &target, &directory)?;
            }

            builder.store_file(&output_file_path)?;
        }
    }

    Ok(())
}

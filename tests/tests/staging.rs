use loose_config_builder::{builder::Builder, staging};
use loose_config_tests::{ProjectFixture, files_list, logger_init};
use std::{fs, path::PathBuf};

#[test]
fn file_outside_staging_is_copied() {
    logger_init();
    let fixture = ProjectFixture::new().unwrap();
    let staging_directory = fixture.path("project/target/staging");

    let mut builder = Builder::new();
    let root = builder.root();
    let entry_handle = builder
        .file_add_staged(
            &root,
            &fixture.path("repository/a/lib.jar"),
            "/WEB-INF/lib/lib.jar",
            &staging_directory,
        )
        .unwrap()
        .unwrap();

    let staged_files = files_list(&staging_directory).unwrap();
    assert_eq!(staged_files.len(), 1);
    let staged_file = &staged_files[0];

    // new subdirectory directly below staging, same file name, same content
    let staged_file_directory = staged_file.parent().unwrap();
    assert_eq!(staged_file_directory.parent(), Some(staging_directory.as_path()));
    assert_eq!(staged_file.file_name().unwrap(), "lib.jar");
    assert_eq!(fs::read(staged_file).unwrap(), b"library a");

    // descriptor points to the copy
    let entry = builder.entry(&entry_handle).unwrap();
    let staged_file_string = staged_file.to_string_lossy().into_owned();
    assert_eq!(entry.source_on_disk(), Some(staged_file_string.as_str()));
    assert_ne!(
        entry.source_on_disk(),
        Some(fixture.path_string("repository/a/lib.jar").as_str())
    );
}

#[test]
fn file_inside_staging_is_not_copied() {
    let fixture = ProjectFixture::new().unwrap();
    fixture
        .file_write("project/target/staging/server.env", b"PORT=9080")
        .unwrap();
    let staging_directory = fixture.path("project/target/staging");

    let mut builder = Builder::new();
    let root = builder.root();
    let entry_handle = builder
        .file_add_staged(
            &root,
            &fixture.path("project/target/staging/server.env"),
            "/server.env",
            &staging_directory,
        )
        .unwrap()
        .unwrap();

    assert_eq!(
        files_list(&staging_directory).unwrap(),
        [fixture.path("project/target/staging/server.env")]
    );
    assert_eq!(
        builder.entry(&entry_handle).unwrap().source_on_disk(),
        Some(fixture.path_string("project/target/staging/server.env").as_str())
    );
}

#[test]
fn missing_staging_directory_registers_original() {
    let fixture = ProjectFixture::new().unwrap();

    let mut builder = Builder::new();
    let root = builder.root();
    let entry_handle = builder
        .file_add_staged(
            &root,
            &fixture.path("repository/a/lib.jar"),
            "/lib.jar",
            &fixture.path("project/target/missing"),
        )
        .unwrap()
        .unwrap();

    assert!(!fixture.path("project/target/missing").exists());
    assert_eq!(
        builder.entry(&entry_handle).unwrap().source_on_disk(),
        Some(fixture.path_string("repository/a/lib.jar").as_str())
    );
}

#[test]
fn missing_source_is_not_copied() {
    let fixture = ProjectFixture::new().unwrap();
    let staging_directory = fixture.path("project/target/staging");

    let mut builder = Builder::new();
    let root = builder.root();
    assert!(
        builder
            .file_add_staged(
                &root,
                &fixture.path("repository/c/lib.jar"),
                "/lib.jar",
                &staging_directory,
            )
            .unwrap()
            .is_none()
    );

    assert!(files_list(&staging_directory).unwrap().is_empty());
    assert!(builder.document_root().entries.is_empty());
}

#[test]
fn same_file_names_do_not_collide() {
    let fixture = ProjectFixture::new().unwrap();
    let staging_directory = fixture.path("project/target/staging");

    let mut builder = Builder::new();
    let root = builder.root();
    for (source, target) in [
        ("repository/a/lib.jar", "/WEB-INF/lib/a.jar"),
        ("repository/b/lib.jar", "/WEB-INF/lib/b.jar"),
    ] {
        builder
            .file_add_staged(&root, &fixture.path(source), target, &staging_directory)
            .unwrap()
            .unwrap();
    }

    let staged_files = files_list(&staging_directory).unwrap();
    assert_eq!(staged_files.len(), 2);
    assert!(
        staged_files
            .iter()
            .all(|staged_file| staged_file.file_name().unwrap() == "lib.jar")
    );
    assert_ne!(staged_files[0].parent(), staged_files[1].parent());

    // each entry points to its own copy, with its own content
    let sources = builder
        .document_root()
        .entries
        .iter()
        .map(|entry| PathBuf::from(entry.source_on_disk().unwrap()))
        .collect::<Vec<_>>();
    assert_ne!(sources[0], sources[1]);
    assert_eq!(fs::read(&sources[0]).unwrap(), b"library a");
    assert_eq!(fs::read(&sources[1]).unwrap(), b"library b");
}

#[test]
fn unusable_staging_or_parent_does_not_copy() {
    let fixture = ProjectFixture::new().unwrap();
    // staging "directory" is a file, so it is not used at all
    fixture.file_write("project/target/staging.file", b"").unwrap();

    let mut builder = Builder::new();
    let root = builder.root();
    let entry_handle = builder
        .file_add_staged(
            &root,
            &fixture.path("repository/a/lib.jar"),
            "/lib.jar",
            &fixture.path("project/target/staging.file"),
        )
        .unwrap();
    assert!(entry_handle.is_some());

    // parent that is not an archive fails before copying
    let staging_directory = fixture.path("project/target/staging");
    let error = builder
        .file_add_staged(
            &entry_handle.unwrap(),
            &fixture.path("repository/b/lib.jar"),
            "/lib.jar",
            &staging_directory,
        )
        .unwrap_err();
    assert!(error.to_string().contains("does not point to an archive"));
    assert!(files_list(&staging_directory).unwrap().is_empty());
}

#[test]
fn failed_copy_is_reported() {
    let fixture = ProjectFixture::new().unwrap();
    let staging_directory = fixture.path("project/target/staging");

    let error = staging::file_stage(&fixture.path("repository/a"), &staging_directory)
        .unwrap_err();

    let error_io = error.downcast_ref::<std::io::Error>().unwrap();
    assert_ne!(error_io.kind(), std::io::ErrorKind::NotFound);
    assert!(files_list(&staging_directory).unwrap().is_empty());
}

use loose_config_builder::{builder::Builder, descriptor, relocation::Relocation};
use loose_config_loader::loader;
use loose_config_tests::{ProjectFixture, files_list};
use test_case::test_case;

#[test_case(""; "project root without trailing separator")]
#[test_case("/"; "project root with trailing separator")]
fn sources_in_project_are_relocated(project_root_suffix: &str) {
    let fixture = ProjectFixture::new().unwrap();
    let project_root = format!("{}{}", fixture.path_string("project"), project_root_suffix);

    let mut builder =
        Builder::with_relocation(Relocation::new(project_root, "APP_ROOT".to_owned()));
    let root = builder.root();
    builder
        .dir_add(&root, &fixture.path("project/src/main/webapp"), "/")
        .unwrap()
        .unwrap();
    builder
        .file_add(
            &root,
            &fixture.path("repository/a/lib.jar"),
            "/WEB-INF/lib/a.jar",
        )
        .unwrap()
        .unwrap();

    let entries = &builder.document_root().entries;
    assert_eq!(
        entries[0].source_on_disk(),
        Some("APP_ROOT/src/main/webapp")
    );
    // outside of project root, kept literal
    assert_eq!(
        entries[1].source_on_disk(),
        Some(fixture.path_string("repository/a/lib.jar").as_str())
    );
}

#[test]
fn staged_copy_is_relocated() {
    let fixture = ProjectFixture::new().unwrap();
    let staging_directory = fixture.path("project/target/staging");

    let mut builder = Builder::with_relocation(Relocation::new(
        fixture.path_string("project"),
        "APP_ROOT".to_owned(),
    ));
    let root = builder.root();
    builder
        .file_add_staged(
            &root,
            &fixture.path("repository/a/lib.jar"),
            "/WEB-INF/lib/lib.jar",
            &staging_directory,
        )
        .unwrap()
        .unwrap();

    let staged_files = files_list(&staging_directory).unwrap();
    let staged_file_relative = staged_files[0]
        .strip_prefix(fixture.path("project"))
        .unwrap()
        .to_string_lossy()
        .into_owned();

    assert_eq!(
        builder.document_root().entries[0].source_on_disk(),
        Some(format!("APP_ROOT/{staged_file_relative}").as_str())
    );
}

#[test]
fn relocated_paths_survive_store_and_load() {
    let fixture = ProjectFixture::new().unwrap();

    let mut builder = Builder::with_relocation(Relocation::new(
        fixture.path_string("project"),
        "${server.config.dir}".to_owned(),
    ));
    let root = builder.root();
    builder
        .archive_dir_add(
            &root,
            "/module.jar",
            &fixture.path("project/module/target/classes"),
        )
        .unwrap();

    let document = descriptor::store_memory(builder.document_root()).unwrap();
    assert!(document.contains("sourceOnDisk=\"${server.config.dir}/module/target/classes\""));

    assert_eq!(&loader::load_str(&document).unwrap(), builder.document_root());
}

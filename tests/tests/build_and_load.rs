use loose_config_builder::{builder::Builder, descriptor};
use loose_config_common::entry::Entry;
use loose_config_loader::loader;
use loose_config_tests::{ProjectFixture, logger_init};

#[test]
fn builder_tree_survives_store_and_load() {
    logger_init();
    let fixture = ProjectFixture::new().unwrap();

    let mut builder = Builder::new();
    let root = builder.root();
    builder
        .dir_add(&root, &fixture.path("project/src/main/webapp"), "/")
        .unwrap()
        .unwrap();
    builder
        .file_add(
            &root,
            &fixture.path("project/target/classes/App.class"),
            "/WEB-INF/classes/App.class",
        )
        .unwrap()
        .unwrap();
    let module = builder
        .archive_add(&root, "/WEB-INF/lib/module.jar")
        .unwrap();
    builder
        .dir_add(&module, &fixture.path("project/module/target/classes"), "/")
        .unwrap()
        .unwrap();

    let output = fixture.path("project/target/app.war.xml");
    builder.store_file(&output).unwrap();

    let archive = loader::load_file(&output).unwrap();
    assert_eq!(&archive, builder.document_root());

    // element names and nesting in document order
    assert_eq!(
        archive
            .entries
            .iter()
            .map(|entry| entry.element_name())
            .collect::<Vec<_>>(),
        ["dir", "file", "archive"]
    );
    let module_entry = archive.entries[2].as_archive().unwrap();
    assert_eq!(module_entry.archive.entries.len(), 1);
    assert_eq!(
        module_entry.archive.entries[0].source_on_disk(),
        Some(fixture.path_string("project/module/target/classes").as_str())
    );
}

#[test]
fn nested_archive_contains_single_root_dir() {
    let fixture = ProjectFixture::new().unwrap();

    let mut builder = Builder::new();
    let root = builder.root();
    let war = builder.archive_add(&root, "/warA").unwrap();
    builder
        .dir_add(&war, &fixture.path("project/src/main/webapp"), "/")
        .unwrap();

    let document = descriptor::store_memory(builder.document_root()).unwrap();
    assert_eq!(
        document,
        format!(
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<archive>\n",
                "    <archive targetInArchive=\"/warA\">\n",
                "        <dir sourceOnDisk=\"{}\" targetInArchive=\"/\"/>\n",
                "    </archive>\n",
                "</archive>\n",
            ),
            fixture.path_string("project/src/main/webapp")
        )
    );

    let archive = loader::load_str(&document).unwrap();
    match &archive.entries[..] {
        [Entry::Archive(war_entry)] => {
            assert_eq!(&*war_entry.target_in_archive, "/warA");
            assert!(matches!(
                &war_entry.archive.entries[..],
                [Entry::Dir(dir_entry)] if &*dir_entry.target_in_archive == "/"
            ));
        }
        entries => panic!("unexpected entries {entries:?}"),
    }
}

#[test]
fn archive_dir_add_equals_archive_add_with_root_dir() {
    let fixture = ProjectFixture::new().unwrap();
    let module_classes = fixture.path("project/module/target/classes");

    let mut composite = Builder::new();
    let root = composite.root();
    composite
        .archive_dir_add(&root, "/module.jar", &module_classes)
        .unwrap();

    let mut separate = Builder::new();
    let root = separate.root();
    let module = separate.archive_add(&root, "/module.jar").unwrap();
    separate.dir_add(&module, &module_classes, "/").unwrap();

    assert_eq!(composite.finalize(), separate.finalize());
}

#[test]
fn skipped_sources_do_not_appear_in_document() {
    let fixture = ProjectFixture::new().unwrap();

    let mut builder = Builder::new();
    let root = builder.root();
    assert!(
        builder
            .dir_add(&root, &fixture.path("project/src/main/missing"), "/")
            .unwrap()
            .is_none()
    );
    assert!(
        builder
            .file_add(&root, &fixture.path("project/target/classes"), "/")
            .unwrap()
            .is_none()
    );

    let document = descriptor::store_memory(builder.document_root()).unwrap();
    assert_eq!(
        document,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<archive/>\n"
    );
    assert_eq!(loader::load_str(&document).unwrap().entries.len(), 0);
}

#[test]
fn store_file_fails_for_unwritable_destination() {
    let fixture = ProjectFixture::new().unwrap();
    let builder = Builder::new();

    // destination is an existing directory
    let error = builder
        .store_file(&fixture.path("project/target"))
        .unwrap_err();
    assert!(error.downcast_ref::<std::io::Error>().is_some());
}

#[test]
fn whitespace_in_names_survives_store_and_load() {
    let fixture = ProjectFixture::new().unwrap();
    fixture
        .file_write("project/web\nroot\tx/index.html", b"<html/>")
        .unwrap();

    let mut builder = Builder::new();
    let root = builder.root();
    builder
        .dir_add(&root, &fixture.path("project/web\nroot\tx"), "/static\r\nfiles")
        .unwrap()
        .unwrap();

    let document = descriptor::store_memory(builder.document_root()).unwrap();
    assert!(!document.contains('\t'));
    assert!(document.contains("web&#10;root&#9;x"));

    let archive = loader::load_str(&document).unwrap();
    assert_eq!(&archive, builder.document_root());
    assert_eq!(
        archive.entries[0].source_on_disk(),
        Some(fixture.path_string("project/web\nroot\tx").as_str())
    );
    assert_eq!(&**archive.entries[0].target_in_archive(), "/static\r\nfiles");
}

/// End-to-end integration tests for explore-index
///
/// These tests verify complete workflows: source tree → index build → search
mod common;

use std::fs;
use std::thread;
use std::time::Duration;

use common::{SourceTreeBuilder, indexed_paths, read_index, realistic_source_tree};
use explore_index::index_storage::{
    RebuildMetadata, load_extension_dictionary, load_tag_dictionary,
};
use explore_index::{
    BuildOutcome, Config, Indexer, ScanConfig, SearchFilter, init_index, read_record_at, search,
    search_from,
};

fn scan_config() -> ScanConfig {
    ScanConfig { ignore_ext: vec!["tmp".to_string()], ..ScanConfig::default() }
}

#[test]
fn test_e2e_build_indexes_every_regular_file() {
    let tree = realistic_source_tree();
    let config = scan_config();

    let outcome = Indexer::new(&config).unwrap().create(&tree.src(), &tree.data()).unwrap();
    let BuildOutcome::Rebuilt(stats) = outcome else {
        panic!("first build must not be skipped");
    };
    assert_eq!(stats.records, 6);

    let paths = indexed_paths(&tree.index_path(&config));
    assert_eq!(
        paths,
        vec![
            "/docs/README",
            "/docs/[work] report.pdf",
            "/photos/2023/[dog] IMG_0100.png",
            "/photos/2023/notes.txt",
            "/photos/2024/[cat] IMG_0002.jpg",
            "/photos/2024/[cat][beach] IMG_0001.JPG",
        ]
    );
}

#[test]
fn test_e2e_ignored_names_prune_whole_subtrees() {
    let tree = SourceTreeBuilder::new()
        .with_file("keep.txt")
        .with_file("node_modules/pkg/index.js")
        .with_file("node_modules/pkg/deep/more.js")
        .with_file("lib/node_modules/nested.js")
        .with_file("lib/code.rs")
        .build();
    let config = ScanConfig {
        ignore_name: vec!["node_modules".to_string()],
        ..ScanConfig::default()
    };

    Indexer::new(&config).unwrap().rebuild(&tree.src(), &tree.data()).unwrap();

    let paths = indexed_paths(&tree.index_path(&config));
    assert_eq!(paths, vec!["/keep.txt", "/lib/code.rs"]);
}

#[test]
fn test_e2e_records_carry_name_ext_and_tags() {
    let tree = realistic_source_tree();
    let config = scan_config();
    Indexer::new(&config).unwrap().rebuild(&tree.src(), &tree.data()).unwrap();

    let records = read_index(&tree.index_path(&config));
    let (_, photo) = records
        .iter()
        .find(|(_, r)| r.name == "[cat][beach] IMG_0001.JPG")
        .expect("photo should be indexed");
    assert_eq!(photo.ext, "jpg");
    assert_eq!(photo.tags, vec!["cat", "beach"]);

    let (_, readme) = records.iter().find(|(_, r)| r.name == "README").unwrap();
    assert_eq!(readme.ext, "");
    assert!(readme.tags.is_empty());
}

#[test]
fn test_e2e_dictionaries_cover_indexed_records_only() {
    let tree = realistic_source_tree();
    let config = scan_config();
    Indexer::new(&config).unwrap().rebuild(&tree.src(), &tree.data()).unwrap();

    let exts = load_extension_dictionary(&config.ext_list_path(&tree.data())).unwrap();
    assert_eq!(exts, vec!["", "jpg", "pdf", "png", "txt"]);
    assert!(!exts.contains(&"tmp".to_string()));

    let tags = load_tag_dictionary(&config.tag_list_path(&tree.data())).unwrap();
    assert_eq!(tags, vec!["beach", "cat", "dog", "work"]);
}

#[test]
fn test_e2e_unchanged_root_skips_rebuild() {
    let tree = realistic_source_tree();
    let indexer = Indexer::new(&scan_config()).unwrap();

    assert!(matches!(indexer.create(&tree.src(), &tree.data()).unwrap(), BuildOutcome::Rebuilt(_)));
    let index_path = tree.index_path(&scan_config());
    let before = fs::read(&index_path).unwrap();

    assert_eq!(indexer.create(&tree.src(), &tree.data()).unwrap(), BuildOutcome::Skipped);
    assert_eq!(fs::read(&index_path).unwrap(), before);
}

#[test]
fn test_e2e_changed_root_triggers_rebuild() {
    let tree = SourceTreeBuilder::new().with_file("a.txt").build();
    let config = scan_config();
    let indexer = Indexer::new(&config).unwrap();
    indexer.create(&tree.src(), &tree.data()).unwrap();

    // Keep the new modification time distinguishable on coarse-grained filesystems
    thread::sleep(Duration::from_millis(1100));
    fs::write(tree.src().join("b.txt"), "").unwrap();

    let outcome = indexer.create(&tree.src(), &tree.data()).unwrap();
    assert!(matches!(outcome, BuildOutcome::Rebuilt(ref stats) if stats.records == 2));
    assert_eq!(indexed_paths(&tree.index_path(&config)), vec!["/a.txt", "/b.txt"]);
}

#[test]
fn test_e2e_metadata_records_source_mtime() {
    let tree = realistic_source_tree();
    let config = scan_config();
    Indexer::new(&config).unwrap().create(&tree.src(), &tree.data()).unwrap();

    let metadata = RebuildMetadata::load(&config.meta_path(&tree.data()));
    assert!(metadata.create_time.is_some());
    let mtime = explore_index::index_storage::modified_time(&tree.src()).unwrap();
    assert!(metadata.is_current(mtime));
}

#[test]
fn test_e2e_rebuild_is_deterministic() {
    let tree = realistic_source_tree();
    let config = scan_config();
    let indexer = Indexer::new(&config).unwrap();

    indexer.rebuild(&tree.src(), &tree.data()).unwrap();
    let first = fs::read(tree.index_path(&config)).unwrap();
    indexer.rebuild(&tree.src(), &tree.data()).unwrap();
    let second = fs::read(tree.index_path(&config)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_e2e_ids_are_stable_byte_offsets() {
    let tree = realistic_source_tree();
    let config = scan_config();
    Indexer::new(&config).unwrap().rebuild(&tree.src(), &tree.data()).unwrap();
    let index_path = tree.index_path(&config);

    let records = read_index(&index_path);
    assert_eq!(records[0].0, 0);
    for (id, record) in &records {
        assert_eq!(&read_record_at(&index_path, *id).unwrap(), record);
    }
}

#[test]
fn test_e2e_search_is_conjunctive() {
    let tree = realistic_source_tree();
    let config = scan_config();
    Indexer::new(&config).unwrap().rebuild(&tree.src(), &tree.data()).unwrap();
    let index_path = tree.index_path(&config);

    let cats = search(&index_path, &SearchFilter::new().with_tag("cat"), None).unwrap();
    assert_eq!(cats.len(), 2);

    let filter = SearchFilter::new().with_tag("cat").with_name("0002");
    let hits = search(&index_path, &filter, None).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record.path, "/photos/2024/[cat] IMG_0002.jpg");

    let filter = SearchFilter::new().with_tag("cat").with_ext("png");
    assert!(search(&index_path, &filter, None).unwrap().is_empty());

    let all = search(&index_path, &SearchFilter::new(), None).unwrap();
    assert_eq!(all.len(), 6);
}

#[test]
fn test_e2e_search_pages_cover_all_matches() {
    let mut builder = SourceTreeBuilder::new();
    for i in 0..25 {
        builder = builder.with_file(&format!("dir/file_{:02}.txt", i));
    }
    let tree = builder.build();
    let config = scan_config();
    Indexer::new(&config).unwrap().rebuild(&tree.src(), &tree.data()).unwrap();
    let index_path = tree.index_path(&config);
    let filter = SearchFilter::new().with_ext("txt");

    let mut collected = Vec::new();
    let mut start = 0;
    loop {
        let page = search_from(&index_path, &filter, Some(10), start).unwrap();
        assert!(page.entries.len() <= 10);
        collected.extend(page.entries);
        match page.next_offset {
            Some(next) => start = next,
            None => break,
        }
    }

    let unpaged = search(&index_path, &filter, None).unwrap();
    assert_eq!(collected, unpaged);
    assert_eq!(collected.len(), 25);
}

#[test]
fn test_e2e_data_root_nested_in_source_root() {
    let tree = SourceTreeBuilder::new().with_file("a.txt").with_file("photos/[cat] b.jpg").build();
    let config = Config {
        src_root: tree.src(),
        data_root: tree.src().join("data"),
        scan: ScanConfig::default(),
    };

    assert!(matches!(init_index(&config).unwrap(), BuildOutcome::Rebuilt(_)));
    assert_eq!(init_index(&config).unwrap(), BuildOutcome::Skipped);
    assert_eq!(indexed_paths(&config.index_path()), vec!["/a.txt", "/photos/[cat] b.jpg"]);
}

#[test]
fn test_e2e_init_index_uses_config_roots() {
    let tree = realistic_source_tree();
    let config = Config { src_root: tree.src(), data_root: tree.data(), scan: scan_config() };

    let outcome = init_index(&config).unwrap();
    assert!(matches!(outcome, BuildOutcome::Rebuilt(_)));
    assert!(config.index_path().exists());
    assert_eq!(init_index(&config).unwrap(), BuildOutcome::Skipped);
}

mod common;

use common::TestTree;
use scrubber_lib::clean::PermanentBackend;
use scrubber_lib::{
    find_duplicates, load_json_report, scan, scan_directory, select_auto_clean, top_files,
    write_json_report, Category, Classifier, DeleteOptions, DeleteOutcome, Deleter,
    DuplicateDetector, FileRecord, HashAlgorithm, ScanOptions, ScriptedPrompter,
};

#[test]
fn test_temp_file_classified_temp() {
    let tree = TestTree::new();
    tree.file("test.tmp", b"hello");

    let records = scan(tree.root(), &ScanOptions::default()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(Classifier::default().classify(&records[0]), Category::Temp);
}

#[test]
fn test_node_modules_selected_for_auto_clean() {
    let tree = TestTree::new();
    tree.file("node_modules/m/file.js", b"console.log('x')");
    tree.file("keep/keep.txt", b"stay");

    let records = scan(tree.root(), &ScanOptions::default()).unwrap();
    let candidates = select_auto_clean(&records);

    assert!(candidates
        .iter()
        .any(|r| r.path.to_string_lossy().contains("node_modules")));
    assert!(candidates.len() <= records.len());
}

#[test]
fn test_duplicates_and_top_files() {
    let tree = TestTree::new();
    tree.file("a.txt", b"same");
    tree.file("b.txt", b"same");
    tree.sized_file("big.bin", 10240);
    tree.file("empty1", b"");
    tree.file("empty2", b"");

    let records = scan(tree.root(), &ScanOptions::default()).unwrap();

    let groups = find_duplicates(&records, HashAlgorithm::Blake3);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert!(groups[0].files.iter().all(|f| f.size == 4));
    assert_eq!(groups[0].hash.len(), HashAlgorithm::Blake3.hex_len());

    let top = top_files(&records, 1);
    assert_eq!(top.len(), 1);
    assert!(top[0].size >= 10240);
}

#[test]
fn test_duplicate_members_share_hash() {
    let tree = TestTree::new();
    tree.file("x/one.dat", b"payload");
    tree.file("y/two.dat", b"payload");
    tree.file("z/three.dat", b"payload");
    tree.file("z/other.dat", b"PAYLOAD");

    let records = scan(tree.root(), &ScanOptions::default()).unwrap();
    let mut detector = DuplicateDetector::new(HashAlgorithm::Md5);
    let groups = detector.find_duplicates(&records);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);
    for file in &groups[0].files {
        assert_eq!(detector.cached_hash(&file.path), Some(groups[0].hash.as_str()));
    }
    assert_eq!(detector.stats().wasted_bytes, 14);
}

#[test]
fn test_permanent_delete_with_confirm() {
    let tree = TestTree::new();
    let path = tree.file("trash.txt", b"deleteme");

    let records = scan(tree.root(), &ScanOptions::default()).unwrap();
    let refs: Vec<&FileRecord> = records.iter().collect();
    let deleter = Deleter::new(Box::new(PermanentBackend));
    let options = DeleteOptions {
        confirm: true,
        interactive: false,
    };

    let report = deleter
        .delete(&refs, options, &mut ScriptedPrompter::default())
        .unwrap();

    assert!(!path.exists());
    assert_eq!(report.outcome_for(&records[0].path), Some(&DeleteOutcome::Removed));
    assert_eq!(report.removed_count(), 1);
}

#[test]
fn test_declined_confirmation_keeps_files() {
    let tree = TestTree::new();
    tree.file("a.tmp", b"1");
    tree.file("b.tmp", b"2");

    let records = scan(tree.root(), &ScanOptions::default()).unwrap();
    let candidates = select_auto_clean(&records);
    let deleter = Deleter::new(Box::new(PermanentBackend));
    let mut prompter = ScriptedPrompter::new([false]);

    let report = deleter
        .delete(&candidates, DeleteOptions::default(), &mut prompter)
        .unwrap();

    assert!(report.aborted);
    assert_eq!(prompter.asked().len(), 1);
    assert!(records.iter().all(|r| r.path.exists()));
}

#[test]
fn test_json_report_round_trip_with_hashes() {
    let tree = TestTree::new();
    tree.file("data/a.txt", b"same");
    tree.file("data/b.txt", b"same");
    tree.file("data/c.log", b"unique content");

    let outcome = scan_directory(tree.root(), &ScanOptions::default()).unwrap();
    let mut detector = DuplicateDetector::new(HashAlgorithm::Blake3);
    detector.find_duplicates(&outcome.records);

    let out = tree.root().join("report.json");
    write_json_report(&out, &outcome.root, &outcome.records, detector.hashes()).unwrap();

    let loaded = load_json_report(&out).unwrap();
    assert_eq!(loaded.schema_version, 1);
    assert_eq!(loaded.files.len(), 3);

    let hashed: Vec<_> = loaded.files.iter().filter(|e| !e.hash.is_empty()).collect();
    assert_eq!(hashed.len(), 2);
    assert!(loaded
        .files
        .iter()
        .all(|e| e.size == std::fs::metadata(&e.path).unwrap().len()));
}

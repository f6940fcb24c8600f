mod common;

use std::fs;

use tempfile::TempDir;

use sspatcher::layout::{NUM_WT, WT_DATA_LENGTH};
use sspatcher::{SortMode, SsPatcherError, load_wavetables, sanitize_name};

use common::{numbered_names, write_tables};

#[test]
fn test_lexicographic_order() {
    let dir = TempDir::new().unwrap();
    let names = numbered_names("wt", NUM_WT);
    let tables = write_tables(dir.path(), &names, 1);

    let set = load_wavetables(dir.path(), SortMode::Lexicographic).unwrap();
    assert_eq!(set.len(), NUM_WT);

    let mut expected: Vec<&String> = names.iter().collect();
    expected.sort();
    let loaded: Vec<String> = set.names().map(|n| n.to_string().trim().to_string()).collect();
    assert_eq!(loaded, expected.iter().map(|s| s.as_str()).collect::<Vec<_>>());

    // wt0, wt1, wt10, ...
    assert_eq!(set.names().nth(2).unwrap().as_bytes(), b"  wt10");
    let wt10 = sanitize_name("wt10").unwrap();
    assert_eq!(&set.get(&wt10).unwrap()[..], &tables[10][..]);
}

#[test]
fn test_index_prefix_order() {
    let dir = TempDir::new().unwrap();
    // letters run backwards so neither filename nor name order matches index order
    let stripped: Vec<String> = (0..NUM_WT)
        .map(|i| format!("{}{i}", char::from(b'z' - (i % 26) as u8)))
        .collect();
    let names: Vec<String> = stripped
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{i}_{name}"))
        .collect();
    let tables = write_tables(dir.path(), &names, 2);

    let set = load_wavetables(dir.path(), SortMode::IndexPrefix).unwrap();
    for (((name, table), expected_name), expected_table) in set.iter().zip(&stripped).zip(&tables) {
        assert_eq!(*name, sanitize_name(expected_name).unwrap());
        assert_eq!(&table[..], &expected_table[..]);
    }
    assert_eq!(set.names().nth(10).unwrap().as_bytes(), b"   p10");
}

#[test]
fn test_index_prefix_requires_prefix() {
    let dir = TempDir::new().unwrap();
    let mut names: Vec<String> = (0..NUM_WT - 1).map(|i| format!("{i}_wt")).collect();
    names.push("unprefixed".to_string());
    write_tables(dir.path(), &names, 3);

    let err = load_wavetables(dir.path(), SortMode::IndexPrefix).unwrap_err();
    assert!(matches!(err, SsPatcherError::Format(ref msg) if msg.contains("unprefixed")));
}

#[test]
fn test_nonexistent_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("ajsdhfkjbvkjqebnqg");
    let err = load_wavetables(&missing, SortMode::Lexicographic).unwrap_err();
    assert!(matches!(err, SsPatcherError::DirectoryNotFound(_)));
    assert!(err.to_string().contains("doesn't exist or isn't a directory"));

    let file = dir.path().join("file");
    fs::write(&file, b"x").unwrap();
    assert!(matches!(
        load_wavetables(&file, SortMode::Lexicographic),
        Err(SsPatcherError::DirectoryNotFound(_))
    ));
}

#[test]
fn test_wrong_size() {
    let dir = TempDir::new().unwrap();
    let names = numbered_names("wt", NUM_WT);
    write_tables(dir.path(), &names, 4);

    for len in [0, 1, WT_DATA_LENGTH - 1, WT_DATA_LENGTH + 1, WT_DATA_LENGTH * 2] {
        let victim = dir.path().join("wt17.raw");
        fs::write(&victim, vec![0x55; len]).unwrap();

        match load_wavetables(dir.path(), SortMode::Lexicographic) {
            Err(SsPatcherError::WrongSize { name, expected, actual }) => {
                assert_eq!(name, "wt17");
                assert_eq!(expected, WT_DATA_LENGTH);
                assert_eq!(actual, len);
            }
            other => panic!("length {len}: unexpected result {other:?}"),
        }
    }
}

#[test]
fn test_wrong_number_of_tables() {
    for count in [0, 1, NUM_WT - 1, NUM_WT + 1, NUM_WT * 2] {
        let dir = TempDir::new().unwrap();
        write_tables(dir.path(), &numbered_names("wt", count), 5);

        match load_wavetables(dir.path(), SortMode::Lexicographic) {
            Err(SsPatcherError::WrongCount { expected, actual }) => {
                assert_eq!(expected, NUM_WT);
                assert_eq!(actual, count);
            }
            other => panic!("{count} files: unexpected result {other:?}"),
        }
    }
}

#[test]
fn test_duplicate_raw_names() {
    let dir = TempDir::new().unwrap();
    write_tables(dir.path(), &numbered_names("wt", NUM_WT - 1), 6);
    fs::copy(dir.path().join("wt3.raw"), dir.path().join("wt3.bin")).unwrap();

    let err = load_wavetables(dir.path(), SortMode::Lexicographic).unwrap_err();
    assert!(matches!(err, SsPatcherError::DuplicateName { ref name } if name == "wt3"));
}

#[test]
fn test_duplicate_sanitized_names() {
    let dir = TempDir::new().unwrap();
    // "{i}wtwtwt" truncates to "wtwtwt" for every i
    let names: Vec<String> = (0..NUM_WT).map(|i| format!("{i}wtwtwt")).collect();
    write_tables(dir.path(), &names, 7);

    let err = load_wavetables(dir.path(), SortMode::Lexicographic).unwrap_err();
    assert!(matches!(err, SsPatcherError::DuplicateName { ref name } if name == "wtwtwt"));
}

#[test]
fn test_invalid_character_in_filename() {
    let dir = TempDir::new().unwrap();
    let mut names = numbered_names("wt", NUM_WT - 1);
    names.push("a-b".to_string());
    write_tables(dir.path(), &names, 8);

    let err = load_wavetables(dir.path(), SortMode::Lexicographic).unwrap_err();
    assert!(matches!(err, SsPatcherError::InvalidCharacter { character: '-', .. }));
}

#[test]
fn test_os_artifacts_and_subdirectories_ignored() {
    let dir = TempDir::new().unwrap();
    write_tables(dir.path(), &numbered_names("wt", NUM_WT), 9);
    fs::write(dir.path().join(".DS_Store"), b"junk").unwrap();
    fs::write(dir.path().join("Thumbs.db"), b"junk").unwrap();
    fs::create_dir(dir.path().join("backup")).unwrap();

    let set = load_wavetables(dir.path(), SortMode::Lexicographic).unwrap();
    assert_eq!(set.len(), NUM_WT);
}

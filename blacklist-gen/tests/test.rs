use std::fs;
use std::path::Path;

use blacklist_gen::config::{GeneratorConfig, Vocabulary, DOMAIN_PREFIX_LEN, MAX_HIT_COUNT};
use blacklist_gen::error::GenError;
use blacklist_gen::generator::RowGenerator;
use blacklist_gen::record::{Category, Record};
use blacklist_gen::writer::{generate_table, write_table};
use csv::ReaderBuilder;
use tempfile::tempdir;

fn read_records(path: &Path) -> Vec<Record> {
    let mut reader = ReaderBuilder::new().from_path(path).unwrap();
    reader.deserialize().map(Result::unwrap).collect()
}

#[test]
fn test_three_rows_scenario() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("blacklist_data.csv");
    let config = GeneratorConfig::new(3, &output).with_seed(Some(2024));

    let summary = generate_table(&config).unwrap();
    assert_eq!(summary.rows_written, 3);

    let contents = fs::read_to_string(&output).unwrap();
    assert_eq!(summary.bytes_written, contents.len() as u64);
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "name,domain,reason,category,hit_count");

    let records = read_records(&output);
    assert!(records[0].domain.ends_with("1.com"));
    assert!(records[1].domain.ends_with("2.com"));
    assert!(records[2].domain.ends_with("3.com"));
}

#[test]
fn test_zero_rows_is_header_only() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("empty.csv");
    let summary = generate_table(&GeneratorConfig::new(0, &output)).unwrap();

    assert_eq!(summary.rows_written, 0);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "name,domain,reason,category,hit_count\n"
    );
}

#[test]
fn test_line_count_and_field_ranges() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("rows.csv");
    let config = GeneratorConfig::new(1000, &output).with_seed(Some(1));
    generate_table(&config).unwrap();

    let contents = fs::read_to_string(&output).unwrap();
    assert_eq!(contents.lines().count(), 1001);

    for (i, record) in read_records(&output).iter().enumerate() {
        let suffix = format!("{}.com", i + 1);
        let prefix = record.domain.strip_suffix(&suffix).unwrap();
        assert!(DOMAIN_PREFIX_LEN.contains(&prefix.len()));
        assert!(prefix.chars().all(|c| c.is_ascii_lowercase()));
        assert!(Category::ALL.contains(&record.category));
        assert!(record.hit_count <= MAX_HIT_COUNT);
    }
}

#[test]
fn test_round_trip() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("round_trip.csv");
    let config = GeneratorConfig::new(200, &output).with_seed(Some(7));

    let expected: Vec<Record> = RowGenerator::new(&config.vocabulary, config.rng())
        .unwrap()
        .generate_all(config.rows)
        .collect();
    write_table(expected.clone(), &output).unwrap();

    assert_eq!(read_records(&output), expected);
}

#[test]
fn test_same_seed_is_byte_identical() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    generate_table(&GeneratorConfig::new(500, &first).with_seed(Some(99))).unwrap();
    generate_table(&GeneratorConfig::new(500, &second).with_seed(Some(99))).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_unseeded_runs_are_structurally_equal() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    generate_table(&GeneratorConfig::new(50, &first)).unwrap();
    generate_table(&GeneratorConfig::new(50, &second)).unwrap();

    let first = read_records(&first);
    let second = read_records(&second);
    assert_eq!(first.len(), 50);
    assert_eq!(second.len(), 50);
    for (a, b) in first.iter().zip(&second) {
        let a_index = a.domain.trim_start_matches(|c: char| c.is_ascii_lowercase());
        let b_index = b.domain.trim_start_matches(|c: char| c.is_ascii_lowercase());
        assert_eq!(a_index, b_index);
    }
}

#[test]
fn test_existing_file_is_truncated() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("existing.csv");
    fs::write(&output, "stale\n".repeat(100)).unwrap();

    generate_table(&GeneratorConfig::new(2, &output)).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 3);
}

#[test]
fn test_unwritable_destination() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing").join("out.csv");
    let res = generate_table(&GeneratorConfig::new(10, &output));

    assert!(matches!(res, Err(GenError::IoError(_))));
    assert!(!output.exists());
}

#[test]
fn test_custom_vocabulary() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("custom.csv");
    let vocabulary = Vocabulary {
        first_names: vec!["Grace".to_string()],
        last_names: vec!["Hopper".to_string()],
        reasons: vec!["Botnet, command and control".to_string()],
    };
    let config = GeneratorConfig::new(20, &output)
        .with_seed(Some(3))
        .with_vocabulary(vocabulary);
    generate_table(&config).unwrap();

    let records = read_records(&output);
    assert_eq!(records.len(), 20);
    for record in records {
        assert_eq!(record.name, "Grace Hopper");
        assert_eq!(record.reason, "Botnet, command and control");
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_write_to_fifo() {
    use std::os::unix::fs::FileTypeExt;
    use std::process::Command;
    use std::thread;

    let dir = tempdir().unwrap();
    let fifo = dir.path().join("pipe.csv");
    let status = Command::new("mkfifo").arg(&fifo).status().unwrap();
    assert!(status.success());

    let reader_path = fifo.clone();
    let reader = thread::spawn(move || fs::read_to_string(reader_path).unwrap());
    let summary = generate_table(&GeneratorConfig::new(3, &fifo).with_seed(Some(5))).unwrap();
    let received = reader.join().unwrap();

    assert_eq!(summary.rows_written, 3);
    assert_eq!(summary.bytes_written, received.len() as u64);
    assert_eq!(received.lines().count(), 4);
    assert!(fs::symlink_metadata(&fifo).unwrap().file_type().is_fifo());
}

#[cfg(target_os = "linux")]
#[test]
fn test_failed_write_leaves_device_in_place() {
    let full = Path::new("/dev/full");
    if !full.exists() {
        return;
    }
    let dir = tempdir().unwrap();
    let link = dir.path().join("full.csv");
    std::os::unix::fs::symlink(full, &link).unwrap();

    let res = generate_table(&GeneratorConfig::new(1000, &link));
    assert!(res.is_err());
    assert!(full.exists());
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
}

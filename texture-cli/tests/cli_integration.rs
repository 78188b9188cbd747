//! Integration tests for the texture CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SONNET: [(&str, &str); 4] = [
    ("first.txt", "Shall I compare thee to a summer's day?"),
    ("second.txt", "Thou art more lovely and more temperate."),
    ("third.txt", "Rough winds do shake the darling buds of May,"),
    ("fourth.txt", "And summer's lease hath all too short a date."),
];

const HAMLET: &str = r#"[
    {"type": "character", "name": "Hamlet", "gender": "male", "short": "Ham"},
    {"type": "location", "act": 1, "scene": 2, "text": "A room of state in the castle."},
    {"type": "speech", "act": 1, "scene": 2, "speaker": "Claudius", "text": "But now, my cousin Hamlet, and my son"},
    {"type": "speech", "act": 1, "scene": 2, "speaker": "Hamlet", "text": "A little more than kin, and less than kind."},
    {"type": "speech", "act": 3, "scene": 1, "speaker": "Hamlet", "text": "To be, or not to be, that is the question"}
]"#;

fn write_sonnet(dir: &Path) -> String {
    for (name, text) in SONNET {
        fs::write(dir.join(name), text).unwrap();
    }
    format!("{}/*.txt", dir.display())
}

fn texture() -> Command {
    Command::cargo_bin("texture").unwrap()
}

#[test]
fn test_chunk_first_chunk_label_and_tokens() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a"), SONNET[0].1).unwrap();

    texture()
        .arg("chunk")
        .arg("-i")
        .arg(temp_dir.path().join("a"))
        .arg("--size")
        .arg("4")
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("a_0000\tshall i compare thee\n"))
        .stdout(predicate::str::contains("a_0001\tto a summer s\n"));
}

#[test]
fn test_chunk_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = write_sonnet(temp_dir.path());

    let output = texture()
        .args(["chunk", "-i", &pattern, "--n-chunks", "2", "-f", "json", "-q"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 8);
    assert_eq!(items[0]["label"], "first.txt_0000");
}

#[test]
fn test_chunk_small_texts_kept_whole() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = write_sonnet(temp_dir.path());

    texture()
        .args(["chunk", "-i", &pattern, "--size", "10", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "first.txt\tshall i compare thee to a summer s day\n",
        ))
        .stdout(predicate::str::contains("fourth.txt_0000\t"));
}

#[test]
fn test_chunk_small_texts_dropped_with_min_size() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = write_sonnet(temp_dir.path());

    texture()
        .args(["chunk", "-i", &pattern, "--size", "10", "--min-size", "-q"])
        .assert()
        .success()
        .stdout("fourth.txt_0000\tand summer s lease hath all too short a date\n");
}

#[test]
fn test_chunk_small_texts_upscaled_with_seed() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = write_sonnet(temp_dir.path());
    let args = [
        "chunk", "-i", &pattern, "--size", "10", "--upscale", "--seed", "7", "-q",
    ];

    let output = texture().args(args).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let line = stdout
        .lines()
        .find(|line| line.starts_with("first.txt\t"))
        .unwrap();
    let tokens: Vec<&str> = line["first.txt\t".len()..].split(' ').collect();
    assert_eq!(tokens.len(), 10);
    let pool = ["shall", "i", "compare", "thee", "to", "a", "summer", "s", "day"];
    assert!(tokens.iter().all(|token| pool.contains(token)));
    assert!(stdout.contains("fourth.txt_0000\t"));

    let again = texture().args(args).output().unwrap();
    assert_eq!(String::from_utf8(again.stdout).unwrap(), stdout);
}

#[test]
fn test_chunk_requires_sizing() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = write_sonnet(temp_dir.path());

    texture()
        .args(["chunk", "-i", &pattern, "-q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--size or --n-chunks"));
}

#[test]
fn test_chunk_reads_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = write_sonnet(temp_dir.path());
    let config = temp_dir.path().join("texture.toml");
    fs::write(&config, "[chunk]\nsize = 3\noverlap = 1\n").unwrap();

    texture()
        .args(["chunk", "-i", &pattern, "-q", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("first.txt_0000\tshall i compare\n"))
        .stdout(predicate::str::contains("first.txt_0001\tcompare thee to\n"));
}

#[test]
fn test_show_with_stopwords() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = write_sonnet(temp_dir.path());
    let stop = temp_dir.path().join("stop.lst");
    fs::write(&stop, "the\nof\ndo\n").unwrap();

    texture()
        .args(["show", "-i", &pattern, "--tokenize", "-q", "--stopwords"])
        .arg(&stop)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "third.txt\trough winds shake darling buds may\n",
        ));
}

#[test]
fn test_show_summary() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = write_sonnet(temp_dir.path());

    texture()
        .args(["show", "-i", &pattern, "--summary", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No. of texts: 4"))
        .stdout(predicate::str::contains("Keep in Memory: false"));
}

#[test]
fn test_extract_speaker_attributed() {
    let temp_dir = TempDir::new().unwrap();
    let play = temp_dir.path().join("hamlet.json");
    fs::write(&play, HAMLET).unwrap();

    texture()
        .arg("extract")
        .arg("-i")
        .arg(&play)
        .args(["--speaker", "Hamlet", "--attributed", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "hamlet.json\tHamlet: A little more than kin, and less than kind.\n",
        ))
        .stdout(predicate::str::contains("Claudius").not());
}

#[test]
fn test_extract_tokenized_act() {
    let temp_dir = TempDir::new().unwrap();
    let play = temp_dir.path().join("hamlet.json");
    fs::write(&play, HAMLET).unwrap();

    texture()
        .arg("extract")
        .arg("-i")
        .arg(&play)
        .args(["--act", "3", "--tokenize", "-q"])
        .assert()
        .success()
        .stdout("hamlet.json\tto be or not to be that is the question\n");
}

#[test]
fn test_extract_malformed_play_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("hamlet.json"), HAMLET).unwrap();
    fs::write(temp_dir.path().join("torn.json"), "{ not a play").unwrap();
    let pattern = format!("{}/*.json", temp_dir.path().display());

    texture()
        .args(["extract", "-i", &pattern, "--speaker", "Claudius", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "hamlet.json\tBut now, my cousin Hamlet, and my son\n",
        ))
        .stdout(predicate::str::contains("torn.json\t\n"));
}

#[test]
fn test_no_matching_input() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.txt", temp_dir.path().display());

    texture()
        .args(["show", "-i", &pattern, "-q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found matching"));
}

#[test]
fn test_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = write_sonnet(temp_dir.path());
    let out = temp_dir.path().join("out.json");

    texture()
        .args(["show", "-i", &pattern, "-f", "json", "-q", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value[1]["label"], "fourth.txt");
}

mod common;

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

use common::{reviews, write_tsv};

fn sentiment(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sentiment"))
        .args(args)
        .current_dir(cwd)
        .output()
        .unwrap()
}

#[test]
fn test_train_then_predict() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_tsv(temp_dir.path(), "reviews.tsv", &reviews(12));
    let model = temp_dir.path().join("reviews.model");

    let output = sentiment(
        &[
            "train",
            "--data",
            data.to_str().unwrap(),
            "--folds",
            "4",
            "--seed",
            "3",
            "--model",
            model.to_str().unwrap(),
        ],
        temp_dir.path(),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Accuracy: "));
    assert!(stdout.contains("AUC: "));
    assert!(stdout.contains("F1 Score: "));
    assert!(model.exists());

    let output = sentiment(
        &[
            "predict",
            "--model",
            model.to_str().unwrap(),
            "This is excellent!",
            "This is an awful!",
        ],
        temp_dir.path(),
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("This is excellent! | positive | "));
    assert!(lines[1].starts_with("This is an awful! | "));
}

#[test]
fn test_exit_codes() {
    let temp_dir = TempDir::new().unwrap();

    let output = sentiment(&["train", "--data", "absent.tsv"], temp_dir.path());
    assert_eq!(output.status.code(), Some(2));

    let broken = temp_dir.path().join("broken.tsv");
    std::fs::write(&broken, "Sentiment\tLabel\nGood\tmaybe\n").unwrap();
    let output = sentiment(&["train", "--data", broken.to_str().unwrap()], temp_dir.path());
    assert_eq!(output.status.code(), Some(2));

    let tiny = write_tsv(temp_dir.path(), "tiny.tsv", &reviews(2));
    let output = sentiment(&["train", "--data", tiny.to_str().unwrap()], temp_dir.path());
    assert_eq!(output.status.code(), Some(3));
    // Nothing is persisted when training fails.
    assert!(!temp_dir.path().join("sentiment.model").exists());

    let output = sentiment(&["predict", "--model", "missing.model", "hello"], temp_dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_predict_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_tsv(temp_dir.path(), "reviews.tsv", &reviews(10));

    let output = sentiment(&["train", "--data", data.to_str().unwrap()], temp_dir.path());
    assert!(output.status.success());

    let output = sentiment(&["--format", "json", "predict", "Great food"], temp_dir.path());
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["predictions"][0]["input_text"], "Great food");
    let probability = value["predictions"][0]["probability"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&probability));
}

#[test]
fn test_demo_scores_builtin_opinions() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_tsv(temp_dir.path(), "reviews.tsv", &reviews(12));

    let output = sentiment(&["demo", "--data", data.to_str().unwrap()], temp_dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Text | Prediction | Probability"));
    assert!(stdout.contains("This was like the final blow! | "));
    assert!(!temp_dir.path().join("sentiment.model").exists());
}

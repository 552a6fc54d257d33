use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use fcal::FcalError;
use fcal_cli::{Args, Emit};

fn samples_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../samples")
}

/// Collects all .fcal files from a directory
fn collect_fcal_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("fcal")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: &Path, emit: Emit) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: Some(output.to_string_lossy().to_string()),
        emit,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let samples = collect_fcal_files(samples_dir());
    assert!(!samples.is_empty(), "No samples found in samples/");

    let mut failed = Vec::new();

    for sample in &samples {
        let stem = sample.file_stem().unwrap().to_string_lossy().to_string();
        let output_path = temp_dir.path().join(format!("{stem}.cpp"));

        match fcal_cli::run(&args_for(sample, &output_path, Emit::Cpp)) {
            Ok(()) => {
                let cpp = fs::read_to_string(&output_path).expect("output written");
                assert!(cpp.contains("#include \"Matrix.h\""), "{stem}: missing preamble");
                assert!(cpp.contains("main () {"), "{stem}: missing program header");
            }
            Err(err) => failed.push((sample.clone(), err)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nSamples that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} sample(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_canonical_output_reparses() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    for sample in collect_fcal_files(samples_dir()) {
        let stem = sample.file_stem().unwrap().to_string_lossy().to_string();
        let first = temp_dir.path().join(format!("{stem}.1.fcal"));
        let second = temp_dir.path().join(format!("{stem}.2.fcal"));

        fcal_cli::run(&args_for(&sample, &first, Emit::Fcal)).expect("canonical form");
        fcal_cli::run(&args_for(&first, &second, Emit::Fcal)).expect("canonical form reparses");

        assert_eq!(
            fs::read_to_string(&first).unwrap(),
            fs::read_to_string(&second).unwrap(),
            "{stem}: canonical form is not stable"
        );
    }
}

#[test]
fn e2e_smoke_test_error_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_samples = collect_fcal_files(samples_dir().join("errors"));
    assert!(
        !error_samples.is_empty(),
        "No error samples found in samples/errors/"
    );

    for sample in &error_samples {
        let stem = sample.file_stem().unwrap().to_string_lossy().to_string();
        let output_path = temp_dir.path().join(format!("{stem}.cpp"));

        match fcal_cli::run(&args_for(sample, &output_path, Emit::Cpp)) {
            Err(FcalError::Parse { err, src }) => {
                assert!(err.diagnostic().primary_span().is_some(), "{stem}");
                assert!(!src.is_empty());
            }
            Err(other) => panic!("{stem}: expected a parse error, got {other}"),
            Ok(()) => panic!("{stem}: succeeded unexpectedly"),
        }
        assert!(!output_path.exists(), "{stem}: output written despite error");
    }
}

#[test]
fn e2e_missing_input_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("missing.fcal");
    let output = temp_dir.path().join("missing.cpp");

    let result = fcal_cli::run(&args_for(&missing, &output, Emit::Cpp));
    assert!(matches!(result, Err(FcalError::Io(_))));
}

#[test]
fn e2e_explicit_config_changes_header() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("fcal.toml");
    fs::write(&config_path, "[target]\nruntime_header = \"rt/Matrix.hpp\"\n").unwrap();

    let output = temp_dir.path().join("product.cpp");
    let mut args = args_for(
        &samples_dir().join("matrix_product.fcal"),
        &output,
        Emit::Cpp,
    );
    args.config = Some(config_path.to_string_lossy().to_string());

    fcal_cli::run(&args).expect("translation succeeds");
    let cpp = fs::read_to_string(&output).unwrap();
    assert!(cpp.contains("#include \"rt/Matrix.hpp\"\n"));
}

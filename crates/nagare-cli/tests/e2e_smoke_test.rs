use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use nagare::NagareError;
use nagare_cli::{Args, run};

fn demos_dir() -> PathBuf {
    // Demos are at workspace root, relative to workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos")
}

/// Collects all .ngr files from a directory
fn collect_ngr_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(&dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("ngr")
                })
                .collect()
        })
        .unwrap_or_default();

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        width: None,
        height: None,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_ngr_files(demos_dir());
    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed = Vec::new();
    for demo in &demos {
        let output = temp_dir.path().join(format!(
            "{}.json",
            demo.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args_for(demo, &output)) {
            Ok(layout) => {
                let written = fs::read_to_string(&output).expect("output written");
                let json: serde_json::Value = serde_json::from_str(&written).expect("valid JSON");
                assert_eq!(
                    json["components"].as_array().map(Vec::len),
                    Some(layout.components().len())
                );
                assert!(
                    layout.diagnostics().is_empty(),
                    "{} produced warnings: {:?}",
                    demo.display(),
                    layout.diagnostics()
                );
            }
            Err(err) => failed.push((demo.clone(), err)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_ngr_files(demos_dir().join("errors"));
    assert!(!demos.is_empty(), "No error demos found in demos/errors/");

    for demo in &demos {
        let output = temp_dir.path().join("error.json");
        let result = run(&args_for(demo, &output));

        assert!(
            matches!(result, Err(NagareError::Parse { .. })),
            "{} should fail to parse",
            demo.display()
        );
        assert!(!output.exists(), "no output for {}", demo.display());
    }
}

#[test]
fn test_config_file_and_flags() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("diagram.ngr");
    let output = dir.path().join("diagram.json");
    let config = dir.path().join("config.toml");

    fs::write(&input, "a\nb\n@b(x: 300, y: 200)\na.e --> b.n").unwrap();
    fs::write(
        &config,
        "[layout]\ncanvas_width = 1000\ncanvas_height = 500\n\n[routing]\nelbow_padding = 40\n",
    )
    .unwrap();

    let mut args = args_for(&input, &output);
    args.config = Some(config.to_string_lossy().to_string());
    args.height = Some(640.0);

    let layout = run(&args).expect("run succeeds");
    assert_eq!(layout.bounds().width(), 1000.0);
    assert_eq!(layout.bounds().height(), 640.0);

    // a.e sits at (120, 30); the elbow turns 40 units to the right
    let bends = layout.connections()[0].bends();
    assert_eq!(bends[0].x(), 160.0);
}

#[test]
fn test_degraded_layout_still_writes_output() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("diagram.ngr");
    let output = dir.path().join("diagram.json");
    fs::write(&input, "a\na.e --> ghost.w\n@a(x: &nowhere.c)").unwrap();

    let layout = run(&args_for(&input, &output)).expect("run succeeds");
    assert_eq!(layout.diagnostics().len(), 2);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["diagnostics"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("diagram.ngr");
    fs::write(&input, "a").unwrap();

    let mut args = args_for(&input, &dir.path().join("out.json"));
    args.config = Some(dir.path().join("absent.toml").to_string_lossy().to_string());

    assert!(matches!(run(&args), Err(NagareError::Config(_))));
}

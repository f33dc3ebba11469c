// SPDX-License-Identifier: MPL-2.0
use image_versioning::config::{self, Config};
use image_versioning::domain::history::{
    FilterAction, FilterCategory, HistoryImageType, ImageHistory,
};
use image_versioning::domain::versioning::{
    Counter, EditorClosingMode, PrimaryTask, Task, VersionFileInfo,
};
use image_versioning::filters::RAW_CONVERTER_IDENTIFIER;
use image_versioning::naming::{DefaultVersionNamingScheme, ParsedName, VersionNamingScheme};
use image_versioning::report::OperationReport;
use image_versioning::version_manager::{FileNameType, VersionManager};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn directory_with(names: &[&str]) -> TempDir {
    let dir = tempdir().expect("Failed to create temporary directory");
    for name in names {
        fs::write(dir.path().join(name), b"image").expect("Failed to write test file");
    }
    dir
}

fn original_only() -> ImageHistory {
    ImageHistory::new().with_referred_image(HistoryImageType::Original)
}

fn manager_from_settings_file(config_dir: &Path, content: &str) -> VersionManager {
    fs::write(config_dir.join("settings.toml"), content).expect("Failed to write config file");
    let (config, warning) = config::load_with_override(Some(config_dir.to_path_buf()));
    assert!(warning.is_none(), "config should load cleanly");
    VersionManager::with_settings(config.version_settings())
}

#[test]
fn version_names_round_trip_through_base_name() {
    let scheme = DefaultVersionNamingScheme;
    let dir = Path::new("/photos");

    for version in [1, 2, 17, 400] {
        let counter = Counter::new(version);
        let name = scheme.version_file_name(dir, "IMG_0042", counter);
        assert_eq!(
            scheme.base_name(dir, &name),
            ParsedName::Versioned {
                stem: "IMG_0042".to_string(),
                version: counter,
            }
        );

        let intermediate = scheme.intermediate_file_name(dir, "IMG_0042", counter, Counter::new(3));
        assert_eq!(scheme.base_name(dir, &intermediate).version(), Some(counter));
        assert_eq!(
            scheme.base_name(dir, &intermediate).intermediate_counter(),
            Some(Counter::new(3))
        );
    }
}

#[test]
fn new_version_avoids_existing_files() {
    let dir = directory_with(&["photo.jpg", "photo_v1.jpg", "photo_v2.jpg"]);
    let loaded = VersionFileInfo::new(dir.path(), "photo.jpg", "JPG");
    let history = original_only();

    let operation = VersionManager::new()
        .operation(FileNameType::NewVersionName, &loaded, &history, &history)
        .expect("operation should succeed");

    assert_eq!(operation.save_file.file_name(), Some("photo_v3.jpg"));
    assert!(!dir.path().join("photo_v3.jpg").exists());
    assert_eq!(operation.tasks.primary, PrimaryTask::NewFile);
}

#[test]
fn edited_version_is_saved_in_place() {
    let dir = directory_with(&["photo.jpg", "photo_v1.jpg"]);
    let loaded = VersionFileInfo::new(dir.path(), "photo_v1.jpg", "JPG");
    let resolved = original_only();
    let current = resolved.clone().with_action(FilterAction::new(
        "digikam:BCGFilter",
        FilterCategory::ReproducibleFilter,
    ));

    let operation = VersionManager::new()
        .operation(FileNameType::CurrentVersionName, &loaded, &resolved, &current)
        .expect("operation should succeed");

    assert!(operation.tasks.contains(Task::Replace));
    assert_eq!(operation.save_file.file_path(), loaded.file_path());
}

#[test]
fn raw_file_is_never_overwritten() {
    let dir = directory_with(&["DSC0001.NEF"]);
    let loaded = VersionFileInfo::new(dir.path(), "DSC0001.NEF", "RAW-NEF");
    let history = original_only();

    let operation = VersionManager::new()
        .operation(FileNameType::CurrentVersionName, &loaded, &history, &history)
        .expect("operation should succeed");

    assert_eq!(operation.tasks.primary, PrimaryTask::NewFile);
    assert_eq!(operation.save_file.file_name(), Some("DSC0001_v1.JPG"));
    assert_eq!(operation.save_file.format, "JPG");
}

#[test]
fn session_policy_from_config_moves_loaded_file() {
    let config_dir = tempdir().expect("Failed to create temporary directory");
    let manager = manager_from_settings_file(
        config_dir.path(),
        "[versioning]\nintermediate_after_each_session = true\nformat = \"png\"\n",
    );

    let dir = directory_with(&["photo.png", "photo_v1.png"]);
    let loaded = VersionFileInfo::new(dir.path(), "photo_v1.png", "PNG");
    let resolved = original_only();
    let current = resolved.clone().with_action(FilterAction::new(
        "digikam:SharpenFilter",
        FilterCategory::ReproducibleFilter,
    ));

    let operation = manager
        .operation(FileNameType::CurrentVersionName, &loaded, &resolved, &current)
        .expect("operation should succeed");

    assert!(operation.tasks.contains(Task::Replace));
    assert!(operation.tasks.contains(Task::MoveToIntermediate));
    let moved = operation
        .intermediate_for_loaded_file
        .expect("loaded file should be moved aside");
    assert_eq!(moved.format, "PNG");
    assert_eq!(moved.file_name(), Some("photo_v1-1.png"));
}

#[test]
fn configured_format_and_suffix_case_shape_new_name() {
    let config_dir = tempdir().expect("Failed to create temporary directory");
    let manager = manager_from_settings_file(config_dir.path(), "[versioning]\nformat = \"tiff\"\n");
    assert_eq!(manager.settings().format, "TIFF");

    let dir = directory_with(&["IMG_1.JPG"]);
    let loaded = VersionFileInfo::new(dir.path(), "IMG_1.JPG", "JPG");
    let history = original_only();

    let operation = manager
        .operation(FileNameType::NewVersionName, &loaded, &history, &history)
        .expect("operation should succeed");

    assert_eq!(operation.save_file.file_name(), Some("IMG_1_v1.TIFF"));
    assert_eq!(operation.save_file.format, "TIFF");
}

#[test]
fn raw_conversion_and_documented_steps_are_snapshotted() {
    let config_dir = tempdir().expect("Failed to create temporary directory");
    let manager = manager_from_settings_file(
        config_dir.path(),
        "[versioning]\nintermediate_after_raw_conversion = true\nintermediate_when_not_reproducible = true\n",
    );

    let dir = directory_with(&["DSC0001.cr2"]);
    let loaded = VersionFileInfo::new(dir.path(), "DSC0001.cr2", "RAW-CR2");
    let resolved = original_only();
    let current = resolved
        .clone()
        .with_action(FilterAction::new(
            RAW_CONVERTER_IDENTIFIER,
            FilterCategory::ReproducibleFilter,
        ))
        .with_action(FilterAction::new(
            "digikam:HealingClone",
            FilterCategory::DocumentedHistory,
        ))
        .with_action(FilterAction::new(
            "digikam:BCGFilter",
            FilterCategory::ReproducibleFilter,
        ));

    let operation = manager
        .operation(FileNameType::CurrentVersionName, &loaded, &resolved, &current)
        .expect("operation should succeed");

    assert_eq!(operation.save_file.file_name(), Some("DSC0001_v1.jpg"));
    assert!(operation.tasks.contains(Task::StoreIntermediates));
    let steps: Vec<usize> = operation.intermediates.keys().copied().collect();
    assert_eq!(steps, vec![1, 2]);
    assert_eq!(
        operation.intermediates[&1].file_name(),
        Some("DSC0001_v1-1.jpg")
    );
    assert_eq!(
        operation.intermediates[&2].file_name(),
        Some("DSC0001_v1-2.jpg")
    );
}

#[test]
fn explicit_save_as_bypasses_naming_scheme() {
    let dir = directory_with(&["photo.jpg"]);
    let loaded = VersionFileInfo::new(dir.path(), "photo.jpg", "JPG");
    let target = VersionFileInfo::new(dir.path().join("export"), "print.version.png", "PNG");
    let history = original_only();

    let operation = VersionManager::new()
        .operation_new_version_as(&loaded, &target, &history, &history)
        .expect("operation should succeed");

    assert_eq!(operation.save_file, target);
    assert_eq!(operation.tasks.primary, PrimaryTask::NewFile);
    assert!(operation.intermediates.is_empty());
}

#[test]
fn history_files_drive_intermediates_and_report() {
    let dir = directory_with(&["scan.png"]);
    let history_path = dir.path().join("history.toml");
    fs::write(
        &history_path,
        r#"
[[entries]]
referred_images = ["original"]

[[entries]]
action = { identifier = "digikam:Inpaint", category = "complex-filter" }

[[entries]]
action = { identifier = "digikam:BCGFilter" }
"#,
    )
    .expect("Failed to write history file");

    let current: ImageHistory =
        toml::from_str(&fs::read_to_string(&history_path).expect("read history"))
            .expect("history should parse");
    let resolved = original_only();

    let mut settings = Config::default().version_settings();
    settings.save_intermediate_versions.when_not_reproducible = true;
    let manager = VersionManager::with_settings(settings);

    let loaded = VersionFileInfo::new(dir.path(), "scan.png", "PNG");
    let operation = manager
        .operation(FileNameType::NewVersionName, &loaded, &resolved, &current)
        .expect("operation should succeed");

    let report = OperationReport::from(&operation);
    assert_eq!(report.tasks, vec!["new-file", "store-intermediates"]);
    assert_eq!(report.intermediates.len(), 1);
    assert_eq!(report.intermediates[0].step, 1);

    let output = report.to_toml().expect("report should serialize");
    assert!(output.contains("scan_v1.jpg"));
    assert!(output.contains("scan_v1-1.jpg"));
}

#[test]
fn legacy_settings_file_configures_manager() {
    let config_dir = tempdir().expect("Failed to create temporary directory");
    let manager = manager_from_settings_file(
        config_dir.path(),
        "\"Non-Destructive Editing Enabled\" = false\n\"Auto-Save When Closing Editor\" = true\n\"Saving Format for Versions\" = \"png\"\n",
    );

    assert!(!manager.is_enabled());
    assert_eq!(
        manager.settings().editor_closing_mode,
        EditorClosingMode::AutoSave
    );
    assert_eq!(manager.settings().format, "PNG");

    let config = Config::from_version_settings(manager.settings());
    config::save_with_override(&config, Some(config_dir.path().to_path_buf()))
        .expect("Failed to save migrated config");
    let saved = fs::read_to_string(config_dir.path().join("settings.toml"))
        .expect("Failed to read saved config");
    assert!(saved.contains("[versioning]"));
}

// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use image_versioning::domain::history::{HistoryImageType, ImageHistory};
use image_versioning::domain::versioning::VersionFileInfo;
use image_versioning::naming::{DefaultVersionNamingScheme, VersionNamingScheme};
use image_versioning::version_manager::{FileNameType, VersionManager};
use std::fs;
use std::hint::black_box;

fn base_name_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("base_name");
    let scheme = DefaultVersionNamingScheme;

    for name in ["DSC0636", "DSC0636_v12", "DSC0636_v12-7", "holiday_v_final_v3"] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(scheme.base_name(black_box(name))));
        });
    }

    group.finish();
}

fn operation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("operation");

    // A directory where the first 50 version names are already taken
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(temp_dir.path().join("photo.jpg"), b"original").expect("write original");
    for version in 1..=50 {
        fs::write(temp_dir.path().join(format!("photo_v{version}.jpg")), b"v")
            .expect("write version");
    }

    let manager = VersionManager::new();
    let loaded = VersionFileInfo::new(temp_dir.path(), "photo.jpg", "JPG");
    let resolved = ImageHistory::new().with_referred_image(HistoryImageType::Original);
    let current = resolved.clone();

    group.bench_function("new_version_in_crowded_directory", |b| {
        b.iter(|| {
            let _ = black_box(manager.operation(
                FileNameType::NewVersionName,
                black_box(&loaded),
                &resolved,
                &current,
            ));
        });
    });

    group.finish();
}

criterion_group!(benches, base_name_benchmark, operation_benchmark);
criterion_main!(benches);

#[cfg(test)]
mod tests {
    use crate::outputs::{self, OutputLayout};
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_srcjar(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        for (name, content) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_directory_outputs_lists_only_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.js"), "b").unwrap();
        fs::write(dir.path().join("a.js"), "a").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let outputs = outputs::directory_outputs(dir.path()).unwrap();
        assert_eq!(file_names(outputs.files()), vec!["a.js", "b.js"]);
    }

    #[test]
    fn test_directory_outputs_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(outputs::directory_outputs(&dir.path().join("gone")).is_err());
    }

    #[test]
    fn test_archive_outputs_collects_nested_sources() {
        let dir = TempDir::new().unwrap();
        let srcjar = dir.path().join("accessor.srcjar");
        write_srcjar(
            &srcjar,
            &[
                ("com/example/deep/B.java", "class B {}"),
                ("com/example/A.java", "class A {}"),
                ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0"),
            ],
        );

        let outputs = outputs::archive_outputs(&srcjar, "java").unwrap();
        assert_eq!(file_names(outputs.files()), vec!["A.java", "B.java"]);
        for file in outputs.files() {
            assert!(file.exists());
        }
    }

    #[test]
    fn test_archive_outputs_missing_archive_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(outputs::archive_outputs(&dir.path().join("gone.srcjar"), "java").is_err());
    }

    #[test]
    fn test_archive_outputs_rejects_non_archive_files() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("accessor.srcjar");
        fs::write(&bogus, "this is not a zip").unwrap();

        assert!(outputs::archive_outputs(&bogus, "java").is_err());
    }

    #[test]
    fn test_scratch_directory_cleaned_up_on_drop() {
        let dir = TempDir::new().unwrap();
        let srcjar = dir.path().join("accessor.srcjar");
        write_srcjar(&srcjar, &[("A.java", "class A {}")]);

        let outputs = outputs::archive_outputs(&srcjar, "java").unwrap();
        let extracted = outputs.files()[0].clone();
        assert!(extracted.exists());

        drop(outputs);
        assert!(!extracted.exists());
    }

    #[test]
    fn test_directory_layout_derives_group_path() {
        let base = TempDir::new().unwrap();
        let out_dir = base.path().join("accessor-improto");
        fs::create_dir(&out_dir).unwrap();
        fs::write(out_dir.join("accessor.js"), "x").unwrap();

        let layout = OutputLayout::Directory {
            base: base.path().to_string_lossy().into_owned(),
            postfix: "-improto".to_string(),
        };

        let outputs = layout.locate("accessor").unwrap();
        assert_eq!(file_names(outputs.files()), vec!["accessor.js"]);
        // A group with no build output fails at the filesystem lookup.
        assert!(layout.locate("oneofs").is_err());
    }

    #[test]
    fn test_archive_layout_derives_group_path() {
        let base = TempDir::new().unwrap();
        let srcjar = base.path().join("accessor_for_testing.srcjar");
        write_srcjar(&srcjar, &[("pkg/Accessor.java", "class Accessor {}")]);

        let layout = OutputLayout::Archive {
            base: base.path().to_string_lossy().into_owned(),
            postfix: "_for_testing.srcjar".to_string(),
            source_ext: "java".to_string(),
        };

        let outputs = layout.locate("accessor").unwrap();
        assert_eq!(file_names(outputs.files()), vec!["Accessor.java"]);
    }
}

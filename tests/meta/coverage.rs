//! Keeps `tests/unit` a mirror of `src` so every module has a test file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    // Entry points and module organization files carry no behaviour of their own
    const EXEMPT: [&str; 3] = ["main.rs", "lib.rs", "mod.rs"];

    fn root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    fn is_exempt(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| EXEMPT.contains(&name))
    }

    /// Every directory and `.rs` file below `dir`, relative to `base`
    fn module_paths(dir: &Path, base: &Path, found: &mut BTreeSet<PathBuf>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_| io::Error::other(format!("{} escapes {}", path.display(), base.display())))?
                .to_path_buf();

            if path.is_dir() {
                found.insert(relative);
                module_paths(&path, base, found)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                found.insert(relative);
            }
        }
        Ok(())
    }

    fn tree(relative: &str) -> BTreeSet<PathBuf> {
        let base = root().join(relative);
        let mut found = BTreeSet::new();
        if let Err(error) = module_paths(&base, &base, &mut found) {
            unreachable!("Failed to scan {}: {error}", base.display());
        }
        found
    }

    fn listing(paths: &[&PathBuf]) -> String {
        paths
            .iter()
            .map(|path| format!("  - {}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests every source module has a unit test file
    // Verified by adding a module without tests
    #[test]
    fn test_src_modules_have_unit_tests() {
        let sources = tree("src");
        let tests = tree("tests/unit");

        let missing: Vec<&PathBuf> = sources
            .iter()
            .filter(|path| !is_exempt(path) && !tests.contains(*path))
            .collect();

        assert!(
            missing.is_empty(),
            "Source modules without tests/unit counterparts:\n{}",
            listing(&missing)
        );
    }

    // Tests no unit test file outlives its source module
    // Verified by deleting a source module but keeping its tests
    #[test]
    fn test_unit_tests_have_src_modules() {
        let sources = tree("src");
        let tests = tree("tests/unit");

        let orphaned: Vec<&PathBuf> = tests
            .iter()
            .filter(|path| !is_exempt(path) && !sources.contains(*path))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit tests without src counterparts:\n{}",
            listing(&orphaned)
        );
    }

    // Tests every non-module test file declares at least one test
    // Verified by emptying a test file
    #[test]
    fn test_test_files_contain_tests() {
        let base = root().join("tests");
        let empty: Vec<PathBuf> = tree("tests")
            .into_iter()
            .filter(|path| path.extension().is_some_and(|ext| ext == "rs") && !is_exempt(path))
            .filter(|path| {
                !fs::read_to_string(base.join(path)).is_ok_and(|content| content.contains("#[test]"))
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            listing(&empty.iter().collect::<Vec<_>>())
        );
    }
}

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;

/// Suffix of files written by the tokenizer.
pub const ARTIFACT_SUFFIX: &str = ".tokens.xml";
/// Suffix of the checked-in reference files.
pub const EXPECTED_SUFFIX: &str = "T.xml";

/// Lists the artifact file names directly inside `dir`, sorted by name.
/// Names need not be valid UTF-8.
pub fn list_artifacts(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        if is_artifact(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn is_artifact(name: &OsStr) -> bool {
    name.as_encoded_bytes().ends_with(ARTIFACT_SUFFIX.as_bytes())
}

/// `Main.tokens.xml` -> `MainT.xml`.
pub fn expected_name(artifact: &OsStr) -> OsString {
    let bytes = artifact.as_encoded_bytes();
    let base = bytes.strip_suffix(ARTIFACT_SUFFIX.as_bytes()).unwrap_or(bytes);
    // SAFETY: `base` is `artifact` cut immediately before an ASCII suffix,
    // which keeps it a valid encoded OS string.
    let mut name = unsafe { OsStr::from_encoded_bytes_unchecked(base) }.to_os_string();
    name.push(EXPECTED_SUFFIX);
    name
}

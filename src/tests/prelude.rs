pub use serial_test::serial;

use std::fs;
use std::path::Path;

/// Create a file with `contents` under `dir`, returning its canonical path.
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_owned()
}

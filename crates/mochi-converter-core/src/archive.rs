// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::ffi::OsString;
use std::fs::File;
use std::fs::read;
use std::fs::write;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::ConvertError;

/// Name of the single entry inside a `.mochi` archive.
pub const ARCHIVE_ENTRY_NAME: &str = "data.edn";

/// Paths of the files written by [`pack`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedPaths {
    pub edn: PathBuf,
    pub archive: PathBuf,
}

fn with_extension_appended(base: &Path, extension: &str) -> PathBuf {
    let mut path: OsString = base.as_os_str().to_owned();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

/// Write `<base>.edn` and `<base>.mochi`. The archive holds the bytes of the
/// `.edn` file as written; both files are left in place.
pub fn pack(document: &str, output_base: &Path) -> Result<PackedPaths, ConvertError> {
    let edn = with_extension_appended(output_base, "edn");
    let archive = with_extension_appended(output_base, "mochi");

    write(&edn, format!("{document}\n")).map_err(|e| ConvertError::io(&edn, e))?;
    let bytes = read(&edn).map_err(|e| ConvertError::io(&edn, e))?;
    write_archive(&archive, &bytes)?;

    Ok(PackedPaths { edn, archive })
}

fn write_archive(path: &Path, data: &[u8]) -> Result<(), ConvertError> {
    let archive_error = |message: String| ConvertError::Archive {
        path: path.to_path_buf(),
        message,
    };
    let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(ARCHIVE_ENTRY_NAME, options)
        .map_err(|e| archive_error(e.to_string()))?;
    zip.write_all(data).map_err(|e| archive_error(e.to_string()))?;
    zip.finish().map_err(|e| archive_error(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use tempfile::tempdir;
    use zip::ZipArchive;

    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_pack_writes_both_files() -> Fallible<()> {
        let dir = tempdir()?;
        let base = dir.path().join("converted");
        let paths = pack("{:decks [] :version 2}", &base)?;
        assert_eq!(paths.edn, dir.path().join("converted.edn"));
        assert_eq!(paths.archive, dir.path().join("converted.mochi"));

        let edn = read(&paths.edn)?;
        assert_eq!(edn, b"{:decks [] :version 2}\n");

        let mut zip = ZipArchive::new(File::open(&paths.archive)?)
            .map_err(|e| ConvertError::Archive {
                path: paths.archive.clone(),
                message: e.to_string(),
            })?;
        assert_eq!(zip.len(), 1);
        let mut entry = zip.by_index(0).map_err(|e| ConvertError::Archive {
            path: paths.archive.clone(),
            message: e.to_string(),
        })?;
        assert_eq!(entry.name(), ARCHIVE_ENTRY_NAME);
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;
        assert_eq!(contents, edn);
        Ok(())
    }

    #[test]
    fn test_base_with_dots_keeps_them() {
        let base = Path::new("out/my.notes");
        assert_eq!(with_extension_appended(base, "edn"), PathBuf::from("out/my.notes.edn"));
    }

    #[test]
    fn test_pack_into_missing_directory() {
        let base = Path::new("./no-such-directory/converted");
        assert!(matches!(pack("{}", base), Err(ConvertError::Io { .. })));
    }
}

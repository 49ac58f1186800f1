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

use std::fs::write;
use std::path::PathBuf;

use mochi_converter_core::error::Fallible;
use tempfile::TempDir;
use tempfile::tempdir;

pub fn create_tmp_directory() -> Fallible<TempDir> {
    Ok(tempdir()?)
}

/// Write a file into the directory and return its path.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> Fallible<PathBuf> {
    let path = dir.path().join(name);
    write(&path, contents)?;
    Ok(path)
}

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

use std::path::PathBuf;

use clap::Parser;
use mochi_converter_core::ParentIdPropagation;
use mochi_converter_core::error::Fallible;

use crate::cmd::check::CheckConfig;
use crate::cmd::check::CheckFormat;
use crate::cmd::check::check_notes;
use crate::cmd::convert::ConvertConfig;
use crate::cmd::convert::convert_notes;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Convert a Markdown file into a Mochi archive.
    Convert {
        /// Markdown file to convert.
        #[arg(long)]
        input: PathBuf,
        /// Output path without extension. Two files are written: <OUTPUT>.edn
        /// and <OUTPUT>.mochi, the latter being a zipped copy of the former.
        #[arg(long, default_value = "converted")]
        output: PathBuf,
        /// YAML or TOML file declaring the names and ids of your decks. By
        /// default, decks are written without ids.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Give every nested deck the top-level parent id, matching archives
        /// built by earlier versions of the converter.
        #[arg(long)]
        legacy_parent_ids: bool,
    },
    /// Check a Markdown file and print the decks it would produce.
    Check {
        /// Markdown file to check.
        #[arg(long)]
        input: PathBuf,
        /// YAML or TOML file declaring the names and ids of your decks.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Give every nested deck the top-level parent id.
        #[arg(long)]
        legacy_parent_ids: bool,
        /// Which output format to use.
        #[arg(long, default_value_t = CheckFormat::Text)]
        format: CheckFormat,
    },
}

fn propagation(legacy_parent_ids: bool) -> ParentIdPropagation {
    if legacy_parent_ids {
        ParentIdPropagation::RootLevel
    } else {
        ParentIdPropagation::Immediate
    }
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Convert {
            input,
            output,
            config,
            legacy_parent_ids,
        } => {
            let paths = convert_notes(ConvertConfig {
                input,
                output,
                hierarchy: config,
                propagation: propagation(legacy_parent_ids),
            })?;
            println!("{}", paths.edn.display());
            println!("{}", paths.archive.display());
            Ok(())
        }
        Command::Check {
            input,
            config,
            legacy_parent_ids,
            format,
        } => check_notes(CheckConfig {
            input,
            hierarchy: config,
            propagation: propagation(legacy_parent_ids),
            format,
        }),
    }
}

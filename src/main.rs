// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tasklift CLI entrypoint.
//!
//! By default this runs the interactive TUI over a folder of notes (the current directory
//! unless one is given). `--list` prints open to-talk items per person and exits.

use std::error::Error;
use std::path::{Path, PathBuf};

use tasklift::config::Config;
use tasklift::model::PersonGroup;
use tasklift::scan::{person_groups, strip_tags};
use tasklift::store::{DocumentStore, MemoryStore, NotesFolder, WriteDurability};
use tasklift::workflow::Workflow;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<notes-dir>] [--durable-writes] [--log-file <path>] [--list]\n  {program} [--dir <dir>] [--durable-writes] [--log-file <path>] [--list]\n  {program} --demo [--log-file <path>] [--list]\n\nIf notes-dir/--dir is omitted, the current working directory is used.\n--demo uses built-in in-memory notes and cannot be combined with notes-dir/--dir.\n--list prints open to-talk items per person instead of starting the TUI.\n\nSettings are read from tasklift.json in the notes directory; flags win over it.\n{log_env} sets the log filter (default info) when logging to a file.",
        log_env = tasklift::logging::LOG_ENV
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    list: bool,
    notes_dir: Option<String>,
    log_file: Option<String>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--list" => {
                if options.list {
                    return Err(());
                }
                options.list = true;
            }
            "--dir" => {
                if options.notes_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.notes_dir = Some(dir);
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.log_file = Some(path);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.notes_dir.is_some() {
                    return Err(());
                }
                options.notes_dir = Some(arg);
            }
        }
    }

    if options.demo && (options.notes_dir.is_some() || options.durable_writes) {
        return Err(());
    }

    Ok(options)
}

/// Log file from the command line, else from the config (relative to the notes folder).
fn log_file_path(options: &CliOptions, config: &Config, dir: &Path) -> Option<PathBuf> {
    options.log_file.as_ref().map(PathBuf::from).or_else(|| {
        config.log_file.as_ref().map(|path| if path.is_relative() { dir.join(path) } else { path.clone() })
    })
}

fn format_groups(groups: &[PersonGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("{} ({})\n", group.key, group.count()));
        for item in &group.items {
            out.push_str(&format!(
                "  {}  [{}:{}]\n",
                strip_tags(&item.raw_text),
                item.source_document,
                item.line_number
            ));
            for subtask in &item.subtasks {
                out.push_str(&format!("      {}\n", subtask.text.trim()));
            }
        }
    }
    out
}

fn run<S: DocumentStore>(store: S, list: bool, editor: String) -> Result<(), Box<dyn Error>> {
    if list {
        let documents = store.list_incomplete_documents()?;
        let groups = person_groups(&documents);
        if groups.is_empty() {
            println!("No open to-talk items.");
        } else {
            print!("{}", format_groups(&groups));
        }
        return Ok(());
    }

    let workflow = Workflow::new(store)?;
    tasklift::tui::run(workflow, editor)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "tasklift".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let dir = PathBuf::from(options.notes_dir.clone().unwrap_or_else(|| ".".to_owned()));
        let config = if options.demo { Config::default() } else { Config::load(&dir)? };
        if let Some(path) = log_file_path(&options, &config, &dir) {
            tasklift::logging::init_file_logging(&path, config.log_filter.as_deref())?;
        }
        let editor = config.editor_command();

        if options.demo {
            tracing::info!("starting demo session");
            return run(MemoryStore::demo(), options.list, editor);
        }

        let durability = if options.durable_writes || config.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        };
        let folder = NotesFolder::new(dir)
            .with_extension(config.document_extension())
            .with_durability(durability);
        tracing::info!(root = %folder.root().display(), ?durability, "opening notes folder");
        run(folder, options.list, editor)
    })();

    if let Err(err) = result {
        eprintln!("tasklift: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use tasklift::config::Config;
    use tasklift::scan::person_groups;
    use tasklift::store::{DocumentStore, MemoryStore};

    use super::{format_groups, log_file_path, parse_options, CliOptions};

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values.iter().map(|value| (*value).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_demo_and_list_in_any_order() {
        let options = parse_options(args(&["--demo", "--list"])).expect("parse options");
        assert!(options.demo);
        assert!(options.list);

        let options = parse_options(args(&["--list", "--demo"])).expect("parse options");
        assert!(options.demo);
        assert!(options.list);
    }

    #[test]
    fn parses_notes_dir_positionally_or_by_flag() {
        let options = parse_options(args(&["some/dir"])).expect("parse options");
        assert_eq!(options.notes_dir.as_deref(), Some("some/dir"));

        let options = parse_options(args(&["--dir", "some/dir", "--durable-writes"]))
            .expect("parse options");
        assert_eq!(options.notes_dir.as_deref(), Some("some/dir"));
        assert!(options.durable_writes);
    }

    #[test]
    fn parses_log_file() {
        let options = parse_options(args(&["--log-file", "/tmp/t.log"])).expect("parse options");
        assert_eq!(options.log_file.as_deref(), Some("/tmp/t.log"));
    }

    #[test]
    fn rejects_demo_with_notes_dir() {
        parse_options(args(&["--demo", "--dir", "."])).unwrap_err();
        parse_options(args(&["notes", "--demo"])).unwrap_err();
        parse_options(args(&["--demo", "--durable-writes"])).unwrap_err();
    }

    #[test]
    fn rejects_unknown_duplicate_and_missing_values() {
        parse_options(args(&["--nope"])).unwrap_err();
        parse_options(args(&["--list", "--list"])).unwrap_err();
        parse_options(args(&["one", "two"])).unwrap_err();
        parse_options(args(&["--dir", "one", "two"])).unwrap_err();
        parse_options(args(&["--dir"])).unwrap_err();
        parse_options(args(&["--log-file"])).unwrap_err();
    }

    #[test]
    fn cli_log_file_wins_and_config_paths_resolve_against_the_folder() {
        let config = Config {
            log_file: Some(PathBuf::from("logs/tasklift.log")),
            ..Config::default()
        };
        let dir = Path::new("/notes");

        let from_config = log_file_path(&CliOptions::default(), &config, dir);
        assert_eq!(from_config, Some(PathBuf::from("/notes/logs/tasklift.log")));

        let options = CliOptions {
            log_file: Some("/tmp/cli.log".to_owned()),
            ..CliOptions::default()
        };
        assert_eq!(log_file_path(&options, &config, dir), Some(PathBuf::from("/tmp/cli.log")));
        assert_eq!(log_file_path(&CliOptions::default(), &Config::default(), dir), None);
    }

    #[test]
    fn lists_groups_with_locations_and_nested_lines() {
        let store = MemoryStore::with_documents([(
            "a.md",
            "- [ ] Fix bug to-talk-alice\n  - [ ] repro\n- [ ] Lunch to-talk-bob\n",
        )]);
        let documents = store.list_incomplete_documents().expect("list");

        let listing = format_groups(&person_groups(&documents));

        assert_eq!(
            listing,
            "alice (1)\n  - [ ] Fix bug  [a.md:1]\n      - [ ] repro\nbob (1)\n  - [ ] Lunch  [a.md:3]\n"
        );
    }
}

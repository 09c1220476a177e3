use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::output_utils;
use gqlcc_core::UserError;
use gqlcc_core::compiler::CompileOutcome;
use gqlcc_core::compiler::CompilerConfig;
use gqlcc_core::compiler::CompilerRunner;
use gqlcc_core::compiler::FileEvent;
use gqlcc_core::compiler::FileEventKind;
use gqlcc_core::compiler::ParserConfig;
use gqlcc_core::compiler::WriterConfig;
use gqlcc_core::file_reader;
use gqlcc_core::schema::SchemaBuilder;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use std::time::SystemTime;
use tokio::sync::mpsc;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct CompileCmd {
    #[arg(
        help="Path to the server schema (.graphql SDL file).",
        long,
    )]
    schema: PathBuf,

    #[arg(
        help="Paths to client schema-extension SDL files.",
        long,
    )]
    client_schema: Vec<PathBuf>,

    #[arg(
        help="Root directory searched for GraphQL documents.",
        long,
    )]
    src: PathBuf,

    #[arg(
        help="Root directory of dependency-only documents: resolvable for \
             fragment spreads, but no artifacts are generated for them.",
        long,
    )]
    base_src: Option<PathBuf>,

    #[arg(
        default_values_t=["graphql".to_string()],
        help="Set of file extensions to pick up as GraphQL documents.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        default_value="javascript",
        help="Target language, resolved against the built-in plugin table.",
        long,
    )]
    language: String,

    #[arg(
        help="Directory artifacts are written to. Defaults to \
             `__generated__` under --src.",
        long,
    )]
    output: Option<PathBuf>,

    #[arg(
        help="Path to write the persisted-query map (a flat JSON object of \
             id -> query text) to.",
        long,
    )]
    persist_output: Option<PathBuf>,

    #[arg(
        help="Always honor @defer/@stream instead of requiring the reserved \
             rollout `if` variable.",
        long,
    )]
    incremental_delivery: bool,

    #[arg(
        help="Run the full pipeline but write nothing; exits non-zero if \
             any artifact is out of date.",
        long,
    )]
    validate: bool,

    #[arg(
        help="Keep running and recompile when source files change.",
        long,
    )]
    watch: bool,
}

#[inherent::inherent]
impl RunnableCommand for CompileCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let mut schema_builder = match SchemaBuilder::from_file(&self.schema) {
            Ok(builder) => builder,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} Failed to load schema: {e}",
                    output_utils::RED_X,
                ));
            },
        };
        for path in &self.client_schema {
            let load_result = file_reader::read_content(path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    schema_builder
                        .add_client_types_str(Some(path.clone()), content.as_str())
                        .map_err(|e| e.to_string())
                });
            if let Err(message) = load_result {
                return CommandResult::stderr(format_args!(
                    "{} Failed to load client schema extensions: {message}",
                    output_utils::RED_X,
                ));
            }
        }
        let schema = match schema_builder.build() {
            Ok(schema) => schema,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} Invalid schema: {e}",
                    output_utils::RED_X,
                ));
            },
        };

        let extensions: Vec<&str> = self
            .graphql_file_exts
            .iter()
            .map(|ext| ext.as_str())
            .collect();
        let output_dir = self
            .output
            .clone()
            .unwrap_or_else(|| self.src.join("__generated__"));

        let mut config = CompilerConfig::default();
        config.only_validate = self.validate;
        config.feature_flags.enable_incremental_delivery =
            self.incremental_delivery;
        config.parsers.insert(
            "graphql".to_string(),
            ParserConfig::new(self.src.clone(), extensions.as_slice()),
        );

        let mut writer =
            WriterConfig::new("graphql", self.language.as_str(), output_dir);
        writer.persisted_query_path = self.persist_output.clone();
        if let Some(base_src) = &self.base_src {
            config.parsers.insert(
                "base".to_string(),
                ParserConfig::new(base_src.clone(), extensions.as_slice()),
            );
            writer.base_parsers.push("base".to_string());
        }
        config.writers.insert(self.language.clone(), writer);

        let mut runner = CompilerRunner::new(Arc::new(schema), config);
        let outcome = if self.watch {
            let mut watch_dirs = vec![self.src.clone()];
            if let Some(base_src) = &self.base_src {
                watch_dirs.push(base_src.clone());
            }
            let events =
                spawn_polling_watcher(watch_dirs, Duration::from_millis(500));
            runner.watch_all(events).await
        } else {
            runner.compile_all()
        };

        match outcome {
            CompileOutcome::Error => CommandResult::stderr_with_code(
                100,
                format_args!(
                    "{} Compilation finished with errors:\n{}",
                    output_utils::RED_X,
                    format_errors(runner.last_errors()),
                ),
            ),

            CompileOutcome::Changes if self.validate => {
                CommandResult::stderr_with_code(
                    101,
                    format_args!(
                        "{} Validation failed: generated artifacts are out \
                        of date.",
                        output_utils::RED_X,
                    ),
                )
            },

            CompileOutcome::Changes | CompileOutcome::NoChanges => {
                CommandResult::stdout(format_args!(
                    "{} Compilation finished: {outcome}.",
                    output_utils::GREEN_CHECK,
                ))
            },
        }
    }
}

fn format_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|error| {
            let locations = error
                .locations()
                .iter()
                .map(|location| format!("      at {location}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!("  * {error}\n{locations}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A minimal stand-in for an external watch service: polls the watched
/// directories and emits one [`FileEvent`] per observed difference.
///
/// The compiler only consumes the channel; the subscription's liveness is
/// this task's concern.
fn spawn_polling_watcher(
    dirs: Vec<PathBuf>,
    interval: Duration,
) -> mpsc::Receiver<FileEvent> {
    let (tx, rx) = mpsc::channel(64);

    tokio::spawn(async move {
        let mut previous: Option<BTreeMap<PathBuf, SystemTime>> = None;
        loop {
            tokio::time::sleep(interval).await;

            let mut current = BTreeMap::new();
            for dir in &dirs {
                for entry in WalkDir::new(dir).follow_links(true).into_iter().flatten()
                {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    if let Ok(metadata) = entry.metadata()
                        && let Ok(modified) = metadata.modified()
                    {
                        current.insert(entry.path().to_path_buf(), modified);
                    }
                }
            }

            let mut events = vec![];
            if let Some(previous) = &previous {
                for (path, modified) in &current {
                    match previous.get(path) {
                        None => events.push(FileEvent {
                            kind: FileEventKind::Created,
                            path: path.clone(),
                        }),
                        Some(previous_modified) if previous_modified != modified =>
                            events.push(FileEvent {
                                kind: FileEventKind::Modified,
                                path: path.clone(),
                            }),
                        Some(_) => {},
                    }
                }
                for path in previous.keys() {
                    if !current.contains_key(path) {
                        events.push(FileEvent {
                            kind: FileEventKind::Removed,
                            path: path.clone(),
                        });
                    }
                }
            }
            previous = Some(current);

            for event in events {
                if tx.send(event).await.is_err() {
                    return;
                }
            }
        }
    });

    rx
}

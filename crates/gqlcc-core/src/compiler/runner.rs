use crate::codegen::Artifact;
use crate::codegen::PersistedQueryMap;
use crate::codegen::build_artifact;
use crate::compiler::ArtifactFileWriter;
use crate::compiler::CompileOutcome;
use crate::compiler::CompilerConfig;
use crate::compiler::FileEvent;
use crate::compiler::FileSnapshot;
use crate::compiler::WriterConfig;
use crate::compiler::diff_snapshots;
use crate::compiler::plugin_for_tag;
use crate::compiler::scan_parser_files;
use crate::errors::InternalError;
use crate::errors::UserError;
use crate::file_reader;
use crate::ir::Document;
use crate::ir::IrBuilder;
use crate::schema::Schema;
use crate::store::DocumentStore;
use crate::transforms::run_pipeline;
use indexmap::IndexMap;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Where the runner currently is in a cycle. Tracked for logging and
/// inspection; transitions follow
/// `Idle → Parsing → Merging → Transforming → Codegen → Writing → Idle`,
/// with `Error` reachable from any stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompilerPhase {
    Codegen,
    Error,
    Idle,
    Merging,
    Parsing,
    Transforming,
    Writing,
}

#[derive(Debug, Default)]
struct ParserState {
    documents_per_file: IndexMap<PathBuf, Vec<Arc<Document>>>,
    had_errors: bool,
    snapshot: FileSnapshot,
}

#[derive(Debug, Default)]
struct WriterState {
    /// Document names whose artifacts were emitted last cycle, for orphan
    /// deletion.
    emitted: Vec<String>,
}

/// Per-writer result of the merge/transform/codegen stages. A writer that
/// hit any error performs zero writes in the cycle.
enum WriterOutput {
    Artifacts {
        artifacts: Vec<Artifact>,
        persisted_queries: Option<PersistedQueryMap>,
    },
    Failed {
        internal_errors: Vec<InternalError>,
        user_errors: Vec<UserError>,
    },
}

/// Drives parse → merge → transform → codegen → write cycles over the
/// configured parsers and writers, re-doing only what the changed-file set
/// requires.
pub struct CompilerRunner {
    config: CompilerConfig,
    internal_error_count: usize,
    last_errors: Vec<UserError>,
    parser_states: IndexMap<String, ParserState>,
    phase: CompilerPhase,
    schema: Arc<Schema>,
    writer_states: IndexMap<String, WriterState>,
}
impl CompilerRunner {
    pub fn new(schema: Arc<Schema>, config: CompilerConfig) -> Self {
        Self {
            config,
            internal_error_count: 0,
            last_errors: vec![],
            parser_states: IndexMap::new(),
            phase: CompilerPhase::Idle,
            schema,
            writer_states: IndexMap::new(),
        }
    }

    pub fn phase(&self) -> CompilerPhase {
        self.phase
    }

    /// Every user error collected during the most recent cycle, across all
    /// documents and writers.
    pub fn last_errors(&self) -> &[UserError] {
        self.last_errors.as_slice()
    }

    /// Run one batch compile cycle.
    pub fn compile_all(&mut self) -> CompileOutcome {
        self.run_cycle()
    }

    /// Run an initial cycle, then one more cycle per change-notification
    /// batch until the externally-owned subscription closes its channel.
    ///
    /// Notifications arriving while a cycle is in flight queue in the
    /// channel; they are drained as a single batch between cycles and never
    /// preempt the running cycle. Returns the final cycle's outcome.
    pub async fn watch_all(
        &mut self,
        mut events: mpsc::Receiver<FileEvent>,
    ) -> CompileOutcome {
        let mut outcome = self.run_cycle();
        log::info!("Initial compile finished: {outcome}. Watching for changes...");

        while let Some(event) = events.recv().await {
            let mut batch = 1usize;
            while events.try_recv().is_ok() {
                batch += 1;
            }
            log::debug!(
                "Change notification for {:#?} ({batch} queued events); \
                starting a cycle.",
                event.path,
            );
            outcome = self.run_cycle();
            log::info!("Cycle finished: {outcome}.");
        }

        outcome
    }

    fn set_phase(&mut self, phase: CompilerPhase) {
        log::debug!("Compiler phase: {:?} -> {phase:?}.", self.phase);
        self.phase = phase;
    }

    fn run_cycle(&mut self) -> CompileOutcome {
        self.internal_error_count = 0;
        self.last_errors.clear();

        self.set_phase(CompilerPhase::Parsing);
        self.parse_changed_files();

        self.set_phase(CompilerPhase::Merging);
        let writers: Vec<(String, WriterConfig)> = self
            .config
            .writers
            .iter()
            .map(|(name, config)| (name.clone(), config.clone()))
            .collect();
        let merged: Vec<(String, WriterConfig, Result<DocumentStore, WriterOutput>)> =
            writers
                .into_iter()
                .map(|(writer_name, writer_config)| {
                    let store =
                        self.merge_writer_store(writer_name.as_str(), &writer_config);
                    (writer_name, writer_config, store)
                })
                .collect();

        self.set_phase(CompilerPhase::Transforming);
        let feature_flags = self.config.feature_flags.clone();
        let transformed: Vec<(String, WriterConfig, Result<DocumentStore, WriterOutput>)> =
            merged
                .into_par_iter()
                .map(|(writer_name, writer_config, store)| {
                    let result = store.and_then(|store| {
                        run_pipeline(&store, &writer_config.passes, &feature_flags)
                            .map_err(|user_errors| WriterOutput::Failed {
                                internal_errors: vec![],
                                user_errors,
                            })
                    });
                    (writer_name, writer_config, result)
                })
                .collect();

        self.set_phase(CompilerPhase::Codegen);
        let outputs: Vec<(String, WriterConfig, WriterOutput)> = transformed
            .into_par_iter()
            .map(|(writer_name, writer_config, store)| {
                let output = match store {
                    Ok(store) => generate_writer_artifacts(
                        writer_name.as_str(),
                        &writer_config,
                        &store,
                    ),
                    Err(output) => output,
                };
                (writer_name, writer_config, output)
            })
            .collect();

        self.set_phase(CompilerPhase::Writing);
        let mut changed = 0usize;
        for (writer_name, writer_config, output) in outputs {
            match output {
                WriterOutput::Artifacts {
                    artifacts,
                    persisted_queries,
                } => {
                    changed += self.write_writer_artifacts(
                        writer_name.as_str(),
                        &writer_config,
                        artifacts,
                        persisted_queries,
                    );
                },

                WriterOutput::Failed {
                    internal_errors,
                    user_errors,
                } => {
                    log::warn!(
                        "Writer '{writer_name}' failed; performing zero writes \
                        for it this cycle.",
                    );
                    for internal_error in &internal_errors {
                        log::error!("{internal_error}");
                    }
                    self.internal_error_count += internal_errors.len();
                    self.last_errors.extend(user_errors);
                },
            }
        }

        if !self.last_errors.is_empty() || self.internal_error_count > 0 {
            self.set_phase(CompilerPhase::Error);
            self.set_phase(CompilerPhase::Idle);
            return CompileOutcome::Error;
        }

        self.set_phase(CompilerPhase::Idle);
        if changed > 0 {
            CompileOutcome::Changes
        } else {
            CompileOutcome::NoChanges
        }
    }

    /// Compute each parser's changed-file set and re-parse only those files.
    /// A file that fails to parse keeps its previous documents so a broken
    /// edit never corrupts the merged view; the errors mark the cycle.
    fn parse_changed_files(&mut self) {
        let schema = Arc::clone(&self.schema);
        for (parser_name, parser_config) in &self.config.parsers {
            let state = self
                .parser_states
                .entry(parser_name.clone())
                .or_default();
            state.had_errors = false;

            let next_snapshot = match scan_parser_files(parser_config) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    log::error!("Parser '{parser_name}': {err}");
                    state.had_errors = true;
                    self.internal_error_count += 1;
                    continue;
                },
            };

            let changes = diff_snapshots(&state.snapshot, &next_snapshot);
            log::debug!(
                "Parser '{parser_name}': {} changed, {} removed of {} files.",
                changes.changed.len(),
                changes.removed.len(),
                next_snapshot.len(),
            );

            for path in &changes.removed {
                state.documents_per_file.shift_remove(path);
            }

            let builder = IrBuilder::new(&schema);
            for path in &changes.changed {
                let content = match file_reader::read_content(path) {
                    Ok(content) => content,
                    Err(err) => {
                        log::error!("{err}");
                        state.had_errors = true;
                        self.internal_error_count += 1;
                        continue;
                    },
                };

                match builder.build_from_str(content.as_str(), Some(path.as_path())) {
                    Ok(documents) => {
                        state.documents_per_file.insert(
                            path.clone(),
                            documents.into_iter().map(Arc::new).collect(),
                        );
                    },
                    Err(errors) => {
                        state.had_errors = true;
                        self.last_errors.extend(errors);
                    },
                }
            }

            state.snapshot = next_snapshot;
        }
    }

    /// Assemble a writer's complete store: base parsers first (resolvable,
    /// never generated), then the primary parser's documents.
    fn merge_writer_store(
        &self,
        writer_name: &str,
        writer_config: &WriterConfig,
    ) -> Result<DocumentStore, WriterOutput> {
        let mut internal_errors = vec![];
        let mut user_errors = vec![];
        let mut store = DocumentStore::new(Arc::clone(&self.schema));

        let mut parser_had_errors = false;
        let parser_names = writer_config
            .base_parsers
            .iter()
            .map(|name| (name.as_str(), true))
            .chain(std::iter::once((writer_config.parser.as_str(), false)));
        for (parser_name, base) in parser_names {
            let Some(state) = self.parser_states.get(parser_name) else {
                internal_errors.push(InternalError::UnknownParser {
                    writer_name: writer_name.to_string(),
                    parser_name: parser_name.to_string(),
                });
                continue;
            };
            parser_had_errors = parser_had_errors || state.had_errors;

            for documents in state.documents_per_file.values() {
                for document in documents {
                    if let Err(err) = store.insert_shared(Arc::clone(document), base)
                    {
                        user_errors.push(err);
                    }
                }
            }
        }

        if internal_errors.is_empty() && user_errors.is_empty() && !parser_had_errors
        {
            Ok(store)
        } else {
            // Parse errors were already collected globally; the writer just
            // opts out of writing.
            Err(WriterOutput::Failed {
                internal_errors,
                user_errors,
            })
        }
    }

    /// Diff each artifact against the last-emitted copy, write only what
    /// changed, and delete artifacts whose source document disappeared.
    fn write_writer_artifacts(
        &mut self,
        writer_name: &str,
        writer_config: &WriterConfig,
        artifacts: Vec<Artifact>,
        persisted_queries: Option<PersistedQueryMap>,
    ) -> usize {
        let Some(plugin) = plugin_for_tag(writer_config.language.as_str()) else {
            log::error!(
                "{}",
                InternalError::UnknownLanguageTag {
                    writer_name: writer_name.to_string(),
                    tag: writer_config.language.clone(),
                },
            );
            self.internal_error_count += 1;
            return 0;
        };

        let mut file_writer = ArtifactFileWriter::new(self.config.only_validate);
        let mut emitted = vec![];
        for artifact in &artifacts {
            match file_writer.write(
                writer_config.output_dir.as_path(),
                artifact,
                plugin.output_extension,
            ) {
                Ok(_) => emitted.push(artifact.name.clone()),
                Err(err) => {
                    log::error!("{err}");
                    self.internal_error_count += 1;
                },
            }
        }

        let state = self
            .writer_states
            .entry(writer_name.to_string())
            .or_default();
        for previous_name in &state.emitted {
            if emitted.contains(previous_name) {
                continue;
            }
            if let Err(err) = file_writer.delete(
                writer_config.output_dir.as_path(),
                previous_name,
                plugin.output_extension,
            ) {
                log::error!("{err}");
                self.internal_error_count += 1;
            }
        }
        state.emitted = emitted;

        if let (Some(path), Some(persisted_queries)) =
            (&writer_config.persisted_query_path, &persisted_queries)
            && !self.config.only_validate
        {
            log::debug!(
                "Rewriting persisted-query map ({} entries) at {path:#?}.",
                persisted_queries.len(),
            );
            if let Err(err) = persisted_queries.write_to(path.as_path()) {
                log::error!("{err}");
                self.internal_error_count += 1;
            }
        }

        file_writer.changed_count()
    }
}

fn generate_writer_artifacts(
    writer_name: &str,
    writer_config: &WriterConfig,
    store: &DocumentStore,
) -> WriterOutput {
    let Some(plugin) = plugin_for_tag(writer_config.language.as_str()) else {
        return WriterOutput::Failed {
            internal_errors: vec![InternalError::UnknownLanguageTag {
                writer_name: writer_name.to_string(),
                tag: writer_config.language.clone(),
            }],
            user_errors: vec![],
        };
    };

    let mut persisted_queries = writer_config
        .persisted_query_path
        .is_some()
        .then(PersistedQueryMap::new);

    let mut artifacts = vec![];
    for document in store.source_documents() {
        match build_artifact(
            document,
            plugin.format_module,
            persisted_queries.as_mut(),
        ) {
            Ok(artifact) => artifacts.push(artifact),
            Err(err) => {
                return WriterOutput::Failed {
                    internal_errors: vec![err],
                    user_errors: vec![],
                };
            },
        }
    }

    WriterOutput::Artifacts {
        artifacts,
        persisted_queries,
    }
}

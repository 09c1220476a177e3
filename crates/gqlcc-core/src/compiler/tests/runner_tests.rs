use crate::compiler::CompileOutcome;
use crate::compiler::CompilerConfig;
use crate::compiler::CompilerRunner;
use crate::compiler::FileEvent;
use crate::compiler::FileEventKind;
use crate::compiler::ParserConfig;
use crate::compiler::WriterConfig;
use crate::errors::UserError;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

const SCHEMA_SDL: &str = r#"
type Query {
    me: User
}

type User {
    id: ID!
    name: String
    friendsList: [User!]
}
"#;

fn test_schema() -> Arc<Schema> {
    Arc::new(
        SchemaBuilder::from_str(None, SCHEMA_SDL)
            .unwrap()
            .build()
            .unwrap(),
    )
}

fn write_file(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

struct Fixture {
    out_dir: PathBuf,
    src_dir: PathBuf,
    _temp: TempDir,
}
impl Fixture {
    fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let src_dir = temp.path().join("src");
        let out_dir = temp.path().join("__generated__");

        write_file(
            &src_dir.join("UserFields.graphql"),
            "fragment UserFields on User { id name }",
        );
        write_file(
            &src_dir.join("MeQuery.graphql"),
            "query MeQuery { me { ...UserFields } }",
        );
        write_file(
            &src_dir.join("OtherQuery.graphql"),
            "query OtherQuery { me { id } }",
        );

        Self {
            out_dir,
            src_dir,
            _temp: temp,
        }
    }

    fn config(&self, only_validate: bool) -> CompilerConfig {
        let mut config = CompilerConfig::default();
        config.only_validate = only_validate;
        config.parsers.insert(
            "graphql".to_string(),
            ParserConfig::new(self.src_dir.clone(), &["graphql"]),
        );
        config.writers.insert(
            "js".to_string(),
            WriterConfig::new("graphql", "javascript", self.out_dir.clone()),
        );
        config
    }

    fn runner(&self, only_validate: bool) -> CompilerRunner {
        CompilerRunner::new(test_schema(), self.config(only_validate))
    }

    fn artifact_contents(&self) -> BTreeMap<String, String> {
        let mut contents = BTreeMap::new();
        if !self.out_dir.is_dir() {
            return contents;
        }
        for entry in std::fs::read_dir(&self.out_dir).unwrap() {
            let entry = entry.unwrap();
            contents.insert(
                entry.file_name().to_string_lossy().to_string(),
                std::fs::read_to_string(entry.path()).unwrap(),
            );
        }
        contents
    }
}

#[test]
fn a_full_compile_writes_artifacts_and_becomes_a_noop() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner(false);

    assert_eq!(runner.compile_all(), CompileOutcome::Changes);
    let artifacts = fixture.artifact_contents();
    let names: Vec<&str> = artifacts.keys().map(|name| name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "MeQuery.graphql.js",
            "OtherQuery.graphql.js",
            "UserFields.graphql.js",
        ],
    );

    // A second cycle with no file changes performs zero writes.
    assert_eq!(runner.compile_all(), CompileOutcome::NoChanges);
    assert_eq!(fixture.artifact_contents(), artifacts);
}

#[test]
fn touching_one_fragment_rewrites_only_its_artifact() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner(false);
    runner.compile_all();
    let before = fixture.artifact_contents();

    write_file(
        &fixture.src_dir.join("UserFields.graphql"),
        "fragment UserFields on User { id name friendsList { id } }",
    );
    assert_eq!(runner.compile_all(), CompileOutcome::Changes);

    let after = fixture.artifact_contents();
    assert_ne!(
        before["UserFields.graphql.js"],
        after["UserFields.graphql.js"],
    );
    assert_eq!(before["MeQuery.graphql.js"], after["MeQuery.graphql.js"]);
    assert_eq!(before["OtherQuery.graphql.js"], after["OtherQuery.graphql.js"]);
}

#[test]
fn removing_a_source_deletes_its_artifact() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner(false);
    runner.compile_all();

    std::fs::remove_file(fixture.src_dir.join("OtherQuery.graphql")).unwrap();
    assert_eq!(runner.compile_all(), CompileOutcome::Changes);

    let artifacts = fixture.artifact_contents();
    assert!(!artifacts.contains_key("OtherQuery.graphql.js"));
    assert!(artifacts.contains_key("MeQuery.graphql.js"));
}

#[test]
fn a_broken_source_fails_the_cycle_with_zero_writes() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner(false);
    runner.compile_all();
    let before = fixture.artifact_contents();

    write_file(&fixture.src_dir.join("Broken.graphql"), "query Broken {");
    assert_eq!(runner.compile_all(), CompileOutcome::Error);
    assert!(!runner.last_errors().is_empty());
    assert_eq!(fixture.artifact_contents(), before);

    // Watch-style recovery: fixing the file makes the next cycle succeed.
    write_file(
        &fixture.src_dir.join("Broken.graphql"),
        "query Broken { me { id } }",
    );
    assert_eq!(runner.compile_all(), CompileOutcome::Changes);
    assert!(
        fixture
            .artifact_contents()
            .contains_key("Broken.graphql.js"),
    );
}

#[test]
fn duplicate_document_names_across_files_fail_the_cycle() {
    let fixture = Fixture::new();
    write_file(
        &fixture.src_dir.join("MeQueryCopy.graphql"),
        "query MeQuery { me { id } }",
    );

    let mut runner = fixture.runner(false);
    assert_eq!(runner.compile_all(), CompileOutcome::Error);
    assert!(runner.last_errors().iter().any(|error| matches!(
        error,
        UserError::DuplicateDocumentName { document_name, .. }
            if document_name == "MeQuery",
    )));
    assert!(fixture.artifact_contents().is_empty());
}

#[test]
fn validate_mode_reports_drift_without_writing() {
    let fixture = Fixture::new();

    let mut validator = fixture.runner(true);
    assert_eq!(validator.compile_all(), CompileOutcome::Changes);
    assert!(fixture.artifact_contents().is_empty());

    let mut writer = fixture.runner(false);
    assert_eq!(writer.compile_all(), CompileOutcome::Changes);

    let mut validator = fixture.runner(true);
    assert_eq!(validator.compile_all(), CompileOutcome::NoChanges);
}

#[test]
fn base_parser_documents_resolve_spreads_but_are_never_generated() {
    let temp = tempfile::tempdir().unwrap();
    let src_dir = temp.path().join("src");
    let base_dir = temp.path().join("base");
    let out_dir = temp.path().join("__generated__");

    write_file(
        &base_dir.join("SharedFields.graphql"),
        "fragment SharedFields on User { id name }",
    );
    write_file(
        &src_dir.join("AppQuery.graphql"),
        "query AppQuery { me { ...SharedFields } }",
    );

    let mut config = CompilerConfig::default();
    config.parsers.insert(
        "graphql".to_string(),
        ParserConfig::new(src_dir, &["graphql"]),
    );
    config.parsers.insert(
        "base".to_string(),
        ParserConfig::new(base_dir, &["graphql"]),
    );
    let mut writer = WriterConfig::new("graphql", "javascript", out_dir.clone());
    writer.base_parsers.push("base".to_string());
    config.writers.insert("js".to_string(), writer);

    let mut runner = CompilerRunner::new(test_schema(), config);
    assert_eq!(runner.compile_all(), CompileOutcome::Changes);

    let names: Vec<String> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["AppQuery.graphql.js"]);
}

#[tokio::test]
async fn watch_cycles_are_driven_by_change_notifications() {
    let fixture = Fixture::new();
    let mut runner = fixture.runner(false);

    let (tx, rx) = mpsc::channel(16);

    // Queue a notification for a real edit before the watch loop starts;
    // it must be picked up after the initial cycle, not lost.
    write_file(
        &fixture.src_dir.join("OtherQuery.graphql"),
        "query OtherQuery { me { id name } }",
    );
    tx.send(FileEvent {
        kind: FileEventKind::Modified,
        path: fixture.src_dir.join("OtherQuery.graphql"),
    })
    .await
    .unwrap();
    drop(tx);

    let outcome = runner.watch_all(rx).await;
    // The final cycle re-parses the edited file; since the initial cycle
    // already saw the edited contents, nothing changes on disk.
    assert_eq!(outcome, CompileOutcome::NoChanges);
    assert!(
        fixture
            .artifact_contents()
            .contains_key("OtherQuery.graphql.js"),
    );
}

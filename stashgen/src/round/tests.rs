use error_stack::Report;
use serde_json::json;

use super::*;
use crate::diagnostics::{CollectingDiagnostics, ValidationError};
use crate::emit::{MemoryFiler, SourceSink};
use crate::error::Error;
use crate::test_support::{CountingModel, manifest_model};

fn run(manifest: serde_json::Value) -> (RoundReport, MemoryFiler, CollectingDiagnostics) {
    let model = manifest_model(manifest);
    let mut diagnostics = CollectingDiagnostics::new();
    let mut filer = MemoryFiler::new();
    let report = Processor::new(GeneratorConfig::default())
        .process_round(&model, &mut diagnostics, &mut filer)
        .unwrap();
    (report, filer, diagnostics)
}

fn source<'a>(filer: &'a MemoryFiler, artifact: &str) -> &'a str {
    filer.source(&TypeName::from(artifact)).unwrap()
}

fn position(source: &str, needle: &str) -> usize {
    source
        .find(needle)
        .unwrap_or_else(|| panic!("'{needle}' not found in:\n{source}"))
}

fn two_level_chain() -> serde_json::Value {
    json!({
        "types": [
            {
                "package": "com.example", "name": "Parent",
                "superclass": "android.app.Activity",
                "fields": [{ "name": "y", "type": "int", "marked": true }]
            },
            {
                "package": "com.example", "name": "Child",
                "superclass": "com.example.Parent",
                "fields": [{ "name": "x", "type": "int", "marked": true }]
            }
        ]
    })
}

#[test]
fn test_chain_saves_ancestor_first_and_restores_ancestor_last() {
    let (report, filer, diagnostics) = run(two_level_chain());
    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(report.artifacts.len(), 2);

    let child = source(&filer, "com.example.Child$$Stash");
    assert!(child.contains("extends com.example.Parent$$Stash<T>"));
    // save: the parent artifact stores y before the child stores x
    assert!(position(child, "super.save(target, state);") < position(child, "H.putInt(state, \"x\", target.x);"));
    // restore: x is retrieved before delegating to the parent, which retrieves y
    assert!(
        position(child, "target.x = H.getInt(state, \"x\");")
            < position(child, "super.restore(target, state);")
    );
    assert!(!child.contains("\"y\""));

    let parent = source(&filer, "com.example.Parent$$Stash");
    assert!(parent.contains("extends stash.Stash.Object<T>"));
    assert!(parent.contains("H.putInt(state, \"y\", target.y);"));
}

#[test]
fn test_private_field_is_reported_and_not_generated() {
    let (report, filer, diagnostics) = run(json!({
        "types": [{
            "package": "com.example", "name": "Main",
            "fields": [
                { "name": "x", "type": "int", "marked": true, "modifiers": ["private"] },
                { "name": "count", "type": "int", "marked": true }
            ]
        }]
    }));

    assert_eq!(report.error_count, 1);
    assert!(matches!(
        diagnostics.diagnostics()[0].error,
        ValidationError::InvalidFieldModifier { .. }
    ));

    let main = source(&filer, "com.example.Main$$Stash");
    assert!(!main.contains("target.x"));
    assert!(!main.contains("\"x\""));
    assert!(main.contains("target.count = H.getInt(state, \"count\");"));
    assert_eq!(report.artifacts[0].skipped_fields, vec!["x".to_string()]);
}

#[test]
fn test_string_field_without_ancestor() {
    let (report, filer, _) = run(json!({
        "types": [{
            "package": "com.example", "name": "Main",
            "superclass": "android.app.Activity",
            "fields": [{ "name": "title", "type": "java.lang.String", "marked": true }]
        }]
    }));

    let main = source(&filer, "com.example.Main$$Stash");
    let restore = &main[position(main, "restore(")..position(main, "save(")];
    assert!(position(restore, "if (state == null) {") < position(restore, "H.getString"));
    assert_eq!(restore.matches("H.get").count(), 1);
    assert_eq!(restore.matches("target.").count(), 1);
    assert!(restore.contains("super.restore(target, state);"));
    assert!(main.contains("extends stash.Stash.Object<T>"));

    let summary = &report.artifacts[0];
    assert_eq!(summary.variant, ArtifactVariant::Plain);
    assert_eq!(summary.parent, "stash.Stash.Object");
    assert_eq!(summary.fields, vec!["title".to_string()]);
}

#[test]
fn test_renderable_type_threads_parent_state() {
    let (report, filer, _) = run(json!({
        "types": [{
            "package": "com.example", "name": "Gauge",
            "superclass": "android.widget.FrameLayout",
            "fields": [{ "name": "level", "type": "float", "marked": true }]
        }]
    }));
    assert_eq!(report.artifacts[0].variant, ArtifactVariant::Renderable);

    let gauge = source(&filer, "com.example.Gauge$$Stash");
    assert!(gauge.contains("extends stash.Stash.View<T>"));

    let restore = &gauge[position(gauge, "restore(")..position(gauge, "save(")];
    assert!(
        position(restore, "H.getParent(state)")
            < position(restore, "target.level = H.getFloat(state, \"level\");")
    );
    assert!(restore.contains("return super.restore(target, parent);"));

    let save = &gauge[position(gauge, "save(")..];
    assert!(
        position(save, "H.putParent(super.save(target, p))")
            < position(save, "H.putFloat(state, \"level\", target.level);")
    );
    assert!(save.contains("return state;"));
}

#[test]
fn test_renderable_child_extends_renderable_ancestor() {
    let (_, filer, _) = run(json!({
        "types": [
            {
                "package": "com.example", "name": "BaseView",
                "superclass": "android.view.View",
                "fields": [{ "name": "a", "type": "int", "marked": true }]
            },
            { "package": "com.example", "name": "MiddleView", "superclass": "com.example.BaseView" },
            {
                "package": "com.example", "name": "LeafView",
                "superclass": "com.example.MiddleView",
                "fields": [{ "name": "b", "type": "java.lang.String", "marked": true }]
            }
        ]
    }));

    assert_eq!(filer.sources().len(), 2);
    let leaf = source(&filer, "com.example.LeafView$$Stash");
    assert!(leaf.contains("extends com.example.BaseView$$Stash<T>"));
}

#[test]
fn test_each_round_starts_with_an_empty_cache() {
    let model = CountingModel::new(manifest_model(two_level_chain()));
    let processor = Processor::new(GeneratorConfig::default());

    let first = processor
        .process_round(&model, &mut CollectingDiagnostics::new(), &mut MemoryFiler::new())
        .unwrap();
    let inspections = model.marked_field_inspections();
    assert!(inspections > 0);

    let second = processor
        .process_round(&model, &mut CollectingDiagnostics::new(), &mut MemoryFiler::new())
        .unwrap();
    assert_eq!(model.marked_field_inspections(), inspections * 2);
    assert_eq!(first, second);
}

#[test]
fn test_type_with_only_invalid_fields_keeps_its_artifact() {
    let (report, filer, diagnostics) = run(json!({
        "types": [{
            "package": "com.example", "name": "Main",
            "fields": [{ "name": "handle", "type": "java.lang.Thread", "marked": true }]
        }],
        "prelude": true
    }));

    assert_eq!(diagnostics.error_count(), 1);
    assert!(matches!(
        diagnostics.diagnostics()[0].error,
        ValidationError::UnrecognizedFieldType { .. }
    ));
    assert!(report.has_errors());
    assert!(filer.source(&TypeName::from("com.example.Main$$Stash")).is_some());
    assert!(report.artifacts[0].fields.is_empty());
}

#[test]
fn test_sink_failure_aborts_the_round() {
    struct RefusingFiler;

    impl Filer for RefusingFiler {
        fn create_source<'a>(
            &'a mut self,
            name: &TypeName,
            _origin: &TypeName,
        ) -> Result<Box<dyn SourceSink + 'a>> {
            Err(Report::new(Error::failed_to("open sink", name)))
        }
    }

    let model = manifest_model(two_level_chain());
    let result = Processor::new(GeneratorConfig::default()).process_round(
        &model,
        &mut CollectingDiagnostics::new(),
        &mut RefusingFiler,
    );
    assert!(result.is_err());
}

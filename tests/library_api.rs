//! Integration tests for the component inspector library API.

use component_inspector::inspect::InspectError;
use component_inspector::model::MemberCategory;
use component_inspector::provider::LoadError;
use component_inspector::{
    CallResult, Discovery, DumpOptions, InspectorError, InstanceUse, InvocationRequest,
    ListingOptions, OpenOptions, Session, Value, open, render_plain,
};
use std::path::{Path, PathBuf};

fn example() -> Session {
    open(Path::new("example.dll"), OpenOptions::default()).unwrap()
}

fn geometry_manifest() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/geometry.json")
}

fn no_args() -> Vec<String> {
    Vec::new()
}

#[test]
fn test_open_example_component() {
    let session = example();
    let snapshot = session.snapshot().unwrap();
    assert_eq!(snapshot.len(), 4);
    assert!(snapshot.find("ExampleLibrary.IDevice").is_some());
    assert_eq!(session.instance_count(), 0);
}

#[test]
fn test_method_listing_is_flat_and_qualified() {
    let session = example();
    let out = render_plain(
        &session
            .list_members(MemberCategory::Method, &ListingOptions::default())
            .unwrap(),
    );
    assert!(out.contains("public String Device.SetStatus(Int32 value)"), "{}", out);
    assert!(out.contains("(inherited) public virtual String Device.ToString()"));
}

#[test]
fn test_declared_only_listing_hides_inherited_members() {
    let session = example();
    let options = ListingOptions {
        discovery: Discovery::DeclaredOnly,
        grouping: None,
    };
    let out = render_plain(&session.list_members(MemberCategory::Method, &options).unwrap());
    assert!(!out.contains("ToString"));
    assert!(out.contains("PrintStatus"));
}

#[test]
fn test_dump_is_deterministic_and_complete() {
    let session = example();
    let first = session.dump(&DumpOptions::default()).unwrap();
    let second = session.dump(&DumpOptions::default()).unwrap();
    assert_eq!(first, second);

    let plain = render_plain(&first);
    assert!(plain.contains("namespace ExampleLibrary"));
    assert!(plain.contains("public class Device : IDevice"));
    assert!(plain.contains("internal enum DeviceStatus"));
}

#[test]
fn test_instance_is_created_once_and_reused() {
    let mut session = example();

    let first = session
        .invoke(&InvocationRequest::new("ExampleLibrary.Device.SetStatus", ["1"]))
        .unwrap();
    assert_eq!(first.instance, InstanceUse::Fresh);
    assert_eq!(first.console, "Status changed from Off to On\n");
    assert_eq!(
        first.result,
        CallResult::Returned(Value::from("Status updated to 1"))
    );

    let second = session
        .invoke(&InvocationRequest::new("ExampleLibrary.Device.PrintStatus", no_args()))
        .unwrap();
    assert_eq!(second.instance, InstanceUse::Reused);
    assert_eq!(second.console, "Device 'MyDevice' is currently: On\n");
    assert_eq!(second.result, CallResult::NoResult);
    assert_eq!(session.instance_count(), 1);

    let line = render_plain(&component_inspector::output::invocation(&second));
    assert!(line.contains("Invoking: (cached) ExampleLibrary.Device.PrintStatus()"), "{}", line);
    assert!(line.ends_with("Result: <no result>\n"));
}

#[test]
fn test_system_fallback_for_static_calls() {
    let mut session = example();
    let result = session
        .invoke(&InvocationRequest::new("Math.Max", ["3", "-7"]))
        .unwrap();
    assert_eq!(result.instance, InstanceUse::Static);
    assert_eq!(result.result, CallResult::Returned(Value::Int(3)));
    assert_eq!(session.instance_count(), 0);
}

#[test]
fn test_unknown_type_and_method() {
    let mut session = example();
    let err = session
        .invoke(&InvocationRequest::new("Nowhere.Thing", no_args()))
        .unwrap_err();
    assert!(matches!(err, InspectError::TypeNotFound(ref name) if name == "Nowhere"));

    let err = session
        .invoke(&InvocationRequest::new("ExampleLibrary.Device.Explode", no_args()))
        .unwrap_err();
    assert!(matches!(err, InspectError::MethodNotFound { .. }));

    let err = session
        .invoke(&InvocationRequest::new("NoDot", no_args()))
        .unwrap_err();
    assert!(matches!(err, InspectError::InvalidMethodName(_)));
}

#[test]
fn test_open_manifest_from_disk() {
    let session = open(&geometry_manifest(), OpenOptions::default()).unwrap();
    assert_eq!(session.component_name().unwrap(), "Geometry, Version=2.1.0.0");

    let types = render_plain(&session.list_types(&ListingOptions::default()).unwrap());
    assert!(types.contains("Geo.Circle:"));
    assert!(types.contains("Geo.Shape+Kind:"));

    let dump = render_plain(&session.dump(&DumpOptions::default()).unwrap());
    assert!(dump.contains("public abstract class Shape : IMeasurable"), "{}", dump);
    assert!(dump.contains("public sealed class Circle : Shape"));
}

#[test]
fn test_manifest_components_cannot_run_methods() {
    let mut session = open(&geometry_manifest(), OpenOptions::default()).unwrap();

    let err = session
        .invoke(&InvocationRequest::new("Geo.Shape.Scale", ["2"]))
        .unwrap_err();
    assert!(matches!(err, InspectError::CannotInstantiateAbstract(_)));

    let err = session
        .invoke(&InvocationRequest::new("Geo.Circle.Area", no_args()))
        .unwrap_err();
    assert!(matches!(err, InspectError::InvocationFailed { .. }));
}

#[test]
fn test_open_missing_manifest() {
    let err = open(Path::new("/nonexistent/component.json"), OpenOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, InspectorError::Load(LoadError::FileNotFound(_))));
}

#[test]
fn test_open_unsupported_format() {
    let err = open(Path::new("library.so"), OpenOptions::default())
        .err()
        .unwrap();
    assert!(err.to_string().contains(".so"));
}

use std::path::Path;

use ifacemock_core::ir::Import;
use ifacemock_core::types::Var;
use ifacemock_extract::{generate_all, generate_each, ExtractError, Options};
use ifacemock_test_fixtures::scenarios::{self, DIRECTIVE_PKG, INTERNAL_PKG};
use ifacemock_test_fixtures::PackageBuilder;
use pretty_assertions::assert_eq;

fn internal(set: &str, name: &str) -> String {
    format!("{}/{}/{}", INTERNAL_PKG, set, name)
}

#[test]
fn test_sink_imports_are_disambiguated() {
    let files = generate_all(&[scenarios::sink_package()], &Options::default()).unwrap();
    assert_eq!(files.len(), 1);
    let file = &files[Path::new(scenarios::SINK_OUTPUT)];

    assert_eq!(
        file.imports,
        vec![
            Import::new(internal("one", "sort")),
            Import::named(internal("one", "testing"), "testing2"),
            Import::named(internal("one", "atomic"), "atomic2"),
            Import::named(internal("two", "sort"), "sort2"),
            Import::named(internal("two", "testing"), "testing3"),
            Import::named(internal("two", "atomic"), "atomic3"),
            Import::named("sort", "sort3"),
            Import::new("testing"),
            Import::new("sync/atomic"),
        ]
    );

    let signatures: Vec<String> = file
        .interfaces
        .iter()
        .map(|iface| format!("{}.f{}", iface.name, iface.methods[0].params.types_string()))
        .collect();
    assert_eq!(
        signatures,
        vec![
            "Source1.f(sort.Interface, *testing2.T, *atomic2.Bool)",
            "Source2.f(sort2.Interface, *testing3.T, *atomic3.Bool)",
            "Source3.f(sort3.Interface, *testing.T, *atomic.Bool)",
        ]
    );
}

#[test]
fn test_generation_is_deterministic() {
    let packages = vec![
        scenarios::sink_package(),
        scenarios::diamond_package(),
    ];
    let first = generate_all(&packages, &Options::default()).unwrap();
    let second = generate_all(&packages, &Options::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_generic_interface_file() {
    let files = generate_all(&[scenarios::generic_package()], &Options::default()).unwrap();
    let file = &files[Path::new("examples/directive/generic_mock.go")];

    assert_eq!(file.imports, vec![Import::new(INTERNAL_PKG)]);
    let iface = &file.interfaces[0];
    assert_eq!(iface.name, "Generic");
    assert_eq!(
        iface.type_params.to_string(),
        "[T interface{byte | internal.Internal}, U any]"
    );
    assert_eq!(iface.type_params.names(), "[T, U]");
}

#[test]
fn test_imports_follow_first_use() {
    let files =
        generate_all(&[scenarios::my_interface_package()], &Options::default()).unwrap();
    let file = &files[Path::new("examples/directive/myInterface_mock.go")];

    assert_eq!(
        file.imports,
        vec![
            Import::new(INTERNAL_PKG),
            Import::new("html/template"),
            Import::named("text/template", "renamed"),
            Import::named("os", "."),
            Import::new("fmt"),
            Import::new("context"),
            Import::new("time"),
        ]
    );
    assert!(!file.imports.iter().any(Import::is_blank));
    assert_eq!(file.interfaces[0].methods.len(), 16);
}

#[test]
fn test_default_output_file_option() {
    let options = Options::default().with_default_output_file("mocks.go");
    let files = generate_all(&[scenarios::generic_package()], &options).unwrap();
    assert!(files.contains_key(Path::new("examples/directive/mocks.go")));
}

#[test]
fn test_invalid_interface_fails_its_whole_file() {
    let results = generate_each(&[scenarios::broken_package()], &Options::default()).unwrap();

    // Good is valid but shares api_mock.go with Bad
    match &results[Path::new("broken/api_mock.go")] {
        Err(ExtractError::InvalidType { name, diagnostics }) => {
            assert_eq!(name, "Bad");
            assert_eq!(diagnostics[0].to_string(), "broken/api.go:10:10: undefined: Widget");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(
        results[Path::new("broken/other_mock.go")]
            .as_ref()
            .unwrap()
            .interfaces[0]
            .name,
        "Fine"
    );
}

#[test]
fn test_synthesized_import_is_not_checked_for_collisions() {
    let mut b = PackageBuilder::new(DIRECTIVE_PKG, "directive");
    let main = b.file("examples/directive/clock.go");
    let other = b.file("examples/directive/ticker.go");
    b.import(main, Import::new("github.com/acme/time"));
    b.import(other, Import::new("time"));

    let acme_struct = b.empty_struct();
    let acme_time = b.foreign("github.com/acme/time", "Zone", acme_struct);
    let std_struct = b.empty_struct();
    let std_time = b.foreign("time", "Time", std_struct);

    let now_sig = b.signature(vec![], vec![Var::unnamed(std_time)], false);
    let now = b.method(other, 4, "Now", now_sig);
    let ticker = b.interface(vec![now], vec![]);
    let (_, ticker) = b.declare_type(other, "Ticker", ticker, &[], 3);

    let zone_sig = b.signature(vec![], vec![Var::unnamed(acme_time)], false);
    let zone = b.method(main, 6, "Zone", zone_sig);
    let clock = b.interface(vec![zone], vec![ticker]);
    b.declare_type(main, "Clock", clock, &["//go:mock"], 5);

    let files = generate_all(&[b.build()], &Options::default()).unwrap();
    let file = &files[Path::new("examples/directive/clock_mock.go")];

    // Both packages print as "time"; resolving this is left to the renderer's
    // import cleanup
    assert_eq!(
        file.imports,
        vec![Import::new("github.com/acme/time"), Import::new("time")]
    );
    let results: Vec<String> = file.interfaces[0]
        .methods
        .iter()
        .map(|m| m.results.to_string())
        .collect();
    assert_eq!(results, vec!["time.Zone", "time.Time"]);
}

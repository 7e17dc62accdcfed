//! Canned packages modelled on the directive examples shipped with the tool
//!
//! Each function returns what a loader would produce for a small, realistic
//! package, so pipeline tests can assert on exact IR.

use ifacemock_core::ir::Import;
use ifacemock_core::source::ObjectKind;
use ifacemock_core::types::{BasicKind, Var};
use ifacemock_core::{Package, TypeKind};

use crate::builder::PackageBuilder;

pub const DIRECTIVE_PKG: &str = "github.com/acme/mock/examples/directive";
pub const INTERNAL_PKG: &str = "github.com/acme/mock/examples/directive/internal";
pub const SHAPES_PKG: &str = "github.com/acme/shapes";
pub const BROKEN_PKG: &str = "github.com/acme/broken";

pub const SINK_OUTPUT: &str = "examples/directive/sink_mock.go";

/// Three files whose interfaces all go to `sink_mock.go`. `source1.go` and
/// `source2.go` import two different internal `sort`/`testing`/`atomic`
/// sets; `source3.go` imports the standard library ones, which also collide
/// with the support imports every mock needs.
pub fn sink_package() -> Package {
    let mut b = PackageBuilder::new(DIRECTIVE_PKG, "directive");
    let sources = [
        ("source1.go", "Source1", Some("one")),
        ("source2.go", "Source2", Some("two")),
        ("source3.go", "Source3", None),
    ];

    for (file_name, iface_name, set) in sources {
        let file = b.file(&format!("examples/directive/{}", file_name));
        let (atomic, sort, testing) = match set {
            Some(set) => (
                format!("{}/{}/atomic", INTERNAL_PKG, set),
                format!("{}/{}/sort", INTERNAL_PKG, set),
                format!("{}/{}/testing", INTERNAL_PKG, set),
            ),
            None => (
                "sync/atomic".to_string(),
                "sort".to_string(),
                "testing".to_string(),
            ),
        };
        for path in [&atomic, &sort, &testing] {
            b.import(file, Import::new(path.as_str()));
        }

        let sort_iface = b.interface(vec![], vec![]);
        let sort_interface = b.foreign(&sort, "Interface", sort_iface);
        let t_struct = b.empty_struct();
        let testing_t = b.foreign(&testing, "T", t_struct);
        let testing_t_ptr = b.pointer(testing_t);
        let bool_struct = b.empty_struct();
        let atomic_bool = b.foreign(&atomic, "Bool", bool_struct);
        let atomic_bool_ptr = b.pointer(atomic_bool);

        let sig = b.signature(
            vec![
                Var::unnamed(sort_interface),
                Var::unnamed(testing_t_ptr),
                Var::unnamed(atomic_bool_ptr),
            ],
            vec![],
            false,
        );
        let f = b.method(file, 24, "f", sig);
        let iface = b.interface(vec![f], vec![]);
        b.declare_type(
            file,
            iface_name,
            iface,
            &[
                format!("// {} feeds the shared sink file.", iface_name).as_str(),
                "//",
                "//go:mock sink_mock.go",
            ],
            23,
        );
    }

    b.build()
}

/// `Generic[T interface{ byte | internal.Internal }, U any]` with a bare
/// `//go:mock` directive.
pub fn generic_package() -> Package {
    let mut b = PackageBuilder::new(DIRECTIVE_PKG, "directive");
    let file = b.file("examples/directive/generic.go");
    b.import(file, Import::new(INTERNAL_PKG));

    let byte = b.basic(BasicKind::Byte);
    let internal_struct = b.empty_struct();
    let internal = b.foreign(INTERNAL_PKG, "Internal", internal_struct);
    let union = b.union(vec![byte, internal]);
    let t_constraint = b.interface(vec![], vec![union]);
    let u_constraint = b.any();
    let t = b.type_param("T", t_constraint);
    let u = b.type_param("U", u_constraint);

    let get_t_sig = b.signature(vec![], vec![Var::unnamed(t)], false);
    let get_u_sig = b.signature(vec![], vec![Var::unnamed(u)], false);
    let get_t = b.method(file, 9, "GetT", get_t_sig);
    let get_u = b.method(file, 10, "GetU", get_u_sig);
    let iface = b.interface(vec![get_t, get_u], vec![]);

    let (_, generic) = b.declare_type(
        file,
        "Generic",
        iface,
        &[
            "// Generic is a sample generic interface with a complex type parameter list.",
            "//",
            "//go:mock",
        ],
        8,
    );
    b.set_type_params(generic, vec![("T", t_constraint), ("U", u_constraint)]);
    b.build()
}

/// `Diamond` embeds `Left` and `Right`, which both embed `Base`.
pub fn diamond_package() -> Package {
    let mut b = PackageBuilder::new(SHAPES_PKG, "shapes");
    let file = b.file("shapes/shapes.go");

    let error = b.error();
    let byte = b.basic(BasicKind::Byte);
    let bytes = b.slice(byte);
    let int = b.basic(BasicKind::Int);

    let close_sig = b.signature(vec![], vec![Var::unnamed(error)], false);
    let close = b.method(file, 11, "Close", close_sig);
    let base_iface = b.interface(vec![close], vec![]);
    let (_, base) = b.declare_type(file, "Base", base_iface, &[], 10);

    let io_sig = b.signature(
        vec![Var::new("p", bytes)],
        vec![Var::new("n", int), Var::new("err", error)],
        false,
    );
    let read = b.method(file, 16, "Read", io_sig);
    let left_iface = b.interface(vec![read], vec![base]);
    let (_, left) = b.declare_type(file, "Left", left_iface, &[], 15);

    let write = b.method(file, 21, "Write", io_sig);
    let right_iface = b.interface(vec![write], vec![base]);
    let (_, right) = b.declare_type(file, "Right", right_iface, &[], 20);

    let flush_sig = b.signature(vec![], vec![Var::unnamed(error)], false);
    let flush = b.method(file, 28, "Flush", flush_sig);
    let diamond_iface = b.interface(vec![flush], vec![left, right]);
    b.declare_type(file, "Diamond", diamond_iface, &["//go:mock"], 25);

    b.build()
}

/// `broken/api.go` sends `Good` and `Bad` to `api_mock.go`; `Bad` refers to
/// an undefined type. `broken/other.go` sends `Fine` to `other_mock.go`.
pub fn broken_package() -> Package {
    let mut b = PackageBuilder::new(BROKEN_PKG, "broken");
    let api = b.file("broken/api.go");
    let other = b.file("broken/other.go");

    let error = b.error();
    let ping_sig = b.signature(vec![], vec![Var::unnamed(error)], false);
    let ping = b.method(api, 5, "Ping", ping_sig);
    let good_iface = b.interface(vec![ping], vec![]);
    b.declare_type(api, "Good", good_iface, &["//go:mock api_mock.go"], 4);

    let invalid = b.invalid();
    let fetch_sig = b.signature(vec![Var::new("w", invalid)], vec![], false);
    let fetch = b.method(api, 10, "Fetch", fetch_sig);
    let bad_iface = b.interface(vec![fetch], vec![]);
    b.declare_type(api, "Bad", bad_iface, &["//go:mock api_mock.go"], 9);
    b.diagnostic("broken/api.go:10:10", "undefined: Widget");

    let stop_sig = b.signature(vec![], vec![], false);
    let stop = b.method(other, 4, "Stop", stop_sig);
    let fine_iface = b.interface(vec![stop], vec![]);
    b.declare_type(other, "Fine", fine_iface, &["//go:mock"], 3);

    // Annotated, but not an interface
    let int = b.basic(BasicKind::Int);
    let pkg = b.package_ref();
    let counter = b.named(Some(pkg), "Counter", int);
    b.declare(
        other,
        "Counter",
        ObjectKind::TypeName,
        counter,
        &["//go:mock counter_mock.go"],
        8,
    );

    b.build()
}

/// A trimmed `MyInterface` exercising every import style: plain, renamed,
/// dot and blank imports, a context parameter, a self reference, and an
/// embedded same-package interface declared in a file that imports `time`.
pub fn my_interface_package() -> Package {
    let mut b = PackageBuilder::new(DIRECTIVE_PKG, "directive");
    let file = b.file("examples/directive/myInterface.go");
    let local_file = b.file("examples/directive/local.go");

    for import in [
        Import::new("context"),
        Import::new("fmt"),
        Import::new("html/template"),
        Import::named("os", "."),
        Import::named("text/template", "renamed"),
        Import::named("embed", "_"),
        Import::new(INTERNAL_PKG),
    ] {
        b.import(file, import);
    }
    b.import(local_file, Import::new("time"));

    let int = b.basic(BasicKind::Int);
    let string = b.basic(BasicKind::String);
    let strings = b.slice(string);
    let error = b.error();

    let internal_struct = b.empty_struct();
    let internal = b.foreign(INTERNAL_PKG, "Internal", internal_struct);
    let html_struct = b.empty_struct();
    let html_template = b.foreign("html/template", "Template", html_struct);
    let text_struct = b.empty_struct();
    let text_template = b.foreign("text/template", "Template", text_struct);
    let file_struct = b.empty_struct();
    let os_file = b.foreign("os", "File", file_struct);
    let ctx_iface = b.interface(vec![], vec![]);
    let context = b.foreign("context", "Context", ctx_iface);

    let stringer_result = b.signature(vec![], vec![Var::unnamed(string)], false);
    let stringer_method = b.method(local_file, 0, "String", stringer_result);
    let stringer_iface = b.interface(vec![stringer_method], vec![]);
    let stringer = b.foreign("fmt", "Stringer", stringer_iface);
    let embeds_stringer = b.interface(vec![], vec![stringer]);

    let chan = b.add(TypeKind::Chan {
        dir: Default::default(),
        elem: int,
    });
    let int_map = b.map(int, int);

    // Local, declared in local.go, only reachable through embedding
    let duration_int = b.basic(BasicKind::Int64);
    let duration = b.foreign("time", "Duration", duration_int);
    let time_struct = b.empty_struct();
    let time = b.foreign("time", "Time", time_struct);
    let deadline_sig = b.signature(vec![], vec![Var::unnamed(time)], false);
    let timeout_sig = b.signature(vec![Var::new("d", duration)], vec![], false);
    let deadline = b.method(local_file, 6, "Deadline", deadline_sig);
    let timeout = b.method(local_file, 7, "Timeout", timeout_sig);
    let local_iface = b.interface(vec![deadline, timeout], vec![]);
    let (_, local) = b.declare_type(local_file, "Local", local_iface, &[], 5);

    let my_interface = b.reserve();
    let mut methods = Vec::new();
    let mut line = 20;
    let mut add = |b: &mut PackageBuilder, name: &str, params: Vec<Var>, results: Vec<Var>, variadic: bool| {
        let sig = b.signature(params, results, variadic);
        methods.push(b.method(file, line, name, sig));
        line += 1;
    };

    add(&mut b, "NoParamsOrReturn", vec![], vec![], false);
    add(&mut b, "UnnamedVariadicParam", vec![Var::unnamed(strings)], vec![], true);
    add(&mut b, "NamedParam", vec![Var::new("str", string)], vec![], false);
    add(&mut b, "InternalTypeParam", vec![Var::new("internal", internal)], vec![], false);
    add(&mut b, "ImportedParam", vec![Var::new("tmpl", html_template)], vec![], false);
    add(&mut b, "RenamedImportParam", vec![Var::new("tmpl", text_template)], vec![], false);
    add(&mut b, "DotImportParam", vec![Var::new("file", os_file)], vec![], false);
    add(&mut b, "SelfReferentialParam", vec![Var::new("intf", my_interface)], vec![], false);
    add(&mut b, "EmbeddedInterfaceParam", vec![Var::new("intf", embeds_stringer)], vec![], false);
    add(&mut b, "ChannelParam", vec![Var::new("chanParam", chan)], vec![], false);
    add(&mut b, "MapReturn", vec![], vec![Var::unnamed(int_map)], false);
    add(&mut b, "MultipleUnnamedReturn", vec![], vec![Var::unnamed(int), Var::unnamed(error)], false);
    add(&mut b, "NamedReturn", vec![], vec![Var::new("err", error)], false);
    add(&mut b, "ContextParam", vec![Var::new("ctx", context), Var::new("id", string)], vec![], false);

    let iface = b.interface(methods, vec![local]);
    b.declare_reserved(
        file,
        my_interface,
        "MyInterface",
        iface,
        &[
            "// MyInterface is a sample interface with a large number of",
            "// methods of different signatures.",
            "//",
            "//go:mock",
        ],
        19,
    );

    b.build()
}

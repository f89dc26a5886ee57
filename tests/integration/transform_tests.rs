use crate::common::{ok, unavailable, ScriptedGenerator};
use crate::test_utils::init_test_logging;
use pretty_assertions::assert_eq;
use zero_docs::doc::{document_module, TransformStats};
use zero_docs::{parse_module, Codegen, UnitKind, UnitKinds};

fn document(source: &str, generator: &ScriptedGenerator, kinds: UnitKinds) -> (String, TransformStats) {
    init_test_logging();
    let outcome = document_module(parse_module(source).unwrap(), generator, kinds);
    (outcome.module.code(), outcome.stats)
}

#[test]
fn test_method_scenario() {
    let generator = ScriptedGenerator::always("Returns 1.");
    let (code, stats) = document(
        "class A:\n    def m(self):\n        return 1\n",
        &generator,
        UnitKinds::only(&[UnitKind::Function]),
    );

    assert_eq!(
        code,
        "class A:\n    def m(self):\n        \"\"\"Returns 1.\"\"\"\n        return 1\n"
    );
    assert_eq!(stats, TransformStats { documented: 1, failed: 0 });
    assert_eq!(generator.kinds(), vec![UnitKind::Function]);
}

#[test]
fn test_second_pass_is_a_no_op() {
    let source = "\
import os


class Store:
    def get(self, key):
        return os.environ[key]

    async def fetch(self):
        pass


def helper():
    return Store()
";
    let first = ScriptedGenerator::always("Summary line.\n\nMore detail.");
    let (documented, stats) = document(source, &first, UnitKinds::default());
    assert_eq!(stats.documented, 5);

    let second = ScriptedGenerator::always("Should not be used.");
    let (again, stats) = document(&documented, &second, UnitKinds::default());
    assert_eq!(again, documented);
    assert_eq!(stats, TransformStats::default());
    assert_eq!(second.call_count(), 0);
}

#[test]
fn test_only_functions_are_documented() {
    let generator = ScriptedGenerator::always("Doc.");
    let (code, _) = document(
        "class A:\n    def m(self):\n        pass\n\n    class Inner:\n        x = 1\n",
        &generator,
        UnitKinds::only(&[UnitKind::Function]),
    );
    assert_eq!(
        code,
        "class A:\n    def m(self):\n        \"\"\"Doc.\"\"\"\n        pass\n\n    class Inner:\n        x = 1\n"
    );
}

#[test]
fn test_method_continuation_lines_use_body_depth() {
    let generator = ScriptedGenerator::always("Fetch a value.\n\nArgs:\n    key: Lookup key.");
    let (code, _) = document(
        "class A:\n    def get(self, key):\n        return key\n",
        &generator,
        UnitKinds::only(&[UnitKind::Function]),
    );
    assert_eq!(
        code,
        "\
class A:
    def get(self, key):
        \"\"\"
        Fetch a value.

        Args:
            key: Lookup key.
        \"\"\"
        return key
"
    );
}

#[test]
fn test_failed_unit_does_not_stop_the_file() {
    let generator = ScriptedGenerator::scripted(vec![unavailable(), ok("Second.")]);
    let (code, stats) = document(
        "def first():\n    pass\n\ndef second():\n    pass\n",
        &generator,
        UnitKinds::only(&[UnitKind::Function]),
    );
    assert_eq!(
        code,
        "def first():\n    pass\n\ndef second():\n    \"\"\"Second.\"\"\"\n    pass\n"
    );
    assert_eq!(stats, TransformStats { documented: 1, failed: 1 });
}

#[test]
fn test_unusable_reply_is_a_unit_failure() {
    let generator = ScriptedGenerator::scripted(vec![ok("Use \"\"\"quotes\"\"\" carefully."), ok("Fine.")]);
    let (code, stats) = document(
        "def a():\n    pass\ndef b():\n    pass\n",
        &generator,
        UnitKinds::only(&[UnitKind::Function]),
    );
    assert_eq!(code, "def a():\n    pass\ndef b():\n    \"\"\"Fine.\"\"\"\n    pass\n");
    assert_eq!(stats.failed, 1);
}

#[test]
fn test_enclosing_units_see_member_docstrings() {
    let generator = ScriptedGenerator::scripted(vec![ok("Method."), ok("Class."), ok("Module.")]);
    let (code, _) = document(
        "class A:\n    def m(self):\n        pass\n",
        &generator,
        UnitKinds::default(),
    );

    let calls = generator.calls();
    assert_eq!(
        generator.kinds(),
        vec![UnitKind::Function, UnitKind::Class, UnitKind::Module]
    );
    assert_eq!(calls[0].source, "def m(self):\n    pass\n");
    assert_eq!(
        calls[1].source,
        "class A:\n    def m(self):\n        \"\"\"Method.\"\"\"\n        pass\n"
    );
    assert_eq!(
        code,
        "\"\"\"Module.\"\"\"\nclass A:\n    \"\"\"Class.\"\"\"\n    def m(self):\n        \"\"\"Method.\"\"\"\n        pass\n"
    );
}

#[test]
fn test_nested_functions_and_compound_blocks() {
    let generator = ScriptedGenerator::always("Doc.");
    let (code, stats) = document(
        "if True:\n    def outer():\n        def inner():\n            pass\n        return inner\n",
        &generator,
        UnitKinds::only(&[UnitKind::Function]),
    );
    assert_eq!(
        code,
        "if True:\n    def outer():\n        \"\"\"Doc.\"\"\"\n        def inner():\n            \"\"\"Doc.\"\"\"\n            pass\n        return inner\n"
    );
    assert_eq!(stats.documented, 2);
}

#[test]
fn test_decorated_definition_source() {
    let generator = ScriptedGenerator::always("Index page.");
    let (code, _) = document(
        "# routes\n@app.get(\"/\")\ndef index():\n    return \"ok\"\n",
        &generator,
        UnitKinds::only(&[UnitKind::Function]),
    );
    assert_eq!(generator.calls()[0].source, "@app.get(\"/\")\ndef index():\n    return \"ok\"\n");
    assert_eq!(
        code,
        "# routes\n@app.get(\"/\")\ndef index():\n    \"\"\"Index page.\"\"\"\n    return \"ok\"\n"
    );
}

#[test]
fn test_nothing_active_changes_nothing() {
    let generator = ScriptedGenerator::always("Doc.");
    let source = "def f():\n    pass\n";
    let (code, _) = document(source, &generator, UnitKinds::none());
    assert_eq!(code, source);
    assert_eq!(generator.call_count(), 0);
}

#[test]
fn test_windows_path_reply_becomes_raw_literal() {
    let generator = ScriptedGenerator::always("Reads settings from C:\\users\\app.ini.");
    let (code, stats) = document(
        "def f():\n    pass\n",
        &generator,
        UnitKinds::only(&[UnitKind::Function]),
    );
    assert_eq!(
        code,
        "def f():\n    r\"\"\"Reads settings from C:\\users\\app.ini.\"\"\"\n    pass\n"
    );
    assert_eq!(stats, TransformStats { documented: 1, failed: 0 });

    let second = ScriptedGenerator::always("Should not be used.");
    let (again, _) = document(
        &code,
        &second,
        UnitKinds::only(&[UnitKind::Function, UnitKind::Class]),
    );
    assert_eq!(again, code);
    assert_eq!(second.call_count(), 0);
}

#[test]
fn test_bom_module_keeps_existing_docstring() {
    let generator = ScriptedGenerator::always("Doc.");
    let source = "\u{feff}\"\"\"Existing.\"\"\"\nimport os\n";
    let (code, stats) = document(source, &generator, UnitKinds::default());
    assert_eq!(code, source);
    assert_eq!(stats, TransformStats::default());
    assert_eq!(generator.call_count(), 0);
}

#[test]
fn test_bom_module_gets_docstring_after_the_mark() {
    let generator = ScriptedGenerator::always("Environment helpers.");
    let (code, stats) = document(
        "\u{feff}#!/usr/bin/env python\nimport os\n",
        &generator,
        UnitKinds::only(&[UnitKind::Module]),
    );
    assert_eq!(
        code,
        "\u{feff}#!/usr/bin/env python\n\"\"\"Environment helpers.\"\"\"\nimport os\n"
    );
    assert_eq!(stats.documented, 1);
    assert_eq!(generator.calls()[0].source, "#!/usr/bin/env python\nimport os\n");
}

#[test]
fn test_prelude_runs_a_full_pass() {
    use zero_docs::prelude::*;

    let generator = ScriptedGenerator::always("Doc.");
    let module = parse_module("def f():\n    pass\n").unwrap();
    let outcome =
        DocstringTransformer::new(&generator, UnitKinds::only(&[UnitKind::Function])).transform(module);
    assert_eq!(outcome.module.code(), "def f():\n    \"\"\"Doc.\"\"\"\n    pass\n");
    assert_eq!(outcome.stats, TransformStats { documented: 1, failed: 0 });
}

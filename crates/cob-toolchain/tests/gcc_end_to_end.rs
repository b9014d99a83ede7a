//! Runs the real compiler; each test returns early when `gcc` is absent.

use cob_engine::Obfuscator;
use cob_toolchain::{GccToolchain, LocalSeed};
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

fn gcc_available() -> bool {
    Command::new("gcc").arg("--version").output().is_ok_and(|o| o.status.success())
}

fn defined_alias<'a>(text: &'a str, target: &str) -> Option<&'a str> {
    text.lines()
        .filter_map(|l| l.strip_prefix("#define "))
        .filter_map(|rest| rest.split_once(' '))
        .find(|(_, real)| *real == target)
        .map(|(opaque, _)| opaque)
}

fn obfuscator() -> Obfuscator {
    let gcc = Arc::new(GccToolchain::new("gcc"));
    Obfuscator::new(gcc.clone(), gcc, Arc::new(LocalSeed::new(10000..=99999))).with_rng_seed(2024)
}

fn compile_and_run(source: &Path, dir: &Path) -> i32 {
    let exe = dir.join("a.out");
    let status = Command::new("gcc").arg(source).arg("-o").arg(&exe).status().unwrap();
    assert!(status.success(), "obfuscated source failed to compile");
    Command::new(&exe).status().unwrap().code().unwrap_or(-1)
}

#[tokio::test]
async fn test_minimal_main() {
    if !gcc_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog.c");
    std::fs::write(&input, "int main(){int x=5; return x;}\n").unwrap();

    let report = obfuscator().run(&input).await.unwrap();
    let name = report.output.file_name().unwrap().to_str().unwrap();
    assert_eq!(name, format!("prog{}.c", report.seed));
    assert_eq!(name.len(), "prog.c".len() + 5);

    let text = std::fs::read_to_string(&report.output).unwrap();
    assert!(defined_alias(&text, "main").is_some());
    assert!(defined_alias(&text, "return").is_some());
    let x = &report.mappings.variables["x"];
    assert_eq!(text.matches(x.as_str()).count(), 2);
    assert_eq!(compile_and_run(&report.output, dir.path()), 5);
}

#[tokio::test]
async fn test_comments_locals_and_loops() {
    if !gcc_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("loop.c");
    std::fs::write(
        &input,
        "/* sums numbers */\n\
         int sum(int a, int b) { return a + b; }\n\
         \n\
         \n\
         int main()\n\
         {\n\
         \x20   int total = 0, i;\n\
         \x20   // loop\n\
         \x20   for (i = 0; i < 3; i++)\n\
         \x20       total = sum(total, i);\n\
         \x20   if (total != 3)\n\
         \x20       return 1;\n\
         \x20   return 0;\n\
         }\n",
    )
    .unwrap();

    let report = obfuscator().run(&input).await.unwrap();
    let text = std::fs::read_to_string(&report.output).unwrap();
    assert!(!text.contains("sums numbers"));
    assert!(!text.contains("// loop"));
    assert!(report.mappings.local_functions.contains_key("sum"));
    assert!(!text.contains("sum("));
    assert!(text.lines().all(|l| !l.trim().is_empty()));
    assert_eq!(compile_and_run(&report.output, dir.path()), 0);
}

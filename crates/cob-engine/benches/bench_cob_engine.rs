use cob_core::Signature;
use cob_engine::{compact, Obfuscator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

fn identifier(rng: &mut StdRng) -> String {
    let len = rng.gen_range(3..10);
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

fn generate_source(functions: usize) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    let mut src = String::from("#include <stdio.h>\n#define LIMIT 64\n");
    for f in 0..functions {
        let a = identifier(&mut rng);
        let b = identifier(&mut rng);
        src.push_str(&format!(
            "int fn_{f}(int {a}, int {b})\n{{\n    int total = 0, step = 1;\n    for (int i = 0; i < LIMIT; i++) {{\n        if ({a} > {b}) total += step;\n    }}\n    printf(\"total %d\\n\", total);\n    return total;\n}}\n\n"
        ));
    }
    src.push_str("int main(void)\n{\n    return fn_0(1, 2);\n}\n");
    src
}

fn signatures(functions: usize) -> Vec<Signature> {
    let mut sigs: Vec<Signature> = (0..functions)
        .map(|f| Signature::new(format!("extern int fn_{f} (int, int);"), "bench.c"))
        .collect();
    sigs.push(Signature::new("extern int main (void);", "bench.c"));
    sigs.push(Signature::new("extern int printf (const char *, ...);", "/usr/include/stdio.h"));
    sigs
}

struct Offline;

#[async_trait::async_trait]
impl cob_core::SourceProvider for Offline {
    async fn strip_comments(&self, _path: &Path) -> cob_core::Result<String> {
        Ok(String::new())
    }
}

#[async_trait::async_trait]
impl cob_core::SignatureLister for Offline {
    async fn list_signatures(&self, _path: &Path) -> cob_core::Result<Vec<Signature>> {
        Ok(Vec::new())
    }
}

#[async_trait::async_trait]
impl cob_core::SeedProvider for Offline {
    async fn fetch_seed(&self) -> cob_core::Result<u32> {
        Ok(10000)
    }
}

fn bench_obfuscate(c: &mut Criterion) {
    let tools = std::sync::Arc::new(Offline);
    let ob = Obfuscator::new(tools.clone(), tools.clone(), tools).with_rng_seed(1);
    for &n in &[10usize, 100] {
        let src = generate_source(n);
        let sigs = signatures(n);
        c.bench_function(&format!("obfuscate_{n}_functions"), |b| {
            b.iter(|| black_box(ob.obfuscate_source(black_box(&src), &sigs, Path::new("bench.c"))))
        });
    }
}

fn bench_compact(c: &mut Criterion) {
    let src = generate_source(100);
    c.bench_function("compact_100_functions", |b| {
        b.iter(|| black_box(compact::compact(black_box(&src))))
    });
}

criterion_group!(benches, bench_obfuscate, bench_compact);
criterion_main!(benches);

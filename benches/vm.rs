//! Benchmarks for the compile pipeline and bytecode execution.

use std::io;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use langlang::bytecode::{Chunk, Vm};

/// An expression-heavy program exercising every opcode.
fn arithmetic_program() -> String {
    let mut source = String::new();
    for i in 0..50 {
        source.push_str(&format!("print ({i} + 2) * 3 - 4 / 2\n"));
        source.push_str(&format!("print {i} <= 25\n"));
        source.push_str(&format!("print !({i} == 7)\n"));
    }
    source
}

fn string_program() -> String {
    let mut source = String::new();
    for _ in 0..100 {
        source.push_str("print \"abc\" + \"def\" + \"ghi\"\n");
    }
    source
}

fn compile_chunk(source: &str) -> Chunk {
    langlang::compile(source).expect("benchmark program failed to compile")
}

fn bench_compile(c: &mut Criterion) {
    let source = arithmetic_program();
    c.bench_function("compile_arithmetic", |b| {
        b.iter(|| compile_chunk(black_box(&source)))
    });
}

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");

    let arithmetic = compile_chunk(&arithmetic_program());
    group.bench_function("arithmetic", |b| {
        b.iter(|| {
            let mut vm = Vm::new();
            vm.run_with_output(black_box(&arithmetic), &mut io::sink())
        })
    });

    let strings = compile_chunk(&string_program());
    group.bench_function("string_concat", |b| {
        b.iter(|| {
            let mut vm = Vm::new();
            vm.run_with_output(black_box(&strings), &mut io::sink())
        })
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let source = arithmetic_program();
    c.bench_function("pipeline_end_to_end", |b| {
        b.iter(|| {
            let chunk = compile_chunk(black_box(&source));
            let mut vm = Vm::new();
            vm.run_with_output(&chunk, &mut io::sink())
        })
    });
}

criterion_group!(benches, bench_compile, bench_execute, bench_pipeline);
criterion_main!(benches);

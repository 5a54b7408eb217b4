use criterion::{Criterion, criterion_group, criterion_main};
use lox_runner::core::execution::{ExecutionOptions, execute};
use lox_runner::core::models::{Fixture, InvocationRequest};
use std::time::Duration;
use tokio::runtime::Runtime;

fn bench_execute(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let test_path = dir.path().join("bench.lox");
    std::fs::write(&test_path, "exit 0\n").unwrap();

    let request = InvocationRequest::new("/bin/sh", Fixture::new(&test_path))
        .with_timeout(Duration::from_secs(10));
    let options = ExecutionOptions {
        echo_output: false,
        ..ExecutionOptions::default()
    };

    c.bench_function("execute", |b| {
        b.to_async(&rt).iter(|| async {
            let _ = execute(&request, &options).await;
        });
    });
}

criterion_group!(benches, bench_execute);
criterion_main!(benches);

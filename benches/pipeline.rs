use authorstat::{aggregate, parse_log};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_log(commits: usize, files_per_commit: usize) -> String {
    let mut out = String::new();
    for i in 0..commits {
        let author = i % 17;
        out.push_str(&format!(
            "{i:040x}|Author {author}|author{author}@example.com|2024-01-{:02} 12:00:00 +0000|change {i}\n\n",
            i % 28 + 1
        ));
        for f in 0..files_per_commit {
            out.push_str(&format!("{}\t{}\tsrc/module_{}/file_{f}.rs\n", i % 50, f % 7, i % 13));
        }
        out.push('\n');
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let log = synthetic_log(5_000, 8);
    c.bench_function("parse_log 5k commits", |b| b.iter(|| parse_log(black_box(&log))));
}

fn bench_aggregate(c: &mut Criterion) {
    let commits = parse_log(&synthetic_log(5_000, 8));
    c.bench_function("aggregate 5k commits", |b| b.iter(|| aggregate(black_box(&commits))));
}

criterion_group!(benches, bench_parse, bench_aggregate);
criterion_main!(benches);

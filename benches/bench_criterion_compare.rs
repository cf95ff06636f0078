use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use iampolicy_core::{Format, Policy, Statement, difference, encode, encode_with, equal};
use std::hint::black_box;

fn build_policy(statements: usize) -> Policy {
    let mut policy = Policy::new("2012-10-17");
    for i in 0..statements {
        policy.add_statement(
            Statement::allow()
                .with_sid(format!("Statement{i}"))
                .with_action(vec![format!("s3:GetObject{i}"), format!("s3:PutObject{i}")])
                .with_resource(format!("arn:aws:s3:::bucket-{i}/*"))
                .with_principal("AWS", format!("arn:aws:iam::{i:012}:root")),
        );
    }
    policy
}

fn benchmark_equal(c: &mut Criterion) {
    let mut group = c.benchmark_group("equal");
    group.sample_size(40);

    for statements in [1usize, 10, 100] {
        let policy = build_policy(statements);
        let compact = encode(&policy).expect("policy encodes");
        let pretty = encode_with(&policy, Format::Pretty).expect("policy encodes");

        group.bench_with_input(
            BenchmarkId::new("compact_vs_pretty", statements),
            &(compact, pretty),
            |b, (left, right)| {
                b.iter(|| {
                    black_box(equal(black_box(left), black_box(right)).expect("valid json"))
                });
            },
        );
    }

    group.finish();
}

fn benchmark_difference(c: &mut Criterion) {
    let mut group = c.benchmark_group("difference");
    group.sample_size(40);

    for statements in [10usize, 100] {
        let desired = build_policy(statements);
        let mut actual = desired.clone();
        if let Some(last) = actual.statement.as_mut().and_then(|s| s.last_mut()) {
            last.effect = "Deny".to_string();
        }
        let desired = encode(&desired).expect("policy encodes");
        let actual = encode(&actual).expect("policy encodes");

        group.bench_with_input(
            BenchmarkId::new("last_statement_drift", statements),
            &(desired, actual),
            |b, (left, right)| {
                b.iter(|| {
                    black_box(difference(black_box(left), black_box(right)).expect("valid json"))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_equal, benchmark_difference);
criterion_main!(benches);

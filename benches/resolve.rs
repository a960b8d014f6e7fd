//! Resolution throughput for synthetic documents.
//!
//! ```bash
//! cargo bench --bench resolve
//! ```

use coref_chains::{EntityType, MentionFactory, WithinDocCoref};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const PEOPLE: &[&str] = &[
    "John Smith",
    "Mary Jones",
    "Dr. Alan Turing",
    "Ada Lovelace",
    "Grace Hopper",
    "Mr. Charles Babbage",
];
const ORGS: &[&str] = &[
    "International Business Machines",
    "Bell Labs",
    "University of Manchester",
    "Royal Society",
];

/// Deterministic document of `n` mentions mixing names, repeats and pronouns.
fn document(n: usize) -> Vec<(String, EntityType, usize)> {
    (0..n)
        .map(|i| {
            let sentence = i / 4;
            match i % 5 {
                0 | 1 => (
                    PEOPLE[i % PEOPLE.len()].to_string(),
                    EntityType::Person,
                    sentence,
                ),
                2 => (
                    ORGS[i % ORGS.len()].to_string(),
                    EntityType::Organization,
                    sentence,
                ),
                3 => ("he".to_string(), EntityType::MalePronoun, sentence),
                _ => ("she".to_string(), EntityType::FemalePronoun, sentence),
            }
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let factory = MentionFactory::english();
    let mut group = c.benchmark_group("resolve_document");

    for n in [50usize, 200, 1000] {
        let doc = document(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &doc, |b, doc| {
            b.iter(|| {
                let mut coref = WithinDocCoref::new(&factory);
                for (phrase, ty, sentence) in doc {
                    black_box(coref.resolve(phrase, ty.clone(), *sentence));
                }
                coref.len()
            })
        });
    }
    group.finish();
}

fn bench_create(c: &mut Criterion) {
    let factory = MentionFactory::english();
    c.bench_function("create_mention", |b| {
        b.iter(|| factory.create(black_box("Gen. Sir Colin Luther Powell"), EntityType::Person))
    });
}

criterion_group!(benches, bench_resolve, bench_create);
criterion_main!(benches);

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tf_idf_recommender::{RawDocument, RawTable, RecommenderConfig, Session};

const WORDS: &[&str] = &[
    "dragon", "kingdom", "murder", "detective", "space", "planet", "romance", "war", "ship",
    "ocean", "magic", "school", "family", "secret", "journey", "city", "robot", "queen",
    "forest", "island", "letter", "winter", "crown", "empire", "garden", "storm", "thief",
    "river", "mountain", "train",
];

// 擬似乱数で決定的なコーパスを作る
fn synthetic_corpus(docs: usize, words_per_doc: usize) -> RawTable {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..docs)
        .map(|i| {
            let summary: Vec<&str> = (0..words_per_doc)
                .map(|_| WORDS[(next() % WORDS.len() as u64) as usize])
                .collect();
            RawDocument::new(Some(format!("Book {i}")), Some(summary.join(" ")))
        })
        .collect()
}

fn load_and_query_benchmark(c: &mut Criterion) {
    let corpus = synthetic_corpus(2_000, 40);

    c.bench_function("load_2000_docs", |b| {
        b.iter(|| {
            let mut session: Session = Session::new(RecommenderConfig::default());
            session.load(black_box(corpus.clone())).unwrap();
            session
        });
    });

    let mut session: Session = Session::new(RecommenderConfig::default());
    session.load(corpus).unwrap();

    c.bench_function("recommend_top5", |b| {
        b.iter(|| session.recommend(black_box("Book 1000")).unwrap());
    });
}

criterion_group!(benches, load_and_query_benchmark);
criterion_main!(benches);

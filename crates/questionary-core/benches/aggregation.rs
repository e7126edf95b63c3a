use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use questionary_core::model::{Metadata, Quiz};
use questionary_core::results::{QuestionOutcome, QuizResult};
use questionary_core::statistics::{merge, StatsAggregator};
use questionary_core::store::MemoryStore;

fn make_quiz() -> Quiz {
    Quiz {
        title: "Bench Quiz".into(),
        subtitle: "Sub".into(),
        instructions: "Pick one".into(),
        metadata: Metadata {
            topics: vec!["Alpha".into(), "Beta".into()],
            values: [("difficulty".to_string(), "medium".to_string())]
                .into_iter()
                .collect(),
        },
        questions: Vec::new(),
    }
}

fn make_result(seed: u32, questions: u32) -> QuizResult {
    let correct = questions * (seed % 10) / 10;
    QuizResult {
        score: correct * 100 / questions.max(1),
        completed_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::minutes(i64::from(seed)),
        time_elapsed_ms: 60_000 + u64::from(seed) * 500,
        total_questions: questions,
        correct_answers: correct,
        question_results: (0..questions)
            .map(|i| QuestionOutcome {
                question_index: i as usize,
                topic: if i % 2 == 0 { "Alpha" } else { "Beta" }.to_string(),
                is_correct: i < correct,
                user_answer: Some(0),
                correct_answer: 0,
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            })
            .collect(),
    }
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    let quiz = make_quiz();

    for questions in [10u32, 50] {
        group.bench_function(format!("{questions}_questions"), |b| {
            let agg = StatsAggregator::new(MemoryStore::new());
            let result = make_result(7, questions);
            b.iter(|| agg.update(black_box(&quiz), black_box(&result)).unwrap());
        });
    }

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let quiz = make_quiz();
    let build = |offset: u32, tests: u32| {
        let agg = StatsAggregator::new(MemoryStore::new());
        for i in 0..tests {
            agg.update(&quiz, &make_result(offset + i, 20)).unwrap();
        }
        agg.current().unwrap()
    };

    let left = build(0, 100);
    let right = build(1000, 100);

    c.bench_function("merge_100_each", |b| {
        b.iter(|| merge(black_box(&left), black_box(&right)))
    });
}

criterion_group!(benches, bench_update, bench_merge);
criterion_main!(benches);

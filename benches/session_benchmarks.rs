use criterion::{Criterion, black_box, criterion_group, criterion_main};

use wordrush::generator::paragraph;
use wordrush::session::highlight::{WordRelation, project};
use wordrush::session::input::KeyInput;
use wordrush::session::pool::{WordPool, WordSupply};
use wordrush::session::typing::{CompletionPolicy, TypingSession};
use wordrush::session::word::Word;

fn typed_word(text: &str, input: &str) -> Word {
    let mut word = Word::new(text);
    for ch in input.chars() {
        word.push(ch);
    }
    word
}

fn bench_highlight(c: &mut Criterion) {
    let exact = typed_word("extraordinary", "extraordinary");
    let overtyped = typed_word("river", "riverbanks");
    let partial = typed_word("lighthouse", "ligth");

    c.bench_function("project current word (3 shapes)", |b| {
        b.iter(|| {
            (
                project(black_box(&exact), WordRelation::Current),
                project(black_box(&overtyped), WordRelation::Current),
                project(black_box(&partial), WordRelation::Current),
            )
        })
    });
}

fn bench_pool_seed(c: &mut Criterion) {
    let tokens = paragraph::load_tokens(paragraph::DEFAULT_PARAGRAPH);

    c.bench_function("seed looping pool (bundled paragraph)", |b| {
        b.iter(|| {
            let mut pool =
                WordPool::new(WordSupply::Looping(black_box(tokens.clone())), 30).unwrap();
            pool.seed().unwrap();
            pool
        })
    });
}

fn bench_typing_run(c: &mut Criterion) {
    let tokens = paragraph::load_tokens(paragraph::DEFAULT_PARAGRAPH);
    let script: Vec<KeyInput> = tokens
        .iter()
        .cycle()
        .take(500)
        .flat_map(|w| {
            w.chars()
                .map(KeyInput::Letter)
                .chain(std::iter::once(KeyInput::Separator))
        })
        .collect();

    c.bench_function("type 500 words with window updates", |b| {
        b.iter(|| {
            let pool = WordPool::new(WordSupply::Looping(tokens.clone()), 30).unwrap();
            let mut session = TypingSession::new(pool, 60, CompletionPolicy::OneShot);
            session.start().unwrap();
            for &key in &script {
                session.handle_key(black_box(key));
            }
            session.correct_chars
        })
    });
}

criterion_group!(benches, bench_highlight, bench_pool_seed, bench_typing_run);
criterion_main!(benches);

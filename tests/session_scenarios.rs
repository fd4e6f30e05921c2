use wordrush::generator::corpus::SharedCorpus;
use wordrush::report::reporter::RecordingReporter;
use wordrush::session::clock::ManualClock;
use wordrush::session::highlight::{CharClass, Glyph};
use wordrush::session::input::KeyInput;
use wordrush::session::pool::{LOOKBACK, LOW_WATER_MARK, PLACEHOLDER, WordPool, WordSupply};
use wordrush::session::runner::SessionRunner;
use wordrush::session::typing::{CompletionPolicy, TypingSession};
use wordrush::session::word::WordStatus;
use wordrush::session::SessionError;

use rand::SeedableRng;
use rand::rngs::SmallRng;

type TestRunner = SessionRunner<ManualClock, RecordingReporter>;

fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(|s| s.to_string()).collect()
}

fn looping_runner(text: &str, duration: u32) -> TestRunner {
    let pool = WordPool::new(WordSupply::Looping(tokens(text)), 30).unwrap();
    let session = TypingSession::new(pool, duration, CompletionPolicy::OneShot);
    let mut runner = SessionRunner::new(session, ManualClock::new(), RecordingReporter::default());
    assert!(runner.start().unwrap());
    runner
}

fn type_str(runner: &mut TestRunner, input: &str) {
    for ch in input.chars() {
        runner.handle_key(KeyInput::from_char(ch));
    }
}

#[test]
fn perfect_typing_for_thirty_seconds() {
    let mut runner = looping_runner("cat dog", 60);
    type_str(&mut runner, "cat dog ");
    for _ in 0..30 {
        runner.on_second();
    }

    let session = runner.session();
    assert_eq!(session.correct_chars, 6);
    assert_eq!(session.total_typed_chars, 8);
    assert_eq!(session.correct_typed_chars, 8);
    assert_eq!(session.wpm, 2);
    assert_eq!(session.accuracy, 100);
    assert!(session.is_active());
}

#[test]
fn mistake_then_backspace_keeps_credit() {
    let mut runner = looping_runner("cat dog", 60);
    type_str(&mut runner, "cax ");
    {
        let s = runner.session();
        assert_eq!(s.correct_chars, 2);
        assert_eq!(s.total_typed_chars, 4);
        assert_eq!(s.correct_typed_chars, 3);
        assert_eq!(s.pool.get(0).unwrap().status(), WordStatus::Incorrect);
    }

    runner.handle_key(KeyInput::Backspace);
    {
        let s = runner.session();
        assert_eq!(s.current_word_index, 0);
        assert_eq!(s.current_char_index, Some(1));
        assert_eq!(s.pool.get(0).unwrap().typed_string(), "ca");
        assert_eq!(s.pool.get(0).unwrap().status(), WordStatus::Pending);
        assert_eq!(s.correct_chars, 2);
        assert_eq!(s.total_typed_chars, 4);
    }

    type_str(&mut runner, "t ");
    let s = runner.session();
    assert_eq!(s.correct_chars, 3);
    assert_eq!(s.total_typed_chars, 6);
    assert_eq!(s.correct_typed_chars, 5);
    assert_eq!(s.pool.get(0).unwrap().status(), WordStatus::Correct);
}

#[test]
fn overtyping_highlights_surplus_with_cursor() {
    let mut runner = looping_runner("dog cat", 60);
    type_str(&mut runner, "dogs");

    let glyphs = runner.session().highlight(0);
    let classes: Vec<(char, CharClass, bool)> = glyphs
        .iter()
        .map(|g| match *g {
            Glyph::Char { ch, class, cursor } => (ch, class, cursor),
            Glyph::EndCursor => panic!("no end cursor on an over-typed word"),
        })
        .collect();
    assert_eq!(
        classes,
        vec![
            ('d', CharClass::Correct, false),
            ('o', CharClass::Correct, false),
            ('g', CharClass::Correct, false),
            ('s', CharClass::Incorrect, true),
        ]
    );
    assert_eq!(runner.session().highlight(0), glyphs);
}

#[test]
fn pool_extends_by_exactly_one_cycle() {
    let corpus = tokens("alpha beta gamma delta omega");
    let cycle_chars: usize = corpus.iter().map(|w| w.len()).sum::<usize>() + corpus.len();

    let mut pool = WordPool::new(WordSupply::Looping(corpus.clone()), 30).unwrap();
    pool.seed().unwrap();
    let len_before = pool.len();
    let chars_before = pool.total_chars();
    assert!(len_before >= LOW_WATER_MARK);

    let ahead_of = len_before - LOW_WATER_MARK + 1;
    let appended = pool.ensure_capacity(ahead_of);

    assert_eq!(appended, corpus.len());
    assert_eq!(pool.len(), len_before + corpus.len());
    assert_eq!(pool.total_chars(), chars_before + cycle_chars);
}

#[test]
fn window_invariant_holds_over_a_long_run() {
    let mut runner = looping_runner("a b c", 600);
    for step in 0..400 {
        runner.handle_key(KeyInput::Letter('a'));
        runner.handle_key(KeyInput::Separator);
        if step % 37 == 0 {
            runner.handle_key(KeyInput::Backspace);
            runner.handle_key(KeyInput::Backspace);
        }

        let s = runner.session();
        let window = s.pool.window();
        assert!(window.start <= s.current_word_index, "step {step}");
        assert!(s.current_word_index <= window.end, "step {step}");
        assert!(window.end <= s.pool.len(), "step {step}");
        assert!(s.current_word_index - window.start <= LOOKBACK);
    }
}

#[test]
fn keystroke_counters_never_decrease() {
    let mut runner = looping_runner("one two three", 60);
    let script = [
        KeyInput::Letter('o'),
        KeyInput::Letter('x'),
        KeyInput::Backspace,
        KeyInput::Backspace,
        KeyInput::Backspace,
        KeyInput::Letter('o'),
        KeyInput::Letter('n'),
        KeyInput::Letter('e'),
        KeyInput::Separator,
        KeyInput::Separator,
        KeyInput::Backspace,
        KeyInput::Other,
        KeyInput::Letter('t'),
    ];

    let mut last = (0, 0);
    for key in script {
        runner.handle_key(key);
        let s = runner.session();
        assert!(s.total_typed_chars >= last.0);
        assert!(s.correct_typed_chars >= last.1);
        assert!(s.correct_typed_chars <= s.total_typed_chars);
        last = (s.total_typed_chars, s.correct_typed_chars);
    }
}

#[test]
fn completion_reports_once_and_freezes_state() {
    let mut runner = looping_runner("cat dog", 5);
    type_str(&mut runner, "cat ");
    for _ in 0..5 {
        runner.on_second();
    }
    assert!(runner.session().is_completed());
    let wpm = runner.session().wpm;

    runner.complete();
    runner.on_second();
    type_str(&mut runner, "dog ");

    let s = runner.session();
    assert_eq!(s.wpm, wpm);
    assert_eq!(s.elapsed_seconds, 5);
    assert_eq!(s.total_typed_chars, 4);
    assert_eq!(runner.reporter().reports.len(), 1);
    assert_eq!(runner.clock().cancel_calls, 1);
    assert!(!runner.start().unwrap());
}

#[test]
fn finite_text_completes_when_exhausted() {
    let pool = WordPool::new(WordSupply::Finite(tokens("to be")), 30).unwrap();
    let session = TypingSession::new(pool, 60, CompletionPolicy::OneShot)
        .with_participant_label(Some("crew".to_string()));
    let mut runner = SessionRunner::new(session, ManualClock::new(), RecordingReporter::default());
    runner.start().unwrap();
    type_str(&mut runner, "to be ");

    assert!(runner.session().is_completed());
    let reports = &runner.reporter().reports;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].participant_label.as_deref(), Some("crew"));
    assert_eq!(reports[0].accuracy, 100);
}

#[test]
fn placeholders_give_way_to_loaded_words() {
    let corpus = SharedCorpus::loading();
    let supply = WordSupply::Random {
        corpus: corpus.clone(),
        rng: SmallRng::seed_from_u64(11),
    };
    let pool = WordPool::new(supply, 30).unwrap();
    let mut session = TypingSession::new(pool, 60, CompletionPolicy::OneShot);
    session.start().unwrap();
    assert_eq!(session.pool.get(0).unwrap().text_string(), PLACEHOLDER);

    corpus.set_ready(tokens("maple cedar birch"));
    let replaced = session.refresh_placeholders();
    assert_eq!(replaced, session.pool.len());
    let first = session.pool.get(0).unwrap().text_string();
    assert!(["maple", "cedar", "birch"].contains(&first.as_str()));
}

#[test]
fn configuration_errors_surface_at_construction_or_start() {
    assert!(matches!(
        WordPool::new(WordSupply::Looping(Vec::new()), 30),
        Err(SessionError::EmptyCorpus)
    ));
    assert!(matches!(
        WordPool::new(WordSupply::Looping(tokens("a")), LOOKBACK),
        Err(SessionError::WindowTooSmall { .. })
    ));

    let supply = WordSupply::Random {
        corpus: SharedCorpus::ready(Vec::new()),
        rng: SmallRng::seed_from_u64(1),
    };
    let pool = WordPool::new(supply, 30).unwrap();
    let mut session = TypingSession::new(pool, 60, CompletionPolicy::OneShot);
    assert!(matches!(session.start(), Err(SessionError::EmptyCorpus)));
}

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use tagquizbot::{
    error::QuizError,
    quiz::{AnswerSlot, QuestionQueue, TagVocabulary, CHOICES},
    state::{SessionScope, Sessions},
};

fn vocabulary(size: usize) -> TagVocabulary {
    TagVocabulary::new((0..size).map(|i| format!("tag{}", i))).unwrap()
}

fn generate(vocabulary: &TagVocabulary, seed: u64) -> QuestionQueue {
    QuestionQueue::generate(vocabulary, &mut Pcg32::seed_from_u64(seed), AnswerSlot::Random)
        .unwrap()
}

#[test]
fn queue_covers_every_tag_exactly_once() {
    for size in [4, 5, 9, 30, 200] {
        let vocabulary = vocabulary(size);
        let queue = generate(&vocabulary, size as u64);

        assert_eq!(queue.len(), size);
        let answers: HashSet<&str> = queue.answers().collect();
        assert_eq!(answers.len(), size);
        assert!(vocabulary.tags().iter().all(|tag| answers.contains(tag.as_str())));
    }
}

#[test]
fn every_question_is_well_formed() {
    let vocabulary = vocabulary(12);
    for seed in 0..20 {
        for question in &generate(&vocabulary, seed) {
            let unique: HashSet<&String> = question.variants().iter().collect();
            assert_eq!(unique.len(), CHOICES);
            assert_eq!(
                question
                    .variants()
                    .iter()
                    .filter(|variant| variant.as_str() == question.answer())
                    .count(),
                1
            );
            assert!(question.variants().iter().all(|v| vocabulary.contains(v)));
        }
    }
}

#[test]
fn small_vocabulary_is_rejected() {
    let vocabulary = TagVocabulary::parse("cat,dog,bird").unwrap();
    let result = QuestionQueue::generate(&vocabulary, &mut Pcg32::seed_from_u64(1), AnswerSlot::Last);
    assert_eq!(
        result,
        Err(QuizError::InsufficientVocabulary {
            required: CHOICES,
            available: 3
        })
    );
}

#[test]
fn fixed_seed_reproduces_the_queue() {
    let vocabulary = vocabulary(25);
    let first = generate(&vocabulary, 42);
    let second = generate(&vocabulary, 42);
    assert_eq!(first, second);

    let other = generate(&vocabulary, 43);
    assert_ne!(first, other);
}

#[test]
fn four_animals_end_to_end() {
    let vocabulary = TagVocabulary::parse("cat,dog,bird,fish").unwrap();
    let queue = generate(&vocabulary, 42);

    assert_eq!(queue.len(), 4);
    let mut answers: Vec<&str> = queue.answers().collect();
    answers.sort_unstable();
    assert_eq!(answers, vec!["bird", "cat", "dog", "fish"]);

    for question in &queue {
        let mut variants = question.variants().to_vec();
        variants.sort_unstable();
        assert_eq!(variants, vec!["bird", "cat", "dog", "fish"]);
    }

    let sessions = Sessions::new(queue.clone(), SessionScope::Global);
    let first = sessions.take_next(1);
    assert_eq!(first.index, 0);
    assert_eq!(first.question, queue[0]);
    for expected in 1..4 {
        assert_eq!(sessions.take_next(1).index, expected);
    }
    assert_eq!(sessions.position(1), 0);
    assert_eq!(sessions.take_next(1).question, first.question);
}

#[test]
fn cursor_replays_queue_in_order() {
    let queue = generate(&vocabulary(7), 9);
    let sessions = Sessions::new(queue.clone(), SessionScope::PerChat);

    let asked: Vec<_> = (0..queue.len()).map(|_| sessions.take_next(11).question).collect();
    assert_eq!(asked, queue.iter().cloned().collect::<Vec<_>>());
    assert_eq!(sessions.take_next(11).question, queue[0]);
}

#[test]
fn concurrent_threads_never_share_a_position() {
    const THREADS: usize = 8;
    const CALLS: usize = 125;

    let queue = generate(&vocabulary(10), 3);
    let sessions = Arc::new(Sessions::new(queue, SessionScope::Global));

    let handles: Vec<_> = (0..THREADS)
        .map(|chat| {
            let sessions = Arc::clone(&sessions);
            std::thread::spawn(move || {
                (0..CALLS)
                    .map(|_| sessions.take_next(chat as i64).index)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut counts: HashMap<usize, usize> = HashMap::new();
    for handle in handles {
        for index in handle.join().unwrap() {
            *counts.entry(index).or_default() += 1;
        }
    }

    // 1000 calls over 10 questions: every question handed out exactly 100 times.
    assert_eq!(counts.len(), 10);
    assert!(counts.values().all(|&count| count == THREADS * CALLS / 10));
    assert_eq!(sessions.position(0), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_tasks_advance_one_chat_strictly() {
    let queue = generate(&vocabulary(6), 5);
    let len = queue.len();
    let sessions = Arc::new(Sessions::new(queue, SessionScope::PerChat));

    let tasks: Vec<_> = (0..len * 3)
        .map(|_| {
            let sessions = Arc::clone(&sessions);
            tokio::spawn(async move { sessions.take_next(77).index })
        })
        .collect();

    let mut seen = Vec::new();
    for task in tasks {
        seen.push(task.await.unwrap());
    }
    seen.sort_unstable();

    let expected: Vec<usize> = (0..len).flat_map(|i| [i, i, i]).collect();
    assert_eq!(seen, expected);
    assert_eq!(sessions.position(77), 0);
    assert_eq!(sessions.position(78), 0);
}

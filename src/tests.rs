use crate::cli::handlers::{handle_copy, handle_generate, COPIED_MESSAGE, GENERATED_MESSAGE};
use crate::cli::notify::testing::{Notice, RecordingNotifier};
use crate::core::{Session, HISTORY_LIMIT};
use crate::generators::{build_charset, score_strength, GeneratorError, PasswordEngine, SIMILAR};
use crate::models::*;
use crate::system::clipboard::testing::MemoryClipboard;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn all_flag_combinations() -> Vec<GenerationSettings> {
    let mut combos = Vec::new();
    for bits in 0u8..32 {
        combos.push(GenerationSettings {
            length: 4 + usize::from(bits) * 60 / 31,
            include_lowercase: bits & 1 != 0,
            include_uppercase: bits & 2 != 0,
            include_numbers: bits & 4 != 0,
            include_symbols: bits & 8 != 0,
            exclude_similar: bits & 16 != 0,
        });
    }
    combos
}

#[test]
fn test_every_flag_combination() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    let engine = PasswordEngine::new();

    for settings in all_flag_combinations() {
        let charset = build_charset(&settings);
        let result = engine.generate(&settings, &mut rng);

        if !settings.has_character_class() {
            assert!(charset.is_empty());
            assert_eq!(result, Err(GeneratorError::EmptyCharset));
            continue;
        }

        let generated = result.unwrap();
        assert_eq!(generated.value.chars().count(), settings.length);
        assert!(generated.value.chars().all(|c| charset.contains(c)));
        if settings.exclude_similar {
            assert!(!generated.value.chars().any(|c| SIMILAR.contains(c)));
        }
        assert!(generated.strength_score <= 100);
    }
}

#[test]
fn test_generated_score_matches_scorer() {
    let mut rng = ChaCha20Rng::seed_from_u64(77);
    let settings = GenerationSettings { length: 64, ..GenerationSettings::default() };

    let generated = PasswordEngine::new().generate(&settings, &mut rng).unwrap();
    assert_eq!(generated.strength_score, score_strength(&generated.value));
    assert_eq!(generated.level(), StrengthLevel::from_score(generated.strength_score));
}

#[test]
fn test_all_classes_long_password_scores_full() {
    let value = "Abc1!xyzQ9#k7&Wp";
    assert_eq!(score_strength(value), 100);

    let generated = GeneratedPassword { value: value.to_string(), strength_score: score_strength(value) };
    assert_eq!(generated.level(), StrengthLevel::Strong);
}

#[test]
fn test_documented_examples() {
    assert_eq!(score_strength("Abc1!xyzQ9#k7&Wp"), 100);
    assert_eq!(score_strength("abcd"), 10);
    assert_eq!(StrengthLevel::from_score(score_strength("abcd")), StrengthLevel::Weak);
    assert_eq!(StrengthLevel::from_score(score_strength("abcdefgh")), StrengthLevel::Weak);
    assert_eq!(StrengthLevel::from_score(score_strength("abcdefgh1")), StrengthLevel::Medium);
}

#[test]
fn test_eleventh_generation_evicts_oldest() {
    let notifier = RecordingNotifier::default();
    let mut rng = ChaCha20Rng::seed_from_u64(31);
    let mut session = Session::new(GenerationSettings::default());

    let mut produced = Vec::new();
    for _ in 0..=HISTORY_LIMIT {
        let generated = handle_generate(&mut session, &mut rng, &notifier).unwrap();
        produced.push(generated.value.clone());
    }

    let history: Vec<&str> = session.history().iter().map(|e| e.password.as_str()).collect();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history[0], produced[HISTORY_LIMIT]);
    assert!(!history.contains(&produced[0].as_str()));
    assert_eq!(history[HISTORY_LIMIT - 1], produced[1]);
    assert_eq!(notifier.notices.borrow().len(), HISTORY_LIMIT + 1);
}

#[test]
fn test_error_then_recovery_flow() {
    let notifier = RecordingNotifier::default();
    let mut clipboard = MemoryClipboard::default();
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let mut session = Session::new(GenerationSettings {
        length: 8,
        include_uppercase: false,
        include_lowercase: true,
        include_numbers: false,
        include_symbols: false,
        exclude_similar: false,
    });

    let first = handle_generate(&mut session, &mut rng, &notifier).unwrap().clone();
    assert_eq!(first.value.len(), 8);
    assert!(first.value.chars().all(|c| c.is_ascii_lowercase()));
    assert_eq!(first.strength_score, 35);

    session.settings.include_lowercase = false;
    assert_eq!(
        handle_generate(&mut session, &mut rng, &notifier).unwrap_err(),
        GeneratorError::EmptyCharset
    );
    assert_eq!(session.current(), Some(&first));
    assert_eq!(session.history().len(), 1);

    let current = session.current().unwrap().value.clone();
    assert!(handle_copy(&mut clipboard, &notifier, &current));
    assert_eq!(clipboard.contents, Some(first.value.clone()));

    assert_eq!(
        *notifier.notices.borrow(),
        vec![
            Notice::Success(GENERATED_MESSAGE.to_string()),
            Notice::Error(GeneratorError::EmptyCharset.to_string()),
            Notice::Success(COPIED_MESSAGE.to_string()),
        ]
    );
}

#[test]
fn test_history_ids_are_unique() {
    let notifier = RecordingNotifier::default();
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let mut session = Session::new(GenerationSettings::default());
    for _ in 0..5 {
        handle_generate(&mut session, &mut rng, &notifier).unwrap();
    }

    let mut ids: Vec<_> = session.history().iter().map(|e| e.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);

    let times: Vec<_> = session.history().iter().map(|e| e.created_at).collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
}

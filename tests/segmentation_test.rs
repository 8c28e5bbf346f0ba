use symspell::prelude::*;
use symspell::spelling::settings::DEFAULT_CORPUS_WORD_COUNT;

fn engine() -> SymSpell {
    let mut engine = SymSpell::new(SpellCheckSettings::default()).unwrap();
    for (word, frequency) in [
        ("it", 2_000_000_000.0),
        ("was", 1_500_000_000.0),
        ("a", 9_000_000_000.0),
        ("bright", 30_000_000.0),
        ("right", 300_000_000.0),
        ("cold", 40_000_000.0),
        ("day", 400_000_000.0),
        ("in", 8_000_000_000.0),
        ("april", 20_000_000.0),
    ] {
        engine.create_dictionary_entry(word, frequency);
    }
    engine
}

#[test]
fn test_segments_run_together_words() {
    let engine = engine();
    let composition = engine
        .word_break_segmentation("itwasabrightcoldday", 20, 0.0)
        .unwrap();

    assert_eq!(composition.corrected_string, "it was a bright cold day");
    assert_eq!(composition.distance_sum, 5.0);
}

#[test]
fn test_exact_segmentation_keeps_every_char() {
    let engine = engine();
    for text in ["itwasabrightcoldday", "inaprilitwascold", "xyzdayq", "a"] {
        let composition = engine.word_break_segmentation(text, 20, 0.0).unwrap();

        assert_eq!(composition.segmented_string.replace(' ', ""), text);
        assert_eq!(composition.corrected_string.replace(' ', ""), text);
    }
}

#[test]
fn test_inserted_spaces_are_counted() {
    let engine = engine();
    let composition = engine
        .word_break_segmentation("inaprilitwascold", 20, 0.0)
        .unwrap();

    assert_eq!(composition.corrected_string, "in april it was cold");
    let spaces = composition.segmented_string.matches(' ').count();
    assert_eq!(composition.distance_sum, spaces as f64);
}

#[test]
fn test_probabilities_are_log_scaled() {
    let engine = engine();
    let composition = engine.word_break_segmentation("cold", 20, 0.0).unwrap();

    let expected = (40_000_000.0 / DEFAULT_CORPUS_WORD_COUNT).log10();
    assert_eq!(composition.corrected_string, "cold");
    assert!((composition.log_prob_sum - expected).abs() < 1e-9);
}

#[test]
fn test_rejects_invalid_parameters() {
    let engine = engine();

    assert!(engine.word_break_segmentation("cold", 0, 0.0).is_err());
    assert!(engine.word_break_segmentation("cold", 20, 2.5).is_err());
    assert_eq!(
        engine.word_break_segmentation("", 20, 0.0).unwrap(),
        Composition::default()
    );
}

//! テキストの取り込みから単語分割までを通しで検証するテスト

use crate::{
    CharacterKind, Segmentations, Sentence, Text, TrieBuilder, WORD_NOT_FOUND,
};

fn word_trie() -> crate::Trie {
    let mut builder = TrieBuilder::new();
    builder.add_word(&Text::from("한"), 1, true).unwrap();
    builder.add_word(&Text::from("한글"), 2, true).unwrap();
    builder.add_word(&Text::from("글"), 3, true).unwrap();
    builder.add_word(&Text::from("단"), 4, true).unwrap();
    builder.add_word(&Text::from("단어"), 5, true).unwrap();
    builder.freeze()
}

#[test]
fn test_encapsulated_sentence_segmentation() {
    let mut sentence = Text::from("symbol한글단어");
    let _ = sentence.encapsulate_non_hangul();
    assert_eq!(sentence.len(), 5);
    assert_eq!(
        sentence.character_at(0).kind(),
        CharacterKind::EncapsulatedNonHangulSyllable
    );

    let lattice = Segmentations::for_sentence(&sentence, &word_trie()).unwrap();

    let expected = [(0, 0), (1, 1), (1, 2), (2, 2), (3, 3), (3, 4)];
    for start in 0..5 {
        for end in start..5 {
            assert_eq!(
                lattice.word(start, end).unwrap(),
                expected.contains(&(start, end)),
                "cell ({start}, {end})"
            );
        }
    }

    assert_eq!(lattice.words_starting_at(1), vec![1, 2]);
    assert_eq!(lattice.words_starting_at(3), vec![3, 4]);
    assert_eq!(lattice.words_ending_at(2), vec![2, 1]);
}

#[test]
fn test_raw_non_hangul_sentence_is_rejected() {
    let sentence = Text::from("symbol한글");
    assert!(Segmentations::for_sentence(&sentence, &word_trie()).is_err());
}

#[test]
fn test_prefix_query_drives_lattice() {
    let trie = word_trie();
    let prefixes = trie.find_word_prefixes(&Text::from("한글단어")).unwrap();
    assert_eq!(prefixes.len(), 2);
    assert_eq!((prefixes[0].text.len(), prefixes[0].id), (1, 1));
    assert_eq!((prefixes[1].text.len(), prefixes[1].id), (2, 2));

    // the lattice rows mirror the prefix query at every position
    let sentence = Sentence::new(Text::from("한글단어"));
    let lattice = sentence.words_lattice(&trie).unwrap();
    assert_eq!(lattice.words_starting_at(0), vec![0, 1]);
    assert_eq!(lattice.words_starting_at(2), vec![2, 3]);
}

#[test]
fn test_unknown_words_produce_empty_rows() {
    let sentence = Sentence::new(Text::from("모르는말"));
    let lattice = sentence.words_lattice(&word_trie()).unwrap();
    for start in 0..sentence.len_char() {
        assert!(lattice.words_starting_at(start).is_empty());
    }
}

#[test]
fn test_trie_rebuilt_from_frozen_form_matches() {
    let trie = word_trie();
    let mut builder = trie.to_builder();
    builder.add_word(&Text::from("어"), 6, true).unwrap();
    let extended = builder.freeze();

    assert_eq!(extended.find_word(&Text::from("한글")).unwrap(), 2);
    assert_eq!(extended.find_word(&Text::from("어")).unwrap(), 6);
    assert_eq!(trie.find_word(&Text::from("어")).unwrap(), WORD_NOT_FOUND);

    let words: Vec<_> = extended.words().collect();
    assert_eq!(words.len(), 6);
}

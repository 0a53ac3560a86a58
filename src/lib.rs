//! # Natmal
//!
//! Natmalは、字母（jamo）レベルでの韓国語テキスト処理の実装です。
//!
//! ## 概要
//!
//! このライブラリは、ハングル音節の分解・再合成、語彙の索引付け、
//! 文の単語分割という3つの土台となる処理を提供します。
//! Unicodeの音節ブロック・位置字母・互換字母は単一の32ビット表現へ統合され、
//! 初声・中声・終声の各位置で個別に読み書きできます。
//!
//! ## 主な機能
//!
//! - **ハングル文字コーデック**: 音節と字母の相互変換、位置字母の正規化
//! - **字母単位の基数トライ**: 編集可能なビルダーと検索専用の凍結形、接頭辞列挙
//! - **単語分割格子**: 文中のすべての語彙単語区間を記録するビット行列
//! - **スコア表**: 単語idと数値スコアを対応付けるRobin-Hoodハッシュ表
//! - **語彙辞書**: CSVからの構築とバイナリモデルの入出力
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use natmal::{Segmentations, Text, TrieBuilder};
//!
//! let mut builder = TrieBuilder::new();
//! builder.add_word(&Text::from("한"), 1, true)?;
//! builder.add_word(&Text::from("한글"), 2, true)?;
//! let trie = builder.freeze();
//!
//! assert_eq!(trie.find_word(&Text::from("한글"))?, 2);
//!
//! let prefixes = trie.find_word_prefixes(&Text::from("한글단어"))?;
//! assert_eq!(prefixes.len(), 2);
//! assert_eq!(prefixes[0].text, Text::from("한"));
//! assert_eq!(prefixes[1].text, Text::from("한글"));
//!
//! let mut sentence = Text::from("symbol한글");
//! let hidden = sentence.encapsulate_non_hangul();
//! assert_eq!(sentence.to_std_string(), "S한글");
//!
//! let lattice = Segmentations::for_sentence(&sentence, &trie)?;
//! assert!(lattice.word(1, 2)?);
//!
//! sentence.restore_non_hangul(&hidden);
//! assert_eq!(sentence.to_std_string(), "symbol한글");
//! # Ok(())
//! # }
//! ```

/// ハングル文字コーデック
pub mod character;

/// 共通の定数定義
pub mod common;

/// エラー型の定義
pub mod errors;

/// 字母単位のバイト文字列
pub mod hangul_string;

/// 語彙辞書の構築と入出力
pub mod lexicon;

/// スコア表（Robin-Hoodハッシュ表）
pub mod score_table;

/// 単語分割格子
pub mod segmentations;

/// 入力文の内部表現
pub mod sentence;

/// コードポイント列としてのテキスト
pub mod text;

/// 字母バイト列をキーとする基数トライ
pub mod trie;

#[cfg(test)]
mod tests;

// Re-exports
pub use character::{Character, CharacterKind, HangulJamo, HangulSyllableCode};
pub use common::{ENCAPSULATED_CODE, WORD_NOT_FOUND};
pub use hangul_string::HangulString;
pub use lexicon::{Lexicon, LexiconBuilder};
pub use score_table::{InsertOutcome, ScoreId, ScoreTable};
pub use segmentations::Segmentations;
pub use sentence::Sentence;
pub use text::{CharCursor, EncapsulatedNonHangul, Text};
pub use trie::{Trie, TrieBuilder, WordIdPair};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

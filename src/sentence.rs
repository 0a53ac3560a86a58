//! 入力文の内部表現を提供するモジュール
//!
//! [`Sentence`]は解析対象の文を保持するビューです。生成時に非ハングルの
//! 連なりを自動的に隠蔽し、取り外した連なりを内部に保存します。文はそのまま
//! 凍結されたトライと照合して単語分割格子を作ることができ、必要になれば
//! 元のテキストへ復元できます。

use crate::errors::Result;
use crate::segmentations::Segmentations;
use crate::text::{EncapsulatedNonHangul, Text};
use crate::trie::Trie;

/// 解析対象の文
///
/// # 例
///
/// ```
/// use natmal::{Sentence, Text, TrieBuilder};
///
/// let mut builder = TrieBuilder::new();
/// builder.add_word(&Text::from("한글"), 1, true)?;
/// let trie = builder.freeze();
///
/// let sentence = Sentence::new(Text::from("symbol한글"));
/// assert_eq!(sentence.text().to_std_string(), "S한글");
///
/// let lattice = sentence.words_lattice(&trie)?;
/// assert!(lattice.word(1, 2)?);
/// # Ok::<(), natmal::errors::NatmalError>(())
/// ```
pub struct Sentence {
    text: Text,
    hidden: EncapsulatedNonHangul,
}

impl Sentence {
    /// テキストから新しい文を生成します。
    ///
    /// 非ハングルの連なりは直ちに隠蔽され、文の残りの寿命の間保存されます。
    pub fn new(mut text: Text) -> Self {
        let hidden = text.encapsulate_non_hangul();
        Self { text, hidden }
    }

    /// 隠蔽処理後のテキストへの参照を返します。
    #[inline(always)]
    pub fn text(&self) -> &Text {
        &self.text
    }

    /// 文の文字数を返します。
    #[inline(always)]
    pub fn len_char(&self) -> usize {
        self.text.len()
    }

    /// 文を語彙と照合し、単語分割格子を構築します。
    ///
    /// # エラー
    ///
    /// 格子の構築に失敗した場合はそのエラーを返します。
    pub fn words_lattice(&self, trie: &Trie) -> Result<Segmentations> {
        Segmentations::for_sentence(&self.text, trie)
    }

    /// 文を消費し、隠蔽した連なりを元に戻したテキストを返します。
    pub fn restore(self) -> Text {
        let mut text = self.text;
        text.restore_non_hangul(&self.hidden);
        text
    }
}

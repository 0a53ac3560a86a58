//! 文の単語分割格子を提供するモジュール
//!
//! [`Segmentations`]は、文中の区間`(start, end)`が語彙に含まれる単語で
//! あるかどうかを記録する正方ビット行列です。`end >= start`の上三角成分のみが
//! 意味を持ちます。格子は凍結されたトライへの接頭辞問い合わせを文の各位置で
//! 行うことで構築されます。

use crate::character::CharacterKind;
use crate::errors::{NatmalError, Result};
use crate::text::Text;
use crate::trie::Trie;

/// 単語区間のビット行列
///
/// `word(i, j)`が真であることは「位置`i`から`j`まで（両端を含む）の部分文字列が
/// 語彙の単語である」ことを表します。
pub struct Segmentations {
    sentence_length: usize,
    words: Vec<u64>,
}

impl Segmentations {
    /// 指定された文長の空の格子を生成します。
    pub fn new(sentence_length: usize) -> Self {
        let bits = sentence_length * sentence_length;
        Self {
            sentence_length,
            words: vec![0; bits.div_ceil(64)],
        }
    }

    /// 文を凍結されたトライと照合して格子を構築します。
    ///
    /// 文の各位置`i`について、位置`i`が隠蔽文字であれば`(i, i)`を立て、
    /// そうでなければ`i`から始まる接尾辞への接頭辞問い合わせで見つかった
    /// 各単語`p`に対して`(i, i + |p| - 1)`を立てます。
    ///
    /// # エラー
    ///
    /// 文に隠蔽されていない非ハングル文字が含まれる場合は
    /// [`CannotConvert`](NatmalError::CannotConvert)を返します。
    /// 呼び出し側は先に[`Text::encapsulate_non_hangul`]を適用してください。
    pub fn for_sentence(sentence: &Text, trie: &Trie) -> Result<Self> {
        let mut segmentations = Self::new(sentence.len());
        for i in 0..sentence.len() {
            let prefixes = trie.find_word_prefixes(&sentence.substring(i, sentence.len() - 1)?)?;
            if sentence.character_at(i).kind() == CharacterKind::EncapsulatedNonHangulSyllable {
                segmentations.add_word(i, i)?;
            }
            for prefix in prefixes {
                segmentations.add_word(i, i + prefix.text.len() - 1)?;
            }
        }
        Ok(segmentations)
    }

    /// 文長を返します。
    #[inline(always)]
    pub fn sentence_length(&self) -> usize {
        self.sentence_length
    }

    /// 区間`(start, end)`が単語として記録されているかを返します。
    ///
    /// # エラー
    ///
    /// `start > end`または`end`が文長以上の場合は無効な引数エラーを返します。
    pub fn word(&self, start: usize, end: usize) -> Result<bool> {
        let bit = self.bit_for_word(start, end)?;
        Ok(self.words[bit / 64] & (1 << (bit % 64)) != 0)
    }

    /// 区間`(start, end)`を単語として記録します。
    ///
    /// # エラー
    ///
    /// `start > end`または`end`が文長以上の場合は無効な引数エラーを返します。
    pub fn add_word(&mut self, start: usize, end: usize) -> Result<()> {
        let bit = self.bit_for_word(start, end)?;
        self.words[bit / 64] |= 1 << (bit % 64);
        Ok(())
    }

    /// 区間`(start, end)`の単語の記録を取り消します。
    ///
    /// # エラー
    ///
    /// `start > end`または`end`が文長以上の場合は無効な引数エラーを返します。
    pub fn remove_word(&mut self, start: usize, end: usize) -> Result<()> {
        let bit = self.bit_for_word(start, end)?;
        self.words[bit / 64] &= !(1 << (bit % 64));
        Ok(())
    }

    /// 位置`start`から始まる単語の終了位置を昇順で返します。
    pub fn words_starting_at(&self, start: usize) -> Vec<usize> {
        let mut ends = Vec::new();
        for end in start..self.sentence_length {
            if self.bit(start, end) {
                ends.push(end);
            }
        }
        ends
    }

    /// 位置`end`で終わる単語の開始位置を降順で返します。
    ///
    /// 開始位置の列挙は昇順、終了位置の列挙は降順という向きの違いは
    /// 呼び出し側との取り決めの一部です。
    pub fn words_ending_at(&self, end: usize) -> Vec<usize> {
        let mut starts = Vec::new();
        if end >= self.sentence_length {
            return starts;
        }
        for start in (0..=end).rev() {
            if self.bit(start, end) {
                starts.push(start);
            }
        }
        starts
    }

    /// 格子を人が読める上三角の格子として描画します。
    ///
    /// 立っているセルは`x`で示されます。
    pub fn debug_string(&self) -> String {
        let mut result = String::from("  ");
        for end in 0..self.sentence_length {
            result.push_str(&end.to_string());
            if end < self.sentence_length - 1 {
                result.push(' ');
            }
        }
        result.push('\n');

        for start in 0..self.sentence_length {
            result.push_str(&start.to_string());
            result.push(' ');
            for end in 0..self.sentence_length {
                if end < start {
                    result.push_str("  ");
                    continue;
                }
                result.push(if self.bit(start, end) { 'x' } else { ' ' });
                if end < self.sentence_length - 1 {
                    result.push(' ');
                }
            }
            if start < self.sentence_length - 1 {
                result.push('\n');
            }
        }

        result
    }

    /// 添字検査済みの区間のビットを読み取ります。
    #[inline(always)]
    fn bit(&self, start: usize, end: usize) -> bool {
        let bit = start * self.sentence_length + end;
        self.words[bit / 64] & (1 << (bit % 64)) != 0
    }

    fn bit_for_word(&self, start: usize, end: usize) -> Result<usize> {
        if start > end {
            return Err(NatmalError::invalid_argument(
                "start",
                "the starting position may not be greater than the ending one",
            ));
        }
        if end >= self.sentence_length {
            return Err(NatmalError::invalid_argument(
                "end",
                "the ending position is out of bounds",
            ));
        }
        Ok(start * self.sentence_length + end)
    }
}

//! コードポイント列としてのテキスト表現を提供するモジュール
//!
//! [`Text`]はハングルを意識した操作を備えたコードポイントの列です。
//! インデックスは常にコードポイント単位であり、バイト単位ではありません。
//! 位置字母はあらゆる変更操作の時点で互換字母へ正規化されるため、
//! 格納された列に位置字母が現れることはありません。
//!
//! ハングル音節でない文字の連なりは[`Text::encapsulate_non_hangul`]で
//! 1個の隠蔽文字の背後に隠すことができ、取り外された連なりは
//! [`EncapsulatedNonHangul`]として保存され、後から復元できます。

use std::fmt;

use crate::character::{Character, CharacterKind, HangulJamo};
use crate::common::{is_syllable, ENCAPSULATED_CODE};
use crate::errors::{NatmalError, Result};
use crate::hangul_string::HangulString;

/// コードポイント列としてのテキスト
///
/// 等価性とハッシュはコードポイント列そのものに対して定義されます。
///
/// # 例
///
/// ```
/// use natmal::Text;
///
/// let mut text = Text::from("symbol한글");
/// let hidden = text.encapsulate_non_hangul();
/// assert_eq!(text.to_std_string(), "S한글");
/// text.restore_non_hangul(&hidden);
/// assert_eq!(text.to_std_string(), "symbol한글");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Text {
    chars: Vec<u32>,
}

/// 隠蔽された非ハングル文字列の連なりを保持するコンテナ
///
/// [`Text::encapsulate_non_hangul`]が取り外した連なりを出現順に保持します。
/// 元のテキストへの参照は持たず、[`Text::restore_non_hangul`]で順番に
/// 再生されることだけを目的とします。内容を直接操作することはできません。
#[derive(Clone, Debug, Default)]
pub struct EncapsulatedNonHangul {
    runs: Vec<Vec<u32>>,
}

impl Text {
    /// 新しい空のテキストを生成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// テキストの長さ（コードポイント数）を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// テキストが空かどうかを判定します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// すべての文字を削除します。
    pub fn clear(&mut self) -> &mut Self {
        self.chars.clear();
        self
    }

    /// コードポイントを1個末尾に追加します。位置字母は正規化されます。
    #[inline(always)]
    pub(crate) fn push_codepoint(&mut self, cp: u32) {
        self.chars.push(Character::from_codepoint(cp).codepoint());
    }

    /// 別のテキストを末尾に連結します。
    pub fn append(&mut self, other: &Text) -> &mut Self {
        self.chars.extend_from_slice(&other.chars);
        self
    }

    /// 文字を1個末尾に追加します。
    pub fn append_character(&mut self, c: Character) -> &mut Self {
        self.chars.push(c.codepoint());
        self
    }

    /// 別のテキストを先頭に連結します。
    pub fn prepend(&mut self, other: &Text) -> &mut Self {
        self.chars.splice(0..0, other.chars.iter().copied());
        self
    }

    /// 文字を1個先頭に追加します。
    pub fn prepend_character(&mut self, c: Character) -> &mut Self {
        self.chars.insert(0, c.codepoint());
        self
    }

    /// 両端を含む添字範囲の部分テキストを返します。
    ///
    /// # エラー
    ///
    /// `start > end`または`end`が範囲外の場合は無効な引数エラーを返します。
    pub fn substring(&self, start: usize, end: usize) -> Result<Text> {
        if start > end {
            return Err(NatmalError::invalid_argument(
                "start",
                "the starting index may not be greater than the ending one",
            ));
        }
        if end >= self.chars.len() {
            return Err(NatmalError::invalid_argument(
                "end",
                "the ending index is out of bounds",
            ));
        }
        Ok(Text {
            chars: self.chars[start..=end].to_vec(),
        })
    }

    /// 指定された位置の文字を返します。
    ///
    /// # Panics
    ///
    /// `i`が範囲外の場合はパニックします。
    #[inline(always)]
    pub fn character_at(&self, i: usize) -> Character {
        Character::from_codepoint(self.chars[i])
    }

    /// 指定された位置の文字を置き換えます。位置字母は正規化されます。
    ///
    /// # Panics
    ///
    /// `i`が範囲外の場合はパニックします。
    #[inline(always)]
    pub fn set_character_at(&mut self, i: usize, c: Character) {
        self.chars[i] = c.codepoint();
    }

    /// 指定された位置の音節の初声を置き換えます。
    ///
    /// # エラー
    ///
    /// その位置の文字が音節でない場合、または字母が初声でない場合はエラーを返します。
    pub fn set_choseong_at(&mut self, i: usize, choseong: HangulJamo) -> Result<()> {
        let mut c = self.character_at(i);
        c.set_choseong(choseong)?;
        self.set_character_at(i, c);
        Ok(())
    }

    /// 指定された位置の音節の中声を置き換えます。
    ///
    /// # エラー
    ///
    /// その位置の文字が音節でない場合、または字母が中声でない場合はエラーを返します。
    pub fn set_jungseong_at(&mut self, i: usize, jungseong: HangulJamo) -> Result<()> {
        let mut c = self.character_at(i);
        c.set_jungseong(jungseong)?;
        self.set_character_at(i, c);
        Ok(())
    }

    /// 指定された位置の音節の終声を置き換えます。
    ///
    /// # エラー
    ///
    /// その位置の文字が音節でない場合、または字母が終声でない場合はエラーを返します。
    pub fn set_jongseong_at(&mut self, i: usize, jongseong: HangulJamo) -> Result<()> {
        let mut c = self.character_at(i);
        c.set_jongseong(jongseong)?;
        self.set_character_at(i, c);
        Ok(())
    }

    /// 指定された位置を指す文字カーソルを返します。
    #[inline(always)]
    pub fn cursor(&self, i: usize) -> CharCursor<'_> {
        CharCursor {
            text: self,
            index: i,
        }
    }

    /// テキストが別のテキストで始まるかどうかを判定します。
    pub fn starts_with(&self, prefix: &Text) -> bool {
        self.chars.starts_with(&prefix.chars)
    }

    /// すべてのコードポイントがハングル音節または隠蔽文字かどうかを判定します。
    pub fn is_pure_hangul(&self) -> bool {
        self.chars
            .iter()
            .all(|&cp| is_syllable(cp) || cp == ENCAPSULATED_CODE)
    }

    /// テキストを字母バイト列へ変換します。
    ///
    /// # エラー
    ///
    /// ハングル音節でも隠蔽文字でもないコードポイントが含まれる場合は
    /// [`CannotConvert`](NatmalError::CannotConvert)を返します。
    pub fn to_hangul_string(&self) -> Result<HangulString> {
        HangulString::from_text(self)
    }

    /// テキストをUTF-8文字列へ変換します。
    ///
    /// 隠蔽文字はASCIIの`S`として描画されます。
    pub fn to_std_string(&self) -> String {
        self.chars
            .iter()
            .map(|&cp| {
                if cp == ENCAPSULATED_CODE {
                    'S'
                } else {
                    char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER)
                }
            })
            .collect()
    }

    /// ハングル音節でない文字の連なりをすべて隠蔽します。
    ///
    /// 1回の走査で、音節でないコードポイントの極大な連なりを取り外して
    /// 隠蔽文字1個に置き換え、取り外した連なりを出現順に保存して返します。
    pub fn encapsulate_non_hangul(&mut self) -> EncapsulatedNonHangul {
        let mut runs = Vec::new();
        let mut replaced = Vec::with_capacity(self.chars.len());
        let mut buffer = Vec::new();
        for &cp in &self.chars {
            if is_syllable(cp) {
                if !buffer.is_empty() {
                    runs.push(std::mem::take(&mut buffer));
                    replaced.push(ENCAPSULATED_CODE);
                }
                replaced.push(cp);
            } else {
                buffer.push(cp);
            }
        }
        if !buffer.is_empty() {
            runs.push(buffer);
            replaced.push(ENCAPSULATED_CODE);
        }
        self.chars = replaced;
        EncapsulatedNonHangul { runs }
    }

    /// 隠蔽された非ハングル文字列を復元します。
    ///
    /// k番目に現れた隠蔽文字がk番目の連なりに置き換えられます。隠蔽文字より
    /// 連なりが多い場合、余った連なりは黙って捨てられます。連なりより隠蔽文字が
    /// 多い場合、末尾側の隠蔽文字はそのまま残ります。
    pub fn restore_non_hangul(&mut self, hidden: &EncapsulatedNonHangul) -> &mut Self {
        let mut restored = Vec::with_capacity(self.chars.len());
        let mut runs = hidden.runs.iter();
        for &cp in &self.chars {
            if cp == ENCAPSULATED_CODE {
                match runs.next() {
                    Some(run) => restored.extend_from_slice(run),
                    None => restored.push(cp),
                }
            } else {
                restored.push(cp);
            }
        }
        self.chars = restored;
        self
    }

    /// 指定された位置以降で、指定された字母で終わる文字を探します。
    ///
    /// 各文字について、音節であれば中声または終声が、単独字母であれば
    /// その字母自身が`jamo`に一致するかを調べます。
    ///
    /// # 引数
    ///
    /// * `starting_index` - 探索を開始する位置
    /// * `jamo` - 探す字母
    ///
    /// # 戻り値
    ///
    /// 一致した各文字の、`starting_index`からの相対距離のリスト。
    pub fn find_matches_ending_with_jamo(
        &self,
        starting_index: usize,
        jamo: HangulJamo,
    ) -> Vec<usize> {
        let mut result = Vec::new();
        for i in starting_index..self.chars.len() {
            let c = self.character_at(i);
            let matched = match c.kind() {
                CharacterKind::HangulSyllable => {
                    // the kind check makes both accessors infallible here
                    c.jungseong().ok() == Some(jamo) || c.jongseong().ok() == Some(jamo)
                }
                CharacterKind::HangulJamo => c.hangul_jamo().ok() == Some(jamo),
                _ => false,
            };
            if matched {
                result.push(i - starting_index);
            }
        }
        result
    }
}

impl From<&str> for Text {
    /// UTF-8文字列からテキストを生成します。位置字母は正規化されます。
    fn from(s: &str) -> Self {
        let mut text = Text {
            chars: Vec::with_capacity(s.len() / 3),
        };
        for ch in s.chars() {
            text.push_codepoint(ch as u32);
        }
        text
    }
}

impl From<Character> for Text {
    /// 長さ1のテキストを生成します。
    fn from(c: Character) -> Self {
        Text {
            chars: vec![c.codepoint()],
        }
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_std_string())
    }
}

/// テキスト上の位置を指す文字カーソル
///
/// テキストとその中の添字の組で表現される、別名参照を持たない文字参照です。
/// 有効な位置は`0..=len`であり、`len`は終端（末尾の次）を表します。
/// カーソルは生成元のテキストより長く生存できません。
#[derive(Clone, Copy, Debug)]
pub struct CharCursor<'a> {
    text: &'a Text,
    index: usize,
}

impl<'a> CharCursor<'a> {
    /// カーソル位置の文字を返します。
    ///
    /// # Panics
    ///
    /// カーソルが終端を指している場合はパニックします。
    #[inline(always)]
    pub fn character(&self) -> Character {
        self.text.character_at(self.index)
    }

    /// カーソルが指す添字を返します。
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.index
    }

    /// カーソルを1文字進めます。
    #[inline(always)]
    pub fn advance(&mut self) {
        self.index += 1;
    }

    /// カーソルを1文字戻します。
    ///
    /// # Panics
    ///
    /// カーソルが先頭を指している場合はパニックします。
    #[inline(always)]
    pub fn retreat(&mut self) {
        assert!(self.index > 0, "cannot retreat past the beginning");
        self.index -= 1;
    }

    /// 指定された距離だけ離れた位置を指す新しいカーソルを返します。
    ///
    /// # Panics
    ///
    /// 移動先が負の位置になる場合はパニックします。
    pub fn at_offset(&self, offset: isize) -> Self {
        let index = self
            .index
            .checked_add_signed(offset)
            .expect("cursor offset out of range");
        Self {
            text: self.text,
            index,
        }
    }

    /// 同じテキスト上の別のカーソルとの距離（自分 − 相手）を返します。
    pub fn distance_to(&self, other: &Self) -> isize {
        self.index as isize - other.index as isize
    }
}

impl PartialEq for CharCursor<'_> {
    /// 同一のテキスト上の同一の位置を指す場合に限り等しいとみなします。
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.text, other.text) && self.index == other.index
    }
}

impl Eq for CharCursor<'_> {}

//! ハングル文字コーデックを提供するモジュール
//!
//! このモジュールは、Unicode音節ブロック・位置字母・互換字母を単一の32ビット表現へ
//! 統合する[`Character`]型と、字母を列挙する[`HangulJamo`]型を提供します。
//! 音節は初声・中声・終声の各位置で個別に読み書きできます。
//!
//! 位置字母（U+1100台）のコードポイントは格納時に必ず対応する互換字母へ
//! 正規化されます。正規化の唯一の入口は[`Character::set_codepoint`]です。

use crate::common::{
    is_compat_jamo, is_syllable, CHOSEONG_SPAN, COMPAT_JAMO_FIRST, ENCAPSULATED_CODE,
    JUNGSEONG_SPAN, SYLLABLE_FIRST,
};
use crate::errors::{NatmalError, Result};

/// 変換表で「その位置の字母ではない」ことを表す印。
const INVALID: u8 = u8::MAX;

/// 互換字母インデックス → 初声インデックス（0..18）
const COMP_TO_CHOSEONG: [u8; 53] = [
    0, 1, INVALID, 2, INVALID, INVALID, 3, 4, 5, INVALID, INVALID, INVALID, INVALID, INVALID,
    INVALID, INVALID, 6, 7, 8, INVALID, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, INVALID, INVALID,
    INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID,
    INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID,
    INVALID,
];

/// 初声インデックス → 互換字母インデックス
const CHOSEONG_TO_COMP: [u8; 19] = [
    0, 1, 3, 6, 7, 8, 16, 17, 18, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29,
];

/// 互換字母インデックス → 中声インデックス（0..20）
const COMP_TO_JUNGSEONG: [u8; 53] = [
    INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID,
    INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID,
    INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, 0, 1,
    2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, INVALID, INVALID,
];

/// 中声インデックス → 互換字母インデックス
const JUNGSEONG_TO_COMP: [u8; 21] = [
    30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50,
];

/// 互換字母インデックス → 終声インデックス（0..27、0は「終声なし」）
const COMP_TO_JONGSEONG: [u8; 53] = [
    1, 2, 3, 4, 5, 6, 7, INVALID, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, INVALID, 18, 19, 20, 21,
    22, INVALID, 23, 24, 25, 26, 27, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID,
    INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID,
    INVALID, INVALID, INVALID, INVALID, 0, INVALID,
];

/// 終声インデックス → 互換字母インデックス
const JONGSEONG_TO_COMP: [u8; 28] = [
    51, 0, 1, 2, 3, 4, 5, 6, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 19, 20, 21, 22, 23, 25, 26, 27,
    28, 29,
];

/// すべてのハングル字母の列挙型
///
/// 並び順はハングル互換字母ブロック（U+3131..U+3163）の順序に一致し、
/// この順序は変換表およびトライのキーアルファベットの根拠となるため変更できません。
/// 子音30個、母音21個の後に、終声が無いことを表す[`HangulJamo::None`]と
/// 検索用ワイルドカードの[`HangulJamo::Any`]が続きます。
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum HangulJamo {
    Giyeok,
    SsangGiyeok,
    GiyeokSiot,
    Nieun,
    NieunJieut,
    NieunHieut,
    Digeut,
    SsangDigeut,
    Rieul,
    RieulGiyeok,
    RieulMieum,
    RieulBieup,
    RieulSiot,
    RieulTieut,
    RieulPieup,
    RieulHieut,
    Mieum,
    Bieup,
    SsangBieup,
    BieupSiot,
    Siot,
    SsangSiot,
    Ieung,
    Jieut,
    SsangJieut,
    Chieut,
    Kieuk,
    Tieut,
    Pieup,
    Hieut,

    A,
    Ae,
    Ya,
    Yae,
    Eo,
    E,
    Yeo,
    Ye,
    O,
    Oa,
    Oae,
    Oi,
    Yo,
    U,
    Ueo,
    Ue,
    Ui,
    Yu,
    Eu,
    Eui,
    I,

    /// 終声が存在しないことを表す擬似字母。
    None,
    /// 検索時のワイルドカードとして予約された擬似字母。
    Any,
}

/// 互換字母インデックスから字母を引くための一覧表。
const ALL_JAMOS: [HangulJamo; 53] = [
    HangulJamo::Giyeok,
    HangulJamo::SsangGiyeok,
    HangulJamo::GiyeokSiot,
    HangulJamo::Nieun,
    HangulJamo::NieunJieut,
    HangulJamo::NieunHieut,
    HangulJamo::Digeut,
    HangulJamo::SsangDigeut,
    HangulJamo::Rieul,
    HangulJamo::RieulGiyeok,
    HangulJamo::RieulMieum,
    HangulJamo::RieulBieup,
    HangulJamo::RieulSiot,
    HangulJamo::RieulTieut,
    HangulJamo::RieulPieup,
    HangulJamo::RieulHieut,
    HangulJamo::Mieum,
    HangulJamo::Bieup,
    HangulJamo::SsangBieup,
    HangulJamo::BieupSiot,
    HangulJamo::Siot,
    HangulJamo::SsangSiot,
    HangulJamo::Ieung,
    HangulJamo::Jieut,
    HangulJamo::SsangJieut,
    HangulJamo::Chieut,
    HangulJamo::Kieuk,
    HangulJamo::Tieut,
    HangulJamo::Pieup,
    HangulJamo::Hieut,
    HangulJamo::A,
    HangulJamo::Ae,
    HangulJamo::Ya,
    HangulJamo::Yae,
    HangulJamo::Eo,
    HangulJamo::E,
    HangulJamo::Yeo,
    HangulJamo::Ye,
    HangulJamo::O,
    HangulJamo::Oa,
    HangulJamo::Oae,
    HangulJamo::Oi,
    HangulJamo::Yo,
    HangulJamo::U,
    HangulJamo::Ueo,
    HangulJamo::Ue,
    HangulJamo::Ui,
    HangulJamo::Yu,
    HangulJamo::Eu,
    HangulJamo::Eui,
    HangulJamo::I,
    HangulJamo::None,
    HangulJamo::Any,
];

impl HangulJamo {
    /// 互換字母インデックス（0..52）に対応する字母を返します。
    #[inline(always)]
    pub(crate) const fn from_compat_index(index: u8) -> Self {
        ALL_JAMOS[index as usize]
    }

    /// この字母の互換字母インデックス（0..52）を返します。
    #[inline(always)]
    pub(crate) const fn compat_index(self) -> u8 {
        self as u8
    }

    /// この字母の初声インデックスを返します。初声でない場合は`None`。
    #[inline(always)]
    pub(crate) fn choseong_index(self) -> Option<u8> {
        match COMP_TO_CHOSEONG[self as usize] {
            INVALID => Option::None,
            i => Some(i),
        }
    }

    /// この字母の中声インデックスを返します。中声でない場合は`None`。
    #[inline(always)]
    pub(crate) fn jungseong_index(self) -> Option<u8> {
        match COMP_TO_JUNGSEONG[self as usize] {
            INVALID => Option::None,
            i => Some(i),
        }
    }

    /// この字母の終声インデックスを返します。終声でない場合は`None`。
    ///
    /// [`HangulJamo::None`]は終声インデックス0（終声なし）に対応します。
    #[inline(always)]
    pub(crate) fn jongseong_index(self) -> Option<u8> {
        match COMP_TO_JONGSEONG[self as usize] {
            INVALID => Option::None,
            i => Some(i),
        }
    }
}

/// 文字の種別を表す列挙型
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CharacterKind {
    /// ハングルでない一般の文字。
    Character,
    /// ハングル音節（U+AC00..U+D7A3）。
    HangulSyllable,
    /// 単独のハングル字母（互換字母ブロック）。
    HangulJamo,
    /// 隠蔽された非ハングル文字列を代理する文字。
    EncapsulatedNonHangulSyllable,
}

/// 単一のハングル音節を表す16ビットの音節コード
///
/// 音節のコードポイントから`0xAC00`を引いた値を保持します。
/// 上位側の3値は下流のモデルが使用するために予約されています。
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct HangulSyllableCode(pub u16);

impl HangulSyllableCode {
    /// 非ハングル記号（隠蔽文字）を表す予約コード。
    pub const SYMBOL: u16 = u16::MAX;
    /// 文頭を表す予約コード。
    pub const BOS: u16 = u16::MAX - 1;
    /// 文末を表す予約コード。
    pub const EOS: u16 = u16::MAX - 2;
}

/// 単一の文字を表す構造体
///
/// 内部表現は32ビットのコードポイント1個のみです。種別（[`CharacterKind`]）は
/// 格納されたコードポイントから純粋に導出されます。音節に対しては初声・中声・終声を
/// 個別に読み書きでき、種別が合わない操作は
/// [`OperationNotSupported`](crate::errors::NatmalError::OperationNotSupported)を返します。
///
/// # 例
///
/// ```
/// use natmal::{Character, HangulJamo};
///
/// let c = Character::from_jamo_triple(HangulJamo::Hieut, HangulJamo::A, HangulJamo::Nieun)?;
/// assert_eq!(c.codepoint(), 54620); // 한
/// assert_eq!(c.choseong()?, HangulJamo::Hieut);
/// # Ok::<(), natmal::errors::NatmalError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Character {
    cp: u32,
}

impl Default for Character {
    fn default() -> Self {
        Self { cp: 0 }
    }
}

impl Character {
    /// UTF-8文字列の先頭のコードポイントから文字を生成します。
    ///
    /// 2文字目以降は無視されます。位置字母は互換字母へ正規化されます。
    ///
    /// # エラー
    ///
    /// 空文字列が渡された場合は無効な引数エラーを返します。
    pub fn from_utf8(s: &str) -> Result<Self> {
        let first = s.chars().next().ok_or_else(|| {
            NatmalError::invalid_argument("s", "cannot build a character from an empty string")
        })?;
        Ok(Self::from_codepoint(first as u32))
    }

    /// Unicodeコードポイントから文字を生成します。
    ///
    /// 位置字母は互換字母へ正規化されます。
    pub fn from_codepoint(cp: u32) -> Self {
        let mut c = Self::default();
        c.set_codepoint(cp);
        c
    }

    /// 単独の字母から文字を生成します。
    pub fn from_jamo(jamo: HangulJamo) -> Self {
        Self {
            cp: u32::from(jamo.compat_index()) + COMPAT_JAMO_FIRST,
        }
    }

    /// 初声・中声・終声の3字母を合成して音節を生成します。
    ///
    /// # エラー
    ///
    /// 渡された字母がその位置の字母でない場合は無効な引数エラーを返します。
    pub fn from_jamo_triple(
        choseong: HangulJamo,
        jungseong: HangulJamo,
        jongseong: HangulJamo,
    ) -> Result<Self> {
        let cho = choseong.choseong_index().ok_or_else(|| {
            NatmalError::invalid_argument("choseong", "the jamo passed is not a valid choseong")
        })?;
        let jung = jungseong.jungseong_index().ok_or_else(|| {
            NatmalError::invalid_argument("jungseong", "the jamo passed is not a valid jungseong")
        })?;
        let jong = jongseong.jongseong_index().ok_or_else(|| {
            NatmalError::invalid_argument("jongseong", "the jamo passed is not a valid jongseong")
        })?;
        Ok(Self {
            cp: SYLLABLE_FIRST
                + u32::from(cho) * CHOSEONG_SPAN
                + u32::from(jung) * JUNGSEONG_SPAN
                + u32::from(jong),
        })
    }

    /// 音節コードから文字を生成します。
    ///
    /// [`HangulSyllableCode::SYMBOL`]は隠蔽文字になります。
    pub fn from_syllable_code(code: HangulSyllableCode) -> Self {
        if code.0 == HangulSyllableCode::SYMBOL {
            Self {
                cp: ENCAPSULATED_CODE,
            }
        } else {
            Self::from_codepoint(u32::from(code.0) + SYLLABLE_FIRST)
        }
    }

    /// 指定されたコードポイントがUnicode位置字母かどうかを判定します。
    #[inline(always)]
    pub const fn is_positional_jamo_codepoint(cp: u32) -> bool {
        (cp >= 0x1100 && cp <= 0x1112)
            || (cp >= 0x1161 && cp <= 0x1175)
            || (cp >= 0x11A8 && cp <= 0x11C2)
    }

    /// 位置字母（初声・中声・終声ブロック）のコードポイントを字母へ変換します。
    ///
    /// # エラー
    ///
    /// コードポイントが3つの位置字母ブロックのいずれにも属さない場合は
    /// 無効な引数エラーを返します。
    pub fn jamo_from_positional(cp: u32) -> Result<HangulJamo> {
        if (0x1100..=0x1112).contains(&cp) {
            let choseong = (cp - 0x1100) as usize;
            Ok(HangulJamo::from_compat_index(CHOSEONG_TO_COMP[choseong]))
        } else if (0x1161..=0x1175).contains(&cp) {
            let jungseong = (cp - 0x1161) as usize;
            Ok(HangulJamo::from_compat_index(JUNGSEONG_TO_COMP[jungseong]))
        } else if (0x11A8..=0x11C2).contains(&cp) {
            // 'no trail' is not part of the positional block -> + 1
            let jongseong = (cp - 0x11A8 + 1) as usize;
            Ok(HangulJamo::from_compat_index(JONGSEONG_TO_COMP[jongseong]))
        } else {
            Err(NatmalError::invalid_argument(
                "cp",
                "the codepoint is not a valid positional Hangul jamo",
            ))
        }
    }

    /// この文字の種別を返します。
    pub fn kind(&self) -> CharacterKind {
        if is_syllable(self.cp) {
            CharacterKind::HangulSyllable
        } else if is_compat_jamo(self.cp) {
            CharacterKind::HangulJamo
        } else if self.cp == ENCAPSULATED_CODE {
            CharacterKind::EncapsulatedNonHangulSyllable
        } else {
            CharacterKind::Character
        }
    }

    /// この文字のUnicodeコードポイントを返します。
    #[inline(always)]
    pub const fn codepoint(&self) -> u32 {
        self.cp
    }

    /// この文字を指定されたコードポイントに設定します。
    ///
    /// 位置字母のコードポイントは対応する互換字母へ透過的に付け替えられます。
    /// これが「位置字母は格納されない」という不変条件を守る唯一の箇所です。
    pub fn set_codepoint(&mut self, cp: u32) {
        if Self::is_positional_jamo_codepoint(cp) {
            // the range check above makes the conversion infallible
            if let Ok(jamo) = Self::jamo_from_positional(cp) {
                self.cp = u32::from(jamo.compat_index()) + COMPAT_JAMO_FIRST;
            }
        } else {
            self.cp = cp;
        }
    }

    /// 音節の初声を返します。
    ///
    /// # エラー
    ///
    /// 文字が音節でない場合は操作未対応エラーを返します。
    pub fn choseong(&self) -> Result<HangulJamo> {
        self.require_syllable("choseong")?;
        let choseong = ((self.cp - SYLLABLE_FIRST) / CHOSEONG_SPAN) as usize;
        Ok(HangulJamo::from_compat_index(CHOSEONG_TO_COMP[choseong]))
    }

    /// 音節の初声を置き換えます。
    ///
    /// # エラー
    ///
    /// 文字が音節でない場合は操作未対応エラーを、渡された字母が初声でない場合は
    /// 無効な引数エラーを返します。
    pub fn set_choseong(&mut self, choseong: HangulJamo) -> Result<()> {
        self.require_syllable("set_choseong")?;
        let new_choseong = choseong.choseong_index().ok_or_else(|| {
            NatmalError::invalid_argument("choseong", "the jamo passed is not a valid choseong")
        })?;
        let old_choseong = (self.cp - SYLLABLE_FIRST) / CHOSEONG_SPAN;
        let cp = self.cp - old_choseong * CHOSEONG_SPAN + u32::from(new_choseong) * CHOSEONG_SPAN;
        self.set_codepoint(cp);
        Ok(())
    }

    /// 音節の中声を返します。
    ///
    /// # エラー
    ///
    /// 文字が音節でない場合は操作未対応エラーを返します。
    pub fn jungseong(&self) -> Result<HangulJamo> {
        self.require_syllable("jungseong")?;
        let jungseong = (((self.cp - SYLLABLE_FIRST) % CHOSEONG_SPAN) / JUNGSEONG_SPAN) as usize;
        Ok(HangulJamo::from_compat_index(JUNGSEONG_TO_COMP[jungseong]))
    }

    /// 音節の中声を置き換えます。
    ///
    /// # エラー
    ///
    /// 文字が音節でない場合は操作未対応エラーを、渡された字母が中声でない場合は
    /// 無効な引数エラーを返します。
    pub fn set_jungseong(&mut self, jungseong: HangulJamo) -> Result<()> {
        self.require_syllable("set_jungseong")?;
        let new_jungseong = jungseong.jungseong_index().ok_or_else(|| {
            NatmalError::invalid_argument("jungseong", "the jamo passed is not a valid jungseong")
        })?;
        let old_jungseong = ((self.cp - SYLLABLE_FIRST) % CHOSEONG_SPAN) / JUNGSEONG_SPAN;
        let cp =
            self.cp - old_jungseong * JUNGSEONG_SPAN + u32::from(new_jungseong) * JUNGSEONG_SPAN;
        self.set_codepoint(cp);
        Ok(())
    }

    /// 音節の終声を返します。
    ///
    /// 終声が無い開音節では[`HangulJamo::None`]を返します。
    ///
    /// # エラー
    ///
    /// 文字が音節でない場合は操作未対応エラーを返します。
    pub fn jongseong(&self) -> Result<HangulJamo> {
        self.require_syllable("jongseong")?;
        let jongseong = (((self.cp - SYLLABLE_FIRST) % CHOSEONG_SPAN) % JUNGSEONG_SPAN) as usize;
        Ok(HangulJamo::from_compat_index(JONGSEONG_TO_COMP[jongseong]))
    }

    /// 音節の終声を置き換えます。
    ///
    /// # エラー
    ///
    /// 文字が音節でない場合は操作未対応エラーを、渡された字母が終声でない場合は
    /// 無効な引数エラーを返します。
    pub fn set_jongseong(&mut self, jongseong: HangulJamo) -> Result<()> {
        self.require_syllable("set_jongseong")?;
        let new_jongseong = jongseong.jongseong_index().ok_or_else(|| {
            NatmalError::invalid_argument("jongseong", "the jamo passed is not a valid jongseong")
        })?;
        let old_jongseong = ((self.cp - SYLLABLE_FIRST) % CHOSEONG_SPAN) % JUNGSEONG_SPAN;
        let cp = self.cp - old_jongseong + u32::from(new_jongseong);
        self.set_codepoint(cp);
        Ok(())
    }

    /// 単独字母の[`HangulJamo`]表現を返します。
    ///
    /// # エラー
    ///
    /// 文字が単独字母でない場合は操作未対応エラーを返します。
    pub fn hangul_jamo(&self) -> Result<HangulJamo> {
        if self.kind() != CharacterKind::HangulJamo {
            return Err(NatmalError::operation_not_supported(
                "hangul_jamo",
                self.kind(),
            ));
        }
        Ok(HangulJamo::from_compat_index(
            (self.cp - COMPAT_JAMO_FIRST) as u8,
        ))
    }

    /// 単独字母を指定された字母に置き換えます。
    ///
    /// # エラー
    ///
    /// 文字が単独字母でない場合は操作未対応エラーを返します。
    pub fn set_hangul_jamo(&mut self, jamo: HangulJamo) -> Result<()> {
        if self.kind() != CharacterKind::HangulJamo {
            return Err(NatmalError::operation_not_supported(
                "set_hangul_jamo",
                self.kind(),
            ));
        }
        self.set_codepoint(u32::from(jamo.compat_index()) + COMPAT_JAMO_FIRST);
        Ok(())
    }

    /// 対応する音節コードを返します。
    ///
    /// 隠蔽文字には[`HangulSyllableCode::SYMBOL`]が返されます。
    ///
    /// # エラー
    ///
    /// 文字が音節でも隠蔽文字でもない場合は操作未対応エラーを返します。
    pub fn hangul_syllable_code(&self) -> Result<HangulSyllableCode> {
        match self.kind() {
            CharacterKind::EncapsulatedNonHangulSyllable => {
                Ok(HangulSyllableCode(HangulSyllableCode::SYMBOL))
            }
            CharacterKind::HangulSyllable => {
                Ok(HangulSyllableCode((self.cp - SYLLABLE_FIRST) as u16))
            }
            kind => Err(NatmalError::operation_not_supported(
                "hangul_syllable_code",
                kind,
            )),
        }
    }

    /// この文字を指定された音節コードに対応する文字へ置き換えます。
    ///
    /// # エラー
    ///
    /// 文字が音節でも隠蔽文字でもない場合は操作未対応エラーを返します。
    pub fn set_to_hangul_syllable_code(&mut self, code: HangulSyllableCode) -> Result<()> {
        match self.kind() {
            CharacterKind::HangulSyllable | CharacterKind::EncapsulatedNonHangulSyllable => {
                if code.0 == HangulSyllableCode::SYMBOL {
                    self.cp = ENCAPSULATED_CODE;
                } else {
                    self.set_codepoint(u32::from(code.0) + SYLLABLE_FIRST);
                }
                Ok(())
            }
            kind => Err(NatmalError::operation_not_supported(
                "set_to_hangul_syllable_code",
                kind,
            )),
        }
    }

    #[inline(always)]
    fn require_syllable(&self, operation: &'static str) -> Result<()> {
        if self.kind() != CharacterKind::HangulSyllable {
            return Err(NatmalError::operation_not_supported(operation, self.kind()));
        }
        Ok(())
    }
}

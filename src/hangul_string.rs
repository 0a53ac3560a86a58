//! 1字母1バイトのハングル文字列表現を提供するモジュール
//!
//! [`HangulString`]はトライのキーアルファベットとして使われるコンパクトな
//! バイト列です。音節1個は「初声+1・中声+1・終声+1」の3バイトに、隠蔽文字は
//! [`ENCAP_BYTE`]の1バイトに展開されます。バイト0は決して現れないため、
//! ゼロ終端文字列としてそのまま扱えます。

use crate::character::CharacterKind;
use crate::common::{
    CHOSEONG_SPAN, ENCAP_BYTE, ENCAPSULATED_CODE, JUNGSEONG_SPAN, SYLLABLE_FIRST,
};
use crate::errors::{NatmalError, Result};
use crate::text::Text;

/// 字母単位のバイト列で表現されたハングル文字列
///
/// 純粋なデータコンテナであり、内容の検証は[`Text`]からの変換時にのみ行われます。
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct HangulString {
    bytes: Vec<u8>,
}

impl HangulString {
    /// 生のバイト列から新しいインスタンスを生成します。
    #[inline(always)]
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// テキストを字母バイト列へ変換します。
    ///
    /// # エラー
    ///
    /// 音節でも隠蔽文字でもないコードポイントが残っている場合は
    /// [`CannotConvert`](NatmalError::CannotConvert)を返します。
    pub fn from_text(text: &Text) -> Result<Self> {
        let mut bytes = Vec::with_capacity(text.len() * 3);
        for i in 0..text.len() {
            let c = text.character_at(i);
            match c.kind() {
                CharacterKind::EncapsulatedNonHangulSyllable => bytes.push(ENCAP_BYTE),
                CharacterKind::HangulSyllable => {
                    let offset = c.codepoint() - SYLLABLE_FIRST;
                    let choseong = (offset / CHOSEONG_SPAN) as u8;
                    let jungseong = ((offset % CHOSEONG_SPAN) / JUNGSEONG_SPAN) as u8;
                    let jongseong = ((offset % CHOSEONG_SPAN) % JUNGSEONG_SPAN) as u8;
                    bytes.push(choseong + 1);
                    bytes.push(jungseong + 1);
                    bytes.push(jongseong + 1);
                }
                _ => return Err(NatmalError::CannotConvert),
            }
        }
        Ok(Self { bytes })
    }

    /// 字母バイト列への参照を返します。
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// バイト列の長さを返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// バイト列が空かどうかを判定します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<&HangulString> for Text {
    /// 字母バイト列をテキストへ復元します。
    ///
    /// 3バイトごとに音節1個を合成し、[`ENCAP_BYTE`]は隠蔽文字へ戻します。
    /// 末尾に3バイトに満たない字母が残った場合、それらは捨てられます。
    fn from(hstr: &HangulString) -> Self {
        let mut text = Text::new();
        let mut jamos = [0u8; 3];
        let mut jamo_counter = 0;
        for &b in &hstr.bytes {
            if b == ENCAP_BYTE {
                text.push_codepoint(ENCAPSULATED_CODE);
                continue;
            }
            jamos[jamo_counter] = b - 1;
            jamo_counter += 1;
            if jamo_counter == 3 {
                let cp = SYLLABLE_FIRST
                    + u32::from(jamos[0]) * CHOSEONG_SPAN
                    + u32::from(jamos[1]) * JUNGSEONG_SPAN
                    + u32::from(jamos[2]);
                text.push_codepoint(cp);
                jamo_counter = 0;
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip() {
        let text = Text::from("안녕하세요");
        let hstr = HangulString::from_text(&text).unwrap();
        assert_eq!(hstr.len(), 15);
        assert_eq!(Text::from(&hstr), text);
    }

    #[test]
    fn test_encap_byte() {
        let mut text = Text::from("symbol한글");
        let _ = text.encapsulate_non_hangul();
        let hstr = HangulString::from_text(&text).unwrap();
        assert_eq!(hstr.as_bytes()[0], ENCAP_BYTE);
        assert_eq!(hstr.len(), 7);
        assert_eq!(Text::from(&hstr), text);
    }

    #[test]
    fn test_zero_never_appears() {
        let text = Text::from("가힣");
        let hstr = HangulString::from_text(&text).unwrap();
        assert!(hstr.as_bytes().iter().all(|&b| b != 0));
    }

    #[test]
    fn test_non_hangul_rejected() {
        assert!(HangulString::from_text(&Text::from("latin한글")).is_err());
        assert!(HangulString::from_text(&Text::from("ㄹ")).is_err());
    }
}

//! 字母バイト列をキーとする基数トライを提供するモジュール
//!
//! トライは2つの異なる形を持ちます。[`TrieBuilder`]は挿入可能な編集時の木で、
//! [`freeze`](TrieBuilder::freeze)によって検索専用の[`Trie`]へ一方向に変換されます。
//! 凍結されたトライは直列化ノード配列（単一の連続したバイトバッファ）として
//! 保持され、検索時のノード参照はオフセット計算1回で済みます。
//! [`to_builder`](Trie::to_builder)は凍結の逆変換であり、編集時の木を再構築します。
//!
//! キーは[`HangulString`]のバイト列です。兄弟ノードのエッジラベルが空でない
//! 共通接頭辞を持つことはありません（そのような接頭辞は親ノードへ既に
//! くくり出されています）。ノードのidはそのノードが葉である場合にのみ意味を
//! 持ちます。空ラベルの子ノードは「ここで終わる単語は、さらに下へ続く単語とは
//! 別のidを持つ」ことを表します。

use std::io::{Read, Write};

use crate::common::WORD_NOT_FOUND;
use crate::errors::{NatmalError, Result};
use crate::hangul_string::HangulString;
use crate::text::Text;

/// 単語とそのidの組
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WordIdPair {
    /// 単語のテキスト表現。
    pub text: Text,
    /// 単語のid。
    pub id: u32,
}

/// 編集時のトライのノード
#[derive(Clone, Debug, Default)]
struct TrieNode {
    /// エッジラベルの字母バイト列。
    label: Vec<u8>,
    /// 挿入順に並んだ子ノード。
    children: Vec<TrieNode>,
    /// 葉ノードのid。葉でないノードでは意味を持たない。
    id: u32,
}

impl TrieNode {
    fn leaf(label: Vec<u8>, id: u32) -> Self {
        Self {
            label,
            children: Vec::new(),
            id,
        }
    }
}

/// 編集（挿入）可能な形のトライ
///
/// 単語の追加が完了したら[`freeze`](TrieBuilder::freeze)で検索可能な
/// [`Trie`]へ変換します。
///
/// # 例
///
/// ```
/// use natmal::{Text, TrieBuilder};
///
/// let mut builder = TrieBuilder::new();
/// builder.add_word(&Text::from("한"), 1, true)?;
/// builder.add_word(&Text::from("한글"), 2, true)?;
/// let trie = builder.freeze();
/// assert_eq!(trie.find_word(&Text::from("한글"))?, 2);
/// # Ok::<(), natmal::errors::NatmalError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct TrieBuilder {
    root_children: Vec<TrieNode>,
}

impl TrieBuilder {
    /// 新しい空のビルダーを生成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 単語をトライに追加します。
    ///
    /// 既に存在する単語に対しては、`replace`が`true`の場合のみidを上書きします。
    /// `replace`が`false`の場合は格納済みのidをそのまま返します。
    ///
    /// # 引数
    ///
    /// * `word` - 追加する単語
    /// * `id` - 単語に割り当てるid
    /// * `replace` - 既存のidを置き換えるかどうか
    ///
    /// # 戻り値
    ///
    /// 単語のid。単語が既に存在して`replace`が`false`の場合は元のidです。
    /// 空の単語は木を変更せず`id`をそのまま返します。
    ///
    /// # エラー
    ///
    /// 単語が字母バイト列へ変換できない場合は
    /// [`CannotConvert`](NatmalError::CannotConvert)を返します。
    pub fn add_word(&mut self, word: &Text, id: u32, replace: bool) -> Result<u32> {
        let key = HangulString::from_text(word)?;
        if key.is_empty() {
            return Ok(id);
        }
        Ok(Self::insert(
            &mut self.root_children,
            0,
            true,
            key.as_bytes(),
            id,
            replace,
        ))
    }

    /// `children`が`node_id`を持つノードの子リストであるとして、キーの残りを挿入します。
    fn insert(
        children: &mut Vec<TrieNode>,
        node_id: u32,
        at_root: bool,
        key: &[u8],
        id: u32,
        replace: bool,
    ) -> u32 {
        let mut descend_target = None;
        for idx in 0..children.len() {
            let common = lcp(key, &children[idx].label);
            if common == children[idx].label.len() && common > 0 {
                descend_target = Some((idx, common));
                break;
            }
            if common > 0 {
                // edge split: keep the shared prefix, re-hang the original
                // subtree, and branch off the diverging remainder
                let child = &mut children[idx];
                let original = std::mem::take(&mut child.label);
                child.label = original[..common].to_vec();
                let existing = TrieNode {
                    label: original[common..].to_vec(),
                    children: std::mem::take(&mut child.children),
                    id: child.id,
                };
                let new_branch = TrieNode::leaf(key[common..].to_vec(), id);
                child.children.push(new_branch);
                child.children.push(existing);
                return id;
            }
        }

        if let Some((idx, common)) = descend_target {
            let rest = &key[common..];
            if rest.is_empty() {
                // the key ends exactly on this child
                let child = &mut children[idx];
                if child.children.is_empty() {
                    if replace {
                        child.id = id;
                    }
                    return child.id;
                }
                if let Some(terminator) =
                    child.children.iter_mut().find(|n| n.label.is_empty())
                {
                    if replace {
                        terminator.id = id;
                    }
                    return terminator.id;
                }
                child.children.push(TrieNode::leaf(Vec::new(), id));
                return id;
            }
            let child_id = children[idx].id;
            return Self::insert(&mut children[idx].children, child_id, false, rest, id, replace);
        }

        // no child shares a prefix with the remaining key
        if children.is_empty() && !at_root {
            // the node used to terminate a word; demote its id into an
            // empty-label child so that both words stay retrievable
            children.push(TrieNode::leaf(Vec::new(), node_id));
        }
        children.push(TrieNode::leaf(key.to_vec(), id));
        id
    }

    /// ビルダーを凍結し、検索可能なトライへ変換します。
    ///
    /// 編集時の木は直列化ノード配列へ線形化されます。各ノードは
    /// `[子数 u8][ペイロード u32][ラベル][0x00]`として書き出され、ペイロードは
    /// 葉ならばid、そうでなければノード先頭から最初の子までのバイト距離です。
    /// 兄弟ノードは連続して配置され、各兄弟の子孫ブロックが兄弟順にその後へ続きます。
    pub fn freeze(self) -> Trie {
        let mut sna = Vec::new();
        // siblings carry distinct first bytes, so the fan-out fits in a byte
        sna.push(self.root_children.len() as u8);
        Self::write_children(&mut sna, &self.root_children);
        Trie { sna }
    }

    fn write_children(sna: &mut Vec<u8>, children: &[TrieNode]) {
        let mut node_offsets = Vec::with_capacity(children.len());
        for node in children {
            node_offsets.push(sna.len());
            sna.push(node.children.len() as u8);
            let payload = if node.children.is_empty() { node.id } else { 0 };
            sna.extend_from_slice(&payload.to_le_bytes());
            sna.extend_from_slice(&node.label);
            sna.push(0);
        }
        for (node, &offset) in children.iter().zip(&node_offsets) {
            if !node.children.is_empty() {
                let distance = (sna.len() - offset) as u32;
                sna[offset + 1..offset + 5].copy_from_slice(&distance.to_le_bytes());
                Self::write_children(sna, &node.children);
            }
        }
    }
}

/// 凍結された（検索専用の）トライ
///
/// 単一の連続したバイトバッファを所有します。編集はできません。
/// ストリームへの直列化は`u32`のサイズ接頭辞（リトルエンディアン）に
/// バッファ本体が続く形式です。
pub struct Trie {
    sna: Vec<u8>,
}

impl Default for Trie {
    /// 単語を1つも含まない凍結済みトライを生成します。
    fn default() -> Self {
        Self { sna: vec![0] }
    }
}

impl Trie {
    /// 単語を検索し、そのidを返します。
    ///
    /// # 戻り値
    ///
    /// 見つかった単語のid。見つからない場合は
    /// [`WORD_NOT_FOUND`](crate::common::WORD_NOT_FOUND)です。
    ///
    /// # エラー
    ///
    /// 単語が字母バイト列へ変換できない場合は
    /// [`CannotConvert`](NatmalError::CannotConvert)を返します。
    pub fn find_word(&self, word: &Text) -> Result<u32> {
        let key = HangulString::from_text(word)?;
        let key = key.as_bytes();
        let mut offset = 0;
        let mut node: Option<usize> = None;

        while offset < key.len() {
            let (count, mut child_pos) = self.children_of(node);
            let mut descended = false;
            for _ in 0..count {
                let label = self.label(child_pos);
                if !label.is_empty() && key[offset..].starts_with(label) {
                    offset += label.len();
                    node = Some(child_pos);
                    descended = true;
                    break;
                }
                child_pos += self.node_len(child_pos);
            }
            if !descended {
                return Ok(WORD_NOT_FOUND);
            }
        }

        // a word ends here either on a leaf or on an empty-label child
        match node {
            Some(pos) if self.children_count(pos) == 0 => Ok(self.payload(pos)),
            _ => {
                let (count, mut child_pos) = self.children_of(node);
                for _ in 0..count {
                    if self.label(child_pos).is_empty() {
                        return Ok(self.payload(child_pos));
                    }
                    child_pos += self.node_len(child_pos);
                }
                Ok(WORD_NOT_FOUND)
            }
        }
    }

    /// 指定されたテキストの接頭辞になっているすべての単語を列挙します。
    ///
    /// 降下の途中で出会った順（短い単語から長い単語の順）で返されます。
    ///
    /// # エラー
    ///
    /// テキストが字母バイト列へ変換できない場合は
    /// [`CannotConvert`](NatmalError::CannotConvert)を返します。
    pub fn find_word_prefixes(&self, word: &Text) -> Result<Vec<WordIdPair>> {
        let key = HangulString::from_text(word)?;
        let key = key.as_bytes();
        let mut prefixes = Vec::new();
        let mut offset = 0;
        let mut node: Option<usize> = None;

        while offset < key.len() {
            let (count, mut child_pos) = self.children_of(node);
            let mut descend = None;
            let mut saw_terminator = false;
            for _ in 0..count {
                let label = self.label(child_pos);
                if label.is_empty() {
                    prefixes.push(self.word_id_pair(&key[..offset], self.payload(child_pos)));
                    saw_terminator = true;
                } else if key[offset..].starts_with(label) {
                    descend = Some((child_pos, offset + label.len()));
                }
                child_pos += self.node_len(child_pos);
            }
            match descend {
                Some((pos, next_offset)) => {
                    node = Some(pos);
                    offset = next_offset;
                }
                None => {
                    if saw_terminator {
                        return Ok(prefixes);
                    }
                    break;
                }
            }
        }

        // the node the walk stopped on can itself terminate a word
        match node {
            Some(pos) if self.children_count(pos) == 0 => {
                prefixes.push(self.word_id_pair(&key[..offset], self.payload(pos)));
            }
            _ => {
                let (count, mut child_pos) = self.children_of(node);
                for _ in 0..count {
                    if self.label(child_pos).is_empty() {
                        prefixes.push(self.word_id_pair(&key[..offset], self.payload(child_pos)));
                    }
                    child_pos += self.node_len(child_pos);
                }
            }
        }

        Ok(prefixes)
    }

    /// トライに含まれるすべての単語をidとともに列挙するイテレータを返します。
    ///
    /// 単語は深さ優先・兄弟順に、経路上のラベルを連結して復元されます。
    pub fn words(&self) -> Words<'_> {
        let mut stack = Vec::new();
        let count = self.sna[0];
        if count > 0 {
            stack.push(Frame {
                pos: 1,
                remaining: count,
                prefix_len: 0,
            });
        }
        Words {
            trie: self,
            stack,
            prefix: Vec::new(),
        }
    }

    /// トライをストリームへ直列化します。
    ///
    /// `u32`のバッファサイズ（リトルエンディアン）に続けて、
    /// 直列化ノード配列の生のバイト列を書き出します。
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合はI/Oエラーを返します。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        let size = u32::try_from(self.sna.len())?;
        wtr.write_all(&size.to_le_bytes())?;
        wtr.write_all(&self.sna)?;
        Ok(())
    }

    /// ストリームからトライを読み込みます。
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合はI/Oエラーを、サイズが0の場合は
    /// 無効なフォーマットエラーを返します。
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut size_buf = [0u8; 4];
        rdr.read_exact(&mut size_buf)?;
        let size = u32::from_le_bytes(size_buf) as usize;
        if size == 0 {
            return Err(NatmalError::invalid_format(
                "rdr",
                "the serialized trie buffer is empty",
            ));
        }
        let mut sna = vec![0u8; size];
        rdr.read_exact(&mut sna)?;
        Ok(Self { sna })
    }

    /// 凍結を解き、編集可能なビルダーを再構築します。
    pub fn to_builder(&self) -> TrieBuilder {
        let count = self.sna[0];
        let mut root_children = Vec::with_capacity(usize::from(count));
        let mut pos = 1;
        for _ in 0..count {
            root_children.push(self.read_node(pos));
            pos += self.node_len(pos);
        }
        TrieBuilder { root_children }
    }

    fn read_node(&self, pos: usize) -> TrieNode {
        let count = self.children_count(pos);
        let mut node = TrieNode {
            label: self.label(pos).to_vec(),
            children: Vec::with_capacity(usize::from(count)),
            id: 0,
        };
        if count == 0 {
            node.id = self.payload(pos);
        } else {
            let mut child_pos = pos + self.payload(pos) as usize;
            for _ in 0..count {
                node.children.push(self.read_node(child_pos));
                child_pos += self.node_len(child_pos);
            }
        }
        node
    }

    /// ノードの子数を返します。
    #[inline(always)]
    fn children_count(&self, pos: usize) -> u8 {
        self.sna[pos]
    }

    /// ノードのペイロード（葉のid、または最初の子までの距離）を返します。
    #[inline(always)]
    fn payload(&self, pos: usize) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.sna[pos + 1..pos + 5]);
        u32::from_le_bytes(bytes)
    }

    /// ノードのエッジラベルを返します。
    #[inline(always)]
    fn label(&self, pos: usize) -> &[u8] {
        let start = pos + 5;
        let len = self.sna[start..]
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.sna.len() - start);
        &self.sna[start..start + len]
    }

    /// ノード全体のバイト長を返します。
    #[inline(always)]
    fn node_len(&self, pos: usize) -> usize {
        5 + self.label(pos).len() + 1
    }

    /// ノードの子数と最初の子の位置を返します。`None`はルートを表します。
    #[inline(always)]
    fn children_of(&self, node: Option<usize>) -> (u8, usize) {
        match node {
            None => (self.sna[0], 1),
            Some(pos) => (self.children_count(pos), pos + self.payload(pos) as usize),
        }
    }

    fn word_id_pair(&self, key_bytes: &[u8], id: u32) -> WordIdPair {
        WordIdPair {
            text: Text::from(&HangulString::from_bytes(key_bytes.to_vec())),
            id,
        }
    }
}

/// [`Words`]の降下スタックの1フレーム
struct Frame {
    /// 次に訪れる兄弟ノードの位置。
    pos: usize,
    /// この兄弟並びに残っているノード数。
    remaining: u8,
    /// このフレームに入る前の接頭辞の長さ。
    prefix_len: usize,
}

/// トライ内の単語を列挙するイテレータ
///
/// [`Trie::words`]が生成します。降下の状態は
/// （ノード位置・残りの子数・接頭辞長）のフレームの明示的なスタックで保持します。
pub struct Words<'a> {
    trie: &'a Trie,
    stack: Vec<Frame>,
    prefix: Vec<u8>,
}

impl Iterator for Words<'_> {
    type Item = WordIdPair;

    fn next(&mut self) -> Option<WordIdPair> {
        loop {
            let trie = self.trie;
            let frame = self.stack.last_mut()?;
            if frame.remaining == 0 {
                let prefix_len = frame.prefix_len;
                self.stack.pop();
                self.prefix.truncate(prefix_len);
                continue;
            }
            let pos = frame.pos;
            frame.remaining -= 1;
            frame.pos += trie.node_len(pos);

            let count = trie.children_count(pos);
            if count == 0 {
                let mut word = self.prefix.clone();
                word.extend_from_slice(trie.label(pos));
                return Some(WordIdPair {
                    text: Text::from(&HangulString::from_bytes(word)),
                    id: trie.payload(pos),
                });
            }
            let child_pos = pos + trie.payload(pos) as usize;
            self.stack.push(Frame {
                pos: child_pos,
                remaining: count,
                prefix_len: self.prefix.len(),
            });
            let label_start = pos + 5;
            let label_len = trie.label(pos).len();
            self.prefix
                .extend_from_slice(&trie.sna[label_start..label_start + label_len]);
        }
    }
}

/// 2つのバイト列の最長共通接頭辞の長さを返します。
fn lcp(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_trie() -> Trie {
        let mut builder = TrieBuilder::new();
        builder.add_word(&Text::from("빨"), 7, true).unwrap();
        builder.add_word(&Text::from("빨갛"), 0, true).unwrap();
        builder.add_word(&Text::from("빨간"), 1, true).unwrap();
        builder.add_word(&Text::from("빨개"), 2, true).unwrap();
        builder.add_word(&Text::from("파랗"), 3, true).unwrap();
        builder.add_word(&Text::from("파란"), 4, true).unwrap();
        builder.add_word(&Text::from("빨래"), 5, true).unwrap();
        builder.add_word(&Text::from("빨리"), 6, true).unwrap();
        builder.freeze()
    }

    #[test]
    fn test_find_word() {
        let trie = color_trie();
        assert_eq!(trie.find_word(&Text::from("빨간")).unwrap(), 1);
        assert_eq!(trie.find_word(&Text::from("파랗")).unwrap(), 3);
        assert_eq!(trie.find_word(&Text::from("빨")).unwrap(), 7);
        assert_eq!(trie.find_word(&Text::from("빨가")).unwrap(), WORD_NOT_FOUND);
        assert_eq!(
            trie.find_word(&Text::from("빨간색")).unwrap(),
            WORD_NOT_FOUND
        );
    }

    #[test]
    fn test_find_word_prefixes() {
        let mut builder = color_trie().to_builder();
        builder.add_word(&Text::from("파"), 9, true).unwrap();
        let trie = builder.freeze();

        let prefixes = trie.find_word_prefixes(&Text::from("빨간색")).unwrap();
        assert_eq!(prefixes.len(), 2);
        assert_eq!(prefixes[0].text, Text::from("빨"));
        assert_eq!(prefixes[0].id, 7);
        assert_eq!(prefixes[1].text, Text::from("빨간"));
        assert_eq!(prefixes[1].id, 1);

        let prefixes = trie.find_word_prefixes(&Text::from("파랗다")).unwrap();
        assert_eq!(prefixes.len(), 2);
        assert_eq!(prefixes[0].text, Text::from("파"));
        assert_eq!(prefixes[0].id, 9);
        assert_eq!(prefixes[1].text, Text::from("파랗"));
        assert_eq!(prefixes[1].id, 3);
    }

    #[test]
    fn test_write_and_read() {
        let trie = color_trie();
        let mut buffer = Vec::new();
        trie.write(&mut buffer).unwrap();

        let loaded = Trie::read(buffer.as_slice()).unwrap();
        assert_eq!(loaded.find_word(&Text::from("빨간")).unwrap(), 1);
        assert_eq!(loaded.find_word(&Text::from("파랗")).unwrap(), 3);
        assert_eq!(
            loaded.find_word(&Text::from("빨가")).unwrap(),
            WORD_NOT_FOUND
        );
        assert_eq!(
            loaded.find_word(&Text::from("빨간색")).unwrap(),
            WORD_NOT_FOUND
        );
    }

    #[test]
    fn test_double_insert_keeps_original_ids() {
        let mut builder = TrieBuilder::new();
        builder.add_word(&Text::from("빨갛"), 0, true).unwrap();
        builder.add_word(&Text::from("빨간"), 1, true).unwrap();
        builder.add_word(&Text::from("빨개"), 2, true).unwrap();
        builder.add_word(&Text::from("파랗"), 3, true).unwrap();
        builder.add_word(&Text::from("파란"), 4, true).unwrap();
        builder.add_word(&Text::from("빨래"), 5, true).unwrap();
        builder.add_word(&Text::from("빨리"), 6, true).unwrap();

        assert_eq!(builder.add_word(&Text::from("빨개"), 0, false).unwrap(), 2);
        assert_eq!(builder.add_word(&Text::from("파랗"), 0, false).unwrap(), 3);
        assert_eq!(builder.add_word(&Text::from("빨래"), 0, false).unwrap(), 5);
        assert_eq!(builder.add_word(&Text::from("빨리"), 0, false).unwrap(), 6);

        let trie = builder.freeze();
        assert_eq!(trie.find_word(&Text::from("빨간")).unwrap(), 1);
        assert_eq!(trie.find_word(&Text::from("파랗")).unwrap(), 3);
    }

    #[test]
    fn test_double_insert_with_terminator_children() {
        let mut builder = TrieBuilder::new();
        assert_eq!(
            builder.add_word(&Text::from("자기완성"), 0, false).unwrap(),
            0
        );
        assert_eq!(builder.add_word(&Text::from("자"), 1, false).unwrap(), 1);
        assert_eq!(builder.add_word(&Text::from("자기"), 2, false).unwrap(), 2);

        assert_eq!(
            builder.add_word(&Text::from("자기완성"), 0, false).unwrap(),
            0
        );
        assert_eq!(builder.add_word(&Text::from("자"), 1, false).unwrap(), 1);
        assert_eq!(builder.add_word(&Text::from("자기"), 2, false).unwrap(), 2);

        let trie = builder.freeze();
        assert_eq!(trie.find_word(&Text::from("자")).unwrap(), 1);
        assert_eq!(trie.find_word(&Text::from("자기완성")).unwrap(), 0);
    }

    #[test]
    fn test_replace_overwrites_id() {
        let mut builder = TrieBuilder::new();
        builder.add_word(&Text::from("한글"), 1, true).unwrap();
        builder.add_word(&Text::from("한"), 2, true).unwrap();
        assert_eq!(builder.add_word(&Text::from("한"), 9, true).unwrap(), 9);
        assert_eq!(builder.add_word(&Text::from("한글"), 8, true).unwrap(), 8);

        let trie = builder.freeze();
        assert_eq!(trie.find_word(&Text::from("한")).unwrap(), 9);
        assert_eq!(trie.find_word(&Text::from("한글")).unwrap(), 8);
    }

    #[test]
    fn test_iteration() {
        let mut builder = TrieBuilder::new();
        let words = [
            Text::from("빨갛"),
            Text::from("빨간"),
            Text::from("빨개"),
            Text::from("파랗"),
            Text::from("파란"),
            Text::from("빨래"),
            Text::from("빨리"),
        ];
        for (id, word) in words.iter().enumerate() {
            builder.add_word(word, id as u32, true).unwrap();
        }
        let trie = builder.freeze();

        let mut id_found = [false; 7];
        for pair in trie.words() {
            assert_eq!(words[pair.id as usize], pair.text);
            id_found[pair.id as usize] = true;
        }
        assert_eq!(id_found, [true; 7]);
    }

    #[test]
    fn test_empty_trie() {
        let trie = TrieBuilder::new().freeze();
        assert_eq!(trie.find_word(&Text::from("한")).unwrap(), WORD_NOT_FOUND);
        assert!(trie.find_word_prefixes(&Text::from("한")).unwrap().is_empty());
        assert_eq!(trie.words().count(), 0);

        let mut buffer = Vec::new();
        trie.write(&mut buffer).unwrap();
        let loaded = Trie::read(buffer.as_slice()).unwrap();
        assert_eq!(loaded.find_word(&Text::from("한")).unwrap(), WORD_NOT_FOUND);
    }

    #[test]
    fn test_builder_round_trip() {
        let trie = color_trie();
        let again = trie.to_builder().freeze();
        for word in ["빨", "빨갛", "빨간", "빨개", "파랗", "파란", "빨래", "빨리"] {
            assert_eq!(
                again.find_word(&Text::from(word)).unwrap(),
                trie.find_word(&Text::from(word)).unwrap()
            );
        }
        assert_eq!(
            again.find_word(&Text::from("없다")).unwrap(),
            WORD_NOT_FOUND
        );
    }

    #[test]
    fn test_non_hangul_key_rejected() {
        let mut builder = TrieBuilder::new();
        assert!(builder.add_word(&Text::from("latin"), 1, true).is_err());
        let trie = builder.freeze();
        assert!(trie.find_word(&Text::from("latin")).is_err());
    }

    #[test]
    fn test_encapsulated_sentinel_is_a_key_byte() {
        let mut source = Text::from("symbol한글");
        let _ = source.encapsulate_non_hangul();

        let mut builder = TrieBuilder::new();
        builder.add_word(&source, 42, true).unwrap();
        let trie = builder.freeze();
        assert_eq!(trie.find_word(&source).unwrap(), 42);
    }
}

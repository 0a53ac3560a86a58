//! 語彙辞書の構築と入出力を提供するモジュール
//!
//! [`Lexicon`]は、凍結されたトライ（単語 → id）とスコア表（id → スコア）を
//! 束ねた検索専用の語彙です。[`LexiconBuilder`]がCSV形式の語彙ファイル
//! （`単語,スコア`のレコード）からの取り込みと逐次的なid割り当てを行います。
//!
//! 直列化はマジックバイトで始まる単一のストリームで、トライとスコア表の
//! 各フォーマットがそのまま連結されます。

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use csv_core::ReadFieldResult;

use crate::errors::{NatmalError, Result};
use crate::score_table::ScoreTable;
use crate::segmentations::Segmentations;
use crate::text::Text;
use crate::trie::{Trie, TrieBuilder, WordIdPair};

/// 語彙モデルのストリームを識別するマジックバイト。
///
/// この定数の"0.1"はモデルフォーマットのバージョンであり、クレートの
/// セマンティックバージョンからは切り離されています。
pub const MODEL_MAGIC: &[u8] = b"NatmalLexicon 0.1\n";

/// 検索専用の語彙
///
/// # 例
///
/// ```
/// use natmal::{Lexicon, LexiconBuilder, Text};
///
/// let source = "\
/// 한,1.5
/// 한글,2.5";
/// let lexicon = LexiconBuilder::from_reader(source.as_bytes())?.build();
///
/// let id = lexicon.word_id(&Text::from("한글"))?;
/// assert_eq!(lexicon.score(id), 2.5);
/// # Ok::<(), natmal::errors::NatmalError>(())
/// ```
pub struct Lexicon {
    trie: Trie,
    scores: ScoreTable<u32>,
}

impl Lexicon {
    /// 単語のidを返します。
    ///
    /// # 戻り値
    ///
    /// 単語のid。語彙に無い場合は[`WORD_NOT_FOUND`](crate::common::WORD_NOT_FOUND)です。
    ///
    /// # エラー
    ///
    /// 単語が字母バイト列へ変換できない場合は
    /// [`CannotConvert`](NatmalError::CannotConvert)を返します。
    pub fn word_id(&self, word: &Text) -> Result<u32> {
        self.trie.find_word(word)
    }

    /// idに対応するスコアを返します。idが無い場合は`0.0`です。
    #[inline(always)]
    pub fn score(&self, id: u32) -> f64 {
        self.scores.retrieve(id)
    }

    /// idにスコアが格納されているかどうかを判定します。
    #[inline(always)]
    pub fn has_score(&self, id: u32) -> bool {
        self.scores.exists(id)
    }

    /// 語彙に含まれる単語数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// 語彙が空かどうかを判定します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// 語彙のトライへの参照を返します。
    #[inline(always)]
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// テキストの接頭辞になっている単語をすべて列挙します。
    pub fn prefixes(&self, text: &Text) -> Result<Vec<WordIdPair>> {
        self.trie.find_word_prefixes(text)
    }

    /// 文を語彙と照合し、単語分割格子を構築します。
    pub fn segment(&self, sentence: &Text) -> Result<Segmentations> {
        Segmentations::for_sentence(sentence, &self.trie)
    }

    /// 語彙をストリームへ直列化します。
    ///
    /// マジックバイトに続けてトライとスコア表を書き出します。
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合はI/Oエラーを返します。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;
        self.trie.write(&mut wtr)?;
        self.scores.write(&mut wtr)?;
        Ok(())
    }

    /// ストリームから語彙を読み込みます。
    ///
    /// # エラー
    ///
    /// マジックバイトが一致しない場合は無効なフォーマットエラーを、
    /// 読み込みに失敗した場合はI/Oエラーを返します。
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = vec![0u8; MODEL_MAGIC.len()];
        rdr.read_exact(&mut magic)?;
        if magic != MODEL_MAGIC {
            return Err(NatmalError::invalid_format(
                "rdr",
                "the magic bytes of the input model mismatch",
            ));
        }
        let trie = Trie::read(&mut rdr)?;
        let scores = ScoreTable::read(&mut rdr)?;
        Ok(Self { trie, scores })
    }

    /// 語彙をファイルへ保存します。
    ///
    /// 同じディレクトリの一時ファイルへ書き出してから所定のパスへ
    /// 移動するため、途中で失敗しても壊れたファイルは残りません。
    ///
    /// # エラー
    ///
    /// ファイルの作成・書き込み・移動に失敗した場合はエラーを返します。
    pub fn save_to_path<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
        self.write(&mut temp_file)?;
        temp_file.persist(path)?;
        Ok(())
    }

    /// ファイルから語彙を読み込みます。
    ///
    /// # エラー
    ///
    /// ファイルを開けない場合、または内容が語彙モデルでない場合はエラーを返します。
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }
}

/// 語彙を構築するビルダー
///
/// 単語には追加順に0始まりのidが割り当てられます。
#[derive(Default)]
pub struct LexiconBuilder {
    trie: TrieBuilder,
    scores: ScoreTable<u32>,
    next_id: u32,
}

impl LexiconBuilder {
    /// 新しい空のビルダーを生成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 単語をスコアとともに追加します。
    ///
    /// 既に追加済みの単語は元のidを保ったままスコアのみが上書きされ、
    /// 警告ログが出力されます。
    ///
    /// # 戻り値
    ///
    /// 単語に割り当てられたid。
    ///
    /// # エラー
    ///
    /// 空の単語、または字母バイト列へ変換できない単語は
    /// エラーを返します。
    pub fn add(&mut self, word: &Text, score: f64) -> Result<u32> {
        if word.is_empty() {
            return Err(NatmalError::invalid_argument(
                "word",
                "an empty word cannot be added to the lexicon",
            ));
        }
        let assigned = self.trie.add_word(word, self.next_id, false)?;
        if assigned == self.next_id {
            self.next_id += 1;
        } else {
            log::warn!(
                "duplicate word '{}' keeps id {}; its score has been overwritten",
                word,
                assigned
            );
        }
        self.scores.insert(assigned, score);
        Ok(assigned)
    }

    /// CSV形式の語彙データからビルダーを生成します。
    ///
    /// 各レコードは`単語,スコア`の2フィールドです。引用符で囲まれた
    /// フィールドも扱えます。空行は読み飛ばされます。
    ///
    /// # エラー
    ///
    /// 入力がUTF-8でない場合、フィールド数が2でないレコードがある場合、
    /// スコアが数値として解釈できない場合はエラーを返します。
    pub fn from_reader<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut bytes = Vec::new();
        rdr.read_to_end(&mut bytes)?;
        let source = std::str::from_utf8(&bytes)?;

        let mut builder = Self::new();
        for (i, row) in source.lines().enumerate() {
            if row.is_empty() {
                continue;
            }
            let fields = parse_csv_row(row)?;
            if fields.len() != 2 {
                return Err(NatmalError::invalid_format(
                    "rdr",
                    format!("record {} must have 2 fields, but has {}", i + 1, fields.len()),
                ));
            }
            let score: f64 = fields[1].trim().parse()?;
            builder.add(&Text::from(fields[0].as_str()), score)?;
        }
        log::info!("built a lexicon of {} words", builder.next_id);
        Ok(builder)
    }

    /// ビルダーを凍結し、検索専用の語彙へ変換します。
    pub fn build(self) -> Lexicon {
        Lexicon {
            trie: self.trie.freeze(),
            scores: self.scores,
        }
    }
}

/// CSV形式の1行をフィールドへ分解します。
fn parse_csv_row(row: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        let end = match result {
            ReadFieldResult::InputEmpty | ReadFieldResult::End => true,
            ReadFieldResult::Field { .. } => false,
            ReadFieldResult::OutputFull => {
                return Err(NatmalError::invalid_format(
                    "row",
                    "a CSV field exceeds the supported length",
                ));
            }
        };
        fields.push(std::str::from_utf8(&output[..nout])?.to_string());
        if end {
            break;
        }
        bytes = &bytes[nin..];
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::WORD_NOT_FOUND;

    #[test]
    fn test_sequential_ids() {
        let mut builder = LexiconBuilder::new();
        assert_eq!(builder.add(&Text::from("한"), 0.1).unwrap(), 0);
        assert_eq!(builder.add(&Text::from("한글"), 0.2).unwrap(), 1);
        assert_eq!(builder.add(&Text::from("글"), 0.3).unwrap(), 2);

        let lexicon = builder.build();
        assert_eq!(lexicon.len(), 3);
        assert_eq!(lexicon.word_id(&Text::from("한글")).unwrap(), 1);
        assert_eq!(lexicon.score(1), 0.2);
        assert_eq!(lexicon.word_id(&Text::from("없다")).unwrap(), WORD_NOT_FOUND);
    }

    #[test]
    fn test_duplicate_word_keeps_id() {
        let mut builder = LexiconBuilder::new();
        assert_eq!(builder.add(&Text::from("한"), 0.1).unwrap(), 0);
        assert_eq!(builder.add(&Text::from("한"), 0.9).unwrap(), 0);
        assert_eq!(builder.add(&Text::from("글"), 0.2).unwrap(), 1);

        let lexicon = builder.build();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.score(0), 0.9);
    }

    #[test]
    fn test_from_reader() {
        let source = "한,1.5\n한글,2.5\n\n\"글\",3.5\n";
        let lexicon = LexiconBuilder::from_reader(source.as_bytes()).unwrap().build();

        assert_eq!(lexicon.len(), 3);
        assert_eq!(lexicon.score(lexicon.word_id(&Text::from("한")).unwrap()), 1.5);
        assert_eq!(lexicon.score(lexicon.word_id(&Text::from("한글")).unwrap()), 2.5);
        assert_eq!(lexicon.score(lexicon.word_id(&Text::from("글")).unwrap()), 3.5);
    }

    #[test]
    fn test_from_reader_rejects_malformed_records() {
        assert!(LexiconBuilder::from_reader("한".as_bytes()).is_err());
        assert!(LexiconBuilder::from_reader("한,1.5,extra".as_bytes()).is_err());
        assert!(LexiconBuilder::from_reader("한,notanumber".as_bytes()).is_err());
    }

    #[test]
    fn test_model_round_trip() {
        let source = "한,1.5\n한글,2.5\n단어,3.5\n";
        let lexicon = LexiconBuilder::from_reader(source.as_bytes()).unwrap().build();

        let mut buffer = Vec::new();
        lexicon.write(&mut buffer).unwrap();
        assert!(buffer.starts_with(MODEL_MAGIC));

        let loaded = Lexicon::read(buffer.as_slice()).unwrap();
        for word in ["한", "한글", "단어"] {
            let text = Text::from(word);
            assert_eq!(
                loaded.word_id(&text).unwrap(),
                lexicon.word_id(&text).unwrap()
            );
            assert_eq!(
                loaded.score(loaded.word_id(&text).unwrap()),
                lexicon.score(lexicon.word_id(&text).unwrap())
            );
        }
    }

    #[test]
    fn test_read_rejects_wrong_magic() {
        let buffer = b"SomethingElse 9.9\n\x01\x00\x00\x00\x00";
        assert!(Lexicon::read(buffer.as_slice()).is_err());
    }

    #[test]
    fn test_save_and_load_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.lex");

        let lexicon = LexiconBuilder::from_reader("한,1.5\n글,2.5\n".as_bytes())
            .unwrap()
            .build();
        lexicon.save_to_path(&path).unwrap();

        let loaded = Lexicon::from_path(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.score(loaded.word_id(&Text::from("글")).unwrap()), 2.5);
    }

    #[test]
    fn test_segment() {
        let source = "한,1.0\n한글,2.0\n글,3.0\n단,4.0\n단어,5.0\n";
        let lexicon = LexiconBuilder::from_reader(source.as_bytes()).unwrap().build();

        let mut sentence = Text::from("symbol한글단어");
        let _ = sentence.encapsulate_non_hangul();
        let lattice = lexicon.segment(&sentence).unwrap();
        assert!(lattice.word(1, 2).unwrap());
        assert!(lattice.word(3, 4).unwrap());
        assert!(!lattice.word(2, 4).unwrap());
    }
}

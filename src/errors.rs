//! エラー型の定義
//!
//! このモジュールは、Natmalライブラリで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt::{self, Debug};

use crate::character::CharacterKind;

/// Natmal専用のResult型
///
/// エラー型としてデフォルトで[`NatmalError`]を使用します。
pub type Result<T, E = NatmalError> = std::result::Result<T, E>;

/// Natmalのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
#[derive(Debug, thiserror::Error)]
pub enum NatmalError {
    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 文字種別に対応しない操作エラー
    ///
    /// [`OperationNotSupportedError`]のエラーバリアント。
    #[error(transparent)]
    OperationNotSupported(OperationNotSupportedError),

    /// ハングル以外の文字を含むテキストの変換エラー
    ///
    /// 音節と隠蔽記号以外のコードポイントを含むテキストを
    /// [`HangulString`](crate::HangulString)へ変換しようとした場合に発生します。
    #[error("cannot convert to a HangulString: the text contains non-Hangul syllable symbols")]
    CannotConvert,

    /// 整数変換エラー
    ///
    /// [`TryFromIntError`](std::num::TryFromIntError)のエラーバリアント。
    #[error(transparent)]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// 浮動小数点数パースエラー
    ///
    /// [`ParseFloatError`](std::num::ParseFloatError)のエラーバリアント。
    #[error(transparent)]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// UTF-8エンコーディングエラー
    ///
    /// [`std::str::Utf8Error`]のエラーバリアント。
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    /// I/Oエラー
    ///
    /// [`std::io::Error`]のエラーバリアント。
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// 一時ファイルの永続化エラー
    ///
    /// [`tempfile::PersistError`]のエラーバリアント。
    #[error(transparent)]
    PathPersist(#[from] tempfile::PersistError),
}

impl NatmalError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// 文字種別に対応しない操作エラーを生成します
    ///
    /// # 引数
    ///
    /// * `operation` - 操作の名前
    /// * `kind` - 操作が呼び出された文字の種別
    pub(crate) fn operation_not_supported(operation: &'static str, kind: CharacterKind) -> Self {
        Self::OperationNotSupported(OperationNotSupportedError { operation, kind })
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// 文字種別が操作に対応しない場合に使用されるエラー
///
/// 例えば、音節でない文字に対して初声の取得を試みた場合に発生します。
#[derive(Debug)]
pub struct OperationNotSupportedError {
    /// 操作の名前
    pub(crate) operation: &'static str,

    /// 操作が呼び出された文字の種別
    pub(crate) kind: CharacterKind,
}

impl fmt::Display for OperationNotSupportedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "operation '{}' is not supported on character kind '{:?}'",
            self.operation, self.kind
        )
    }
}

impl Error for OperationNotSupportedError {}

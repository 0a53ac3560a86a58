//! 単語idとスコアを対応付けるハッシュ表を提供するモジュール
//!
//! [`ScoreTable`]はオープンアドレス法のRobin-Hoodハッシュ表です。挿入時、
//! 探索距離が占有者より長くなった要素は占有者と入れ替わりながら前へ進むため、
//! 探索距離の分散が小さく抑えられます。キーは32ビットまたは64ビットの整数id、
//! 値は`f64`のスコアです。
//!
//! 使用率が8割を超えると容量を2倍にして再ハッシュします。この判定は
//! 浮動小数点を避けた整数演算（`5 * used > 4 * capacity`）で行います。

use std::io::{Read, Write};

use crate::errors::{NatmalError, Result};

/// ハッシュ表のキーとして使える整数id
///
/// 実装はキー幅ごとのハッシュ仕上げ関数とストリーム表現を提供します。
/// ハッシュはMurmurHash3の整数ファイナライザです。
pub trait ScoreId: Copy + PartialEq {
    /// 空のバケットを埋めるための零値。
    const ZERO: Self;

    /// idをハッシュ値へ攪拌します。
    fn finalize(self) -> u64;

    /// idをリトルエンディアンでストリームへ書き出します。
    fn write_to<W: Write>(self, wtr: &mut W) -> std::io::Result<()>;

    /// idをリトルエンディアンでストリームから読み込みます。
    fn read_from<R: Read>(rdr: &mut R) -> std::io::Result<Self>;
}

impl ScoreId for u32 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn finalize(self) -> u64 {
        let mut h = self;
        h ^= h >> 16;
        h = h.wrapping_mul(0x85EB_CA6B);
        h ^= h >> 13;
        h = h.wrapping_mul(0xC2B2_AE35);
        h ^= h >> 16;
        u64::from(h)
    }

    fn write_to<W: Write>(self, wtr: &mut W) -> std::io::Result<()> {
        wtr.write_all(&self.to_le_bytes())
    }

    fn read_from<R: Read>(rdr: &mut R) -> std::io::Result<Self> {
        let mut bytes = [0u8; 4];
        rdr.read_exact(&mut bytes)?;
        Ok(Self::from_le_bytes(bytes))
    }
}

impl ScoreId for u64 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn finalize(self) -> u64 {
        let mut h = self;
        h ^= h >> 33;
        h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
        h ^= h >> 33;
        h = h.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
        h ^= h >> 33;
        h
    }

    fn write_to<W: Write>(self, wtr: &mut W) -> std::io::Result<()> {
        wtr.write_all(&self.to_le_bytes())
    }

    fn read_from<R: Read>(rdr: &mut R) -> std::io::Result<Self> {
        let mut bytes = [0u8; 8];
        rdr.read_exact(&mut bytes)?;
        Ok(Self::from_le_bytes(bytes))
    }
}

/// 挿入操作の結果
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InsertOutcome {
    /// 新しいidが挿入された。
    Inserted,
    /// 既存のidの値が上書きされた。
    Updated,
}

#[derive(Clone, Copy)]
struct Bucket<T> {
    id: T,
    value: f64,
    used: bool,
}

/// idからスコアへのRobin-Hoodハッシュ表
///
/// # 例
///
/// ```
/// use natmal::ScoreTable;
///
/// let mut table = ScoreTable::<u32>::new(256);
/// table.insert(42, 0.7);
/// assert_eq!(table.retrieve(42), 0.7);
/// assert!(!table.exists(623));
/// ```
pub struct ScoreTable<T: ScoreId = u32> {
    buckets: Vec<Bucket<T>>,
    used: usize,
}

impl<T: ScoreId> Default for ScoreTable<T> {
    fn default() -> Self {
        Self::new(256)
    }
}

impl<T: ScoreId> ScoreTable<T> {
    /// 指定された容量の空の表を生成します。容量の下限は1です。
    pub fn new(capacity: usize) -> Self {
        Self {
            buckets: Self::empty_buckets(capacity.max(1)),
            used: 0,
        }
    }

    fn empty_buckets(capacity: usize) -> Vec<Bucket<T>> {
        vec![
            Bucket {
                id: T::ZERO,
                value: 0.0,
                used: false,
            };
            capacity
        ]
    }

    /// 表の容量（バケット数）を返します。
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// 使用中のバケット数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.used
    }

    /// 表が空かどうかを判定します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// idとスコアの組を挿入します。
    ///
    /// 同じidが既にあれば値を上書きします。探索の途中で自分より本来の位置に
    /// 近い占有者に出会った場合、運んでいる要素と占有者を入れ替えてから
    /// 探索を続けます。
    ///
    /// # 戻り値
    ///
    /// 新規挿入なら[`InsertOutcome::Inserted`]、上書きなら
    /// [`InsertOutcome::Updated`]です。
    pub fn insert(&mut self, id: T, value: f64) -> InsertOutcome {
        if 5 * self.used > 4 * self.capacity() {
            self.rehash(2 * self.capacity());
        }

        let capacity = self.capacity();
        let mut id = id;
        let mut value = value;
        let mut home = (id.finalize() as usize) % capacity;
        let mut position = home;
        loop {
            let bucket = &mut self.buckets[position];
            if !bucket.used {
                *bucket = Bucket {
                    id,
                    value,
                    used: true,
                };
                self.used += 1;
                return InsertOutcome::Inserted;
            }
            if bucket.id == id {
                bucket.value = value;
                return InsertOutcome::Updated;
            }
            let distance = (position + capacity - home) % capacity;
            let occupant_home = (bucket.id.finalize() as usize) % capacity;
            let occupant_distance = (position + capacity - occupant_home) % capacity;
            if occupant_distance < distance {
                std::mem::swap(&mut id, &mut bucket.id);
                std::mem::swap(&mut value, &mut bucket.value);
                home = occupant_home;
            }
            position = (position + 1) % capacity;
        }
    }

    /// idに対応するスコアを返します。
    ///
    /// # 戻り値
    ///
    /// 格納されたスコア。idが存在しない場合は`0.0`です。格納された`0.0`と
    /// 区別するには[`exists`](Self::exists)を使用してください。
    pub fn retrieve(&self, id: T) -> f64 {
        match self.locate(id) {
            Some(position) => self.buckets[position].value,
            None => 0.0,
        }
    }

    /// idが表に存在するかどうかを判定します。
    pub fn exists(&self, id: T) -> bool {
        self.locate(id).is_some()
    }

    /// Robin-Hood早期終了つきの探索を行い、idのバケット位置を返します。
    fn locate(&self, id: T) -> Option<usize> {
        let capacity = self.capacity();
        let home = (id.finalize() as usize) % capacity;
        let mut position = home;
        loop {
            let bucket = &self.buckets[position];
            if !bucket.used {
                return None;
            }
            let distance = (position + capacity - home) % capacity;
            let occupant_home = (bucket.id.finalize() as usize) % capacity;
            let occupant_distance = (position + capacity - occupant_home) % capacity;
            if distance > occupant_distance {
                // the invariant guarantees our id cannot be further along
                return None;
            }
            if bucket.id == id {
                return Some(position);
            }
            position = (position + 1) % capacity;
        }
    }

    fn rehash(&mut self, capacity: usize) {
        let original = std::mem::replace(&mut self.buckets, Self::empty_buckets(capacity));
        self.used = 0;
        for bucket in original {
            if bucket.used {
                self.insert(bucket.id, bucket.value);
            }
        }
    }

    /// 使用中のバケットを表の並び順で列挙するイテレータを返します。
    ///
    /// スナップショットではありません。列挙の途中で挿入してはいけません。
    pub fn iter(&self) -> impl Iterator<Item = (T, f64)> + '_ {
        self.buckets
            .iter()
            .filter(|b| b.used)
            .map(|b| (b.id, b.value))
    }

    /// 表をストリームへ直列化します。
    ///
    /// `u32`の容量（リトルエンディアン）に続けて、全バケットを表の並び順で
    /// `(id, f64値, u8使用フラグ)`として書き出します。空のバケットも
    /// そのまま書き出され、圧縮は行われません。
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合はI/Oエラーを、容量が`u32`に収まらない場合は
    /// 整数変換エラーを返します。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        let capacity = u32::try_from(self.capacity())?;
        wtr.write_all(&capacity.to_le_bytes())?;
        for bucket in &self.buckets {
            bucket.id.write_to(&mut wtr)?;
            wtr.write_all(&bucket.value.to_le_bytes())?;
            wtr.write_all(&[u8::from(bucket.used)])?;
        }
        Ok(())
    }

    /// ストリームから表を読み込みます。
    ///
    /// 読み込んだ容量の新しい表を確保し、バケットを格納順のまま復元します。
    /// 使用中バケット数は使用フラグから数え直されます。
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合はI/Oエラーを、容量が0の場合は
    /// 無効なフォーマットエラーを返します。
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut capacity_buf = [0u8; 4];
        rdr.read_exact(&mut capacity_buf)?;
        let capacity = u32::from_le_bytes(capacity_buf) as usize;
        if capacity == 0 {
            return Err(NatmalError::invalid_format(
                "rdr",
                "the serialized table has zero capacity",
            ));
        }

        let mut buckets = Vec::with_capacity(capacity);
        let mut used = 0;
        for _ in 0..capacity {
            let id = T::read_from(&mut rdr)?;
            let mut value_buf = [0u8; 8];
            rdr.read_exact(&mut value_buf)?;
            let mut used_buf = [0u8; 1];
            rdr.read_exact(&mut used_buf)?;
            let bucket = Bucket {
                id,
                value: f64::from_le_bytes(value_buf),
                used: used_buf[0] != 0,
            };
            if bucket.used {
                used += 1;
            }
            buckets.push(bucket);
        }
        Ok(Self { buckets, used })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;

    #[test]
    fn test_insert_retrieve_32() {
        let mut table = ScoreTable::<u32>::new(65536);

        for i in 0..30000u32 {
            assert_eq!(table.insert(i, 20.0 * f64::from(i)), InsertOutcome::Inserted);
        }
        for i in 0..30000u32 {
            assert_eq!(table.insert(i, 3.0 * f64::from(i)), InsertOutcome::Updated);
            assert_eq!(table.insert(i, 1.1 * f64::from(i)), InsertOutcome::Updated);
        }

        let mut buffer = Vec::new();
        table.write(&mut buffer).unwrap();
        let loaded = ScoreTable::<u32>::read(buffer.as_slice()).unwrap();

        for i in (0..30000u32).rev() {
            assert_eq!(loaded.retrieve(i), 1.1 * f64::from(i));
        }
    }

    #[test]
    fn test_insert_retrieve_64() {
        let mut table = ScoreTable::<u64>::new(65536);

        for i in (0..3_000_000u64).step_by(100) {
            assert_eq!(
                table.insert(i * 500_000_000, 20.0 * i as f64),
                InsertOutcome::Inserted
            );
        }
        for i in (0..3_000_000u64).step_by(100) {
            assert_eq!(
                table.insert(i * 500_000_000, 1.1 * i as f64),
                InsertOutcome::Updated
            );
        }

        let mut buffer = Vec::new();
        table.write(&mut buffer).unwrap();
        let loaded = ScoreTable::<u64>::read(buffer.as_slice()).unwrap();

        for i in (0..3_000_000u64).step_by(100) {
            assert_eq!(loaded.retrieve(i * 500_000_000), 1.1 * i as f64);
        }
    }

    #[test]
    fn test_exists() {
        let mut table = ScoreTable::<u32>::new(256);
        table.insert(2, 0.3);
        table.insert(36, 0.1);
        assert!(table.exists(2));
        assert!(table.exists(36));
        assert!(!table.exists(44));
        assert!(!table.exists(623));
    }

    #[test]
    fn test_retrieve_missing_is_zero() {
        let table = ScoreTable::<u32>::new(256);
        assert_eq!(table.retrieve(7), 0.0);
    }

    #[test]
    fn test_growth_preserves_entries() {
        // capacity 4 forces several doublings
        let mut table = ScoreTable::<u32>::new(4);
        for i in 0..100u32 {
            table.insert(i, f64::from(i) + 0.5);
        }
        assert!(table.capacity() >= 128);
        assert_eq!(table.len(), 100);
        for i in 0..100u32 {
            assert_eq!(table.retrieve(i), f64::from(i) + 0.5);
        }
    }

    #[test]
    fn test_robin_hood_invariant() {
        let mut table = ScoreTable::<u32>::new(512);
        let ids: Vec<u32> = (0..400u32).map(|i| i.wrapping_mul(2_654_435_761)).collect();
        for (i, &id) in ids.iter().enumerate() {
            table.insert(id, i as f64);
        }

        // every slot on an occupant's probe path must be used, otherwise the
        // empty-slot early termination in locate() would lose the element
        let capacity = table.capacity();
        for position in 0..capacity {
            let bucket = &table.buckets[position];
            if !bucket.used {
                continue;
            }
            let home = (bucket.id.finalize() as usize) % capacity;
            let mut probe = home;
            while probe != position {
                assert!(
                    table.buckets[probe].used,
                    "gap in the probe path of slot {position}"
                );
                probe = (probe + 1) % capacity;
            }
        }

        // the early-terminating lookup must still see every element
        for (i, &id) in ids.iter().enumerate() {
            assert_eq!(table.retrieve(id), i as f64);
        }
    }

    #[test]
    fn test_iteration() {
        let mut table = ScoreTable::<u32>::new(256);
        table.insert(2, 0.3);
        table.insert(36, 0.1);
        table.insert(42, 0.7);

        let verification: HashMap<u32, f64> =
            [(2, 0.3), (36, 0.1), (42, 0.7)].into_iter().collect();

        let mut count = 0;
        for (id, value) in table.iter() {
            assert_eq!(verification[&id], value);
            count += 1;
        }
        assert_eq!(count, 3);

        let empty = ScoreTable::<u32>::new(256);
        assert_eq!(empty.iter().count(), 0);
    }

    #[test]
    fn test_round_trip_preserves_layout() {
        let mut table = ScoreTable::<u32>::new(64);
        for i in 0..40u32 {
            table.insert(i * 7, f64::from(i));
        }
        let mut buffer = Vec::new();
        table.write(&mut buffer).unwrap();
        // u32 capacity + 64 * (u32 id + f64 value + u8 flag)
        assert_eq!(buffer.len(), 4 + 64 * 13);

        let loaded = ScoreTable::<u32>::read(buffer.as_slice()).unwrap();
        assert_eq!(loaded.capacity(), 64);
        assert_eq!(loaded.len(), 40);
        for i in 0..40u32 {
            assert!(loaded.exists(i * 7));
        }
    }
}

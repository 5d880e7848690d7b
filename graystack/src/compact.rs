//! 直方图空隙压缩.
//!
//! 把平面中实际出现的像素值按升序重编号为从 0 开始的连续编码,
//! 从而消除值域中未被使用的空隙. 压缩是保序的: 原始值 `a < b`
//! 且二者频次均非零时, 必有 `remap(a) < remap(b)`.

use std::collections::BTreeMap;

use itertools::Itertools;
use ndarray::Array2;
use num::traits::AsPrimitive;
use num::PrimInt;
use ordered_float::OrderedFloat;

use crate::error::SliceError;
use crate::{PixelBuffer, PixelType};

/// 单个平面的重映射表: 原始像素值到压缩编码的映射.
///
/// 整数类型采用按原始值直接寻址的定长表 (表长等于类型域大小);
/// 浮点类型采用按值精确分桶的有序映射.
#[derive(Debug, Clone)]
pub enum RemapTable {
    /// 8-bit 直接寻址表.
    U8(Vec<u8>),

    /// 16-bit 直接寻址表.
    U16(Vec<u16>),

    /// 浮点值到编码的精确映射.
    F32(BTreeMap<OrderedFloat<f32>, f32>),
}

/// 直方图空隙压缩器.
///
/// 无状态. `build_remap` 与 `apply` 必须作用于同一个 (未经中途修改的)
/// 平面: `apply` 只会查询建表扫描时实际观察到的像素值.
pub struct HistogramCompactor;

impl HistogramCompactor {
    /// 单遍扫描 `plane`, 统计每个原始值的频次,
    /// 并按原始值升序为每个频次非零的值分配从 0 开始的连续编码.
    ///
    /// 相异值个数超出像素类型可表示范围时返回
    /// [`SliceError::DynamicRangeOverflow`]. 整数类型的相异值个数
    /// 不会超过类型域大小, 该错误仅可能出现在浮点平面上.
    pub fn build_remap(plane: &PixelBuffer) -> Result<RemapTable, SliceError> {
        match plane {
            PixelBuffer::U8(a) => Ok(RemapTable::U8(build_integer_remap(a, 1 << 8))),
            PixelBuffer::U16(a) => Ok(RemapTable::U16(build_integer_remap(a, 1 << 16))),
            PixelBuffer::F32(a) => build_float_remap(a).map(RemapTable::F32),
        }
    }

    /// 通过查表就地重写 `plane` 的每个像素.
    ///
    /// 当 `table` 与 `plane` 的像素类型不符, 或查询到建表时未观察到的值
    /// (意味着平面在建表后被修改过) 时, 程序 panic.
    pub fn apply(plane: &mut PixelBuffer, table: &RemapTable) {
        match (plane, table) {
            (PixelBuffer::U8(a), RemapTable::U8(t)) => remap_integer(a, t),
            (PixelBuffer::U16(a), RemapTable::U16(t)) => remap_integer(a, t),
            (PixelBuffer::F32(a), RemapTable::F32(t)) => {
                for p in a.iter_mut() {
                    match t.get(&OrderedFloat(*p)) {
                        Some(code) => *p = *code,
                        None => panic!("重映射表中不存在值 {p}, 平面在建表后被修改过"),
                    }
                }
            }
            (plane, _) => panic!("重映射表与平面像素类型 {:?} 不符", plane.pixel_type()),
        }
    }
}

/// 建立整数平面的直接寻址重映射表. `domain` 为像素类型域大小.
fn build_integer_remap<T>(data: &Array2<T>, domain: usize) -> Vec<T>
where
    T: PrimInt + AsPrimitive<usize>,
    usize: AsPrimitive<T>,
{
    let mut hist = vec![0u32; domain];
    for &v in data.iter() {
        hist[v.as_()] += 1;
    }

    let mut table = vec![T::zero(); domain];
    for (code, raw) in hist.iter().positions(|&count| count > 0).enumerate() {
        table[raw] = code.as_();
    }
    table
}

/// 通过直接寻址表就地重写整数平面.
fn remap_integer<T>(data: &mut Array2<T>, table: &[T])
where
    T: Copy + AsPrimitive<usize>,
{
    for p in data.iter_mut() {
        *p = table[(*p).as_()];
    }
}

/// 建立浮点平面的重映射表. 按值精确分桶 (bit 级等值),
/// `BTreeMap` 保证编码按原始值升序分配.
fn build_float_remap(
    data: &Array2<f32>,
) -> Result<BTreeMap<OrderedFloat<f32>, f32>, SliceError> {
    let mut tally: BTreeMap<OrderedFloat<f32>, u32> = BTreeMap::new();
    for &v in data.iter() {
        *tally.entry(OrderedFloat(v)).or_insert(0) += 1;
    }
    check_float_range(tally.len())?;

    Ok(tally
        .keys()
        .enumerate()
        .map(|(code, raw)| (*raw, code as f32))
        .collect())
}

/// 浮点编码必须落在 `f32` 的连续整数精确表示范围内, 否则压缩会悄悄丢失编码.
fn check_float_range(distinct: usize) -> Result<(), SliceError> {
    if distinct > PixelType::F32.exact_values() {
        Err(SliceError::DynamicRangeOverflow {
            distinct,
            pixel_type: PixelType::F32,
        })
    } else {
        Ok(())
    }
}

//! 图像栈与像素类型.

use crate::error::StackError;
use crate::Idx2d;

mod plane;

pub use plane::PixelBuffer;

/// 图像栈支持的像素类型.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelType {
    /// 8-bit 整数灰度.
    U8,

    /// 16-bit 整数灰度.
    U16,

    /// 32-bit 浮点灰度.
    F32,
}

impl PixelType {
    /// 根据宿主应用报告的位深构造像素类型.
    ///
    /// 仅接受 [`crate::consts::SUPPORTED_BIT_DEPTHS`] 中列出的位深,
    /// 其余位深返回 [`StackError::UnsupportedBitDepth`].
    /// 该检查发生在任何工作线程启动之前.
    pub fn from_bit_depth(bits: u8) -> Result<Self, StackError> {
        match bits {
            8 => Ok(Self::U8),
            16 => Ok(Self::U16),
            32 => Ok(Self::F32),
            other => Err(StackError::UnsupportedBitDepth(other)),
        }
    }

    /// 获取像素类型的位深.
    #[inline]
    pub fn bit_depth(&self) -> u8 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::F32 => 32,
        }
    }

    /// 该像素类型能精确表示的相异编码个数上限.
    ///
    /// 对整数类型即类型域大小; 对 `f32` 为连续整数的精确表示范围 (2^24).
    #[inline]
    pub fn exact_values(&self) -> usize {
        match self {
            Self::U8 => 1 << 8,
            Self::U16 => 1 << 16,
            Self::F32 => 1 << 24,
        }
    }
}

/// 灰度图像栈: 一组形状与像素类型完全一致的像素平面, 按切片顺序存储.
///
/// 一致性不变式在构造和追加时强制检查, 因此任何已存在的 `Stack`
/// 实例内部平面均相互一致.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    planes: Vec<PixelBuffer>,
}

impl Stack {
    /// 创建空栈.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 由一组平面构造图像栈.
    ///
    /// 所有平面必须与第一个平面形状和像素类型一致, 否则返回 `Err`.
    pub fn from_planes(planes: Vec<PixelBuffer>) -> Result<Self, StackError> {
        let mut stack = Self::new();
        for plane in planes {
            stack.push_plane(plane)?;
        }
        Ok(stack)
    }

    /// 向栈尾追加一个平面.
    ///
    /// 若形状或像素类型与已有平面不一致, 则返回 `Err` 且栈保持不变.
    pub fn push_plane(&mut self, plane: PixelBuffer) -> Result<(), StackError> {
        if let (Some(pixel_type), Some(shape)) = (self.pixel_type(), self.shape()) {
            if plane.pixel_type() != pixel_type {
                return Err(StackError::PixelTypeMismatch {
                    expected: pixel_type,
                    found: plane.pixel_type(),
                });
            }
            if plane.shape() != shape {
                return Err(StackError::ShapeMismatch {
                    expected: shape,
                    found: plane.shape(),
                });
            }
        }
        self.planes.push(plane);
        Ok(())
    }

    /// 获取切片个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    /// 栈是否为空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// 获取栈内平面的形状 (高, 宽). 空栈返回 `None`.
    #[inline]
    pub fn shape(&self) -> Option<Idx2d> {
        self.planes.first().map(PixelBuffer::shape)
    }

    /// 获取栈的像素类型. 空栈返回 `None`.
    #[inline]
    pub fn pixel_type(&self) -> Option<PixelType> {
        self.planes.first().map(PixelBuffer::pixel_type)
    }

    /// 获取第 `z` 层 (从 0 开始) 平面的引用.
    ///
    /// 当 `z` 越界时 panic.
    #[inline]
    pub fn plane_at(&self, z: usize) -> &PixelBuffer {
        &self.planes[z]
    }

    /// 获取第 `z` 层 (从 0 开始) 平面的可变引用.
    ///
    /// 当 `z` 越界时 panic.
    #[inline]
    pub fn plane_at_mut(&mut self, z: usize) -> &mut PixelBuffer {
        &mut self.planes[z]
    }

    /// 获取能按升序迭代全部不可变平面的迭代器.
    #[inline]
    pub fn slice_iter(&self) -> impl ExactSizeIterator<Item = &PixelBuffer> {
        self.planes.iter()
    }

    /// 获取能按升序迭代全部可变平面的迭代器.
    #[inline]
    pub fn slice_iter_mut(&mut self) -> impl ExactSizeIterator<Item = &mut PixelBuffer> {
        self.planes.iter_mut()
    }

    /// 消耗栈, 取出全部平面.
    #[inline]
    pub fn into_planes(self) -> Vec<PixelBuffer> {
        self.planes
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{
            IndexedParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator,
            ParallelIterator,
        };
    }
}

/// 并发操作部分.
#[cfg(feature = "rayon")]
impl Stack {
    /// 借助 `rayon`, 并行地对每个不可变平面实施 `op` 操作.
    pub fn par_for_each_slice<F>(&self, op: F)
    where
        F: Fn(&PixelBuffer) + Sync + Send,
    {
        self.planes.par_iter().for_each(|p| op(p));
    }

    /// 借助 `rayon`, 并行地对每个不可变平面实施 `op` 操作.
    /// 该操作会同时携带切片下标 (从 0 开始).
    pub fn par_for_each_indexed_slice<F>(&self, op: F)
    where
        F: Fn(usize, &PixelBuffer) + Sync + Send,
    {
        self.planes
            .par_iter()
            .enumerate()
            .for_each(|(z, p)| op(z, p));
    }

    /// 借助 `rayon`, 并行地对每个可变平面实施 `op` 操作.
    pub fn par_for_each_slice_mut<F>(&mut self, op: F)
    where
        F: Fn(&mut PixelBuffer) + Sync + Send,
    {
        self.planes.par_iter_mut().for_each(|p| op(p));
    }
}

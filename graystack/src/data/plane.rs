//! 像素平面对象.

use ndarray::Array2;

use super::PixelType;
use crate::Idx2d;

/// 一个 2D 灰度像素平面, 即图像栈中的一层切片.
///
/// 平面以 `ndarray` 二维数组为底层存储, 变体与像素类型一一对应.
/// 变体成员有意公开, 上层可直接以 `PixelBuffer::U8(...)` 等形式构造和匹配.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    /// 8-bit 整数灰度平面.
    U8(Array2<u8>),

    /// 16-bit 整数灰度平面.
    U16(Array2<u16>),

    /// 32-bit 浮点灰度平面.
    F32(Array2<f32>),
}

/// 对任意变体的底层数组执行同一表达式.
macro_rules! with_data {
    ($self: expr, $arr: ident => $body: expr) => {
        match $self {
            PixelBuffer::U8($arr) => $body,
            PixelBuffer::U16($arr) => $body,
            PixelBuffer::F32($arr) => $body,
        }
    };
}

impl PixelBuffer {
    /// 获取平面的像素类型.
    #[inline]
    pub fn pixel_type(&self) -> PixelType {
        match self {
            Self::U8(_) => PixelType::U8,
            Self::U16(_) => PixelType::U16,
            Self::F32(_) => PixelType::F32,
        }
    }

    /// 获取平面形状 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        with_data!(self, a => a.dim())
    }

    /// 获取平面像素个数.
    #[inline]
    pub fn size(&self) -> usize {
        with_data!(self, a => a.len())
    }

    /// 平面是否不含任何像素.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_pixel_buffer_basic_attrs() {
        let p = PixelBuffer::U8(arr2(&[[1u8, 2, 3], [4, 5, 6]]));
        assert_eq!(p.pixel_type(), PixelType::U8);
        assert_eq!(p.shape(), (2, 3));
        assert_eq!(p.size(), 6);
        assert!(!p.is_empty());

        let p = PixelBuffer::F32(Array2::zeros((0, 0)));
        assert_eq!(p.pixel_type(), PixelType::F32);
        assert!(p.is_empty());
    }
}

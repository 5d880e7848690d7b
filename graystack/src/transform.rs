//! 单切片变换.
//!
//! [`SliceTransform`] 是工作线程在单个平面上执行的多态操作.
//! 变换是纯函数: 不修改输入平面, 返回新的结果平面. 这保证了
//! 原始栈在全部工作线程结束前始终可读, 输出栈装配完成后才由调用方释放.

use crate::compact::HistogramCompactor;
use crate::consts::DEFAULT_SIGMA;
use crate::error::{EngineError, SliceError};
use crate::PixelBuffer;

/// 单切片变换. 实现必须满足 `Sync`, 同一个变换实例会被全部工作线程共享.
pub trait SliceTransform: Sync {
    /// 在 `plane` 上执行变换, 返回新的结果平面.
    ///
    /// 返回 `Err` 表示该切片处理失败; 失败只影响该切片自身.
    fn apply(&self, plane: &PixelBuffer) -> Result<PixelBuffer, SliceError>;
}

/// 直方图空隙压缩变换.
///
/// 无状态, 确定性, 且幂等: 已压缩的平面编码已经连续,
/// 再次压缩是恒等操作.
#[derive(Copy, Clone, Debug, Default)]
pub struct CompactHistogram;

impl SliceTransform for CompactHistogram {
    fn apply(&self, plane: &PixelBuffer) -> Result<PixelBuffer, SliceError> {
        let table = HistogramCompactor::build_remap(plane)?;
        let mut out = plane.clone();
        HistogramCompactor::apply(&mut out, &table);
        Ok(out)
    }
}

/// 外部的单平面管状结构 (脊) 增强滤波器接口.
///
/// 滤波器由宿主应用注入, 本 crate 只约定其契约: 输入平面只读,
/// 输出平面的空间形状必须与输入一致, 像素类型由滤波器自行决定
/// (通常为浮点).
pub trait TubenessFilter: Sync {
    /// 以尺度 `sigma` 对 `plane` 做脊增强, 返回新的结果平面.
    fn enhance(&self, plane: &PixelBuffer, sigma: f64) -> Result<PixelBuffer, SliceError>;
}

/// 管状结构增强变换: 对每个切片委托外部滤波器 `F`.
#[derive(Debug)]
pub struct EnhanceTubeness<F> {
    sigma: f64,
    filter: F,
}

impl<F: TubenessFilter> EnhanceTubeness<F> {
    /// 以给定尺度构造变换.
    ///
    /// `sigma` 必须是正的有限实数, 否则返回 [`EngineError::InvalidSigma`].
    pub fn new(sigma: f64, filter: F) -> Result<Self, EngineError> {
        if sigma.is_finite() && sigma > 0.0 {
            Ok(Self { sigma, filter })
        } else {
            Err(EngineError::InvalidSigma(sigma))
        }
    }

    /// 以默认尺度 [`DEFAULT_SIGMA`] 构造变换.
    #[inline]
    pub fn with_default_sigma(filter: F) -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            filter,
        }
    }

    /// 获取尺度参数.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl<F: TubenessFilter> SliceTransform for EnhanceTubeness<F> {
    fn apply(&self, plane: &PixelBuffer) -> Result<PixelBuffer, SliceError> {
        let out = self.filter.enhance(plane, self.sigma)?;
        if out.shape() != plane.shape() {
            return Err(SliceError::ExternalFilter(format!(
                "输出形状 {:?} 与输入形状 {:?} 不符",
                out.shape(),
                plane.shape()
            )));
        }
        Ok(out)
    }
}

//! 运行时错误.

use crate::{Idx2d, PixelType};
use thiserror::Error;

/// 图像栈结构错误.
///
/// 该类错误在栈构造或装配阶段报告, 不会进入切片处理流水线.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum StackError {
    /// 宿主应用报告的位深不受支持.
    #[error("不支持的位深 {0}, 仅支持 8/16/32")]
    UnsupportedBitDepth(u8),

    /// 平面形状与栈内已有平面不一致.
    #[error("切片形状不一致: 期望 {expected:?}, 实际 {found:?}")]
    ShapeMismatch {
        /// 栈内已有平面的形状.
        expected: Idx2d,

        /// 新平面的形状.
        found: Idx2d,
    },

    /// 平面像素类型与栈内已有平面不一致.
    #[error("切片像素类型不一致: 期望 {expected:?}, 实际 {found:?}")]
    PixelTypeMismatch {
        /// 栈内已有平面的像素类型.
        expected: PixelType,

        /// 新平面的像素类型.
        found: PixelType,
    },
}

/// 单切片处理错误.
///
/// 该类错误只会使对应切片从输出栈中缺失, 不会中断流水线中的其余切片.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliceError {
    /// 平面中相异像素值的个数超出了像素类型能精确表示的编码范围.
    #[error("动态范围过大: {distinct} 个相异值超出 {pixel_type:?} 的可表示范围")]
    DynamicRangeOverflow {
        /// 平面中相异像素值的个数.
        distinct: usize,

        /// 平面的像素类型.
        pixel_type: PixelType,
    },

    /// 外部单平面滤波器执行失败.
    #[error("外部滤波器失败: {0}")]
    ExternalFilter(String),

    /// 工作线程未向该切片的结果槽写入任何内容.
    #[error("切片结果缺失")]
    ResultMissing,
}

/// 引擎配置与装配错误.
///
/// 配置类错误在任何工作线程启动之前快速失败.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// 工作线程数非法.
    #[error("工作线程数必须为正, 实际为 {0}")]
    InvalidWorkerCount(usize),

    /// 管状结构增强的尺度参数非法.
    #[error("sigma 必须为正实数, 实际为 {0}")]
    InvalidSigma(f64),

    /// 宏选项字符串中的某个值无法解析.
    #[error("选项 `{key}` 的值 `{value}` 无法解析")]
    InvalidOption {
        /// 选项键名.
        key: String,

        /// 无法解析的原始值.
        value: String,
    },

    /// 输出栈装配失败.
    #[error(transparent)]
    Stack(#[from] StackError),
}

//! 通用常量.

/// 管状结构增强滤波器的默认尺度参数.
pub const DEFAULT_SIGMA: f64 = 3.0;

/// 本 crate 支持的全部像素位深.
pub const SUPPORTED_BIT_DEPTHS: [u8; 3] = [8, 16, 32];

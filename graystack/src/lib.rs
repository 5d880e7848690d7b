#![warn(missing_docs)]

//! 灰度图像栈的并行切片处理引擎.
//!
//! 一个图像栈 ([`Stack`]) 是一组形状与像素类型完全一致的 2D 像素平面
//! ([`PixelBuffer`]). 引擎把平面编号动态分发给一组固定数量的工作线程
//! (见 [`engine::WorkDispatcher`]), 在每个平面上执行单切片变换
//! ([`transform::SliceTransform`]), 最后按原始顺序装配输出栈
//! (见 [`engine::StackAssembler`]). 单个切片的失败只会使该切片从输出栈中缺失,
//! 不会中断其余切片的处理.
//!
//! 内置两种变换:
//!
//! 1. [`transform::CompactHistogram`]: 保序的直方图空隙压缩,
//!    把平面中实际出现的像素值重编号为从 0 开始的连续编码.
//! 2. [`transform::EnhanceTubeness`]: 委托外部的单平面管状结构增强滤波器
//!    (通过 [`transform::TubenessFilter`] 接口注入), 并发收集各切片结果.
//!
//! # 注意
//!
//! 1. 像素类型仅支持 8-bit 整数, 16-bit 整数和 32-bit 浮点单通道灰度.
//! 2. 切片编号对外从 1 开始 (沿用宿主应用的历史惯例), crate 内部下标从 0 开始.
//! 3. 文件读写, 目录遍历, 结果表导出和图像显示均由宿主应用负责,
//!    本 crate 只处理已在内存中就绪的像素平面.
//! 4. 在非期望情况下 (如下标越界), 程序会直接 panic, 而不会导致内存错误.
//!    As what Rust promises.

/// 二维索引 (高, 宽), 同时用作平面形状.
pub type Idx2d = (usize, usize);

/// 图像栈基础数据结构.
mod data;

pub use data::{PixelBuffer, PixelType, Stack};

pub mod compact;
pub mod consts;
pub mod engine;
pub mod error;
pub mod options;
pub mod prelude;
pub mod transform;

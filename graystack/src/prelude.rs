//! 涵盖本 crate 一系列常用功能的 prelude.

pub use crate::{Idx2d, PixelBuffer, PixelType, Stack};

pub use crate::compact::{HistogramCompactor, RemapTable};
pub use crate::consts::DEFAULT_SIGMA;
pub use crate::engine::{
    process_stack, NullProgress, ProgressSink, SliceFailure, StackOutcome, WorkDispatcher,
};
pub use crate::error::{EngineError, SliceError, StackError};
pub use crate::options::EngineOptions;
pub use crate::transform::{CompactHistogram, EnhanceTubeness, SliceTransform, TubenessFilter};

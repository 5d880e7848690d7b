//! 并行切片处理引擎.
//!
//! 引擎把输入栈的切片编号动态分发给固定数量的工作线程, 每个线程
//! 在领取的切片上执行变换, 把结果写入该编号专属的结果槽, 汇报进度,
//! 直到编号耗尽. 所有线程汇合后, 结果槽按编号升序装配为输出栈.
//!
//! 结果槽的写入天然互不相交 (每个编号恰好被一个线程领取),
//! 因此除游标与完成计数外不需要任何同步.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use crate::error::EngineError;
use crate::transform::SliceTransform;
use crate::Stack;

mod assemble;
mod dispatch;
mod progress;

pub use assemble::{SliceFailure, StackAssembler};
pub use dispatch::{cpus, WorkDispatcher};
pub use progress::{LogProgress, NullProgress, ProgressSink};

/// 一次完整运行的结果.
///
/// 运行总会产出一个输出栈 (可能比输入少若干切片),
/// 以及被丢弃切片的完整清单; 不会产出写了一半的平面.
#[derive(Debug)]
pub struct StackOutcome {
    /// 输出栈, 按原始切片顺序排列.
    pub stack: Stack,

    /// 被丢弃切片的失败记录, 按编号升序.
    pub failures: Vec<SliceFailure>,
}

impl StackOutcome {
    /// 是否所有切片都处理成功.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 对 `stack` 的每个切片并行执行 `transform`, 装配输出栈.
///
/// 输入栈在整个运行期间只读 (被全部工作线程共享借用),
/// 运行结束后由调用方自行释放. 单个切片的失败会被记录并写入日志,
/// 绝不会中断其余切片的处理.
pub fn process_stack<T, P>(
    stack: &Stack,
    transform: &T,
    dispatcher: &WorkDispatcher,
    progress: &P,
) -> Result<StackOutcome, EngineError>
where
    T: SliceTransform + ?Sized,
    P: ProgressSink + ?Sized,
{
    let total = stack.len();

    // 每个编号专属一个结果槽, 至多被写入一次.
    let slots: Vec<OnceLock<_>> = (0..total).map(|_| OnceLock::new()).collect();
    let done = AtomicUsize::new(0);

    dispatcher.run(total, |i| {
        let result = transform.apply(stack.plane_at(i - 1));
        if let Err(err) = &result {
            log::warn!("切片 {i} 处理失败: {err}");
        }
        let fresh = slots[i - 1].set(result).is_ok();
        debug_assert!(fresh, "结果槽被重复写入");

        let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
        progress.update(completed, total);
    });

    let slots = slots.into_iter().map(OnceLock::into_inner).collect();
    let (stack, failures) = StackAssembler::assemble(slots)?;
    Ok(StackOutcome { stack, failures })
}

//! 进度汇报.

/// 进度接收端.
///
/// 更新来自多个工作线程, 到达顺序无保证, 实现必须容忍并发调用.
/// 引擎内部以共享原子计数器生成 `completed`, 因此其取值在一次运行内
/// 不会重复.
pub trait ProgressSink: Sync {
    /// 汇报进度: 已完成 `completed` 个工作项, 共 `total` 个.
    fn update(&self, completed: usize, total: usize);
}

/// 丢弃全部进度更新.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    #[inline]
    fn update(&self, _completed: usize, _total: usize) {}
}

/// 以日志形式输出进度, 约每完成一成汇报一次.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn update(&self, completed: usize, total: usize) {
        let step = (total / 10).max(1);
        if completed % step == 0 || completed == total {
            log::info!("进度: {completed}/{total}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sinks_tolerate_any_order() {
        // 乱序与重复边界值均不应 panic.
        for sink in [&NullProgress as &dyn ProgressSink, &LogProgress] {
            sink.update(3, 3);
            sink.update(1, 3);
            sink.update(2, 3);
            sink.update(3, 3);
        }
    }
}

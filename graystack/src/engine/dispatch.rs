//! 动态工作分发.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::error::EngineError;

/// 获得可并行核心数.
pub fn cpus() -> usize {
    thread::available_parallelism().map_or_else(|_| num_cpus::get(), usize::from)
}

/// 把编号 `1..=total` 的工作项动态划分给固定数量工作线程的分发器.
///
/// 所有线程共享一个单调递增的原子游标: 每个线程反复取下一个编号,
/// 直到编号耗尽. 先完成的线程会自然领取更多工作项 (动态负载均衡),
/// 且每个编号恰好被一个线程领取一次. 除游标外线程间不共享任何可变状态,
/// 因此无需消息队列或逐项加锁.
///
/// 该原语与具体工作内容无关: 切片级循环和文件级批处理循环
/// 都通过它驱动.
#[derive(Copy, Clone, Debug)]
pub struct WorkDispatcher {
    workers: usize,
}

impl WorkDispatcher {
    /// 以给定工作线程数构造分发器.
    ///
    /// `workers` 为 0 时返回 [`EngineError::InvalidWorkerCount`].
    pub fn new(workers: usize) -> Result<Self, EngineError> {
        if workers == 0 {
            return Err(EngineError::InvalidWorkerCount(workers));
        }
        Ok(Self { workers })
    }

    /// 以可并行核心数构造分发器.
    #[inline]
    pub fn with_default_workers() -> Self {
        Self {
            workers: cpus().max(1),
        }
    }

    /// 获取工作线程数.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// 运行 `job(i)`, `i` 取遍 `1..=total`, 每个编号恰好执行一次.
    ///
    /// 全部工作线程结束后才返回 (join 屏障). 各编号的执行先后与
    /// 线程归属均无保证.
    pub fn run<F>(&self, total: usize, job: F)
    where
        F: Fn(usize) + Sync,
    {
        if total == 0 {
            return;
        }

        // 工作项编号从 1 开始, 沿用宿主应用的切片编号惯例.
        let cursor = AtomicUsize::new(1);
        thread::scope(|s| {
            for _ in 0..self.workers {
                s.spawn(|| loop {
                    // 领取的唯一性只依赖 fetch_add 的原子性.
                    let i = cursor.fetch_add(1, Ordering::Relaxed);
                    if i > total {
                        break;
                    }
                    job(i);
                });
            }
        });
    }
}

impl Default for WorkDispatcher {
    #[inline]
    fn default() -> Self {
        Self::with_default_workers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 统计每个编号被领取的次数, 必须恰好为 1.
    fn assert_each_claimed_once(total: usize, workers: usize) {
        let claims: Vec<AtomicUsize> = (0..total).map(|_| AtomicUsize::new(0)).collect();

        let dispatcher = WorkDispatcher::new(workers).unwrap();
        dispatcher.run(total, |i| {
            assert!((1..=total).contains(&i));
            claims[i - 1].fetch_add(1, Ordering::Relaxed);
        });

        for (z, c) in claims.iter().enumerate() {
            assert_eq!(c.load(Ordering::Relaxed), 1, "编号 {} 领取次数异常", z + 1);
        }
    }

    #[test]
    fn test_dispatch_single_worker() {
        assert_each_claimed_once(5, 1);
    }

    #[test]
    fn test_dispatch_fewer_workers_than_items() {
        assert_each_claimed_once(23, 3);
    }

    #[test]
    fn test_dispatch_more_workers_than_items() {
        assert_each_claimed_once(5, 8);
    }

    #[test]
    fn test_dispatch_zero_items() {
        let ran = AtomicUsize::new(0);
        WorkDispatcher::new(4).unwrap().run(0, |_| {
            ran.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(ran.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_dispatch_rejects_zero_workers() {
        assert_eq!(
            WorkDispatcher::new(0).err(),
            Some(crate::error::EngineError::InvalidWorkerCount(0))
        );
    }

    #[test]
    fn test_default_workers_positive() {
        assert!(WorkDispatcher::default().workers() >= 1);
    }
}

//! 输出栈装配.

use crate::error::{SliceError, StackError};
use crate::{PixelBuffer, Stack};

/// 单个切片的失败记录.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceFailure {
    /// 失败切片的编号 (从 1 开始).
    pub slice: usize,

    /// 失败原因.
    pub error: SliceError,
}

/// 把逐切片结果槽装配为输出栈.
pub struct StackAssembler;

impl StackAssembler {
    /// 严格按编号升序消费结果槽: 成功的平面进入输出栈,
    /// 失败的切片转为 [`SliceFailure`] 记录并在输出栈中留下空隙.
    ///
    /// 装配顺序只由编号决定, 与各切片的完成先后无关.
    /// 输出栈的一致性不变式在装配时重新检查.
    pub fn assemble(
        slots: Vec<Option<Result<PixelBuffer, SliceError>>>,
    ) -> Result<(Stack, Vec<SliceFailure>), StackError> {
        let mut stack = Stack::new();
        let mut failures = Vec::new();

        for (z, slot) in slots.into_iter().enumerate() {
            let slice = z + 1;
            match slot {
                Some(Ok(plane)) => stack.push_plane(plane)?,
                Some(Err(error)) => failures.push(SliceFailure { slice, error }),
                None => failures.push(SliceFailure {
                    slice,
                    error: SliceError::ResultMissing,
                }),
            }
        }
        Ok((stack, failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn const_plane(value: u8) -> PixelBuffer {
        PixelBuffer::U8(Array2::from_elem((2, 2), value))
    }

    #[test]
    fn test_assemble_skips_gaps_in_index_order() {
        let slots = vec![
            Some(Ok(const_plane(1))),
            Some(Err(SliceError::ExternalFilter("人造故障".into()))),
            Some(Ok(const_plane(3))),
            None,
            Some(Ok(const_plane(5))),
        ];

        let (stack, failures) = StackAssembler::assemble(slots).unwrap();

        assert_eq!(stack.len(), 3);
        let planes = stack.into_planes();
        assert_eq!(planes, vec![const_plane(1), const_plane(3), const_plane(5)]);

        assert_eq!(
            failures,
            vec![
                SliceFailure {
                    slice: 2,
                    error: SliceError::ExternalFilter("人造故障".into()),
                },
                SliceFailure {
                    slice: 4,
                    error: SliceError::ResultMissing,
                },
            ]
        );
    }

    #[test]
    fn test_assemble_empty() {
        let (stack, failures) = StackAssembler::assemble(Vec::new()).unwrap();
        assert!(stack.is_empty());
        assert!(failures.is_empty());
    }
}

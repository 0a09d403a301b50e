//! 同级条目的连续编号
//!
//! 章节的 sort_order、课时的 lecture_number、测验的 quiz_number
//! 在同一父级下始终为 1..N。

/// 按当前编号顺序重新编号，返回需要更新的 (id, 新编号)
///
/// `siblings` 须已按当前编号升序排列。
pub(crate) fn renumber_plan(siblings: &[(i64, i32)]) -> Vec<(i64, i32)> {
    siblings
        .iter()
        .enumerate()
        .filter_map(|(idx, &(id, number))| {
            let wanted = idx as i32 + 1;
            (number != wanted).then_some((id, wanted))
        })
        .collect()
}

/// 按给定 ID 顺序分配编号，返回需要更新的 (id, 新编号)
///
/// 不属于 `siblings` 的 ID 被忽略。
pub(crate) fn reorder_plan(siblings: &[(i64, i32)], ordered_ids: &[i64]) -> Vec<(i64, i32)> {
    ordered_ids
        .iter()
        .filter_map(|id| siblings.iter().find(|(sid, _)| sid == id).copied())
        .enumerate()
        .filter_map(|(idx, (id, number))| {
            let wanted = idx as i32 + 1;
            (number != wanted).then_some((id, wanted))
        })
        .collect()
}

/// 新增条目的编号
pub(crate) fn next_number(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renumber_after_gap() {
        // 删除编号 2 之后
        let siblings = [(10, 1), (12, 3), (13, 4)];
        assert_eq!(renumber_plan(&siblings), vec![(12, 2), (13, 3)]);
    }

    #[test]
    fn test_renumber_contiguous_is_noop() {
        let siblings = [(1, 1), (2, 2), (3, 3)];
        assert!(renumber_plan(&siblings).is_empty());
    }

    #[test]
    fn test_reorder() {
        let siblings = [(1, 1), (2, 2), (3, 3)];
        assert_eq!(reorder_plan(&siblings, &[3, 1, 2]), vec![(3, 1), (1, 2), (2, 3)]);
        assert_eq!(reorder_plan(&siblings, &[1, 2, 3]), vec![]);
    }

    #[test]
    fn test_next_number() {
        assert_eq!(next_number(None), 1);
        assert_eq!(next_number(Some(4)), 5);
    }
}

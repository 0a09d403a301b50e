//! 测验答案字母与序号互转（A-D 对应 0-3）

pub const ANSWER_OPTION_COUNT: usize = 4;

const LETTERS: [&str; ANSWER_OPTION_COUNT] = ["A", "B", "C", "D"];

/// 字母转序号，忽略大小写与首尾空白
pub fn letter_to_index(letter: &str) -> Option<i32> {
    let letter = letter.trim();
    LETTERS
        .iter()
        .position(|l| l.eq_ignore_ascii_case(letter))
        .map(|idx| idx as i32)
}

pub fn index_to_letter(index: i32) -> Option<&'static str> {
    usize::try_from(index).ok().and_then(|i| LETTERS.get(i).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_to_index() {
        assert_eq!(letter_to_index("A"), Some(0));
        assert_eq!(letter_to_index("b"), Some(1));
        assert_eq!(letter_to_index(" c "), Some(2));
        assert_eq!(letter_to_index("D"), Some(3));
        assert_eq!(letter_to_index("E"), None);
        assert_eq!(letter_to_index(""), None);
        assert_eq!(letter_to_index("AB"), None);
    }

    #[test]
    fn test_index_to_letter() {
        assert_eq!(index_to_letter(0), Some("A"));
        assert_eq!(index_to_letter(3), Some("D"));
        assert_eq!(index_to_letter(4), None);
        assert_eq!(index_to_letter(-1), None);
    }
}

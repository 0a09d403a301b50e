//! ISO 8601 时长解析与 `H:MM:SS` 格式化

/// 解析 YouTube contentDetails 中的时长，如 `PT1H2M3S`、`P1DT2H`、`PT45.5S`
///
/// 只支持天及以下的单位，小数秒向下取整。
pub fn parse_iso8601_duration(value: &str) -> Option<i64> {
    let rest = value.trim().strip_prefix('P')?;
    if rest.is_empty() {
        return None;
    }

    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => {
            if time.is_empty() {
                return None;
            }
            (date, Some(time))
        }
        None => (rest, None),
    };

    let mut total: f64 = 0.0;
    total += sum_components(date_part, &[('W', 7.0 * 86400.0), ('D', 86400.0)])?;
    if let Some(time) = time_part {
        total += sum_components(time, &[('H', 3600.0), ('M', 60.0), ('S', 1.0)])?;
    }
    Some(total.floor() as i64)
}

// 依次读取 “数字+单位”，单位顺序必须与 units 一致
fn sum_components(mut input: &str, units: &[(char, f64)]) -> Option<f64> {
    let mut total = 0.0;
    let mut unit_index = 0;

    while !input.is_empty() {
        let end = input.find(|c: char| !(c.is_ascii_digit() || c == '.'))?;
        if end == 0 {
            return None;
        }
        let number: f64 = input[..end].parse().ok()?;
        let unit = input[end..].chars().next()?;

        let offset = units[unit_index..].iter().position(|(u, _)| *u == unit)?;
        total += number * units[unit_index + offset].1;
        unit_index += offset + 1;

        input = &input[end + unit.len_utf8()..];
    }
    Some(total)
}

/// 秒数格式化为 `H:MM:SS`，例如 3723 → `1:02:03`
pub fn format_duration_hms(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_durations() {
        assert_eq!(parse_iso8601_duration("PT1H2M3S"), Some(3723));
        assert_eq!(parse_iso8601_duration("PT4M13S"), Some(253));
        assert_eq!(parse_iso8601_duration("PT45S"), Some(45));
        assert_eq!(parse_iso8601_duration("PT10M"), Some(600));
        assert_eq!(parse_iso8601_duration("P1DT2H"), Some(93600));
        assert_eq!(parse_iso8601_duration("PT45.9S"), Some(45));
        assert_eq!(parse_iso8601_duration("P0D"), Some(0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_iso8601_duration(""), None);
        assert_eq!(parse_iso8601_duration("P"), None);
        assert_eq!(parse_iso8601_duration("PT"), None);
        assert_eq!(parse_iso8601_duration("1H2M"), None);
        assert_eq!(parse_iso8601_duration("PTXS"), None);
        assert_eq!(parse_iso8601_duration("PT3S2M"), None);
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_duration_hms(3723), "1:02:03");
        assert_eq!(format_duration_hms(62), "0:01:02");
        assert_eq!(format_duration_hms(0), "0:00:00");
        assert_eq!(format_duration_hms(36000), "10:00:00");
        assert_eq!(format_duration_hms(-5), "0:00:00");
    }
}

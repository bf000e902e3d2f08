//! 月份与日期工具
//!
//! 账期统一使用 `YYYY-MM` 字符串，日期使用 `YYYY-MM-DD`。

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{LmsError, Result};

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").expect("Invalid month regex"));

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 当前自然月
pub fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// 今天
pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// 校验 `YYYY-MM`，月份必须在 01..=12
pub fn is_valid_month(month: &str) -> bool {
    MONTH_RE.is_match(month)
        && NaiveDate::parse_from_str(&format!("{month}-01"), DATE_FORMAT).is_ok()
}

/// 解析查询参数中的月份，缺省（或空串）时取当前月
pub fn resolve_month(month: Option<&str>) -> Result<String> {
    match month.map(str::trim).filter(|m| !m.is_empty()) {
        None => Ok(current_month()),
        Some(m) if is_valid_month(m) => Ok(m.to_string()),
        Some(m) => Err(LmsError::validation(format!(
            "Invalid month format: '{m}', expected YYYY-MM"
        ))),
    }
}

/// 校验 `YYYY-MM-DD`
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(date, DATE_FORMAT)?)
}

/// 日期所在的账期
pub fn month_of_date(date: &str) -> Result<String> {
    Ok(parse_date(date)?.format("%Y-%m").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_month() {
        assert!(is_valid_month("2025-08"));
        assert!(is_valid_month("1999-12"));
        assert!(!is_valid_month("2025-13"));
        assert!(!is_valid_month("2025-00"));
        assert!(!is_valid_month("2025-8"));
        assert!(!is_valid_month("2025/08"));
        assert!(!is_valid_month("2025-08-01"));
        // 非 ASCII 数字
        assert!(!is_valid_month("٢٠٢٥-٠٨"));
        assert!(!is_valid_month("２０２５-０８"));
        assert!(!is_valid_month("2025-٠٨"));
    }

    #[test]
    fn test_resolve_month_defaults_to_current() {
        assert_eq!(resolve_month(None).unwrap(), current_month());
        assert_eq!(resolve_month(Some("")).unwrap(), current_month());
        assert_eq!(resolve_month(Some("2025-08")).unwrap(), "2025-08");
    }

    #[test]
    fn test_resolve_month_rejects_garbage() {
        let err = resolve_month(Some("August")).unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
        let err = resolve_month(Some("٢٠٢٥-٠٨")).unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
    }

    #[test]
    fn test_month_of_date() {
        assert_eq!(month_of_date("2025-08-15").unwrap(), "2025-08");
        assert!(matches!(
            month_of_date("2025-02-30"),
            Err(LmsError::DateParse(_))
        ));
    }

    #[test]
    fn test_today_is_in_current_month() {
        assert!(today().starts_with(&current_month()));
    }
}

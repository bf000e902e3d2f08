/// 金额保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 金额合计，结果保留两位小数
pub fn sum_amounts<I: IntoIterator<Item = f64>>(amounts: I) -> f64 {
    round2(amounts.into_iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005 * 1000.0), 1005.0);
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_sum_amounts() {
        assert_eq!(sum_amounts([0.1, 0.2]), 0.3);
        assert_eq!(sum_amounts(Vec::<f64>::new()), 0.0);
    }
}

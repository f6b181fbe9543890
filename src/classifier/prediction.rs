use serde::Serialize;

/// Top class chosen for one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub index: usize,
    pub label: String,
    /// Probability of `label`, in [0, 1].
    pub probability: f64,
}

impl Prediction {
    /// Probability as a percentage with two decimals, e.g. `"97.31%"`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

/// Index of the largest value. Ties go to the first index and NaN never wins.
/// Returns `None` when `values` is empty or entirely NaN.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(probability: f64) -> Prediction {
        Prediction { index: 0, label: "healthy_".into(), probability }
    }

    fn is_percent(s: &str) -> bool {
        let Some(num) = s.strip_suffix('%') else { return false };
        let Some((int, frac)) = num.split_once('.') else { return false };
        !int.is_empty()
            && int.chars().all(|c| c.is_ascii_digit())
            && frac.len() == 2
            && frac.chars().all(|c| c.is_ascii_digit())
    }

    #[test]
    fn confidence_has_two_decimals() {
        assert_eq!(prediction(0.97314).confidence_percent(), "97.31%");
        assert_eq!(prediction(1.0).confidence_percent(), "100.00%");
        assert_eq!(prediction(0.0).confidence_percent(), "0.00%");
        assert_eq!(prediction(0.5).confidence_percent(), "50.00%");
    }

    #[test]
    fn confidence_matches_pattern() {
        for p in [0.0, 0.001, 0.123456, 0.5, 0.999999, 1.0] {
            let s = prediction(p).confidence_percent();
            assert!(is_percent(&s), "{s}");
        }
    }

    #[test]
    fn argmax_picks_largest() {
        assert_eq!(argmax(&[0.2, 0.8]), Some(1));
        assert_eq!(argmax(&[0.9, 0.1]), Some(0));
    }

    #[test]
    fn argmax_ties_go_first() {
        assert_eq!(argmax(&[0.5, 0.5]), Some(0));
    }

    #[test]
    fn argmax_skips_nan() {
        assert_eq!(argmax(&[f64::NAN, 0.3, 0.1]), Some(1));
        assert_eq!(argmax(&[f64::NAN]), None);
        assert_eq!(argmax(&[]), None);
    }
}

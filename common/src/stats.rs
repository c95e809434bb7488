//! 集計（ダッシュボード用）
//!
//! 履歴から毎回計算し直す。キャッシュはしない。

use std::collections::BTreeMap;

use crate::types::{InspectionResult, InspectionStatus};

/// 検査統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_inspected: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    /// 不良種別ラベル → 件数
    pub defect_types: BTreeMap<String, usize>,
}

impl Statistics {
    pub fn from_history<'a, I>(history: I) -> Self
    where
        I: IntoIterator<Item = &'a InspectionResult>,
    {
        let mut stats = Statistics::default();
        for result in history {
            stats.total_inspected += 1;
            match result.status {
                InspectionStatus::Pass => stats.pass_count += 1,
                InspectionStatus::Fail => stats.fail_count += 1,
            }
            for defect in &result.defects {
                *stats
                    .defect_types
                    .entry(defect.defect_type.label().to_string())
                    .or_insert(0) += 1;
            }
        }
        stats
    }

    /// 合格率（%、四捨五入）。検査0件なら0
    pub fn pass_rate(&self) -> u32 {
        if self.total_inspected == 0 {
            return 0;
        }
        (self.pass_count as f64 / self.total_inspected as f64 * 100.0).round() as u32
    }

    /// 出現した不良種別の数
    pub fn distinct_defect_types(&self) -> usize {
        self.defect_types.len()
    }

    pub fn total_defects(&self) -> usize {
        self.defect_types.values().sum()
    }

    /// グラフ用の (ラベル, 件数) 列
    pub fn distribution(&self) -> Vec<(String, usize)> {
        self.defect_types
            .iter()
            .map(|(label, count)| (label.clone(), *count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Defect, DefectType, Location, Severity};
    use chrono::Utc;

    fn defect(defect_type: DefectType) -> Defect {
        Defect {
            component: "U1".to_string(),
            defect_type,
            confidence: 0.8,
            description: String::new(),
            severity: Severity::Minor,
            location: Location::default(),
        }
    }

    fn result(status: InspectionStatus, defects: Vec<Defect>) -> InspectionResult {
        InspectionResult {
            status,
            defects,
            summary: String::new(),
            timestamp: Utc::now(),
            image: None,
        }
    }

    #[test]
    fn test_empty_history() {
        let empty: Vec<InspectionResult> = vec![];
        let stats = Statistics::from_history(&empty);
        assert_eq!(stats.total_inspected, 0);
        assert_eq!(stats.pass_rate(), 0);
        assert_eq!(stats.distinct_defect_types(), 0);
    }

    #[test]
    fn test_counts_and_pass_rate() {
        let history = vec![
            result(InspectionStatus::Pass, vec![]),
            result(InspectionStatus::Fail, vec![defect(DefectType::Burnt)]),
            result(InspectionStatus::Pass, vec![]),
        ];
        let stats = Statistics::from_history(&history);
        assert_eq!(stats.total_inspected, 3);
        assert_eq!(stats.pass_count, 2);
        assert_eq!(stats.fail_count, 1);
        // 2/3 = 66.67% → 67
        assert_eq!(stats.pass_rate(), 67);
    }

    #[test]
    fn test_pass_rate_rounds_half_up() {
        let history = vec![
            result(InspectionStatus::Pass, vec![]),
            result(InspectionStatus::Fail, vec![]),
        ];
        assert_eq!(Statistics::from_history(&history).pass_rate(), 50);

        let mut eight = vec![result(InspectionStatus::Pass, vec![]); 1];
        eight.extend(vec![result(InspectionStatus::Fail, vec![]); 7]);
        // 1/8 = 12.5% → 13
        assert_eq!(Statistics::from_history(&eight).pass_rate(), 13);
    }

    #[test]
    fn test_defect_type_frequency_matches_total() {
        let history = vec![
            result(
                InspectionStatus::Fail,
                vec![defect(DefectType::ShortCircuit), defect(DefectType::ShortCircuit)],
            ),
            result(
                InspectionStatus::Fail,
                vec![
                    defect(DefectType::PoorSolder),
                    defect(DefectType::Other("Tombstoning".into())),
                ],
            ),
        ];
        let stats = Statistics::from_history(&history);
        assert_eq!(stats.defect_types["Short Circuit"], 2);
        assert_eq!(stats.defect_types["Poor Solder"], 1);
        assert_eq!(stats.defect_types["Tombstoning"], 1);

        let defect_count: usize = history.iter().map(|r| r.defects.len()).sum();
        assert_eq!(stats.total_defects(), defect_count);
        assert_eq!(stats.distinct_defect_types(), 3);
    }

    #[test]
    fn test_distribution_order_is_stable() {
        let history = vec![result(
            InspectionStatus::Fail,
            vec![defect(DefectType::PoorSolder), defect(DefectType::Burnt)],
        )];
        let stats = Statistics::from_history(&history);
        assert_eq!(
            stats.distribution(),
            vec![("Burnt".to_string(), 1), ("Poor Solder".to_string(), 1)]
        );
    }
}

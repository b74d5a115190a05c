// 检测结果数据结构（对应 darknet 输出的 JSON）

use serde::{Deserialize, Serialize};

/// 检测程序输出
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// 按程序输出顺序排列的检测记录；缺少该字段时为空
    #[serde(default)]
    pub detections: Vec<DetectionRecord>,
}

/// 单个检测目标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    /// 置信度 (0.0 - 1.0)
    pub prob: f64,
    pub class: String,
}

impl DetectionRecord {
    pub fn width(&self) -> u64 {
        (self.right - self.left).max(0) as u64
    }

    pub fn height(&self) -> u64 {
        (self.bottom - self.top).max(0) as u64
    }
}

impl DetectionResult {
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DetectionRecord> {
        self.detections.iter()
    }

    /// 置信度不低于 min_prob 的记录，保持原顺序
    pub fn above(&self, min_prob: f64) -> impl Iterator<Item = &DetectionRecord> + '_ {
        self.detections.iter().filter(move |d| d.prob >= min_prob)
    }
}

impl<'a> IntoIterator for &'a DetectionResult {
    type Item = &'a DetectionRecord;
    type IntoIter = std::slice::Iter<'a, DetectionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.iter()
    }
}

impl IntoIterator for DetectionResult {
    type Item = DetectionRecord;
    type IntoIter = std::vec::IntoIter<DetectionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "detections": [
            {"left": 69, "bottom": 117, "prob": 0.248203, "right": 99, "top": 78, "class": "artifact"},
            {"left": 417, "bottom": 172, "prob": 0.739088, "right": 707, "top": 70, "class": "truck"},
            {"left": 117, "bottom": 528, "prob": 0.812877, "right": 344, "top": 227, "class": "feline"}
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let result: DetectionResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(result.len(), 3);
        let truck = &result.detections[1];
        assert_eq!(truck.class, "truck");
        assert_eq!(truck.width(), 290);
        assert_eq!(truck.height(), 102);
        assert!((truck.prob - 0.739088).abs() < 1e-9);
    }

    #[test]
    fn test_above_keeps_order() {
        let result: DetectionResult = serde_json::from_str(SAMPLE).unwrap();
        let classes: Vec<&str> = result.above(0.5).map(|d| d.class.as_str()).collect();
        assert_eq!(classes, vec!["truck", "feline"]);
    }

    #[test]
    fn test_missing_detections_key() {
        let result: DetectionResult = serde_json::from_str(r#"{"elapsed": 1.2}"#).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_serialize_uses_class_key() {
        let record = DetectionRecord {
            left: 10, top: 20, right: 30, bottom: 40, prob: 0.9, class: "cat".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["class"], "cat");
    }

    #[test]
    fn test_inverted_box_has_zero_size() {
        let record = DetectionRecord {
            left: 30, top: 40, right: 10, bottom: 20, prob: 0.1, class: "dog".to_string(),
        };
        assert_eq!(record.width(), 0);
        assert_eq!(record.height(), 0);
    }
}

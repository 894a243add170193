//! Weighted search scoring.
//!
//! Each record is scored in two passes: the whole normalized query against
//! the heavy fields, then every whitespace-separated keyword of length 3 or
//! more against a wider field set. Zero-scoring records are excluded, and
//! ranking is stable, so equal scores keep catalog order.

use crate::types::DiseaseRecord;

/// Rank `records` against a normalized (trimmed, lowercased) query.
///
/// Returns matching records, best first. Scores stay internal.
pub(crate) fn rank(records: &[DiseaseRecord], query: &str) -> Vec<DiseaseRecord> {
    let keywords: Vec<&str> = query.split_whitespace().filter(|w| w.len() >= 3).collect();
    let mut scored: Vec<(u32, &DiseaseRecord)> = records
        .iter()
        .filter_map(|record| {
            let score = score_record(record, query, &keywords);
            (score > 0).then_some((score, record))
        })
        .collect();
    // sort_by is stable: ties keep catalog order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, record)| record.clone()).collect()
}

/// Score one record. Whole-query hits dominate; keyword hits refine.
fn score_record(record: &DiseaseRecord, query: &str, keywords: &[&str]) -> u32 {
    let name = record.name.to_lowercase();
    let crop = record.crop.to_lowercase();
    let pathogen = record.pathogen_type.label().to_lowercase();
    let cause = lower(&record.cause);
    let symptoms = lower(&record.symptoms);
    let description = lower(&record.description);
    let favorable = lower(&record.favorable_conditions);
    let preventions: Vec<String> = record.preventions.iter().map(|p| p.to_lowercase()).collect();
    let solutions: Vec<String> = record.solutions.iter().map(|s| s.to_lowercase()).collect();

    let mut score = 0;

    if name.contains(query) {
        score += 100;
    }
    if crop.contains(query) {
        score += 80;
    }
    if contains(&cause, query) {
        score += 70;
    }
    if contains(&symptoms, query) {
        score += 70;
    }
    if contains(&description, query) {
        score += 60;
    }
    if pathogen.contains(query) {
        score += 60;
    }
    if preventions.iter().any(|p| p.contains(query)) {
        score += 50;
    }
    if solutions.iter().any(|s| s.contains(query)) {
        score += 50;
    }

    for keyword in keywords {
        if name.contains(keyword) {
            score += 20;
        }
        if crop.contains(keyword) {
            score += 15;
        }
        if contains(&cause, keyword) {
            score += 15;
        }
        if contains(&symptoms, keyword) {
            score += 15;
        }
        if contains(&description, keyword) {
            score += 10;
        }
        if contains(&favorable, keyword) {
            score += 10;
        }
        // List fields score once per keyword, however many items match.
        if preventions.iter().any(|p| p.contains(keyword)) {
            score += 10;
        }
        if solutions.iter().any(|s| s.contains(keyword)) {
            score += 10;
        }
    }

    score
}

fn lower(field: &Option<String>) -> Option<String> {
    field.as_deref().map(str::to_lowercase)
}

fn contains(field: &Option<String>, needle: &str) -> bool {
    field.as_deref().is_some_and(|text| text.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PathogenType;

    fn blight() -> DiseaseRecord {
        DiseaseRecord::new(1, "Late blight", "Tomato")
            .with_pathogen(PathogenType::Oomycete)
            .with_cause("Phytophthora infestans")
            .with_symptoms("Water-soaked lesions on leaves")
            .with_description("A destructive disease of tomato and potato")
            .with_prevention("Rotate crops yearly")
            .with_prevention("Use certified seed")
            .with_solution("Apply copper-based fungicide")
    }

    #[test]
    fn name_match_scores_whole_query_plus_keyword() {
        let records = vec![blight(), DiseaseRecord::new(2, "Powdery mildew", "Squash")];
        let ranked = rank(&records, "blight");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, 1);
        // name (100) + keyword name (20)
        assert_eq!(score_record(&records[0], "blight", &["blight"]), 120);
    }

    #[test]
    fn zero_scores_are_excluded() {
        let records = vec![blight()];
        assert!(rank(&records, "wheat rust").is_empty());
    }

    #[test]
    fn short_keywords_are_skipped_but_whole_query_still_matches() {
        let record = blight();
        // "to" is under the keyword length floor, yet the whole-query pass
        // still finds it inside "Tomato".
        let score = score_record(&record, "to", &[]);
        assert!(score >= 80);
        let ranked = rank(&[record], "to");
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn list_fields_score_once_per_keyword() {
        let record = DiseaseRecord::new(3, "Scab", "Apple")
            .with_prevention("Rotate crops yearly")
            .with_prevention("Rotate beds in spring");
        // Two preventions contain "rotate"; the bonus applies once.
        assert_eq!(score_record(&record, "rotate", &["rotate"]), 50 + 10);
    }

    #[test]
    fn pathogen_label_matches_whole_query_only() {
        let record = blight();
        assert_eq!(score_record(&record, "oomycete", &["oomycete"]), 60);
    }

    #[test]
    fn multi_keyword_query_accumulates() {
        let record = blight();
        // Whole query hits the name (100); each keyword hits it again
        // (20 + 20). No other field contains either keyword.
        assert_eq!(score_record(&record, "late blight", &["late", "blight"]), 140);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let records = vec![
            DiseaseRecord::new(1, "Leaf spot", "Rice"),
            DiseaseRecord::new(2, "Leaf spot", "Wheat"),
        ];
        let ranked = rank(&records, "leaf spot");
        assert_eq!(ranked[0].id, 1);
        assert_eq!(ranked[1].id, 2);
    }

    #[test]
    fn descending_score_order() {
        let records = vec![
            DiseaseRecord::new(1, "Rust", "Wheat"),
            DiseaseRecord::new(2, "Blast", "Rice").with_description("often mistaken for rust"),
        ];
        let ranked = rank(&records, "rust");
        // Name hit (120) outranks description hit (70).
        assert_eq!(ranked[0].id, 1);
        assert_eq!(ranked[1].id, 2);
    }
}

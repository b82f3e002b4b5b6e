//! # Completion Progress
//!
//! Pure functions over a report schema with its inline answers. The same
//! schema always yields the same percentage, and answering more items never
//! lowers it.

use shared::{ChecklistSchema, SchemaItem, SchemaSection};

use super::answers::AnswerKind;

pub const MEDIA_REQUIRED: &str = "required";

/// Whether the reporter has done everything `item` asks for.
pub fn is_item_complete(item: &SchemaItem) -> bool {
    let result = item.answer.result.as_deref().unwrap_or_default();

    let answered = match AnswerKind::from_slug(&item.answer_types.slug) {
        AnswerKind::Boolean => !result.is_empty(),
        AnswerKind::Rating => result.trim().parse::<i64>().is_ok_and(|rating| rating > 0),
        AnswerKind::Text => !result.trim().is_empty(),
        AnswerKind::Other => false,
    };

    match item.media_max_files {
        Some(required) if answered && required > 0 && item.media_requirement == MEDIA_REQUIRED => {
            item.answer.media.len() >= required as usize
        }
        _ => answered,
    }
}

fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u8
}

/// `(completed, total)` items across the whole schema.
pub fn counts(schema: &ChecklistSchema) -> (usize, usize) {
    schema.items().fold((0, 0), |(done, total), item| {
        (done + usize::from(is_item_complete(item)), total + 1)
    })
}

/// Rounded percentage of completed items; 0 for an empty schema.
pub fn completion_percent(schema: &ChecklistSchema) -> u8 {
    let (completed, total) = counts(schema);
    percent(completed, total)
}

pub fn section_percent(section: &SchemaSection) -> u8 {
    let completed = section.items.iter().filter(|item| is_item_complete(item)).count();
    percent(completed, section.items.len())
}

/// Items still blocking submission, in display order.
pub fn incomplete_items(schema: &ChecklistSchema) -> Vec<&SchemaItem> {
    schema.items().filter(|item| !is_item_complete(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::{Answer, MediaRef, SchemaAnswerType};

    fn item(id: i64, slug: &str, result: Option<&str>) -> SchemaItem {
        SchemaItem {
            id,
            sort_order: id,
            answer_types: SchemaAnswerType {
                slug: slug.into(),
                ..Default::default()
            },
            answer: Answer {
                result: result.map(String::from),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn schema(items: Vec<SchemaItem>) -> ChecklistSchema {
        ChecklistSchema {
            version: "1".into(),
            sections: vec![SchemaSection {
                id: 1,
                items,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_completion_by_answer_type() {
        assert!(is_item_complete(&item(1, "boolean", Some("false"))));
        assert!(!is_item_complete(&item(1, "boolean", Some(""))));
        assert!(is_item_complete(&item(1, "rating_5", Some("4"))));
        assert!(!is_item_complete(&item(1, "rating_5", Some("0"))));
        assert!(!is_item_complete(&item(1, "rating_5", Some("good"))));
        assert!(is_item_complete(&item(1, "text", Some("Чисто"))));
        assert!(!is_item_complete(&item(1, "text", Some("   "))));
        assert!(!is_item_complete(&item(1, "photo", Some("x"))));
    }

    #[test]
    fn test_rating_ignores_scale_bounds() {
        let mut rated = item(1, "rating_3_10", Some("1"));
        rated.answer_types.meta = Some(json!({"min": 3, "max": 10}));
        assert!(is_item_complete(&rated));
        rated.answer.result = Some("0".into());
        assert!(!is_item_complete(&rated));
    }

    #[test]
    fn test_boolean_only_needs_a_non_empty_result() {
        assert!(is_item_complete(&item(1, "boolean", Some(" "))));
        assert!(!is_item_complete(&item(1, "boolean", None)));
    }

    #[test]
    fn test_required_media_gates_completion() {
        let mut photo = item(1, "boolean", Some("true"));
        photo.media_requirement = MEDIA_REQUIRED.into();
        photo.media_max_files = Some(2);
        assert!(!is_item_complete(&photo));

        photo.answer.media = vec![MediaRef::default(), MediaRef::default()];
        assert!(is_item_complete(&photo));

        photo.media_requirement = "optional".into();
        photo.answer.media.clear();
        assert!(is_item_complete(&photo));
    }

    #[test]
    fn test_empty_schema_is_zero() {
        assert_eq!(completion_percent(&ChecklistSchema::default()), 0);
        assert_eq!(section_percent(&SchemaSection::default()), 0);
    }

    #[test]
    fn test_percent_is_rounded_and_idempotent() {
        let s = schema(vec![
            item(1, "boolean", Some("true")),
            item(2, "text", None),
            item(3, "rating_5", None),
        ]);
        assert_eq!(completion_percent(&s), 33);
        assert_eq!(completion_percent(&s), completion_percent(&s.clone()));
        assert_eq!(counts(&s), (1, 3));
        assert_eq!(incomplete_items(&s).iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_filling_answers_never_lowers_progress() {
        let mut s = schema(vec![
            item(1, "boolean", None),
            item(2, "text", None),
            item(3, "rating_5", None),
            item(4, "photo", None),
        ]);
        let answers = ["true", "Всё хорошо", "5", "ignored"];

        let mut last = completion_percent(&s);
        assert_eq!(last, 0);
        for (index, answer) in answers.iter().enumerate() {
            s.sections[0].items[index].answer.result = Some((*answer).to_string());
            let now = completion_percent(&s);
            assert!(now >= last, "{now} < {last}");
            last = now;
        }
        assert_eq!(last, 75);
    }
}

//! # Draft Answers
//!
//! Editable per-item answer state for a report draft, keyed by item id.
//! [`DraftAnswers::restore`] reads it out of a stored schema and
//! [`DraftAnswers::apply`] writes it back into one for saving.
//!
//! Wire encoding inside `answer`:
//!
//! | Answer type | `result`            | `comment`                 |
//! |-------------|---------------------|---------------------------|
//! | `boolean`   | `"true"`/`"false"`  | only when `"false"`       |
//! | `rating_*`  | integer as string   | never                     |
//! | `text`      | the text            | never                     |

use std::collections::BTreeMap;

use serde_json::Value;
use shared::{Answer, ChecklistSchema, MediaRef, SchemaItem};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Boolean,
    Rating,
    Text,
    Other,
}

impl AnswerKind {
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "boolean" => AnswerKind::Boolean,
            "text" => AnswerKind::Text,
            s if s.starts_with("rating_") => AnswerKind::Rating,
            _ => AnswerKind::Other,
        }
    }
}

/// Inclusive rating bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingScale {
    pub min: i64,
    pub max: i64,
}

impl Default for RatingScale {
    fn default() -> Self {
        Self { min: 1, max: 5 }
    }
}

impl RatingScale {
    pub fn contains(&self, rating: i64) -> bool {
        (self.min..=self.max).contains(&rating)
    }
}

/// Rating bounds from answer type `meta`: an object or a JSON string holding
/// one. Missing, zero or unreadable bounds fall back to 1..=5.
pub fn parse_rating_meta(meta: Option<&Value>) -> RatingScale {
    let defaults = RatingScale::default();
    let parsed = match meta {
        Some(Value::String(raw)) => serde_json::from_str::<Value>(raw).ok(),
        Some(value) => Some(value.clone()),
        None => None,
    };
    let bound = |key: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(key))
            .and_then(Value::as_i64)
            .filter(|n| *n != 0)
    };
    RatingScale {
        min: bound("min").unwrap_or(defaults.min),
        max: bound("max").unwrap_or(defaults.max),
    }
}

/// A media attachment as edited. Ids are issued on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftMedia {
    pub url: String,
    pub media_type: String,
}

impl From<&MediaRef> for DraftMedia {
    fn from(media: &MediaRef) -> Self {
        Self {
            url: media.url.clone(),
            media_type: media.media_type.clone(),
        }
    }
}

impl From<MediaRef> for DraftMedia {
    fn from(media: MediaRef) -> Self {
        Self {
            url: media.url,
            media_type: media.media_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftAnswers {
    checks: BTreeMap<i64, bool>,
    ratings: BTreeMap<i64, i64>,
    /// Free text for `text` items, remark for failed `boolean` items
    comments: BTreeMap<i64, String>,
    media: BTreeMap<i64, Vec<DraftMedia>>,
}

impl DraftAnswers {
    /// Answer state stored in `schema`.
    pub fn restore(schema: &ChecklistSchema) -> Self {
        let mut answers = Self::default();
        for item in schema.items() {
            if let Some(result) = item.answer.result.as_deref().filter(|r| !r.is_empty()) {
                match AnswerKind::from_slug(&item.answer_types.slug) {
                    AnswerKind::Boolean => {
                        let ok = result == "true";
                        answers.checks.insert(item.id, ok);
                        if !ok {
                            answers
                                .comments
                                .insert(item.id, item.answer.comment.clone().unwrap_or_default());
                        }
                    }
                    AnswerKind::Rating => {
                        if let Ok(rating) = result.trim().parse() {
                            answers.ratings.insert(item.id, rating);
                        }
                    }
                    AnswerKind::Text => {
                        answers.comments.insert(item.id, result.to_string());
                    }
                    AnswerKind::Other => {}
                }
            }
            if !item.answer.media.is_empty() {
                answers
                    .media
                    .insert(item.id, item.answer.media.iter().map(DraftMedia::from).collect());
            }
        }
        answers
    }

    pub fn set_check(&mut self, item_id: i64, ok: bool) {
        self.checks.insert(item_id, ok);
    }

    pub fn set_rating(&mut self, item_id: i64, rating: i64) {
        self.ratings.insert(item_id, rating);
    }

    pub fn set_comment(&mut self, item_id: i64, comment: impl Into<String>) {
        self.comments.insert(item_id, comment.into());
    }

    /// Set the answer for `item` from typed input: yes/no for checks
    /// (`no: remark` adds the remark), a number within the scale for ratings,
    /// any text for text items.
    pub fn set_input(&mut self, item: &SchemaItem, input: &str) -> Result<(), String> {
        let input = input.trim();
        match AnswerKind::from_slug(&item.answer_types.slug) {
            AnswerKind::Boolean => {
                let (value, remark) = match input.split_once(':') {
                    Some((value, remark)) => (value.trim(), Some(remark.trim())),
                    None => (input, None),
                };
                let ok = match value.to_lowercase().as_str() {
                    "yes" | "y" | "true" | "да" | "+" => true,
                    "no" | "n" | "false" | "нет" | "-" => false,
                    _ => return Err(format!("expected yes or no, got {value:?}")),
                };
                self.set_check(item.id, ok);
                if let Some(remark) = remark.filter(|_| !ok) {
                    self.set_comment(item.id, remark);
                }
            }
            AnswerKind::Rating => {
                let scale = parse_rating_meta(item.answer_types.meta.as_ref());
                match input.parse::<i64>() {
                    Ok(rating) if scale.contains(rating) => self.set_rating(item.id, rating),
                    _ => return Err(format!("expected a rating from {} to {}", scale.min, scale.max)),
                }
            }
            AnswerKind::Text => self.set_comment(item.id, input),
            AnswerKind::Other => {
                return Err(format!("unsupported answer type {}", item.answer_types.slug));
            }
        }
        Ok(())
    }

    pub fn add_media(&mut self, item_id: i64, media: impl Into<DraftMedia>) {
        self.media.entry(item_id).or_default().push(media.into());
    }

    /// Remove the attachment at `index`. Returns false when there is none.
    pub fn remove_media(&mut self, item_id: i64, index: usize) -> bool {
        match self.media.get_mut(&item_id) {
            Some(list) if index < list.len() => {
                list.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn check(&self, item_id: i64) -> Option<bool> {
        self.checks.get(&item_id).copied()
    }

    pub fn rating(&self, item_id: i64) -> Option<i64> {
        self.ratings.get(&item_id).copied()
    }

    pub fn comment(&self, item_id: i64) -> Option<&str> {
        self.comments.get(&item_id).map(String::as_str)
    }

    pub fn media(&self, item_id: i64) -> &[DraftMedia] {
        self.media.get(&item_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// `result` to store for `item`.
    pub fn result_for(&self, item: &SchemaItem) -> Option<String> {
        match AnswerKind::from_slug(&item.answer_types.slug) {
            AnswerKind::Boolean => self.check(item.id).map(|ok| ok.to_string()),
            AnswerKind::Rating => self.rating(item.id).map(|r| r.to_string()),
            AnswerKind::Text => self.comment(item.id).filter(|c| !c.is_empty()).map(String::from),
            AnswerKind::Other => None,
        }
    }

    fn comment_for(&self, item: &SchemaItem, result: Option<&str>) -> Option<String> {
        let is_failed_check = AnswerKind::from_slug(&item.answer_types.slug) == AnswerKind::Boolean
            && result == Some("false");
        if is_failed_check {
            Some(self.comment(item.id).unwrap_or_default().to_string())
        } else {
            None
        }
    }

    /// Copy of `schema` with every item's answer replaced by this state.
    /// Media get fresh ids.
    pub fn apply(&self, schema: &ChecklistSchema) -> ChecklistSchema {
        let mut updated = schema.clone();
        for item in updated.sections.iter_mut().flat_map(|s| s.items.iter_mut()) {
            let result = self.result_for(item);
            item.answer = Answer {
                comment: self.comment_for(item, result.as_deref()),
                result,
                media: self
                    .media(item.id)
                    .iter()
                    .map(|m| MediaRef {
                        id: Uuid::new_v4().to_string(),
                        url: m.url.clone(),
                        media_type: m.media_type.clone(),
                    })
                    .collect(),
            };
        }
        updated
    }

    /// Completion of `schema` answered with this state.
    pub fn progress(&self, schema: &ChecklistSchema) -> u8 {
        super::progress::completion_percent(&self.apply(schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::{SchemaAnswerType, SchemaSection};

    fn item(id: i64, slug: &str, answer: Answer) -> SchemaItem {
        SchemaItem {
            id,
            sort_order: id,
            answer_types: SchemaAnswerType {
                slug: slug.into(),
                ..Default::default()
            },
            answer,
            ..Default::default()
        }
    }

    fn answered(result: &str, comment: Option<&str>) -> Answer {
        Answer {
            result: Some(result.into()),
            comment: comment.map(String::from),
            media: Vec::new(),
        }
    }

    fn schema() -> ChecklistSchema {
        ChecklistSchema {
            version: "1".into(),
            sections: vec![SchemaSection {
                id: 1,
                items: vec![
                    item(1, "boolean", answered("false", Some("Пыль на полках"))),
                    item(2, "boolean", answered("true", Some("stale"))),
                    item(3, "rating_5", answered("4", None)),
                    item(4, "text", answered("Тихо", Some("ignored"))),
                    item(5, "photo", Answer::default()),
                ],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_kind_from_slug() {
        assert_eq!(AnswerKind::from_slug("boolean"), AnswerKind::Boolean);
        assert_eq!(AnswerKind::from_slug("rating_10"), AnswerKind::Rating);
        assert_eq!(AnswerKind::from_slug("rating"), AnswerKind::Other);
        assert_eq!(AnswerKind::from_slug("text"), AnswerKind::Text);
    }

    #[test]
    fn test_rating_meta_forms() {
        assert_eq!(parse_rating_meta(None), RatingScale { min: 1, max: 5 });
        assert_eq!(parse_rating_meta(Some(&json!({"min": 0, "max": 10}))), RatingScale { min: 1, max: 10 });
        assert_eq!(parse_rating_meta(Some(&json!(r#"{"min":2,"max":7}"#))), RatingScale { min: 2, max: 7 });
        assert_eq!(parse_rating_meta(Some(&json!("not json"))), RatingScale::default());
        assert!(RatingScale::default().contains(5));
        assert!(!RatingScale::default().contains(6));
    }

    #[test]
    fn test_set_input_parses_by_kind() {
        let mut rating = item(3, "rating_3_10", Answer::default());
        rating.answer_types.meta = Some(json!({"min": 3, "max": 10}));
        let mut answers = DraftAnswers::default();

        answers.set_input(&item(1, "boolean", Answer::default()), "нет: Пыль").unwrap();
        answers.set_input(&item(2, "boolean", Answer::default()), " Yes ").unwrap();
        answers.set_input(&rating, "7").unwrap();
        answers.set_input(&item(4, "text", Answer::default()), "Тихо").unwrap();

        assert_eq!(answers.check(1), Some(false));
        assert_eq!(answers.comment(1), Some("Пыль"));
        assert_eq!(answers.check(2), Some(true));
        assert_eq!(answers.rating(3), Some(7));
        assert_eq!(answers.comment(4), Some("Тихо"));

        assert!(answers.set_input(&rating, "2").is_err());
        assert!(answers.set_input(&rating, "seven").is_err());
        assert!(answers.set_input(&item(1, "boolean", Answer::default()), "maybe").is_err());
        assert!(answers.set_input(&item(5, "photo", Answer::default()), "x").is_err());
        assert_eq!(answers.rating(3), Some(7));
    }

    #[test]
    fn test_restore_reads_each_kind() {
        let answers = DraftAnswers::restore(&schema());
        assert_eq!(answers.check(1), Some(false));
        assert_eq!(answers.comment(1), Some("Пыль на полках"));
        assert_eq!(answers.check(2), Some(true));
        assert_eq!(answers.comment(2), None);
        assert_eq!(answers.rating(3), Some(4));
        assert_eq!(answers.comment(4), Some("Тихо"));
        assert!(answers.media(5).is_empty());
    }

    #[test]
    fn test_apply_keeps_comment_only_for_failed_checks() {
        let source = schema();
        let saved = DraftAnswers::restore(&source).apply(&source);
        let by_id = |id: i64| saved.items().find(|i| i.id == id).cloned().unwrap_or_default();

        assert_eq!(by_id(1).answer, answered("false", Some("Пыль на полках")));
        assert_eq!(by_id(2).answer, answered("true", None));
        assert_eq!(by_id(3).answer, answered("4", None));
        assert_eq!(by_id(4).answer, answered("Тихо", None));
        assert_eq!(by_id(5).answer, Answer::default());
    }

    #[test]
    fn test_apply_issues_fresh_media_ids() {
        let source = schema();
        let mut answers = DraftAnswers::restore(&source);
        answers.add_media(
            5,
            DraftMedia {
                url: "https://cdn.example.com/a.jpg".into(),
                media_type: "image".into(),
            },
        );

        let first = answers.apply(&source);
        let second = answers.apply(&source);
        let media = |s: &ChecklistSchema| s.items().find(|i| i.id == 5).map(|i| i.answer.media.clone()).unwrap_or_default();

        assert_eq!(media(&first).len(), 1);
        assert_eq!(media(&first)[0].url, "https://cdn.example.com/a.jpg");
        assert_ne!(media(&first)[0].id, media(&second)[0].id);

        assert!(answers.remove_media(5, 0));
        assert!(!answers.remove_media(5, 0));
    }

    #[test]
    fn test_progress_follows_edits() {
        let source = schema();
        let mut answers = DraftAnswers::default();
        assert_eq!(answers.progress(&source), 0);

        answers.set_check(1, true);
        answers.set_rating(3, 5);
        assert_eq!(answers.progress(&source), 40);

        answers.set_comment(4, "   ");
        assert_eq!(answers.progress(&source), 40);
    }
}

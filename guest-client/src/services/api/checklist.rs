//! # Checklist Catalogue Endpoints
//!
//! Staff CRUD over `/staff/checklist_sections` and `/staff/checklist_items`,
//! plus the two compound edits the checklist editor performs: duplicating a
//! section with its items and saving a new section order.

use futures::future::try_join_all;
use shared::{
    ChecklistItem, ChecklistItemsResponse, ChecklistSection, ChecklistSectionsResponse, CreateItemRequest,
    CreateSectionRequest, SectionFilters, UpdateItemRequest, UpdateSectionRequest,
};

use super::client::{with_query, ApiClient};
use crate::checklist::reorder::{self, Ordered};
use crate::core::error::ApiError;

fn filter_params(filters: &SectionFilters) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    params.extend(filters.id.iter().map(|id| ("id", id.to_string())));
    params.extend(filters.slug.iter().map(|slug| ("slug", slug.clone())));
    params.extend(
        filters
            .listing_type_id
            .iter()
            .map(|id| ("listing_type_id", id.to_string())),
    );
    params.extend(
        filters
            .listing_type_slug
            .iter()
            .map(|slug| ("listing_type_slug", slug.clone())),
    );
    params
}

#[tracing::instrument(skip(client))]
pub async fn list_sections(client: &ApiClient, filters: &SectionFilters) -> Result<Vec<ChecklistSection>, ApiError> {
    let response: ChecklistSectionsResponse = client
        .get(&with_query("/staff/checklist_sections", &filter_params(filters)), true)
        .await?;
    Ok(response.checklist_sections)
}

#[tracing::instrument(skip(client))]
pub async fn get_section(client: &ApiClient, id: i64) -> Result<ChecklistSection, ApiError> {
    client.get(&format!("/staff/checklist_sections/{id}"), true).await
}

#[tracing::instrument(skip(client))]
pub async fn create_section(client: &ApiClient, request: &CreateSectionRequest) -> Result<ChecklistSection, ApiError> {
    client.post("/staff/checklist_sections", request, true).await
}

#[tracing::instrument(skip(client))]
pub async fn update_section(
    client: &ApiClient,
    id: i64,
    request: &UpdateSectionRequest,
) -> Result<ChecklistSection, ApiError> {
    client.patch(&format!("/staff/checklist_sections/{id}"), request, true).await
}

#[tracing::instrument(skip(client))]
pub async fn delete_section(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client
        .delete::<Option<serde_json::Value>>(&format!("/staff/checklist_sections/{id}"), true)
        .await
        .map(drop)
}

#[tracing::instrument(skip(client))]
pub async fn list_items(client: &ApiClient) -> Result<Vec<ChecklistItem>, ApiError> {
    let response: ChecklistItemsResponse = client.get("/staff/checklist_items", true).await?;
    Ok(response.checklist_items)
}

#[tracing::instrument(skip(client))]
pub async fn get_item(client: &ApiClient, id: i64) -> Result<ChecklistItem, ApiError> {
    client.get(&format!("/staff/checklist_items/{id}"), true).await
}

#[tracing::instrument(skip(client))]
pub async fn create_item(client: &ApiClient, request: &CreateItemRequest) -> Result<ChecklistItem, ApiError> {
    client.post("/staff/checklist_items", request, true).await
}

#[tracing::instrument(skip(client))]
pub async fn update_item(client: &ApiClient, id: i64, request: &UpdateItemRequest) -> Result<ChecklistItem, ApiError> {
    client.patch(&format!("/staff/checklist_items/{id}"), request, true).await
}

#[tracing::instrument(skip(client))]
pub async fn delete_item(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client
        .delete::<Option<serde_json::Value>>(&format!("/staff/checklist_items/{id}"), true)
        .await
        .map(drop)
}

/// Section created by [`duplicate_section`] and the copies of its items.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicatedSection {
    pub section: ChecklistSection,
    pub items: Vec<ChecklistItem>,
}

fn copy_title(title: &str) -> String {
    format!("{title} (Copy)")
}

fn copy_slug(slug: &str) -> String {
    format!("{slug}-copy")
}

fn copy_section_request(source: &ChecklistSection) -> CreateSectionRequest {
    CreateSectionRequest {
        title: copy_title(&source.title),
        slug: copy_slug(&source.slug),
        sort_order: source.sort_order + 1,
        listing_type_id: source.listing_type_id,
    }
}

fn copy_item_request(item: &ChecklistItem, section_id: i64, sort_order: i64) -> CreateItemRequest {
    CreateItemRequest {
        title: copy_title(&item.title),
        description: item.description.clone(),
        slug: copy_slug(&item.slug),
        sort_order,
        is_active: item.is_active,
        listing_type_id: item.listing_type_id,
        media_max_files: item.media_max_files,
        media_allowed_types: item.media_allowed_types.clone(),
        answer_type_id: item.answer_type.id,
        media_requirement_id: item.media_requirement.id,
        section_id,
    }
}

/// Insert a copy of `source` right after it.
///
/// Sections in `siblings` that follow `source` are shifted down by one first,
/// then the copy is created and `items` (the source section's items, in
/// display order) are copied into it numbered from 1.
#[tracing::instrument(skip(client, siblings, items), fields(source = source.id, items = items.len()))]
pub async fn duplicate_section(
    client: &ApiClient,
    source: &ChecklistSection,
    siblings: &[ChecklistSection],
    items: &[ChecklistItem],
) -> Result<DuplicatedSection, ApiError> {
    let shifts: Vec<(i64, UpdateSectionRequest)> = siblings
        .iter()
        .filter(|s| s.id != source.id && s.sort_order > source.sort_order)
        .map(|s| (s.id, UpdateSectionRequest::sort_order(s.sort_order + 1)))
        .collect();
    try_join_all(shifts.iter().map(|(id, request)| update_section(client, *id, request))).await?;

    let section = create_section(client, &copy_section_request(source)).await?;

    let requests: Vec<CreateItemRequest> = items
        .iter()
        .enumerate()
        .map(|(index, item)| copy_item_request(item, section.id, index as i64 + 1))
        .collect();
    let items = try_join_all(requests.iter().map(|request| create_item(client, request))).await?;

    tracing::info!(section = section.id, items = items.len(), "Section duplicated");
    Ok(DuplicatedSection { section, items })
}

/// Persist `sections` in the given display order.
///
/// Orders are renumbered from 1 and only sections whose order changed are
/// patched, concurrently. Returns the renumbered list.
#[tracing::instrument(skip(client, sections), fields(sections = sections.len()))]
pub async fn apply_section_order(
    client: &ApiClient,
    sections: &[ChecklistSection],
) -> Result<Vec<ChecklistSection>, ApiError> {
    let mut ordered = sections.to_vec();
    reorder::renumber(&mut ordered);

    let updates: Vec<(i64, UpdateSectionRequest)> = reorder::changed(&ordered, sections)
        .into_iter()
        .map(|s| (s.key(), UpdateSectionRequest::sort_order(s.sort_order())))
        .collect();
    try_join_all(updates.iter().map(|(id, request)| update_section(client, *id, request))).await?;
    let patched = updates.len();

    tracing::debug!(patched, "Section order applied");
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_become_repeated_keys() {
        let filters = SectionFilters {
            id: vec![1, 2],
            listing_type_slug: vec!["hotel".into()],
            ..Default::default()
        };
        assert_eq!(
            with_query("/staff/checklist_sections", &filter_params(&filters)),
            "/staff/checklist_sections?id=1&id=2&listing_type_slug=hotel"
        );
        assert!(filter_params(&SectionFilters::default()).is_empty());
    }

    #[test]
    fn test_copy_requests() {
        let source = ChecklistSection {
            id: 5,
            title: "Номер".into(),
            slug: "room".into(),
            sort_order: 2,
            listing_type_id: Some(1),
        };
        let request = copy_section_request(&source);
        assert_eq!(request.title, "Номер (Copy)");
        assert_eq!(request.slug, "room-copy");
        assert_eq!(request.sort_order, 3);
        assert_eq!(request.listing_type_id, Some(1));

        let mut item = ChecklistItem {
            title: "Чистота".into(),
            slug: "clean".into(),
            media_allowed_types: vec!["image".into()],
            ..Default::default()
        };
        item.answer_type.id = 3;
        item.media_requirement.id = 2;
        let copy = copy_item_request(&item, 42, 1);
        assert_eq!(copy.section_id, 42);
        assert_eq!(copy.answer_type_id, 3);
        assert_eq!(copy.media_requirement_id, 2);
        assert_eq!(copy.slug, "clean-copy");
    }
}

//! Entity API (§4.1): the CRUD/search surface over `entities`, with the
//! event publication each mutating contract names.

use library_core::LibraryResult;
use library_entities::dto::{
    CreateDependencyRequest, CreateEntityRequest, DependencyView, EntityListQuery, EventListQuery, Page,
    UpdateEntityRequest,
};
use library_entities::entity;
use library_entities::event;
use library_entities::types::EventSeverity;
use library_events::subjects;
use library_events::BusTransport;
use library_store::store;
use serde_json::json;

use crate::RegistryService;

fn mutated_field_names(req: &UpdateEntityRequest) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if req.name.is_some() {
        fields.push("name");
    }
    if req.category.is_some() {
        fields.push("category");
    }
    if req.description.is_some() {
        fields.push("description");
    }
    if req.version.is_some() {
        fields.push("version");
    }
    if req.author.is_some() {
        fields.push("author");
    }
    if req.tags.is_some() {
        fields.push("tags");
    }
    if req.config.is_some() {
        fields.push("config");
    }
    if req.parameters.is_some() {
        fields.push("parameters");
    }
    if req.requirements.is_some() {
        fields.push("requirements");
    }
    if req.status.is_some() {
        fields.push("status");
    }
    if req.health_status.is_some() {
        fields.push("health_status");
    }
    if req.resource_hints.is_some() {
        fields.push("resource_hints");
    }
    fields
}

impl<T: BusTransport> RegistryService<T> {
    pub async fn create_entity(&self, req: CreateEntityRequest) -> LibraryResult<entity::Model> {
        let created = store::entities::create(&*self.db, req).await?;

        if let Err(err) = self
            .publisher
            .publish_and_record(
                &*self.db,
                subjects::ENTITY_REGISTERED,
                "entity.registered",
                "entity",
                EventSeverity::Info,
                Some(created.id),
                None,
                None,
                &format!("entity '{}' registered", created.name),
                json!({"name": created.name, "type": created.entity_type.as_str()}),
            )
            .await
        {
            tracing::error!(%err, entity_id = created.id, "failed to persist entity.registered event");
        }

        Ok(created)
    }

    pub async fn update_entity(&self, id: i32, req: UpdateEntityRequest) -> LibraryResult<entity::Model> {
        let mutated = mutated_field_names(&req);
        let updated = store::entities::update(&*self.db, id, req).await?;

        if let Err(err) = self
            .publisher
            .publish_and_record(
                &*self.db,
                subjects::ENTITY_UPDATED,
                "entity.updated",
                "entity",
                EventSeverity::Info,
                Some(updated.id),
                None,
                None,
                &format!("entity '{}' updated", updated.name),
                json!({"mutated_fields": mutated}),
            )
            .await
        {
            tracing::error!(%err, entity_id = updated.id, "failed to persist entity.updated event");
        }

        Ok(updated)
    }

    pub async fn delete_entity(&self, id: i32, deleted_by: Option<String>) -> LibraryResult<entity::Model> {
        let deleted = store::entities::soft_delete(&*self.db, id, deleted_by).await?;

        if let Err(err) = self
            .publisher
            .publish_and_record(
                &*self.db,
                subjects::ENTITY_DELETED,
                "entity.deleted",
                "entity",
                EventSeverity::Info,
                Some(deleted.id),
                None,
                None,
                &format!("entity '{}' deleted", deleted.name),
                json!({"name": deleted.name}),
            )
            .await
        {
            tracing::error!(%err, entity_id = deleted.id, "failed to persist entity.deleted event");
        }

        Ok(deleted)
    }

    pub async fn get_entity(&self, id: i32) -> LibraryResult<entity::Model> {
        store::entities::get(&*self.db, id).await
    }

    pub async fn list_entities(
        &self,
        filter: EntityListQuery,
        page: u64,
        page_size: u64,
    ) -> LibraryResult<Page<entity::Model>> {
        store::entities::list(&*self.db, filter, page, page_size).await
    }

    pub async fn search_entities(
        &self,
        q: Option<String>,
        page: u64,
        page_size: u64,
    ) -> LibraryResult<Page<entity::Model>> {
        store::entities::search(&*self.db, q, page, page_size).await
    }

    pub async fn dependencies_for_entity(&self, entity_id: i32) -> LibraryResult<Vec<DependencyView>> {
        let rows = store::dependencies::list_for_entity(&*self.db, entity_id).await?;
        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            let depends_on = store::entities::get(&*self.db, row.depends_on_entity_id).await?;
            views.push(DependencyView {
                dependency_id: row.id,
                entity: depends_on,
                dependency_type: row.dependency_type,
                min_version: row.min_version,
                max_version: row.max_version,
            });
        }
        Ok(views)
    }

    pub async fn list_events(
        &self,
        filter: EventListQuery,
        page: u64,
        page_size: u64,
    ) -> LibraryResult<Page<event::Model>> {
        store::events::list(&*self.db, filter, page, page_size).await
    }

    pub async fn declare_dependency(
        &self,
        entity_id: i32,
        req: CreateDependencyRequest,
    ) -> LibraryResult<DependencyView> {
        let created = store::dependencies::create(
            &*self.db,
            entity_id,
            req.depends_on_entity_id,
            req.dependency_type,
            req.min_version,
            req.max_version,
        )
        .await?;
        let depends_on = store::entities::get(&*self.db, created.depends_on_entity_id).await?;
        Ok(DependencyView {
            dependency_id: created.id,
            entity: depends_on,
            dependency_type: created.dependency_type,
            min_version: created.min_version,
            max_version: created.max_version,
        })
    }
}

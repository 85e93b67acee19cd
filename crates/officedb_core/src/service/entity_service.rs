//! Generic CRUD service shared by every entity type.

use super::ServiceResult;
use crate::model::id::ObjectId;
use crate::model::Entity;
use crate::query::filter::Filter;
use crate::repo::document_repo::{DocumentRepository, StoredDocument};
use std::marker::PhantomData;

/// Use-case service for entity `E` over repository `R`.
pub struct EntityService<E, R> {
    repo: R,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, R: DocumentRepository> EntityService<E, R> {
    /// Creates a service using the provided repository implementation.
    ///
    /// `repo` must address `E::COLLECTION`.
    pub fn new(repo: R) -> Self {
        debug_assert_eq!(repo.collection(), E::COLLECTION);
        Self {
            repo,
            _entity: PhantomData,
        }
    }

    /// Lists every entity; order is unspecified.
    pub fn list(&self) -> ServiceResult<Vec<E>> {
        decode_all(self.repo.find_all()?)
    }

    /// Gets one entity by its wire id.
    pub fn get(&self, id: &str) -> ServiceResult<E> {
        let id = ObjectId::parse_str(id)?;
        decode(self.repo.find_by_id(id)?)
    }

    /// Returns one arbitrary match for `filter`, or `NotFound`.
    pub fn find_one(&self, filter: &Filter) -> ServiceResult<E> {
        decode(self.repo.find_one(filter)?)
    }

    /// Returns every match for `filter`; order is unspecified.
    pub fn find_many(&self, filter: &Filter) -> ServiceResult<Vec<E>> {
        decode_all(self.repo.find_many(filter)?)
    }

    /// Stores a new entity and returns its assigned id. `entity.id` is ignored.
    pub fn create(&self, entity: &E) -> ServiceResult<ObjectId> {
        entity.validate()?;
        Ok(self.repo.insert(&entity.to_document())?)
    }

    /// Overwrites every updatable field of entity `id` with `entity`'s values.
    pub fn update(&self, id: &str, entity: &E) -> ServiceResult<bool> {
        entity.validate()?;
        let id = ObjectId::parse_str(id)?;
        Ok(self.repo.update(id, &entity.to_update_document())?)
    }

    /// Removes entity `id`.
    pub fn delete(&self, id: &str) -> ServiceResult<bool> {
        let id = ObjectId::parse_str(id)?;
        Ok(self.repo.delete(id)?)
    }
}

fn decode<E: Entity>(stored: StoredDocument) -> ServiceResult<E> {
    Ok(E::from_document(stored.id, stored.body)?)
}

fn decode_all<E: Entity>(stored: Vec<StoredDocument>) -> ServiceResult<Vec<E>> {
    stored.into_iter().map(decode::<E>).collect()
}

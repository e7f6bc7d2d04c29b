//! Category service
//!
//! Category names are unique case-insensitively. There is no delete; stale
//! categories are deactivated through update.

use std::sync::Arc;

use gig_core::traits::Id;
use gig_db::{CategoryStore, CreateCategoryDto, UpdateCategoryDto};
use gig_models::Category;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateCategory {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryStore>) -> Self {
        Self { categories }
    }

    pub async fn create(&self, input: NewCategory) -> ServiceResult<Category> {
        if self.categories.exists_by_name(&input.name, None).await? {
            return Err(ServiceError::conflict("Category name already exists"));
        }

        let category = self
            .categories
            .create(CreateCategoryDto {
                name: input.name,
                description: input.description,
            })
            .await?;

        info!(category_id = category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub async fn get(&self, id: Id) -> ServiceResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", id))
    }

    pub async fn list(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.categories.find_all().await?)
    }

    pub async fn update(&self, id: Id, input: UpdateCategory) -> ServiceResult<Category> {
        self.get(id).await?;

        if self
            .categories
            .exists_by_name(&input.name, Some(id))
            .await?
        {
            return Err(ServiceError::bad_request(
                "Another category with the same name exists",
            ));
        }

        let updated = self
            .categories
            .update(
                id,
                UpdateCategoryDto {
                    name: input.name,
                    description: input.description,
                    is_active: input.is_active,
                },
            )
            .await?;

        info!(category_id = id, "category updated");
        Ok(updated)
    }
}

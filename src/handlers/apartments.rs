use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use mongodb::bson::{doc, Document};
use serde::Deserialize;

use crate::error::ApiError;
use crate::store::models::Apartment;
use crate::store::repo::{DeleteReceipt, UpdateReceipt};
use crate::store::Store;

/// Partial update body; only the provided fields reach the store.
#[derive(Debug, Deserialize)]
pub struct ApartmentPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl ApartmentPatch {
    fn set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("name", name);
        }
        if let Some(category) = &self.category {
            set.insert("category", category);
        }
        if let Some(price) = self.price {
            set.insert("price", price);
        }
        if let Some(description) = &self.description {
            set.insert("description", description);
        }
        if let Some(image) = &self.image {
            set.insert("image", image);
        }
        set
    }
}

/// GET /apartment - List the full catalog
pub async fn list(Extension(store): Extension<Store>) -> Result<Json<Vec<Apartment>>, ApiError> {
    let apartments = store.apartments().find_any(doc! {}).await?;
    Ok(Json(apartments))
}

/// GET /apartment/:id - Fetch one listing
pub async fn get(
    Extension(store): Extension<Store>,
    Path(id): Path<String>,
) -> Result<Json<Apartment>, ApiError> {
    let apartment = store
        .apartments()
        .find_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("apartment not found"))?;
    Ok(Json(apartment))
}

/// POST /apartment - Add a listing to the catalog
pub async fn create(
    Extension(store): Extension<Store>,
    Json(mut apartment): Json<Apartment>,
) -> Result<Response, ApiError> {
    apartment.id = None;

    let receipt = store.apartments().insert_one(&apartment).await?;
    Ok((StatusCode::CREATED, Json(receipt)).into_response())
}

/// PATCH /apartment/:id - Update the provided fields only
pub async fn update(
    Extension(store): Extension<Store>,
    Path(id): Path<String>,
    Json(patch): Json<ApartmentPatch>,
) -> Result<Json<UpdateReceipt>, ApiError> {
    let set = patch.set_document();
    if set.is_empty() {
        return Err(ApiError::bad_request("no fields to update"));
    }

    let receipt = store.apartments().update_id(&id, set).await?;
    Ok(Json(receipt))
}

/// DELETE /apartment/:id - Remove a listing
pub async fn remove(
    Extension(store): Extension<Store>,
    Path(id): Path<String>,
) -> Result<Json<DeleteReceipt>, ApiError> {
    let receipt = store.apartments().delete_id(&id).await?;
    Ok(Json(receipt))
}

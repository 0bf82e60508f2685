use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::{
    adapters::inbound::http::{
        dto::{ErrorResponseDto, ItemDto, error_response},
        router::AppState,
    },
    domain::{
        errors::{ItemError, ItemResult},
        models::{ImageUpload, ItemChanges, NewItemFields},
        value_objects::ItemId,
    },
};

/// Fields extracted from the multipart item form.
#[derive(Default)]
struct ItemForm {
    title: Option<String>,
    description: Option<String>,
    image: Option<ImageUpload>,
}

/// Read the multipart form shared by the create and update endpoints:
/// `title`, `description`, optional `image` file.
async fn read_item_form(mut multipart: Multipart) -> ItemResult<ItemForm> {
    let mut form = ItemForm::default();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("title") => {
                form.title = Some(field.text().await.map_err(form_error)?);
            }
            Some("description") => {
                form.description = Some(field.text().await.map_err(form_error)?);
            }
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(form_error)?;

                // Browsers submit an empty image part when no file was
                // chosen; that counts as no upload.
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }

                form.image = Some(ImageUpload::new(file_name, content_type, data)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn form_error(error: axum::extract::multipart::MultipartError) -> ItemError {
    ItemError::UploadRejected {
        reason: format!("Could not read form data: {}", error.body_text()),
    }
}

/// `GET /api/items`
pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemDto>>, (StatusCode, Json<ErrorResponseDto>)> {
    let items = state
        .item_service
        .list_items()
        .await
        .map_err(error_response)?;

    Ok(Json(items.into_iter().map(ItemDto::from).collect()))
}

/// `GET /api/items/{id}`
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemDto>, (StatusCode, Json<ErrorResponseDto>)> {
    let id = ItemId::parse(&id).map_err(error_response)?;

    let item = state
        .item_service
        .get_item(&id)
        .await
        .map_err(error_response)?;

    Ok(Json(item.into()))
}

/// `POST /api/items` (multipart form)
pub async fn create_item(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ItemDto>), (StatusCode, Json<ErrorResponseDto>)> {
    let form = read_item_form(multipart).await.map_err(error_response)?;

    // Missing text fields fall through as empty strings so validation
    // reports them alongside any other violated rules.
    let fields = NewItemFields {
        title: form.title.unwrap_or_default(),
        description: form.description.unwrap_or_default(),
    };

    let item = state
        .item_service
        .create_item(fields, form.image)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// `PUT /api/items/{id}` (multipart form)
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<ItemDto>, (StatusCode, Json<ErrorResponseDto>)> {
    let id = ItemId::parse(&id).map_err(error_response)?;
    let form = read_item_form(multipart).await.map_err(error_response)?;

    let changes = ItemChanges {
        title: form.title,
        description: form.description,
        image_locator: None,
    };

    let item = state
        .item_service
        .update_item(&id, changes, form.image)
        .await
        .map_err(error_response)?;

    Ok(Json(item.into()))
}

/// `DELETE /api/items/{id}`
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponseDto>)> {
    let id = ItemId::parse(&id).map_err(error_response)?;

    state
        .item_service
        .delete_item(&id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

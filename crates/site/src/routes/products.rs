//! Product route handlers.
//!
//! The feed, the seller's own listings, the add-product form (multipart,
//! with image upload) and the product detail page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use uuid::Uuid;

use bazaar_core::{Price, ProductId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{Flash, RequireAuth, TakeFlash, push_flash};
use crate::models::Product;
use crate::state::AppState;

/// Maximum length of a product title.
const MAX_TITLE_LENGTH: usize = 200;

/// File extensions accepted for product images.
const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

// =============================================================================
// View Types
// =============================================================================

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub seller: String,
    pub image_url: Option<String>,
    pub listed: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price,
            seller: product.seller.to_string(),
            image_url: product.image_path.as_ref().map(|p| format!("/media/{p}")),
            listed: product.created_at.format("%b %e, %Y").to_string(),
        }
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// An uploaded image file, as received from the multipart form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Raw add-product form values, before validation.
#[derive(Debug, Default, Clone)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: Option<UploadedImage>,
}

/// Field-level add-product errors.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProductFormErrors {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl ProductFormErrors {
    /// True if no field has an error.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Feed page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/feed.html")]
pub struct FeedTemplate {
    pub products: Vec<ProductView>,
    pub flash: Option<Flash>,
}

/// My-listings page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/mine.html")]
pub struct MyListingsTemplate {
    pub products: Vec<ProductView>,
    pub flash: Option<Flash>,
}

/// Add-product page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/new.html")]
pub struct NewProductTemplate {
    pub title: String,
    pub description: String,
    pub price: String,
    pub errors: ProductFormErrors,
    pub flash: Option<Flash>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub flash: Option<Flash>,
}

// =============================================================================
// Validation
// =============================================================================

/// The lowercased extension of an accepted image file name, if any.
fn image_extension(file_name: &str) -> Option<String> {
    let ext = std::path::Path::new(file_name)
        .extension()?
        .to_str()?
        .to_lowercase();

    ALLOWED_IMAGE_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

/// Validate an add-product form, returning field-level errors.
fn validate_product_form(form: &ProductForm) -> ProductFormErrors {
    let mut errors = ProductFormErrors::default();

    if form.title.trim().is_empty() {
        errors.title = Some("Title is required.".to_string());
    } else if form.title.len() > MAX_TITLE_LENGTH {
        errors.title = Some(format!("Title must be at most {MAX_TITLE_LENGTH} characters."));
    }

    if form.description.trim().is_empty() {
        errors.description = Some("Description is required.".to_string());
    }

    if let Err(e) = Price::parse(&form.price) {
        errors.price = Some(e.to_string());
    }

    match &form.image {
        None => errors.image = Some("An image is required.".to_string()),
        Some(image) => {
            if image_extension(&image.file_name).is_none() {
                errors.image = Some(
                    "Unsupported image type. Use png, jpg, jpeg, gif or webp.".to_string(),
                );
            }
        }
    }

    errors
}

/// Read the add-product multipart form into a [`ProductForm`].
async fn read_product_form(multipart: &mut Multipart) -> Result<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart form: {e}")))?
    {
        let name = field.name().map(ToOwned::to_owned);
        match name.as_deref() {
            Some("title") => {
                form.title = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid title field: {e}")))?;
            }
            Some("description") => {
                form.description = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid description field: {e}")))?;
            }
            Some("price") => {
                form.price = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid price field: {e}")))?;
            }
            Some("image") => {
                let file_name = field.file_name().map(ToOwned::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid image upload: {e}")))?;

                // Browsers submit an empty part when no file was chosen.
                if let Some(file_name) = file_name
                    && !bytes.is_empty()
                {
                    form.image = Some(UploadedImage { file_name, bytes });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

// =============================================================================
// Routes
// =============================================================================

/// Display the feed: all products across all sellers, newest first.
pub async fn feed(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    TakeFlash(flash): TakeFlash,
) -> Result<Response> {
    let products = crate::db::ProductRepository::new(state.pool())
        .list_all()
        .await?;

    Ok(FeedTemplate {
        products: products.iter().map(Into::into).collect(),
        flash,
    }
    .into_response())
}

/// Display the current user's own listings, newest first.
pub async fn my_listings(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    TakeFlash(flash): TakeFlash,
) -> Result<Response> {
    let products = crate::db::ProductRepository::new(state.pool())
        .list_by_seller(user.id)
        .await?;

    Ok(MyListingsTemplate {
        products: products.iter().map(Into::into).collect(),
        flash,
    }
    .into_response())
}

/// Display a single product.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    TakeFlash(flash): TakeFlash,
    Path(product_id): Path<i32>,
) -> Result<Response> {
    let product = crate::db::ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(product_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    Ok(ProductShowTemplate {
        product: ProductView::from(&product),
        flash,
    }
    .into_response())
}

/// Display the add-product form.
pub async fn new_product(
    RequireAuth(_user): RequireAuth,
    TakeFlash(flash): TakeFlash,
) -> Response {
    NewProductTemplate {
        title: String::new(),
        description: String::new(),
        price: String::new(),
        errors: ProductFormErrors::default(),
        flash,
    }
    .into_response()
}

/// Handle add-product form submission.
///
/// On valid submission saves the uploaded image under the media directory,
/// persists the product attributed to the current user and redirects to
/// the feed. On invalid submission re-renders the form with field errors
/// and the submitted values; nothing is saved.
pub async fn create_product(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    mut multipart: Multipart,
) -> Result<Response> {
    let form = read_product_form(&mut multipart).await?;

    let errors = validate_product_form(&form);
    if !errors.is_empty() {
        return Ok(NewProductTemplate {
            title: form.title,
            description: form.description,
            price: form.price,
            errors,
            flash: None,
        }
        .into_response());
    }

    // Validation passed; these cannot fail below.
    let price = Price::parse(&form.price).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let image = form
        .image
        .ok_or_else(|| AppError::BadRequest("an image is required".to_string()))?;
    let extension = image_extension(&image.file_name)
        .ok_or_else(|| AppError::BadRequest("unsupported image type".to_string()))?;

    // Store the upload under a generated name; the original file name is
    // untrusted and only its extension survives.
    let stored_name = format!("{}.{extension}", Uuid::new_v4());
    let stored_path = state.config().media_dir.join(&stored_name);
    tokio::fs::write(&stored_path, &image.bytes)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store image: {e}")))?;

    let product_id = crate::db::ProductRepository::new(state.pool())
        .create(
            user.id,
            form.title.trim(),
            form.description.trim(),
            price,
            Some(&stored_name),
        )
        .await?;

    tracing::info!(%product_id, seller = %user.username, "product listed");
    push_flash(&session, Flash::success("Product added successfully!")).await?;

    Ok(Redirect::to("/").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, description: &str, price: &str, image_name: Option<&str>) -> ProductForm {
        ProductForm {
            title: title.to_string(),
            description: description.to_string(),
            price: price.to_string(),
            image: image_name.map(|name| UploadedImage {
                file_name: name.to_string(),
                bytes: Bytes::from_static(b"\x89PNG"),
            }),
        }
    }

    #[test]
    fn test_valid_form() {
        let errors = validate_product_form(&form("Lamp", "A nice lamp", "19.99", Some("lamp.png")));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_title_required() {
        let errors = validate_product_form(&form("  ", "desc", "19.99", Some("a.png")));
        assert!(errors.title.is_some());
    }

    #[test]
    fn test_title_too_long() {
        let long = "x".repeat(201);
        let errors = validate_product_form(&form(&long, "desc", "19.99", Some("a.png")));
        assert!(errors.title.is_some());
    }

    #[test]
    fn test_description_required() {
        let errors = validate_product_form(&form("Lamp", "", "19.99", Some("a.png")));
        assert!(errors.description.is_some());
    }

    #[test]
    fn test_price_must_be_positive_decimal() {
        assert!(validate_product_form(&form("Lamp", "d", "free", Some("a.png")))
            .price
            .is_some());
        assert!(validate_product_form(&form("Lamp", "d", "0", Some("a.png")))
            .price
            .is_some());
        assert!(validate_product_form(&form("Lamp", "d", "1.999", Some("a.png")))
            .price
            .is_some());
    }

    #[test]
    fn test_image_required() {
        let errors = validate_product_form(&form("Lamp", "desc", "19.99", None));
        assert!(errors.image.is_some());
    }

    #[test]
    fn test_image_extension_whitelist() {
        assert_eq!(image_extension("photo.PNG").as_deref(), Some("png"));
        assert_eq!(image_extension("photo.jpeg").as_deref(), Some("jpeg"));
        assert!(image_extension("malware.exe").is_none());
        assert!(image_extension("no_extension").is_none());
    }
}

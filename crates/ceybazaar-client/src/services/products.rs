use std::path::Path;

use reqwest::multipart::{Form, Part};

use ceybazaar_core::Envelope;
use ceybazaar_core::model::{Category, NewCategory, NewProduct, Product};

use crate::error::ApiError;
use crate::transport::ApiClient;

/// An image file attached to a product submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read an image from disk, guessing its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = std::fs::read(path).map_err(|e| {
            ApiError::InvalidRequest(format!("Cannot read image {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            mime: guess_mime(&file_name).to_string(),
            file_name,
            bytes,
        })
    }

    fn into_part(self) -> Result<Part, ApiError> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?)
    }
}

fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Product metadata plus its images.
#[derive(Debug, Clone)]
pub struct ProductSubmission {
    pub product: NewProduct,
    pub image: Option<ImageUpload>,
    pub additional_images: Vec<ImageUpload>,
}

impl ProductSubmission {
    /// Multipart body: `productDTO` JSON part, `imageFile`, then `additionalImages`.
    fn into_form(self) -> Result<Form, ApiError> {
        let image = self
            .image
            .ok_or_else(|| ApiError::InvalidRequest("Main image is required".into()))?;

        let dto = serde_json::to_string(&self.product).map_err(|e| {
            ApiError::InvalidRequest(format!("Cannot encode product metadata: {e}"))
        })?;
        let mut form = Form::new()
            .part("productDTO", Part::text(dto).mime_str("application/json")?)
            .part("imageFile", image.into_part()?);
        for extra in self.additional_images {
            form = form.part("additionalImages", extra.into_part()?);
        }
        Ok(form)
    }
}

/// `Products/*` endpoints: categories and products.
#[derive(Debug, Clone)]
pub struct ProductService {
    api: ApiClient,
}

impl ProductService {
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_categories(&self) -> Result<Envelope<Vec<Category>>, ApiError> {
        self.api.get("/Products/ViewProductCatList", &[]).await
    }

    pub async fn create_category(
        &self,
        category: &NewCategory,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.api.post_json("/Products/NewProductCat", category).await
    }

    pub async fn list_products(&self) -> Result<Envelope<Vec<Product>>, ApiError> {
        self.api.get("/Products/ViewProductList", &[]).await
    }

    /// Submit a product as multipart. Fails locally, before any request,
    /// when the main image is missing.
    pub async fn create_product(
        &self,
        submission: ProductSubmission,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        let form = submission.into_form()?;
        self.api.post_multipart("/Products/NewProduct", form).await
    }
}

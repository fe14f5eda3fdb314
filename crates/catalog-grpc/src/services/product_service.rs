//! Product gRPC service implementation.

use crate::proto::product;
use catalog_core::{CatalogError, ErrorKind, Product, ProductDigest, ProductDraft, ProductId, ValidateExt};
use catalog_service::ProductService;
use std::sync::Arc;
use tonic::{Request, Response, Status};
use tracing::{debug, error, warn};

/// Returned when a create or update payload is incomplete.
pub const INVALID_PRODUCT_MESSAGE: &str =
    "name, price and description are required, price must be greater than 0";

/// Returned when a request carries no product id.
pub const MISSING_ID_MESSAGE: &str = "id is required";

/// Generic message for every internal failure; details stay in the log.
pub const INTERNAL_MESSAGE: &str = "internal error";

/// Product gRPC service implementation.
pub struct ProductGrpcService {
    product_service: Arc<dyn ProductService>,
}

impl ProductGrpcService {
    /// Creates a new product gRPC service.
    pub fn new(product_service: Arc<dyn ProductService>) -> Self {
        Self { product_service }
    }
}

#[tonic::async_trait]
impl product::product_service_server::ProductService for ProductGrpcService {
    async fn create(
        &self,
        request: Request<product::ProductInput>,
    ) -> Result<Response<product::ProductIdResponse>, Status> {
        let req = request.into_inner();
        debug!("gRPC Create: {}", req.name);

        let draft = parse_draft(Some(req))?;

        let id = self
            .product_service
            .create(draft)
            .await
            .map_err(to_status)?;

        Ok(Response::new(product::ProductIdResponse {
            id: id.into_inner(),
        }))
    }

    async fn get(
        &self,
        request: Request<product::ProductIdRequest>,
    ) -> Result<Response<product::Product>, Status> {
        let req = request.into_inner();
        debug!("gRPC Get: {}", req.id);

        let id = parse_product_id(req.id)?;

        let found = self.product_service.get(&id).await.map_err(to_status)?;

        Ok(Response::new(to_proto_product(&found)))
    }

    async fn get_all(
        &self,
        _request: Request<product::Empty>,
    ) -> Result<Response<product::GetAllResponse>, Status> {
        debug!("gRPC GetAll");

        let digests = self.product_service.get_all().await.map_err(to_status)?;

        Ok(Response::new(product::GetAllResponse {
            products: digests.iter().map(to_proto_digest).collect(),
        }))
    }

    async fn update(
        &self,
        request: Request<product::UpdateRequest>,
    ) -> Result<Response<product::Empty>, Status> {
        let req = request.into_inner();
        debug!("gRPC Update: {}", req.id);

        let id = parse_product_id(req.id)?;
        let draft = parse_draft(req.product)?;

        self.product_service
            .update(&id, draft)
            .await
            .map_err(to_status)?;

        Ok(Response::new(product::Empty {}))
    }

    async fn delete(
        &self,
        request: Request<product::ProductIdRequest>,
    ) -> Result<Response<product::Empty>, Status> {
        let req = request.into_inner();
        debug!("gRPC Delete: {}", req.id);

        let id = parse_product_id(req.id)?;

        self.product_service.delete(&id).await.map_err(to_status)?;

        Ok(Response::new(product::Empty {}))
    }
}

// Helper functions

fn parse_product_id(id: String) -> Result<ProductId, Status> {
    let id = ProductId::new(id);
    if id.is_empty() {
        return Err(Status::invalid_argument(MISSING_ID_MESSAGE));
    }
    Ok(id)
}

fn parse_draft(input: Option<product::ProductInput>) -> Result<ProductDraft, Status> {
    let input = input.ok_or_else(|| Status::invalid_argument(INVALID_PRODUCT_MESSAGE))?;
    let draft = ProductDraft::new(input.name, input.price, input.description);

    draft.validate_request().map_err(|e| {
        debug!(error = %e, "Rejected product payload");
        Status::invalid_argument(INVALID_PRODUCT_MESSAGE)
    })?;

    Ok(draft)
}

/// Maps a catalog error onto a gRPC status by kind.
///
/// Internal failures are logged with their context and replaced by a
/// generic message.
pub fn to_status(err: CatalogError) -> Status {
    match err.kind() {
        ErrorKind::NotFound => {
            warn!("gRPC not found: {}", err);
            Status::not_found(err.to_string())
        }
        ErrorKind::AlreadyExists => {
            warn!("gRPC conflict: {}", err);
            Status::already_exists(err.to_string())
        }
        ErrorKind::Internal => {
            match err.context() {
                Some(context) => error!(error = %err, context = %context, "gRPC internal error"),
                None => error!(error = %err, "gRPC internal error"),
            }
            Status::internal(INTERNAL_MESSAGE)
        }
    }
}

fn to_proto_product(found: &Product) -> product::Product {
    product::Product {
        id: found.id.to_string(),
        name: found.name.clone(),
        price: found.price,
        description: found.description.clone(),
        created_at: found.created_at.timestamp(),
    }
}

fn to_proto_digest(digest: &ProductDigest) -> product::ProductDigest {
    product::ProductDigest {
        id: digest.id.to_string(),
        name: digest.name.clone(),
        price: digest.price,
    }
}

//! Remote product service client via gRPC.

use crate::proto::product;
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, Product, ProductDigest, ProductDraft, ProductId};
use catalog_service::ProductService;
use chrono::{DateTime, Utc};
use tonic::transport::Channel;
use tonic::{Code, Status};
use tracing::debug;

type Stub = product::product_service_client::ProductServiceClient<Channel>;

/// Remote product service that talks to a catalog server over gRPC.
///
/// Statuses are turned back into [`CatalogError`]s, so callers see the
/// same kinds as an in-process [`ProductService`].
#[derive(Debug, Clone)]
pub struct ProductGrpcClient {
    client: Stub,
}

impl ProductGrpcClient {
    /// Connects to a catalog server, e.g. `http://127.0.0.1:9090`.
    pub async fn connect(addr: &str) -> CatalogResult<Self> {
        let client = Stub::connect(addr.to_string()).await.map_err(|e| {
            CatalogError::Transport(format!("Failed to connect to product service: {e}"))
        })?;

        Ok(Self { client })
    }

    /// Creates from an existing channel.
    #[must_use]
    pub fn from_channel(channel: Channel) -> Self {
        Self {
            client: Stub::new(channel),
        }
    }
}

#[async_trait]
impl ProductService for ProductGrpcClient {
    async fn create(&self, draft: ProductDraft) -> CatalogResult<ProductId> {
        debug!("Remote Create: {}", draft.name);

        let name = draft.name.clone();
        let response = self
            .client
            .clone()
            .create(to_proto_input(draft))
            .await
            .map_err(|s| map_grpc_error(s, &name))?;

        Ok(ProductId::new(response.into_inner().id))
    }

    async fn get(&self, id: &ProductId) -> CatalogResult<Product> {
        debug!("Remote Get: {}", id);

        let response = self
            .client
            .clone()
            .get(product::ProductIdRequest { id: id.to_string() })
            .await
            .map_err(|s| map_grpc_error(s, id.as_str()))?;

        from_proto_product(response.into_inner())
    }

    async fn get_all(&self) -> CatalogResult<Vec<ProductDigest>> {
        debug!("Remote GetAll");

        let response = self
            .client
            .clone()
            .get_all(product::Empty {})
            .await
            .map_err(|s| map_grpc_error(s, "all"))?;

        Ok(response
            .into_inner()
            .products
            .into_iter()
            .map(|p| ProductDigest {
                id: ProductId::new(p.id),
                name: p.name,
                price: p.price,
            })
            .collect())
    }

    async fn update(&self, id: &ProductId, draft: ProductDraft) -> CatalogResult<()> {
        debug!("Remote Update: {}", id);

        let name = draft.name.clone();
        self.client
            .clone()
            .update(product::UpdateRequest {
                id: id.to_string(),
                product: Some(to_proto_input(draft)),
            })
            .await
            .map_err(|s| match s.code() {
                Code::AlreadyExists => map_grpc_error(s, &name),
                _ => map_grpc_error(s, id.as_str()),
            })?;

        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
        debug!("Remote Delete: {}", id);

        self.client
            .clone()
            .delete(product::ProductIdRequest { id: id.to_string() })
            .await
            .map_err(|s| map_grpc_error(s, id.as_str()))?;

        Ok(())
    }
}

fn to_proto_input(draft: ProductDraft) -> product::ProductInput {
    product::ProductInput {
        name: draft.name,
        price: draft.price,
        description: draft.description,
    }
}

fn from_proto_product(p: product::Product) -> CatalogResult<Product> {
    let created_at: DateTime<Utc> = DateTime::from_timestamp(p.created_at, 0).ok_or_else(|| {
        CatalogError::Transport(format!("Invalid created_at timestamp: {}", p.created_at))
    })?;

    Ok(Product {
        id: ProductId::new(p.id),
        name: p.name,
        price: p.price,
        description: p.description,
        created_at,
    })
}

/// Maps a gRPC status back onto the catalog taxonomy.
///
/// `subject` is the product id for `NOT_FOUND` and the product name for
/// `ALREADY_EXISTS`.
pub fn map_grpc_error(status: Status, subject: &str) -> CatalogError {
    match status.code() {
        Code::NotFound => CatalogError::not_found("product", subject),
        Code::AlreadyExists => CatalogError::already_exists(subject),
        Code::InvalidArgument => CatalogError::validation(status.message()),
        Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled => {
            CatalogError::Transport(status.to_string())
        }
        _ => CatalogError::internal(status.message()),
    }
}

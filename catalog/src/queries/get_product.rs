use crate::models::product::Product;
use crate::services::product_store::SharedProductStore;
use mediator::{Request, RequestHandler};

pub struct GetProductQuery(pub String);
impl Request<anyhow::Result<Option<Product>>> for GetProductQuery {}

pub struct GetProductRequestHandler(pub SharedProductStore);
impl RequestHandler<GetProductQuery, anyhow::Result<Option<Product>>> for GetProductRequestHandler {
    fn handle(&self, query: GetProductQuery) -> anyhow::Result<Option<Product>> {
        self.0.get(query.0)
    }
}

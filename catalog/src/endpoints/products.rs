use crate::commands::CreateProductCommand;
use crate::error::ApiError;
use crate::queries::GetProductQuery;
use actix_web::http::header;
use actix_web::web::{self, Data, Json};
use actix_web::{get, post, HttpResponse};
use mediator::{DefaultMediator, Mediator};

/// Maps every body that fails to deserialize into a create command to the
/// same 400 response, whatever the underlying parse error was. The body is
/// parsed as JSON whatever `Content-Type` the client sent.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            log::debug!("Rejected product payload: {}", err);
            ApiError::InvalidInput.into()
        })
}

#[post("/products")]
pub async fn create(
    mediator: Data<DefaultMediator>,
    body: Json<CreateProductCommand>,
) -> Result<HttpResponse, ApiError> {
    let command = body.into_inner();
    command.validate()?;

    let product = mediator.send(command)??;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/products/{}", product.id)))
        .json(product))
}

#[get("/products/{id}")]
pub async fn get(path: web::Path<String>, mediator: Data<DefaultMediator>) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    match mediator.send(GetProductQuery(id))?? {
        Some(product) => Ok(HttpResponse::Ok().json(product)),
        None => Err(ApiError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::endpoints::configure;
    use crate::error::ErrorBody;
    use crate::services::product_store::{ProductStore, SharedProductStore};
    use actix_web::http::{header, StatusCode};
    use actix_web::{middleware, test, App};
    use serde_json::{json, Value};
    use std::collections::HashSet;
    use std::sync::Arc;

    const INVALID_INPUT: &str = "Invalid input. Name, Price, and Quantity are required fields.";
    const INVALID_VALUES: &str = "Price must be positive, and Quantity cannot be negative.";

    macro_rules! init_app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .wrap(middleware::NormalizePath::trim())
                    .configure(configure(
                        crate::create_mediator_service(&$store),
                        Config::default(),
                    )),
            )
            .await
        };
    }

    fn new_store() -> SharedProductStore {
        Arc::new(ProductStore::new())
    }

    fn post_product(body: Value) -> test::TestRequest {
        test::TestRequest::post().uri("/products").set_json(body)
    }

    #[actix_web::test]
    async fn create_then_get_round_trip() {
        let store = new_store();
        let app = init_app!(store);

        let res = test::call_service(
            &app,
            post_product(json!({"name": "Widget", "price": 9.99, "quantity": 5})).to_request(),
        )
        .await;
        assert_eq!(StatusCode::CREATED, res.status());
        assert_eq!(
            "/products/1",
            res.headers().get(header::LOCATION).unwrap().to_str().unwrap()
        );

        let expected = json!({"id": "1", "name": "Widget", "price": 9.99, "quantity": 5});
        let created: Value = test::read_body_json(res).await;
        assert_eq!(expected, created);

        let req = test::TestRequest::get().uri("/products/1").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(StatusCode::OK, res.status());
        let fetched: Value = test::read_body_json(res).await;
        assert_eq!(expected, fetched);

        let req = test::TestRequest::get().uri("/products/999").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(StatusCode::NOT_FOUND, res.status());
        let body: ErrorBody = test::read_body_json(res).await;
        assert_eq!(ErrorBody::new("Product not found"), body);
    }

    #[actix_web::test]
    async fn ids_are_unique_and_sequential() {
        let store = new_store();
        let app = init_app!(store);

        for expected_id in ["1", "2", "3"] {
            let res = test::call_service(
                &app,
                post_product(json!({"name": "Gadget", "price": 2.5, "quantity": 0})).to_request(),
            )
            .await;
            assert_eq!(StatusCode::CREATED, res.status());
            let created: Value = test::read_body_json(res).await;
            assert_eq!(expected_id, created["id"]);
        }

        assert_eq!(3, store.len().unwrap());
    }

    #[actix_web::test]
    async fn missing_fields_are_rejected() {
        let store = new_store();
        let app = init_app!(store);

        for body in [
            json!({"price": 9.99, "quantity": 5}),
            json!({"name": "Widget", "quantity": 5}),
            json!({"name": "Widget", "price": 9.99}),
            json!({}),
        ] {
            let res = test::call_service(&app, post_product(body).to_request()).await;
            assert_eq!(StatusCode::BAD_REQUEST, res.status());
            let err: ErrorBody = test::read_body_json(res).await;
            assert_eq!(ErrorBody::new(INVALID_INPUT), err);
        }

        assert_eq!(0, store.len().unwrap());
    }

    #[actix_web::test]
    async fn wrong_types_are_rejected() {
        let store = new_store();
        let app = init_app!(store);

        for body in [
            json!({"name": "Widget", "price": "9.99", "quantity": 5}),
            json!({"name": "Widget", "price": 9.99, "quantity": "five"}),
            json!({"name": "Widget", "price": 9.99, "quantity": 1.5}),
            json!({"name": 42, "price": 9.99, "quantity": 5}),
            json!({"name": null, "price": 9.99, "quantity": 5}),
            json!({"name": "", "price": 9.99, "quantity": 5}),
        ] {
            let res = test::call_service(&app, post_product(body).to_request()).await;
            assert_eq!(StatusCode::BAD_REQUEST, res.status());
            let err: ErrorBody = test::read_body_json(res).await;
            assert_eq!(ErrorBody::new(INVALID_INPUT), err);
        }

        assert_eq!(0, store.len().unwrap());
    }

    #[actix_web::test]
    async fn malformed_payloads_are_rejected() {
        let store = new_store();
        let app = init_app!(store);

        let req = test::TestRequest::post()
            .uri("/products")
            .insert_header(header::ContentType::json())
            .set_payload("{\"name\": \"Widget\",")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
        let err: ErrorBody = test::read_body_json(res).await;
        assert_eq!(ErrorBody::new(INVALID_INPUT), err);

        let req = test::TestRequest::post()
            .uri("/products")
            .insert_header(header::ContentType::plaintext())
            .set_payload("name=Widget")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
        let err: ErrorBody = test::read_body_json(res).await;
        assert_eq!(ErrorBody::new(INVALID_INPUT), err);

        assert_eq!(0, store.len().unwrap());
    }

    #[actix_web::test]
    async fn json_body_is_accepted_without_json_content_type() {
        let store = new_store();
        let app = init_app!(store);
        let body = r#"{"name":"Widget","price":9.99,"quantity":5}"#;

        let req = test::TestRequest::post()
            .uri("/products")
            .set_payload(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(StatusCode::CREATED, res.status());

        let req = test::TestRequest::post()
            .uri("/products")
            .insert_header(header::ContentType::plaintext())
            .set_payload(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(StatusCode::CREATED, res.status());
        let created: Value = test::read_body_json(res).await;
        assert_eq!(json!({"id": "2", "name": "Widget", "price": 9.99, "quantity": 5}), created);

        assert_eq!(2, store.len().unwrap());
    }

    #[actix_web::test]
    async fn out_of_range_values_are_rejected() {
        let store = new_store();
        let app = init_app!(store);

        for body in [
            json!({"name": "Widget", "price": 0, "quantity": 5}),
            json!({"name": "Widget", "price": -3.5, "quantity": 5}),
            json!({"name": "Widget", "price": 9.99, "quantity": -1}),
        ] {
            let res = test::call_service(&app, post_product(body).to_request()).await;
            assert_eq!(StatusCode::BAD_REQUEST, res.status());
            let err: ErrorBody = test::read_body_json(res).await;
            assert_eq!(ErrorBody::new(INVALID_VALUES), err);
        }

        assert_eq!(0, store.len().unwrap());
    }

    #[actix_web::test]
    async fn failed_create_does_not_consume_an_id() {
        let store = new_store();
        let app = init_app!(store);

        let res = test::call_service(
            &app,
            post_product(json!({"name": "Widget", "price": -1, "quantity": 5})).to_request(),
        )
        .await;
        assert_eq!(StatusCode::BAD_REQUEST, res.status());

        let res = test::call_service(
            &app,
            post_product(json!({"name": "Widget", "price": 1, "quantity": 5})).to_request(),
        )
        .await;
        let created: Value = test::read_body_json(res).await;
        assert_eq!("1", created["id"]);
    }

    #[actix_web::test]
    async fn zero_quantity_is_accepted() {
        let store = new_store();
        let app = init_app!(store);

        let res = test::call_service(
            &app,
            post_product(json!({"name": "Sold out", "price": 1, "quantity": 0})).to_request(),
        )
        .await;
        assert_eq!(StatusCode::CREATED, res.status());
        let created: Value = test::read_body_json(res).await;
        assert_eq!(json!({"id": "1", "name": "Sold out", "price": 1.0, "quantity": 0}), created);
    }

    #[actix_web::test]
    async fn trailing_slash_is_trimmed() {
        let store = new_store();
        let app = init_app!(store);

        let req = test::TestRequest::post()
            .uri("/products/")
            .set_json(json!({"name": "Widget", "price": 9.99, "quantity": 5}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(StatusCode::CREATED, res.status());
    }

    #[actix_web::test]
    async fn unknown_id_is_not_found() {
        let store = new_store();
        let app = init_app!(store);

        for uri in ["/products/1", "/products/abc", "/products/0"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(StatusCode::NOT_FOUND, res.status());
            let err: ErrorBody = test::read_body_json(res).await;
            assert_eq!(ErrorBody::new("Product not found"), err);
        }
    }

    #[actix_web::test]
    async fn concurrent_creates_get_distinct_ids() {
        let store = new_store();
        let app = init_app!(store);

        let requests = (0..100).map(|i| {
            test::call_service(
                &app,
                post_product(json!({"name": format!("Product {i}"), "price": 1.25, "quantity": i})).to_request(),
            )
        });
        let responses = futures::future::join_all(requests).await;

        let mut ids = HashSet::new();
        for res in responses {
            assert_eq!(StatusCode::CREATED, res.status());
            let created: Value = test::read_body_json(res).await;
            ids.insert(created["id"].as_str().unwrap().to_owned());
        }

        assert_eq!(100, ids.len());
        assert_eq!(100, store.len().unwrap());

        for id in ids {
            let req = test::TestRequest::get()
                .uri(&format!("/products/{id}"))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(StatusCode::OK, res.status());
        }
    }
}

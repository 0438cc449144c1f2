use crate::{
    errors::ServiceError,
    handlers::{
        common::{created_response, map_json_rejection},
        AppState,
    },
    services::products::NewProduct,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

const REQUIRED_FIELDS: [&str; 5] = ["name", "sku", "price", "warehouse_id", "initial_quantity"];

/// Body of `POST /api/products`.
///
/// Every field is optional at the serde level so that absent fields can be
/// reported together instead of failing on the first one.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(max = 255, message = "Product name must be at most 255 characters"))]
    #[schema(example = "Widget")]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "SKU must be between 1 and 50 characters"))]
    #[schema(example = "WID-001")]
    pub sku: Option<String>,

    /// Decimal price, as a JSON number or a numeric string
    #[schema(value_type = Option<String>, example = "19.99")]
    pub price: Option<Value>,

    /// Integer id, as a JSON number or a numeric string
    #[schema(value_type = Option<i32>, example = 1)]
    pub warehouse_id: Option<Value>,

    /// Non-negative integer, as a JSON number or a numeric string
    #[schema(value_type = Option<i32>, example = 25)]
    pub initial_quantity: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProductResponse {
    #[schema(example = "Product created")]
    pub message: String,
    pub product_id: i32,
}

impl CreateProductRequest {
    fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.name.is_some(),
            self.sku.is_some(),
            self.price.as_ref().is_some_and(|p| !p.is_null()),
            self.warehouse_id.as_ref().is_some_and(|w| !w.is_null()),
            self.initial_quantity.as_ref().is_some_and(|q| !q.is_null()),
        ];
        REQUIRED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(field, _)| *field)
            .collect()
    }

    /// Checks presence, then field rules, then parses price and integers.
    pub fn into_new_product(self) -> Result<NewProduct, ServiceError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ServiceError::ValidationError(format!(
                "Missing fields: {}",
                missing.join(", ")
            )));
        }

        self.validate()?;

        match (
            self.name,
            self.sku,
            self.price,
            self.warehouse_id,
            self.initial_quantity,
        ) {
            (Some(name), Some(sku), Some(price), Some(warehouse_id), Some(initial_quantity)) => {
                let initial_quantity = parse_integer(&initial_quantity, "initial_quantity")?;
                if initial_quantity < 0 {
                    return Err(ServiceError::ValidationError(
                        "Initial quantity cannot be negative".to_string(),
                    ));
                }
                Ok(NewProduct {
                    name,
                    sku,
                    price: parse_price(&price)?,
                    warehouse_id: parse_integer(&warehouse_id, "warehouse_id")?,
                    initial_quantity,
                })
            }
            _ => Err(ServiceError::ValidationError(
                "Missing required fields".to_string(),
            )),
        }
    }
}

/// Parses a price given as a JSON number or string, rounded to cents
pub fn parse_price(raw: &Value) -> Result<Decimal, ServiceError> {
    let text = match raw {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(invalid_price()),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(|price| price.round_dp(2))
        .map_err(|_| invalid_price())
}

fn invalid_price() -> ServiceError {
    ServiceError::ValidationError("Invalid price".to_string())
}

/// Parses an integer given as a JSON number or string. Floats are accepted
/// only when they carry no fractional part.
pub fn parse_integer(raw: &Value, field: &str) -> Result<i32, ServiceError> {
    let value = match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    value
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| ServiceError::ValidationError(format!("Invalid {}", field)))
}

/// Create a product with its initial stock in one warehouse
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = CreateProductResponse,
            headers(
                ("X-Request-Id" = String, description = "Unique request id for tracing"),
            )
        ),
        (status = 400, description = "Missing or invalid fields", body = crate::errors::ErrorResponse),
        (status = 404, description = "Warehouse not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "SKU already exists", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let Json(request) = payload.map_err(map_json_rejection)?;
    let new_product = request.into_new_product()?;

    let product_id = state.services.products.create_product(new_product).await?;
    info!(product_id, "Product provisioned");

    Ok(created_response(CreateProductResponse {
        message: "Product created".to_string(),
        product_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn request(body: Value) -> CreateProductRequest {
        serde_json::from_value(body).unwrap()
    }

    fn validation_message(err: ServiceError) -> String {
        match err {
            ServiceError::ValidationError(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn lists_every_missing_field() {
        let err = request(json!({ "name": "Widget", "price": null }))
            .into_new_product()
            .unwrap_err();
        assert_eq!(
            validation_message(err),
            "Missing fields: sku, price, warehouse_id, initial_quantity"
        );
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = request(json!({
            "name": "Widget", "sku": "W-1", "price": 1, "warehouse_id": 1, "initial_quantity": -1
        }))
        .into_new_product()
        .unwrap_err();
        assert!(validation_message(err).contains("Initial quantity cannot be negative"));
    }

    #[test]
    fn overlong_sku_is_rejected() {
        let err = request(json!({
            "name": "Widget", "sku": "X".repeat(51), "price": 1, "warehouse_id": 1, "initial_quantity": 1
        }))
        .into_new_product()
        .unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));
    }

    #[test]
    fn price_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_price(&json!(19.99)).unwrap(), dec!(19.99));
        assert_eq!(parse_price(&json!("4.5")).unwrap(), dec!(4.50));
        assert_eq!(parse_price(&json!(3)).unwrap(), dec!(3));
        assert_eq!(parse_price(&json!("1.004")).unwrap(), dec!(1.00));
    }

    #[test]
    fn unparseable_price_is_rejected() {
        for raw in [json!("abc"), json!(true), json!([1])] {
            assert_eq!(validation_message(parse_price(&raw).unwrap_err()), "Invalid price");
        }
    }

    #[test]
    fn integers_accept_numbers_integral_floats_and_strings() {
        assert_eq!(parse_integer(&json!(5), "initial_quantity").unwrap(), 5);
        assert_eq!(parse_integer(&json!(5.0), "initial_quantity").unwrap(), 5);
        assert_eq!(parse_integer(&json!(" 7 "), "warehouse_id").unwrap(), 7);
        assert_eq!(parse_integer(&json!("-2"), "initial_quantity").unwrap(), -2);
    }

    #[test]
    fn non_integers_are_rejected() {
        for raw in [json!(5.5), json!("5.0"), json!("five"), json!(true), json!(4_000_000_000i64)] {
            assert_eq!(
                validation_message(parse_integer(&raw, "warehouse_id").unwrap_err()),
                "Invalid warehouse_id"
            );
        }
    }

    #[test]
    fn string_quantity_converts() {
        let product = request(json!({
            "name": "Widget", "sku": "W-2", "price": 1, "warehouse_id": "3", "initial_quantity": "5"
        }))
        .into_new_product()
        .unwrap();
        assert_eq!(product.warehouse_id, 3);
        assert_eq!(product.initial_quantity, 5);
    }

    #[test]
    fn empty_name_is_accepted() {
        let product = request(json!({
            "name": "", "sku": "W-3", "price": 1, "warehouse_id": 1, "initial_quantity": 0
        }))
        .into_new_product()
        .unwrap();
        assert_eq!(product.name, "");
    }

    #[test]
    fn complete_request_converts() {
        let product = request(json!({
            "name": "Widget", "sku": "W-1", "price": "12.50", "warehouse_id": 3, "initial_quantity": 0
        }))
        .into_new_product()
        .unwrap();
        assert_eq!(
            product,
            NewProduct {
                name: "Widget".into(),
                sku: "W-1".into(),
                price: dec!(12.50),
                warehouse_id: 3,
                initial_quantity: 0,
            }
        );
    }
}

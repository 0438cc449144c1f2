use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = r#"
# Inventory API

Products, per-warehouse stock and low-stock alerting for one or more companies.

## Error Handling

Every error uses the same body and status codes 400, 404, 409 or 500:

```json
{
  "error": "Conflict",
  "message": "SKU already exists",
  "request_id": "0b6f5e0a-3f55-4a8e-9d8e-7f0e6d3b1c2a",
  "timestamp": "2024-06-01T10:30:00+00:00"
}
```
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Products", description = "Product provisioning"),
        (name = "Alerts", description = "Low-stock reporting"),
        (name = "Demo", description = "Demo fixture bootstrap"),
        (name = "Health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::products::create_product,
        crate::handlers::alerts::low_stock_alerts,
        crate::handlers::demo::init_demo,
        crate::health::health_check,
    ),
    components(
        schemas(
            crate::handlers::products::CreateProductRequest,
            crate::handlers::products::CreateProductResponse,
            crate::services::alerts::LowStockReport,
            crate::services::alerts::LowStockAlert,
            crate::services::alerts::SupplierSummary,
            crate::services::demo::DemoFixture,
            crate::health::HealthInfo,
            crate::health::HealthStatus,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let openapi = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Inventory API"));
        assert!(json.contains("/api/products"));
        assert!(json.contains("/api/companies/{company_id}/alerts/low-stock"));
        assert!(json.contains("/init-demo"));
        assert!(json.contains("/health"));
    }
}

use utoipa::OpenApi;

use super::handlers::drops::DropStatusResponse;
use super::handlers::orders::OrdersByPhoneResponse;
use super::handlers::symbicode::{VerifyRequest, VerifyResponse};
use crate::drops::Drop;
use crate::orders::Order;
use crate::purchase::{PurchaseRequest, PurchaseResult};
use crate::symbicode::Symbicode;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::health::health_check,
        super::handlers::drops::list_active_drops,
        super::handlers::drops::get_drop_status,
        super::handlers::drops::purchase_drop,
        super::handlers::webhook::payment_webhook,
        super::handlers::orders::get_order,
        super::handlers::orders::get_orders_by_phone,
        super::handlers::symbicode::verify_symbicode,
    ),
    components(schemas(
        Drop,
        DropStatusResponse,
        PurchaseRequest,
        PurchaseResult,
        Order,
        OrdersByPhoneResponse,
        Symbicode,
        VerifyRequest,
        VerifyResponse,
    )),
    tags(
        (name = "Drops", description = "Limited-drop catalog and purchase"),
        (name = "Payments", description = "Payment gateway webhook"),
        (name = "Orders", description = "Order lookups"),
        (name = "Symbicode", description = "Anti-counterfeit token verification"),
        (name = "System", description = "Liveness"),
    )
)]
pub struct ApiDoc;

use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::CartList,
    },
    models::{CartEntry, Category, Item, User},
    response::{ApiResponse, MessageResponse},
    routes::{auth, cart, catalog, health},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::current_user,
        catalog::list_items,
        catalog::list_categories,
        cart::add_to_cart,
        cart::cart_list,
        cart::remove_from_cart,
        cart::add_quantity,
        cart::remove_quantity
    ),
    components(
        schemas(
            User,
            Item,
            Category,
            CartEntry,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            CartList,
            ApiResponse<User>,
            ApiResponse<CartList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and session endpoints"),
        (name = "Catalog", description = "Item and category listings"),
        (name = "Cart", description = "Per-user cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

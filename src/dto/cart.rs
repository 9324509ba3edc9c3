use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::CartEntry;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddCartQuery {
    /// Item id to add.
    pub id: i64,
    pub user_id: String,
    /// Defaults to 1.
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CartQuery {
    pub user_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RemoveCartQuery {
    pub user_id: String,
    pub product_id: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuantityQuery {
    /// Product id of the cart entry.
    pub id: i64,
    pub user_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CartList {
    #[schema(value_type = Vec<CartEntry>)]
    pub items: Vec<CartEntry>,
}

pub mod auth;
pub mod recipe;
pub mod envelope;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, User};
pub use recipe::{
    Ingredient, Recipe, RecipeField, RecipeFields, RecipeScope, RecipeUpdate, ResourceId,
};
pub use envelope::{decode_list, decode_one, Envelope};

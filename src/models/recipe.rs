use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::constants::{MAX_FOTO_URL, MAX_PASOS, MAX_TIEMPO, MAX_TITULO};

// ============================================================================
// IDENTIFICADOR - El backend lo manda como número o como string
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct ResourceId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for ResourceId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => ResourceId(n.to_string()),
            RawId::Text(s) => ResourceId(s),
        }
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        ResourceId(s.to_string())
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        ResourceId(n.to_string())
    }
}

impl ResourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// RECETA
// ============================================================================

/// Copia local (posiblemente desactualizada) de una receta del backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: ResourceId,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub tiempo: Option<String>,
    #[serde(default)]
    pub pasos: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub etiquetas: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub ingredientes: Vec<Ingredient>,
}

impl Recipe {
    /// Título para mostrar ("Sin titulo" si viene vacío)
    pub fn display_title(&self) -> &str {
        match self.titulo.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => "Sin titulo",
        }
    }
}

/// Ingrediente: nombre + cantidad opcional.
/// Acepta `"sal"` o `{"nombre": "sal", "pivot": {"cantidad": "1 pizca"}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawIngredient")]
pub struct Ingredient {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIngredient {
    Plain(String),
    Detailed {
        #[serde(alias = "name")]
        nombre: Option<String>,
        #[serde(default)]
        cantidad: Option<Quantity>,
        #[serde(default)]
        pivot: Option<Pivot>,
    },
}

#[derive(Deserialize)]
struct Pivot {
    #[serde(default)]
    cantidad: Option<Quantity>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Quantity {
    Text(String),
    Number(serde_json::Number),
}

impl From<Quantity> for String {
    fn from(q: Quantity) -> Self {
        match q {
            Quantity::Text(s) => s,
            Quantity::Number(n) => n.to_string(),
        }
    }
}

impl From<RawIngredient> for Ingredient {
    fn from(raw: RawIngredient) -> Self {
        match raw {
            RawIngredient::Plain(name) => Ingredient { name, quantity: None },
            RawIngredient::Detailed { nombre, cantidad, pivot } => {
                // La cantidad de la tabla pivote manda sobre la plana
                let quantity = pivot
                    .and_then(|p| p.cantidad)
                    .or(cantidad)
                    .map(String::from)
                    .filter(|q| !q.is_empty());
                Ingredient {
                    name: nombre.unwrap_or_default(),
                    quantity,
                }
            }
        }
    }
}

fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// CAMPOS EDITABLES
// ============================================================================

/// Los cuatro campos editables de una receta, como texto plano
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeFields {
    pub titulo: String,
    pub tiempo: String,
    pub pasos: String,
    pub foto: String,
}

impl RecipeFields {
    /// Snapshot desde el backend (null → "")
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            titulo: recipe.titulo.clone().unwrap_or_default(),
            tiempo: recipe.tiempo.clone().unwrap_or_default(),
            pasos: recipe.pasos.clone().unwrap_or_default(),
            foto: recipe.foto.clone().unwrap_or_default(),
        }
    }

    pub fn trimmed(&self) -> Self {
        Self {
            titulo: self.titulo.trim().to_string(),
            tiempo: self.tiempo.trim().to_string(),
            pasos: self.pasos.trim().to_string(),
            foto: self.foto.trim().to_string(),
        }
    }

    /// Los cuatro campos vacíos a la vez
    pub fn is_blank(&self) -> bool {
        self.titulo.trim().is_empty()
            && self.tiempo.trim().is_empty()
            && self.pasos.trim().is_empty()
            && self.foto.trim().is_empty()
    }

    pub fn get(&self, field: RecipeField) -> &str {
        match field {
            RecipeField::Titulo => &self.titulo,
            RecipeField::Tiempo => &self.tiempo,
            RecipeField::Pasos => &self.pasos,
            RecipeField::Foto => &self.foto,
        }
    }

    pub fn set(&mut self, field: RecipeField, value: String) {
        match field {
            RecipeField::Titulo => self.titulo = value,
            RecipeField::Tiempo => self.tiempo = value,
            RecipeField::Pasos => self.pasos = value,
            RecipeField::Foto => self.foto = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecipeField {
    Titulo,
    Tiempo,
    Pasos,
    Foto,
}

impl RecipeField {
    pub const ALL: [RecipeField; 4] = [
        RecipeField::Titulo,
        RecipeField::Tiempo,
        RecipeField::Pasos,
        RecipeField::Foto,
    ];

    pub fn max_len(self) -> usize {
        match self {
            RecipeField::Titulo => MAX_TITULO,
            RecipeField::Tiempo => MAX_TIEMPO,
            RecipeField::Pasos => MAX_PASOS,
            RecipeField::Foto => MAX_FOTO_URL,
        }
    }
}

/// Cuerpo del PUT /recipes/{id}: campos vacíos viajan como `null`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecipeUpdate {
    pub titulo: Option<String>,
    pub tiempo: Option<String>,
    pub pasos: Option<String>,
    pub foto: Option<String>,
}

impl RecipeUpdate {
    pub fn from_fields(fields: &RecipeFields) -> Self {
        fn non_empty(value: &str) -> Option<String> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }

        Self {
            titulo: non_empty(&fields.titulo),
            tiempo: non_empty(&fields.tiempo),
            pasos: non_empty(&fields.pasos),
            foto: non_empty(&fields.foto),
        }
    }
}

/// Alcance de un listado
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecipeScope {
    /// GET /recipes
    All,
    /// GET /my-recipes
    Mine,
}

impl RecipeScope {
    pub fn path(self) -> &'static str {
        match self {
            RecipeScope::All => "/recipes",
            RecipeScope::Mine => "/my-recipes",
        }
    }
}

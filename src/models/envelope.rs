// ============================================================================
// ENVELOPE - Desenvolver `{ "data": ... }` vs payload directo
// ============================================================================
// El backend (Laravel Resources / paginación) a veces envuelve la respuesta
// en `data` y a veces no. Se decodifica en un único paso:
//   1. `{ "data": T }`  → T
//   2. `T`              → T
// Para listados, si ninguna forma encaja el resultado es una lista vacía.
// ============================================================================

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}

/// Decodifica un objeto en cualquiera de las dos formas
pub fn decode_one<T: DeserializeOwned>(body: Option<Value>) -> Result<T, String> {
    let body = body.ok_or_else(|| "Respuesta vacía".to_string())?;
    serde_json::from_value::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|e| format!("Parse error: {}", e))
}

/// Decodifica un listado; falla cerrado (lista vacía) si no encaja ninguna forma
pub fn decode_list<T: DeserializeOwned>(body: Option<Value>) -> Vec<T> {
    let Some(body) = body else {
        log::warn!("⚠️ [API] Listado sin cuerpo, se trata como vacío");
        return Vec::new();
    };
    match serde_json::from_value::<Envelope<Vec<T>>>(body) {
        Ok(envelope) => envelope.into_inner(),
        Err(e) => {
            log::warn!("⚠️ [API] Listado con forma desconocida, se trata como vacío: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recipe;
    use serde_json::json;

    #[test]
    fn list_accepts_both_shapes_and_keeps_order() {
        let bare = json!([{"id": 1, "titulo": "A"}, {"id": 2, "titulo": "B"}]);
        let wrapped = json!({"data": [{"id": 1, "titulo": "A"}, {"id": 2, "titulo": "B"}], "meta": {"total": 2}});

        let a: Vec<Recipe> = decode_list(Some(bare));
        let b: Vec<Recipe> = decode_list(Some(wrapped));
        assert_eq!(a, b);
        assert_eq!(a.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), ["1", "2"]);
    }

    #[test]
    fn list_fails_closed() {
        let junk: Vec<Recipe> = decode_list(Some(json!({"message": "ok"})));
        assert!(junk.is_empty());
        let none: Vec<Recipe> = decode_list(None);
        assert!(none.is_empty());
    }

    #[test]
    fn one_accepts_both_shapes() {
        let wrapped: Recipe = decode_one(Some(json!({"data": {"id": 3, "titulo": "Sopa"}}))).unwrap();
        let bare: Recipe = decode_one(Some(json!({"id": 3, "titulo": "Sopa"}))).unwrap();
        assert_eq!(wrapped, bare);
        assert!(decode_one::<Recipe>(Some(json!({"data": null}))).is_err());
        assert!(decode_one::<Recipe>(None).is_err());
    }
}

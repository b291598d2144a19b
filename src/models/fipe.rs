//! Modelos de la tabla de referencia FIPE (marca → modelo → año)

use serde::{Deserialize, Serialize};

/// Entrada de una lista desplegable: código opaco + nombre legible
///
/// El código se usa como valor seleccionado y como clave de las consultas
/// dependientes; el nombre se compara con los textos guardados del camión.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedCode {
    pub code: String,
    pub name: String,
}

impl NamedCode {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Buscar una entrada por nombre exacto
pub fn find_by_name<'a>(entries: &'a [NamedCode], name: &str) -> Option<&'a NamedCode> {
    entries.iter().find(|entry| entry.name == name)
}

/// Buscar una entrada por código
pub fn find_by_code<'a>(entries: &'a [NamedCode], code: &str) -> Option<&'a NamedCode> {
    entries.iter().find(|entry| entry.code == code)
}

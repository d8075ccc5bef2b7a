//! Diferenças campo a campo entre os instantâneos de um evento de auditoria.

use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use std::error::Error;

/// Um campo cujo valor mudou entre `antes` e `depois`. Campo ausente em um
/// dos lados aparece como `None` (criação e remoção caem aqui naturalmente).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CampoAlterado {
    pub campo: String,
    pub antes: Option<JsonValue>,
    pub depois: Option<JsonValue>,
}

// Instantâneo ausente ou vazio conta como objeto vazio; um valor que não é
// objeto JSON é comparado inteiro sob o campo "_valor".
fn parse_instantaneo(raw: Option<&str>) -> Result<JsonValue, Box<dyn Error>> {
    match raw {
        Some(s) if !s.trim().is_empty() => {
            let v: JsonValue = serde_json::from_str(s)
                .map_err(|e| format!("instantâneo de auditoria inválido: {}", e))?;
            Ok(v)
        }
        _ => Ok(JsonValue::Object(serde_json::Map::new())),
    }
}

/// Passada única sobre a união das chaves dos dois instantâneos, em ordem
/// alfabética, devolvendo só os campos cujo valor mudou.
pub fn diff_campos(
    antes: Option<&str>,
    depois: Option<&str>,
) -> Result<Vec<CampoAlterado>, Box<dyn Error>> {
    let antes_v = parse_instantaneo(antes)?;
    let depois_v = parse_instantaneo(depois)?;

    let (antes_obj, depois_obj) = match (antes_v.as_object(), depois_v.as_object()) {
        (Some(a), Some(d)) => (a.clone(), d.clone()),
        _ => {
            // pelo menos um lado não é objeto: compara o valor inteiro
            if antes_v == depois_v {
                return Ok(Vec::new());
            }
            return Ok(vec![CampoAlterado {
                campo: "_valor".to_string(),
                antes: Some(antes_v),
                depois: Some(depois_v),
            }]);
        }
    };

    let mut chaves: BTreeSet<&String> = BTreeSet::new();
    chaves.extend(antes_obj.keys());
    chaves.extend(depois_obj.keys());

    let mut alterados = Vec::new();
    for chave in chaves {
        let a = antes_obj.get(chave);
        let d = depois_obj.get(chave);
        if a != d {
            alterados.push(CampoAlterado {
                campo: chave.clone(),
                antes: a.cloned(),
                depois: d.cloned(),
            });
        }
    }
    Ok(alterados)
}

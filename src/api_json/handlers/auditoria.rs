use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::auditoria::{diff_campos, listar_eventos, obter_evento};

const ENTIDADES_CONHECIDAS: [&str; 3] = ["curso", "banner", "depoimento"];

/// GET /admin/auditoria?entidade=curso&limite=50
pub async fn listar_auditoria_handler(
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let qm = query.into_inner();

    let entidade = match qm.get("entidade").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(raw) => {
            if !ENTIDADES_CONHECIDAS.contains(&raw) {
                return HttpResponse::BadRequest().json(json!({
                    "error": format!("entidade inválida: '{}'", raw),
                    "entidades": ENTIDADES_CONHECIDAS
                }));
            }
            Some(raw.to_string())
        }
        None => None,
    };
    let limite: i64 = qm
        .get("limite")
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(100);

    match listar_eventos(entidade.as_deref(), limite) {
        Ok(eventos) => HttpResponse::Ok().json(json!({"total": eventos.len(), "eventos": eventos})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao listar auditoria: {}", e)})),
    }
}

/// GET /admin/auditoria/{id}/diff
/// Campos que mudaram entre os instantâneos de antes e depois do evento.
pub async fn diff_auditoria_handler(path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    let evento = match obter_evento(id) {
        Ok(Some(ev)) => ev,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({"error": "evento não encontrado"}))
        }
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("falha ao buscar evento: {}", e)}))
        }
    };

    match diff_campos(evento.dados_antes.as_deref(), evento.dados_depois.as_deref()) {
        Ok(alteracoes) => HttpResponse::Ok().json(json!({
            "evento_id": evento.id,
            "entidade": evento.entidade,
            "entidade_id": evento.entidade_id,
            "acao": evento.acao,
            "autor": evento.autor,
            "ts": evento.ts,
            "alteracoes": alteracoes
        })),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao calcular diff: {}", e)})),
    }
}

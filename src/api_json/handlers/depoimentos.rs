use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::api_json::{parse_depoimento_input, validar_depoimento};
use crate::auditoria;
use crate::models::StatusDepoimento;
use crate::storage::db;

use super::autor_do_request;

/// POST /depoimentos
/// Submissão pública; entra como `pendente` e só aparece no site depois da
/// moderação.
pub async fn criar_depoimento_handler(body: web::Json<serde_json::Value>) -> impl Responder {
    let json_str = match serde_json::to_string(&body.into_inner()) {
        Ok(s) => s,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("corpo JSON inválido: {}", e)}))
        }
    };
    let input = match parse_depoimento_input(&json_str) {
        Ok(i) => i,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("falha ao parsear depoimento: {}", e)}))
        }
    };
    if let Err(e) = validar_depoimento(&input) {
        return HttpResponse::BadRequest().json(json!({"error": e}));
    }

    match db::inserir_depoimento(&input) {
        Ok(id) => HttpResponse::Ok().json(json!({"status": "ok", "id": id})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao salvar depoimento: {}", e)})),
    }
}

/// GET /depoimentos — só os aprovados, para o site.
pub async fn listar_depoimentos_handler() -> impl Responder {
    match db::listar_depoimentos(Some(StatusDepoimento::Aprovado)) {
        Ok(deps) => HttpResponse::Ok().json(json!({"depoimentos": deps})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao listar depoimentos: {}", e)})),
    }
}

/// GET /admin/depoimentos?status=pendente — fila de moderação.
pub async fn admin_listar_depoimentos_handler(
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let qm = query.into_inner();
    let status = match qm.get("status").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(raw) => match StatusDepoimento::parse(raw) {
            Some(s) => Some(s),
            None => {
                return HttpResponse::BadRequest().json(json!({
                    "error": format!("status inválido: '{}' (use pendente, aprovado ou rejeitado)", raw)
                }))
            }
        },
        None => None,
    };

    match db::listar_depoimentos(status) {
        Ok(deps) => HttpResponse::Ok().json(json!({"total": deps.len(), "depoimentos": deps})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao listar depoimentos: {}", e)})),
    }
}

/// PUT /admin/depoimentos/{id}/status com corpo {"status": "aprovado"}
pub async fn moderar_depoimento_handler(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let id = path.into_inner();
    let status = match body.get("status").and_then(|v| v.as_str()) {
        Some(raw) => match StatusDepoimento::parse(raw) {
            Some(s) => s,
            None => {
                return HttpResponse::BadRequest()
                    .json(json!({"error": format!("status inválido: '{}'", raw)}))
            }
        },
        None => {
            return HttpResponse::BadRequest().json(json!({"error": "status é obrigatório"}))
        }
    };

    let antes = match db::obter_depoimento(id) {
        Ok(Some(dep)) => serde_json::to_string(&dep).ok(),
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({"error": "depoimento não encontrado"}))
        }
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("falha ao buscar depoimento: {}", e)}))
        }
    };

    match db::atualizar_status_depoimento(id, status) {
        Ok(true) => {
            let depois = match db::obter_depoimento(id) {
                Ok(Some(dep)) => serde_json::to_string(&dep).ok(),
                _ => None,
            };
            let autor = autor_do_request(&req);
            if let Err(e) = auditoria::registrar_evento(
                autor.as_deref(),
                "depoimento",
                id,
                "moderar",
                antes.as_deref(),
                depois.as_deref(),
            ) {
                eprintln!("falha ao registrar auditoria de depoimento {}: {}", id, e);
            }
            HttpResponse::Ok().json(json!({"status": "ok", "id": id}))
        }
        Ok(false) => HttpResponse::NotFound().json(json!({"error": "depoimento não encontrado"})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao moderar depoimento: {}", e)})),
    }
}

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::api_json::{parse_lead_input, resolver_curso, validar_lead};
use crate::storage::db;

/// POST /leads
/// Formulário público de interesse. O limitador de envios roda no banco
/// hospedado (procedure), então aqui só validamos e persistimos; uma
/// referência de curso que não resolve não invalida o lead.
pub async fn criar_lead_handler(body: web::Json<serde_json::Value>) -> impl Responder {
    let json_str = match serde_json::to_string(&body.into_inner()) {
        Ok(s) => s,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("corpo JSON inválido: {}", e)}))
        }
    };
    let input = match parse_lead_input(&json_str) {
        Ok(i) => i,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("falha ao parsear lead: {}", e)}))
        }
    };
    if let Err(e) = validar_lead(&input) {
        return HttpResponse::BadRequest().json(json!({"error": e}));
    }

    let resolvido = match resolver_curso(input) {
        Ok(r) => r,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("falha ao resolver curso de interesse: {}", e)}))
        }
    };

    match db::inserir_lead(&resolvido) {
        Ok(id) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "id": id,
            "curso_interesse": resolvido.curso_id
        })),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao salvar lead: {}", e)})),
    }
}

/// GET /admin/leads?curso=3&desde=2026-01-01T00:00:00Z&limite=50
/// Caixa de entrada, do mais recente para o mais antigo.
pub async fn listar_leads_handler(query: web::Query<HashMap<String, String>>) -> impl Responder {
    let qm = query.into_inner();

    let curso: Option<i64> = match qm.get("curso").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                return HttpResponse::BadRequest()
                    .json(json!({"error": format!("curso inválido: '{}'", raw)}))
            }
        },
        None => None,
    };

    let desde = qm
        .get("desde")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    let limite: usize = qm
        .get("limite")
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(100);

    match db::listar_leads(curso, desde.as_deref(), limite) {
        Ok(leads) => HttpResponse::Ok().json(json!({"total": leads.len(), "leads": leads})),
        Err(e) => HttpResponse::BadRequest()
            .json(json!({"error": format!("falha ao listar leads: {}", e)})),
    }
}

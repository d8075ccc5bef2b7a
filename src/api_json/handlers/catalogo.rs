use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::catalogo::{projetar, EstadoCatalogo, FiltroTipo};
use crate::storage::db;

/// GET /cursos
/// Coleção completa, na ordem de inserção. É a busca única que a vista do
/// catálogo faz na montagem; um catálogo vazio responde 200 com lista vazia.
pub async fn listar_cursos_handler() -> impl Responder {
    match db::listar_cursos() {
        Ok(cursos) => HttpResponse::Ok().json(json!({"total": cursos.len(), "cursos": cursos})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao listar cursos: {}", e)})),
    }
}

/// GET /cursos/{id}
pub async fn obter_curso_handler(path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match db::obter_curso(id) {
        Ok(Some(curso)) => HttpResponse::Ok().json(curso),
        Ok(None) => HttpResponse::NotFound().json(json!({"error": "curso não encontrado"})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao buscar curso: {}", e)})),
    }
}

/// GET /catalogo?tipo=ead&busca=cabelo&pagina=2
/// Roda o pipeline completo da vista (filtro, busca, promoções primeiro,
/// paginação) e devolve a página projetada.
pub async fn catalogo_handler(query: web::Query<HashMap<String, String>>) -> impl Responder {
    let qm = query.into_inner();

    let filtro = match qm.get("tipo").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(raw) => match FiltroTipo::parse(raw) {
            Some(f) => f,
            None => {
                return HttpResponse::BadRequest().json(json!({
                    "error": format!("tipo inválido: '{}' (use all, presencial ou ead)", raw)
                }))
            }
        },
        None => FiltroTipo::Todos,
    };

    let busca = qm.get("busca").cloned().unwrap_or_default();
    let pagina: usize = qm
        .get("pagina")
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(1)
        .max(1);

    let cursos = match db::listar_cursos() {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("falha ao carregar o catálogo: {}", e)}))
        }
    };

    let estado = EstadoCatalogo {
        filtro_tipo: filtro,
        termo_busca: busca,
        pagina_atual: pagina,
    };
    HttpResponse::Ok().json(projetar(&cursos, &estado))
}

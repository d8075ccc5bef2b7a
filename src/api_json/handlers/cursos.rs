use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{parse_curso_input, validar_curso};
use crate::auditoria;
use crate::storage::db;

use super::autor_do_request;

// Instantâneo JSON da linha atual do curso, para o log de auditoria.
// Antes e depois usam a mesma forma (a entidade persistida, com id).
fn instantaneo_curso(id: i64) -> Option<String> {
    match db::obter_curso(id) {
        Ok(Some(curso)) => serde_json::to_string(&curso).ok(),
        _ => None,
    }
}

fn registrar(
    autor: Option<&str>,
    id: i64,
    acao: &str,
    antes: Option<String>,
    depois: Option<String>,
) {
    if let Err(e) =
        auditoria::registrar_evento(autor, "curso", id, acao, antes.as_deref(), depois.as_deref())
    {
        eprintln!("falha ao registrar auditoria de curso {}: {}", id, e);
    }
}

/// POST /admin/cursos
pub async fn criar_curso_handler(
    req: HttpRequest,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let json_str = match serde_json::to_string(&body.into_inner()) {
        Ok(s) => s,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("corpo JSON inválido: {}", e)}))
        }
    };
    let input = match parse_curso_input(&json_str) {
        Ok(i) => i,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("falha ao parsear curso: {}", e)}))
        }
    };
    if let Err(e) = validar_curso(&input) {
        return HttpResponse::BadRequest().json(json!({"error": e}));
    }

    match db::inserir_curso(&input) {
        Ok(id) => {
            let autor = autor_do_request(&req);
            registrar(autor.as_deref(), id, "criar", None, instantaneo_curso(id));
            HttpResponse::Ok().json(json!({"status": "ok", "id": id}))
        }
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao inserir curso: {}", e)})),
    }
}

/// PUT /admin/cursos/{id}
pub async fn atualizar_curso_handler(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let id = path.into_inner();
    let json_str = match serde_json::to_string(&body.into_inner()) {
        Ok(s) => s,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("corpo JSON inválido: {}", e)}))
        }
    };
    let input = match parse_curso_input(&json_str) {
        Ok(i) => i,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("falha ao parsear curso: {}", e)}))
        }
    };
    if let Err(e) = validar_curso(&input) {
        return HttpResponse::BadRequest().json(json!({"error": e}));
    }

    let antes = instantaneo_curso(id);
    if antes.is_none() {
        return HttpResponse::NotFound().json(json!({"error": "curso não encontrado"}));
    }

    match db::atualizar_curso(id, &input) {
        Ok(true) => {
            let autor = autor_do_request(&req);
            registrar(autor.as_deref(), id, "atualizar", antes, instantaneo_curso(id));
            HttpResponse::Ok().json(json!({"status": "ok", "id": id}))
        }
        Ok(false) => HttpResponse::NotFound().json(json!({"error": "curso não encontrado"})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao atualizar curso: {}", e)})),
    }
}

/// DELETE /admin/cursos/{id}
pub async fn remover_curso_handler(req: HttpRequest, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    let antes = instantaneo_curso(id);
    if antes.is_none() {
        return HttpResponse::NotFound().json(json!({"error": "curso não encontrado"}));
    }

    match db::remover_curso(id) {
        Ok(true) => {
            let autor = autor_do_request(&req);
            registrar(autor.as_deref(), id, "remover", antes, None);
            HttpResponse::Ok().json(json!({"status": "ok", "id": id}))
        }
        Ok(false) => HttpResponse::NotFound().json(json!({"error": "curso não encontrado"})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao remover curso: {}", e)})),
    }
}

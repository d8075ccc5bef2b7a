use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use futures_util::stream::StreamExt;
use serde_json::json;
use tokio::io::AsyncWriteExt;

use crate::api_json::{parse_banner_input, BannerInput};
use crate::auditoria;
use crate::storage::db;

use super::autor_do_request;

const DIRETORIO_UPLOADS: &str = "uploads/banners";

fn instantaneo_banner(id: i64) -> Option<String> {
    match db::obter_banner(id) {
        Ok(Some(banner)) => serde_json::to_string(&banner).ok(),
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
        auditoria::registrar_evento(autor, "banner", id, acao, antes.as_deref(), depois.as_deref())
    {
        eprintln!("falha ao registrar auditoria de banner {}: {}", id, e);
    }
}

fn validar_banner(input: &BannerInput) -> Result<(), String> {
    if input.titulo.trim().is_empty() {
        return Err("titulo é obrigatório".to_string());
    }
    if input.imagem.trim().is_empty() || input.imagem.contains("..") {
        return Err(format!("imagem inválida: '{}'", input.imagem));
    }
    Ok(())
}

/// GET /banners
/// Só os banners ativos, na ordem do carrossel (posição e depois id).
pub async fn listar_banners_handler() -> impl Responder {
    match db::listar_banners(true) {
        Ok(banners) => HttpResponse::Ok().json(json!({"banners": banners})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao listar banners: {}", e)})),
    }
}

/// GET /admin/banners (inclui os inativos)
pub async fn admin_listar_banners_handler() -> impl Responder {
    match db::listar_banners(false) {
        Ok(banners) => HttpResponse::Ok().json(json!({"banners": banners})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao listar banners: {}", e)})),
    }
}

/// POST /admin/banners
pub async fn criar_banner_handler(
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
    let input = match parse_banner_input(&json_str) {
        Ok(i) => i,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("falha ao parsear banner: {}", e)}))
        }
    };
    if let Err(e) = validar_banner(&input) {
        return HttpResponse::BadRequest().json(json!({"error": e}));
    }

    match db::inserir_banner(&input) {
        Ok(id) => {
            let autor = autor_do_request(&req);
            registrar(autor.as_deref(), id, "criar", None, instantaneo_banner(id));
            HttpResponse::Ok().json(json!({"status": "ok", "id": id}))
        }
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao inserir banner: {}", e)})),
    }
}

/// PUT /admin/banners/{id}
pub async fn atualizar_banner_handler(
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
    let input = match parse_banner_input(&json_str) {
        Ok(i) => i,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("falha ao parsear banner: {}", e)}))
        }
    };
    if let Err(e) = validar_banner(&input) {
        return HttpResponse::BadRequest().json(json!({"error": e}));
    }

    let antes = instantaneo_banner(id);
    if antes.is_none() {
        return HttpResponse::NotFound().json(json!({"error": "banner não encontrado"}));
    }

    match db::atualizar_banner(id, &input) {
        Ok(true) => {
            let autor = autor_do_request(&req);
            registrar(autor.as_deref(), id, "atualizar", antes, instantaneo_banner(id));
            HttpResponse::Ok().json(json!({"status": "ok", "id": id}))
        }
        Ok(false) => HttpResponse::NotFound().json(json!({"error": "banner não encontrado"})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao atualizar banner: {}", e)})),
    }
}

/// DELETE /admin/banners/{id}
pub async fn remover_banner_handler(req: HttpRequest, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    let antes = instantaneo_banner(id);
    if antes.is_none() {
        return HttpResponse::NotFound().json(json!({"error": "banner não encontrado"}));
    }

    match db::remover_banner(id) {
        Ok(true) => {
            let autor = autor_do_request(&req);
            registrar(autor.as_deref(), id, "remover", antes, None);
            HttpResponse::Ok().json(json!({"status": "ok", "id": id}))
        }
        Ok(false) => HttpResponse::NotFound().json(json!({"error": "banner não encontrado"})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao remover banner: {}", e)})),
    }
}

/// POST /admin/banners/upload
/// Recebe as imagens por multipart e grava em `uploads/banners`. A entrega
/// para o site (CDN, redimensionamento) fica fora desta API; aqui só
/// guardamos o arquivo e devolvemos os nomes salvos para o cadastro.
pub async fn upload_banner_handler(mut payload: Multipart) -> impl Responder {
    let base = std::path::Path::new(DIRETORIO_UPLOADS);
    if let Err(e) = std::fs::create_dir_all(base) {
        return HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao criar diretório de uploads: {}", e)}));
    }

    let mut salvos: Vec<String> = Vec::new();
    while let Some(field_res) = payload.next().await {
        match field_res {
            Ok(mut field) => {
                let filename = field
                    .content_disposition()
                    .get_filename()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| {
                        format!("banner-{}.img", chrono::Utc::now().timestamp_millis())
                    });

                // nada de caminhos relativos escapando do diretório
                if filename.contains("..") || filename.contains('/') {
                    continue;
                }

                let filepath = base.join(&filename);
                match tokio::fs::File::create(&filepath).await {
                    Ok(mut f) => {
                        while let Some(chunk) = field.next().await {
                            match chunk {
                                Ok(bytes) => {
                                    if let Err(e) = f.write_all(&bytes).await {
                                        eprintln!("falha ao gravar chunk do upload: {}", e);
                                        break;
                                    }
                                }
                                Err(e) => {
                                    eprintln!("erro no stream do upload: {}", e);
                                    break;
                                }
                            }
                        }
                        salvos.push(filename);
                    }
                    Err(e) => {
                        eprintln!("falha ao criar arquivo de upload: {}", e);
                    }
                }
            }
            Err(e) => {
                eprintln!("erro em campo multipart: {}", e);
            }
        }
    }

    HttpResponse::Ok().json(json!({"status": "ok", "salvos": salvos}))
}
